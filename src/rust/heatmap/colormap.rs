use plotters::style::RGBColor;

use super::error::RenderError;

const BLUES: &[(u8, u8, u8)] = &[
    (0xf7, 0xfb, 0xff),
    (0xde, 0xeb, 0xf7),
    (0xc6, 0xdb, 0xef),
    (0x9e, 0xca, 0xe1),
    (0x6b, 0xae, 0xd6),
    (0x42, 0x92, 0xc6),
    (0x21, 0x71, 0xb5),
    (0x08, 0x51, 0x9c),
    (0x08, 0x30, 0x6b),
];

const GREENS: &[(u8, u8, u8)] = &[
    (0xf7, 0xfc, 0xf5),
    (0xe5, 0xf5, 0xe0),
    (0xc7, 0xe9, 0xc0),
    (0xa1, 0xd9, 0x9b),
    (0x74, 0xc4, 0x76),
    (0x41, 0xab, 0x5d),
    (0x23, 0x8b, 0x45),
    (0x00, 0x6d, 0x2c),
    (0x00, 0x44, 0x1b),
];

const REDS: &[(u8, u8, u8)] = &[
    (0xff, 0xf5, 0xf0),
    (0xfe, 0xe0, 0xd2),
    (0xfc, 0xbb, 0xa1),
    (0xfc, 0x92, 0x72),
    (0xfb, 0x6a, 0x4a),
    (0xef, 0x3b, 0x2c),
    (0xcb, 0x18, 0x1d),
    (0xa5, 0x0f, 0x15),
    (0x67, 0x00, 0x0d),
];

const ORANGES: &[(u8, u8, u8)] = &[
    (0xff, 0xf5, 0xeb),
    (0xfe, 0xe6, 0xce),
    (0xfd, 0xd0, 0xa2),
    (0xfd, 0xae, 0x6b),
    (0xfd, 0x8d, 0x3c),
    (0xf1, 0x69, 0x13),
    (0xd9, 0x48, 0x01),
    (0xa6, 0x36, 0x03),
    (0x7f, 0x27, 0x04),
];

const PURPLES: &[(u8, u8, u8)] = &[
    (0xfc, 0xfb, 0xfd),
    (0xef, 0xed, 0xf5),
    (0xda, 0xda, 0xeb),
    (0xbc, 0xbd, 0xdc),
    (0x9e, 0x9a, 0xc8),
    (0x80, 0x7d, 0xba),
    (0x6a, 0x51, 0xa3),
    (0x54, 0x27, 0x8f),
    (0x3f, 0x00, 0x7d),
];

const GREYS: &[(u8, u8, u8)] = &[
    (0xff, 0xff, 0xff),
    (0xf0, 0xf0, 0xf0),
    (0xd9, 0xd9, 0xd9),
    (0xbd, 0xbd, 0xbd),
    (0x96, 0x96, 0x96),
    (0x73, 0x73, 0x73),
    (0x52, 0x52, 0x52),
    (0x25, 0x25, 0x25),
    (0x00, 0x00, 0x00),
];

const VIRIDIS: &[(u8, u8, u8)] = &[
    (0x44, 0x01, 0x54),
    (0x48, 0x28, 0x78),
    (0x3e, 0x49, 0x89),
    (0x31, 0x68, 0x8e),
    (0x26, 0x82, 0x8e),
    (0x1f, 0x9e, 0x89),
    (0x35, 0xb7, 0x79),
    (0x6e, 0xce, 0x58),
    (0xb5, 0xde, 0x2b),
    (0xfd, 0xe7, 0x25),
];

const MAGMA: &[(u8, u8, u8)] = &[
    (0x00, 0x00, 0x04),
    (0x1c, 0x10, 0x44),
    (0x4f, 0x12, 0x7b),
    (0x81, 0x25, 0x81),
    (0xb5, 0x36, 0x7a),
    (0xe5, 0x50, 0x64),
    (0xfb, 0x87, 0x61),
    (0xfe, 0xc2, 0x87),
    (0xfc, 0xfd, 0xbf),
];

const PLASMA: &[(u8, u8, u8)] = &[
    (0x0d, 0x08, 0x87),
    (0x41, 0x04, 0x9d),
    (0x6a, 0x00, 0xa8),
    (0x8f, 0x0d, 0xa4),
    (0xb1, 0x2a, 0x90),
    (0xcc, 0x47, 0x78),
    (0xe1, 0x64, 0x62),
    (0xf2, 0x84, 0x4b),
    (0xfc, 0xa6, 0x36),
    (0xfc, 0xce, 0x25),
    (0xf0, 0xf9, 0x21),
];

const INFERNO: &[(u8, u8, u8)] = &[
    (0x00, 0x00, 0x04),
    (0x1b, 0x0c, 0x41),
    (0x4a, 0x0c, 0x6b),
    (0x78, 0x1c, 0x6d),
    (0xa5, 0x2c, 0x60),
    (0xcf, 0x44, 0x46),
    (0xed, 0x69, 0x25),
    (0xfb, 0x9b, 0x06),
    (0xf7, 0xd1, 0x3d),
    (0xfc, 0xff, 0xa4),
];

const CIVIDIS: &[(u8, u8, u8)] = &[
    (0x00, 0x22, 0x4e),
    (0x12, 0x35, 0x70),
    (0x3b, 0x49, 0x6c),
    (0x57, 0x5d, 0x6d),
    (0x70, 0x71, 0x73),
    (0x8a, 0x87, 0x79),
    (0xa6, 0x9d, 0x75),
    (0xc4, 0xb5, 0x6c),
    (0xe4, 0xcf, 0x5b),
    (0xfe, 0xe8, 0x38),
];

const BINARY: &[(u8, u8, u8)] = &[
    (0xff, 0xff, 0xff),
    (0x00, 0x00, 0x00),
];

const GRAY: &[(u8, u8, u8)] = &[
    (0x00, 0x00, 0x00),
    (0xff, 0xff, 0xff),
];

const YLGNBU: &[(u8, u8, u8)] = &[
    (0xff, 0xff, 0xd9),
    (0xed, 0xf8, 0xb1),
    (0xc7, 0xe9, 0xb4),
    (0x7f, 0xcd, 0xbb),
    (0x41, 0xb6, 0xc4),
    (0x1d, 0x91, 0xc0),
    (0x22, 0x5e, 0xa8),
    (0x25, 0x34, 0x94),
    (0x08, 0x1d, 0x58),
];

const BUGN: &[(u8, u8, u8)] = &[
    (0xf7, 0xfc, 0xfd),
    (0xe5, 0xf5, 0xf9),
    (0xcc, 0xec, 0xe6),
    (0x99, 0xd8, 0xc9),
    (0x66, 0xc2, 0xa4),
    (0x41, 0xae, 0x76),
    (0x23, 0x8b, 0x45),
    (0x00, 0x6d, 0x2c),
    (0x00, 0x44, 0x1b),
];

const YLORRD: &[(u8, u8, u8)] = &[
    (0xff, 0xff, 0xcc),
    (0xff, 0xed, 0xa0),
    (0xfe, 0xd9, 0x76),
    (0xfe, 0xb2, 0x4c),
    (0xfd, 0x8d, 0x3c),
    (0xfc, 0x4e, 0x2a),
    (0xe3, 0x1a, 0x1c),
    (0xbd, 0x00, 0x26),
    (0x80, 0x00, 0x26),
];

const COOLWARM: &[(u8, u8, u8)] = &[
    (0x3b, 0x4c, 0xc0),
    (0x62, 0x82, 0xea),
    (0x8d, 0xb0, 0xfe),
    (0xb8, 0xd0, 0xf9),
    (0xdd, 0xdd, 0xdd),
    (0xf5, 0xc4, 0xad),
    (0xf4, 0x9a, 0x7b),
    (0xde, 0x60, 0x4d),
    (0xb4, 0x04, 0x26),
];

const RDBU: &[(u8, u8, u8)] = &[
    (0x67, 0x00, 0x1f),
    (0xb2, 0x18, 0x2b),
    (0xd6, 0x60, 0x4d),
    (0xf4, 0xa5, 0x82),
    (0xfd, 0xdb, 0xc7),
    (0xf7, 0xf7, 0xf7),
    (0xd1, 0xe5, 0xf0),
    (0x92, 0xc5, 0xde),
    (0x43, 0x93, 0xc3),
    (0x21, 0x66, 0xac),
    (0x05, 0x30, 0x61),
];

const NAMED: &[(&str, &[(u8, u8, u8)])] = &[
    ("Blues", BLUES),
    ("Greens", GREENS),
    ("Reds", REDS),
    ("Oranges", ORANGES),
    ("Purples", PURPLES),
    ("Greys", GREYS),
    ("viridis", VIRIDIS),
    ("magma", MAGMA),
    ("plasma", PLASMA),
    ("inferno", INFERNO),
    ("cividis", CIVIDIS),
    ("binary", BINARY),
    ("gray", GRAY),
    ("YlGnBu", YLGNBU),
    ("BuGn", BUGN),
    ("YlOrRd", YLORRD),
    ("coolwarm", COOLWARM),
    ("RdBu", RDBU),
];

/// A named colour gradient sampled by linear interpolation between its stops
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: String,
    stops: &'static [(u8, u8, u8)],
    reversed: bool,
}

impl Colormap {
    /// Looks a colormap up by name. A `_r` suffix reverses the gradient.
    ///
    /// # Example
    /// ```
    /// use cfmatrix::Colormap;
    ///
    /// let cmap = Colormap::from_name("Blues_r")?;
    /// assert_eq!(cmap.name(), "Blues_r");
    /// assert!(Colormap::from_name("Rainbowish").is_err());
    /// # Ok::<(), cfmatrix::RenderError>(())
    /// ```
    pub fn from_name(name: &str) -> Result<Self, RenderError> {
        let (base, reversed) = match name.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (name, false),
        };
        NAMED
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(base))
            .map(|(_, stops)| Self {
                name: name.to_string(),
                stops: *stops,
                reversed,
            })
            .ok_or_else(|| RenderError::UnknownColormap(name.to_string()))
    }

    /// Names accepted by [`Colormap::from_name`], without the reversed variants
    pub fn available() -> impl Iterator<Item = &'static str> {
        NAMED.iter().map(|(name, _)| *name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Maps `t` in `[0, 1]` to a colour. Values outside the range are clamped,
    /// `NaN` maps to the low end.
    pub fn color(&self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let t = if self.reversed { 1.0 - t } else { t };

        let segments = (self.stops.len() - 1) as f64;
        let position = t * segments;
        let index = (position.floor() as usize).min(self.stops.len() - 2);
        let frac = position - index as f64;

        let (r0, g0, b0) = self.stops[index];
        let (r1, g1, b1) = self.stops[index + 1];
        RGBColor(lerp(r0, r1, frac), lerp(g0, g1, frac), lerp(b0, b1, frac))
    }
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8
}

/// Picks black or white text, whichever reads better on `background`.
pub(crate) fn text_color_on(background: RGBColor) -> RGBColor {
    let RGBColor(r, g, b) = background;
    let channel = |c: u8| {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    let luminance = 0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b);
    if luminance > 0.408 {
        RGBColor(0, 0, 0)
    } else {
        RGBColor(255, 255, 255)
    }
}
