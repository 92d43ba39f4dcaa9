use std::env;
use log::warn;

/// Environment variable holding the default figure size as `"width,height"` in inches
pub const FIG_SIZE_ENV: &str = "CFMATRIX_FIG_SIZE";
/// Environment variable holding the default resolution in dots per inch
pub const DPI_ENV: &str = "CFMATRIX_DPI";

/// Figure settings used when a render configuration leaves them unset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotDefaults {
    /// Figure size as (width, height) in inches
    pub fig_size: (f64, f64),
    /// Pixels per inch of the rendered figure
    pub dpi: f64,
}

impl Default for PlotDefaults {
    fn default() -> Self {
        Self {
            fig_size: (6.4, 4.8),
            dpi: 100.0,
        }
    }
}

impl PlotDefaults {
    /// Reads the defaults from `CFMATRIX_FIG_SIZE` and `CFMATRIX_DPI`,
    /// keeping the built-in value for anything unset or malformed.
    pub fn from_env() -> Self {
        Self::from_vars(env::var(FIG_SIZE_ENV).ok(), env::var(DPI_ENV).ok())
    }

    fn from_vars(fig_size: Option<String>, dpi: Option<String>) -> Self {
        let mut defaults = Self::default();

        if let Some(raw) = fig_size {
            match parse_fig_size(&raw) {
                Some(size) => defaults.fig_size = size,
                None => warn!("Ignoring malformed {}={:?}, expected \"width,height\"", FIG_SIZE_ENV, raw),
            }
        }

        if let Some(raw) = dpi {
            match raw.trim().parse::<f64>() {
                Ok(dpi) if dpi.is_finite() && dpi > 0.0 => defaults.dpi = dpi,
                _ => warn!("Ignoring malformed {}={:?}", DPI_ENV, raw),
            }
        }

        defaults
    }
}

fn parse_fig_size(raw: &str) -> Option<(f64, f64)> {
    let (width, height) = raw.split_once(',')?;
    let width = width.trim().parse::<f64>().ok()?;
    let height = height.trim().parse::<f64>().ok()?;
    let valid = |v: f64| v.is_finite() && v > 0.0;
    (valid(width) && valid(height)).then_some((width, height))
}
