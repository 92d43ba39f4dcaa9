use std::fs;
use std::path::Path;
use ndarray::Array2;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle, FontTransform};
use log::{debug, info};

use super::colormap::{text_color_on, Colormap};
use super::error::RenderError;
use super::stats::SummaryStats;

const COLORBAR_TICKS: usize = 5;
const COLORBAR_STEPS: usize = 128;

/// A fully resolved confusion matrix heatmap, ready to be drawn.
///
/// Produced by [`render`](super::render); nothing is drawn until the figure is
/// handed to [`Figure::draw_on`], [`Figure::save`] or [`Figure::to_svg`].
///
/// # Example
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use cfmatrix::{render, RenderConfig};
/// use ndarray::array;
///
/// let cf = array![[50.0, 10.0], [5.0, 35.0]];
/// let figure = render(cf.view(), &RenderConfig::default().with_title("Spam filter"))?;
/// figure.save("confusion_matrix.png")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Figure {
    /// Figure size as (width, height) in inches
    pub size: (f64, f64),
    /// Pixels per inch
    pub dpi: f64,
    /// Values the cell colours are taken from
    pub values: Array2<f64>,
    /// Text drawn inside each cell, drawn verbatim
    pub annotations: Array2<String>,
    /// Cells that are coloured and annotated
    pub visible: Array2<bool>,
    pub colormap: Colormap,
    /// Whether a colour bar is drawn to the right of the heatmap
    pub colorbar: bool,
    /// Column labels, `None` when tick labels are suppressed
    pub x_tick_labels: Option<Vec<String>>,
    /// Row labels, `None` when tick labels are suppressed
    pub y_tick_labels: Option<Vec<String>>,
    /// Text under the heatmap; may be empty or span several lines
    pub x_label: String,
    pub y_label: Option<String>,
    pub title: Option<String>,
    /// Statistics included in `x_label`, when enabled
    pub summary: Option<SummaryStats>,
}

// Compile-time verification of thread-safety
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Figure>();
};

/// Pixel geometry of a figure, derived from its size, dpi and text content
#[derive(Debug, Clone, Copy)]
struct Layout {
    width: f64,
    height: f64,
    font_px: f64,
    title_px: f64,
    line_height: f64,
    pad: f64,
    plot_left: f64,
    plot_top: f64,
    plot_right: f64,
    plot_bottom: f64,
    colorbar_left: f64,
    colorbar_width: f64,
}

impl Layout {
    // Text extents are estimated from the font size so that laying out a
    // figure never needs a font to be loaded.
    fn compute(figure: &Figure) -> Self {
        let (width, height) = figure.pixel_size();
        let (width, height) = (width as f64, height as f64);
        let scale = figure.dpi / 100.0;
        let font_px = 10.0 * figure.dpi / 72.0;
        let title_px = 12.0 * figure.dpi / 72.0;
        let line_height = font_px * 1.25;
        let char_width = font_px * 0.6;
        let pad = 10.0 * scale;
        let tick_gap = 4.0 * scale;

        let mut top = pad;
        if figure.title.is_some() {
            top += title_px * 1.25 + pad;
        }

        let mut bottom = pad;
        if figure.x_tick_labels.is_some() {
            bottom += line_height + tick_gap;
        }
        if !figure.x_label.is_empty() {
            bottom += figure.x_label.lines().count() as f64 * line_height + tick_gap;
        }

        let mut left = pad;
        if figure.y_label.is_some() {
            left += line_height + pad / 2.0;
        }
        if let Some(labels) = &figure.y_tick_labels {
            let longest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
            left += longest as f64 * char_width + tick_gap * 2.0;
        }

        let colorbar_width = if figure.colorbar { width * 0.04 } else { 0.0 };
        let mut right = pad;
        if figure.colorbar {
            let longest = figure
                .colorbar_ticks()
                .iter()
                .map(|(_, label)| label.chars().count())
                .max()
                .unwrap_or(0);
            right += width * 0.03 + colorbar_width + tick_gap * 2.0 + longest as f64 * char_width;
        }

        let plot_left = left;
        let plot_top = top;
        let plot_right = (width - right).max(plot_left + 1.0);
        let plot_bottom = (height - bottom).max(plot_top + 1.0);

        Self {
            width,
            height,
            font_px,
            title_px,
            line_height,
            pad,
            plot_left,
            plot_top,
            plot_right,
            plot_bottom,
            colorbar_left: plot_right + width * 0.03,
            colorbar_width,
        }
    }

    fn cell_size(&self, rows: usize, cols: usize) -> (f64, f64) {
        (
            (self.plot_right - self.plot_left) / cols.max(1) as f64,
            (self.plot_bottom - self.plot_top) / rows.max(1) as f64,
        )
    }
}

impl Figure {
    /// Figure size in pixels at the figure's dpi
    pub fn pixel_size(&self) -> (u32, u32) {
        let (width, height) = self.size;
        (
            (width * self.dpi).round().max(1.0) as u32,
            (height * self.dpi).round().max(1.0) as u32,
        )
    }

    /// Number of (rows, columns) of the heatmap
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// The value range the colormap is stretched over: the finite values of
    /// the visible cells, or `(0, 1)` when there are none.
    pub fn value_range(&self) -> (f64, f64) {
        let (lo, hi) = self
            .values
            .iter()
            .zip(self.visible.iter())
            .filter(|(value, shown)| **shown && value.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (value, _)| {
                (lo.min(*value), hi.max(*value))
            });
        if lo > hi {
            (0.0, 1.0)
        } else {
            (lo, hi)
        }
    }

    /// Evenly spaced colour bar ticks from the lowest to the highest value
    fn colorbar_ticks(&self) -> Vec<(f64, String)> {
        let (lo, hi) = self.value_range();
        let integral = lo.fract() == 0.0 && hi.fract() == 0.0 && (hi - lo) >= (COLORBAR_TICKS - 1) as f64;
        (0..COLORBAR_TICKS)
            .map(|i| {
                let value = lo + (hi - lo) * i as f64 / (COLORBAR_TICKS - 1) as f64;
                let label = if integral {
                    format!("{:.0}", value)
                } else {
                    format!("{:.2}", value)
                };
                (value, label)
            })
            .collect()
    }

    /// Draws the figure onto a plotters drawing area of any backend.
    ///
    /// The area should have the figure's [`pixel_size`](Figure::pixel_size).
    pub fn draw_on<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<(), RenderError> {
        let layout = Layout::compute(self);
        let (rows, cols) = self.shape();
        debug!(
            "Drawing {}x{} heatmap into {}x{} px",
            rows, cols, layout.width, layout.height
        );

        area.fill(&WHITE).map_err(drawing_error)?;

        self.draw_cells(area, &layout)?;
        self.draw_ticks(area, &layout)?;
        self.draw_axis_labels(area, &layout)?;
        if self.colorbar {
            self.draw_colorbar(area, &layout)?;
        }
        if let Some(title) = &self.title {
            let style = font(layout.title_px)
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Top));
            let anchor = ((layout.width / 2.0) as i32, layout.pad as i32);
            area.draw(&Text::new(title.as_str(), anchor, style))
                .map_err(drawing_error)?;
        }
        Ok(())
    }

    fn draw_cells<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>, layout: &Layout) -> Result<(), RenderError> {
        let (rows, cols) = self.shape();
        let (cell_w, cell_h) = layout.cell_size(rows, cols);
        let (lo, hi) = self.value_range();
        let span = if hi > lo { hi - lo } else { 1.0 };

        for ((row, col), &value) in self.values.indexed_iter() {
            if !self.visible[[row, col]] {
                continue;
            }
            let x0 = layout.plot_left + col as f64 * cell_w;
            let y0 = layout.plot_top + row as f64 * cell_h;
            let color = self.colormap.color((value - lo) / span);
            area.draw(&Rectangle::new(
                [(x0 as i32, y0 as i32), ((x0 + cell_w) as i32, (y0 + cell_h) as i32)],
                color.filled(),
            ))
            .map_err(drawing_error)?;

            let label = &self.annotations[[row, col]];
            if label.is_empty() {
                continue;
            }
            let style = font(layout.font_px)
                .color(&text_color_on(color))
                .pos(Pos::new(HPos::Center, VPos::Center));
            let lines: Vec<&str> = label.lines().collect();
            let center_x = x0 + cell_w / 2.0;
            let center_y = y0 + cell_h / 2.0;
            let first_offset = (lines.len() as f64 - 1.0) / 2.0;
            for (i, line) in lines.iter().enumerate() {
                let y = center_y + (i as f64 - first_offset) * layout.line_height;
                area.draw(&Text::new(*line, (center_x as i32, y as i32), style.clone()))
                    .map_err(drawing_error)?;
            }
        }
        Ok(())
    }

    fn draw_ticks<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>, layout: &Layout) -> Result<(), RenderError> {
        let (rows, cols) = self.shape();
        let (cell_w, cell_h) = layout.cell_size(rows, cols);
        let gap = layout.font_px * 0.3;

        if let Some(labels) = &self.x_tick_labels {
            let style = font(layout.font_px)
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Top));
            for (col, label) in labels.iter().enumerate() {
                let x = layout.plot_left + (col as f64 + 0.5) * cell_w;
                let y = layout.plot_bottom + gap;
                area.draw(&Text::new(label.as_str(), (x as i32, y as i32), style.clone()))
                    .map_err(drawing_error)?;
            }
        }

        if let Some(labels) = &self.y_tick_labels {
            let style = font(layout.font_px)
                .color(&BLACK)
                .pos(Pos::new(HPos::Right, VPos::Center));
            for (row, label) in labels.iter().enumerate() {
                let x = layout.plot_left - gap;
                let y = layout.plot_top + (row as f64 + 0.5) * cell_h;
                area.draw(&Text::new(label.as_str(), (x as i32, y as i32), style.clone()))
                    .map_err(drawing_error)?;
            }
        }
        Ok(())
    }

    fn draw_axis_labels<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>, layout: &Layout) -> Result<(), RenderError> {
        let center_x = (layout.plot_left + layout.plot_right) / 2.0;
        let mut y = layout.plot_bottom + layout.font_px * 0.3;
        if self.x_tick_labels.is_some() {
            y += layout.line_height;
        }

        let style = font(layout.font_px)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        for line in self.x_label.lines() {
            if !line.is_empty() {
                area.draw(&Text::new(line, (center_x as i32, y as i32), style.clone()))
                    .map_err(drawing_error)?;
            }
            y += layout.line_height;
        }

        if let Some(label) = &self.y_label {
            let style = font(layout.font_px)
                .transform(FontTransform::Rotate270)
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center));
            let x = layout.pad + layout.line_height / 2.0;
            let y = (layout.plot_top + layout.plot_bottom) / 2.0;
            area.draw(&Text::new(label.as_str(), (x as i32, y as i32), style))
                .map_err(drawing_error)?;
        }
        Ok(())
    }

    fn draw_colorbar<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>, layout: &Layout) -> Result<(), RenderError> {
        let left = layout.colorbar_left;
        let right = left + layout.colorbar_width;
        let top = layout.plot_top;
        let bottom = layout.plot_bottom;
        let step = (bottom - top) / COLORBAR_STEPS as f64;

        for i in 0..COLORBAR_STEPS {
            let t = 1.0 - (i as f64 + 0.5) / COLORBAR_STEPS as f64;
            let y0 = top + i as f64 * step;
            area.draw(&Rectangle::new(
                [(left as i32, y0 as i32), (right as i32, (y0 + step).ceil() as i32)],
                self.colormap.color(t).filled(),
            ))
            .map_err(drawing_error)?;
        }
        area.draw(&Rectangle::new(
            [(left as i32, top as i32), (right as i32, bottom as i32)],
            BLACK.stroke_width(1),
        ))
        .map_err(drawing_error)?;

        let (lo, hi) = self.value_range();
        let span = if hi > lo { hi - lo } else { 1.0 };
        let style = font(layout.font_px)
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        for (value, label) in self.colorbar_ticks() {
            let y = bottom - (value - lo) / span * (bottom - top);
            let x = right + layout.font_px * 0.3;
            area.draw(&Text::new(label, (x as i32, y as i32), style.clone()))
                .map_err(drawing_error)?;
        }
        Ok(())
    }

    /// Saves the figure to `path`: SVG when the extension is `.svg`, a bitmap
    /// (PNG, BMP, JPEG by extension) otherwise. Missing parent directories are created.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let size = self.pixel_size();
        let is_svg = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

        if is_svg {
            let root = SVGBackend::new(path, size).into_drawing_area();
            self.draw_on(&root)?;
            root.present().map_err(drawing_error)?;
        } else {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            self.draw_on(&root)?;
            root.present().map_err(drawing_error)?;
        }

        info!("Confusion matrix saved to {}", path.display());
        Ok(())
    }

    /// Renders the figure to an SVG document held in memory
    pub fn to_svg(&self) -> Result<String, RenderError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.pixel_size()).into_drawing_area();
            self.draw_on(&root)?;
            root.present().map_err(drawing_error)?;
        }
        Ok(svg)
    }
}

fn font(size: f64) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, size, FontStyle::Normal)
}

fn drawing_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Drawing(err.to_string())
}
