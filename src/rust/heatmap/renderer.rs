use ndarray::{Array2, ArrayView2};
use log::debug;

use super::annotation::box_labels;
use super::colormap::Colormap;
use super::config::{Categories, RenderConfig};
use super::error::RenderError;
use super::figure::Figure;
use super::stats::SummaryStats;
use crate::PlotDefaults;

const TRUE_LABEL: &str = "True label";
const PREDICTED_LABEL: &str = "Predicted label";

/// Renders confusion matrices against a fixed set of plot defaults
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    defaults: PlotDefaults,
}

impl Renderer {
    pub fn new(defaults: PlotDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &PlotDefaults {
        &self.defaults
    }

    /// Builds the heatmap figure of a confusion matrix (true labels on rows,
    /// predicted labels on columns).
    ///
    /// # Returns
    /// * `Result<Figure, RenderError>` - The figure, or an error if:
    ///   - The colormap name is unknown
    ///   - The mask shape differs from the matrix shape
    ///   - Explicit categories do not have one label per row and column
    ///
    /// # Example
    /// ```
    /// use cfmatrix::{PlotDefaults, RenderConfig, Renderer};
    /// use ndarray::array;
    ///
    /// let renderer = Renderer::new(PlotDefaults { fig_size: (4.0, 4.0), dpi: 72.0 });
    /// let cf = array![[50.0, 10.0], [5.0, 35.0]];
    /// let figure = renderer.render(cf.view(), &RenderConfig::default())?;
    /// assert_eq!(figure.size, (4.0, 4.0));
    /// assert_eq!(figure.y_label.as_deref(), Some("True label"));
    /// # Ok::<(), cfmatrix::RenderError>(())
    /// ```
    pub fn render(&self, matrix: ArrayView2<'_, f64>, config: &RenderConfig) -> Result<Figure, RenderError> {
        let (rows, cols) = matrix.dim();
        debug!("Rendering {}x{} confusion matrix", rows, cols);

        let annotations = box_labels(
            matrix,
            config.group_names.as_deref(),
            config.count,
            config.percent,
        )?;

        let summary = config.sum_stats.then(|| SummaryStats::from_matrix(matrix));
        let stats_text = summary.as_ref().map(SummaryStats::text).unwrap_or_default();

        let size = config.fig_size.unwrap_or(self.defaults.fig_size);

        let hidden = Categories::Hidden;
        let categories = if config.xy_ticks {
            &config.categories
        } else {
            &hidden
        };
        let x_tick_labels = tick_labels(categories, cols, "x")?;
        let y_tick_labels = tick_labels(categories, rows, "y")?;

        let colormap = Colormap::from_name(&config.cmap)?;

        let visible = match &config.mask {
            Some(mask) if mask.dim() != matrix.dim() => {
                return Err(RenderError::MaskShape {
                    expected: matrix.dim(),
                    actual: mask.dim(),
                });
            }
            Some(mask) => mask.clone(),
            None => Array2::from_elem(matrix.dim(), true),
        };

        let (x_label, y_label) = if config.xy_plot_labels {
            (format!("{}{}", PREDICTED_LABEL, stats_text), Some(TRUE_LABEL.to_string()))
        } else {
            (stats_text, None)
        };

        Ok(Figure {
            size,
            dpi: self.defaults.dpi,
            values: matrix.to_owned(),
            annotations,
            visible,
            colormap,
            colorbar: config.cbar,
            x_tick_labels,
            y_tick_labels,
            x_label,
            y_label,
            title: config.title.clone().filter(|title| !title.is_empty()),
            summary,
        })
    }
}

/// Builds the heatmap figure of a confusion matrix using the plot defaults
/// from the environment (see [`PlotDefaults::from_env`]).
///
/// # Example
/// ```
/// use cfmatrix::{render, RenderConfig};
/// use ndarray::array;
///
/// let cf = array![[5.0, 0.0], [1.0, 9.0]];
/// let figure = render(cf.view(), &RenderConfig::default().with_percent(false))?;
/// assert_eq!(figure.annotations[[1, 1]], "9");
/// # Ok::<(), cfmatrix::RenderError>(())
/// ```
pub fn render(matrix: ArrayView2<'_, f64>, config: &RenderConfig) -> Result<Figure, RenderError> {
    Renderer::new(PlotDefaults::from_env()).render(matrix, config)
}

fn tick_labels(categories: &Categories, len: usize, axis: &'static str) -> Result<Option<Vec<String>>, RenderError> {
    match categories {
        Categories::Auto => Ok(Some((0..len).map(|i| i.to_string()).collect())),
        Categories::Hidden => Ok(None),
        Categories::Labels(labels) if labels.len() == len => Ok(Some(labels.clone())),
        Categories::Labels(labels) => Err(RenderError::TickLabels {
            axis,
            expected: len,
            actual: labels.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn renderer() -> Renderer {
        Renderer::new(PlotDefaults::default())
    }

    #[test]
    fn test_fig_size_falls_back_to_defaults() -> Result<(), RenderError> {
        let cf = array![[1.0, 2.0], [3.0, 4.0]];
        let figure = renderer().render(cf.view(), &RenderConfig::default())?;
        assert_eq!(figure.size, (6.4, 4.8));

        let figure = renderer().render(cf.view(), &RenderConfig::default().with_fig_size(10.0, 8.0))?;
        assert_eq!(figure.size, (10.0, 8.0));
        Ok(())
    }

    #[test]
    fn test_auto_categories_number_axes() -> Result<(), RenderError> {
        let cf = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let figure = renderer().render(cf.view(), &RenderConfig::default())?;
        assert_eq!(figure.x_tick_labels, Some(vec!["0".into(), "1".into(), "2".into()]));
        assert_eq!(figure.y_tick_labels, Some(vec!["0".into(), "1".into()]));
        Ok(())
    }

    #[test]
    fn test_mismatched_categories_fail() {
        let cf = array![[1.0, 2.0], [3.0, 4.0]];
        let config = RenderConfig::default().with_categories(Categories::labels(vec!["a", "b", "c"]));
        let err = renderer().render(cf.view(), &config).unwrap_err();
        assert!(matches!(err, RenderError::TickLabels { expected: 2, actual: 3, .. }));
    }

    #[test]
    fn test_mismatched_categories_ignored_without_ticks() -> Result<(), RenderError> {
        let cf = array![[1.0, 2.0], [3.0, 4.0]];
        let config = RenderConfig::default()
            .with_categories(Categories::labels(vec!["a", "b", "c"]))
            .with_xy_ticks(false);
        let figure = renderer().render(cf.view(), &config)?;
        assert!(figure.x_tick_labels.is_none());
        Ok(())
    }

    #[test]
    fn test_mask_shape_is_checked() {
        let cf = array![[1.0, 2.0], [3.0, 4.0]];
        let config = RenderConfig::default().with_mask(Array2::from_elem((3, 2), true));
        let err = renderer().render(cf.view(), &config).unwrap_err();
        assert!(matches!(
            err,
            RenderError::MaskShape { expected: (2, 2), actual: (3, 2) }
        ));
    }

    #[test]
    fn test_unknown_colormap_fails() {
        let cf = array![[1.0]];
        let config = RenderConfig::default().with_cmap("no-such-map");
        assert!(matches!(
            renderer().render(cf.view(), &config),
            Err(RenderError::UnknownColormap(_))
        ));
    }

    #[test]
    fn test_empty_title_means_no_title() -> Result<(), RenderError> {
        let cf = array![[1.0, 2.0], [3.0, 4.0]];
        let figure = renderer().render(cf.view(), &RenderConfig::default().with_title(""))?;
        assert!(figure.title.is_none());
        Ok(())
    }

    #[test]
    fn test_stats_disabled_leaves_plain_labels() -> Result<(), RenderError> {
        let cf = array![[1.0, 2.0], [3.0, 4.0]];
        let figure = renderer().render(cf.view(), &RenderConfig::default().with_sum_stats(false))?;
        assert_eq!(figure.x_label, "Predicted label");
        assert!(figure.summary.is_none());
        Ok(())
    }
}
