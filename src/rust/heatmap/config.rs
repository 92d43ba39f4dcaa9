use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Tick labels used for both axes of the heatmap
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Categories {
    /// Number the rows and columns starting at zero
    #[default]
    Auto,
    /// Use the given labels for both axes
    Labels(Vec<String>),
    /// Draw no tick labels at all
    Hidden,
}

impl Categories {
    /// Creates explicit category labels
    ///
    /// # Example
    /// ```
    /// use cfmatrix::Categories;
    ///
    /// let categories = Categories::labels(vec!["cat", "dog"]);
    /// assert_eq!(categories, Categories::Labels(vec!["cat".into(), "dog".into()]));
    /// ```
    pub fn labels(labels: Vec<impl Into<String>>) -> Self {
        Self::Labels(labels.into_iter().map(Into::into).collect())
    }
}

/// Display options for rendering a confusion matrix.
///
/// Every field has a default, so configurations can be built fluently from
/// `RenderConfig::default()` or deserialized from partial JSON documents.
///
/// # Example
/// ```
/// use cfmatrix::{Categories, RenderConfig};
///
/// let config = RenderConfig::default()
///     .with_group_names(vec!["TN", "FP", "FN", "TP"])
///     .with_categories(Categories::labels(vec!["negative", "positive"]))
///     .with_cmap("Greens")
///     .with_title("Spam filter");
/// assert!(config.count && config.percent);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Labels shown in each cell, row by row. Only used when there is one per cell.
    pub group_names: Option<Vec<String>>,
    /// Tick labels for the x and y axis
    pub categories: Categories,
    /// Show the raw count in each cell
    pub count: bool,
    /// Show each cell's share of the grand total
    pub percent: bool,
    /// Show the colour bar
    pub cbar: bool,
    /// Show the x and y tick labels
    pub xy_ticks: bool,
    /// Show "True label" and "Predicted label" on the axes
    pub xy_plot_labels: bool,
    /// Show accuracy (and precision, recall, F1 for binary matrices) below the plot
    pub sum_stats: bool,
    /// Figure size in inches; falls back to the plot defaults when unset
    pub fig_size: Option<(f64, f64)>,
    /// Name of the colour gradient
    pub cmap: String,
    /// Figure title
    pub title: Option<String>,
    /// Cells to draw (true means show)
    pub mask: Option<Array2<bool>>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            group_names: None,
            categories: Categories::Auto,
            count: true,
            percent: true,
            cbar: true,
            xy_ticks: true,
            xy_plot_labels: true,
            sum_stats: true,
            fig_size: None,
            cmap: "Blues".to_string(),
            title: None,
            mask: None,
        }
    }
}

impl RenderConfig {
    /// Sets the per-cell group labels, given row by row
    pub fn with_group_names(mut self, names: Vec<impl Into<String>>) -> Self {
        self.group_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_categories(mut self, categories: Categories) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_count(mut self, count: bool) -> Self {
        self.count = count;
        self
    }

    pub fn with_percent(mut self, percent: bool) -> Self {
        self.percent = percent;
        self
    }

    pub fn with_cbar(mut self, cbar: bool) -> Self {
        self.cbar = cbar;
        self
    }

    pub fn with_xy_ticks(mut self, xy_ticks: bool) -> Self {
        self.xy_ticks = xy_ticks;
        self
    }

    pub fn with_xy_plot_labels(mut self, xy_plot_labels: bool) -> Self {
        self.xy_plot_labels = xy_plot_labels;
        self
    }

    pub fn with_sum_stats(mut self, sum_stats: bool) -> Self {
        self.sum_stats = sum_stats;
        self
    }

    /// Sets the figure size as (width, height) in inches
    pub fn with_fig_size(mut self, width: f64, height: f64) -> Self {
        self.fig_size = Some((width, height));
        self
    }

    /// Sets the colormap by name, e.g. `"Blues"`, `"viridis"` or `"Reds_r"`
    pub fn with_cmap(mut self, cmap: impl Into<String>) -> Self {
        self.cmap = cmap.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the visibility mask; cells where the mask is false are left blank
    pub fn with_mask(mut self, mask: Array2<bool>) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Turns off every optional element of the figure
    pub fn minimal() -> Self {
        Self {
            count: false,
            percent: false,
            cbar: false,
            xy_ticks: false,
            xy_plot_labels: false,
            sum_stats: false,
            ..Self::default()
        }
    }
}
