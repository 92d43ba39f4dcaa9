//! Render confusion matrices as annotated heatmaps.
//! 
//! Each cell can show a group name, its count and its share of all
//! observations; accuracy (plus precision, recall and F1 for binary
//! matrices) can be printed under the plot.
//! 
//! # Basic Usage
//! 
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use cfmatrix::{render, Categories, RenderConfig};
//! use ndarray::array;
//! 
//! let cf = array![[50.0, 10.0], [5.0, 35.0]];
//! let config = RenderConfig::default()
//!     .with_group_names(vec!["True Neg", "False Pos", "False Neg", "True Pos"])
//!     .with_categories(Categories::labels(vec!["Zero", "One"]))
//!     .with_title("Binary classifier");
//! 
//! let figure = render(cf.view(), &config)?;
//! assert_eq!(figure.annotations[[1, 1]], "True Pos\n35\n35.00%");
//! assert!(figure.x_label.ends_with("F1 Score=0.824"));
//! # Ok(())
//! # }
//! ```
//! 
//! # Output
//! 
//! Rendering produces a [`Figure`] and draws nothing. The caller decides
//! where it goes:
//! 
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # use cfmatrix::{render, RenderConfig};
//! # use ndarray::array;
//! # let figure = render(array![[1.0, 0.0], [0.0, 1.0]].view(), &RenderConfig::default())?;
//! figure.save("confusion_matrix.png")?;
//! let svg = figure.to_svg()?;
//! # Ok(())
//! # }
//! ```

pub mod heatmap;
mod defaults;

pub use heatmap::{
    box_labels, render, BinaryStats, Categories, Colormap, Figure, RenderConfig, RenderError,
    Renderer, SummaryStats,
};
pub use defaults::{PlotDefaults, DPI_ENV, FIG_SIZE_ENV};

pub fn init_logger() {
    env_logger::init();
}
