//! Confusion matrix heatmaps: configuration, cell annotations, summary
//! statistics and drawing.

mod annotation;
mod colormap;
mod config;
mod error;
mod figure;
mod renderer;
mod stats;

pub use annotation::box_labels;
pub use colormap::Colormap;
pub use config::{Categories, RenderConfig};
pub use error::RenderError;
pub use figure::Figure;
pub use renderer::{render, Renderer};
pub use stats::{BinaryStats, SummaryStats};
