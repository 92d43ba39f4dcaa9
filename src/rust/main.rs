use cfmatrix::{Categories, RenderConfig, Renderer, PlotDefaults};
use log::info;
use clap::Parser;
use anyhow::{Context, Result};
use ndarray::Array2;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file holding the matrix as a list of rows
    #[arg(short, long)]
    matrix: Option<PathBuf>,

    /// JSON file holding the render configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the figure (.svg for vector output)
    #[arg(short, long, default_value = "confusion_matrix.png")]
    output: PathBuf,

    /// Title drawn above the heatmap
    #[arg(short, long)]
    title: Option<String>,
}

fn load_matrix(path: &Path) -> Result<Array2<f64>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read matrix file {}", path.display()))?;
    let rows: Vec<Vec<f64>> = serde_json::from_str(&raw)
        .with_context(|| format!("Matrix file {} is not a JSON list of rows", path.display()))?;

    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    if let Some(pos) = rows.iter().position(|row| row.len() != n_cols) {
        anyhow::bail!("Row {} has {} entries, expected {}", pos + 1, rows[pos].len(), n_cols);
    }
    Ok(Array2::from_shape_vec((n_rows, n_cols), rows.into_iter().flatten().collect())?)
}

fn load_config(path: &Path) -> Result<RenderConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Config file {} is not a valid render configuration", path.display()))
}

fn sample() -> (Array2<f64>, RenderConfig) {
    let matrix = ndarray::array![[50.0, 10.0], [5.0, 35.0]];
    let config = RenderConfig::default()
        .with_group_names(vec!["True Neg", "False Pos", "False Neg", "True Pos"])
        .with_categories(Categories::labels(vec!["Zero", "One"]))
        .with_title("Sample binary classifier");
    (matrix, config)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    info!("=== Starting Confusion Matrix Demo ===");
    let start_time = Instant::now();

    let (mut matrix, mut config) = sample();
    if let Some(path) = &args.matrix {
        matrix = load_matrix(path)?;
        config = RenderConfig::default();
        info!("Loaded {}x{} matrix from {}", matrix.nrows(), matrix.ncols(), path.display());
    }
    if let Some(path) = &args.config {
        config = load_config(path)?;
        info!("Loaded configuration from {}", path.display());
    }
    if let Some(title) = args.title {
        config.title = Some(title);
    }

    let renderer = Renderer::new(PlotDefaults::from_env());
    let figure = renderer.render(matrix.view(), &config)?;
    if let Some(summary) = &figure.summary {
        println!("Accuracy: {:.3}", summary.accuracy);
        if let Some(binary) = &summary.binary {
            println!("Precision: {:.3}", binary.precision);
            println!("Recall: {:.3}", binary.recall);
            println!("F1 Score: {:.3}", binary.f1);
        }
    }

    figure.save(&args.output)?;
    println!("Figure written to {}", args.output.display());

    info!("=== Demo Complete (took {:.2?}) ===", start_time.elapsed());
    Ok(())
}
