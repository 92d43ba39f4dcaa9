use ndarray::{Array2, ArrayView2};
use log::warn;

use super::error::RenderError;

/// Builds the text drawn inside every cell of the heatmap.
///
/// Each label is the concatenation of the group name (when `group_names` has
/// exactly one entry per cell), the count as a whole number (when `count`)
/// and the cell's share of the grand total with two decimals (when
/// `percent`), each part on its own line, with surrounding whitespace
/// trimmed. Group names of the wrong length are ignored.
///
/// # Example
/// ```
/// use cfmatrix::box_labels;
/// use ndarray::array;
///
/// let cf = array![[3.0, 1.0], [0.0, 6.0]];
/// let labels = box_labels(cf.view(), None, true, true)?;
/// assert_eq!(labels[[0, 0]], "3\n30.00%");
/// # Ok::<(), cfmatrix::RenderError>(())
/// ```
pub fn box_labels(
    matrix: ArrayView2<'_, f64>,
    group_names: Option<&[String]>,
    count: bool,
    percent: bool,
) -> Result<Array2<String>, RenderError> {
    let size = matrix.len();
    let group_names = match group_names {
        Some(names) if names.len() == size => Some(names),
        Some(names) => {
            warn!(
                "Ignoring {} group names for a matrix with {} cells",
                names.len(),
                size
            );
            None
        }
        None => None,
    };
    let total: f64 = matrix.sum();

    let labels: Vec<String> = matrix
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let group = group_names
                .map(|names| format!("{}\n", names[i]))
                .unwrap_or_default();
            let counts = if count { format_count(value) } else { String::new() };
            let share = if percent {
                format_percent(value / total)
            } else {
                String::new()
            };
            format!("{}{}{}", group, counts, share).trim().to_string()
        })
        .collect();

    Ok(Array2::from_shape_vec(matrix.dim(), labels)?)
}

fn format_count(value: f64) -> String {
    format!("{:.0}\n", value)
}

fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}
