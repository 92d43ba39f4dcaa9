use ndarray::{ArrayView2, Axis};

/// Precision, recall and F1 of the positive class (index 1) of a binary matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryStats {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Summary statistics printed under the heatmap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    /// Sum of the diagonal divided by the total number of observations
    pub accuracy: f64,
    /// Only present for 2x2 matrices
    pub binary: Option<BinaryStats>,
}

impl SummaryStats {
    /// Computes the statistics of a confusion matrix with true labels on rows.
    ///
    /// No guarding is done: an empty matrix gives `NaN` values.
    ///
    /// # Example
    /// ```
    /// use cfmatrix::SummaryStats;
    /// use ndarray::array;
    ///
    /// let stats = SummaryStats::from_matrix(array![[50.0, 10.0], [5.0, 35.0]].view());
    /// assert!((stats.accuracy - 0.85).abs() < 1e-12);
    /// assert!(stats.binary.is_some());
    /// ```
    pub fn from_matrix(matrix: ArrayView2<'_, f64>) -> Self {
        let accuracy = matrix.diag().sum() / matrix.sum();

        let binary = if matrix.dim() == (2, 2) {
            let tp = matrix[[1, 1]];
            let precision = tp / matrix.index_axis(Axis(1), 1).sum();
            let recall = tp / matrix.index_axis(Axis(0), 1).sum();
            let f1 = 2.0 * precision * recall / (precision + recall);
            Some(BinaryStats { precision, recall, f1 })
        } else {
            None
        };

        Self { accuracy, binary }
    }

    /// Formats the statistics as the block appended to the x axis label,
    /// starting with two blank lines.
    pub fn text(&self) -> String {
        let mut text = format!("\n\nAccuracy={:.3}", self.accuracy);
        if let Some(binary) = &self.binary {
            text.push_str(&format!(
                "\nPrecision={:.3}\nRecall={:.3}\nF1 Score={:.3}",
                binary.precision, binary.recall, binary.f1
            ));
        }
        text
    }
}
