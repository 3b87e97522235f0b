use crate::cricket::features::{ColumnKind, FeatureRow};
use crate::error::Result;

/// A pre-trained binary win/loss classifier.
pub trait WinClassifier: Send + Sync {
    /// Probability vector `[P(loss), P(win)]` for a single row.
    fn predict_proba(&self, row: &FeatureRow) -> Result<[f64; 2]>;

    /// Columns the classifier was fit on, in order.
    fn input_columns(&self) -> Vec<(String, ColumnKind)>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
