mod forest;
mod linear;

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

pub use forest::{RandomForest, RegressionTree};
pub use linear::LinearRegressor;

use crate::error::PredictionErr;

/// A trained single-output regression model.
///
/// The model is treated as a black box: it consumes one encoded feature row and
/// answers with a value in the scaled target space.
pub trait Regressor: Send + Sync {
    /// Number of features the model was trained on.
    fn n_features(&self) -> usize;

    /// Predicts the target for a single row.
    ///
    /// # Errors
    /// Returns `PredictionErr::DimensionMismatch` if `features` has the wrong length.
    fn predict(&self, features: ArrayView1<f64>) -> Result<f64, PredictionErr>;
}

/// Rejects rows the model was not trained for.
pub(crate) fn check_dimension(
    features: &ArrayView1<f64>,
    expected: usize,
) -> Result<(), PredictionErr> {
    if features.len() != expected {
        return Err(PredictionErr::DimensionMismatch {
            got: features.len(),
            expected,
        });
    }
    Ok(())
}

/// The model artifact as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    RandomForest(RandomForest),
    Linear(LinearRegressor),
}

impl Regressor for ModelKind {
    fn n_features(&self) -> usize {
        match self {
            ModelKind::RandomForest(m) => m.n_features(),
            ModelKind::Linear(m) => m.n_features(),
        }
    }

    fn predict(&self, features: ArrayView1<f64>) -> Result<f64, PredictionErr> {
        match self {
            ModelKind::RandomForest(m) => m.predict(features),
            ModelKind::Linear(m) => m.predict(features),
        }
    }
}
