use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use super::{Regressor, check_dimension};
use crate::error::PredictionErr;

#[derive(Serialize, Deserialize)]
struct LinearParams {
    coef: Vec<f64>,
    intercept: f64,
}

/// `coef · x + intercept`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LinearParams", into = "LinearParams")]
pub struct LinearRegressor {
    coef: Array1<f64>,
    intercept: f64,
}

impl LinearRegressor {
    /// Creates a new `LinearRegressor`.
    ///
    /// # Errors
    /// Returns a description of the problem if there are no coefficients or any
    /// parameter is not finite.
    pub fn new(coef: Vec<f64>, intercept: f64) -> Result<Self, String> {
        if coef.is_empty() {
            return Err("coef must not be empty".into());
        }
        if !intercept.is_finite() || coef.iter().any(|c| !c.is_finite()) {
            return Err("coef and intercept must be finite".into());
        }

        Ok(Self {
            coef: Array1::from(coef),
            intercept,
        })
    }
}

impl TryFrom<LinearParams> for LinearRegressor {
    type Error = String;

    fn try_from(p: LinearParams) -> Result<Self, Self::Error> {
        Self::new(p.coef, p.intercept)
    }
}

impl From<LinearRegressor> for LinearParams {
    fn from(m: LinearRegressor) -> Self {
        Self {
            coef: m.coef.to_vec(),
            intercept: m.intercept,
        }
    }
}

impl Regressor for LinearRegressor {
    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn predict(&self, features: ArrayView1<f64>) -> Result<f64, PredictionErr> {
        check_dimension(&features, self.n_features())?;
        Ok(self.coef.dot(&features) + self.intercept)
    }
}
