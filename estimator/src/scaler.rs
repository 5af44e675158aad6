use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::error::WidthMismatch;

/// A fitted, invertible per-column transform.
pub trait Scaler: Send + Sync {
    /// Number of columns the scaler was fitted on.
    fn width(&self) -> usize;

    /// Maps a raw row into the scaled space.
    ///
    /// # Errors
    /// Returns `WidthMismatch` if `row` does not have `width()` columns.
    fn transform(&self, row: ArrayView1<f64>) -> Result<Array1<f64>, WidthMismatch>;

    /// Maps a scaled row back into the raw space.
    ///
    /// # Errors
    /// Returns `WidthMismatch` if `row` does not have `width()` columns.
    fn inverse_transform(&self, row: ArrayView1<f64>) -> Result<Array1<f64>, WidthMismatch>;

    /// Inverts a single scaled value; only valid for single-column scalers.
    ///
    /// # Errors
    /// Returns `WidthMismatch` if the scaler is not single-column.
    fn inverse_transform_scalar(&self, value: f64) -> Result<f64, WidthMismatch> {
        let row = Array1::from_elem(1, value);
        let raw = self.inverse_transform(row.view())?;
        Ok(raw[0])
    }
}

fn check_width(row: &ArrayView1<f64>, expected: usize) -> Result<(), WidthMismatch> {
    match row.len() {
        got if got == expected => Ok(()),
        got => Err(WidthMismatch { got, expected }),
    }
}

/// Constant columns are left unscaled instead of dividing by zero.
fn non_zero(value: f64) -> f64 {
    if value == 0.0 { 1.0 } else { value }
}

fn check_params(names: (&str, &str), a: &[f64], b: &[f64]) -> Result<(), String> {
    let (a_name, b_name) = names;
    if a.is_empty() {
        return Err(format!("{a_name} must not be empty"));
    }
    if a.len() != b.len() {
        return Err(format!(
            "{a_name} has {} column(s) but {b_name} has {}",
            a.len(),
            b.len()
        ));
    }
    if a.iter().chain(b).any(|v| !v.is_finite()) {
        return Err(format!("{a_name} and {b_name} must be finite"));
    }
    Ok(())
}

#[derive(Deserialize)]
struct MinMaxParams {
    data_min: Vec<f64>,
    data_max: Vec<f64>,
    #[serde(default = "unit_range")]
    feature_range: (f64, f64),
}

fn unit_range() -> (f64, f64) {
    (0.0, 1.0)
}

/// Rescales each column linearly from `[data_min, data_max]` onto `feature_range`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MinMaxParams")]
pub struct MinMaxScaler {
    data_min: Vec<f64>,
    data_max: Vec<f64>,
    feature_range: (f64, f64),
}

impl MinMaxScaler {
    /// Creates a new `MinMaxScaler` from fitted parameters.
    ///
    /// # Errors
    /// Returns a description of the problem if the parameter vectors are empty,
    /// differ in length, are not finite, or the target range is empty.
    pub fn new(
        data_min: Vec<f64>,
        data_max: Vec<f64>,
        feature_range: (f64, f64),
    ) -> Result<Self, String> {
        check_params(("data_min", "data_max"), &data_min, &data_max)?;

        let (lo, hi) = feature_range;
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(format!("feature_range ({lo}, {hi}) is not a valid range"));
        }

        Ok(Self {
            data_min,
            data_max,
            feature_range,
        })
    }

    fn columns(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.data_min
            .iter()
            .zip(&self.data_max)
            .map(|(&min, &max)| (min, non_zero(max - min)))
    }
}

impl TryFrom<MinMaxParams> for MinMaxScaler {
    type Error = String;

    fn try_from(p: MinMaxParams) -> Result<Self, Self::Error> {
        Self::new(p.data_min, p.data_max, p.feature_range)
    }
}

impl Scaler for MinMaxScaler {
    fn width(&self) -> usize {
        self.data_min.len()
    }

    fn transform(&self, row: ArrayView1<f64>) -> Result<Array1<f64>, WidthMismatch> {
        check_width(&row, self.width())?;
        let (lo, hi) = self.feature_range;

        Ok(row
            .iter()
            .zip(self.columns())
            .map(|(&x, (min, range))| (x - min) / range * (hi - lo) + lo)
            .collect())
    }

    fn inverse_transform(&self, row: ArrayView1<f64>) -> Result<Array1<f64>, WidthMismatch> {
        check_width(&row, self.width())?;
        let (lo, hi) = self.feature_range;

        Ok(row
            .iter()
            .zip(self.columns())
            .map(|(&x, (min, range))| (x - lo) / (hi - lo) * range + min)
            .collect())
    }
}

#[derive(Deserialize)]
struct StandardParams {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// Centers each column on its mean and divides by its standard deviation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StandardParams")]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Creates a new `StandardScaler` from fitted parameters.
    ///
    /// # Errors
    /// Returns a description of the problem if the parameter vectors are empty,
    /// differ in length or are not finite.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, String> {
        check_params(("mean", "scale"), &mean, &scale)?;
        Ok(Self { mean, scale })
    }

    fn columns(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.mean
            .iter()
            .zip(&self.scale)
            .map(|(&mean, &scale)| (mean, non_zero(scale)))
    }
}

impl TryFrom<StandardParams> for StandardScaler {
    type Error = String;

    fn try_from(p: StandardParams) -> Result<Self, Self::Error> {
        Self::new(p.mean, p.scale)
    }
}

impl Scaler for StandardScaler {
    fn width(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, row: ArrayView1<f64>) -> Result<Array1<f64>, WidthMismatch> {
        check_width(&row, self.width())?;
        Ok(row
            .iter()
            .zip(self.columns())
            .map(|(&x, (mean, scale))| (x - mean) / scale)
            .collect())
    }

    fn inverse_transform(&self, row: ArrayView1<f64>) -> Result<Array1<f64>, WidthMismatch> {
        check_width(&row, self.width())?;
        Ok(row
            .iter()
            .zip(self.columns())
            .map(|(&x, (mean, scale))| x * scale + mean)
            .collect())
    }
}

/// The scaler artifact as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalerKind {
    MinMax(MinMaxScaler),
    Standard(StandardScaler),
}

impl Scaler for ScalerKind {
    fn width(&self) -> usize {
        match self {
            ScalerKind::MinMax(s) => s.width(),
            ScalerKind::Standard(s) => s.width(),
        }
    }

    fn transform(&self, row: ArrayView1<f64>) -> Result<Array1<f64>, WidthMismatch> {
        match self {
            ScalerKind::MinMax(s) => s.transform(row),
            ScalerKind::Standard(s) => s.transform(row),
        }
    }

    fn inverse_transform(&self, row: ArrayView1<f64>) -> Result<Array1<f64>, WidthMismatch> {
        match self {
            ScalerKind::MinMax(s) => s.inverse_transform(row),
            ScalerKind::Standard(s) => s.inverse_transform(row),
        }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn assert_close(a: &Array1<f64>, b: &Array1<f64>) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-9, "{a} != {b}");
        }
    }

    #[test]
    fn min_max_maps_bounds_onto_range() {
        let scaler = MinMaxScaler::new(vec![30.0, 20.0], vec![1000.0, 800.0], (0.0, 1.0)).unwrap();

        let low = scaler.transform(array![30.0, 20.0].view()).unwrap();
        let high = scaler.transform(array![1000.0, 800.0].view()).unwrap();

        assert_close(&low, &array![0.0, 0.0]);
        assert_close(&high, &array![1.0, 1.0]);
    }

    #[test]
    fn min_max_honours_custom_range() {
        let scaler = MinMaxScaler::new(vec![0.0], vec![10.0], (-1.0, 1.0)).unwrap();
        let mid = scaler.transform(array![5.0].view()).unwrap();
        assert_close(&mid, &array![0.0]);
    }

    #[test]
    fn round_trips_recover_the_input() {
        let row = array![120.0, 90.0];
        let scalers = [
            ScalerKind::MinMax(
                MinMaxScaler::new(vec![21.0, 14.0], vec![1500.0, 1200.0], (0.0, 1.0)).unwrap(),
            ),
            ScalerKind::Standard(StandardScaler::new(vec![210.0, 150.0], vec![95.5, 70.25]).unwrap()),
        ];

        for scaler in &scalers {
            let scaled = scaler.transform(row.view()).unwrap();
            let back = scaler.inverse_transform(scaled.view()).unwrap();
            assert_close(&back, &row);
        }
    }

    #[test]
    fn constant_columns_do_not_divide_by_zero() {
        let scaler = MinMaxScaler::new(vec![5.0], vec![5.0], (0.0, 1.0)).unwrap();
        let out = scaler.transform(array![7.0].view()).unwrap();
        assert_close(&out, &array![2.0]);

        let scaler = StandardScaler::new(vec![3.0], vec![0.0]).unwrap();
        let out = scaler.transform(array![4.0].view()).unwrap();
        assert_close(&out, &array![1.0]);
    }

    #[test]
    fn width_mismatch_is_reported() {
        let scaler = StandardScaler::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();

        assert_eq!(
            scaler.transform(array![1.0].view()),
            Err(WidthMismatch {
                got: 1,
                expected: 2
            })
        );
        assert_eq!(
            scaler.inverse_transform_scalar(1.0),
            Err(WidthMismatch {
                got: 1,
                expected: 2
            })
        );
    }

    #[test]
    fn rejects_inconsistent_parameters() {
        assert!(MinMaxScaler::new(vec![], vec![], (0.0, 1.0)).is_err());
        assert!(MinMaxScaler::new(vec![1.0], vec![2.0, 3.0], (0.0, 1.0)).is_err());
        assert!(MinMaxScaler::new(vec![1.0], vec![2.0], (1.0, 1.0)).is_err());
        assert!(StandardScaler::new(vec![f64::NAN], vec![1.0]).is_err());
    }

    #[test]
    fn decodes_tagged_json() {
        let json = r#"{ "min_max": { "data_min": [50.0], "data_max": [20000.0] } }"#;
        let scaler: ScalerKind = serde_json::from_str(json).unwrap();

        assert_eq!(scaler.width(), 1);
        let price = scaler.inverse_transform_scalar(1.0).unwrap();
        assert!((price - 20000.0).abs() < 1e-9);

        let bad = r#"{ "standard": { "mean": [1.0, 2.0], "scale": [1.0] } }"#;
        assert!(serde_json::from_str::<ScalerKind>(bad).is_err());
    }
}
