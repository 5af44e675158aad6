use log::debug;
use ndarray::ArrayView1;

use crate::{error::PredictionErr, model::Regressor, price::Price, scaler::Scaler};

/// The target was scaled in millions of rupiah.
pub const UNIT_FACTOR: f64 = 1_000_000.0;

/// Runs the model and maps its output back to rupiah.
pub struct Predictor<'a, M: Regressor + ?Sized, S: Scaler + ?Sized> {
    model: &'a M,
    price_scaler: &'a S,
}

impl<'a, M: Regressor + ?Sized, S: Scaler + ?Sized> Predictor<'a, M, S> {
    /// Creates a new `Predictor`.
    ///
    /// # Arguments
    /// * `model` - The trained regressor.
    /// * `price_scaler` - The single-column scaler the target was fitted with.
    pub fn new(model: &'a M, price_scaler: &'a S) -> Self {
        Self {
            model,
            price_scaler,
        }
    }

    /// Predicts the price of one encoded row.
    ///
    /// # Errors
    /// Returns `PredictionErr` if the model rejects the row, the price scaler is
    /// not single-column, or the result is not finite.
    pub fn predict(&self, features: ArrayView1<f64>) -> Result<Price, PredictionErr> {
        let scaled = self.model.predict(features)?;
        let millions = self.price_scaler.inverse_transform_scalar(scaled)?;
        let rupiah = millions * UNIT_FACTOR;

        if !rupiah.is_finite() {
            return Err(PredictionErr::NonFinite(rupiah));
        }

        debug!(scaled = scaled, rupiah = rupiah; "predicted price");
        Ok(Price::from_rupiah(rupiah))
    }
}

/// The outcome of one successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub price: Price,
    pub formatted: String,
}

impl From<Price> for Estimate {
    fn from(price: Price) -> Self {
        Self {
            price,
            formatted: price.format_idr(),
        }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array1, array};

    use super::*;
    use crate::{
        error::WidthMismatch,
        scaler::{MinMaxScaler, StandardScaler},
    };

    /// Sums its inputs, whatever they are.
    struct SumModel(usize);

    impl Regressor for SumModel {
        fn n_features(&self) -> usize {
            self.0
        }

        fn predict(&self, features: ArrayView1<f64>) -> Result<f64, PredictionErr> {
            if features.len() != self.0 {
                return Err(PredictionErr::DimensionMismatch {
                    got: features.len(),
                    expected: self.0,
                });
            }
            Ok(features.sum())
        }
    }

    fn price_scaler() -> MinMaxScaler {
        MinMaxScaler::new(vec![100.0], vec![1100.0], (0.0, 1.0)).unwrap()
    }

    #[test]
    fn inverts_scaling_and_applies_unit() {
        let (model, scaler) = (SumModel(2), price_scaler());
        let predictor = Predictor::new(&model, &scaler);

        let price = predictor.predict(array![0.25, 0.25].view()).unwrap();

        // 0.5 on [100, 1100] million
        assert_eq!(price.rupiah(), 600.0 * UNIT_FACTOR);
    }

    #[test]
    fn predicting_twice_gives_the_same_price() {
        let (model, scaler) = (SumModel(3), price_scaler());
        let predictor = Predictor::new(&model, &scaler);
        let x: Array1<f64> = array![0.1, 0.2, 0.3];

        let a = predictor.predict(x.view()).unwrap();
        let b = predictor.predict(x.view()).unwrap();
        assert_eq!(a.rupiah().to_bits(), b.rupiah().to_bits());
    }

    #[test]
    fn dimension_mismatch_is_a_prediction_error() {
        let (model, scaler) = (SumModel(4), price_scaler());
        let predictor = Predictor::new(&model, &scaler);

        assert_eq!(
            predictor.predict(array![1.0].view()),
            Err(PredictionErr::DimensionMismatch {
                got: 1,
                expected: 4
            })
        );
    }

    #[test]
    fn multi_column_price_scaler_is_rejected() {
        let model = SumModel(1);
        let scaler = StandardScaler::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
        let predictor = Predictor::new(&model, &scaler);

        assert_eq!(
            predictor.predict(array![1.0].view()),
            Err(PredictionErr::Scaler(WidthMismatch {
                got: 1,
                expected: 2
            }))
        );
    }

    #[test]
    fn non_finite_output_is_rejected() {
        let model = SumModel(1);
        let scaler = price_scaler();
        let predictor = Predictor::new(&model, &scaler);

        assert!(matches!(
            predictor.predict(array![f64::INFINITY].view()),
            Err(PredictionErr::NonFinite(_))
        ));
    }

    #[test]
    fn estimate_carries_formatted_price() {
        let estimate = Estimate::from(Price::from_rupiah(600_000_000.0));
        assert_eq!(estimate.formatted, "Rp600.000.000,00");
    }
}
