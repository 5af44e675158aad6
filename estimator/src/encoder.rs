use std::{collections::BTreeMap, fmt::Display};

use log::warn;
use ndarray::{Array1, array};

use crate::{error::EncodingErr, input::RawInput, scaler::Scaler, schema::FeatureSchema};

/// Names of the continuous columns, in the order the feature scaler was fitted on.
pub const CONTINUOUS_COLUMNS: [&str; 2] = ["area", "building_area"];

pub const CITY_PREFIX: &str = "City";
pub const BEDROOM_PREFIX: &str = "Bedroom";
pub const BATHROOM_PREFIX: &str = "Bathroom";
pub const GARAGE_PREFIX: &str = "Garage";

/// Columns produced for a single row, before alignment.
pub type ProducedColumns = BTreeMap<String, f64>;

/// Name of the indicator column for `value` of a categorical field.
pub fn one_hot_column(prefix: &str, value: impl Display) -> String {
    format!("{prefix}_{value}")
}

/// Lays the produced columns out in schema order.
///
/// Schema columns that were not produced are zero; produced columns the schema
/// does not know are dropped.
pub fn align(produced: &ProducedColumns, schema: &FeatureSchema) -> Array1<f64> {
    schema
        .columns()
        .iter()
        .map(|name| produced.get(name).copied().unwrap_or(0.0))
        .collect()
}

/// Turns a [`RawInput`] into the feature vector the model was trained on.
pub struct FeatureEncoder<'a, S: Scaler + ?Sized> {
    scaler: &'a S,
    schema: &'a FeatureSchema,
}

impl<'a, S: Scaler + ?Sized> FeatureEncoder<'a, S> {
    /// Creates a new `FeatureEncoder`.
    ///
    /// # Arguments
    /// * `scaler` - The scaler fitted on `[area, building_area]`.
    /// * `schema` - The training-time column order.
    pub fn new(scaler: &'a S, schema: &'a FeatureSchema) -> Self {
        Self { scaler, schema }
    }

    /// Scales the continuous fields and one-hot encodes the discrete ones.
    ///
    /// # Errors
    /// Returns `EncodingErr::Scaler` if the scaler was not fitted on two columns.
    pub fn produce(&self, input: &RawInput) -> Result<ProducedColumns, EncodingErr> {
        let raw = array![input.area, input.building_area];
        let scaled = self.scaler.transform(raw.view())?;

        let mut columns: ProducedColumns = CONTINUOUS_COLUMNS
            .iter()
            .zip(scaled.iter())
            .map(|(name, &value)| (name.to_string(), value))
            .collect();

        let indicators = [
            one_hot_column(CITY_PREFIX, &input.city),
            one_hot_column(BEDROOM_PREFIX, input.bedrooms),
            one_hot_column(BATHROOM_PREFIX, input.bathrooms),
            one_hot_column(GARAGE_PREFIX, input.garage),
        ];
        columns.extend(indicators.into_iter().map(|name| (name, 1.0)));

        Ok(columns)
    }

    /// Encodes one row into a vector of exactly `schema.len()` values.
    ///
    /// Categorical values the model never saw contribute nothing; they are
    /// logged and zero-filled rather than rejected.
    ///
    /// # Errors
    /// Returns `EncodingErr` if the continuous fields cannot be scaled.
    pub fn encode(&self, input: &RawInput) -> Result<Array1<f64>, EncodingErr> {
        let produced = self.produce(input)?;

        for name in produced.keys().filter(|name| !self.schema.contains(name)) {
            warn!(column = name.as_str(); "column not in feature schema, dropped");
        }

        Ok(align(&produced, self.schema))
    }
}
