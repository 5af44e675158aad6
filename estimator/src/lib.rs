//! House price estimation from six form fields.
//!
//! One submission flows through [`FeatureEncoder`] (scaling, one-hot encoding,
//! alignment to the training schema) and [`Predictor`] (model inference,
//! inverse target scaling) using artifacts loaded once into an
//! [`ArtifactBundle`].

pub mod artifacts;
pub mod encoder;
pub mod error;
pub mod input;
pub mod model;
pub mod predictor;
pub mod price;
pub mod scaler;
pub mod schema;

pub use artifacts::{Artifact, ArtifactBundle, ArtifactPaths};
pub use encoder::FeatureEncoder;
pub use error::{ArtifactErr, EncodingErr, EstimateErr, PredictionErr, WidthMismatch};
pub use input::{City, Field, InputDraft, NumberKind, NumberSpec, RawInput};
pub use model::{ModelKind, Regressor};
pub use predictor::{Estimate, Predictor};
pub use price::Price;
pub use scaler::{Scaler, ScalerKind};
pub use schema::FeatureSchema;
