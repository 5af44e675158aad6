use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

use crate::artifacts::Artifact;

/// A row handed to a scaler does not have the number of columns it was fitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthMismatch {
    pub got: usize,
    pub expected: usize,
}

impl Display for WidthMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scaler expects {} column(s), got {}",
            self.expected, self.got
        )
    }
}

impl Error for WidthMismatch {}

/// Failures while loading the four serialized artifacts.
///
/// Any of these is fatal: without a complete bundle there is no prediction path.
#[derive(Debug)]
pub enum ArtifactErr {
    /// The file could not be opened or read.
    Io {
        artifact: Artifact,
        path: PathBuf,
        source: io::Error,
    },
    /// The file was read but is not a valid document for this artifact.
    Decode {
        artifact: Artifact,
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The artifacts decoded fine but do not fit together.
    Invalid { artifact: Artifact, reason: String },
}

impl Display for ArtifactErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactErr::Io {
                artifact,
                path,
                source,
            } => write!(f, "cannot read {artifact} at '{}': {source}", path.display()),
            ArtifactErr::Decode {
                artifact,
                path,
                source,
            } => write!(f, "cannot decode {artifact} at '{}': {source}", path.display()),
            ArtifactErr::Invalid { artifact, reason } => write!(f, "invalid {artifact}: {reason}"),
        }
    }
}

impl Error for ArtifactErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ArtifactErr::Io { source, .. } => Some(source),
            ArtifactErr::Decode { source, .. } => Some(source),
            ArtifactErr::Invalid { .. } => None,
        }
    }
}

/// Failures turning user input into a feature vector.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodingErr {
    /// A required field was left empty.
    MissingField(&'static str),
    /// A numeric field does not hold a number of the right kind.
    InvalidNumber { field: &'static str, value: String },
    /// A numeric field is outside the bounds the form allows.
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// The continuous-feature scaler was fitted on a different number of columns.
    Scaler(WidthMismatch),
}

impl Display for EncodingErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingErr::MissingField(field) => write!(f, "missing required field: {field}"),
            EncodingErr::InvalidNumber { field, value } => {
                write!(f, "field {field} is not a valid number: '{value}'")
            }
            EncodingErr::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "field {field} must be between {min} and {max}, got {value}"),
            EncodingErr::Scaler(e) => write!(f, "feature scaler mismatch: {e}"),
        }
    }
}

impl Error for EncodingErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EncodingErr::Scaler(e) => Some(e),
            _ => None,
        }
    }
}

impl From<WidthMismatch> for EncodingErr {
    fn from(value: WidthMismatch) -> Self {
        Self::Scaler(value)
    }
}

/// Failures running the model or inverting the target scaling.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionErr {
    /// The feature vector does not have as many columns as the model was trained on.
    DimensionMismatch { got: usize, expected: usize },
    /// The price scaler is not a single-column scaler.
    Scaler(WidthMismatch),
    /// The model or the inverse scaling produced NaN or infinity.
    NonFinite(f64),
}

impl Display for PredictionErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionErr::DimensionMismatch { got, expected } => write!(
                f,
                "model expects {expected} feature(s), got {got}"
            ),
            PredictionErr::Scaler(e) => write!(f, "price scaler mismatch: {e}"),
            PredictionErr::NonFinite(v) => write!(f, "prediction is not a finite number: {v}"),
        }
    }
}

impl Error for PredictionErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PredictionErr::Scaler(e) => Some(e),
            _ => None,
        }
    }
}

impl From<WidthMismatch> for PredictionErr {
    fn from(value: WidthMismatch) -> Self {
        Self::Scaler(value)
    }
}

/// Everything that can go wrong between a submitted form and a displayed price.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimateErr {
    Encoding(EncodingErr),
    Prediction(PredictionErr),
}

impl Display for EstimateErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimateErr::Encoding(e) => write!(f, "{e}"),
            EstimateErr::Prediction(e) => write!(f, "{e}"),
        }
    }
}

impl Error for EstimateErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EstimateErr::Encoding(e) => Some(e),
            EstimateErr::Prediction(e) => Some(e),
        }
    }
}

impl From<EncodingErr> for EstimateErr {
    fn from(value: EncodingErr) -> Self {
        Self::Encoding(value)
    }
}

impl From<PredictionErr> for EstimateErr {
    fn from(value: PredictionErr) -> Self {
        Self::Prediction(value)
    }
}
