use std::{
    fmt::{self, Display},
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use log::{info, warn};
use serde::de::DeserializeOwned;

use crate::{
    encoder::{CONTINUOUS_COLUMNS, FeatureEncoder},
    error::{ArtifactErr, EstimateErr},
    input::RawInput,
    model::{ModelKind, Regressor},
    predictor::{Estimate, Predictor},
    scaler::{Scaler, ScalerKind},
    schema::FeatureSchema,
};

/// The four objects produced by the offline training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Model,
    FeatureColumns,
    FeatureScaler,
    PriceScaler,
}

impl Artifact {
    pub const ALL: [Artifact; 4] = [
        Artifact::Model,
        Artifact::FeatureColumns,
        Artifact::FeatureScaler,
        Artifact::PriceScaler,
    ];

    /// File name inside the models directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Artifact::Model => "rf_model.json",
            Artifact::FeatureColumns => "feature_columns.json",
            Artifact::FeatureScaler => "feature_scaler.json",
            Artifact::PriceScaler => "price_scaler.json",
        }
    }
}

impl Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Artifact::Model => "model",
            Artifact::FeatureColumns => "feature columns",
            Artifact::FeatureScaler => "feature scaler",
            Artifact::PriceScaler => "price scaler",
        };
        f.write_str(name)
    }
}

/// Where each artifact lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub feature_columns: PathBuf,
    pub feature_scaler: PathBuf,
    pub price_scaler: PathBuf,
}

impl ArtifactPaths {
    /// The standard file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join(Artifact::Model.file_name()),
            feature_columns: dir.join(Artifact::FeatureColumns.file_name()),
            feature_scaler: dir.join(Artifact::FeatureScaler.file_name()),
            price_scaler: dir.join(Artifact::PriceScaler.file_name()),
        }
    }

    pub fn get(&self, artifact: Artifact) -> &Path {
        match artifact {
            Artifact::Model => &self.model,
            Artifact::FeatureColumns => &self.feature_columns,
            Artifact::FeatureScaler => &self.feature_scaler,
            Artifact::PriceScaler => &self.price_scaler,
        }
    }
}

/// Reads and decodes one artifact.
fn read<T: DeserializeOwned>(paths: &ArtifactPaths, artifact: Artifact) -> Result<T, ArtifactErr> {
    let path = paths.get(artifact);

    let file = File::open(path).map_err(|source| ArtifactErr::Io {
        artifact,
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| ArtifactErr::Decode {
        artifact,
        path: path.to_path_buf(),
        source,
    })
}

/// Everything needed to price a house, loaded once and then only read.
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    model: ModelKind,
    schema: FeatureSchema,
    feature_scaler: ScalerKind,
    price_scaler: ScalerKind,
}

impl ArtifactBundle {
    /// Assembles a bundle from already decoded artifacts.
    ///
    /// # Errors
    /// Returns `ArtifactErr::Invalid` if the feature scaler is not fitted on the
    /// two continuous columns or the price scaler is not single-column.
    pub fn new(
        model: ModelKind,
        schema: FeatureSchema,
        feature_scaler: ScalerKind,
        price_scaler: ScalerKind,
    ) -> Result<Self, ArtifactErr> {
        if feature_scaler.width() != CONTINUOUS_COLUMNS.len() {
            return Err(ArtifactErr::Invalid {
                artifact: Artifact::FeatureScaler,
                reason: format!(
                    "expected {} columns ({}), got {}",
                    CONTINUOUS_COLUMNS.len(),
                    CONTINUOUS_COLUMNS.join(", "),
                    feature_scaler.width()
                ),
            });
        }

        if price_scaler.width() != 1 {
            return Err(ArtifactErr::Invalid {
                artifact: Artifact::PriceScaler,
                reason: format!("expected 1 column, got {}", price_scaler.width()),
            });
        }

        // Not fatal here: the form can still load, every submission will fail.
        if schema.len() != model.n_features() {
            warn!(
                schema = schema.len(), model = model.n_features();
                "feature schema and model disagree on the number of features"
            );
        }

        Ok(Self {
            model,
            schema,
            feature_scaler,
            price_scaler,
        })
    }

    /// Loads and validates all four artifacts.
    ///
    /// # Errors
    /// Returns `ArtifactErr` naming the first artifact that is missing,
    /// undecodable or inconsistent with the others.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactErr> {
        info!("loading artifacts, model at {}", paths.model.display());

        let model: ModelKind = read(paths, Artifact::Model)?;
        let schema: FeatureSchema = read(paths, Artifact::FeatureColumns)?;
        let feature_scaler: ScalerKind = read(paths, Artifact::FeatureScaler)?;
        let price_scaler: ScalerKind = read(paths, Artifact::PriceScaler)?;

        let bundle = Self::new(model, schema, feature_scaler, price_scaler)?;
        info!(
            features = bundle.schema.len(), model_features = bundle.model.n_features();
            "artifacts loaded"
        );
        Ok(bundle)
    }

    pub fn model(&self) -> &ModelKind {
        &self.model
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn encoder(&self) -> FeatureEncoder<'_, ScalerKind> {
        FeatureEncoder::new(&self.feature_scaler, &self.schema)
    }

    pub fn predictor(&self) -> Predictor<'_, ModelKind, ScalerKind> {
        Predictor::new(&self.model, &self.price_scaler)
    }

    /// Encodes, predicts and formats one submission.
    ///
    /// # Errors
    /// Returns `EstimateErr` wrapping the encoding or prediction failure.
    pub fn estimate(&self, input: &RawInput) -> Result<Estimate, EstimateErr> {
        let features = self.encoder().encode(input)?;
        let price = self.predictor().predict(features.view())?;
        Ok(Estimate::from(price))
    }
}
