use std::{
    env,
    path::{Path, PathBuf},
};

use estimator::ArtifactPaths;

const DEFAULT_MODELS_DIR: &str = "models";
const DEFAULT_LOG_FILE: &str = "house-price.log";

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    models_dir: PathBuf,
    log_file: PathBuf,
}

impl AppConfig {
    /// Reads `MODELS_DIR` and `LOG_FILE`, falling back to defaults when unset or empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Self {
            models_dir: var("MODELS_DIR", DEFAULT_MODELS_DIR),
            log_file: var("LOG_FILE", DEFAULT_LOG_FILE),
        }
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::in_dir(&self.models_dir)
    }
}
