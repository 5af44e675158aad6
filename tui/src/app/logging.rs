use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

/// Sends the log output to `path`, since the terminal belongs to the UI.
///
/// The level comes from `RUST_LOG`, `info` when unset.
///
/// # Errors
/// Returns an error if the log file cannot be created.
pub fn init(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}
