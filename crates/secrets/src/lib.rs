//! Censoring of secrets that are discovered at runtime.

pub mod censor;
mod dynamic;

use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub use censor::Censorer;
pub use dynamic::DynamicCensor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SecretsError {
    #[error("Failed to read secret from {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to build censorer")]
    Censorer(#[from] regex::Error),
}

/// Load an environment variable and add it to the censor list.
///
/// An unset variable yields `Ok("")` and registers nothing. The only error is
/// [`SecretsError::Censorer`], returned when the grown secret set no longer
/// fits the regex size limit; the value is not registered in that case.
pub fn read_from_env(name: &str, censor: &DynamicCensor) -> Result<String, SecretsError> {
    let value = match env::var(name) {
        Ok(value) => value,
        Err(env::VarError::NotPresent) => String::new(),
        Err(env::VarError::NotUnicode(_)) => {
            tracing::warn!(name, "Ignoring environment variable with non-unicode value");
            String::new()
        }
    };
    if !value.is_empty() {
        censor.add_secrets([value.as_str()])?;
    }
    Ok(value)
}

/// Load the trimmed contents of a file and add them to the censor list.
pub fn read_from_file(
    path: impl AsRef<Path>,
    censor: &DynamicCensor,
) -> Result<String, SecretsError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .map_err(|source| SecretsError::Read { path: path.to_path_buf(), source })?;
    let value = data.trim();
    if !value.is_empty() {
        censor.add_secrets([value])?;
    }
    Ok(value.to_string())
}
