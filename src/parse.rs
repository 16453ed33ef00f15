pub mod intermediate;

use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Read and deserialize one YAML spec file.
pub async fn read_spec(path: &Path) -> Result<oas3::OpenApiV3Spec> {
    debug!("reading spec {}", path.display());
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::ReadSpec {
            path: path.to_path_buf(),
            source,
        })?;
    serde_yaml::from_str(&content).map_err(|source| Error::ParseSpec {
        path: path.to_path_buf(),
        source,
    })
}
