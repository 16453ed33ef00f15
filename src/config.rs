//! Configuration loading.
//!
//! Values are merged in order: built-in defaults, an optional TOML file
//! (`openapi-docs.toml` in the working directory unless another path is
//! given), then `OPENAPI_DOCS_*` environment variables.

use std::path::{Component, Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

pub const DEFAULT_CONFIG_FILE: &str = "openapi-docs.toml";
pub const ENV_PREFIX: &str = "OPENAPI_DOCS_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content root, relative to the working directory.
    pub content_dir: PathBuf,
    /// Project directories whose name starts with this are ignored.
    pub exclude_prefix: char,
    /// Name of the per-project directory holding the spec files.
    pub spec_dir: String,
    /// Where generated pages go, relative to the project directory.
    pub output_dir: PathBuf,
    pub include_description: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("../../content"),
            exclude_prefix: '_',
            spec_dir: "openapi".to_string(),
            output_dir: ["docs", "openapi", "(generated)"].iter().collect(),
            include_description: true,
        }
    }
}

impl Config {
    /// Load defaults → file → env. The implicit `openapi-docs.toml` may be
    /// absent; a file named explicitly must exist.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        let file = match file {
            Some(file) if !file.is_file() => {
                return Err(Error::Config(format!(
                    "config file {} not found",
                    file.display()
                )));
            }
            Some(file) => Some(file.to_path_buf()),
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|f| f.is_file()),
        };
        if let Some(file) = file {
            debug!("Loading config from: {}", file.display());
            figment = figment.merge(Toml::file(&file));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Content root for the given working directory.
    pub fn content_root_from(&self, cwd: &Path) -> PathBuf {
        normalize(&cwd.join(&self.content_dir))
    }

    /// Content root for the process working directory.
    pub fn content_root(&self) -> Result<PathBuf> {
        let cwd = std::env::current_dir().map_err(Error::WorkingDir)?;
        Ok(self.content_root_from(&cwd))
    }
}

/// Lexically fold `.` and `..` without touching the filesystem, so the path
/// need not exist.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
