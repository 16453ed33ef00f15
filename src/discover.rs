//! Project discovery under the content root.
//!
//! Layout: `<root>/<project>/openapi/*.{yaml,yml}`. Only direct children are
//! looked at, at every level.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};

use crate::config::Config;
use crate::error::{Error, Result};

const SPEC_EXTENSIONS: [&str; 2] = [".yaml", ".yml"];

/// Resolved content root plus the layout rules applied beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRoot {
    path: PathBuf,
    exclude_prefix: char,
    spec_dir: String,
    output_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub openapi_dir: PathBuf,
    /// Spec files in listing order.
    pub specs: Vec<PathBuf>,
    pub output_dir: PathBuf,
}

impl ContentRoot {
    /// Root at `path` with the default layout.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_layout(path, &Config::default())
    }

    pub fn with_layout(path: impl Into<PathBuf>, config: &Config) -> Self {
        Self {
            path: path.into(),
            exclude_prefix: config.exclude_prefix,
            spec_dir: config.spec_dir.clone(),
            output_dir: config.output_dir.clone(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn openapi_dir(&self, project: &str) -> PathBuf {
        self.path.join(project).join(&self.spec_dir)
    }

    pub fn output_dir(&self, project: &str) -> PathBuf {
        self.path.join(project).join(&self.output_dir)
    }

    fn is_excluded(&self, name: &str) -> bool {
        name.starts_with(self.exclude_prefix)
    }

    /// Names of candidate project directories: direct child directories
    /// (symlinks are not followed) not starting with the exclusion marker.
    fn candidates(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.path).map_err(|e| Error::read_dir(&self.path, e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::read_dir(&self.path, e))?;
            let is_dir = entry
                .file_type()
                .map_err(|e| Error::read_dir(entry.path(), e))?
                .is_dir();
            if !is_dir {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                debug!("skipping non UTF-8 directory {}", entry.path().display());
                continue;
            };
            if self.is_excluded(&name) {
                continue;
            }
            names.push(name);
        }
        Ok(names)
    }
}

pub fn is_spec_file(name: &str) -> bool {
    SPEC_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Spec files directly inside `openapi_dir`, in listing order. No recursion.
pub fn list_spec_files(openapi_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(openapi_dir).map_err(|e| Error::read_dir(openapi_dir, e))?;
    let mut specs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::read_dir(openapi_dir, e))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !is_spec_file(name) {
            continue;
        }
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        specs.push(openapi_dir.join(name));
    }
    Ok(specs)
}

/// Names of projects with at least one spec file, in listing order.
///
/// A content root that cannot be listed is logged and yields no projects.
pub fn find_projects(root: &ContentRoot) -> Vec<String> {
    let candidates = match root.candidates() {
        Ok(candidates) => candidates,
        Err(e) => {
            error!("Error scanning for OpenAPI projects: {}", e);
            return Vec::new();
        }
    };

    let mut projects = Vec::new();
    for name in candidates {
        let openapi_dir = root.openapi_dir(&name);
        if !openapi_dir.is_dir() {
            continue;
        }
        match list_spec_files(&openapi_dir) {
            Ok(specs) if !specs.is_empty() => projects.push(name),
            Ok(_) => debug!("project {} has no specs", name),
            Err(e) => warn!("Skipping project {}: {}", name, e),
        }
    }
    projects
}

/// Build `name` fresh from disk, re-listing its spec directory.
pub fn project(root: &ContentRoot, name: &str) -> Result<Project> {
    let openapi_dir = root.openapi_dir(name);
    let specs = list_spec_files(&openapi_dir)?;
    Ok(Project {
        name: name.to_string(),
        output_dir: root.output_dir(name),
        openapi_dir,
        specs,
    })
}

/// Every spec file of every non-excluded project, flattened. Projects without
/// a spec directory contribute nothing; any listing failure aborts the scan.
pub fn find_all_specs(root: &ContentRoot) -> Result<Vec<PathBuf>> {
    let mut specs = Vec::new();
    for name in root.candidates()? {
        let openapi_dir = root.openapi_dir(&name);
        if openapi_dir.exists() {
            specs.extend(list_spec_files(&openapi_dir)?);
        }
    }
    Ok(specs)
}
