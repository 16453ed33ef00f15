use std::path::{Path, PathBuf};

use crate::error::Result;

/// Turns a set of OpenAPI documents into documentation pages on disk.
// the driver awaits on a current-thread runtime, so no Send bound is needed
#[allow(async_fn_in_trait)]
pub trait DocsGenerator {
    // write pages under `options.output`, returning the files written
    async fn generate_files(&self, options: GenerateOptions<'_>) -> Result<Vec<PathBuf>>;
}

/// The spec files one generator call works from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenApiSource {
    input: Vec<PathBuf>,
}

impl OpenApiSource {
    pub fn new(input: Vec<PathBuf>) -> Self {
        Self { input }
    }

    pub fn input(&self) -> &[PathBuf] {
        &self.input
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct GenerateOptions<'a> {
    pub input: &'a OpenApiSource,
    pub output: &'a Path,
    pub include_description: bool,
}

/// A generated file, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub path: PathBuf,
    pub content: String,
}
