//! Documentation pages from per-project OpenAPI specs.
//!
//! Projects live under a content root as `<root>/<project>/openapi/*.{yaml,yml}`.
//! [`driver::Driver`] generates pages for each of them into
//! `<root>/<project>/docs/openapi/(generated)`; [`loader::load_openapi`]
//! gathers every spec for a site that renders them at runtime.

pub mod config;
pub mod discover;
pub mod driver;
pub mod error;
pub mod generate;
pub mod loader;
pub mod parse;

pub use config::Config;
pub use discover::{ContentRoot, Project};
pub use driver::{Driver, RunReport};
pub use error::{Error, Result};
pub use generate::{DocsGenerator, GenerateOptions, MarkdownGenerator, OpenApiSource};
pub use loader::load_openapi;
