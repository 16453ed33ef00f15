//! MDX pages for documentation sites.
//!
//! For every input document: one page per operation, an `index.mdx`
//! overview and a `meta.json` fixing sidebar order. With more than one input
//! each document gets its own subdirectory named after the spec file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use super::{File, GenerateOptions};
use crate::error::{Error, Result};
use crate::parse::{self, intermediate};

#[macro_use]
mod macros;
mod index;
mod meta;
mod pages;

pub struct MarkdownGenerator;

const INDEX_SLUG: &str = "index";
const SPEC_DIR_FALLBACK: &str = "spec";

/// An operation page, as referenced from the index and `meta.json`.
struct PageRef<'a> {
    slug: String,
    title: String,
    method: intermediate::Method,
    path: &'a str,
}

impl super::DocsGenerator for MarkdownGenerator {
    async fn generate_files(&self, options: GenerateOptions<'_>) -> Result<Vec<PathBuf>> {
        let inputs = options.input.input();
        let mut dirs = Slugs::default();
        let mut out = Vec::new();
        // render everything first so a broken spec leaves the output untouched
        for spec_path in inputs {
            let spec = parse::read_spec(spec_path).await?;
            let document = intermediate::parse(&spec).map_err(|source| Error::Unsupported {
                path: spec_path.clone(),
                source,
            })?;
            let files = render(spec_path, &document, options.include_description)?;
            debug!("rendered {} page(s) from {}", files.len(), spec_path.display());

            let prefix = if inputs.len() > 1 {
                PathBuf::from(dirs.claim_or(&spec_stem(spec_path), SPEC_DIR_FALLBACK))
            } else {
                PathBuf::new()
            };
            out.extend(files.into_iter().map(|f| File {
                path: prefix.join(f.path),
                content: f.content,
            }));
        }
        write_files(options.output, out).await
    }
}

/// Pages for one parsed document, paths relative to its output directory.
pub fn render(
    spec_path: &Path,
    document: &intermediate::ApiDocument,
    include_description: bool,
) -> Result<Vec<File>> {
    let mut out = Vec::new();
    let mut slugs = Slugs::default();
    slugs.claim(INDEX_SLUG);

    let mut refs = Vec::new();
    for route in &document.routes {
        for endpoint in &route.endpoints {
            let slug = slugs.claim(&page_slug(endpoint, route.path));
            pages::add_page(&mut out, spec_path, route, endpoint, &slug, include_description)?;
            refs.push(PageRef {
                title: pages::page_title(endpoint, route.path),
                slug,
                method: endpoint.method,
                path: route.path,
            });
        }
    }
    index::add_index(&mut out, document, &refs, include_description)?;
    meta::add_meta(&mut out, document, &refs)?;
    Ok(out)
}

async fn write_files(output: &Path, files: Vec<File>) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = output.join(&file.path);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| Error::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(&path, file.content)
            .await
            .map_err(|source| Error::Write {
                path: path.clone(),
                source,
            })?;
        written.push(path);
    }
    Ok(written)
}

/// YAML front matter block, delimiters included.
fn front_matter<T: Serialize>(page: &str, value: &T) -> Result<String> {
    let yaml = serde_yaml::to_string(value).map_err(|e| Error::Render {
        name: page.to_string(),
        message: e.to_string(),
    })?;
    Ok(format!("---\n{}---\n", yaml))
}

fn page_slug(endpoint: &intermediate::Endpoint, path: &str) -> String {
    match endpoint.operation_id {
        Some(id) if !slugify(id).is_empty() => slugify(id),
        _ => slugify(&format!("{}-{}", endpoint.method.as_str(), path)),
    }
}

fn spec_stem(spec_path: &Path) -> String {
    let stem = spec_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    slugify(&stem)
}

/// Lowercase, dash separated. camelCase boundaries become dashes.
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_lower = false;
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            if c.is_ascii_uppercase() && prev_lower {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        } else {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            prev_lower = false;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Body text safe for MDX: braces and angle brackets would otherwise be
/// read as expressions and elements.
fn mdx_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Hands out unique names, suffixing repeats with `-2`, `-3`, ...
#[derive(Default)]
struct Slugs {
    taken: HashSet<String>,
}

impl Slugs {
    fn claim(&mut self, wanted: &str) -> String {
        self.claim_or(wanted, "operation")
    }

    fn claim_or(&mut self, wanted: &str, fallback: &str) -> String {
        let base = if wanted.is_empty() { fallback } else { wanted };
        let mut candidate = base.to_string();
        let mut n = 2;
        while !self.taken.insert(candidate.clone()) {
            candidate = format!("{}-{}", base, n);
            n += 1;
        }
        candidate
    }
}
