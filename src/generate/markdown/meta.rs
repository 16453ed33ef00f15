use std::path::PathBuf;

use serde::Serialize;

use super::super::interface::File;
use super::{PageRef, INDEX_SLUG};
use crate::error::{Error, Result};
use crate::parse::intermediate::ApiDocument;

const META_FILE: &str = "meta.json";

/// Sidebar entry for a document: its title and the page order.
#[derive(Serialize)]
struct Meta<'a> {
    title: &'a str,
    pages: Vec<&'a str>,
}

pub(super) fn add_meta(out: &mut Vec<File>, document: &ApiDocument, pages: &[PageRef]) -> Result<()> {
    let meta = Meta {
        title: document.title,
        pages: std::iter::once(INDEX_SLUG)
            .chain(pages.iter().map(|p| p.slug.as_str()))
            .collect(),
    };
    let mut content = serde_json::to_string_pretty(&meta).map_err(|e| Error::Render {
        name: META_FILE.to_string(),
        message: e.to_string(),
    })?;
    content.push('\n');
    out.push(File {
        path: PathBuf::from(META_FILE),
        content,
    });
    Ok(())
}
