use std::path::PathBuf;

use serde::Serialize;

use super::super::interface::File;
use super::{front_matter, mdx_text, PageRef, INDEX_SLUG};
use crate::error::Result;
use crate::parse::intermediate::ApiDocument;

#[derive(Serialize)]
struct IndexFrontMatter<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

pub(super) fn add_index(
    out: &mut Vec<File>,
    document: &ApiDocument,
    pages: &[PageRef],
    include_description: bool,
) -> Result<()> {
    out.push(File {
        path: PathBuf::from(format!("{}.mdx", INDEX_SLUG)),
        content: mk_index(document, pages, include_description)?,
    });
    Ok(())
}

fn mk_index(document: &ApiDocument, pages: &[PageRef], include_description: bool) -> Result<String> {
    let mut c = front_matter(
        INDEX_SLUG,
        &IndexFrontMatter {
            title: document.title,
            description: document.description.filter(|_| include_description),
        },
    )?;
    cpf!(c, "");
    cpf!(c, "Version `{}`", document.version);
    if include_description {
        if let Some(description) = document.description {
            cpf!(c, "");
            cpf!(c, "{}", mdx_text(description.trim()));
        }
    }
    if pages.is_empty() {
        cpf!(c, "");
        cpf!(c, "This API defines no operations.");
        return Ok(c);
    }
    cpf!(c, "");
    cpf!(c, "## Operations");
    cpf!(c, "");
    for page in pages {
        cpf!(c, "- [{}](./{}) `{} {}`", mdx_text(&page.title), page.slug, page.method, page.path);
    }
    Ok(c)
}
