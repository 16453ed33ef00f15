use std::path::{Path, PathBuf};

use serde::Serialize;

use super::super::interface::File;
use super::{front_matter, mdx_text};
use crate::error::{Error, Result};
use crate::parse::intermediate::{self, Endpoint, Route};

#[derive(Serialize)]
struct PageFrontMatter<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    full: bool,
    #[serde(rename = "_openapi")]
    openapi: OperationMeta<'a>,
}

#[derive(Serialize)]
struct OperationMeta<'a> {
    method: String,
    route: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<&'a str>,
}

#[derive(Serialize)]
struct OperationRef<'a> {
    method: &'a str,
    path: &'a str,
}

pub(super) fn add_page(
    out: &mut Vec<File>,
    spec_path: &Path,
    route: &Route,
    endpoint: &Endpoint,
    slug: &str,
    include_description: bool,
) -> Result<()> {
    out.push(File {
        path: PathBuf::from(format!("{}.mdx", slug)),
        content: mk_page(spec_path, route, endpoint, slug, include_description)?,
    });
    Ok(())
}

pub(super) fn page_title(endpoint: &Endpoint, path: &str) -> String {
    endpoint
        .summary
        .or(endpoint.operation_id)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} {}", endpoint.method, path))
}

fn mk_page(
    spec_path: &Path,
    route: &Route,
    endpoint: &Endpoint,
    slug: &str,
    include_description: bool,
) -> Result<String> {
    let title = page_title(endpoint, route.path);
    let description = if include_description {
        endpoint.description.or(route.description)
    } else {
        None
    };
    let mut c = front_matter(
        slug,
        &PageFrontMatter {
            title: &title,
            description,
            full: true,
            openapi: OperationMeta {
                method: endpoint.method.to_string(),
                route: route.path,
                tags: endpoint.tags.clone(),
            },
        },
    )?;

    let document = json(slug, &spec_path.display().to_string())?;
    let operations = json(
        slug,
        &[OperationRef {
            method: endpoint.method.as_str(),
            path: route.path,
        }],
    )?;
    cpf!(c, "");
    cpf!(c, "{{/* This file is generated. Do not edit it by hand; rerun the generator instead. */}}");
    cpf!(c, "");
    if endpoint.deprecated {
        cpf!(c, "<Callout type=\"warn\">This operation is deprecated.</Callout>");
        cpf!(c, "");
    }
    cpf!(
        c,
        "<APIPage document={{{}}} operations={{{}}} hasHead={{false}} />",
        document,
        operations
    );
    cpf!(c, "");
    cpf!(c, "`{} {}`", endpoint.method, route.path);
    add_params(&mut c, &endpoint.params);
    add_body(&mut c, endpoint.request.as_ref());
    add_responses(&mut c, endpoint);
    Ok(c)
}

fn add_params(c: &mut String, params: &[intermediate::Param]) {
    if params.is_empty() {
        return;
    }
    cpf!(c, "");
    cpf!(c, "## Parameters");
    cpf!(c, "");
    cpf!(c, "| Name | In | Required | Description |");
    cpf!(c, "| --- | --- | --- | --- |");
    for p in params {
        cpf!(
            c,
            "| `{}` | {} | {} | {} |",
            p.name,
            p.location,
            if p.required { "yes" } else { "no" },
            cell(p.description)
        );
    }
}

fn add_body(c: &mut String, body: Option<&intermediate::Body>) {
    let Some(body) = body else {
        return;
    };
    cpf!(c, "");
    cpf!(c, "## Request body{}", if body.required { " (required)" } else { "" });
    if let Some(description) = body.description {
        cpf!(c, "");
        cpf!(c, "{}", mdx_text(description.trim()));
    }
    if !body.content_types.is_empty() {
        cpf!(c, "");
        for content_type in &body.content_types {
            cpf!(c, "- `{}`", content_type);
        }
    }
}

fn add_responses(c: &mut String, endpoint: &Endpoint) {
    if endpoint.responses.is_empty() {
        return;
    }
    cpf!(c, "");
    cpf!(c, "## Responses");
    cpf!(c, "");
    cpf!(c, "| Status | Description |");
    cpf!(c, "| --- | --- |");
    for (status, description) in &endpoint.responses {
        cpf!(c, "| `{}` | {} |", status, cell(*description));
    }
}

/// Table cells hold one line and no bare pipes.
fn cell(text: Option<&str>) -> String {
    text.map(|t| mdx_text(&t.split_whitespace().collect::<Vec<_>>().join(" ")).replace('|', "\\|"))
        .unwrap_or_default()
}

fn json<T: Serialize + ?Sized>(page: &str, value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::Render {
        name: page.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::intermediate::{Body, Location, Method, Param};
    use std::collections::BTreeMap;

    fn endpoint<'a>() -> Endpoint<'a> {
        Endpoint {
            method: Method::Delete,
            operation_id: None,
            summary: None,
            description: Some("Removes it | for good"),
            tags: vec!["pets"],
            deprecated: true,
            params: vec![Param {
                name: "petId",
                location: Location::Path,
                description: Some("Pet\nidentifier"),
                required: true,
            }],
            request: Some(Body {
                description: None,
                required: true,
                content_types: vec!["application/json"],
            }),
            responses: BTreeMap::from([("204", Some("Gone")), ("default", None)]),
        }
    }

    #[test]
    fn title_falls_back_to_method_and_path() {
        assert_eq!(page_title(&endpoint(), "/pets/{id}"), "DELETE /pets/{id}");
    }

    #[test]
    fn page_carries_front_matter_and_tables() {
        let route = Route {
            path: "/pets/{petId}",
            description: None,
            endpoints: Vec::new(),
        };
        let page = mk_page(
            Path::new("/content/pets/openapi/pets.yaml"),
            &route,
            &endpoint(),
            "delete-pets-petid",
            true,
        )
        .unwrap();

        assert!(page.starts_with("---\ntitle: "));
        assert!(page.contains("DELETE /pets/{petId}"));
        assert!(page.contains("full: true"));
        assert!(page.contains("method: DELETE"));
        assert!(page.contains("- pets"));
        assert!(page.contains(r#"document={"/content/pets/openapi/pets.yaml"}"#));
        assert!(page.contains(r#"operations={[{"method":"delete","path":"/pets/{petId}"}]}"#));
        assert!(page.contains("This operation is deprecated."));
        assert!(page.contains("| `petId` | path | yes | Pet identifier |"));
        assert!(page.contains("## Request body (required)"));
        assert!(page.contains("| `204` | Gone |"));
        assert!(page.contains("| `default` |  |"));
    }

    #[test]
    fn cells_are_single_line_and_escaped() {
        assert_eq!(cell(Some("a |\n b")), "a \\| b");
        assert_eq!(cell(None), "");
        assert_eq!(cell(Some("a <b> {c}")), "a &lt;b&gt; \\{c\\}");
    }
}
