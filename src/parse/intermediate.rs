pub mod types;
use std::collections::BTreeMap;

use oas3::OpenApiV3Spec;
use oas3::spec::{ObjectOrReference, Operation, Parameter, PathItem, RequestBody, Response};
use tracing::debug;
pub use types::*;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("expected an OpenAPI 3.x document, found version {0}")]
    UnsupportedVersion(String),
}

pub fn parse(spec: &OpenApiV3Spec) -> Result<ApiDocument<'_>, Error> {
    if !spec.openapi.starts_with("3.") {
        return Err(Error::UnsupportedVersion(spec.openapi.clone()));
    }
    let mut routes = Vec::new();
    if let Some(paths) = spec.paths.as_ref() {
        for (path, item) in paths {
            routes.push(parse_route(spec, path, item));
        }
    }
    Ok(ApiDocument {
        title: spec.info.title.as_str(),
        version: spec.info.version.as_str(),
        description: spec.info.description.as_deref(),
        routes,
    })
}

fn parse_route<'a>(spec: &'a OpenApiV3Spec, path: &'a str, item: &'a PathItem) -> Route<'a> {
    let shared_params = parse_params(spec, &item.parameters);
    let mut endpoints = Vec::new();
    for (method, operation) in item.methods() {
        let method = match Method::parse(method.as_str()) {
            Some(method) => method,
            None => {
                debug!("skipping unknown method {} on {}", method.as_str(), path);
                continue;
            }
        };
        endpoints.push(parse_endpoint(spec, method, operation, &shared_params));
    }
    endpoints.sort_by_key(|e| e.method);
    Route {
        path,
        description: item.description.as_deref().or(item.summary.as_deref()),
        endpoints,
    }
}

fn parse_endpoint<'a>(
    spec: &'a OpenApiV3Spec,
    method: Method,
    operation: &'a Operation,
    shared_params: &[Param<'a>],
) -> Endpoint<'a> {
    // operation-level parameters override path-level ones with the same name and location
    let own = parse_params(spec, &operation.parameters);
    let mut params: Vec<Param<'a>> = shared_params
        .iter()
        .filter(|p| !own.iter().any(|o| o.name == p.name && o.location == p.location))
        .map(|p| Param {
            name: p.name,
            location: p.location,
            description: p.description,
            required: p.required,
        })
        .collect();
    params.extend(own);

    Endpoint {
        method,
        operation_id: operation.operation_id.as_deref(),
        summary: operation.summary.as_deref(),
        description: operation.description.as_deref(),
        tags: operation.tags.iter().map(String::as_str).collect(),
        deprecated: operation.deprecated.unwrap_or(false),
        params,
        request: operation
            .request_body
            .as_ref()
            .and_then(|body| parse_body(spec, body)),
        responses: operation
            .responses
            .as_ref()
            .map(|responses| parse_responses(spec, responses))
            .unwrap_or_default(),
    }
}

fn parse_params<'a>(
    spec: &'a OpenApiV3Spec,
    params: &'a [ObjectOrReference<Parameter>],
) -> Vec<Param<'a>> {
    params
        .iter()
        .filter_map(|p| match p {
            ObjectOrReference::Object(param) => Some(param),
            ObjectOrReference::Ref { ref_path, .. } => {
                let resolved = resolve_parameter(spec, ref_path);
                if resolved.is_none() {
                    debug!("unresolved parameter reference {}", ref_path);
                }
                resolved
            }
        })
        .map(|param| Param {
            name: param.name.as_str(),
            location: param.location.into(),
            description: param.description.as_deref(),
            required: param.required.unwrap_or(false),
        })
        .collect()
}

fn parse_body<'a>(
    spec: &'a OpenApiV3Spec,
    body: &'a ObjectOrReference<RequestBody>,
) -> Option<Body<'a>> {
    let body = match body {
        ObjectOrReference::Object(body) => body,
        ObjectOrReference::Ref { ref_path, .. } => match resolve_request_body(spec, ref_path) {
            Some(body) => body,
            None => {
                debug!("unresolved request body reference {}", ref_path);
                return None;
            }
        },
    };
    Some(Body {
        description: body.description.as_deref(),
        required: body.required.unwrap_or(false),
        content_types: body.content.keys().map(String::as_str).collect(),
    })
}

fn parse_responses<'a>(
    spec: &'a OpenApiV3Spec,
    responses: &'a BTreeMap<String, ObjectOrReference<Response>>,
) -> BTreeMap<&'a str, Option<&'a str>> {
    responses
        .iter()
        .map(|(status, response)| {
            let description = match response {
                ObjectOrReference::Object(response) => response.description.as_deref(),
                ObjectOrReference::Ref { ref_path, .. } => {
                    resolve_response(spec, ref_path).and_then(|r| r.description.as_deref())
                }
            };
            (status.as_str(), description)
        })
        .collect()
}

fn resolve_parameter<'a>(spec: &'a OpenApiV3Spec, ref_path: &str) -> Option<&'a Parameter> {
    let name = ref_path.strip_prefix("#/components/parameters/")?;
    match spec.components.as_ref()?.parameters.get(name)? {
        ObjectOrReference::Object(param) => Some(param),
        ObjectOrReference::Ref { .. } => None,
    }
}

fn resolve_request_body<'a>(spec: &'a OpenApiV3Spec, ref_path: &str) -> Option<&'a RequestBody> {
    let name = ref_path.strip_prefix("#/components/requestBodies/")?;
    match spec.components.as_ref()?.request_bodies.get(name)? {
        ObjectOrReference::Object(body) => Some(body),
        ObjectOrReference::Ref { .. } => None,
    }
}

fn resolve_response<'a>(spec: &'a OpenApiV3Spec, ref_path: &str) -> Option<&'a Response> {
    let name = ref_path.strip_prefix("#/components/responses/")?;
    match spec.components.as_ref()?.responses.get(name)? {
        ObjectOrReference::Object(response) => Some(response),
        ObjectOrReference::Ref { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PETSTORE: &str = r#"
openapi: 3.0.3
info:
  title: Petstore
  version: 1.2.0
  description: Pets and their owners.
paths:
  /pets/{petId}:
    parameters:
      - $ref: '#/components/parameters/PetId'
      - name: trace
        in: header
        description: shared trace header
    get:
      operationId: getPet
      summary: Fetch a pet
      tags: [pets]
      parameters:
        - name: trace
          in: header
          required: true
          description: overridden
      responses:
        '200':
          description: The pet
        '404':
          $ref: '#/components/responses/NotFound'
    delete:
      deprecated: true
      requestBody:
        $ref: '#/components/requestBodies/Reason'
      responses:
        '204':
          description: Gone
components:
  parameters:
    PetId:
      name: petId
      in: path
      required: true
      description: Pet identifier
  responses:
    NotFound:
      description: No such pet
  requestBodies:
    Reason:
      description: Why it was removed
      required: true
      content:
        application/json: {}
"#;

    fn petstore() -> OpenApiV3Spec {
        serde_yaml::from_str(PETSTORE).unwrap()
    }

    #[test]
    fn parses_document_metadata() {
        let spec = petstore();
        let doc = parse(&spec).unwrap();
        assert_eq!(doc.title, "Petstore");
        assert_eq!(doc.version, "1.2.0");
        assert_eq!(doc.description, Some("Pets and their owners."));
        assert_eq!(doc.routes.len(), 1);
        assert_eq!(doc.routes[0].path, "/pets/{petId}");
    }

    #[test]
    fn resolves_references_and_merges_params() {
        let spec = petstore();
        let doc = parse(&spec).unwrap();
        let route = &doc.routes[0];
        let methods: Vec<Method> = route.endpoints.iter().map(|e| e.method).collect();
        assert_eq!(methods, vec![Method::Get, Method::Delete]);

        let get = &route.endpoints[0];
        assert_eq!(get.operation_id, Some("getPet"));
        assert_eq!(get.tags, vec!["pets"]);
        assert_eq!(get.params.len(), 2);
        assert_eq!(get.params[0].name, "petId");
        assert_eq!(get.params[0].location, Location::Path);
        assert!(get.params[0].required);
        assert_eq!(get.params[1].description, Some("overridden"));
        assert!(get.params[1].required);
        assert_eq!(get.responses.get("404"), Some(&Some("No such pet")));

        let delete = &route.endpoints[1];
        assert!(delete.deprecated);
        let body = delete.request.as_ref().unwrap();
        assert_eq!(body.description, Some("Why it was removed"));
        assert!(body.required);
        assert_eq!(body.content_types, vec!["application/json"]);
    }

    #[test]
    fn rejects_non_v3_documents() {
        let mut spec = petstore();
        spec.openapi = "2.0".to_string();
        assert_eq!(
            parse(&spec),
            Err(Error::UnsupportedVersion("2.0".to_string()))
        );
    }

    #[test]
    fn method_round_trip() {
        assert_eq!(Method::parse("GET"), Some(Method::Get));
        assert_eq!(Method::parse("query"), None);
        assert_eq!(Method::Patch.to_string(), "PATCH");
    }
}
