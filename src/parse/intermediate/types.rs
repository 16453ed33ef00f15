use std::collections::BTreeMap;
use std::fmt;

/// The parts of an OpenAPI document that end up on generated pages.
#[derive(Debug, PartialEq, Eq)]
pub struct ApiDocument<'a> {
    pub title: &'a str,
    pub version: &'a str,
    pub description: Option<&'a str>,
    pub routes: Vec<Route<'a>>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Route<'a> {
    pub path: &'a str,
    pub description: Option<&'a str>,
    pub endpoints: Vec<Endpoint<'a>>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Endpoint<'a> {
    pub method: Method,
    pub operation_id: Option<&'a str>,
    pub summary: Option<&'a str>,
    pub description: Option<&'a str>,
    pub tags: Vec<&'a str>,
    pub deprecated: bool,
    pub params: Vec<Param<'a>>,
    pub request: Option<Body<'a>>,
    /// status code → description
    pub responses: BTreeMap<&'a str, Option<&'a str>>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Param<'a> {
    pub name: &'a str,
    pub location: Location,
    pub description: Option<&'a str>,
    pub required: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Body<'a> {
    pub description: Option<&'a str>,
    pub required: bool,
    pub content_types: Vec<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Path,
    Query,
    Header,
    Cookie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Trace,
}

impl Method {
    pub fn parse(s: &str) -> Option<Self> {
        let method = match s.to_ascii_lowercase().as_str() {
            "get" => Method::Get,
            "post" => Method::Post,
            "put" => Method::Put,
            "delete" => Method::Delete,
            "patch" => Method::Patch,
            "head" => Method::Head,
            "options" => Method::Options,
            "trace" => Method::Trace,
            _ => return None,
        };
        Some(method)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
            Method::Put => "put",
            Method::Delete => "delete",
            Method::Patch => "patch",
            Method::Head => "head",
            Method::Options => "options",
            Method::Trace => "trace",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().to_ascii_uppercase())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Location::Path => "path",
            Location::Query => "query",
            Location::Header => "header",
            Location::Cookie => "cookie",
        };
        write!(f, "{}", name)
    }
}

impl From<oas3::spec::ParameterIn> for Location {
    fn from(location: oas3::spec::ParameterIn) -> Self {
        use oas3::spec::ParameterIn;
        match location {
            ParameterIn::Path => Location::Path,
            ParameterIn::Query => Location::Query,
            ParameterIn::Header => Location::Header,
            ParameterIn::Cookie => Location::Cookie,
        }
    }
}
