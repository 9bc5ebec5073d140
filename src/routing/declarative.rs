//! Declarative TOML route modules.
//!
//! A `.toml` file under the routes root is a router when it says so:
//!
//! ```toml
//! kind = "router"
//!
//! [[routes]]
//! path = "/"
//! methods = ["GET"]
//! status = 200
//! body = "hello"
//! content_type = "text/plain; charset=utf-8"
//! ```
//!
//! Any other TOML document is plain data and is reported as
//! [`ModuleExport::Other`] so it can sit next to route files.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, on, MethodFilter, MethodRouter},
    Router,
};
use serde::Deserialize;

use crate::routing::prefix::check_route_path;
use crate::routing::types::{LoadError, ModuleExport};

/// Value of the `kind` key that marks a router module.
pub const ROUTER_KIND: &str = "router";

const ANY_METHOD: &str = "ANY";

#[derive(Debug, Deserialize)]
struct DeclaredModule {
    #[serde(default)]
    routes: Vec<DeclaredRoute>,
}

#[derive(Debug, Deserialize)]
struct DeclaredRoute {
    path: String,
    #[serde(default = "default_methods")]
    methods: Vec<String>,
    #[serde(default = "default_status")]
    status: u16,
    #[serde(default)]
    body: String,
    content_type: Option<String>,
}

fn default_methods() -> Vec<String> {
    vec!["GET".to_string()]
}

fn default_status() -> u16 {
    200
}

#[derive(Debug, Clone)]
struct StaticResponse {
    status: StatusCode,
    content_type: Option<HeaderValue>,
    body: String,
}

impl IntoResponse for StaticResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        if let Some(content_type) = self.content_type {
            response.headers_mut().insert(header::CONTENT_TYPE, content_type);
        }
        response
    }
}

/// Read and classify the module at `path`.
pub fn load_file(path: &Path) -> Result<ModuleExport, LoadError> {
    let content = fs::read_to_string(path)?;
    parse_module(&content)
}

/// Classify TOML module source.
pub fn parse_module(content: &str) -> Result<ModuleExport, LoadError> {
    let table: toml::Table = toml::from_str(content)?;

    match table.get("kind").and_then(toml::Value::as_str) {
        Some(ROUTER_KIND) => {}
        Some(other) => return Ok(ModuleExport::other(format!("TOML module of kind '{}'", other))),
        None => return Ok(ModuleExport::other("TOML document without a kind")),
    }

    let module: DeclaredModule = toml::Value::Table(table).try_into()?;
    build_router(module.routes).map(ModuleExport::Router)
}

fn build_router(routes: Vec<DeclaredRoute>) -> Result<Router, LoadError> {
    let mut methods_by_path: HashMap<String, HashSet<String>> = HashMap::new();
    let mut method_routers: Vec<(String, MethodRouter)> = Vec::new();

    for route in routes {
        check_route_path(&route.path).map_err(LoadError::Malformed)?;

        let response = StaticResponse {
            status: StatusCode::from_u16(route.status).map_err(|_| {
                LoadError::Malformed(format!("status {} is not a valid HTTP status", route.status))
            })?,
            content_type: route
                .content_type
                .as_deref()
                .map(HeaderValue::from_str)
                .transpose()
                .map_err(|_| LoadError::Malformed("content_type is not a valid header value".into()))?,
            body: route.body,
        };

        let seen = methods_by_path.entry(route.path.clone()).or_default();
        let method_router = method_router(&route.path, &route.methods, seen, response)?;

        match method_routers.iter().position(|(path, _)| *path == route.path) {
            Some(index) => {
                let (path, existing) = method_routers.remove(index);
                method_routers.insert(index, (path, existing.merge(method_router)));
            }
            None => method_routers.push((route.path, method_router)),
        }
    }

    Ok(method_routers
        .into_iter()
        .fold(Router::new(), |router, (path, method_router)| {
            router.route(&path, method_router)
        }))
}

fn method_router(
    path: &str,
    methods: &[String],
    seen: &mut HashSet<String>,
    response: StaticResponse,
) -> Result<MethodRouter, LoadError> {
    if methods.is_empty() {
        return Err(LoadError::Malformed(format!("route '{}' lists no methods", path)));
    }

    let handler = move || {
        let response = response.clone();
        async move { response }
    };

    let mut filter: Option<MethodFilter> = None;
    for name in methods {
        let name = name.to_ascii_uppercase();

        let overlaps = if name == ANY_METHOD {
            !seen.is_empty()
        } else {
            seen.contains(ANY_METHOD) || seen.contains(&name)
        };
        if overlaps {
            return Err(LoadError::Malformed(format!(
                "route '{}' declares {} more than once",
                path, name
            )));
        }
        seen.insert(name.clone());

        if name == ANY_METHOD {
            if methods.len() > 1 {
                return Err(LoadError::Malformed(format!(
                    "route '{}' combines ANY with other methods",
                    path
                )));
            }
            return Ok(any(handler));
        }

        let method = Method::from_bytes(name.as_bytes())
            .ok()
            .and_then(|m| MethodFilter::try_from(m).ok())
            .ok_or_else(|| {
                LoadError::Malformed(format!("route '{}' uses unsupported method '{}'", path, name))
            })?;
        filter = Some(match filter {
            Some(existing) => existing.or(method),
            None => method,
        });
    }

    // `methods` is non-empty, so at least one filter was parsed.
    let filter = filter.unwrap_or(MethodFilter::GET);
    Ok(on(filter, handler))
}
