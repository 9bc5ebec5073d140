//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, depth > 0)
//! - Check the extension list is usable by the tree walker
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::config::schema::{AppConfig, RouterConfig};

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate the whole application config.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = router_errors(&config.router);

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            "must be greater than zero",
        ));
    }

    match config.observability.log_format.as_str() {
        "pretty" | "json" => {}
        other => errors.push(ValidationError::new(
            "observability.log_format",
            format!("unknown format '{}' (expected pretty or json)", other),
        )),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate only the route discovery section.
pub fn validate_router(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let errors = router_errors(config);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn router_errors(config: &RouterConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.directory.as_os_str().is_empty() {
        errors.push(ValidationError::new("router.directory", "must not be empty"));
    }

    if config.extensions.is_empty() {
        errors.push(ValidationError::new(
            "router.extensions",
            "at least one extension is required",
        ));
    }

    let mut seen = HashSet::new();
    for ext in &config.extensions {
        if ext.is_empty() || ext.starts_with('.') {
            errors.push(ValidationError::new(
                "router.extensions",
                format!("'{}' must be a bare extension such as \"rs\"", ext),
            ));
        } else if !seen.insert(ext.as_str()) {
            errors.push(ValidationError::new(
                "router.extensions",
                format!("'{}' is listed twice", ext),
            ));
        }
    }

    if config.max_depth == 0 {
        errors.push(ValidationError::new(
            "router.max_depth",
            "must be greater than zero",
        ));
    }

    errors
}
