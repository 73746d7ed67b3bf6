//! Error kinds
//!
//! Typed failures the CLI needs to tell apart. Everything else travels as
//! `anyhow::Error` with context attached at the call site.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    /// No stack matched the requested name exactly
    #[error("'{0}': no such stack")]
    StackNotFound(String),

    /// A backend answered with a non-success status
    #[error("API request to {url} failed: {status}")]
    Api { status: StatusCode, url: String },

    /// The service catalog has no usable endpoint for a service type
    #[error("no {endpoint_type} endpoint for service type '{service_type}' in the service catalog")]
    EndpointNotFound {
        service_type: String,
        endpoint_type: String,
    },

    /// A resource that needs a dedicated lookup was never created
    #[error("resource '{resource_name}' ({resource_type}) has no physical resource id")]
    MissingPhysicalId {
        resource_name: String,
        resource_type: String,
    },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    /// Status code of an API failure, if this is one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Name of the missing stack when `error` is a stack lookup miss
pub fn missing_stack_name(error: &anyhow::Error) -> Option<&str> {
    match error.downcast_ref::<FetchError>() {
        Some(FetchError::StackNotFound(name)) => Some(name),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_not_found_message_names_stack() {
        let err = FetchError::StackNotFound("demo".to_string());
        assert_eq!(err.to_string(), "'demo': no such stack");
    }

    #[test]
    fn test_missing_stack_name_survives_context() {
        let err = anyhow::Error::from(FetchError::StackNotFound("demo".to_string()))
            .context("Failed to locate stack");
        assert_eq!(missing_stack_name(&err), Some("demo"));

        let other = anyhow::anyhow!("connection refused");
        assert_eq!(missing_stack_name(&other), None);
    }

    #[test]
    fn test_status_only_for_api_errors() {
        let err = FetchError::Api {
            status: StatusCode::FORBIDDEN,
            url: "http://heat/stacks".to_string(),
        };
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
        assert_eq!(FetchError::MalformedResponse("x".into()).status(), None);
    }
}
