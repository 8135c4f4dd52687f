//! Client-facing error taxonomy.

use crate::transport::TransportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    ClientNotInitialized,
    ValidationFailed,
    AuthenticationFailed,
    ResourceNotFound,
    ResourceConflict,
    ServerError,
    UnsupportedOperation,
    NotImplemented,
    /// The request context was cancelled or its deadline passed mid-call.
    Cancelled,
    /// The transport could not complete the exchange.
    Transport,
    Unknown,
}

impl ErrorKind {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ClientNotInitialized => "CLIENT_NOT_INITIALIZED",
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::AuthenticationFailed => "AUTHENTICATION_FAILED",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::ResourceConflict => "RESOURCE_CONFLICT",
            Self::ServerError => "SERVER_ERROR",
            Self::UnsupportedOperation => "UNSUPPORTED_OPERATION",
            Self::NotImplemented => "NOT_IMPLEMENTED",
            Self::Cancelled => "CANCELLED",
            Self::Transport => "TRANSPORT_ERROR",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Status-keyed category for a non-success HTTP response.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::ValidationFailed,
            401 | 403 => Self::AuthenticationFailed,
            404 => Self::ResourceNotFound,
            409 => Self::ResourceConflict,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One entry of a slurmrestd `errors` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub error_number: i32,
    /// Symbolic code, e.g. "ESLURM_INVALID_JOB_ID", or the wire `error` text.
    pub error_code: String,
    pub description: String,
    pub source: String,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{operation}: client not initialized for API {version}")]
    ClientNotInitialized { operation: String, version: String },

    #[error("{operation}: validation failed for {field}: {message}")]
    ValidationFailed {
        operation: String,
        field: String,
        message: String,
    },

    #[error("{operation}: {resource} '{id}' not found (API {version})")]
    NotFound {
        operation: String,
        version: String,
        resource: &'static str,
        id: String,
    },

    #[error("{operation} is not supported in API {version}{}", hint(.alternative))]
    UnsupportedOperation {
        operation: String,
        version: String,
        alternative: Option<String>,
    },

    #[error("{operation} is not implemented for API {version}")]
    NotImplemented { operation: String, version: String },

    #[error("{operation}: {message} (status {status}{})", api_suffix(.version))]
    Api {
        kind: ErrorKind,
        operation: String,
        version: Option<String>,
        status: u16,
        message: String,
        details: Vec<ApiErrorDetail>,
    },

    #[error("{operation}: request cancelled{}", api_suffix(.version))]
    Cancelled {
        operation: String,
        version: Option<String>,
    },

    #[error("{operation}: transport failure{}: {source}", api_suffix(.version))]
    Transport {
        operation: String,
        version: Option<String>,
        #[source]
        source: TransportError,
    },

    #[error("{operation}: failed to decode response (API {version}): {message}")]
    Decode {
        operation: String,
        version: String,
        message: String,
    },
}

fn hint(alternative: &Option<String>) -> String {
    alternative
        .as_deref()
        .map(|a| format!("; {}", a))
        .unwrap_or_default()
}

fn api_suffix(version: &Option<String>) -> String {
    version
        .as_deref()
        .map(|v| format!(", API {}", v))
        .unwrap_or_default()
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ClientNotInitialized { .. } => ErrorKind::ClientNotInitialized,
            Self::ValidationFailed { .. } => ErrorKind::ValidationFailed,
            Self::NotFound { .. } => ErrorKind::ResourceNotFound,
            Self::UnsupportedOperation { .. } => ErrorKind::UnsupportedOperation,
            Self::NotImplemented { .. } => ErrorKind::NotImplemented,
            Self::Api { kind, .. } => *kind,
            Self::Cancelled { .. } => ErrorKind::Cancelled,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Decode { .. } => ErrorKind::Unknown,
        }
    }

    pub fn operation(&self) -> &str {
        match self {
            Self::ClientNotInitialized { operation, .. }
            | Self::ValidationFailed { operation, .. }
            | Self::NotFound { operation, .. }
            | Self::UnsupportedOperation { operation, .. }
            | Self::NotImplemented { operation, .. }
            | Self::Api { operation, .. }
            | Self::Cancelled { operation, .. }
            | Self::Transport { operation, .. }
            | Self::Decode { operation, .. } => operation,
        }
    }

    /// Backend version the error was raised for, when known.
    pub fn version(&self) -> Option<&str> {
        match self {
            Self::ClientNotInitialized { version, .. }
            | Self::NotFound { version, .. }
            | Self::UnsupportedOperation { version, .. }
            | Self::NotImplemented { version, .. }
            | Self::Decode { version, .. } => Some(version),
            Self::Api { version, .. }
            | Self::Cancelled { version, .. }
            | Self::Transport { version, .. } => version.as_deref(),
            Self::ValidationFailed { .. } => None,
        }
    }

    /// HTTP status for errors built from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Structured entries from the response body, first entry first.
    pub fn details(&self) -> &[ApiErrorDetail] {
        match self {
            Self::Api { details, .. } => details,
            _ => &[],
        }
    }

    /// Attach the backend version to errors that were raised without one.
    pub fn with_version(mut self, v: &str) -> Self {
        match &mut self {
            Self::Api { version, .. }
            | Self::Cancelled { version, .. }
            | Self::Transport { version, .. } => {
                if version.is_none() {
                    *version = Some(v.to_string());
                }
            }
            _ => {}
        }
        self
    }

    pub fn validation(
        operation: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ValidationFailed {
            operation: operation.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::ResourceNotFound
    }
}

/// Extract `(code, message, error_number)` from an error.
///
/// Falls back to `("UNKNOWN", <display message>, -1)` when the error carries
/// no structured entry.
pub fn parse_error(err: &Error) -> (String, String, i32) {
    match err.details().first() {
        Some(detail) => {
            let code = if detail.error_code.is_empty() {
                "UNKNOWN".to_string()
            } else {
                detail.error_code.clone()
            };
            let message = if detail.description.is_empty() {
                err.to_string()
            } else {
                detail.description.clone()
            };
            (code, message, detail.error_number)
        }
        None => ("UNKNOWN".to_string(), err.to_string(), -1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_status() {
        assert_eq!(ErrorKind::from_status(401), ErrorKind::AuthenticationFailed);
        assert_eq!(ErrorKind::from_status(403), ErrorKind::AuthenticationFailed);
        assert_eq!(ErrorKind::from_status(404), ErrorKind::ResourceNotFound);
        assert_eq!(ErrorKind::from_status(409), ErrorKind::ResourceConflict);
        assert_eq!(ErrorKind::from_status(422), ErrorKind::ValidationFailed);
        assert_eq!(ErrorKind::from_status(503), ErrorKind::ServerError);
        assert_eq!(ErrorKind::from_status(429), ErrorKind::Unknown);
    }

    #[test]
    fn test_unsupported_message_names_version_and_alternative() {
        let err = Error::UnsupportedOperation {
            operation: "UpdateUser".to_string(),
            version: "v0.0.40".to_string(),
            alternative: Some("use association updates".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "UpdateUser is not supported in API v0.0.40; use association updates"
        );
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        assert_eq!(err.version(), Some("v0.0.40"));
    }

    #[test]
    fn test_with_version_only_fills_missing() {
        let err = Error::Api {
            kind: ErrorKind::ServerError,
            operation: "ListJobs".to_string(),
            version: None,
            status: 500,
            message: "server error".to_string(),
            details: Vec::new(),
        }
        .with_version("v0.0.42");
        assert_eq!(err.version(), Some("v0.0.42"));
        assert_eq!(
            err.to_string(),
            "ListJobs: server error (status 500, API v0.0.42)"
        );

        let err = err.with_version("v0.0.44");
        assert_eq!(err.version(), Some("v0.0.42"));
    }

    #[test]
    fn test_parse_error_sentinels() {
        let err = Error::validation("SubmitJob", "script", "script is required");
        let (code, message, number) = parse_error(&err);
        assert_eq!(code, "UNKNOWN");
        assert_eq!(
            message,
            "SubmitJob: validation failed for script: script is required"
        );
        assert_eq!(number, -1);
    }

    #[test]
    fn test_parse_error_structured() {
        let err = Error::Api {
            kind: ErrorKind::ResourceNotFound,
            operation: "GetJob".to_string(),
            version: None,
            status: 404,
            message: "Invalid job id specified".to_string(),
            details: vec![ApiErrorDetail {
                error_number: 2017,
                error_code: "ESLURM_INVALID_JOB_ID".to_string(),
                description: "Invalid job id specified".to_string(),
                source: "_handle_job_get".to_string(),
            }],
        };
        assert_eq!(
            parse_error(&err),
            (
                "ESLURM_INVALID_JOB_ID".to_string(),
                "Invalid job id specified".to_string(),
                2017
            )
        );
    }
}
