use std::any::Any;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use faultline_config::ErrorsConfig;
use faultline_core::{DomainError, HttpError};
use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Failure returned from a handler
///
/// Wraps any error so handlers can use `?` freely. A [`DomainError`]
/// anywhere in the chain decides the status and message; anything else is
/// answered with the configured default.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    /// The `DomainError` carried by this failure, if any
    pub fn domain_error(&self) -> Option<&DomainError> {
        DomainError::find(&*self.0)
    }

    /// Recover the wrapped error
    pub fn into_inner(self) -> anyhow::Error {
        self.0
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(error: E) -> Self {
        Self(error.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Rendered with the built-in policy; `error_policy_middleware`
        // re-renders it with the configured one.
        let mut response = ErrorPolicy::default().respond(&self.0);
        response.extensions_mut().insert(Failure(Arc::new(self.0)));
        response
    }
}

/// Original failure attached to an error response
#[derive(Debug, Clone)]
struct Failure(Arc<anyhow::Error>);

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub message: String,
    pub r#type: String,
    pub code: u16,
}

impl ErrorBody {
    fn new(message: String, error_type: &str, status: StatusCode) -> Self {
        Self {
            error: ErrorDetails {
                message,
                r#type: error_type.to_string(),
                code: status.as_u16(),
            },
        }
    }
}

/// How failures are turned into responses at the boundary
#[derive(Debug, Clone)]
pub struct ErrorPolicy {
    default_status: StatusCode,
    default_message: String,
    expose_internal: bool,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        Self::from_config(&ErrorsConfig::default())
    }
}

impl ErrorPolicy {
    pub fn from_config(config: &ErrorsConfig) -> Self {
        Self {
            default_status: StatusCode::from_u16(config.default_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            default_message: config.default_message.clone(),
            expose_internal: config.expose_internal,
        }
    }

    /// Build the response for `error` without logging it
    pub fn respond(&self, error: &anyhow::Error) -> Response {
        let (status, body) = DomainError::find(&**error).map_or_else(
            || self.unclassified(error),
            |domain| {
                let status = self.domain_status(domain);
                (status, domain_body(domain, status))
            },
        );

        (status, Json(body)).into_response()
    }

    /// Log `error` at a level matching how it will be answered
    pub fn report(&self, error: &anyhow::Error) {
        let Some(domain) = DomainError::find(&**error) else {
            tracing::error!(error = %format_args!("{error:#}"), "unhandled failure");
            return;
        };

        let status = self.domain_status(domain);
        if domain.response_status().is_none() {
            tracing::warn!(
                status_code = domain.status_code(),
                fallback = status.as_u16(),
                "domain error carries a status code that cannot end a response"
            );
        }

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %format_args!("{error:#}"), "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), message = domain.message(), "request rejected");
        }
    }

    fn domain_status(&self, domain: &DomainError) -> StatusCode {
        domain.response_status().unwrap_or(self.default_status)
    }

    fn unclassified(&self, error: &anyhow::Error) -> (StatusCode, ErrorBody) {
        let message = if self.expose_internal {
            format!("{error:#}")
        } else {
            self.default_message.clone()
        };

        (self.default_status, ErrorBody::new(message, "internal_error", self.default_status))
    }
}

fn domain_body(domain: &DomainError, status: StatusCode) -> ErrorBody {
    ErrorBody::new(domain.client_message(), domain.error_type(), status)
}

/// Middleware that logs failures and renders them with the configured policy
pub async fn error_policy_middleware(State(policy): State<Arc<ErrorPolicy>>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    let Some(Failure(error)) = response.extensions().get::<Failure>().cloned() else {
        return response;
    };

    policy.report(&error);
    policy.respond(&error)
}

/// Turn a handler panic into an unclassified failure
#[allow(clippy::needless_pass_by_value)]
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    AppError::from(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}
