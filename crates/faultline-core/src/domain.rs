use std::error::Error as StdError;

use http::StatusCode;
use thiserror::Error;

use crate::HttpError;

/// Boxed cause attached to a [`DomainError`]
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Failure that should be answered with a specific HTTP status and message
///
/// Raised where the failure is detected and propagated unchanged through
/// `Result` until a boundary inspects it. The status code is not validated
/// by [`DomainError::new`]; use [`DomainError::checked`] to reject codes
/// outside the HTTP range.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DomainError {
    status_code: u16,
    message: String,
    source: Option<BoxError>,
}

/// Status code rejected by [`DomainError::checked`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("status code {0} is outside the HTTP range 100-599")]
pub struct InvalidStatusCode(pub u16);

impl DomainError {
    /// Discriminator reported by [`DomainError::name`]
    pub const NAME: &'static str = "DomainError";

    /// Create an error from any status code and message
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            source: None,
        }
    }

    /// Create an error, rejecting status codes outside `100..=599`
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStatusCode`] when `status_code` is not an HTTP status
    pub fn checked(status_code: u16, message: impl Into<String>) -> Result<Self, InvalidStatusCode> {
        if (100..=599).contains(&status_code) {
            Ok(Self::new(status_code, message))
        } else {
            Err(InvalidStatusCode(status_code))
        }
    }

    /// Attach the underlying cause, exposed through `Error::source`
    #[must_use]
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// `400 Bad Request`
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }

    /// `401 Unauthorized`
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(401, message)
    }

    /// `403 Forbidden`
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(403, message)
    }

    /// `404 Not Found`
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, message)
    }

    /// `409 Conflict`
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(409, message)
    }

    /// `500 Internal Server Error`
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(500, message)
    }

    /// Status code exactly as it was given at construction
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Status code as an [`http::StatusCode`], if it is in `100..=599`
    pub fn http_status(&self) -> Option<StatusCode> {
        if (100..=599).contains(&self.status_code) {
            StatusCode::from_u16(self.status_code).ok()
        } else {
            None
        }
    }

    /// Status that can be sent as a final response
    ///
    /// Informational `1xx` codes are excluded: they never end an exchange,
    /// so they cannot carry an error body.
    pub fn response_status(&self) -> Option<StatusCode> {
        self.http_status().filter(|status| !status.is_informational())
    }

    /// Find a `DomainError` in `error` or anywhere in its source chain
    ///
    /// This is the capability check a boundary handler uses to tell a
    /// structured failure apart from an unclassified one.
    pub fn find<'a>(error: &'a (dyn StdError + 'static)) -> Option<&'a Self> {
        std::iter::successors(Some(error), |&e| e.source()).find_map(|e| e.downcast_ref::<Self>())
    }

    /// Whether `error` is, or wraps, a `DomainError`
    pub fn is_domain_error(error: &(dyn StdError + 'static)) -> bool {
        Self::find(error).is_some()
    }
}

impl HttpError for DomainError {
    fn status(&self) -> StatusCode {
        self.response_status().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_type(&self) -> &str {
        match self.status_code {
            400 | 422 => "invalid_request_error",
            401 => "authentication_error",
            403 => "permission_error",
            404 => "not_found_error",
            409 => "conflict_error",
            429 => "rate_limit_error",
            402..=499 => "client_error",
            _ => "api_error",
        }
    }

    fn client_message(&self) -> String {
        self.message.clone()
    }
}
