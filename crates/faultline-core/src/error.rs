use http::StatusCode;

/// Trait for errors that can be rendered as HTTP responses
///
/// The server layer converts implementors into actual responses, keeping
/// error values decoupled from axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `not_found_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}
