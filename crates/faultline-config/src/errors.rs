use serde::Deserialize;

/// Rendering policy for failures that reach the HTTP boundary
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorsConfig {
    /// Status used for unclassified failures and out-of-range status codes
    #[serde(default = "default_status")]
    pub default_status: u16,
    /// Message used for unclassified failures
    #[serde(default = "default_message")]
    pub default_message: String,
    /// Message for requests that match no route
    #[serde(default = "default_not_found_message")]
    pub not_found_message: String,
    /// Show the underlying error text of unclassified failures to clients
    #[serde(default)]
    pub expose_internal: bool,
}

impl Default for ErrorsConfig {
    fn default() -> Self {
        Self {
            default_status: default_status(),
            default_message: default_message(),
            not_found_message: default_not_found_message(),
            expose_internal: false,
        }
    }
}

const fn default_status() -> u16 {
    500
}

fn default_message() -> String {
    "Something went wrong".to_string()
}

fn default_not_found_message() -> String {
    "Page Not Found".to_string()
}
