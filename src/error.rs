use thiserror::Error;

/// Errors that can occur while driving a harvest run
#[derive(Error, Debug)]
pub enum HarvestError {
    /// Failed to fetch a page through the gateway
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Error parsing HTTP headers
    #[error("Header parse error: {0}")]
    HeaderError(#[from] reqwest::header::InvalidHeaderValue),

    /// A configured field locator is not a valid CSS selector
    #[error("Invalid selector for {field}: {selector}")]
    SelectorError {
        field: &'static str,
        selector: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Failed to read the identifier list or write the output file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to serialize the output collection
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Fatal field absences; either one drops the record from the output.
///
/// Every other missing field resolves to a documented default and never
/// surfaces as an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// No heading element matched the configured name selector
    #[error("no heading element matched the name selector")]
    MissingName,

    /// No paragraph matched the configured overview selector
    #[error("no subheading paragraph matched the overview selector")]
    MissingOverview,
}
