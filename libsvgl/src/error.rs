//! Error types for the SVGL gallery

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SvglError>;

/// Result type for catalog operations
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Message shown to the user when the catalog answers 429
pub const RATE_LIMIT_MESSAGE: &str =
    "Too many requests. Please wait a moment before searching again.";

#[derive(Error, Debug)]
pub enum SvglError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Preferences error: {0}")]
    Preferences(#[from] PreferencesError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl SvglError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SvglError::InvalidInput(_) => 3,
            SvglError::Catalog(CatalogError::MissingFilename(_)) => 3,
            SvglError::Catalog(CatalogError::RateLimited) => 2,
            SvglError::Catalog(_) => 1,
            SvglError::Config(_) => 1,
            SvglError::Preferences(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Error, Debug)]
pub enum PreferencesError {
    #[error("Failed to read preferences: {0}")]
    Read(std::io::Error),

    #[error("Failed to write preferences: {0}")]
    Write(std::io::Error),

    #[error("Failed to parse preferences: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Failures surfaced by the remote catalog
///
/// A 404 on a listing endpoint is not represented here: it is normalized to
/// an empty result before it reaches the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Too many requests. Please wait a moment before searching again.")]
    RateLimited,

    #[error("API request failed with status {0}")]
    UpstreamStatus(u16),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Invalid response from catalog: {0}")]
    Decode(String),

    #[error("Could not determine filename from route: {0}")]
    MissingFilename(String),

    #[error("Failed to fetch SVG content from {url} (status {status})")]
    MarkupUnavailable { url: String, status: u16 },
}

impl CatalogError {
    /// Whether waiting and re-triggering the request may succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(self, CatalogError::MissingFilename(_) | CatalogError::Decode(_))
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else {
            CatalogError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_message_is_exact() {
        assert_eq!(CatalogError::RateLimited.to_string(), RATE_LIMIT_MESSAGE);
    }

    #[test]
    fn test_upstream_status_embeds_code() {
        let error = CatalogError::UpstreamStatus(503);
        assert_eq!(error.to_string(), "API request failed with status 503");
    }

    #[test]
    fn test_missing_filename_message() {
        let error = CatalogError::MissingFilename("https://example.com/".to_string());
        assert_eq!(
            error.to_string(),
            "Could not determine filename from route: https://example.com/"
        );
    }

    #[test]
    fn test_exit_code_invalid_input() {
        let error = SvglError::InvalidInput("Unknown format".to_string());
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_rate_limited() {
        let error = SvglError::Catalog(CatalogError::RateLimited);
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_missing_filename() {
        let error = SvglError::Catalog(CatalogError::MissingFilename(String::new()));
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_generic_failures() {
        let upstream = SvglError::Catalog(CatalogError::UpstreamStatus(500));
        let transport = SvglError::Catalog(CatalogError::Transport("refused".to_string()));
        let config = SvglError::Config(ConfigError::MissingField("api.base_url".to_string()));

        assert_eq!(upstream.exit_code(), 1);
        assert_eq!(transport.exit_code(), 1);
        assert_eq!(config.exit_code(), 1);
    }

    #[test]
    fn test_error_message_formatting_catalog() {
        let error = SvglError::Catalog(CatalogError::UpstreamStatus(500));
        assert_eq!(
            error.to_string(),
            "Catalog error: API request failed with status 500"
        );
    }

    #[test]
    fn test_error_conversion_from_config_error() {
        let config_error = ConfigError::MissingField("test".to_string());
        let error: SvglError = config_error.into();

        match error {
            SvglError::Config(_) => {}
            _ => panic!("Expected SvglError::Config"),
        }
    }

    #[test]
    fn test_retryable_classification() {
        assert!(CatalogError::RateLimited.is_retryable());
        assert!(CatalogError::UpstreamStatus(502).is_retryable());
        assert!(CatalogError::Transport("timeout".to_string()).is_retryable());
        assert!(!CatalogError::MissingFilename("x/".to_string()).is_retryable());
        assert!(!CatalogError::Decode("expected array".to_string()).is_retryable());
    }

    #[test]
    fn test_catalog_error_clone() {
        let original = CatalogError::Transport("Connection reset".to_string());
        let cloned = original.clone();

        assert_eq!(original, cloned);
    }
}
