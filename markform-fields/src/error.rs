//! Error types for the fallible edges of field construction

use std::path::PathBuf;
use thiserror::Error;

/// Result type for fields operations
pub type Result<T> = std::result::Result<T, FormsError>;

/// Errors that can occur while loading settings or decoding author input.
///
/// None of these ever reach the aggregation layer: widgets degrade to safe
/// defaults and report configuration diagnostics instead.
#[derive(Debug, Error)]
pub enum FormsError {
    /// Settings could not be extracted from the configured sources
    #[error("failed to load settings: {0}")]
    Settings(#[from] Box<figment::Error>),

    /// Settings file has an extension we don't know how to read
    #[error("unsupported settings file format: {path}")]
    UnsupportedSettingsFormat { path: PathBuf },

    /// A setting was parsed but holds an unusable value
    #[error("invalid setting '{key}': {message}")]
    InvalidSetting { key: String, message: String },

    /// Percent-decoding produced bytes that are not UTF-8
    #[error("option list is not valid UTF-8 after decoding: {0}")]
    OptionsEncoding(#[from] std::string::FromUtf8Error),

    /// Option list looked like JSON but didn't parse
    #[error("option list is not a valid JSON array: {0}")]
    OptionsJson(#[from] serde_json::Error),

    /// JSON option entry of a shape we can't turn into an option
    #[error("unsupported option entry: {entry}")]
    UnsupportedOption { entry: String },
}

impl From<figment::Error> for FormsError {
    fn from(error: figment::Error) -> Self {
        FormsError::Settings(Box::new(error))
    }
}
