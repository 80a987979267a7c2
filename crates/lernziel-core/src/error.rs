//! Error types for the Lernziel scraper
//!
//! Every failure is fatal to the call that produced it. Nothing is retried
//! and no partial result is returned; the variants only let callers tell the
//! categories apart (new credentials vs. outdated scraper vs. network).
//! LernzielError implements Serialize so it can cross JSON boundaries.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for Lernziel scraper operations
#[derive(Error, Debug)]
pub enum LernzielError {
    /// HTTP request failed or returned a non-success status
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Login response contained the failure marker
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Pagination control was not found on a listing page
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Page content did not have the expected structure
    #[error("Failed to extract table: {0}")]
    ExtractionError(String),

    /// Row data could not be turned into an entity
    #[error("Failed to map row: {0}")]
    MappingError(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl LernzielError {
    /// Network failure or non-success HTTP status.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::HttpError(_) | Self::InvalidUrl(_))
    }

    /// The site rejected the credentials.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }

    /// The page markup no longer matches the expected layout.
    pub fn is_extraction(&self) -> bool {
        matches!(self, Self::ElementNotFound(_) | Self::ExtractionError(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::MappingError(_))
    }
}

/// Serialize LernzielError as its display string
impl Serialize for LernzielError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for Lernziel scraper operations
pub type Result<T> = std::result::Result<T, LernzielError>;
