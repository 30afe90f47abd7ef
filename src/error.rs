//! Error types for pack_odds

use std::fmt;

/// Unified error type for pack_odds operations
#[derive(Debug)]
pub enum PackOddsError {
    /// HTTP request failed (network error, timeout, etc.)
    Network(reqwest::Error),
    /// Failed to parse JSON
    Parse(serde_json::Error),
    /// HTTP error status code
    HttpStatus(reqwest::StatusCode),
    /// File I/O error
    Io(std::io::Error),
    /// Card database returned an error response
    ApiResponse { code: String, details: String },
    /// A booster references a sheet name missing from its product's sheet table
    UnknownSheet { product: String, sheet: String },
    /// A non-fixed sheet declares a total weight of zero
    EmptySheetWeight { product: String, sheet: String },
    /// A product's booster weights sum to zero
    NoBoosterWeight { product: String },
    /// A feed record exceeds the iteration bounds for well-formed data
    LimitExceeded { product: String, detail: String },
}

impl fmt::Display for PackOddsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackOddsError::Network(e) => write!(f, "Network error: {}", e),
            PackOddsError::Parse(e) => write!(f, "Parse error: {}", e),
            PackOddsError::HttpStatus(status) => write!(f, "HTTP error: {}", status),
            PackOddsError::Io(e) => write!(f, "I/O error: {}", e),
            PackOddsError::ApiResponse { code, details } => write!(f, "{}: {}", code, details),
            PackOddsError::UnknownSheet { product, sheet } => {
                write!(f, "Product '{}' rolls unknown sheet '{}'", product, sheet)
            }
            PackOddsError::EmptySheetWeight { product, sheet } => {
                write!(
                    f,
                    "Product '{}' sheet '{}' has zero total weight",
                    product, sheet
                )
            }
            PackOddsError::NoBoosterWeight { product } => {
                write!(f, "Product '{}' has zero total booster weight", product)
            }
            PackOddsError::LimitExceeded { product, detail } => {
                write!(f, "Product '{}' exceeds feed limits: {}", product, detail)
            }
        }
    }
}

impl std::error::Error for PackOddsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PackOddsError::Network(e) => Some(e),
            PackOddsError::Parse(e) => Some(e),
            PackOddsError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PackOddsError {
    fn from(err: reqwest::Error) -> Self {
        PackOddsError::Network(err)
    }
}

impl From<serde_json::Error> for PackOddsError {
    fn from(err: serde_json::Error) -> Self {
        PackOddsError::Parse(err)
    }
}

impl From<std::io::Error> for PackOddsError {
    fn from(err: std::io::Error) -> Self {
        PackOddsError::Io(err)
    }
}

/// Result alias for pack_odds operations
pub type Result<T> = std::result::Result<T, PackOddsError>;
