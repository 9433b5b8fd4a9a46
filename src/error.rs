//! Error types for design-critic

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CriticError {
    #[error("Invalid or missing URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to extract {asset} from page: {message}")]
    Extraction { asset: AssetKind, message: String },

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Completion service rate limited (retry after {retry_after_secs:?}s)")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("No retries left after {attempts} rate-limited attempts")]
    RetryExhausted { attempts: u32 },

    #[error("Completion service error: {0}")]
    Analysis(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The asset a browser extraction was fetching when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Css,
    Colors,
    Fonts,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Css => write!(f, "CSS"),
            AssetKind::Colors => write!(f, "colors"),
            AssetKind::Fonts => write!(f, "fonts"),
        }
    }
}

pub type Result<T> = std::result::Result<T, CriticError>;
