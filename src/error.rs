//! Error types for autokit.
//!
//! Kit operations never fail on policy grounds: rejections are reported as
//! [`crate::notify::Notice`]s. This type covers the ambient surface
//! (configuration loading and message template validation).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KitError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("missing configuration: {0}")]
    MissingConfig(String),

    #[error("invalid message template for {key}: {reason}")]
    InvalidTemplate { key: &'static str, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, KitError>;
