//! Error types for usb-identity-core.

use thiserror::Error;

/// Core library error type.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The configuration service could not be reached.
    #[error("transport error: {0}")]
    Transport(String),

    /// The configuration service answered with a non-zero status code.
    #[error("service error: code {code}: {msg}")]
    Service { code: i32, msg: String },

    /// Configuration file could not be read, parsed or validated.
    #[error("config error: {0}")]
    Config(String),

    /// Unknown identity field name.
    #[error("unknown identity field: {0}")]
    UnknownField(String),
}

impl Error {
    /// Message the service supplied with a non-zero status code, if any.
    ///
    /// Transport failures carry no service message.
    pub fn service_message(&self) -> Option<&str> {
        match self {
            Self::Service { msg, .. } if !msg.is_empty() => Some(msg),
            _ => None,
        }
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
