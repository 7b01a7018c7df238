//! Start-up and serving errors.
//!
//! Request handlers never fail with these: every route answers 200 and
//! reports logical failures in the body. These cover what can stop the
//! process, and are wrapped in a rootcause `Report` on the way to `main`.

use std::fmt;

#[derive(Debug)]
pub enum ServerError {
    /// Configuration could not be loaded or deserialized.
    Config { details: String },
    /// The outbound HTTP client could not be built.
    HttpClient { details: String },
    /// The listener could not bind.
    Bind { addr: String, details: String },
    /// The server stopped with an I/O error.
    Serve { details: String },
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { details } => write!(f, "invalid configuration: {details}"),
            Self::HttpClient { details } => {
                write!(f, "failed to build HTTP client: {details}")
            }
            Self::Bind { addr, details } => {
                write!(f, "failed to bind to '{addr}': {details}")
            }
            Self::Serve { details } => write!(f, "server error: {details}"),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<config::ConfigError> for ServerError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config {
            details: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_error_names_address() {
        let err = ServerError::Bind {
            addr: "127.0.0.1:8000".to_string(),
            details: "address in use".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to bind to '127.0.0.1:8000': address in use"
        );
    }
}
