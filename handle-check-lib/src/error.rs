//! Error handling for username probing operations.
//!
//! This module defines a comprehensive error type that covers the different
//! ways a check can fail, from network issues to invalid input.
//!
//! Note that per-platform probe failures do NOT surface as errors from the
//! checker API: they are caught at the task boundary and converted into an
//! `Unknown` verdict. The variants here cover caller-input validation,
//! configuration problems, and batch-level orchestration failures, plus
//! the transport-level causes that probe tasks fold into their detail
//! strings.

use std::fmt;

/// Main error type for username probing operations.
#[derive(Debug, Clone)]
pub enum HandleCheckError {
    /// Invalid username (empty, out of length bounds, bad characters)
    InvalidUsername { username: String, reason: String },

    /// Network-related errors (connection refused, DNS, etc.)
    NetworkError {
        message: String,
        source: Option<String>,
    },

    /// Timeout errors when a probe takes too long
    Timeout {
        operation: String,
        duration: std::time::Duration,
    },

    /// Other transport-level errors for a specific platform probe
    TransportError { platform: String, message: String },

    /// A platform id was requested that is not in the registry
    UnknownPlatform { id: String },

    /// Configuration errors (invalid settings, unreadable config files)
    ConfigError { message: String },

    /// File I/O errors when persisting results
    FileError { path: String, message: String },

    /// Generic internal errors that don't fit other categories
    Internal { message: String },
}

impl HandleCheckError {
    /// Create a new invalid username error.
    pub fn invalid_username<U: Into<String>, R: Into<String>>(username: U, reason: R) -> Self {
        Self::InvalidUsername {
            username: username.into(),
            reason: reason.into(),
        }
    }

    /// Create a new network error.
    pub fn network<M: Into<String>>(message: M) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: std::time::Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new transport error for a specific platform.
    pub fn transport<P: Into<String>, M: Into<String>>(platform: P, message: M) -> Self {
        Self::TransportError {
            platform: platform.into(),
            message: message.into(),
        }
    }

    /// Create a new unknown platform error.
    pub fn unknown_platform<I: Into<String>>(id: I) -> Self {
        Self::UnknownPlatform { id: id.into() }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error was caused by a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Check if this error was caused by a connection-level failure.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::NetworkError { .. })
    }
}

impl fmt::Display for HandleCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUsername { username, reason } => {
                write!(f, "Invalid username '{}': {}", username, reason)
            }
            Self::NetworkError { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::TransportError { platform, message } => {
                write!(f, "Transport error for '{}': {}", platform, message)
            }
            Self::UnknownPlatform { id } => {
                write!(f, "Unknown platform id '{}'", id)
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for HandleCheckError {}

// Implement From conversions for common error types
impl From<reqwest::Error> for HandleCheckError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout("HTTP request", std::time::Duration::from_secs(10))
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}

impl From<std::io::Error> for HandleCheckError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

impl From<toml::de::Error> for HandleCheckError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError {
            message: format!("TOML parsing failed: {}", err),
        }
    }
}
