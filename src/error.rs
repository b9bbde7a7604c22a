//! Error types and handling for the `weatherboard` application

use thiserror::Error;

/// Main error type for the `weatherboard` application
#[derive(Error, Debug)]
pub enum WeatherboardError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WeatherboardError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherboardError::Config { .. } => {
                "Configuration error. Please check weatherboard.toml and your environment."
                    .to_string()
            }
            WeatherboardError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            WeatherboardError::Io { .. } => {
                "Could not open the server socket. Is the port already in use?".to_string()
            }
        }
    }
}

/// Why a single city could not be turned into a weather record.
///
/// These never abort a run; the fetcher records them next to the
/// successful rows.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchFailure {
    #[error("weather service answered with HTTP {status}")]
    Status { status: u16 },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response body: {0}")]
    MalformedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = WeatherboardError::config("invalid port");
        assert!(matches!(config_err, WeatherboardError::Config { .. }));

        let validation_err = WeatherboardError::validation("empty city");
        assert!(matches!(validation_err, WeatherboardError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = WeatherboardError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let validation_err = WeatherboardError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let err: WeatherboardError = io_err.into();
        assert!(matches!(err, WeatherboardError::Io { .. }));
        assert!(err.user_message().contains("port already in use"));
    }

    #[test]
    fn test_fetch_failure_display() {
        let failure = FetchFailure::Status { status: 404 };
        assert_eq!(failure.to_string(), "weather service answered with HTTP 404");
        assert_eq!(
            FetchFailure::Transport("timeout".into()).to_string(),
            "request failed: timeout"
        );
    }
}
