//! Error types and handling for the `daytrip` planner

use thiserror::Error;

/// Main error type for the `daytrip` planner
#[derive(Error, Debug)]
pub enum PlannerError {
    /// City resolution produced no match
    #[error("City not found: {message}")]
    CityNotFound { message: String },

    /// A collaborator was unreachable or answered with a non-success status
    #[error("Provider error: {message}")]
    Provider { message: String },

    /// The requested end time is not strictly after the start time
    #[error("Invalid time window: {message}")]
    InvalidWindow { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl PlannerError {
    /// Create a new city-not-found error
    pub fn city_not_found<S: Into<String>>(message: S) -> Self {
        Self::CityNotFound {
            message: message.into(),
        }
    }

    /// Create a new provider error
    pub fn provider<S: Into<String>>(message: S) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Create a new invalid-window error
    pub fn invalid_window<S: Into<String>>(message: S) -> Self {
        Self::InvalidWindow {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PlannerError::CityNotFound { message } => {
                format!("City not found: {message}")
            }
            PlannerError::Provider { .. } => {
                "Unable to reach the weather service. Please check your internet connection."
                    .to_string()
            }
            PlannerError::InvalidWindow { message } => {
                format!("Invalid time window: {message}")
            }
            PlannerError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            PlannerError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            PlannerError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
