//! Core error types for Tasklet domain logic
//!
//! Every variant is recoverable: a failed operation leaves the store untouched.

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Task #{0} not found")]
    TaskNotFound(u32),

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Similar task already exists: {0}")]
    Duplicate(String),

    #[error("Corrupt saved state: {message}")]
    CorruptState {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl CoreError {
    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a corrupt-state error with a message
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::CorruptState {
            message: message.into(),
            source: None,
        }
    }

    /// Create a corrupt-state error with source
    pub fn corrupt_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::CorruptState {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a storage error with a message
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Create a storage error with source
    pub fn storage_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Storage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
