// ABOUTME: Unified error handling for the training engine with structured error codes
// ABOUTME: Defines AppError, ErrorCode, and the AppResult alias used across all modules
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Unified Error Handling
//!
//! Centralized error types for the engine. Validation failures and invariant
//! violations are surfaced synchronously to the caller; persistence failures
//! are non-fatal and handled at the call site (logged, in-memory state stays
//! authoritative).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Malformed or out-of-policy input
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Numeric value outside the acceptable range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,
    /// A domain invariant would be broken by the requested mutation
    #[serde(rename = "INVARIANT_VIOLATION")]
    InvariantViolation = 3100,

    // Configuration (6000-6999)
    /// Engine configuration is invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Key-value storage backend failure
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
    /// State blob (de)serialization failure
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error code
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::InvariantViolation => "The requested change would break a training invariant",
            Self::ConfigInvalid => "The engine configuration is invalid",
            Self::InternalError => "An unexpected internal error occurred",
            Self::StorageError => "The storage backend reported an error",
            Self::SerializationError => "Training state could not be serialized or deserialized",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::ValueOutOfRange => "VALUE_OUT_OF_RANGE",
            Self::InvariantViolation => "INVARIANT_VIOLATION",
            Self::ConfigInvalid => "CONFIG_INVALID",
            Self::InternalError => "INTERNAL_ERROR",
            Self::StorageError => "STORAGE_ERROR",
            Self::SerializationError => "SERIALIZATION_ERROR",
        };
        write!(f, "{name}")
    }
}

/// Application error with a structured code and human-readable message
#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct AppError {
    /// Structured error code
    pub code: ErrorCode,
    /// Human-readable message suitable for inline display
    pub message: String,
}

impl AppError {
    /// Create a new error with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create an invalid-input error
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Create a value-out-of-range error
    #[must_use]
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Create an invariant-violation error
    #[must_use]
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvariantViolation, message)
    }

    /// Create an invalid-configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Create an internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Create a storage error
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Create a serialization error
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(err.to_string())
    }
}

/// Result alias used by every fallible engine operation
pub type AppResult<T> = Result<T, AppError>;
