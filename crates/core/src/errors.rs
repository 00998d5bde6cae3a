//! Core error types for the Fundfolio valuation engine.
//!
//! This module defines storage-agnostic error types. Errors raised by the
//! repositories that feed the engine are converted to these types by the
//! storage layer.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the valuation engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Valuation calculation failed: {0}")]
    Calculation(#[from] CalculatorError),

    #[error("History replay was cancelled")]
    Cancelled,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Storage-agnostic error type for repository reads.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Errors that occur while replaying transactions into metrics.
#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("Unknown transaction type '{transaction_type}' on transaction {transaction_id}")]
    UnsupportedTransactionType {
        transaction_id: String,
        transaction_type: String,
    },

    #[error("Dividend {dividend_id} references reinvestment transaction {transaction_id}, which is not in the history of fund holding {fund_holding_id}")]
    UnresolvedReinvestment {
        dividend_id: String,
        transaction_id: String,
        fund_holding_id: String,
    },

    #[error("Fund holding {0} not found in the loaded data")]
    FundHoldingNotFound(String),
}

/// Validation errors for settings and parsed input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}
