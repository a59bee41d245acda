//! Unified application error type.
//! Store, broadcast, view and CLI layers all return AppError so the
//! error handling stays consistent from the database up to main().

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("The item with the id {0} not found.")]
    NotFound(String),

    // ---------------------------
    // Editing
    // ---------------------------
    #[error("Validation error: {0}")]
    Validation(String),

    // ---------------------------
    // Broadcast
    // ---------------------------
    #[error("Unknown store event type: {0}")]
    UnknownEventType(String),

    #[error("Malformed store event: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Broadcast channel error: {0}")]
    Channel(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
