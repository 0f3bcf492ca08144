//! Error handling for the fusion engine
//!
//! This module provides idiomatic Rust error types using thiserror. The
//! mapping stage is deliberately hard to fail: malformed or missing extracted
//! fields are treated as absent, never as errors. The variants below cover
//! the only genuinely fatal conditions plus the boundaries to serde and the
//! storage layer.

use thiserror::Error;

/// Main error type for the fusion-and-qualification engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// The whole run is fatal only when there is nothing to process.
    #[error("no documents available to process")]
    NoDocuments,

    #[error("entity serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
