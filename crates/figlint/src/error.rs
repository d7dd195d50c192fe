//! Error types for figlint operations.
//!
//! This module provides the main error type [`FiglintError`] which wraps
//! the error conditions that can occur while checking a figure or asking
//! for feedback on it.

use std::io;

use thiserror::Error;

use figlint_core::text::MetricsError;
use figlint_parser::error::ParseError;

use crate::{feedback::ApiError, render::RenderError};

/// The main error type for figlint operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the diagnostics so
/// callers can render labeled snippets.
#[derive(Debug, Error)]
pub enum FiglintError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Text metrics error: {0}")]
    Metrics(#[from] MetricsError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Feedback error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FiglintError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
