//! Error codes for parser diagnostics.
//!
//! All parser codes live in the `E0xx` range.

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Malformed markup.
    ///
    /// The input is not well-formed XML.
    E001,

    /// Invalid numeric attribute.
    ///
    /// A geometric attribute is not a number, optionally followed by `px`.
    E002,

    /// Invalid path data.
    ///
    /// The `d` attribute of a `<path>` does not follow the SVG path grammar.
    E003,

    /// Invalid point list.
    ///
    /// The `points` attribute of a `<polygon>` or `<polyline>` is not a list
    /// of coordinate pairs.
    E004,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "malformed SVG markup",
            ErrorCode::E002 => "invalid numeric attribute",
            ErrorCode::E003 => "invalid path data",
            ErrorCode::E004 => "invalid point list",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
