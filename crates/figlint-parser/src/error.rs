//! Diagnostics reported while parsing SVG figures.
//!
//! Fatal problems in the markup are reported as [`Diagnostic`]s carrying an
//! [`ErrorCode`], labeled source spans and optional help text. A failed parse
//! returns a [`ParseError`] holding every diagnostic found in the file.

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub use collector::DiagnosticCollector;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
