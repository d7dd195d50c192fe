//! # Figlint Parser
//!
//! Reads SVG figure markup and extracts the shapes the layout checks care
//! about: boxes (`<rect>`, `<polygon>`, `<polyline>`), lines (`<line>` and
//! flattened `<path>` segments) and text runs. Identifier problems are
//! recorded as notices on the returned figure; malformed input fails with
//! located diagnostics.
//!
//! ## Usage
//!
//! ```
//! # use figlint_parser::{parse, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100">
//!         <rect id="node" x="10" y="10" width="80" height="40"/>
//!         <line id="edge" x1="90" y1="30" x2="150" y2="30"/>
//!     </svg>"#;
//!
//!     let figure = parse(source)?;
//!     assert_eq!(figure.elements().len(), 2);
//!     Ok(())
//! }
//! ```

pub mod error;
mod path;
mod span;
mod style;
mod svg;

pub use span::Span;

use figlint_core::figure::Figure;

use error::ParseError;

/// Parse SVG markup into an unmeasured [`Figure`].
///
/// Elements inside `<defs>` are templates and yield no shapes; `<marker>`
/// definitions found there are kept for arrowhead checks. Elements without
/// an `id`, or repeating one, get a synthesized `elem_<n>` name and a
/// [`Notice`](figlint_core::document::Notice).
///
/// # Errors
///
/// Returns a [`ParseError`] when the markup is not well-formed XML or when
/// numeric attributes, path data or point lists cannot be read. Every
/// problem found in the file is reported, not just the first.
pub fn parse(source: &str) -> Result<Figure, ParseError> {
    svg::build(source)
}
