//! Figlint Core Types and Definitions
//!
//! This crate provides the foundational types shared by the figlint parser,
//! checker and command-line tools. It includes:
//!
//! - **Identifiers**: String-interned shape identifiers ([`identifier::Id`])
//! - **Geometry**: Points, bounds and segment clipping ([`geometry`] module)
//! - **Colors**: CSS color parsing for stroke and fill paint ([`color::Color`])
//! - **Text**: The text-metrics seam and its implementations ([`text`] module)
//! - **Figure**: The parsed, not yet measured figure ([`figure::Figure`])
//! - **Document**: The measured shape collection ([`document::Document`])

pub mod color;
pub mod document;
pub mod figure;
pub mod geometry;
pub mod identifier;
pub mod shape;
pub mod text;
