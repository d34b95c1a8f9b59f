//! Boundary to the front end: the serialized document format.
//!
//! Parsing arithmetics source is the front end's job; this module only
//! reconstructs a [`Document`](crate::ast::Document) from its JSON form and
//! completes region positions the producer left out.

pub mod json;
pub mod source_index;

pub use json::{parse_document, parse_document_with_limit};
pub use source_index::SourceIndex;
