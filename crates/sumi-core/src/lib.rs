//! sumi-core - token/AST data model and HTML serialization
//!
//! This crate provides the data structures shared by the sumi pipeline and
//! the HTML serialization stage. The conversion stages themselves (line
//! tokenization, AST generation, inline compilation) live in the `sumi`
//! crate.
//!
//! # Architecture
//!
//! ```text
//! Markdown text ──tokenize──▶ Token stream ──generate──▶ ┌──────────┐
//!                             (+ footnotes)              │ AST      │ ──serialize──▶ HTML
//!                                                        └──────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use sumi_core::{serialize, AstNode, Footnotes};
//!
//! let nodes = vec![
//!     AstNode::Heading {
//!         level: 1,
//!         content: "Hello World".to_string(),
//!     },
//!     AstNode::Paragraph {
//!         content: "This is <strong>bold</strong> text.".to_string(),
//!     },
//! ];
//!
//! let html = serialize(&nodes, &Footnotes::new());
//! assert!(html.starts_with("<h1>Hello World</h1>"));
//! ```

mod ast;
mod options;
mod serialize;
mod token;

pub use ast::{AstNode, ListItem};
pub use options::DocumentOptions;
pub use serialize::{serialize, serialize_document};
pub use token::{Alignment, Footnotes, Token, TokenKind};
