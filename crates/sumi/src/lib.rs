//! # sumi
//!
//! Convert extended Markdown to HTML.
//!
//! The input format is a restricted markdown dialect with a few extensions:
//! checkbox list items, pipe tables with alignment, footnotes, ruby/furigana
//! annotations, definition lists, collapsible details blocks and admonition
//! call-outs.
//!
//! ## Design
//!
//! Conversion is a strict three-stage pipeline; each stage is a pure
//! function of its inputs and every input produces *some* output, never a
//! parse failure:
//!
//! ```text
//! &str ──tokenize──▶ (Vec<Token>, Footnotes) ──generate──▶ Vec<AstNode> ──serialize──▶ String
//! ```
//!
//! The tokenizer classifies lines, the generator groups tokens into a tree
//! and compiles inline markup once, and the serializer is a stateless
//! mapping from node to markup. The stages are exposed individually for
//! inspection tooling; [`render`] and [`render_document`] run the whole
//! pipeline.
//!
//! ## Example
//!
//! ```rust
//! use sumi::render;
//!
//! assert_eq!(render("# Hello"), "<h1>Hello</h1>");
//! assert_eq!(
//!     render("**bold** and {漢字}(かんじ)"),
//!     "<p><strong>bold</strong> and <ruby>漢字<rt>かんじ</rt></ruby></p>"
//! );
//! ```

mod generate;
mod inline;
mod tokenize;

pub use generate::generate;
pub use tokenize::tokenize;

pub use sumi_core::{
    serialize, serialize_document, Alignment, AstNode, DocumentOptions, Footnotes, ListItem,
    Token, TokenKind,
};

/// Convert markdown to an HTML fragment through the full pipeline.
pub fn render(markdown: &str) -> String {
    let (tokens, footnotes) = tokenize(markdown);
    let nodes = generate(&tokens, &footnotes);
    serialize(&nodes, &footnotes)
}

/// Convert markdown to a complete HTML document.
pub fn render_document(markdown: &str, options: &DocumentOptions) -> String {
    let (tokens, footnotes) = tokenize(markdown);
    let nodes = generate(&tokens, &footnotes);
    serialize_document(&nodes, &footnotes, options)
}
