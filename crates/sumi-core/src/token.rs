//! Line tokens
//!
//! This module defines the token stream produced by the tokenizer: one token
//! per source line, except for tables, details blocks and admonitions, which
//! collapse their captured lines into a single token.

use indexmap::IndexMap;
use serde::Serialize;

/// Footnote definitions collected during tokenization, keyed by footnote id.
///
/// Insertion order is preserved so the rendered footnote appendix lists
/// entries in the order their definitions first appeared. A later definition
/// with the same id overwrites the text but keeps the original position.
pub type Footnotes = IndexMap<String, String>;

/// Horizontal alignment of a table column, derived from the colon placement
/// in the separator row (`:---:` center, `---:` right, everything else left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    /// CSS `text-align` keyword for this alignment
    pub fn as_css(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// A classified source line (or multi-line capture)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    #[serde(flatten)]
    pub kind: TokenKind,

    /// The originating source line, or the joined lines for a multi-line
    /// capture. Code block assembly re-reads this field verbatim.
    pub raw: String,
}

impl Token {
    pub fn new(kind: TokenKind, raw: impl Into<String>) -> Self {
        Self {
            kind,
            raw: raw.into(),
        }
    }
}

/// The block kind a line was classified as
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TokenKind {
    /// Empty or whitespace-only line
    Blank,

    /// Heading with level (1-6) and unparsed inline text
    Heading { level: u8, content: String },

    /// Opening or closing code fence; `length` is the exact backtick count,
    /// `info` is the trailing info string (never rendered)
    CodeFence { length: usize, info: String },

    /// One list item line; nesting across items is resolved later by the
    /// AST generator
    ListItem {
        ordered: bool,
        level: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        checked: Option<bool>,
        content: String,
    },

    /// Pipe table: header line, separator line and contiguous row lines
    /// collapsed into one token
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        alignments: Vec<Alignment>,
    },

    /// Single blockquote line with the `>` prefix stripped
    Blockquote { content: String },

    /// Thematic break (`---`, `***` or `___`)
    HorizontalRule,

    /// Collapsible block: `=== summary` ... `===`, body captured verbatim
    Details { summary: String, body: String },

    /// Call-out block: `:::kind [subtype]` ... `:::`, body captured verbatim
    Admonition {
        kind: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        subtype: Option<String>,
        body: String,
    },

    /// Captioned figure image: `-![alt](url)`
    #[serde(rename = "image_captioned")]
    CaptionedImage { alt: String, url: String },

    /// Definition line (`: text`); grouped with its term by the AST generator
    Definition { content: String },

    /// Any line no other rule claimed
    Paragraph { content: String },
}

impl TokenKind {
    /// Check if this token is a list item
    pub fn is_list_item(&self) -> bool {
        matches!(self, TokenKind::ListItem { .. })
    }

    /// Check if this token is a blank line
    pub fn is_blank(&self) -> bool {
        matches!(self, TokenKind::Blank)
    }
}
