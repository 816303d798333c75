//! Abstract syntax tree
//!
//! This module defines the AST nodes produced by the generator and consumed
//! by the HTML serializer. Leaf nodes hold their inline markup pre-rendered
//! as an HTML fragment, so inline transformation runs once during generation
//! and never again at render time. Container nodes exclusively own their
//! children; the structure is a tree, never a graph.

use serde::Serialize;

use crate::token::Alignment;

/// A block-level node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AstNode {
    /// Heading with level (1-6) and rendered inline content
    Heading { level: u8, content: String },

    /// Paragraph with rendered inline content
    Paragraph { content: String },

    /// Ordered or unordered list
    List { ordered: bool, items: Vec<ListItem> },

    /// Table; cell text is rendered inline content
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        alignments: Vec<Alignment>,
    },

    /// Block quote with rendered inline content
    Blockquote { content: String },

    /// Code block; content is emitted entity-escaped, never parsed
    Code { content: String },

    /// Thematic break
    #[serde(rename = "hr")]
    HorizontalRule,

    /// Definition list: one term followed by its definitions, in source order
    #[serde(rename = "dl")]
    DefinitionList {
        term: String,
        definitions: Vec<String>,
    },

    /// Call-out container wrapping recursively parsed block content
    Admonition {
        kind: String,
        subtype: String,
        children: Vec<AstNode>,
    },

    /// Collapsible container wrapping recursively parsed block content
    Details {
        summary: String,
        children: Vec<AstNode>,
    },

    /// Figure image with its alt text doubling as the caption
    #[serde(rename = "image_captioned")]
    CaptionedImage { alt: String, url: String },
}

/// A single list entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    /// Rendered inline content
    pub content: String,

    /// Checkbox state when the item carried a `[ ]`/`[x]` marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,

    /// Nested sublist owned by this item, always an `AstNode::List`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested: Option<Box<AstNode>>,
}

impl ListItem {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            checked: None,
            nested: None,
        }
    }
}
