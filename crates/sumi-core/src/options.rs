//! Configuration options for whole-document serialization

use std::path::PathBuf;

/// Options for wrapping a rendered fragment in a full HTML document
#[derive(Debug, Clone)]
pub struct DocumentOptions {
    /// Document title
    pub title: String,

    /// Stylesheet to reference from the document head
    pub stylesheet: Option<PathBuf>,

    /// Inline the stylesheet contents into a `<style>` block instead of
    /// emitting a `<link>` tag. Falls back to the link tag when the file
    /// cannot be read.
    pub embed_stylesheet: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            title: "Document".to_string(),
            stylesheet: None,
            embed_stylesheet: false,
        }
    }
}
