//! AST generation
//!
//! Consumes the token stream in a single forward pass with an explicit
//! cursor. Most tokens map to one node; code fences, list runs and
//! definition lists consume a variable number of tokens, and container
//! blocks (details, admonitions) re-run their captured body through the
//! whole tokenize+generate pipeline so they can hold arbitrary block
//! content.

use sumi_core::{AstNode, Footnotes, ListItem, Token, TokenKind};

use crate::inline::compile_inline;
use crate::tokenize::tokenize;

/// Subtype applied to admonitions that do not declare one
const DEFAULT_ADMONITION_SUBTYPE: &str = "info";

/// Generate AST nodes from a token stream.
///
/// The footnote table is read-only here; it resolves `[^id]` references
/// during inline compilation.
pub fn generate(tokens: &[Token], footnotes: &Footnotes) -> Vec<AstNode> {
    let mut nodes = Vec::new();
    // (opening fence length, accumulated raw text) while inside a fence
    let mut open_fence: Option<(usize, String)> = None;
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];

        if let TokenKind::CodeFence { length, .. } = &token.kind {
            match open_fence.as_mut() {
                None => open_fence = Some((*length, String::new())),
                Some((opening, text)) => {
                    if *length >= *opening {
                        nodes.push(AstNode::Code {
                            content: text.trim().to_string(),
                        });
                        open_fence = None;
                    } else {
                        // a shorter fence is content, not a closer
                        text.push_str(&token.raw);
                        text.push('\n');
                    }
                }
            }
            i += 1;
            continue;
        }

        if let Some((_, text)) = open_fence.as_mut() {
            // inside a fence every token reverts to its raw source line
            text.push_str(&token.raw);
            text.push('\n');
            i += 1;
            continue;
        }

        match &token.kind {
            TokenKind::Blank => {}

            TokenKind::Heading { level, content } => nodes.push(AstNode::Heading {
                level: *level,
                content: compile_inline(content, footnotes),
            }),

            TokenKind::Table {
                headers,
                rows,
                alignments,
            } => nodes.push(AstNode::Table {
                headers: compile_cells(headers, footnotes),
                rows: rows
                    .iter()
                    .map(|row| compile_cells(row, footnotes))
                    .collect(),
                alignments: alignments.clone(),
            }),

            TokenKind::ListItem { ordered, .. } => {
                let (list, next) = build_list_tree(tokens, i, *ordered, footnotes);
                nodes.push(list);
                i = next;
                continue;
            }

            TokenKind::Blockquote { content } => nodes.push(AstNode::Blockquote {
                content: compile_inline(content, footnotes),
            }),

            TokenKind::HorizontalRule => nodes.push(AstNode::HorizontalRule),

            TokenKind::Details { summary, body } => nodes.push(AstNode::Details {
                summary: compile_inline(summary, footnotes),
                children: parse_blocks(body, footnotes),
            }),

            TokenKind::Admonition {
                kind,
                subtype,
                body,
            } => nodes.push(AstNode::Admonition {
                kind: kind.clone(),
                subtype: subtype
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ADMONITION_SUBTYPE.to_string()),
                children: parse_blocks(body, footnotes),
            }),

            TokenKind::CaptionedImage { alt, url } => nodes.push(AstNode::CaptionedImage {
                alt: alt.clone(),
                url: url.clone(),
            }),

            // an orphan definition line has no term to attach to
            TokenKind::Definition { .. } => {}

            TokenKind::Paragraph { content } => {
                let term = compile_inline(content, footnotes);
                if let Some((definitions, next)) = collect_definitions(tokens, i + 1, footnotes) {
                    nodes.push(AstNode::DefinitionList { term, definitions });
                    i = next;
                    continue;
                }
                nodes.push(AstNode::Paragraph { content: term });
            }

            // handled by the fence state machine above
            TokenKind::CodeFence { .. } => {}
        }

        i += 1;
    }

    nodes
}

/// Run a container block's captured body through the full pipeline.
///
/// Footnote definitions inside the body are discarded; references resolve
/// against the outer document's table.
fn parse_blocks(body: &str, footnotes: &Footnotes) -> Vec<AstNode> {
    let (tokens, _) = tokenize(body);
    generate(&tokens, footnotes)
}

fn compile_cells(cells: &[String], footnotes: &Footnotes) -> Vec<String> {
    cells
        .iter()
        .map(|cell| compile_inline(cell, footnotes))
        .collect()
}

/// Build one list node from the run of list-item tokens starting at `start`.
///
/// Items at the run's base level become siblings; an item one level deeper
/// starts a nested run attached to the most recent sibling. An item at a
/// shallower level ends the run and returns control to the caller. Level
/// jumps greater than one and stray deep items are skipped, never an error.
fn build_list_tree(
    tokens: &[Token],
    start: usize,
    ordered: bool,
    footnotes: &Footnotes,
) -> (AstNode, usize) {
    let base_level = match &tokens[start].kind {
        TokenKind::ListItem { level, .. } => *level,
        _ => 0,
    };

    let mut items: Vec<ListItem> = Vec::new();
    let mut i = start;

    while i < tokens.len() {
        let (level, checked, content) = match &tokens[i].kind {
            TokenKind::ListItem {
                level,
                checked,
                content,
                ..
            } => (*level, *checked, content),
            _ => break,
        };

        if level == base_level {
            let mut item = ListItem::new(compile_inline(content, footnotes));
            item.checked = checked;
            i += 1;

            if let Some(TokenKind::ListItem {
                level: next_level,
                ordered: next_ordered,
                ..
            }) = tokens.get(i).map(|t| &t.kind)
            {
                if *next_level > level {
                    let (nested, next) = build_list_tree(tokens, i, *next_ordered, footnotes);
                    item.nested = Some(Box::new(nested));
                    i = next;
                }
            }

            items.push(item);
        } else if level > base_level {
            // deeper item with no sibling to hang off; skip it
            i += 1;
        } else {
            break;
        }
    }

    (AstNode::List { ordered, items }, i)
}

/// Look ahead from `from` for the definition lines of a definition list.
///
/// At most one blank line may sit between the term and its definitions; it
/// is consumed only when definitions actually follow. Returns the compiled
/// definitions and the cursor position past the run (including one trailing
/// blank), or None when the term is just a paragraph.
fn collect_definitions(
    tokens: &[Token],
    from: usize,
    footnotes: &Footnotes,
) -> Option<(Vec<String>, usize)> {
    let mut i = from;
    if matches!(tokens.get(i).map(|t| &t.kind), Some(TokenKind::Blank)) {
        i += 1;
    }

    let mut definitions = Vec::new();
    while let Some(TokenKind::Definition { content }) = tokens.get(i).map(|t| &t.kind) {
        definitions.push(compile_inline(content, footnotes));
        i += 1;
    }

    if definitions.is_empty() {
        return None;
    }

    if matches!(tokens.get(i).map(|t| &t.kind), Some(TokenKind::Blank)) {
        i += 1;
    }

    Some((definitions, i))
}
