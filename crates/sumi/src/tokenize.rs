//! Line tokenization
//!
//! Classifies each source line (or multi-line block) into a typed token and
//! collects footnote definitions into a side table. Classification is
//! first-match-wins in a fixed order; several patterns overlap in the
//! characters they match, so the order is part of the format definition.
//! Nesting and grouping across lines is left to the AST generator.

use once_cell::sync::Lazy;
use regex::Regex;

use sumi_core::{Alignment, Footnotes, Token, TokenKind};

/// Spaces per list nesting level
const INDENT_SIZE: usize = 2;

static FOOTNOTE_DEF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[\^([^\]]+)\]:\s+(.+)$").unwrap());
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());
static CODE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(`{3,})").unwrap());
static DETAILS_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^===(.*)$").unwrap());
static DETAILS_NESTED_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^===.+$").unwrap());
static ADMONITION_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:::([a-z]+)(?:\s+([a-z]+))?$").unwrap());
static CAPTIONED_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-!\[([^\]]*)\]\(([^)]+)\)$").unwrap());
static UNORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)[-*]\s+(?:\[([ xX])\]\s+)?(.+)$").unwrap());
static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*)\d+\.\s+(.+)$").unwrap());
static UNORDERED_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-*]\s").unwrap());
static ORDERED_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+\.\s").unwrap());
static BLOCKQUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^>\s").unwrap());
static BLOCKQUOTE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^>\s*").unwrap());
static HORIZONTAL_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:-{3,}|\*{3,}|_{3,})$").unwrap());
static DEFINITION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^:\s+(.+)$").unwrap());
static SEPARATOR_CELL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^:?-+:?$").unwrap());

/// Tokenize source text into a token stream and the footnote table.
///
/// Total over all inputs: every line is classified as *something*, with
/// `Paragraph` as the fallback. Comment lines (`//` prefix) and footnote
/// definitions are removed from the stream entirely.
pub fn tokenize(text: &str) -> (Vec<Token>, Footnotes) {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut tokens = Vec::new();
    let mut footnotes = Footnotes::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if line.trim().starts_with("//") {
            i += 1;
            continue;
        }

        if let Some(caps) = FOOTNOTE_DEF.captures(line) {
            // a later definition with the same id overwrites the earlier one
            footnotes.insert(caps[1].to_string(), caps[2].to_string());
            i += 1;
            continue;
        }

        if line.trim().is_empty() {
            tokens.push(Token::new(TokenKind::Blank, line));
            i += 1;
            continue;
        }

        if is_table_candidate(line) {
            if let Some((token, next)) = parse_table(&lines, i) {
                tokens.push(token);
                i = next;
                continue;
            }
        }

        if let Some(caps) = HEADING.captures(line) {
            tokens.push(Token::new(
                TokenKind::Heading {
                    level: caps[1].len() as u8,
                    content: caps[2].to_string(),
                },
                line,
            ));
            i += 1;
            continue;
        }

        if let Some(caps) = CODE_FENCE.captures(line) {
            let length = caps[1].len();
            tokens.push(Token::new(
                TokenKind::CodeFence {
                    length,
                    info: line[length..].trim().to_string(),
                },
                line,
            ));
            i += 1;
            continue;
        }

        if let Some(caps) = DETAILS_OPEN.captures(line) {
            let summary = caps[1].trim();
            if !summary.is_empty() {
                let (body, end) = collect_details_body(&lines, i);
                tokens.push(Token::new(
                    TokenKind::Details {
                        summary: summary.to_string(),
                        body,
                    },
                    lines[i..end].join("\n"),
                ));
                i = end;
                continue;
            }
        }

        if let Some(caps) = ADMONITION_OPEN.captures(line) {
            let kind = caps[1].to_string();
            let subtype = caps.get(2).map(|m| m.as_str().to_string());
            let (body, end) = collect_admonition_body(&lines, i);
            tokens.push(Token::new(
                TokenKind::Admonition {
                    kind,
                    subtype,
                    body,
                },
                lines[i..end].join("\n"),
            ));
            i = end;
            continue;
        }

        if let Some(caps) = CAPTIONED_IMAGE.captures(line) {
            tokens.push(Token::new(
                TokenKind::CaptionedImage {
                    alt: caps[1].to_string(),
                    url: caps[2].to_string(),
                },
                line,
            ));
            i += 1;
            continue;
        }

        if let Some(caps) = UNORDERED_ITEM.captures(line) {
            let checked = caps
                .get(2)
                .map(|m| m.as_str().eq_ignore_ascii_case("x"));
            tokens.push(Token::new(
                TokenKind::ListItem {
                    ordered: false,
                    level: caps[1].len() / INDENT_SIZE,
                    checked,
                    content: caps[3].to_string(),
                },
                line,
            ));
            i += 1;
            continue;
        }

        if let Some(caps) = ORDERED_ITEM.captures(line) {
            tokens.push(Token::new(
                TokenKind::ListItem {
                    ordered: true,
                    level: caps[1].len() / INDENT_SIZE,
                    checked: None,
                    content: caps[2].to_string(),
                },
                line,
            ));
            i += 1;
            continue;
        }

        if BLOCKQUOTE.is_match(line) {
            tokens.push(Token::new(
                TokenKind::Blockquote {
                    content: BLOCKQUOTE_PREFIX.replace(line, "").into_owned(),
                },
                line,
            ));
            i += 1;
            continue;
        }

        if HORIZONTAL_RULE.is_match(line) {
            tokens.push(Token::new(TokenKind::HorizontalRule, line));
            i += 1;
            continue;
        }

        if let Some(caps) = DEFINITION.captures(line) {
            tokens.push(Token::new(
                TokenKind::Definition {
                    content: caps[1].to_string(),
                },
                line,
            ));
            i += 1;
            continue;
        }

        tokens.push(Token::new(
            TokenKind::Paragraph {
                content: line.to_string(),
            },
            line,
        ));
        i += 1;
    }

    (tokens, footnotes)
}

/// A table can start on any line containing a pipe that is not already
/// claimed by a code fence, blockquote or list pattern.
fn is_table_candidate(line: &str) -> bool {
    line.contains('|')
        && !CODE_FENCE.is_match(line)
        && !line.starts_with('>')
        && !UNORDERED_LINE.is_match(line)
        && !ORDERED_LINE.is_match(line)
}

/// Try to consume a table starting at `start`: a header line, a separator
/// line, then contiguous non-blank row lines. Returns the collapsed token
/// and the index past the last consumed line, or None if the lookahead
/// fails (the caller falls through to the other line rules).
fn parse_table(lines: &[&str], start: usize) -> Option<(Token, usize)> {
    let separator = lines.get(start + 1)?;
    if !is_table_separator(separator) {
        return None;
    }

    let headers = parse_table_row(lines[start]);
    let alignments = parse_table_alignments(separator);

    let mut rows = Vec::new();
    let mut i = start + 2;
    while i < lines.len() {
        let line = lines[i];
        if line.trim().is_empty() || !line.contains('|') {
            break;
        }
        let row = parse_table_row(line);
        if row.is_empty() {
            break;
        }
        rows.push(row);
        i += 1;
    }

    let token = Token::new(
        TokenKind::Table {
            headers,
            rows,
            alignments,
        },
        lines[start..i].join("\n"),
    );
    Some((token, i))
}

fn is_table_separator(line: &str) -> bool {
    line.contains('|')
        && inner_cells(line)
            .iter()
            .all(|cell| SEPARATOR_CELL.is_match(cell.trim()))
}

/// Split a row on `|`, dropping the segments outside the leading and
/// trailing pipes. Rows without both delimiters lose cells; this is a
/// documented constraint of the input format, not something to repair here.
fn inner_cells(line: &str) -> Vec<&str> {
    let segments: Vec<&str> = line.split('|').collect();
    if segments.len() < 2 {
        return Vec::new();
    }
    segments[1..segments.len() - 1].to_vec()
}

fn parse_table_row(line: &str) -> Vec<String> {
    inner_cells(line)
        .iter()
        .map(|cell| cell.trim().to_string())
        .collect()
}

fn parse_table_alignments(line: &str) -> Vec<Alignment> {
    inner_cells(line)
        .iter()
        .map(|cell| {
            let trimmed = cell.trim();
            if trimmed.starts_with(':') && trimmed.ends_with(':') {
                Alignment::Center
            } else if trimmed.ends_with(':') {
                Alignment::Right
            } else {
                Alignment::Left
            }
        })
        .collect()
}

/// Collect the body of a details block, tracking nesting depth so that
/// same-syntax inner blocks close against their own delimiter. Returns the
/// trimmed body and the index past the closing line (or past the end of
/// input for an unclosed block).
fn collect_details_body(lines: &[&str], start: usize) -> (String, usize) {
    let mut body = String::new();
    let mut depth = 1usize;
    let mut i = start + 1;

    while i < lines.len() {
        let line = lines[i];
        if DETAILS_NESTED_OPEN.is_match(line) {
            depth += 1;
        }
        if line == "===" {
            depth -= 1;
            if depth == 0 {
                i += 1;
                break;
            }
        }
        body.push_str(line);
        body.push('\n');
        i += 1;
    }

    (body.trim().to_string(), i)
}

/// Collect the body of an admonition block. Unlike details blocks there is
/// no depth tracking: the first bare `:::` always closes, even when the
/// body contains an admonition pair of its own.
fn collect_admonition_body(lines: &[&str], start: usize) -> (String, usize) {
    let mut body = String::new();
    let mut i = start + 1;

    while i < lines.len() && lines[i] != ":::" {
        body.push_str(lines[i]);
        body.push('\n');
        i += 1;
    }

    let end = if i < lines.len() { i + 1 } else { i };
    (body.trim().to_string(), end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text).0.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_heading() {
        let (tokens, _) = tokenize("# Hello World");
        assert_eq!(
            tokens,
            vec![Token::new(
                TokenKind::Heading {
                    level: 1,
                    content: "Hello World".to_string(),
                },
                "# Hello World",
            )]
        );
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(
            kinds("# H1\n## H2\n### H3"),
            vec![
                TokenKind::Heading {
                    level: 1,
                    content: "H1".to_string()
                },
                TokenKind::Heading {
                    level: 2,
                    content: "H2".to_string()
                },
                TokenKind::Heading {
                    level: 3,
                    content: "H3".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_seven_hashes_is_a_paragraph() {
        assert_eq!(
            kinds("####### Too deep"),
            vec![TokenKind::Paragraph {
                content: "####### Too deep".to_string()
            }]
        );
    }

    #[test]
    fn test_paragraph_raw_reconstructs_line() {
        let (tokens, _) = tokenize("This is a paragraph.");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].raw, "This is a paragraph.");
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(
            kinds("a\n\n  \nb"),
            vec![
                TokenKind::Paragraph {
                    content: "a".to_string()
                },
                TokenKind::Blank,
                TokenKind::Blank,
                TokenKind::Paragraph {
                    content: "b".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_comment_lines_are_dropped() {
        assert_eq!(
            kinds("// a comment\ntext"),
            vec![TokenKind::Paragraph {
                content: "text".to_string()
            }]
        );
    }

    #[test]
    fn test_footnote_definition_goes_to_side_table() {
        let (tokens, footnotes) = tokenize("[^1]: The note text.");
        assert!(tokens.is_empty());
        assert_eq!(footnotes["1"], "The note text.");
    }

    #[test]
    fn test_later_footnote_definition_overwrites() {
        let (_, footnotes) = tokenize("[^n]: first\n[^n]: second");
        assert_eq!(footnotes.len(), 1);
        assert_eq!(footnotes["n"], "second");
    }

    #[test]
    fn test_code_fence_records_exact_length() {
        assert_eq!(
            kinds("````rust"),
            vec![TokenKind::CodeFence {
                length: 4,
                info: "rust".to_string()
            }]
        );
    }

    #[test]
    fn test_code_fence_pair() {
        assert_eq!(
            kinds("```\nconst x = 1;\n```"),
            vec![
                TokenKind::CodeFence {
                    length: 3,
                    info: String::new()
                },
                TokenKind::Paragraph {
                    content: "const x = 1;".to_string()
                },
                TokenKind::CodeFence {
                    length: 3,
                    info: String::new()
                },
            ]
        );
    }

    #[test]
    fn test_unordered_list_items() {
        assert_eq!(
            kinds("- Item 1\n- Item 2"),
            vec![
                TokenKind::ListItem {
                    ordered: false,
                    level: 0,
                    checked: None,
                    content: "Item 1".to_string()
                },
                TokenKind::ListItem {
                    ordered: false,
                    level: 0,
                    checked: None,
                    content: "Item 2".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_indentation_level() {
        assert_eq!(
            kinds("- a\n  - b\n    - c"),
            vec![
                TokenKind::ListItem {
                    ordered: false,
                    level: 0,
                    checked: None,
                    content: "a".to_string()
                },
                TokenKind::ListItem {
                    ordered: false,
                    level: 1,
                    checked: None,
                    content: "b".to_string()
                },
                TokenKind::ListItem {
                    ordered: false,
                    level: 2,
                    checked: None,
                    content: "c".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_checkbox_items() {
        assert_eq!(
            kinds("- [ ] open\n- [x] done\n- [X] also done"),
            vec![
                TokenKind::ListItem {
                    ordered: false,
                    level: 0,
                    checked: Some(false),
                    content: "open".to_string()
                },
                TokenKind::ListItem {
                    ordered: false,
                    level: 0,
                    checked: Some(true),
                    content: "done".to_string()
                },
                TokenKind::ListItem {
                    ordered: false,
                    level: 0,
                    checked: Some(true),
                    content: "also done".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_ordered_list_items() {
        assert_eq!(
            kinds("1. First\n2. Second"),
            vec![
                TokenKind::ListItem {
                    ordered: true,
                    level: 0,
                    checked: None,
                    content: "First".to_string()
                },
                TokenKind::ListItem {
                    ordered: true,
                    level: 0,
                    checked: None,
                    content: "Second".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_blockquote_strips_prefix() {
        assert_eq!(
            kinds("> Quote"),
            vec![TokenKind::Blockquote {
                content: "Quote".to_string()
            }]
        );
    }

    #[test]
    fn test_horizontal_rules() {
        assert_eq!(
            kinds("---\n***\n___"),
            vec![
                TokenKind::HorizontalRule,
                TokenKind::HorizontalRule,
                TokenKind::HorizontalRule,
            ]
        );
    }

    #[test]
    fn test_mixed_rule_characters_are_a_paragraph() {
        assert_eq!(
            kinds("--*"),
            vec![TokenKind::Paragraph {
                content: "--*".to_string()
            }]
        );
    }

    #[test]
    fn test_definition_line() {
        assert_eq!(
            kinds(": a definition"),
            vec![TokenKind::Definition {
                content: "a definition".to_string()
            }]
        );
    }

    #[test]
    fn test_table() {
        let (tokens, _) = tokenize("| A | B |\n|---|---|\n| 1 | 2 |");
        assert_eq!(tokens.len(), 1);
        assert_eq!(
            tokens[0].kind,
            TokenKind::Table {
                headers: vec!["A".to_string(), "B".to_string()],
                rows: vec![vec!["1".to_string(), "2".to_string()]],
                alignments: vec![Alignment::Left, Alignment::Left],
            }
        );
        assert_eq!(tokens[0].raw, "| A | B |\n|---|---|\n| 1 | 2 |");
    }

    #[test]
    fn test_table_alignments() {
        let (tokens, _) = tokenize("| A | B | C | D |\n|:---:|---:|:---|---|\n");
        match &tokens[0].kind {
            TokenKind::Table { alignments, .. } => assert_eq!(
                alignments,
                &vec![
                    Alignment::Center,
                    Alignment::Right,
                    Alignment::Left,
                    Alignment::Left
                ]
            ),
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn test_table_stops_at_blank_line() {
        let (tokens, _) = tokenize("| A |\n|---|\n| 1 |\n\n| 2 |");
        match &tokens[0].kind {
            TokenKind::Table { rows, .. } => assert_eq!(rows.len(), 1),
            other => panic!("expected table, got {other:?}"),
        }
        // the orphan row after the blank is not a table
        assert!(matches!(tokens[1].kind, TokenKind::Blank));
        assert!(matches!(tokens[2].kind, TokenKind::Paragraph { .. }));
    }

    #[test]
    fn test_pipe_line_without_separator_is_a_paragraph() {
        assert_eq!(
            kinds("a | b"),
            vec![TokenKind::Paragraph {
                content: "a | b".to_string()
            }]
        );
    }

    #[test]
    fn test_row_without_trailing_pipe_drops_last_cell() {
        let (tokens, _) = tokenize("| A | B |\n|---|---|\n| 1 | 2");
        match &tokens[0].kind {
            TokenKind::Table { rows, .. } => {
                assert_eq!(rows, &vec![vec!["1".to_string()]]);
            }
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn test_details_block() {
        let (tokens, _) = tokenize("=== Summary\nInner text\n===");
        assert_eq!(
            tokens[0].kind,
            TokenKind::Details {
                summary: "Summary".to_string(),
                body: "Inner text".to_string(),
            }
        );
        assert_eq!(tokens[0].raw, "=== Summary\nInner text\n===");
    }

    #[test]
    fn test_details_keeps_trailing_delimiter_in_summary() {
        let (tokens, _) = tokenize("=== Summary ===\nContent\n===");
        assert_eq!(
            tokens[0].kind,
            TokenKind::Details {
                summary: "Summary ===".to_string(),
                body: "Content".to_string(),
            }
        );
    }

    #[test]
    fn test_details_nesting_by_depth() {
        let markdown = "=== Outer\nbefore\n=== Inner\ndeep\n===\nafter\n===";
        let (tokens, _) = tokenize(markdown);
        assert_eq!(tokens.len(), 1);
        assert_eq!(
            tokens[0].kind,
            TokenKind::Details {
                summary: "Outer".to_string(),
                body: "before\n=== Inner\ndeep\n===\nafter".to_string(),
            }
        );
    }

    #[test]
    fn test_unclosed_details_runs_to_end() {
        let (tokens, _) = tokenize("=== Open\nbody");
        assert_eq!(
            tokens[0].kind,
            TokenKind::Details {
                summary: "Open".to_string(),
                body: "body".to_string(),
            }
        );
    }

    #[test]
    fn test_admonition_block() {
        let (tokens, _) = tokenize(":::note\nMessage\n:::");
        assert_eq!(
            tokens[0].kind,
            TokenKind::Admonition {
                kind: "note".to_string(),
                subtype: None,
                body: "Message".to_string(),
            }
        );
    }

    #[test]
    fn test_admonition_with_subtype() {
        let (tokens, _) = tokenize(":::warning danger\nCareful.\n:::");
        assert_eq!(
            tokens[0].kind,
            TokenKind::Admonition {
                kind: "warning".to_string(),
                subtype: Some("danger".to_string()),
                body: "Careful.".to_string(),
            }
        );
    }

    #[test]
    fn test_admonition_requires_kind_attached_to_colons() {
        // a space between ::: and the kind means this is not an admonition
        assert_eq!(
            kinds("::: info\nMessage\n:::"),
            vec![
                TokenKind::Paragraph {
                    content: "::: info".to_string()
                },
                TokenKind::Paragraph {
                    content: "Message".to_string()
                },
                TokenKind::Paragraph {
                    content: ":::".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_admonition_first_closer_wins() {
        // no depth tracking: the inner ::: pair is cut short
        let (tokens, _) = tokenize(":::outer\n:::inner\ntext\n:::\nrest\n:::");
        assert_eq!(
            tokens[0].kind,
            TokenKind::Admonition {
                kind: "outer".to_string(),
                subtype: None,
                body: ":::inner\ntext".to_string(),
            }
        );
        assert!(matches!(
            tokens[1].kind,
            TokenKind::Paragraph { .. }
        ));
    }

    #[test]
    fn test_captioned_image() {
        let (tokens, _) = tokenize("-![A chart](chart.png)");
        assert_eq!(
            tokens[0].kind,
            TokenKind::CaptionedImage {
                alt: "A chart".to_string(),
                url: "chart.png".to_string(),
            }
        );
    }
}
