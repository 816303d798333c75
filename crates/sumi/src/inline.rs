//! Inline markup compilation
//!
//! Rewrites the inline markup of one leaf text field into an HTML fragment.
//! The rules run in a fixed order: escapes are parked behind opaque
//! placeholders before any markup rule can see them, footnote references are
//! parked before the link rule can misread their brackets, and both are
//! resolved again at the end, escapes strictly last.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use sumi_core::Footnotes;

// Placeholder delimiters from the Unicode specials range; effectively
// unused in document text, so parked fragments cannot collide with input.
const MARK_OPEN: char = '\u{FFF0}';
const MARK_CLOSE: char = '\u{FFF1}';

static ESCAPED_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\(.)").unwrap());
static FOOTNOTE_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\^([^\]]+)\]").unwrap());
static RUBY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^}]+)\}\(([^)]+)\)").unwrap());
static STRONG_EM_STARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*\*(.+?)\*\*\*").unwrap());
static STRONG_EM_UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"___(.+?)___").unwrap());
static STRONG_STARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static STRONG_UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"__(.+?)__").unwrap());
static EM_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static EM_UNDERSCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_(.+?)_").unwrap());
static STRIKETHROUGH: Lazy<Regex> = Lazy::new(|| Regex::new(r"~~(.+?)~~").unwrap());
static CODE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());
static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.+?)\]\((.+?)\)").unwrap());
static FOOTNOTE_MARK: Lazy<Regex> =
    Lazy::new(|| Regex::new("\u{FFF0}FOOTNOTE([^\u{FFF1}]+)\u{FFF1}").unwrap());

/// Compile the inline markup of `text` into an HTML fragment.
pub fn compile_inline(text: &str, footnotes: &Footnotes) -> String {
    // 1. park backslash escapes behind indexed placeholders
    let mut escapes: Vec<String> = Vec::new();
    let mut result = ESCAPED_CHAR
        .replace_all(text, |caps: &Captures| {
            let mark = format!("{MARK_OPEN}ESCAPE{}{MARK_CLOSE}", escapes.len());
            escapes.push(caps[1].to_string());
            mark
        })
        .into_owned();

    // 2. park footnote references so the link rule cannot claim their brackets
    result = FOOTNOTE_REF
        .replace_all(&result, format!("{MARK_OPEN}FOOTNOTE${{1}}{MARK_CLOSE}"))
        .into_owned();

    // 3..10. markup rules, outermost first
    result = RUBY
        .replace_all(&result, "<ruby>${1}<rt>${2}</rt></ruby>")
        .into_owned();
    result = STRONG_EM_STARS
        .replace_all(&result, "<strong><em>${1}</em></strong>")
        .into_owned();
    result = STRONG_EM_UNDERSCORES
        .replace_all(&result, "<strong><em>${1}</em></strong>")
        .into_owned();
    result = STRONG_STARS
        .replace_all(&result, "<strong>${1}</strong>")
        .into_owned();
    result = STRONG_UNDERSCORES
        .replace_all(&result, "<strong>${1}</strong>")
        .into_owned();
    result = EM_STAR.replace_all(&result, "<em>${1}</em>").into_owned();
    result = EM_UNDERSCORE
        .replace_all(&result, "<em>${1}</em>")
        .into_owned();
    result = STRIKETHROUGH
        .replace_all(&result, "<del>${1}</del>")
        .into_owned();
    result = CODE_SPAN
        .replace_all(&result, "<code>${1}</code>")
        .into_owned();
    result = IMAGE
        .replace_all(&result, "<img src=\"${2}\" alt=\"${1}\" />")
        .into_owned();
    result = LINK
        .replace_all(&result, "<a href=\"${2}\">${1}</a>")
        .into_owned();

    // 11. resolve footnote references; unknown ids fall back to their
    //     literal bracket text
    result = FOOTNOTE_MARK
        .replace_all(&result, |caps: &Captures| {
            let id = &caps[1];
            if footnotes.contains_key(id) {
                format!("<sup><a href=\"#footnote-{id}\" id=\"ref-{id}\">[{id}]</a></sup>")
            } else {
                format!("[^{id}]")
            }
        })
        .into_owned();

    // 12. restore escaped characters, strictly last
    for (index, literal) in escapes.iter().enumerate() {
        let mark = format!("{MARK_OPEN}ESCAPE{index}{MARK_CLOSE}");
        result = result.replace(&mark, literal);
    }

    result
}
