//! AST serialization
//!
//! Converts AST nodes into HTML text. Stateless per call: nodes are never
//! mutated, and the footnote table is only read to build the appendix.

use crate::ast::{AstNode, ListItem};
use crate::options::DocumentOptions;
use crate::token::{Alignment, Footnotes};

/// Serialize nodes to an HTML fragment, one block element per line, followed
/// by the footnote appendix when the footnote table is non-empty.
pub fn serialize(nodes: &[AstNode], footnotes: &Footnotes) -> String {
    let mut out = String::with_capacity(4096);
    write_nodes(nodes, &mut out);

    if !footnotes.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        write_footnote_appendix(footnotes, &mut out);
    }

    out
}

/// Serialize nodes into a complete HTML document shell.
///
/// When `options.embed_stylesheet` is set and the stylesheet file cannot be
/// read, the document degrades to a `<link>` reference instead of failing.
pub fn serialize_document(
    nodes: &[AstNode],
    footnotes: &Footnotes,
    options: &DocumentOptions,
) -> String {
    let body = serialize(nodes, footnotes);

    let mut out = String::with_capacity(body.len() + 256);
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>");
    out.push_str(&options.title);
    out.push_str("</title>\n");
    write_stylesheet(options, &mut out);
    out.push_str("</head>\n<body>\n");
    out.push_str(&body);
    out.push_str("\n</body>\n</html>\n");
    out
}

fn write_nodes(nodes: &[AstNode], out: &mut String) {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_node(node, out);
    }
}

fn write_node(node: &AstNode, out: &mut String) {
    match node {
        AstNode::Heading { level, content } => {
            out.push_str("<h");
            out.push_str(&level.to_string());
            out.push('>');
            out.push_str(content);
            out.push_str("</h");
            out.push_str(&level.to_string());
            out.push('>');
        }

        AstNode::Paragraph { content } => {
            out.push_str("<p>");
            out.push_str(content);
            out.push_str("</p>");
        }

        AstNode::List { ordered, items } => write_list(*ordered, items, out),

        AstNode::Table {
            headers,
            rows,
            alignments,
        } => write_table(headers, rows, alignments, out),

        AstNode::Blockquote { content } => {
            out.push_str("<blockquote>");
            out.push_str(content);
            out.push_str("</blockquote>");
        }

        AstNode::Code { content } => {
            out.push_str("<pre><code>");
            out.push_str(&escape_html(content));
            out.push_str("</code></pre>");
        }

        AstNode::HorizontalRule => out.push_str("<hr />"),

        AstNode::DefinitionList { term, definitions } => {
            out.push_str("<dl><dt>");
            out.push_str(term);
            out.push_str("</dt>");
            for definition in definitions {
                out.push_str("<dd>");
                out.push_str(definition);
                out.push_str("</dd>");
            }
            out.push_str("</dl>");
        }

        AstNode::Admonition {
            kind,
            subtype,
            children,
        } => {
            out.push_str("<aside class=\"admonition ");
            out.push_str(kind);
            out.push(' ');
            out.push_str(subtype);
            out.push_str("\">\n");
            write_nodes(children, out);
            out.push_str("\n</aside>");
        }

        AstNode::Details { summary, children } => {
            out.push_str("<details>\n<summary>");
            out.push_str(summary);
            out.push_str("</summary>\n");
            write_nodes(children, out);
            out.push_str("\n</details>");
        }

        AstNode::CaptionedImage { alt, url } => {
            out.push_str("<figure><img src=\"");
            out.push_str(url);
            out.push_str("\" alt=\"");
            out.push_str(alt);
            out.push_str("\" /><figcaption>");
            out.push_str(alt);
            out.push_str("</figcaption></figure>");
        }
    }
}

fn write_list(ordered: bool, items: &[ListItem], out: &mut String) {
    out.push_str(if ordered { "<ol>" } else { "<ul>" });

    for item in items {
        out.push_str("<li>");
        if let Some(checked) = item.checked {
            out.push_str(if checked { "☑ " } else { "☐ " });
        }
        out.push_str(&item.content);
        if let Some(nested) = &item.nested {
            write_node(nested, out);
        }
        out.push_str("</li>");
    }

    out.push_str(if ordered { "</ol>" } else { "</ul>" });
}

fn write_table(
    headers: &[String],
    rows: &[Vec<String>],
    alignments: &[Alignment],
    out: &mut String,
) {
    out.push_str("<table><thead><tr>");
    for (i, header) in headers.iter().enumerate() {
        write_cell("th", header, column_alignment(alignments, i), out);
    }
    out.push_str("</tr></thead><tbody>");

    for row in rows {
        out.push_str("<tr>");
        for (i, cell) in row.iter().enumerate() {
            write_cell("td", cell, column_alignment(alignments, i), out);
        }
        out.push_str("</tr>");
    }

    out.push_str("</tbody></table>");
}

fn column_alignment(alignments: &[Alignment], index: usize) -> Alignment {
    alignments.get(index).copied().unwrap_or(Alignment::Left)
}

fn write_cell(tag: &str, content: &str, alignment: Alignment, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    if alignment != Alignment::Left {
        out.push_str(" style=\"text-align: ");
        out.push_str(alignment.as_css());
        out.push('"');
    }
    out.push('>');
    out.push_str(content);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn write_footnote_appendix(footnotes: &Footnotes, out: &mut String) {
    out.push_str("<div class=\"footnotes\"><ol>");
    for (id, text) in footnotes {
        out.push_str("<li id=\"footnote-");
        out.push_str(id);
        out.push_str("\">");
        out.push_str(text);
        out.push_str(" <a href=\"#ref-");
        out.push_str(id);
        out.push_str("\">\u{21a9}</a></li>");
    }
    out.push_str("</ol></div>");
}

fn write_stylesheet(options: &DocumentOptions, out: &mut String) {
    let path = match &options.stylesheet {
        Some(path) => path,
        None => return,
    };

    if options.embed_stylesheet {
        if let Ok(css) = std::fs::read_to_string(path) {
            out.push_str("<style>\n");
            out.push_str(&css);
            out.push_str("</style>\n");
            return;
        }
        // unreadable stylesheet degrades to a link reference
    }

    out.push_str("<link rel=\"stylesheet\" href=\"");
    out.push_str(&path.to_string_lossy());
    out.push_str("\">\n");
}

/// Entity-escape code block content; limited to the five characters that
/// would otherwise be interpreted as markup.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
