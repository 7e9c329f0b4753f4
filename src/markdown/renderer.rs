//! Restricted-dialect Markdown to HTML conversion
//!
//! Chat responses arrive as plain text containing a small Markdown subset:
//! bold, inline code, fenced code blocks, ordered/unordered lists, and
//! paragraphs separated by blank lines. This module converts that text into
//! safe HTML in a single line-oriented pass.
//!
//! Input is HTML-escaped before any Markdown interpretation, so model output
//! containing literal angle brackets can never introduce tags. The emitted
//! HTML is restricted to `<p>`, `<strong>`, `<code>`, `<pre><code>`, `<ul>`,
//! `<ol>`, and `<li>`.
//!
//! Rendering never fails: unterminated lists and code fences are closed at
//! end of input, and empty input yields an empty string.

use regex::Regex;
use std::sync::OnceLock;

// ─────────────────────────────────────────────────────────────────────────────
// Block Model
// ─────────────────────────────────────────────────────────────────────────────

/// A structural block recognized by the line pass.
///
/// Text carried by `Paragraph` and `List` items is HTML-escaped but still
/// contains its inline Markdown spans; those are substituted during HTML
/// assembly. `CodeBlock` lines are kept verbatim (escaped, otherwise
/// untouched).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderBlock {
    /// One paragraph; consecutive non-blank lines joined with newlines.
    Paragraph(String),
    /// Fenced code block content, one entry per line.
    CodeBlock(Vec<String>),
    /// A run of same-marker list items.
    List { items: Vec<String>, ordered: bool },
    /// Marker left by an explicit blank line; collapses to vertical spacing
    /// during assembly.
    Blank,
}

// ─────────────────────────────────────────────────────────────────────────────
// Renderer
// ─────────────────────────────────────────────────────────────────────────────

/// Line-oriented renderer for the restricted Markdown dialect.
///
/// Holds its compiled patterns; construct once and reuse across calls, or go
/// through [`render_markdown`] for the shared instance.
pub struct MarkdownLite {
    list_item: Regex,
    code_span: Regex,
    bold_span: Regex,
}

impl MarkdownLite {
    pub fn new() -> Self {
        MarkdownLite {
            list_item: Regex::new(r"^(\s*)([*-]|\d+\.)\s+(.*)$")
                .expect("list item pattern is valid"),
            code_span: Regex::new(r"`([^`]+)`").expect("code span pattern is valid"),
            bold_span: Regex::new(r"\*\*(.*?)\*\*|__(.*?)__")
                .expect("bold span pattern is valid"),
        }
    }

    /// Convert `text` to HTML.
    ///
    /// Equivalent to [`Self::render_blocks`] followed by HTML assembly.
    pub fn render(&self, text: &str) -> String {
        let fragments: Vec<String> = self
            .render_blocks(text)
            .iter()
            .map(|block| self.block_html(block))
            .collect();
        fragments.join("\n").trim().to_string()
    }

    /// Run the line pass and return the recognized block structure.
    ///
    /// Exposed for callers that want to walk the structure instead of
    /// consuming HTML.
    pub fn render_blocks(&self, text: &str) -> Vec<RenderBlock> {
        let escaped = escape_html(text);

        let mut blocks: Vec<RenderBlock> = Vec::new();
        let mut code_lines: Option<Vec<String>> = None;
        let mut list: Option<(Vec<String>, bool)> = None;
        let mut paragraph: Vec<String> = Vec::new();

        for line in escaped.lines() {
            let trimmed = line.trim();

            // Fence markers toggle code mode even mid-block, so they are
            // checked before verbatim collection.
            if trimmed.starts_with("```") {
                flush_paragraph(&mut paragraph, &mut blocks);
                close_list(&mut list, &mut blocks);
                match code_lines.take() {
                    Some(lines) => blocks.push(RenderBlock::CodeBlock(lines)),
                    None => code_lines = Some(Vec::new()),
                }
                continue;
            }

            if let Some(lines) = code_lines.as_mut() {
                lines.push(line.to_string());
                continue;
            }

            if let Some(caps) = self.list_item.captures(line) {
                flush_paragraph(&mut paragraph, &mut blocks);
                let ordered = caps[2].ends_with('.');
                let content = caps[3].to_string();
                match list.as_mut() {
                    // Same marker shape extends the current list; a switch
                    // closes it and opens a new container.
                    Some((items, current)) if *current == ordered => items.push(content),
                    _ => {
                        close_list(&mut list, &mut blocks);
                        list = Some((vec![content], ordered));
                    }
                }
                continue;
            }

            close_list(&mut list, &mut blocks);
            if trimmed.is_empty() {
                flush_paragraph(&mut paragraph, &mut blocks);
                blocks.push(RenderBlock::Blank);
            } else {
                paragraph.push(line.to_string());
            }
        }

        // End of input: everything still open closes, including an
        // unterminated fence.
        flush_paragraph(&mut paragraph, &mut blocks);
        close_list(&mut list, &mut blocks);
        if let Some(lines) = code_lines.take() {
            blocks.push(RenderBlock::CodeBlock(lines));
        }

        blocks
    }

    /// HTML for one block. Inline spans are substituted here, never inside
    /// code content.
    fn block_html(&self, block: &RenderBlock) -> String {
        match block {
            RenderBlock::Paragraph(text) => format!("<p>{}</p>", self.apply_inline(text)),
            RenderBlock::CodeBlock(lines) => {
                if lines.is_empty() {
                    "<pre><code>\n</code></pre>".to_string()
                } else {
                    format!("<pre><code>\n{}\n</code></pre>", lines.join("\n"))
                }
            }
            RenderBlock::List { items, ordered } => {
                let tag = if *ordered { "ol" } else { "ul" };
                let mut html = format!("<{}>", tag);
                for item in items {
                    html.push_str("\n  <li>");
                    html.push_str(&self.apply_inline(item));
                    html.push_str("</li>");
                }
                html.push_str(&format!("\n</{}>", tag));
                html
            }
            RenderBlock::Blank => String::new(),
        }
    }

    /// Single-pass span substitutions, code spans first so backticked text
    /// is wrapped before the bold pass sees it. No nesting support.
    fn apply_inline(&self, text: &str) -> String {
        let with_code = self.code_span.replace_all(text, "<code>${1}</code>");
        self.bold_span
            .replace_all(&with_code, "<strong>${1}${2}</strong>")
            .into_owned()
    }
}

impl Default for MarkdownLite {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape `&`, `<`, and `>`. The ampersand must go first or the later
/// entities would be double-escaped.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn flush_paragraph(paragraph: &mut Vec<String>, blocks: &mut Vec<RenderBlock>) {
    if !paragraph.is_empty() {
        blocks.push(RenderBlock::Paragraph(paragraph.join("\n")));
        paragraph.clear();
    }
}

fn close_list(list: &mut Option<(Vec<String>, bool)>, blocks: &mut Vec<RenderBlock>) {
    if let Some((items, ordered)) = list.take() {
        blocks.push(RenderBlock::List { items, ordered });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared Instance
// ─────────────────────────────────────────────────────────────────────────────

/// Shared renderer instance.
///
/// Lazily initialized on first use so callers rendering one-off strings do
/// not recompile the patterns each time.
static RENDERER: OnceLock<MarkdownLite> = OnceLock::new();

/// Render `text` using the shared renderer instance.
pub fn render_markdown(text: &str) -> String {
    RENDERER.get_or_init(MarkdownLite::new).render(text)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
