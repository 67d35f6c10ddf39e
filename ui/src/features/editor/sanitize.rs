use super::document::{text_blocks, Block};
use super::html::{escape_attr, escape_text, is_void, tokenize, Token};
use super::links::is_safe_href;
use super::parse::parse_blocks;

/// Tags kept from pasted markup; everything else is unwrapped or dropped.
pub const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "h1", "h2", "h3", "h4", "h5", "h6", "strong", "b", "em", "i", "u", "s", "strike",
    "del", "ul", "ol", "li", "blockquote", "pre", "code", "a", "table", "thead", "tbody", "tr",
    "th", "td", "hr",
];

/// Tags removed together with everything inside them.
pub const DROPPED_TAGS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "noscript", "template", "head", "title",
    "meta", "link", "svg", "math",
];

/// Reduce arbitrary clipboard markup to the allow-list.
///
/// Output is balanced: stray end tags are discarded and elements still
/// open at the end are closed.
pub fn sanitize_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut open: Vec<String> = Vec::new();
    let mut dropping: Option<(String, usize)> = None;

    for token in tokenize(input) {
        if let Some((name, depth)) = dropping.as_mut() {
            match &token {
                Token::Start {
                    name: start,
                    self_closing: false,
                    ..
                } if start == name => *depth += 1,
                Token::End { name: end } if end == name => {
                    *depth -= 1;
                    if *depth == 0 {
                        dropping = None;
                    }
                }
                _ => {}
            }
            continue;
        }

        match token {
            Token::Start {
                name,
                attrs,
                self_closing,
            } => {
                if DROPPED_TAGS.contains(&name.as_str()) {
                    if !self_closing && !is_void(&name) {
                        dropping = Some((name, 1));
                    }
                    continue;
                }
                if !ALLOWED_TAGS.contains(&name.as_str()) {
                    continue;
                }
                close_implied(&name, &mut open, &mut out);

                out.push('<');
                out.push_str(&name);
                if name == "a" {
                    if let Some(href) = Token::attr(&attrs, "href").filter(|h| is_safe_href(h)) {
                        out.push_str(" href=\"");
                        out.push_str(&escape_attr(href.trim()));
                        out.push('"');
                    }
                }
                out.push('>');

                if !is_void(&name) && !self_closing {
                    open.push(name);
                }
            }
            Token::End { name } => {
                if is_void(&name) || !open.contains(&name) {
                    continue;
                }
                while let Some(top) = open.pop() {
                    out.push_str("</");
                    out.push_str(&top);
                    out.push('>');
                    if top == name {
                        break;
                    }
                }
            }
            Token::Text(text) => out.push_str(&escape_text(&text)),
            Token::Comment | Token::Declaration => {}
        }
    }

    while let Some(top) = open.pop() {
        out.push_str("</");
        out.push_str(&top);
        out.push('>');
    }

    out
}

/// A new list item, paragraph, row or cell ends an unclosed sibling.
fn close_implied(name: &str, open: &mut Vec<String>, out: &mut String) {
    let implied: &[&str] = match name {
        "li" => &["li"],
        "p" => &["p"],
        "td" | "th" => &["td", "th"],
        "tr" => &["td", "th", "tr"],
        _ => return,
    };
    while let Some(top) = open.last() {
        if !implied.contains(&top.as_str()) {
            break;
        }
        out.push_str("</");
        out.push_str(top);
        out.push('>');
        open.pop();
    }
}

/// Turn a clipboard payload into blocks ready for insertion. HTML wins when
/// present; plain text becomes one paragraph per line.
pub fn paste_blocks(html: Option<&str>, text: &str) -> Vec<Block> {
    match html.filter(|html| !html.trim().is_empty()) {
        Some(html) => parse_blocks(&sanitize_html(html)),
        None if text.is_empty() => Vec::new(),
        None => text_blocks(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::editor::document::{BlockKind, Inline};

    #[test]
    fn test_script_removed_inner_text_kept() {
        let dirty = "<p>Breaking<script>alert('x')</script> <b>news</b></p>";
        let clean = sanitize_html(dirty);
        assert_eq!(clean, "<p>Breaking <b>news</b></p>");
        assert!(!clean.contains("script"));
        assert!(!clean.contains("alert"));
    }

    #[test]
    fn test_unknown_tags_unwrapped() {
        let clean = sanitize_html(r#"<div class="x"><span style="color:red">Hi</span> <font>there</font></div>"#);
        assert_eq!(clean, "Hi there");
    }

    #[test]
    fn test_attributes_stripped_except_safe_href() {
        let clean = sanitize_html(
            r#"<p onclick="steal()" style="x">a <a href="https://example.com" target="_blank" onmouseover="x">link</a> <a href="javascript:alert(1)">bad</a></p>"#,
        );
        assert_eq!(
            clean,
            r#"<p>a <a href="https://example.com">link</a> <a>bad</a></p>"#
        );
    }

    #[test]
    fn test_nested_dropped_content() {
        let clean = sanitize_html("<svg><svg><text>hidden</text></svg><text>still</text></svg>ok");
        assert_eq!(clean, "ok");
    }

    #[test]
    fn test_comments_doctype_and_head_removed() {
        let clean = sanitize_html(
            "<!DOCTYPE html><html><head><title>T</title><style>p{}</style></head><body><!--StartFragment--><p>Body</p><!--EndFragment--></body></html>",
        );
        assert_eq!(clean, "<p>Body</p>");
    }

    #[test]
    fn test_output_is_balanced() {
        assert_eq!(sanitize_html("<p><b>open"), "<p><b>open</b></p>");
        assert_eq!(sanitize_html("text</em></p>"), "text");
        assert_eq!(sanitize_html("<ul><li>a<li>b</ul>"), "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(sanitize_html("1 &lt; 2 <img src=x onerror=alert(1)>"), "1 &lt; 2 ");
    }

    #[test]
    fn test_plain_text_paste_splits_lines() {
        let blocks = paste_blocks(None, "first\nsecond");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].content, vec![Inline::text("second")]);
    }

    #[test]
    fn test_html_paste_preferred_over_text() {
        let blocks = paste_blocks(Some("<h2>Title</h2><iframe src=x></iframe>"), "Title");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Heading(2));
    }
}
