use std::fmt::Write;

use super::document::{Align, Block, BlockKind, Document, Inline, Marks, Table};
use super::html::{escape_attr, escape_text};
use super::parse::INDENT_EM;

/// Markup handed to the caller; an empty document serializes to "".
pub fn to_html(document: &Document) -> String {
    if document.is_empty() {
        return String::new();
    }
    write_blocks(&document.blocks, false)
}

/// Markup pushed into the editable region. Every block carries its index
/// in `data-block` and empty blocks get a placeholder `<br>` so the caret
/// can enter them.
pub fn to_editable_html(document: &Document) -> String {
    write_blocks(&document.blocks, true)
}

fn write_blocks(blocks: &[Block], editable: bool) -> String {
    let mut out = String::new();
    let mut open_list: Option<bool> = None;

    for (index, block) in blocks.iter().enumerate() {
        let list = match block.kind {
            BlockKind::ListItem { ordered } => Some(ordered),
            _ => None,
        };
        if open_list != list {
            if let Some(ordered) = open_list {
                out.push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            if let Some(ordered) = list {
                out.push_str(if ordered { "<ol>" } else { "<ul>" });
            }
            open_list = list;
        }
        write_block(&mut out, index, block, editable);
    }

    if let Some(ordered) = open_list {
        out.push_str(if ordered { "</ol>" } else { "</ul>" });
    }
    out
}

fn write_block(out: &mut String, index: usize, block: &Block, editable: bool) {
    let tag = match &block.kind {
        BlockKind::Paragraph => "p".to_string(),
        BlockKind::Heading(level) => format!("h{}", level),
        BlockKind::Quote => "blockquote".to_string(),
        BlockKind::CodeBlock => "pre".to_string(),
        BlockKind::ListItem { .. } => "li".to_string(),
        BlockKind::Rule => {
            out.push_str("<hr");
            write_block_attrs(out, index, block, editable);
            out.push('>');
            return;
        }
        BlockKind::Table(table) => {
            write_table(out, index, block, table, editable);
            return;
        }
    };

    let _ = write!(out, "<{}", tag);
    write_block_attrs(out, index, block, editable);
    out.push('>');
    write_inlines(out, &block.content);
    if editable && matches!(block.content.last(), None | Some(Inline::LineBreak)) {
        out.push_str("<br>");
    }
    let _ = write!(out, "</{}>", tag);
}

fn write_block_attrs(out: &mut String, index: usize, block: &Block, editable: bool) {
    if editable {
        let _ = write!(out, " data-block=\"{}\"", index);
    }
    let mut style = String::new();
    if block.align != Align::Left {
        let _ = write!(style, "text-align:{};", block.align.css());
    }
    if block.indent > 0 {
        let _ = write!(style, "margin-left:{}em;", block.indent * INDENT_EM);
    }
    if !style.is_empty() {
        style.pop();
        let _ = write!(out, " style=\"{}\"", style);
    }
}

fn write_table(out: &mut String, index: usize, block: &Block, table: &Table, editable: bool) {
    out.push_str("<table");
    write_block_attrs(out, index, block, editable);
    if editable {
        out.push_str(" contenteditable=\"false\"");
    }
    out.push('>');

    let mut rows = table.rows.iter();
    if table.header {
        if let Some(header) = rows.next() {
            out.push_str("<thead><tr>");
            for cell in header {
                out.push_str("<th>");
                write_inlines(out, cell);
                out.push_str("</th>");
            }
            out.push_str("</tr></thead>");
        }
    }
    out.push_str("<tbody>");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str("<td>");
            write_inlines(out, cell);
            if editable && cell.is_empty() {
                out.push_str("<br>");
            }
            out.push_str("</td>");
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
}

pub(crate) fn write_inlines(out: &mut String, content: &[Inline]) {
    for inline in content {
        match inline {
            Inline::Text { text, marks } => write_text(out, text, marks),
            Inline::LineBreak => out.push_str("<br>"),
            Inline::Image { src, alt } => {
                let _ = write!(
                    out,
                    "<img src=\"{}\" alt=\"{}\">",
                    escape_attr(src),
                    escape_attr(alt)
                );
            }
        }
    }
}

fn write_text(out: &mut String, text: &str, marks: &Marks) {
    let mut closers: Vec<&str> = Vec::new();

    if let Some(href) = &marks.link {
        let _ = write!(out, "<a href=\"{}\">", escape_attr(href));
        closers.push("</a>");
    }

    let mut style = String::new();
    if let Some(size) = marks.font_size {
        let _ = write!(style, "font-size:{};", size.css());
    }
    if let Some(color) = &marks.color {
        let _ = write!(style, "color:{};", color);
    }
    if let Some(highlight) = &marks.highlight {
        let _ = write!(style, "background-color:{};", highlight);
    }
    if !style.is_empty() {
        style.pop();
        let _ = write!(out, "<span style=\"{}\">", escape_attr(&style));
        closers.push("</span>");
    }

    for (on, open, close) in [
        (marks.bold, "<strong>", "</strong>"),
        (marks.italic, "<em>", "</em>"),
        (marks.underline, "<u>", "</u>"),
        (marks.strike, "<s>", "</s>"),
        (marks.code, "<code>", "</code>"),
    ] {
        if on {
            out.push_str(open);
            closers.push(close);
        }
    }

    out.push_str(&escape_text(text));
    for close in closers.into_iter().rev() {
        out.push_str(close);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::editor::document::FontSize;
    use crate::features::editor::parse::parse_blocks;

    fn marked(text: &str, marks: Marks) -> Inline {
        Inline::styled(text, marks)
    }

    #[test]
    fn test_empty_document_is_empty_string() {
        assert_eq!(to_html(&Document::default()), "");
        assert_eq!(
            to_editable_html(&Document::default()),
            "<p data-block=\"0\"><br></p>"
        );
    }

    #[test]
    fn test_consecutive_list_items_share_wrapper() {
        let document = Document::new(vec![
            Block::with_content(BlockKind::ListItem { ordered: false }, vec![Inline::text("a")]),
            Block::with_content(BlockKind::ListItem { ordered: false }, vec![Inline::text("b")]),
            Block::with_content(BlockKind::ListItem { ordered: true }, vec![Inline::text("c")]),
            Block::with_content(BlockKind::Paragraph, vec![Inline::text("d")]),
        ]);
        assert_eq!(
            to_html(&document),
            "<ul><li>a</li><li>b</li></ul><ol><li>c</li></ol><p>d</p>"
        );
    }

    #[test]
    fn test_marks_nest_in_stable_order() {
        let marks = Marks {
            bold: true,
            italic: true,
            color: Some("#c00".into()),
            font_size: Some(FontSize::Small),
            link: Some("https://example.com/".into()),
            ..Marks::default()
        };
        let document = Document::new(vec![Block::with_content(
            BlockKind::Paragraph,
            vec![marked("x<y", marks)],
        )]);
        assert_eq!(
            to_html(&document),
            "<p><a href=\"https://example.com/\"><span style=\"font-size:0.85em;color:#c00\"><strong><em>x&lt;y</em></strong></span></a></p>"
        );
    }

    #[test]
    fn test_block_attributes() {
        let mut block = Block::with_content(BlockKind::Heading(2), vec![Inline::text("T")]);
        block.align = Align::Right;
        block.set_indent(1);
        let document = Document::new(vec![block, Block::new(BlockKind::Rule)]);
        assert_eq!(
            to_editable_html(&document),
            "<h2 data-block=\"0\" style=\"text-align:right;margin-left:2em\">T</h2><hr data-block=\"1\">"
        );
    }

    #[test]
    fn test_serialized_markup_parses_back() {
        let mut quote = Block::with_content(
            BlockKind::Quote,
            vec![
                Inline::text("said "),
                marked(
                    "this",
                    Marks {
                        underline: true,
                        highlight: Some("#ffff00".into()),
                        ..Marks::default()
                    },
                ),
            ],
        );
        quote.align = Align::Center;
        let mut table = Table::new(2, 2);
        table.rows[0][1] = vec![Inline::text("cell")];
        let original = Document::new(vec![
            quote,
            Block::new(BlockKind::Table(table)),
            Block::with_content(
                BlockKind::CodeBlock,
                vec![Inline::text("a"), Inline::LineBreak, Inline::text("b")],
            ),
            Block::paragraph(),
        ]);

        let reparsed = Document::new(parse_blocks(&to_editable_html(&original)));
        assert_eq!(reparsed, original);
    }
}
