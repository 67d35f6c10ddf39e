//! Parse markup (live editor content, stored values, sanitized paste) into
//! blocks. Only the editor's own vocabulary survives; unknown tags are
//! unwrapped.

use super::document::{
    normalize_inlines, Align, Block, BlockKind, FontSize, Inline, Marks, Table, TableCell,
    MAX_INDENT,
};
use super::html::{tokenize, Token};
use super::links::{is_safe_href, is_safe_image_src};

/// Each level of indentation is rendered as this many `em` of left margin.
pub const INDENT_EM: u8 = 2;

struct TableBuilder {
    rows: Vec<Vec<TableCell>>,
    header: bool,
    in_cell: bool,
}

#[derive(Default)]
struct Parser {
    blocks: Vec<Block>,
    current: Option<Block>,
    marks: Vec<(String, Marks)>,
    lists: Vec<bool>,
    quote_depth: usize,
    pre_depth: usize,
    table: Option<TableBuilder>,
}

pub fn parse_blocks(html: &str) -> Vec<Block> {
    let mut parser = Parser::default();
    for token in tokenize(html) {
        parser.token(token);
    }
    parser.finish()
}

impl Parser {
    fn token(&mut self, token: Token) {
        match token {
            Token::Start {
                name,
                attrs,
                self_closing,
            } => {
                self.start(&name, &attrs);
                if self_closing {
                    self.end(&name);
                }
            }
            Token::End { name } => self.end(&name),
            Token::Text(text) => self.text(&text),
            Token::Comment | Token::Declaration => {}
        }
    }

    fn start(&mut self, name: &str, attrs: &[(String, String)]) {
        if self.table.is_some() {
            self.table_start(name, attrs);
            return;
        }

        match name {
            "p" | "div" => {
                let kind = self.context_kind();
                self.open_block(kind, attrs, false);
            }
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = name[1..].parse().unwrap_or(1);
                self.open_block(BlockKind::heading(level), attrs, true);
            }
            "li" => {
                let ordered = self.lists.last().copied().unwrap_or(false);
                self.open_block(BlockKind::ListItem { ordered }, attrs, true);
            }
            "ul" | "ol" => {
                self.flush(false);
                self.lists.push(name == "ol");
            }
            "blockquote" => {
                self.flush(false);
                self.quote_depth += 1;
                self.open_block(BlockKind::Quote, attrs, true);
            }
            "pre" => {
                self.flush(false);
                self.pre_depth += 1;
                self.open_block(BlockKind::CodeBlock, attrs, true);
            }
            "hr" => {
                self.flush(false);
                self.blocks.push(Block::new(BlockKind::Rule));
            }
            "table" => {
                self.flush(false);
                self.table = Some(TableBuilder {
                    rows: Vec::new(),
                    header: false,
                    in_cell: false,
                });
            }
            "br" => self.push_inline(Inline::LineBreak),
            "img" => self.image(attrs),
            _ => self.open_mark(name, attrs),
        }
    }

    fn end(&mut self, name: &str) {
        if self.table.is_some() {
            self.table_end(name);
            return;
        }

        match name {
            "p" | "div" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "li" => self.flush(true),
            "ul" | "ol" => {
                self.flush(false);
                self.lists.pop();
            }
            "blockquote" => {
                self.flush(true);
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            "pre" => {
                self.flush(true);
                self.pre_depth = self.pre_depth.saturating_sub(1);
            }
            _ => self.close_mark(name),
        }
    }

    fn text(&mut self, text: &str) {
        if self.pre_depth > 0 {
            let mut lines = text.split('\n').peekable();
            while let Some(line) = lines.next() {
                if !line.is_empty() {
                    self.push_inline(Inline::styled(line, self.current_marks()));
                }
                if lines.peek().is_some() {
                    self.push_inline(Inline::LineBreak);
                }
            }
            return;
        }

        let collapsed = collapse_whitespace(text);
        if collapsed.trim().is_empty() && !self.has_inline_target() {
            return;
        }
        self.push_inline(Inline::styled(collapsed, self.current_marks()));
    }

    /// Kind for a generic container given the enclosing quote / pre.
    fn context_kind(&self) -> BlockKind {
        if self.pre_depth > 0 {
            BlockKind::CodeBlock
        } else if self.quote_depth > 0 {
            BlockKind::Quote
        } else if let Some(ordered) = self.lists.last() {
            BlockKind::ListItem { ordered: *ordered }
        } else {
            BlockKind::Paragraph
        }
    }

    /// Start a block. An empty block that is still open is reused, so
    /// wrappers like `<li><p>` or `<div><p>` produce a single block.
    fn open_block(&mut self, kind: BlockKind, attrs: &[(String, String)], specific: bool) {
        let reuse = self.current.as_ref().is_some_and(Block::is_empty);
        if !reuse {
            self.flush(false);
        }

        let block = self.current.get_or_insert_with(|| Block::new(kind.clone()));
        if specific || block.kind == BlockKind::Paragraph {
            block.kind = kind;
        }
        apply_block_style(block, attrs);
    }

    /// Close the current block. Empty blocks are only kept when an explicit
    /// end tag closed them.
    fn flush(&mut self, explicit: bool) {
        if let Some(mut block) = self.current.take() {
            if matches!(block.content.last(), Some(Inline::LineBreak)) {
                block.content.pop();
            }
            block.content = normalize_inlines(block.content);
            if explicit || !block.is_empty() {
                self.blocks.push(block);
            }
        }
    }

    fn has_inline_target(&self) -> bool {
        match &self.table {
            Some(table) => table.in_cell,
            None => self.current.is_some(),
        }
    }

    fn push_inline(&mut self, inline: Inline) {
        if let Some(table) = self.table.as_mut() {
            if table.in_cell {
                if let Some(cell) = table.rows.last_mut().and_then(|row| row.last_mut()) {
                    cell.push(inline);
                }
            }
            return;
        }

        let kind = self.context_kind();
        self.current
            .get_or_insert_with(|| Block::new(kind))
            .content
            .push(inline);
    }

    fn image(&mut self, attrs: &[(String, String)]) {
        let Some(src) = Token::attr(attrs, "src").filter(|src| is_safe_image_src(src)) else {
            return;
        };
        let alt = Token::attr(attrs, "alt").unwrap_or_default();
        self.push_inline(Inline::Image {
            src: src.to_string(),
            alt: alt.to_string(),
        });
    }

    fn current_marks(&self) -> Marks {
        self.marks
            .last()
            .map(|(_, marks)| marks.clone())
            .unwrap_or_default()
    }

    fn open_mark(&mut self, name: &str, attrs: &[(String, String)]) {
        let mut marks = self.current_marks();
        match name {
            "b" | "strong" => marks.bold = true,
            "i" | "em" => marks.italic = true,
            "u" | "ins" => marks.underline = true,
            "s" | "strike" | "del" => marks.strike = true,
            "code" if self.pre_depth == 0 => marks.code = true,
            "mark" => marks.highlight = Some("#ffff00".to_string()),
            "a" => {
                marks.link = Token::attr(attrs, "href")
                    .filter(|href| is_safe_href(href))
                    .map(|href| href.trim().to_string());
            }
            "span" | "font" => {}
            _ => return,
        }

        if let Some(style) = Token::attr(attrs, "style") {
            for (property, value) in style_properties(style) {
                match property.as_str() {
                    "color" => marks.color = parse_css_color(&value).or(marks.color),
                    "background-color" | "background" => {
                        marks.highlight = parse_css_color(&value).or(marks.highlight)
                    }
                    "font-size" => marks.font_size = FontSize::from_css(&value).or(marks.font_size),
                    "font-weight" if value == "bold" || value == "700" => marks.bold = true,
                    "font-style" if value == "italic" => marks.italic = true,
                    _ => {}
                }
            }
        }
        if let Some(color) = Token::attr(attrs, "color").and_then(parse_css_color) {
            marks.color = Some(color);
        }

        self.marks.push((name.to_string(), marks));
    }

    fn close_mark(&mut self, name: &str) {
        if let Some(index) = self.marks.iter().rposition(|(open, _)| open == name) {
            self.marks.truncate(index);
        }
    }

    fn table_start(&mut self, name: &str, attrs: &[(String, String)]) {
        let marks_allowed = self.table.as_ref().is_some_and(|table| table.in_cell);
        let Some(table) = self.table.as_mut() else {
            return;
        };
        match name {
            "tr" => {
                table.rows.push(Vec::new());
                table.in_cell = false;
            }
            "td" | "th" => {
                if table.rows.is_empty() {
                    table.rows.push(Vec::new());
                }
                if name == "th" && table.rows.len() == 1 {
                    table.header = true;
                }
                if let Some(row) = table.rows.last_mut() {
                    row.push(Vec::new());
                }
                table.in_cell = true;
            }
            "br" => self.push_inline(Inline::LineBreak),
            "img" => self.image(attrs),
            _ if marks_allowed => self.open_mark(name, attrs),
            _ => {}
        }
    }

    fn table_end(&mut self, name: &str) {
        match name {
            "table" => {
                if let Some(builder) = self.table.take() {
                    self.marks.clear();
                    if let Some(table) = finish_table(builder) {
                        self.blocks.push(Block::new(BlockKind::Table(table)));
                    }
                }
            }
            "td" | "th" => {
                if let Some(table) = self.table.as_mut() {
                    table.in_cell = false;
                }
                self.marks.clear();
            }
            _ => self.close_mark(name),
        }
    }

    fn finish(mut self) -> Vec<Block> {
        if let Some(builder) = self.table.take() {
            if let Some(table) = finish_table(builder) {
                self.blocks.push(Block::new(BlockKind::Table(table)));
            }
        }
        self.flush(false);
        self.blocks
    }
}

fn finish_table(builder: TableBuilder) -> Option<Table> {
    let mut rows: Vec<Vec<TableCell>> = builder
        .rows
        .into_iter()
        .filter(|row| !row.is_empty())
        .map(|row| {
            row.into_iter()
                .map(|mut cell| {
                    if matches!(cell.last(), Some(Inline::LineBreak)) {
                        cell.pop();
                    }
                    normalize_inlines(cell)
                })
                .collect()
        })
        .collect();
    let cols = rows.iter().map(Vec::len).max()?;
    for row in rows.iter_mut() {
        row.resize(cols, Vec::new());
    }
    Some(Table {
        rows,
        header: builder.header,
    })
}

fn apply_block_style(block: &mut Block, attrs: &[(String, String)]) {
    if let Some(align) = Token::attr(attrs, "align").and_then(Align::from_css) {
        block.align = align;
    }
    let Some(style) = Token::attr(attrs, "style") else {
        return;
    };
    for (property, value) in style_properties(style) {
        match property.as_str() {
            "text-align" => {
                if let Some(align) = Align::from_css(&value) {
                    block.align = align;
                }
            }
            "margin-left" | "padding-left" => {
                if let Some(em) = value.strip_suffix("em").and_then(|n| n.trim().parse::<f32>().ok())
                {
                    let levels = (em / INDENT_EM as f32).round().clamp(0.0, MAX_INDENT as f32);
                    block.set_indent(levels as u8);
                }
            }
            _ => {}
        }
    }
}

fn style_properties(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|declaration| declaration.split_once(':'))
        .map(|(property, value)| {
            (
                property.trim().to_ascii_lowercase(),
                value.trim().to_ascii_lowercase(),
            )
        })
        .collect()
}

pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Accepts `#rgb`, `#rrggbb` and `rgb(r, g, b)`; everything else is ignored.
pub fn parse_css_color(value: &str) -> Option<String> {
    let value = value.trim().to_ascii_lowercase();
    if is_hex_color(&value) {
        return Some(value);
    }
    let inner = value.strip_prefix("rgb(")?.strip_suffix(')')?;
    let channels = inner
        .split(',')
        .map(|channel| channel.trim().parse::<u8>().ok())
        .collect::<Option<Vec<_>>>()?;
    match channels.as_slice() {
        [r, g, b] => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
        _ => None,
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        // U+00A0 is significant in contenteditable markup
        if c.is_whitespace() && c != '\u{a0}' {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold(text: &str) -> Inline {
        Inline::styled(
            text,
            Marks {
                bold: true,
                ..Marks::default()
            },
        )
    }

    #[test]
    fn test_paragraphs_and_marks() {
        let blocks = parse_blocks("<p>Hello <strong>big</strong> world</p><p></p>");
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0].content,
            vec![Inline::text("Hello "), bold("big"), Inline::text(" world")]
        );
        assert!(blocks[1].content.is_empty());
    }

    #[test]
    fn test_lists_group_items() {
        let blocks = parse_blocks("<ol><li>one</li><li><p>two</p></li></ol><ul><li>dot</li></ul>");
        let kinds: Vec<_> = blocks.iter().map(|b| b.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::ListItem { ordered: true },
                BlockKind::ListItem { ordered: true },
                BlockKind::ListItem { ordered: false },
            ]
        );
    }

    #[test]
    fn test_wrapper_divs_do_not_add_blocks() {
        let blocks = parse_blocks("<div><p>only</p></div>");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_headings_clamped_to_three_levels() {
        let blocks = parse_blocks("<h1>a</h1><h5>b</h5>");
        assert_eq!(blocks[0].kind, BlockKind::Heading(1));
        assert_eq!(blocks[1].kind, BlockKind::Heading(3));
    }

    #[test]
    fn test_block_style_round_trips_alignment_and_indent() {
        let blocks = parse_blocks(r#"<p style="text-align:center;margin-left:4em">x</p>"#);
        assert_eq!(blocks[0].align, Align::Center);
        assert_eq!(blocks[0].indent, 2);
    }

    #[test]
    fn test_span_styles_become_marks() {
        let blocks = parse_blocks(
            r#"<p><span style="color: rgb(255, 0, 0); background-color:#ff0; font-size:1.5em">hot</span></p>"#,
        );
        match &blocks[0].content[0] {
            Inline::Text { marks, .. } => {
                assert_eq!(marks.color.as_deref(), Some("#ff0000"));
                assert_eq!(marks.highlight.as_deref(), Some("#ff0"));
                assert_eq!(marks.font_size, Some(FontSize::Large));
            }
            other => panic!("unexpected inline {:?}", other),
        }
    }

    #[test]
    fn test_unsafe_link_dropped_text_kept() {
        let blocks = parse_blocks(r#"<p><a href="javascript:x()">click</a></p>"#);
        assert_eq!(blocks[0].content, vec![Inline::text("click")]);
    }

    #[test]
    fn test_placeholder_break_removed() {
        let blocks = parse_blocks("<p><br></p><p>a<br>b</p>");
        assert!(blocks[0].content.is_empty());
        assert_eq!(
            blocks[1].content,
            vec![Inline::text("a"), Inline::LineBreak, Inline::text("b")]
        );
    }

    #[test]
    fn test_pre_keeps_line_structure() {
        let blocks = parse_blocks("<pre><code>let a = 1;\nlet b = 2;</code></pre>");
        assert_eq!(blocks[0].kind, BlockKind::CodeBlock);
        assert_eq!(
            blocks[0].content,
            vec![
                Inline::text("let a = 1;"),
                Inline::LineBreak,
                Inline::text("let b = 2;")
            ]
        );
    }

    #[test]
    fn test_table_cells() {
        let blocks = parse_blocks(
            "<table><thead><tr><th>Name</th><th>Score</th></tr></thead><tbody><tr><td><b>Ann</b></td></tr></tbody></table><p>after</p>",
        );
        assert_eq!(blocks.len(), 2);
        match &blocks[0].kind {
            BlockKind::Table(table) => {
                assert!(table.header);
                assert_eq!(table.row_count(), 2);
                assert_eq!(table.col_count(), 2);
                assert_eq!(table.rows[1][0], vec![bold("Ann")]);
                assert!(table.rows[1][1].is_empty());
            }
            other => panic!("unexpected block {:?}", other),
        }
    }

    #[test]
    fn test_loose_text_becomes_paragraph() {
        let blocks = parse_blocks("just text");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
        assert!(parse_blocks("  \n ").is_empty());
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!(parse_css_color("#ABC"), Some("#abc".to_string()));
        assert_eq!(parse_css_color("red"), None);
        assert_eq!(parse_css_color("rgb(0, 128, 255)"), Some("#0080ff".to_string()));
        assert!(!is_hex_color("#12345"));
    }
}
