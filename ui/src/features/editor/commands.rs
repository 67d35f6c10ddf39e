use super::document::{
    all_marked, inline_len, map_marks, marks_at, normalize_inlines, split_inlines, Align, Block,
    BlockKind, Document, FontSize, Inline, Marks, Position, Selection, Table,
};
use super::links::{is_safe_image_src, normalize_link, EditorError};
use super::parse::is_hex_color;

pub const MAX_TABLE_SIZE: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkKind {
    Bold,
    Italic,
    Underline,
    Strike,
    Code,
}

impl MarkKind {
    fn get(&self, marks: &Marks) -> bool {
        match self {
            MarkKind::Bold => marks.bold,
            MarkKind::Italic => marks.italic,
            MarkKind::Underline => marks.underline,
            MarkKind::Strike => marks.strike,
            MarkKind::Code => marks.code,
        }
    }

    fn set(&self, marks: &mut Marks, on: bool) {
        match self {
            MarkKind::Bold => marks.bold = on,
            MarkKind::Italic => marks.italic = on,
            MarkKind::Underline => marks.underline = on,
            MarkKind::Strike => marks.strike = on,
            MarkKind::Code => marks.code = on,
        }
    }
}

/// Block styles reachable from the toolbar's block selector
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockStyle {
    Paragraph,
    Heading(u8),
    Quote,
    CodeBlock,
}

impl BlockStyle {
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockStyle::Paragraph => BlockKind::Paragraph,
            BlockStyle::Heading(level) => BlockKind::heading(*level),
            BlockStyle::Quote => BlockKind::Quote,
            BlockStyle::CodeBlock => BlockKind::CodeBlock,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum EditCommand {
    ToggleMark(MarkKind),
    SetFontSize(FontSize),
    SetColor(String),
    SetHighlight(String),
    SetBlock(BlockStyle),
    ToggleList { ordered: bool },
    SetAlign(Align),
    Indent,
    Outdent,
    InsertLink { url: String, text: String },
    InsertImage { src: String, alt: String },
    InsertTable { rows: usize, cols: usize },
    InsertRule,
    InsertText(String),
    InsertFragment(Vec<Block>),
    ClearFormatting,
    Undo,
    Redo,
}

impl EditCommand {
    /// Commands that only restyle existing content and so need a range.
    pub fn needs_range(&self) -> bool {
        matches!(
            self,
            EditCommand::ToggleMark(_)
                | EditCommand::SetFontSize(_)
                | EditCommand::SetColor(_)
                | EditCommand::SetHighlight(_)
        )
    }
}

impl Document {
    /// Apply a structural edit and return the selection afterwards. Undo and
    /// redo are handled by the history, not here.
    pub fn apply(
        &mut self,
        command: &EditCommand,
        selection: &Selection,
    ) -> Result<Selection, EditorError> {
        let selection = self.clamp_selection(*selection);

        let next = match command {
            EditCommand::ToggleMark(kind) => {
                if !selection.is_collapsed() {
                    let all_on = self.range_all(&selection, |marks| kind.get(marks));
                    if let Some(all_on) = all_on {
                        self.map_range(&selection, |marks| kind.set(marks, !all_on));
                    }
                }
                selection
            }
            EditCommand::SetFontSize(size) => {
                let size = (*size != FontSize::Normal).then_some(*size);
                self.map_range(&selection, |marks| marks.font_size = size);
                selection
            }
            EditCommand::SetColor(color) => {
                if let Some(color) = css_color_value(color) {
                    self.map_range(&selection, |marks| marks.color = color.clone());
                }
                selection
            }
            EditCommand::SetHighlight(color) => {
                if let Some(color) = css_color_value(color) {
                    self.map_range(&selection, |marks| marks.highlight = color.clone());
                }
                selection
            }
            EditCommand::SetBlock(style) => {
                let kind = style.kind();
                let all_same = self.touched(&selection).all(|block| block.kind == kind);
                let target = if all_same { BlockKind::Paragraph } else { kind };
                for block in self.touched_mut(&selection) {
                    block.kind = target.clone();
                }
                selection
            }
            EditCommand::ToggleList { ordered } => {
                let kind = BlockKind::ListItem { ordered: *ordered };
                let all_same = self.touched(&selection).all(|block| block.kind == kind);
                let target = if all_same { BlockKind::Paragraph } else { kind };
                for block in self.touched_mut(&selection) {
                    block.kind = target.clone();
                }
                selection
            }
            EditCommand::SetAlign(align) => {
                for block in self.touched_mut(&selection) {
                    block.align = *align;
                }
                selection
            }
            EditCommand::Indent => {
                for block in self.touched_mut(&selection) {
                    block.set_indent(block.indent.saturating_add(1));
                }
                selection
            }
            EditCommand::Outdent => {
                for block in self.touched_mut(&selection) {
                    block.set_indent(block.indent.saturating_sub(1));
                }
                selection
            }
            EditCommand::InsertLink { url, text } => {
                let url = normalize_link(url)?;
                if selection.is_collapsed() {
                    let label = if text.trim().is_empty() { url.as_str() } else { text.as_str() };
                    let marks = Marks {
                        link: Some(url.clone()),
                        ..marks_at(&self.blocks[selection.start().block].content, selection.start().offset)
                    };
                    let end = self.insert_inlines(selection.start(), vec![Inline::styled(label, marks)]);
                    Selection::caret(end)
                } else {
                    self.map_range(&selection, |marks| marks.link = Some(url.clone()));
                    selection
                }
            }
            EditCommand::InsertImage { src, alt } => {
                if !is_safe_image_src(src) {
                    return Err(EditorError::UnsupportedImage(alt.clone()));
                }
                let at = self.delete_range(&selection);
                let end = self.insert_inlines(
                    at,
                    vec![Inline::Image {
                        src: src.clone(),
                        alt: alt.clone(),
                    }],
                );
                Selection::caret(end)
            }
            EditCommand::InsertTable { rows, cols } => {
                let valid = 1..=MAX_TABLE_SIZE;
                if !valid.contains(rows) || !valid.contains(cols) {
                    return Err(EditorError::InvalidTableSize {
                        max: MAX_TABLE_SIZE,
                    });
                }
                let after = selection.end().block + 1;
                self.blocks.splice(
                    after..after,
                    [
                        Block::new(BlockKind::Table(Table::new(*rows, *cols))),
                        Block::paragraph(),
                    ],
                );
                Selection::caret(Position::new(after + 1, 0))
            }
            EditCommand::InsertRule => {
                let after = selection.end().block + 1;
                self.blocks.insert(after, Block::new(BlockKind::Rule));
                let next_is_text = self.blocks.get(after + 1).is_some_and(Block::is_textual);
                if !next_is_text {
                    self.blocks.insert(after + 1, Block::paragraph());
                }
                Selection::caret(Position::new(after + 1, 0))
            }
            EditCommand::InsertText(text) => {
                if text.is_empty() {
                    return Ok(selection);
                }
                let at = self.delete_range(&selection);
                let mut marks = marks_at(&self.blocks[at.block].content, at.offset);
                marks.link = None;
                let end = self.insert_inlines(at, vec![Inline::styled(text.as_str(), marks)]);
                Selection::caret(end)
            }
            EditCommand::InsertFragment(blocks) => {
                let at = self.delete_range(&selection);
                Selection::caret(self.insert_blocks(at, blocks.clone()))
            }
            EditCommand::ClearFormatting => {
                self.map_range(&selection, |marks| *marks = Marks::default());
                for block in self.touched_mut(&selection) {
                    block.kind = BlockKind::Paragraph;
                    block.align = Align::Left;
                    block.indent = 0;
                }
                selection
            }
            EditCommand::Undo | EditCommand::Redo => selection,
        };

        self.ensure_not_empty();
        Ok(self.clamp_selection(next))
    }

    /// Text-bearing blocks touched by the selection.
    fn touched<'a>(&'a self, selection: &Selection) -> impl Iterator<Item = &'a Block> {
        let (start, end) = (selection.start().block, selection.end().block);
        self.blocks
            .iter()
            .take(end + 1)
            .skip(start)
            .filter(|block| block.is_textual())
    }

    fn touched_mut<'a>(&'a mut self, selection: &Selection) -> impl Iterator<Item = &'a mut Block> {
        let (start, end) = (selection.start().block, selection.end().block);
        self.blocks
            .iter_mut()
            .take(end + 1)
            .skip(start)
            .filter(|block| block.is_textual())
    }

    /// Per-block `from..to` offsets covered by the selection.
    fn block_ranges(&self, selection: &Selection) -> Vec<(usize, usize, usize)> {
        let (start, end) = (selection.start(), selection.end());
        (start.block..=end.block)
            .filter_map(|index| {
                let block = self.blocks.get(index)?;
                if !block.is_textual() {
                    return None;
                }
                let from = if index == start.block { start.offset } else { 0 };
                let to = if index == end.block { end.offset } else { block.len() };
                (from < to).then_some((index, from, to))
            })
            .collect()
    }

    fn range_all(&self, selection: &Selection, predicate: impl Fn(&Marks) -> bool) -> Option<bool> {
        let mut result = None;
        for (index, from, to) in self.block_ranges(selection) {
            match all_marked(&self.blocks[index].content, from, to, &predicate) {
                Some(false) => return Some(false),
                Some(true) => result = Some(true),
                None => {}
            }
        }
        result
    }

    fn map_range(&mut self, selection: &Selection, mut f: impl FnMut(&mut Marks)) {
        for (index, from, to) in self.block_ranges(selection) {
            let block = &mut self.blocks[index];
            let content = std::mem::take(&mut block.content);
            block.content = map_marks(content, from, to, &mut f);
        }
    }

    /// Remove the selected content and return the collapsed position.
    pub(crate) fn delete_range(&mut self, selection: &Selection) -> Position {
        let (start, end) = (selection.start(), selection.end());
        if start == end {
            return start;
        }

        if start.block == end.block {
            let block = &mut self.blocks[start.block];
            let (head, rest) = split_inlines(std::mem::take(&mut block.content), start.offset);
            let (_, tail) = split_inlines(rest, end.offset - start.offset);
            block.content = join(head, tail);
            return start;
        }

        let tail = {
            let last = &mut self.blocks[end.block];
            split_inlines(std::mem::take(&mut last.content), end.offset).1
        };
        self.blocks.drain(start.block + 1..=end.block);

        let first = &mut self.blocks[start.block];
        if !first.is_textual() {
            *first = Block::paragraph();
        }
        let head = split_inlines(std::mem::take(&mut first.content), start.offset).0;
        first.content = join(head, tail);
        Position::new(start.block, start.offset.min(first.len()))
    }

    /// Insert inline content at a caret and return the caret after it.
    pub(crate) fn insert_inlines(&mut self, at: Position, inlines: Vec<Inline>) -> Position {
        let added = inline_len(&inlines);
        if !self.blocks[at.block].is_textual() {
            let index = at.block + 1;
            self.blocks
                .insert(index, Block::with_content(BlockKind::Paragraph, normalize_inlines(inlines)));
            return Position::new(index, added);
        }

        let block = &mut self.blocks[at.block];
        let (head, tail) = split_inlines(std::mem::take(&mut block.content), at.offset);
        let mut joined = head;
        joined.extend(inlines);
        block.content = join(joined, tail);
        Position::new(at.block, at.offset + added)
    }

    /// Insert parsed blocks at a caret. A single text block is merged into
    /// the current one; otherwise the host block is split around them.
    pub(crate) fn insert_blocks(&mut self, at: Position, mut blocks: Vec<Block>) -> Position {
        let blank = |block: &Block| block.is_textual() && block.is_empty();
        while blocks.first().is_some_and(blank) {
            blocks.remove(0);
        }
        while blocks.last().is_some_and(blank) {
            blocks.pop();
        }
        if blocks.is_empty() {
            return at;
        }
        if blocks.len() == 1 && blocks[0].is_textual() {
            let inlines = std::mem::take(&mut blocks[0].content);
            return self.insert_inlines(at, inlines);
        }

        let count = blocks.len();
        let host = &mut self.blocks[at.block];
        let mut replacement = Vec::with_capacity(count + 2);

        if host.is_textual() {
            let (head, tail) = split_inlines(std::mem::take(&mut host.content), at.offset);
            let template = Block {
                content: Vec::new(),
                ..host.clone()
            };
            let has_head = !head.is_empty();
            if has_head {
                replacement.push(Block {
                    content: head,
                    ..template.clone()
                });
            }
            let first_inserted = replacement.len();
            replacement.extend(blocks);
            let last_inserted = first_inserted + count - 1;
            let caret_offset = replacement[last_inserted].len();
            if !tail.is_empty() {
                replacement.push(Block {
                    content: tail,
                    ..template
                });
            }
            self.blocks.splice(at.block..=at.block, replacement);
            Position::new(at.block + last_inserted, caret_offset)
        } else {
            let index = at.block + 1;
            let caret_offset = blocks[count - 1].len();
            self.blocks.splice(index..index, blocks);
            Position::new(index + count - 1, caret_offset)
        }
    }
}

fn join(head: Vec<Inline>, tail: Vec<Inline>) -> Vec<Inline> {
    let mut joined = head;
    joined.extend(tail);
    normalize_inlines(joined)
}

/// `Some(None)` clears the value, `Some(Some(..))` sets it, `None` means
/// the input was not a usable colour.
fn css_color_value(value: &str) -> Option<Option<String>> {
    let value = value.trim().to_ascii_lowercase();
    if value.is_empty() || value == "transparent" || value == "none" {
        Some(None)
    } else if is_hex_color(&value) {
        Some(Some(value))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::editor::document::inline_text;

    fn doc(lines: &[&str]) -> Document {
        Document::new(
            lines
                .iter()
                .map(|line| Block::with_content(BlockKind::Paragraph, vec![Inline::text(*line)]))
                .collect(),
        )
    }

    fn range(block: usize, from: usize, to: usize) -> Selection {
        Selection::new(Position::new(block, from), Position::new(block, to))
    }

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
    fn test_toggle_mark_adds_then_removes() {
        let mut document = doc(&["hello world"]);
        let selection = range(0, 0, 5);

        document.apply(&EditCommand::ToggleMark(MarkKind::Bold), &selection).unwrap();
        assert_eq!(document.blocks[0].content, vec![bold("hello"), Inline::text(" world")]);

        document.apply(&EditCommand::ToggleMark(MarkKind::Bold), &selection).unwrap();
        assert_eq!(document.blocks[0].content, vec![Inline::text("hello world")]);
    }

    #[test]
    fn test_partially_marked_range_becomes_fully_marked() {
        let mut document = doc(&["hello world"]);
        document
            .apply(&EditCommand::ToggleMark(MarkKind::Bold), &range(0, 0, 5))
            .unwrap();
        document
            .apply(&EditCommand::ToggleMark(MarkKind::Bold), &range(0, 0, 11))
            .unwrap();
        assert_eq!(document.blocks[0].content, vec![bold("hello world")]);
    }

    #[test]
    fn test_collapsed_toggle_is_noop() {
        let mut document = doc(&["abc"]);
        let before = document.clone();
        document
            .apply(&EditCommand::ToggleMark(MarkKind::Italic), &range(0, 1, 1))
            .unwrap();
        assert_eq!(document, before);
    }

    #[test]
    fn test_marks_span_blocks() {
        let mut document = doc(&["first", "second"]);
        let selection = Selection::new(Position::new(0, 2), Position::new(1, 3));
        document
            .apply(&EditCommand::ToggleMark(MarkKind::Underline), &selection)
            .unwrap();
        let underlined = |text: &str| {
            Inline::styled(
                text,
                Marks {
                    underline: true,
                    ..Marks::default()
                },
            )
        };
        assert_eq!(document.blocks[0].content, vec![Inline::text("fi"), underlined("rst")]);
        assert_eq!(document.blocks[1].content, vec![underlined("sec"), Inline::text("ond")]);
    }

    #[test]
    fn test_invalid_color_ignored() {
        let mut document = doc(&["abc"]);
        let before = document.clone();
        document
            .apply(&EditCommand::SetColor("red; background:url(x)".into()), &range(0, 0, 3))
            .unwrap();
        assert_eq!(document, before);

        document
            .apply(&EditCommand::SetColor("#C00".into()), &range(0, 0, 3))
            .unwrap();
        match &document.blocks[0].content[0] {
            Inline::Text { marks, .. } => assert_eq!(marks.color.as_deref(), Some("#c00")),
            other => panic!("unexpected inline {:?}", other),
        }
    }

    #[test]
    fn test_set_block_toggles_back_to_paragraph() {
        let mut document = doc(&["title"]);
        let caret = range(0, 2, 2);
        document
            .apply(&EditCommand::SetBlock(BlockStyle::Heading(2)), &caret)
            .unwrap();
        assert_eq!(document.blocks[0].kind, BlockKind::Heading(2));
        document
            .apply(&EditCommand::SetBlock(BlockStyle::Heading(2)), &caret)
            .unwrap();
        assert_eq!(document.blocks[0].kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_toggle_list_over_several_blocks() {
        let mut document = doc(&["a", "b", "c"]);
        let selection = Selection::new(Position::new(0, 0), Position::new(1, 1));
        document
            .apply(&EditCommand::ToggleList { ordered: true }, &selection)
            .unwrap();
        assert_eq!(document.blocks[0].kind, BlockKind::ListItem { ordered: true });
        assert_eq!(document.blocks[1].kind, BlockKind::ListItem { ordered: true });
        assert_eq!(document.blocks[2].kind, BlockKind::Paragraph);

        document
            .apply(&EditCommand::ToggleList { ordered: true }, &selection)
            .unwrap();
        assert_eq!(document.blocks[0].kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_indent_bounds() {
        let mut document = doc(&["a"]);
        let caret = range(0, 0, 0);
        document.apply(&EditCommand::Outdent, &caret).unwrap();
        assert_eq!(document.blocks[0].indent, 0);
        for _ in 0..10 {
            document.apply(&EditCommand::Indent, &caret).unwrap();
        }
        assert_eq!(document.blocks[0].indent, 6);
    }

    #[test]
    fn test_invalid_link_reported_not_applied() {
        let mut document = doc(&["abc"]);
        let before = document.clone();
        let result = document.apply(
            &EditCommand::InsertLink {
                url: "javascript:alert(1)".into(),
                text: String::new(),
            },
            &range(0, 0, 3),
        );
        assert!(matches!(result, Err(EditorError::InvalidLink(_))));
        assert_eq!(document, before);
    }

    #[test]
    fn test_link_at_caret_inserts_text() {
        let mut document = doc(&["see "]);
        let selection = document
            .apply(
                &EditCommand::InsertLink {
                    url: "www.example.com".into(),
                    text: String::new(),
                },
                &range(0, 4, 4),
            )
            .unwrap();
        assert_eq!(inline_text(&document.blocks[0].content), "see https://www.example.com/");
        assert_eq!(selection, Selection::caret(Position::new(0, 28)));
    }

    #[test]
    fn test_link_over_selection_marks_text() {
        let mut document = doc(&["read more"]);
        document
            .apply(
                &EditCommand::InsertLink {
                    url: "https://example.com/a".into(),
                    text: "ignored".into(),
                },
                &range(0, 5, 9),
            )
            .unwrap();
        assert_eq!(
            document.blocks[0].content[1],
            Inline::styled(
                "more",
                Marks {
                    link: Some("https://example.com/a".into()),
                    ..Marks::default()
                }
            )
        );
    }

    #[test]
    fn test_insert_table_adds_trailing_paragraph() {
        let mut document = doc(&["intro"]);
        let selection = document
            .apply(&EditCommand::InsertTable { rows: 2, cols: 3 }, &range(0, 5, 5))
            .unwrap();
        assert_eq!(document.blocks.len(), 3);
        match &document.blocks[1].kind {
            BlockKind::Table(table) => {
                assert_eq!(table.row_count(), 2);
                assert_eq!(table.col_count(), 3);
            }
            other => panic!("unexpected block {:?}", other),
        }
        assert_eq!(document.blocks[2], Block::paragraph());
        assert_eq!(selection, Selection::caret(Position::new(2, 0)));

        assert!(matches!(
            document.apply(&EditCommand::InsertTable { rows: 0, cols: 3 }, &selection),
            Err(EditorError::InvalidTableSize { .. })
        ));
        assert!(document
            .apply(&EditCommand::InsertTable { rows: 11, cols: 1 }, &selection)
            .is_err());
    }

    #[test]
    fn test_insert_text_replaces_selection() {
        let mut document = doc(&["hello world"]);
        let selection = document
            .apply(&EditCommand::InsertText("😀".into()), &range(0, 6, 11))
            .unwrap();
        assert_eq!(inline_text(&document.blocks[0].content), "hello 😀");
        assert_eq!(selection, Selection::caret(Position::new(0, 7)));
    }

    #[test]
    fn test_insert_image_rejects_scripts() {
        let mut document = doc(&["x"]);
        assert!(document
            .apply(
                &EditCommand::InsertImage {
                    src: "javascript:alert(1)".into(),
                    alt: String::new()
                },
                &range(0, 1, 1)
            )
            .is_err());
        let selection = document
            .apply(
                &EditCommand::InsertImage {
                    src: "data:image/png;base64,AA==".into(),
                    alt: "dot".into(),
                },
                &range(0, 1, 1),
            )
            .unwrap();
        assert_eq!(document.blocks[0].len(), 2);
        assert_eq!(selection.focus.offset, 2);
    }

    #[test]
    fn test_delete_across_blocks_merges() {
        let mut document = doc(&["abc", "middle", "xyz"]);
        let selection = Selection::new(Position::new(2, 1), Position::new(0, 1));
        document
            .apply(&EditCommand::InsertText("-".into()), &selection)
            .unwrap();
        assert_eq!(document.blocks.len(), 1);
        assert_eq!(inline_text(&document.blocks[0].content), "a-yz");
    }

    #[test]
    fn test_fragment_splits_host_block() {
        let mut document = doc(&["before after"]);
        let fragment = vec![
            Block::with_content(BlockKind::Heading(1), vec![Inline::text("H")]),
            Block::with_content(BlockKind::Paragraph, vec![Inline::text("body")]),
        ];
        let selection = document
            .apply(&EditCommand::InsertFragment(fragment), &range(0, 7, 7))
            .unwrap();
        let texts: Vec<String> = document.blocks.iter().map(Block::plain_text).collect();
        assert_eq!(texts, vec!["before ", "H", "body", "after"]);
        assert_eq!(selection, Selection::caret(Position::new(2, 4)));
    }

    #[test]
    fn test_single_block_fragment_merges_inline() {
        let mut document = doc(&["ab"]);
        document
            .apply(
                &EditCommand::InsertFragment(vec![Block::with_content(
                    BlockKind::Paragraph,
                    vec![bold("X")],
                )]),
                &range(0, 1, 1),
            )
            .unwrap();
        assert_eq!(
            document.blocks[0].content,
            vec![Inline::text("a"), bold("X"), Inline::text("b")]
        );
    }

    #[test]
    fn test_clear_formatting_resets_blocks_and_marks() {
        let mut document = doc(&["styled"]);
        let all = range(0, 0, 6);
        document.apply(&EditCommand::ToggleMark(MarkKind::Bold), &all).unwrap();
        document.apply(&EditCommand::SetAlign(Align::Center), &all).unwrap();
        document.apply(&EditCommand::SetBlock(BlockStyle::Quote), &all).unwrap();
        document.apply(&EditCommand::Indent, &all).unwrap();

        document.apply(&EditCommand::ClearFormatting, &all).unwrap();
        assert_eq!(document, doc(&["styled"]));
    }
}
