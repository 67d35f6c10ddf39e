use super::document::{inline_text, Block, BlockKind, Document};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextStats {
    pub words: usize,
    pub chars: usize,
}

impl TextStats {
    pub fn of(document: &Document) -> Self {
        Self {
            words: word_count(document),
            chars: char_count(document),
        }
    }
}

pub fn word_count(document: &Document) -> usize {
    document.plain_text().split_whitespace().count()
}

/// Scalar values of the visible text; block separators and line breaks are
/// not counted.
pub fn char_count(document: &Document) -> usize {
    document
        .blocks
        .iter()
        .map(block_char_count)
        .sum()
}

fn block_char_count(block: &Block) -> usize {
    let visible = |text: String| text.chars().filter(|c| *c != '\n').count();
    match &block.kind {
        // Cells are counted one by one so the joining spaces never show up.
        BlockKind::Table(table) => table
            .rows
            .iter()
            .flatten()
            .map(|cell| visible(inline_text(cell)))
            .sum(),
        _ => visible(block.plain_text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::editor::commands::EditCommand;
    use crate::features::editor::document::{Position, Selection};
    use crate::features::editor::history::History;
    use crate::features::editor::parse::parse_blocks;
    use crate::features::editor::state::EditorState;

    #[test]
    fn test_counts_ignore_block_boundaries() {
        let document = Document::new(parse_blocks("<p>Hello  big</p><p><b>wide</b> world</p>"));
        assert_eq!(word_count(&document), 4);
        assert_eq!(char_count(&document), "Hello big".len() + "wide world".len());
    }

    #[test]
    fn test_words_split_by_line_breaks() {
        let document = Document::new(parse_blocks("<p>one<br>two</p>"));
        assert_eq!(TextStats::of(&document), TextStats { words: 2, chars: 6 });
    }

    #[test]
    fn test_unicode_counted_as_scalar_values() {
        let document = Document::from_text("año 😀");
        assert_eq!(char_count(&document), 5);
        assert_eq!(word_count(&document), 2);
    }

    #[test]
    fn test_inserting_empty_table_keeps_counts() {
        let mut state = EditorState::from_html("<p>ab</p>", History::default());
        state.set_selection(Selection::caret(Position::new(0, 2)));
        state
            .execute(&EditCommand::InsertTable { rows: 3, cols: 3 })
            .unwrap();
        assert_eq!(state.stats(), TextStats { words: 1, chars: 2 });
    }

    #[test]
    fn test_table_cells_counted_without_separators() {
        let document = Document::new(parse_blocks(
            "<table><tr><td>ab</td><td>c</td></tr><tr><td></td><td>d e</td></tr></table>",
        ));
        assert_eq!(char_count(&document), 6);
        assert_eq!(word_count(&document), 4);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(TextStats::of(&Document::default()), TextStats::default());
    }
}
