//! Editor document model: a list of blocks, each holding inline runs.
//!
//! Offsets inside a block are counted in Unicode scalar values; an inline
//! image and a line break count as one unit each. Rules and tables have
//! no addressable content and always report a length of zero.

pub const MAX_INDENT: u8 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontSize {
    Small,
    Normal,
    Large,
    Huge,
}

impl FontSize {
    pub const ALL: [FontSize; 4] = [
        FontSize::Small,
        FontSize::Normal,
        FontSize::Large,
        FontSize::Huge,
    ];

    pub fn css(&self) -> &'static str {
        match self {
            FontSize::Small => "0.85em",
            FontSize::Normal => "1em",
            FontSize::Large => "1.5em",
            FontSize::Huge => "2em",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FontSize::Small => "Small",
            FontSize::Normal => "Normal",
            FontSize::Large => "Large",
            FontSize::Huge => "Huge",
        }
    }

    pub fn from_css(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        FontSize::ALL.into_iter().find(|size| size.css() == value).or(
            match value.as_str() {
                "small" | "smaller" | "x-small" => Some(FontSize::Small),
                "large" | "larger" | "x-large" => Some(FontSize::Large),
                "xx-large" => Some(FontSize::Huge),
                _ => None,
            },
        )
    }
}

/// Formatting carried by a text run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Marks {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    pub code: bool,
    pub font_size: Option<FontSize>,
    pub color: Option<String>,
    pub highlight: Option<String>,
    pub link: Option<String>,
}

impl Marks {
    pub fn is_plain(&self) -> bool {
        *self == Marks::default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inline {
    Text { text: String, marks: Marks },
    LineBreak,
    Image { src: String, alt: String },
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text {
            text: text.into(),
            marks: Marks::default(),
        }
    }

    pub fn styled(text: impl Into<String>, marks: Marks) -> Self {
        Inline::Text {
            text: text.into(),
            marks,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Inline::Text { text, .. } => text.chars().count(),
            Inline::LineBreak | Inline::Image { .. } => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Align {
    pub fn css(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
            Align::Justify => "justify",
        }
    }

    pub fn from_css(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Some(Align::Left),
            "center" => Some(Align::Center),
            "right" | "end" => Some(Align::Right),
            "justify" => Some(Align::Justify),
            _ => None,
        }
    }
}

pub type TableCell = Vec<Inline>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Vec<TableCell>>,
    pub header: bool,
}

impl Table {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: vec![vec![Vec::new(); cols]; rows],
            header: false,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    /// Level is kept within 1..=3
    Heading(u8),
    Quote,
    CodeBlock,
    ListItem { ordered: bool },
    Rule,
    Table(Table),
}

impl BlockKind {
    pub fn heading(level: u8) -> Self {
        BlockKind::Heading(level.clamp(1, 3))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub align: Align,
    pub indent: u8,
    pub content: Vec<Inline>,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            align: Align::Left,
            indent: 0,
            content: Vec::new(),
        }
    }

    pub fn paragraph() -> Self {
        Self::new(BlockKind::Paragraph)
    }

    pub fn with_content(kind: BlockKind, content: Vec<Inline>) -> Self {
        Self {
            content,
            ..Self::new(kind)
        }
    }

    /// Rules and tables cannot hold a caret.
    pub fn is_textual(&self) -> bool {
        !matches!(self.kind, BlockKind::Rule | BlockKind::Table(_))
    }

    pub fn len(&self) -> usize {
        if self.is_textual() {
            inline_len(&self.content)
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        match &self.kind {
            BlockKind::Rule => false,
            BlockKind::Table(_) => false,
            _ => self.content.iter().all(Inline::is_empty),
        }
    }

    pub fn set_indent(&mut self, indent: u8) {
        self.indent = indent.min(MAX_INDENT);
    }

    pub fn plain_text(&self) -> String {
        match &self.kind {
            BlockKind::Rule => String::new(),
            BlockKind::Table(table) => table
                .rows
                .iter()
                .flatten()
                .map(|cell| inline_text(cell))
                .collect::<Vec<_>>()
                .join(" "),
            _ => inline_text(&self.content),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub block: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }
}

/// Anchor is where the selection started, focus where it ends; they may be
/// in either order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub focus: Position,
}

impl Selection {
    pub fn new(anchor: Position, focus: Position) -> Self {
        Self { anchor, focus }
    }

    pub fn caret(position: Position) -> Self {
        Self::new(position, position)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn start(&self) -> Position {
        self.anchor.min(self.focus)
    }

    pub fn end(&self) -> Position {
        self.anchor.max(self.focus)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            blocks: vec![Block::paragraph()],
        }
    }
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        let mut document = Self { blocks };
        document.ensure_not_empty();
        document
    }

    /// One paragraph per line.
    pub fn from_text(text: &str) -> Self {
        Self::new(text_blocks(text))
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(Block::is_empty)
            && self.blocks.iter().all(|block| block.kind == BlockKind::Paragraph)
    }

    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn end_position(&self) -> Position {
        let block = self.blocks.len().saturating_sub(1);
        Position::new(block, self.blocks.get(block).map_or(0, Block::len))
    }

    pub fn clamp(&self, position: Position) -> Position {
        match self.blocks.get(position.block) {
            Some(block) => Position::new(position.block, position.offset.min(block.len())),
            None => self.end_position(),
        }
    }

    pub fn clamp_selection(&self, selection: Selection) -> Selection {
        Selection::new(self.clamp(selection.anchor), self.clamp(selection.focus))
    }

    pub(crate) fn ensure_not_empty(&mut self) {
        if self.blocks.is_empty() {
            self.blocks.push(Block::paragraph());
        }
    }
}

pub fn text_blocks(text: &str) -> Vec<Block> {
    text.replace("\r\n", "\n")
        .split('\n')
        .map(|line| {
            let content = if line.is_empty() {
                Vec::new()
            } else {
                vec![Inline::text(line)]
            };
            Block::with_content(BlockKind::Paragraph, content)
        })
        .collect()
}

pub fn inline_len(content: &[Inline]) -> usize {
    content.iter().map(Inline::len).sum()
}

pub fn inline_text(content: &[Inline]) -> String {
    let mut out = String::new();
    for inline in content {
        match inline {
            Inline::Text { text, .. } => out.push_str(text),
            Inline::LineBreak => out.push('\n'),
            Inline::Image { .. } => {}
        }
    }
    out
}

fn byte_index(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(index, _)| index)
}

/// Split a run list at `offset`, cutting a text run in two when needed.
pub fn split_inlines(content: Vec<Inline>, offset: usize) -> (Vec<Inline>, Vec<Inline>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut position = 0;

    for inline in content {
        let len = inline.len();
        if position + len <= offset {
            left.push(inline);
        } else if position >= offset {
            right.push(inline);
        } else if let Inline::Text { text, marks } = inline {
            let cut = byte_index(&text, offset - position);
            left.push(Inline::styled(&text[..cut], marks.clone()));
            right.push(Inline::styled(&text[cut..], marks));
        }
        position += len;
    }

    (normalize_inlines(left), normalize_inlines(right))
}

/// Merge neighbouring runs with identical marks and drop empty text.
pub fn normalize_inlines(content: Vec<Inline>) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::with_capacity(content.len());
    for inline in content {
        if let Inline::Text { text, marks } = &inline {
            if text.is_empty() {
                continue;
            }
            if let Some(Inline::Text {
                text: previous,
                marks: previous_marks,
            }) = out.last_mut()
            {
                if previous_marks == marks {
                    previous.push_str(text);
                    continue;
                }
            }
        }
        out.push(inline);
    }
    out
}

/// Run `f` over the marks of every text run inside `from..to`.
pub fn map_marks(
    content: Vec<Inline>,
    from: usize,
    to: usize,
    mut f: impl FnMut(&mut Marks),
) -> Vec<Inline> {
    if from >= to {
        return content;
    }
    let (head, rest) = split_inlines(content, from);
    let (mut middle, tail) = split_inlines(rest, to - from);
    for inline in middle.iter_mut() {
        if let Inline::Text { marks, .. } = inline {
            f(marks);
        }
    }
    let mut joined = head;
    joined.extend(middle);
    joined.extend(tail);
    normalize_inlines(joined)
}

/// True when the range holds at least one character and every character
/// satisfies `predicate`.
pub fn all_marked(
    content: &[Inline],
    from: usize,
    to: usize,
    predicate: impl Fn(&Marks) -> bool,
) -> Option<bool> {
    let mut position = 0;
    let mut seen_text = false;
    for inline in content {
        let len = inline.len();
        let overlaps = position < to && position + len > from;
        if overlaps {
            if let Inline::Text { marks, .. } = inline {
                seen_text = true;
                if !predicate(marks) {
                    return Some(false);
                }
            }
        }
        position += len;
    }
    seen_text.then_some(true)
}

/// Marks of the character just before `offset`, used for inserted text.
pub fn marks_at(content: &[Inline], offset: usize) -> Marks {
    let mut position = 0;
    let mut found = Marks::default();
    for inline in content {
        let len = inline.len();
        if position >= offset {
            break;
        }
        if let Inline::Text { marks, .. } = inline {
            found = marks.clone();
        } else {
            found = Marks::default();
        }
        position += len;
    }
    found
}
