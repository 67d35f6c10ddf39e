use super::commands::EditCommand;
use super::document::{marks_at, BlockKind, Document, Marks, Selection};
use super::history::{EditKind, History, Snapshot};
use super::links::EditorError;
use super::parse::parse_blocks;
use super::sanitize::paste_blocks;
use super::serialize::{to_editable_html, to_html};
use super::stats::TextStats;

/// Everything the editor widget needs between events: the document, the
/// caret and the undo history.
#[derive(Clone, Debug)]
pub struct EditorState {
    document: Document,
    selection: Selection,
    history: History,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::from_html("", History::default())
    }
}

impl EditorState {
    pub fn from_html(html: &str, history: History) -> Self {
        Self {
            document: Document::new(parse_blocks(html)),
            selection: Selection::default(),
            history,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Clean markup for the caller.
    pub fn html(&self) -> String {
        to_html(&self.document)
    }

    /// Markup for the editable region, with block indices.
    pub fn editable_html(&self) -> String {
        to_editable_html(&self.document)
    }

    pub fn stats(&self) -> TextStats {
        TextStats::of(&self.document)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Marks under the caret, for toolbar button state.
    pub fn active_marks(&self) -> Marks {
        let start = self.selection.start();
        let offset = if self.selection.is_collapsed() {
            start.offset
        } else {
            start.offset + 1
        };
        self.document
            .blocks
            .get(start.block)
            .map(|block| marks_at(&block.content, offset))
            .unwrap_or_default()
    }

    pub fn active_block(&self) -> Option<&BlockKind> {
        self.document
            .blocks
            .get(self.selection.start().block)
            .map(|block| &block.kind)
    }

    pub fn set_selection(&mut self, selection: Selection) {
        let selection = self.document.clamp_selection(selection);
        if selection != self.selection {
            self.history.break_coalescing();
            self.selection = selection;
        }
    }

    /// Replace the whole value from outside (e.g. data loaded after mount).
    /// History restarts from the new value.
    pub fn replace_html(&mut self, html: &str) {
        self.document = Document::new(parse_blocks(html));
        self.selection = Selection::default();
        self.history = self.history.emptied();
    }

    /// Run a toolbar command. Returns whether the document changed.
    pub fn execute(&mut self, command: &EditCommand) -> Result<bool, EditorError> {
        match command {
            EditCommand::Undo => Ok(self.undo()),
            EditCommand::Redo => Ok(self.redo()),
            _ => {
                let mut document = self.document.clone();
                let selection = document.apply(command, &self.selection)?;
                let changed = document != self.document;
                if changed {
                    self.history.record(self.snapshot(), EditKind::Command);
                    self.document = document;
                }
                self.selection = selection;
                Ok(changed)
            }
        }
    }

    /// Adopt markup typed directly into the editable region.
    pub fn sync_from_markup(&mut self, html: &str, selection: Option<Selection>) -> bool {
        let document = Document::new(parse_blocks(html));
        let changed = document != self.document;
        if changed {
            self.history.record(self.snapshot(), EditKind::Typing);
            self.document = document;
        }
        match selection {
            Some(selection) => self.selection = self.document.clamp_selection(selection),
            None => self.selection = self.document.clamp_selection(self.selection),
        }
        changed
    }

    /// Insert clipboard content at the selection after sanitizing it.
    pub fn paste(&mut self, html: Option<&str>, text: &str) -> Result<bool, EditorError> {
        let blocks = paste_blocks(html, text);
        if blocks.is_empty() {
            return Ok(false);
        }
        self.execute(&EditCommand::InsertFragment(blocks))
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            document: self.document.clone(),
            selection: self.selection,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.document = snapshot.document;
        self.selection = self.document.clamp_selection(snapshot.selection);
    }

    fn undo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.undo(current) {
            Some(previous) => {
                self.restore(previous);
                true
            }
            None => false,
        }
    }

    fn redo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.redo(current) {
            Some(next) => {
                self.restore(next);
                true
            }
            None => false,
        }
    }
}
