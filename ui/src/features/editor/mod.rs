//! Rich-text editing on an explicit document model.
//!
//! The browser's editable region is only a view: every toolbar command is a
//! structural edit on [`Document`], and typed or pasted markup is parsed
//! back into the model before it is emitted to the caller.

pub mod commands;
pub mod document;
pub mod history;
pub mod html;
pub mod links;
pub mod parse;
pub mod sanitize;
pub mod serialize;
pub mod state;
pub mod stats;

pub use commands::{BlockStyle, EditCommand, MarkKind, MAX_TABLE_SIZE};
pub use document::{Align, Block, BlockKind, Document, FontSize, Inline, Marks, Position, Selection};
pub use history::History;
pub use links::{image_data_url, normalize_link, EditorError};
pub use sanitize::{paste_blocks, sanitize_html};
pub use serialize::{to_editable_html, to_html};
pub use state::EditorState;
pub use stats::TextStats;

/// Fixed palette offered by the emoji picker
pub const EMOJI: [&str; 24] = [
    "😀", "😂", "😊", "😍", "🤔", "😎", "😢", "😡", "👍", "👎", "👏", "🙏", "🎉", "🔥", "💯",
    "❤️", "⭐", "✅", "❌", "⚠️", "📰", "📷", "🌍", "🚀",
];

/// Swatches offered for text colour and highlight
pub const COLOR_SWATCHES: [&str; 10] = [
    "#000000", "#444444", "#888888", "#c0392b", "#e67e22", "#f1c40f", "#27ae60", "#2980b9",
    "#8e44ad", "#ffffff",
];
