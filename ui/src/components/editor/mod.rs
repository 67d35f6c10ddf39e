pub mod bridge;
pub mod rich_text_editor;
pub mod toolbar;

pub use rich_text_editor::*;
pub use toolbar::*;
