pub mod display;
pub mod editor;
pub mod forms;
pub mod input;
pub mod layout;

pub use display::*;
pub use editor::*;
pub use forms::*;
pub use input::*;
pub use layout::*;
