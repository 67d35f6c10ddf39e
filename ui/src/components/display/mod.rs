pub mod flash_message;
pub mod loading_indicator;

pub use flash_message::*;
pub use loading_indicator::*;
