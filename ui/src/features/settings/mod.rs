pub mod logic;
pub mod types;
pub mod upload;

pub use logic::{load_settings, save_settings, upload_asset};
pub use types::*;
pub use upload::*;
