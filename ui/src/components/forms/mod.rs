pub mod image_upload_field;
pub mod login_form;
pub mod register_form;
pub mod settings_form;

pub use image_upload_field::*;
pub use login_form::*;
pub use register_form::*;
pub use settings_form::*;
