pub mod form_validation;
pub mod logic;

pub use form_validation::*;
pub use logic::{login, logout, register, LoginOutcome};
