pub mod errors;
pub mod localization;
