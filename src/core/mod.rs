pub mod config;
pub mod constants;
pub mod error;
pub mod response;
pub mod text_wrapping;
