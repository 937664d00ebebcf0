//! `completion-md` renders one chat-completion API response as Markdown.
//!
//! The crate is a single decode → extract → render pipeline:
//! - [`core`] decodes the JSON, checks its shape into typed structs, and
//!   holds the wrapping logic, configuration, and error type.
//! - [`api`] describes the wire shape the extraction step reads.
//! - [`ui`] writes the Markdown sections and tables.
//! - [`utils`] carries label formatting and logging setup.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
