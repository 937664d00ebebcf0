//! Output layer.
//!
//! [`markdown`] turns an extracted response into Markdown sections and tables.

pub mod markdown;
