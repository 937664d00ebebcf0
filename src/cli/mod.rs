//! Command-line interface parsing and handling
//!
//! The binary takes the raw JSON of one completion response as its only
//! argument and prints the rendered Markdown to stdout.

use std::io::{self, Write};

use clap::Parser;
use tracing::debug;

use crate::core::config::RenderConfig;
use crate::core::error::FormatError;
use crate::core::response::parse_response;
use crate::ui::markdown::render_document;
use crate::utils::logging;

#[derive(Parser, Debug)]
#[command(name = "completion-md")]
#[command(about = "Render a chat-completion API response as Markdown")]
#[command(
    long_about = "Reads the JSON body of a chat-completion API response and prints it as \
Markdown: the assistant's reply, a metadata table, token usage and, when present, \
detailed token counts. The original JSON is echoed at the end.\n\n\
Exit status:\n\
  0    Rendered successfully\n\
  1    The argument is not valid JSON\n\
  2    Invalid command-line usage\n\
  3    The JSON does not have the shape of a completion response\n\
  4    Writing to stdout failed"
)]
pub struct Args {
    /// Raw JSON text of the response to render
    pub json_text: String,
}

/// Decode, check and render `args.json_text` into `out`.
///
/// Every field is extracted before anything is written, so a decode or shape
/// error leaves `out` untouched.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<(), FormatError> {
    let response = parse_response(&args.json_text)?;
    render_document(out, &response, &args.json_text, &RenderConfig::default())?;
    out.flush()?;
    Ok(())
}

pub fn main() {
    logging::init();
    let args = Args::parse();

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    if let Err(err) = run(&args, &mut out) {
        debug!(exit_code = err.exit_code(), "Rendering aborted");
        err.print();
        std::process::exit(err.exit_code());
    }
}
