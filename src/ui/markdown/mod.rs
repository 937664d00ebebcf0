//! Markdown rendering of a decoded completion response.
//!
//! Output is written section by section to any [`Write`] sink:
//! the assistant's reply, a metadata table, a token-usage table and, when the
//! provider reports them, detailed token counts. The reply body is copied
//! verbatim; only metadata values go through the wrapper.

pub mod table;

use std::io::{self, Write};

use tracing::debug;

use crate::core::config::RenderConfig;
use crate::core::constants::{SECTION_SEPARATOR, TIMESTAMP_FORMAT};
use crate::core::response::{Response, TokenDetail, Usage};
use crate::core::text_wrapping::wrap_for_markdown;
use crate::utils::title_case::category_label;

pub use table::MarkdownTable;

/// Render the full document: the response sections followed by the raw input
/// echoed between separators.
pub fn render_document<W: Write>(
    out: &mut W,
    response: &Response,
    raw_input: &str,
    config: &RenderConfig,
) -> io::Result<()> {
    render_response(out, response, config)?;
    write_separator(out)?;
    writeln!(out, "{raw_input}")?;
    write_separator(out)
}

/// Render the response sections without the trailing raw-input echo.
pub fn render_response<W: Write>(
    out: &mut W,
    response: &Response,
    config: &RenderConfig,
) -> io::Result<()> {
    write_separator(out)?;
    writeln!(out, "## AI Response")?;
    writeln!(out)?;
    if let Some(choice) = &response.first_choice {
        writeln!(out, "{}", choice.content)?;
    }
    write_separator(out)?;

    write_heading(out, "Metadata")?;
    metadata_table(response, config).render(out)?;

    if let Some(usage) = &response.usage {
        write_heading(out, "Token Usage")?;
        usage_table(usage).render(out)?;

        if let Some(details) = details_table(usage) {
            write_heading(out, "Detailed Token Usage")?;
            details.render(out)?;
        }
    }

    debug!(
        wrap_width = config.wrap_width,
        has_usage = response.usage.is_some(),
        "Rendered response"
    );
    Ok(())
}

/// Rows describing the response itself, in fixed order.
pub fn metadata_table(response: &Response, config: &RenderConfig) -> MarkdownTable {
    let width = config.wrap_width;
    let mut table = MarkdownTable::new("Property", "Value");

    table.push_row("Response ID", wrap_for_markdown(response.id.as_deref(), width));
    table.push_row("Model", wrap_for_markdown(response.model.as_deref(), width));
    if let Some(created) = &response.created {
        table.push_row("Created", created.format(TIMESTAMP_FORMAT).to_string());
    }
    if let Some(choice) = &response.first_choice {
        table.push_row(
            "Finish Reason",
            wrap_for_markdown(choice.finish_reason.as_deref(), width),
        );
    }
    table.push_row(
        "System Fingerprint",
        wrap_for_markdown(response.system_fingerprint.as_deref(), width),
    );

    table
}

pub fn usage_table(usage: &Usage) -> MarkdownTable {
    let mut table = MarkdownTable::new("Category", "Count");
    table.push_row("Prompt Tokens", usage.prompt_tokens.to_string());
    table.push_row("Completion Tokens", usage.completion_tokens.to_string());
    table.push_row("Total Tokens", usage.total_tokens.to_string());
    table
}

/// Per-category counts, prompt entries first. `None` when neither mapping
/// was reported.
pub fn details_table(usage: &Usage) -> Option<MarkdownTable> {
    if !usage.has_details() {
        return None;
    }

    let mut table = MarkdownTable::new("Category", "Count");
    push_details(&mut table, "Prompt", usage.prompt_tokens_details.as_deref());
    push_details(
        &mut table,
        "Completion",
        usage.completion_tokens_details.as_deref(),
    );
    Some(table)
}

fn push_details(table: &mut MarkdownTable, prefix: &str, details: Option<&[TokenDetail]>) {
    for detail in details.unwrap_or_default() {
        table.push_row(
            category_label(prefix, &detail.category),
            detail.count.to_string(),
        );
    }
}

fn write_separator<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "\n{SECTION_SEPARATOR}\n\n")
}

fn write_heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    write!(out, "\n## {title}\n\n")
}
