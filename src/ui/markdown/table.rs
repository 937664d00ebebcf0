use std::io::{self, Write};

/// Separator row written under every table header.
const HEADER_RULE: &str = "|----------|-------|";

/// Two-column Markdown table assembled row by row.
///
/// Callers decide which rows exist and in what order; [`MarkdownTable::render`]
/// only decides how they are drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownTable {
    label_header: String,
    value_header: String,
    rows: Vec<(String, String)>,
}

impl MarkdownTable {
    pub fn new(label_header: impl Into<String>, value_header: impl Into<String>) -> Self {
        Self {
            label_header: label_header.into(),
            value_header: value_header.into(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.rows.push((label.into(), value.into()));
    }

    pub fn rows(&self) -> &[(String, String)] {
        &self.rows
    }

    /// Value of the first row with `label`, if any.
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|(row_label, _)| row_label == label)
            .map(|(_, value)| value.as_str())
    }

    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_row(out, &self.label_header, &self.value_header)?;
        writeln!(out, "{HEADER_RULE}")?;
        for (label, value) in &self.rows {
            write_row(out, label, value)?;
        }
        Ok(())
    }

    pub fn to_markdown(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.render(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

fn write_row<W: Write>(out: &mut W, label: &str, value: &str) -> io::Result<()> {
    writeln!(out, "| {} | {} |", escape_cell(label), escape_cell(value))
}

/// A bare `|` would start a new column.
fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
}
