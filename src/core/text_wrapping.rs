//! Text wrapping for values embedded in Markdown table cells
//!
//! A table row in Markdown ends at the first raw newline, so any value that
//! spans several visual lines has to be expressed with an explicit break
//! marker instead. [`wrap_for_markdown`] splits the input on its own newlines,
//! fills each overlong line greedily at word boundaries and joins every
//! resulting line with [`MARKDOWN_LINE_BREAK`].
//!
//! Widths are display columns as reported by `unicode-width`, so wide glyphs
//! count double and combining marks count zero.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::constants::{MARKDOWN_LINE_BREAK, PLACEHOLDER};

/// Configuration for text wrapping behavior
#[derive(Debug, Clone)]
pub struct WrapConfig {
    /// Maximum width for text lines
    pub width: usize,
}

impl WrapConfig {
    pub fn new(width: usize) -> Self {
        Self { width }
    }
}

/// Greedy paragraph filler that breaks at whitespace and splits overlong words.
pub struct TextWrapper;

impl TextWrapper {
    /// Fill a single logical line into visual lines no wider than `config.width`.
    ///
    /// Lines that already fit are returned untouched. Otherwise whitespace at
    /// each break point and at the end is dropped, while whitespace inside a
    /// line and the paragraph's leading indent are kept.
    pub fn fill_line(line: &str, config: &WrapConfig) -> Vec<String> {
        if config.width == 0 || UnicodeWidthStr::width(line) <= config.width {
            return vec![line.to_string()];
        }

        let mut builder = LineBuilder::new(config.width);
        for segment in segment_line(line) {
            match segment {
                Segment::Word(word) => builder.handle_word(&word),
                Segment::Spaces(count) => builder.handle_spaces(count),
            }
        }
        builder.finalize()
    }

    /// Wrap possibly multi-line text, joining every visual line with `separator`.
    pub fn wrap_joined(text: &str, config: &WrapConfig, separator: &str) -> String {
        text.split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .map(|line| Self::fill_line(line, config).join(separator))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// Render an optional value so it can sit inside one Markdown table cell.
///
/// Absent and empty values become [`PLACEHOLDER`]. The result never contains a
/// raw newline.
pub fn wrap_for_markdown(text: Option<&str>, width: usize) -> String {
    match text {
        None | Some("") => PLACEHOLDER.to_string(),
        Some(text) => TextWrapper::wrap_joined(text, &WrapConfig::new(width), MARKDOWN_LINE_BREAK),
    }
}

#[derive(Debug)]
struct WordSegment {
    chars: Vec<(char, usize)>,
    total_width: usize,
}

#[derive(Debug)]
enum Segment {
    Word(WordSegment),
    /// A whitespace run, normalised to this many single spaces.
    Spaces(usize),
}

fn segment_line(line: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut iter = line.chars().peekable();

    while let Some(ch) = iter.next() {
        if ch.is_whitespace() {
            let mut count = 1;
            while iter.next_if(|next| next.is_whitespace()).is_some() {
                count += 1;
            }
            segments.push(Segment::Spaces(count));
            continue;
        }

        let mut chars = vec![(ch, UnicodeWidthChar::width(ch).unwrap_or(0))];
        while let Some(next) = iter.next_if(|next| !next.is_whitespace()) {
            chars.push((next, UnicodeWidthChar::width(next).unwrap_or(0)));
        }
        let total_width = chars.iter().map(|(_, w)| *w).sum();
        segments.push(Segment::Word(WordSegment { chars, total_width }));
    }

    segments
}

#[derive(Debug)]
struct LineBuilder {
    width: usize,
    lines: Vec<String>,
    current: String,
    current_col: usize,
    /// Whitespace seen since the last word; only emitted if another word
    /// lands on the same line.
    pending_spaces: usize,
}

impl LineBuilder {
    fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
            current: String::new(),
            current_col: 0,
            pending_spaces: 0,
        }
    }

    fn handle_spaces(&mut self, count: usize) {
        self.pending_spaces += count;
    }

    fn handle_word(&mut self, word: &WordSegment) {
        let paragraph_start = self.lines.is_empty() && self.current.is_empty();
        let spaces = std::mem::take(&mut self.pending_spaces);

        if word.total_width > self.width {
            // Unbreakable run: use what is left of the current line first.
            if paragraph_start || self.current_col > 0 {
                if self.current_col + spaces < self.width {
                    self.push_spaces(spaces);
                } else if self.current_col > 0 {
                    self.push_break();
                }
            }
            self.handle_long_word(word);
            return;
        }

        if self.current_col + spaces + word.total_width <= self.width {
            if paragraph_start || self.current_col > 0 {
                self.push_spaces(spaces);
            }
        } else if self.current_col > 0 {
            self.push_break();
        }

        for &(ch, width) in &word.chars {
            self.push_char(ch, width);
        }
    }

    fn handle_long_word(&mut self, word: &WordSegment) {
        for &(ch, width) in &word.chars {
            if self.current_col > 0 && self.current_col + width > self.width {
                self.push_break();
            }
            self.push_char(ch, width);
        }
    }

    fn push_spaces(&mut self, count: usize) {
        for _ in 0..count {
            self.push_char(' ', 1);
        }
    }

    fn push_char(&mut self, ch: char, width: usize) {
        self.current.push(ch);
        self.current_col += width;
    }

    fn push_break(&mut self) {
        let line = std::mem::take(&mut self.current);
        self.lines.push(line.trim_end().to_string());
        self.current_col = 0;
    }

    fn finalize(mut self) -> Vec<String> {
        if !self.current.is_empty() || self.lines.is_empty() {
            self.push_break();
        }
        self.lines
    }
}
