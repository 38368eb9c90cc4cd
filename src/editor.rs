//! Editor Buffers
//!
//! The host editor is reduced to what a translation command needs: read the
//! selection and replace a range in one step. `TextBuffer` keeps the text in
//! memory, `FileEditor` loads it from disk (or stdin) for the CLI.

use crate::error::{TransError, TransResult};
use std::io::{Read, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Trait for editors a command can operate on
pub trait Editor: Send {
    /// Byte range of the current selection
    fn selection(&self) -> Range<usize>;

    /// Text of the current selection
    fn selected_text(&self) -> String;

    /// Replace `range` with `text` as a single edit
    fn replace_range(&mut self, range: Range<usize>, text: &str) -> TransResult<()>;

    fn selection_is_empty(&self) -> bool {
        self.selection().is_empty()
    }
}

/// In-memory text with a single selection
#[derive(Debug, Clone, PartialEq)]
pub struct TextBuffer {
    text: String,
    selection: Range<usize>,
}

impl TextBuffer {
    /// Buffer with the whole text selected
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let selection = 0..text.len();
        Self { text, selection }
    }

    /// Buffer with an explicit byte selection
    pub fn with_selection(text: impl Into<String>, selection: Range<usize>) -> TransResult<Self> {
        let mut buffer = Self::new(text);
        buffer.set_selection(selection)?;
        Ok(buffer)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_selection(&mut self, selection: Range<usize>) -> TransResult<()> {
        self.check_range(&selection)?;
        self.selection = selection;
        Ok(())
    }

    /// Select lines `first..=last` (1-based). The line break ending the last
    /// line stays outside the selection, so a replacement can never swallow it.
    pub fn select_lines(&mut self, first: usize, last: usize) -> TransResult<()> {
        if first == 0 || last < first {
            return Err(TransError::Selection(format!(
                "invalid line range {}:{}",
                first, last
            )));
        }

        let starts: Vec<usize> = std::iter::once(0)
            .chain(self.text.match_indices('\n').map(|(i, _)| i + 1))
            .filter(|&i| i < self.text.len() || i == 0)
            .collect();

        let line_count = starts.len();
        if first > line_count {
            return Err(TransError::Selection(format!(
                "line {} is past the end of the buffer ({} lines)",
                first, line_count
            )));
        }

        let start = starts[first - 1];
        let mut end = starts.get(last).copied().unwrap_or(self.text.len());
        let selected = &self.text[start..end];
        if selected.ends_with("\r\n") {
            end -= 2;
        } else if selected.ends_with('\n') {
            end -= 1;
        }
        self.set_selection(start..end)
    }

    /// Apply a selection spec parsed from the command line
    pub fn apply_spec(&mut self, spec: SelectionSpec) -> TransResult<()> {
        match spec {
            SelectionSpec::All => self.set_selection(0..self.text.len()),
            SelectionSpec::Lines(first, last) => self.select_lines(first, last),
            SelectionSpec::Bytes(start, end) => self.set_selection(start..end),
        }
    }

    fn check_range(&self, range: &Range<usize>) -> TransResult<()> {
        if range.start > range.end
            || range.end > self.text.len()
            || !self.text.is_char_boundary(range.start)
            || !self.text.is_char_boundary(range.end)
        {
            return Err(TransError::Selection(format!(
                "range {}..{} is not valid for a buffer of {} bytes",
                range.start,
                range.end,
                self.text.len()
            )));
        }
        Ok(())
    }
}

impl Editor for TextBuffer {
    fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    fn selected_text(&self) -> String {
        self.text[self.selection.clone()].to_string()
    }

    fn replace_range(&mut self, range: Range<usize>, text: &str) -> TransResult<()> {
        self.check_range(&range)?;
        debug!("✏️ Replacing bytes {}..{} with {} bytes", range.start, range.end, text.len());
        let start = range.start;
        self.text.replace_range(range, text);
        self.selection = start..start + text.len();
        Ok(())
    }
}

/// How the selection is given on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionSpec {
    #[default]
    All,
    /// 1-based inclusive line range
    Lines(usize, usize),
    /// Byte offsets, end exclusive
    Bytes(usize, usize),
}

/// Parse `A:B` into a pair of numbers
fn parse_pair(s: &str) -> Result<(usize, usize), String> {
    let (a, b) = s
        .split_once(':')
        .ok_or_else(|| format!("expected START:END, got '{}'", s))?;
    let a = a
        .trim()
        .parse()
        .map_err(|_| format!("invalid start '{}'", a))?;
    let b = b.trim().parse().map_err(|_| format!("invalid end '{}'", b))?;
    Ok((a, b))
}

impl SelectionSpec {
    pub fn lines(s: &str) -> Result<Self, String> {
        parse_pair(s).map(|(a, b)| SelectionSpec::Lines(a, b))
    }

    pub fn bytes(s: &str) -> Result<Self, String> {
        parse_pair(s).map(|(a, b)| SelectionSpec::Bytes(a, b))
    }
}

/// Where a `FileEditor` reads from and writes back to
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    pub fn from_arg(arg: &Path) -> Self {
        if arg == Path::new("-") {
            Source::Stdin
        } else {
            Source::File(arg.to_path_buf())
        }
    }
}

/// A `TextBuffer` backed by a file or stdin
#[derive(Debug)]
pub struct FileEditor {
    source: Source,
    buffer: TextBuffer,
}

impl FileEditor {
    pub fn open(source: Source) -> TransResult<Self> {
        let text = match &source {
            Source::Stdin => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                text
            }
            Source::File(path) => std::fs::read_to_string(path)?,
        };
        Ok(Self {
            source,
            buffer: TextBuffer::new(text),
        })
    }

    pub fn is_stdin(&self) -> bool {
        self.source == Source::Stdin
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    /// Write the buffer back: stdin-backed buffers go to stdout, files are
    /// replaced through a temporary sibling so readers never see half a file.
    pub fn save(&self) -> TransResult<()> {
        match &self.source {
            Source::Stdin => {
                let mut out = std::io::stdout().lock();
                out.write_all(self.buffer.text().as_bytes())?;
                out.flush()?;
            }
            Source::File(path) => {
                let tmp = path.with_extension("codetrans.tmp");
                std::fs::write(&tmp, self.buffer.text())?;
                std::fs::rename(&tmp, path)?;
                debug!("💾 Saved {:?}", path);
            }
        }
        Ok(())
    }
}

impl Editor for FileEditor {
    fn selection(&self) -> Range<usize> {
        self.buffer.selection()
    }

    fn selected_text(&self) -> String {
        self.buffer.selected_text()
    }

    fn replace_range(&mut self, range: Range<usize>, text: &str) -> TransResult<()> {
        self.buffer.replace_range(range, text)
    }
}
