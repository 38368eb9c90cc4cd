//! Code Reindentation
//!
//! Reflows translated code onto one statement per line and indents it by
//! brace depth. The default `flat` mode is a plain text rewrite: braces and
//! semicolons inside string literals or comments are treated like code and
//! will throw the indentation off. The `lexical` mode skips over literals
//! and comments.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref AFTER_SEMICOLON: Regex = Regex::new(r";\s*").expect("valid regex");
    static ref AFTER_OPEN_BRACE: Regex = Regex::new(r"\{\s*").expect("valid regex");
    static ref AFTER_CLOSE_BRACE: Regex = Regex::new(r"\}\s*").expect("valid regex");
    static ref PAREN_BRACE: Regex = Regex::new(r"\)\s*\{").expect("valid regex");
    static ref BLANK_LINES: Regex = Regex::new(r"\n\s*\n").expect("valid regex");
}

pub const DEFAULT_INDENT_SIZE: usize = 4;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReindentMode {
    /// Regex reflow with a single brace counter
    #[default]
    Flat,
    /// Reflow that ignores strings, chars and comments
    Lexical,
}

#[derive(Debug, Clone, Copy)]
pub struct Reindenter {
    mode: ReindentMode,
    indent_size: usize,
}

impl Default for Reindenter {
    fn default() -> Self {
        Self {
            mode: ReindentMode::Flat,
            indent_size: DEFAULT_INDENT_SIZE,
        }
    }
}

impl Reindenter {
    pub fn new(mode: ReindentMode, indent_size: usize) -> Self {
        Self { mode, indent_size }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(config.reindent_mode, config.indent_size)
    }

    pub fn reindent(&self, code: &str) -> String {
        let lines = match self.mode {
            ReindentMode::Flat => reflow_flat(code),
            ReindentMode::Lexical => reflow_lexical(code),
        };
        self.indent(lines)
    }

    fn indent(&self, lines: Vec<Line>) -> String {
        let mut level: usize = 0;
        let mut out = Vec::with_capacity(lines.len());

        for line in lines {
            if line.verbatim {
                out.push(line.text);
                continue;
            }

            let trimmed = line.text.trim();
            if line.closes {
                level = level.saturating_sub(1);
            }
            out.push(format!(
                "{}{}",
                " ".repeat(level * self.indent_size),
                trimmed
            ));
            if line.opens {
                level += 1;
            }
        }

        out.join("\n").trim().to_string()
    }
}

/// Reindent with the default flat rules and a width of four spaces.
pub fn reindent(code: &str) -> String {
    Reindenter::default().reindent(code)
}

#[derive(Debug, Default)]
struct Line {
    text: String,
    /// Indent the following lines one level deeper
    opens: bool,
    /// Dedent before emitting this line
    closes: bool,
    /// Emit untouched (continuation of a multi-line literal)
    verbatim: bool,
}

fn reflow_flat(code: &str) -> Vec<Line> {
    let text = AFTER_SEMICOLON.replace_all(code, ";\n");
    let text = AFTER_OPEN_BRACE.replace_all(&text, "{\n");
    let text = AFTER_CLOSE_BRACE.replace_all(&text, "}\n");
    let text = PAREN_BRACE.replace_all(&text, "){\n");
    let text = BLANK_LINES.replace_all(&text, "\n");

    text.split('\n')
        .map(|raw| {
            let trimmed = raw.trim();
            Line {
                text: trimmed.to_string(),
                opens: trimmed.ends_with('{'),
                closes: trimmed == "}",
                verbatim: false,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Scan {
    Code,
    Str,
    Char,
    VerbatimStr,
    TextBlock,
    LineComment,
    BlockComment,
}

struct LexicalReflow {
    lines: Vec<Line>,
    cur: String,
    cur_verbatim: bool,
}

impl LexicalReflow {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            cur: String::new(),
            cur_verbatim: false,
        }
    }

    fn finish(&mut self, opens: bool, next_verbatim: bool) {
        self.finish_line(opens, false, next_verbatim);
    }

    /// Close the line after a structural `}`
    fn finish_block(&mut self) {
        let closes = !self.cur_verbatim && self.cur.trim() == "}";
        self.finish_line(false, closes, false);
    }

    fn finish_line(&mut self, opens: bool, closes: bool, next_verbatim: bool) {
        let text = std::mem::take(&mut self.cur);
        let keep = self.cur_verbatim || !text.trim().is_empty();
        if keep {
            self.lines.push(Line {
                text,
                opens,
                closes,
                verbatim: self.cur_verbatim,
            });
        }
        self.cur_verbatim = next_verbatim;
    }
}

fn reflow_lexical(code: &str) -> Vec<Line> {
    let chars: Vec<char> = code.chars().collect();
    let mut r = LexicalReflow::new();
    let mut state = Scan::Code;
    let mut skip_ws = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        match state {
            Scan::Code => {
                if skip_ws && c.is_whitespace() {
                    i += 1;
                    continue;
                }
                skip_ws = false;

                match c {
                    ';' => {
                        r.cur.push(c);
                        r.finish(false, false);
                        skip_ws = true;
                    }
                    '{' => {
                        if r.cur.trim_end().ends_with(')') {
                            let len = r.cur.trim_end().len();
                            r.cur.truncate(len);
                        }
                        r.cur.push(c);
                        r.finish(true, false);
                        skip_ws = true;
                    }
                    '}' => {
                        r.cur.push(c);
                        r.finish_block();
                        skip_ws = true;
                    }
                    '\n' => r.finish(false, false),
                    '"' => {
                        r.cur.push(c);
                        if r.cur.ends_with("@\"") {
                            state = Scan::VerbatimStr;
                        } else if next == Some('"') && chars.get(i + 2) == Some(&'"') {
                            r.cur.push_str("\"\"");
                            i += 2;
                            state = Scan::TextBlock;
                        } else {
                            state = Scan::Str;
                        }
                    }
                    '\'' => {
                        r.cur.push(c);
                        state = Scan::Char;
                    }
                    '/' if next == Some('/') => {
                        r.cur.push_str("//");
                        i += 1;
                        state = Scan::LineComment;
                    }
                    '/' if next == Some('*') => {
                        r.cur.push_str("/*");
                        i += 1;
                        state = Scan::BlockComment;
                    }
                    _ => r.cur.push(c),
                }
            }
            Scan::Str | Scan::Char => {
                let quote = if state == Scan::Str { '"' } else { '\'' };
                if c == '\n' {
                    // unterminated literal
                    r.finish(false, false);
                    state = Scan::Code;
                } else {
                    r.cur.push(c);
                    if c == '\\' {
                        if let Some(escaped) = next.filter(|n| *n != '\n') {
                            r.cur.push(escaped);
                            i += 1;
                        }
                    } else if c == quote {
                        state = Scan::Code;
                    }
                }
            }
            Scan::VerbatimStr => {
                if c == '\n' {
                    r.finish(false, true);
                } else if c == '"' && next == Some('"') {
                    r.cur.push_str("\"\"");
                    i += 1;
                } else {
                    r.cur.push(c);
                    if c == '"' {
                        state = Scan::Code;
                    }
                }
            }
            Scan::TextBlock => {
                if c == '\n' {
                    r.finish(false, true);
                } else if c == '"' && next == Some('"') && chars.get(i + 2) == Some(&'"') {
                    r.cur.push_str("\"\"\"");
                    i += 2;
                    state = Scan::Code;
                } else {
                    r.cur.push(c);
                    if c == '\\' {
                        if let Some(escaped) = next.filter(|n| *n != '\n') {
                            r.cur.push(escaped);
                            i += 1;
                        }
                    }
                }
            }
            Scan::LineComment => {
                if c == '\n' {
                    r.finish(false, false);
                    state = Scan::Code;
                } else {
                    r.cur.push(c);
                }
            }
            Scan::BlockComment => {
                if c == '\n' {
                    r.finish(false, false);
                } else if c == '*' && next == Some('/') {
                    r.cur.push_str("*/");
                    i += 1;
                    state = Scan::Code;
                } else {
                    r.cur.push(c);
                }
            }
        }

        i += 1;
    }

    r.finish(false, false);
    r.lines
}
