//! Edit scripts.
//!
//! One step per line:
//!
//! ```text
//! # comments and blank lines are ignored
//! insert 5 !
//! edit 0 h
//! erase 6
//! ```
//!
//! A character argument is a single character or one of the escapes `\n`,
//! `\t`, `\s` (space) and `\\`.

use std::fmt;
use std::str::FromStr;

use crate::buffer::{BufferResult, TextBuffer};

/// Errors that can occur while parsing a script
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command {command:?}")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: expected {expected} argument(s), got {found}")]
    Arity {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid index {text:?}")]
    BadIndex { line: usize, text: String },

    #[error("line {line}: invalid character {text:?}")]
    BadChar { line: usize, text: String },
}

/// A single buffer mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Insert(usize, char),
    Edit(usize, char),
    Erase(usize),
}

impl Step {
    /// Apply this step to `buffer`.
    ///
    /// # Errors
    ///
    /// Returns the buffer's error when the step's index is out of range;
    /// the buffer is left unchanged.
    pub fn apply(self, buffer: &mut TextBuffer) -> BufferResult<()> {
        match self {
            Self::Insert(index, ch) => buffer.insert(index, ch),
            Self::Edit(index, ch) => buffer.edit(index, ch),
            Self::Erase(index) => buffer.erase(index),
        }
    }

    fn parse_line(line_no: usize, line: &str) -> Result<Self, ScriptError> {
        let mut tokens = line.split_whitespace();
        let command = tokens.next().unwrap_or_default();
        let args: Vec<&str> = tokens.collect();

        let arity = |expected: usize| {
            if args.len() == expected {
                Ok(())
            } else {
                Err(ScriptError::Arity {
                    line: line_no,
                    expected,
                    found: args.len(),
                })
            }
        };

        match command {
            "insert" => {
                arity(2)?;
                Ok(Self::Insert(
                    parse_index(line_no, args[0])?,
                    parse_char(line_no, args[1])?,
                ))
            }
            "edit" => {
                arity(2)?;
                Ok(Self::Edit(
                    parse_index(line_no, args[0])?,
                    parse_char(line_no, args[1])?,
                ))
            }
            "erase" => {
                arity(1)?;
                Ok(Self::Erase(parse_index(line_no, args[0])?))
            }
            other => Err(ScriptError::UnknownCommand {
                line: line_no,
                command: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert(index, ch) => write!(f, "insert {index} {}", escape_char(*ch)),
            Self::Edit(index, ch) => write!(f, "edit {index} {}", escape_char(*ch)),
            Self::Erase(index) => write!(f, "erase {index}"),
        }
    }
}

/// An ordered list of steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    /// The scripted edits the demo runs when no script is given.
    pub fn demo() -> Self {
        Self {
            steps: vec![Step::Insert(5, '!'), Step::Edit(0, 'h'), Step::Erase(6)],
        }
    }
}

impl FromStr for Script {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let steps = s
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
            .map(|(line_no, line)| Step::parse_line(line_no, line))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { steps })
    }
}

fn parse_index(line: usize, text: &str) -> Result<usize, ScriptError> {
    text.parse().map_err(|_| ScriptError::BadIndex {
        line,
        text: text.to_string(),
    })
}

fn parse_char(line: usize, text: &str) -> Result<char, ScriptError> {
    let parsed = match text {
        "\\n" => Some('\n'),
        "\\t" => Some('\t'),
        "\\s" => Some(' '),
        "\\\\" => Some('\\'),
        _ => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) if ch != '\\' => Some(ch),
                _ => None,
            }
        }
    };
    parsed.ok_or_else(|| ScriptError::BadChar {
        line,
        text: text.to_string(),
    })
}

/// Render a character the way script arguments spell it.
pub fn escape_char(ch: char) -> String {
    match ch {
        '\n' => "\\n".to_string(),
        '\t' => "\\t".to_string(),
        ' ' => "\\s".to_string(),
        '\\' => "\\\\".to_string(),
        other => other.to_string(),
    }
}
