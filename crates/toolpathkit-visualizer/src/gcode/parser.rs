//! Motion program tokenizer and parser
//!
//! A line is an optional `N` block number, a command word (letter plus
//! unsigned number, e.g. `G1`, `M30`, `G61.1`), then parameter words
//! (letter plus signed decimal). Words may be run together (`G1X10Y5`).
//! Comments in `(...)` or after `;` are stripped before tokenizing.

use crate::gcode::command::{CommandKind, MotionEvent};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use toolpathkit_core::{Result, ToolpathError};
use tracing::debug;

const COMMAND_LETTERS: [char; 3] = ['G', 'M', 'T'];

/// A single letter/number word as written in the program.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Word {
    /// Upper-cased letter
    pub letter: char,
    /// Number text as written
    pub number: String,
    pub value: f64,
}

impl Word {
    /// Canonical text: upper-case letter followed by the original number.
    pub fn text(&self) -> String {
        format!("{}{}", self.letter, self.number)
    }

    fn is_unsigned(&self) -> bool {
        !self.number.starts_with(['+', '-'])
    }
}

/// Words of one line, split into block number, command, and parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct LineTokens {
    pub block: Option<Word>,
    pub command: Option<Word>,
    pub params: Vec<Word>,
    pub comment: Option<String>,
}

impl LineTokens {
    /// Normalized command code: `G01` becomes `G1`, `g61.1` becomes `G61.1`.
    pub fn code(&self) -> Option<String> {
        self.command.as_ref().map(normalize_code)
    }

    pub fn block_number(&self) -> Option<u32> {
        self.block.as_ref().and_then(|w| w.number.parse().ok())
    }
}

fn word_regex() -> &'static Regex {
    static WORD_REGEX: OnceLock<Regex> = OnceLock::new();
    WORD_REGEX.get_or_init(|| {
        Regex::new(r"([A-Za-z])\s*([+-]?(?:\d+\.?\d*|\.\d+))").expect("invalid regex pattern")
    })
}

fn normalize_code(word: &Word) -> String {
    let (int_part, frac_part) = match word.number.split_once('.') {
        Some((i, f)) => (i, f),
        None => (word.number.as_str(), ""),
    };
    let int_part = match int_part.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };
    if frac_part.is_empty() {
        format!("{}{}", word.letter, int_part)
    } else {
        format!("{}{}.{}", word.letter, int_part, frac_part)
    }
}

/// Split a line into its code part and its comment text.
///
/// Parenthesized comments may appear anywhere; an unclosed `(` and a `;`
/// both run to the end of the line.
pub(crate) fn split_comment(line: &str) -> (String, Option<String>) {
    let mut code = String::with_capacity(line.len());
    let mut comments: Vec<&str> = Vec::new();
    let mut rest = line;

    while let Some(idx) = rest.find(['(', ';']) {
        code.push_str(&rest[..idx]);
        let tail = &rest[idx..];
        if tail.starts_with(';') {
            comments.push(tail.trim_end());
            rest = "";
            break;
        }
        match tail.find(')') {
            Some(end) => {
                comments.push(&tail[..=end]);
                rest = &tail[end + 1..];
            }
            None => {
                comments.push(tail.trim_end());
                rest = "";
            }
        }
    }
    code.push_str(rest);

    let comment = (!comments.is_empty()).then(|| comments.join(" "));
    (code, comment)
}

/// Tokenize one line.
///
/// Text that does not start with a word yields no words at all. Once a word
/// has been read, any leftover text that is not a word is a `MalformedLine`.
pub(crate) fn tokenize_line(line_number: usize, line: &str) -> Result<LineTokens> {
    let (code, comment) = split_comment(line);
    let mut words = Vec::new();
    let mut pos = 0;

    for caps in word_regex().captures_iter(&code) {
        let (Some(whole), Some(letter), Some(number)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        if !code[pos..whole.start()].trim().is_empty() {
            break;
        }
        let value = number.as_str().parse::<f64>().map_err(|e| {
            ToolpathError::malformed(line_number, format!("bad number '{}': {}", number.as_str(), e))
        })?;
        words.push(Word {
            letter: letter.as_str().chars().next().unwrap_or_default().to_ascii_uppercase(),
            number: number.as_str().to_string(),
            value,
        });
        pos = whole.end();
    }

    let leftover = code[pos..].trim();
    if !leftover.is_empty() {
        if words.is_empty() {
            // Stray text, kept as an unrecognized line
            return Ok(LineTokens {
                comment,
                ..Default::default()
            });
        }
        let reason = match leftover.chars().next() {
            Some(c) if c.is_ascii_alphabetic() => {
                format!("word '{}' has no value", c.to_ascii_uppercase())
            }
            _ => format!("unexpected text '{}'", leftover),
        };
        return Err(ToolpathError::malformed(line_number, reason));
    }

    let mut tokens = LineTokens {
        comment,
        ..Default::default()
    };
    let mut iter = words.into_iter().peekable();

    if let Some(first) = iter.peek() {
        if first.letter == 'N' && first.number.bytes().all(|b| b.is_ascii_digit()) {
            tokens.block = iter.next();
        }
    }
    if let Some(next) = iter.peek() {
        if COMMAND_LETTERS.contains(&next.letter) && next.is_unsigned() {
            tokens.command = iter.next();
        }
    }
    tokens.params = iter.collect();
    Ok(tokens)
}

/// Parse one line into an event. `line_number` is 1-based.
pub fn parse_line(line_number: usize, line: &str) -> Result<MotionEvent> {
    let raw = line.strip_suffix('\r').unwrap_or(line);
    let tokens = tokenize_line(line_number, raw)?;

    let Some(code) = tokens.code() else {
        // No command word: blank, comment-only, or stray text
        return Ok(MotionEvent {
            comment: tokens.comment,
            ..MotionEvent::other(line_number, raw)
        });
    };

    let params: BTreeMap<char, f64> = tokens.params.iter().map(|w| (w.letter, w.value)).collect();

    Ok(MotionEvent {
        command: CommandKind::from_code(&code),
        block_number: tokens.block_number(),
        code: Some(code),
        params,
        comment: tokens.comment,
        raw: raw.to_string(),
        line_number,
    })
}

/// Parse a whole program, one event per line.
///
/// Fails on the first line that cannot be tokenized; no partial result is
/// returned. An empty program parses to an empty list.
pub fn parse_program(text: &str) -> Result<Vec<MotionEvent>> {
    let events = text
        .lines()
        .enumerate()
        .map(|(idx, line)| parse_line(idx + 1, line))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "Parsed {} lines, {} motion events",
        events.len(),
        events.iter().filter(|e| e.is_motion()).count()
    );
    Ok(events)
}
