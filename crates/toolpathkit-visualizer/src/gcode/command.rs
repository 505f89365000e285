//! Parsed motion program events

use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use toolpathkit_core::Axis;

/// Interpretation of a line's command word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    /// G0: non-cutting repositioning
    RapidMove,
    /// G1: feed-rate move
    LinearMove,
    /// M3 / M4
    SpindleOn,
    /// M5
    SpindleOff,
    /// M2 / M30
    ProgramEnd,
    /// Anything else, including blank, comment-only, and unrecognized lines
    Other,
}

impl CommandKind {
    /// Classify a normalized command code such as `G1` or `M30`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "G0" => Self::RapidMove,
            "G1" => Self::LinearMove,
            "M3" | "M4" => Self::SpindleOn,
            "M5" => Self::SpindleOff,
            "M2" | "M30" => Self::ProgramEnd,
            _ => Self::Other,
        }
    }

    pub fn is_motion(&self) -> bool {
        matches!(self, Self::RapidMove | Self::LinearMove)
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RapidMove => write!(f, "RapidMove"),
            Self::LinearMove => write!(f, "LinearMove"),
            Self::SpindleOn => write!(f, "SpindleOn"),
            Self::SpindleOff => write!(f, "SpindleOff"),
            Self::ProgramEnd => write!(f, "ProgramEnd"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// One parsed line of a motion program.
///
/// `params` holds only the words that follow the command word; an axis
/// missing from `params` means "unchanged", never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionEvent {
    pub command: CommandKind,
    /// Normalized command code (`G1`, `M30`, `G61.1`), if the line had one
    pub code: Option<String>,
    /// Parameter letter (upper case) to value
    pub params: BTreeMap<char, f64>,
    /// Leading `N` block number
    pub block_number: Option<u32>,
    /// Stripped comment text, delimiters included
    pub comment: Option<String>,
    /// Original line text
    pub raw: String,
    /// 1-based line number within the program
    pub line_number: usize,
}

impl MotionEvent {
    /// An event that carries only its original text.
    pub fn other(line_number: usize, raw: impl Into<String>) -> Self {
        Self {
            command: CommandKind::Other,
            code: None,
            params: BTreeMap::new(),
            block_number: None,
            comment: None,
            raw: raw.into(),
            line_number,
        }
    }

    pub fn is_motion(&self) -> bool {
        self.command.is_motion()
    }

    pub fn param(&self, letter: char) -> Option<f64> {
        self.params.get(&letter.to_ascii_uppercase()).copied()
    }

    pub fn axis(&self, axis: Axis) -> Option<f64> {
        self.param(axis.letter())
    }

    pub fn x(&self) -> Option<f64> {
        self.axis(Axis::X)
    }

    pub fn y(&self) -> Option<f64> {
        self.axis(Axis::Y)
    }

    pub fn z(&self) -> Option<f64> {
        self.axis(Axis::Z)
    }

    /// True when at least one of X, Y, Z is present
    pub fn has_axis_words(&self) -> bool {
        self.x().is_some() || self.y().is_some() || self.z().is_some()
    }

    /// Position after this event, holding any omitted axis at `last`.
    pub fn target_from(&self, last: DVec3) -> DVec3 {
        DVec3::new(
            self.x().unwrap_or(last.x),
            self.y().unwrap_or(last.y),
            self.z().unwrap_or(last.z),
        )
    }
}
