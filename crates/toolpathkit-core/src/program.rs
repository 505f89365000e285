//! Motion instruction model and text serialization
//!
//! Generators build a list of [`MotionInstruction`]s and serialize them with a
//! fixed number of decimals. The fixed-width formatting makes output
//! byte-for-byte reproducible, so tests compare exact strings.

use serde::{Deserialize, Serialize};

/// Command word for rapid (non-cutting) positioning.
pub const RAPID_WORD: &str = "G0";
/// Command word for feed-rate linear moves.
pub const LINEAR_WORD: &str = "G1";
/// Footer placeholder replaced with the formatted safe-Z value.
pub const SAFE_Z_PLACEHOLDER: &str = "{safeZ}";

/// One line of a generated motion program.
///
/// Unset coordinates mean "unchanged from the last commanded position".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MotionInstruction {
    /// `G0` repositioning move.
    Rapid {
        x: Option<f64>,
        y: Option<f64>,
        z: Option<f64>,
    },
    /// `G1` feed move, optionally carrying a feed rate and laser power.
    Linear {
        x: Option<f64>,
        y: Option<f64>,
        z: Option<f64>,
        feed: Option<f64>,
        power: Option<i64>,
    },
    /// Header/footer text copied through verbatim.
    Raw(String),
}

impl MotionInstruction {
    /// Rapid move with every axis given.
    pub fn rapid_xyz(x: f64, y: f64, z: f64) -> Self {
        Self::Rapid {
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }

    /// Rapid move in the XY plane.
    pub fn rapid_xy(x: f64, y: f64) -> Self {
        Self::Rapid {
            x: Some(x),
            y: Some(y),
            z: None,
        }
    }

    /// Rapid move of Z only.
    pub fn rapid_z(z: f64) -> Self {
        Self::Rapid {
            x: None,
            y: None,
            z: Some(z),
        }
    }

    /// Linear move with every axis given.
    pub fn linear_xyz(x: f64, y: f64, z: f64) -> Self {
        Self::Linear {
            x: Some(x),
            y: Some(y),
            z: Some(z),
            feed: None,
            power: None,
        }
    }

    /// Linear move in the XY plane.
    pub fn linear_xy(x: f64, y: f64) -> Self {
        Self::Linear {
            x: Some(x),
            y: Some(y),
            z: None,
            feed: None,
            power: None,
        }
    }

    /// Linear move of Z only (plunge).
    pub fn linear_z(z: f64) -> Self {
        Self::Linear {
            x: None,
            y: None,
            z: Some(z),
            feed: None,
            power: None,
        }
    }

    /// Feed-rate declaration, a linear move that names no axis.
    pub fn feed_rate(feed: f64) -> Self {
        Self::Linear {
            x: None,
            y: None,
            z: None,
            feed: Some(feed),
            power: None,
        }
    }

    /// Whether this instruction is a rapid or linear move.
    pub fn is_motion(&self) -> bool {
        !matches!(self, Self::Raw(_))
    }

    /// Render as a single program line with `decimals` digits after the point.
    pub fn to_line(&self, decimals: usize) -> String {
        match self {
            Self::Raw(text) => text.clone(),
            Self::Rapid { x, y, z } => {
                let mut line = String::from(RAPID_WORD);
                push_word(&mut line, 'X', *x, decimals);
                push_word(&mut line, 'Y', *y, decimals);
                push_word(&mut line, 'Z', *z, decimals);
                line
            }
            Self::Linear {
                x,
                y,
                z,
                feed,
                power,
            } => {
                let mut line = String::from(LINEAR_WORD);
                push_word(&mut line, 'X', *x, decimals);
                push_word(&mut line, 'Y', *y, decimals);
                push_word(&mut line, 'Z', *z, decimals);
                push_word(&mut line, 'F', *feed, decimals);
                if let Some(power) = power {
                    line.push_str(&format!(" S{}", power));
                }
                line
            }
        }
    }
}

fn push_word(line: &mut String, letter: char, value: Option<f64>, decimals: usize) {
    if let Some(value) = value {
        line.push(' ');
        line.push(letter);
        line.push_str(&format_fixed(value, decimals));
    }
}

/// Format with exactly `decimals` fractional digits; never emits `-0`.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value);
    match text.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
        _ => text,
    }
}

/// Join serialized instructions with `\n`, one per line, with a trailing newline.
pub fn write_program(instructions: &[MotionInstruction], decimals: usize) -> String {
    let mut out = String::new();
    for instruction in instructions {
        out.push_str(&instruction.to_line(decimals));
        out.push('\n');
    }
    out
}

/// Expand footer templates, replacing [`SAFE_Z_PLACEHOLDER`] literally.
pub fn expand_templates(templates: &[String], safe_z: f64, decimals: usize) -> Vec<MotionInstruction> {
    let safe_z = format_fixed(safe_z, decimals);
    templates
        .iter()
        .map(|line| MotionInstruction::Raw(line.replace(SAFE_Z_PLACEHOLDER, &safe_z)))
        .collect()
}
