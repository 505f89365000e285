//! Program-level coordinate transform pass
//!
//! Rewrites the X/Y/Z words of rapid and linear moves through
//! [`toolpathkit_core::transform`]. Every other line, and every other word on
//! a rewritten line, keeps its original text. Lines that do not tokenize are
//! passed through as well, so the pass never fails on foreign input.

use crate::gcode::command::{CommandKind, MotionEvent};
use crate::gcode::parser::tokenize_line;
use std::borrow::Cow;
use toolpathkit_core::{format_fixed, transform, Axis, Result, TransformSettings};
use tracing::{debug, trace};

/// Default digits after the decimal point for rewritten coordinates.
pub const DEFAULT_DECIMAL_PLACES: usize = 3;

/// Applies a [`TransformSettings`] to motion program text or parsed events.
#[derive(Debug, Clone)]
pub struct ProgramTransformer {
    settings: TransformSettings,
    decimal_places: usize,
}

impl ProgramTransformer {
    /// Validates `settings` once so the pass itself cannot fail.
    pub fn new(settings: TransformSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            decimal_places: DEFAULT_DECIMAL_PLACES,
        })
    }

    pub fn with_decimal_places(mut self, decimal_places: usize) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    pub fn settings(&self) -> &TransformSettings {
        &self.settings
    }

    /// Rewrite a single line. Returns the input unchanged unless it is a
    /// rapid or linear move.
    pub fn transform_line<'a>(&self, line_number: usize, line: &'a str) -> Cow<'a, str> {
        let tokens = match tokenize_line(line_number, line) {
            Ok(tokens) => tokens,
            Err(e) => {
                trace!("Passing through untokenizable line: {}", e);
                return Cow::Borrowed(line);
            }
        };

        let (Some(command), Some(code)) = (tokens.command.as_ref(), tokens.code()) else {
            return Cow::Borrowed(line);
        };
        if !CommandKind::from_code(&code).is_motion() {
            return Cow::Borrowed(line);
        }

        let mut words = Vec::with_capacity(tokens.params.len() + 2);
        if let Some(block) = &tokens.block {
            words.push(block.text());
        }
        words.push(command.text());
        for word in &tokens.params {
            match Axis::from_letter(word.letter) {
                Some(axis) => {
                    let value = transform(word.value, axis, &self.settings);
                    words.push(format!(
                        "{}{}",
                        axis.letter(),
                        format_fixed(value, self.decimal_places)
                    ));
                }
                None => words.push(word.text()),
            }
        }

        let mut out = words.join(" ");
        if let Some(comment) = &tokens.comment {
            out.push(' ');
            out.push_str(comment);
        }
        Cow::Owned(out)
    }

    /// Rewrite a whole program. Line endings, including a trailing newline
    /// and `\r\n` pairs, are preserved.
    pub fn transform_program(&self, text: &str) -> String {
        if self.settings.is_identity() {
            debug!("Identity transform, program passed through");
            return text.to_string();
        }

        let mut rewritten = 0usize;
        let mut passthrough = 0usize;

        let lines: Vec<Cow<str>> = text
            .split('\n')
            .enumerate()
            .map(|(idx, line)| {
                let (body, ending) = match line.strip_suffix('\r') {
                    Some(body) => (body, "\r"),
                    None => (line, ""),
                };
                match self.transform_line(idx + 1, body) {
                    Cow::Borrowed(_) => {
                        passthrough += 1;
                        Cow::Borrowed(line)
                    }
                    Cow::Owned(mut out) => {
                        rewritten += 1;
                        out.push_str(ending);
                        Cow::Owned(out)
                    }
                }
            })
            .collect();

        debug!(
            "Transform pass: {} lines rewritten, {} passed through",
            rewritten, passthrough
        );
        lines.join("\n")
    }

    /// Transform parsed events. Motion events get new coordinates and a
    /// rewritten `raw`; everything else is cloned as is.
    pub fn transform_events(&self, events: &[MotionEvent]) -> Vec<MotionEvent> {
        events
            .iter()
            .map(|event| {
                if !event.is_motion() {
                    return event.clone();
                }
                let mut out = event.clone();
                for axis in [Axis::X, Axis::Y, Axis::Z] {
                    if let Some(value) = out.params.get_mut(&axis.letter()) {
                        *value = transform(*value, axis, &self.settings);
                    }
                }
                out.raw = self.transform_line(event.line_number, &event.raw).into_owned();
                out
            })
            .collect()
    }
}

/// Convenience wrapper: validate `settings` and rewrite `text` with
/// `decimal_places` digits on every rewritten coordinate.
pub fn transform_program(
    text: &str,
    settings: &TransformSettings,
    decimal_places: usize,
) -> Result<String> {
    Ok(ProgramTransformer::new(settings.clone())?
        .with_decimal_places(decimal_places)
        .transform_program(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> TransformSettings {
        TransformSettings {
            origin_x: 5.0,
            reverse_x: true,
            calib_x: 0.1,
            ..Default::default()
        }
    }

    #[test]
    fn test_rewrites_motion_line() {
        let t = ProgramTransformer::new(settings()).unwrap();
        assert_eq!(t.transform_line(1, "G1 X10 Y2 F500"), "G1 X-5.500 Y2.000 F500");
    }

    #[test]
    fn test_non_motion_lines_untouched() {
        let t = ProgramTransformer::new(settings()).unwrap();
        for line in ["G21", "M3 S1000", "; X10", "G2 X10 Y0 I5 J0", "hello", "G1 X"] {
            assert!(matches!(t.transform_line(1, line), Cow::Borrowed(_)), "{}", line);
        }
    }

    #[test]
    fn test_keeps_block_number_and_comment() {
        let t = ProgramTransformer::new(TransformSettings {
            origin_z: 1.0,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            t.transform_line(1, "n10 g0 z5 (retract)"),
            "N10 G0 Z6.000 (retract)"
        );
    }

    #[test]
    fn test_program_preserves_line_endings() {
        let t = ProgramTransformer::new(settings()).unwrap();
        let out = t.transform_program("G21\r\nG0 X10\r\nM30\n");
        assert_eq!(out, "G21\r\nG0 X-5.500\r\nM30\n");
    }

    #[test]
    fn test_identity_is_passthrough() {
        let t = ProgramTransformer::new(TransformSettings::default()).unwrap();
        let text = "G0 X1.23456\nM30";
        assert_eq!(t.transform_program(text), text);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let s = TransformSettings {
            calib_y: f64::NAN,
            ..Default::default()
        };
        assert!(ProgramTransformer::new(s).is_err());
    }

    #[test]
    fn test_transform_events() {
        let events = crate::gcode::parse_program("G0 X10 Z2\nG21").unwrap();
        let t = ProgramTransformer::new(settings()).unwrap();
        let out = t.transform_events(&events);
        assert!((out[0].x().unwrap() + 5.5).abs() < 1e-9);
        assert_eq!(out[0].z(), Some(2.0));
        assert_eq!(out[0].raw, "G0 X-5.500 Z2.000");
        assert_eq!(out[1], events[1]);
    }
}
