//! Error handling for ToolpathKit
//!
//! Provides the error kinds shared by every layer of the toolpath engine:
//! - Settings errors (non-finite or out-of-range configuration values)
//! - Input errors (raster shapes the intensity accessor cannot read)
//! - Parse errors (motion program text that cannot be tokenized)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Settings validation error
///
/// Raised by every `validate()` on a settings record. Generation checks
/// these before emitting a single line, so a settings error never comes
/// with partial output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A floating-point setting is NaN or infinite.
    #[error("Parameter '{name}' must be finite, got {value}")]
    NonFinite {
        /// The setting name.
        name: String,
        /// The offending value.
        value: f64,
    },

    /// A setting is outside its allowed range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        /// The setting name.
        name: String,
        /// The offending value.
        value: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// A setting is invalid for some other reason.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue {
        /// The setting name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ParameterError {
    /// Reject `value` unless it is finite.
    pub fn check_finite(name: &str, value: f64) -> std::result::Result<(), ParameterError> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(ParameterError::NonFinite {
                name: name.to_string(),
                value,
            })
        }
    }

    /// Reject `value` unless it is finite and strictly positive.
    pub fn check_positive(name: &str, value: f64) -> std::result::Result<(), ParameterError> {
        Self::check_finite(name, value)?;
        if value > 0.0 {
            Ok(())
        } else {
            Err(ParameterError::OutOfRange {
                name: name.to_string(),
                value,
                min: 0.0,
                max: f64::INFINITY,
            })
        }
    }
}

/// Toolpath engine error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolpathError {
    /// Configuration value rejected before any output was produced
    #[error("Invalid settings: {0}")]
    InvalidSettings(#[from] ParameterError),

    /// An intensity field cannot be built from the supplied buffer
    #[error("Unsupported input kind: {reason}")]
    UnsupportedInputKind {
        /// Why the buffer shape was rejected.
        reason: String,
    },

    /// A program line cannot be tokenized into command/parameter words
    #[error("Malformed line {line_number}: {reason}")]
    MalformedLine {
        /// 1-based line number in the program text.
        line_number: usize,
        /// What the tokenizer choked on.
        reason: String,
    },
}

impl ToolpathError {
    /// Shorthand for an [`ToolpathError::UnsupportedInputKind`].
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::UnsupportedInputKind {
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`ToolpathError::MalformedLine`].
    pub fn malformed(line_number: usize, reason: impl Into<String>) -> Self {
        Self::MalformedLine {
            line_number,
            reason: reason.into(),
        }
    }
}

/// Result type alias for toolpath operations.
pub type Result<T> = std::result::Result<T, ToolpathError>;
