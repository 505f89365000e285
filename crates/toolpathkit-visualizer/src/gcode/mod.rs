//! Motion program text handling
//!
//! This module provides:
//! - Line tokenizing and parsing into [`MotionEvent`]s
//! - The coordinate transform pass over program text
//! - Program statistics

pub mod analyzer;
pub mod command;
pub mod parser;
pub mod transform;

pub use analyzer::{analyze, ProgramStats};
pub use command::{CommandKind, MotionEvent};
pub use parser::{parse_line, parse_program};
pub use transform::{transform_program, ProgramTransformer, DEFAULT_DECIMAL_PLACES};
