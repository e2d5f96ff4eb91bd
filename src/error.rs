use std::fmt::{self, Display};

use crate::model::InputPosition;

/// Which kind of failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The underlying JSON parse failed after all repair attempts.
    Parse,
    /// Text produced by the fix pipeline still fails to parse. The
    /// accompanying [`FixReport`](crate::FixReport) carries the partial log
    /// and the partially-repaired text.
    FixValidation,
}

#[derive(Debug, Clone)]
pub struct FormatError {
    pub kind: ErrorKind,
    pub message: String,
    pub input_position: Option<InputPosition>,
}

impl FormatError {
    pub fn parse(message: impl Into<String>, pos: Option<InputPosition>) -> Self {
        let message = message.into();
        let message = if let Some(p) = pos {
            format!("{} at idx={}, row={}, col={}", message, p.index, p.row, p.column)
        } else {
            message
        };
        Self { kind: ErrorKind::Parse, message, input_position: pos }
    }

    pub fn fix_validation(message: impl Into<String>) -> Self {
        Self { kind: ErrorKind::FixValidation, message: message.into(), input_position: None }
    }
}

impl Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FormatError {}
