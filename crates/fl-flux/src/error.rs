//! Flux input errors.

use fl_core::FlError;
use std::fmt;
use thiserror::Error;

pub type FluxResult<T> = Result<T, FluxError>;

/// One rejected input, located by face index.
#[derive(Debug, Clone, PartialEq)]
pub struct InputIssue {
    pub face: usize,
    pub what: String,
}

impl fmt::Display for InputIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "face {}: {}", self.face, self.what)
    }
}

fn join_issues(issues: &[InputIssue]) -> String {
    const SHOWN: usize = 8;
    let mut text: String = issues
        .iter()
        .take(SHOWN)
        .map(|i| format!("\n  - {i}"))
        .collect();
    if issues.len() > SHOWN {
        text.push_str(&format!("\n  ... and {} more", issues.len() - SHOWN));
    }
    text
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluxError {
    #[error("Invalid flux input ({} issue(s)):{}", .issues.len(), join_issues(.issues))]
    InvalidInput { issues: Vec<InputIssue> },

    #[error("Length mismatch for {what}: expected {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },
}

impl FluxError {
    pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> FluxResult<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(FluxError::LengthMismatch {
                what,
                expected,
                actual,
            })
        }
    }
}

impl From<FluxError> for FlError {
    fn from(err: FluxError) -> Self {
        match err {
            FluxError::LengthMismatch {
                what,
                expected,
                actual,
            } => FlError::IndexOob {
                what,
                index: actual,
                len: expected,
            },
            other => FlError::InvalidArg {
                what: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_issue_lists_are_truncated() {
        let issues = (0..12)
            .map(|face| InputIssue {
                face,
                what: "temperature = -1".into(),
            })
            .collect();
        let msg = FluxError::InvalidInput { issues }.to_string();
        assert!(msg.contains("12 issue(s)"));
        assert!(msg.contains("face 7"));
        assert!(!msg.contains("face 8:"));
        assert!(msg.contains("and 4 more"));
    }

    #[test]
    fn length_mismatch_to_fl_error() {
        let err: FlError = FluxError::LengthMismatch {
            what: "flux output",
            expected: 7,
            actual: 5,
        }
        .into();
        assert!(matches!(err, FlError::IndexOob { len: 7, .. }));
    }
}
