//! Mixture configuration and property errors.

use fl_core::FlError;
use std::fmt;
use thiserror::Error;

/// Result type for mixture operations.
pub type MixtureResult<T> = Result<T, MixtureError>;

/// One problem found while checking a mixture definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// Species name, or `#<index>` when the name itself is missing.
    pub species: String,
    /// Slash-separated field path, e.g. `viscosity/sutherland/refTemperature`.
    pub field: String,
    pub reason: String,
}

impl FieldError {
    pub fn new(
        species: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            species: species.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "species '{}': {}: {}", self.species, self.field, self.reason)
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("\n  - {e}"))
        .collect::<String>()
}

#[derive(Error, Debug)]
pub enum MixtureError {
    /// Every problem found in a single validation pass.
    #[error("Invalid mixture definition ({} error(s)):{}", .errors.len(), join_errors(.errors))]
    Invalid { errors: Vec<FieldError> },

    /// Property evaluated for a model tagged `none`.
    #[error("No {property} model available")]
    ModelUnavailable { property: &'static str },

    /// Error attributed to a specific species.
    #[error("Species '{species}': {source}")]
    Species {
        species: String,
        #[source]
        source: Box<MixtureError>,
    },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Non-physical value for {what}")]
    NonPhysical { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MixtureError {
    pub(crate) fn for_species(self, species: &str) -> Self {
        MixtureError::Species {
            species: species.to_string(),
            source: Box::new(self),
        }
    }

    /// Field errors carried by an `Invalid` error, empty otherwise.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            MixtureError::Invalid { errors } => errors,
            _ => &[],
        }
    }
}

impl From<MixtureError> for FlError {
    fn from(err: MixtureError) -> Self {
        match err {
            MixtureError::InvalidArg { what } => FlError::InvalidArg { what },
            other => FlError::Invariant {
                what: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_lists_every_field() {
        let err = MixtureError::Invalid {
            errors: vec![
                FieldError::new("O2", "molecularWeight", "missing"),
                FieldError::new("N2", "viscosity/constant", "must be non-negative"),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("2 error(s)"));
        assert!(msg.contains("species 'O2': molecularWeight: missing"));
        assert!(msg.contains("viscosity/constant"));
        assert_eq!(err.field_errors().len(), 2);
    }

    #[test]
    fn species_context_wraps_source() {
        let err = MixtureError::ModelUnavailable {
            property: "viscosity",
        }
        .for_species("H2");
        assert!(err.to_string().contains("'H2'"));
        assert!(err.to_string().contains("viscosity"));
    }

    #[test]
    fn error_to_fl_error() {
        let err: FlError = MixtureError::ModelUnavailable {
            property: "conductivity",
        }
        .into();
        assert!(matches!(err, FlError::Invariant { .. }));
    }
}
