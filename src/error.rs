//! Error types shared by pattern composition, synth construction and sessions.

use thiserror::Error;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown control field or unknown synth.
    Configuration,
    /// Value outside its domain or structurally invalid input.
    Validation,
    /// Value of the wrong type where a pattern or literal was expected.
    Type,
}

/// An error raised at the call that received the offending input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("unknown control `{field}` for {synth}")]
    UnknownControl { synth: String, field: String },

    #[error("unknown synth `{0}`")]
    UnknownSynth(String),

    #[error("invalid value for `{parameter}`: {value} ({constraint})")]
    Invalid {
        parameter: String,
        value: String,
        constraint: String,
    },

    #[error("type mismatch for `{parameter}`: expected {expected}, found {found}")]
    TypeMismatch {
        parameter: String,
        expected: String,
        found: String,
    },
}

impl Error {
    pub fn unknown_control(synth: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownControl {
            synth: synth.into(),
            field: field.into(),
        }
    }

    pub fn invalid(
        parameter: impl Into<String>,
        value: impl ToString,
        constraint: impl Into<String>,
    ) -> Self {
        Self::Invalid {
            parameter: parameter.into(),
            value: value.to_string(),
            constraint: constraint.into(),
        }
    }

    pub fn type_mismatch(
        parameter: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            parameter: parameter.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownControl { .. } | Self::UnknownSynth(_) => ErrorKind::Configuration,
            Self::Invalid { .. } => ErrorKind::Validation,
            Self::TypeMismatch { .. } => ErrorKind::Type,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_variants() {
        assert_eq!(
            Error::unknown_control("SuperSaw", "foo").kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            Error::UnknownSynth("nope".into()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            Error::invalid("factor", 0, "must be > 0").kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            Error::type_mismatch("cutoff", "number", "string").kind(),
            ErrorKind::Type
        );
    }

    #[test]
    fn messages_name_the_offender() {
        let err = Error::invalid("pwidth", 1.5, "must be within [0, 1]");
        assert_eq!(
            err.to_string(),
            "invalid value for `pwidth`: 1.5 (must be within [0, 1])"
        );
        let err = Error::unknown_control("SuperSaw", "foo");
        assert_eq!(err.to_string(), "unknown control `foo` for SuperSaw");
    }
}
