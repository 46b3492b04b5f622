//! Session documents: YAML files describing a session.
//!
//! ```yaml
//! bpm: 140
//! config:
//!   hush: 1
//! streams:
//!   d1: !stack
//!     - !synth { name: supersaw, controls: { cutoff: 1200, detune: 0.4 } }
//!     - !fast { factor: 2, pattern: !synth { name: superpwm, controls: { pwidth: 0.7 } } }
//!   d2: !atom "bd*2 sn"
//! ```
//!
//! Mapping order is preserved, so `config` and `streams` render in the order
//! they appear in the file.

use std::path::Path;

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use super::Session;
use crate::error::Error;
use crate::pattern::{Control, Literal, Pattern};
use crate::synth;

/// Failure to load a session document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to read session document: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid session document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Session(#[from] Error),
}

/// Top-level document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionDocument {
    #[serde(default)]
    pub bpm: Option<f64>,
    #[serde(default)]
    pub cps: Option<f64>,
    #[serde(default)]
    pub config: Mapping,
    /// Channel name → pattern node.
    #[serde(default)]
    pub streams: Mapping,
}

/// A pattern node, written with a YAML tag such as `!stack` or `!fast`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternDoc {
    Atom(Value),
    Sound(String),
    Synth {
        name: String,
        #[serde(default)]
        controls: Mapping,
    },
    Fast {
        factor: f64,
        pattern: Box<PatternDoc>,
    },
    Slow {
        factor: f64,
        pattern: Box<PatternDoc>,
    },
    Degrade {
        pattern: Box<PatternDoc>,
    },
    Stack(Vec<PatternDoc>),
    Sequence(Vec<PatternDoc>),
    Cat(Vec<PatternDoc>),
    Controls {
        pattern: Box<PatternDoc>,
        controls: Mapping,
    },
}

impl SessionDocument {
    pub fn from_yaml_str(source: &str) -> Result<Self, DocumentError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Build the session this document describes.
    pub fn into_session(self) -> Result<Session, DocumentError> {
        let mut session = Session::new();

        match (self.bpm, self.cps) {
            (Some(bpm), Some(_)) => {
                return Err(Error::invalid("bpm", bpm, "cannot be combined with cps").into())
            }
            (Some(bpm), None) => session.set_bpm(bpm)?,
            (None, Some(cps)) => session.set_cps(cps)?,
            (None, None) => {}
        }

        for (key, value) in &self.config {
            let name = key_string(key, "config")?;
            let literal = to_literal(&name, value)?;
            session.configure([(name, literal)])?;
        }

        for (key, value) in self.streams {
            let name = key_string(&key, "streams")?;
            let node: PatternDoc = serde_yaml::from_value(value)?;
            session.set_stream(name, node.to_pattern()?)?;
        }

        tracing::debug!(
            streams = session.streams().len(),
            directives = session.config().len(),
            "loaded session document"
        );
        Ok(session)
    }
}

impl PatternDoc {
    pub fn to_pattern(&self) -> Result<Pattern, Error> {
        match self {
            Self::Atom(value) => Ok(Pattern::atom(to_literal("atom", value)?)),
            Self::Sound(name) => Ok(Pattern::sound(name.as_str())),
            Self::Synth { name, controls } => {
                let overrides = controls
                    .iter()
                    .map(|(k, v)| {
                        let field = key_string(k, name)?;
                        let value = v.as_f64().ok_or_else(|| {
                            Error::type_mismatch(field.as_str(), "number", value_type(v))
                        })?;
                        Ok((field, value))
                    })
                    .collect::<Result<Vec<_>, Error>>()?;
                synth::build(name, overrides)
            }
            Self::Fast { factor, pattern } => pattern.to_pattern()?.fast(*factor),
            Self::Slow { factor, pattern } => pattern.to_pattern()?.slow(*factor),
            Self::Degrade { pattern } => Ok(pattern.to_pattern()?.degrade()),
            Self::Stack(children) => Pattern::stack(children_patterns(children)?),
            Self::Sequence(children) => Pattern::sequence(children_patterns(children)?),
            Self::Cat(children) => Pattern::cat(children_patterns(children)?),
            Self::Controls { pattern, controls } => {
                let controls = controls
                    .iter()
                    .map(|(k, v)| {
                        let name = key_string(k, "controls")?;
                        let value = to_literal(&name, v)?;
                        Ok(Control::new(name, value))
                    })
                    .collect::<Result<Vec<_>, Error>>()?;
                pattern.to_pattern()?.with_controls(controls)
            }
        }
    }
}

/// Load a session document from disk and build it.
pub fn load_session(path: &Path) -> Result<Session, DocumentError> {
    SessionDocument::load(path)?.into_session()
}

fn children_patterns(children: &[PatternDoc]) -> Result<Vec<Pattern>, Error> {
    children.iter().map(PatternDoc::to_pattern).collect()
}

fn key_string(key: &Value, context: &str) -> Result<String, Error> {
    key.as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::type_mismatch(format!("{context} key"), "string", value_type(key)))
}

fn to_literal(parameter: &str, value: &Value) -> Result<Literal, Error> {
    match value {
        Value::String(s) => Ok(Literal::Str(s.clone())),
        Value::Bool(b) => Ok(Literal::Bool(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(Literal::Integer(i)),
            None => n
                .as_f64()
                .map(Literal::Number)
                .ok_or_else(|| Error::type_mismatch(parameter, "number", "unrepresentable number")),
        },
        other => Err(Error::type_mismatch(
            parameter,
            "string, number or bool",
            value_type(other),
        )),
    }
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
