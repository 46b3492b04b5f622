//! Session: ordered channel assignments plus global configuration directives.
//!
//! A `Session` only accumulates state; rendering is done by
//! [`Transpiler`](crate::transpile::Transpiler). It has no internal
//! synchronization: concurrent mutation must be serialized by the caller.

pub mod document;

use crate::error::{Error, Result};
use crate::pattern::{Literal, Pattern};

/// The directive written by [`Session::set_cps`] and [`Session::set_bpm`].
pub const CPS_DIRECTIVE: &str = "setcps";

/// A channel bound to a pattern, rendered as `d1 $ <pattern>`.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamAssignment {
    pub stream: String,
    pub pattern: Pattern,
}

/// Convert beats per minute to cycles per second, assuming four beats per cycle.
pub fn bpm_to_cps(bpm: f64) -> f64 {
    bpm / 60.0 / 4.0
}

/// Each statement occupies exactly one output line.
fn has_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    streams: Vec<StreamAssignment>,
    config: Vec<(String, Literal)>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a pattern to a channel such as `d1`.
    ///
    /// A new channel is appended; an existing one keeps its position and
    /// takes the new pattern.
    pub fn set_stream(&mut self, name: impl Into<String>, pattern: Pattern) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid("stream name", "\"\"", "must not be empty"));
        }
        let expression = pattern.expression();
        if has_line_break(&expression) {
            return Err(Error::invalid(
                "stream pattern",
                format!("{expression:?}"),
                "must render on a single line",
            ));
        }
        tracing::debug!(stream = %name, "set stream");
        match self.streams.iter_mut().find(|s| s.stream == name) {
            Some(existing) => existing.pattern = pattern,
            None => self.streams.push(StreamAssignment {
                stream: name,
                pattern,
            }),
        }
        Ok(())
    }

    /// Merge configuration directives such as `setcps`.
    ///
    /// New keys are appended in the order given; existing keys are
    /// overwritten in place. Validation happens before any change is made.
    pub fn configure<I, K, V>(&mut self, directives: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Literal>,
    {
        let directives: Vec<(String, Literal)> = directives
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        if directives.iter().any(|(k, _)| k.is_empty()) {
            return Err(Error::invalid(
                "directive name",
                "\"\"",
                "must not be empty",
            ));
        }
        if let Some((key, value)) = directives
            .iter()
            .find(|(_, v)| has_line_break(&v.render()))
        {
            return Err(Error::invalid(
                key.clone(),
                format!("{:?}", value.render()),
                "must render on a single line",
            ));
        }
        for (key, value) in directives {
            self.upsert_config(key, value);
        }
        Ok(())
    }

    fn upsert_config(&mut self, key: String, value: Literal) {
        tracing::debug!(directive = %key, value = %value, "configure");
        match self.config.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.config.push((key, value)),
        }
    }

    /// Set the tempo in cycles per second.
    pub fn set_cps(&mut self, cps: f64) -> Result<()> {
        if !cps.is_finite() || cps <= 0.0 {
            return Err(Error::invalid("cps", cps, "must be a positive number"));
        }
        self.upsert_config(CPS_DIRECTIVE.to_string(), Literal::Number(cps));
        Ok(())
    }

    /// Set the tempo in beats per minute (`cps = bpm / 60 / 4`).
    pub fn set_bpm(&mut self, bpm: f64) -> Result<()> {
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(Error::invalid("bpm", bpm, "must be a positive number"));
        }
        self.set_cps(bpm_to_cps(bpm))
    }

    /// The numeric value of the `setcps` directive, if one is set.
    pub fn cps(&self) -> Option<f64> {
        self.config
            .iter()
            .find(|(k, _)| k == CPS_DIRECTIVE)
            .and_then(|(_, v)| match v {
                Literal::Number(n) => Some(*n),
                Literal::Integer(i) => Some(*i as f64),
                Literal::Str(s) | Literal::Raw(s) => s.trim().parse().ok(),
                Literal::Bool(_) => None,
            })
    }

    pub fn streams(&self) -> &[StreamAssignment] {
        &self.streams
    }

    pub fn config(&self) -> &[(String, Literal)] {
        &self.config
    }

    pub fn stream(&self, name: &str) -> Option<&Pattern> {
        self.streams
            .iter()
            .find(|s| s.stream == name)
            .map(|s| &s.pattern)
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty() && self.config.is_empty()
    }
}
