//! Session factories: named functions that build a [`Session`].
//!
//! The CLI resolves a factory by name, calls it, and transpiles the result.
//! The built-in factories double as usage examples.

use crate::error::Result;
use crate::pattern::Pattern;
use crate::session::Session;
use crate::synth::{SuperPWM, SuperSaw, Synth};

/// A function that takes no arguments and returns a session.
pub type SessionFactory = fn() -> Result<Session>;

/// A registered factory.
#[derive(Debug, Clone, Copy)]
pub struct FactoryEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub factory: SessionFactory,
}

/// Name → factory lookup. Registration order is listing order.
#[derive(Debug, Clone, Default)]
pub struct FactoryRegistry {
    entries: Vec<FactoryEntry>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in example sessions.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            "basic",
            "supersaw and superpwm layered at setcps \"0.6\"",
            basic_session,
        );
        registry.register("bpm", "layered synths at 140 BPM", bpm_session);
        registry.register("config", "two synth streams at 120 BPM", config_session);
        registry.register("cps", "default supersaw at 0.5 cps", cps_session);
        registry
    }

    /// Register `factory` under `name`, replacing any factory with that name.
    pub fn register(
        &mut self,
        name: &'static str,
        description: &'static str,
        factory: SessionFactory,
    ) {
        let entry = FactoryEntry {
            name,
            description,
            factory,
        };
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn resolve(&self, name: &str) -> Option<SessionFactory> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.factory)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }

    pub fn entries(&self) -> &[FactoryEntry] {
        &self.entries
    }
}

fn layered_synths() -> Result<Pattern> {
    let supersaw = SuperSaw::with_overrides([("cutoff", 1200.0), ("detune", 0.4)])?.to_pattern();
    let pwm = SuperPWM::with_overrides([("pwidth", 0.7)])?
        .to_pattern()
        .fast(2.0)?;
    Pattern::stack([supersaw, pwm])
}

/// Two synth patterns layered on `d1`, with `setcps "0.6"`.
pub fn basic_session() -> Result<Session> {
    let mut session = Session::new();
    session.configure([("setcps", "0.6")])?;
    session.set_stream("d1", layered_synths()?)?;
    Ok(session)
}

pub fn bpm_session() -> Result<Session> {
    let mut session = Session::new();
    session.set_bpm(140.0)?;
    session.set_stream("d1", layered_synths()?)?;
    Ok(session)
}

pub fn config_session() -> Result<Session> {
    let mut session = Session::new();
    session.set_bpm(120.0)?;
    session.set_stream("d1", SuperSaw::default().cutoff(1500.0)?.to_pattern())?;
    session.set_stream("d2", SuperPWM::default().pwidth(0.6)?.to_pattern())?;
    Ok(session)
}

pub fn cps_session() -> Result<Session> {
    let mut session = Session::new();
    session.set_cps(0.5)?;
    session.set_stream("d1", SuperSaw::default().to_pattern())?;
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> Result<Session> {
        Ok(Session::new())
    }

    #[test]
    fn builtin_factories_all_build() {
        let registry = FactoryRegistry::builtin();
        assert_eq!(registry.names(), vec!["basic", "bpm", "config", "cps"]);
        for entry in registry.entries() {
            let session = (entry.factory)().unwrap();
            assert!(!session.streams().is_empty(), "{} has no streams", entry.name);
        }
    }

    #[test]
    fn resolve_unknown_is_none() {
        assert!(FactoryRegistry::builtin().resolve("missing").is_none());
    }

    #[test]
    fn register_replaces_by_name() {
        let mut registry = FactoryRegistry::builtin();
        registry.register("basic", "empty", empty);
        assert_eq!(registry.names().len(), 4);
        let session = (registry.resolve("basic").unwrap())().unwrap();
        assert!(session.is_empty());
    }

    #[test]
    fn config_session_streams() {
        let session = config_session().unwrap();
        assert_eq!(
            session.stream("d1").unwrap().expression(),
            "s \"supersaw\" # cutoff 1500"
        );
        assert_eq!(
            session.stream("d2").unwrap().expression(),
            "s \"superpwm\" # pwidth 0.6"
        );
    }
}
