//! Session document tests: YAML files produce the same source as Rust-built sessions.

use std::io::Write;

use knodel::factory::{basic_session, config_session};
use knodel::output::write_output;
use knodel::session::document::{load_session, DocumentError, SessionDocument};
use knodel::{Transpiler, TranspilerConfig};
use tempfile::NamedTempFile;

fn bare() -> Transpiler {
    Transpiler::new(TranspilerConfig::bare())
}

/// Document equivalent of the `basic` factory.
#[test]
fn document_matches_basic_factory() {
    let yaml = r#"
config:
  setcps: "0.6"
streams:
  d1: !stack
    - !synth { name: supersaw, controls: { cutoff: 1200, detune: 0.4 } }
    - !fast { factor: 2, pattern: !synth { name: superpwm, controls: { pwidth: 0.7 } } }
"#;
    let session = SessionDocument::from_yaml_str(yaml)
        .unwrap()
        .into_session()
        .unwrap();
    assert_eq!(
        bare().transpile(&session),
        bare().transpile(&basic_session().unwrap())
    );
}

/// Document equivalent of the `config` factory, loaded from disk.
#[test]
fn document_file_matches_config_factory() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "bpm: 120\nstreams:\n  d1: !synth {{ name: supersaw, controls: {{ cutoff: 1500 }} }}\n  d2: !synth {{ name: superpwm, controls: {{ pwidth: 0.6 }} }}\n"
    )
    .unwrap();

    let session = load_session(file.path()).unwrap();
    assert_eq!(
        bare().transpile(&session),
        bare().transpile(&config_session().unwrap())
    );
}

#[test]
fn transpiled_document_written_to_disk() {
    let session = SessionDocument::from_yaml_str("streams:\n  d1: !atom \"bd sn\"\n")
        .unwrap()
        .into_session()
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("set.tidal");

    write_output(&path, &Transpiler::default().transpile(&session)).unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "-- Generated by knodel\nd1 $ \"bd sn\"\n"
    );
}

#[test]
fn malformed_yaml_is_reported() {
    let result = SessionDocument::from_yaml_str("streams: [unclosed");
    assert!(matches!(result, Err(DocumentError::Yaml(_))));
}
