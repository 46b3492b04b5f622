//! knodel: compose TidalCycles patterns and synth controls in Rust, then
//! transpile them to Tidal source.

pub mod error;
pub mod factory;
pub mod output;
pub mod pattern;
pub mod session;
pub mod synth;
pub mod transpile;

pub use error::{Error, ErrorKind, Result};
pub use pattern::{Control, Literal, Pattern};
pub use session::Session;
pub use synth::{SuperPWM, SuperSaw, Synth};
pub use transpile::{Transpiler, TranspilerConfig};
