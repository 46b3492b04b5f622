//! Transpiler: renders a [`Session`] as TidalCycles source.
//!
//! Output: optional header comment, one `<directive> <literal>` line per
//! config entry, then one `<channel> $ <pattern>` line per stream, each in
//! insertion order. Lines are LF-joined with a single trailing newline.

pub mod config;

pub use config::TranspilerConfig;

use crate::session::Session;

#[derive(Debug, Clone, Default)]
pub struct Transpiler {
    config: TranspilerConfig,
}

impl Transpiler {
    pub fn new(config: TranspilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranspilerConfig {
        &self.config
    }

    /// Render `session`. Pure: the same session always yields the same text.
    pub fn transpile(&self, session: &Session) -> String {
        let mut lines: Vec<String> = Vec::new();

        if let Some(header) = &self.config.header {
            lines.extend(header.lines().map(comment_line));
        }

        for (name, value) in session.config() {
            lines.push(format!("{name} {}", value.render()));
        }

        if self.config.blank_line_after_config
            && !session.config().is_empty()
            && !session.streams().is_empty()
        {
            lines.push(String::new());
        }

        for assignment in session.streams() {
            lines.push(format!(
                "{} $ {}",
                assignment.stream,
                assignment.pattern.expression()
            ));
        }

        tracing::debug!(
            directives = session.config().len(),
            streams = session.streams().len(),
            "transpiled session"
        );

        if lines.is_empty() {
            return String::new();
        }
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

/// Render with the default configuration.
pub fn transpile(session: &Session) -> String {
    Transpiler::default().transpile(session)
}

fn comment_line(line: &str) -> String {
    if is_comment(line) {
        line.to_string()
    } else if line.is_empty() {
        "--".to_string()
    } else {
        format!("-- {line}")
    }
}

/// Haskell starts a line comment with two or more dashes, unless the dash
/// run continues into an operator such as `-->` or `--|`.
fn is_comment(line: &str) -> bool {
    let rest = line.trim_start_matches('-');
    line.len() - rest.len() >= 2 && !rest.starts_with(is_operator_symbol)
}

fn is_operator_symbol(c: char) -> bool {
    "!#$%&*+./<=>?@\\^|~:".contains(c)
}
