//! Literal values and their Tidal (Haskell) source syntax.

use std::fmt;

/// A literal value that can appear as a pattern atom, control value or
/// configuration directive argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Double-quoted string (mini-notation when used as a pattern).
    Str(String),
    Integer(i64),
    Number(f64),
    Bool(bool),
    /// Target text emitted verbatim, without quoting or escaping.
    Raw(String),
}

impl Literal {
    /// Build a verbatim literal.
    pub fn raw(text: impl Into<String>) -> Self {
        Self::Raw(text.into())
    }

    /// Render the literal as Tidal source.
    pub fn render(&self) -> String {
        match self {
            Self::Str(s) => quote(s),
            Self::Integer(i) if *i < 0 => format!("({i})"),
            Self::Integer(i) => i.to_string(),
            Self::Number(n) => format_number(*n),
            Self::Bool(true) => "True".to_string(),
            Self::Bool(false) => "False".to_string(),
            Self::Raw(text) => text.clone(),
        }
    }

    /// Short type name, used in type-mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Integer(_) | Self::Number(_) => "number",
            Self::Bool(_) => "bool",
            Self::Raw(_) => "raw expression",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Shortest decimal that round-trips to the same `f64`.
///
/// Negative values are parenthesized so that juxtaposition does not parse
/// them as subtraction. Non-finite values use Haskell division expressions.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "(0/0)".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "(1/0)" } else { "(-1/0)" }.to_string();
    }
    if value.is_sign_negative() {
        format!("({value})")
    } else {
        value.to_string()
    }
}

/// Double-quote a string using Haskell escape rules.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            // `\&` terminates the numeric escape before any following digit.
            c if c.is_control() => out.push_str(&format!("\\{}\\&", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for Literal {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
