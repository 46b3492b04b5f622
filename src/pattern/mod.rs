//! Pattern expression model: an immutable expression tree rendered as Tidal source.
//!
//! Every combinator returns a new [`Pattern`]; operands are embedded by value.
//! Rendering lives in one place ([`Pattern::expression`]): a node never
//! parenthesizes itself, its parent wraps it when it is not a bare atom.

pub mod literal;

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};

pub use literal::Literal;

/// Prefix transforms that take literal arguments and one pattern operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Sound trigger, `s <name>`.
    Sound,
    Fast,
    Slow,
    Degrade,
}

impl Transform {
    pub fn name(self) -> &'static str {
        match self {
            Self::Sound => "s",
            Self::Fast => "fast",
            Self::Slow => "slow",
            Self::Degrade => "degrade",
        }
    }
}

/// List combinators that join several patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Layer patterns in parallel.
    Stack,
    /// Squeeze patterns into one cycle, one subdivision each.
    Sequence,
    /// Play one pattern per cycle.
    Cat,
}

impl Combinator {
    pub fn name(self) -> &'static str {
        match self {
            Self::Stack => "stack",
            Self::Sequence => "fastcat",
            Self::Cat => "cat",
        }
    }
}

/// A named control applied with `#`, e.g. `cutoff 1200`.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub name: String,
    pub value: Literal,
}

impl Control {
    pub fn new(name: impl Into<String>, value: impl Into<Literal>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn render(&self) -> String {
        format!("{} {}", self.name, self.value.render())
    }
}

/// One node of the expression tree.
#[derive(Debug, Clone)]
pub enum Node {
    Atom(Literal),
    Apply {
        transform: Transform,
        args: Vec<Literal>,
        operand: Box<Pattern>,
    },
    Layer {
        combinator: Combinator,
        children: Vec<Pattern>,
    },
    Chain {
        base: Box<Pattern>,
        controls: Vec<Control>,
    },
}

/// An immutable pattern expression.
///
/// Two patterns are equal iff their rendered expressions are equal.
#[derive(Debug, Clone)]
pub struct Pattern {
    node: Node,
}

impl Pattern {
    fn from_node(node: Node) -> Self {
        Self { node }
    }

    /// Wrap a literal as an atom.
    pub fn atom(value: impl Into<Literal>) -> Self {
        Self::from_node(Node::Atom(value.into()))
    }

    /// `s "<name>"`.
    pub fn sound(name: impl Into<String>) -> Self {
        Self::from_node(Node::Apply {
            transform: Transform::Sound,
            args: Vec::new(),
            operand: Box::new(Self::atom(Literal::Str(name.into()))),
        })
    }

    /// Layer patterns in parallel with `stack`.
    pub fn stack(patterns: impl IntoIterator<Item = Pattern>) -> Result<Self> {
        Self::layer(Combinator::Stack, patterns)
    }

    /// Play patterns end to end within a cycle (`fastcat`).
    pub fn sequence(patterns: impl IntoIterator<Item = Pattern>) -> Result<Self> {
        Self::layer(Combinator::Sequence, patterns)
    }

    /// Play one pattern per cycle (`cat`).
    pub fn cat(patterns: impl IntoIterator<Item = Pattern>) -> Result<Self> {
        Self::layer(Combinator::Cat, patterns)
    }

    fn layer(combinator: Combinator, patterns: impl IntoIterator<Item = Pattern>) -> Result<Self> {
        let children: Vec<Pattern> = patterns.into_iter().collect();
        if children.is_empty() {
            return Err(Error::invalid(
                combinator.name(),
                "[]",
                "needs at least one pattern",
            ));
        }
        Ok(Self::from_node(Node::Layer {
            combinator,
            children,
        }))
    }

    /// Speed up by `factor`. `factor` must be finite and positive.
    pub fn fast(&self, factor: f64) -> Result<Self> {
        self.tempo(Transform::Fast, factor)
    }

    /// Slow down by `factor`. `factor` must be finite and positive.
    pub fn slow(&self, factor: f64) -> Result<Self> {
        self.tempo(Transform::Slow, factor)
    }

    fn tempo(&self, transform: Transform, factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(Error::invalid(
                format!("{} factor", transform.name()),
                factor,
                "must be a positive number",
            ));
        }
        Ok(self.apply(transform, vec![Literal::Number(factor)]))
    }

    /// Randomly drop events (`degrade`).
    pub fn degrade(&self) -> Self {
        self.apply(Transform::Degrade, Vec::new())
    }

    fn apply(&self, transform: Transform, args: Vec<Literal>) -> Self {
        Self::from_node(Node::Apply {
            transform,
            args,
            operand: Box::new(self.clone()),
        })
    }

    /// Append control assignments with `#`.
    ///
    /// Chains flatten: applying controls to a chained pattern extends it.
    pub fn with_controls(&self, controls: impl IntoIterator<Item = Control>) -> Result<Self> {
        let controls: Vec<Control> = controls.into_iter().collect();
        if let Some(bad) = controls.iter().find(|c| c.name.is_empty()) {
            return Err(Error::invalid(
                "control name",
                format!("{:?}", bad.name),
                "must not be empty",
            ));
        }
        Ok(self.chain(controls))
    }

    /// Append already-validated controls.
    pub(crate) fn chain(&self, controls: Vec<Control>) -> Self {
        if controls.is_empty() {
            return self.clone();
        }
        let node = match &self.node {
            Node::Chain {
                base,
                controls: existing,
            } => Node::Chain {
                base: base.clone(),
                controls: existing.iter().cloned().chain(controls).collect(),
            },
            _ => Node::Chain {
                base: Box::new(self.clone()),
                controls,
            },
        };
        Self::from_node(node)
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn is_atom(&self) -> bool {
        matches!(self.node, Node::Atom(_))
    }

    /// The rendered Tidal expression for this node.
    pub fn expression(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        match &self.node {
            Node::Atom(literal) => out.push_str(&literal.render()),
            Node::Apply {
                transform,
                args,
                operand,
            } => {
                out.push_str(transform.name());
                for arg in args {
                    out.push(' ');
                    out.push_str(&arg.render());
                }
                out.push(' ');
                operand.render_child_into(out);
            }
            Node::Layer {
                combinator,
                children,
            } => {
                out.push_str(combinator.name());
                out.push_str(" [");
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    child.render_child_into(out);
                }
                out.push(']');
            }
            Node::Chain { base, controls } => {
                // Application binds tighter than `#`, so the base stays bare.
                if base.is_raw() {
                    base.render_child_into(out);
                } else {
                    base.render_into(out);
                }
                for control in controls {
                    out.push_str(" # ");
                    out.push_str(&control.render());
                }
            }
        }
    }

    /// Verbatim text may hold several tokens, so it is grouped like any
    /// composite.
    fn is_raw(&self) -> bool {
        matches!(self.node, Node::Atom(Literal::Raw(_)))
    }

    fn render_child_into(&self, out: &mut String) {
        if self.is_atom() && !self.is_raw() {
            self.render_into(out);
        } else {
            out.push('(');
            self.render_into(out);
            out.push(')');
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.expression() == other.expression()
    }
}

impl Eq for Pattern {}

impl Hash for Pattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.expression().hash(state);
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression())
    }
}

/// Wrap a literal as an atom.
pub fn atom(value: impl Into<Literal>) -> Pattern {
    Pattern::atom(value)
}

/// `s "<name>"`.
pub fn sound(name: impl Into<String>) -> Pattern {
    Pattern::sound(name)
}

pub fn fast(pattern: &Pattern, factor: f64) -> Result<Pattern> {
    pattern.fast(factor)
}

pub fn slow(pattern: &Pattern, factor: f64) -> Result<Pattern> {
    pattern.slow(factor)
}

pub fn stack(patterns: impl IntoIterator<Item = Pattern>) -> Result<Pattern> {
    Pattern::stack(patterns)
}

pub fn sequence(patterns: impl IntoIterator<Item = Pattern>) -> Result<Pattern> {
    Pattern::sequence(patterns)
}

pub fn cat(patterns: impl IntoIterator<Item = Pattern>) -> Result<Pattern> {
    Pattern::cat(patterns)
}
