//! Synthesizer control model: typed control bundles rendered as `s "<sound>" # ...`.
//!
//! Each synth is a fixed struct with a static parameter table. Overrides are
//! validated against that table: unknown names are configuration errors,
//! out-of-range values are validation errors.

mod builtin;

pub use builtin::{SuperPWM, SuperSaw};

use crate::error::{Error, Result};
use crate::pattern::literal::format_number;
use crate::pattern::{Control, Pattern};

/// Metadata for one synth control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthParameter {
    pub name: &'static str,
    pub description: &'static str,
    pub default: f64,
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
}

impl SynthParameter {
    /// Human-readable range, e.g. `[0, 1]`.
    pub fn range(&self) -> String {
        format!("[{}, {}]", format_number(self.min), format_number(self.max))
    }

    /// Validate `value` against this parameter's domain.
    pub fn check(&self, value: f64) -> Result<f64> {
        if value.is_finite() && value >= self.min && value <= self.max {
            Ok(value)
        } else {
            Err(Error::invalid(
                self.name,
                value,
                format!("must be within {}", self.range()),
            ))
        }
    }
}

/// A synthesizer wrapper with a fixed set of numeric controls.
pub trait Synth: Clone + Default {
    /// Type name used in error messages, e.g. `SuperSaw`.
    const NAME: &'static str;
    /// Tidal sound name, e.g. `supersaw`.
    const SOUND: &'static str;

    /// Parameters in declaration order.
    fn parameters() -> &'static [SynthParameter];

    /// Current values, in declaration order.
    fn values(&self) -> Vec<f64>;

    /// Set one control by name after validating it.
    fn set(&mut self, field: &str, value: f64) -> Result<()>;

    /// Current value of a control, or `None` if the synth has no such control.
    fn value(&self, field: &str) -> Option<f64> {
        Self::parameters()
            .iter()
            .zip(self.values())
            .find(|(p, _)| p.name == field)
            .map(|(_, v)| v)
    }

    /// Construct from defaults plus `overrides`.
    fn with_overrides<I, K>(overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut synth = Self::default();
        for (field, value) in overrides {
            synth.set(field.as_ref(), value)?;
        }
        Ok(synth)
    }

    /// Render as `s "<sound>"` followed by every control that differs from
    /// its default, in declaration order.
    fn to_pattern(&self) -> Pattern {
        let controls = Self::parameters()
            .iter()
            .zip(self.values())
            .filter(|(p, v)| *v != p.default)
            .map(|(p, v)| Control::new(p.name, v))
            .collect();
        Pattern::sound(Self::SOUND).chain(controls)
    }

    /// Merge further overrides into a copy of this synth and render it.
    fn with_controls<I, K>(&self, overrides: I) -> Result<Pattern>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut next = self.clone();
        for (field, value) in overrides {
            next.set(field.as_ref(), value)?;
        }
        Ok(next.to_pattern())
    }

    fn info() -> SynthInfo {
        SynthInfo {
            name: Self::NAME,
            sound: Self::SOUND,
            parameters: Self::parameters(),
        }
    }
}

/// Description of an available synth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthInfo {
    pub name: &'static str,
    pub sound: &'static str,
    pub parameters: &'static [SynthParameter],
}

/// All built-in synths.
pub fn available_synths() -> Vec<SynthInfo> {
    vec![SuperSaw::info(), SuperPWM::info()]
}

/// Build a synth pattern by its Tidal sound name.
pub fn build<I, K>(sound: &str, overrides: I) -> Result<Pattern>
where
    I: IntoIterator<Item = (K, f64)>,
    K: AsRef<str>,
{
    tracing::trace!(sound, "building synth pattern");
    if sound == SuperSaw::SOUND {
        SuperSaw::with_overrides(overrides).map(|s| s.to_pattern())
    } else if sound == SuperPWM::SOUND {
        SuperPWM::with_overrides(overrides).map(|s| s.to_pattern())
    } else {
        Err(Error::UnknownSynth(sound.to_string()))
    }
}

/// Generates a synth struct, its `Default` impl, typed setters and the
/// [`Synth`] impl from a parameter list.
macro_rules! synth {
    (
        $(#[$meta:meta])*
        $name:ident => $sound:literal {
            $( $field:ident: $default:literal, $min:literal ..= $max:literal, $desc:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            $( $field: f64, )+
        }

        impl Default for $name {
            fn default() -> Self {
                Self { $( $field: $default, )+ }
            }
        }

        impl $name {
            $(
                #[doc = $desc]
                pub fn $field(mut self, value: f64) -> $crate::error::Result<Self> {
                    $crate::synth::Synth::set(&mut self, stringify!($field), value)?;
                    Ok(self)
                }
            )+
        }

        impl $crate::synth::Synth for $name {
            const NAME: &'static str = stringify!($name);
            const SOUND: &'static str = $sound;

            fn parameters() -> &'static [$crate::synth::SynthParameter] {
                const PARAMETERS: &[$crate::synth::SynthParameter] = &[
                    $(
                        $crate::synth::SynthParameter {
                            name: stringify!($field),
                            description: $desc,
                            default: $default,
                            min: $min,
                            max: $max,
                        },
                    )+
                ];
                PARAMETERS
            }

            fn values(&self) -> Vec<f64> {
                vec![$( self.$field ),+]
            }

            fn set(&mut self, field: &str, value: f64) -> $crate::error::Result<()> {
                let parameter = Self::parameters()
                    .iter()
                    .find(|p| p.name == field)
                    .ok_or_else(|| $crate::error::Error::unknown_control(Self::NAME, field))?;
                let value = parameter.check(value)?;
                $(
                    if field == stringify!($field) {
                        self.$field = value;
                    }
                )+
                Ok(())
            }
        }
    };
}

pub(crate) use synth;
