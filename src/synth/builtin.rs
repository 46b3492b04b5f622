//! Built-in SuperDirt synth wrappers.

use super::synth;

synth! {
    /// Wrapper for the `supersaw` synthesizer.
    SuperSaw => "supersaw" {
        cutoff: 1000.0, 20.0..=20000.0, "Low pass filter cutoff frequency in Hz.";
        resonance: 0.1, 0.0..=1.0, "Resonance amount of the low pass filter.";
        detune: 0.2, 0.0..=1.0, "Detuning factor applied to the saw oscillators.";
    }
}

synth! {
    /// Wrapper for the `superpwm` synthesizer.
    SuperPWM => "superpwm" {
        pwidth: 0.5, 0.0..=1.0, "Pulse width modulation amount.";
        cutoff: 800.0, 20.0..=20000.0, "Filter cutoff frequency in Hz.";
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};
    use crate::synth::Synth;

    #[test]
    fn defaults_render_bare_sound() {
        assert_eq!(SuperSaw::default().to_pattern().expression(), "s \"supersaw\"");
        assert_eq!(SuperPWM::default().to_pattern().expression(), "s \"superpwm\"");
    }

    #[test]
    fn overrides_render_in_declaration_order() {
        let saw = SuperSaw::with_overrides([("detune", 0.4), ("cutoff", 1200.0)]).unwrap();
        assert_eq!(
            saw.to_pattern().expression(),
            "s \"supersaw\" # cutoff 1200 # detune 0.4"
        );
    }

    #[test]
    fn override_equal_to_default_is_omitted() {
        let saw = SuperSaw::with_overrides([("cutoff", 1000.0)]).unwrap();
        assert_eq!(saw.to_pattern().expression(), "s \"supersaw\"");
    }

    #[test]
    fn to_pattern_is_deterministic() {
        let pwm = SuperPWM::with_overrides([("pwidth", 0.7), ("cutoff", 400.0)]).unwrap();
        assert_eq!(pwm.to_pattern().expression(), pwm.to_pattern().expression());
    }

    #[test]
    fn unknown_field_is_configuration_error() {
        let err = SuperSaw::with_overrides([("foo", 1.0)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err, Error::unknown_control("SuperSaw", "foo"));
        assert!(err.to_string().contains("foo"));
    }

    #[test]
    fn out_of_domain_is_validation_error() {
        let err = SuperPWM::with_overrides([("pwidth", 1.5)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        let message = err.to_string();
        assert!(message.contains("pwidth"));
        assert!(message.contains("1.5"));
        assert!(message.contains("[0, 1]"));
    }

    #[test]
    fn typed_setters_validate() {
        let saw = SuperSaw::default().cutoff(1200.0).unwrap().detune(0.4).unwrap();
        assert_eq!(saw.value("cutoff"), Some(1200.0));
        assert_eq!(saw.value("detune"), Some(0.4));
        assert_eq!(saw.value("pwidth"), None);
        assert!(SuperSaw::default().resonance(-0.1).is_err());
    }

    #[test]
    fn with_controls_merges_without_mutating() {
        let saw = SuperSaw::with_overrides([("detune", 0.4)]).unwrap();
        let p = saw.with_controls([("cutoff", 1500.0)]).unwrap();
        assert_eq!(p.expression(), "s \"supersaw\" # cutoff 1500 # detune 0.4");
        assert_eq!(saw.value("cutoff"), Some(1000.0));
        assert!(saw.with_controls([("pwidth", 0.3)]).is_err());
    }

    #[test]
    fn parameters_expose_metadata() {
        let names: Vec<&str> = SuperPWM::parameters().iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["pwidth", "cutoff"]);
        assert_eq!(SuperPWM::parameters()[0].range(), "[0, 1]");
        assert_eq!(SuperSaw::NAME, "SuperSaw");
    }
}
