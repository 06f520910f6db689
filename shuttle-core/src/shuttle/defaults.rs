use std::fmt::Write;

use shuttle_types::{EnumSpec, ParamType, ScalarSpec};

use crate::visitor::SettingsVisitor;

/// Resets every visited field to its declared default and records a
/// `Key='value' ` summary of what was assigned.
#[derive(Debug, Default)]
pub struct ShuttleDefaults {
    pub result: String,
}

impl ShuttleDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, key: &str, value: &str) {
        // Writing into a String cannot fail
        let _ = write!(self.result, "{}='{}' ", key, value);
    }

    fn assign<T: ParamType>(&mut self, var: &mut T, spec: &ScalarSpec<T>) {
        *var = spec.default.clone();
        self.record(spec.key, &spec.default.format());
    }
}

impl<'a> SettingsVisitor<'a> for ShuttleDefaults {
    fn optional(&mut self, present: &'a mut bool) {
        *present = true;
    }

    fn optional_y(&mut self, present: &'a mut bool) {
        *present = true;
    }

    fn optional_n(&mut self, present: &'a mut bool) {
        *present = false;
    }

    fn define_bool(&mut self, var: &mut bool, spec: &ScalarSpec<bool>) {
        *var = spec.default;
        self.record(spec.key, if spec.default { "True" } else { "False" });
    }

    fn define_int(&mut self, var: &mut i32, spec: &ScalarSpec<i32>) {
        self.assign(var, spec);
    }

    fn define_size(&mut self, var: &mut usize, spec: &ScalarSpec<usize>) {
        self.assign(var, spec);
    }

    fn define_float(&mut self, var: &mut f32, spec: &ScalarSpec<f32>) {
        self.assign(var, spec);
    }

    fn define_double(&mut self, var: &mut f64, spec: &ScalarSpec<f64>) {
        self.assign(var, spec);
    }

    fn define_string(&mut self, var: &mut String, spec: &ScalarSpec<String>) {
        self.assign(var, spec);
    }

    fn define_enum(&mut self, var: &mut usize, spec: &EnumSpec) {
        *var = spec.default;
        self.record(spec.key, spec.internal_name(spec.default).unwrap_or_default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shuttle_types::EnumValueSymbol;

    const MODES: &[EnumValueSymbol] = &[EnumValueSymbol::new("Fast"), EnumValueSymbol::new("Slow")];

    #[test]
    fn assigns_defaults_and_summarizes() {
        let mut v = ShuttleDefaults::new();
        let mut on = false;
        let mut gain = 3.0f32;
        let mut mode = 1usize;
        let mut name = String::from("x");

        v.define_bool(&mut on, &ScalarSpec::unbounded("On", true));
        v.define_float(&mut gain, &ScalarSpec::new("Gain", 0.0, -24.0, 24.0));
        v.define_enum(&mut mode, &EnumSpec::new("Mode", 0, MODES));
        v.define_string(&mut name, &ScalarSpec::unbounded("Name", String::new()));

        assert!(on);
        assert_eq!(gain, 0.0);
        assert_eq!(mode, 0);
        assert!(name.is_empty());
        assert_eq!(v.result, "On='True' Gain='0.0' Mode='Fast' Name='' ");
    }

    #[test]
    fn optional_flags() {
        let mut v = ShuttleDefaults::new();
        let (mut a, mut b, mut c) = (false, false, true);
        v.optional(&mut a);
        v.optional_y(&mut b);
        v.optional_n(&mut c);
        assert!(a);
        assert!(b);
        assert!(!c);
    }
}
