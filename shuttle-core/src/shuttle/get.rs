use shuttle_types::{EnumSpec, ParamType, ScalarSpec};

use crate::command_parameters::{write_enum, write_value, ParameterStore};
use crate::visitor::SettingsVisitor;

/// Serializes every visited field's current value into a store.
///
/// Enumerations are written as internal symbol names. A field preceded by an
/// optional flag that is `false` is skipped.
pub struct ShuttleGetAutomation<'p> {
    parms: &'p mut dyn ParameterStore,
    present: Option<bool>,
}

impl<'p> ShuttleGetAutomation<'p> {
    pub fn new(parms: &'p mut dyn ParameterStore) -> Self {
        Self { parms, present: None }
    }

    /// Consumes the pending optional flag, if any.
    fn should_write(&mut self) -> bool {
        self.present.take().unwrap_or(true)
    }

    fn write<T: ParamType>(&mut self, var: &T, spec: &ScalarSpec<T>) {
        if self.should_write() {
            write_value(self.parms, spec.key, var);
        }
    }
}

impl<'a> SettingsVisitor<'a> for ShuttleGetAutomation<'_> {
    fn optional(&mut self, present: &'a mut bool) {
        self.present = Some(*present);
    }

    fn define_bool(&mut self, var: &mut bool, spec: &ScalarSpec<bool>) {
        self.write(var, spec);
    }

    fn define_int(&mut self, var: &mut i32, spec: &ScalarSpec<i32>) {
        self.write(var, spec);
    }

    fn define_size(&mut self, var: &mut usize, spec: &ScalarSpec<usize>) {
        self.write(var, spec);
    }

    fn define_float(&mut self, var: &mut f32, spec: &ScalarSpec<f32>) {
        self.write(var, spec);
    }

    fn define_double(&mut self, var: &mut f64, spec: &ScalarSpec<f64>) {
        self.write(var, spec);
    }

    fn define_string(&mut self, var: &mut String, spec: &ScalarSpec<String>) {
        self.write(var, spec);
    }

    fn define_enum(&mut self, var: &mut usize, spec: &EnumSpec) {
        if self.should_write() {
            write_enum(self.parms, spec, *var);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command_parameters::CommandParameters;
    use shuttle_types::EnumValueSymbol;

    const MODES: &[EnumValueSymbol] = &[EnumValueSymbol::new("Fast"), EnumValueSymbol::new("Slow")];

    #[test]
    fn writes_current_values() {
        let mut parms = CommandParameters::new();
        let mut gain = -3.5f32;
        let mut mode = 1usize;
        let mut count = 7usize;
        {
            let mut v = ShuttleGetAutomation::new(&mut parms);
            v.define_float(&mut gain, &ScalarSpec::new("Gain", 0.0, -24.0, 24.0));
            v.define_enum(&mut mode, &EnumSpec::new("Mode", 0, MODES));
            v.define_size(&mut count, &ScalarSpec::new("Count", 1, 1, 64));
        }
        assert_eq!(parms.to_string(), r#"Gain="-3.5" Mode="Slow" Count="7""#);
        assert_eq!(gain, -3.5);
    }

    #[test]
    fn absent_optional_field_is_skipped_once() {
        let mut parms = CommandParameters::new();
        let mut has_tail = false;
        let mut tail = 2.0f64;
        let mut level = 1i32;
        {
            let mut v = ShuttleGetAutomation::new(&mut parms);
            v.optional(&mut has_tail);
            v.define_double(&mut tail, &ScalarSpec::new("Tail", 1.0, 0.0, 10.0));
            v.define_int(&mut level, &ScalarSpec::new("Level", 0, 0, 10));
        }
        assert!(!parms.has_entry("Tail"));
        assert_eq!(parms.read("Level"), Some("1"));
    }

    #[test]
    fn present_optional_field_is_written() {
        let mut parms = CommandParameters::new();
        let mut has_tail = true;
        let mut tail = 2.0f64;
        {
            let mut v = ShuttleGetAutomation::new(&mut parms);
            v.optional_y(&mut has_tail);
            v.define_double(&mut tail, &ScalarSpec::new("Tail", 1.0, 0.0, 10.0));
        }
        assert_eq!(parms.read("Tail"), Some("2.0"));
    }
}
