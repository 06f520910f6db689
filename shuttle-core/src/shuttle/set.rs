use shuttle_types::{EnumSpec, ParamType, ScalarSpec};

use crate::command_parameters::{read_and_verify, read_and_verify_enum, ParameterStore};
use crate::visitor::SettingsVisitor;

/// Reads and validates every visited field from a store.
///
/// In validating mode fields are only checked; in writing mode each field that
/// passes is assigned. The first failure latches [`is_ok`](Self::is_ok) to
/// `false` and every later field is skipped, so a failed write can leave
/// earlier fields already assigned.
pub struct ShuttleSetAutomation<'a, 'p> {
    parms: &'p dyn ParameterStore,
    ok: bool,
    write: bool,
    present: Option<&'a mut bool>,
}

impl<'a, 'p> ShuttleSetAutomation<'a, 'p> {
    /// Check values without touching the visited fields.
    pub fn for_validating(parms: &'p dyn ParameterStore) -> Self {
        Self {
            parms,
            ok: true,
            write: false,
            present: None,
        }
    }

    /// Check values and assign each one that passes.
    pub fn for_writing(parms: &'p dyn ParameterStore) -> Self {
        Self {
            parms,
            ok: true,
            write: true,
            present: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn is_writing(&self) -> bool {
        self.write
    }

    /// Whether the field named `key` should be read.
    ///
    /// Always `false` once a field has failed. A field not marked optional can
    /// always be read (a missing key falls back to the default). For an
    /// optional field, answers whether the store has the key and records that
    /// answer in the pending presence flag.
    pub fn could_get(&mut self, key: &str) -> bool {
        if !self.ok {
            return false;
        }
        match self.present.take() {
            None => true,
            Some(flag) => {
                let found = self.parms.has_entry(key);
                *flag = found;
                found
            }
        }
    }

    fn commit<T>(&mut self, var: &mut T, value: Option<T>) {
        match value {
            Some(value) if self.write => *var = value,
            Some(_) => {}
            None => self.ok = false,
        }
    }

    fn read<T: ParamType>(&mut self, var: &mut T, spec: &ScalarSpec<T>) {
        if self.could_get(spec.key) {
            let value = read_and_verify(self.parms, spec);
            self.commit(var, value);
        }
    }
}

impl<'a> SettingsVisitor<'a> for ShuttleSetAutomation<'a, '_> {
    fn optional(&mut self, present: &'a mut bool) {
        self.present = Some(present);
    }

    fn define_bool(&mut self, var: &mut bool, spec: &ScalarSpec<bool>) {
        self.read(var, spec);
    }

    fn define_int(&mut self, var: &mut i32, spec: &ScalarSpec<i32>) {
        self.read(var, spec);
    }

    fn define_size(&mut self, var: &mut usize, spec: &ScalarSpec<usize>) {
        self.read(var, spec);
    }

    fn define_float(&mut self, var: &mut f32, spec: &ScalarSpec<f32>) {
        self.read(var, spec);
    }

    fn define_double(&mut self, var: &mut f64, spec: &ScalarSpec<f64>) {
        self.read(var, spec);
    }

    fn define_string(&mut self, var: &mut String, spec: &ScalarSpec<String>) {
        self.read(var, spec);
    }

    fn define_enum(&mut self, var: &mut usize, spec: &EnumSpec) {
        if self.could_get(spec.key) {
            let value = read_and_verify_enum(self.parms, spec);
            self.commit(var, value);
        }
    }
}
