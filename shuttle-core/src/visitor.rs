//! The polymorphic traversal contract.
//!
//! One `define_*` method per value kind plus `define_enum`, each receiving the
//! live field by mutable reference and the parameter's declared spec. Every
//! method defaults to a no-op so a visitor only implements what its mode needs.

use shuttle_types::{EnumSpec, ScalarSpec};

/// A visitor driven over every parameter of an effect, in declaration order.
///
/// `'a` is the lifetime of presence flags handed to [`optional`]: a visitor may
/// hold on to the flag until the next `define_*` call, which is the field the
/// flag governs.
///
/// [`optional`]: SettingsVisitor::optional
pub trait SettingsVisitor<'a> {
    /// Mark the next defined field as conditionally present.
    fn optional(&mut self, _present: &'a mut bool) {}

    /// Like [`optional`](Self::optional), for a field that defaults to present.
    fn optional_y(&mut self, present: &'a mut bool) {
        self.optional(present)
    }

    /// Like [`optional`](Self::optional), for a field that defaults to absent.
    fn optional_n(&mut self, present: &'a mut bool) {
        self.optional(present)
    }

    fn define_bool(&mut self, _var: &mut bool, _spec: &ScalarSpec<bool>) {}
    fn define_int(&mut self, _var: &mut i32, _spec: &ScalarSpec<i32>) {}
    fn define_size(&mut self, _var: &mut usize, _spec: &ScalarSpec<usize>) {}
    fn define_float(&mut self, _var: &mut f32, _spec: &ScalarSpec<f32>) {}
    fn define_double(&mut self, _var: &mut f64, _spec: &ScalarSpec<f64>) {}
    fn define_string(&mut self, _var: &mut String, _spec: &ScalarSpec<String>) {}

    /// `var` is an index into `spec.symbols`.
    fn define_enum(&mut self, _var: &mut usize, _spec: &EnumSpec) {}
}
