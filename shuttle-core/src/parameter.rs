//! Parameter descriptors: where a value lives, what it is called, and how it
//! is validated.

use std::fmt;

use shuttle_types::{EnumSpec, EnumValueSymbol, Field, ParamKind, ParamType, ScalarSpec};

use crate::command_parameters::{
    read_and_verify, read_and_verify_enum, write_enum, write_value, ParameterStore,
};
use crate::visitor::SettingsVisitor;

/// A scalar parameter bound to one member of the settings structure `S`.
pub struct EffectParameter<S, T> {
    pub field: Field<S, T>,
    pub spec: ScalarSpec<T>,
}

impl<S, T: ParamType> EffectParameter<S, T> {
    pub fn new(field: Field<S, T>, spec: ScalarSpec<T>) -> Self {
        Self { field, spec }
    }

    fn reset(&self, settings: &mut S) {
        *self.field.get_mut(settings) = self.spec.default.clone();
    }

    fn get(&self, settings: &S, parms: &mut dyn ParameterStore) {
        write_value(parms, self.spec.key, self.field.get(settings));
    }

    fn set(&self, settings: &mut S, parms: &dyn ParameterStore) -> bool {
        match read_and_verify(parms, &self.spec) {
            Some(value) => {
                *self.field.get_mut(settings) = value;
                true
            }
            None => false,
        }
    }
}

/// An enumeration parameter: an index into a symbol table, persisted by name.
pub struct EnumParameter<S> {
    pub field: Field<S, usize>,
    pub spec: EnumSpec,
}

impl<S> EnumParameter<S> {
    pub fn new(field: Field<S, usize>, spec: EnumSpec) -> Self {
        Self { field, spec }
    }

    fn reset(&self, settings: &mut S) {
        *self.field.get_mut(settings) = self.spec.default;
    }

    fn get(&self, settings: &S, parms: &mut dyn ParameterStore) {
        write_enum(parms, &self.spec, *self.field.get(settings));
    }

    fn set(&self, settings: &mut S, parms: &dyn ParameterStore) -> bool {
        match read_and_verify_enum(parms, &self.spec) {
            Some(index) => {
                *self.field.get_mut(settings) = index;
                true
            }
            None => false,
        }
    }
}

/// One declared parameter of an effect, tagged by value kind.
pub enum Parameter<S> {
    Bool(EffectParameter<S, bool>),
    Int(EffectParameter<S, i32>),
    Size(EffectParameter<S, usize>),
    Float(EffectParameter<S, f32>),
    Double(EffectParameter<S, f64>),
    String(EffectParameter<S, String>),
    Enum(EnumParameter<S>),
}

/// Expand `$body` once per variant with `$p` bound to the inner descriptor.
macro_rules! each_parameter {
    ($param:expr, $p:ident => $body:expr) => {
        match $param {
            Parameter::Bool($p) => $body,
            Parameter::Int($p) => $body,
            Parameter::Size($p) => $body,
            Parameter::Float($p) => $body,
            Parameter::Double($p) => $body,
            Parameter::String($p) => $body,
            Parameter::Enum($p) => $body,
        }
    };
}

impl<S> Parameter<S> {
    pub fn flag(field: Field<S, bool>, key: &'static str, default: bool) -> Self {
        Parameter::Bool(EffectParameter::new(field, ScalarSpec::unbounded(key, default)))
    }

    pub fn int(field: Field<S, i32>, key: &'static str, default: i32, min: i32, max: i32) -> Self {
        Parameter::Int(EffectParameter::new(field, ScalarSpec::new(key, default, min, max)))
    }

    pub fn size(
        field: Field<S, usize>,
        key: &'static str,
        default: usize,
        min: usize,
        max: usize,
    ) -> Self {
        Parameter::Size(EffectParameter::new(field, ScalarSpec::new(key, default, min, max)))
    }

    pub fn float(field: Field<S, f32>, key: &'static str, default: f32, min: f32, max: f32) -> Self {
        Parameter::Float(EffectParameter::new(field, ScalarSpec::new(key, default, min, max)))
    }

    pub fn double(
        field: Field<S, f64>,
        key: &'static str,
        default: f64,
        min: f64,
        max: f64,
    ) -> Self {
        Parameter::Double(EffectParameter::new(field, ScalarSpec::new(key, default, min, max)))
    }

    pub fn text(field: Field<S, String>, key: &'static str, default: &str) -> Self {
        Parameter::String(EffectParameter::new(
            field,
            ScalarSpec::unbounded(key, default.to_string()),
        ))
    }

    pub fn enumeration(
        field: Field<S, usize>,
        key: &'static str,
        default: usize,
        symbols: &'static [EnumValueSymbol],
    ) -> Self {
        Parameter::Enum(EnumParameter::new(field, EnumSpec::new(key, default, symbols)))
    }

    /// Attach a scale hint. Enumerations carry no scale and are returned as is.
    pub fn with_scale(mut self, scale: f64) -> Self {
        match &mut self {
            Parameter::Bool(p) => p.spec.scale = scale,
            Parameter::Int(p) => p.spec.scale = scale,
            Parameter::Size(p) => p.spec.scale = scale,
            Parameter::Float(p) => p.spec.scale = scale,
            Parameter::Double(p) => p.spec.scale = scale,
            Parameter::String(p) => p.spec.scale = scale,
            Parameter::Enum(_) => {}
        }
        self
    }

    pub fn key(&self) -> &'static str {
        each_parameter!(self, p => p.spec.key)
    }

    pub fn kind(&self) -> ParamKind {
        match self {
            Parameter::Enum(_) => ParamKind::Enum,
            Parameter::Bool(p) => p.spec.kind(),
            Parameter::Int(p) => p.spec.kind(),
            Parameter::Size(p) => p.spec.kind(),
            Parameter::Float(p) => p.spec.kind(),
            Parameter::Double(p) => p.spec.kind(),
            Parameter::String(p) => p.spec.kind(),
        }
    }

    /// Whether the declared default is valid: within bounds for scalars, a
    /// real index for enumerations.
    pub fn default_is_valid(&self) -> bool {
        match self {
            Parameter::Enum(p) => p.spec.default < p.spec.symbols.len(),
            Parameter::Bool(p) => p.spec.accepts(&p.spec.default),
            Parameter::Int(p) => p.spec.accepts(&p.spec.default),
            Parameter::Size(p) => p.spec.accepts(&p.spec.default),
            Parameter::Float(p) => p.spec.accepts(&p.spec.default),
            Parameter::Double(p) => p.spec.accepts(&p.spec.default),
            Parameter::String(p) => p.spec.accepts(&p.spec.default),
        }
    }

    /// Assign the declared default.
    pub fn reset(&self, settings: &mut S) {
        each_parameter!(self, p => p.reset(settings))
    }

    /// Hand the live field to the visitor method matching its kind.
    pub fn visit(&self, settings: &mut S, visitor: &mut dyn SettingsVisitor<'_>) {
        match self {
            Parameter::Bool(p) => visitor.define_bool(p.field.get_mut(settings), &p.spec),
            Parameter::Int(p) => visitor.define_int(p.field.get_mut(settings), &p.spec),
            Parameter::Size(p) => visitor.define_size(p.field.get_mut(settings), &p.spec),
            Parameter::Float(p) => visitor.define_float(p.field.get_mut(settings), &p.spec),
            Parameter::Double(p) => visitor.define_double(p.field.get_mut(settings), &p.spec),
            Parameter::String(p) => visitor.define_string(p.field.get_mut(settings), &p.spec),
            Parameter::Enum(p) => visitor.define_enum(p.field.get_mut(settings), &p.spec),
        }
    }

    /// Write the current value under this parameter's key.
    pub fn get(&self, settings: &S, parms: &mut dyn ParameterStore) {
        each_parameter!(self, p => p.get(settings, parms))
    }

    /// Read, validate and assign. On failure the field is left untouched.
    pub fn set(&self, settings: &mut S, parms: &dyn ParameterStore) -> bool {
        each_parameter!(self, p => p.set(settings, parms))
    }
}

impl<S> From<EnumParameter<S>> for Parameter<S> {
    fn from(p: EnumParameter<S>) -> Self {
        Parameter::Enum(p)
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<S> From<EffectParameter<S, $ty>> for Parameter<S> {
                fn from(p: EffectParameter<S, $ty>) -> Self {
                    Parameter::$variant(p)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    i32 => Int,
    usize => Size,
    f32 => Float,
    f64 => Double,
    String => String,
}

impl<S> fmt::Debug for Parameter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("key", &self.key())
            .field("kind", &self.kind())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command_parameters::CommandParameters;
    use shuttle_types::field;

    #[derive(Debug, Default, PartialEq)]
    struct Tone {
        enabled: bool,
        level: f64,
        shape: usize,
    }

    const SHAPES: &[EnumValueSymbol] = &[EnumValueSymbol::new("Sine"), EnumValueSymbol::new("Saw")];

    #[test]
    fn key_and_kind() {
        let p = Parameter::double(field!(Tone, level), "Level", 0.5, 0.0, 1.0);
        assert_eq!(p.key(), "Level");
        assert_eq!(p.kind(), ParamKind::Double);
        let e = Parameter::enumeration(field!(Tone, shape), "Shape", 1, SHAPES);
        assert_eq!(e.kind(), ParamKind::Enum);
        assert_eq!(format!("{:?}", e), r#"Parameter { key: "Shape", kind: Enum }"#);
    }

    #[test]
    fn default_validity() {
        assert!(Parameter::double(field!(Tone, level), "Level", 0.5, 0.0, 1.0).default_is_valid());
        assert!(!Parameter::double(field!(Tone, level), "Level", 2.0, 0.0, 1.0).default_is_valid());
        assert!(!Parameter::enumeration(field!(Tone, shape), "Shape", 2, SHAPES).default_is_valid());
        assert!(Parameter::flag(field!(Tone, enabled), "Enabled", true).default_is_valid());
    }

    #[test]
    fn set_failure_leaves_field_untouched() {
        let p = Parameter::double(field!(Tone, level), "Level", 0.5, 0.0, 1.0);
        let mut tone = Tone { level: 0.25, ..Tone::default() };
        let parms: CommandParameters = [("Level", "1.5")].into_iter().collect();
        assert!(!p.set(&mut tone, &parms));
        assert_eq!(tone.level, 0.25);
    }

    #[test]
    fn with_scale_sets_hint_on_scalars() {
        let p = Parameter::double(field!(Tone, level), "Level", 0.5, 0.0, 1.0).with_scale(100.0);
        match p {
            Parameter::Double(p) => assert_eq!(p.spec.scale, 100.0),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn from_explicit_descriptors() {
        let p: Parameter<Tone> = EnumParameter::new(
            field!(Tone, shape),
            EnumSpec::new("Shape", 0, SHAPES).with_obsoletes(&[("Sawtooth", 1)]),
        )
        .into();
        let mut tone = Tone::default();
        let parms: CommandParameters = [("Shape", "Sawtooth")].into_iter().collect();
        assert!(p.set(&mut tone, &parms));
        assert_eq!(tone.shape, 1);

        let q: Parameter<Tone> =
            EffectParameter::new(field!(Tone, enabled), ScalarSpec::unbounded("Enabled", true)).into();
        q.reset(&mut tone);
        assert!(tone.enabled);
    }
}
