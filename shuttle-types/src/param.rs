use serde::Serialize;

/// The closed set of value kinds a parameter can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParamKind {
    Bool,
    Int,
    Size,
    Float,
    Double,
    String,
    Enum,
}

impl ParamKind {
    pub fn name(&self) -> &'static str {
        match self {
            ParamKind::Bool => "bool",
            ParamKind::Int => "int",
            ParamKind::Size => "size",
            ParamKind::Float => "float",
            ParamKind::Double => "double",
            ParamKind::String => "string",
            ParamKind::Enum => "enum",
        }
    }

    /// Whether `min`/`max` are meaningful for this kind
    pub fn is_bounded(&self) -> bool {
        matches!(
            self,
            ParamKind::Int | ParamKind::Size | ParamKind::Float | ParamKind::Double
        )
    }
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A scalar Rust type that can be stored in a settings structure and
/// shuttled through a textual key/value store.
pub trait ParamType: Clone + PartialEq + std::fmt::Debug {
    const KIND: ParamKind;

    /// Text form written into a store.
    fn format(&self) -> String;

    /// Parse the text form. `None` means the text is not a value of this type.
    fn parse(text: &str) -> Option<Self>;

    /// Inclusive bounds check. Unbounded kinds accept everything.
    fn in_range(&self, _min: &Self, _max: &Self) -> bool {
        true
    }
}

impl ParamType for bool {
    const KIND: ParamKind = ParamKind::Bool;

    fn format(&self) -> String {
        self.to_string()
    }

    fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        }
    }
}

impl ParamType for i32 {
    const KIND: ParamKind = ParamKind::Int;

    fn format(&self) -> String {
        self.to_string()
    }

    fn parse(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }

    fn in_range(&self, min: &Self, max: &Self) -> bool {
        min <= self && self <= max
    }
}

impl ParamType for usize {
    const KIND: ParamKind = ParamKind::Size;

    fn format(&self) -> String {
        self.to_string()
    }

    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        // usize::from_str accepts a leading '+'
        if text.starts_with('+') {
            return None;
        }
        text.parse().ok()
    }

    fn in_range(&self, min: &Self, max: &Self) -> bool {
        min <= self && self <= max
    }
}

impl ParamType for f32 {
    const KIND: ParamKind = ParamKind::Float;

    fn format(&self) -> String {
        // Debug keeps the decimal point ("0.0", "10.0") and round-trips exactly
        format!("{:?}", self)
    }

    fn parse(text: &str) -> Option<Self> {
        text.trim().parse::<f32>().ok().filter(|v| !v.is_nan())
    }

    fn in_range(&self, min: &Self, max: &Self) -> bool {
        *self >= *min && *self <= *max
    }
}

impl ParamType for f64 {
    const KIND: ParamKind = ParamKind::Double;

    fn format(&self) -> String {
        format!("{:?}", self)
    }

    fn parse(text: &str) -> Option<Self> {
        text.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
    }

    fn in_range(&self, min: &Self, max: &Self) -> bool {
        *self >= *min && *self <= *max
    }
}

impl ParamType for String {
    const KIND: ParamKind = ParamKind::String;

    fn format(&self) -> String {
        self.clone()
    }

    fn parse(text: &str) -> Option<Self> {
        Some(text.to_string())
    }
}

/// Declared metadata for one scalar parameter: external key, default and bounds.
///
/// `scale` is an opaque hint for traversal visitors (slider resolution and the
/// like); the engine never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalarSpec<T> {
    pub key: &'static str,
    pub default: T,
    pub min: T,
    pub max: T,
    pub scale: f64,
}

impl<T: ParamType> ScalarSpec<T> {
    pub fn new(key: &'static str, default: T, min: T, max: T) -> Self {
        Self {
            key,
            default,
            min,
            max,
            scale: 1.0,
        }
    }

    /// Spec for a kind without meaningful bounds (bool, string).
    pub fn unbounded(key: &'static str, default: T) -> Self {
        Self {
            key,
            min: default.clone(),
            max: default.clone(),
            default,
            scale: 1.0,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn kind(&self) -> ParamKind {
        T::KIND
    }

    /// Check a candidate value against the declared bounds.
    pub fn accepts(&self, value: &T) -> bool {
        value.in_range(&self.min, &self.max)
    }

    /// Parse and bounds-check a text value.
    pub fn parse_checked(&self, text: &str) -> Option<T> {
        T::parse(text).filter(|v| self.accepts(v))
    }
}
