//! Textual key/value store for automation parameters.
//!
//! [`ParameterStore`] is the two-primitive contract the engine needs; the typed
//! read-and-verify helpers are built on top of it so every store validates the
//! same way. [`CommandParameters`] is the in-memory implementation, with the
//! one-line `Key="value"` form used for macros and presets.

use std::fmt;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use shuttle_types::{EnumSpec, ParamType, ScalarSpec};

/// A textual key/value store.
pub trait ParameterStore {
    fn read(&self, key: &str) -> Option<&str>;

    /// Insert or overwrite the value under `key`.
    fn write(&mut self, key: &str, value: String);

    fn has_entry(&self, key: &str) -> bool {
        self.read(key).is_some()
    }
}

/// Write a scalar in its text form.
pub fn write_value<T: ParamType>(store: &mut dyn ParameterStore, key: &str, value: &T) {
    store.write(key, value.format());
}

/// Write an enumeration index as its internal symbol name.
///
/// Indices outside the table are skipped with a warning rather than writing a
/// name that could never be read back.
pub fn write_enum(store: &mut dyn ParameterStore, spec: &EnumSpec, index: usize) {
    match spec.internal_name(index) {
        Some(name) => store.write(spec.key, name.to_string()),
        None => log::warn!(
            target: "shuttle",
            "{}: index {} outside symbol table of {}",
            spec.key,
            index,
            spec.symbols.len()
        ),
    }
}

/// Read, parse and bounds-check one scalar.
///
/// A missing key yields the declared default (which must itself be in
/// bounds). A present value that does not parse, or parses outside
/// `[min, max]`, is a failure.
pub fn read_and_verify<T: ParamType>(store: &dyn ParameterStore, spec: &ScalarSpec<T>) -> Option<T> {
    let Some(text) = store.read(spec.key) else {
        return Some(spec.default.clone()).filter(|v| spec.accepts(v));
    };
    match T::parse(text) {
        Some(value) if spec.accepts(&value) => Some(value),
        Some(_) => {
            log::debug!(target: "shuttle", "{}={:?} outside [{:?}, {:?}]", spec.key, text, spec.min, spec.max);
            None
        }
        None => {
            log::debug!(target: "shuttle", "{}={:?} is not a valid {}", spec.key, text, T::KIND);
            None
        }
    }
}

/// Read one enumeration by internal name (or obsolete alias).
///
/// A missing key yields the declared default; an unknown name is a failure.
pub fn read_and_verify_enum(store: &dyn ParameterStore, spec: &EnumSpec) -> Option<usize> {
    let Some(text) = store.read(spec.key) else {
        return Some(spec.default).filter(|&i| i < spec.symbols.len());
    };
    let index = spec.index_of(text.trim());
    if index.is_none() {
        log::debug!(target: "shuttle", "{}={:?} is not a known symbol", spec.key, text);
    }
    index
}

/// In-memory parameter store. Keeps insertion order; overwriting a key keeps
/// its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandParameters {
    entries: Vec<(String, String)>,
}

impl CommandParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the one-line automation form, e.g. `Gain="-6.0" Mode=Slow`.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut parms = Self::new();
        let mut chars = text.char_indices().peekable();

        loop {
            while chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
            let Some(&(key_start, _)) = chars.peek() else {
                break;
            };

            let mut key = String::new();
            loop {
                match chars.next() {
                    Some((_, '=')) => break,
                    Some((at, c)) if c.is_whitespace() => {
                        return Err(ParseError::new(at, ParseErrorKind::MissingEquals))
                    }
                    Some((_, c)) => key.push(c),
                    None => {
                        return Err(ParseError::new(text.len(), ParseErrorKind::MissingEquals))
                    }
                }
            }
            if key.is_empty() {
                return Err(ParseError::new(key_start, ParseErrorKind::EmptyKey));
            }

            let mut value = String::new();
            if let Some(&(quote_at, '"')) = chars.peek() {
                chars.next();
                let mut closed = false;
                while let Some((_, c)) = chars.next() {
                    match c {
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\\' => push_escaped(&mut value, chars.next().map(|(_, c)| c)),
                        c => value.push(c),
                    }
                }
                if !closed {
                    return Err(ParseError::new(quote_at, ParseErrorKind::UnterminatedQuote));
                }
            } else {
                while let Some((_, c)) = chars.next_if(|(_, c)| !c.is_whitespace()) {
                    match c {
                        '\\' => push_escaped(&mut value, chars.next().map(|(_, c)| c)),
                        c => value.push(c),
                    }
                }
            }

            // Quoted values are kept exactly; bare values cannot hold whitespace
            parms.write(&key, value);
        }

        Ok(parms)
    }

    /// The one-line automation form: entries in order, values quoted and escaped.
    pub fn to_parameter_string(&self) -> String {
        self.to_string()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn push_escaped(out: &mut String, next: Option<char>) {
    match next {
        Some('n') => out.push('\n'),
        Some(c) => out.push(c),
        None => out.push('\\'),
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}

impl ParameterStore for CommandParameters {
    fn read(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn write(&mut self, key: &str, value: String) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }
}

impl fmt::Display for CommandParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}=\"{}\"", key, escape(value))?;
        }
        Ok(())
    }
}

impl FromStr for CommandParameters {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CommandParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut parms = Self::new();
        for (k, v) in iter {
            parms.write(&k.into(), v.into());
        }
        parms
    }
}

impl Serialize for CommandParameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CommandParameters {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = CommandParameters;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of parameter names to text values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut parms = CommandParameters::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    parms.write(&key, value);
                }
                Ok(parms)
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    MissingEquals,
    EmptyKey,
    UnterminatedQuote,
}

/// Malformed automation text. `offset` is a byte offset into the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError {
    pub offset: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    fn new(offset: usize, kind: ParseErrorKind) -> Self {
        Self { offset, kind }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            ParseErrorKind::MissingEquals => "expected '=' after parameter name",
            ParseErrorKind::EmptyKey => "empty parameter name",
            ParseErrorKind::UnterminatedQuote => "unterminated quoted value",
        };
        write!(f, "{} at byte {}", what, self.offset)
    }
}

impl std::error::Error for ParseError {}
