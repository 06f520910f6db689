use serde::Serialize;

/// One entry of an enumeration's symbol table.
///
/// `internal` is the stable identifier written into persisted settings;
/// `display` is what a UI shows. Two symbols are the same symbol when their
/// internal names match, whatever their display names.
#[derive(Debug, Clone, Copy, Eq, Serialize)]
pub struct EnumValueSymbol {
    pub internal: &'static str,
    pub display: &'static str,
}

impl EnumValueSymbol {
    pub const fn new(internal: &'static str) -> Self {
        Self {
            internal,
            display: internal,
        }
    }

    pub const fn with_display(internal: &'static str, display: &'static str) -> Self {
        Self { internal, display }
    }
}

impl PartialEq for EnumValueSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.internal == other.internal
    }
}

/// An old internal name kept loadable after a rename: `(old_name, index)`.
pub type ObsoleteName = (&'static str, usize);

/// Declared metadata for one enumeration parameter.
///
/// The stored value is an index into `symbols`; the text form is the internal
/// name of that symbol, so reordering the table never corrupts stored settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumSpec {
    pub key: &'static str,
    pub default: usize,
    pub symbols: &'static [EnumValueSymbol],
    pub obsoletes: &'static [ObsoleteName],
}

impl EnumSpec {
    pub fn new(key: &'static str, default: usize, symbols: &'static [EnumValueSymbol]) -> Self {
        Self {
            key,
            default,
            symbols,
            obsoletes: &[],
        }
    }

    pub fn with_obsoletes(mut self, obsoletes: &'static [ObsoleteName]) -> Self {
        self.obsoletes = obsoletes;
        self
    }

    /// Internal name for a stored index, if the index is in range.
    pub fn internal_name(&self, index: usize) -> Option<&'static str> {
        self.symbols.get(index).map(|s| s.internal)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        find_symbol(self.symbols, self.obsoletes, name)
    }
}

/// Resolve an internal name to an index, falling back to obsolete aliases.
pub fn find_symbol(
    symbols: &[EnumValueSymbol],
    obsoletes: &[ObsoleteName],
    name: &str,
) -> Option<usize> {
    symbols
        .iter()
        .position(|s| s.internal == name)
        .or_else(|| {
            obsoletes
                .iter()
                .find(|(old, _)| *old == name)
                .map(|&(_, index)| index)
                .filter(|&index| index < symbols.len())
        })
}
