use indexmap::IndexMap;
use lazy_static::lazy_static;
use once_cell::sync::Lazy;
use std::{collections::HashMap, fmt::Display, sync::Mutex};
use weft_index::index_type;
use weft_symbols_macro::generate_symbols;

index_type! {
    /// A unique identifier for a symbol interned in the global interner.
    #[derive(PartialOrd, Ord)]
    pub struct SymbolIndex {}
}

/// A symbol representing an interned string. Two symbols are equal exactly when
/// their strings are equal, so name checks are index comparisons.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Symbol(pub SymbolIndex);

generate_symbols! {
    WRITE = "write",
    WRITELN = "writeln",
    READ = "read",
    INIT = "init",
    INT = "int",
    REAL = "real",
    BOOL = "bool",
    STRING = "string",
}

impl Symbol {
    /// Creates a symbol from a string by interning it.
    #[inline]
    pub fn new(s: &str) -> Self {
        Self(intern(s))
    }

    /// Resolves this symbol back to its original string.
    #[inline]
    pub fn as_str(&self) -> Option<String> {
        resolve(self.0)
    }

    pub fn is_predefined(&self) -> bool {
        SYMBOL_STRINGS.contains_key(&self.0)
    }
}

#[derive(Debug)]
pub struct SymbolInterner {
    strings: HashMap<String, SymbolIndex>,
    symbols: Vec<String>,
}

impl SymbolInterner {
    /// Creates an interner already holding every predefined symbol at its
    /// declared index.
    pub fn new() -> Self {
        let mut interner = Self {
            strings: HashMap::new(),
            symbols: Vec::new(),
        };
        for (index, value) in SYMBOL_STRINGS.iter() {
            interner.add_existing(*index, value.clone());
        }

        interner
    }

    fn add_existing(&mut self, index: SymbolIndex, value: String) {
        debug_assert_eq!(index.as_usize(), self.symbols.len());
        self.strings.insert(value.clone(), index);
        self.symbols.push(value);
    }

    pub fn intern(&mut self, s: &str) -> SymbolIndex {
        if let Some(&index) = self.strings.get(s) {
            index
        } else {
            let index = SymbolIndex::from_usize(self.symbols.len());
            self.symbols.push(s.to_string());
            self.strings.insert(s.to_string(), index);
            index
        }
    }

    pub fn resolve(&self, symbol: SymbolIndex) -> Option<&str> {
        self.symbols.get(symbol.as_usize()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for SymbolInterner {
    fn default() -> Self {
        Self::new()
    }
}

pub static GLOBAL_INTERNER: Lazy<Mutex<SymbolInterner>> =
    Lazy::new(|| Mutex::new(SymbolInterner::new()));

#[inline]
fn intern(s: &str) -> SymbolIndex {
    GLOBAL_INTERNER
        .lock()
        .expect("Failed to lock global interner")
        .intern(s)
}

#[inline]
fn resolve(index: SymbolIndex) -> Option<String> {
    GLOBAL_INTERNER
        .lock()
        .expect("Failed to lock global interner")
        .resolve(index)
        .map(ToOwned::to_owned)
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_str() {
            Some(s) => write!(f, "{}", s),
            None => write!(f, "<symbol {:?}>", self.0),
        }
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Symbol::new(&s)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predefined_symbols_match_interned_strings() {
        assert_eq!(Symbol::new("write"), WRITE);
        assert_eq!(Symbol::new("writeln"), WRITELN);
        assert_eq!(Symbol::new("read"), READ);
        assert_eq!(WRITELN.as_str().as_deref(), Some("writeln"));
        assert!(READ.is_predefined());
    }

    #[test]
    fn interning_is_case_sensitive() {
        let upper = Symbol::new("Write");

        assert_ne!(upper, WRITE);
        assert!(!upper.is_predefined());
        assert_eq!(upper, Symbol::from("Write"));
    }
}
