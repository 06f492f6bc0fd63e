use super::Symbol;
use std::collections::HashMap;

const DEFAULT_SYMBOLS_CAP: usize = 1 << 10;

/// Interns atom names.
///
/// The table returns the same [`Symbol`] each time it is asked for a given name, allowing symbols to be compared by identity.
/// Symbols are never evicted: the table lives as long as the programs that use its symbols.
///
/// Programs read with the same symbol table share their symbols, which is required to relate their atoms
/// (see [`AtomTable::compare`](crate::atoms::AtomTable::compare) and the other cross-table operations).
///
/// # Example
///
/// ```
/// # use lptools::symbols::SymbolTable;
/// let mut symbols = SymbolTable::default();
/// let a = symbols.intern("a");
/// assert_eq!(a, symbols.intern("a"));
/// assert_ne!(a, symbols.intern("b"));
/// ```
pub struct SymbolTable {
    symbols: HashMap<Box<str>, Symbol>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self {
            symbols: HashMap::with_capacity(DEFAULT_SYMBOLS_CAP),
        }
    }
}

impl SymbolTable {
    /// Returns the symbol associated with the name, creating it if needed.
    pub fn intern(&mut self, name: &str) -> Symbol {
        if let Some(s) = self.symbols.get(name) {
            return s.clone();
        }
        let symbol = Symbol::new(name);
        self.symbols.insert(name.into(), symbol.clone());
        symbol
    }

    /// Returns the symbol associated with the name, if it has already been interned.
    pub fn find(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Returns the number of symbols in this table.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` iff no symbol has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
