use std::{
    cell::Cell,
    fmt::Display,
    hash::{Hash, Hasher},
    rc::Rc,
};

struct SymbolData {
    name: Box<str>,
    module: Cell<usize>,
}

/// The canonical handle of an atom name.
///
/// Symbols are built by a [`SymbolTable`](super::SymbolTable), which ensures two names with the same content share the same handle.
/// As a consequence, equality and hashing rely on the identity of the handle, not on the content of the name.
///
/// Cloning a symbol is cheap, as it only clones the handle.
///
/// Apart from its name, a symbol records the module that defines the corresponding atom (see [`set_module`](Self::set_module)).
#[derive(Clone)]
pub struct Symbol(Rc<SymbolData>);

impl Symbol {
    pub(crate) fn new(name: &str) -> Self {
        Self(Rc::new(SymbolData {
            name: name.into(),
            module: Cell::new(0),
        }))
    }

    /// Returns the name of the symbol.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Returns the module that defines the atom named by this symbol, or `0` if no module was recorded.
    pub fn module(&self) -> usize {
        self.0.module.get()
    }

    /// Records the module that defines the atom named by this symbol.
    pub fn set_module(&self, module: usize) {
        self.0.module.set(module)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Rc::as_ptr(&self.0), state)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.name)
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({:?})", self.0.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_not_content() {
        let s1 = Symbol::new("a");
        let s2 = Symbol::new("a");
        assert_ne!(s1, s2);
        assert_eq!(s1, s1.clone());
    }

    #[test]
    fn test_module_is_shared_by_clones() {
        let s = Symbol::new("a");
        let clone = s.clone();
        s.set_module(3);
        assert_eq!(3, clone.module());
    }

    #[test]
    fn test_display() {
        assert_eq!("p(1)", format!("{}", Symbol::new("p(1)")));
    }
}
