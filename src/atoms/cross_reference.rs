use super::{Atom, AtomStatus, AtomTable, TableId};
use crate::symbols::Symbol;
use anyhow::Result;
use std::collections::HashMap;

/// A mapping from the names of a table to its atoms.
///
/// Atoms of two tables denote the same entity when they share the same [`Symbol`].
/// A name index is built from a table with [`attach`](Self::attach), used by [`AtomTable::combine`], and dropped afterwards;
/// since it lives outside the symbols, no cross reference survives the index.
pub struct NameIndex {
    table: TableId,
    atoms: HashMap<Symbol, Atom>,
}

impl NameIndex {
    /// Indexes the named atoms of a table.
    ///
    /// If a name is shared by several atoms, the last one is kept.
    pub fn attach(table: &AtomTable) -> Self {
        let atoms = table
            .iter()
            .filter_map(|(a, n, _)| n.map(|s| (s.clone(), a)))
            .collect();
        Self {
            table: table.id(),
            atoms,
        }
    }

    /// Returns the identifier of the indexed table.
    pub fn table(&self) -> TableId {
        self.table
    }

    /// Returns the atom of the indexed table named by the symbol, if any.
    pub fn get(&self, symbol: &Symbol) -> Option<Atom> {
        self.atoms.get(symbol).copied()
    }

    /// Discards this index.
    pub fn detach(self) {}
}

/// The checks performed by [`AtomTable::combine`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CombineOptions {
    /// Report named atoms that have no counterpart.
    pub check_missing: bool,
    /// Report input atoms whose counterpart is not an input atom.
    pub check_input: bool,
    /// Report atoms defined in both tables, and clear the input status of atoms defined in the other table.
    pub check_output: bool,
}

impl AtomTable {
    /// Relates the named atoms of this table to the atoms of another table sharing the same names.
    ///
    /// The index must have been built from the other table; otherwise, no cross reference is recorded and the first named atom of this table is returned.
    /// For each named atom with a counterpart, the cross reference is recorded in this table (see [`other_atom`](Self::other_atom)) before applying the checks given by the options.
    /// The first atom of this table that fails a check is returned; atoms following it are left untouched.
    ///
    /// When the output check is enabled, an atom which is an input atom on one side and defined on the other side loses its input status on the former.
    pub fn combine(
        &mut self,
        other: &mut AtomTable,
        index: &NameIndex,
        options: CombineOptions,
    ) -> Option<Atom> {
        if index.table() != other.id() {
            return self.iter().find(|(_, n, _)| n.is_some()).map(|(a, _, _)| a);
        }
        self.ensure_other_tables(other);
        let candidates = self
            .iter()
            .filter_map(|(a, n, s)| n.map(|sym| (a, index.get(sym), s)))
            .collect::<Vec<_>>();
        for (atom, counterpart, status1) in candidates {
            let (atom2, status2) = match counterpart.and_then(|a2| {
                other.get_status(a2).ok().map(|s2| (a2, s2))
            }) {
                Some(c) => c,
                None => {
                    if options.check_missing {
                        return Some(atom);
                    }
                    continue;
                }
            };
            if self.set_other_atom(atom, atom2).is_err() {
                return Some(atom);
            }
            let input1 = status1.contains(AtomStatus::INPUT);
            let input2 = status2.contains(AtomStatus::INPUT);
            if options.check_input && input1 && !input2 {
                return Some(atom);
            }
            if options.check_output {
                if !input1 && !input2 {
                    return Some(atom);
                }
                let cleared = if input1 && !input2 {
                    self.clear_status(atom, AtomStatus::INPUT)
                } else if !input1 && input2 {
                    other.clear_status(atom2, AtomStatus::INPUT)
                } else {
                    Ok(())
                };
                if cleared.is_err() {
                    return Some(atom);
                }
            }
        }
        None
    }

    /// Checks that each named atom of this table has a counterpart in the other table.
    ///
    /// If `check_input` is set, input atoms of this table must also be input atoms in the other one.
    /// Returns the first atom failing these checks, if any.
    pub fn compare(&mut self, other: &mut AtomTable, check_input: bool) -> Option<Atom> {
        let index = NameIndex::attach(other);
        let options = CombineOptions {
            check_missing: true,
            check_input,
            check_output: false,
        };
        self.combine(other, &index, options)
    }

    /// Matches the named atoms of this table with the ones of the other table.
    ///
    /// If `check_output` is set, the first atom defined in both tables is returned,
    /// and atoms that are inputs in a table but defined in the other lose their input status.
    pub fn match_with(&mut self, other: &mut AtomTable, check_output: bool) -> Option<Atom> {
        let index = NameIndex::attach(other);
        let options = CombineOptions {
            check_missing: false,
            check_input: false,
            check_output,
        };
        self.combine(other, &index, options)
    }

    /// Copies the truth values given by the compute statement of this table to the atoms of the other table sharing the same names.
    pub fn transfer_compute_statement(&self, other: &mut AtomTable) -> Result<()> {
        let index = NameIndex::attach(other);
        for (_, name, status) in self.iter() {
            if let Some(atom2) = name.and_then(|n| index.get(n)) {
                other.set_status(atom2, status & AtomStatus::TRUE_OR_FALSE)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::SymbolTable;

    fn module(symbols: &mut SymbolTable, names: &[&str], inputs: &[&str]) -> AtomTable {
        let mut table = AtomTable::new(names.len(), 0);
        for (i, n) in names.iter().enumerate() {
            table.set_name(i + 1, symbols.intern(n)).unwrap();
            if inputs.contains(n) {
                table.set_status(i + 1, AtomStatus::INPUT).unwrap();
            }
        }
        table
    }

    #[test]
    fn test_compare_missing() {
        let mut symbols = SymbolTable::default();
        let mut t1 = module(&mut symbols, &["a", "b", "c"], &[]);
        let mut t2 = module(&mut symbols, &["c", "a"], &[]);
        assert_eq!(Some(2), t1.compare(&mut t2, false));
        assert_eq!(Some(2), t1.other_atom(1));
        assert_eq!(None, t1.other_atom(3));
    }

    #[test]
    fn test_compare_missing_in_extension() {
        let mut symbols = SymbolTable::default();
        let mut t1 = module(&mut symbols, &["a"], &[]);
        t1.extend(1, 5).unwrap();
        t1.set_name(6, symbols.intern("z")).unwrap();
        let mut t2 = module(&mut symbols, &["a"], &[]);
        assert_eq!(Some(6), t1.compare(&mut t2, false));
    }

    #[test]
    fn test_compare_ok() {
        let mut symbols = SymbolTable::default();
        let mut t1 = module(&mut symbols, &["a", "b"], &["a"]);
        let mut t2 = module(&mut symbols, &["b", "a", "c"], &["a"]);
        assert_eq!(None, t1.compare(&mut t2, true));
        assert_eq!(Some(2), t1.other_atom(1));
        assert_eq!(Some(1), t1.other_atom(2));
    }

    #[test]
    fn test_compare_input_mismatch() {
        let mut symbols = SymbolTable::default();
        let mut t1 = module(&mut symbols, &["a", "b"], &["b"]);
        let mut t2 = module(&mut symbols, &["a", "b"], &[]);
        assert_eq!(None, t1.compare(&mut t2, false));
        assert_eq!(Some(2), t1.compare(&mut t2, true));
    }

    #[test]
    fn test_match_two_modules() {
        let mut symbols = SymbolTable::default();
        let mut module_a = module(&mut symbols, &["p", "q"], &["p"]);
        let mut module_b = module(&mut symbols, &["q", "p"], &[]);
        assert_eq!(Some(2), module_a.match_with(&mut module_b, true));
        assert!(!module_a.get_status(1).unwrap().contains(AtomStatus::INPUT));
        assert!(!module_b.get_status(2).unwrap().contains(AtomStatus::INPUT));
    }

    #[test]
    fn test_match_clears_input_on_both_sides() {
        let mut symbols = SymbolTable::default();
        let mut t1 = module(&mut symbols, &["p", "q"], &["p"]);
        let mut t2 = module(&mut symbols, &["p", "q"], &["q"]);
        assert_eq!(None, t1.match_with(&mut t2, true));
        assert!(!t1.get_status(1).unwrap().contains(AtomStatus::INPUT));
        assert!(!t2.get_status(2).unwrap().contains(AtomStatus::INPUT));
        assert!(!t1.get_status(2).unwrap().contains(AtomStatus::INPUT));
        assert!(!t2.get_status(1).unwrap().contains(AtomStatus::INPUT));
    }

    #[test]
    fn test_match_without_check() {
        let mut symbols = SymbolTable::default();
        let mut t1 = module(&mut symbols, &["p", "x"], &[]);
        let mut t2 = module(&mut symbols, &["p"], &[]);
        assert_eq!(None, t1.match_with(&mut t2, false));
        assert_eq!(Some(1), t1.other_atom(1));
        assert_eq!(None, t1.other_atom(2));
    }

    #[test]
    fn test_no_stale_reference_after_failure() {
        let mut symbols = SymbolTable::default();
        let mut t1 = module(&mut symbols, &["a", "b"], &[]);
        let mut t2 = module(&mut symbols, &["b"], &[]);
        let mut t3 = module(&mut symbols, &["x", "y", "a"], &[]);
        let index = NameIndex::attach(&t2);
        let options = CombineOptions {
            check_missing: true,
            ..Default::default()
        };
        assert_eq!(Some(1), t1.combine(&mut t2, &index, options));
        index.detach();
        let index = NameIndex::attach(&t3);
        assert_eq!(index.table(), t3.id());
        assert!(index.get(&symbols.intern("b")).is_none());
        assert_eq!(Some(2), t1.combine(&mut t3, &index, options));
        assert_eq!(Some(3), t1.other_atom(1));
        assert_eq!(None, t1.other_atom(2));
    }

    #[test]
    fn test_combine_with_index_of_another_table() {
        let mut symbols = SymbolTable::default();
        let mut t1 = module(&mut symbols, &["p"], &[]);
        let mut t2 = module(&mut symbols, &["q"], &[]);
        let t3 = module(&mut symbols, &["p"], &[]);
        let index = NameIndex::attach(&t3);
        assert_eq!(Some(1), t1.combine(&mut t2, &index, CombineOptions::default()));
        assert_eq!(None, t1.other_atom(1));
    }

    #[test]
    fn test_transfer_compute_statement() {
        let mut symbols = SymbolTable::default();
        let mut t1 = module(&mut symbols, &["a", "b", "c"], &[]);
        t1.set_status(1, AtomStatus::TRUE).unwrap();
        t1.set_status(2, AtomStatus::FALSE | AtomStatus::HEADOCC).unwrap();
        let mut t2 = module(&mut symbols, &["b", "a"], &[]);
        t1.transfer_compute_statement(&mut t2).unwrap();
        assert_eq!(AtomStatus::FALSE, t2.get_status(1).unwrap());
        assert_eq!(AtomStatus::TRUE, t2.get_status(2).unwrap());
    }
}
