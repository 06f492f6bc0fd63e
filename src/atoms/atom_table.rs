use super::{Atom, AtomStatus, Segment};
use crate::{
    symbols::{Symbol, SymbolTable},
    utils::LpError,
};
use anyhow::{anyhow, Result};
use std::{
    rc::Rc,
    sync::atomic::{AtomicUsize, Ordering},
};

/// The identifier of an [`AtomTable`], used to refer to cross-referenced tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

static NEXT_TABLE_ID: AtomicUsize = AtomicUsize::new(0);

impl TableId {
    fn next() -> Self {
        TableId(NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// The table mapping the atoms of a program to their names and statuses.
///
/// An atom table is made of a sequence of disjoint [`Segment`]s.
/// The first one is created with the table, and new ones are added by [`extend`](Self::extend) when atoms outside the current ranges must be recorded.
/// Segments are kept in insertion order, which is the order used to look for atoms.
///
/// # Example
///
/// ```
/// # use lptools::{atoms::{AtomStatus, AtomTable}, symbols::SymbolTable};
/// let mut symbols = SymbolTable::default();
/// let mut table = AtomTable::new(2, 0);
/// table.extend(2, 5).unwrap();
/// table.set_name(6, symbols.intern("a")).unwrap();
/// table.set_status(6, AtomStatus::TRUE).unwrap();
/// assert_eq!(7, table.table_size());
/// assert_eq!(Some(6), table.find_atom_by_name("a"));
/// assert!(table.get_status(4).is_err());
/// ```
#[derive(Debug)]
pub struct AtomTable {
    id: TableId,
    segments: Vec<Segment>,
}

impl AtomTable {
    /// Builds a new table made of a single segment covering the atoms `offset+1` to `offset+count`.
    pub fn new(count: usize, offset: usize) -> Self {
        Self {
            id: TableId::next(),
            segments: vec![Segment::new(count, offset)],
        }
    }

    /// Returns the identifier of this table.
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Appends a new segment covering the atoms `offset+1` to `offset+count`.
    ///
    /// The new segment inherits the decorations and the cross-reference link of the first segment.
    /// An error is returned if the new segment would overlap an existing one.
    pub fn extend(&mut self, count: usize, offset: usize) -> Result<&mut Segment> {
        if self.segments.iter().any(|s| s.overlaps(count, offset)) {
            return Err(anyhow!(LpError::OverlappingSegment(offset, offset + count)));
        }
        let segment = self.segments[0].new_sibling(count, offset);
        self.segments.push(segment);
        let last = self.segments.len() - 1;
        Ok(&mut self.segments[last])
    }

    /// Returns the segments of this table, in insertion order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the segment containing the atom, if any.
    pub fn find_segment(&self, atom: Atom) -> Option<&Segment> {
        self.segments.iter().find(|s| s.contains(atom))
    }

    fn segment(&self, atom: Atom) -> Result<&Segment> {
        self.find_segment(atom)
            .ok_or_else(|| anyhow!(LpError::AtomOutOfRange(atom)))
    }

    fn segment_mut(&mut self, atom: Atom) -> Result<&mut Segment> {
        self.segments
            .iter_mut()
            .find(|s| s.contains(atom))
            .ok_or_else(|| anyhow!(LpError::AtomOutOfRange(atom)))
    }

    /// Returns `true` iff the atom belongs to a segment of this table.
    pub fn contains(&self, atom: Atom) -> bool {
        self.find_segment(atom).is_some()
    }

    /// Rewrites this table into a table made of a single segment.
    ///
    /// The new segment starts at the lowest offset of the segments and ends at the [table size](Self::table_size).
    /// Atoms that were not covered by a segment are anonymous and unmarked.
    pub fn compact(self) -> AtomTable {
        let offset = self.segments.iter().map(|s| s.offset()).min().unwrap_or(0);
        let size = self.table_size();
        let id = self.id;
        let mut target = self.segments[0].new_sibling(size - offset, offset);
        for segment in self.segments {
            segment.move_into(&mut target);
        }
        AtomTable {
            id,
            segments: vec![target],
        }
    }

    /// Appends the segments of another table to this one.
    ///
    /// The appended segments keep their own decorations.
    /// An error is returned if a segment of the other table overlaps a segment of this one.
    pub fn append(&mut self, other: AtomTable) -> Result<()> {
        for s in other.segments.iter() {
            if self.segments.iter().any(|t| t.overlaps(s.count(), s.offset())) {
                return Err(anyhow!(LpError::OverlappingSegment(
                    s.offset(),
                    s.offset() + s.count()
                )));
            }
        }
        self.segments.extend(other.segments);
        Ok(())
    }

    /// Returns the highest atom covered by this table.
    pub fn table_size(&self) -> usize {
        self.segments
            .iter()
            .map(|s| s.offset() + s.count())
            .max()
            .unwrap_or(0)
    }

    /// Sets the name of an atom.
    pub fn set_name(&mut self, atom: Atom, name: Symbol) -> Result<()> {
        self.segment_mut(atom)?.set_name(atom, Some(name));
        Ok(())
    }

    /// Returns the name of an atom, or `None` if the atom is anonymous or out of the table.
    pub fn find_name(&self, atom: Atom) -> Option<&Symbol> {
        self.find_segment(atom).and_then(|s| s.name(atom))
    }

    /// Records the module defining the atom, provided it has a name.
    ///
    /// Returns `false` if the atom is anonymous or out of the table.
    pub fn set_module(&self, atom: Atom, module: usize) -> bool {
        match self.find_name(atom) {
            Some(name) => {
                name.set_module(module);
                true
            }
            None => false,
        }
    }

    /// Sets the bits of the mask in the status of an atom.
    pub fn set_status(&mut self, atom: Atom, mask: AtomStatus) -> Result<()> {
        *self.segment_mut(atom)?.status_mut(atom) |= mask;
        Ok(())
    }

    /// Sets the bits of the mask in the status of each atom.
    ///
    /// All atoms in the table are updated even if some are not; in this case, the error refers to the first missing atom.
    pub fn set_statuses(&mut self, atoms: &[Atom], mask: AtomStatus) -> Result<()> {
        let mut result = Ok(());
        for a in atoms {
            let r = self.set_status(*a, mask);
            if result.is_ok() {
                result = r;
            }
        }
        result
    }

    /// Clears the bits of the mask in the status of an atom.
    pub fn clear_status(&mut self, atom: Atom, mask: AtomStatus) -> Result<()> {
        self.segment_mut(atom)?.status_mut(atom).remove(mask);
        Ok(())
    }

    /// Returns the status of an atom.
    pub fn get_status(&self, atom: Atom) -> Result<AtomStatus> {
        self.segment(atom)?
            .status(atom)
            .ok_or_else(|| anyhow!(LpError::AtomOutOfRange(atom)))
    }

    /// Sets the bits of the mask in the status of the first atom with the given name.
    ///
    /// Returns `false` if no atom has this name.
    pub fn set_status_by_name(&mut self, name: &str, mask: AtomStatus) -> bool {
        match self.find_atom_by_name(name) {
            Some(a) => self.set_status(a, mask).is_ok(),
            None => false,
        }
    }

    /// Returns the first atom with the given name, if any.
    pub fn find_atom_by_name(&self, name: &str) -> Option<Atom> {
        self.iter()
            .find(|(_, n, _)| n.map(|s| s.name() == name).unwrap_or(false))
            .map(|(a, _, _)| a)
    }

    /// Returns the first anonymous atom, if any.
    pub fn find_invisible(&self) -> Option<Atom> {
        self.iter().find(|(_, n, _)| n.is_none()).map(|(a, _, _)| a)
    }

    /// Gives a name to each anonymous atom, made of the prefix followed by the atom.
    pub fn name_invisible_atoms(&mut self, prefix: &str, symbols: &mut SymbolTable) {
        for segment in self.segments.iter_mut() {
            for atom in segment.atoms() {
                if segment.name(atom).is_none() {
                    segment.set_name(atom, Some(symbols.intern(&format!("{}{}", prefix, atom))));
                }
            }
        }
    }

    /// Sets the shift applied to atoms when they are written.
    pub fn set_shift(&mut self, shift: i64) {
        self.segments.iter_mut().for_each(|s| s.set_shift(shift));
    }

    /// Sets the prefix added to symbolic names when they are written.
    pub fn set_prefix(&mut self, prefix: &str) {
        let prefix: Rc<str> = prefix.into();
        self.segments
            .iter_mut()
            .for_each(|s| s.set_prefix(Rc::clone(&prefix)));
    }

    /// Sets the postfix added to symbolic names when they are written.
    pub fn set_postfix(&mut self, postfix: &str) {
        let postfix: Rc<str> = postfix.into();
        self.segments
            .iter_mut()
            .for_each(|s| s.set_postfix(Rc::clone(&postfix)));
    }

    /// Enables cross-references from this table to another one.
    ///
    /// Previous cross-references are discarded.
    pub fn initialize_other_tables(&mut self, other: &AtomTable) {
        let id = other.id();
        self.segments.iter_mut().for_each(|s| s.init_others(id));
    }

    pub(crate) fn ensure_other_tables(&mut self, other: &AtomTable) {
        let id = other.id();
        self.segments
            .iter_mut()
            .filter(|s| s.other() != Some(id) || !s.has_others())
            .for_each(|s| s.init_others(id));
    }

    /// Returns the atom of the cross-referenced table associated with an atom, if any.
    pub fn other_atom(&self, atom: Atom) -> Option<Atom> {
        self.find_segment(atom).and_then(|s| s.other_atom(atom))
    }

    pub(crate) fn set_other_atom(&mut self, atom: Atom, other_atom: Atom) -> Result<()> {
        self.segment_mut(atom)?.set_other_atom(atom, other_atom);
        Ok(())
    }

    /// Returns the number of integers needed to write the compute statement and the input atoms in the Smodels format.
    pub fn compute_statement_len(&self) -> usize {
        self.iter()
            .map(|(_, _, s)| {
                [AtomStatus::TRUE, AtomStatus::FALSE, AtomStatus::INPUT]
                    .iter()
                    .filter(|m| s.contains(**m))
                    .count()
            })
            .sum()
    }

    /// Iterates over the atoms of this table, together with their names and statuses.
    ///
    /// Atoms are given segment by segment, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Atom, Option<&Symbol>, AtomStatus)> + '_ {
        self.segments.iter().flat_map(|s| s.iter())
    }

    pub(crate) fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (Atom, Option<&Symbol>, &mut AtomStatus)> + '_ {
        self.segments.iter_mut().flat_map(|s| s.iter_mut())
    }
}

impl Clone for AtomTable {
    /// Copies the table; the copy gets its own identifier.
    fn clone(&self) -> Self {
        Self {
            id: TableId::next(),
            segments: self.segments.clone(),
        }
    }
}
