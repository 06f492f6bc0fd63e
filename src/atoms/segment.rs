use super::{Atom, AtomStatus, TableId};
use crate::symbols::Symbol;
use std::{ops::RangeInclusive, rc::Rc};

/// A contiguous range of atoms of an [`AtomTable`](super::AtomTable).
///
/// A segment covers the atoms `offset+1` to `offset+count`.
/// For each of them, it stores an optional name, a status and, if cross-references were initialized, the corresponding atom in another table.
///
/// The output decorations (shift, prefix and postfix) are stored by each segment, but they are shared by all the segments of a table.
#[derive(Debug, Clone)]
pub struct Segment {
    count: usize,
    offset: usize,
    shift: i64,
    prefix: Rc<str>,
    postfix: Rc<str>,
    other: Option<TableId>,
    names: Vec<Option<Symbol>>,
    statuses: Vec<AtomStatus>,
    others: Option<Vec<Option<Atom>>>,
}

impl Segment {
    pub(crate) fn new(count: usize, offset: usize) -> Self {
        Self {
            count,
            offset,
            shift: 0,
            prefix: "".into(),
            postfix: "".into(),
            other: None,
            names: vec![None; count],
            statuses: vec![AtomStatus::empty(); count],
            others: None,
        }
    }

    /// Builds an empty segment sharing the decorations and the cross-reference link of this one.
    pub(crate) fn new_sibling(&self, count: usize, offset: usize) -> Self {
        let mut sibling = Segment::new(count, offset);
        sibling.shift = self.shift;
        sibling.prefix = Rc::clone(&self.prefix);
        sibling.postfix = Rc::clone(&self.postfix);
        if let Some(id) = self.other {
            sibling.init_others(id);
        }
        sibling
    }

    /// Returns the number of atoms in this segment.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the offset of this segment.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the atoms covered by this segment.
    pub fn atoms(&self) -> RangeInclusive<Atom> {
        self.offset + 1..=self.offset + self.count
    }

    /// Returns `true` iff the atom belongs to this segment.
    pub fn contains(&self, atom: Atom) -> bool {
        atom > self.offset && atom <= self.offset + self.count
    }

    /// Returns `true` iff some atom belongs to both this segment and the range `(offset, offset+count]`.
    pub(crate) fn overlaps(&self, count: usize, offset: usize) -> bool {
        count > 0 && self.count > 0 && offset < self.offset + self.count && self.offset < offset + count
    }

    /// Returns the output shift.
    pub fn shift(&self) -> i64 {
        self.shift
    }

    /// Returns the prefix added to symbolic names.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the postfix added to symbolic names.
    pub fn postfix(&self) -> &str {
        &self.postfix
    }

    /// Returns the identifier of the cross-referenced table, if any.
    pub fn other(&self) -> Option<TableId> {
        self.other
    }

    fn index(&self, atom: Atom) -> Option<usize> {
        if self.contains(atom) {
            Some(atom - self.offset - 1)
        } else {
            None
        }
    }

    fn slot(&self, atom: Atom) -> usize {
        atom - self.offset - 1
    }

    /// Returns the name of an atom of this segment.
    ///
    /// `None` is returned if the atom is anonymous or does not belong to this segment.
    pub fn name(&self, atom: Atom) -> Option<&Symbol> {
        self.index(atom).and_then(|i| self.names[i].as_ref())
    }

    /// Returns the status of an atom of this segment, or `None` if the atom does not belong to it.
    pub fn status(&self, atom: Atom) -> Option<AtomStatus> {
        self.index(atom).map(|i| self.statuses[i])
    }

    /// Returns the atom of the cross-referenced table associated with an atom of this segment, if any.
    pub fn other_atom(&self, atom: Atom) -> Option<Atom> {
        self.index(atom)
            .and_then(|i| self.others.as_ref().and_then(|o| o[i]))
    }

    pub(crate) fn set_name(&mut self, atom: Atom, name: Option<Symbol>) {
        let i = self.slot(atom);
        self.names[i] = name;
    }

    pub(crate) fn status_mut(&mut self, atom: Atom) -> &mut AtomStatus {
        let i = self.slot(atom);
        &mut self.statuses[i]
    }

    pub(crate) fn set_other_atom(&mut self, atom: Atom, other_atom: Atom) {
        let i = self.slot(atom);
        if let Some(o) = self.others.as_mut() {
            o[i] = Some(other_atom);
        }
    }

    pub(crate) fn init_others(&mut self, other: TableId) {
        self.other = Some(other);
        self.others = Some(vec![None; self.count]);
    }

    pub(crate) fn has_others(&self) -> bool {
        self.others.is_some()
    }

    pub(crate) fn set_shift(&mut self, shift: i64) {
        self.shift = shift;
    }

    pub(crate) fn set_prefix(&mut self, prefix: Rc<str>) {
        self.prefix = prefix;
    }

    pub(crate) fn set_postfix(&mut self, postfix: Rc<str>) {
        self.postfix = postfix;
    }

    /// Iterates over the atoms of this segment, together with their names and statuses.
    pub fn iter(&self) -> impl Iterator<Item = (Atom, Option<&Symbol>, AtomStatus)> + '_ {
        self.names
            .iter()
            .zip(self.statuses.iter())
            .enumerate()
            .map(move |(i, (n, s))| (i + self.offset + 1, n.as_ref(), *s))
    }

    pub(crate) fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (Atom, Option<&Symbol>, &mut AtomStatus)> + '_ {
        let offset = self.offset;
        self.names
            .iter()
            .zip(self.statuses.iter_mut())
            .enumerate()
            .map(move |(i, (n, s))| (i + offset + 1, n.as_ref(), s))
    }

    /// Moves the content of this segment into a larger one.
    pub(crate) fn move_into(self, target: &mut Segment) {
        let delta = self.offset - target.offset;
        let others = self.others;
        for (i, (name, status)) in self.names.into_iter().zip(self.statuses).enumerate() {
            target.names[i + delta] = name;
            target.statuses[i + delta] = status;
        }
        if let (Some(from), Some(to)) = (others, target.others.as_mut()) {
            for (i, o) in from.into_iter().enumerate() {
                to[i + delta] = o;
            }
        }
    }
}
