//! Atom tables, status bits and cross references between tables.

/// The type of atoms, given by their numbers.
///
/// Atom `0` never denotes an atom; it is used as a terminator by the input formats.
pub type Atom = usize;

mod atom_status;
pub use atom_status::AtomStatus;
pub(crate) use atom_status::STATUS_LETTERS;

mod atom_table;
pub use atom_table::AtomTable;
pub use atom_table::TableId;

mod cross_reference;
pub use cross_reference::CombineOptions;
pub use cross_reference::NameIndex;

mod segment;
pub use segment::Segment;
