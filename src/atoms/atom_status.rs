use bitflags::bitflags;

bitflags! {
    /// The status bits attached to each atom of an [`AtomTable`](super::AtomTable).
    ///
    /// Bits are independent from each other; they are set by the readers and the analysis passes,
    /// and consumed by the writers and the transformations.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AtomStatus: u32 {
        /// True in the compute statement.
        const TRUE = 0x001;
        /// False in the compute statement.
        const FALSE = 0x002;
        /// Occurs in a positive body.
        const POSOCC = 0x004;
        /// Occurs in a negative body.
        const NEGOCC = 0x008;
        /// Occurs in a rule head.
        const HEADOCC = 0x010;
        /// Has a name.
        const VISIBLE = 0x020;
        /// Defined elsewhere.
        const INPUT = 0x040;
        /// At a module border.
        const BORDER = 0x080;
        /// Uniquely defined.
        const UNIQUE = 0x100;
        /// Has other defining rules.
        const ODEF = 0x200;
        /// The definition is trivialized by a fact.
        const FACT = 0x400;
        /// Occurs in a bodyless choice.
        const CHOICE = 0x800;
        /// Either true or false in the compute statement.
        const TRUE_OR_FALSE = Self::TRUE.bits() | Self::FALSE.bits();
        /// Occurs in a body, either positively or negatively.
        const BODYOCC = Self::POSOCC.bits() | Self::NEGOCC.bits();
    }
}

/// The letters used to display the status bits, in display order.
pub(crate) const STATUS_LETTERS: [(AtomStatus, char); 7] = [
    (AtomStatus::TRUE, 'T'),
    (AtomStatus::FALSE, 'F'),
    (AtomStatus::HEADOCC, 'H'),
    (AtomStatus::POSOCC, 'P'),
    (AtomStatus::NEGOCC, 'N'),
    (AtomStatus::VISIBLE, 'V'),
    (AtomStatus::INPUT, 'I'),
];
