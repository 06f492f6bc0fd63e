use strum_macros::{Display, EnumIter, EnumString, EnumVariantNames};

/// The textual forms a program can be written in.
///
/// The string representation of a style is the lowercase name of the variant, as expected by the command line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, EnumVariantNames,
)]
#[strum(serialize_all = "lowercase")]
pub enum OutputStyle {
    /// Symbolic rules, as accepted by `lparse`.
    Readable,
    /// The numeric format consumed by `smodels`.
    Smodels,
    /// DIMACS clauses, for CNF formulas only.
    Dimacs,
    /// The intermediate format of the `clingo` toolchain.
    Aspif,
    /// Symbolic rules for the `gnt` solver.
    Gnt,
    /// Symbolic rules for the `dlv` solver.
    Dlv,
}

impl OutputStyle {
    /// Returns `true` iff atoms and rules are written using symbolic names.
    pub fn is_symbolic(&self) -> bool {
        matches!(
            self,
            OutputStyle::Readable | OutputStyle::Gnt | OutputStyle::Dlv
        )
    }

    /// Returns `true` iff atoms are written as plain numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, OutputStyle::Smodels | OutputStyle::Aspif)
    }
}
