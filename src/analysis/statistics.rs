use crate::{io::Instance, rules::RuleType};
use anyhow::{Context, Result};
use std::io::Write;
use strum::IntoEnumIterator;

/// The rule types detailed by [`ProgramStatistics::write_summary`], with their labels.
const DETAILED_TYPES: [(RuleType, &str); 6] = [
    (RuleType::Basic, "normal"),
    (RuleType::Choice, "choice"),
    (RuleType::Constraint, "cardinality"),
    (RuleType::Weight, "weight"),
    (RuleType::Disjunctive, "disjunctive"),
    (RuleType::Optimize, "optimization"),
];

/// Size measures of a program or a CNF formula.
///
/// # Example
///
/// ```
/// # use lptools::{analysis::ProgramStatistics, io::{InstanceReader, SmodelsReader}, rules::RuleType, symbols::SymbolTable};
/// let mut symbols = SymbolTable::default();
/// let instance = SmodelsReader::default()
///     .read(&mut "1 1 1 1 2\n3 1 2 0 0\n0\n1 a\n0\nB+\n1\n0\nB-\n0\n1\n".as_bytes(), &mut symbols)
///     .unwrap();
/// let stats = ProgramStatistics::new(&instance);
/// assert_eq!(2, stats.atoms());
/// assert_eq!(2, stats.rules());
/// assert_eq!(1, stats.rules_of_type(RuleType::Choice));
/// assert_eq!(5 + 5 + 1, stats.integers());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramStatistics {
    cnf: bool,
    atoms: usize,
    rules: usize,
    rules_by_type: Vec<(RuleType, usize)>,
    integers: usize,
}

impl ProgramStatistics {
    /// Computes the statistics of an instance.
    ///
    /// The number of integers is the one needed to write the rules in the Smodels format (the clauses in the DIMACS format);
    /// for programs, the integers of the compute statement are included.
    pub fn new(instance: &Instance) -> Self {
        let program = instance.program();
        let cnf = instance.is_cnf();
        let mut integers = program.internal_length();
        if !cnf {
            integers += instance.atoms().compute_statement_len();
        }
        Self {
            cnf,
            atoms: instance.atoms().table_size(),
            rules: program.number_of_rules(),
            rules_by_type: RuleType::iter()
                .map(|t| (t, program.count_rules(t)))
                .collect(),
            integers,
        }
    }

    /// Returns `true` iff the statistics are the ones of a CNF formula.
    pub fn is_cnf(&self) -> bool {
        self.cnf
    }

    /// Returns the number of atoms.
    pub fn atoms(&self) -> usize {
        self.atoms
    }

    /// Returns the number of rules (or clauses).
    pub fn rules(&self) -> usize {
        self.rules
    }

    /// Returns the number of rules of the given type.
    pub fn rules_of_type(&self, rule_type: RuleType) -> usize {
        self.rules_by_type
            .iter()
            .find(|(t, _)| *t == rule_type)
            .map(|(_, n)| *n)
            .unwrap_or_default()
    }

    /// Returns the number of integers in the internal format.
    pub fn integers(&self) -> usize {
        self.integers
    }

    /// Writes a human readable summary of these statistics.
    ///
    /// Integrity constraints and clauses are only counted in the total; other rule types with no rule are omitted.
    pub fn write_summary(&self, writer: &mut dyn Write, name: &str) -> Result<()> {
        let context = "while writing statistics";
        let kind = if self.cnf { "CNF" } else { "Program" };
        writeln!(writer, "{} {} in numbers:", kind, name).context(context)?;
        writeln!(writer, " - {} atom(s)", self.atoms).context(context)?;
        writeln!(writer, " - {} rule(s)", self.rules).context(context)?;
        for (rule_type, label) in DETAILED_TYPES.iter() {
            let n = self.rules_of_type(*rule_type);
            if n > 0 {
                writeln!(writer, "   {} {}", n, label).context(context)?;
            }
        }
        writeln!(
            writer,
            " - {} integer(s) in internal format",
            self.integers
        )
        .context(context)?;
        writer.flush().context(context)
    }
}
