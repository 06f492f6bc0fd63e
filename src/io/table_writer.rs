use super::{Instance, InstanceHeader, OutputStyle, ProgramWriter};
use crate::{
    atoms::{AtomStatus, AtomTable, STATUS_LETTERS},
    rules::Program,
};
use anyhow::{Context, Result};
use std::io::Write;

/// Returns the letters of the status bits given by [`write_status`].
pub(crate) fn status_letters(status: AtomStatus) -> String {
    STATUS_LETTERS
        .iter()
        .filter(|(flag, _)| status.contains(*flag))
        .map(|(_, letter)| *letter)
        .collect()
}

/// Writes the main status bits of an atom as letters.
///
/// The letters `T`, `F`, `H`, `P`, `N`, `V` and `I` respectively stand for
/// true, false, occurring in a head, occurring positively, occurring negatively, visible and input atoms.
///
/// # Example
///
/// ```
/// # use lptools::{atoms::AtomStatus, io::write_status};
/// let mut buffer = Vec::new();
/// write_status(&mut buffer, AtomStatus::INPUT | AtomStatus::TRUE).unwrap();
/// assert_eq!("TI", String::from_utf8(buffer).unwrap());
/// ```
pub fn write_status(writer: &mut dyn Write, status: AtomStatus) -> Result<()> {
    write!(writer, "{}", status_letters(status)).context("while writing an atom status")
}

impl ProgramWriter {
    /// Writes the symbol table.
    ///
    /// Symbolic styles write a comment line per atom, giving its internal name, its name and its status.
    /// The other styles only write the named atoms, using their own syntax.
    pub fn write_symbols(&self, writer: &mut dyn Write, table: &AtomTable) -> Result<()> {
        let context = "while writing the symbol table";
        for segment in table.segments() {
            for (atom, name, status) in segment.iter() {
                let number = atom as i64 + segment.shift();
                match (self.style(), name) {
                    (OutputStyle::Readable | OutputStyle::Gnt | OutputStyle::Dlv, _) => {
                        let letters = status_letters(status);
                        let repr = self.atom_to_string(atom, table)?;
                        if letters.is_empty() {
                            writeln!(writer, "% _{} = {}", number, repr)
                        } else {
                            writeln!(writer, "% _{} = {}: {}", number, repr, letters)
                        }
                        .context(context)?;
                    }
                    (OutputStyle::Smodels, Some(_)) => {
                        let repr = ProgramWriter::new(OutputStyle::Readable).atom_to_string(atom, table)?;
                        writeln!(writer, "{} {}", number, repr).context(context)?;
                    }
                    (OutputStyle::Aspif, Some(n)) => {
                        writeln!(writer, "4 {} {} 1 {}", n.name().len(), n.name(), number)
                            .context(context)?;
                    }
                    (OutputStyle::Dimacs, Some(_)) => {
                        let repr = self.atom_to_string(atom, table)?;
                        writeln!(writer, "c {} {}", number, repr).context(context)?;
                    }
                    (_, None) => {}
                }
            }
        }
        writer.flush().context(context)
    }

    /// Writes the atoms whose status intersects the mask, as expected in a compute statement.
    ///
    /// The `readable` and `gnt` styles write a comma-separated list of literals with no line break, to be enclosed in a `compute` statement;
    /// in the `gnt` style, input atoms are written as choices between the atom and a primed copy.
    /// The `smodels` style writes an atom number per line, the `aspif` and `dlv` styles write a statement per atom and status bit.
    /// Nothing is written in the `dimacs` style.
    pub fn write_compute_statement(
        &self,
        writer: &mut dyn Write,
        table: &AtomTable,
        mask: AtomStatus,
    ) -> Result<()> {
        let context = "while writing a compute statement";
        let mut literals = Vec::new();
        let mut lines = Vec::new();
        for segment in table.segments() {
            for (atom, _, status) in segment.iter() {
                let selected = status & mask;
                if selected.is_empty() {
                    continue;
                }
                let number = atom as i64 + segment.shift();
                let repr = self.atom_to_string(atom, table)?;
                match self.style() {
                    OutputStyle::Readable | OutputStyle::Gnt => {
                        if selected.contains(AtomStatus::TRUE) {
                            literals.push(repr.clone());
                        }
                        if selected.contains(AtomStatus::FALSE) {
                            literals.push(format!("not {}", repr));
                        }
                        if selected.contains(AtomStatus::INPUT) {
                            if self.style() == OutputStyle::Readable {
                                literals.push(repr);
                            } else {
                                lines.push(format!("{{{},{}'}}.", repr, repr));
                            }
                        }
                    }
                    OutputStyle::Smodels => lines.push(number.to_string()),
                    OutputStyle::Aspif => {
                        if selected.contains(AtomStatus::TRUE) {
                            lines.push(format!("6 1 {}", number));
                        }
                        if selected.contains(AtomStatus::FALSE) {
                            lines.push(format!("6 1 -{}", number));
                        }
                        if selected.contains(AtomStatus::INPUT) {
                            lines.push(format!("5 {} 0", number));
                        }
                    }
                    OutputStyle::Dlv => {
                        if selected.contains(AtomStatus::TRUE) {
                            lines.push(format!(":- not {}.", repr));
                        }
                        if selected.contains(AtomStatus::FALSE) {
                            lines.push(format!(":- {}.", repr));
                        }
                        if selected.contains(AtomStatus::INPUT) {
                            lines.push(format!("{} v int{}.", repr, repr));
                        }
                    }
                    OutputStyle::Dimacs => {}
                }
            }
        }
        write!(writer, "{}", literals.join(", ")).context(context)?;
        lines
            .iter()
            .try_for_each(|l| writeln!(writer, "{}", l).context(context))?;
        writer.flush().context(context)
    }

    /// Writes a choice rule over the named input atoms, if any.
    ///
    /// The `dlv` style writes a disjunction between each input atom and a fresh atom instead; nothing is written in the `dimacs` style.
    pub fn write_input(&self, writer: &mut dyn Write, table: &AtomTable) -> Result<()> {
        let context = "while writing the input atoms";
        let inputs = table
            .iter()
            .filter(|(_, n, s)| n.is_some() && s.contains(AtomStatus::INPUT))
            .map(|(a, _, _)| self.atom_to_string(a, table))
            .collect::<Result<Vec<String>>>()?;
        if inputs.is_empty() {
            return Ok(());
        }
        match self.style() {
            OutputStyle::Readable | OutputStyle::Gnt => {
                writeln!(writer, "{{ {} }}.", inputs.join(", ")).context(context)?
            }
            OutputStyle::Smodels => {
                writeln!(writer, "3 {} {} 0 0", inputs.len(), inputs.join(" ")).context(context)?
            }
            OutputStyle::Aspif => {
                writeln!(writer, "1 1 {} {} 0 0", inputs.len(), inputs.join(" ")).context(context)?
            }
            OutputStyle::Dlv => inputs
                .iter()
                .try_for_each(|a| writeln!(writer, "{} v int{}.", a, a).context(context))?,
            OutputStyle::Dimacs => {}
        }
        writer.flush().context(context)
    }

    /// Writes a complete program in the Smodels format: the rules, the symbol table and the compute statement.
    ///
    /// The result can be read back by a [`SmodelsReader`](super::SmodelsReader).
    /// The style of this writer is not taken into account.
    pub fn write_smodels_document(
        &self,
        writer: &mut dyn Write,
        program: &Program,
        table: &AtomTable,
        models: i64,
    ) -> Result<()> {
        let smodels = ProgramWriter::new(OutputStyle::Smodels);
        let context = "while writing a Smodels program";
        smodels.write_program(writer, program, table)?;
        writeln!(writer, "0").context(context)?;
        smodels.write_symbols(writer, table)?;
        writeln!(writer, "0").context(context)?;
        for (marker, mask) in [
            ("B+", AtomStatus::TRUE),
            ("B-", AtomStatus::FALSE),
            ("E", AtomStatus::INPUT),
        ] {
            writeln!(writer, "{}", marker).context(context)?;
            smodels.write_compute_statement(writer, table, mask)?;
            writeln!(writer, "0").context(context)?;
        }
        writeln!(writer, "{}", models).context(context)?;
        writer.flush().context(context)
    }

    /// Writes an instance for a human reader or another solver.
    ///
    /// Programs are followed by their compute statement and input atoms; the symbol table is appended on request for symbolic styles.
    /// The `smodels` style writes a complete Smodels program, and the `aspif` style a complete ASPIF program.
    /// CNF formulas are preceded by a summary of their problem line and by their named atoms.
    pub fn write_listing(
        &self,
        writer: &mut dyn Write,
        instance: &Instance,
        with_symbols: bool,
    ) -> Result<()> {
        let context = "while writing a listing";
        let program = instance.program();
        let table = instance.atoms();
        match *instance.header() {
            InstanceHeader::Cnf {
                weighted,
                max_weight,
                ..
            } => {
                self.check_program(program)?;
                let summary = format!(
                    "{}CNF with {} vars {} clauses{}",
                    if weighted { "weighted " } else { "" },
                    table.table_size(),
                    program.number_of_rules(),
                    max_weight
                        .map(|w| format!(" (max weight = {})", w))
                        .unwrap_or_default()
                );
                if self.style() == OutputStyle::Dimacs {
                    writeln!(writer, "c {}", summary).context(context)?;
                } else {
                    writeln!(writer, "% {}", summary).context(context)?;
                }
                self.write_symbols(writer, table)?;
                self.write_cnf(writer, program, table)?;
            }
            InstanceHeader::Smodels { models } => match self.style() {
                OutputStyle::Smodels => {
                    self.write_smodels_document(writer, program, table, models)?
                }
                OutputStyle::Aspif => {
                    self.check_program(program)?;
                    writeln!(writer, "asp 1 0 0").context(context)?;
                    self.write_program(writer, program, table)?;
                    self.write_compute_statement(
                        writer,
                        table,
                        AtomStatus::TRUE_OR_FALSE | AtomStatus::INPUT,
                    )?;
                    self.write_symbols(writer, table)?;
                    writeln!(writer, "0").context(context)?;
                }
                style => {
                    self.check_program(program)?;
                    self.write_program(writer, program, table)?;
                    if style == OutputStyle::Dlv {
                        self.write_compute_statement(writer, table, AtomStatus::TRUE_OR_FALSE)?;
                    } else {
                        write!(writer, "\n#compute {{").context(context)?;
                        self.write_compute_statement(writer, table, AtomStatus::TRUE_OR_FALSE)?;
                        writeln!(writer, "}}.").context(context)?;
                    }
                    if style == OutputStyle::Readable {
                        self.write_input(writer, table)?;
                    } else {
                        self.write_compute_statement(writer, table, AtomStatus::INPUT)?;
                    }
                    if with_symbols {
                        writeln!(writer, "\n% Symbol table:").context(context)?;
                        self.write_symbols(writer, table)?;
                    }
                }
            },
        }
        writer.flush().context(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        io::{DimacsReader, InstanceReader, SmodelsReader},
        symbols::SymbolTable,
        utils::LpError,
    };
    use std::io::BufWriter;

    const PROGRAM: &str = "1 1 1 1 2\n3 1 3 0 0\n0\n1 a\n2 b\n3 c\n0\nB+\n1\n0\nB-\n2\n0\nE\n3\n0\n1\n";

    fn read_program(s: &str) -> Instance {
        SmodelsReader::default()
            .read(&mut s.as_bytes(), &mut SymbolTable::default())
            .unwrap()
    }

    fn read_cnf(s: &str) -> Instance {
        DimacsReader::default()
            .read(&mut s.as_bytes(), &mut SymbolTable::default())
            .unwrap()
    }

    fn listing(style: OutputStyle, instance: &Instance, with_symbols: bool) -> Result<String> {
        let mut buffer = BufWriter::new(Vec::new());
        ProgramWriter::new(style).write_listing(&mut buffer, instance, with_symbols)?;
        Ok(String::from_utf8(buffer.into_inner().unwrap()).unwrap())
    }

    #[test]
    fn test_status_letters() {
        assert_eq!("", status_letters(AtomStatus::empty()));
        assert_eq!("", status_letters(AtomStatus::UNIQUE));
        assert_eq!("TFHPNVI", status_letters(AtomStatus::all()));
        assert_eq!("HN", status_letters(AtomStatus::NEGOCC | AtomStatus::HEADOCC));
    }

    #[test]
    fn test_write_symbols() {
        let instance = read_program(PROGRAM);
        let write = |style| {
            let mut buffer = BufWriter::new(Vec::new());
            ProgramWriter::new(style)
                .write_symbols(&mut buffer, instance.atoms())
                .unwrap();
            String::from_utf8(buffer.into_inner().unwrap()).unwrap()
        };
        assert_eq!("% _1 = a: T\n% _2 = b: F\n% _3 = c: I\n", write(OutputStyle::Readable));
        assert_eq!("1 a\n2 b\n3 c\n", write(OutputStyle::Smodels));
        assert_eq!("4 1 a 1 1\n4 1 b 1 2\n4 1 c 1 3\n", write(OutputStyle::Aspif));
        assert_eq!("c 1 a\nc 2 b\nc 3 c\n", write(OutputStyle::Dimacs));
    }

    #[test]
    fn test_write_symbols_skips_anonymous_atoms() {
        let instance = read_program("1 2 0 0\n0\n1 a\n0\nB+\n0\nB-\n0\n1\n");
        let mut buffer = BufWriter::new(Vec::new());
        ProgramWriter::new(OutputStyle::Smodels)
            .write_symbols(&mut buffer, instance.atoms())
            .unwrap();
        ProgramWriter::new(OutputStyle::Dlv)
            .write_symbols(&mut buffer, instance.atoms())
            .unwrap();
        assert_eq!(
            "1 a\n% _1 = a\n% _2 = int2\n",
            String::from_utf8(buffer.into_inner().unwrap()).unwrap()
        );
    }

    #[test]
    fn test_write_compute_statement() {
        let instance = read_program(PROGRAM);
        let write = |style, mask| {
            let mut buffer = BufWriter::new(Vec::new());
            ProgramWriter::new(style)
                .write_compute_statement(&mut buffer, instance.atoms(), mask)
                .unwrap();
            String::from_utf8(buffer.into_inner().unwrap()).unwrap()
        };
        let all = AtomStatus::TRUE_OR_FALSE | AtomStatus::INPUT;
        assert_eq!("a, not b, c", write(OutputStyle::Readable, all));
        assert_eq!("a, not b{c,c'}.\n", write(OutputStyle::Gnt, all));
        assert_eq!("1\n", write(OutputStyle::Smodels, AtomStatus::TRUE));
        assert_eq!("6 1 1\n6 1 -2\n5 3 0\n", write(OutputStyle::Aspif, all));
        assert_eq!(":- not a.\n:- b.\nc v intc.\n", write(OutputStyle::Dlv, all));
        assert_eq!("", write(OutputStyle::Dimacs, all));
    }

    #[test]
    fn test_write_input() {
        let instance = read_program(PROGRAM);
        let write = |style| {
            let mut buffer = BufWriter::new(Vec::new());
            ProgramWriter::new(style)
                .write_input(&mut buffer, instance.atoms())
                .unwrap();
            String::from_utf8(buffer.into_inner().unwrap()).unwrap()
        };
        assert_eq!("{ c }.\n", write(OutputStyle::Readable));
        assert_eq!("3 1 3 0 0\n", write(OutputStyle::Smodels));
        assert_eq!("1 1 1 3 0 0\n", write(OutputStyle::Aspif));
        assert_eq!("c v intc.\n", write(OutputStyle::Dlv));
    }

    #[test]
    fn test_smodels_document_roundtrip() {
        let instance = read_program(PROGRAM);
        let mut buffer = BufWriter::new(Vec::new());
        ProgramWriter::new(OutputStyle::Readable)
            .write_smodels_document(&mut buffer, instance.program(), instance.atoms(), 1)
            .unwrap();
        let text = String::from_utf8(buffer.into_inner().unwrap()).unwrap();
        assert_eq!(
            "1 1 1 1 2\n3 1 3 0 0\n0\n1 a\n2 b\n3 c\n0\nB+\n1\n0\nB-\n2\n0\nE\n3\n0\n1\n",
            text
        );
        let reread = read_program(&text);
        assert_eq!(instance.program(), reread.program());
    }

    #[test]
    fn test_readable_listing() {
        let instance = read_program(PROGRAM);
        assert_eq!(
            "a :- not b.\n{c}.\n\n#compute {a, not b}.\n{ c }.\n\n% Symbol table:\n% _1 = a: T\n% _2 = b: F\n% _3 = c: I\n",
            listing(OutputStyle::Readable, &instance, true).unwrap()
        );
    }

    #[test]
    fn test_dlv_listing() {
        let instance = read_program(PROGRAM);
        assert_eq!(
            "a :- not b.\nc.\n:- not a.\n:- b.\nc v intc.\n",
            listing(OutputStyle::Dlv, &instance, false).unwrap()
        );
    }

    #[test]
    fn test_aspif_listing() {
        let instance = read_program(PROGRAM);
        assert_eq!(
            "asp 1 0 0\n1 0 1 1 0 1 -2\n1 1 1 3 0 0\n6 1 1\n6 1 -2\n5 3 0\n4 1 a 1 1\n4 1 b 1 2\n4 1 c 1 3\n0\n",
            listing(OutputStyle::Aspif, &instance, false).unwrap()
        );
    }

    #[test]
    fn test_cnf_listing() {
        let instance = read_cnf("p wcnf 2 2 9\nc 1 x\n3 1 -2 0\n9 2 0\n");
        assert_eq!(
            "% weighted CNF with 2 vars 2 clauses (max weight = 9)\n% _1 = x\n% _2 = _2\n-_2 | x = 3.\n_2 = 9.\n",
            listing(OutputStyle::Readable, &instance, false).unwrap()
        );
        assert_eq!(
            "c weighted CNF with 2 vars 2 clauses (max weight = 9)\nc 1 x\n3 -2 1 0\n9 2 0\n",
            listing(OutputStyle::Dimacs, &instance, false).unwrap()
        );
    }

    #[test]
    fn test_unsupported_listing() {
        let instance = read_cnf("p cnf 1 1\n1 0\n");
        let err = listing(OutputStyle::Smodels, &instance, false).unwrap_err();
        assert_eq!(
            Some(&LpError::UnsupportedOutput(
                "clauses".to_string(),
                "smodels".to_string()
            )),
            err.root_cause().downcast_ref::<LpError>()
        );
        let instance = read_program("5 1 1 1 0 2 1\n0\n1 a\n2 b\n0\nB+\n0\nB-\n0\n1\n");
        assert!(listing(OutputStyle::Gnt, &instance, false).is_err());
    }
}
