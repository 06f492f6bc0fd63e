use crate::{atoms::AtomTable, rules::Program, symbols::SymbolTable};
use anyhow::Result;
use std::io::Read;

/// The type of callback functions to call when warnings are raised while reading an instance.
///
/// The first parameter is the (1-based) index of the line where the warning was raised.
pub type WarningHandler = Box<dyn Fn(usize, String)>;

/// The data that come with a program, apart from its rules and atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceHeader {
    /// A program read from the Smodels format.
    Smodels {
        /// the number of models to compute, as given after the compute statement
        models: i64,
    },
    /// A CNF formula read from the DIMACS format.
    Cnf {
        /// `true` iff the formula is weighted (`p wcnf` problem line)
        weighted: bool,
        /// the number of variables given by the problem line
        variables: usize,
        /// the number of clauses given by the problem line
        clauses: usize,
        /// the maximal weight given by the problem line, if any
        max_weight: Option<i64>,
    },
}

/// A program together with its atom table.
#[derive(Debug)]
pub struct Instance {
    program: Program,
    atoms: AtomTable,
    header: InstanceHeader,
}

impl Instance {
    /// Builds a new instance.
    pub fn new(program: Program, atoms: AtomTable, header: InstanceHeader) -> Self {
        Self {
            program,
            atoms,
            header,
        }
    }

    /// Returns the program.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Returns the program, allowing its modification.
    pub fn program_mut(&mut self) -> &mut Program {
        &mut self.program
    }

    /// Returns the atom table.
    pub fn atoms(&self) -> &AtomTable {
        &self.atoms
    }

    /// Returns the atom table, allowing its modification.
    pub fn atoms_mut(&mut self) -> &mut AtomTable {
        &mut self.atoms
    }

    /// Returns the program and the atom table, allowing the modification of both.
    pub fn parts_mut(&mut self) -> (&mut Program, &mut AtomTable) {
        (&mut self.program, &mut self.atoms)
    }

    /// Returns the header.
    pub fn header(&self) -> &InstanceHeader {
        &self.header
    }

    /// Returns `true` iff this instance is a CNF formula.
    pub fn is_cnf(&self) -> bool {
        matches!(self.header, InstanceHeader::Cnf { .. })
    }

    /// Consumes the instance, returning its program, atom table and header.
    pub fn into_parts(self) -> (Program, AtomTable, InstanceHeader) {
        (self.program, self.atoms, self.header)
    }
}

/// A trait implemented by objects able to read programs.
pub trait InstanceReader {
    /// Reads an [`Instance`].
    ///
    /// Atom names are interned by the provided symbol table.
    /// Reading several instances with the same symbol table allows to relate their atoms.
    ///
    /// In case warnings are raised, the callback functions registered by [add_warning_handler](Self::add_warning_handler) are triggered.
    ///
    /// # Example
    ///
    /// ```
    /// # use lptools::{io::{Instance, InstanceReader, SmodelsReader}, symbols::SymbolTable};
    /// fn read_program_from_str(s: &str, symbols: &mut SymbolTable) -> Instance {
    ///     let reader = SmodelsReader::default();
    ///     reader.read(&mut s.as_bytes(), symbols).expect("invalid Smodels program")
    /// }
    /// # read_program_from_str("1 1 0 0\n0\n1 a\n0\nB+\n0\nB-\n0\n1\n", &mut SymbolTable::default());
    /// ```
    fn read(&self, reader: &mut dyn Read, symbols: &mut SymbolTable) -> Result<Instance>;

    /// Adds a callback function to call when warnings are raised while reading an instance.
    fn add_warning_handler(&mut self, h: WarningHandler);
}
