use super::{token_reader::TokenReader, Instance, InstanceHeader, InstanceReader, WarningHandler};
use crate::{
    atoms::{Atom, AtomStatus, AtomTable},
    rules::{Body, Program, Rule, RuleType, WeightedBody},
    symbols::{Symbol, SymbolTable},
    utils::LpError,
};
use anyhow::{anyhow, Context, Result};
use log::debug;
use std::io::Read;

const TAG_ORDERED: i64 = 7;

/// A reader for the Smodels format.
///
/// This object is used to read a program encoded using the numeric format produced by the `lparse` grounder and consumed by the `smodels` solver.
///
/// # Smodels format
///
/// A program is made of three sections.
/// The first one lists the rules, one per line, each one beginning by its type tag; a `0` ends this section.
/// The second one gives the names of the atoms, an atom and its name per line, and also ends with a `0`.
/// The last one is the compute statement: the atoms that must be true (`B+`), the ones that must be false (`B-`), optionally the input atoms (`E`), and the number of models to compute.
///
/// The following content defines the program `a :- not b.` in which `b` must be false.
///
/// ```text
/// 1 1 1 1 2
/// 0
/// 1 a
/// 2 b
/// 0
/// B+
/// 0
/// B-
/// 2
/// 0
/// 1
/// ```
///
/// # Example
///
/// ```
/// # use lptools::{io::{InstanceReader, SmodelsReader}, symbols::SymbolTable};
/// let mut symbols = SymbolTable::default();
/// let instance = SmodelsReader::default()
///     .read(&mut "1 1 0 0\n0\n1 p\n0\nB+\n0\nB-\n0\n0\n".as_bytes(), &mut symbols)
///     .unwrap();
/// assert_eq!(1, instance.program().number_of_rules());
/// assert_eq!(1, instance.atoms().table_size());
/// assert_eq!("p", instance.atoms().find_name(1).unwrap().name());
/// ```
#[derive(Default)]
pub struct SmodelsReader {
    warning_handlers: Vec<WarningHandler>,
}

impl SmodelsReader {
    fn warn(&self, line: usize, message: String) {
        self.warning_handlers
            .iter()
            .for_each(|h| (h)(line, message.clone()));
    }
}

impl InstanceReader for SmodelsReader {
    fn read(&self, reader: &mut dyn Read, symbols: &mut SymbolTable) -> Result<Instance> {
        let mut decoder = SmodelsDecoder::new(reader);
        let program = decoder.read_program()?;
        let mut atoms = decoder.read_symbols(symbols, |l, m| self.warn(l, m))?;
        let models = decoder
            .read_compute_statement(&mut atoms)
            .with_context(|| {
                format!(
                    "while reading the compute statement (line with index {})",
                    decoder.tokens.line_index()
                )
            })?;
        debug!(
            "read a program with {} rules and {} atoms ({} in rules)",
            program.number_of_rules(),
            atoms.table_size(),
            decoder.max_atom()
        );
        Ok(Instance::new(
            program,
            atoms,
            InstanceHeader::Smodels { models },
        ))
    }

    fn add_warning_handler(&mut self, h: WarningHandler) {
        self.warning_handlers.push(h);
    }
}

/// The decoding state of a Smodels input.
///
/// The decoder keeps track of the highest atom read in the rules, which gives the size of the atom table built from the symbol section.
pub(crate) struct SmodelsDecoder<'a> {
    tokens: TokenReader<'a>,
    max_atom: usize,
}

impl<'a> SmodelsDecoder<'a> {
    pub(crate) fn new(reader: &'a mut dyn Read) -> Self {
        Self {
            tokens: TokenReader::new(reader),
            max_atom: 0,
        }
    }

    /// Returns the highest atom read so far.
    pub(crate) fn max_atom(&self) -> usize {
        self.max_atom
    }

    fn read_program(&mut self) -> Result<Program> {
        let mut program = Program::default();
        loop {
            let rule_index = program.number_of_rules();
            let rule = self.read_rule().with_context(|| {
                format!(
                    "while reading rule with index {} (line with index {})",
                    rule_index,
                    self.tokens.line_index()
                )
            })?;
            match rule {
                Some(r) => program.push(r),
                None => break,
            }
        }
        Ok(program)
    }

    /// Reads a rule, or `None` if the end of the rule section is reached.
    pub(crate) fn read_rule(&mut self) -> Result<Option<Rule>> {
        let tag = match self.tokens.next_token()? {
            Some(t) => t
                .parse::<i64>()
                .map_err(|_| anyhow!(LpError::MalformedField(format!(r#"invalid rule type "{}""#, t))))?,
            None => return Err(anyhow!(LpError::MalformedField("missing rule type".to_string()))),
        };
        if tag == 0 {
            return Ok(None);
        }
        if tag == TAG_ORDERED {
            return Err(anyhow!(LpError::UnsupportedRuleType(
                "ordered disjunctive rules".to_string()
            )));
        }
        let rule = match RuleType::try_from(tag) {
            Ok(RuleType::Basic) => self.read_basic()?,
            Ok(RuleType::Constraint) => self.read_constraint()?,
            Ok(RuleType::Choice) => self.read_choice()?,
            Ok(RuleType::Integrity) => self.read_integrity()?,
            Ok(RuleType::Weight) => self.read_weight()?,
            Ok(RuleType::Optimize) => self.read_optimize()?,
            Ok(RuleType::Disjunctive) => self.read_disjunctive()?,
            Ok(RuleType::Clause) | Err(_) => {
                return Err(anyhow!(LpError::UnknownRuleType(tag)))
            }
        };
        Ok(Some(rule))
    }

    fn update_max_atom(&mut self, atoms: &[Atom]) {
        if let Some(m) = atoms.iter().max() {
            self.max_atom = usize::max(self.max_atom, *m);
        }
    }

    fn read_head(&mut self, what: &str) -> Result<Atom> {
        let head = self.tokens.read_atom(&format!("{}, head", what))?;
        self.update_max_atom(&[head]);
        Ok(head)
    }

    fn read_heads(&mut self, what: &str) -> Result<Vec<Atom>> {
        let count = self.tokens.read_count(&format!("{}, head count", what))?;
        let heads = self
            .tokens
            .read_atoms(count, &format!("{}, head atom", what))?;
        self.update_max_atom(&heads);
        Ok(heads)
    }

    /// Reads the literal count and the negative literal count.
    fn read_counts(&mut self, what: &str) -> Result<(usize, usize)> {
        let lit_count = self
            .tokens
            .read_count(&format!("{}, literal count", what))?;
        let neg_count = self
            .tokens
            .read_count(&format!("{}, negative count", what))?;
        if neg_count > lit_count {
            return Err(anyhow!(LpError::InvalidCount(what.to_string())));
        }
        Ok((lit_count, neg_count))
    }

    fn read_literals(&mut self, what: &str, lit_count: usize, neg_count: usize) -> Result<Body> {
        let mut literals = self
            .tokens
            .read_atoms(neg_count, &format!("{}, negative literal", what))?;
        literals.extend(
            self.tokens
                .read_atoms(lit_count - neg_count, &format!("{}, positive literal", what))?,
        );
        self.update_max_atom(&literals);
        Body::from_literals(literals, neg_count)
    }

    fn read_body(&mut self, what: &str) -> Result<Body> {
        let (lit_count, neg_count) = self.read_counts(what)?;
        self.read_literals(what, lit_count, neg_count)
    }

    fn read_weighted_body(&mut self, what: &str) -> Result<WeightedBody> {
        let (lit_count, neg_count) = self.read_counts(what)?;
        let body = self.read_literals(what, lit_count, neg_count)?;
        let weights = self
            .tokens
            .read_ints(lit_count, &format!("{}, weight", what))?;
        WeightedBody::new(body, weights)
    }

    fn read_basic(&mut self) -> Result<Rule> {
        let what = "basic rule";
        let head = self.read_head(what)?;
        let body = self.read_body(what)?;
        Ok(Rule::Basic { head, body })
    }

    fn read_constraint(&mut self) -> Result<Rule> {
        let what = "constraint rule";
        let head = self.read_head(what)?;
        let (lit_count, neg_count) = self.read_counts(what)?;
        let bound = self.tokens.read_int(&format!("{}, bound", what))?;
        let body = self.read_literals(what, lit_count, neg_count)?;
        Ok(Rule::Constraint { head, bound, body })
    }

    fn read_choice(&mut self) -> Result<Rule> {
        let what = "choice rule";
        let heads = self.read_heads(what)?;
        let body = self.read_body(what)?;
        Ok(Rule::Choice { heads, body })
    }

    fn read_integrity(&mut self) -> Result<Rule> {
        let body = self.read_body("integrity rule")?;
        Ok(Rule::Integrity { body })
    }

    fn read_weight(&mut self) -> Result<Rule> {
        let what = "weight rule";
        let head = self.read_head(what)?;
        let bound = self.tokens.read_int(&format!("{}, bound", what))?;
        let body = self.read_weighted_body(what)?;
        Ok(Rule::Weight { head, bound, body })
    }

    fn read_optimize(&mut self) -> Result<Rule> {
        let what = "optimize statement";
        if self.tokens.read_int(&format!("{}, 0 field", what))? != 0 {
            return Err(anyhow!(LpError::MalformedField(format!(
                "{}, missing 0 field",
                what
            ))));
        }
        let body = self.read_weighted_body(what)?;
        Ok(Rule::Optimize { body })
    }

    fn read_disjunctive(&mut self) -> Result<Rule> {
        let what = "disjunctive rule";
        let heads = self.read_heads(what)?;
        let body = self.read_body(what)?;
        Ok(Rule::Disjunctive { heads, body })
    }

    /// Reads the symbol section, building an atom table covering all the atoms read so far.
    ///
    /// Named atoms beyond the highest atom of the rules are added to the table by new segments.
    pub(crate) fn read_symbols<F>(&mut self, symbols: &mut SymbolTable, warn: F) -> Result<AtomTable>
    where
        F: Fn(usize, String),
    {
        let mut table = AtomTable::new(self.max_atom, 0);
        let mut missing: Vec<(Atom, Symbol)> = Vec::new();
        loop {
            let atom = match self
                .tokens
                .read_atom_or_end("symbol table entry")
                .with_context(|| self.symbols_context())?
            {
                Some(a) => a,
                None => break,
            };
            let name = self
                .tokens
                .next_token()
                .and_then(|t| {
                    t.ok_or_else(|| {
                        anyhow!(LpError::MalformedField("missing symbol name".to_string()))
                    })
                })
                .with_context(|| self.symbols_context())?;
            let symbol = symbols.intern(&name);
            if table.contains(atom) {
                if let Some(previous) = table.find_name(atom) {
                    warn(
                        1 + self.tokens.line_index(),
                        format!(
                            r#"atom {} already named "{}", renamed "{}""#,
                            atom, previous, name
                        ),
                    );
                }
                table.set_name(atom, symbol)?;
            } else {
                missing.push((atom, symbol));
            }
        }
        let atoms = missing.iter().map(|(a, _)| *a).collect::<Vec<Atom>>();
        patch_missing_atoms(&mut table, &atoms)?;
        for (atom, symbol) in missing {
            table.set_name(atom, symbol)?;
        }
        Ok(table)
    }

    fn symbols_context(&self) -> String {
        format!(
            "while reading the symbol section (line with index {})",
            self.tokens.line_index()
        )
    }

    fn expect_marker(&mut self, marker: &str, what: &str) -> Result<()> {
        match self.tokens.next_token()? {
            Some(t) if t == marker => Ok(()),
            _ => Err(anyhow!(LpError::MalformedField(format!(
                "missing ({}) compute statement",
                what
            )))),
        }
    }

    fn read_atom_list(
        &mut self,
        what: &str,
        status: AtomStatus,
        table: &mut AtomTable,
        missing: &mut Vec<(Atom, AtomStatus)>,
    ) -> Result<()> {
        while let Some(atom) = self.tokens.read_atom_or_end(what)? {
            if table.set_status(atom, status).is_err() {
                missing.push((atom, status));
            }
        }
        Ok(())
    }

    /// Reads the compute statement, returning the number of models to compute.
    pub(crate) fn read_compute_statement(&mut self, table: &mut AtomTable) -> Result<i64> {
        let mut missing = Vec::new();
        self.expect_marker("B+", "positive")?;
        self.read_atom_list(
            "incomplete (positive) compute statement",
            AtomStatus::TRUE,
            table,
            &mut missing,
        )?;
        self.expect_marker("B-", "negative")?;
        self.read_atom_list(
            "incomplete (negative) compute statement",
            AtomStatus::FALSE,
            table,
            &mut missing,
        )?;
        let models = match self.tokens.next_token()? {
            Some(t) if t == "E" => {
                self.read_atom_list(
                    "incomplete input specification",
                    AtomStatus::INPUT,
                    table,
                    &mut missing,
                )?;
                self.tokens.read_int("number of models")?
            }
            Some(t) => t.parse::<i64>().map_err(|_| {
                anyhow!(LpError::MalformedField(format!(
                    r#"number of models, expected an integer, got "{}""#,
                    t
                )))
            })?,
            None => {
                return Err(anyhow!(LpError::MalformedField(
                    "missing number of models".to_string()
                )))
            }
        };
        let atoms = missing.iter().map(|(a, _)| *a).collect::<Vec<Atom>>();
        patch_missing_atoms(table, &atoms)?;
        for (atom, status) in missing {
            table.set_status(atom, status)?;
        }
        Ok(models)
    }
}

/// Extends the table so that it covers the given atoms.
///
/// If the range between the lowest and the highest atoms is free, a single segment is added.
/// Otherwise, a segment is added for each run of consecutive atoms of this range that are not covered yet.
pub(crate) fn patch_missing_atoms(table: &mut AtomTable, atoms: &[Atom]) -> Result<()> {
    let (min, max) = match (atoms.iter().min(), atoms.iter().max()) {
        (Some(min), Some(max)) => (*min, *max),
        _ => return Ok(()),
    };
    if !table
        .segments()
        .iter()
        .any(|s| s.overlaps(max - min + 1, min - 1))
    {
        table.extend(max - min + 1, min - 1)?;
        return Ok(());
    }
    let mut run_start = None;
    for atom in min..=max + 1 {
        let covered = atom > max || table.contains(atom);
        match (covered, run_start) {
            (false, None) => run_start = Some(atom),
            (true, Some(start)) => {
                table.extend(atom - start, start - 1)?;
                run_start = None;
            }
            _ => {}
        }
    }
    Ok(())
}
