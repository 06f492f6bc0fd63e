use super::{
    smodels_reader::patch_missing_atoms, Instance, InstanceHeader, InstanceReader, WarningHandler,
};
use crate::{
    atoms::{Atom, AtomTable},
    rules::{Body, Program, Rule},
    symbols::SymbolTable,
    utils::LpError,
};
use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::io::{BufRead, BufReader, Read};

lazy_static! {
    static ref PROBLEM_LINE_PATTERN: Regex =
        Regex::new(r"^p\s+(w?cnf)\s+(\d+)\s+(\d+)(?:\s+(\d+))?\s*$").unwrap();
    static ref NAMING_LINE_PATTERN: Regex = Regex::new(r"^c\s+(\d+)\s+(\S+)").unwrap();
}

/// A reader for the DIMACS CNF and WCNF formats.
///
/// Each clause of the formula is read as a [`Rule::Clause`].
/// The atom table covers the variables declared by the problem line;
/// comments directly following the problem line with the form `c <atom> <name>` give names to atoms.
/// Other comments are ignored.
///
/// # DIMACS format
///
/// The following content defines a weighted formula with two variables, named `a` and `b`, and two clauses.
/// The weight of a clause is given before its literals.
///
/// ```text
/// c an example
/// p wcnf 2 2 10
/// c 1 a
/// c 2 b
/// 10 1 -2 0
/// 3 2 0
/// ```
///
/// # Example
///
/// ```
/// # use lptools::{io::{DimacsReader, InstanceReader}, symbols::SymbolTable};
/// let mut symbols = SymbolTable::default();
/// let instance = DimacsReader::default()
///     .read(&mut "p cnf 2 1\nc 1 a\n1 -2 0\n".as_bytes(), &mut symbols)
///     .unwrap();
/// assert_eq!(1, instance.program().number_of_rules());
/// assert_eq!(&[2], instance.program().rules()[0].neg());
/// ```
#[derive(Default)]
pub struct DimacsReader {
    warning_handlers: Vec<WarningHandler>,
}

struct ProblemLine {
    weighted: bool,
    variables: usize,
    clauses: usize,
    max_weight: Option<i64>,
}

fn read_problem_line(line: &str) -> Result<ProblemLine> {
    let captures = PROBLEM_LINE_PATTERN
        .captures(line)
        .ok_or_else(|| anyhow!(LpError::InvalidProblemLine))?;
    let weighted = &captures[1] == "wcnf";
    let parse = |i: usize| -> Result<usize> {
        captures[i]
            .parse::<usize>()
            .map_err(|_| anyhow!(LpError::InvalidProblemLine))
    };
    let variables = parse(2)?;
    let clauses = parse(3)?;
    let max_weight = match captures.get(4) {
        Some(_) if !weighted => return Err(anyhow!(LpError::InvalidProblemLine)),
        Some(m) => Some(
            m.as_str()
                .parse::<i64>()
                .map_err(|_| anyhow!(LpError::InvalidProblemLine))?,
        ),
        None => None,
    };
    Ok(ProblemLine {
        weighted,
        variables,
        clauses,
        max_weight,
    })
}

/// Accumulates the literals of a clause.
#[derive(Default)]
struct ClauseBuilder {
    weight: Option<i64>,
    neg: Vec<Atom>,
    pos: Vec<Atom>,
    started: bool,
}

impl ClauseBuilder {
    /// Adds a word to the clause, returning the clause if the word ends it.
    fn add_word(&mut self, word: &str, weighted: bool) -> Result<Option<Rule>> {
        if weighted && self.weight.is_none() {
            let w = word.parse::<i64>().map_err(|_| {
                anyhow!(LpError::MalformedField(format!(
                    r#"clause, invalid weight "{}""#,
                    word
                )))
            })?;
            if w <= 0 {
                return Err(anyhow!(LpError::NonPositiveWeight(w)));
            }
            self.weight = Some(w);
            self.started = true;
            return Ok(None);
        }
        let literal = word.parse::<i64>().map_err(|_| {
            anyhow!(LpError::MalformedField(format!(
                r#"clause, invalid literal "{}""#,
                word
            )))
        })?;
        self.started = true;
        if literal == 0 {
            let finished = std::mem::take(self);
            return Ok(Some(Rule::Clause {
                body: Body::new(finished.neg, finished.pos),
                weight: finished.weight,
            }));
        }
        let atom = literal.unsigned_abs() as Atom;
        if literal > 0 {
            self.pos.push(atom);
        } else {
            self.neg.push(atom);
        }
        Ok(None)
    }
}

impl DimacsReader {
    fn warn(&self, line: usize, message: String) {
        self.warning_handlers
            .iter()
            .for_each(|h| (h)(line, message.clone()));
    }
}

impl InstanceReader for DimacsReader {
    fn read(&self, reader: &mut dyn Read, symbols: &mut SymbolTable) -> Result<Instance> {
        let br = BufReader::new(reader);
        let mut problem: Option<ProblemLine> = None;
        let mut table = AtomTable::new(0, 0);
        let mut program = Program::default();
        let mut clause = ClauseBuilder::default();
        let mut max_literal = 0;
        let mut naming = true;
        for (i, line) in br.lines().enumerate() {
            let context = || format!("while reading line with index {}", i);
            let l = line.with_context(context)?;
            let trimmed = l.trim();
            if problem.is_none() {
                if trimmed.is_empty() || trimmed.starts_with('c') {
                    continue;
                }
                let p = read_problem_line(trimmed).with_context(context)?;
                table = AtomTable::new(p.variables, 0);
                problem = Some(p);
                continue;
            }
            let p = problem
                .as_ref()
                .ok_or_else(|| anyhow!(LpError::InvalidProblemLine))?;
            if trimmed.starts_with('c') {
                if naming {
                    if let Some(c) = NAMING_LINE_PATTERN.captures(trimmed) {
                        match c[1].parse::<Atom>() {
                            Ok(atom) if table.contains(atom) => {
                                table.set_name(atom, symbols.intern(&c[2]))?
                            }
                            _ => self.warn(
                                i + 1,
                                format!(
                                    "ignoring the name of atom {}, which is not a declared variable",
                                    &c[1]
                                ),
                            ),
                        }
                    }
                }
                continue;
            }
            naming = false;
            if program.number_of_rules() == p.clauses {
                break;
            }
            for word in trimmed.split_whitespace() {
                if program.number_of_rules() == p.clauses {
                    break;
                }
                if let Some(c) = clause.add_word(word, p.weighted).with_context(context)? {
                    if let Some(m) = c.body().literals().iter().max() {
                        max_literal = usize::max(max_literal, *m);
                    }
                    program.push(c);
                }
            }
        }
        let p = problem.ok_or_else(|| anyhow!(LpError::InvalidProblemLine))?;
        if clause.started {
            return Err(anyhow!(LpError::MalformedField(
                "clause, missing literal".to_string()
            )));
        }
        if program.number_of_rules() < p.clauses {
            return Err(anyhow!(LpError::MalformedField(format!(
                "expected {} clauses, got {}",
                p.clauses,
                program.number_of_rules()
            ))));
        }
        if max_literal > p.variables {
            patch_missing_atoms(&mut table, &[p.variables + 1, max_literal])?;
        }
        debug!(
            "read a {}CNF formula with {} clauses and {} variables",
            if p.weighted { "weighted " } else { "" },
            program.number_of_rules(),
            table.table_size()
        );
        Ok(Instance::new(
            program,
            table,
            InstanceHeader::Cnf {
                weighted: p.weighted,
                variables: p.variables,
                clauses: p.clauses,
                max_weight: p.max_weight,
            },
        ))
    }

    fn add_warning_handler(&mut self, h: WarningHandler) {
        self.warning_handlers.push(h);
    }
}
