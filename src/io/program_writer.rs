use super::OutputStyle;
use crate::{
    atoms::{Atom, AtomTable, Segment},
    rules::{Body, Program, Rule, RuleType, WeightedBody},
    utils::LpError,
};
use anyhow::{anyhow, Context, Result};
use std::{cell::Cell, io::Write};

/// A writer for programs and CNF formulas.
///
/// The writer renders rules in the [`OutputStyle`] it was built with.
/// Some styles cannot express every shape of rules (see [`check_rule`](Self::check_rule));
/// in this case an [`LpError::UnsupportedOutput`] error is returned and nothing is written.
///
/// In the `aspif` style, optimize statements are given increasing priorities, starting from `0`, in the order they are written.
///
/// # Example
///
/// ```
/// # use lptools::{io::{InstanceReader, OutputStyle, ProgramWriter, SmodelsReader}, symbols::SymbolTable};
/// let mut symbols = SymbolTable::default();
/// let instance = SmodelsReader::default()
///     .read(&mut "1 1 1 1 2\n0\n1 a\n2 b\n0\nB+\n0\nB-\n0\n1\n".as_bytes(), &mut symbols)
///     .unwrap();
/// let writer = ProgramWriter::new(OutputStyle::Readable);
/// let mut buffer = Vec::new();
/// writer.write_program(&mut buffer, instance.program(), instance.atoms()).unwrap();
/// assert_eq!("a :- not b.\n", String::from_utf8(buffer).unwrap());
/// ```
#[derive(Debug)]
pub struct ProgramWriter {
    style: OutputStyle,
    priority: Cell<usize>,
}

fn find_segment(table: &AtomTable, atom: Atom) -> Result<&Segment> {
    table
        .find_segment(atom)
        .ok_or_else(|| anyhow!(LpError::AtomOutOfRange(atom)))
}

fn shifted(segment: &Segment, atom: Atom) -> i64 {
    atom as i64 + segment.shift()
}

/// Decorates a name with the prefix and the postfix of its segment; the postfix goes before the arguments of compound terms.
fn decorated_name(segment: &Segment, name: &str) -> String {
    let (functor, arguments) = name.split_at(name.find('(').unwrap_or(name.len()));
    format!(
        "{}{}{}{}",
        segment.prefix(),
        functor,
        segment.postfix(),
        arguments
    )
}

fn words(ws: &[&str]) -> Vec<String> {
    ws.iter().map(|w| w.to_string()).collect()
}

fn number_of_digits(n: i64) -> usize {
    n.abs().to_string().len() + usize::from(n < 0)
}

/// Returns the width of an atom written in the `readable` style.
///
/// An error is returned if the atom does not belong to the table.
pub fn atom_len(atom: Atom, table: &AtomTable) -> Result<usize> {
    let segment = find_segment(table, atom)?;
    Ok(match segment.name(atom) {
        Some(name) => segment.prefix().len() + name.name().len() + segment.postfix().len(),
        None => 1 + number_of_digits(shifted(segment, atom)),
    })
}

impl ProgramWriter {
    /// Builds a writer for the given style.
    pub fn new(style: OutputStyle) -> Self {
        Self {
            style,
            priority: Cell::new(0),
        }
    }

    /// Returns the style of this writer.
    pub fn style(&self) -> OutputStyle {
        self.style
    }

    fn unsupported(&self, what: &str) -> anyhow::Error {
        anyhow!(LpError::UnsupportedOutput(
            what.to_string(),
            self.style.to_string()
        ))
    }

    /// Checks that a rule can be written in the style of this writer.
    ///
    /// The `gnt` and `dlv` styles do not handle constraint rules, weight rules, optimize statements and choice rules without head atoms.
    /// Clauses cannot be written in the numeric styles, and the `dimacs` style only handles clauses.
    pub fn check_rule(&self, rule: &Rule) -> Result<()> {
        let rule_type = rule.rule_type();
        match (self.style, rule) {
            (OutputStyle::Smodels | OutputStyle::Aspif, Rule::Clause { .. }) => {
                Err(self.unsupported(rule_type.description()))
            }
            (OutputStyle::Dimacs, Rule::Clause { .. }) => Ok(()),
            (OutputStyle::Dimacs, _) => Err(self.unsupported(rule_type.description())),
            (
                OutputStyle::Gnt | OutputStyle::Dlv,
                Rule::Constraint { .. } | Rule::Weight { .. } | Rule::Optimize { .. },
            ) => Err(self.unsupported(rule_type.description())),
            (OutputStyle::Gnt | OutputStyle::Dlv, Rule::Choice { heads, .. }) if heads.is_empty() => {
                Err(self.unsupported("choice rules with an empty head"))
            }
            _ => Ok(()),
        }
    }

    /// Checks that all the rules of a program can be written in the style of this writer.
    pub fn check_program(&self, program: &Program) -> Result<()> {
        program.iter().enumerate().try_for_each(|(i, r)| {
            self.check_rule(r)
                .with_context(|| format!("while checking rule with index {}", i))
        })
    }

    fn render_atom(&self, segment: &Segment, atom: Atom) -> String {
        let number = shifted(segment, atom);
        match (self.style, segment.name(atom)) {
            (OutputStyle::Smodels | OutputStyle::Aspif, _) => number.to_string(),
            (_, Some(name)) => decorated_name(segment, name.name()),
            (OutputStyle::Dlv, None) => format!("int{}", number),
            (_, None) => format!("_{}", number),
        }
    }

    pub(crate) fn atom_to_string(&self, atom: Atom, table: &AtomTable) -> Result<String> {
        Ok(self.render_atom(find_segment(table, atom)?, atom))
    }

    fn atoms_to_strings(&self, atoms: &[Atom], table: &AtomTable) -> Result<Vec<String>> {
        atoms
            .iter()
            .map(|a| self.atom_to_string(*a, table))
            .collect()
    }

    fn classical_atom_to_string(&self, atom: Atom, table: &AtomTable) -> Result<String> {
        let segment = find_segment(table, atom)?;
        let number = shifted(segment, atom);
        match (self.style, segment.name(atom)) {
            (OutputStyle::Dimacs, _) => Ok(number.to_string()),
            (OutputStyle::Smodels | OutputStyle::Aspif, _) => Err(self.unsupported("clauses")),
            (_, Some(name)) => Ok(decorated_name(segment, name.name())),
            (_, None) => Ok(format!("_{}", number)),
        }
    }

    fn other_atom(&self, atom: Atom, table: &AtomTable, other: &AtomTable) -> Result<Atom> {
        let segment = find_segment(table, atom)?;
        match segment.other_atom(atom) {
            Some(a) if segment.other() == Some(other.id()) => Ok(a),
            _ => Err(anyhow!(LpError::MissingCrossReference(atom))),
        }
    }

    /// Writes an atom.
    ///
    /// Symbolic styles write the (decorated) name of the atom, or a shifted number prefixed by `_` (`int` for the `dlv` style) for anonymous atoms.
    /// Numeric styles write the shifted number.
    pub fn write_atom(&self, writer: &mut dyn Write, atom: Atom, table: &AtomTable) -> Result<()> {
        let s = self.atom_to_string(atom, table)?;
        write!(writer, "{}", s).context("while writing an atom")
    }

    /// Writes the atom of the other table cross-referenced by an atom.
    ///
    /// An error is returned if no cross reference to the other table is recorded for the atom.
    pub fn write_other_atom(
        &self,
        writer: &mut dyn Write,
        atom: Atom,
        table: &AtomTable,
        other: &AtomTable,
    ) -> Result<()> {
        let other_atom = self.other_atom(atom, table, other)?;
        self.write_atom(writer, other_atom, other)
    }

    /// Writes an atom as a variable of a CNF formula.
    ///
    /// Symbolic styles write names like [`write_atom`](Self::write_atom), except anonymous atoms are always prefixed by `_`;
    /// the `dimacs` style writes the shifted number. The numeric styles are not supported.
    pub fn write_classical_atom(
        &self,
        writer: &mut dyn Write,
        atom: Atom,
        table: &AtomTable,
    ) -> Result<()> {
        let s = self.classical_atom_to_string(atom, table)?;
        write!(writer, "{}", s).context("while writing an atom")
    }

    /// Writes the atom of the other table cross-referenced by an atom, as a variable of a CNF formula.
    pub fn write_other_classical_atom(
        &self,
        writer: &mut dyn Write,
        atom: Atom,
        table: &AtomTable,
        other: &AtomTable,
    ) -> Result<()> {
        let other_atom = self.other_atom(atom, table, other)?;
        self.write_classical_atom(writer, other_atom, other)
    }

    fn symbolic_literals(
        &self,
        body: &Body,
        weights: Option<&[i64]>,
        table: &AtomTable,
    ) -> Result<String> {
        let neg_count = body.neg().len();
        let mut items = Vec::with_capacity(body.len());
        for (i, atom) in body.literals().iter().enumerate() {
            let mut item = if i < neg_count {
                "not ".to_string()
            } else {
                String::new()
            };
            item.push_str(&self.atom_to_string(*atom, table)?);
            if let Some(w) = weights {
                item.push_str(&format!("={}", w[i]));
            }
            items.push(item);
        }
        Ok(items.join(", "))
    }

    fn symbolic_body(&self, body: &Body, table: &AtomTable) -> Result<String> {
        if body.is_empty() {
            return Ok(String::new());
        }
        Ok(format!(" :- {}", self.symbolic_literals(body, None, table)?))
    }

    fn head_separator(&self, rule_type: RuleType) -> &'static str {
        match (self.style, rule_type) {
            (OutputStyle::Dlv, _) => " v ",
            (OutputStyle::Readable, RuleType::Choice) => ", ",
            _ => " | ",
        }
    }

    fn render_symbolic(&self, rule: &Rule, table: &AtomTable) -> Result<String> {
        Ok(match rule {
            Rule::Basic { head, body } => format!(
                "{}{}.",
                self.atom_to_string(*head, table)?,
                self.symbolic_body(body, table)?
            ),
            Rule::Constraint { head, bound, body } => format!(
                "{} :- {} {{{}}}.",
                self.atom_to_string(*head, table)?,
                bound,
                self.symbolic_literals(body, None, table)?
            ),
            Rule::Choice { heads, body } | Rule::Disjunctive { heads, body } => {
                let heads = self
                    .atoms_to_strings(heads, table)?
                    .join(self.head_separator(rule.rule_type()));
                let heads = if self.style == OutputStyle::Readable && rule.rule_type() == RuleType::Choice {
                    format!("{{{}}}", heads)
                } else {
                    heads
                };
                format!("{}{}.", heads, self.symbolic_body(body, table)?)
            }
            Rule::Integrity { body } if body.is_empty() => ".".to_string(),
            Rule::Integrity { body } => {
                format!(":- {}.", self.symbolic_literals(body, None, table)?)
            }
            Rule::Weight { head, bound, body } => format!(
                "{} :- {} [{}].",
                self.atom_to_string(*head, table)?,
                bound,
                self.symbolic_weighted_literals(body, table)?
            ),
            Rule::Optimize { body } if body.body().is_empty() => String::new(),
            Rule::Optimize { body } => format!(
                "minimize [{}].",
                self.symbolic_weighted_literals(body, table)?
            ),
            Rule::Clause { .. } => self.render_clause(rule, table)?,
        })
    }

    fn symbolic_weighted_literals(&self, body: &WeightedBody, table: &AtomTable) -> Result<String> {
        self.symbolic_literals(body.body(), Some(body.weights()), table)
    }

    fn push_counts(tokens: &mut Vec<String>, body: &Body) {
        tokens.push(body.len().to_string());
        tokens.push(body.neg().len().to_string());
    }

    fn render_smodels(&self, rule: &Rule, table: &AtomTable) -> Result<String> {
        let mut tokens = vec![rule.rule_type().tag().to_string()];
        match rule {
            Rule::Basic { head, body } => {
                tokens.push(self.atom_to_string(*head, table)?);
                Self::push_counts(&mut tokens, body);
                tokens.append(&mut self.atoms_to_strings(body.literals(), table)?);
            }
            Rule::Constraint { head, bound, body } => {
                tokens.push(self.atom_to_string(*head, table)?);
                Self::push_counts(&mut tokens, body);
                tokens.push(bound.to_string());
                tokens.append(&mut self.atoms_to_strings(body.literals(), table)?);
            }
            Rule::Choice { heads, body } | Rule::Disjunctive { heads, body } => {
                tokens.push(heads.len().to_string());
                tokens.append(&mut self.atoms_to_strings(heads, table)?);
                Self::push_counts(&mut tokens, body);
                tokens.append(&mut self.atoms_to_strings(body.literals(), table)?);
            }
            Rule::Integrity { body } => {
                Self::push_counts(&mut tokens, body);
                tokens.append(&mut self.atoms_to_strings(body.literals(), table)?);
            }
            Rule::Weight { head, bound, body } => {
                tokens.push(self.atom_to_string(*head, table)?);
                tokens.push(bound.to_string());
                Self::push_counts(&mut tokens, body.body());
                tokens.append(&mut self.atoms_to_strings(body.body().literals(), table)?);
                tokens.extend(body.weights().iter().map(|w| w.to_string()));
            }
            Rule::Optimize { body } => {
                tokens.push("0".to_string());
                Self::push_counts(&mut tokens, body.body());
                tokens.append(&mut self.atoms_to_strings(body.body().literals(), table)?);
                tokens.extend(body.weights().iter().map(|w| w.to_string()));
            }
            Rule::Clause { .. } => return Err(self.unsupported(RuleType::Clause.description())),
        }
        Ok(tokens.join(" "))
    }

    /// Returns the ASPIF literals of a body; each literal is followed by its weight if some are given.
    fn aspif_literals(
        &self,
        body: &Body,
        weights: Option<&[i64]>,
        table: &AtomTable,
    ) -> Result<Vec<String>> {
        let neg_count = body.neg().len();
        let mut tokens = vec![body.len().to_string()];
        for (i, atom) in body.literals().iter().enumerate() {
            let a = self.atom_to_string(*atom, table)?;
            tokens.push(if i < neg_count { format!("-{}", a) } else { a });
            if let Some(w) = weights {
                tokens.push(w[i].to_string());
            }
        }
        Ok(tokens)
    }

    fn render_aspif(&self, rule: &Rule, table: &AtomTable) -> Result<String> {
        let mut tokens = match rule {
            Rule::Basic { head, .. } => {
                let mut t = words(&["1", "0", "1"]);
                t.push(self.atom_to_string(*head, table)?);
                t.push("0".to_string());
                t
            }
            Rule::Constraint { head, bound, .. } | Rule::Weight { head, bound, .. } => {
                let mut t = words(&["1", "0", "1"]);
                t.push(self.atom_to_string(*head, table)?);
                t.push("1".to_string());
                t.push(bound.to_string());
                t
            }
            Rule::Choice { heads, .. } | Rule::Disjunctive { heads, .. } => {
                let choice = if rule.rule_type() == RuleType::Choice { "1" } else { "0" };
                let mut t = words(&["1", choice, &heads.len().to_string()]);
                t.append(&mut self.atoms_to_strings(heads, table)?);
                t.push("0".to_string());
                t
            }
            Rule::Integrity { .. } => words(&["1", "0", "0", "0"]),
            Rule::Optimize { .. } => words(&["2", &self.priority.get().to_string()]),
            Rule::Clause { .. } => return Err(self.unsupported(RuleType::Clause.description())),
        };
        let ones;
        let weights = match rule {
            Rule::Constraint { body, .. } => {
                ones = vec![1; body.len()];
                Some(ones.as_slice())
            }
            _ => rule.weights(),
        };
        tokens.append(&mut self.aspif_literals(rule.body(), weights, table)?);
        if rule.rule_type() == RuleType::Optimize {
            self.priority.set(self.priority.get() + 1);
        }
        Ok(tokens.join(" "))
    }

    fn render_clause(&self, rule: &Rule, table: &AtomTable) -> Result<String> {
        let (body, weight) = match rule {
            Rule::Clause { body, weight } => (body, *weight),
            _ => return Err(anyhow!(LpError::UnsupportedRuleType(rule.rule_type().description().to_string()))),
        };
        let neg_count = body.neg().len();
        let mut literals = Vec::with_capacity(body.len());
        for (i, atom) in body.literals().iter().enumerate() {
            let a = self.classical_atom_to_string(*atom, table)?;
            literals.push(if i < neg_count { format!("-{}", a) } else { a });
        }
        Ok(match self.style {
            OutputStyle::Dimacs => {
                let mut tokens = weight.map(|w| vec![w.to_string()]).unwrap_or_default();
                tokens.append(&mut literals);
                tokens.push("0".to_string());
                tokens.join(" ")
            }
            OutputStyle::Readable => match weight {
                Some(w) => format!("{} = {}.", literals.join(" | "), w),
                None => format!("{}.", literals.join(" | ")),
            },
            _ => format!("{}.", literals.join(" | ")),
        })
    }

    fn render_rule(&self, rule: &Rule, table: &AtomTable) -> Result<String> {
        self.check_rule(rule)?;
        let mut line = match self.style {
            OutputStyle::Readable | OutputStyle::Gnt | OutputStyle::Dlv => {
                self.render_symbolic(rule, table)?
            }
            OutputStyle::Smodels => self.render_smodels(rule, table)?,
            OutputStyle::Aspif => self.render_aspif(rule, table)?,
            OutputStyle::Dimacs => self.render_clause(rule, table)?,
        };
        line.push('\n');
        Ok(line)
    }

    /// Renders all the rules before writing anything, restoring the optimization priority on failure.
    fn render_all<'a, I>(&self, rules: I, table: &AtomTable) -> Result<String>
    where
        I: Iterator<Item = &'a Rule>,
    {
        let priority = self.priority.get();
        let mut text = String::new();
        for (i, rule) in rules.enumerate() {
            match self
                .render_rule(rule, table)
                .with_context(|| format!("while writing rule with index {}", i))
            {
                Ok(line) => text.push_str(&line),
                Err(e) => {
                    self.priority.set(priority);
                    return Err(e);
                }
            }
        }
        Ok(text)
    }

    /// Writes a single rule, followed by a newline.
    pub fn write_rule(&self, writer: &mut dyn Write, rule: &Rule, table: &AtomTable) -> Result<()> {
        let line = self.render_rule(rule, table)?;
        write!(writer, "{}", line).context("while writing a rule")
    }

    /// Writes the rules of a program, one per line, in their order.
    ///
    /// If a rule cannot be written, an error is returned and nothing is written.
    pub fn write_program(
        &self,
        writer: &mut dyn Write,
        program: &Program,
        table: &AtomTable,
    ) -> Result<()> {
        let text = self.render_all(program.iter(), table)?;
        write!(writer, "{}", text).context("while writing a program")?;
        writer.flush().context("while writing a program")
    }

    /// Writes the clauses of a CNF formula, one per line.
    ///
    /// An error is returned and nothing is written if the formula contains rules that are not clauses.
    pub fn write_cnf(&self, writer: &mut dyn Write, cnf: &Program, table: &AtomTable) -> Result<()> {
        if let Some(r) = cnf.iter().find(|r| r.rule_type() != RuleType::Clause) {
            return Err(anyhow!(LpError::UnsupportedRuleType(
                r.rule_type().description().to_string()
            )))
            .context("while writing a CNF formula");
        }
        self.write_program(writer, cnf, table)
    }

    /// Writes a clause as a basic rule deriving a contradiction atom.
    ///
    /// The clause `a | -b` is written as the rule `contradiction :- b, not a`.
    /// The literals of the clause refer to `table` while the contradiction atom refers to `contradiction_table`.
    pub fn write_clause_as_rule(
        &self,
        writer: &mut dyn Write,
        clause: &Rule,
        table: &AtomTable,
        contradiction: Atom,
        contradiction_table: &AtomTable,
    ) -> Result<()> {
        let body = match clause {
            Rule::Clause { body, .. } => Body::new(body.pos().to_vec(), body.neg().to_vec()),
            _ => {
                return Err(anyhow!(LpError::UnsupportedRuleType(
                    clause.rule_type().description().to_string()
                )))
            }
        };
        let head = self.atom_to_string(contradiction, contradiction_table)?;
        let line = match self.style {
            OutputStyle::Readable | OutputStyle::Gnt | OutputStyle::Dlv => {
                format!("{}{}.", head, self.symbolic_body(&body, table)?)
            }
            OutputStyle::Smodels => {
                let mut tokens = vec!["1".to_string(), head];
                Self::push_counts(&mut tokens, &body);
                tokens.append(&mut self.atoms_to_strings(body.literals(), table)?);
                tokens.join(" ")
            }
            OutputStyle::Aspif => {
                let mut tokens = vec!["1 0 1".to_string(), head, "0".to_string()];
                tokens.append(&mut self.aspif_literals(&body, None, table)?);
                tokens.join(" ")
            }
            OutputStyle::Dimacs => return Err(self.unsupported(RuleType::Basic.description())),
        };
        writeln!(writer, "{}", line).context("while writing a clause as a rule")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::SymbolTable;
    use paste::paste;
    use std::io::BufWriter;

    fn table() -> AtomTable {
        let mut symbols = SymbolTable::default();
        let mut table = AtomTable::new(4, 0);
        table.set_name(1, symbols.intern("a")).unwrap();
        table.set_name(2, symbols.intern("b")).unwrap();
        table.set_name(3, symbols.intern("p(1,2)")).unwrap();
        table
    }

    fn render(style: OutputStyle, rule: &Rule) -> Option<String> {
        let writer = ProgramWriter::new(style);
        let mut buffer = BufWriter::new(Vec::new());
        let result = writer.write_rule(&mut buffer, rule, &table());
        let content = String::from_utf8(buffer.into_inner().unwrap()).unwrap();
        match result {
            Ok(()) => Some(content),
            Err(e) => {
                assert!(content.is_empty());
                assert!(matches!(
                    e.root_cause().downcast_ref::<LpError>(),
                    Some(LpError::UnsupportedOutput(_, _))
                ));
                None
            }
        }
    }

    fn weighted(neg: Vec<Atom>, pos: Vec<Atom>, weights: Vec<i64>) -> WeightedBody {
        WeightedBody::new(Body::new(neg, pos), weights).unwrap()
    }

    macro_rules! write_rule_tests {
        ($($shape:ident => $rule:expr, [$(($style:ident, $expected:expr)),* $(,)?]);* $(;)?) => {
            paste! {
                $(
                    #[test]
                    fn [<test_write_ $shape>]() {
                        let rule = $rule;
                        $(
                            assert_eq!(
                                $expected.map(|s: &str| s.to_string()),
                                render(OutputStyle::$style, &rule),
                                "style {}",
                                OutputStyle::$style
                            );
                        )*
                    }
                )*
            }
        };
    }

    write_rule_tests! {
        basic => Rule::Basic { head: 1, body: Body::new(vec![2], vec![3, 4]) }, [
            (Readable, Some("a :- not b, p(1,2), _4.\n")),
            (Smodels, Some("1 1 3 1 2 3 4\n")),
            (Aspif, Some("1 0 1 1 0 3 -2 3 4\n")),
            (Gnt, Some("a :- not b, p(1,2), _4.\n")),
            (Dlv, Some("a :- not b, p(1,2), int4.\n")),
            (Dimacs, None),
        ];
        fact => Rule::Basic { head: 4, body: Body::default() }, [
            (Readable, Some("_4.\n")),
            (Smodels, Some("1 4 0 0\n")),
            (Aspif, Some("1 0 1 4 0 0\n")),
            (Dlv, Some("int4.\n")),
        ];
        constraint => Rule::Constraint { head: 1, bound: 2, body: Body::new(vec![2], vec![3]) }, [
            (Readable, Some("a :- 2 {not b, p(1,2)}.\n")),
            (Smodels, Some("2 1 2 1 2 2 3\n")),
            (Aspif, Some("1 0 1 1 1 2 2 -2 1 3 1\n")),
            (Gnt, None),
            (Dlv, None),
            (Dimacs, None),
        ];
        choice => Rule::Choice { heads: vec![1, 4], body: Body::new(vec![], vec![2]) }, [
            (Readable, Some("{a, _4} :- b.\n")),
            (Smodels, Some("3 2 1 4 1 0 2\n")),
            (Aspif, Some("1 1 2 1 4 0 1 2\n")),
            (Gnt, Some("a | _4 :- b.\n")),
            (Dlv, Some("a v int4 :- b.\n")),
            (Dimacs, None),
        ];
        empty_choice => Rule::Choice { heads: vec![], body: Body::new(vec![], vec![1]) }, [
            (Readable, Some("{} :- a.\n")),
            (Smodels, Some("3 0 1 0 1\n")),
            (Gnt, None),
            (Dlv, None),
        ];
        integrity => Rule::Integrity { body: Body::new(vec![1], vec![2]) }, [
            (Readable, Some(":- not a, b.\n")),
            (Smodels, Some("4 2 1 1 2\n")),
            (Aspif, Some("1 0 0 0 2 -1 2\n")),
            (Gnt, Some(":- not a, b.\n")),
            (Dlv, Some(":- not a, b.\n")),
            (Dimacs, None),
        ];
        empty_integrity => Rule::Integrity { body: Body::default() }, [
            (Readable, Some(".\n")),
            (Smodels, Some("4 0 0\n")),
            (Aspif, Some("1 0 0 0 0\n")),
            (Dlv, Some(".\n")),
        ];
        weight => Rule::Weight { head: 1, bound: 3, body: weighted(vec![2], vec![3], vec![4, 5]) }, [
            (Readable, Some("a :- 3 [not b=4, p(1,2)=5].\n")),
            (Smodels, Some("5 1 3 2 1 2 3 4 5\n")),
            (Aspif, Some("1 0 1 1 1 3 2 -2 4 3 5\n")),
            (Gnt, None),
            (Dlv, None),
            (Dimacs, None),
        ];
        optimize => Rule::Optimize { body: weighted(vec![1], vec![4], vec![2, 3]) }, [
            (Readable, Some("minimize [not a=2, _4=3].\n")),
            (Smodels, Some("6 0 2 1 1 4 2 3\n")),
            (Aspif, Some("2 0 2 -1 2 4 3\n")),
            (Gnt, None),
            (Dlv, None),
            (Dimacs, None),
        ];
        empty_optimize => Rule::Optimize { body: weighted(vec![], vec![], vec![]) }, [
            (Readable, Some("\n")),
            (Smodels, Some("6 0 0 0\n")),
            (Aspif, Some("2 0 0\n")),
        ];
        disjunctive => Rule::Disjunctive { heads: vec![1, 2], body: Body::new(vec![3], vec![]) }, [
            (Readable, Some("a | b :- not p(1,2).\n")),
            (Smodels, Some("8 2 1 2 1 1 3\n")),
            (Aspif, Some("1 0 2 1 2 0 1 -3\n")),
            (Gnt, Some("a | b :- not p(1,2).\n")),
            (Dlv, Some("a v b :- not p(1,2).\n")),
            (Dimacs, None),
        ];
        weighted_clause => Rule::Clause { body: Body::new(vec![1], vec![2, 4]), weight: Some(7) }, [
            (Readable, Some("-a | b | _4 = 7.\n")),
            (Smodels, None),
            (Aspif, None),
            (Gnt, Some("-a | b | _4.\n")),
            (Dlv, Some("-a | b | _4.\n")),
            (Dimacs, Some("7 -1 2 4 0\n")),
        ];
        clause => Rule::Clause { body: Body::new(vec![3], vec![1]), weight: None }, [
            (Readable, Some("-p(1,2) | a.\n")),
            (Dimacs, Some("-3 1 0\n")),
        ];
    }

    #[test]
    fn test_decorations() {
        let mut table = table();
        table.set_prefix("x_");
        table.set_postfix("'");
        table.set_shift(10);
        let rule = Rule::Basic {
            head: 3,
            body: Body::new(vec![4], vec![1]),
        };
        let mut buffer = BufWriter::new(Vec::new());
        ProgramWriter::new(OutputStyle::Readable)
            .write_rule(&mut buffer, &rule, &table)
            .unwrap();
        ProgramWriter::new(OutputStyle::Smodels)
            .write_rule(&mut buffer, &rule, &table)
            .unwrap();
        assert_eq!(
            "x_p'(1,2) :- not _14, x_a'.\n1 13 2 1 14 11\n",
            String::from_utf8(buffer.into_inner().unwrap()).unwrap()
        );
    }

    #[test]
    fn test_atom_len() {
        let mut table = table();
        assert_eq!(1, atom_len(1, &table).unwrap());
        assert_eq!(6, atom_len(3, &table).unwrap());
        assert_eq!(2, atom_len(4, &table).unwrap());
        table.set_prefix("x_");
        table.set_postfix("'");
        table.set_shift(10);
        assert_eq!(4, atom_len(1, &table).unwrap());
        assert_eq!(3, atom_len(4, &table).unwrap());
        assert!(atom_len(5, &table).is_err());
    }

    #[test]
    fn test_out_of_range_atom() {
        let rule = Rule::Basic {
            head: 9,
            body: Body::default(),
        };
        let mut buffer = BufWriter::new(Vec::new());
        let err = ProgramWriter::new(OutputStyle::Readable)
            .write_rule(&mut buffer, &rule, &table())
            .unwrap_err();
        assert_eq!(
            Some(&LpError::AtomOutOfRange(9)),
            err.root_cause().downcast_ref::<LpError>()
        );
    }

    #[test]
    fn test_write_program_writes_nothing_on_unsupported_rule() {
        let program = Program::new(vec![
            Rule::Basic {
                head: 1,
                body: Body::default(),
            },
            Rule::Weight {
                head: 2,
                bound: 1,
                body: weighted(vec![], vec![1], vec![1]),
            },
        ]);
        for style in [OutputStyle::Gnt, OutputStyle::Dlv] {
            let mut buffer = BufWriter::new(Vec::new());
            let err = ProgramWriter::new(style)
                .write_program(&mut buffer, &program, &table())
                .unwrap_err();
            assert_eq!(
                Some(&LpError::UnsupportedOutput(
                    "weight rules".to_string(),
                    style.to_string()
                )),
                err.root_cause().downcast_ref::<LpError>()
            );
            assert!(buffer.into_inner().unwrap().is_empty());
        }
    }

    #[test]
    fn test_aspif_priorities() {
        let optimize = |a| Rule::Optimize {
            body: weighted(vec![], vec![a], vec![1]),
        };
        let program = Program::new(vec![optimize(1), optimize(2)]);
        let writer = ProgramWriter::new(OutputStyle::Aspif);
        let mut buffer = BufWriter::new(Vec::new());
        writer
            .write_program(&mut buffer, &program, &table())
            .unwrap();
        writer
            .write_program(&mut buffer, &Program::new(vec![optimize(3)]), &table())
            .unwrap();
        assert_eq!(
            "2 0 1 1 1\n2 1 1 2 1\n2 2 1 3 1\n",
            String::from_utf8(buffer.into_inner().unwrap()).unwrap()
        );
    }

    #[test]
    fn test_write_cnf_rejects_rules() {
        let program = Program::new(vec![Rule::Integrity {
            body: Body::new(vec![], vec![1]),
        }]);
        let mut buffer = BufWriter::new(Vec::new());
        let err = ProgramWriter::new(OutputStyle::Dimacs)
            .write_cnf(&mut buffer, &program, &table())
            .unwrap_err();
        assert_eq!(
            Some(&LpError::UnsupportedRuleType("integrity constraints".to_string())),
            err.root_cause().downcast_ref::<LpError>()
        );
    }

    #[test]
    fn test_write_clause_as_rule() {
        let clause = Rule::Clause {
            body: Body::new(vec![2], vec![1]),
            weight: None,
        };
        let mut symbols = SymbolTable::default();
        let mut contradiction_table = AtomTable::new(1, 0);
        contradiction_table
            .set_name(1, symbols.intern("contradiction"))
            .unwrap();
        let mut buffer = BufWriter::new(Vec::new());
        for style in [OutputStyle::Readable, OutputStyle::Smodels, OutputStyle::Aspif] {
            ProgramWriter::new(style)
                .write_clause_as_rule(&mut buffer, &clause, &table(), 1, &contradiction_table)
                .unwrap();
        }
        assert_eq!(
            "contradiction :- not a, b.\n1 1 2 1 1 2\n1 0 1 1 0 2 -1 2\n",
            String::from_utf8(buffer.into_inner().unwrap()).unwrap()
        );
    }

    #[test]
    fn test_write_other_atom() {
        let mut symbols = SymbolTable::default();
        let mut table1 = AtomTable::new(2, 0);
        table1.set_name(1, symbols.intern("a")).unwrap();
        table1.set_name(2, symbols.intern("b")).unwrap();
        let mut table2 = AtomTable::new(2, 0);
        table2.set_name(1, symbols.intern("b")).unwrap();
        table2.set_shift(5);
        assert_eq!(None, table1.match_with(&mut table2, false));
        let writer = ProgramWriter::new(OutputStyle::Smodels);
        let mut buffer = BufWriter::new(Vec::new());
        writer
            .write_other_atom(&mut buffer, 2, &table1, &table2)
            .unwrap();
        let err = writer
            .write_other_atom(&mut buffer, 1, &table1, &table2)
            .unwrap_err();
        assert_eq!(
            Some(&LpError::MissingCrossReference(1)),
            err.root_cause().downcast_ref::<LpError>()
        );
        let err = writer
            .write_other_atom(&mut buffer, 2, &table1, &table1.clone())
            .unwrap_err();
        assert_eq!(
            Some(&LpError::MissingCrossReference(2)),
            err.root_cause().downcast_ref::<LpError>()
        );
        ProgramWriter::new(OutputStyle::Dimacs)
            .write_other_classical_atom(&mut buffer, 2, &table1, &table2)
            .unwrap();
        assert_eq!(
            "66",
            String::from_utf8(buffer.into_inner().unwrap()).unwrap()
        );
    }

    #[test]
    fn test_classical_atoms() {
        let mut buffer = BufWriter::new(Vec::new());
        ProgramWriter::new(OutputStyle::Dlv)
            .write_classical_atom(&mut buffer, 4, &table())
            .unwrap();
        ProgramWriter::new(OutputStyle::Dimacs)
            .write_classical_atom(&mut buffer, 3, &table())
            .unwrap();
        assert!(ProgramWriter::new(OutputStyle::Smodels)
            .write_classical_atom(&mut buffer, 3, &table())
            .is_err());
        assert_eq!(
            "_43",
            String::from_utf8(buffer.into_inner().unwrap()).unwrap()
        );
    }
}
