use crate::{
    atoms::{AtomStatus, AtomTable},
    rules::{Program, Rule},
};
use anyhow::{Context, Result};
use log::info;

/// Decides whether a rule is kept, updating the status of its head.
///
/// Only rules with a single head whose body is trivially satisfied are candidates for removal.
fn keep_rule(rule: &Rule, table: &mut AtomTable) -> Result<bool> {
    let (head, trivial) = match rule {
        Rule::Basic { head, body } => (*head, body.is_empty()),
        Rule::Constraint { head, bound, .. } | Rule::Weight { head, bound, .. } => {
            (*head, *bound == 0)
        }
        _ => return Ok(true),
    };
    let status = table.get_status(head)?;
    if table.find_name(head).is_some() {
        if trivial {
            table.set_status(head, AtomStatus::UNIQUE)?;
        }
        return Ok(true);
    }
    if trivial && !status.intersects(AtomStatus::BODYOCC | AtomStatus::FALSE) {
        table.set_status(head, AtomStatus::UNIQUE)?;
        return Ok(false);
    }
    Ok(!status.contains(AtomStatus::UNIQUE))
}

/// Removes the rules defining hidden atoms which are not needed.
///
/// The occurrences of the atoms must have been marked before (see [`mark_occurrences`](super::mark_occurrences)).
/// A fact (or a rule with a trivially satisfied body) defining an anonymous atom that occurs in no body and is not required to be false is removed,
/// and its head is marked as [`UNIQUE`](AtomStatus::UNIQUE); the following rules defining this atom are removed too.
/// Heads of facts defining named atoms are marked as unique, but these facts are kept.
/// Choice rules, integrity constraints, optimize statements, disjunctive rules and clauses are always kept.
///
/// Returns the number of removed rules.
///
/// # Example
///
/// ```
/// # use lptools::{analysis, io::{InstanceReader, SmodelsReader}, symbols::SymbolTable};
/// let mut symbols = SymbolTable::default();
/// let mut instance = SmodelsReader::default()
///     .read(&mut "1 2 0 0\n1 1 0 0\n0\n1 a\n0\nB+\n0\nB-\n0\n1\n".as_bytes(), &mut symbols)
///     .unwrap();
/// let (program, atoms) = instance.parts_mut();
/// analysis::mark_occurrences(program, atoms).unwrap();
/// assert_eq!(1, analysis::strip_program(program, atoms).unwrap());
/// assert_eq!(1, program.number_of_rules());
/// ```
pub fn strip_program(program: &mut Program, table: &mut AtomTable) -> Result<usize> {
    let mut decisions = Vec::with_capacity(program.number_of_rules());
    for (i, rule) in program.iter().enumerate() {
        decisions.push(
            keep_rule(rule, table)
                .with_context(|| format!("while stripping rule with index {}", i))?,
        );
    }
    let before = program.number_of_rules();
    let mut decision = decisions.into_iter();
    program.retain(|_| decision.next().unwrap_or(true));
    let removed = before - program.number_of_rules();
    info!("stripped {} rule(s) out of {}", removed, before);
    Ok(removed)
}

/// Updates the compute statement after [`strip_program`].
///
/// Atoms marked as unique are no longer required to be true.
/// Anonymous unique atoms required to be false become required to be true as well, which keeps the contradiction.
pub fn strip_compute_statement(table: &mut AtomTable) {
    for (_, name, status) in table.iter_mut() {
        if !status.contains(AtomStatus::UNIQUE) {
            continue;
        }
        status.remove(AtomStatus::TRUE);
        if name.is_none() && status.contains(AtomStatus::FALSE) {
            status.insert(AtomStatus::TRUE);
        }
    }
}
