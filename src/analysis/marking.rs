use crate::{
    atoms::{AtomStatus, AtomTable},
    rules::{Program, Rule},
    utils::LpError,
};
use anyhow::{anyhow, Context, Result};

/// Marks the input atoms of a program.
///
/// Named atoms are input atoms unless they occur in the head of a rule.
/// If a module is given, it is recorded in the symbols of the named atoms occurring in heads.
///
/// An error is returned if a rule refers to an atom that is not in the table.
///
/// # Example
///
/// ```
/// # use lptools::{analysis, atoms::AtomStatus, io::{InstanceReader, SmodelsReader}, symbols::SymbolTable};
/// let mut symbols = SymbolTable::default();
/// let mut instance = SmodelsReader::default()
///     .read(&mut "1 1 1 0 2\n0\n1 a\n2 b\n0\nB+\n0\nB-\n0\n1\n".as_bytes(), &mut symbols)
///     .unwrap();
/// let (program, atoms) = instance.parts_mut();
/// analysis::mark_io_atoms(program, atoms, Some(1)).unwrap();
/// assert!(!atoms.get_status(1).unwrap().contains(AtomStatus::INPUT));
/// assert!(atoms.get_status(2).unwrap().contains(AtomStatus::INPUT));
/// assert_eq!(1, symbols.find("a").unwrap().module());
/// ```
pub fn mark_io_atoms(program: &Program, table: &mut AtomTable, module: Option<usize>) -> Result<()> {
    table
        .iter_mut()
        .filter(|(_, n, _)| n.is_some())
        .for_each(|(_, _, s)| s.insert(AtomStatus::INPUT));
    for (i, rule) in program.iter().enumerate() {
        for head in rule.heads() {
            table
                .clear_status(*head, AtomStatus::INPUT)
                .with_context(|| format!("while marking the heads of rule with index {}", i))?;
            if let Some(m) = module {
                table.set_module(*head, m);
            }
        }
    }
    Ok(())
}

/// Marks the named atoms as visible.
pub fn mark_visible(table: &mut AtomTable) {
    table
        .iter_mut()
        .filter(|(_, n, _)| n.is_some())
        .for_each(|(_, _, s)| s.insert(AtomStatus::VISIBLE));
}

/// Marks the atoms occurring in the heads, the positive bodies and the negative bodies of the rules.
///
/// Clauses are handled as rules without head; their positive and negative literals are marked as positive and negative occurrences.
/// All the atoms of the table are updated even if a rule refers to atoms out of it; in this case, an error is returned afterwards.
pub fn mark_occurrences(program: &Program, table: &mut AtomTable) -> Result<()> {
    let mut result = Ok(());
    for (i, rule) in program.iter().enumerate() {
        let r = table
            .set_statuses(rule.heads(), AtomStatus::HEADOCC)
            .and(table.set_statuses(rule.pos(), AtomStatus::POSOCC))
            .and(table.set_statuses(rule.neg(), AtomStatus::NEGOCC))
            .with_context(|| format!("while marking the occurrences of rule with index {}", i));
        if result.is_ok() {
            result = r;
        }
    }
    result
}

/// Looks for anonymous atoms occurring negatively.
///
/// Negative body literals, the heads of choice and disjunctive rules and the negative literals of clauses are considered.
/// Each anonymous atom found is marked as occurring negatively.
/// Returns `true` iff such an atom was found.
pub fn check_negative_invisible(program: &Program, table: &mut AtomTable) -> Result<bool> {
    let mut found = false;
    for (i, rule) in program.iter().enumerate() {
        let choice_heads: &[_] = match rule {
            Rule::Choice { heads, .. } | Rule::Disjunctive { heads, .. } => heads,
            _ => &[],
        };
        for atom in choice_heads.iter().chain(rule.neg().iter()) {
            let context = || format!("while checking rule with index {}", i);
            let segment = table
                .find_segment(*atom)
                .ok_or_else(|| anyhow!(LpError::AtomOutOfRange(*atom)))
                .with_context(context)?;
            if segment.name(*atom).is_none() {
                found = true;
                table.set_status(*atom, AtomStatus::NEGOCC).with_context(context)?;
            }
        }
    }
    Ok(found)
}
