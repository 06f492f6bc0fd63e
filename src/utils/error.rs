use thiserror::Error;

/// The kinds of errors raised while reading, transforming or writing logic programs.
///
/// Library functions return [`anyhow::Result`] values; when the failure comes from one of the cases listed here,
/// the underlying error can be recovered with [`anyhow::Error::downcast_ref`].
///
/// # Example
///
/// ```
/// # use lptools::{io::{InstanceReader, SmodelsReader}, symbols::SymbolTable, utils::LpError};
/// let mut symbols = SymbolTable::default();
/// let err = SmodelsReader::default()
///     .read(&mut "9 1 0 0".as_bytes(), &mut symbols)
///     .unwrap_err();
/// assert!(matches!(
///     err.root_cause().downcast_ref::<LpError>(),
///     Some(LpError::UnknownRuleType(9))
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LpError {
    /// An expected integer or token is absent or cannot be parsed.
    #[error("{0}")]
    MalformedField(String),
    /// The number of negative literals exceeds the number of literals.
    #[error("{0}, invalid positive count")]
    InvalidCount(String),
    /// The type tag of a rule is unknown.
    #[error("unknown rule type {0}")]
    UnknownRuleType(i64),
    /// The type tag of a rule is known, but the construct is not supported.
    #[error("{0} are not supported")]
    UnsupportedRuleType(String),
    /// The atom is not covered by any segment of the atom table.
    #[error("atom _{0} is out of the atom table")]
    AtomOutOfRange(usize),
    /// A new segment would overlap an existing one.
    #[error("segment ({0}, {1}] overlaps an existing segment of the atom table")]
    OverlappingSegment(usize, usize),
    /// A rule cannot be written using the requested style.
    #[error("{0} are not supported by the {1} style")]
    UnsupportedOutput(String, String),
    /// An atom has no counterpart in the cross-referenced table.
    #[error("missing cross reference for atom _{0}")]
    MissingCrossReference(usize),
    /// The DIMACS problem line is missing or invalid.
    #[error("DIMACS cnf/wcnf format: missing/invalid problem line")]
    InvalidProblemLine,
    /// A weighted clause has a weight lower than one.
    #[error("clause, non-positive weight {0}")]
    NonPositiveWeight(i64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context};

    #[test]
    fn test_downcast_through_context() {
        let result: anyhow::Result<()> = Err(anyhow!(LpError::AtomOutOfRange(4)))
            .context("while writing a rule");
        let err = result.unwrap_err();
        assert_eq!("while writing a rule", err.to_string());
        assert_eq!(
            Some(&LpError::AtomOutOfRange(4)),
            err.root_cause().downcast_ref::<LpError>()
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            "basic rule, invalid positive count",
            LpError::InvalidCount("basic rule".to_string()).to_string()
        );
        assert_eq!(
            "weight rules are not supported by the dlv style",
            LpError::UnsupportedOutput("weight rules".to_string(), "dlv".to_string())
                .to_string()
        );
    }
}
