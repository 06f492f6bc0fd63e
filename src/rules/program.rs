use super::{Rule, RuleType};

/// An ordered sequence of rules.
///
/// The order of the rules is kept from reading to writing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    rules: Vec<Rule>,
}

impl Program {
    /// Builds a program from a sequence of rules.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Adds a rule at the end of the program.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Appends the rules of another program at the end of this one.
    pub fn append(&mut self, other: Program) {
        self.rules.extend(other.rules);
    }

    /// Returns the rules of this program.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Keeps the rules for which the predicate holds, preserving their order.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Rule) -> bool,
    {
        self.rules.retain(f)
    }

    /// Iterates over the rules.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Returns the number of rules.
    pub fn number_of_rules(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` iff the program has no rule.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns `true` iff some rule is neither a basic rule nor an integrity constraint.
    pub fn non_basic(&self) -> bool {
        !self.check_rule_types(&[RuleType::Basic, RuleType::Integrity])
    }

    /// Returns `true` iff the type of each rule is one of the given types.
    pub fn check_rule_types(&self, types: &[RuleType]) -> bool {
        self.rules.iter().all(|r| types.contains(&r.rule_type()))
    }

    /// Returns `true` iff some rule is not a basic rule with an empty positive body.
    pub fn non_atomic(&self) -> bool {
        self.rules
            .iter()
            .any(|r| !matches!(r, Rule::Basic { body, .. } if body.pos().is_empty()))
    }

    /// Returns the number of integers needed to write the rules in the Smodels (or DIMACS) format.
    pub fn internal_length(&self) -> usize {
        self.rules.iter().map(|r| r.internal_length()).sum()
    }

    /// Returns the number of rules of the given type.
    pub fn count_rules(&self, rule_type: RuleType) -> usize {
        self.rules
            .iter()
            .filter(|r| r.rule_type() == rule_type)
            .count()
    }
}

impl From<Vec<Rule>> for Program {
    fn from(rules: Vec<Rule>) -> Self {
        Program::new(rules)
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
