use super::{Body, WeightedBody};
use crate::atoms::Atom;
use anyhow::{anyhow, Result};
use strum_macros::{Display, EnumIter, EnumString, EnumVariantNames};

/// The shapes of rules.
///
/// The string representation of a rule type is the lowercase name of the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, EnumVariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum RuleType {
    /// `h :- body`
    Basic,
    /// `h :- k {body}`
    Constraint,
    /// `{h1, ..., hn} :- body`
    Choice,
    /// `:- body`
    Integrity,
    /// `h :- k [body=weights]`
    Weight,
    /// `minimize [body=weights]`
    Optimize,
    /// `h1 | ... | hn :- body`
    Disjunctive,
    /// A CNF clause, possibly weighted.
    Clause,
}

impl RuleType {
    /// Returns the numeric tag of this rule type in the Smodels format.
    ///
    /// Clauses, which are not part of the Smodels format, are given the tag `9`.
    pub fn tag(&self) -> i64 {
        match self {
            RuleType::Basic => 1,
            RuleType::Constraint => 2,
            RuleType::Choice => 3,
            RuleType::Integrity => 4,
            RuleType::Weight => 5,
            RuleType::Optimize => 6,
            RuleType::Disjunctive => 8,
            RuleType::Clause => 9,
        }
    }

    /// Returns a plural description of the rules of this type, used in messages.
    pub fn description(&self) -> &'static str {
        match self {
            RuleType::Basic => "basic rules",
            RuleType::Constraint => "constraint rules",
            RuleType::Choice => "choice rules",
            RuleType::Integrity => "integrity constraints",
            RuleType::Weight => "weight rules",
            RuleType::Optimize => "optimize statements",
            RuleType::Disjunctive => "disjunctive rules",
            RuleType::Clause => "clauses",
        }
    }
}

impl TryFrom<i64> for RuleType {
    type Error = anyhow::Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RuleType::Basic),
            2 => Ok(RuleType::Constraint),
            3 => Ok(RuleType::Choice),
            4 => Ok(RuleType::Integrity),
            5 => Ok(RuleType::Weight),
            6 => Ok(RuleType::Optimize),
            8 => Ok(RuleType::Disjunctive),
            9 => Ok(RuleType::Clause),
            _ => Err(anyhow!(r#"undefined rule type "{}""#, value)),
        }
    }
}

/// A rule of a logic program, or a clause of a CNF formula.
///
/// Negative literals of bodies are given by the atoms they refer to.
/// For clauses, the negative literals are the atoms occurring negatively in the clause, and the positive literals are the other ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// A basic rule.
    Basic {
        /// the head atom
        head: Atom,
        /// the body
        body: Body,
    },
    /// A constraint rule: the head is derived if at least `bound` literals of the body hold.
    Constraint {
        /// the head atom
        head: Atom,
        /// the lower bound
        bound: i64,
        /// the body
        body: Body,
    },
    /// A choice rule.
    Choice {
        /// the head atoms
        heads: Vec<Atom>,
        /// the body
        body: Body,
    },
    /// An integrity constraint.
    Integrity {
        /// the body
        body: Body,
    },
    /// A weight rule: the head is derived if the weights of the literals that hold sum up to at least `bound`.
    Weight {
        /// the head atom
        head: Atom,
        /// the lower bound
        bound: i64,
        /// the weighted body
        body: WeightedBody,
    },
    /// An optimize statement.
    Optimize {
        /// the weighted literals to minimize
        body: WeightedBody,
    },
    /// A disjunctive rule.
    Disjunctive {
        /// the head atoms
        heads: Vec<Atom>,
        /// the body
        body: Body,
    },
    /// A clause, with a weight if it belongs to a weighted formula.
    Clause {
        /// the literals
        body: Body,
        /// the weight
        weight: Option<i64>,
    },
}

impl Rule {
    /// Returns the type of this rule.
    pub fn rule_type(&self) -> RuleType {
        match self {
            Rule::Basic { .. } => RuleType::Basic,
            Rule::Constraint { .. } => RuleType::Constraint,
            Rule::Choice { .. } => RuleType::Choice,
            Rule::Integrity { .. } => RuleType::Integrity,
            Rule::Weight { .. } => RuleType::Weight,
            Rule::Optimize { .. } => RuleType::Optimize,
            Rule::Disjunctive { .. } => RuleType::Disjunctive,
            Rule::Clause { .. } => RuleType::Clause,
        }
    }

    /// Returns the head of this rule for shapes with a single head atom.
    pub fn head(&self) -> Option<Atom> {
        match self {
            Rule::Basic { head, .. } | Rule::Constraint { head, .. } | Rule::Weight { head, .. } => {
                Some(*head)
            }
            _ => None,
        }
    }

    /// Returns the head atoms of this rule.
    ///
    /// Shapes without a head return an empty slice.
    pub fn heads(&self) -> &[Atom] {
        match self {
            Rule::Basic { head, .. } | Rule::Constraint { head, .. } | Rule::Weight { head, .. } => {
                std::slice::from_ref(head)
            }
            Rule::Choice { heads, .. } | Rule::Disjunctive { heads, .. } => heads,
            _ => &[],
        }
    }

    /// Returns the body of this rule, without its weights.
    pub fn body(&self) -> &Body {
        match self {
            Rule::Basic { body, .. }
            | Rule::Constraint { body, .. }
            | Rule::Choice { body, .. }
            | Rule::Integrity { body }
            | Rule::Disjunctive { body, .. }
            | Rule::Clause { body, .. } => body,
            Rule::Weight { body, .. } | Rule::Optimize { body } => body.body(),
        }
    }

    /// Returns the positive literals of the body.
    pub fn pos(&self) -> &[Atom] {
        self.body().pos()
    }

    /// Returns the negative literals of the body.
    pub fn neg(&self) -> &[Atom] {
        self.body().neg()
    }

    /// Returns the weights of the body literals, negative ones first, for weighted shapes.
    pub fn weights(&self) -> Option<&[i64]> {
        match self {
            Rule::Weight { body, .. } | Rule::Optimize { body } => Some(body.weights()),
            _ => None,
        }
    }

    /// Returns the number of integers needed to write this rule in the Smodels format.
    ///
    /// For clauses, this is the number of integers needed to write the clause in the DIMACS format.
    ///
    /// # Example
    ///
    /// ```
    /// # use lptools::rules::{Body, Rule};
    /// let rule = Rule::Basic { head: 1, body: Body::new(vec![2], vec![3]) };
    /// assert_eq!(6, rule.internal_length()); // 1 1 2 1 2 3
    /// ```
    pub fn internal_length(&self) -> usize {
        let body_len = self.body().len();
        match self {
            Rule::Basic { .. } => body_len + 4,
            Rule::Constraint { .. } => body_len + 5,
            Rule::Choice { heads, .. } | Rule::Disjunctive { heads, .. } => {
                heads.len() + body_len + 4
            }
            Rule::Integrity { .. } => body_len + 3,
            Rule::Weight { .. } => 2 * body_len + 5,
            Rule::Optimize { .. } => 2 * body_len + 4,
            Rule::Clause { weight, .. } => body_len + 1 + usize::from(weight.is_some()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn weighted(neg: Vec<Atom>, pos: Vec<Atom>, weights: Vec<i64>) -> WeightedBody {
        WeightedBody::new(Body::new(neg, pos), weights).unwrap()
    }

    #[test]
    fn test_rule_type_names() {
        assert_eq!("disjunctive", RuleType::Disjunctive.to_string());
        assert_eq!(RuleType::Optimize, RuleType::from_str("optimize").unwrap());
        assert!(RuleType::from_str("ordered").is_err());
    }

    #[test]
    fn test_rule_type_tags() {
        for t in RuleType::iter() {
            assert_eq!(t, RuleType::try_from(t.tag()).unwrap());
        }
        assert!(RuleType::try_from(7).is_err());
        assert!(RuleType::try_from(0).is_err());
    }

    #[test]
    fn test_heads() {
        let basic = Rule::Basic {
            head: 3,
            body: Body::default(),
        };
        assert_eq!(Some(3), basic.head());
        assert_eq!(&[3], basic.heads());
        let choice = Rule::Choice {
            heads: vec![1, 2],
            body: Body::default(),
        };
        assert_eq!(None, choice.head());
        assert_eq!(&[1, 2], choice.heads());
        let integrity = Rule::Integrity {
            body: Body::new(vec![1], vec![]),
        };
        assert!(integrity.heads().is_empty());
    }

    #[test]
    fn test_body_accessors() {
        let rule = Rule::Weight {
            head: 1,
            bound: 3,
            body: weighted(vec![2], vec![3, 4], vec![1, 2, 3]),
        };
        assert_eq!(&[2], rule.neg());
        assert_eq!(&[3, 4], rule.pos());
        assert_eq!(Some(&[1, 2, 3][..]), rule.weights());
        assert_eq!(None, Rule::Integrity { body: Body::default() }.weights());
    }

    #[test]
    fn test_internal_length() {
        let body = || Body::new(vec![5], vec![6, 7]);
        let cases = vec![
            (Rule::Basic { head: 1, body: body() }, 7),
            (
                Rule::Constraint {
                    head: 1,
                    bound: 2,
                    body: body(),
                },
                8,
            ),
            (
                Rule::Choice {
                    heads: vec![1, 2],
                    body: body(),
                },
                9,
            ),
            (Rule::Integrity { body: body() }, 6),
            (
                Rule::Weight {
                    head: 1,
                    bound: 2,
                    body: weighted(vec![5], vec![6, 7], vec![1, 1, 1]),
                },
                11,
            ),
            (
                Rule::Optimize {
                    body: weighted(vec![5], vec![6, 7], vec![1, 1, 1]),
                },
                10,
            ),
            (
                Rule::Disjunctive {
                    heads: vec![1, 2],
                    body: body(),
                },
                9,
            ),
            (
                Rule::Clause {
                    body: body(),
                    weight: None,
                },
                4,
            ),
            (
                Rule::Clause {
                    body: body(),
                    weight: Some(3),
                },
                5,
            ),
        ];
        for (rule, expected) in cases {
            assert_eq!(expected, rule.internal_length(), "{:?}", rule);
        }
    }
}
