use crate::{atoms::Atom, utils::LpError};
use anyhow::{anyhow, Result};

/// The body of a rule: a set of negative literals and a set of positive literals.
///
/// Both sets share the same buffer, laid out as `[negative literals][positive literals]`.
/// Literal order is kept as given when the body was built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    literals: Vec<Atom>,
    neg_count: usize,
}

impl Body {
    /// Builds a body given its negative and positive literals.
    ///
    /// # Example
    ///
    /// ```
    /// # use lptools::rules::Body;
    /// let body = Body::new(vec![3], vec![1, 2]);
    /// assert_eq!(&[3], body.neg());
    /// assert_eq!(&[1, 2], body.pos());
    /// assert_eq!(&[3, 1, 2], body.literals());
    /// ```
    pub fn new(neg: Vec<Atom>, pos: Vec<Atom>) -> Self {
        let neg_count = neg.len();
        let mut literals = neg;
        literals.extend(pos);
        Self {
            literals,
            neg_count,
        }
    }

    /// Builds a body from a buffer laid out as `[negative literals][positive literals]`.
    ///
    /// An error is returned if the number of negative literals exceeds the size of the buffer.
    pub fn from_literals(literals: Vec<Atom>, neg_count: usize) -> Result<Self> {
        if neg_count > literals.len() {
            return Err(anyhow!(LpError::InvalidCount("body".to_string())));
        }
        Ok(Self {
            literals,
            neg_count,
        })
    }

    /// Returns the negative literals.
    pub fn neg(&self) -> &[Atom] {
        &self.literals[..self.neg_count]
    }

    /// Returns the positive literals.
    pub fn pos(&self) -> &[Atom] {
        &self.literals[self.neg_count..]
    }

    /// Returns all the literals, negative ones first.
    pub fn literals(&self) -> &[Atom] {
        &self.literals
    }

    /// Returns the number of literals.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Returns `true` iff the body has no literal.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

/// A body in which each literal is given a weight.
///
/// Weights are stored in a buffer parallel to the literals of the underlying [`Body`], negative ones first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightedBody {
    body: Body,
    weights: Vec<i64>,
}

impl WeightedBody {
    /// Builds a weighted body.
    ///
    /// An error is returned if the number of weights differs from the number of literals.
    ///
    /// # Example
    ///
    /// ```
    /// # use lptools::rules::{Body, WeightedBody};
    /// let body = WeightedBody::new(Body::new(vec![3], vec![1]), vec![5, 2]).unwrap();
    /// assert_eq!(&[5], body.neg_weights());
    /// assert_eq!(&[2], body.pos_weights());
    /// assert!(WeightedBody::new(Body::new(vec![3], vec![1]), vec![5]).is_err());
    /// ```
    pub fn new(body: Body, weights: Vec<i64>) -> Result<Self> {
        if body.len() != weights.len() {
            return Err(anyhow!(LpError::MalformedField(format!(
                "expected {} weights, got {}",
                body.len(),
                weights.len()
            ))));
        }
        Ok(Self { body, weights })
    }

    /// Returns the unweighted body.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Returns the weights, in the same order as [`Body::literals`].
    pub fn weights(&self) -> &[i64] {
        &self.weights
    }

    /// Returns the weights of the negative literals.
    pub fn neg_weights(&self) -> &[i64] {
        &self.weights[..self.body.neg_count]
    }

    /// Returns the weights of the positive literals.
    pub fn pos_weights(&self) -> &[i64] {
        &self.weights[self.body.neg_count..]
    }

    /// Iterates over the pairs of negative literals and weights.
    pub fn iter_neg(&self) -> impl Iterator<Item = (Atom, i64)> + '_ {
        self.body
            .neg()
            .iter()
            .copied()
            .zip(self.neg_weights().iter().copied())
    }

    /// Iterates over the pairs of positive literals and weights.
    pub fn iter_pos(&self) -> impl Iterator<Item = (Atom, i64)> + '_ {
        self.body
            .pos()
            .iter()
            .copied()
            .zip(self.pos_weights().iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body() {
        let body = Body::default();
        assert!(body.is_empty());
        assert!(body.neg().is_empty());
        assert!(body.pos().is_empty());
    }

    #[test]
    fn test_from_literals() {
        let body = Body::from_literals(vec![4, 5, 6], 1).unwrap();
        assert_eq!(&[4], body.neg());
        assert_eq!(&[5, 6], body.pos());
        assert_eq!(Body::new(vec![4], vec![5, 6]), body);
    }

    #[test]
    fn test_from_literals_invalid_count() {
        let err = Body::from_literals(vec![4], 2).unwrap_err();
        assert_eq!(
            Some(&LpError::InvalidCount("body".to_string())),
            err.downcast_ref::<LpError>()
        );
    }

    #[test]
    fn test_weighted_iter() {
        let body = WeightedBody::new(Body::new(vec![1, 2], vec![3]), vec![10, 20, 30]).unwrap();
        assert_eq!(vec![(1, 10), (2, 20)], body.iter_neg().collect::<Vec<_>>());
        assert_eq!(vec![(3, 30)], body.iter_pos().collect::<Vec<_>>());
        assert_eq!(&[1, 2, 3], body.body().literals());
    }
}
