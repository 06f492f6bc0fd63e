use crate::{atoms::Atom, utils::LpError};
use anyhow::{anyhow, Context, Result};
use std::{
    collections::VecDeque,
    io::{BufRead, BufReader, Lines, Read},
};

/// Splits an input into whitespace-separated tokens, keeping track of line indices.
pub(crate) struct TokenReader<'a> {
    lines: Lines<BufReader<&'a mut dyn Read>>,
    line_index: usize,
    tokens: VecDeque<String>,
}

impl<'a> TokenReader<'a> {
    pub(crate) fn new(reader: &'a mut dyn Read) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
            line_index: 0,
            tokens: VecDeque::new(),
        }
    }

    /// Returns the (0-based) index of the line of the last token.
    pub(crate) fn line_index(&self) -> usize {
        self.line_index.saturating_sub(1)
    }

    /// Returns the next token, or `None` at the end of the input.
    pub(crate) fn next_token(&mut self) -> Result<Option<String>> {
        while self.tokens.is_empty() {
            match self.lines.next() {
                Some(line) => {
                    let context = || format!("while reading line with index {}", self.line_index);
                    let l = line.with_context(context)?;
                    self.tokens
                        .extend(l.split_whitespace().map(|w| w.to_string()));
                    self.line_index += 1;
                }
                None => return Ok(None),
            }
        }
        Ok(self.tokens.pop_front())
    }

    /// Reads an integer; `what` describes the expected field in case of error.
    pub(crate) fn read_int(&mut self, what: &str) -> Result<i64> {
        match self.next_token()? {
            Some(t) => t.parse::<i64>().map_err(|_| {
                anyhow!(LpError::MalformedField(format!(
                    r#"{}, expected an integer, got "{}""#,
                    what, t
                )))
            }),
            None => Err(anyhow!(LpError::MalformedField(format!("missing {}", what)))),
        }
    }

    /// Reads a non-negative integer.
    pub(crate) fn read_count(&mut self, what: &str) -> Result<usize> {
        let n = self.read_int(what)?;
        usize::try_from(n).map_err(|_| {
            anyhow!(LpError::MalformedField(format!(
                "{}, invalid value {}",
                what, n
            )))
        })
    }

    /// Reads an atom, which must be a positive integer.
    pub(crate) fn read_atom(&mut self, what: &str) -> Result<Atom> {
        let n = self.read_int(what)?;
        if n <= 0 {
            return Err(anyhow!(LpError::MalformedField(format!(
                "{}, invalid atom {}",
                what, n
            ))));
        }
        Ok(n as Atom)
    }

    /// Reads an atom, or `None` if the terminating `0` is read.
    pub(crate) fn read_atom_or_end(&mut self, what: &str) -> Result<Option<Atom>> {
        let n = self.read_int(what)?;
        match n {
            0 => Ok(None),
            n if n > 0 => Ok(Some(n as Atom)),
            _ => Err(anyhow!(LpError::MalformedField(format!(
                "{}, invalid atom {}",
                what, n
            )))),
        }
    }

    /// Reads a list of atoms.
    pub(crate) fn read_atoms(&mut self, count: usize, what: &str) -> Result<Vec<Atom>> {
        (0..count).map(|_| self.read_atom(what)).collect()
    }

    /// Reads a list of integers.
    pub(crate) fn read_ints(&mut self, count: usize, what: &str) -> Result<Vec<i64>> {
        (0..count).map(|_| self.read_int(what)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_across_lines() {
        let mut input = "1 2\n\n  3\t4 \n".as_bytes();
        let mut reader = TokenReader::new(&mut input);
        assert_eq!(vec![1, 2, 3], reader.read_ints(3, "int").unwrap());
        assert_eq!(2, reader.line_index());
        assert_eq!(Some("4".to_string()), reader.next_token().unwrap());
        assert_eq!(None, reader.next_token().unwrap());
    }

    #[test]
    fn test_read_int_errors() {
        let mut input = "a".as_bytes();
        let mut reader = TokenReader::new(&mut input);
        let err = reader.read_int("bound").unwrap_err();
        assert_eq!(r#"bound, expected an integer, got "a""#, err.to_string());
        let err = reader.read_int("bound").unwrap_err();
        assert_eq!("missing bound", err.to_string());
    }

    #[test]
    fn test_read_atom() {
        let mut input = "3 0 -1 0 2".as_bytes();
        let mut reader = TokenReader::new(&mut input);
        assert_eq!(3, reader.read_atom("head").unwrap());
        assert!(reader.read_atom("head").is_err());
        assert!(reader.read_atom_or_end("atom").is_err());
        assert_eq!(None, reader.read_atom_or_end("atom").unwrap());
        assert_eq!(Some(2), reader.read_atom_or_end("atom").unwrap());
    }

    #[test]
    fn test_read_count() {
        let mut input = "2 -2".as_bytes();
        let mut reader = TokenReader::new(&mut input);
        assert_eq!(2, reader.read_count("count").unwrap());
        assert_eq!(
            "count, invalid value -2",
            reader.read_count("count").unwrap_err().to_string()
        );
    }
}
