//! Lptools is a library handling logic programs in the Smodels format and CNF formulas in the DIMACS format.
//!
//! Programs are read by the objects of the [`io`] module into a list of [`rules`] and an [`atoms`] table,
//! the names of the atoms being interned by a [`symbols`] table.
//! The [`analysis`] module provides passes marking atoms and transforming programs,
//! and programs can be written back in several styles.

#![warn(missing_docs)]

pub mod analysis;

pub mod atoms;

pub mod io;

pub mod rules;

pub mod symbols;

pub mod utils;
