//! Theories

pub mod empty;
pub mod equality;
pub mod forest;

use std::fmt;

use crate::cnf::{Clause, Literal};
use crate::error::TheoryError;

/// The result of checking a model against a theory.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing has been checked yet.
    #[default]
    Unknown,
    Consistent,
    Inconsistent,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Verdict::Unknown => write!(f, "unknown"),
            Verdict::Consistent => write!(f, "consistent"),
            Verdict::Inconsistent => write!(f, "inconsistent"),
        }
    }
}

/// A trait for theories, allowing you to implement your own.  See
/// submodules of eqsmt::theory:: for theories this solver comes with.
///
/// A theory is an oracle for the SAT engine: it is handed (possibly
/// partial) models and either accepts them or explains why not.
/// Engines may call `check` any number of times during one search; a
/// `learn` is only meaningful immediately after an inconsistent
/// `check`.
pub trait Theory {
    /// Decide whether the theory literals of a model can all hold at
    /// once.  Literals the theory has no meaning for are ignored.
    fn check(&mut self, model: &[Literal]) -> Verdict;

    /// Produce a clause ruling out the model of the last inconsistent
    /// check.  Every literal of the clause is false under that model.
    fn learn(&mut self) -> Result<Clause, TheoryError>;
}

impl<T: Theory + ?Sized> Theory for &mut T {
    fn check(&mut self, model: &[Literal]) -> Verdict {
        (**self).check(model)
    }

    fn learn(&mut self) -> Result<Clause, TheoryError> {
        (**self).learn()
    }
}
