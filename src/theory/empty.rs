//! The empty theory.  Instantiate this to get a SAT solver.

use crate::cnf::{Clause, Literal};
use crate::error::TheoryError;
use crate::theory::{Theory, Verdict};

/// The empty theory has no state, and accepts every model.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyTheory();

impl EmptyTheory {
    pub fn new() -> EmptyTheory {
        EmptyTheory {}
    }
}

impl Theory for EmptyTheory {
    fn check(&mut self, _model: &[Literal]) -> Verdict {
        Verdict::Consistent
    }

    fn learn(&mut self) -> Result<Clause, TheoryError> {
        Err(TheoryError::NotInconsistent(Verdict::Consistent))
    }
}
