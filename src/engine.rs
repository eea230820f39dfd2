//! The interface between integration strategies and a propositional
//! search engine.

use crate::cnf::{Formula, Literal};
use crate::error::TheoryError;
use crate::theory::empty::EmptyTheory;
use crate::theory::Theory;

/// The answer of one propositional search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveResult {
    /// A model, as true literals in identifier order.
    Sat(Vec<Literal>),
    Unsat,
    /// The engine gave up, for example by running out of its budget.
    Unknown,
}

/// When an engine consults the theory during a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OracleMode {
    /// Only once the assignment is complete.
    CompleteModel,
    /// Also after every propagation and decision, on the partial
    /// assignment built so far.
    Propagation,
}

/// A propositional search engine.
pub trait SatEngine {
    /// Search for a model of `formula` assigning every variable from 1
    /// to `num_vars` (and any others the formula mentions), treating
    /// `theory` as an oracle.
    ///
    /// Clauses learned from the theory are appended to `formula`, so
    /// after the call it holds the engine's whole clause database.
    fn solve_with<T: Theory>(
        &mut self,
        formula: &mut Formula,
        num_vars: usize,
        theory: &mut T,
        mode: OracleMode,
    ) -> Result<SolveResult, TheoryError>;

    /// Search for a model of `formula` alone.
    fn solve(&mut self, formula: &Formula, num_vars: usize) -> Result<SolveResult, TheoryError> {
        self.solve_with(
            &mut formula.clone(),
            num_vars,
            &mut EmptyTheory::new(),
            OracleMode::CompleteModel,
        )
    }
}
