//! Offline abstraction refinement.
//!
//! The SAT engine knows nothing of the theory: it solves the boolean
//! abstraction, and every model it finds is checked afterwards.  A
//! rejected model is blocked by a clause, and the whole, slightly
//! larger, formula is solved again by a fresh engine.
//!
//! Each lemma blocks one full assignment to the theory atoms, so there
//! are at most 2^n rounds for n atoms.

use tracing::debug;

use crate::cnf::{Formula, Literal};
use crate::config::SolverConfig;
use crate::dpll::Dpll;
use crate::engine::{SatEngine, SolveResult};
use crate::error::TheoryError;
use crate::session::Session;
use crate::strategy::{Outcome, Status};
use crate::theory::equality::EqualityTheory;
use crate::theory::{Theory, Verdict};

#[derive(Clone, Debug, PartialEq, Eq)]
enum LoopState {
    Init,
    PropSolve,
    TheoryCheck(Vec<Literal>),
    Learn,
    Done(Status, Option<Vec<Literal>>),
}

pub struct LazyRefinementLoop<'s> {
    session: &'s Session,
    config: SolverConfig,
    theory: EqualityTheory,
    clauses: Formula,
    lemmas: usize,
}

impl<'s> LazyRefinementLoop<'s> {
    pub fn new(session: &'s Session, config: &SolverConfig) -> LazyRefinementLoop<'s> {
        LazyRefinementLoop {
            session,
            config: config.clone(),
            theory: session.theory(),
            clauses: Formula::default(),
            lemmas: 0,
        }
    }

    /// Run to a fixed point with the built-in engine.
    pub fn run(self) -> Result<Outcome, TheoryError> {
        let config = self.config.clone();
        self.run_with(|| Dpll::from_config(&config))
    }

    /// Run to a fixed point, asking `new_engine` for a fresh engine in
    /// every round.
    pub fn run_with<E, F>(mut self, mut new_engine: F) -> Result<Outcome, TheoryError>
    where
        E: SatEngine,
        F: FnMut() -> E,
    {
        let num_vars = self.session.num_vars();
        let mut state = LoopState::Init;

        loop {
            state = match state {
                LoopState::Init => {
                    self.clauses = self.session.formula().clone();
                    LoopState::PropSolve
                }
                LoopState::PropSolve => {
                    debug!(
                        round = self.lemmas + 1,
                        clauses = self.clauses.len(),
                        "solving abstraction"
                    );
                    match new_engine().solve(&self.clauses, num_vars)? {
                        SolveResult::Sat(model) => LoopState::TheoryCheck(model),
                        SolveResult::Unsat => LoopState::Done(Status::Unsat, None),
                        SolveResult::Unknown => LoopState::Done(Status::Unknown, None),
                    }
                }
                LoopState::TheoryCheck(model) => {
                    let verdict = self.theory.check(&model);
                    after_check(verdict, model)
                }
                LoopState::Learn => {
                    if self.config.refinement_limit.is_some_and(|limit| self.lemmas >= limit) {
                        debug!(lemmas = self.lemmas, "refinement limit reached");
                        LoopState::Done(Status::Unknown, None)
                    } else {
                        let clause = self.theory.learn()?;
                        debug!(%clause, "blocking model");
                        self.clauses.insert_clause(clause);
                        self.lemmas += 1;
                        LoopState::PropSolve
                    }
                }
                LoopState::Done(status, model) => {
                    return Ok(Outcome {
                        status,
                        model,
                        clauses: self.clauses,
                        lemmas: self.lemmas,
                        theory_checks: self.theory.checks(),
                    })
                }
            };
        }
    }
}

/// Where a checked model leads.  Only a consistent model is accepted;
/// a theory with no opinion leaves the session undecided.
fn after_check(verdict: Verdict, model: Vec<Literal>) -> LoopState {
    match verdict {
        Verdict::Consistent => LoopState::Done(Status::Sat, Some(model)),
        Verdict::Inconsistent => LoopState::Learn,
        Verdict::Unknown => LoopState::Done(Status::Unknown, None),
    }
}
