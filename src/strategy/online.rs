//! Integrations where the engine drives and the theory is an oracle
//! inside its search.
//!
//! A rejected assignment does not restart anything: the lemma goes into
//! the engine's clause database, which makes the current assignment
//! conflicting, and the engine backtracks out of it as it would for any
//! other conflict.

use crate::config::SolverConfig;
use crate::dpll::Dpll;
use crate::engine::{OracleMode, SatEngine, SolveResult};
use crate::error::TheoryError;
use crate::session::Session;
use crate::strategy::{Outcome, Status};

fn run_online<E: SatEngine>(
    session: &Session,
    engine: &mut E,
    mode: OracleMode,
) -> Result<Outcome, TheoryError> {
    let mut theory = session.theory();
    let mut clauses = session.formula().clone();
    let original = clauses.len();

    let result = engine.solve_with(&mut clauses, session.num_vars(), &mut theory, mode)?;
    let (status, model) = match result {
        SolveResult::Sat(model) => (Status::Sat, Some(model)),
        SolveResult::Unsat => (Status::Unsat, None),
        SolveResult::Unknown => (Status::Unknown, None),
    };

    Ok(Outcome {
        status,
        model,
        lemmas: clauses.len() - original,
        clauses,
        theory_checks: theory.checks(),
    })
}

/// The theory judges complete assignments found by the engine.
pub struct CallbackIntegration<'s> {
    session: &'s Session,
    config: SolverConfig,
}

impl<'s> CallbackIntegration<'s> {
    pub fn new(session: &'s Session, config: &SolverConfig) -> CallbackIntegration<'s> {
        CallbackIntegration {
            session,
            config: config.clone(),
        }
    }

    pub fn run(self) -> Result<Outcome, TheoryError> {
        self.run_with(&mut Dpll::from_config(&self.config))
    }

    pub fn run_with<E: SatEngine>(&self, engine: &mut E) -> Result<Outcome, TheoryError> {
        run_online(self.session, engine, OracleMode::CompleteModel)
    }
}

/// The theory judges every partial assignment as the engine extends it.
pub struct PropagationIntegration<'s> {
    session: &'s Session,
    config: SolverConfig,
}

impl<'s> PropagationIntegration<'s> {
    pub fn new(session: &'s Session, config: &SolverConfig) -> PropagationIntegration<'s> {
        PropagationIntegration {
            session,
            config: config.clone(),
        }
    }

    pub fn run(self) -> Result<Outcome, TheoryError> {
        self.run_with(&mut Dpll::from_config(&self.config))
    }

    pub fn run_with<E: SatEngine>(&self, engine: &mut E) -> Result<Outcome, TheoryError> {
        run_online(self.session, engine, OracleMode::Propagation)
    }
}
