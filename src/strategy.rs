//! Ways of combining the equality theory with a SAT engine.
//!
//! All three share one theory implementation and one engine; they only
//! differ in who drives the search and when the theory is consulted.

pub mod lazy;
pub mod online;

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cnf::{Formula, Literal};
use crate::config::SolverConfig;
use crate::error::TheoryError;
use crate::session::Session;

pub use lazy::LazyRefinementLoop;
pub use online::{CallbackIntegration, PropagationIntegration};

/// Which integration to use.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationStrategy {
    /// Solve the propositional abstraction from scratch, check the
    /// model, block it if the theory rejects it, repeat.
    #[default]
    Lazy,
    /// The engine checks complete assignments itself and keeps
    /// searching after a rejection.
    Callback,
    /// As `Callback`, and partial assignments are checked as they grow.
    Propagation,
}

impl IntegrationStrategy {
    pub const ALL: [IntegrationStrategy; 3] = [
        IntegrationStrategy::Lazy,
        IntegrationStrategy::Callback,
        IntegrationStrategy::Propagation,
    ];

    /// Solve a session with this strategy.
    pub fn run(self, session: &Session, config: &SolverConfig) -> Result<Outcome, TheoryError> {
        let outcome = match self {
            IntegrationStrategy::Lazy => LazyRefinementLoop::new(session, config).run(),
            IntegrationStrategy::Callback => CallbackIntegration::new(session, config).run(),
            IntegrationStrategy::Propagation => PropagationIntegration::new(session, config).run(),
        }?;
        info!(
            strategy = %self,
            status = %outcome.status,
            lemmas = outcome.lemmas,
            theory_checks = outcome.theory_checks,
            "solved"
        );
        Ok(outcome)
    }
}

impl fmt::Display for IntegrationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IntegrationStrategy::Lazy => write!(f, "lazy"),
            IntegrationStrategy::Callback => write!(f, "callback"),
            IntegrationStrategy::Propagation => write!(f, "propagation"),
        }
    }
}

/// Final answer of a session.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Status {
    Sat,
    Unsat,
    Unknown,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Status::Sat => write!(f, "sat"),
            Status::Unsat => write!(f, "unsat"),
            Status::Unknown => write!(f, "unknown"),
        }
    }
}

/// Everything a strategy reports about a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub status: Status,
    /// The accepted model, in identifier order, when satisfiable.
    pub model: Option<Vec<Literal>>,
    /// The original clauses followed by every learned clause, in the
    /// order they were learned.
    pub clauses: Formula,
    /// Number of clauses learned from the theory.
    pub lemmas: usize,
    /// Number of times the theory was asked to check a model.
    pub theory_checks: usize,
}

impl Outcome {
    /// The learned clauses alone.
    pub fn learned(&self) -> &[crate::cnf::Clause] {
        let clauses = self.clauses.clauses();
        &clauses[clauses.len() - self.lemmas..]
    }
}
