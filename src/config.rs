//! Solver configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::strategy::IntegrationStrategy;

/// Knobs for a solving session.  Every field has a default, so a
/// configuration file only needs to mention what it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// How the theory is combined with the SAT engine.
    pub strategy: IntegrationStrategy,
    /// Truth value the engine tries first when it makes a decision.
    pub phase: bool,
    /// Give up with an unknown result after this many decisions in one
    /// engine run.  Decisions which only complete a model that already
    /// satisfies every clause are not counted.
    pub decision_limit: Option<usize>,
    /// Give up with an unknown result after learning this many clauses
    /// in the lazy refinement loop.
    pub refinement_limit: Option<usize>,
    /// Remove asymmetric tautologies from the formula before searching.
    pub simplify: bool,
}

impl Default for SolverConfig {
    fn default() -> SolverConfig {
        SolverConfig {
            strategy: IntegrationStrategy::default(),
            phase: false,
            decision_limit: None,
            refinement_limit: None,
            simplify: true,
        }
    }
}

impl SolverConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(input: &str) -> Result<SolverConfig, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn with_strategy(mut self, strategy: IntegrationStrategy) -> SolverConfig {
        self.strategy = strategy;
        self
    }
}
