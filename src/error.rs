//! Error types.

use thiserror::Error;

use crate::cnf::MAX_VARIABLE;
use crate::theory::Verdict;

/// Misuse of the check/learn protocol of a theory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TheoryError {
    /// `learn` was called with no check to explain, either because
    /// nothing has been checked yet or because the last conflict was
    /// already consumed.
    #[error("no check to learn from: call check() before learn()")]
    NoPriorCheck,
    /// `learn` was called after a check which found no conflict.
    #[error("cannot learn a clause after a {0} check")]
    NotInconsistent(Verdict),
}

/// Malformed encoder output, rejected when a session is built.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("atom {atom} refers to undeclared variable '{name}'")]
    UnknownVariable { atom: isize, name: String },
    #[error("atom identifier {0} is not between 1 and {}", MAX_VARIABLE)]
    InvalidAtomId(isize),
    #[error("atom identifier {0} is defined more than once")]
    DuplicateAtom(isize),
    #[error("clause {clause} contains the literal 0")]
    ZeroLiteral { clause: usize },
    #[error("clause {clause} contains {literal}, which is out of range")]
    LiteralOutOfRange { clause: usize, literal: isize },
}

/// A solver configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Any error the crate can produce.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Theory(#[from] TheoryError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Parse(#[from] crate::parse::ParseError),
    #[error("cannot parse DIMACS: {0}")]
    Dimacs(#[from] crate::dimacs::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
