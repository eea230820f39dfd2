//! An SMT solver for the theory of equality over uninterpreted
//! constants, built on a basic SAT solver based on the paper "Abstract
//! DPLL and Abstract DPLL Modulo Theories".
//!
//! Problems are a [`Session`](session::Session): named variables, CNF
//! atoms standing for equalities between them, and a CNF formula.  The
//! theory can be combined with the SAT engine in three ways, see
//! [`IntegrationStrategy`](strategy::IntegrationStrategy).

pub mod cnf;
pub mod config;
pub mod dimacs;
pub mod dpll;
pub mod engine;
pub mod error;
pub mod parse;
pub mod session;
pub mod strategy;
pub mod theory;

use crate::cnf::{Formula, Literal};
use crate::config::SolverConfig;
use crate::dpll::Dpll;
use crate::engine::{SatEngine, SolveResult};
use crate::error::TheoryError;
use crate::session::Session;
use crate::strategy::Outcome;

pub fn sat(formula: Formula) -> Result<bool, TheoryError> {
    Ok(sat_assignment(formula)?.is_some())
}

pub fn sat_assignment(formula: Formula) -> Result<Option<Vec<Literal>>, TheoryError> {
    let num_vars = formula.max_var();
    match Dpll::new().solve(&formula, num_vars)? {
        SolveResult::Sat(model) => Ok(Some(model)),
        SolveResult::Unsat | SolveResult::Unknown => Ok(None),
    }
}

/// Solve a session with the strategy the configuration names.
pub fn solve(session: &Session, config: &SolverConfig) -> Result<Outcome, TheoryError> {
    config.strategy.run(session, config)
}

/// Parse a problem in the text format of [`parse`] and solve it.
pub fn solve_str(input: String, config: &SolverConfig) -> error::Result<(Session, Outcome)> {
    let session = parse::from_string(input)?;
    let outcome = solve(&session, config)?;
    Ok((session, outcome))
}

#[cfg(test)]
mod tests {
    use super::sat;
    use crate::cnf::*;

    #[test]
    fn simple_sat_1() {
        assert!(sat(Formula::new(vec![Clause::new(vec![1])])).unwrap());
    }

    #[test]
    fn simple_sat_2() {
        assert!(sat(Formula::new(vec![Clause::new(vec![1, 2])])).unwrap());
    }

    #[test]
    fn simple_sat_2b() {
        assert!(sat(Formula::new(vec![
            Clause::new(vec![-1]),
            Clause::new(vec![1, -2]),
        ]))
        .unwrap());
    }

    #[test]
    fn simple_sat_3() {
        assert!(sat(Formula::new(vec![
            Clause::new(vec![1, 2]),
            Clause::new(vec![3])
        ]))
        .unwrap());
    }

    #[test]
    fn simple_unsat_1() {
        assert!(!sat(Formula::new(vec![
            Clause::new(vec![1]),
            Clause::new(vec![-1])
        ]))
        .unwrap());
    }

    #[test]
    fn simple_unsat_2() {
        assert!(!sat(Formula::new(vec![
            Clause::new(vec![1]),
            Clause::new(vec![2]),
            Clause::new(vec![-1, -2]),
        ]))
        .unwrap());
    }

    #[test]
    fn complex_sat_7() {
        assert!(sat(Formula::new(vec![
            Clause::new(vec![-3, 4]),
            Clause::new(vec![-1, -3, -5]),
            Clause::new(vec![-2, -4, -5]),
            Clause::new(vec![-2, 3, 5, -6]),
            Clause::new(vec![-1, 2]),
            Clause::new(vec![-1, 3, -5, -6]),
            Clause::new(vec![1, -6]),
            Clause::new(vec![1, 7]),
        ]))
        .unwrap());
    }

    #[test]
    fn empty_formula_is_sat() {
        assert_eq!(Ok(Some(vec![])), super::sat_assignment(Formula::default()));
    }

    #[test]
    fn solve_str_reports_parse_errors() {
        let result = super::solve_str("== a b\n".to_string(), &Default::default());
        assert!(matches!(
            result,
            Err(crate::error::Error::Parse(
                crate::parse::ParseError::MissingSeparator
            ))
        ));
    }

    #[test]
    fn solve_str_rejects_huge_variables() {
        let input = "== a b\n--\np cnf 9223372036854775807 1\n9223372036854775807 0\n";
        let result = super::solve_str(input.to_string(), &Default::default());
        assert!(matches!(
            result,
            Err(crate::error::Error::Parse(crate::parse::ParseError::Dimacs(
                crate::dimacs::ParseError::VariableOutOfRange(_)
            )))
        ));
    }

    #[test]
    fn solve_str_solves() {
        let input = "== a b\n== b c\n== a c\n--\np cnf 3 2\n1 0\n2 0\n";
        let (session, outcome) =
            super::solve_str(input.to_string(), &Default::default()).unwrap();
        assert_eq!(3, session.atoms().len());
        assert_eq!(crate::strategy::Status::Sat, outcome.status);
        assert_eq!(
            Some(vec![Literal::new(1), Literal::new(2), Literal::new(3)]),
            outcome.model
        );
    }
}
