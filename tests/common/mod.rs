#![allow(dead_code)]

use std::collections::BTreeSet;
use std::fs;
use std::fs::File;
use std::io::{BufReader, Read, Result};

use eqsmt::cnf::{Formula, Literal};
use eqsmt::session::Session;
use eqsmt::strategy::{Outcome, Status};
use eqsmt::theory::{Theory, Verdict};

/// A test case
pub struct Case {
    pub name: String,
    is_sat: bool,
}

/// Get the test files for a theory.
pub fn get_tests_for(theory: &str, is_sat: bool) -> Vec<(Case, String)> {
    let input_path = format!(
        "{}/tests/data/{}/{}",
        env!("CARGO_MANIFEST_DIR"),
        theory,
        if is_sat { "sat" } else { "unsat" }
    );

    let mut out = Vec::new();

    for entry in fs::read_dir(&input_path).unwrap() {
        let e = entry.unwrap();
        if e.metadata().unwrap().is_file() {
            if let Ok(filename) = e.file_name().into_string() {
                let input_filename = format!("{}/{}", input_path, filename);
                out.push((
                    Case {
                        name: filename,
                        is_sat,
                    },
                    read_file(input_filename).unwrap(),
                ));
            }
        }
    }

    out.sort_by(|(a, _), (b, _)| a.name.cmp(&b.name));
    out
}

/// Check an outcome against the expected status, and check that a
/// claimed model really is one.
pub fn check(case: &Case, session: &Session, outcome: &Outcome) {
    match (case.is_sat, outcome.status) {
        (true, Status::Sat) => (),
        (false, Status::Unsat) => (),
        (true, status) => panic!("{}: expected SAT but got {}", case.name, status),
        (false, status) => panic!("{}: expected UNSAT but got {}", case.name, status),
    }

    if let Some(model) = &outcome.model {
        check_model(session, model);
    } else {
        assert!(!case.is_sat, "{}: SAT without a model", case.name);
    }
}

/// A model has to satisfy the formula and be accepted by the theory.
pub fn check_model(session: &Session, model: &[Literal]) {
    assert!(
        satisfies(session.formula(), model),
        "model {:?} falsifies a clause",
        model
    );
    assert_eq!(Verdict::Consistent, session.theory().check(model));

    let ids: Vec<isize> = model.iter().map(|lit| lit.get_id()).collect();
    let expected: Vec<isize> = (1..=session.num_vars() as isize).collect();
    assert_eq!(expected, ids, "model is not complete and sorted");
}

/// Check whether every clause has a literal in the model.
pub fn satisfies(formula: &Formula, model: &[Literal]) -> bool {
    let lits: BTreeSet<Literal> = model.iter().copied().collect();
    formula
        .clauses()
        .iter()
        .all(|clause| clause.literals().iter().any(|lit| lits.contains(lit)))
}

/// Read a file to a string.
fn read_file(path: String) -> Result<String> {
    let file = File::open(path)?;
    let mut buffer = String::new();
    BufReader::new(file).read_to_string(&mut buffer)?;
    Ok(buffer)
}
