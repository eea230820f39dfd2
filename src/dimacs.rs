//! Parser for DIMACS CNF format

use thiserror::Error;

use crate::cnf::*;

/// Parse a string in DIMACS CNF format.
pub fn from_string(dimacs: String) -> Result<Formula, ParseError> {
    from_lines(dimacs.lines())
}

/// Parse DIMACS CNF from a sequence of lines.  This is used by the
/// problem format, where the DIMACS body follows a header section.
pub fn from_lines<'a, I>(lines: I) -> Result<Formula, ParseError>
where
    I: Iterator<Item = &'a str>,
{
    let mut in_prelude = true;
    let mut expected_number_of_variables = 0;
    let mut expected_number_of_clauses = 0;
    let mut clause = Vec::new();
    let mut clauses = Vec::new();
    let mut variables = 0;

    'outer: for line in lines {
        let mut words = line.split_ascii_whitespace();
        if in_prelude {
            match words.next() {
                Some("c") | None => continue,
                Some("p") => match words.next() {
                    Some("cnf") => {
                        let num_vars = words.next().map(|w| w.parse::<usize>());
                        let num_clauses = words.next().map(|n| n.parse::<usize>());
                        match (num_vars, num_clauses) {
                            (Some(Ok(v)), Some(Ok(c))) => {
                                expected_number_of_variables = v;
                                expected_number_of_clauses = c;
                                in_prelude = false;
                                if c == 0 {
                                    break 'outer;
                                }
                            }
                            _ => return Err(ParseError::CannotParsePreludeLine(line.to_string())),
                        }
                    }
                    Some(fmt) => return Err(ParseError::UnexpectedFormat(fmt.to_string())),
                    None => return Err(ParseError::CannotParsePreludeLine(line.to_string())),
                },
                _ => return Err(ParseError::CannotParsePreludeLine(line.to_string())),
            }
        } else {
            for lit in words {
                match lit.parse::<isize>() {
                    Ok(0) => {
                        clauses.push(Clause::new(std::mem::take(&mut clause)));
                        if clauses.len() == expected_number_of_clauses {
                            break 'outer;
                        }
                    }
                    Ok(n) => {
                        let id = n.unsigned_abs();
                        if id > MAX_VARIABLE {
                            return Err(ParseError::VariableOutOfRange(lit.to_string()));
                        }
                        variables = variables.max(id);
                        clause.push(n);
                    }
                    Err(_) => return Err(ParseError::CannotParseClauseLine(line.to_string())),
                }
            }
        }
    }

    if in_prelude {
        return Err(ParseError::MissingPrelude);
    }

    if variables > expected_number_of_variables {
        return Err(ParseError::WrongNumberOfVariables {
            expected: expected_number_of_variables,
            actual: variables,
        });
    }

    if clauses.len() != expected_number_of_clauses {
        return Err(ParseError::WrongNumberOfClauses {
            expected: expected_number_of_clauses,
            actual: clauses.len(),
        });
    }

    Ok(Formula::new(clauses))
}

/// A parser error.
#[derive(Clone, Debug, PartialEq, PartialOrd, Eq, Ord, Error)]
pub enum ParseError {
    #[error("cannot parse prelude line '{0}'")]
    CannotParsePreludeLine(String),
    #[error("cannot parse clause line '{0}'")]
    CannotParseClauseLine(String),
    #[error("unexpected format '{0}'")]
    UnexpectedFormat(String),
    #[error("variable {0} is out of range, the largest allowed is {}", MAX_VARIABLE)]
    VariableOutOfRange(String),
    #[error("missing 'p cnf' prelude line")]
    MissingPrelude,
    #[error("wrong number of variables, expected {expected} but got {actual}")]
    WrongNumberOfVariables { expected: usize, actual: usize },
    #[error("wrong number of clauses, expected {expected} but got {actual}")]
    WrongNumberOfClauses { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> Formula {
        Formula::new(vec![
            Clause::new(vec![-3, 4]),
            Clause::new(vec![-1, -3, -5]),
            Clause::new(vec![-2, -4, -5]),
            Clause::new(vec![-2, 3, 5, -6]),
            Clause::new(vec![-1, 2]),
            Clause::new(vec![-1, 3, -5, -6]),
            Clause::new(vec![1, -6]),
            Clause::new(vec![1, 7]),
        ])
    }

    #[test]
    fn works() {
        let formula_str = "c hello world\n\
                           p cnf 7 8\n\
                           -3 4 0\n\
                           -1 -3 -5 0\n\
                           -2 -4 -5 0\n\
                           -2 3 5 -6 0\n\
                           -1 2 0\n\
                           -1 3 -5 -6 0\n\
                           1 -6 0\n\
                           1 7 0";

        assert_eq!(Ok(example()), from_string(formula_str.to_string()));
    }

    #[test]
    fn works_with_awkward_newlines() {
        let formula_str = "c hello world\n\
                           p cnf 7 8\n\
                           -3 4 0 -1 -3 -5 0 -2 -4\n\
                           -5 0 -2 3 5 -6 0\n\
                           -1 2 0 -1 3 -5\n\
                           -6 0 1 -6 0 1 7 0";

        assert_eq!(Ok(example()), from_string(formula_str.to_string()));
    }

    #[test]
    fn allows_declared_but_unused_variables() {
        let formula_str = "p cnf 6 1\n1 -2 0";
        assert_eq!(
            Ok(Formula::new(vec![Clause::new(vec![1, -2])])),
            from_string(formula_str.to_string())
        );
    }

    #[test]
    fn counts_variables() {
        let formula_str = "c hello world\n\
                           p cnf 1 8\n\
                           -3 4 0\n\
                           -1 -3 -5 0\n\
                           -2 -4 -5 0\n\
                           -2 3 5 -6 0\n\
                           -1 2 0\n\
                           -1 3 -5 -6 0\n\
                           1 -6 0\n\
                           1 7 0";

        assert_eq!(
            Err(ParseError::WrongNumberOfVariables {
                expected: 1,
                actual: 7
            }),
            from_string(formula_str.to_string())
        );
    }

    #[test]
    fn counts_clauses() {
        let formula_str = "c hello world\n\
                           p cnf 7 99\n\
                           -3 4 0\n\
                           -1 -3 -5 0\n\
                           1 7 0";

        assert_eq!(
            Err(ParseError::WrongNumberOfClauses {
                expected: 99,
                actual: 3
            }),
            from_string(formula_str.to_string())
        );
    }

    #[test]
    fn rejects_other_formats() {
        assert_eq!(
            Err(ParseError::UnexpectedFormat("wcnf".to_string())),
            from_string("p wcnf 1 1\n1 0".to_string())
        );
    }

    #[test]
    fn rejects_huge_variables() {
        assert_eq!(
            Err(ParseError::VariableOutOfRange(
                "9223372036854775807".to_string()
            )),
            from_string("p cnf 9223372036854775807 1\n9223372036854775807 0".to_string())
        );
        assert_eq!(
            Err(ParseError::VariableOutOfRange(
                "-9223372036854775808".to_string()
            )),
            from_string("p cnf 9223372036854775807 1\n1 -9223372036854775808 0".to_string())
        );
    }

    #[test]
    fn accepts_the_largest_variable() {
        let formula_str = format!("p cnf {0} 1\n-{0} 0", MAX_VARIABLE);
        assert_eq!(
            Ok(Formula::new(vec![Clause::new(vec![-(MAX_VARIABLE as isize)])])),
            from_string(formula_str)
        );
    }

    #[test]
    fn requires_prelude() {
        assert_eq!(
            Err(ParseError::MissingPrelude),
            from_string("c nothing here".to_string())
        );
    }
}
