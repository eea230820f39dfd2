//! Parse equality problems.

use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

use crate::dimacs;
use crate::error::SessionError;
use crate::parse::combinators::*;
use crate::session::{Session, SessionBuilder};

/// Parse an equality problem represented as a string.  The
/// representation is as follows:
///
///    header_line
///    header_line
///    [...]
///    --
///    <dimacs>
///
/// Where a header_line is one of:
///   - c comment
///   - vars name...
///   - == name name
///
/// The n-th `==` line defines CNF atom n.  Every name mentioned is a
/// variable; `vars` declares variables no atom mentions.
pub fn from_string(input: String) -> Result<Session, ParseError> {
    let mut lines = input.lines().enumerate();
    let mut builder = Session::builder();
    let mut next_atom = 1;
    let mut separated = false;

    for (i, line) in lines.by_ref() {
        let number = i + 1;
        let trimmed = line.trim();

        if trimmed == "--" {
            separated = true;
            break;
        } else if trimmed.is_empty() || trimmed == "c" || trimmed.starts_with("c ") {
            continue;
        } else if let Some(rest) = trimmed.strip_prefix("vars") {
            builder = parse_vars(builder, &mut rest.chars().peekable(), number)?;
        } else {
            let (left, right) = parse_lit(&mut trimmed.chars().peekable(), number)?;
            builder = builder
                .variable(left.clone())
                .variable(right.clone())
                .equality(next_atom, left, right);
            next_atom += 1;
        }
    }

    if !separated {
        return Err(ParseError::MissingSeparator);
    }

    let formula = dimacs::from_lines(lines.map(|(_, line)| line))?;
    Ok(builder.clauses(formula.to_ints()).build()?)
}

/// Parse the names of a `vars` line.
fn parse_vars(
    mut builder: SessionBuilder,
    chars: &mut Peekable<Chars<'_>>,
    line: usize,
) -> Result<SessionBuilder, ParseError> {
    loop {
        eat_whitespace(chars);
        match chars.peek() {
            None => return Ok(builder),
            Some(c) => {
                let found = *c;
                let name = parse_ident(chars).ok_or(ParseError::UnexpectedInput { line, found })?;
                builder = builder.variable(name);
            }
        }
    }
}

/// Parse a lit: == name name
fn parse_lit(
    chars: &mut Peekable<Chars<'_>>,
    line: usize,
) -> Result<(String, String), ParseError> {
    let c1 = chars.next();
    let c2 = chars.next();

    if (c1, c2) != (Some('='), Some('=')) {
        return Err(ParseError::CannotParseEqualitySymbol { line, c1, c2 });
    }

    let left = parse_name(chars, line)?;
    let right = parse_name(chars, line)?;
    expect_end(chars).map_err(|found| ParseError::UnexpectedInput { line, found })?;

    Ok((left, right))
}

fn parse_name(chars: &mut Peekable<Chars<'_>>, line: usize) -> Result<String, ParseError> {
    eat_whitespace(chars);
    parse_ident(chars).ok_or(ParseError::CannotParseVariable { line })
}

/// A parser error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: cannot parse equality symbol, expected '==' but got {}", show(.c1, .c2))]
    CannotParseEqualitySymbol {
        line: usize,
        c1: Option<char>,
        c2: Option<char>,
    },
    #[error("line {line}: expected a variable name")]
    CannotParseVariable { line: usize },
    #[error("line {line}: unexpected '{found}'")]
    UnexpectedInput { line: usize, found: char },
    #[error("missing '--' line between the atoms and the DIMACS formula")]
    MissingSeparator,
    #[error("cannot parse DIMACS: {0}")]
    Dimacs(#[from] dimacs::ParseError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

fn show(c1: &Option<char>, c2: &Option<char>) -> String {
    match (c1, c2) {
        (Some(a), Some(b)) => format!("'{}{}'", a, b),
        (Some(a), None) => format!("'{}'", a),
        _ => "an empty line".to_string(),
    }
}
