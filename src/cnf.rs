//! Types and utility functions for conjunctive normal form.
//!
//! Atom identifiers and auxiliary (Tseitin) identifiers share one
//! namespace: a literal is just a signed, nonzero number, and only the
//! atom table decides whether it carries theory meaning.

use std::fmt;

/// The largest atom number the solver accepts.  Engines keep one slot
/// per atom, so input naming bigger atoms is rejected when it is read.
pub const MAX_VARIABLE: usize = 1 << 24;

/// A literal is either an atom (a positive number) or the negation of
/// that atom (a negative number).
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct Literal(pub isize);

impl Literal {
    /// Construct a literal from a signed atom number.
    ///
    /// Zero is not a literal; callers handling untrusted input should
    /// reject it before getting here.
    pub fn new(atom: isize) -> Literal {
        if atom == 0 {
            panic!("cannot construct a literal numbered zero");
        }
        Literal(atom)
    }

    /// Construct a literal for `id` with the given truth value.
    pub fn with_polarity(id: isize, positive: bool) -> Literal {
        if positive {
            Literal::new(id)
        } else {
            Literal::new(-id)
        }
    }

    /// Check if a literal is negated.
    pub fn is_negated(self) -> bool {
        let Literal(atom) = self;
        atom < 0
    }

    /// Negate a literal, with double negation cancelling out.
    pub fn negate(self) -> Literal {
        let Literal(atom) = self;
        Literal(-atom)
    }

    /// Get the numeric ID of a literal.
    pub fn get_id(self) -> isize {
        let Literal(atom) = self;
        atom.abs()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Literal(atom) = self;
        write!(f, "{}", atom)
    }
}

/// A clause is a disjunction of literals.
#[derive(Clone, Debug, Default, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct Clause(pub Vec<Literal>);

impl Clause {
    /// Construct a new clause from numeric literals.
    pub fn new(lits: Vec<isize>) -> Clause {
        Clause(lits.into_iter().map(Literal::new).collect())
    }

    /// Add a literal to a clause.  Two literals corresponding to the
    /// same atom, but in positive and negative forms, can exist in
    /// the same clause.
    pub fn insert_literal(&mut self, lit: Literal) {
        let Clause(lits) = self;
        lits.push(lit);
    }

    pub fn literals(&self) -> &[Literal] {
        let Clause(lits) = self;
        lits
    }

    pub fn len(&self) -> usize {
        self.literals().len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals().is_empty()
    }

    /// The clause as plain signed numbers.
    pub fn to_ints(&self) -> Vec<isize> {
        let Clause(lits) = self;
        lits.iter().map(|Literal(n)| *n).collect()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        let Clause(lits) = self;
        if let Some((first, rest)) = lits.split_first() {
            write!(f, "{}", first)?;
            for lit in rest {
                write!(f, " || {}", lit)?;
            }
        }
        write!(f, ")")
    }
}

/// A formula is a conjunction of clauses.
#[derive(Clone, Debug, Default, PartialEq, PartialOrd, Eq, Ord)]
pub struct Formula(pub Vec<Clause>);

impl Formula {
    /// Construct a new formula from a list of clauses.
    pub fn new(clauses: Vec<Clause>) -> Formula {
        Formula(clauses)
    }

    /// Add a clause to a formula.
    pub fn insert_clause(&mut self, clause: Clause) {
        let Formula(clauses) = self;
        clauses.push(clause);
    }

    pub fn clauses(&self) -> &[Clause] {
        let Formula(clauses) = self;
        clauses
    }

    pub fn len(&self) -> usize {
        self.clauses().len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses().is_empty()
    }

    /// The largest atom number mentioned anywhere in the formula, or 0
    /// for a formula with no literals.
    pub fn max_var(&self) -> usize {
        let Formula(clauses) = self;
        clauses
            .iter()
            .flat_map(|Clause(lits)| lits.iter())
            .map(|lit| lit.get_id() as usize)
            .max()
            .unwrap_or(0)
    }

    /// The formula as nested lists of signed numbers.
    pub fn to_ints(&self) -> Vec<Vec<isize>> {
        let Formula(clauses) = self;
        clauses.iter().map(Clause::to_ints).collect()
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Formula(clauses) = self;
        if let Some((first, rest)) = clauses.split_first() {
            write!(f, "{}", first)?;
            for clause in rest {
                write!(f, " && {}", clause)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negation_cancels() {
        let lit = Literal::new(-4);
        assert!(lit.is_negated());
        assert_eq!(lit, lit.negate().negate());
        assert_eq!(4, lit.get_id());
    }

    #[test]
    #[should_panic]
    fn zero_is_not_a_literal() {
        Literal::new(0);
    }

    #[test]
    fn max_var_spans_all_clauses() {
        let formula = Formula::new(vec![Clause::new(vec![1, -7]), Clause::new(vec![3])]);
        assert_eq!(7, formula.max_var());
        assert_eq!(0, Formula::default().max_var());
    }

    #[test]
    fn displays_as_conjunction() {
        let formula = Formula::new(vec![Clause::new(vec![1, -2]), Clause::new(vec![3])]);
        assert_eq!("(1 || -2) && (3)", formula.to_string());
    }
}
