//! A solving session: the output of an encoder.
//!
//! A session fixes the universe of theory variables, the table of
//! equality atoms, and the CNF formula over atom identifiers.  It is
//! validated once, on construction; after that every model the engine
//! can produce is well-formed input for the theory.

use rustc_hash::FxHashMap;

use crate::cnf::{Clause, Formula, Literal, MAX_VARIABLE};
use crate::error::SessionError;
use crate::theory::equality::{AtomTable, EqualityTheory, TheoryVariable};

#[derive(Clone, Debug)]
pub struct Session {
    names: Vec<String>,
    atoms: AtomTable,
    formula: Formula,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// Variable names, indexed by `TheoryVariable`.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name_of(&self, var: TheoryVariable) -> &str {
        &self.names[var.index()]
    }

    /// Look a variable up by name.
    pub fn variable(&self, name: &str) -> Option<TheoryVariable> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(TheoryVariable::new)
    }

    pub fn atoms(&self) -> &AtomTable {
        &self.atoms
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    /// Number of propositional variables a model has to assign: every
    /// atom, and every auxiliary variable of the formula.
    pub fn num_vars(&self) -> usize {
        self.formula.max_var().max(self.atoms.max_id())
    }

    /// A fresh theory over this session's atoms.
    pub fn theory(&self) -> EqualityTheory {
        EqualityTheory::new(self.atoms.clone())
    }

    /// The equivalence classes a model induces, by variable name.
    /// Singleton classes are included.
    pub fn describe_model(&self, model: &[Literal]) -> Vec<Vec<String>> {
        use crate::theory::Theory;

        let mut theory = self.theory();
        theory.check(model);
        let forest = theory.forest();

        forest
            .roots()
            .map(|root| {
                let mut class: Vec<TheoryVariable> = forest.class_of(root);
                class.sort();
                class
                    .into_iter()
                    .map(|var| self.name_of(var).to_string())
                    .collect()
            })
            .collect()
    }
}

/// Collects the parts of a session, and checks them when they are all
/// in.
#[derive(Clone, Debug, Default)]
pub struct SessionBuilder {
    names: Vec<String>,
    index: FxHashMap<String, TheoryVariable>,
    atoms: Vec<(isize, String, String)>,
    clauses: Vec<Vec<isize>>,
}

impl SessionBuilder {
    /// Declare a variable.  Declaring a name twice has no effect.
    pub fn variable(mut self, name: impl Into<String>) -> SessionBuilder {
        self.declare(name.into());
        self
    }

    /// Declare several variables.
    pub fn variables<I, S>(mut self, names: I) -> SessionBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.declare(name.into());
        }
        self
    }

    /// Let atom `id` stand for `left = right`.  Both variables have to
    /// be declared by the time `build` is called.
    pub fn equality(
        mut self,
        id: isize,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> SessionBuilder {
        self.atoms.push((id, left.into(), right.into()));
        self
    }

    /// Add a clause of signed atom numbers.
    pub fn clause(mut self, lits: Vec<isize>) -> SessionBuilder {
        self.clauses.push(lits);
        self
    }

    pub fn clauses(mut self, clauses: Vec<Vec<isize>>) -> SessionBuilder {
        self.clauses.extend(clauses);
        self
    }

    pub fn build(self) -> Result<Session, SessionError> {
        let mut atoms = AtomTable::new(self.names.len());
        for (id, left, right) in &self.atoms {
            let lookup = |name: &String| {
                self.index
                    .get(name)
                    .copied()
                    .ok_or_else(|| SessionError::UnknownVariable {
                        atom: *id,
                        name: name.clone(),
                    })
            };
            atoms.insert(*id, lookup(left)?, lookup(right)?)?;
        }

        let mut formula = Formula::default();
        for (i, lits) in self.clauses.into_iter().enumerate() {
            if lits.contains(&0) {
                return Err(SessionError::ZeroLiteral { clause: i });
            }
            if let Some(&literal) = lits.iter().find(|n| n.unsigned_abs() > MAX_VARIABLE) {
                return Err(SessionError::LiteralOutOfRange { clause: i, literal });
            }
            formula.insert_clause(Clause::new(lits));
        }

        Ok(Session {
            names: self.names,
            atoms,
            formula,
        })
    }

    fn declare(&mut self, name: String) {
        if !self.index.contains_key(&name) {
            self.index
                .insert(name.clone(), TheoryVariable::new(self.names.len()));
            self.names.push(name);
        }
    }
}
