//! The theory of equality over uninterpreted constants.  This allows
//! expressing problems like:
//!
//!    a = b && (b = c || c != d) && a != d
//!
//! There are no function symbols: every atom is an equality between two
//! constants, and a negated atom is the corresponding disequality.

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::cnf::{Clause, Literal, MAX_VARIABLE};
use crate::error::{SessionError, TheoryError};
use crate::theory::forest::EquivalenceForest;
use crate::theory::{Theory, Verdict};

/// A constant of the equality domain, as an index into the universe.
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct TheoryVariable(usize);

impl TheoryVariable {
    pub fn new(index: usize) -> TheoryVariable {
        TheoryVariable(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// An equality between two variables, named by a CNF atom.  A positive
/// literal of `id` asserts `left = right`, a negative one `left != right`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EqualityAtom {
    pub id: isize,
    pub left: TheoryVariable,
    pub right: TheoryVariable,
}

/// The atoms of a problem, keyed by CNF atom number.
#[derive(Clone, Debug, Default)]
pub struct AtomTable {
    universe: usize,
    atoms: FxHashMap<isize, EqualityAtom>,
}

impl AtomTable {
    /// An empty table over a universe of `universe` variables.
    pub fn new(universe: usize) -> AtomTable {
        AtomTable {
            universe,
            atoms: FxHashMap::default(),
        }
    }

    /// Add the atom `id` meaning `left = right`.
    ///
    /// The identifier must be between 1 and `MAX_VARIABLE`, and unused.  Both variables must
    /// belong to the universe; the error then names the variable by its
    /// index, callers with names should check membership first.
    pub fn insert(
        &mut self,
        id: isize,
        left: TheoryVariable,
        right: TheoryVariable,
    ) -> Result<(), SessionError> {
        if id <= 0 || id.unsigned_abs() > MAX_VARIABLE {
            return Err(SessionError::InvalidAtomId(id));
        }
        if self.atoms.contains_key(&id) {
            return Err(SessionError::DuplicateAtom(id));
        }
        for var in [left, right] {
            if var.index() >= self.universe {
                return Err(SessionError::UnknownVariable {
                    atom: id,
                    name: format!("#{}", var.index()),
                });
            }
        }

        self.atoms.insert(id, EqualityAtom { id, left, right });
        Ok(())
    }

    pub fn get(&self, id: isize) -> Option<&EqualityAtom> {
        self.atoms.get(&id)
    }

    /// The atom a literal refers to, if the literal has theory meaning.
    pub fn atom_of(&self, lit: Literal) -> Option<&EqualityAtom> {
        self.atoms.get(&lit.get_id())
    }

    /// Size of the variable universe.
    pub fn universe(&self) -> usize {
        self.universe
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// The largest atom identifier, or 0 if there are none.
    pub fn max_id(&self) -> usize {
        self.atoms.keys().map(|id| *id as usize).max().unwrap_or(0)
    }

    /// All atoms, in identifier order.
    pub fn atoms(&self) -> Vec<&EqualityAtom> {
        let mut atoms: Vec<&EqualityAtom> = self.atoms.values().collect();
        atoms.sort_by_key(|atom| atom.id);
        atoms
    }
}

/// What the theory remembers between calls.
#[derive(Clone, Debug, Default)]
enum LastCheck {
    #[default]
    NoCheckYet,
    Checked {
        model: Vec<Literal>,
        verdict: Verdict,
        conflict: Option<isize>,
    },
}

/// Decision procedure for conjunctions of equalities and
/// disequalities between constants.
///
/// Every `check` rebuilds the partition from scratch, so checks can be
/// interleaved freely with any sequence of models.
#[derive(Clone, Debug)]
pub struct EqualityTheory {
    atoms: AtomTable,
    forest: EquivalenceForest,
    last: LastCheck,
    checks: usize,
}

impl EqualityTheory {
    pub fn new(atoms: AtomTable) -> EqualityTheory {
        let forest = EquivalenceForest::new(atoms.universe());
        EqualityTheory {
            atoms,
            forest,
            last: LastCheck::NoCheckYet,
            checks: 0,
        }
    }

    pub fn atoms(&self) -> &AtomTable {
        &self.atoms
    }

    /// The partition built by the last check.
    pub fn forest(&self) -> &EquivalenceForest {
        &self.forest
    }

    /// The verdict of the last check which has not been learned from.
    pub fn verdict(&self) -> Verdict {
        match &self.last {
            LastCheck::NoCheckYet => Verdict::Unknown,
            LastCheck::Checked { verdict, .. } => *verdict,
        }
    }

    /// The last violated atom found by the last check, if it was
    /// inconsistent.
    pub fn conflict(&self) -> Option<isize> {
        match &self.last {
            LastCheck::NoCheckYet => None,
            LastCheck::Checked { conflict, .. } => *conflict,
        }
    }

    /// How many times `check` has been called.
    pub fn checks(&self) -> usize {
        self.checks
    }

    fn theory_literals<'a>(
        &'a self,
        model: &'a [Literal],
    ) -> impl Iterator<Item = (Literal, &'a EqualityAtom)> + 'a {
        model
            .iter()
            .filter_map(move |lit| self.atoms.atom_of(*lit).map(|atom| (*lit, atom)))
    }
}

impl Theory for EqualityTheory {
    fn check(&mut self, model: &[Literal]) -> Verdict {
        self.checks += 1;
        self.forest.reset();

        // equalities first: disequalities only constrain the partition
        // the equalities induce.
        let merges: Vec<(TheoryVariable, TheoryVariable)> = self
            .theory_literals(model)
            .filter(|(lit, _)| !lit.is_negated())
            .map(|(_, atom)| (atom.left, atom.right))
            .collect();
        for (left, right) in merges {
            self.forest.merge(left, right);
        }

        let mut conflict = None;
        for (lit, atom) in self.theory_literals(model) {
            if lit.is_negated() && self.forest.same_class(atom.left, atom.right) {
                trace!(atom = atom.id, "disequality contradicts partition");
                conflict = Some(atom.id);
            }
        }

        let verdict = if conflict.is_some() {
            Verdict::Inconsistent
        } else {
            Verdict::Consistent
        };
        debug!(%verdict, ?conflict, literals = model.len(), "checked model");

        self.last = LastCheck::Checked {
            model: model.to_vec(),
            verdict,
            conflict,
        };
        verdict
    }

    fn learn(&mut self) -> Result<Clause, TheoryError> {
        match self.verdict() {
            Verdict::Inconsistent => (),
            Verdict::Unknown => return Err(TheoryError::NoPriorCheck),
            verdict => return Err(TheoryError::NotInconsistent(verdict)),
        }

        let model = match std::mem::take(&mut self.last) {
            LastCheck::Checked { model, .. } => model,
            LastCheck::NoCheckYet => return Err(TheoryError::NoPriorCheck),
        };

        let clause = Clause(
            self.theory_literals(&model)
                .map(|(lit, _)| lit.negate())
                .collect(),
        );
        debug!(%clause, "learned clause");
        Ok(clause)
    }
}
