//! A basic SAT solver based on the paper "Abstract DPLL and Abstract
//! DPLL Modulo Theories"
//!
//! The theory is not asked to propagate: it is only a judge of
//! (partial or complete) assignments, and explains a rejection with a
//! clause which is added to the clause database like any other.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::cnf::*;
use crate::config::SolverConfig;
use crate::engine::{OracleMode, SatEngine, SolveResult};
use crate::error::TheoryError;
use crate::theory::{Theory, Verdict};

impl Literal {
    /// A literal is true in a model if it's a member of the set.
    /// This will return 'None' if the model doesn't have an
    /// assignment of truth for the literal or its negation.
    pub fn is_true_in(self, model: &Model) -> Option<bool> {
        model.value(self)
    }
}

impl Clause {
    /// A clause is true in a model if any of its literals are true in
    /// the model.  This will return 'None' if none of the literals
    /// have their truth decided by the model.
    pub fn is_true_in(&self, model: &Model) -> Option<bool> {
        let mut all_false = true;
        let Clause(lits) = self;

        for lit in lits {
            match lit.is_true_in(model) {
                Some(true) => return Some(true),
                Some(false) => continue,
                None => all_false = false,
            }
        }

        if all_false {
            Some(false)
        } else {
            None
        }
    }
}

impl Formula {
    /// A formula is true in a model if all of its clauses are true in
    /// the model, and false if any clause is false.  This will return
    /// 'None' if no clause is false but at least one doesn't have its
    /// truth determined by the model.
    pub fn is_true_in(&self, model: &Model) -> Option<bool> {
        let mut all_true = true;
        let Formula(clauses) = self;

        for clause in clauses {
            match clause.is_true_in(model) {
                Some(true) => continue,
                Some(false) => return Some(false),
                None => all_true = false,
            }
        }

        if all_true {
            Some(true)
        } else {
            None
        }
    }
}

/// A model, or partial truth assignment, is a set of literals which
/// are true.  The trail is kept in assignment order because
/// backtracking undoes assignments from the most recent decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Model {
    trail: Vec<(Literal, Provenance)>,
    values: Vec<Option<bool>>,
}

/// Literals in a model track where they've come from: this is because
/// backtracking is done in terms of literals arising from decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Provenance {
    UnitPropagation,
    Decision,
    Backjump,
}

impl Model {
    /// Construct a new empty model over atoms 1 to `num_vars`.
    fn new(num_vars: usize) -> Model {
        Model {
            trail: Vec::with_capacity(num_vars),
            values: vec![None; num_vars + 1],
        }
    }

    /// Append a literal to a model.
    fn append(&mut self, lit: Literal, provenance: Provenance) {
        let id = lit.get_id() as usize;
        if id >= self.values.len() {
            self.values.resize(id + 1, None);
        }
        self.values[id] = Some(!lit.is_negated());
        self.trail.push((lit, provenance));
    }

    /// Remove the most recent assignment.
    fn pop(&mut self) -> Option<(Literal, Provenance)> {
        let (lit, provenance) = self.trail.pop()?;
        self.values[lit.get_id() as usize] = None;
        Some((lit, provenance))
    }

    fn value(&self, lit: Literal) -> Option<bool> {
        self.values
            .get(lit.get_id() as usize)
            .copied()
            .flatten()
            .map(|value| value != lit.is_negated())
    }

    /// The smallest atom with no truth value.
    fn first_unassigned(&self) -> Option<usize> {
        self.values
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, value)| value.is_none())
            .map(|(id, _)| id)
    }

    /// Get the true literals from the model, in the order they were
    /// assigned, discarding the provenance information.
    pub fn get_assignments(&self) -> Vec<Literal> {
        self.trail.iter().map(|(l, _)| *l).collect()
    }

    /// Get the true literals from the model, in identifier order.
    pub fn sorted_assignments(&self) -> Vec<Literal> {
        let mut lits = self.get_assignments();
        lits.sort_by_key(|lit| lit.get_id());
        lits
    }

    pub fn len(&self) -> usize {
        self.trail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }
}

fn do_backjump(model: &mut Model) -> bool {
    // "standard backtracking": flip the most recent decision which
    // hasn't been flipped yet.
    while let Some((lit, provenance)) = model.pop() {
        if provenance == Provenance::Decision {
            model.append(lit.negate(), Provenance::Backjump);
            return true;
        }
    }

    false
}

fn do_unit_propagation(model: &Model, formula: &Formula) -> Option<Literal> {
    let Formula(clauses) = formula;
    for clause in clauses {
        if clause.is_true_in(model).is_some() {
            continue;
        }

        let Clause(lits) = clause;
        let mut unassigned = lits.iter().filter(|lit| lit.is_true_in(model).is_none());

        if let Some(first) = unassigned.next() {
            if unassigned.all(|lit| lit == first) {
                return Some(*first);
            }
        }
    }

    None
}

fn do_decision(model: &Model, formula: &Formula, phase: bool) -> Option<Literal> {
    let Formula(clauses) = formula;
    for clause in clauses {
        if clause.is_true_in(model).is_none() {
            let Clause(lits) = clause;
            for lit in lits {
                if lit.is_true_in(model).is_none() {
                    return Some(Literal::with_polarity(lit.get_id(), phase));
                }
            }
        }
    }

    // every clause is decided, but the model has to cover every atom.
    model
        .first_unassigned()
        .map(|id| Literal::with_polarity(id as isize, phase))
}

fn add_lemma<T: Theory>(
    theory: &mut T,
    formula: &mut Formula,
    working: &mut Formula,
) -> Result<(), TheoryError> {
    let clause = theory.learn()?;
    debug!(%clause, "adding theory lemma");
    formula.insert_clause(clause.clone());
    working.insert_clause(clause);
    Ok(())
}

/// Search engine settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dpll {
    phase: bool,
    decision_limit: Option<usize>,
    simplify: bool,
}

impl Default for Dpll {
    fn default() -> Dpll {
        Dpll::from_config(&SolverConfig::default())
    }
}

impl Dpll {
    pub fn new() -> Dpll {
        Dpll::default()
    }

    pub fn from_config(config: &SolverConfig) -> Dpll {
        Dpll {
            phase: config.phase,
            decision_limit: config.decision_limit,
            simplify: config.simplify,
        }
    }
}

impl SatEngine for Dpll {
    fn solve_with<T: Theory>(
        &mut self,
        formula: &mut Formula,
        num_vars: usize,
        theory: &mut T,
        mode: OracleMode,
    ) -> Result<SolveResult, TheoryError> {
        dpll(self, theory, formula, num_vars, mode)
    }
}

/// Given a formula, find a model which satisfies it and which the
/// theory accepts, if one exists.
fn dpll<T: Theory>(
    options: &Dpll,
    theory: &mut T,
    formula: &mut Formula,
    num_vars: usize,
    mode: OracleMode,
) -> Result<SolveResult, TheoryError> {
    let num_vars = num_vars.max(formula.max_var());
    let mut working = if options.simplify {
        simplify_formula(formula.clone())
    } else {
        formula.clone()
    };
    let mut model = Model::new(num_vars);
    let mut decisions = 0;
    let mut unchecked = false;

    loop {
        let status = working.is_true_in(&model);

        if status == Some(false) {
            if do_backjump(&mut model) {
                trace!(depth = model.len(), "backjumped");
                unchecked = true;
                continue;
            }
            return Ok(SolveResult::Unsat);
        }

        if mode == OracleMode::Propagation && unchecked {
            unchecked = false;
            if theory.check(&model.sorted_assignments()) == Verdict::Inconsistent {
                add_lemma(theory, formula, &mut working)?;
                continue;
            }
        }

        if status.is_none() {
            if let Some(lit) = do_unit_propagation(&model, &working) {
                model.append(lit, Provenance::UnitPropagation);
                unchecked = true;
                continue;
            }
        }

        if let Some(lit) = do_decision(&model, &working, options.phase) {
            // once every clause is true the remaining decisions only
            // complete the model, and are not charged to the budget.
            let searching = status.is_none();
            if searching {
                if options.decision_limit.is_some_and(|limit| decisions >= limit) {
                    debug!(decisions, "decision limit reached");
                    return Ok(SolveResult::Unknown);
                }
                decisions += 1;
            }
            model.append(lit, Provenance::Decision);
            unchecked = true;
            continue;
        }

        // the model is complete and satisfies the formula; under
        // propagation it has also been checked already.
        let assignments = model.sorted_assignments();
        if mode == OracleMode::CompleteModel
            && theory.check(&assignments) == Verdict::Inconsistent
        {
            add_lemma(theory, formula, &mut working)?;
            continue;
        }

        return Ok(SolveResult::Sat(assignments));
    }
}

// "Clause Elimination Procedures for CNF Formulas" - Heule, Jarvisalo, Biere (2010)

fn simplify_formula(formula: Formula) -> Formula {
    asymmetric_tautology_elimination(formula)
}

/// Asymmetric Tautology Elimination (4.2)
///
/// For a clause C and a CNF formula F, ALA(F,C) denotes the unique
/// clause resulting from repeating the following until fixpoint:
/// if l1, ..., lk \in C and there is a clause (l1 || ... || lk ||
/// l) \in F \ {C} for some literal l, let C := C + {!l}.
///
/// A clause C is called an asymmetric tautology if and only if
/// ALA(F,C) is a tautology.
///
/// Given a formula F, asymmetric tautology elimination (ATE)
/// repeats the following until fixpoint: if there is an asymmetric
/// tautological clause C \in F, let F := F \ {C}
fn asymmetric_tautology_elimination(formula: Formula) -> Formula {
    let Formula(clauses) = formula;
    let mut deleted = vec![false; clauses.len()];

    for i in 0..clauses.len() {
        let Clause(lits) = &clauses[i];
        let mut extended: BTreeSet<Literal> = lits.iter().copied().collect();

        'ala: loop {
            for (j, other) in clauses.iter().enumerate() {
                if i == j || deleted[j] {
                    continue;
                }
                let Clause(elits) = other;
                for el in elits {
                    if extended.contains(&el.negate()) {
                        continue;
                    }
                    let rest_covered = elits
                        .iter()
                        .filter(|l| *l != el)
                        .all(|l| extended.contains(l));
                    if rest_covered {
                        if extended.contains(el) {
                            deleted[i] = true;
                            break 'ala;
                        }
                        extended.insert(el.negate());
                        continue 'ala;
                    }
                }
            }
            break 'ala;
        }
    }

    Formula(
        clauses
            .into_iter()
            .zip(deleted)
            .filter(|(_, deleted)| !*deleted)
            .map(|(clause, _)| clause)
            .collect(),
    )
}
