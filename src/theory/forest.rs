//! A union-find forest over theory variables.
//!
//! Merging always hangs the second root under the first, and `find`
//! does no path compression, so trees can degenerate into chains: both
//! `find` and `same_class` are linear in the size of the universe in the
//! worst case.  The forest is rebuilt from nothing for every model, so
//! there is no undo trail either.

use crate::theory::equality::TheoryVariable;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Node {
    parent: Option<TheoryVariable>,
    children: Vec<TheoryVariable>,
}

/// Partition of a fixed universe of variables into equivalence classes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EquivalenceForest {
    nodes: Vec<Node>,
}

impl EquivalenceForest {
    /// A forest of `size` singleton classes.
    pub fn new(size: usize) -> EquivalenceForest {
        EquivalenceForest {
            nodes: vec![Node::default(); size],
        }
    }

    /// Number of variables in the universe.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root of the tree containing `var`.
    ///
    /// # Panics
    ///
    /// If `var` is outside the universe.
    pub fn find(&self, var: TheoryVariable) -> TheoryVariable {
        let mut current = var;
        while let Some(parent) = self.nodes[current.index()].parent {
            current = parent;
        }
        current
    }

    /// Union the classes of `a` and `b`.  Does nothing if they are
    /// already in the same class.
    pub fn merge(&mut self, a: TheoryVariable, b: TheoryVariable) {
        let a_root = self.find(a);
        let b_root = self.find(b);

        if a_root != b_root {
            self.nodes[b_root.index()].parent = Some(a_root);
            self.nodes[a_root.index()].children.push(b_root);
        }
    }

    pub fn same_class(&self, a: TheoryVariable, b: TheoryVariable) -> bool {
        a == b || self.find(a) == self.find(b)
    }

    /// Every member of the class containing `var`, root first.
    pub fn class_of(&self, var: TheoryVariable) -> Vec<TheoryVariable> {
        let mut members = Vec::new();
        let mut todo = vec![self.find(var)];

        while let Some(next) = todo.pop() {
            members.push(next);
            todo.extend(self.nodes[next.index()].children.iter().rev().copied());
        }

        members
    }

    /// The roots of all classes, in variable order.
    pub fn roots(&self) -> impl Iterator<Item = TheoryVariable> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(i, _)| TheoryVariable::new(i))
    }

    /// Forget every merge: each variable is its own class again.
    pub fn reset(&mut self) {
        for node in self.nodes.iter_mut() {
            node.parent = None;
            node.children.clear();
        }
    }
}
