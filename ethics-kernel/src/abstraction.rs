// Copyright (c) The ethics-kernel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Abstraction of a formula into a purely Boolean skeleton.
//!
//! Every predicate and comparison is replaced by a fresh variable. The mapping from fresh
//! variables back to the subformulas they stand for is kept in an [`AbstractionMap`], which is
//! owned by a single [`Abstraction`] and never shared between queries.

use crate::{formula::Formula, misc::log::targets::ABSTRACTION as LOG_ABSTRACTION};
use once_cell::unsync::OnceCell;
use std::{
    collections::{BTreeSet, HashMap},
    fmt,
};

/// A propositional variable of the skeleton.
///
/// Fresh variables live in their own namespace, so they can never collide with an atom name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Var {
    /// An atom of the original formula.
    Original(String),
    /// An abstraction variable, identified by its position in the [`AbstractionMap`].
    Fresh(usize),
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Var::Original(name) => f.write_str(name),
            Var::Fresh(id) => write!(f, "$C{}", id),
        }
    }
}

/// A formula over [`Var`]s built only from constants, `Not`, `And` and `Or`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Skeleton {
    Const(bool),
    Var(Var),
    Not(Box<Skeleton>),
    And(Box<Skeleton>, Box<Skeleton>),
    Or(Box<Skeleton>, Box<Skeleton>),
}

impl Skeleton {
    /// Returns the sorted set of variables in this skeleton.
    pub fn vars(&self) -> BTreeSet<&Var> {
        fn collect<'a>(skeleton: &'a Skeleton, out: &mut BTreeSet<&'a Var>) {
            match skeleton {
                Skeleton::Const(_) => {}
                Skeleton::Var(var) => {
                    out.insert(var);
                }
                Skeleton::Not(inner) => collect(inner, out),
                Skeleton::And(lhs, rhs) | Skeleton::Or(lhs, rhs) => {
                    collect(lhs, out);
                    collect(rhs, out);
                }
            }
        }

        let mut out = BTreeSet::new();
        collect(self, &mut out);
        out
    }

    /// Evaluates this skeleton under `assignment`.
    pub fn evaluate(&self, assignment: &impl Fn(&Var) -> bool) -> bool {
        match self {
            Skeleton::Const(value) => *value,
            Skeleton::Var(var) => assignment(var),
            Skeleton::Not(inner) => !inner.evaluate(assignment),
            Skeleton::And(lhs, rhs) => lhs.evaluate(assignment) && rhs.evaluate(assignment),
            Skeleton::Or(lhs, rhs) => lhs.evaluate(assignment) || rhs.evaluate(assignment),
        }
    }

    /// Returns the negation of this skeleton.
    pub fn negated(&self) -> Skeleton {
        match self {
            Skeleton::Const(value) => Skeleton::Const(!value),
            Skeleton::Not(inner) => (**inner).clone(),
            other => Skeleton::Not(Box::new(other.clone())),
        }
    }

    // ---
    // Constant-folding constructors, used while restricting variables
    // ---

    pub(crate) fn not_folded(inner: Skeleton) -> Skeleton {
        match inner {
            Skeleton::Const(value) => Skeleton::Const(!value),
            Skeleton::Not(inner) => *inner,
            other => Skeleton::Not(Box::new(other)),
        }
    }

    pub(crate) fn and_folded(lhs: Skeleton, rhs: Skeleton) -> Skeleton {
        match (lhs, rhs) {
            (Skeleton::Const(false), _) | (_, Skeleton::Const(false)) => Skeleton::Const(false),
            (Skeleton::Const(true), other) | (other, Skeleton::Const(true)) => other,
            (lhs, rhs) => Skeleton::And(Box::new(lhs), Box::new(rhs)),
        }
    }

    pub(crate) fn or_folded(lhs: Skeleton, rhs: Skeleton) -> Skeleton {
        match (lhs, rhs) {
            (Skeleton::Const(true), _) | (_, Skeleton::Const(true)) => Skeleton::Const(true),
            (Skeleton::Const(false), other) | (other, Skeleton::Const(false)) => other,
            (lhs, rhs) => Skeleton::Or(Box::new(lhs), Box::new(rhs)),
        }
    }
}

impl fmt::Display for Skeleton {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Skeleton::Const(value) => write!(f, "{}", value),
            Skeleton::Var(var) => write!(f, "{}", var),
            Skeleton::Not(inner) => write!(f, "¬{}", inner),
            Skeleton::And(lhs, rhs) => write!(f, "({} ∧ {})", lhs, rhs),
            Skeleton::Or(lhs, rhs) => write!(f, "({} ∨ {})", lhs, rhs),
        }
    }
}

/// Memoized mapping between abstraction variables and the subformulas they replace.
///
/// Subformulas are keyed by their canonical text, so structurally identical subformulas always
/// share one variable. Ids are assigned densely in insertion order.
#[derive(Clone, Debug, Default)]
pub struct AbstractionMap {
    ids: HashMap<String, usize>,
    entries: Vec<Formula>,
}

impl AbstractionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `formula`, minting a new one if it hasn't been seen before.
    pub fn intern(&mut self, formula: &Formula) -> usize {
        let key = formula.to_string();
        if let Some(&id) = self.ids.get(&key) {
            return id;
        }
        let id = self.entries.len();
        log::trace!(target: LOG_ABSTRACTION, "{} := {}", Var::Fresh(id), key);
        self.ids.insert(key, id);
        self.entries.push(formula.clone());
        id
    }

    /// Returns the id previously assigned to `formula`.
    pub fn id_of(&self, formula: &Formula) -> Option<usize> {
        self.ids.get(&formula.to_string()).copied()
    }

    #[inline]
    pub fn get(&self, id: usize) -> Option<&Formula> {
        self.entries.get(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Var, &Formula)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(id, formula)| (Var::Fresh(id), formula))
    }

    /// Maps a skeleton variable back to the formula it stands for.
    ///
    /// Variables without an entry are treated as atoms of the same name.
    pub fn back_map(&self, var: &Var) -> Formula {
        match var {
            Var::Original(name) => Formula::Atom(name.clone()),
            Var::Fresh(id) => match self.get(*id) {
                Some(formula) => formula.clone(),
                None => Formula::Atom(var.to_string()),
            },
        }
    }

    /// Maps a signed variable back, wrapping negative occurrences in `Not`.
    pub fn back_map_literal(&self, var: &Var, polarity: bool) -> Formula {
        let formula = self.back_map(var);
        if polarity {
            formula
        } else {
            Formula::not(formula)
        }
    }
}

/// A formula's Boolean skeleton together with the map that abstracts it.
#[derive(Clone, Debug)]
pub struct Abstraction {
    skeleton: Skeleton,
    map: AbstractionMap,
    vars: OnceCell<Vec<Var>>,
}

impl Abstraction {
    /// Abstracts `formula`. Subformulas are visited left to right, so fresh ids are
    /// deterministic.
    pub fn new(formula: &Formula) -> Self {
        let mut map = AbstractionMap::new();
        let skeleton = abstract_impl(formula, &mut map);
        log::debug!(
            target: LOG_ABSTRACTION,
            "abstracted {} predicates: {}",
            map.len(),
            skeleton
        );
        Self {
            skeleton,
            map,
            vars: OnceCell::new(),
        }
    }

    #[inline]
    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    #[inline]
    pub fn map(&self) -> &AbstractionMap {
        &self.map
    }

    /// The variables of the skeleton, sorted. Original atoms come before fresh variables.
    pub fn vars(&self) -> &[Var] {
        self.vars
            .get_or_init(|| self.skeleton.vars().into_iter().cloned().collect())
    }

    pub fn into_parts(self) -> (Skeleton, AbstractionMap) {
        (self.skeleton, self.map)
    }
}

fn abstract_impl(formula: &Formula, map: &mut AbstractionMap) -> Skeleton {
    match formula {
        Formula::Atom(name) => Skeleton::Var(Var::Original(name.clone())),
        Formula::Bool(value) => Skeleton::Const(*value),
        Formula::Not(inner) => Skeleton::Not(Box::new(abstract_impl(inner, map))),
        Formula::And(lhs, rhs) => {
            let lhs = abstract_impl(lhs, map);
            let rhs = abstract_impl(rhs, map);
            Skeleton::And(Box::new(lhs), Box::new(rhs))
        }
        Formula::Or(lhs, rhs) => {
            let lhs = abstract_impl(lhs, map);
            let rhs = abstract_impl(rhs, map);
            Skeleton::Or(Box::new(lhs), Box::new(rhs))
        }
        Formula::Impl(lhs, rhs) => {
            let lhs = abstract_impl(lhs, map);
            let rhs = abstract_impl(rhs, map);
            Skeleton::Or(Box::new(Skeleton::Not(Box::new(lhs))), Box::new(rhs))
        }
        Formula::BiImpl(lhs, rhs) => {
            let lhs = abstract_impl(lhs, map);
            let rhs = abstract_impl(rhs, map);
            Skeleton::And(
                Box::new(Skeleton::Or(
                    Box::new(Skeleton::Not(Box::new(lhs.clone()))),
                    Box::new(rhs.clone()),
                )),
                Box::new(Skeleton::Or(
                    Box::new(Skeleton::Not(Box::new(rhs))),
                    Box::new(lhs),
                )),
            )
        }
        Formula::Unary(..) | Formula::Binary(..) | Formula::Compare(..) => {
            Skeleton::Var(Var::Fresh(map.intern(formula)))
        }
    }
}
