// Copyright (c) The ethics-kernel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The formula language: propositional connectives over atoms and domain predicates, plus an
//! arithmetic term language for utilities.

mod display;
mod nnf;
mod parse;
mod predicate;
mod term;

pub use predicate::*;
pub use term::*;

use crate::oracle::Model;
use arrayvec::ArrayVec;
use std::{
    collections::BTreeSet,
    ops::{BitAnd, BitOr, Not},
};

/// An immutable formula.
///
/// Equality, ordering and hashing are structural. Two formulas with the same structure are
/// interchangeable everywhere in the kernel.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Formula {
    Atom(String),
    Bool(bool),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Impl(Box<Formula>, Box<Formula>),
    BiImpl(Box<Formula>, Box<Formula>),
    Unary(UnaryPredicate, Box<Formula>),
    Binary(BinaryPredicate, Box<Formula>, Box<Formula>),
    Compare(Comparison, Term, Term),
}

impl Formula {
    // ---
    // Constructors
    // ---

    #[inline]
    pub fn atom(name: impl Into<String>) -> Self {
        Self::Atom(name.into())
    }

    #[allow(clippy::should_implement_trait)]
    #[inline]
    pub fn not(formula: Formula) -> Self {
        Self::Not(Box::new(formula))
    }

    #[inline]
    pub fn and(lhs: Formula, rhs: Formula) -> Self {
        Self::And(Box::new(lhs), Box::new(rhs))
    }

    #[inline]
    pub fn or(lhs: Formula, rhs: Formula) -> Self {
        Self::Or(Box::new(lhs), Box::new(rhs))
    }

    #[inline]
    pub fn implies(lhs: Formula, rhs: Formula) -> Self {
        Self::Impl(Box::new(lhs), Box::new(rhs))
    }

    #[inline]
    pub fn iff(lhs: Formula, rhs: Formula) -> Self {
        Self::BiImpl(Box::new(lhs), Box::new(rhs))
    }

    #[inline]
    pub fn unary(predicate: UnaryPredicate, argument: Formula) -> Self {
        Self::Unary(predicate, Box::new(argument))
    }

    #[inline]
    pub fn binary(predicate: BinaryPredicate, lhs: Formula, rhs: Formula) -> Self {
        Self::Binary(predicate, Box::new(lhs), Box::new(rhs))
    }

    #[inline]
    pub fn compare(comparison: Comparison, lhs: impl Into<Term>, rhs: impl Into<Term>) -> Self {
        Self::Compare(comparison, lhs.into(), rhs.into())
    }

    pub fn good(argument: Formula) -> Self {
        Self::unary(UnaryPredicate::Good, argument)
    }

    pub fn bad(argument: Formula) -> Self {
        Self::unary(UnaryPredicate::Bad, argument)
    }

    pub fn neutral(argument: Formula) -> Self {
        Self::unary(UnaryPredicate::Neutral, argument)
    }

    pub fn intended(argument: Formula) -> Self {
        Self::unary(UnaryPredicate::Intended, argument)
    }

    pub fn causes(cause: Formula, effect: Formula) -> Self {
        Self::binary(BinaryPredicate::Causes, cause, effect)
    }

    pub fn better(lhs: Formula, rhs: Formula) -> Self {
        Self::binary(BinaryPredicate::Better, lhs, rhs)
    }

    pub fn eq(lhs: impl Into<Term>, rhs: impl Into<Term>) -> Self {
        Self::compare(Comparison::Eq, lhs, rhs)
    }

    pub fn gt(lhs: impl Into<Term>, rhs: impl Into<Term>) -> Self {
        Self::compare(Comparison::Gt, lhs, rhs)
    }

    pub fn geq(lhs: impl Into<Term>, rhs: impl Into<Term>) -> Self {
        Self::compare(Comparison::GEq, lhs, rhs)
    }

    /// Folds `formulas` into a left-nested conjunction. The empty conjunction is `Bool(true)`.
    pub fn conjunction(formulas: impl IntoIterator<Item = Formula>) -> Self {
        formulas
            .into_iter()
            .reduce(Formula::and)
            .unwrap_or(Formula::Bool(true))
    }

    /// Folds `formulas` into a left-nested disjunction. There is no empty disjunction.
    pub fn disjunction(formulas: impl IntoIterator<Item = Formula>) -> Option<Self> {
        formulas.into_iter().reduce(Formula::or)
    }

    // ---
    // Structure
    // ---

    /// Returns the immediate subformulas. Terms are not formulas, so comparisons have none.
    pub fn children(&self) -> ArrayVec<&Formula, 2> {
        let mut children = ArrayVec::new();
        match self {
            Self::Atom(_) | Self::Bool(_) | Self::Compare(..) => {}
            Self::Not(inner) | Self::Unary(_, inner) => children.push(&**inner),
            Self::And(lhs, rhs)
            | Self::Or(lhs, rhs)
            | Self::Impl(lhs, rhs)
            | Self::BiImpl(lhs, rhs)
            | Self::Binary(_, lhs, rhs) => {
                children.push(&**lhs);
                children.push(&**rhs);
            }
        }
        children
    }

    /// Returns true if this is one of the Boolean connectives (or a constant).
    pub fn is_connective(&self) -> bool {
        matches!(
            self,
            Self::Bool(_)
                | Self::Not(_)
                | Self::And(..)
                | Self::Or(..)
                | Self::Impl(..)
                | Self::BiImpl(..)
        )
    }

    /// A literal is an atom, a predicate or a comparison, optionally under a single negation.
    pub fn is_literal(&self) -> bool {
        match self {
            Self::Not(inner) => !inner.is_connective(),
            other => !other.is_connective(),
        }
    }

    /// Returns the literal leaves of the negation normal form, left to right.
    pub fn literals(&self) -> Vec<Formula> {
        fn collect(formula: &Formula, out: &mut Vec<Formula>) {
            if formula.is_literal() {
                out.push(formula.clone());
            } else {
                for child in formula.children() {
                    collect(child, out);
                }
            }
        }

        let mut out = Vec::new();
        collect(&self.to_nnf(), &mut out);
        out
    }

    /// Returns the names of every atom, including atoms under predicates and utilities.
    pub fn atoms(&self) -> BTreeSet<&str> {
        let mut atoms = BTreeSet::new();
        self.collect_atoms(&mut atoms);
        atoms
    }

    pub(crate) fn collect_atoms<'a>(&'a self, atoms: &mut BTreeSet<&'a str>) {
        match self {
            Self::Atom(name) => {
                atoms.insert(name.as_str());
            }
            Self::Compare(_, lhs, rhs) => {
                lhs.collect_atoms(atoms);
                rhs.collect_atoms(atoms);
            }
            other => {
                for child in other.children() {
                    child.collect_atoms(atoms);
                }
            }
        }
    }

    /// Flattens a top-level chain of conjunctions.
    pub fn conjuncts(&self) -> Vec<&Formula> {
        match self {
            Self::And(lhs, rhs) => {
                let mut result = lhs.conjuncts();
                result.extend(rhs.conjuncts());
                result
            }
            other => vec![other],
        }
    }

    /// Flattens a top-level chain of disjunctions.
    pub fn disjuncts(&self) -> Vec<&Formula> {
        match self {
            Self::Or(lhs, rhs) => {
                let mut result = lhs.disjuncts();
                result.extend(rhs.disjuncts());
                result
            }
            other => vec![other],
        }
    }

    // ---
    // Semantics
    // ---

    /// Returns the negation of this formula.
    ///
    /// Double negations collapse, constants flip and numeric comparisons use the order dual
    /// (`GEq(a, b)` becomes `Gt(b, a)`). Anything else is wrapped in `Not`.
    pub fn negate(&self) -> Formula {
        match self {
            Self::Bool(value) => Self::Bool(!value),
            Self::Not(inner) => match &**inner {
                Self::Not(innermost) => innermost.negate(),
                other => other.clone(),
            },
            Self::Compare(Comparison::GEq, lhs, rhs) => {
                Self::Compare(Comparison::Gt, rhs.clone(), lhs.clone())
            }
            Self::Compare(Comparison::Eq, lhs, rhs) => Self::or(
                Self::Compare(Comparison::Gt, lhs.clone(), rhs.clone()),
                Self::Compare(Comparison::Gt, rhs.clone(), lhs.clone()),
            ),
            other => Self::not(other.clone()),
        }
    }

    /// Evaluates this formula in `model`.
    ///
    /// Atoms, predicates and comparisons are looked up as literals. Returns `None` if the value
    /// depends on one that the model doesn't assign: `And(a, b)` with `a` false is false no
    /// matter what `b` is.
    pub fn evaluate(&self, model: &Model) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            Self::Not(inner) => inner.evaluate(model).map(|value| !value),
            Self::And(lhs, rhs) => and3(lhs.evaluate(model), rhs.evaluate(model)),
            Self::Or(lhs, rhs) => or3(lhs.evaluate(model), rhs.evaluate(model)),
            Self::Impl(lhs, rhs) => or3(lhs.evaluate(model).map(|v| !v), rhs.evaluate(model)),
            Self::BiImpl(lhs, rhs) => Some(lhs.evaluate(model)? == rhs.evaluate(model)?),
            Self::Atom(_) | Self::Unary(..) | Self::Binary(..) | Self::Compare(..) => {
                model.value(self)
            }
        }
    }
}

fn and3(lhs: Option<bool>, rhs: Option<bool>) -> Option<bool> {
    match (lhs, rhs) {
        (Some(false), _) | (_, Some(false)) => Some(false),
        (Some(true), Some(true)) => Some(true),
        _ => None,
    }
}

fn or3(lhs: Option<bool>, rhs: Option<bool>) -> Option<bool> {
    match (lhs, rhs) {
        (Some(true), _) | (_, Some(true)) => Some(true),
        (Some(false), Some(false)) => Some(false),
        _ => None,
    }
}

impl From<bool> for Formula {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Formula {
    fn from(name: &str) -> Self {
        Self::atom(name)
    }
}

impl Not for Formula {
    type Output = Formula;

    fn not(self) -> Self::Output {
        Formula::Not(Box::new(self))
    }
}

impl BitAnd for Formula {
    type Output = Formula;

    fn bitand(self, rhs: Self) -> Self::Output {
        Formula::and(self, rhs)
    }
}

impl BitOr for Formula {
    type Output = Formula;

    fn bitor(self, rhs: Self) -> Self::Output {
        Formula::or(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a() -> Formula {
        Formula::atom("a")
    }

    fn b() -> Formula {
        Formula::atom("b")
    }

    fn c() -> Formula {
        Formula::atom("c")
    }

    #[test]
    fn test_negate() {
        assert_eq!(a().negate(), !a());
        assert_eq!((!a()).negate(), a());
        assert_eq!((!!a()).negate(), !a());
        assert_eq!(Formula::Bool(true).negate(), Formula::Bool(false));

        let u = Term::utility(a());
        assert_eq!(
            Formula::geq(u.clone(), 0).negate(),
            Formula::gt(0, u.clone()),
            "GEq negates to the swapped strict order"
        );
        assert_eq!(
            Formula::eq(u.clone(), 0).negate(),
            Formula::gt(u.clone(), 0) | Formula::gt(0, u)
        );
        assert_eq!(Formula::good(a()).negate(), !Formula::good(a()));
    }

    #[test]
    fn test_conjunction_disjunction() {
        assert_eq!(Formula::conjunction(vec![]), Formula::Bool(true));
        assert_eq!(Formula::disjunction(vec![]), None);
        assert_eq!(Formula::conjunction(vec![a()]), a());
        assert_eq!(
            Formula::conjunction(vec![a(), b(), c()]),
            (a() & b()) & c(),
            "conjunctions nest to the left"
        );
        assert_eq!(
            Formula::disjunction(vec![a(), b(), c()]),
            Some((a() | b()) | c())
        );

        let f = a() & (b() & !c());
        assert_eq!(f.conjuncts(), vec![&a(), &b(), &!c()]);
        assert_eq!(f.disjuncts(), vec![&f]);
        let g = (a() | b()) | (c() & a());
        assert_eq!(g.disjuncts(), vec![&a(), &b(), &(c() & a())]);
    }

    #[test]
    fn test_atoms_and_literals() {
        let f = Formula::implies(
            Formula::causes(a(), !b()),
            Formula::gt(Term::utility(c() & a()), 0),
        );
        assert_eq!(f.atoms().into_iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(
            f.literals(),
            vec![
                !Formula::causes(a(), !b()),
                Formula::gt(Term::utility(c() & a()), 0)
            ]
        );

        assert!(Formula::good(a()).is_literal());
        assert!((!Formula::good(a())).is_literal());
        assert!(!(!(a() & b())).is_literal());
        assert!(!Formula::Bool(true).is_literal());
    }

    #[test]
    fn test_evaluate_partial() {
        let model: Model = [(a(), false), (b(), true)].into_iter().collect();
        assert_eq!((a() & c()).evaluate(&model), Some(false));
        assert_eq!((b() | c()).evaluate(&model), Some(true));
        assert_eq!(Formula::implies(a(), c()).evaluate(&model), Some(true));
        assert_eq!((b() & c()).evaluate(&model), None);
        assert_eq!(Formula::iff(a(), c()).evaluate(&model), None);
        assert_eq!(Formula::good(a()).evaluate(&model), None);
    }
}
