// Copyright (c) The ethics-kernel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The domain theory: consistency axioms over the predicate vocabulary.
//!
//! A Boolean model of the skeleton can still be incoherent once its variables are read as
//! predicates again, for example if it makes something both good and bad. Such models are
//! dropped from the enumeration.

use crate::{
    formula::{BinaryPredicate, Comparison, Formula, Term, UnaryPredicate},
    misc::log::targets::THEORY as LOG_THEORY,
    oracle::Model,
};
use std::{collections::HashSet, fmt};

/// A domain axiom that a model can violate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axiom {
    /// `Good`, `Bad` and `Neutral` are pairwise exclusive on the same argument.
    ValenceExclusive,
    /// `P(x)` and `P(¬x)` can't both hold for `Caused`, `Finally`, `Goal`, `Instrumental` and `I`.
    NegationExclusive(UnaryPredicate),
    /// `Causes(x, y)` requires both `x` and `y` to hold.
    CausesFactual,
    /// Nothing causes itself.
    CausesIrreflexive,
    /// `Causes(x, y)` and `Causes(y, x)` can't both hold.
    CausesAsymmetric,
    /// Nothing causes its own negation.
    CausesOwnNegation,
    /// `Causes(x, y)` excludes `Causes(x, ¬y)` and `Causes(¬x, y)`.
    CausesContradictory,
    /// `Eq(x, x)` and `GEq(x, x)` can't be false.
    ComparisonReflexive,
    /// `Eq(a, b)` excludes `Gt(a, b)` and `Gt(b, a)`.
    EqExcludesGt,
    /// `GEq(a, b)` excludes `Gt(b, a)`.
    GEqExcludesGt,
    /// `Gt` is irreflexive.
    GtIrreflexive,
    /// `Gt(a, b)` excludes `Gt(b, a)`, `GEq(b, a)` and equality.
    GtAsymmetric,
    /// `Better` is irreflexive.
    BetterIrreflexive,
    /// `Better(a, b)` and `Better(b, a)` can't both hold.
    BetterAsymmetric,
    /// If `Better(a, b)` and `Better(b, c)` hold, `Better(a, c)` can't be false.
    BetterTransitive,
}

impl fmt::Display for Axiom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Axiom::ValenceExclusive => write!(f, "valences are exclusive"),
            Axiom::NegationExclusive(predicate) => {
                write!(f, "{} excludes its negated argument", predicate)
            }
            Axiom::CausesFactual => write!(f, "causes require their cause and effect"),
            Axiom::CausesIrreflexive => write!(f, "causation is irreflexive"),
            Axiom::CausesAsymmetric => write!(f, "causation is asymmetric"),
            Axiom::CausesOwnNegation => write!(f, "nothing causes its own negation"),
            Axiom::CausesContradictory => write!(f, "contradictory causation"),
            Axiom::ComparisonReflexive => write!(f, "equality and order are reflexive"),
            Axiom::EqExcludesGt => write!(f, "equality excludes strict order"),
            Axiom::GEqExcludesGt => write!(f, "order excludes reversed strict order"),
            Axiom::GtIrreflexive => write!(f, "strict order is irreflexive"),
            Axiom::GtAsymmetric => write!(f, "strict order is asymmetric"),
            Axiom::BetterIrreflexive => write!(f, "betterness is irreflexive"),
            Axiom::BetterAsymmetric => write!(f, "betterness is asymmetric"),
            Axiom::BetterTransitive => write!(f, "betterness is transitive"),
        }
    }
}

/// Returns true if `model` satisfies every axiom.
pub fn consistent(model: &Model) -> bool {
    violation(model).is_none()
}

/// Returns the first axiom violated by `model`, if any.
pub fn violation(model: &Model) -> Option<Axiom> {
    let checker = Checker::new(model);
    model.literals().find_map(|literal| {
        let axiom = checker.check(&literal)?;
        log::trace!(target: LOG_THEORY, "{} violates: {}", literal, axiom);
        Some(axiom)
    })
}

struct Checker<'a> {
    model: &'a Model,
    literals: HashSet<Formula>,
}

impl<'a> Checker<'a> {
    fn new(model: &'a Model) -> Self {
        Self {
            model,
            literals: model.literals().collect(),
        }
    }

    #[inline]
    fn holds(&self, formula: &Formula) -> bool {
        self.literals.contains(formula)
    }

    fn check(&self, literal: &Formula) -> Option<Axiom> {
        match literal {
            Formula::Unary(predicate, argument) => self.check_unary(*predicate, argument),
            Formula::Binary(predicate, lhs, rhs) => self.check_binary(*predicate, lhs, rhs),
            Formula::Compare(comparison, lhs, rhs) => self.check_compare(*comparison, lhs, rhs),
            Formula::Not(inner) => match &**inner {
                Formula::Compare(Comparison::Eq | Comparison::GEq, lhs, rhs) if lhs == rhs => {
                    Some(Axiom::ComparisonReflexive)
                }
                _ => None,
            },
            Formula::Atom(_)
            | Formula::Bool(_)
            | Formula::And(..)
            | Formula::Or(..)
            | Formula::Impl(..)
            | Formula::BiImpl(..) => None,
        }
    }

    fn check_unary(&self, predicate: UnaryPredicate, argument: &Formula) -> Option<Axiom> {
        use UnaryPredicate::*;

        match predicate {
            Good | Bad | Neutral => {
                let clash = [Good, Bad, Neutral]
                    .into_iter()
                    .filter(|other| *other != predicate)
                    .any(|other| self.holds(&Formula::unary(other, argument.clone())));
                clash.then(|| Axiom::ValenceExclusive)
            }
            Caused | Finally | Goal | Instrumental | Intended => self
                .holds(&Formula::unary(predicate, nnf_not(argument)))
                .then(|| Axiom::NegationExclusive(predicate)),
            Avoidable | Choice | Patient | End | Means | Means2 | Knows | Consequence | May
            | Must => None,
        }
    }

    fn check_binary(
        &self,
        predicate: BinaryPredicate,
        lhs: &Formula,
        rhs: &Formula,
    ) -> Option<Axiom> {
        use BinaryPredicate::*;

        match predicate {
            Causes => self.check_causes(lhs, rhs),
            Better => self.check_better(lhs, rhs),
            PCauses | SCauses | Explains | Prevents | Intervention | Exists | Forall | Because
            | Affects | AffectsPos | AffectsNeg | Same => None,
        }
    }

    fn check_causes(&self, cause: &Formula, effect: &Formula) -> Option<Axiom> {
        let not_cause = nnf_not(cause);
        let not_effect = nnf_not(effect);

        if self.model_falsifies(cause) || self.model_falsifies(effect) {
            return Some(Axiom::CausesFactual);
        }
        if cause == effect {
            return Some(Axiom::CausesIrreflexive);
        }
        if self.holds(&Formula::causes(effect.clone(), cause.clone())) {
            return Some(Axiom::CausesAsymmetric);
        }
        if *effect == not_cause {
            return Some(Axiom::CausesOwnNegation);
        }
        if self.holds(&Formula::causes(cause.clone(), not_effect))
            || self.holds(&Formula::causes(not_cause, effect.clone()))
        {
            return Some(Axiom::CausesContradictory);
        }
        None
    }

    /// Compound causes and effects count as false once their assigned parts decide them.
    fn model_falsifies(&self, formula: &Formula) -> bool {
        formula.evaluate(self.model) == Some(false)
    }

    fn check_better(&self, lhs: &Formula, rhs: &Formula) -> Option<Axiom> {
        if lhs == rhs {
            return Some(Axiom::BetterIrreflexive);
        }
        if self.holds(&Formula::better(rhs.clone(), lhs.clone())) {
            return Some(Axiom::BetterAsymmetric);
        }
        // Better(lhs, rhs) and Better(rhs, next) with Not(Better(lhs, next)).
        let transitive_gap = self.literals.iter().any(|other| match other {
            Formula::Binary(BinaryPredicate::Better, middle, next) if **middle == *rhs => self
                .holds(&Formula::not(Formula::better(lhs.clone(), (**next).clone()))),
            _ => false,
        });
        transitive_gap.then(|| Axiom::BetterTransitive)
    }

    fn check_compare(&self, comparison: Comparison, lhs: &Term, rhs: &Term) -> Option<Axiom> {
        let gt = |a: &Term, b: &Term| Formula::gt(a.clone(), b.clone());

        match comparison {
            Comparison::Eq => (self.holds(&gt(lhs, rhs)) || self.holds(&gt(rhs, lhs)))
                .then(|| Axiom::EqExcludesGt),
            Comparison::GEq => self.holds(&gt(rhs, lhs)).then(|| Axiom::GEqExcludesGt),
            Comparison::Gt => {
                if lhs == rhs {
                    return Some(Axiom::GtIrreflexive);
                }
                let reversed = self.holds(&gt(rhs, lhs))
                    || self.holds(&Formula::geq(rhs.clone(), lhs.clone()))
                    || self.holds(&Formula::eq(lhs.clone(), rhs.clone()))
                    || self.holds(&Formula::eq(rhs.clone(), lhs.clone()));
                reversed.then(|| Axiom::GtAsymmetric)
            }
        }
    }
}

fn nnf_not(formula: &Formula) -> Formula {
    Formula::not(formula.clone()).to_nnf()
}
