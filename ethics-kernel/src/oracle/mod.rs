// Copyright (c) The ethics-kernel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The satisfiability oracle.
//!
//! Formulas are abstracted into Boolean skeletons, whose models are enumerated exhaustively and
//! mapped back onto the original atoms and predicates. A model only counts if it is consistent
//! with the domain [`theory`].

mod enumerate;
pub mod theory;

pub use enumerate::*;

use crate::{
    abstraction::{Abstraction, AbstractionMap},
    formula::Formula,
    misc::log::targets::ORACLE as LOG_ORACLE,
};
use itertools::Itertools;
use std::{collections::BTreeMap, fmt};

/// A complete assignment, expressed over the atoms and predicates of the original formula.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Model {
    values: BTreeMap<Formula, bool>,
}

impl Model {
    /// Maps a skeleton assignment back through `map`.
    pub fn from_assignment(map: &AbstractionMap, assignment: &Assignment) -> Self {
        assignment
            .iter()
            .map(|(var, value)| (map.back_map(var), *value))
            .collect()
    }

    /// Returns the value assigned to an atom, predicate or comparison.
    #[inline]
    pub fn value(&self, formula: &Formula) -> Option<bool> {
        self.values.get(formula).copied()
    }

    /// Returns true if `formula` evaluates to true in this model.
    pub fn holds(&self, formula: &Formula) -> bool {
        formula.evaluate(self) == Some(true)
    }

    /// Returns every assignment as a literal: the formula itself if true, its negation if false.
    pub fn literals(&self) -> impl Iterator<Item = Formula> + '_ {
        self.values.iter().map(|(formula, value)| {
            if *value {
                formula.clone()
            } else {
                Formula::not(formula.clone())
            }
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Formula, bool)> + '_ {
        self.values.iter().map(|(formula, value)| (formula, *value))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(Formula, bool)> for Model {
    fn from_iter<I: IntoIterator<Item = (Formula, bool)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{}}}", self.literals().join(", "))
    }
}

/// The theory-consistent models of a formula.
///
/// Enumeration is lazy. The iterator can't be restarted; call [`all_models`] again instead.
#[derive(Clone, Debug)]
pub struct Models {
    map: AbstractionMap,
    models: BooleanModels,
    rejected: usize,
}

impl Models {
    fn new(formula: &Formula) -> Self {
        let abstraction = Abstraction::new(formula);
        let vars = abstraction.vars().to_vec();
        let (skeleton, map) = abstraction.into_parts();
        Self {
            models: BooleanModels::new(&skeleton, vars),
            map,
            rejected: 0,
        }
    }

    /// The number of Boolean models rejected by the theory so far.
    #[inline]
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}

impl Iterator for Models {
    type Item = Model;

    fn next(&mut self) -> Option<Self::Item> {
        for assignment in &mut self.models {
            let model = Model::from_assignment(&self.map, &assignment);
            match theory::violation(&model) {
                None => return Some(model),
                Some(axiom) => {
                    self.rejected += 1;
                    log::trace!(target: LOG_ORACLE, "rejected {} ({})", model, axiom);
                }
            }
        }
        None
    }
}

/// Enumerates the theory-consistent models of `formula`.
pub fn all_models(formula: &Formula) -> Models {
    Models::new(formula)
}

/// Returns some theory-consistent model of `formula`.
pub fn find_model(formula: &Formula) -> Option<Model> {
    all_models(formula).next()
}

/// Returns true if `formula` has a theory-consistent model.
pub fn satisfiable(formula: &Formula) -> bool {
    let mut models = all_models(formula);
    let result = models.next().is_some();
    log::debug!(
        target: LOG_ORACLE,
        "satisfiable: {} after {} rejections",
        result,
        models.rejected()
    );
    result
}

/// Returns true if the conjunction of `formulas` is satisfiable.
pub fn consistent(formulas: &[Formula]) -> bool {
    satisfiable(&Formula::conjunction(formulas.iter().cloned()))
}

/// Returns true if every theory-consistent model of `premise` satisfies `conclusion`.
pub fn entails(premise: &Formula, conclusion: &Formula) -> bool {
    !satisfiable(&Formula::and(
        premise.clone(),
        Formula::not(conclusion.clone()).to_nnf(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{formula::Term, FormulaParams};
    use proptest::prelude::*;

    fn a() -> Formula {
        Formula::atom("a")
    }

    fn b() -> Formula {
        Formula::atom("b")
    }

    #[test]
    fn test_theory_filter() {
        assert!(!satisfiable(&(Formula::good(a()) & Formula::bad(a()))));
        assert!(satisfiable(&(Formula::good(a()) & Formula::bad(b()))));
        assert!(entails(&Formula::causes(a(), b()), &a()));
        assert!(entails(&Formula::causes(a(), b()), &b()));
        assert!(entails(&Formula::causes(a() & b(), Formula::atom("c")), &a()));
        assert!(!satisfiable(&Formula::conjunction(vec![
            Formula::better(a(), b()),
            Formula::better(b(), Formula::atom("c")),
            !Formula::better(a(), Formula::atom("c")),
        ])));
        assert!(!entails(&Formula::causes(a(), b()), &Formula::causes(b(), a())));
        assert!(entails(
            &Formula::causes(a(), b()),
            &!Formula::causes(b(), a())
        ));

        let u = Term::utility(a());
        assert!(!satisfiable(&!Formula::eq(u.clone(), u.clone())));
        assert!(!consistent(&[
            Formula::gt(u.clone(), 0),
            Formula::gt(0, u.clone())
        ]));
        assert!(consistent(&[]), "the empty conjunction is valid");
    }

    #[test]
    fn test_all_models() {
        let f = Formula::implies(Formula::good(a()), a());
        let models: Vec<_> = all_models(&f).collect();
        assert_eq!(models.len(), 3);
        for model in &models {
            assert!(model.holds(&f));
            assert_eq!(model.len(), 2);
        }

        let contradiction = a() & !a();
        assert_eq!(all_models(&contradiction).count(), 0);
        assert_eq!(find_model(&contradiction), None);

        let mut models = all_models(&(Formula::good(a()) & Formula::bad(a())));
        assert_eq!(models.next(), None);
        assert_eq!(models.rejected(), 1);
    }

    #[test]
    fn test_model_display() {
        let model: Model = [(a(), true), (Formula::good(b()), false)]
            .into_iter()
            .collect();
        assert_eq!(model.to_string(), "{Atom('a'), Not(Good(Atom('b')))}");
        assert_eq!(model.value(&a()), Some(true));
        assert_eq!(model.value(&b()), None);
    }

    proptest! {
        #[test]
        fn proptest_models_are_sound(
            f in any_with::<Formula>(FormulaParams::default().with_predicates(true)),
        ) {
            for model in all_models(&f) {
                prop_assert_eq!(f.evaluate(&model), Some(true), "model {} of {}", model, f);
                prop_assert!(theory::consistent(&model));
            }
        }

        #[test]
        fn proptest_entailment_is_reflexive(
            f in any_with::<Formula>(FormulaParams::default()),
        ) {
            prop_assert!(entails(&f, &f));
        }
    }
}
