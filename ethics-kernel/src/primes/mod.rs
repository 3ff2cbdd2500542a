// Copyright (c) The ethics-kernel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prime implicants and prime implicates.
//!
//! The complete models of a formula's skeleton are the target sets of a first hitting-set
//! computation, which yields the prime implicates. Their minimal hitting sets in turn are the prime
//! implicants.

mod config;
mod structure;

pub use config::*;
pub use structure::*;

use crate::{
    abstraction::Abstraction,
    formula::Formula,
    hitting_set::HittingSetEngine,
    misc::log::targets::PRIMES as LOG_PRIMES,
    oracle::{model_count, BooleanModels},
};
use std::collections::BTreeSet;

/// Compiles the prime implicants and prime implicates of a formula.
///
/// Compilation works on the Boolean skeleton alone: the domain theory is not consulted.
#[derive(Clone, Debug)]
pub struct PrimeCompiler {
    abstraction: Abstraction,
    config: CompileConfig,
}

impl PrimeCompiler {
    pub fn new(formula: &Formula) -> Self {
        Self::with_config(formula, CompileConfig::default())
    }

    pub fn with_config(formula: &Formula, config: CompileConfig) -> Self {
        Self {
            abstraction: Abstraction::new(formula),
            config,
        }
    }

    #[inline]
    pub fn abstraction(&self) -> &Abstraction {
        &self.abstraction
    }

    #[inline]
    pub fn config(&self) -> CompileConfig {
        self.config
    }

    /// Computes the prime structures over skeleton literals.
    ///
    /// Unsatisfiable and valid skeletons have neither implicants nor implicates.
    pub fn compile_structures(&self) -> PrimeStructures {
        let skeleton = self.abstraction.skeleton();
        let vars = self.abstraction.vars();

        let count = model_count(skeleton, vars.len());
        let total = 2_u128.checked_pow(vars.len() as u32).unwrap_or(u128::MAX);
        let validity = Validity::from_count(count, total);
        if validity != Validity::Contingent {
            log::debug!(
                target: LOG_PRIMES,
                "{} of {} assignments satisfy the skeleton, nothing to compile",
                count,
                total
            );
            return PrimeStructures {
                validity,
                ..PrimeStructures::default()
            };
        }

        let negated = self.config.negation_heuristic && count > total / 2;
        log::debug!(
            target: LOG_PRIMES,
            "{} of {} assignments satisfy the skeleton, enumerating {}",
            count,
            total,
            if negated { "its negation" } else { "it" }
        );

        let target_skeleton = if negated {
            skeleton.negated()
        } else {
            skeleton.clone()
        };
        let models = BooleanModels::new(&target_skeleton, vars.iter().cloned()).map(|model| {
            model
                .into_iter()
                .map(|(var, value)| Literal::new(var, value))
                .collect::<Vec<_>>()
        });

        let implicates = self.non_complementary(models, Structure::Implicate);
        let implicants = self.non_complementary(
            implicates.iter().map(|implicate| implicate.literals().to_vec()),
            Structure::Implicant,
        );

        let structures = if negated {
            // implicants(f) = flip(implicates(¬f)), implicates(f) = flip(implicants(¬f))
            PrimeStructures {
                implicants: implicates.iter().map(PrimeStructure::flipped).collect(),
                implicates: implicants.iter().map(PrimeStructure::flipped).collect(),
                validity,
            }
        } else {
            PrimeStructures {
                implicants,
                implicates,
                validity,
            }
        }
        .normalize();

        log::debug!(
            target: LOG_PRIMES,
            "{} prime implicants, {} prime implicates",
            structures.implicants.len(),
            structures.implicates.len()
        );
        structures
    }

    /// Computes the prime structures and maps them back onto the original formula.
    ///
    /// Empty collections are ambiguous on their own: check [`Primes::validity`] to tell an
    /// unsatisfiable formula from a valid one.
    pub fn compile(&self) -> Primes {
        let structures = self.compile_structures();
        let map = self.abstraction.map();
        Primes {
            implicants: structures
                .implicants
                .iter()
                .map(|implicant| implicant.back_map(map))
                .collect(),
            implicates: structures
                .implicates
                .iter()
                .map(|implicate| implicate.back_map(map))
                .collect(),
            validity: structures.validity,
        }
    }

    // ---
    // Helper methods
    // ---

    /// Minimal hitting sets of `targets` that don't contain a complementary pair.
    fn non_complementary(
        &self,
        targets: impl IntoIterator<Item = Vec<Literal>>,
        kind: Structure,
    ) -> Vec<PrimeStructure> {
        let sets: Vec<BTreeSet<Literal>> = HittingSetEngine::new(targets)
            .with_pruning(self.config.prune_targets)
            .solve();
        let total = sets.len();
        let structures: Vec<_> = sets
            .into_iter()
            .map(|set| PrimeStructure::new(kind, set))
            .filter(|structure| !structure.is_complementary())
            .collect();
        log::trace!(
            target: LOG_PRIMES,
            "{:?}: dropped {} complementary of {} hitting sets",
            kind,
            total - structures.len(),
            total
        );
        structures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{entails, formula::Term, FormulaParams};
    use proptest::{prelude::*, test_runner::TestCaseError};

    fn a() -> Formula {
        Formula::atom("a")
    }

    fn b() -> Formula {
        Formula::atom("b")
    }

    fn c() -> Formula {
        Formula::atom("c")
    }

    fn compile_both(f: &Formula) -> (Primes, Primes) {
        let with = PrimeCompiler::new(f).compile();
        let without = PrimeCompiler::with_config(
            f,
            CompileConfig::default().with_negation_heuristic(false),
        )
        .compile();
        (with, without)
    }

    #[test]
    fn test_paper_formula() {
        let f = (((a() & b()) | (a() & !b())) & c()) | (b() & c());
        let (primes, without) = compile_both(&f);
        assert_eq!(primes.implicants, vec![vec![a(), c()], vec![b(), c()]]);
        assert_eq!(primes.implicates, vec![vec![c()], vec![a(), b()]]);
        assert_eq!(primes, without);
    }

    #[test]
    fn test_extremes() {
        let contradiction = PrimeCompiler::new(&(a() & !a())).compile();
        assert!(contradiction.implicants.is_empty() && contradiction.implicates.is_empty());
        assert_eq!(contradiction.validity, Validity::Unsatisfiable);

        let tautology = PrimeCompiler::new(&(a() | !a())).compile();
        assert!(tautology.implicants.is_empty() && tautology.implicates.is_empty());
        assert_eq!(tautology.validity, Validity::Valid);
        assert_ne!(contradiction, tautology, "validity tells the extremes apart");

        let structures = PrimeCompiler::new(&Formula::Bool(true)).compile_structures();
        assert!(structures.is_empty());
        assert_eq!(structures.validity, Validity::Valid);

        let f = a() | b();
        assert_eq!(PrimeCompiler::new(&f).compile().validity, Validity::Contingent);
    }

    #[test]
    fn test_biimpl() {
        let (primes, without) = compile_both(&Formula::iff(a(), b()));
        assert_eq!(primes.implicants, vec![vec![!a(), !b()], vec![a(), b()]]);
        assert_eq!(primes.implicates, vec![vec![!a(), b()], vec![a(), !b()]]);
        assert_eq!(primes, without);
    }

    #[test]
    fn test_negation_path_swaps_and_flips() {
        // Three of four assignments satisfy a ∨ b, so the negation is enumerated.
        let f = a() | b();
        let compiler = PrimeCompiler::new(&f);
        let structures = compiler.compile_structures();
        assert!(structures
            .implicants
            .iter()
            .all(|s| s.kind() == Structure::Implicant));
        assert!(structures
            .implicates
            .iter()
            .all(|s| s.kind() == Structure::Implicate));

        let (primes, without) = compile_both(&f);
        assert_eq!(primes.implicants, vec![vec![a()], vec![b()]]);
        assert_eq!(primes.implicates, vec![vec![a(), b()]]);
        assert_eq!(primes, without);

        let (primes, without) = compile_both(&Formula::implies(a(), b()));
        assert_eq!(primes.implicants, vec![vec![!a()], vec![b()]]);
        assert_eq!(primes.implicates, vec![vec![!a(), b()]]);
        assert_eq!(primes, without);

        let (primes, without) = compile_both(&(a() | (b() & c())));
        assert_eq!(primes.implicants, vec![vec![a()], vec![b(), c()]]);
        assert_eq!(primes.implicates, vec![vec![a(), b()], vec![a(), c()]]);
        assert_eq!(primes, without);
    }

    #[test]
    fn test_predicates_back_map() {
        let good = Formula::good(a());
        let causes = Formula::causes(a(), b());
        let f = Formula::implies(good.clone(), causes.clone());
        let primes = PrimeCompiler::new(&f).compile();
        assert_eq!(primes.implicants, vec![vec![!good.clone()], vec![causes.clone()]]);
        assert_eq!(primes.implicates, vec![vec![!good, causes]]);
    }

    #[test]
    fn test_double_effect() {
        let d1 = Formula::atom("d1");
        let not_d2 = !Formula::atom("d2");
        let refrain = Formula::atom("refrain");
        let intended_good =
            |f: &Formula| Formula::intended(f.clone()) & Formula::good(f.clone());
        let intended_only_good =
            |f: &Formula| Formula::implies(Formula::intended(f.clone()), Formula::good(f.clone()));
        let no_bad_means = |x: &Formula, y: &Formula| {
            !(Formula::causes(x.clone(), y.clone())
                & (Formula::bad(x.clone()) & Formula::good(y.clone())))
        };

        let f = Formula::conjunction(vec![
            Formula::conjunction(vec![
                Formula::geq(Term::utility(refrain), 0),
                intended_good(&d1) | intended_good(&not_d2),
                intended_only_good(&d1) & intended_only_good(&not_d2),
            ]) & Formula::conjunction(vec![
                no_bad_means(&d1, &d1),
                no_bad_means(&d1, &not_d2),
                no_bad_means(&not_d2, &d1),
                no_bad_means(&not_d2, &not_d2),
            ]),
            Formula::gt(Term::utility(d1.clone() & not_d2.clone()), 0),
        ]);

        let (primes, without) = compile_both(&f);
        assert_eq!(primes.implicants.len(), 22);
        assert_eq!(primes.implicates.len(), 28);
        assert_eq!(primes, without);

        // The utility conjunct is a unit implicate, so every implicant contains it.
        let geq = Formula::geq(Term::utility(Formula::atom("refrain")), 0);
        assert!(primes
            .implicants
            .iter()
            .all(|implicant| implicant.contains(&geq)));
        assert!(primes.implicates.contains(&vec![geq]));
    }

    fn check_minimal_implicants(f: &Formula, primes: &Primes) -> Result<(), TestCaseError> {
        for implicant in &primes.implicants {
            let term = Formula::conjunction(implicant.iter().cloned());
            prop_assert!(entails(&term, f), "{} does not entail {}", term, f);
            for ix in 0..implicant.len() {
                let mut smaller = implicant.clone();
                smaller.remove(ix);
                let term = Formula::conjunction(smaller);
                prop_assert!(!entails(&term, f), "{} is not minimal for {}", term, f);
            }
        }
        Ok(())
    }

    fn check_minimal_implicates(f: &Formula, primes: &Primes) -> Result<(), TestCaseError> {
        for clause in primes.implicate_clauses() {
            prop_assert!(entails(f, &clause), "{} does not entail {}", f, clause);
        }
        for implicate in &primes.implicates {
            for ix in 0..implicate.len() {
                let mut smaller = implicate.clone();
                smaller.remove(ix);
                let clause = Formula::disjunction(smaller).unwrap_or(Formula::Bool(false));
                prop_assert!(!entails(f, &clause), "{} is not minimal for {}", clause, f);
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn proptest_primes_sound_and_minimal(
            f in any_with::<Formula>(FormulaParams::default()),
        ) {
            let (primes, without) = compile_both(&f);
            prop_assert_eq!(&primes, &without, "the negation heuristic changes nothing");

            let compiler = PrimeCompiler::new(&f);
            let structures = compiler.compile_structures();
            let vars = compiler.abstraction().vars().len();
            let count = model_count(compiler.abstraction().skeleton(), vars);
            if count != 0 && count != 1 << vars {
                prop_assert!(!structures.implicants.is_empty());
                prop_assert!(!structures.implicates.is_empty());
            }

            check_minimal_implicants(&f, &primes)?;
            check_minimal_implicates(&f, &primes)?;
        }

        #[test]
        fn proptest_pruning_changes_nothing(
            f in any_with::<Formula>(FormulaParams::default()),
        ) {
            let pruned = PrimeCompiler::new(&f).compile_structures();
            let unpruned = PrimeCompiler::with_config(
                &f,
                CompileConfig::default().with_prune_targets(false),
            )
            .compile_structures();
            prop_assert_eq!(pruned, unpruned);
        }
    }
}
