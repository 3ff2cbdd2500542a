// Copyright (c) The ethics-kernel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::formula::{BinaryPredicate, Comparison, Formula, Term, UnaryPredicate};
use proptest::prelude::*;

/// Parameters for generating arbitrary [`Formula`]s.
///
/// The oracle and the prime compiler are exponential in the number of distinct atoms and
/// predicates, so generated formulas are kept small by default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormulaParams {
    /// Number of distinct atom names, starting at `a`.
    pub atom_count: usize,
    /// Maximum nesting depth.
    pub depth: u32,
    /// Desired number of nodes.
    pub size: u32,
    /// Whether to generate predicates and comparisons as well as connectives.
    pub predicates: bool,
}

impl FormulaParams {
    pub fn with_atom_count(mut self, atom_count: usize) -> Self {
        self.atom_count = atom_count;
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_predicates(mut self, predicates: bool) -> Self {
        self.predicates = predicates;
        self
    }

    /// The atom names formulas are generated over.
    pub fn atom_names(&self) -> Vec<String> {
        (0..self.atom_count.max(1))
            .map(|ix| match ix {
                0..=25 => ((b'a' + ix as u8) as char).to_string(),
                _ => format!("a{}", ix),
            })
            .collect()
    }
}

impl Default for FormulaParams {
    fn default() -> Self {
        Self {
            atom_count: 3,
            depth: 3,
            size: 12,
            predicates: false,
        }
    }
}

impl Arbitrary for Formula {
    type Parameters = FormulaParams;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
        let atom = prop::sample::select(params.atom_names()).prop_map(Formula::Atom);
        let leaf = prop_oneof![
            8 => atom,
            1 => any::<bool>().prop_map(Formula::Bool),
        ];

        let predicates = params.predicates;
        leaf.prop_recursive(params.depth, params.size, 2, move |inner| {
            let connectives = prop_oneof![
                inner.clone().prop_map(Formula::not),
                (inner.clone(), inner.clone()).prop_map(|(lhs, rhs)| Formula::and(lhs, rhs)),
                (inner.clone(), inner.clone()).prop_map(|(lhs, rhs)| Formula::or(lhs, rhs)),
                (inner.clone(), inner.clone()).prop_map(|(lhs, rhs)| Formula::implies(lhs, rhs)),
                (inner.clone(), inner.clone()).prop_map(|(lhs, rhs)| Formula::iff(lhs, rhs)),
            ];
            if !predicates {
                return connectives.boxed();
            }

            let term = term_strategy(inner.clone());
            prop_oneof![
                4 => connectives,
                1 => (any::<UnaryPredicate>(), inner.clone())
                    .prop_map(|(predicate, argument)| Formula::unary(predicate, argument)),
                1 => (any::<BinaryPredicate>(), inner.clone(), inner)
                    .prop_map(|(predicate, lhs, rhs)| Formula::binary(predicate, lhs, rhs)),
                1 => (any::<Comparison>(), term.clone(), term)
                    .prop_map(|(comparison, lhs, rhs)| Formula::Compare(comparison, lhs, rhs)),
            ]
            .boxed()
        })
        .boxed()
    }
}

impl Arbitrary for Term {
    type Parameters = FormulaParams;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
        term_strategy(any_with::<Formula>(params))
    }
}

fn term_strategy(formula: BoxedStrategy<Formula>) -> BoxedStrategy<Term> {
    let leaf = prop_oneof![
        (-2_i64..3).prop_map(Term::Int),
        formula.prop_map(Term::utility),
    ];
    leaf.prop_recursive(2, 4, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(lhs, rhs)| lhs + rhs),
            (inner.clone(), inner.clone()).prop_map(|(lhs, rhs)| lhs - rhs),
            inner.prop_map(|term| -term),
        ]
    })
    .boxed()
}

impl Arbitrary for UnaryPredicate {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop::sample::select(UnaryPredicate::ALL.to_vec()).boxed()
    }
}

impl Arbitrary for BinaryPredicate {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop::sample::select(BinaryPredicate::ALL.to_vec()).boxed()
    }
}

impl Arbitrary for Comparison {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop::sample::select(Comparison::ALL.to_vec()).boxed()
    }
}
