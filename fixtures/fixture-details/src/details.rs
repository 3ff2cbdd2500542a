// Copyright (c) The ethics-kernel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use ethics_kernel::{formula::Term, Formula};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// A named formula whose prime structures are checked in and compared against.
#[derive(Clone, Debug)]
pub struct FixtureDetails {
    name: &'static str,
    formula: Formula,
    expected_counts: Option<(usize, usize)>,
}

impl FixtureDetails {
    fn new(name: &'static str, formula: Formula) -> Self {
        Self {
            name,
            formula,
            expected_counts: None,
        }
    }

    fn with_expected_counts(mut self, implicants: usize, implicates: usize) -> Self {
        self.expected_counts = Some((implicants, implicates));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    /// The number of prime implicants and implicates the formula is known to have.
    pub fn expected_counts(&self) -> Option<(usize, usize)> {
        self.expected_counts
    }

    pub fn all() -> &'static BTreeMap<&'static str, FixtureDetails> {
        &*ALL_DETAILS
    }
}

static ALL_DETAILS: Lazy<BTreeMap<&'static str, FixtureDetails>> = Lazy::new(|| {
    let a = Formula::atom("a");
    let b = Formula::atom("b");
    let c = Formula::atom("c");

    let details = vec![
        FixtureDetails::new(
            "paper",
            (((a.clone() & b.clone()) | (a.clone() & !b.clone())) & c.clone())
                | (b.clone() & c.clone()),
        )
        .with_expected_counts(2, 2),
        FixtureDetails::new("biimpl", Formula::iff(a.clone(), b.clone()))
            .with_expected_counts(2, 2),
        FixtureDetails::new("contradiction", a.clone() & !a.clone()).with_expected_counts(0, 0),
        FixtureDetails::new("disjunction", a.clone() | b.clone()).with_expected_counts(2, 1),
        FixtureDetails::new("good-and-bad", Formula::good(a.clone()) & Formula::bad(a))
            .with_expected_counts(1, 2),
        FixtureDetails::new("double-effect", double_effect()).with_expected_counts(22, 28),
    ];

    details
        .into_iter()
        .map(|details| (details.name, details))
        .collect()
});

/// The doctrine of double effect, instantiated for a choice between an action `d1` and the
/// omission of `d2`.
pub fn double_effect() -> Formula {
    let d1 = Formula::atom("d1");
    let not_d2 = !Formula::atom("d2");

    let intended_good = |f: &Formula| Formula::intended(f.clone()) & Formula::good(f.clone());
    let intended_only_good =
        |f: &Formula| Formula::implies(Formula::intended(f.clone()), Formula::good(f.clone()));
    let no_bad_means = |x: &Formula, y: &Formula| {
        !(Formula::causes(x.clone(), y.clone())
            & (Formula::bad(x.clone()) & Formula::good(y.clone())))
    };

    Formula::conjunction(vec![
        Formula::conjunction(vec![
            Formula::geq(Term::utility(Formula::atom("refrain")), 0),
            intended_good(&d1) | intended_good(&not_d2),
            intended_only_good(&d1) & intended_only_good(&not_d2),
        ]) & Formula::conjunction(vec![
            no_bad_means(&d1, &d1),
            no_bad_means(&d1, &not_d2),
            no_bad_means(&not_d2, &d1),
            no_bad_means(&not_d2, &not_d2),
        ]),
        Formula::gt(Term::utility(d1.clone() & not_d2), 0),
    ])
}
