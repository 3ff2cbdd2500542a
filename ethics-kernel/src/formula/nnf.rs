// Copyright (c) The ethics-kernel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::formula::Formula;

impl Formula {
    /// Rewrites this formula into negation normal form.
    ///
    /// The result contains no `Impl` or `BiImpl`, and every `Not` wraps an atom, a predicate or a
    /// comparison. Predicate arguments are left as they are.
    pub fn to_nnf(&self) -> Formula {
        match self {
            Self::Atom(_)
            | Self::Bool(_)
            | Self::Unary(..)
            | Self::Binary(..)
            | Self::Compare(..) => self.clone(),
            Self::Not(inner) => inner.negated_nnf(),
            Self::And(lhs, rhs) => Formula::and(lhs.to_nnf(), rhs.to_nnf()),
            Self::Or(lhs, rhs) => Formula::or(lhs.to_nnf(), rhs.to_nnf()),
            Self::Impl(lhs, rhs) => Formula::or(lhs.negated_nnf(), rhs.to_nnf()),
            Self::BiImpl(lhs, rhs) => biimpl_expansion(lhs, rhs).to_nnf(),
        }
    }

    /// Converts this formula to conjunctive normal form by distributing disjunctions over the
    /// negation normal form.
    ///
    /// This can blow up exponentially.
    pub fn to_cnf(&self) -> Formula {
        self.to_nnf().cnf_impl()
    }

    /// Returns the clauses of the conjunctive normal form, each a list of disjuncts.
    pub fn clauses(&self) -> Vec<Vec<Formula>> {
        let cnf = self.to_cnf();
        cnf.conjuncts()
            .into_iter()
            .map(|clause| clause.disjuncts().into_iter().cloned().collect())
            .collect()
    }

    // ---
    // Helper methods
    // ---

    /// The NNF of `Not(self)`.
    fn negated_nnf(&self) -> Formula {
        match self {
            Self::Bool(value) => Self::Bool(!value),
            Self::Not(inner) => inner.to_nnf(),
            Self::And(lhs, rhs) => Formula::or(lhs.negated_nnf(), rhs.negated_nnf()),
            Self::Or(lhs, rhs) => Formula::and(lhs.negated_nnf(), rhs.negated_nnf()),
            Self::Impl(lhs, rhs) => Formula::and(lhs.to_nnf(), rhs.negated_nnf()),
            Self::BiImpl(lhs, rhs) => biimpl_expansion(lhs, rhs).negated_nnf(),
            Self::Atom(_) | Self::Unary(..) | Self::Binary(..) | Self::Compare(..) => {
                Formula::not(self.clone())
            }
        }
    }

    // Expects NNF input.
    fn cnf_impl(&self) -> Formula {
        match self {
            Self::And(lhs, rhs) => Formula::and(lhs.cnf_impl(), rhs.cnf_impl()),
            Self::Or(lhs, rhs) => distribute(lhs.cnf_impl(), rhs.cnf_impl()),
            other => other.clone(),
        }
    }
}

/// `a <-> b` as `(a & b) | (!a & !b)`.
fn biimpl_expansion(lhs: &Formula, rhs: &Formula) -> Formula {
    Formula::or(
        Formula::and(lhs.clone(), rhs.clone()),
        Formula::and(Formula::not(lhs.clone()), Formula::not(rhs.clone())),
    )
}

fn distribute(lhs: Formula, rhs: Formula) -> Formula {
    match (lhs, rhs) {
        (Formula::And(a, b), rhs) => {
            Formula::and(distribute(*a, rhs.clone()), distribute(*b, rhs))
        }
        (lhs, Formula::And(a, b)) => {
            Formula::and(distribute(lhs.clone(), *a), distribute(lhs, *b))
        }
        (lhs, rhs) => Formula::or(lhs, rhs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormulaParams;
    use proptest::prelude::*;

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
    fn test_nnf_rules() {
        assert_eq!((!!a()).to_nnf(), a());
        assert_eq!((!(a() & b())).to_nnf(), !a() | !b());
        assert_eq!((!(a() | b())).to_nnf(), !a() & !b());
        assert_eq!(Formula::implies(a(), b()).to_nnf(), !a() | b());
        assert_eq!(
            (!Formula::implies(a(), b())).to_nnf(),
            a() & !b(),
            "negated implication"
        );
        assert_eq!(
            Formula::iff(a(), b()).to_nnf(),
            (a() & b()) | (!a() & !b())
        );
        assert_eq!((!Formula::Bool(true)).to_nnf(), Formula::Bool(false));

        // Predicate arguments are opaque.
        let good = Formula::good(!!a());
        assert_eq!((!!good.clone()).to_nnf(), good.clone());
        assert_eq!((!good.clone()).to_nnf(), !good);
    }

    #[test]
    fn test_cnf() {
        let f = a() | (b() & c());
        assert_eq!(f.to_cnf(), (a() | b()) & (a() | c()));
        assert_eq!(f.clauses(), vec![vec![a(), b()], vec![a(), c()]]);

        let g = Formula::implies(a(), b() & !c());
        assert_eq!(g.clauses(), vec![vec![!a(), b()], vec![!a(), !c()]]);

        assert_eq!(a().clauses(), vec![vec![a()]]);
    }

    fn check_nnf_structure(f: &Formula) {
        match f {
            Formula::Not(inner) => assert!(
                inner.is_literal() && !matches!(**inner, Formula::Not(_)),
                "negation only wraps atoms and predicates: {}",
                f
            ),
            Formula::Impl(..) | Formula::BiImpl(..) => {
                panic!("implication survived NNF: {}", f)
            }
            Formula::And(lhs, rhs) | Formula::Or(lhs, rhs) => {
                check_nnf_structure(lhs);
                check_nnf_structure(rhs);
            }
            _ => {}
        }
    }

    proptest! {
        #[test]
        fn proptest_nnf_idempotent(
            f in any_with::<Formula>(FormulaParams::default().with_predicates(true)),
        ) {
            let nnf = f.to_nnf();
            prop_assert_eq!(nnf.to_nnf(), nnf.clone());
            check_nnf_structure(&nnf);
        }

        #[test]
        fn proptest_cnf_clauses_are_literals(
            f in any_with::<Formula>(FormulaParams::default().with_size(8)),
        ) {
            for clause in f.clauses() {
                for literal in clause {
                    prop_assert!(
                        literal.is_literal() || matches!(literal, Formula::Bool(_)),
                        "clause member {} is not a literal",
                        literal
                    );
                }
            }
        }
    }
}
