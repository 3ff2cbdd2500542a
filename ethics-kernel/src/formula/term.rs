// Copyright (c) The ethics-kernel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::formula::Formula;
use std::{
    collections::BTreeSet,
    ops::{Add, Neg, Sub},
};

/// An arithmetic term of the utility sublanguage.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    Int(i64),
    /// The utility of a formula, written `U(..)`.
    Utility(Box<Formula>),
    Add(Box<Term>, Box<Term>),
    Sub(Box<Term>, Box<Term>),
    Minus(Box<Term>),
}

impl Term {
    #[inline]
    pub fn int(value: i64) -> Self {
        Self::Int(value)
    }

    #[inline]
    pub fn utility(formula: Formula) -> Self {
        Self::Utility(Box::new(formula))
    }

    pub(crate) fn collect_atoms<'a>(&'a self, atoms: &mut BTreeSet<&'a str>) {
        match self {
            Self::Int(_) => {}
            Self::Utility(formula) => formula.collect_atoms(atoms),
            Self::Add(lhs, rhs) | Self::Sub(lhs, rhs) => {
                lhs.collect_atoms(atoms);
                rhs.collect_atoms(atoms);
            }
            Self::Minus(inner) => inner.collect_atoms(atoms),
        }
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl Add for Term {
    type Output = Term;

    fn add(self, rhs: Self) -> Self::Output {
        Term::Add(Box::new(self), Box::new(rhs))
    }
}

impl Sub for Term {
    type Output = Term;

    fn sub(self, rhs: Self) -> Self::Output {
        Term::Sub(Box::new(self), Box::new(rhs))
    }
}

impl Neg for Term {
    type Output = Term;

    fn neg(self) -> Self::Output {
        Term::Minus(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operators() {
        let u = Term::utility(Formula::atom("a"));
        let t = -(u.clone() + Term::int(2)) - Term::int(1);
        assert_eq!(
            t,
            Term::Sub(
                Box::new(Term::Minus(Box::new(Term::Add(
                    Box::new(u),
                    Box::new(Term::Int(2))
                )))),
                Box::new(Term::Int(1)),
            )
        );
        assert_eq!(t.to_string(), "Sub(Minus(Add(U(Atom('a')), 2)), 1)");
    }
}
