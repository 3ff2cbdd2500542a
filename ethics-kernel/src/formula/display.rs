// Copyright (c) The ethics-kernel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::formula::{Formula, Term};
use std::fmt;

/// The canonical text form. This is also the key under which predicates are abstracted, so it
/// must stay injective.
impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Atom(name) => write_atom_name(name, f),
            Self::Bool(value) => write!(f, "Bool({})", value),
            Self::Not(inner) => write!(f, "Not({})", inner),
            Self::And(lhs, rhs) => write!(f, "And({}, {})", lhs, rhs),
            Self::Or(lhs, rhs) => write!(f, "Or({}, {})", lhs, rhs),
            Self::Impl(lhs, rhs) => write!(f, "Impl({}, {})", lhs, rhs),
            Self::BiImpl(lhs, rhs) => write!(f, "BiImpl({}, {})", lhs, rhs),
            Self::Unary(predicate, argument) => write!(f, "{}({})", predicate, argument),
            Self::Binary(predicate, lhs, rhs) => write!(f, "{}({}, {})", predicate, lhs, rhs),
            Self::Compare(comparison, lhs, rhs) => write!(f, "{}({}, {})", comparison, lhs, rhs),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{}", value),
            Self::Utility(formula) => write!(f, "U({})", formula),
            Self::Add(lhs, rhs) => write!(f, "Add({}, {})", lhs, rhs),
            Self::Sub(lhs, rhs) => write!(f, "Sub({}, {})", lhs, rhs),
            Self::Minus(inner) => write!(f, "Minus({})", inner),
        }
    }
}

fn write_atom_name(name: &str, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str("Atom('")?;
    for ch in name.chars() {
        if ch == '\'' || ch == '\\' {
            f.write_str("\\")?;
        }
        write!(f, "{}", ch)?;
    }
    f.write_str("')")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_text() {
        let a = Formula::atom("a");
        let b = Formula::atom("b");
        assert_eq!(a.to_string(), "Atom('a')");
        assert_eq!(Formula::Bool(false).to_string(), "Bool(false)");
        assert_eq!(
            Formula::causes(a.clone(), !b.clone()).to_string(),
            "Causes(Atom('a'), Not(Atom('b')))"
        );
        assert_eq!(
            Formula::intended(a.clone() & b.clone()).to_string(),
            "I(And(Atom('a'), Atom('b')))"
        );
        assert_eq!(
            Formula::geq(Term::utility(Formula::atom("r")), 0).to_string(),
            "GEq(U(Atom('r')), 0)"
        );
        assert_eq!(
            Formula::gt(Term::int(-3), -Term::int(4)).to_string(),
            "Gt(-3, Minus(4))"
        );
        assert_eq!(
            Formula::atom("it's \\ odd").to_string(),
            "Atom('it\\'s \\\\ odd')"
        );
    }
}
