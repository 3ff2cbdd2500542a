// Copyright (c) The ethics-kernel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    abstraction::{AbstractionMap, Var},
    formula::Formula,
};
use itertools::{Itertools, Position};
use std::{fmt, ops::Not};

/// A signed skeleton variable.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    pub var: Var,
    pub polarity: bool,
}

impl Literal {
    #[inline]
    pub fn new(var: Var, polarity: bool) -> Self {
        Self { var, polarity }
    }

    pub fn back_map(&self, map: &AbstractionMap) -> Formula {
        map.back_map_literal(&self.var, self.polarity)
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        Literal::new(self.var, !self.polarity)
    }
}

impl<'a> Not for &'a Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        Literal::new(self.var.clone(), !self.polarity)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.polarity {
            write!(f, "{}", self.var)
        } else {
            write!(f, "¬{}", self.var)
        }
    }
}

/// Which side of the duality a [`PrimeStructure`] is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Structure {
    /// A minimal conjunction of literals that entails the formula.
    Implicant,
    /// A minimal disjunction of literals that the formula entails.
    Implicate,
}

/// A prime implicant or implicate: a sorted, duplicate-free set of literals.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrimeStructure {
    kind: Structure,
    literals: Vec<Literal>,
}

impl PrimeStructure {
    pub fn new(kind: Structure, literals: impl IntoIterator<Item = Literal>) -> Self {
        let mut literals: Vec<_> = literals.into_iter().collect();
        literals.sort_unstable();
        literals.dedup();
        Self { kind, literals }
    }

    #[inline]
    pub fn kind(&self) -> Structure {
        self.kind
    }

    #[inline]
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Returns true if some variable occurs with both polarities.
    pub fn is_complementary(&self) -> bool {
        // Literals are sorted by variable, so complementary pairs are adjacent.
        self.literals
            .iter()
            .tuple_windows()
            .any(|(a, b)| a.var == b.var && a.polarity != b.polarity)
    }

    /// Returns the dual structure of the negated formula: every literal flipped.
    pub fn flipped(&self) -> Self {
        let kind = match self.kind {
            Structure::Implicant => Structure::Implicate,
            Structure::Implicate => Structure::Implicant,
        };
        Self::new(kind, self.literals.iter().map(|literal| !literal))
    }

    pub fn back_map(&self, map: &AbstractionMap) -> Vec<Formula> {
        self.literals
            .iter()
            .map(|literal| literal.back_map(map))
            .collect()
    }
}

impl fmt::Display for PrimeStructure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let separator = match self.kind {
            Structure::Implicant => " ∧ ",
            Structure::Implicate => " ∨ ",
        };
        write!(f, "[")?;
        for literal in self.literals.iter().with_position() {
            match literal {
                Position::First(literal) | Position::Middle(literal) => {
                    write!(f, "{}{}", literal, separator)?;
                }
                Position::Last(literal) | Position::Only(literal) => {
                    write!(f, "{}", literal)?;
                }
            }
        }
        write!(f, "]")
    }
}

/// How many assignments of the Boolean skeleton satisfy it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Validity {
    /// No assignment does.
    Unsatisfiable,
    /// Some assignments do and some don't.
    #[default]
    Contingent,
    /// Every assignment does.
    Valid,
}

impl Validity {
    pub(super) fn from_count(count: u128, total: u128) -> Self {
        if count == 0 {
            Validity::Unsatisfiable
        } else if count == total {
            Validity::Valid
        } else {
            Validity::Contingent
        }
    }
}

/// Both collections of prime structures of a formula, over skeleton literals.
///
/// Unsatisfiable and valid skeletons both have empty collections; `validity` tells them apart.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrimeStructures {
    pub implicants: Vec<PrimeStructure>,
    pub implicates: Vec<PrimeStructure>,
    pub validity: Validity,
}

impl PrimeStructures {
    /// Sorts both collections by size and then content, and removes duplicates.
    pub(super) fn normalize(mut self) -> Self {
        for structures in [&mut self.implicants, &mut self.implicates] {
            structures.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
            structures.dedup();
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.implicants.is_empty() && self.implicates.is_empty()
    }
}

/// Prime implicants and implicates, mapped back onto the original atoms and predicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Primes {
    pub implicants: Vec<Vec<Formula>>,
    pub implicates: Vec<Vec<Formula>>,
    pub validity: Validity,
}

impl Primes {
    /// Each implicant as a conjunction.
    pub fn implicant_terms(&self) -> Vec<Formula> {
        self.implicants
            .iter()
            .map(|implicant| Formula::conjunction(implicant.iter().cloned()))
            .collect()
    }

    /// Each implicate as a disjunction. The empty clause is `Bool(false)`.
    pub fn implicate_clauses(&self) -> Vec<Formula> {
        self.implicates
            .iter()
            .map(|implicate| {
                Formula::disjunction(implicate.iter().cloned()).unwrap_or(Formula::Bool(false))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(name: &str, polarity: bool) -> Literal {
        Literal::new(Var::Original(name.to_owned()), polarity)
    }

    #[test]
    fn test_prime_structure() {
        let structure = PrimeStructure::new(
            Structure::Implicate,
            [lit("b", true), lit("a", false), lit("b", true)],
        );
        assert_eq!(structure.literals(), &[lit("a", false), lit("b", true)]);
        assert!(!structure.is_complementary());
        assert_eq!(structure.to_string(), "[¬a ∨ b]");

        let flipped = structure.flipped();
        assert_eq!(flipped.kind(), Structure::Implicant);
        assert_eq!(flipped.to_string(), "[a ∧ ¬b]");

        let complementary = PrimeStructure::new(
            Structure::Implicant,
            [lit("a", true), lit("c", true), lit("a", false)],
        );
        assert!(complementary.is_complementary());
        assert_eq!(!lit("a", true), lit("a", false));
    }
}
