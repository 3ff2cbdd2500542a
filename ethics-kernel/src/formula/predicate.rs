// Copyright (c) The ethics-kernel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

/// One-place domain predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UnaryPredicate {
    Good,
    Bad,
    Neutral,
    Caused,
    Finally,
    Avoidable,
    Instrumental,
    /// Intended, written `I`.
    Intended,
    Goal,
    Choice,
    Patient,
    End,
    Means,
    Means2,
    /// Knowledge, written `K`.
    Knows,
    Consequence,
    May,
    Must,
}

impl UnaryPredicate {
    pub const ALL: [UnaryPredicate; 18] = [
        Self::Good,
        Self::Bad,
        Self::Neutral,
        Self::Caused,
        Self::Finally,
        Self::Avoidable,
        Self::Instrumental,
        Self::Intended,
        Self::Goal,
        Self::Choice,
        Self::Patient,
        Self::End,
        Self::Means,
        Self::Means2,
        Self::Knows,
        Self::Consequence,
        Self::May,
        Self::Must,
    ];

    /// The constructor name used in canonical text.
    pub fn name(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Bad => "Bad",
            Self::Neutral => "Neutral",
            Self::Caused => "Caused",
            Self::Finally => "Finally",
            Self::Avoidable => "Avoidable",
            Self::Instrumental => "Instrumental",
            Self::Intended => "I",
            Self::Goal => "Goal",
            Self::Choice => "Choice",
            Self::Patient => "Patient",
            Self::End => "End",
            Self::Means => "Means",
            Self::Means2 => "Means2",
            Self::Knows => "K",
            Self::Consequence => "Consequence",
            Self::May => "May",
            Self::Must => "Must",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.name() == name)
    }
}

/// Two-place domain predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BinaryPredicate {
    Causes,
    PCauses,
    SCauses,
    Explains,
    Prevents,
    Intervention,
    Exists,
    Forall,
    Because,
    Affects,
    AffectsPos,
    AffectsNeg,
    Better,
    Same,
}

impl BinaryPredicate {
    pub const ALL: [BinaryPredicate; 14] = [
        Self::Causes,
        Self::PCauses,
        Self::SCauses,
        Self::Explains,
        Self::Prevents,
        Self::Intervention,
        Self::Exists,
        Self::Forall,
        Self::Because,
        Self::Affects,
        Self::AffectsPos,
        Self::AffectsNeg,
        Self::Better,
        Self::Same,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Causes => "Causes",
            Self::PCauses => "PCauses",
            Self::SCauses => "SCauses",
            Self::Explains => "Explains",
            Self::Prevents => "Prevents",
            Self::Intervention => "Intervention",
            Self::Exists => "Exists",
            Self::Forall => "Forall",
            Self::Because => "Because",
            Self::Affects => "Affects",
            Self::AffectsPos => "AffectsPos",
            Self::AffectsNeg => "AffectsNeg",
            Self::Better => "Better",
            Self::Same => "Same",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.name() == name)
    }
}

/// Numeric comparisons between [`Term`](super::Term)s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Comparison {
    Eq,
    Gt,
    GEq,
}

impl Comparison {
    pub const ALL: [Comparison; 3] = [Self::Eq, Self::Gt, Self::GEq];

    pub fn name(self) -> &'static str {
        match self {
            Self::Eq => "Eq",
            Self::Gt => "Gt",
            Self::GEq => "GEq",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }
}

impl fmt::Display for UnaryPredicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for BinaryPredicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
