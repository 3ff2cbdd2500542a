// Copyright (c) The ethics-kernel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Configuration for a [`PrimeCompiler`](super::PrimeCompiler).
///
/// Neither option changes the result, only how much work it takes to get there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompileConfig {
    /// Enumerate the models of the negated formula when it has fewer of them.
    pub negation_heuristic: bool,
    /// Drop duplicate and superset targets before each hitting-set computation.
    pub prune_targets: bool,
}

impl CompileConfig {
    pub fn with_negation_heuristic(mut self, negation_heuristic: bool) -> Self {
        self.negation_heuristic = negation_heuristic;
        self
    }

    pub fn with_prune_targets(mut self, prune_targets: bool) -> Self {
        self.prune_targets = prune_targets;
        self
    }
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            negation_heuristic: true,
            prune_targets: true,
        }
    }
}
