// Copyright (c) The ethics-kernel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Minimal hitting sets.
//!
//! A hitting set of a family of sets intersects every member of the family. This module computes
//! all hitting sets that are minimal under inclusion, using Berge's incremental algorithm: targets
//! are added one at a time, and the frontier of minimal hitting sets so far is extended to cover
//! each new target.

use crate::misc::log::targets::HITTING_SET as LOG_HITTING_SET;
use bitvec::prelude::*;
use std::collections::BTreeSet;

/// Computes the minimal hitting sets of a family of target sets.
///
/// Elements are interned into a sorted universe and sets are stored as bit vectors over it, so
/// any `Ord` element type works.
#[derive(Clone, Debug)]
pub struct HittingSetEngine<T> {
    universe: Vec<T>,
    targets: Vec<BitVec>,
    prune: bool,
}

impl<T: Ord + Clone> HittingSetEngine<T> {
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = T>,
    {
        let targets: Vec<BTreeSet<T>> = targets
            .into_iter()
            .map(|target| target.into_iter().collect())
            .collect();
        let universe: Vec<T> = targets
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let targets = targets
            .iter()
            .map(|target| {
                let mut bits = BitVec::repeat(false, universe.len());
                for elem in target {
                    if let Ok(ix) = universe.binary_search(elem) {
                        bits.set(ix, true);
                    }
                }
                bits
            })
            .collect();

        Self {
            universe,
            targets,
            prune: true,
        }
    }

    /// Whether to drop duplicate targets and strict supersets of other targets before solving.
    /// Defaults to true. The result is the same either way.
    pub fn with_pruning(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    #[inline]
    pub fn universe(&self) -> &[T] {
        &self.universe
    }

    #[inline]
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Returns every minimal hitting set, sorted by size and then by content.
    ///
    /// The empty family is hit by the empty set alone. A family containing the empty set has no
    /// hitting sets.
    pub fn solve(&self) -> Vec<BTreeSet<T>> {
        let mut targets = self.targets.clone();
        targets.sort_by_cached_key(sort_key);
        if self.prune {
            targets = prune_supersets(targets);
        }

        if targets.iter().any(|target| target.not_any()) {
            log::debug!(target: LOG_HITTING_SET, "empty target set, no hitting sets");
            return Vec::new();
        }

        let mut frontier = vec![BitVec::repeat(false, self.universe.len())];
        for target in &targets {
            let (mut next, missed): (Vec<_>, Vec<_>) =
                frontier.into_iter().partition(|set| intersects(set, target));
            for set in missed {
                for ix in target.iter_ones() {
                    let mut candidate = set.clone();
                    candidate.set(ix, true);
                    if !next.iter().any(|other| is_subset(other, &candidate)) {
                        next.push(candidate);
                    }
                }
            }
            log::trace!(
                target: LOG_HITTING_SET,
                "target of size {}: frontier now {}",
                target.count_ones(),
                next.len()
            );
            frontier = next;
        }

        let mut result: Vec<BTreeSet<T>> = frontier
            .iter()
            .map(|set| set.iter_ones().map(|ix| self.universe[ix].clone()).collect())
            .collect();
        result.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

        log::debug!(
            target: LOG_HITTING_SET,
            "{} targets ({} after pruning) over {} elements: {} minimal hitting sets",
            self.targets.len(),
            targets.len(),
            self.universe.len(),
            result.len()
        );
        result
    }
}

/// Returns the minimal hitting sets of `targets`, with pruning.
pub fn minimal_hitting_sets<T, I, S>(targets: I) -> Vec<BTreeSet<T>>
where
    T: Ord + Clone,
    I: IntoIterator<Item = S>,
    S: IntoIterator<Item = T>,
{
    HittingSetEngine::new(targets).solve()
}

// ---
// Helper methods
// ---

fn sort_key(set: &BitVec) -> (usize, Vec<usize>) {
    (set.count_ones(), set.iter_ones().collect())
}

#[inline]
fn intersects(a: &BitSlice, b: &BitSlice) -> bool {
    a.iter_ones().any(|ix| b[ix])
}

#[inline]
fn is_subset(a: &BitSlice, b: &BitSlice) -> bool {
    a.iter_ones().all(|ix| b[ix])
}

/// Expects targets sorted by ascending size, so subsets are seen before their supersets.
fn prune_supersets(targets: Vec<BitVec>) -> Vec<BitVec> {
    let mut kept: Vec<BitVec> = Vec::with_capacity(targets.len());
    for target in targets {
        if !kept.iter().any(|smaller| is_subset(smaller, &target)) {
            kept.push(target);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sets(sets: &[&[u8]]) -> Vec<BTreeSet<u8>> {
        sets.iter().map(|set| set.iter().copied().collect()).collect()
    }

    #[test]
    fn test_basic() {
        let targets = sets(&[&[1, 2], &[2, 3], &[3, 4]]);
        assert_eq!(
            minimal_hitting_sets(targets),
            sets(&[&[1, 3], &[2, 3], &[2, 4]])
        );

        let targets = sets(&[&[1, 2, 3], &[1], &[1, 2]]);
        assert_eq!(minimal_hitting_sets(targets), sets(&[&[1]]));
    }

    #[test]
    fn test_degenerate() {
        let empty: Vec<Vec<u8>> = vec![];
        assert_eq!(minimal_hitting_sets(empty), vec![BTreeSet::new()]);

        let with_empty = sets(&[&[1, 2], &[]]);
        assert_eq!(minimal_hitting_sets(with_empty.clone()), Vec::<BTreeSet<u8>>::new());
        assert_eq!(
            HittingSetEngine::new(with_empty).with_pruning(false).solve(),
            Vec::<BTreeSet<u8>>::new()
        );

        let engine = HittingSetEngine::new(sets(&[&[5, 1], &[3]]));
        assert_eq!(engine.universe(), &[1_u8, 3, 5]);
        assert_eq!(engine.target_count(), 2);
    }

    fn brute_force(targets: &[BTreeSet<u8>]) -> Vec<BTreeSet<u8>> {
        let universe: Vec<u8> = targets
            .iter()
            .flatten()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let hits = |set: &BTreeSet<u8>| targets.iter().all(|t| !t.is_disjoint(set));

        let mut hitting: Vec<BTreeSet<u8>> = (0..(1_u32 << universe.len()))
            .map(|bits| {
                universe
                    .iter()
                    .enumerate()
                    .filter(|(ix, _)| (bits >> ix) & 1 == 1)
                    .map(|(_, elem)| *elem)
                    .collect()
            })
            .filter(|set| hits(set))
            .collect();
        let all = hitting.clone();
        hitting.retain(|set| !all.iter().any(|other| other != set && other.is_subset(set)));
        hitting.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        hitting
    }

    proptest! {
        #[test]
        fn proptest_matches_brute_force(
            targets in prop::collection::vec(prop::collection::btree_set(0_u8..7, 0..4), 0..6),
        ) {
            let expected = brute_force(&targets);
            prop_assert_eq!(minimal_hitting_sets(targets.clone()), expected.clone());
            prop_assert_eq!(
                HittingSetEngine::new(targets).with_pruning(false).solve(),
                expected
            );
        }
    }
}
