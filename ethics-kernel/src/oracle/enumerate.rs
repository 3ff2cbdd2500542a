// Copyright (c) The ethics-kernel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exhaustive model enumeration over a Boolean skeleton by Shannon expansion.

use crate::abstraction::{Skeleton, Var};
use std::collections::BTreeMap;

/// A complete or partial assignment of skeleton variables.
pub type Assignment = BTreeMap<Var, bool>;

impl Skeleton {
    /// Returns the cofactor of this skeleton with `var` fixed to `value`, folding constants.
    pub fn restrict(&self, var: &Var, value: bool) -> Skeleton {
        match self {
            Skeleton::Const(_) => self.clone(),
            Skeleton::Var(v) if v == var => Skeleton::Const(value),
            Skeleton::Var(_) => self.clone(),
            Skeleton::Not(inner) => Skeleton::not_folded(inner.restrict(var, value)),
            Skeleton::And(lhs, rhs) => {
                Skeleton::and_folded(lhs.restrict(var, value), rhs.restrict(var, value))
            }
            Skeleton::Or(lhs, rhs) => {
                Skeleton::or_folded(lhs.restrict(var, value), rhs.restrict(var, value))
            }
        }
    }

    /// Folds every constant in this skeleton.
    pub fn simplified(&self) -> Skeleton {
        match self {
            Skeleton::Const(_) | Skeleton::Var(_) => self.clone(),
            Skeleton::Not(inner) => Skeleton::not_folded(inner.simplified()),
            Skeleton::And(lhs, rhs) => Skeleton::and_folded(lhs.simplified(), rhs.simplified()),
            Skeleton::Or(lhs, rhs) => Skeleton::or_folded(lhs.simplified(), rhs.simplified()),
        }
    }
}

/// Iterator over disjoint partial assignments (cubes) that satisfy a skeleton.
///
/// Every completion of a cube is a model, and every model completes exactly one cube.
#[derive(Clone, Debug)]
pub struct Cubes {
    stack: Vec<(Skeleton, Assignment)>,
}

impl Cubes {
    pub fn new(skeleton: &Skeleton) -> Self {
        Self {
            stack: vec![(skeleton.simplified(), Assignment::new())],
        }
    }
}

impl Iterator for Cubes {
    type Item = Assignment;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((skeleton, cube)) = self.stack.pop() {
            let split = match &skeleton {
                Skeleton::Const(true) => return Some(cube),
                Skeleton::Const(false) => continue,
                other => match other.vars().into_iter().next() {
                    Some(var) => var.clone(),
                    // Folded skeletons without variables are constants.
                    None => continue,
                },
            };

            // Push the negative branch first so that the positive one is explored first.
            for value in [false, true] {
                let mut branch = cube.clone();
                branch.insert(split.clone(), value);
                self.stack.push((skeleton.restrict(&split, value), branch));
            }
        }
        None
    }
}

/// Iterator over every complete model of a skeleton over a fixed variable list.
#[derive(Clone, Debug)]
pub struct BooleanModels {
    cubes: Cubes,
    vars: Vec<Var>,
    current: Option<Completions>,
}

impl BooleanModels {
    /// Enumerates the models of `skeleton`, completing them over `vars`.
    ///
    /// `vars` must contain every variable of the skeleton.
    pub fn new(skeleton: &Skeleton, vars: impl IntoIterator<Item = Var>) -> Self {
        Self {
            cubes: Cubes::new(skeleton),
            vars: vars.into_iter().collect(),
            current: None,
        }
    }
}

impl Iterator for BooleanModels {
    type Item = Assignment;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(completions) = &mut self.current {
                if let Some(model) = completions.next() {
                    return Some(model);
                }
            }
            let cube = self.cubes.next()?;
            self.current = Some(Completions::new(cube, &self.vars));
        }
    }
}

/// Counts the models of `skeleton` over `var_count` variables without materializing them.
pub fn model_count(skeleton: &Skeleton, var_count: usize) -> u128 {
    Cubes::new(skeleton)
        .map(|cube| {
            let free = var_count.saturating_sub(cube.len()) as u32;
            2_u128.checked_pow(free).unwrap_or(u128::MAX)
        })
        .fold(0_u128, |acc, count| acc.saturating_add(count))
}

/// Every completion of a cube, counting through the free variables like an odometer.
#[derive(Clone, Debug)]
struct Completions {
    cube: Assignment,
    free: Vec<Var>,
    values: Vec<bool>,
    done: bool,
}

impl Completions {
    fn new(cube: Assignment, vars: &[Var]) -> Self {
        let free: Vec<_> = vars
            .iter()
            .filter(|var| !cube.contains_key(*var))
            .cloned()
            .collect();
        let values = vec![false; free.len()];
        Self {
            cube,
            free,
            values,
            done: false,
        }
    }
}

impl Iterator for Completions {
    type Item = Assignment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut model = self.cube.clone();
        model.extend(self.free.iter().cloned().zip(self.values.iter().copied()));

        // Advance the odometer. Once every digit has wrapped around, this was the last one.
        self.done = true;
        for value in self.values.iter_mut() {
            if *value {
                *value = false;
            } else {
                *value = true;
                self.done = false;
                break;
            }
        }

        Some(model)
    }
}
