// Copyright (c) The ethics-kernel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A reasoning kernel for formalized ethical principles.
//!
//! Principles are ordinary [`Formula`](formula::Formula) values. The kernel decides them with a
//! theory-aware satisfiability oracle ([`oracle`]) and explains them by compiling prime
//! implicants and prime implicates ([`primes`]).

pub mod abstraction;
pub mod errors;
pub mod formula;
pub mod hitting_set;
pub mod misc;
pub mod oracle;
pub mod primes;
#[cfg(any(test, feature = "proptest1"))]
mod proptest_helpers;

#[cfg(any(test, feature = "proptest1"))]
pub use proptest_helpers::FormulaParams;

pub use formula::Formula;
pub use oracle::{all_models, consistent, entails, find_model, satisfiable};
pub use primes::{PrimeCompiler, Primes};
