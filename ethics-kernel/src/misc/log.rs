// Copyright (c) The ethics-kernel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/*!
Items related to [logging](log).

Calls to the log macros are made throughout the kernel, at trace level for per-model and
per-atom events and at debug level for per-query summaries.

No log implementation is provided.
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to [abstraction](crate::abstraction)
    pub const ABSTRACTION: &str = "abstraction";

    /// Logs related to model enumeration in the [oracle](crate::oracle)
    pub const ORACLE: &str = "oracle";

    /// Logs related to the [theory filter](crate::oracle::theory)
    pub const THEORY: &str = "theory";

    /// Logs related to [minimal hitting sets](crate::hitting_set)
    pub const HITTING_SET: &str = "hitting_set";

    /// Logs related to [prime compilation](crate::primes)
    pub const PRIMES: &str = "primes";
}
