// Copyright (c) The ethics-kernel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// An error that occurred while parsing the canonical text of a formula or term.
///
/// Offsets are byte offsets into the parsed string.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The input ended in the middle of a formula or term.
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// A token appeared where it isn't allowed.
    #[error("unexpected `{found}` at offset {offset}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        offset: usize,
    },

    /// A constructor name that isn't part of the language.
    #[error("unknown constructor `{name}` at offset {offset}")]
    UnknownConstructor { name: String, offset: usize },

    /// An integer literal that doesn't fit in an `i64`.
    #[error("invalid integer literal `{literal}` at offset {offset}")]
    InvalidInteger { literal: String, offset: usize },

    /// A quoted atom name without a closing quote.
    #[error("unterminated atom name starting at offset {0}")]
    UnterminatedName(usize),

    /// Input left over after a complete formula.
    #[error("trailing input at offset {0}")]
    TrailingInput(usize),
}
