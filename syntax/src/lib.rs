/* Description: Structural parser for line-oriented automaton transition tables.

Copyright (C) 2024 Danny McClanahan <dmcC2@hypnicjerk.ai>
SPDX-License-Identifier: GPL-3.0-or-later

This file is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as
published by the Free Software Foundation; either version 3 of the
License, or (at your option) any later version.

This file is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>. */

#![warn(rustdoc::missing_crate_level_docs)]
// #![warn(missing_docs)]
#![deny(unsafe_code)]
/* Ensure any doctest warnings fails the doctest! */
#![doc(test(attr(deny(warnings))))]

//! Structural parser for line-oriented automaton transition tables.
//!
//! This crate only checks the *shape* of a description: header lines, declared
//! counts, the marker line and the number of fields per transition row. It
//! does not know which names refer to declared states; that is resolved when
//! the description is turned into an automaton.

pub mod ast;
pub mod parser;

cfg_if::cfg_if! {
  if #[cfg(any(test, feature = "proptest"))] {
    pub mod arbitrary;
  }
}

pub mod error {
  use crate::ast::{LineNumber, Section};

  #[derive(Debug, Clone, PartialEq, Eq, displaydoc::Display)]
  pub enum FormatErrorKind {
    /// the {0} line is missing
    MissingLine(Section),
    /// the {0} line must start with '#'
    MissingHash(Section),
    /// {0:?} is not a valid entry count
    BadCount(String),
    /// declared {declared} entries but listed {listed}
    CountMismatch { declared: usize, listed: usize },
    /// expected the literal line "--TABLA DE TRANSICIONES--"
    BadMarker,
    /// no states were declared
    NoStates,
    /// declared {declared} states but found {found} transition rows
    RowCount { declared: usize, found: usize },
  }

  #[derive(Debug, Clone, PartialEq, Eq, displaydoc::Display)]
  pub enum TransitionFormatErrorKind {
    /// expected {expected} '#'-terminated fields, found {found}
    FieldCount { expected: usize, found: usize },
  }

  #[derive(Debug, Clone, PartialEq, Eq, displaydoc::Display, thiserror::Error)]
  pub enum ParseError {
    /// line {line}: {kind}
    Format {
      line: LineNumber,
      kind: FormatErrorKind,
    },
    /// line {line}: malformed transition row: {kind}
    TransitionFormat {
      line: LineNumber,
      kind: TransitionFormatErrorKind,
    },
  }

  impl ParseError {
    pub const fn line(&self) -> LineNumber {
      match self {
        Self::Format { line, .. } => *line,
        Self::TransitionFormat { line, .. } => *line,
      }
    }
  }

  static_assertions::assert_impl_all!(ParseError: Send, Sync, Clone, std::error::Error);
}
