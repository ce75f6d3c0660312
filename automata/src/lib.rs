/* Description: Deterministic and non-deterministic finite automata with traced evaluation.

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

//! Deterministic and non-deterministic finite automata with traced
//! evaluation.
//!
//! States are addressed by [`state::StateId`] handles; every set and relation
//! in the model is keyed by handle, while state *names* are only compared
//! where two states must be considered the same.

#![warn(rustdoc::missing_crate_level_docs)]
// #![warn(missing_docs)]
#![deny(unsafe_code)]
/* Ensure any doctest warnings fails the doctest! */
#![doc(test(attr(deny(warnings))))]

use core::hash::BuildHasherDefault;

use rustc_hash::FxHasher;

pub mod automaton;
pub mod dfa;
pub mod header;
pub mod loader;
pub mod nfa;
pub mod simple_eval;
pub mod state;
pub mod trace;

pub use automaton::Automaton;
pub use loader::load;

pub(crate) type FxBuildHasher = BuildHasherDefault<FxHasher>;

pub mod error {
  use simple_automata_syntax::{ast::LineNumber, error::ParseError};

  use crate::state::StateId;

  /// A change that would break one of the model's structural invariants.
  #[derive(Debug, Clone, PartialEq, Eq, displaydoc::Display)]
  pub enum Violation {
    /// the initial state {0:?} cannot be removed
    RemoveInitialState(String),
    /// another state is already named {0:?}
    NameCollision(String),
  }

  #[derive(Debug, Clone, PartialEq, Eq, displaydoc::Display, thiserror::Error)]
  pub enum ModelError {
    /// state {0} is not a member of this automaton
    UnknownState(StateId),
    /// {0:?} is not a symbol of this automaton's alphabet
    UnknownSymbol(char),
    /// invariant violation: {0}
    InvariantViolation(Violation),
  }

  #[derive(Debug, Clone, PartialEq, Eq, displaydoc::Display, thiserror::Error)]
  pub enum RunError {
    /// symbol {symbol:?} at position {position} is not in the alphabet
    UnknownSymbol { symbol: char, position: usize },
  }

  #[derive(Debug, Clone, PartialEq, Eq, displaydoc::Display, thiserror::Error)]
  pub enum LoadError {
    /// {0}
    Syntax(#[from] ParseError),
    /// line {line}: {name:?} is not a declared state
    UnknownState { line: LineNumber, name: String },
    /// line {line}: state {state:?} has {count} destinations on {symbol:?} in a deterministic table
    DfaTransitionConflict {
      line: LineNumber,
      state: String,
      symbol: char,
      count: usize,
    },
  }

  static_assertions::assert_impl_all!(ModelError: Send, Sync, std::error::Error);
  static_assertions::assert_impl_all!(RunError: Send, Sync, std::error::Error);
  static_assertions::assert_impl_all!(LoadError: Send, Sync, std::error::Error);
}
