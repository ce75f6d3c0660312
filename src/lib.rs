/* Description: Load finite automata from text tables and trace their runs.

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

//! Load finite automata from text tables and trace their runs.
//!
//! A description file declares states, final states and an alphabet, then
//! lists one transition row per state:
//!
//!```
//! use simple_automata::{load, Checker};
//!
//! let text = "#2 A B\n#1 B\n#2 0 1\n--TABLA DE TRANSICIONES--\n#B##\n###\n";
//! let automaton = load(text).unwrap();
//! assert!(automaton.is_deterministic());
//!
//! let mut checker = Checker::new(automaton);
//! assert!(checker.accepts("1").unwrap());
//! assert_eq!(&checker.trace().to_string(), "(A) - 1 -> (B)");
//! assert!(!checker.accepts("10").unwrap());
//!```

pub use simple_automata_core::{
  automaton::Automaton,
  dfa::{Dfa, DfaTransitions},
  error::{LoadError, ModelError, RunError, Violation},
  header::{Alphabet, Header, StateSet},
  load,
  loader::from_description,
  nfa::{EpsilonTransitions, Nfa, NfaTransitions},
  state::{State, StateId},
  trace::{Run, Trace},
};
pub use simple_automata_syntax::{error::ParseError, parser::MARKER};

use simple_automata_core::simple_eval::{dfa::DfaCache, nfa::NfaCache, SimpleEvaluator};

/// An automaton along with the record of the last input it checked.
///
/// [`Automaton::run`] returns each trace as a value; this keeps the most
/// recent one around instead, so a check can be followed by a separate
/// request for its trace.
#[derive(Debug, Clone)]
pub struct Checker {
  automaton: Automaton,
  dfa_cache: DfaCache,
  nfa_cache: NfaCache,
}

impl Checker {
  pub fn new(automaton: Automaton) -> Self {
    let (dfa_cache, nfa_cache) = match &automaton {
      Automaton::Deterministic(dfa) => (dfa.create_cache(()), NfaCache::new()),
      Automaton::NonDeterministic(nfa) => (DfaCache::new(), nfa.create_cache(())),
    };
    Self {
      automaton,
      dfa_cache,
      nfa_cache,
    }
  }

  /// Check `input`, replacing the previous trace.
  pub fn accepts(&mut self, input: &str) -> Result<bool, RunError> {
    let result = match &self.automaton {
      Automaton::Deterministic(dfa) => dfa.evaluate(&mut self.dfa_cache, input.chars()),
      Automaton::NonDeterministic(nfa) => nfa.evaluate(&mut self.nfa_cache, input.chars()),
    };
    if let Err(ref e) = result {
      tracing::debug!(%e, "check failed");
    }
    result
  }

  /// The states visited by the most recent [`Self::accepts`] call. Before
  /// any call, this only holds the starting point.
  pub fn trace(&self) -> Trace {
    match &self.automaton {
      Automaton::Deterministic(dfa) => Trace::from_dfa_cache(dfa.header(), &self.dfa_cache),
      Automaton::NonDeterministic(nfa) => Trace::from_nfa_cache(nfa.header(), &self.nfa_cache),
    }
  }

  #[inline(always)]
  pub fn automaton(&self) -> &Automaton { &self.automaton }

  /// Mutate the automaton. The current trace is kept until the next check.
  #[inline(always)]
  pub fn automaton_mut(&mut self) -> &mut Automaton { &mut self.automaton }

  pub fn into_inner(self) -> Automaton { self.automaton }
}

impl From<Automaton> for Checker {
  fn from(automaton: Automaton) -> Self { Self::new(automaton) }
}
