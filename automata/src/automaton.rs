/* Description: Either shape of finite automaton, behind one interface.

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

//! Either shape of finite automaton, behind one interface.

use core::fmt;

use crate::{
  dfa::Dfa,
  error::{ModelError, RunError},
  header::Header,
  nfa::Nfa,
  simple_eval::{dfa::DfaCache, nfa::NfaCache, SimpleEvaluator},
  state::{State, StateId},
  trace::{Run, Trace},
};

#[derive(Debug, Clone)]
pub enum Automaton {
  Deterministic(Dfa),
  NonDeterministic(Nfa),
}

static_assertions::assert_impl_all!(Automaton: Send, Sync, Clone);

impl Automaton {
  pub fn header(&self) -> &Header {
    match self {
      Self::Deterministic(dfa) => dfa.header(),
      Self::NonDeterministic(nfa) => nfa.header(),
    }
  }

  pub fn header_mut(&mut self) -> &mut Header {
    match self {
      Self::Deterministic(dfa) => dfa.header_mut(),
      Self::NonDeterministic(nfa) => nfa.header_mut(),
    }
  }

  #[inline]
  pub fn is_deterministic(&self) -> bool { matches!(self, Self::Deterministic(_)) }

  pub fn as_dfa(&self) -> Option<&Dfa> {
    match self {
      Self::Deterministic(dfa) => Some(dfa),
      Self::NonDeterministic(_) => None,
    }
  }

  pub fn as_dfa_mut(&mut self) -> Option<&mut Dfa> {
    match self {
      Self::Deterministic(dfa) => Some(dfa),
      Self::NonDeterministic(_) => None,
    }
  }

  pub fn as_nfa(&self) -> Option<&Nfa> {
    match self {
      Self::NonDeterministic(nfa) => Some(nfa),
      Self::Deterministic(_) => None,
    }
  }

  pub fn as_nfa_mut(&mut self) -> Option<&mut Nfa> {
    match self {
      Self::NonDeterministic(nfa) => Some(nfa),
      Self::Deterministic(_) => None,
    }
  }

  /// View this automaton as non-deterministic, converting if necessary.
  pub fn into_nfa(self) -> Nfa {
    match self {
      Self::Deterministic(dfa) => dfa.into(),
      Self::NonDeterministic(nfa) => nfa,
    }
  }

  /// Remove a state and every transition mentioning it. The initial state
  /// cannot be removed.
  pub fn remove_state(&mut self, id: StateId) -> Result<Option<State>, ModelError> {
    match self {
      Self::Deterministic(dfa) => dfa.remove_state(id),
      Self::NonDeterministic(nfa) => nfa.remove_state(id),
    }
  }

  pub fn remove_symbol(&mut self, symbol: char) -> bool {
    match self {
      Self::Deterministic(dfa) => dfa.remove_symbol(symbol),
      Self::NonDeterministic(nfa) => nfa.remove_symbol(symbol),
    }
  }

  /// Evaluate `input`, returning the verdict along with the states visited.
  ///
  ///```
  /// let dfa = simple_automata_core::load(
  ///   "#2 A B\n#1 B\n#2 0 1\n--TABLA DE TRANSICIONES--\n#B##\n###\n",
  /// ).unwrap();
  /// let run = dfa.run("1").unwrap();
  /// assert!(run.accepted);
  /// assert_eq!(&run.trace.to_string(), "(A) - 1 -> (B)");
  ///```
  pub fn run(&self, input: &str) -> Result<Run, RunError> {
    match self {
      Self::Deterministic(dfa) => {
        let mut cache: DfaCache = dfa.create_cache(());
        let accepted = dfa.evaluate(&mut cache, input.chars())?;
        Ok(Run {
          accepted,
          trace: Trace::from_dfa_cache(dfa.header(), &cache),
        })
      },
      Self::NonDeterministic(nfa) => {
        let mut cache: NfaCache = nfa.create_cache(());
        let accepted = nfa.evaluate(&mut cache, input.chars())?;
        Ok(Run {
          accepted,
          trace: Trace::from_nfa_cache(nfa.header(), &cache),
        })
      },
    }
  }

  pub fn accepts(&self, input: &str) -> Result<bool, RunError> {
    self.run(input).map(|run| run.accepted)
  }

  /// Currently returns an identical copy.
  pub fn minimize(&self) -> Self { self.clone() }

  /// Language equivalence is not decided yet: this always reports `false`.
  pub fn equivalent(&self, _other: &Self) -> bool { false }
}

impl From<Dfa> for Automaton {
  fn from(dfa: Dfa) -> Self { Self::Deterministic(dfa) }
}

impl From<Nfa> for Automaton {
  fn from(nfa: Nfa) -> Self { Self::NonDeterministic(nfa) }
}

impl fmt::Display for Automaton {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::Deterministic(dfa) => write!(f, "{}", dfa),
      Self::NonDeterministic(nfa) => write!(f, "{}", nfa),
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::error::Violation;

  fn ab() -> (Automaton, StateId, StateId) {
    let mut header = Header::new(State::new("A"));
    let a = header.initial();
    let b = header.add_state(State::new("B"));
    header.add_symbol('0');
    header.add_symbol('1');
    header.add_final(b).unwrap();
    let mut dfa = Dfa::new(header);
    dfa.add_transition(a, '1', b).unwrap();
    (dfa.into(), a, b)
  }

  #[test]
  fn dfa_runs() {
    let (automaton, _, _) = ab();
    assert!(automaton.is_deterministic());

    let run = automaton.run("1").unwrap();
    assert!(run.accepted);
    assert_eq!(&run.trace.to_string(), "(A) - 1 -> (B)");

    let run = automaton.run("0").unwrap();
    assert!(!run.accepted);
    assert_eq!(&run.trace.to_string(), "(A)");

    let run = automaton.run("10").unwrap();
    assert!(!run.accepted);
    assert_eq!(&run.trace.to_string(), "(A) - 1 -> (B)");

    assert_eq!(
      automaton.accepts("2"),
      Err(RunError::UnknownSymbol {
        symbol: '2',
        position: 0
      })
    );
  }

  #[test]
  fn nfa_conversion_agrees() {
    let (automaton, _, _) = ab();
    let nfa: Automaton = automaton.clone().into_nfa().into();
    assert!(!nfa.is_deterministic());
    for input in ["", "0", "1", "10", "01", "11"] {
      assert_eq!(automaton.accepts(input), nfa.accepts(input));
    }
    assert_eq!(
      &nfa.run("1").unwrap().trace.to_string(),
      "(A) - 1 -> (B)"
    );
  }

  #[test]
  fn removing_initial_leaves_automaton_unchanged() {
    let (mut automaton, a, _) = ab();
    let before = automaton.to_string();
    assert!(matches!(
      automaton.remove_state(a),
      Err(ModelError::InvariantViolation(Violation::RemoveInitialState(_)))
    ));
    assert_eq!(automaton.to_string(), before);
  }

  #[test]
  fn placeholders() {
    let (automaton, _, _) = ab();
    let minimal = automaton.minimize();
    assert_eq!(minimal.to_string(), automaton.to_string());
    assert!(!automaton.equivalent(&minimal));
  }
}
