/* Description: Deterministic finite automaton structure.

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

//! Deterministic finite automaton structure.

use core::fmt;

use indexmap::IndexMap;

use crate::{
  error::ModelError,
  header::Header,
  state::{State, StateId},
  FxBuildHasher,
};

/// A partial transition function. Missing entries mean "no move".
pub type DfaTransitions = IndexMap<(StateId, char), StateId, FxBuildHasher>;

#[derive(Debug, Clone)]
pub struct Dfa {
  header: Header,
  transitions: DfaTransitions,
}

impl Dfa {
  pub fn new(header: Header) -> Self {
    Self {
      header,
      transitions: DfaTransitions::default(),
    }
  }

  /// Assemble from parts already known to reference members of `header`.
  pub(crate) fn from_parts(header: Header, transitions: DfaTransitions) -> Self {
    Self {
      header,
      transitions,
    }
  }

  #[inline(always)]
  pub fn header(&self) -> &Header { &self.header }

  #[inline(always)]
  pub fn header_mut(&mut self) -> &mut Header { &mut self.header }

  #[inline(always)]
  pub fn transitions(&self) -> &DfaTransitions { &self.transitions }

  #[inline]
  pub fn transition(&self, from: StateId, symbol: char) -> Option<StateId> {
    self.transitions.get(&(from, symbol)).copied()
  }

  /// Returns the destination this replaced, if any.
  pub fn add_transition(
    &mut self,
    from: StateId,
    symbol: char,
    to: StateId,
  ) -> Result<Option<StateId>, ModelError> {
    self.header.check_state(from)?;
    self.header.check_state(to)?;
    self.header.check_symbol(symbol)?;
    Ok(self.transitions.insert((from, symbol), to))
  }

  pub fn remove_transition(
    &mut self,
    from: StateId,
    symbol: char,
  ) -> Result<Option<StateId>, ModelError> {
    self.header.check_state(from)?;
    self.header.check_symbol(symbol)?;
    Ok(self.transitions.shift_remove(&(from, symbol)))
  }

  /// Replace the whole transition function. Nothing changes unless every
  /// entry is valid.
  pub fn set_transitions(&mut self, transitions: DfaTransitions) -> Result<(), ModelError> {
    for (&(from, symbol), &to) in transitions.iter() {
      self.header.check_state(from)?;
      self.header.check_state(to)?;
      self.header.check_symbol(symbol)?;
    }
    self.transitions = transitions;
    Ok(())
  }

  /// Remove a state along with every transition to or from it.
  pub fn remove_state(&mut self, id: StateId) -> Result<Option<State>, ModelError> {
    let removed = self.header.detach_state(id)?;
    self
      .transitions
      .retain(|&(from, _), to| from != id && *to != id);
    Ok(removed)
  }

  /// Remove a symbol along with every transition on it.
  pub fn remove_symbol(&mut self, symbol: char) -> bool {
    let removed = self.header.detach_symbol(symbol);
    if removed {
      self.transitions.retain(|&(_, s), _| s != symbol);
    }
    removed
  }

  pub(crate) fn into_parts(self) -> (Header, DfaTransitions) { (self.header, self.transitions) }
}

impl fmt::Display for Dfa {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    writeln!(f, "{}", self.header)?;
    write!(f, "Transitions: ")?;
    for (i, (&(from, symbol), &to)) in self.transitions.iter().enumerate() {
      if i > 0 {
        write!(f, ", ")?;
      }
      write!(
        f,
        "({}, {}) -> {}",
        self.header.names([&from]),
        symbol,
        self.header.names([&to])
      )?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::error::Violation;

  fn ab() -> (Dfa, StateId, StateId) {
    let mut header = Header::new(State::new("A"));
    let a = header.initial();
    let b = header.add_state(State::new("B"));
    header.add_symbol('0');
    header.add_symbol('1');
    header.add_final(b).unwrap();
    (Dfa::new(header), a, b)
  }

  #[test]
  fn add_and_replace() {
    let (mut dfa, a, b) = ab();
    assert_eq!(dfa.add_transition(a, '1', b), Ok(None));
    assert_eq!(dfa.add_transition(a, '1', a), Ok(Some(b)));
    assert_eq!(dfa.transition(a, '1'), Some(a));
    assert_eq!(dfa.transition(a, '0'), None);
  }

  #[test]
  fn references_are_checked() {
    let (mut dfa, a, b) = ab();
    dfa.add_transition(a, '1', b).unwrap();
    let before = dfa.transitions().clone();

    let stranger = State::new("Z").id();
    assert_eq!(
      dfa.add_transition(a, '0', stranger),
      Err(ModelError::UnknownState(stranger))
    );
    assert_eq!(
      dfa.add_transition(stranger, '0', a),
      Err(ModelError::UnknownState(stranger))
    );
    assert_eq!(
      dfa.add_transition(a, '2', b),
      Err(ModelError::UnknownSymbol('2'))
    );
    assert_eq!(dfa.transitions(), &before);

    let mut bad = DfaTransitions::default();
    bad.insert((b, '0'), a);
    bad.insert((b, '1'), stranger);
    assert_eq!(dfa.set_transitions(bad), Err(ModelError::UnknownState(stranger)));
    assert_eq!(dfa.transitions(), &before);
  }

  #[test]
  fn removal_purges_transitions() {
    let (mut dfa, a, b) = ab();
    dfa.add_transition(a, '1', b).unwrap();
    dfa.add_transition(b, '0', a).unwrap();
    dfa.add_transition(a, '0', a).unwrap();

    assert!(matches!(
      dfa.remove_state(a),
      Err(ModelError::InvariantViolation(Violation::RemoveInitialState(_)))
    ));
    assert_eq!(dfa.transitions().len(), 3);

    assert!(dfa.remove_symbol('0'));
    assert!(!dfa.remove_symbol('0'));
    assert_eq!(dfa.transitions().len(), 1);

    assert_eq!(dfa.remove_state(b).unwrap().unwrap().name(), "B");
    assert!(dfa.transitions().is_empty());
    assert!(dfa.header().final_ids().is_empty());
  }

  #[test]
  fn display() {
    let (mut dfa, a, b) = ab();
    dfa.add_transition(a, '1', b).unwrap();
    dfa.add_transition(b, '0', a).unwrap();
    assert_eq!(
      &format!("{}", dfa),
      "Initial state: A\nStates: A, B\nFinal states: B\nAlphabet: 0, 1\nTransitions: (A, 1) -> B, (B, 0) -> A"
    );
  }
}
