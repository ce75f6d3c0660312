/* Description: Non-deterministic finite automaton structure.

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

//! Non-deterministic finite automaton structure.
//!
//! Both relations are sparse: an absent key means "no moves", and a present
//! key never maps to an empty set.

use core::{fmt, hash::Hash};

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::{
  dfa::Dfa,
  error::ModelError,
  header::{Header, StateSet},
  state::{State, StateId},
  FxBuildHasher,
};

pub type NfaTransitions = IndexMap<(StateId, char), StateSet, FxBuildHasher>;
pub type EpsilonTransitions = IndexMap<StateId, StateSet, FxBuildHasher>;

#[derive(Debug, Clone)]
pub struct Nfa {
  header: Header,
  transitions: NfaTransitions,
  epsilon: EpsilonTransitions,
}

fn extend_relation<K>(
  relation: &mut IndexMap<K, StateSet, FxBuildHasher>,
  key: K,
  to: StateSet,
) where
  K: Hash+Eq,
{
  if to.is_empty() {
    return;
  }
  relation.entry(key).or_default().extend(to);
}

fn shrink_relation<K>(relation: &mut IndexMap<K, StateSet, FxBuildHasher>, key: &K, to: &StateSet)
where K: Hash+Eq {
  let emptied = match relation.get_mut(key) {
    Some(dests) => {
      dests.retain(|d| !to.contains(d));
      dests.is_empty()
    },
    None => false,
  };
  if emptied {
    relation.shift_remove(key);
  }
}

impl Nfa {
  pub fn new(header: Header) -> Self {
    Self {
      header,
      transitions: NfaTransitions::default(),
      epsilon: EpsilonTransitions::default(),
    }
  }

  /// Assemble from parts already known to reference members of `header`.
  pub(crate) fn from_parts(
    header: Header,
    transitions: NfaTransitions,
    epsilon: EpsilonTransitions,
  ) -> Self {
    Self {
      header,
      transitions,
      epsilon,
    }
  }

  #[inline(always)]
  pub fn header(&self) -> &Header { &self.header }

  #[inline(always)]
  pub fn header_mut(&mut self) -> &mut Header { &mut self.header }

  #[inline(always)]
  pub fn transitions(&self) -> &NfaTransitions { &self.transitions }

  #[inline(always)]
  pub fn epsilon_transitions(&self) -> &EpsilonTransitions { &self.epsilon }

  #[inline]
  pub fn destinations(&self, from: StateId, symbol: char) -> Option<&StateSet> {
    self.transitions.get(&(from, symbol))
  }

  #[inline]
  pub fn epsilon_destinations(&self, from: StateId) -> Option<&StateSet> { self.epsilon.get(&from) }

  /// Returns whether `to` was not already a destination.
  pub fn add_transition(
    &mut self,
    from: StateId,
    symbol: char,
    to: StateId,
  ) -> Result<bool, ModelError> {
    self.header.check_state(from)?;
    self.header.check_state(to)?;
    self.header.check_symbol(symbol)?;
    Ok(self.transitions.entry((from, symbol)).or_default().insert(to))
  }

  pub fn add_transitions(
    &mut self,
    from: StateId,
    symbol: char,
    to: impl IntoIterator<Item=StateId>,
  ) -> Result<(), ModelError> {
    let to: StateSet = to.into_iter().collect();
    self.header.check_state(from)?;
    self.header.check_states(&to)?;
    self.header.check_symbol(symbol)?;
    extend_relation(&mut self.transitions, (from, symbol), to);
    Ok(())
  }

  /// Remove every destination of `from` on `symbol`.
  pub fn remove_transition(
    &mut self,
    from: StateId,
    symbol: char,
  ) -> Result<Option<StateSet>, ModelError> {
    self.header.check_state(from)?;
    self.header.check_symbol(symbol)?;
    Ok(self.transitions.shift_remove(&(from, symbol)))
  }

  pub fn remove_transitions(
    &mut self,
    from: StateId,
    symbol: char,
    to: impl IntoIterator<Item=StateId>,
  ) -> Result<(), ModelError> {
    let to: StateSet = to.into_iter().collect();
    self.header.check_state(from)?;
    self.header.check_states(&to)?;
    self.header.check_symbol(symbol)?;
    shrink_relation(&mut self.transitions, &(from, symbol), &to);
    Ok(())
  }

  pub fn add_epsilon_transition(&mut self, from: StateId, to: StateId) -> Result<bool, ModelError> {
    self.header.check_state(from)?;
    self.header.check_state(to)?;
    Ok(self.epsilon.entry(from).or_default().insert(to))
  }

  pub fn add_epsilon_transitions(
    &mut self,
    from: StateId,
    to: impl IntoIterator<Item=StateId>,
  ) -> Result<(), ModelError> {
    let to: StateSet = to.into_iter().collect();
    self.header.check_state(from)?;
    self.header.check_states(&to)?;
    extend_relation(&mut self.epsilon, from, to);
    Ok(())
  }

  /// Remove every epsilon move out of `from`.
  pub fn remove_epsilon_transition(
    &mut self,
    from: StateId,
  ) -> Result<Option<StateSet>, ModelError> {
    self.header.check_state(from)?;
    Ok(self.epsilon.shift_remove(&from))
  }

  pub fn remove_epsilon_transitions(
    &mut self,
    from: StateId,
    to: impl IntoIterator<Item=StateId>,
  ) -> Result<(), ModelError> {
    let to: StateSet = to.into_iter().collect();
    self.header.check_state(from)?;
    self.header.check_states(&to)?;
    shrink_relation(&mut self.epsilon, &from, &to);
    Ok(())
  }

  /// Replace the whole transition relation. Nothing changes unless every
  /// entry is valid; empty destination sets are dropped.
  pub fn set_transitions(&mut self, mut transitions: NfaTransitions) -> Result<(), ModelError> {
    for (&(from, symbol), to) in transitions.iter() {
      self.header.check_state(from)?;
      self.header.check_states(to)?;
      self.header.check_symbol(symbol)?;
    }
    transitions.retain(|_, to| !to.is_empty());
    self.transitions = transitions;
    Ok(())
  }

  pub fn set_epsilon_transitions(
    &mut self,
    mut epsilon: EpsilonTransitions,
  ) -> Result<(), ModelError> {
    for (&from, to) in epsilon.iter() {
      self.header.check_state(from)?;
      self.header.check_states(to)?;
    }
    epsilon.retain(|_, to| !to.is_empty());
    self.epsilon = epsilon;
    Ok(())
  }

  /// Remove a state along with every move to or from it.
  pub fn remove_state(&mut self, id: StateId) -> Result<Option<State>, ModelError> {
    let removed = self.header.detach_state(id)?;
    self.transitions.retain(|&(from, _), to| {
      to.shift_remove(&id);
      from != id && !to.is_empty()
    });
    self.epsilon.retain(|&from, to| {
      to.shift_remove(&id);
      from != id && !to.is_empty()
    });
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

  /// Every state reachable from `seed` through epsilon moves alone, including
  /// `seed` itself, in discovery order.
  pub fn epsilon_closure(&self, seed: impl IntoIterator<Item=StateId>) -> StateSet {
    let mut closure: StateSet = seed.into_iter().collect();
    let mut stack: SmallVec<[StateId; 8]> = closure.iter().copied().collect();
    while let Some(cur) = stack.pop() {
      let Some(dests) = self.epsilon.get(&cur) else {
        continue;
      };
      for &next in dests.iter() {
        if closure.insert(next) {
          stack.push(next);
        }
      }
    }
    closure
  }
}

/// Every deterministic automaton is also a non-deterministic one.
impl From<Dfa> for Nfa {
  fn from(dfa: Dfa) -> Self {
    let (header, function) = dfa.into_parts();
    let transitions: NfaTransitions = function
      .into_iter()
      .map(|(key, to)| (key, StateSet::from_iter([to])))
      .collect();
    Self::from_parts(header, transitions, EpsilonTransitions::default())
  }
}

impl fmt::Display for Nfa {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    writeln!(f, "{}", self.header)?;
    write!(f, "Transitions: ")?;
    for (i, (&(from, symbol), to)) in self.transitions.iter().enumerate() {
      if i > 0 {
        write!(f, ", ")?;
      }
      write!(
        f,
        "({}, {}) -> {}",
        self.header.names([&from]),
        symbol,
        self.header.names(to)
      )?;
    }
    writeln!(f)?;
    write!(f, "Epsilon transitions: ")?;
    for (i, (&from, to)) in self.epsilon.iter().enumerate() {
      if i > 0 {
        write!(f, ", ")?;
      }
      write!(f, "{} -> {}", self.header.names([&from]), self.header.names(to))?;
    }
    Ok(())
  }
}
