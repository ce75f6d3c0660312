/* Description: State sets, final states and alphabet shared by every automaton shape.

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

//! State sets, final states and alphabet shared by every automaton shape.
//!
//! A [`Header`] always holds at least one state (the initial one), and its
//! final states are always a subset of its states. Operations which would
//! also have to touch transitions (removing a state or a symbol) live on the
//! concrete automaton types instead.

use core::fmt;

use indexmap::{IndexMap, IndexSet};

use crate::{
  error::{ModelError, Violation},
  state::{State, StateId},
  FxBuildHasher,
};

pub type StateSet = IndexSet<StateId, FxBuildHasher>;
pub type Alphabet = IndexSet<char, FxBuildHasher>;

#[derive(Debug, Clone)]
pub struct Header {
  initial: StateId,
  states: IndexMap<StateId, State, FxBuildHasher>,
  finals: StateSet,
  alphabet: Alphabet,
}

impl Header {
  pub fn new(initial: State) -> Self {
    let id = initial.id();
    let mut states: IndexMap<StateId, State, FxBuildHasher> = IndexMap::default();
    states.insert(id, initial);
    Self {
      initial: id,
      states,
      finals: StateSet::default(),
      alphabet: Alphabet::default(),
    }
  }

  #[inline(always)]
  pub const fn initial(&self) -> StateId { self.initial }

  pub fn initial_state(&self) -> &State { &self.states[&self.initial] }

  #[inline]
  pub fn state(&self, id: StateId) -> Option<&State> { self.states.get(&id) }

  #[inline]
  pub fn name(&self, id: StateId) -> Option<&str> { self.state(id).map(State::name) }

  /// States in the order they were added.
  pub fn states(&self) -> impl ExactSizeIterator<Item=&State>+'_ { self.states.values() }

  pub fn state_ids(&self) -> impl ExactSizeIterator<Item=StateId>+'_ {
    self.states.keys().copied()
  }

  pub fn len(&self) -> usize { self.states.len() }

  pub fn lookup(&self, name: &str) -> Option<StateId> {
    self
      .states
      .values()
      .find(|s| s.name() == name)
      .map(State::id)
  }

  #[inline]
  pub fn contains_state(&self, id: StateId) -> bool { self.states.contains_key(&id) }

  pub fn finals(&self) -> impl ExactSizeIterator<Item=&State>+'_ {
    self.finals.iter().map(|id| &self.states[id])
  }

  #[inline(always)]
  pub fn final_ids(&self) -> &StateSet { &self.finals }

  #[inline]
  pub fn is_final(&self, id: StateId) -> bool { self.finals.contains(&id) }

  #[inline(always)]
  pub fn alphabet(&self) -> &Alphabet { &self.alphabet }

  #[inline]
  pub fn contains_symbol(&self, symbol: char) -> bool { self.alphabet.contains(&symbol) }

  /// Add `state`, unless a state with the same name is already a member, in
  /// which case the existing member's handle is returned and `state` is
  /// dropped.
  pub fn add_state(&mut self, mut state: State) -> StateId {
    if let Some(existing) = self.lookup(state.name()) {
      return existing;
    }
    if self.states.contains_key(&state.id()) {
      state.reissue_id();
    }
    let id = state.id();
    self.states.insert(id, state);
    id
  }

  pub fn set_initial(&mut self, id: StateId) -> Result<(), ModelError> {
    self.check_state(id)?;
    self.initial = id;
    Ok(())
  }

  /// Returns whether `id` was not already final.
  pub fn add_final(&mut self, id: StateId) -> Result<bool, ModelError> {
    self.check_state(id)?;
    Ok(self.finals.insert(id))
  }

  pub fn remove_final(&mut self, id: StateId) -> bool { self.finals.shift_remove(&id) }

  pub fn add_symbol(&mut self, symbol: char) -> bool { self.alphabet.insert(symbol) }

  pub fn rename_state(&mut self, id: StateId, name: impl Into<String>) -> Result<(), ModelError> {
    let name = name.into();
    match self.lookup(&name) {
      Some(other) if other != id => {
        return Err(ModelError::InvariantViolation(Violation::NameCollision(
          name,
        )));
      },
      _ => (),
    }
    let state = self
      .states
      .get_mut(&id)
      .ok_or(ModelError::UnknownState(id))?;
    state.set_name(name);
    Ok(())
  }

  pub fn set_description(
    &mut self,
    id: StateId,
    description: impl Into<String>,
  ) -> Result<(), ModelError> {
    let state = self
      .states
      .get_mut(&id)
      .ok_or(ModelError::UnknownState(id))?;
    state.set_description(description);
    Ok(())
  }

  #[inline]
  pub(crate) fn check_state(&self, id: StateId) -> Result<(), ModelError> {
    if self.contains_state(id) {
      Ok(())
    } else {
      Err(ModelError::UnknownState(id))
    }
  }

  pub(crate) fn check_states<'a>(
    &self,
    ids: impl IntoIterator<Item=&'a StateId>,
  ) -> Result<(), ModelError> {
    ids.into_iter().try_for_each(|id| self.check_state(*id))
  }

  #[inline]
  pub(crate) fn check_symbol(&self, symbol: char) -> Result<(), ModelError> {
    if self.contains_symbol(symbol) {
      Ok(())
    } else {
      Err(ModelError::UnknownSymbol(symbol))
    }
  }

  /// Mark a handle obtained from this header as final without re-checking it.
  pub(crate) fn mark_final(&mut self, id: StateId) {
    debug_assert!(self.contains_state(id));
    self.finals.insert(id);
  }

  /// Remove a state from the state and final sets. The caller is responsible
  /// for purging transitions which mention it.
  pub(crate) fn detach_state(&mut self, id: StateId) -> Result<Option<State>, ModelError> {
    if id == self.initial {
      let name = self.initial_state().name().to_string();
      return Err(ModelError::InvariantViolation(
        Violation::RemoveInitialState(name),
      ));
    }
    self.finals.shift_remove(&id);
    Ok(self.states.shift_remove(&id))
  }

  pub(crate) fn detach_symbol(&mut self, symbol: char) -> bool {
    self.alphabet.shift_remove(&symbol)
  }

  pub(crate) fn names<'a>(&'a self, ids: impl IntoIterator<Item=&'a StateId>+'a) -> Names<'a> {
    Names(
      ids
        .into_iter()
        .map(|id| self.name(*id).unwrap_or("?"))
        .collect(),
    )
  }
}

/// Comma-separated state names, for display.
pub(crate) struct Names<'a>(Vec<&'a str>);

impl<'a> fmt::Display for Names<'a> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let Self(names) = self;
    if let Some((first, rest)) = names.split_first() {
      write!(f, "{}", first)?;
      for n in rest.iter() {
        write!(f, ", {}", n)?;
      }
    }
    Ok(())
  }
}

/// Headers are compared by state *names*, as sets.
impl PartialEq for Header {
  fn eq(&self, other: &Self) -> bool {
    let names = |h: &Self, ids: &mut dyn Iterator<Item=StateId>| -> Vec<String> {
      let mut v: Vec<String> = ids
        .filter_map(|id| h.name(id))
        .map(str::to_string)
        .collect();
      v.sort_unstable();
      v.dedup();
      v
    };
    self.initial_state() == other.initial_state()
      && names(self, &mut self.state_ids()) == names(other, &mut other.state_ids())
      && names(self, &mut self.finals.iter().copied())
        == names(other, &mut other.finals.iter().copied())
      && self.alphabet.len() == other.alphabet.len()
      && self.alphabet.iter().all(|c| other.alphabet.contains(c))
  }
}

impl Eq for Header {}

impl fmt::Display for Header {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    writeln!(f, "Initial state: {}", self.initial_state())?;
    writeln!(f, "States: {}", self.names(self.states.keys()))?;
    writeln!(f, "Final states: {}", self.names(self.finals.iter()))?;
    write!(f, "Alphabet: ")?;
    for (i, c) in self.alphabet.iter().enumerate() {
      if i > 0 {
        write!(f, ", ")?;
      }
      write!(f, "{}", c)?;
    }
    Ok(())
  }
}
