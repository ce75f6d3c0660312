/* Description: Automaton states and their identity handles.

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

//! Automaton states and their identity handles.

use core::{
  cmp, fmt, hash, mem,
  sync::atomic::{AtomicUsize, Ordering},
};

/// Process-unique identity of a [`State`], independent of its name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct StateId(usize);

static_assertions::const_assert_eq!(mem::size_of::<StateId>(), mem::size_of::<usize>());

static NEXT_STATE_ID: AtomicUsize = AtomicUsize::new(0);

impl StateId {
  #[inline]
  pub fn fresh() -> Self { Self(NEXT_STATE_ID.fetch_add(1, Ordering::Relaxed)) }

  #[inline(always)]
  pub const fn as_usize(self) -> usize { self.0 }
}

impl fmt::Display for StateId {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "#{}", self.0) }
}

/// A named state.
///
/// Two states are equal iff their names are equal: the [`StateId`] is *not*
/// part of equality, ordering or hashing. Renaming a state to another state's
/// name therefore makes the two equal while they keep distinct handles.
#[derive(Debug, Clone)]
pub struct State {
  id: StateId,
  name: String,
  description: String,
}

impl State {
  pub fn new(name: impl Into<String>) -> Self { Self::with_description(name, String::new()) }

  pub fn with_description(name: impl Into<String>, description: impl Into<String>) -> Self {
    Self {
      id: StateId::fresh(),
      name: name.into(),
      description: description.into(),
    }
  }

  #[inline(always)]
  pub const fn id(&self) -> StateId { self.id }

  #[inline(always)]
  pub fn name(&self) -> &str { &self.name }

  #[inline(always)]
  pub fn description(&self) -> &str { &self.description }

  pub fn set_name(&mut self, name: impl Into<String>) { self.name = name.into(); }

  pub fn set_description(&mut self, description: impl Into<String>) {
    self.description = description.into();
  }

  /// Give this state a new handle, e.g. before adding a clone of it to the
  /// automaton it was cloned from.
  pub(crate) fn reissue_id(&mut self) { self.id = StateId::fresh(); }
}

impl PartialEq for State {
  fn eq(&self, other: &Self) -> bool { self.name.eq(&other.name) }
}

impl Eq for State {}

impl cmp::PartialOrd for State {
  fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> { Some(self.cmp(other)) }
}

impl cmp::Ord for State {
  fn cmp(&self, other: &Self) -> cmp::Ordering { self.name.cmp(&other.name) }
}

impl hash::Hash for State {
  fn hash<H: hash::Hasher>(&self, state: &mut H) { self.name.hash(state); }
}

impl fmt::Display for State {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.name) }
}
