/* Description: Human-readable records of a single evaluation.

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

//! Human-readable records of a single evaluation.
//!
//! A [`Trace`] owns the state names it mentions, so it stays valid after the
//! automaton that produced it is mutated or dropped.

use core::fmt;

use crate::{
  header::{Header, StateSet},
  simple_eval::{dfa::DfaCache, nfa::NfaCache},
  state::StateId,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trace {
  /// Renders as a chain from the initial state, e.g. `(A) - 1 -> (B)`.
  Deterministic {
    start: String,
    steps: Vec<(char, String)>,
  },
  /// Renders as a chain from the initial closure, e.g.
  /// `(A, B, C) - 0 -> (B, C)`.
  NonDeterministic {
    start: Vec<String>,
    steps: Vec<(char, Vec<String>)>,
  },
}

fn resolve(header: &Header, id: StateId) -> String {
  match header.name(id) {
    Some(name) => name.to_string(),
    None => id.to_string(),
  }
}

fn resolve_all(header: &Header, ids: &StateSet) -> Vec<String> {
  ids.iter().map(|id| resolve(header, *id)).collect()
}

impl Trace {
  pub fn from_dfa_cache(header: &Header, cache: &DfaCache) -> Self {
    let start = resolve(header, cache.start().unwrap_or_else(|| header.initial()));
    let steps = cache
      .steps()
      .iter()
      .map(|(symbol, to)| (*symbol, resolve(header, *to)))
      .collect();
    Self::Deterministic { start, steps }
  }

  pub fn from_nfa_cache(header: &Header, cache: &NfaCache) -> Self {
    let start = resolve_all(header, cache.start());
    let steps = cache
      .steps()
      .iter()
      .map(|(symbol, to)| (*symbol, resolve_all(header, to)))
      .collect();
    Self::NonDeterministic { start, steps }
  }

  /// Number of symbols consumed.
  pub fn len(&self) -> usize {
    match self {
      Self::Deterministic { steps, .. } => steps.len(),
      Self::NonDeterministic { steps, .. } => steps.len(),
    }
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

struct Group<'a>(&'a [String]);

impl<'a> fmt::Display for Group<'a> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "(")?;
    for (i, name) in self.0.iter().enumerate() {
      if i > 0 {
        write!(f, ", ")?;
      }
      write!(f, "{}", name)?;
    }
    write!(f, ")")
  }
}

impl fmt::Display for Trace {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::Deterministic { start, steps } => {
        write!(f, "({})", start)?;
        for (symbol, to) in steps.iter() {
          write!(f, " - {} -> ({})", symbol, to)?;
        }
      },
      Self::NonDeterministic { start, steps } => {
        write!(f, "{}", Group(start))?;
        for (symbol, to) in steps.iter() {
          write!(f, " - {} -> {}", symbol, Group(to))?;
        }
      },
    }
    Ok(())
  }
}

/// The outcome of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
  pub accepted: bool,
  pub trace: Trace,
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn render_deterministic() {
    let trace = Trace::Deterministic {
      start: "A".to_string(),
      steps: vec![('1', "B".to_string()), ('0', "A".to_string())],
    };
    assert_eq!(&format!("{}", trace), "(A) - 1 -> (B) - 0 -> (A)");
    assert_eq!(trace.len(), 2);
  }

  #[test]
  fn render_nondeterministic() {
    let trace = Trace::NonDeterministic {
      start: vec!["A".to_string(), "B".to_string(), "C".to_string()],
      steps: vec![
        ('0', vec!["B".to_string(), "C".to_string()]),
        ('1', vec![]),
      ],
    };
    assert_eq!(
      &format!("{}", trace),
      "(A, B, C) - 0 -> (B, C) - 1 -> ()"
    );
  }

  #[test]
  fn render_empty() {
    let trace = Trace::Deterministic {
      start: "A".to_string(),
      steps: vec![],
    };
    assert!(trace.is_empty());
    assert_eq!(&format!("{}", trace), "(A)");
  }
}
