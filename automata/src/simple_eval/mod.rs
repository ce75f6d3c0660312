/* Description: Left-to-right evaluation of automata over input strings.

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

//! Left-to-right evaluation of automata over input strings.
//!
//! Each evaluator owns no run state of its own: everything a run records
//! lives in its cache, which is reset at the start of every
//! [`SimpleEvaluator::evaluate`] call. A cache therefore only ever describes
//! the most recent run.

pub trait SearchState<Eval: ?Sized> {
  type Args;

  fn create(args: Self::Args) -> Self;
  fn reset(&mut self, eval: &Eval);
}

pub trait SimpleEvaluator<Cache: SearchState<Self>> {
  type Tok;
  type Success;
  type Err;

  fn create_cache(&self, args: Cache::Args) -> Cache {
    let mut cache = Cache::create(args);
    cache.reset(self);
    cache
  }

  fn evaluate(
    &self,
    cache: &mut Cache,
    tokens: impl Iterator<Item=Self::Tok>,
  ) -> Result<Self::Success, Self::Err>;
}

pub mod dfa {
  use super::{SearchState, SimpleEvaluator};
  use crate::{dfa::Dfa, error::RunError, state::StateId};

  /// The states a deterministic run moved through.
  #[derive(Debug, Clone, Default)]
  pub struct DfaCache {
    start: Option<StateId>,
    steps: Vec<(char, StateId)>,
  }

  impl DfaCache {
    pub fn new() -> Self { Self::default() }

    /// Where the most recent run started, if any run was prepared.
    #[inline(always)]
    pub fn start(&self) -> Option<StateId> { self.start }

    #[inline(always)]
    pub fn steps(&self) -> &[(char, StateId)] { &self.steps }
  }

  impl SearchState<Dfa> for DfaCache {
    type Args = ();

    fn create(_args: ()) -> Self { Self::new() }

    fn reset(&mut self, eval: &Dfa) {
      self.start = Some(eval.header().initial());
      self.steps.clear();
    }
  }

  impl SimpleEvaluator<DfaCache> for Dfa {
    type Tok = char;
    type Success = bool;
    type Err = RunError;

    fn evaluate(
      &self,
      cache: &mut DfaCache,
      tokens: impl Iterator<Item=char>,
    ) -> Result<bool, RunError> {
      cache.reset(self);
      let header = self.header();

      let mut current = header.initial();
      for (position, symbol) in tokens.enumerate() {
        if !header.contains_symbol(symbol) {
          return Err(RunError::UnknownSymbol { symbol, position });
        }
        let Some(next) = self.transition(current, symbol) else {
          tracing::debug!(
            state = header.name(current),
            %symbol,
            position,
            "no transition, rejecting"
          );
          return Ok(false);
        };
        tracing::trace!(from = header.name(current), %symbol, to = header.name(next), "step");
        cache.steps.push((symbol, next));
        current = next;
      }

      let accepted = header.is_final(current);
      tracing::debug!(state = header.name(current), accepted, "input consumed");
      Ok(accepted)
    }
  }

  #[cfg(test)]
  mod test {
    use super::*;
    use crate::{header::Header, state::State};

    #[test]
    fn eval_simple() {
      let mut header = Header::new(State::new("A"));
      let a = header.initial();
      let b = header.add_state(State::new("B"));
      header.add_symbol('0');
      header.add_symbol('1');
      header.add_final(b).unwrap();
      let mut dfa = Dfa::new(header);
      dfa.add_transition(a, '1', b).unwrap();

      let mut cache = dfa.create_cache(());
      assert_eq!(cache.start(), Some(a));
      assert!(cache.steps().is_empty());

      assert_eq!(dfa.evaluate(&mut cache, "1".chars()), Ok(true));
      assert_eq!(cache.steps(), &[('1', b)]);

      assert_eq!(dfa.evaluate(&mut cache, "0".chars()), Ok(false));
      assert!(cache.steps().is_empty());

      assert_eq!(dfa.evaluate(&mut cache, "10".chars()), Ok(false));
      assert_eq!(cache.steps(), &[('1', b)]);

      assert_eq!(dfa.evaluate(&mut cache, "".chars()), Ok(false));

      assert_eq!(
        dfa.evaluate(&mut cache, "12".chars()),
        Err(RunError::UnknownSymbol {
          symbol: '2',
          position: 1
        })
      );
      assert_eq!(cache.steps(), &[('1', b)]);
    }
  }
}

pub mod nfa {
  use super::{SearchState, SimpleEvaluator};
  use crate::{error::RunError, header::StateSet, nfa::Nfa};

  /// The state sets a non-deterministic run moved through.
  #[derive(Debug, Clone, Default)]
  pub struct NfaCache {
    start: StateSet,
    steps: Vec<(char, StateSet)>,
  }

  impl NfaCache {
    pub fn new() -> Self { Self::default() }

    /// Epsilon-closure of the initial state, in discovery order.
    #[inline(always)]
    pub fn start(&self) -> &StateSet { &self.start }

    #[inline(always)]
    pub fn steps(&self) -> &[(char, StateSet)] { &self.steps }
  }

  impl SearchState<Nfa> for NfaCache {
    type Args = ();

    fn create(_args: ()) -> Self { Self::new() }

    fn reset(&mut self, eval: &Nfa) {
      self.start = eval.epsilon_closure([eval.header().initial()]);
      self.steps.clear();
    }
  }

  impl SimpleEvaluator<NfaCache> for Nfa {
    type Tok = char;
    type Success = bool;
    type Err = RunError;

    fn evaluate(
      &self,
      cache: &mut NfaCache,
      tokens: impl Iterator<Item=char>,
    ) -> Result<bool, RunError> {
      cache.reset(self);
      let header = self.header();

      let mut current: StateSet = cache.start.clone();
      for (position, symbol) in tokens.enumerate() {
        if !header.contains_symbol(symbol) {
          return Err(RunError::UnknownSymbol { symbol, position });
        }

        let mut moved = StateSet::default();
        for &s in current.iter() {
          if let Some(dests) = self.destinations(s, symbol) {
            moved.extend(dests.iter().copied());
          }
        }
        current = self.epsilon_closure(moved);
        tracing::trace!(%symbol, reachable = current.len(), "step");
        cache.steps.push((symbol, current.clone()));

        if current.is_empty() {
          tracing::debug!(%symbol, position, "no reachable states, rejecting");
          return Ok(false);
        }
      }

      let accepted = current.iter().any(|s| header.is_final(*s));
      tracing::debug!(reachable = current.len(), accepted, "input consumed");
      Ok(accepted)
    }
  }

  #[cfg(test)]
  mod test {
    use super::*;
    use crate::{
      header::Header,
      state::{State, StateId},
    };

    #[test]
    fn eval_epsilon_chain() {
      let mut header = Header::new(State::new("A"));
      let a = header.initial();
      let b = header.add_state(State::new("B"));
      let c = header.add_state(State::new("C"));
      header.add_symbol('0');
      header.add_final(c).unwrap();
      let mut nfa = Nfa::new(header);
      nfa.add_epsilon_transition(a, b).unwrap();
      nfa.add_epsilon_transition(b, c).unwrap();

      let mut cache = nfa.create_cache(());
      assert_eq!(cache.start().iter().copied().collect::<Vec<_>>(), vec![a, b, c]);

      assert_eq!(nfa.evaluate(&mut cache, "".chars()), Ok(true));
      assert!(cache.steps().is_empty());

      assert_eq!(nfa.evaluate(&mut cache, "0".chars()), Ok(false));
      assert_eq!(cache.steps().len(), 1);
      assert!(cache.steps()[0].1.is_empty());
    }

    #[test]
    fn eval_branching() {
      let mut header = Header::new(State::new("A"));
      let a = header.initial();
      let b = header.add_state(State::new("B"));
      let c = header.add_state(State::new("C"));
      header.add_symbol('0');
      header.add_symbol('1');
      header.add_final(c).unwrap();
      let mut nfa = Nfa::new(header);
      /* Strings over {0, 1} whose second-to-last symbol is 1. */
      nfa.add_transitions(a, '0', [a]).unwrap();
      nfa.add_transitions(a, '1', [a, b]).unwrap();
      nfa.add_transition(b, '0', c).unwrap();
      nfa.add_transition(b, '1', c).unwrap();

      let sets = |cache: &NfaCache| -> Vec<Vec<StateId>> {
        cache
          .steps()
          .iter()
          .map(|(_, set)| set.iter().copied().collect())
          .collect()
      };

      let mut cache = nfa.create_cache(());
      assert_eq!(nfa.evaluate(&mut cache, "0110".chars()), Ok(true));
      assert_eq!(sets(&cache), vec![vec![a], vec![a, b], vec![a, b, c], vec![
        a, c
      ]]);

      assert_eq!(nfa.evaluate(&mut cache, "0101".chars()), Ok(false));
      assert_eq!(sets(&cache), vec![vec![a], vec![a, b], vec![a, c], vec![
        a, b
      ]]);
      assert_eq!(nfa.evaluate(&mut cache, "11".chars()), Ok(true));

      assert_eq!(
        nfa.evaluate(&mut cache, "1x1".chars()),
        Err(RunError::UnknownSymbol {
          symbol: 'x',
          position: 1
        })
      );
      assert_eq!(cache.steps().len(), 1);
    }
  }
}
