/* Description: Resolve a parsed description into an automaton.

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

//! Resolve a parsed description into an automaton.
//!
//! The description is classified as deterministic unless some row lists
//! more than one destination in a field or has a non-empty epsilon field.

use hashbrown::HashMap;
use simple_automata_syntax::{
  ast::{Description, LineNumber},
  error::{FormatErrorKind, ParseError, TransitionFormatErrorKind},
  parser,
};

use crate::{
  automaton::Automaton,
  dfa::{Dfa, DfaTransitions},
  error::LoadError,
  header::Header,
  nfa::{EpsilonTransitions, Nfa, NfaTransitions},
  state::{State, StateId},
  FxBuildHasher,
};

/// Parse and resolve `text` in one step.
///
///```
/// use simple_automata_core::{load, error::LoadError};
///
/// let nfa = load("#3 A B C\n#1 C\n#1 0\n--TABLA DE TRANSICIONES--\n#B#\n#C#\n##\n").unwrap();
/// assert!(!nfa.is_deterministic());
/// assert!(nfa.accepts("").unwrap());
///
/// assert!(matches!(load("#2 A\n"), Err(LoadError::Syntax(_))));
///```
pub fn load(text: &str) -> Result<Automaton, LoadError> {
  let desc = parser::parse(text)?;
  from_description(&desc)
}

pub fn from_description(desc: &Description<'_>) -> Result<Automaton, LoadError> {
  let Some((&first, rest)) = desc.states.entries.split_first() else {
    return Err(
      ParseError::Format {
        line: desc.states.line,
        kind: FormatErrorKind::NoStates,
      }
      .into(),
    );
  };

  let mut header = Header::new(State::new(first));
  let mut names: HashMap<&str, StateId, FxBuildHasher> = HashMap::default();
  names.insert(first, header.initial());
  /* Duplicate names collapse into one state, but each position still owns
   * the row at the same index. */
  let mut by_position: Vec<StateId> = Vec::with_capacity(desc.states.len());
  by_position.push(header.initial());
  for &name in rest.iter() {
    let id = *names
      .entry(name)
      .or_insert_with(|| header.add_state(State::new(name)));
    by_position.push(id);
  }

  let resolve = |line: LineNumber, name: &str| -> Result<StateId, LoadError> {
    names.get(name).copied().ok_or_else(|| LoadError::UnknownState {
      line,
      name: name.to_string(),
    })
  };

  for &name in desc.finals.entries.iter() {
    let id = resolve(desc.finals.line, name)?;
    header.mark_final(id);
  }

  for &token in desc.alphabet.entries.iter() {
    if token.chars().nth(1).is_some() {
      tracing::warn!(
        line = desc.alphabet.line.0,
        token,
        "only the first character of an alphabet entry is used"
      );
    }
  }
  let symbols: Vec<char> = desc.symbols().collect();
  for symbol in symbols.iter() {
    header.add_symbol(*symbol);
  }

  /* Descriptions may be built by hand, so the shape checks done by the
   * parser are repeated here. */
  if desc.rows.len() != by_position.len() {
    let line = desc
      .rows
      .get(by_position.len())
      .or(desc.rows.last())
      .map(|r| r.line)
      .unwrap_or(desc.states.line);
    return Err(
      ParseError::Format {
        line,
        kind: FormatErrorKind::RowCount {
          declared: by_position.len(),
          found: desc.rows.len(),
        },
      }
      .into(),
    );
  }
  if let Some(row) = desc.rows.iter().find(|r| r.symbols.len() != symbols.len()) {
    return Err(
      ParseError::TransitionFormat {
        line: row.line,
        kind: TransitionFormatErrorKind::FieldCount {
          expected: symbols.len() + 1,
          found: row.symbols.len() + 1,
        },
      }
      .into(),
    );
  }

  let mut transitions = NfaTransitions::default();
  let mut epsilon = EpsilonTransitions::default();
  let mut last_line: HashMap<(StateId, char), LineNumber, FxBuildHasher> = HashMap::default();
  for (row, &from) in desc.rows.iter().zip(by_position.iter()) {
    for (field, &symbol) in row.symbols.iter().zip(symbols.iter()) {
      if field.is_empty() {
        continue;
      }
      let dests = transitions.entry((from, symbol)).or_default();
      for &name in field.iter() {
        dests.insert(resolve(row.line, name)?);
      }
      last_line.insert((from, symbol), row.line);
    }
    if !row.epsilon.is_empty() {
      let dests = epsilon.entry(from).or_default();
      for &name in row.epsilon.iter() {
        dests.insert(resolve(row.line, name)?);
      }
    }
  }

  if desc.is_nondeterministic() {
    tracing::debug!(
      states = header.len(),
      transitions = transitions.len(),
      epsilon = epsilon.len(),
      "loaded non-deterministic automaton"
    );
    return Ok(Nfa::from_parts(header, transitions, epsilon).into());
  }

  let mut function = DfaTransitions::default();
  for ((from, symbol), dests) in transitions.into_iter() {
    match dests.first() {
      Some(&to) if dests.len() == 1 => {
        function.insert((from, symbol), to);
      },
      _ => {
        return Err(LoadError::DfaTransitionConflict {
          line: last_line
            .get(&(from, symbol))
            .copied()
            .unwrap_or(desc.alphabet.line),
          state: header.name(from).unwrap_or_default().to_string(),
          symbol,
          count: dests.len(),
        });
      },
    }
  }
  tracing::debug!(
    states = header.len(),
    transitions = function.len(),
    "loaded deterministic automaton"
  );
  Ok(Dfa::from_parts(header, function).into())
}

#[cfg(test)]
mod test {
  use proptest::prelude::*;
  use simple_automata_syntax::arbitrary;

  use super::*;
  use crate::error::RunError;

  const SIMPLE: &str = "\
#2 A B
#1 B
#2 0 1
--TABLA DE TRANSICIONES--
#B##
###
";

  #[test]
  fn load_dfa() {
    let automaton = load(SIMPLE).unwrap();
    assert!(automaton.is_deterministic());
    let header = automaton.header();
    assert_eq!(header.len(), 2);
    assert_eq!(header.final_ids().len(), 1);
    assert_eq!(header.alphabet().len(), 2);
    assert_eq!(header.initial_state().name(), "A");

    let dfa = automaton.as_dfa().unwrap();
    let a = header.lookup("A").unwrap();
    let b = header.lookup("B").unwrap();
    assert_eq!(dfa.transition(a, '1'), Some(b));
    assert_eq!(dfa.transitions().len(), 1);

    let run = automaton.run("1").unwrap();
    assert!(run.accepted);
    assert_eq!(&run.trace.to_string(), "(A) - 1 -> (B)");
    let run = automaton.run("0").unwrap();
    assert!(!run.accepted);
    assert_eq!(&run.trace.to_string(), "(A)");
    let run = automaton.run("10").unwrap();
    assert!(!run.accepted);
    assert_eq!(&run.trace.to_string(), "(A) - 1 -> (B)");
  }

  #[test]
  fn load_nfa() {
    let text = "#3 A B C\n#1 C\n#1 0\n--TABLA DE TRANSICIONES--\n#B#\n#C#\n##\n";
    let automaton = load(text).unwrap();
    assert!(!automaton.is_deterministic());
    let run = automaton.run("").unwrap();
    assert!(run.accepted);
    assert_eq!(&run.trace.to_string(), "(A, B, C)");
    assert!(!automaton.accepts("0").unwrap());
    assert_eq!(&automaton.run("0").unwrap().trace.to_string(), "(A, B, C) - 0 -> ()");
  }

  #[test]
  fn multiple_destinations_force_nfa() {
    let text = "#2 A B\n#1 B\n#1 x\n--TABLA DE TRANSICIONES--\nA B##\n##\n";
    let automaton = load(text).unwrap();
    let nfa = automaton.as_nfa().unwrap();
    let a = nfa.header().lookup("A").unwrap();
    assert_eq!(nfa.destinations(a, 'x').unwrap().len(), 2);
    assert!(nfa.epsilon_transitions().is_empty());
    assert_eq!(
      &automaton.run("xx").unwrap().trace.to_string(),
      "(A) - x -> (A, B) - x -> (A, B)"
    );
  }

  #[test]
  fn empty_table_is_a_dfa() {
    let automaton = load("#1 A\n#0\n#0\n--TABLA DE TRANSICIONES--\n#\n").unwrap();
    assert!(automaton.is_deterministic());
    assert!(!automaton.accepts("").unwrap());
    assert_eq!(
      automaton.accepts("a"),
      Err(RunError::UnknownSymbol {
        symbol: 'a',
        position: 0
      })
    );
  }

  #[test]
  fn truncated_alphabet_tokens() {
    let text = "#1 A\n#1 A\n#1 xyz\n--TABLA DE TRANSICIONES--\nA##\n";
    let automaton = load(text).unwrap();
    assert!(automaton.header().contains_symbol('x'));
    assert!(!automaton.header().contains_symbol('y'));
    assert!(automaton.accepts("xxx").unwrap());
  }

  #[test]
  fn structural_errors() {
    assert!(matches!(
      load("#2 A\n"),
      Err(LoadError::Syntax(ParseError::Format {
        kind: FormatErrorKind::CountMismatch {
          declared: 2,
          listed: 1
        },
        ..
      }))
    ));
  }

  #[test]
  fn unknown_names() {
    let text = "#2 A B\n#1 C\n#1 0\n--TABLA DE TRANSICIONES--\n##\n##\n";
    let err = load(text).unwrap_err();
    assert_eq!(err, LoadError::UnknownState {
      line: LineNumber(2),
      name: "C".to_string(),
    });
    assert_eq!(&err.to_string(), "line 2: \"C\" is not a declared state");

    let text = "#2 A B\n#0\n#1 0\n--TABLA DE TRANSICIONES--\n##\nQ##\n";
    assert_eq!(load(text).unwrap_err(), LoadError::UnknownState {
      line: LineNumber(6),
      name: "Q".to_string(),
    });
  }

  #[test]
  fn duplicate_names_share_a_state() {
    /* Both rows for "A" give it a move on '0', so the DFA would need two. */
    let text = "#3 A B A\n#0\n#1 0\n--TABLA DE TRANSICIONES--\nB##\n##\nA##\n";
    assert_eq!(load(text).unwrap_err(), LoadError::DfaTransitionConflict {
      line: LineNumber(7),
      state: "A".to_string(),
      symbol: '0',
      count: 2,
    });

    let text = "#3 A B A\n#0\n#1 0\n--TABLA DE TRANSICIONES--\nB##\n##\nB##\n";
    let automaton = load(text).unwrap();
    assert!(automaton.is_deterministic());
    assert_eq!(automaton.header().len(), 2);
  }

  #[test]
  fn hand_built_descriptions_are_checked() {
    let text = "#1 A\n#1 A\n#1 a\n--TABLA DE TRANSICIONES--\nA##\n";
    let desc = parser::parse(text).unwrap();

    let mut short_row = desc.clone();
    short_row.rows[0].symbols.pop();
    assert_eq!(
      from_description(&short_row).unwrap_err(),
      LoadError::Syntax(ParseError::TransitionFormat {
        line: LineNumber(5),
        kind: TransitionFormatErrorKind::FieldCount {
          expected: 2,
          found: 1,
        },
      })
    );

    let mut no_rows = desc.clone();
    no_rows.rows.clear();
    assert_eq!(
      from_description(&no_rows).unwrap_err(),
      LoadError::Syntax(ParseError::Format {
        line: LineNumber(1),
        kind: FormatErrorKind::RowCount {
          declared: 1,
          found: 0,
        },
      })
    );

    assert!(from_description(&desc).unwrap().accepts("aa").unwrap());
  }

  proptest! {
    #[test]
    fn deterministic_tables_load_as_dfas(table in arbitrary::deterministic_table()) {
      let automaton = load(&table.render()).unwrap();
      prop_assert!(automaton.is_deterministic());
      prop_assert_eq!(automaton.header().len(), table.states.len());
    }

    #[test]
    fn classification_follows_rows(table in arbitrary::nondeterministic_table()) {
      let automaton = load(&table.render()).unwrap();
      prop_assert_eq!(!automaton.is_deterministic(), table.is_nondeterministic());
    }

    #[test]
    fn dfa_and_nfa_agree(table in arbitrary::deterministic_table(), input in arbitrary::input()) {
      let dfa = load(&table.render()).unwrap();
      let nfa: Automaton = dfa.clone().into_nfa().into();
      prop_assert_eq!(dfa.accepts(&input), nfa.accepts(&input));
    }
  }
}
