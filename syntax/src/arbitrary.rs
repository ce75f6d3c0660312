/* Description: Strategies generating well-formed description files.

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

//! Strategies generating well-formed description files.

use core::fmt::Write as _;

use proptest::{collection::vec, option, prelude::*};

use crate::parser::MARKER;

const SYMBOLS: &str = "abc";

/// A generated transition table. Destinations are indices into `states`.
#[derive(Debug, Clone)]
pub struct Table {
  pub states: Vec<String>,
  pub finals: Vec<usize>,
  pub symbols: Vec<char>,
  pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone)]
pub struct TableRow {
  pub symbols: Vec<Vec<usize>>,
  pub epsilon: Vec<usize>,
}

impl Table {
  fn state_names(n: usize) -> Vec<String> { (0..n).map(|i| format!("q{i}")).collect() }

  pub fn is_nondeterministic(&self) -> bool {
    self
      .rows
      .iter()
      .any(|r| !r.epsilon.is_empty() || r.symbols.iter().any(|d| d.len() > 1))
  }

  fn write_names(&self, out: &mut String, indices: &[usize]) {
    let mut first = true;
    for &i in indices.iter() {
      if !first {
        out.push(' ');
      }
      first = false;
      out.push_str(&self.states[i]);
    }
  }

  pub fn render(&self) -> String {
    let mut out = String::new();

    let _ = write!(out, "#{}", self.states.len());
    for s in self.states.iter() {
      let _ = write!(out, " {s}");
    }
    out.push('\n');

    let _ = write!(out, "#{}", self.finals.len());
    for &i in self.finals.iter() {
      let _ = write!(out, " {}", self.states[i]);
    }
    out.push('\n');

    let _ = write!(out, "#{}", self.symbols.len());
    for c in self.symbols.iter() {
      let _ = write!(out, " {c}");
    }
    out.push('\n');

    out.push_str(MARKER);
    out.push('\n');

    for row in self.rows.iter() {
      for field in row.symbols.iter().chain([&row.epsilon]) {
        self.write_names(&mut out, field);
        out.push('#');
      }
      out.push('\n');
    }
    out
  }
}

/// Tables with at most one destination per field and no epsilon moves.
pub fn deterministic_table() -> impl Strategy<Value=Table> {
  (1usize..5, 1usize..=SYMBOLS.len()).prop_flat_map(|(n, k)| {
    (vec(0..n, 0..=n), vec(vec(option::of(0..n), k), n)).prop_map(move |(finals, cells)| Table {
      states: Table::state_names(n),
      finals,
      symbols: SYMBOLS.chars().take(k).collect(),
      rows: cells
        .into_iter()
        .map(|row| TableRow {
          symbols: row.into_iter().map(|c| c.into_iter().collect()).collect(),
          epsilon: Vec::new(),
        })
        .collect(),
    })
  })
}

/// Tables with any number of destinations per field, including epsilon moves.
pub fn nondeterministic_table() -> impl Strategy<Value=Table> {
  (1usize..5, 1usize..=SYMBOLS.len()).prop_flat_map(|(n, k)| {
    let row = (vec(vec(0..n, 0..3), k), vec(0..n, 0..3))
      .prop_map(|(symbols, epsilon)| TableRow { symbols, epsilon });
    (vec(0..n, 0..=n), vec(row, n)).prop_map(move |(finals, rows)| Table {
      states: Table::state_names(n),
      finals,
      symbols: SYMBOLS.chars().take(k).collect(),
      rows,
    })
  })
}

/// Input strings over the generated alphabets, occasionally with a symbol
/// outside of them.
pub fn input() -> impl Strategy<Value=String> { "[abcz]{0,8}" }
