/* Description: AST for automaton description files.

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

//! AST for automaton description files.

use core::fmt;

use smallvec::SmallVec;

use crate::parser::MARKER;

/// 1-based line number, counted after blank lines have been dropped.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct LineNumber(pub usize);

impl LineNumber {
  #[inline(always)]
  pub const fn from_index(index: usize) -> Self { Self(index + 1) }
}

impl fmt::Display for LineNumber {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}

/// The fixed header lines, in the order they must appear.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Section {
  States,
  FinalStates,
  Alphabet,
  Marker,
}

impl Section {
  pub const ALL: [Self; 4] = [Self::States, Self::FinalStates, Self::Alphabet, Self::Marker];

  /// Where this section lives, since header lines have fixed positions.
  #[inline]
  pub const fn line(self) -> LineNumber {
    match self {
      Self::States => LineNumber(1),
      Self::FinalStates => LineNumber(2),
      Self::Alphabet => LineNumber(3),
      Self::Marker => LineNumber(4),
    }
  }
}

impl fmt::Display for Section {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::States => write!(f, "state declaration"),
      Self::FinalStates => write!(f, "final state declaration"),
      Self::Alphabet => write!(f, "alphabet declaration"),
      Self::Marker => write!(f, "transition table marker"),
    }
  }
}

/// A `#<count> <entry>...` header line whose count has already been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration<'n> {
  pub line: LineNumber,
  pub entries: Vec<&'n str>,
}

impl<'n> Declaration<'n> {
  pub fn len(&self) -> usize { self.entries.len() }
}

impl<'n> fmt::Display for Declaration<'n> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "#{}", self.entries.len())?;
    for e in self.entries.iter() {
      write!(f, " {}", e)?;
    }
    Ok(())
  }
}

/// Names listed in one field of a transition row. Most fields hold zero or
/// one name.
pub type Destinations<'n> = SmallVec<[&'n str; 2]>;

/// One transition row: a field per alphabet symbol, then the epsilon field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'n> {
  pub line: LineNumber,
  pub symbols: Vec<Destinations<'n>>,
  pub epsilon: Destinations<'n>,
}

impl<'n> Row<'n> {
  /// Whether this row alone forces the automaton to be non-deterministic.
  pub fn is_nondeterministic(&self) -> bool {
    !self.epsilon.is_empty() || self.symbols.iter().any(|d| d.len() > 1)
  }
}

impl<'n> fmt::Display for Row<'n> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    for field in self.symbols.iter().chain([&self.epsilon]) {
      let (first, rest) = match field.split_first() {
        Some(x) => x,
        None => {
          write!(f, "#")?;
          continue;
        },
      };
      write!(f, "{}", first)?;
      for name in rest.iter() {
        write!(f, " {}", name)?;
      }
      write!(f, "#")?;
    }
    Ok(())
  }
}

/// A structurally valid description, borrowing its names from the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description<'n> {
  pub states: Declaration<'n>,
  pub finals: Declaration<'n>,
  pub alphabet: Declaration<'n>,
  /// One per entry of `states`, in the same order.
  pub rows: Vec<Row<'n>>,
}

impl<'n> Description<'n> {
  /// Alphabet symbols in declaration order. Only the first character of each
  /// alphabet token is significant.
  pub fn symbols(&self) -> impl Iterator<Item=char>+'_ {
    self
      .alphabet
      .entries
      .iter()
      .filter_map(|token| token.chars().next())
  }

  pub fn is_nondeterministic(&self) -> bool { self.rows.iter().any(Row::is_nondeterministic) }
}

impl<'n> fmt::Display for Description<'n> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    writeln!(f, "{}", self.states)?;
    writeln!(f, "{}", self.finals)?;
    writeln!(f, "{}", self.alphabet)?;
    writeln!(f, "{}", MARKER)?;
    for row in self.rows.iter() {
      writeln!(f, "{}", row)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod test {
  use smallvec::smallvec;

  use super::*;

  #[test]
  fn row_display() {
    let row = Row {
      line: LineNumber(5),
      symbols: vec![smallvec!["A", "B"], smallvec![]],
      epsilon: smallvec!["C"],
    };
    assert_eq!(&format!("{}", row), "A B##C#");
    assert!(row.is_nondeterministic());

    let row = Row {
      line: LineNumber(5),
      symbols: vec![smallvec![], smallvec!["B"]],
      epsilon: smallvec![],
    };
    assert_eq!(&format!("{}", row), "#B##");
    assert!(!row.is_nondeterministic());
  }

  #[test]
  fn section_lines() {
    for (i, s) in Section::ALL.into_iter().enumerate() {
      assert_eq!(s.line(), LineNumber::from_index(i));
    }
  }
}
