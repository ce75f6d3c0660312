/* Description: Parser for automaton description files.

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

//! Parser for automaton description files.
//!
//! ```
//! use simple_automata_syntax::parser::parse;
//!
//! let text = "#2 A B\n#1 B\n#2 0 1\n--TABLA DE TRANSICIONES--\n#B##\n###\n";
//! let desc = parse(text).unwrap();
//! assert_eq!(desc.states.entries, vec!["A", "B"]);
//! assert_eq!(desc.symbols().collect::<String>(), "01");
//! assert!(!desc.is_nondeterministic());
//! ```

use crate::{
  ast::{Declaration, Description, Destinations, LineNumber, Row, Section},
  error::{FormatErrorKind, ParseError, TransitionFormatErrorKind},
};

/// The line separating the header from the transition rows.
pub const MARKER: &str = "--TABLA DE TRANSICIONES--";

pub fn parse(text: &str) -> Result<Description<'_>, ParseError> {
  let mut lines = text
    .lines()
    .filter(|l| !l.trim().is_empty())
    .map(str::trim_end)
    .enumerate()
    .map(|(i, l)| (LineNumber::from_index(i), l));

  let mut header_line = |section: Section| {
    lines.next().ok_or(ParseError::Format {
      line: section.line(),
      kind: FormatErrorKind::MissingLine(section),
    })
  };

  let (line, l) = header_line(Section::States)?;
  let states = parse_declaration(Section::States, line, l)?;
  if states.entries.is_empty() {
    return Err(ParseError::Format {
      line,
      kind: FormatErrorKind::NoStates,
    });
  }

  let (line, l) = header_line(Section::FinalStates)?;
  let finals = parse_declaration(Section::FinalStates, line, l)?;

  let (line, l) = header_line(Section::Alphabet)?;
  let alphabet = parse_declaration(Section::Alphabet, line, l)?;

  let (line, l) = header_line(Section::Marker)?;
  if l != MARKER {
    return Err(ParseError::Format {
      line,
      kind: FormatErrorKind::BadMarker,
    });
  }

  let mut rows: Vec<Row<'_>> = Vec::with_capacity(states.len());
  let mut last_line = line;
  for (line, l) in lines {
    rows.push(parse_row(line, l, alphabet.len())?);
    last_line = line;
  }

  if rows.len() != states.len() {
    /* Point at the first surplus row, or just past the end if rows are
     * missing. */
    let line = rows
      .get(states.len())
      .map(|r| r.line)
      .unwrap_or(LineNumber(last_line.0 + 1));
    return Err(ParseError::Format {
      line,
      kind: FormatErrorKind::RowCount {
        declared: states.len(),
        found: rows.len(),
      },
    });
  }

  Ok(Description {
    states,
    finals,
    alphabet,
    rows,
  })
}

fn parse_declaration<'n>(
  section: Section,
  line: LineNumber,
  l: &'n str,
) -> Result<Declaration<'n>, ParseError> {
  let format_error = |kind| ParseError::Format { line, kind };

  let rest = l
    .strip_prefix('#')
    .ok_or_else(|| format_error(FormatErrorKind::MissingHash(section)))?;
  let mut tokens = rest.split_whitespace();

  let count = tokens.next().unwrap_or("");
  let declared: usize = count
    .parse()
    .map_err(|_| format_error(FormatErrorKind::BadCount(count.to_string())))?;

  let entries: Vec<&'n str> = tokens.collect();
  if entries.len() != declared {
    return Err(format_error(FormatErrorKind::CountMismatch {
      declared,
      listed: entries.len(),
    }));
  }

  Ok(Declaration { line, entries })
}

fn parse_destinations(field: &str) -> Destinations<'_> { field.split_whitespace().collect() }

fn parse_row(line: LineNumber, l: &str, num_symbols: usize) -> Result<Row<'_>, ParseError> {
  let transition_error = |kind| ParseError::TransitionFormat { line, kind };

  /* Every field (one per symbol, plus epsilon) is terminated by a '#', so
   * splitting leaves one extra piece after the last '#'. That piece is
   * ignored. */
  let mut pieces: Vec<&str> = l.split('#').collect();
  let expected = num_symbols + 1;
  if pieces.len() != expected + 1 {
    return Err(transition_error(TransitionFormatErrorKind::FieldCount {
      expected,
      found: pieces.len() - 1,
    }));
  }

  if let Some(trailing) = pieces.pop() {
    if !trailing.trim().is_empty() {
      tracing::debug!(line = line.0, trailing, "ignoring text after the last '#'");
    }
  }
  let epsilon = pieces.pop().map(parse_destinations).unwrap_or_default();
  let symbols = pieces.into_iter().map(parse_destinations).collect();

  Ok(Row {
    line,
    symbols,
    epsilon,
  })
}
