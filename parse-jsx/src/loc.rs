use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::token::TT;
use serde::Deserialize;
use serde::Serialize;
use std::cmp::max;
use std::cmp::min;
use std::ops::Add;
use std::ops::AddAssign;

/// A location within the lexed source expressed as UTF-8 byte offsets.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn error(self, typ: SyntaxErrorType, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError::new(typ, self, actual_token)
  }

  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn len(&self) -> usize {
    self.1 - self.0
  }

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }
}

impl Add for Loc {
  type Output = Loc;

  fn add(self, rhs: Self) -> Self::Output {
    let mut new = self;
    new.extend(rhs);
    new
  }
}

impl AddAssign for Loc {
  fn add_assign(&mut self, rhs: Self) {
    self.extend(rhs);
  }
}

/// ESTree position: 1-based line, 0-based column counted in characters.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Position {
  pub line: usize,
  pub column: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct SourceLocation {
  pub start: Position,
  pub end: Position,
}

/// Maps byte offsets of the lexed text to line/column positions of the user's text.
///
/// `shift` is the number of synthetic bytes prepended before lexing (e.g. the `<>` wrapper used
/// for JSX fragments), so offsets inside the wrapper clamp to the start of the user's text.
pub struct LineIndex<'a> {
  source: &'a str,
  line_starts: Vec<usize>,
  shift: usize,
}

impl<'a> LineIndex<'a> {
  pub fn new(source: &'a str) -> LineIndex<'a> {
    LineIndex::with_shift(source, 0)
  }

  pub fn with_shift(source: &'a str, shift: usize) -> LineIndex<'a> {
    let mut line_starts = vec![0];
    for (i, b) in source.bytes().enumerate() {
      if b == b'\n' {
        line_starts.push(i + 1);
      };
    }
    LineIndex {
      source,
      line_starts,
      shift,
    }
  }

  pub fn position(&self, lexed_offset: usize) -> Position {
    let mut offset = lexed_offset.saturating_sub(self.shift).min(self.source.len());
    while !self.source.is_char_boundary(offset) {
      offset -= 1;
    }
    let line = match self.line_starts.binary_search(&offset) {
      Ok(i) => i,
      Err(i) => i - 1,
    };
    let column = self.source[self.line_starts[line]..offset].chars().count();
    Position {
      line: line + 1,
      column,
    }
  }

  pub fn source_location(&self, loc: Loc) -> SourceLocation {
    SourceLocation {
      start: self.position(loc.0),
      end: self.position(loc.1),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn positions_are_one_based_lines_and_zero_based_columns() {
    let idx = LineIndex::new("ab\ncd\n\nxyz");
    assert_eq!(idx.position(0), Position { line: 1, column: 0 });
    assert_eq!(idx.position(4), Position { line: 2, column: 1 });
    assert_eq!(idx.position(7), Position { line: 4, column: 0 });
    assert_eq!(idx.position(100), Position { line: 4, column: 3 });
  }

  #[test]
  fn shifted_offsets_map_back_to_user_text() {
    let idx = LineIndex::with_shift("hello", 2);
    assert_eq!(idx.position(0), Position { line: 1, column: 0 });
    assert_eq!(idx.position(3), Position { line: 1, column: 1 });
  }

  #[test]
  fn columns_count_characters() {
    let idx = LineIndex::new("é=1");
    assert_eq!(idx.position(2), Position { line: 1, column: 1 });
  }

  #[test]
  fn loc_add_extends() {
    assert_eq!(Loc(3, 4) + Loc(1, 2), Loc(1, 4));
  }
}
