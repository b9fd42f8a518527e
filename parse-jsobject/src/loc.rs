use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::token::TT;
use serde::Serialize;
use std::cmp::{max, min};
use std::ops::{Add, AddAssign};

/// A location within the current source expressed as UTF-8 byte offsets.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn error(self, typ: SyntaxErrorType, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError::new(typ, self, actual_token)
  }

  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn len(&self) -> usize {
    self.1.saturating_sub(self.0)
  }

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }

  /// Returns the slice of `source` covered by this location, or an empty string if the location
  /// does not fall on valid boundaries of `source`.
  pub fn slice<'s>(&self, source: &'s str) -> &'s str {
    source.get(self.0..self.1).unwrap_or("")
  }

  /// One-based line and column of the start of this location.
  pub fn start_position(&self, source: &str) -> Position {
    Position::of_offset(source, self.0)
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

/// A one-based line and column pair. Columns count Unicode scalar values, which is what the
/// editor gutter displays.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Position {
  pub line: usize,
  pub column: usize,
}

impl Position {
  pub fn of_offset(source: &str, offset: usize) -> Position {
    let mut offset = min(offset, source.len());
    while !source.is_char_boundary(offset) {
      offset -= 1;
    }
    let before = &source[..offset];
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    Position {
      line: before.matches('\n').count() + 1,
      column: before[line_start..].chars().count() + 1,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn position_counts_lines_and_chars() {
    let source = "ab\ncdé\nf";
    assert_eq!(Position::of_offset(source, 0), Position { line: 1, column: 1 });
    assert_eq!(Position::of_offset(source, 3), Position { line: 2, column: 1 });
    // `é` is two bytes; the offset after it is column 4.
    assert_eq!(Position::of_offset(source, 7), Position { line: 2, column: 4 });
    assert_eq!(Position::of_offset(source, 8), Position { line: 3, column: 1 });
  }

  #[test]
  fn position_clamps_out_of_range_offsets() {
    let source = "x\ny";
    assert_eq!(Position::of_offset(source, 99), Position { line: 2, column: 2 });
    // Inside a multi-byte char rounds down to its start.
    assert_eq!(Position::of_offset("é", 1), Position { line: 1, column: 1 });
  }

  #[test]
  fn extending_locs() {
    let mut loc = Loc(4, 6);
    loc += Loc(1, 2);
    assert_eq!(loc, Loc(1, 6));
    assert_eq!(Loc(3, 5) + Loc(8, 9), Loc(3, 9));
    assert_eq!(Loc(3, 5).slice("0123456"), "34");
  }
}
