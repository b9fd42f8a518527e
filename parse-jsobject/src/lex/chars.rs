pub fn is_line_terminator(c: char) -> bool {
  matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

pub fn is_whitespace(c: char) -> bool {
  matches!(
    c,
    '\t'
      | '\u{0b}'
      | '\u{0c}'
      | ' '
      | '\u{a0}'
      | '\u{1680}'
      | '\u{2000}'..='\u{200a}'
      | '\u{202f}'
      | '\u{205f}'
      | '\u{3000}'
      | '\u{feff}'
  )
}

pub fn is_id_start(c: char) -> bool {
  c == '$' || c == '_' || c.is_ascii_alphabetic()
}

/// Any non-ASCII code point that isn't whitespace is treated as part of an identifier; the engine
/// running the code does the precise Unicode check.
pub fn is_id_continue(c: char) -> bool {
  if c.is_ascii() {
    is_id_start(c) || c.is_ascii_digit()
  } else {
    !c.is_whitespace() && !is_whitespace(c) && !is_line_terminator(c)
  }
}

/// Digits of a numeric literal, including `_` separators.
pub fn is_digit_or_separator(c: char, radix: u32) -> bool {
  c == '_' || c.is_digit(radix)
}
