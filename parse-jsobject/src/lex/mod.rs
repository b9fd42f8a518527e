use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;
use ahash::HashMap;
use aho_corasick::AhoCorasick;
use aho_corasick::AhoCorasickBuilder;
use aho_corasick::AhoCorasickKind;
use aho_corasick::Anchored;
use aho_corasick::Input;
use aho_corasick::MatchKind;
use aho_corasick::StartKind;
use chars::is_digit_or_separator;
use chars::is_id_continue;
use chars::is_id_start;
use chars::is_line_terminator;
use chars::is_whitespace;
use core::ops::Index;
use memchr::memchr3;
use memchr::memmem;
use once_cell::sync::Lazy;

mod chars;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LexMode {
  /// A `/` starts a regular expression literal rather than a division.
  SlashIsRegex,
  Standard,
  /// Resumes a template literal after the `}` that closes a substitution.
  TemplateStrContinue,
}

#[rustfmt::skip]
const PUNCTUATORS: &[(TT, &str)] = &[
  (TT::Ampersand, "&"), (TT::AmpersandAmpersand, "&&"), (TT::AmpersandAmpersandEquals, "&&="),
  (TT::AmpersandEquals, "&="),
  (TT::Asterisk, "*"), (TT::AsteriskAsterisk, "**"), (TT::AsteriskAsteriskEquals, "**="),
  (TT::AsteriskEquals, "*="),
  (TT::Bar, "|"), (TT::BarBar, "||"), (TT::BarBarEquals, "||="), (TT::BarEquals, "|="),
  (TT::BraceOpen, "{"), (TT::BraceClose, "}"),
  (TT::BracketOpen, "["), (TT::BracketClose, "]"),
  (TT::ParenthesisOpen, "("), (TT::ParenthesisClose, ")"),
  (TT::Caret, "^"), (TT::CaretEquals, "^="),
  (TT::ChevronLeft, "<"), (TT::ChevronLeftEquals, "<="), (TT::ChevronLeftChevronLeft, "<<"),
  (TT::ChevronLeftChevronLeftEquals, "<<="),
  (TT::ChevronRight, ">"), (TT::ChevronRightEquals, ">="), (TT::ChevronRightChevronRight, ">>"),
  (TT::ChevronRightChevronRightEquals, ">>="), (TT::ChevronRightChevronRightChevronRight, ">>>"),
  (TT::ChevronRightChevronRightChevronRightEquals, ">>>="),
  (TT::Colon, ":"), (TT::Comma, ","), (TT::Semicolon, ";"), (TT::Tilde, "~"),
  (TT::Dot, "."), (TT::DotDotDot, "..."),
  (TT::Equals, "="), (TT::EqualsEquals, "=="), (TT::EqualsEqualsEquals, "==="),
  (TT::EqualsChevronRight, "=>"),
  (TT::Exclamation, "!"), (TT::ExclamationEquals, "!="), (TT::ExclamationEqualsEquals, "!=="),
  (TT::Hyphen, "-"), (TT::HyphenEquals, "-="), (TT::HyphenHyphen, "--"),
  (TT::Plus, "+"), (TT::PlusEquals, "+="), (TT::PlusPlus, "++"),
  (TT::Percent, "%"), (TT::PercentEquals, "%="),
  (TT::Slash, "/"), (TT::SlashEquals, "/="),
  (TT::Question, "?"), (TT::QuestionDot, "?."), (TT::QuestionDotBracketOpen, "?.["),
  (TT::QuestionDotParenthesisOpen, "?.("), (TT::QuestionQuestion, "??"),
  (TT::QuestionQuestionEquals, "??="),
];

// `true`, `false` and `null` lex like keywords and, like keywords, are valid property names.
#[rustfmt::skip]
const KEYWORDS: &[(TT, &str)] = &[
  (TT::KeywordAsync, "async"), (TT::KeywordAwait, "await"), (TT::KeywordBreak, "break"),
  (TT::KeywordCase, "case"), (TT::KeywordCatch, "catch"), (TT::KeywordClass, "class"),
  (TT::KeywordConst, "const"), (TT::KeywordContinue, "continue"),
  (TT::KeywordDebugger, "debugger"), (TT::KeywordDefault, "default"),
  (TT::KeywordDelete, "delete"), (TT::KeywordDo, "do"), (TT::KeywordElse, "else"),
  (TT::KeywordExport, "export"), (TT::KeywordExtends, "extends"),
  (TT::KeywordFinally, "finally"), (TT::KeywordFor, "for"), (TT::KeywordFunction, "function"),
  (TT::KeywordGet, "get"), (TT::KeywordIf, "if"), (TT::KeywordImport, "import"),
  (TT::KeywordIn, "in"), (TT::KeywordInstanceof, "instanceof"), (TT::KeywordLet, "let"),
  (TT::KeywordNew, "new"), (TT::KeywordOf, "of"), (TT::KeywordReturn, "return"),
  (TT::KeywordSet, "set"), (TT::KeywordStatic, "static"), (TT::KeywordSuper, "super"),
  (TT::KeywordSwitch, "switch"), (TT::KeywordThis, "this"), (TT::KeywordThrow, "throw"),
  (TT::KeywordTry, "try"), (TT::KeywordTypeof, "typeof"), (TT::KeywordVar, "var"),
  (TT::KeywordVoid, "void"), (TT::KeywordWhile, "while"), (TT::KeywordWith, "with"),
  (TT::KeywordYield, "yield"),
  (TT::LiteralFalse, "false"), (TT::LiteralNull, "null"), (TT::LiteralTrue, "true"),
];

static PUNCTUATOR_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| {
  AhoCorasickBuilder::new()
    .start_kind(StartKind::Anchored)
    .kind(Some(AhoCorasickKind::DFA))
    .match_kind(MatchKind::LeftmostLongest)
    .build(PUNCTUATORS.iter().map(|&(_, syn)| syn))
    .unwrap()
});

static KEYWORD_BY_WORD: Lazy<HashMap<&'static str, TT>> =
  Lazy::new(|| KEYWORDS.iter().map(|&(tt, word)| (word, tt)).collect());

static SYNTAX_BY_TOKEN: Lazy<HashMap<TT, &'static str>> =
  Lazy::new(|| PUNCTUATORS.iter().chain(KEYWORDS).copied().collect());

/// The fixed source text of a punctuator or keyword token type.
pub fn syntax_of(tt: TT) -> Option<&'static str> {
  SYNTAX_BY_TOKEN.get(&tt).copied()
}

pub fn is_keyword(tt: TT) -> bool {
  KEYWORDS.iter().any(|&(k, _)| k == tt)
}

pub struct Lexer<'a> {
  source: &'a str,
  next: usize,
}

impl<'a> Lexer<'a> {
  pub fn new(source: &'a str) -> Lexer<'a> {
    Lexer { source, next: 0 }
  }

  pub fn source_range(&self) -> Loc {
    Loc(0, self.source.len())
  }

  /// Moves the cursor. The parser uses this to rewind after discarding buffered tokens.
  pub fn set_next(&mut self, next: usize) {
    self.next = next;
  }

  fn rest(&self) -> &'a str {
    &self.source[self.next..]
  }

  fn at_end(&self) -> bool {
    self.next >= self.source.len()
  }

  fn peek(&self) -> Option<char> {
    self.rest().chars().next()
  }

  fn bump(&mut self, len: usize) {
    self.next = (self.next + len).min(self.source.len());
  }

  fn bump_char(&mut self) -> Option<char> {
    let c = self.peek()?;
    self.next += c.len_utf8();
    Some(c)
  }

  fn eat(&mut self, c: char) -> bool {
    let matched = self.peek() == Some(c);
    if matched {
      self.next += c.len_utf8();
    }
    matched
  }

  /// Returns the number of bytes consumed.
  fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
    let rest = self.rest();
    let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
    self.next += len;
    len
  }

  /// Returns whether any of the skipped whitespace or comments contained a line terminator.
  fn skip_trivia(&mut self) -> bool {
    let mut saw_line_terminator = false;
    loop {
      let rest = self.rest();
      if rest.starts_with("//") {
        self.eat_while(|c| !is_line_terminator(c));
      } else if rest.starts_with("/*") {
        // An unterminated comment runs to the end of the source.
        let len = memmem::find(&rest.as_bytes()[2..], b"*/").map_or(rest.len(), |i| i + 4);
        saw_line_terminator |= rest[..len].contains(is_line_terminator);
        self.bump(len);
      } else {
        match self.peek() {
          Some(c) if is_line_terminator(c) => {
            saw_line_terminator = true;
            self.bump(c.len_utf8());
          }
          Some(c) if is_whitespace(c) => self.bump(c.len_utf8()),
          _ => return saw_line_terminator,
        };
      }
    }
  }

  fn token(&mut self, mode: LexMode) -> Option<TT> {
    let bytes = self.rest().as_bytes();
    match self.peek()? {
      c if c == '\\' || is_id_start(c) || !c.is_ascii() => self.identifier_or_keyword(),
      '0'..='9' => self.number(),
      '.' if bytes.get(1).is_some_and(u8::is_ascii_digit) => self.number(),
      '"' | '\'' => self.string(),
      '`' => {
        self.bump(1);
        self.template_part()
      }
      '/' if mode == LexMode::SlashIsRegex => self.regex(),
      // `a?.5:b` is a conditional with a number, not an optional chain.
      '?' if matches!(bytes, [_, b'.', d, ..] if d.is_ascii_digit()) => {
        self.bump(1);
        Some(TT::Question)
      }
      _ => self.punctuator(),
    }
  }

  fn punctuator(&mut self) -> Option<TT> {
    let m = PUNCTUATOR_MATCHER.find(Input::new(self.rest()).anchored(Anchored::Yes))?;
    self.bump(m.end());
    Some(PUNCTUATORS[m.pattern().as_usize()].0)
  }

  fn identifier_or_keyword(&mut self) -> Option<TT> {
    let start = self.next;
    loop {
      self.eat_while(is_id_continue);
      if self.peek() != Some('\\') {
        break;
      }
      self.unicode_escape()?;
    }
    let word = &self.source[start..self.next];
    if word.is_empty() {
      return None;
    }
    // A word spelled with escapes never matches a keyword here.
    Some(KEYWORD_BY_WORD.get(word).copied().unwrap_or(TT::Identifier))
  }

  /// `\uXXXX` or `\u{X...}`.
  fn unicode_escape(&mut self) -> Option<()> {
    self.bump(1);
    if !self.eat('u') {
      return None;
    }
    if self.eat('{') {
      if self.eat_while(|c| c.is_ascii_hexdigit()) == 0 || !self.eat('}') {
        return None;
      }
    } else {
      let hex = self.rest().get(..4)?;
      if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
      }
      self.bump(4);
    }
    Some(())
  }

  fn number(&mut self) -> Option<TT> {
    let radix = match self.rest().as_bytes() {
      [b'0', b'b' | b'B', ..] => 2,
      [b'0', b'o' | b'O', ..] => 8,
      [b'0', b'x' | b'X', ..] => 16,
      _ => 10,
    };
    if radix != 10 {
      self.bump(2);
      if self.eat_while(|c| is_digit_or_separator(c, radix)) == 0 {
        return None;
      }
      return Some(if self.eat('n') {
        TT::LiteralBigInt
      } else {
        TT::LiteralNumber
      });
    }

    self.eat_while(|c| is_digit_or_separator(c, 10));
    if self.eat('n') {
      return Some(TT::LiteralBigInt);
    }
    if self.eat('.') {
      self.eat_while(|c| is_digit_or_separator(c, 10));
    }
    if self.eat('e') || self.eat('E') {
      let _ = self.eat('+') || self.eat('-');
      if self.eat_while(|c| c.is_ascii_digit()) == 0 {
        return None;
      }
    }
    Some(TT::LiteralNumber)
  }

  fn string(&mut self) -> Option<TT> {
    let quote = self.bump_char()?;
    loop {
      let rest = self.rest();
      let Some(i) = memchr3(b'\\', b'\n', quote as u8, rest.as_bytes()) else {
        self.bump(rest.len());
        return None;
      };
      self.bump(i);
      match self.bump_char()? {
        '\\' => {
          // `\` followed by CRLF is a single line continuation.
          if self.bump_char()? == '\r' {
            self.eat('\n');
          }
        }
        // Unescaped line terminators cannot appear in a string.
        '\n' => return None,
        _ => return Some(TT::LiteralString),
      };
    }
  }

  /// Template text up to and including the closing backtick or the next `${`.
  fn template_part(&mut self) -> Option<TT> {
    loop {
      let rest = self.rest();
      let Some(i) = memchr3(b'\\', b'`', b'$', rest.as_bytes()) else {
        self.bump(rest.len());
        return None;
      };
      self.bump(i);
      match self.bump_char()? {
        '\\' => {
          self.bump_char()?;
        }
        '`' => return Some(TT::LiteralTemplatePartStringEnd),
        _ => {
          if self.eat('{') {
            return Some(TT::LiteralTemplatePartString);
          }
        }
      };
    }
  }

  fn regex(&mut self) -> Option<TT> {
    self.bump(1);
    let mut in_class = false;
    loop {
      match self.bump_char()? {
        '\\' => {
          if is_line_terminator(self.bump_char()?) {
            return None;
          }
        }
        '/' if !in_class => break,
        '[' => in_class = true,
        ']' => in_class = false,
        c if is_line_terminator(c) => return None,
        _ => {}
      };
    }
    // Flags.
    self.eat_while(is_id_continue);
    Some(TT::LiteralRegex)
  }
}

impl<'a> Index<Loc> for Lexer<'a> {
  type Output = str;

  fn index(&self, index: Loc) -> &Self::Output {
    &self.source[index.0..index.1]
  }
}

pub fn lex_next(lexer: &mut Lexer<'_>, mode: LexMode) -> Token {
  let in_template = mode == LexMode::TemplateStrContinue;
  let preceded_by_line_terminator = !in_template && lexer.skip_trivia();
  let start = lexer.next;
  if !in_template && lexer.at_end() {
    return Token {
      loc: Loc(start, start),
      typ: TT::EOF,
      preceded_by_line_terminator,
    };
  }

  let typ = if in_template {
    lexer.template_part()
  } else {
    lexer.token(mode)
  }
  .unwrap_or(TT::Invalid);
  // Invalid tokens cover at least one character so that errors point somewhere.
  if typ == TT::Invalid && lexer.next == start {
    lexer.bump_char();
  }
  Token {
    loc: Loc(start, lexer.next),
    typ,
    preceded_by_line_terminator,
  }
}
