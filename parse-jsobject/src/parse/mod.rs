use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::lex_next;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;
use expr::pat::ParsePatternRules;

pub mod drive;
pub mod expr;
pub mod func;
pub mod object;
pub mod operator;
pub mod stmt;
#[cfg(test)]
mod tests;
pub mod toplevel;

/// Context threaded by value through every parse method. Nested constructs that change the rules,
/// like generator bodies or loops, pass an altered copy.
#[derive(Clone, Copy)]
pub struct ParseCtx {
  pub rules: ParsePatternRules,
  /// Inside a loop body, where `continue` is valid.
  pub in_loop: bool,
  /// Inside a loop or `switch` body, where an unlabelled `break` is valid.
  pub in_breakable: bool,
  /// Inside a non-arrow function, or an arrow or class nested in one.
  pub new_target_allowed: bool,
}

impl ParseCtx {
  pub fn with_rules(&self, rules: ParsePatternRules) -> ParseCtx {
    ParseCtx { rules, ..*self }
  }

  pub fn in_loop(&self) -> ParseCtx {
    ParseCtx {
      in_loop: true,
      in_breakable: true,
      ..*self
    }
  }

  pub fn in_switch(&self) -> ParseCtx {
    ParseCtx {
      in_breakable: true,
      ..*self
    }
  }

  /// The context of a function's parameters and body. Jumps never cross a function boundary.
  pub fn in_function(&self, arrow: bool) -> ParseCtx {
    ParseCtx {
      in_loop: false,
      in_breakable: false,
      new_target_allowed: self.new_target_allowed || !arrow,
      ..*self
    }
  }
}

impl Default for ParseCtx {
  fn default() -> Self {
    ParseCtx {
      rules: ParsePatternRules {
        yield_allowed: true,
      },
      in_loop: false,
      in_breakable: false,
      new_target_allowed: false,
    }
  }
}

/// Result of a conditional consume.
#[derive(Debug)]
#[must_use]
pub struct MaybeToken {
  loc: Loc,
  matched: bool,
}

impl MaybeToken {
  pub fn is_match(&self) -> bool {
    self.matched
  }

  pub fn match_loc(&self) -> Option<Loc> {
    self.matched.then_some(self.loc)
  }

  /// Runs `f` only if the token matched.
  pub fn and_then<R, F: FnOnce() -> SyntaxResult<R>>(self, f: F) -> SyntaxResult<Option<R>> {
    self.matched.then(f).transpose()
  }
}

pub struct ParserCheckpoint {
  cursor: usize,
}

/// How deeply expressions, statements and patterns may nest before parsing gives up. Each level
/// costs several stack frames, so this keeps the deepest input well inside a 2 MiB thread stack.
pub const MAX_NESTING: usize = 64;

/// How many operators may be folded into the expressions enclosing any point. Folding doesn't
/// recurse, but every operator adds a level to the tree that later passes walk recursively.
pub const MAX_OPERATOR_CHAIN: usize = 1024;

/// A label in scope at the statement being parsed.
pub struct Label {
  pub name: String,
  /// Whether it labels a loop, so `continue` can target it.
  pub is_loop: bool,
}

pub struct Parser<'a> {
  lexer: Lexer<'a>,
  /// Every token lexed so far, with the mode it was lexed in. Rewinding only moves `cursor`, so
  /// backtracking never lexes the same token twice unless the mode changes.
  lookahead: Vec<(Token, LexMode)>,
  /// Index in `lookahead` of the next token to hand out.
  cursor: usize,
  /// Labels enclosing the current statement, innermost last. Reset at each function boundary.
  labels: Vec<Label>,
  depth: usize,
  operator_chain: usize,
}

// Parsing methods live in the submodules as further `impl Parser` blocks.
impl<'a> Parser<'a> {
  pub fn new(lexer: Lexer<'a>) -> Parser<'a> {
    Parser {
      lexer,
      lookahead: Vec::new(),
      cursor: 0,
      labels: Vec::new(),
      depth: 0,
      operator_chain: 0,
    }
  }

  /// Runs `f` one nesting level deeper, failing instead if that's too deep.
  pub fn nested<T, F: FnOnce(&mut Self) -> SyntaxResult<T>>(&mut self, f: F) -> SyntaxResult<T> {
    if self.depth >= MAX_NESTING {
      return Err(self.peek().error(SyntaxErrorType::NestingTooDeep));
    };
    self.depth += 1;
    let result = f(self);
    self.depth -= 1;
    result
  }

  /// Counts one more operator applied in the expression being parsed. Callers restore the
  /// count once that expression is complete.
  pub fn chain_operator(&mut self, at: &Token) -> SyntaxResult<()> {
    if self.operator_chain >= MAX_OPERATOR_CHAIN {
      return Err(at.error(SyntaxErrorType::NestingTooDeep));
    };
    self.operator_chain += 1;
    Ok(())
  }

  pub fn label(&self, name: &str) -> Option<&Label> {
    self.labels.iter().rev().find(|l| l.name == name)
  }

  /// Runs `f` with `label` in scope.
  pub fn with_label<T, F: FnOnce(&mut Self) -> SyntaxResult<T>>(
    &mut self,
    label: Label,
    f: F,
  ) -> SyntaxResult<T> {
    self.labels.push(label);
    let result = f(self);
    self.labels.pop();
    result
  }

  /// Runs `f`, a function body, with no labels in scope.
  pub fn without_labels<T, F: FnOnce(&mut Self) -> SyntaxResult<T>>(
    &mut self,
    f: F,
  ) -> SyntaxResult<T> {
    let outer = std::mem::take(&mut self.labels);
    let result = f(self);
    self.labels = outer;
    result
  }

  pub fn source_range(&self) -> Loc {
    self.lexer.source_range()
  }

  pub fn str(&self, loc: Loc) -> &str {
    &self.lexer[loc]
  }

  pub fn string(&self, loc: Loc) -> String {
    self.str(loc).to_string()
  }

  pub fn checkpoint(&self) -> ParserCheckpoint {
    ParserCheckpoint {
      cursor: self.cursor,
    }
  }

  /// Spans every token consumed since `checkpoint`. Empty, at the last consumed token's end, if
  /// nothing was.
  pub fn since_checkpoint(&self, checkpoint: &ParserCheckpoint) -> Loc {
    let end = self
      .cursor
      .checked_sub(1)
      .map_or(0, |last| self.lookahead[last].0.loc.1);
    if checkpoint.cursor < self.cursor {
      Loc(self.lookahead[checkpoint.cursor].0.loc.0, end)
    } else {
      Loc(end, end)
    }
  }

  pub fn restore_checkpoint(&mut self, checkpoint: ParserCheckpoint) {
    self.cursor = checkpoint.cursor;
  }

  /// The token at the cursor, lexed in `mode`.
  fn token_at_cursor(&mut self, mode: LexMode) -> Token {
    // A token lexed in another mode may have a different type and length, so it and everything
    // after it must be lexed again.
    if self
      .lookahead
      .get(self.cursor)
      .is_some_and(|(_, lexed_in)| *lexed_in != mode)
    {
      self.lookahead.truncate(self.cursor);
      let resume_at = self.lookahead.last().map_or(0, |(t, _)| t.loc.1);
      self.lexer.set_next(resume_at);
    };
    if self.cursor == self.lookahead.len() {
      let token = lex_next(&mut self.lexer, mode);
      self.lookahead.push((token, mode));
    };
    self.lookahead[self.cursor].0.clone()
  }

  fn consume_when(&mut self, mode: LexMode, pred: impl FnOnce(&Token) -> bool) -> MaybeToken {
    let t = self.token_at_cursor(mode);
    let matched = pred(&t);
    if matched {
      self.cursor += 1;
    };
    MaybeToken {
      loc: t.loc,
      matched,
    }
  }

  pub fn consume_with_mode(&mut self, mode: LexMode) -> Token {
    let t = self.token_at_cursor(mode);
    self.cursor += 1;
    t
  }

  pub fn consume(&mut self) -> Token {
    self.consume_with_mode(LexMode::Standard)
  }

  /// Consumes the next token, whatever it is, and returns its source text.
  pub fn consume_as_string(&mut self) -> String {
    let loc = self.consume().loc;
    self.string(loc)
  }

  pub fn peek_with_mode(&mut self, mode: LexMode) -> Token {
    self.token_at_cursor(mode)
  }

  pub fn peek(&mut self) -> Token {
    self.peek_with_mode(LexMode::Standard)
  }

  pub fn peek_n_with_mode<const N: usize>(&mut self, modes: [LexMode; N]) -> [Token; N] {
    let start = self.checkpoint();
    let tokens = modes.map(|mode| self.consume_with_mode(mode));
    self.restore_checkpoint(start);
    tokens
  }

  pub fn peek_n<const N: usize>(&mut self) -> [Token; N] {
    self.peek_n_with_mode([LexMode::Standard; N])
  }

  pub fn consume_if(&mut self, typ: TT) -> MaybeToken {
    self.consume_when(LexMode::Standard, |t| t.typ == typ)
  }

  pub fn consume_if_pred<F: FnOnce(&Token) -> bool>(&mut self, pred: F) -> MaybeToken {
    self.consume_when(LexMode::Standard, pred)
  }

  pub fn require_with_mode(&mut self, typ: TT, mode: LexMode) -> SyntaxResult<Token> {
    let t = self.consume_with_mode(mode);
    if t.typ == typ {
      Ok(t)
    } else {
      Err(t.error(SyntaxErrorType::RequiredTokenNotFound(typ)))
    }
  }

  pub fn require(&mut self, typ: TT) -> SyntaxResult<Token> {
    self.require_with_mode(typ, LexMode::Standard)
  }
}
