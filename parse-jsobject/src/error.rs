use crate::loc::Loc;
use crate::loc::Position;
use crate::token::TT;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Formatter;
use std::error::Error;
use std::fmt::Display;

/// A stable classification of syntax errors produced by the analyzer.
///
/// Diagnostic codes (prefix `PJ`) are assigned per variant and are stable:
/// - `PJ0001`: [`SyntaxErrorType::ExpectedExportDefault`]
/// - `PJ0002`: [`SyntaxErrorType::ExpectedNotFound`]
/// - `PJ0003`: [`SyntaxErrorType::ExpectedSyntax`]
/// - `PJ0004`: [`SyntaxErrorType::InvalidAssignmentTarget`]
/// - `PJ0005`: [`SyntaxErrorType::InvalidCharacterEscape`]
/// - `PJ0006`: [`SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters`]
/// - `PJ0007`: [`SyntaxErrorType::LineTerminatorAfterThrow`]
/// - `PJ0008`: [`SyntaxErrorType::MalformedLiteralNumber`]
/// - `PJ0009`: [`SyntaxErrorType::RequiredTokenNotFound`]
/// - `PJ0010`: [`SyntaxErrorType::TryStatementHasNoCatchOrFinally`]
/// - `PJ0011`: [`SyntaxErrorType::UnexpectedEnd`]
/// - `PJ0012`: [`SyntaxErrorType::UnexpectedToken`]
/// - `PJ0013`: [`SyntaxErrorType::BreakOutsideLoopOrSwitch`]
/// - `PJ0014`: [`SyntaxErrorType::ContinueOutsideLoop`]
/// - `PJ0015`: [`SyntaxErrorType::UndefinedLabel`]
/// - `PJ0016`: [`SyntaxErrorType::DuplicateLabel`]
/// - `PJ0017`: [`SyntaxErrorType::ConstWithoutInitializer`]
/// - `PJ0018`: [`SyntaxErrorType::LetInLexicalBinding`]
/// - `PJ0019`: [`SyntaxErrorType::NewTargetOutsideFunction`]
/// - `PJ0020`: [`SyntaxErrorType::NestingTooDeep`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SyntaxErrorType {
  BreakOutsideLoopOrSwitch,
  ConstWithoutInitializer,
  ContinueOutsideLoop,
  DuplicateLabel,
  ExpectedExportDefault,
  ExpectedNotFound,
  ExpectedSyntax(&'static str),
  InvalidAssignmentTarget,
  InvalidCharacterEscape,
  LetInLexicalBinding,
  LineTerminatorAfterArrowFunctionParameters,
  LineTerminatorAfterThrow,
  MalformedLiteralNumber,
  NestingTooDeep,
  NewTargetOutsideFunction,
  RequiredTokenNotFound(TT),
  TryStatementHasNoCatchOrFinally,
  UndefinedLabel,
  UnexpectedEnd,
  UnexpectedToken,
}

#[derive(Clone)]
pub struct SyntaxError {
  pub typ: SyntaxErrorType,
  pub loc: Loc,
  pub actual_token: Option<TT>,
}

impl SyntaxError {
  pub fn new(typ: SyntaxErrorType, loc: Loc, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError {
      typ,
      loc,
      actual_token,
    }
  }

  pub fn code(&self) -> &'static str {
    self.typ.code()
  }

  /// Human-readable message, including the token that was found if known.
  pub fn message(&self) -> String {
    self.typ.message(self.actual_token)
  }

  pub fn position(&self, source: &str) -> Position {
    self.loc.start_position(source)
  }
}

impl Debug for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} around loc [{}:{}]", self, self.loc.0, self.loc.1)
  }
}

impl Display for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.message())
  }
}

impl Error for SyntaxError {}

impl PartialEq for SyntaxError {
  fn eq(&self, other: &Self) -> bool {
    self.typ == other.typ
  }
}

impl Eq for SyntaxError {}

pub type SyntaxResult<T> = Result<T, SyntaxError>;

impl SyntaxErrorType {
  /// Stable diagnostic code for this syntax error variant.
  pub fn code(&self) -> &'static str {
    match self {
      SyntaxErrorType::ExpectedExportDefault => "PJ0001",
      SyntaxErrorType::ExpectedNotFound => "PJ0002",
      SyntaxErrorType::ExpectedSyntax(_) => "PJ0003",
      SyntaxErrorType::InvalidAssignmentTarget => "PJ0004",
      SyntaxErrorType::InvalidCharacterEscape => "PJ0005",
      SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters => "PJ0006",
      SyntaxErrorType::LineTerminatorAfterThrow => "PJ0007",
      SyntaxErrorType::MalformedLiteralNumber => "PJ0008",
      SyntaxErrorType::RequiredTokenNotFound(_) => "PJ0009",
      SyntaxErrorType::TryStatementHasNoCatchOrFinally => "PJ0010",
      SyntaxErrorType::UnexpectedEnd => "PJ0011",
      SyntaxErrorType::UnexpectedToken => "PJ0012",
      SyntaxErrorType::BreakOutsideLoopOrSwitch => "PJ0013",
      SyntaxErrorType::ContinueOutsideLoop => "PJ0014",
      SyntaxErrorType::UndefinedLabel => "PJ0015",
      SyntaxErrorType::DuplicateLabel => "PJ0016",
      SyntaxErrorType::ConstWithoutInitializer => "PJ0017",
      SyntaxErrorType::LetInLexicalBinding => "PJ0018",
      SyntaxErrorType::NewTargetOutsideFunction => "PJ0019",
      SyntaxErrorType::NestingTooDeep => "PJ0020",
    }
  }

  /// Human-readable message describing this syntax error.
  pub fn message(&self, actual_token: Option<TT>) -> String {
    let base: String = match self {
      SyntaxErrorType::BreakOutsideLoopOrSwitch => {
        "`break` must be inside a loop or switch".into()
      }
      SyntaxErrorType::ConstWithoutInitializer => "`const` declaration requires a value".into(),
      SyntaxErrorType::ContinueOutsideLoop => "`continue` must be inside a loop".into(),
      SyntaxErrorType::DuplicateLabel => "label is already declared".into(),
      SyntaxErrorType::ExpectedExportDefault => "expected `export default`".into(),
      SyntaxErrorType::ExpectedNotFound => "expected token not found".into(),
      SyntaxErrorType::ExpectedSyntax(expected) => format!("expected {}", expected),
      SyntaxErrorType::InvalidAssignmentTarget => "invalid assignment target".into(),
      SyntaxErrorType::InvalidCharacterEscape => "invalid character escape".into(),
      SyntaxErrorType::LetInLexicalBinding => {
        "`let` cannot be declared by `let` or `const`".into()
      }
      SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters => {
        "line terminator not allowed after arrow function parameters".into()
      }
      SyntaxErrorType::LineTerminatorAfterThrow => {
        "line terminator not allowed after `throw`".into()
      }
      SyntaxErrorType::MalformedLiteralNumber => "malformed number literal".into(),
      SyntaxErrorType::NestingTooDeep => return "code is nested too deeply".into(),
      SyntaxErrorType::NewTargetOutsideFunction => {
        "`new.target` is only valid inside a function".into()
      }
      SyntaxErrorType::RequiredTokenNotFound(token) => format!("expected {}", token.describe()),
      SyntaxErrorType::TryStatementHasNoCatchOrFinally => {
        "try statement requires a catch or finally block".into()
      }
      SyntaxErrorType::UndefinedLabel => "undefined label".into(),
      SyntaxErrorType::UnexpectedEnd => return "unexpected end of input".into(),
      SyntaxErrorType::UnexpectedToken => "unexpected token".into(),
    };
    match actual_token {
      Some(TT::EOF) => format!("{}, found end of input", base),
      Some(tok) => format!("{}, found {}", base, tok.describe()),
      None => base,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn message_mentions_found_token() {
    let err = SyntaxError::new(
      SyntaxErrorType::ExpectedSyntax("expression"),
      Loc(3, 4),
      Some(TT::ChevronRight),
    );
    assert_eq!(err.code(), "PJ0003");
    assert_eq!(err.message(), "expected expression, found `>`");
    assert_eq!(format!("{:?}", err), "expected expression, found `>` around loc [3:4]");
  }

  #[test]
  fn unexpected_end_ignores_token() {
    let err = SyntaxError::new(SyntaxErrorType::UnexpectedEnd, Loc(0, 0), Some(TT::EOF));
    assert_eq!(err.message(), "unexpected end of input");
  }

  #[test]
  fn label_error_messages() {
    let err = SyntaxError::new(SyntaxErrorType::UndefinedLabel, Loc(6, 7), None);
    assert_eq!(err.code(), "PJ0015");
    assert_eq!(err.message(), "undefined label");
    let err = SyntaxError::new(SyntaxErrorType::DuplicateLabel, Loc(3, 4), Some(TT::Identifier));
    assert_eq!(err.code(), "PJ0016");
    assert_eq!(err.message(), "label is already declared, found identifier");
  }
}
