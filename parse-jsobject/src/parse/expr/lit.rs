use super::super::ParseCtx;
use super::super::Parser;
use crate::ast::expr::lit::ArrayElem;
use crate::ast::expr::lit::ArrayExpr;
use crate::ast::expr::lit::LitExpr;
use crate::ast::expr::lit::LitValue;
use crate::ast::expr::lit::TemplateExpr;
use crate::ast::expr::lit::TemplatePart;
use crate::ast::node::Node;
use crate::ast::object::ObjMember;
use crate::ast::object::ObjectExpr;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::loc::Loc;
use crate::num::JsNumber;
use crate::token::Token;
use crate::token::TT;
use std::iter::Peekable;
use std::str::CharIndices;

fn take_hex(chars: &mut Peekable<CharIndices<'_>>, n: usize) -> Option<u32> {
  let mut value = 0u32;
  for _ in 0..n {
    let (_, c) = chars.next()?;
    value = value * 16 + c.to_digit(16)?;
  }
  Some(value)
}

fn take_hex_braced(chars: &mut Peekable<CharIndices<'_>>) -> Option<u32> {
  let mut value = 0u32;
  let mut digits = 0;
  loop {
    let (_, c) = chars.next()?;
    if c == '}' {
      break;
    };
    value = value.checked_mul(16)? + c.to_digit(16)?;
    if value > 0x10FFFF {
      return None;
    };
    digits += 1;
  }
  (digits > 0).then_some(value)
}

/// Decodes the escape sequences in the body of a string or template literal (without delimiters).
/// Returns the byte offset of the offending backslash on an invalid escape.
/// Legacy octal escapes are rejected, as JS Object sources are always strict mode code.
pub fn decode_escapes(raw: &str) -> Result<String, usize> {
  let mut units = Vec::<u16>::with_capacity(raw.len());
  let mut buf = [0u16; 2];
  let mut chars = raw.char_indices().peekable();
  while let Some((i, c)) = chars.next() {
    if c != '\\' {
      units.extend_from_slice(c.encode_utf16(&mut buf));
      continue;
    };
    let Some((_, escaped)) = chars.next() else {
      return Err(i);
    };
    match escaped {
      'b' => units.push(0x08),
      'f' => units.push(0x0c),
      'n' => units.push(0x0a),
      'r' => units.push(0x0d),
      't' => units.push(0x09),
      'v' => units.push(0x0b),
      '0' if !chars.peek().is_some_and(|(_, c)| c.is_ascii_digit()) => units.push(0),
      '0'..='9' => return Err(i),
      'x' => {
        let v = take_hex(&mut chars, 2).ok_or(i)?;
        units.push(v as u16);
      }
      'u' => {
        let v = if chars.peek().is_some_and(|(_, c)| *c == '{') {
          chars.next();
          take_hex_braced(&mut chars).ok_or(i)?
        } else {
          take_hex(&mut chars, 4).ok_or(i)?
        };
        match char::from_u32(v) {
          Some(c) => units.extend_from_slice(c.encode_utf16(&mut buf)),
          // A lone surrogate; it may pair up with the next escape.
          None => units.push(v as u16),
        };
      }
      // Line continuations.
      '\r' => {
        if chars.peek().is_some_and(|(_, c)| *c == '\n') {
          chars.next();
        };
      }
      '\n' | '\u{2028}' | '\u{2029}' => {}
      c => units.extend_from_slice(c.encode_utf16(&mut buf)),
    };
  }
  Ok(String::from_utf16_lossy(&units))
}

fn invalid_escape(body_start: usize, offset: usize, actual_token: TT) -> SyntaxError {
  let start = body_start + offset;
  Loc(start, start + 2).error(SyntaxErrorType::InvalidCharacterEscape, Some(actual_token))
}

impl<'a> Parser<'a> {
  pub fn array_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ArrayExpr>> {
    self.with_loc(|p| {
      p.require(TT::BracketOpen)?;
      let mut elements = Vec::new();
      loop {
        if p.consume_if(TT::Comma).is_match() {
          elements.push(ArrayElem::Hole);
          continue;
        };
        if p.peek().typ == TT::BracketClose {
          break;
        };
        let spread = p.consume_if(TT::DotDotDot).is_match();
        let value = p.expr(ctx, [TT::Comma, TT::BracketClose])?;
        elements.push(match spread {
          true => ArrayElem::Spread(value),
          false => ArrayElem::Item(value),
        });
        if p.peek().typ == TT::BracketClose {
          break;
        };
        p.require(TT::Comma)?;
      }
      p.require(TT::BracketClose)?;
      Ok(ArrayExpr { elements })
    })
  }

  /// A primitive literal. Callers have checked that the next token is one.
  pub fn lit(&mut self) -> SyntaxResult<Node<LitExpr>> {
    self.with_loc(|p| {
      let t = p.peek_with_mode(LexMode::SlashIsRegex);
      let value = match t.typ {
        TT::LiteralNull => {
          p.consume();
          LitValue::Null
        }
        TT::LiteralTrue | TT::LiteralFalse => {
          p.consume();
          LitValue::Bool(t.typ == TT::LiteralTrue)
        }
        TT::LiteralNumber => LitValue::Num(p.num_value()?),
        TT::LiteralBigInt => LitValue::BigInt(p.bigint_digits()?),
        TT::LiteralString => LitValue::Str(p.str_value()?),
        TT::LiteralRegex => {
          p.consume_with_mode(LexMode::SlashIsRegex);
          LitValue::Regex(p.string(t.loc))
        }
        _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("literal"))),
      };
      Ok(LitExpr { value })
    })
  }

  /// The digits of a bigint literal, without the trailing `n`.
  pub fn bigint_digits(&mut self) -> SyntaxResult<String> {
    let t = self.require(TT::LiteralBigInt)?;
    let raw = self.str(t.loc);
    Ok(raw.strip_suffix('n').unwrap_or(raw).replace('_', ""))
  }

  pub fn num_value(&mut self) -> SyntaxResult<JsNumber> {
    let t = self.require(TT::LiteralNumber)?;
    JsNumber::from_literal(self.str(t.loc))
      .ok_or_else(|| t.loc.error(SyntaxErrorType::MalformedLiteralNumber, None))
  }

  /// The decoded value of a string literal.
  pub fn str_value(&mut self) -> SyntaxResult<String> {
    let t = self.require(TT::LiteralString)?;
    // The lexer only produces a string token when both quotes are present, and quotes are always one byte.
    let body_start = t.loc.0 + 1;
    let body = &self.str(t.loc)[1..t.loc.len() - 1];
    decode_escapes(body).map_err(|offset| invalid_escape(body_start, offset, TT::LiteralString))
  }

  /// Parses an object literal like `{ a: 1, b() {}, c, ...d }`. A trailing comma is allowed.
  pub fn object_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ObjectExpr>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let members = p.list_with_loc(TT::Comma, TT::BraceClose, |p| {
        if p.consume_if(TT::DotDotDot).is_match() {
          let value = p.expr(ctx, [TT::Comma, TT::BraceClose])?;
          return Ok(ObjMember::Spread { value });
        };
        p.obj_member(ctx)
      })?;
      Ok(ObjectExpr { members })
    })
  }

  pub fn template(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<TemplateExpr>> {
    self.with_loc(|p| {
      let parts = p.template_parts(ctx, false)?;
      Ok(TemplateExpr { tag: None, parts })
    })
  }

  fn template_str(&self, t: &Token, skip: usize, tagged: bool) -> SyntaxResult<String> {
    let trim_end = match t.typ {
      TT::LiteralTemplatePartString => 2,
      _ => 1,
    };
    let body_start = t.loc.0 + skip;
    let body = &self.str(t.loc)[skip..t.loc.len() - trim_end];
    match decode_escapes(body) {
      Ok(cooked) => Ok(cooked),
      // A tag receives the raw text of a part with an invalid escape.
      Err(_) if tagged => Ok(body.to_string()),
      Err(offset) => Err(invalid_escape(body_start, offset, t.typ)),
    }
  }

  /// The strings and substitutions of a template, starting at its first string token.
  pub fn template_parts(&mut self, ctx: ParseCtx, tagged: bool) -> SyntaxResult<Vec<TemplatePart>> {
    let t = self.consume();
    if !matches!(
      t.typ,
      TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd
    ) {
      return Err(t.error(SyntaxErrorType::ExpectedSyntax("template")));
    };
    let mut parts = vec![TemplatePart::Str(self.template_str(&t, 1, tagged)?)];
    let mut done = t.typ == TT::LiteralTemplatePartStringEnd;
    while !done {
      let substitution = self.expr(ctx, [TT::BraceClose])?;
      self.require(TT::BraceClose)?;
      parts.push(TemplatePart::Subst(substitution));
      let string = self.consume_with_mode(LexMode::TemplateStrContinue);
      match string.typ {
        TT::LiteralTemplatePartString => {}
        TT::LiteralTemplatePartStringEnd => done = true,
        _ => return Err(string.error(SyntaxErrorType::UnexpectedEnd)),
      };
      parts.push(TemplatePart::Str(self.template_str(&string, 0, tagged)?));
    }
    Ok(parts)
  }
}
