use super::expr::pat::is_valid_pattern_identifier;
use super::expr::Asi;
use super::ParseCtx;
use super::Parser;
use crate::ast::expr::IdExpr;
use crate::ast::func::Func;
use crate::ast::node::Node;
use crate::ast::object::Class;
use crate::ast::object::ClassMember;
use crate::ast::object::ObjMember;
use crate::ast::object::PropKey;
use crate::ast::object::PropName;
use crate::ast::object::PropValue;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::is_keyword;
use crate::token::TT;

/// Whether a token can start a class or object key.
fn is_key_start(typ: TT) -> bool {
  matches!(
    typ,
    TT::Identifier | TT::LiteralString | TT::LiteralNumber | TT::LiteralBigInt | TT::BracketOpen
  ) || is_keyword(typ)
}

#[derive(Default)]
struct MemberModifiers {
  getter: bool,
  setter: bool,
  async_: bool,
  generator: bool,
}

impl<'a> Parser<'a> {
  /// The optional `extends` clause and body of a class, after its name.
  pub fn class(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Class>> {
    self.with_loc(|p| {
      let extends = p
        .consume_if(TT::KeywordExtends)
        .and_then(|| p.expr(ctx, [TT::BraceOpen]))?;
      // Field initializers run like methods.
      let members = p.class_body(ctx.in_function(false))?;
      Ok(Class { extends, members })
    })
  }

  fn class_body(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<Node<ClassMember>>> {
    self.require(TT::BraceOpen)?;
    let mut members = Vec::new();
    loop {
      // Empty members are allowed.
      while self.consume_if(TT::Semicolon).is_match() {}
      if matches!(self.peek().typ, TT::BraceClose | TT::EOF) {
        break;
      };
      let member = self.with_loc(|p| {
        // `static` must always come first if present, and may itself be a member's name.
        let [t0, t1] = p.peek_n::<2>();
        let static_ =
          t0.typ == TT::KeywordStatic && (is_key_start(t1.typ) || t1.typ == TT::Asterisk);
        if static_ {
          p.consume();
        };
        let mut asi = Asi::can();
        let (key, value) = p.member(ctx, TT::Equals, TT::Semicolon, &mut asi)?;
        if matches!(value, None | Some(PropValue::Value(_))) {
          // Fields must be terminated, though the terminator may be implied by a line break.
          let next = p.peek();
          if !asi.did_end_with_asi
            && !next.preceded_by_line_terminator
            && !matches!(next.typ, TT::Semicolon | TT::BraceClose)
          {
            return Err(next.error(SyntaxErrorType::RequiredTokenNotFound(TT::Semicolon)));
          };
        };
        Ok(ClassMember {
          static_,
          key,
          value,
        })
      })?;
      members.push(member);
    }
    self.require(TT::BraceClose)?;
    Ok(members)
  }

  /// Parses a key like `a`, `'a'`, `"a"`, `1` or `[1]`. Number keys are normalized to the name
  /// the property actually gets, e.g. `1.0` becomes `1`.
  pub fn prop_key(&mut self, ctx: ParseCtx) -> SyntaxResult<PropKey> {
    if self.consume_if(TT::BracketOpen).is_match() {
      let key = self.expr(ctx, [TT::BracketClose])?;
      self.require(TT::BracketClose)?;
      return Ok(PropKey::Computed(key));
    };
    Ok(PropKey::Named(self.with_loc(|p| {
      let t = p.peek();
      let name = match t.typ {
        TT::LiteralString => p.str_value()?,
        TT::LiteralNumber => p.num_value()?.to_property_key(),
        TT::LiteralBigInt => p.bigint_digits()?,
        TT::Identifier => p.consume_as_string(),
        // Any keyword is allowed as a key.
        t if is_keyword(t) => p.consume_as_string(),
        _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("property name"))),
      };
      Ok(PropName {
        name,
        token: t.typ,
      })
    })?))
  }

  /// Consumes `get`, `set`, `async` and `*` when they are modifiers rather than the key itself.
  fn member_modifiers(&mut self) -> MemberModifiers {
    let mut modifiers = MemberModifiers::default();
    let [t0, t1] = self.peek_n::<2>();
    match t0.typ {
      TT::KeywordGet if is_key_start(t1.typ) => {
        self.consume();
        modifiers.getter = true;
        return modifiers;
      }
      TT::KeywordSet if is_key_start(t1.typ) => {
        self.consume();
        modifiers.setter = true;
        return modifiers;
      }
      TT::KeywordAsync
        if !t1.preceded_by_line_terminator
          && (is_key_start(t1.typ) || t1.typ == TT::Asterisk) =>
      {
        self.consume();
        modifiers.async_ = true;
      }
      _ => {}
    };
    modifiers.generator = self.consume_if(TT::Asterisk).is_match();
    modifiers
  }

  /// A getter takes no parameters and a setter exactly one, which can't be a rest parameter.
  fn accessor(&mut self, ctx: ParseCtx, getter: bool) -> SyntaxResult<Node<Func>> {
    let func = self.func(ctx, false, false)?;
    let params = &func.stx.params;
    let valid = match getter {
      true => params.is_empty(),
      false => params.len() == 1 && !params[0].stx.rest,
    };
    if !valid {
      return Err(func.error(SyntaxErrorType::ExpectedSyntax(match getter {
        true => "getter without parameters",
        false => "setter with one parameter",
      })));
    };
    Ok(func)
  }

  // It's strictly one of these:
  // - <key> [ <value_delimiter> <expr> ]?
  // - async? '*'? <key> '(' ...
  // - [ get | set ] <key> '(' ...
  // where <key> = <ident> | <keyword> | <str> | <num> | '[' <expr> ']'
  // Returns None for the value if there's only a key, which is a shorthand for objects and an
  // uninitialized field for classes.
  fn member(
    &mut self,
    ctx: ParseCtx,
    // `:` for objects, `=` for classes.
    value_delimiter: TT,
    member_delimiter: TT,
    value_asi: &mut Asi,
  ) -> SyntaxResult<(PropKey, Option<PropValue>)> {
    let modifiers = self.member_modifiers();
    let key = self.prop_key(ctx)?;
    if modifiers.getter {
      return Ok((key, Some(PropValue::Getter(self.accessor(ctx, true)?))));
    };
    if modifiers.setter {
      return Ok((key, Some(PropValue::Setter(self.accessor(ctx, false)?))));
    };
    if modifiers.async_ || modifiers.generator || self.peek().typ == TT::ParenthesisOpen {
      let func = self.func(ctx, modifiers.async_, modifiers.generator)?;
      return Ok((key, Some(PropValue::Method(func))));
    };
    let value = self
      .consume_if(value_delimiter)
      .and_then(|| self.expr_with_asi(ctx, [member_delimiter, TT::BraceClose], value_asi))?;
    Ok((key, value.map(PropValue::Value)))
  }

  /// Parses one member of an object literal other than a spread.
  pub fn obj_member(&mut self, ctx: ParseCtx) -> SyntaxResult<ObjMember> {
    let (key, value) = self.member(ctx, TT::Colon, TT::Comma, &mut Asi::no())?;
    Ok(match (key, value) {
      (key, Some(value)) => ObjMember::Prop { key, value },
      (PropKey::Named(key), None) if is_valid_pattern_identifier(key.stx.token, ctx.rules) => {
        ObjMember::Shorthand {
          id: Node::new(key.loc, IdExpr {
            name: key.stx.name.clone(),
          }),
        }
      }
      _ => {
        return Err(
          self
            .peek()
            .error(SyntaxErrorType::RequiredTokenNotFound(TT::Colon)),
        )
      }
    })
  }
}
