use super::super::ParseCtx;
use super::super::Parser;
use crate::ast::expr::pat::ArrayPat;
use crate::ast::expr::pat::Binding;
use crate::ast::expr::pat::DeclKind;
use crate::ast::expr::pat::DeclName;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::pat::ObjectPat;
use crate::ast::expr::pat::ObjectPatProp;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::pat::PatElem;
use crate::ast::node::Node;
use crate::ast::object::PropKey;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::TT;
use crate::token::UNRESERVED_KEYWORDS;

#[derive(Clone, Copy)]
pub struct ParsePatternRules {
  // `yield` is not allowed as a parameter/variable inside a generator function, where it is an operator instead.
  pub yield_allowed: bool,
}

// `await` is never an identifier, as JS Object sources are modules.
pub fn is_valid_pattern_identifier(typ: TT, rules: ParsePatternRules) -> bool {
  match typ {
    TT::Identifier => true,
    TT::KeywordYield => rules.yield_allowed,
    t => UNRESERVED_KEYWORDS.contains(&t),
  }
}

/// The first identifier in `pat` called `name`.
fn find_id(pat: &Node<Pat>, name: &str) -> Option<Loc> {
  let elem = |e: &PatElem| find_id(&e.target, name);
  match pat.stx.as_ref() {
    Pat::Id(id) => (id.stx.name == name).then_some(id.loc),
    Pat::Array(arr) => arr
      .stx
      .elements
      .iter()
      .flatten()
      .find_map(elem)
      .or_else(|| arr.stx.rest.as_ref().and_then(|r| find_id(r, name))),
    Pat::Object(obj) => obj
      .stx
      .props
      .iter()
      .find_map(|p| elem(&p.stx.elem))
      .or_else(|| obj.stx.rest.as_ref().and_then(|r| find_id(r, name))),
    Pat::Member(_) => None,
  }
}

impl<'a> Parser<'a> {
  pub fn maybe_decl_name(&mut self, ctx: ParseCtx) -> Option<Node<DeclName>> {
    self
      .consume_if_pred(|t| is_valid_pattern_identifier(t.typ, ctx.rules))
      .match_loc()
      .map(|loc| {
        Node::new(loc, DeclName {
          name: self.string(loc),
        })
      })
  }

  pub fn decl_name(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<DeclName>> {
    match self.maybe_decl_name(ctx) {
      Some(name) => Ok(name),
      None => Err(self.peek().error(SyntaxErrorType::ExpectedSyntax("identifier"))),
    }
  }

  pub fn id_pat(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<IdPat>> {
    self.with_loc(|p| {
      let t = p.consume();
      if !is_valid_pattern_identifier(t.typ, ctx.rules) {
        return Err(t.error(SyntaxErrorType::ExpectedSyntax("identifier")));
      }
      Ok(IdPat {
        name: p.string(t.loc),
      })
    })
  }

  /// `target = default`, where the default stops at any of `terminators`.
  fn pat_elem<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    target: Node<Pat>,
    terminators: [TT; N],
  ) -> SyntaxResult<PatElem> {
    let default = self
      .consume_if(TT::Equals)
      .and_then(|| self.expr(ctx, terminators))?;
    Ok(PatElem { target, default })
  }

  /// Parses an object pattern like `{ x, y: z, [computed]: value, ...rest }`. The rest element,
  /// if any, must be last.
  pub fn object_pat(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ObjectPat>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let mut props = Vec::new();
      let mut rest = None;
      while p.peek().typ != TT::BraceClose {
        if p.consume_if(TT::DotDotDot).is_match() {
          rest = Some(p.id_pat(ctx)?.into_wrapped());
          break;
        };
        let prop = p.with_loc(|p| {
          let key = p.prop_key(ctx)?;
          let target = if p.consume_if(TT::Colon).is_match() {
            p.pat(ctx)?
          } else {
            // Shorthand, so the key must also be a valid variable name.
            let PropKey::Named(named) = &key else {
              return Err(p.peek().error(SyntaxErrorType::ExpectedSyntax(
                "object pattern property subpattern",
              )));
            };
            if !is_valid_pattern_identifier(named.stx.token, ctx.rules) {
              return Err(named.error(SyntaxErrorType::ExpectedSyntax("identifier")));
            }
            Node::new(named.loc, IdPat {
              name: named.stx.name.clone(),
            })
            .into_wrapped()
          };
          let elem = p.pat_elem(ctx, target, [TT::Comma, TT::BraceClose])?;
          Ok(ObjectPatProp { key, elem })
        })?;
        props.push(prop);
        if !p.consume_if(TT::Comma).is_match() {
          break;
        };
      }
      p.require(TT::BraceClose)?;
      Ok(ObjectPat { props, rest })
    })
  }

  /// Parses an array pattern like `[a, , b = 1, ...rest]`.
  pub fn array_pat(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ArrayPat>> {
    self.with_loc(|p| {
      p.require(TT::BracketOpen)?;
      let mut elements = Vec::new();
      let mut rest = None;
      while p.peek().typ != TT::BracketClose {
        if p.consume_if(TT::DotDotDot).is_match() {
          rest = Some(p.pat(ctx)?);
          break;
        };
        if p.consume_if(TT::Comma).is_match() {
          elements.push(None);
          continue;
        };
        let target = p.pat(ctx)?;
        elements.push(Some(p.pat_elem(ctx, target, [TT::Comma, TT::BracketClose])?));
        if !p.consume_if(TT::Comma).is_match() {
          break;
        };
      }
      p.require(TT::BracketClose)?;
      Ok(ArrayPat { elements, rest })
    })
  }

  pub fn pat(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Pat>> {
    self.nested(|p| {
      let t = p.peek();
      Ok(match t.typ {
        TT::BraceOpen => p.object_pat(ctx)?.into_wrapped(),
        TT::BracketOpen => p.array_pat(ctx)?.into_wrapped(),
        t if is_valid_pattern_identifier(t, ctx.rules) => p.id_pat(ctx)?.into_wrapped(),
        _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("pattern"))),
      })
    })
  }

  /// A pattern that declares its identifiers as `kind`.
  pub fn binding(&mut self, ctx: ParseCtx, kind: DeclKind) -> SyntaxResult<Node<Binding>> {
    self.with_loc(|p| {
      let pat = p.pat(ctx)?;
      if kind.is_lexical() {
        if let Some(loc) = find_id(&pat, "let") {
          return Err(loc.error(SyntaxErrorType::LetInLexicalBinding, None));
        };
      };
      Ok(Binding { kind, pat })
    })
  }
}
