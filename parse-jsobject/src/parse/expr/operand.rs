use super::super::ParseCtx;
use super::super::Parser;
use super::operand_min_prec;
use super::pat::is_valid_pattern_identifier;
use super::util::assign_target;
use super::Asi;
use crate::ast::expr::ClassExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::FuncExpr;
use crate::ast::expr::IdExpr;
use crate::ast::expr::MetaExpr;
use crate::ast::expr::MetaKind;
use crate::ast::expr::UnaryExpr;
use crate::ast::expr::UpdateExpr;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::operator::Operator;
use crate::operator::OperatorName;
use crate::operator::OPERATORS;
use crate::parse::operator::unary_operator;
use crate::token::Token;
use crate::token::TT;

/// Whether `t` shows that a preceding `yield` has no operand.
fn ends_bare_yield(t: &Token) -> bool {
  t.preceded_by_line_terminator
    || matches!(
      t.typ,
      TT::EOF
        | TT::Semicolon
        | TT::Comma
        | TT::Colon
        | TT::ParenthesisClose
        | TT::BracketClose
        | TT::BraceClose
    )
}

impl<'a> Parser<'a> {
  /// A single operand, including any prefix operators applied to it.
  pub(super) fn expr_operand<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<Node<Expr>> {
    // A `/` here starts a regex, never a division.
    let [t0, t1, t2] =
      self.peek_n_with_mode([LexMode::SlashIsRegex, LexMode::Standard, LexMode::Standard]);
    if t0.typ == TT::KeywordNew && t1.typ == TT::Dot {
      return Ok(self.new_target(ctx)?.into_wrapped());
    };
    // `await` is always an operator in a module; `yield` only inside generators.
    if let Some(operator) = unary_operator(t0.typ)
      .filter(|operator| operator.name != OperatorName::Yield || !ctx.rules.yield_allowed)
    {
      return self.prefix_expr(ctx, operator, terminators, asi);
    };

    let arrow_next = t1.typ == TT::EqualsChevronRight;
    #[rustfmt::skip]
    let expr: Node<Expr> = match t0.typ {
      TT::KeywordAsync if !arrow_next => match t1.typ {
        TT::KeywordFunction if !t1.preceded_by_line_terminator => self.func_expr(ctx)?.into_wrapped(),
        // `async(...)` may also call a function named `async`.
        TT::ParenthesisOpen => match self.maybe_arrow_func(ctx, terminators)? {
          Some(arrow) => arrow.into_wrapped(),
          None => self.id_expr()?.into_wrapped(),
        },
        t if is_valid_pattern_identifier(t, ctx.rules) && t2.typ == TT::EqualsChevronRight => {
          self.arrow_func_expr(ctx, terminators)?.into_wrapped()
        }
        _ => self.id_expr()?.into_wrapped(),
      },
      t if is_valid_pattern_identifier(t, ctx.rules) => match arrow_next {
        true => self.arrow_func_expr(ctx, terminators)?.into_wrapped(),
        false => self.id_expr()?.into_wrapped(),
      },
      TT::ParenthesisOpen => self.paren_or_arrow(ctx, terminators, asi)?,
      TT::BracketOpen => self.array_expr(ctx)?.into_wrapped(),
      TT::BraceOpen => self.object_expr(ctx)?.into_wrapped(),
      TT::KeywordFunction => self.func_expr(ctx)?.into_wrapped(),
      TT::KeywordClass => self.class_expr(ctx)?.into_wrapped(),
      TT::KeywordSuper => self.meta(MetaKind::Super)?.into_wrapped(),
      TT::KeywordThis => self.meta(MetaKind::This)?.into_wrapped(),
      TT::LiteralTrue | TT::LiteralFalse | TT::LiteralNull | TT::LiteralNumber | TT::LiteralBigInt
      | TT::LiteralString | TT::LiteralRegex => self.lit()?.into_wrapped(),
      TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => self.template(ctx)?.into_wrapped(),
      _ => return Err(t0.error(SyntaxErrorType::ExpectedSyntax("expression"))),
    };
    Ok(expr)
  }

  fn prefix_expr<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    operator: &'static Operator,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<Node<Expr>> {
    let start = self.checkpoint();
    let keyword = self.consume_with_mode(LexMode::SlashIsRegex);
    let operator = match operator.name {
      OperatorName::Yield if self.consume_if(TT::Asterisk).is_match() => {
        &OPERATORS[&OperatorName::YieldDelegated]
      }
      _ => operator,
    };
    let next = self.peek();
    if operator.name == OperatorName::Yield
      && (ends_bare_yield(&next) || terminators.contains(&next.typ))
    {
      // A bare `yield` stands for `yield undefined`.
      let argument = Node::new(keyword.loc, IdExpr {
        name: "undefined".to_string(),
      });
      return Ok(
        Node::new(keyword.loc, UnaryExpr {
          operator: operator.name,
          argument: argument.into_wrapped(),
        })
        .into_wrapped(),
      );
    };
    let operand = self.expr_with_min_prec(ctx, operand_min_prec(operator), terminators, asi)?;
    let loc = self.since_checkpoint(&start);
    Ok(match operator.name.is_update() {
      true => Node::new(loc, UpdateExpr {
        operator: operator.name,
        target: assign_target(operand, operator.name)?,
      })
      .into_wrapped(),
      false => Node::new(loc, UnaryExpr {
        operator: operator.name,
        argument: operand,
      })
      .into_wrapped(),
    })
  }

  fn meta(&mut self, kind: MetaKind) -> SyntaxResult<Node<MetaExpr>> {
    self.with_loc(|p| {
      p.consume();
      Ok(MetaExpr { kind })
    })
  }

  /// `new.target`, which only has a value inside a function called with or without `new`.
  fn new_target(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<MetaExpr>> {
    let node = self.with_loc(|p| {
      p.require(TT::KeywordNew)?;
      p.require(TT::Dot)?;
      let property = p.require(TT::Identifier)?;
      if p.str(property.loc) != "target" {
        return Err(property.error(SyntaxErrorType::ExpectedSyntax("`new.target`")));
      };
      Ok(MetaExpr {
        kind: MetaKind::NewTarget,
      })
    })?;
    if !ctx.new_target_allowed {
      return Err(node.error(SyntaxErrorType::NewTargetOutsideFunction));
    };
    Ok(node)
  }

  /// Callers have already checked that the next token can be an identifier.
  fn id_expr(&mut self) -> SyntaxResult<Node<IdExpr>> {
    self.with_loc(|p| {
      let name = p.consume_as_string();
      Ok(IdExpr { name })
    })
  }

  pub fn func_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<FuncExpr>> {
    self.with_loc(|p| {
      let is_async = p.consume_if(TT::KeywordAsync).is_match();
      p.require(TT::KeywordFunction)?;
      let generator = p.consume_if(TT::Asterisk).is_match();
      let name = p.maybe_decl_name(ctx);
      let func = p.func(ctx, is_async, generator)?;
      Ok(FuncExpr { name, func })
    })
  }

  pub fn class_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ClassExpr>> {
    self.with_loc(|p| {
      p.require(TT::KeywordClass)?;
      let name = p.maybe_decl_name(ctx);
      let class = p.class(ctx)?;
      Ok(ClassExpr { name, class })
    })
  }
}
