use super::super::ParseCtx;
use super::super::Parser;
use super::super::ParserCheckpoint;
use super::pat::is_valid_pattern_identifier;
use super::precedence;
use super::Asi;
use crate::ast::expr::pat::Binding;
use crate::ast::expr::pat::DeclKind;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::Expr;
use crate::ast::expr::FuncExpr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::func::Param;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::operator::OperatorName;
use crate::token::TT;

/// Everything before an arrow function's body, i.e. `async (a, b) =>`.
struct ArrowFuncHead {
  async_: bool,
  params: Vec<Node<Param>>,
}

impl<'a> Parser<'a> {
  /// `ctx` must already be the arrow's own context.
  fn arrow_func_head(&mut self, ctx: ParseCtx) -> SyntaxResult<ArrowFuncHead> {
    // In `async => 1`, `async` is the parameter.
    let [t0, t1] = self.peek_n::<2>();
    let async_ = t0.typ == TT::KeywordAsync && t1.typ != TT::EqualsChevronRight;
    if async_ {
      self.consume();
    };
    let params = if is_valid_pattern_identifier(self.peek().typ, ctx.rules) {
      // `x => ...` has one parameter and no parentheses.
      let loc = self.consume().loc;
      let pat = Node::new(loc, IdPat {
        name: self.string(loc),
      });
      vec![Node::new(loc, Param {
        rest: false,
        binding: Node::new(loc, Binding {
          kind: DeclKind::Param,
          pat: pat.into_wrapped(),
        }),
        default: None,
      })]
    } else {
      self.func_params(ctx)?
    };
    let arrow = self.require(TT::EqualsChevronRight)?;
    if arrow.preceded_by_line_terminator {
      return Err(arrow.error(SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters));
    };
    Ok(ArrowFuncHead { async_, params })
  }

  fn arrow_func_body<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    start: &ParserCheckpoint,
    head: ArrowFuncHead,
    terminators: [TT; N],
  ) -> SyntaxResult<Node<FuncExpr>> {
    let body = if self.peek().typ == TT::BraceOpen {
      FuncBody::Block(self.without_labels(|p| p.braced_stmts(ctx))?)
    } else {
      // An assignment expression, so `a => b, c` stops before the comma.
      FuncBody::Expr(self.expr_with_min_prec(
        ctx,
        precedence(OperatorName::Assignment),
        terminators,
        &mut Asi::can(),
      )?)
    };
    let loc = self.since_checkpoint(start);
    let func = Node::new(loc, Func {
      arrow: true,
      async_: head.async_,
      generator: false,
      params: head.params,
      body,
    });
    Ok(Node::new(loc, FuncExpr { name: None, func }))
  }

  /// For input that is definitely an arrow function, like `x => x` or `async x => x`.
  pub(super) fn arrow_func_expr<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
  ) -> SyntaxResult<Node<FuncExpr>> {
    let ctx = ctx.in_function(true);
    let start = self.checkpoint();
    let head = self.arrow_func_head(ctx)?;
    self.arrow_func_body(ctx, &start, head, terminators)
  }

  /// Tries an arrow function signature and rewinds if there isn't one. A line break before `=>`
  /// is still an error, as nothing else could follow.
  pub(super) fn maybe_arrow_func<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
  ) -> SyntaxResult<Option<Node<FuncExpr>>> {
    let ctx = ctx.in_function(true);
    let start = self.checkpoint();
    let head = self.rewindable(|p| match p.arrow_func_head(ctx) {
      Ok(head) => Ok(Some(head)),
      Err(err) if err.typ == SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters => {
        Err(err)
      }
      Err(_) => Ok(None),
    })?;
    head
      .map(|head| self.arrow_func_body(ctx, &start, head, terminators))
      .transpose()
  }

  /// `(` starts either arrow function parameters or a parenthesised expression.
  pub(super) fn paren_or_arrow<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<Node<Expr>> {
    if let Some(arrow) = self.maybe_arrow_func(ctx, terminators)? {
      return Ok(arrow.into_wrapped());
    };
    self.require(TT::ParenthesisOpen)?;
    let expr = self.expr_with_min_prec(ctx, 1, [TT::ParenthesisClose], asi)?;
    self.require(TT::ParenthesisClose)?;
    Ok(expr)
  }
}
