use super::expr::pat::ParsePatternRules;
use super::ParseCtx;
use super::Parser;
use crate::ast::expr::pat::DeclKind;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::func::Param;
use crate::ast::node::Node;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// `ctx` must already be the function's own context.
  pub fn func_params(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<Node<Param>>> {
    self.require(TT::ParenthesisOpen)?;
    self.list_with_loc(TT::Comma, TT::ParenthesisClose, |p| {
      let rest = p.consume_if(TT::DotDotDot).is_match();
      let binding = p.binding(ctx, DeclKind::Param)?;
      let default = p
        .consume_if(TT::Equals)
        .and_then(|| p.expr(ctx, [TT::Comma, TT::ParenthesisClose]))?;
      Ok(Param {
        rest,
        binding,
        default,
      })
    })
  }

  /// Parses the parameters and block body of a non-arrow function, i.e. everything after the name.
  pub fn func(&mut self, ctx: ParseCtx, async_: bool, generator: bool) -> SyntaxResult<Node<Func>> {
    // `yield` is an operator within a generator, and a plain identifier everywhere else.
    let fn_ctx = ctx.in_function(false).with_rules(ParsePatternRules {
      yield_allowed: !generator,
    });
    self.with_loc(|p| {
      let params = p.func_params(fn_ctx)?;
      let body = FuncBody::Block(p.without_labels(|p| p.braced_stmts(fn_ctx))?);
      Ok(Func {
        arrow: false,
        async_,
        generator,
        params,
        body,
      })
    })
  }
}
