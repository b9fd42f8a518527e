use super::super::expr::util::expr_to_pat;
use super::super::ParseCtx;
use super::super::Parser;
use super::decl::VarDeclParseMode;
use super::starts_var_decl;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclarator;
use crate::ast::stmt::ForEachKind;
use crate::ast::stmt::ForEachLhs;
use crate::ast::stmt::ForEachStmt;
use crate::ast::stmt::ForInit;
use crate::ast::stmt::ForStmt;
use crate::ast::stmt::LoopBody;
use crate::ast::stmt::Stmt;
use crate::ast::expr::pat::DeclKind;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::Token;
use crate::token::TT;

/// Whatever comes between `for (` and the first `;`, `in` or `of`.
enum ForHead {
  Empty,
  Decl(Node<VarDecl>),
  Expr(Node<Expr>),
}

impl ForHead {
  fn into_init(self) -> SyntaxResult<ForInit> {
    Ok(match self {
      ForHead::Empty => ForInit::None,
      ForHead::Decl(decl) => {
        let uninitialized_const = decl.stx.kind == DeclKind::Const
          && decl.stx.declarators.iter().any(|d| d.init.is_none());
        if uninitialized_const {
          return Err(decl.error(SyntaxErrorType::ConstWithoutInitializer));
        };
        ForInit::Decl(decl)
      }
      ForHead::Expr(expr) => ForInit::Expr(expr),
    })
  }

  /// `keyword` is the `in` or `of` that followed the head.
  fn into_each_lhs(self, keyword: &Token) -> SyntaxResult<ForEachLhs> {
    match self {
      ForHead::Expr(expr) => Ok(ForEachLhs::Target(expr_to_pat(expr)?)),
      ForHead::Decl(decl) => {
        let loc = decl.loc;
        let mut declarators = decl.stx.declarators;
        match (declarators.pop(), declarators.is_empty()) {
          (Some(VarDeclarator {
            binding,
            init: None,
          }), true) => Ok(ForEachLhs::Decl(binding)),
          _ => Err(loc.error(
            SyntaxErrorType::ExpectedSyntax("single binding without initializer"),
            None,
          )),
        }
      }
      ForHead::Empty => Err(keyword.error(SyntaxErrorType::ExpectedSyntax("assignment target"))),
    }
  }
}

impl<'a> Parser<'a> {
  /// One of:
  /// - `for ( <expr> | <var decls> ? ; <expr>? ; <expr>? )`
  /// - `for ( <pat> | <var decl> in <expr> )`
  /// - `for await? ( <pat> | <var decl> of <expr> )`
  ///
  /// The head is parsed once, and the token after it decides which loop this is.
  pub fn for_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordFor)?;
    let await_ = self.consume_if(TT::KeywordAwait).is_match();
    self.require(TT::ParenthesisOpen)?;
    let [t0, t1] = self.peek_n();
    let head = if t0.typ == TT::Semicolon {
      ForHead::Empty
    } else if starts_var_decl(ctx, &t0, &t1) {
      ForHead::Decl(self.var_decl(ctx, VarDeclParseMode::Leftmost)?)
    } else {
      ForHead::Expr(self.expr(ctx, [TT::Semicolon, TT::KeywordIn, TT::KeywordOf])?)
    };

    let next = self.peek();
    let kind = match next.typ {
      TT::KeywordIn if !await_ => Some(ForEachKind::In),
      TT::KeywordOf if await_ => Some(ForEachKind::AwaitOf),
      TT::KeywordOf => Some(ForEachKind::Of),
      _ if await_ => return Err(next.error(SyntaxErrorType::RequiredTokenNotFound(TT::KeywordOf))),
      _ => None,
    };
    if let Some(kind) = kind {
      self.consume();
      let lhs = head.into_each_lhs(&next)?;
      let iterable = self.expr(ctx, [TT::ParenthesisClose])?;
      self.require(TT::ParenthesisClose)?;
      let body = self.loop_body(ctx)?;
      return Ok(
        Node::new(start.loc + body.loc, ForEachStmt {
          kind,
          lhs,
          iterable,
          body,
        })
        .into_wrapped(),
      );
    };

    let init = head.into_init()?;
    self.require(TT::Semicolon)?;
    let test = self.optional_expr(ctx, TT::Semicolon)?;
    self.require(TT::Semicolon)?;
    let update = self.optional_expr(ctx, TT::ParenthesisClose)?;
    self.require(TT::ParenthesisClose)?;
    let body = self.loop_body(ctx)?;
    Ok(
      Node::new(start.loc + body.loc, ForStmt {
        init,
        test,
        update,
        body,
      })
      .into_wrapped(),
    )
  }

  fn optional_expr(&mut self, ctx: ParseCtx, end: TT) -> SyntaxResult<Option<Node<Expr>>> {
    if self.peek().typ == end {
      return Ok(None);
    };
    self.expr(ctx, [end]).map(Some)
  }

  // The loop's scope starts at the head, so the body is not a block statement of its own.
  fn loop_body(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<LoopBody>> {
    let ctx = ctx.in_loop();
    self.with_loc(|p| {
      let body = if p.peek().typ == TT::BraceOpen {
        p.braced_stmts(ctx)?
      } else {
        vec![p.stmt(ctx)?]
      };
      Ok(LoopBody { body })
    })
  }
}
