use super::super::ParseCtx;
use super::super::Parser;
use crate::ast::expr::pat::DeclKind;
use crate::ast::node::Node;
use crate::ast::stmt::CatchClause;
use crate::ast::stmt::IfStmt;
use crate::ast::stmt::ReturnStmt;
use crate::ast::stmt::SwitchCase;
use crate::ast::stmt::SwitchStmt;
use crate::ast::stmt::ThrowStmt;
use crate::ast::stmt::TryStmt;
use crate::ast::stmt::WhileStmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn if_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<IfStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordIf)?;
      let test = p.paren_expr(ctx)?;
      let consequent = p.stmt(ctx)?;
      let alternate = p.consume_if(TT::KeywordElse).and_then(|| p.stmt(ctx))?;
      Ok(IfStmt {
        test,
        consequent,
        alternate,
      })
    })
  }

  pub fn while_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<WhileStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordWhile)?;
      let test = p.paren_expr(ctx)?;
      let body = p.stmt(ctx.in_loop())?;
      Ok(WhileStmt {
        do_while: false,
        test,
        body,
      })
    })
  }

  pub fn do_while_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<WhileStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordDo)?;
      let body = p.stmt(ctx.in_loop())?;
      p.require(TT::KeywordWhile)?;
      let test = p.paren_expr(ctx)?;
      // Never needs a semicolon, even on the same line as what follows.
      let _ = p.consume_if(TT::Semicolon);
      Ok(WhileStmt {
        do_while: true,
        test,
        body,
      })
    })
  }

  pub fn switch_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<SwitchStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordSwitch)?;
      let discriminant = p.paren_expr(ctx)?;
      p.require(TT::BraceOpen)?;
      let mut cases = Vec::new();
      while !p.consume_if(TT::BraceClose).is_match() {
        cases.push(p.switch_case(ctx.in_switch())?);
      }
      Ok(SwitchStmt {
        discriminant,
        cases,
      })
    })
  }

  fn switch_case(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<SwitchCase>> {
    self.with_loc(|p| {
      let t = p.consume();
      let test = match t.typ {
        TT::KeywordCase => Some(p.expr(ctx, [TT::Colon])?),
        TT::KeywordDefault => None,
        _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("`case` or `default`"))),
      };
      p.require(TT::Colon)?;
      let body = p.repeat_while(
        |p| {
          !matches!(
            p.peek().typ,
            TT::KeywordCase | TT::KeywordDefault | TT::BraceClose | TT::EOF
          )
        },
        |p| p.stmt(ctx),
      )?;
      Ok(SwitchCase { test, body })
    })
  }

  pub fn try_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<TryStmt>> {
    self.with_loc(|p| {
      let start = p.require(TT::KeywordTry)?;
      let block = p.block_stmt(ctx)?;
      let handler = p
        .consume_if(TT::KeywordCatch)
        .and_then(|| p.catch_clause(ctx))?;
      let finalizer = p
        .consume_if(TT::KeywordFinally)
        .and_then(|| p.block_stmt(ctx))?;
      if handler.is_none() && finalizer.is_none() {
        return Err(start.error(SyntaxErrorType::TryStatementHasNoCatchOrFinally));
      };
      Ok(TryStmt {
        block,
        handler,
        finalizer,
      })
    })
  }

  /// Everything after `catch`. The binding is optional.
  fn catch_clause(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<CatchClause>> {
    self.with_loc(|p| {
      let param = if p.consume_if(TT::ParenthesisOpen).is_match() {
        let param = p.binding(ctx, DeclKind::CatchParam)?;
        p.require(TT::ParenthesisClose)?;
        Some(param)
      } else {
        None
      };
      let body = p.braced_stmts(ctx)?;
      Ok(CatchClause { param, body })
    })
  }

  pub fn return_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ReturnStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordReturn)?;
      let value = match p.peek() {
        t if t.typ == TT::Semicolon => {
          p.consume();
          None
        }
        // A value on the next line is a separate statement.
        t if t.preceded_by_line_terminator || matches!(t.typ, TT::BraceClose | TT::EOF) => None,
        _ => Some(p.expr_then_semicolon(ctx)?),
      };
      Ok(ReturnStmt { value })
    })
  }

  pub fn throw_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ThrowStmt>> {
    self.with_loc(|p| {
      let keyword = p.require(TT::KeywordThrow)?;
      if p.peek().preceded_by_line_terminator {
        return Err(keyword.error(SyntaxErrorType::LineTerminatorAfterThrow));
      };
      let value = p.expr_then_semicolon(ctx)?;
      Ok(ThrowStmt { value })
    })
  }
}
