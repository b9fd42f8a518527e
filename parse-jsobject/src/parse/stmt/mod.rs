mod control;
pub mod decl;
mod loops;

use super::expr::pat::is_valid_pattern_identifier;
use super::expr::Asi;
use super::Label;
use super::ParseCtx;
use super::Parser;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::DebuggerStmt;
use crate::ast::stmt::EmptyStmt;
use crate::ast::stmt::ExprStmt;
use crate::ast::stmt::JumpKind;
use crate::ast::stmt::JumpStmt;
use crate::ast::stmt::LabelStmt;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;
use decl::VarDeclParseMode;

/// `let` is contextual: it only starts a declaration when a binding pattern follows it.
fn starts_var_decl(ctx: ParseCtx, t0: &Token, t1: &Token) -> bool {
  match t0.typ {
    TT::KeywordVar | TT::KeywordConst => true,
    TT::KeywordLet => {
      matches!(t1.typ, TT::BraceOpen | TT::BracketOpen)
        || is_valid_pattern_identifier(t1.typ, ctx.rules)
    }
    _ => false,
  }
}

impl<'a> Parser<'a> {
  pub fn stmts(&mut self, ctx: ParseCtx, end: TT) -> SyntaxResult<Vec<Node<Stmt>>> {
    self.repeat_until_tt(end, |p| p.stmt(ctx))
  }

  /// `{ ... }` as a plain list. Callers decide what scope the braces open.
  pub(crate) fn braced_stmts(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<Node<Stmt>>> {
    self.require(TT::BraceOpen)?;
    let body = self.stmts(ctx, TT::BraceClose)?;
    self.require(TT::BraceClose)?;
    Ok(body)
  }

  /// The parenthesised head of `if`, `while` and `switch`.
  fn paren_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Expr>> {
    self.require(TT::ParenthesisOpen)?;
    let expr = self.expr(ctx, [TT::ParenthesisClose])?;
    self.require(TT::ParenthesisClose)?;
    Ok(expr)
  }

  pub fn stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Stmt>> {
    self.nested(|p| p.stmt_unchecked(ctx))
  }

  fn stmt_unchecked(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Stmt>> {
    let [t0, t1] = self.peek_n();
    if starts_var_decl(ctx, &t0, &t1) {
      return Ok(self.var_decl(ctx, VarDeclParseMode::Asi)?.into_wrapped());
    };
    Ok(match t0.typ {
      TT::BraceOpen => self.block_stmt(ctx)?.into_wrapped(),
      TT::Semicolon => self
        .with_loc(|p| {
          p.consume();
          Ok(EmptyStmt {})
        })?
        .into_wrapped(),
      TT::KeywordBreak => self.jump_stmt(ctx, JumpKind::Break)?.into_wrapped(),
      TT::KeywordContinue => self.jump_stmt(ctx, JumpKind::Continue)?.into_wrapped(),
      TT::KeywordDebugger => self
        .with_loc(|p| {
          p.consume();
          let _ = p.consume_if(TT::Semicolon);
          Ok(DebuggerStmt {})
        })?
        .into_wrapped(),
      // `async` followed by a newline is an expression, not the start of a declaration.
      TT::KeywordAsync if t1.typ == TT::KeywordFunction && !t1.preceded_by_line_terminator => {
        self.func_decl(ctx)?.into_wrapped()
      }
      TT::KeywordFunction => self.func_decl(ctx)?.into_wrapped(),
      TT::KeywordClass => self.class_decl(ctx)?.into_wrapped(),
      TT::KeywordIf => self.if_stmt(ctx)?.into_wrapped(),
      TT::KeywordFor => self.for_stmt(ctx)?,
      TT::KeywordWhile => self.while_stmt(ctx)?.into_wrapped(),
      TT::KeywordDo => self.do_while_stmt(ctx)?.into_wrapped(),
      TT::KeywordSwitch => self.switch_stmt(ctx)?.into_wrapped(),
      TT::KeywordTry => self.try_stmt(ctx)?.into_wrapped(),
      TT::KeywordReturn => self.return_stmt(ctx)?.into_wrapped(),
      TT::KeywordThrow => self.throw_stmt(ctx)?.into_wrapped(),
      t if t1.typ == TT::Colon && is_valid_pattern_identifier(t, ctx.rules) => {
        self.label_stmt(ctx)?.into_wrapped()
      }
      _ => self
        .with_loc(|p| {
          let expr = p.expr_then_semicolon(ctx)?;
          Ok(ExprStmt { expr })
        })?
        .into_wrapped(),
    })
  }

  pub fn block_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<BlockStmt>> {
    self.with_loc(|p| {
      let body = p.braced_stmts(ctx)?;
      Ok(BlockStmt { body })
    })
  }

  /// Whether the statement after the `label:` at the cursor is a loop, looking through any
  /// further labels in between.
  fn labels_loop(&mut self) -> bool {
    let start = self.checkpoint();
    loop {
      self.consume();
      self.consume();
      let [t0, t1] = self.peek_n::<2>();
      if t1.typ != TT::Colon {
        self.restore_checkpoint(start);
        return matches!(t0.typ, TT::KeywordFor | TT::KeywordWhile | TT::KeywordDo);
      };
    }
  }

  pub fn label_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<LabelStmt>> {
    let is_loop = self.labels_loop();
    self.with_loc(|p| {
      let t = p.consume();
      let name = p.string(t.loc);
      if p.label(&name).is_some() {
        return Err(t.error(SyntaxErrorType::DuplicateLabel));
      };
      p.require(TT::Colon)?;
      let label = Label {
        name: name.clone(),
        is_loop,
      };
      let body = p.with_label(label, |p| p.stmt(ctx))?;
      Ok(LabelStmt { name, body })
    })
  }

  /// `break` or `continue`, which must have somewhere to jump to.
  fn jump_stmt(&mut self, ctx: ParseCtx, kind: JumpKind) -> SyntaxResult<Node<JumpStmt>> {
    self.with_loc(|p| {
      let keyword = p.consume();
      let label = p.jump_label(ctx)?;
      let misplaced = match kind {
        JumpKind::Break => SyntaxErrorType::BreakOutsideLoopOrSwitch,
        JumpKind::Continue => SyntaxErrorType::ContinueOutsideLoop,
      };
      match (&label, kind) {
        (None, JumpKind::Break) if !ctx.in_breakable => return Err(keyword.error(misplaced)),
        (None, JumpKind::Continue) if !ctx.in_loop => return Err(keyword.error(misplaced)),
        (None, _) => {}
        (Some((name, loc)), _) => match p.label(name) {
          None => return Err(loc.error(SyntaxErrorType::UndefinedLabel, None)),
          Some(target) if kind == JumpKind::Continue && !target.is_loop => {
            return Err(keyword.error(misplaced))
          }
          Some(_) => {}
        },
      };
      Ok(JumpStmt {
        kind,
        label: label.map(|(name, _)| name),
      })
    })
  }

  /// The optional label after `break` or `continue`. It must be on the same line as the keyword.
  fn jump_label(&mut self, ctx: ParseCtx) -> SyntaxResult<Option<(String, Loc)>> {
    let t = self.peek();
    if t.typ == TT::Semicolon {
      self.consume();
      return Ok(None);
    };
    if t.preceded_by_line_terminator || matches!(t.typ, TT::BraceClose | TT::EOF) {
      return Ok(None);
    };
    if !is_valid_pattern_identifier(t.typ, ctx.rules) {
      return Err(t.error(SyntaxErrorType::ExpectedSyntax("label")));
    };
    let label = self.consume_as_string();
    let _ = self.consume_if(TT::Semicolon);
    Ok(Some((label, t.loc)))
  }

  /// Parses an expression, then requires a semicolon unless one can be inserted automatically.
  fn expr_then_semicolon(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Expr>> {
    let mut asi = Asi::can();
    let expr = self.expr_with_asi(ctx, [TT::Semicolon], &mut asi)?;
    if !asi.did_end_with_asi && !matches!(self.peek().typ, TT::BraceClose | TT::EOF) {
      self.require(TT::Semicolon)?;
    };
    Ok(expr)
  }
}
