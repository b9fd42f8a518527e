use super::ParseCtx;
use super::Parser;
use crate::ast::expr::pat::DeclKind;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ClassDecl;
use crate::ast::stmt::decl::FuncDecl;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclarator;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::parse::expr::Asi;
use crate::token::TT;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum VarDeclParseMode {
  // Standard parsing mode for var/let/const statement.
  Asi,
  // Parse as many valid declarators as possible, then break before the first invalid token (i.e. not a comma). Used by for-loop parser,
  // which checks initializers itself once it knows the kind of loop.
  Leftmost,
}

impl<'a> Parser<'a> {
  pub fn var_decl_kind(&mut self) -> SyntaxResult<DeclKind> {
    let t = self.consume();
    Ok(match t.typ {
      TT::KeywordLet => DeclKind::Let,
      TT::KeywordConst => DeclKind::Const,
      TT::KeywordVar => DeclKind::Var,
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("variable declaration"))),
    })
  }

  /// Parses a variable declaration, which contains one or more declarators, each with an optional initializer. Examples of variable declarations:
  /// - `const a = 1`
  /// - `let a, b = 2, c`
  /// - `var { a, b: [c] } = d`
  pub fn var_decl(
    &mut self,
    ctx: ParseCtx,
    parse_mode: VarDeclParseMode,
  ) -> SyntaxResult<Node<VarDecl>> {
    self.with_loc(|p| {
      let kind = p.var_decl_kind()?;
      let mut declarators = Vec::new();
      loop {
        let binding = p.binding(ctx, kind)?;
        let mut asi = match parse_mode {
          VarDeclParseMode::Asi => Asi::can(),
          VarDeclParseMode::Leftmost => Asi::no(),
        };
        let init = p
          .consume_if(TT::Equals)
          .and_then(|| p.expr_with_asi(ctx, [TT::Semicolon, TT::Comma], &mut asi))?;
        if init.is_none() && kind == DeclKind::Const && parse_mode == VarDeclParseMode::Asi {
          return Err(binding.error(SyntaxErrorType::ConstWithoutInitializer));
        };
        declarators.push(VarDeclarator { binding, init });
        match parse_mode {
          VarDeclParseMode::Asi => {
            if p.consume_if(TT::Semicolon).is_match() || asi.did_end_with_asi {
              break;
            }
            let t = p.peek();
            if t.typ == TT::EOF
              || t.typ == TT::BraceClose
              || (t.preceded_by_line_terminator && t.typ != TT::Comma)
            {
              break;
            };
            p.require(TT::Comma)?;
          }
          VarDeclParseMode::Leftmost => {
            if !p.consume_if(TT::Comma).is_match() {
              break;
            }
          }
        }
      }
      Ok(VarDecl { kind, declarators })
    })
  }

  pub fn func_decl(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<FuncDecl>> {
    self.with_loc(|p| {
      let is_async = p.consume_if(TT::KeywordAsync).is_match();
      p.require(TT::KeywordFunction)?;
      let generator = p.consume_if(TT::Asterisk).is_match();
      let name = p.decl_name(ctx)?;
      let func = p.func(ctx, is_async, generator)?;
      Ok(FuncDecl { name, func })
    })
  }

  pub fn class_decl(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ClassDecl>> {
    self.with_loc(|p| {
      p.require(TT::KeywordClass)?;
      let name = p.decl_name(ctx)?;
      let class = p.class(ctx)?;
      Ok(ClassDecl { name, class })
    })
  }
}
