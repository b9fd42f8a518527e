mod arrow;
pub mod lit;
mod operand;
pub mod pat;
pub mod util;

use super::ParseCtx;
use super::Parser;
use crate::ast::expr::lit::TemplateExpr;
use crate::ast::expr::AssignExpr;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::CallArg;
use crate::ast::expr::CallExpr;
use crate::ast::expr::CondExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::MemberExpr;
use crate::ast::expr::MemberProp;
use crate::ast::expr::UpdateExpr;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::is_keyword;
use crate::operator::Associativity;
use crate::operator::Operator;
use crate::operator::OperatorName;
use crate::operator::OPERATORS;
use crate::parse::operator::multary_operator;
use crate::token::TT;
use util::assign_target;

/// Automatic Semicolon Insertion state for one expression.
pub struct Asi {
  /// Whether the expression may end at a line break or `}` instead of a semicolon.
  pub can_end_with_asi: bool,
  /// Set when it did.
  pub did_end_with_asi: bool,
}

impl Asi {
  pub fn can() -> Asi {
    Asi {
      can_end_with_asi: true,
      did_end_with_asi: false,
    }
  }

  pub fn no() -> Asi {
    Asi {
      can_end_with_asi: false,
      did_end_with_asi: false,
    }
  }
}

fn precedence(name: OperatorName) -> u8 {
  OPERATORS[&name].precedence
}

/// The minimum precedence of an operator's right-hand operand.
fn operand_min_prec(operator: &Operator) -> u8 {
  match operator.associativity {
    Associativity::Left => operator.precedence + 1,
    Associativity::Right => operator.precedence,
  }
}

impl<'a> Parser<'a> {
  pub fn expr<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
  ) -> SyntaxResult<Node<Expr>> {
    self.expr_with_min_prec(ctx, 1, terminators, &mut Asi::no())
  }

  pub fn expr_with_asi<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<Node<Expr>> {
    self.expr_with_min_prec(ctx, 1, terminators, asi)
  }

  /// Parses an operand, then folds in each following operator that binds at least as tightly as
  /// `min_prec`. Stops without consuming at any of `terminators`.
  pub fn expr_with_min_prec<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    min_prec: u8,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<Node<Expr>> {
    self.nested(|p| {
      let chain = p.operator_chain;
      let result = p.operations(ctx, min_prec, terminators, asi);
      p.operator_chain = chain;
      result
    })
  }

  fn operations<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    min_prec: u8,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<Node<Expr>> {
    let mut left = self.expr_operand(ctx, terminators, asi)?;
    loop {
      let t = self.peek();
      if terminators.contains(&t.typ) {
        break;
      };
      // Postfix updates and tagged templates must start on the operand's line.
      let same_line = !t.preceded_by_line_terminator;
      left = match t.typ {
        TT::PlusPlus | TT::HyphenHyphen if same_line => {
          let name = if t.typ == TT::PlusPlus {
            OperatorName::PostfixIncrement
          } else {
            OperatorName::PostfixDecrement
          };
          if precedence(name) < min_prec {
            break;
          };
          self.consume();
          let target = assign_target(left, name)?;
          Node::new(target.loc + t.loc, UpdateExpr {
            operator: name,
            target,
          })
          .into_wrapped()
        }
        TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd if same_line => {
          self.tagged_template(ctx, left)?
        }
        typ => match multary_operator(typ) {
          Some(operator) if operator.precedence < min_prec => break,
          Some(operator) => {
            self.consume();
            self.infix(ctx, left, operator, terminators, asi)?
          }
          None if asi.can_end_with_asi
            && (!same_line || matches!(typ, TT::BraceClose | TT::EOF)) =>
          {
            asi.did_end_with_asi = true;
            break;
          }
          None => return Err(t.error(SyntaxErrorType::ExpectedSyntax("expression operator"))),
        },
      };
      self.chain_operator(&t)?;
    }
    Ok(left)
  }

  /// Applies `operator`, whose token was just consumed, to `left`.
  fn infix<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    left: Node<Expr>,
    operator: &Operator,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<Node<Expr>> {
    use OperatorName as O;
    let optional = matches!(
      operator.name,
      O::OptionalChainingCall
        | O::OptionalChainingComputedMemberAccess
        | O::OptionalChainingMemberAccess
    );
    Ok(match operator.name {
      O::Call | O::OptionalChainingCall => {
        let args = self.call_args(ctx)?;
        let end = self.require(TT::ParenthesisClose)?;
        Node::new(left.loc + end.loc, CallExpr {
          optional,
          args,
          callee: left,
        })
        .into_wrapped()
      }
      O::ComputedMemberAccess | O::OptionalChainingComputedMemberAccess => {
        let member = self.expr(ctx, [TT::BracketClose])?;
        let end = self.require(TT::BracketClose)?;
        Node::new(left.loc + end.loc, MemberExpr {
          optional,
          object: left,
          property: MemberProp::Computed(member),
        })
        .into_wrapped()
      }
      O::MemberAccess | O::OptionalChainingMemberAccess => {
        // Keywords are fine as property names, as in `promise.catch`.
        let property = self.consume();
        if property.typ != TT::Identifier && !is_keyword(property.typ) {
          return Err(property.error(SyntaxErrorType::ExpectedSyntax("member access property")));
        };
        Node::new(left.loc + property.loc, MemberExpr {
          optional,
          object: left,
          property: MemberProp::Name(self.string(property.loc)),
        })
        .into_wrapped()
      }
      O::Conditional => {
        let if_true = self.expr(ctx, [TT::Colon])?;
        self.require(TT::Colon)?;
        let if_false = self.expr_with_min_prec(
          ctx,
          precedence(O::ConditionalAlternate),
          terminators,
          asi,
        )?;
        Node::new(left.loc + if_false.loc, CondExpr {
          test: left,
          if_true,
          if_false,
        })
        .into_wrapped()
      }
      name if name.is_assignment() => {
        let target = assign_target(left, name)?;
        let value = self.expr_with_min_prec(ctx, operand_min_prec(operator), terminators, asi)?;
        Node::new(target.loc + value.loc, AssignExpr {
          operator: name,
          target,
          value,
        })
        .into_wrapped()
      }
      name => {
        let right = self.expr_with_min_prec(ctx, operand_min_prec(operator), terminators, asi)?;
        Node::new(left.loc + right.loc, BinaryExpr {
          operator: name,
          left,
          right,
        })
        .into_wrapped()
      }
    })
  }

  /// Arguments up to, but not including, the closing parenthesis.
  fn call_args(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<Node<CallArg>>> {
    let mut args = Vec::new();
    while self.peek().typ != TT::ParenthesisClose {
      args.push(self.with_loc(|p| {
        let spread = p.consume_if(TT::DotDotDot).is_match();
        let value = p.expr(ctx, [TT::Comma, TT::ParenthesisClose])?;
        Ok(CallArg { spread, value })
      })?);
      if !self.consume_if(TT::Comma).is_match() {
        break;
      };
    }
    Ok(args)
  }

  fn tagged_template(&mut self, ctx: ParseCtx, tag: Node<Expr>) -> SyntaxResult<Node<Expr>> {
    let start = self.checkpoint();
    let parts = self.template_parts(ctx, true)?;
    let loc = tag.loc + self.since_checkpoint(&start);
    Ok(
      Node::new(loc, TemplateExpr {
        tag: Some(tag),
        parts,
      })
      .into_wrapped(),
    )
  }
}
