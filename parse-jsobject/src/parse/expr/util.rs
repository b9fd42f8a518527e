use crate::ast::expr::lit::ArrayElem;
use crate::ast::expr::lit::ArrayExpr;
use crate::ast::expr::pat::ArrayPat;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::pat::ObjectPat;
use crate::ast::expr::pat::ObjectPatProp;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::pat::PatElem;
use crate::ast::expr::AssignExpr;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::object::ObjMember;
use crate::ast::object::ObjectExpr;
use crate::ast::object::PropKey;
use crate::ast::object::PropName;
use crate::ast::object::PropValue;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::operator::OperatorName;
use crate::token::TT;

fn invalid_target(loc: Loc) -> SyntaxError {
  loc.error(SyntaxErrorType::InvalidAssignmentTarget, None)
}

/// Splits `target = default` as found inside a destructuring literal, where the `=` was parsed
/// as an assignment.
fn pat_elem(node: Node<Expr>) -> SyntaxResult<PatElem> {
  let loc = node.loc;
  match *node.stx {
    Expr::Assign(assign) => {
      let AssignExpr {
        operator,
        target,
        value,
      } = *assign.stx;
      if operator != OperatorName::Assignment {
        return Err(invalid_target(loc));
      };
      Ok(PatElem {
        target,
        default: Some(value),
      })
    }
    stx => Ok(PatElem {
      target: expr_to_pat(Node::new(loc, stx))?,
      default: None,
    }),
  }
}

fn array_to_pat(loc: Loc, array: ArrayExpr) -> SyntaxResult<Node<Pat>> {
  let mut elements = Vec::new();
  let mut rest = None;
  for element in array.elements {
    if rest.is_some() {
      return Err(invalid_target(loc));
    };
    match element {
      ArrayElem::Hole => elements.push(None),
      ArrayElem::Item(item) => elements.push(Some(pat_elem(item)?)),
      ArrayElem::Spread(spread) => rest = Some(expr_to_pat(spread)?),
    };
  }
  Ok(Node::new(loc, ArrayPat { elements, rest }).into_wrapped())
}

fn object_to_pat(loc: Loc, object: ObjectExpr) -> SyntaxResult<Node<Pat>> {
  let mut props = Vec::new();
  let mut rest = None;
  for member in object.members {
    let member_loc = member.loc;
    if rest.is_some() {
      return Err(invalid_target(member_loc));
    };
    match *member.stx {
      ObjMember::Prop {
        key,
        value: PropValue::Value(value),
      } => props.push(Node::new(member_loc, ObjectPatProp {
        key,
        elem: pat_elem(value)?,
      })),
      ObjMember::Prop { .. } => return Err(invalid_target(member_loc)),
      ObjMember::Shorthand { id } => {
        let name = id.stx.name.clone();
        props.push(Node::new(member_loc, ObjectPatProp {
          key: PropKey::Named(Node::new(id.loc, PropName {
            name: name.clone(),
            token: TT::Identifier,
          })),
          elem: PatElem {
            target: Node::new(id.loc, IdPat { name }).into_wrapped(),
            default: None,
          },
        }));
      }
      ObjMember::Spread { value } => {
        let target = expr_to_pat(value)?;
        // An object rest must be a plain identifier.
        if !matches!(target.stx.as_ref(), Pat::Id(_)) {
          return Err(invalid_target(target.loc));
        };
        rest = Some(target);
      }
    };
  }
  Ok(Node::new(loc, ObjectPat { props, rest }).into_wrapped())
}

/// Reinterprets an expression that turned out to be an assignment target, e.g. the `[a, b]` of
/// `[a, b] = pair`. Parsing an array or object literal first and converting it afterwards avoids
/// rewinding.
pub fn expr_to_pat(node: Node<Expr>) -> SyntaxResult<Node<Pat>> {
  let loc = node.loc;
  match *node.stx {
    Expr::Id(id) => Ok(Node::new(loc, IdPat { name: id.stx.name }).into_wrapped()),
    Expr::Member(member) if !member.stx.optional => Ok(member.into_wrapped()),
    Expr::Array(array) => array_to_pat(loc, *array.stx),
    Expr::Object(object) => object_to_pat(loc, *object.stx),
    _ => Err(invalid_target(loc)),
  }
}

/// The target written to by `operator`, an assignment or update. Only a plain `=` may destructure.
pub fn assign_target(lhs: Node<Expr>, operator: OperatorName) -> SyntaxResult<Node<Pat>> {
  let target = expr_to_pat(lhs)?;
  match target.stx.as_ref() {
    Pat::Array(_) | Pat::Object(_) if operator != OperatorName::Assignment => {
      Err(invalid_target(target.loc))
    }
    _ => Ok(target),
  }
}

#[cfg(test)]
mod tests {
  use super::assign_target;
  use crate::ast::expr::pat::Pat;
  use crate::ast::expr::Expr;
  use crate::ast::node::Node;
  use crate::error::SyntaxErrorType;
  use crate::lex::Lexer;
  use crate::operator::OperatorName;
  use crate::parse::ParseCtx;
  use crate::parse::Parser;

  fn operand(src: &str) -> Node<Expr> {
    let mut parser = Parser::new(Lexer::new(src));
    parser.expr(ParseCtx::default(), []).unwrap()
  }

  #[test]
  fn test_array_literal_becomes_pattern() {
    let target = assign_target(operand("[a, , b = 1, ...c]"), OperatorName::Assignment).unwrap();
    let Pat::Array(arr) = *target.stx else {
      panic!("expected array pattern");
    };
    assert_eq!(arr.stx.elements.len(), 3);
    assert!(arr.stx.elements[1].is_none());
    assert!(arr.stx.elements[2].as_ref().unwrap().default.is_some());
    assert!(matches!(
      arr.stx.rest.as_ref().map(|r| r.stx.as_ref()),
      Some(Pat::Id(_))
    ));
  }

  #[test]
  fn test_member_targets_keep_their_object() {
    let target = assign_target(operand("a.b[c]"), OperatorName::AssignmentAddition).unwrap();
    assert!(matches!(target.stx.as_ref(), Pat::Member(_)));
    let err = assign_target(operand("a?.b"), OperatorName::Assignment).unwrap_err();
    assert_eq!(err.typ, SyntaxErrorType::InvalidAssignmentTarget);
  }

  #[test]
  fn test_compound_destructuring_is_invalid() {
    let err = assign_target(operand("{ a }"), OperatorName::AssignmentAddition).unwrap_err();
    assert_eq!(err.typ, SyntaxErrorType::InvalidAssignmentTarget);
  }

  #[test]
  fn test_call_is_invalid_target() {
    let err = assign_target(operand("f()"), OperatorName::Assignment).unwrap_err();
    assert_eq!(err.typ, SyntaxErrorType::InvalidAssignmentTarget);
  }
}
