use crate::ast::expr::pat::Binding;
use crate::ast::expr::pat::DeclKind;
use crate::ast::expr::pat::DeclName;
use crate::ast::expr::Expr;
use crate::ast::func::Func;
use crate::ast::node::Node;
use crate::ast::object::Class;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassDecl {
  pub name: Node<DeclName>,
  pub class: Node<Class>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct FuncDecl {
  pub name: Node<DeclName>,
  pub func: Node<Func>,
}

/// `var`, `let` or `const` with one or more declarators.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct VarDecl {
  #[drive(skip)]
  pub kind: DeclKind,
  pub declarators: Vec<VarDeclarator>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct VarDeclarator {
  pub binding: Node<Binding>,
  pub init: Option<Node<Expr>>,
}
