use super::expr::pat::Binding;
use super::expr::Expr;
use super::node::Node;
use super::stmt::Stmt;
use derive_more::derive::From;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

/// Every callable shape shares this node: arrows, function expressions and declarations, methods
/// and accessors. Whether a JS Object member is an action depends only on finding one of these.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct Func {
  #[drive(skip)]
  pub arrow: bool,
  #[drive(skip)]
  pub async_: bool,
  #[drive(skip)]
  pub generator: bool,
  pub params: Vec<Node<Param>>,
  pub body: FuncBody,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct Param {
  #[drive(skip)]
  pub rest: bool,
  pub binding: Node<Binding>,
  pub default: Option<Node<Expr>>,
}

// Statements of a block body share the function's scope with its parameters.
#[derive(Debug, Drive, DriveMut, From, Serialize)]
pub enum FuncBody {
  Block(Vec<Node<Stmt>>),
  // Concise arrow body.
  Expr(Node<Expr>),
}
