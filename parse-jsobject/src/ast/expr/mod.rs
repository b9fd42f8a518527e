pub mod lit;
pub mod pat;

use super::func::Func;
use super::node::Node;
use super::object::Class;
use super::object::ObjectExpr;
use crate::operator::OperatorName;
use derive_more::derive::From;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use lit::ArrayExpr;
use lit::LitExpr;
use lit::TemplateExpr;
use pat::DeclName;
use pat::Pat;
use serde::Serialize;

// Variants wrap a Node so visitors see the node, with its location and annotations.
#[derive(Debug, Drive, DriveMut, From, Serialize)]
#[serde(tag = "$t")]
pub enum Expr {
  Array(Node<ArrayExpr>),
  Assign(Node<AssignExpr>),
  Binary(Node<BinaryExpr>),
  Call(Node<CallExpr>),
  Class(Node<ClassExpr>),
  Cond(Node<CondExpr>),
  Func(Node<FuncExpr>),
  Id(Node<IdExpr>),
  Lit(Node<LitExpr>),
  Member(Node<MemberExpr>),
  Meta(Node<MetaExpr>),
  Object(Node<ObjectExpr>),
  Template(Node<TemplateExpr>),
  Unary(Node<UnaryExpr>),
  Update(Node<UpdateExpr>),
}

/// A read of a variable.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IdExpr {
  #[drive(skip)]
  pub name: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct AssignExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub target: Node<Pat>,
  pub value: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct BinaryExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub left: Node<Expr>,
  pub right: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CallExpr {
  #[drive(skip)]
  pub optional: bool,
  pub callee: Node<Expr>,
  pub args: Vec<Node<CallArg>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CallArg {
  #[drive(skip)]
  pub spread: bool,
  pub value: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassExpr {
  pub name: Option<Node<DeclName>>,
  pub class: Node<Class>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CondExpr {
  pub test: Node<Expr>,
  pub if_true: Node<Expr>,
  pub if_false: Node<Expr>,
}

/// Both arrow functions and `function` expressions; [`Func::arrow`] tells them apart.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct FuncExpr {
  pub name: Option<Node<DeclName>>,
  pub func: Node<Func>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct MemberExpr {
  #[drive(skip)]
  pub optional: bool,
  pub object: Node<Expr>,
  pub property: MemberProp,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum MemberProp {
  // `a.b`: `b` names a property, not a variable.
  Name(#[drive(skip)] String),
  Computed(Node<Expr>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MetaKind {
  This,
  Super,
  NewTarget,
}

/// `this`, `super` and `new.target`, whose values come from the enclosing function.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct MetaExpr {
  #[drive(skip)]
  pub kind: MetaKind,
}

/// Prefix operators other than `++` and `--`, including `await`, `yield` and `new`.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct UnaryExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub argument: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct UpdateExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub target: Node<Pat>,
}
