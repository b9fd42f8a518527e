use super::Expr;
use super::MemberExpr;
use crate::ast::node::Node;
use crate::ast::object::PropKey;
use derive_more::derive::From;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

/// A target that receives a value, either bound by a declaration or assigned by an expression.
#[derive(Debug, Drive, DriveMut, From, Serialize)]
#[serde(tag = "$t")]
pub enum Pat {
  Id(Node<IdPat>),
  Array(Node<ArrayPat>),
  Object(Node<ObjectPat>),
  // Only in assignment targets, never in a Binding.
  Member(Node<MemberExpr>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IdPat {
  #[drive(skip)]
  pub name: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct PatElem {
  pub target: Node<Pat>,
  pub default: Option<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ArrayPat {
  // None for an elision.
  pub elements: Vec<Option<PatElem>>,
  pub rest: Option<Node<Pat>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjectPat {
  pub props: Vec<Node<ObjectPatProp>>,
  pub rest: Option<Node<Pat>>,
}

/// `key: target = default`. A shorthand `{ a }` has a named key and an IdPat target.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjectPatProp {
  pub key: PropKey,
  pub elem: PatElem,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DeclKind {
  Var,
  Let,
  Const,
  Param,
  CatchParam,
}

impl DeclKind {
  pub fn is_lexical(self) -> bool {
    matches!(self, DeclKind::Let | DeclKind::Const)
  }
}

/// A pattern whose identifiers are all declared with `kind`. Defaults inside it are ordinary
/// expressions and declare nothing.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct Binding {
  #[drive(skip)]
  pub kind: DeclKind,
  pub pat: Node<Pat>,
}

/// The name of a function or class declaration or expression.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct DeclName {
  #[drive(skip)]
  pub name: String,
}
