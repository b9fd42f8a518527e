use super::expr::Expr;
use super::expr::IdExpr;
use super::func::Func;
use super::node::Node;
use crate::token::TT;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

/// An object literal. The root of every JS Object is one of these.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjectExpr {
  pub members: Vec<Node<ObjMember>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "$t")]
pub enum ObjMember {
  Prop { key: PropKey, value: PropValue },
  /// `{ a }`, which reads the variable `a`.
  Shorthand { id: Node<IdExpr> },
  Spread { value: Node<Expr> },
}

impl ObjMember {
  /// The static name of this member, if it has one.
  pub fn name(&self) -> Option<&str> {
    match self {
      ObjMember::Prop {
        key: PropKey::Named(key),
        ..
      } => Some(&key.stx.name),
      ObjMember::Shorthand { id } => Some(&id.stx.name),
      _ => None,
    }
  }
}

/// A property name written directly. `name` is decoded, so it can differ from the source text
/// (`"a\x62"` is named `ab`).
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct PropName {
  #[drive(skip)]
  pub name: String,
  // Identifier, keyword, string or number.
  #[drive(skip)]
  pub token: TT,
}

// A named key is never a variable usage, so it isn't an IdExpr.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum PropKey {
  Named(Node<PropName>),
  Computed(Node<Expr>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum PropValue {
  Value(Node<Expr>),
  Method(Node<Func>),
  Getter(Node<Func>),
  Setter(Node<Func>),
}

impl PropValue {
  /// The function run when the member is invoked, as opposed to read or assigned.
  pub fn callable(&self) -> Option<&Node<Func>> {
    match self {
      PropValue::Method(func) => Some(func),
      PropValue::Value(expr) => match expr.stx.as_ref() {
        Expr::Func(func) => Some(&func.stx.func),
        _ => None,
      },
      PropValue::Getter(_) | PropValue::Setter(_) => None,
    }
  }
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct Class {
  pub extends: Option<Node<Expr>>,
  pub members: Vec<Node<ClassMember>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassMember {
  #[drive(skip)]
  pub static_: bool,
  pub key: PropKey,
  // None for a field without an initializer.
  pub value: Option<PropValue>,
}
