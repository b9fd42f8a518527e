use super::Expr;
use crate::ast::node::Node;
use crate::num::JsNumber;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

/// A primitive literal. Nothing inside can reference a variable.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitExpr {
  #[drive(skip)]
  pub value: LitValue,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum LitValue {
  Null,
  Bool(bool),
  Num(JsNumber),
  // Digits without the `n` suffix.
  BigInt(String),
  Str(String),
  // Including the delimiting slashes and any flags.
  Regex(String),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ArrayExpr {
  pub elements: Vec<ArrayElem>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ArrayElem {
  Hole,
  Item(Node<Expr>),
  Spread(Node<Expr>),
}

/// A template literal, with its tag function if tagged.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TemplateExpr {
  pub tag: Option<Node<Expr>>,
  pub parts: Vec<TemplatePart>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum TemplatePart {
  Str(#[drive(skip)] String),
  Subst(Node<Expr>),
}
