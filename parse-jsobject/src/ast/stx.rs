use super::node::Node;
use super::object::ObjectExpr;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

/// The whole JS Object source: a single object literal, optionally behind `export default`.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjectModule {
  #[drive(skip)]
  pub export_default: bool,
  pub object: Node<ObjectExpr>,
}
