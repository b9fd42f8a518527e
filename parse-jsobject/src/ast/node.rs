use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::loc::Loc;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;
use serde::Serializer;
use std::any::Any;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;

/// Facts attached to a node by analysis passes. At most one value of each type is kept.
///
/// Nodes rarely carry more than a couple of annotations, so a scan beats hashing.
#[derive(Default)]
pub struct Annotations(Vec<Box<dyn Any + Send + Sync>>);

impl Annotations {
  pub fn get<T: Any>(&self) -> Option<&T> {
    self.0.iter().find_map(|a| a.downcast_ref())
  }

  pub fn has<T: Any>(&self) -> bool {
    self.get::<T>().is_some()
  }

  /// Attaches `value`, replacing any earlier value of the same type.
  pub fn set<T: Any + Send + Sync>(&mut self, value: T) {
    match self.0.iter().position(|a| a.is::<T>()) {
      Some(i) => self.0[i] = Box::new(value),
      None => self.0.push(Box::new(value)),
    }
  }
}

/// A piece of syntax and the source range it was parsed from.
#[derive(Drive, DriveMut)]
pub struct Node<S: Drive + DriveMut> {
  #[drive(skip)]
  pub loc: Loc,
  pub stx: Box<S>,
  #[drive(skip)]
  pub annotations: Annotations,
}

impl<S: Drive + DriveMut> Node<S> {
  pub fn new(loc: Loc, stx: S) -> Node<S> {
    Node {
      loc,
      stx: Box::new(stx),
      annotations: Annotations::default(),
    }
  }

  /// Wraps this node as a variant of an enum node at the same location, e.g. `Node<IdExpr>` as a
  /// `Node<Expr>`.
  pub fn into_wrapped<T: From<Node<S>> + Drive + DriveMut>(self) -> Node<T> {
    let loc = self.loc;
    Node::new(loc, T::from(self))
  }

  pub fn error(&self, typ: SyntaxErrorType) -> SyntaxError {
    self.loc.error(typ, None)
  }
}

impl<S: Debug + Drive + DriveMut> Debug for Node<S> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    self.stx.fmt(f)
  }
}

impl<S: Serialize + Drive + DriveMut> Serialize for Node<S> {
  fn serialize<Se: Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
    self.stx.serialize(serializer)
  }
}

#[cfg(test)]
mod tests {
  use super::Annotations;

  #[test]
  fn annotations_keep_one_value_per_type() {
    struct Depth(u32);
    let mut annotations = Annotations::default();
    assert!(!annotations.has::<Depth>());
    annotations.set(Depth(1));
    annotations.set("marker");
    annotations.set(Depth(2));
    assert_eq!(annotations.get::<Depth>().unwrap().0, 2);
    assert_eq!(annotations.get::<&str>(), Some(&"marker"));
    assert!(annotations.get::<u8>().is_none());
  }
}
