//! Scope analysis of the values of a JS Object's properties.
//!
//! Each top-level property is analyzed in isolation in two passes over its AST:
//! - [`declare`] builds a scope tree and attaches the enclosing [`ScopeId`] to
//!   every identifier expression and pattern. Identifier patterns that introduce a
//!   binding are marked as declarations.
//!   Conflicting declarations of one name are collected along the way.
//! - [`resolve`] walks the same AST again and reports a [`BodyIssue`] for every
//!   identifier that resolves to nothing, every write to a `const` binding, and
//!   every `await` outside an `async` function.
//!
//! Since all declarations are recorded before any resolution, hoisting of `var` and
//! function declarations falls out naturally. Temporal dead zones are not modelled.

use ahash::HashMap;
use ahash::HashSet;
use parse_jsobject::ast::node::Node;
use parse_jsobject::ast::object::ObjMember;
use parse_jsobject::ast::stx::ObjectModule;
use parse_jsobject::loc::Loc;
use serde::Serialize;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

pub mod declare;
pub mod globals;
pub mod resolve;
#[cfg(test)]
mod tests;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
  /// The root scope of a property's value.
  Property,
  ArrowFunction,
  NonArrowFunction,
  Block,
  Class,
  /// The dedicated scope holding a named function expression's own name.
  FunctionExpressionName,
}

impl ScopeKind {
  /// Whether `var` declarations hoist to this scope.
  pub fn is_closure(self) -> bool {
    matches!(
      self,
      ScopeKind::Property | ScopeKind::ArrowFunction | ScopeKind::NonArrowFunction
    )
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BindingKind {
  Var,
  Let,
  Const,
  Function,
  Class,
  Param,
  CatchParam,
}

impl BindingKind {
  fn is_lexical(self) -> bool {
    matches!(self, BindingKind::Let | BindingKind::Const | BindingKind::Class)
  }
}

#[derive(Debug)]
pub struct ScopeData {
  pub parent: Option<ScopeId>,
  pub kind: ScopeKind,
  pub bindings: HashMap<String, BindingKind>,
  /// Names declared by `var` in this block or one nested in it, which bind further out.
  pub var_names: HashSet<String>,
}

impl ScopeData {
  fn new(parent: Option<ScopeId>, kind: ScopeKind) -> ScopeData {
    ScopeData {
      parent,
      kind,
      bindings: HashMap::default(),
      var_names: HashSet::default(),
    }
  }
}

/// The scope tree of one property's value.
#[derive(Debug)]
pub struct ScopeTree {
  scopes: Vec<ScopeData>,
}

impl ScopeTree {
  pub fn new() -> ScopeTree {
    ScopeTree {
      scopes: vec![ScopeData::new(None, ScopeKind::Property)],
    }
  }

  pub fn root(&self) -> ScopeId {
    ScopeId(0)
  }

  pub fn scope(&self, id: ScopeId) -> &ScopeData {
    &self.scopes[id.0]
  }

  pub fn len(&self) -> usize {
    self.scopes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.scopes.is_empty()
  }

  pub fn new_scope(&mut self, parent: ScopeId, kind: ScopeKind) -> ScopeId {
    self.scopes.push(ScopeData::new(Some(parent), kind));
    ScopeId(self.scopes.len() - 1)
  }

  /// Declares `name` in `scope`, or in the nearest closure for `var`. Fails with the kind of
  /// the existing binding if the two declarations can't coexist. The first declaration stays
  /// in effect either way.
  pub fn declare(&mut self, scope: ScopeId, name: &str, kind: BindingKind) -> Result<(), BindingKind> {
    if kind == BindingKind::Var {
      return self.declare_var(scope, name);
    };
    let data = &mut self.scopes[scope.0];
    // Directly in a function body, a function declaration behaves like `var`.
    let var_like = kind == BindingKind::Function && data.kind.is_closure();
    if let Some(&existing) = data.bindings.get(name) {
      return match existing {
        BindingKind::Var | BindingKind::Function | BindingKind::Param if var_like => Ok(()),
        _ => Err(existing),
      };
    };
    if data.var_names.contains(name) {
      return Err(BindingKind::Var);
    };
    data.bindings.insert(name.to_string(), kind);
    Ok(())
  }

  fn declare_var(&mut self, scope: ScopeId, name: &str) -> Result<(), BindingKind> {
    let mut current = scope;
    loop {
      let data = &mut self.scopes[current.0];
      let closure = data.kind.is_closure();
      match data.bindings.get(name) {
        Some(&existing) if existing.is_lexical() => return Err(existing),
        Some(BindingKind::Function) if !closure => return Err(BindingKind::Function),
        _ => {}
      };
      match data.parent {
        Some(parent) if !closure => {
          data.var_names.insert(name.to_string());
          current = parent;
        }
        _ => {
          // A `var` never downgrades an existing binding, e.g. a parameter of the same name.
          data
            .bindings
            .entry(name.to_string())
            .or_insert(BindingKind::Var);
          return Ok(());
        }
      };
    }
  }

  pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<(ScopeId, BindingKind)> {
    let mut current = Some(scope);
    while let Some(id) = current {
      let data = self.scope(id);
      if let Some(kind) = data.bindings.get(name) {
        return Some((id, *kind));
      };
      current = data.parent;
    }
    None
  }

  /// Whether `scope` is inside a non-arrow function, where `arguments` is implicitly bound.
  pub fn in_non_arrow_function(&self, scope: ScopeId) -> bool {
    let mut current = Some(scope);
    while let Some(id) = current {
      let data = self.scope(id);
      if data.kind == ScopeKind::NonArrowFunction {
        return true;
      };
      current = data.parent;
    }
    false
  }
}

impl Default for ScopeTree {
  fn default() -> Self {
    Self::new()
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BodyIssueKind {
  UnresolvedReference { name: String },
  ConstReassignment { name: String },
  AwaitOutsideAsync,
  Redeclaration { name: String },
}

impl BodyIssueKind {
  pub fn code(&self) -> &'static str {
    match self {
      BodyIssueKind::UnresolvedReference { .. } => "JSO0101",
      BodyIssueKind::ConstReassignment { .. } => "JSO0102",
      BodyIssueKind::AwaitOutsideAsync => "JSO0103",
      BodyIssueKind::Redeclaration { .. } => "JSO0104",
    }
  }

  /// Whether engines refuse to load code with this issue at all.
  pub fn is_early_error(&self) -> bool {
    matches!(
      self,
      BodyIssueKind::AwaitOutsideAsync | BodyIssueKind::Redeclaration { .. }
    )
  }
}

impl Display for BodyIssueKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      BodyIssueKind::UnresolvedReference { name } => write!(f, "\"{}\" is not defined.", name),
      BodyIssueKind::ConstReassignment { name } => {
        write!(f, "\"{}\" is a constant and cannot be reassigned.", name)
      }
      BodyIssueKind::AwaitOutsideAsync => {
        write!(f, "\"await\" is only valid inside an async function.")
      }
      BodyIssueKind::Redeclaration { name } => {
        write!(f, "\"{}\" has already been declared.", name)
      }
    }
  }
}

/// A non-fatal problem found inside the value of a property.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct BodyIssue {
  /// The top-level property whose value contains the issue.
  pub property: String,
  /// Whether that property is a function. Issues in other properties concern the object.
  #[serde(skip)]
  pub in_function: bool,
  #[serde(skip)]
  pub loc: Loc,
  #[serde(flatten)]
  pub kind: BodyIssueKind,
}

/// Analyzes the value of every statically named top-level property, in source order.
///
/// `globals` are host-supplied names (widgets, queries, `appsmith`, ...) that are always
/// resolvable, in addition to the ECMAScript and browser built-ins.
pub fn analyze_bodies(module: &mut Node<ObjectModule>, globals: &HashSet<String>) -> Vec<BodyIssue> {
  let mut issues = Vec::new();
  for member in module.stx.object.stx.members.iter_mut() {
    // Unnamed members make the whole object invalid, so their contents don't matter.
    let Some(property) = member.stx.name().map(str::to_string) else {
      continue;
    };
    let in_function = match member.stx.as_ref() {
      ObjMember::Prop { value, .. } => value.callable().is_some(),
      _ => false,
    };
    let declared = declare::declare(member);
    issues.extend(declared.redeclarations.into_iter().map(|r| BodyIssue {
      property: property.clone(),
      in_function,
      loc: r.loc,
      kind: BodyIssueKind::Redeclaration { name: r.name },
    }));
    issues.extend(resolve::resolve(
      member,
      &declared.tree,
      &property,
      in_function,
      globals,
    ));
  }
  // Redeclarations are found in a separate pass, so restore source order.
  issues.sort_by_key(|i| i.loc.0);
  issues
}
