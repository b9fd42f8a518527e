use super::declare::Declared;
use super::declare::TypeofOperand;
use super::globals::is_builtin_global;
use super::BindingKind;
use super::BodyIssue;
use super::BodyIssueKind;
use super::ScopeId;
use super::ScopeTree;
use ahash::HashSet;
use derive_visitor::Drive;
use derive_visitor::Visitor;
use parse_jsobject::ast::expr::pat::IdPat;
use parse_jsobject::ast::expr::IdExpr;
use parse_jsobject::ast::expr::UnaryExpr;
use parse_jsobject::ast::func::Func;
use parse_jsobject::ast::node::Node;
use parse_jsobject::ast::node::Annotations;
use parse_jsobject::ast::object::ObjMember;
use parse_jsobject::ast::stmt::ForEachKind;
use parse_jsobject::ast::stmt::ForEachStmt;
use parse_jsobject::loc::Loc;
use parse_jsobject::operator::OperatorName;

type ForEachStmtNode = Node<ForEachStmt>;
type FuncNode = Node<Func>;
type IdExprNode = Node<IdExpr>;
type IdPatNode = Node<IdPat>;
type UnaryExprNode = Node<UnaryExpr>;

#[derive(Visitor)]
#[visitor(
  ForEachStmtNode(enter),
  FuncNode,
  IdExprNode(enter),
  IdPatNode(enter),
  UnaryExprNode(enter)
)]
struct ResolveVisitor<'a> {
  tree: &'a ScopeTree,
  property: &'a str,
  in_function: bool,
  globals: &'a HashSet<String>,
  async_stack: Vec<bool>,
  issues: Vec<BodyIssue>,
}

impl ResolveVisitor<'_> {
  fn report(&mut self, loc: Loc, kind: BodyIssueKind) {
    self.issues.push(BodyIssue {
      property: self.property.to_string(),
      in_function: self.in_function,
      loc,
      kind,
    });
  }

  fn scope_of(&self, annotations: &Annotations) -> ScopeId {
    annotations.get::<ScopeId>().copied().unwrap_or(self.tree.root())
  }

  fn is_global(&self, scope: ScopeId, name: &str) -> bool {
    is_builtin_global(name)
      || self.globals.contains(name)
      || (name == "arguments" && self.tree.in_non_arrow_function(scope))
  }

  fn resolve_read(&mut self, annotations: &Annotations, name: &str, loc: Loc) {
    let scope = self.scope_of(annotations);
    if self.tree.lookup(scope, name).is_none() && !self.is_global(scope, name) {
      self.report(loc, BodyIssueKind::UnresolvedReference {
        name: name.to_string(),
      });
    };
  }

  fn resolve_write(&mut self, annotations: &Annotations, name: &str, loc: Loc) {
    let scope = self.scope_of(annotations);
    match self.tree.lookup(scope, name) {
      Some((_, BindingKind::Const)) => self.report(loc, BodyIssueKind::ConstReassignment {
        name: name.to_string(),
      }),
      Some(_) => {}
      None if self.is_global(scope, name) => {}
      // Assigning to an undeclared name throws in strict mode.
      None => self.report(loc, BodyIssueKind::UnresolvedReference {
        name: name.to_string(),
      }),
    };
  }

  fn check_await(&mut self, loc: Loc) {
    if !self.async_stack.last().copied().unwrap_or(false) {
      self.report(loc, BodyIssueKind::AwaitOutsideAsync);
    };
  }
}

impl ResolveVisitor<'_> {
  fn enter_for_each_stmt_node(&mut self, node: &ForEachStmtNode) {
    if node.stx.kind == ForEachKind::AwaitOf {
      self.check_await(node.loc);
    };
  }

  fn enter_func_node(&mut self, node: &FuncNode) {
    self.async_stack.push(node.stx.async_);
  }

  fn exit_func_node(&mut self, _node: &FuncNode) {
    self.async_stack.pop();
  }

  fn enter_id_expr_node(&mut self, node: &IdExprNode) {
    if node.annotations.has::<TypeofOperand>() {
      return;
    };
    self.resolve_read(&node.annotations, &node.stx.name, node.loc);
  }

  fn enter_id_pat_node(&mut self, node: &IdPatNode) {
    if node.annotations.has::<Declared>() {
      return;
    };
    self.resolve_write(&node.annotations, &node.stx.name, node.loc);
  }

  fn enter_unary_expr_node(&mut self, node: &UnaryExprNode) {
    if node.stx.operator == OperatorName::Await {
      self.check_await(node.loc);
    };
  }
}

/// Reports the issues in a property's value, using the scope tree built by [`super::declare::declare`].
pub fn resolve(
  member: &Node<ObjMember>,
  tree: &ScopeTree,
  property: &str,
  in_function: bool,
  globals: &HashSet<String>,
) -> Vec<BodyIssue> {
  let mut visitor = ResolveVisitor {
    tree,
    property,
    in_function,
    globals,
    async_stack: Vec::new(),
    issues: Vec::new(),
  };
  member.drive(&mut visitor);
  visitor.issues
}
