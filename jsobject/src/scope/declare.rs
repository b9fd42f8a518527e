use super::BindingKind;
use super::ScopeId;
use super::ScopeKind;
use super::ScopeTree;
use derive_visitor::DriveMut;
use derive_visitor::VisitorMut;
use parse_jsobject::ast::expr::pat::Binding;
use parse_jsobject::ast::expr::pat::DeclKind;
use parse_jsobject::ast::expr::pat::IdPat;
use parse_jsobject::ast::expr::ClassExpr;
use parse_jsobject::ast::expr::Expr;
use parse_jsobject::ast::expr::FuncExpr;
use parse_jsobject::ast::expr::IdExpr;
use parse_jsobject::ast::expr::UnaryExpr;
use parse_jsobject::ast::func::Func;
use parse_jsobject::ast::node::Node;
use parse_jsobject::ast::object::ObjMember;
use parse_jsobject::ast::stmt::decl::ClassDecl;
use parse_jsobject::ast::stmt::decl::FuncDecl;
use parse_jsobject::ast::stmt::BlockStmt;
use parse_jsobject::ast::stmt::CatchClause;
use parse_jsobject::ast::stmt::ForEachStmt;
use parse_jsobject::ast::stmt::ForStmt;
use parse_jsobject::ast::stmt::LoopBody;
use parse_jsobject::ast::stmt::SwitchStmt;
use parse_jsobject::loc::Loc;
use parse_jsobject::operator::OperatorName;

/// Attached to an identifier pattern that introduces a binding.
#[derive(Clone, Copy, Debug)]
pub struct Declared;

/// Attached to the identifier operand of `typeof`, which may legitimately be undeclared.
#[derive(Clone, Copy, Debug)]
pub struct TypeofOperand;

/// A declaration that conflicts with an earlier one of the same name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redeclaration {
  pub name: String,
  pub loc: Loc,
}

pub struct Declarations {
  pub tree: ScopeTree,
  /// In the order the conflicting declarations were visited.
  pub redeclarations: Vec<Redeclaration>,
}

type BindingNode = Node<Binding>;
type BlockStmtNode = Node<BlockStmt>;
type CatchClauseNode = Node<CatchClause>;
type ClassDeclNode = Node<ClassDecl>;
type ClassExprNode = Node<ClassExpr>;
type ExprNode = Node<Expr>;
type ForEachStmtNode = Node<ForEachStmt>;
type ForStmtNode = Node<ForStmt>;
type FuncDeclNode = Node<FuncDecl>;
type FuncExprNode = Node<FuncExpr>;
type FuncNode = Node<Func>;
type IdExprNode = Node<IdExpr>;
type IdPatNode = Node<IdPat>;
type LoopBodyNode = Node<LoopBody>;
type SwitchStmtNode = Node<SwitchStmt>;
type UnaryExprNode = Node<UnaryExpr>;

fn binding_kind(kind: DeclKind) -> BindingKind {
  match kind {
    DeclKind::Var => BindingKind::Var,
    DeclKind::Let => BindingKind::Let,
    DeclKind::Const => BindingKind::Const,
    DeclKind::Param => BindingKind::Param,
    DeclKind::CatchParam => BindingKind::CatchParam,
  }
}

#[derive(VisitorMut)]
#[visitor(
  BindingNode,
  BlockStmtNode,
  CatchClauseNode,
  ClassDeclNode,
  ClassExprNode,
  ExprNode,
  ForEachStmtNode,
  ForStmtNode,
  FuncDeclNode(enter),
  FuncExprNode,
  FuncNode,
  IdExprNode(enter),
  IdPatNode(enter),
  LoopBodyNode,
  SwitchStmtNode,
  UnaryExprNode(enter)
)]
struct DeclareVisitor {
  tree: ScopeTree,
  scope_stack: Vec<ScopeId>,
  // What an identifier pattern declares at this point. None inside expressions, including
  // default values within a binding pattern.
  decl_stack: Vec<Option<BindingKind>>,
  redeclarations: Vec<Redeclaration>,
}

impl DeclareVisitor {
  fn new() -> Self {
    let tree = ScopeTree::new();
    let root = tree.root();
    Self {
      tree,
      scope_stack: vec![root],
      decl_stack: Vec::new(),
      redeclarations: Vec::new(),
    }
  }

  fn current_scope(&self) -> ScopeId {
    // The root scope is never popped.
    self.scope_stack.last().copied().unwrap_or(self.tree.root())
  }

  fn push_scope(&mut self, kind: ScopeKind) {
    let id = self.tree.new_scope(self.current_scope(), kind);
    self.scope_stack.push(id);
  }

  fn pop_scope(&mut self) {
    self.scope_stack.pop();
  }

  fn declare(&mut self, name: &str, kind: BindingKind, loc: Loc) {
    if self.tree.declare(self.current_scope(), name, kind).is_err() {
      self.redeclarations.push(Redeclaration {
        name: name.to_string(),
        loc,
      });
    };
  }
}

impl DeclareVisitor {
  fn enter_binding_node(&mut self, node: &mut BindingNode) {
    self.decl_stack.push(Some(binding_kind(node.stx.kind)));
  }

  fn exit_binding_node(&mut self, _node: &mut BindingNode) {
    self.decl_stack.pop();
  }

  fn enter_block_stmt_node(&mut self, _node: &mut BlockStmtNode) {
    self.push_scope(ScopeKind::Block);
  }

  fn exit_block_stmt_node(&mut self, _node: &mut BlockStmtNode) {
    self.pop_scope();
  }

  // The parameter and the body share this scope, so `catch (e) { let e; }` conflicts.
  fn enter_catch_clause_node(&mut self, _node: &mut CatchClauseNode) {
    self.push_scope(ScopeKind::Block);
  }

  fn exit_catch_clause_node(&mut self, _node: &mut CatchClauseNode) {
    self.pop_scope();
  }

  fn enter_class_decl_node(&mut self, node: &mut ClassDeclNode) {
    let name = &node.stx.name;
    self.declare(&name.stx.name, BindingKind::Class, name.loc);
    self.push_scope(ScopeKind::Class);
  }

  fn exit_class_decl_node(&mut self, _node: &mut ClassDeclNode) {
    self.pop_scope();
  }

  fn enter_class_expr_node(&mut self, node: &mut ClassExprNode) {
    self.push_scope(ScopeKind::Class);
    if let Some(name) = &node.stx.name {
      self.declare(&name.stx.name, BindingKind::Class, name.loc);
    }
  }

  fn exit_class_expr_node(&mut self, _node: &mut ClassExprNode) {
    self.pop_scope();
  }

  fn enter_expr_node(&mut self, _node: &mut ExprNode) {
    self.decl_stack.push(None);
  }

  fn exit_expr_node(&mut self, _node: &mut ExprNode) {
    self.decl_stack.pop();
  }

  fn enter_for_each_stmt_node(&mut self, _node: &mut ForEachStmtNode) {
    self.push_scope(ScopeKind::Block);
  }

  fn exit_for_each_stmt_node(&mut self, _node: &mut ForEachStmtNode) {
    self.pop_scope();
  }

  fn enter_for_stmt_node(&mut self, _node: &mut ForStmtNode) {
    self.push_scope(ScopeKind::Block);
  }

  fn exit_for_stmt_node(&mut self, _node: &mut ForStmtNode) {
    self.pop_scope();
  }

  fn enter_func_decl_node(&mut self, node: &mut FuncDeclNode) {
    // Module code is strict, so function declarations are scoped to their block.
    let name = &node.stx.name;
    self.declare(&name.stx.name, BindingKind::Function, name.loc);
  }

  fn enter_func_expr_node(&mut self, node: &mut FuncExprNode) {
    let Some(name) = &node.stx.name else {
      return;
    };
    self.push_scope(ScopeKind::FunctionExpressionName);
    self.declare(&name.stx.name, BindingKind::Function, name.loc);
  }

  fn exit_func_expr_node(&mut self, node: &mut FuncExprNode) {
    if node.stx.name.is_some() {
      self.pop_scope();
    };
  }

  fn enter_func_node(&mut self, node: &mut FuncNode) {
    self.push_scope(if node.stx.arrow {
      ScopeKind::ArrowFunction
    } else {
      ScopeKind::NonArrowFunction
    });
    self.decl_stack.push(None);
  }

  fn exit_func_node(&mut self, _node: &mut FuncNode) {
    self.decl_stack.pop();
    self.pop_scope();
  }

  fn enter_id_expr_node(&mut self, node: &mut IdExprNode) {
    node.annotations.set(self.current_scope());
  }

  fn enter_id_pat_node(&mut self, node: &mut IdPatNode) {
    node.annotations.set(self.current_scope());
    if let Some(Some(kind)) = self.decl_stack.last().copied() {
      self.declare(&node.stx.name, kind, node.loc);
      node.annotations.set(Declared);
    };
  }

  // The body of a loop is a block of its own, inside the scope of the loop's head.
  fn enter_loop_body_node(&mut self, _node: &mut LoopBodyNode) {
    self.push_scope(ScopeKind::Block);
  }

  fn exit_loop_body_node(&mut self, _node: &mut LoopBodyNode) {
    self.pop_scope();
  }

  fn enter_switch_stmt_node(&mut self, _node: &mut SwitchStmtNode) {
    self.push_scope(ScopeKind::Block);
  }

  fn exit_switch_stmt_node(&mut self, _node: &mut SwitchStmtNode) {
    self.pop_scope();
  }

  fn enter_unary_expr_node(&mut self, node: &mut UnaryExprNode) {
    if node.stx.operator != OperatorName::Typeof {
      return;
    };
    if let Expr::Id(id) = node.stx.argument.stx.as_mut() {
      id.annotations.set(TypeofOperand);
    };
  }
}

/// Builds the scope tree of a property's value, annotating identifiers with their scopes.
pub fn declare(member: &mut Node<ObjMember>) -> Declarations {
  let mut visitor = DeclareVisitor::new();
  member.drive_mut(&mut visitor);
  Declarations {
    tree: visitor.tree,
    redeclarations: visitor.redeclarations,
  }
}
