pub mod decl;

use super::expr::pat::Binding;
use super::expr::pat::Pat;
use super::expr::Expr;
use super::node::Node;
use decl::ClassDecl;
use decl::FuncDecl;
use decl::VarDecl;
use derive_more::derive::From;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

/// Statements only occur inside function bodies of a JS Object's members.
#[derive(Debug, Drive, DriveMut, From, Serialize)]
#[serde(tag = "$t")]
pub enum Stmt {
  Block(Node<BlockStmt>),
  Class(Node<ClassDecl>),
  Debugger(Node<DebuggerStmt>),
  Empty(Node<EmptyStmt>),
  Expr(Node<ExprStmt>),
  For(Node<ForStmt>),
  ForEach(Node<ForEachStmt>),
  Func(Node<FuncDecl>),
  If(Node<IfStmt>),
  Jump(Node<JumpStmt>),
  Label(Node<LabelStmt>),
  Return(Node<ReturnStmt>),
  Switch(Node<SwitchStmt>),
  Throw(Node<ThrowStmt>),
  Try(Node<TryStmt>),
  Var(Node<VarDecl>),
  While(Node<WhileStmt>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct BlockStmt {
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct DebuggerStmt {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct EmptyStmt {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExprStmt {
  pub expr: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IfStmt {
  pub test: Node<Expr>,
  pub consequent: Node<Stmt>,
  pub alternate: Option<Node<Stmt>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum JumpKind {
  Break,
  Continue,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct JumpStmt {
  #[drive(skip)]
  pub kind: JumpKind,
  #[drive(skip)]
  pub label: Option<String>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LabelStmt {
  #[drive(skip)]
  pub name: String,
  pub body: Node<Stmt>,
}

/// `while` and `do ... while`.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct WhileStmt {
  #[drive(skip)]
  pub do_while: bool,
  pub test: Node<Expr>,
  pub body: Node<Stmt>,
}

// The body of a `for` shares the scope opened by its head, so it isn't a BlockStmt.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LoopBody {
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ForStmt {
  pub init: ForInit,
  pub test: Option<Node<Expr>>,
  pub update: Option<Node<Expr>>,
  pub body: Node<LoopBody>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ForInit {
  None,
  Expr(Node<Expr>),
  Decl(Node<VarDecl>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ForEachKind {
  In,
  Of,
  AwaitOf,
}

/// `for (... in ...)` and `for (... of ...)`.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ForEachStmt {
  #[drive(skip)]
  pub kind: ForEachKind,
  pub lhs: ForEachLhs,
  pub iterable: Node<Expr>,
  pub body: Node<LoopBody>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ForEachLhs {
  Decl(Node<Binding>),
  Target(Node<Pat>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ReturnStmt {
  pub value: Option<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct SwitchStmt {
  pub discriminant: Node<Expr>,
  pub cases: Vec<Node<SwitchCase>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct SwitchCase {
  // None for `default`.
  pub test: Option<Node<Expr>>,
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ThrowStmt {
  pub value: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TryStmt {
  pub block: Node<BlockStmt>,
  // At least one of these is present.
  pub handler: Option<Node<CatchClause>>,
  pub finalizer: Option<Node<BlockStmt>>,
}

// The parameter and the body share one scope, so the body isn't a BlockStmt.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CatchClause {
  pub param: Option<Node<Binding>>,
  pub body: Vec<Node<Stmt>>,
}
