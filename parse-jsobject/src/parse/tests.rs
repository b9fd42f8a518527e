use super::ParseCtx;
use super::Parser;
use crate::ast::expr::Expr;
use crate::ast::expr::MetaKind;
use crate::ast::node::Node;
use crate::ast::stmt::ForEachKind;
use crate::ast::stmt::ForEachLhs;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::token::TT;

fn parse_stmts_in(ctx: ParseCtx, src: &str) -> SyntaxResult<Vec<Node<Stmt>>> {
  let mut p = Parser::new(Lexer::new(src));
  let body = p.stmts(ctx, TT::EOF)?;
  p.require(TT::EOF)?;
  Ok(body)
}

fn parse_stmts(src: &str) -> SyntaxResult<Vec<Node<Stmt>>> {
  parse_stmts_in(ParseCtx::default(), src)
}

fn parse_stmt(src: &str) -> Node<Stmt> {
  let mut body = parse_stmts(src).unwrap();
  assert_eq!(body.len(), 1, "expected a single statement in {:?}", src);
  body.remove(0)
}

#[test]
fn test_parser() {
  let lexer = Lexer::new("let x = /a/ / 1;");
  let mut p = Parser::new(lexer);
  // Initial state.
  let cp = p.checkpoint();
  assert_eq!(p.cursor, 0);

  // Peek the first token.
  let t = p.peek();
  assert_eq!(p.cursor, 0);
  assert_eq!(p.lookahead.len(), 1);
  assert_eq!(t.typ, TT::KeywordLet);

  // Consume the first token.
  let t = p.consume();
  assert_eq!(p.cursor, 1);
  assert_eq!(t.typ, TT::KeywordLet);

  // Consume the second token.
  let t = p.consume();
  assert_eq!(p.cursor, 2);
  assert_eq!(p.lookahead.len(), 2);
  assert_eq!(t.typ, TT::Identifier);

  // Reset to a past point.
  p.restore_checkpoint(cp);
  assert_eq!(p.cursor, 0);
  assert_eq!(p.lookahead.len(), 2);

  // Peek using a different mode, which should truncate the buffer.
  let t = p.peek_with_mode(LexMode::SlashIsRegex);
  assert_eq!(p.cursor, 0);
  assert_eq!(p.lookahead.len(), 1);
  assert_eq!(t.typ, TT::KeywordLet);
}

#[test]
fn test_since_checkpoint_spans_consumed_tokens() {
  let mut p = Parser::new(Lexer::new("  foo  bar"));
  let cp = p.checkpoint();
  assert_eq!(p.since_checkpoint(&cp).len(), 0);
  p.consume();
  p.consume();
  let loc = p.since_checkpoint(&cp);
  assert_eq!((loc.0, loc.1), (2, 10));
}

#[test]
fn test_for_statement_kinds() {
  let stmt = parse_stmt("for (let i = 0; i < 3; i++) {}");
  assert!(matches!(stmt.stx.as_ref(), Stmt::For(_)));

  let stmt = parse_stmt("for (const x of xs) total += x;");
  let Stmt::ForEach(for_of) = stmt.stx.as_ref() else {
    panic!("expected for-of, got {:?}", stmt.stx);
  };
  assert_eq!(for_of.stx.kind, ForEachKind::Of);
  assert!(matches!(for_of.stx.lhs, ForEachLhs::Decl(_)));

  let stmt = parse_stmt("for (k in o) f(k);");
  let Stmt::ForEach(for_in) = stmt.stx.as_ref() else {
    panic!("expected for-in, got {:?}", stmt.stx);
  };
  assert_eq!(for_in.stx.kind, ForEachKind::In);
  assert!(matches!(for_in.stx.lhs, ForEachLhs::Target(_)));

  let stmt = parse_stmt("for await (const chunk of stream) {}");
  let Stmt::ForEach(for_of) = stmt.stx.as_ref() else {
    panic!("expected for-of, got {:?}", stmt.stx);
  };
  assert_eq!(for_of.stx.kind, ForEachKind::AwaitOf);

  let stmt = parse_stmt("for (;;) {}");
  assert!(matches!(stmt.stx.as_ref(), Stmt::For(_)));
}

#[test]
fn test_declarations() {
  assert!(matches!(
    parse_stmt("const { a, b: [c] } = obj;").stx.as_ref(),
    Stmt::Var(_)
  ));
  assert!(matches!(
    parse_stmt("function helper(a, b = 1, ...rest) { return a; }").stx.as_ref(),
    Stmt::Func(_)
  ));
  assert!(matches!(
    parse_stmt("async function load() { await fetch(); }").stx.as_ref(),
    Stmt::Func(_)
  ));
  assert!(matches!(
    parse_stmt("class Point extends Base { x = 1; static origin() {} }").stx.as_ref(),
    Stmt::Class(_)
  ));
}

#[test]
fn test_labels_and_jumps() {
  let stmt = parse_stmt("outer: for (;;) { break outer; }");
  let Stmt::Label(label) = stmt.stx.as_ref() else {
    panic!("expected label, got {:?}", stmt.stx);
  };
  assert_eq!(label.stx.name, "outer");
  assert!(matches!(
    parse_stmt("while (x) continue").stx.as_ref(),
    Stmt::While(_)
  ));
}

#[test]
fn test_automatic_semicolon_insertion() {
  let body = parse_stmts("a = 1\nb = 2\n").unwrap();
  assert_eq!(body.len(), 2);

  // A line break after `return` ends the statement.
  let body = parse_stmts("return\nvalue").unwrap();
  assert_eq!(body.len(), 2);
  let Stmt::Return(ret) = body[0].stx.as_ref() else {
    panic!("expected return, got {:?}", body[0].stx);
  };
  assert!(ret.stx.value.is_none());

  let err = parse_stmts("a = 1 b = 2").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ExpectedSyntax("expression operator"));

  // The semicolon after these is optional.
  assert_eq!(parse_stmts("do x++; while (a) y").unwrap().len(), 2);
  assert_eq!(parse_stmts("do x++; while (a); y").unwrap().len(), 2);
  assert_eq!(parse_stmts("debugger;\ndebugger\nx").unwrap().len(), 3);
  assert_eq!(
    parse_stmts("a: while (b) { break a\ncontinue a; }\nc").unwrap().len(),
    2
  );
}

#[test]
fn test_statement_errors() {
  let err = parse_stmts("try {}").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::TryStatementHasNoCatchOrFinally);

  let err = parse_stmts("throw\nerr").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::LineTerminatorAfterThrow);

  let err = parse_stmts("if (x {}").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ExpectedSyntax("expression operator"));
}

#[test]
fn test_switch_and_try() {
  let stmt = parse_stmt(
    "switch (kind) { case 1: a(); break; case 2: default: b(); }",
  );
  let Stmt::Switch(switch) = stmt.stx.as_ref() else {
    panic!("expected switch, got {:?}", stmt.stx);
  };
  assert_eq!(switch.stx.cases.len(), 3);
  assert!(switch.stx.cases[2].stx.test.is_none());

  let stmt = parse_stmt("try { risky(); } catch { recover(); } finally { done(); }");
  let Stmt::Try(try_stmt) = stmt.stx.as_ref() else {
    panic!("expected try, got {:?}", stmt.stx);
  };
  assert!(try_stmt.stx.handler.as_ref().unwrap().stx.param.is_none());
  assert!(try_stmt.stx.finalizer.is_some());
}

#[test]
fn test_jumps_need_a_target() {
  let err = parse_stmts("break;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::BreakOutsideLoopOrSwitch);
  let err = parse_stmts("if (x) continue;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ContinueOutsideLoop);
  // `switch` accepts `break` but not `continue`.
  assert!(parse_stmts("switch (x) { case 1: break; }").is_ok());
  let err = parse_stmts("switch (x) { case 1: continue; }").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ContinueOutsideLoop);
  // A loop outside a function doesn't reach into it.
  let err = parse_stmts("while (x) { f(() => { break; }); }").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::BreakOutsideLoopOrSwitch);
  let err = parse_stmts("for (;;) { g(function () { continue; }); }").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ContinueOutsideLoop);
  assert!(parse_stmts("do { if (x) continue; else break; } while (y)").is_ok());
}

#[test]
fn test_labels_must_be_declared() {
  let err = parse_stmts("x: while (a) { break y; }").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UndefinedLabel);
  assert_eq!(err.message(), "undefined label");
  assert_eq!((err.loc.0, err.loc.1), (21, 22));

  let err = parse_stmts("a: a: ;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::DuplicateLabel);

  // `break` may leave any labelled statement, `continue` only a labelled loop.
  assert!(parse_stmts("block: { if (done) break block; }").is_ok());
  let err = parse_stmts("block: { while (a) continue block; }").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ContinueOutsideLoop);
  assert!(parse_stmts("outer: inner: for (;;) { continue outer; }").is_ok());

  // Labels end at a function boundary.
  let err = parse_stmts("outer: for (;;) { f(() => { for (;;) break outer; }); }").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UndefinedLabel);
}

#[test]
fn test_lexical_declaration_errors() {
  let err = parse_stmts("const x;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ConstWithoutInitializer);
  let err = parse_stmts("const a = 1, b;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ConstWithoutInitializer);
  let err = parse_stmts("for (const i; i < 3;) {}").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ConstWithoutInitializer);
  assert!(parse_stmts("for (const k in o) {}").is_ok());
  assert!(parse_stmts("let x; var y;").is_ok());

  let err = parse_stmts("let let = 1;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::LetInLexicalBinding);
  let err = parse_stmts("const { a: [let] } = o;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::LetInLexicalBinding);
  assert!(parse_stmts("var let = 1;").is_ok());
}

#[test]
fn test_new_target_needs_a_function() {
  let err = parse_stmts("x = new.target;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::NewTargetOutsideFunction);
  let err = parse_stmts("f(() => new.target);").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::NewTargetOutsideFunction);

  let stmt = parse_stmt("function F() { return () => new.target; }");
  assert!(matches!(stmt.stx.as_ref(), Stmt::Func(_)));

  let body = parse_stmts_in(ParseCtx::default().in_function(false), "return new.target;").unwrap();
  let Stmt::Return(ret) = body[0].stx.as_ref() else {
    panic!("expected return, got {:?}", body[0].stx);
  };
  let Some(Expr::Meta(meta)) = ret.stx.value.as_ref().map(|v| v.stx.as_ref()) else {
    panic!("expected meta property, got {:?}", ret.stx.value);
  };
  assert_eq!(meta.stx.kind, MetaKind::NewTarget);
}

#[test]
fn test_deep_nesting_is_an_error() {
  let src = format!("x = {}1{};", "(".repeat(10_000), ")".repeat(10_000));
  let err = parse_stmts(&src).unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::NestingTooDeep);
  assert_eq!(err.message(), "code is nested too deeply");

  let src = format!("{}{}", "{".repeat(10_000), "}".repeat(10_000));
  let err = parse_stmts(&src).unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::NestingTooDeep);

  let src = format!("x = {}1{};", "[".repeat(50), "]".repeat(50));
  assert!(parse_stmts(&src).is_ok());
}

#[test]
fn test_long_operator_chains_are_bounded() {
  let src = format!("x = 1{};", " + 1".repeat(500));
  assert!(parse_stmts(&src).is_ok());
  // Separate expressions don't add up.
  let src = format!("a = b{};\n", ".c".repeat(600)).repeat(4);
  assert!(parse_stmts(&src).is_ok());

  let src = format!("x = 1{};", " + 1".repeat(20_000));
  let err = parse_stmts(&src).unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::NestingTooDeep);
}
