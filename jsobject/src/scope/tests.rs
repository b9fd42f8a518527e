use super::analyze_bodies;
use super::BodyIssue;
use super::BodyIssueKind;
use ahash::HashSet;
use ahash::HashSetExt;
use parse_jsobject::analyze;

fn issues_with_globals(source: &str, globals: &[&str]) -> Vec<BodyIssue> {
  let mut module = analyze(source).unwrap();
  let mut set = HashSet::new();
  for g in globals {
    set.insert(g.to_string());
  }
  analyze_bodies(&mut module, &set)
}

fn issues(source: &str) -> Vec<BodyIssue> {
  issues_with_globals(source, &[])
}

fn unresolved(source: &str) -> Vec<String> {
  issues(source)
    .into_iter()
    .filter_map(|i| match i.kind {
      BodyIssueKind::UnresolvedReference { name } => Some(name),
      _ => None,
    })
    .collect()
}

#[test]
fn reports_undeclared_identifier() {
  let found = issues(
    r#"export default {
  myFun1: () => {
    f;
    return "yes"
  }
}"#,
  );
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].property, "myFun1");
  assert_eq!(found[0].kind, BodyIssueKind::UnresolvedReference {
    name: "f".to_string()
  });
}

#[test]
fn resolves_declarations_and_hoisting() {
  let source = r#"export default {
  run(a, { b, c: [d] }, ...rest) {
    helper();
    x = 2;
    var x;
    let total = a + b + d + rest.length;
    for (const item of rest) total += item;
    for (let i = 0; i < 3; i++) total += i;
    try { total(); } catch (err) { console.log(err); }
    function helper() { return arguments.length; }
    class Point { move() { return Point; } }
    const fact = function inner(n) { return n ? n * inner(n - 1) : 1; };
    return [total, fact, new Point(), Math.max(1, 2), undefined];
  },
}"#;
  assert_eq!(unresolved(source), Vec::<String>::new());
}

#[test]
fn block_scoped_bindings_do_not_leak() {
  let source = r#"export default {
  run() {
    {
      let inner = 1;
      var hoisted = 2;
    }
    return [inner, hoisted];
  },
}"#;
  assert_eq!(unresolved(source), vec!["inner".to_string()]);
}

#[test]
fn arguments_only_inside_non_arrow_functions() {
  assert_eq!(
    unresolved("export default { a: () => arguments, b() { return arguments; } }"),
    vec!["arguments".to_string()]
  );
}

#[test]
fn names_that_are_not_references() {
  let source = r#"export default {
  data: { key: 1 },
  run() {
    outer: for (;;) { break outer; }
    return this.data.key + this["data"].key;
  },
}"#;
  assert!(issues(source).is_empty());
}

#[test]
fn typeof_operand_may_be_undeclared() {
  assert!(issues("export default { a: () => typeof maybeMissing === 'undefined' }").is_empty());
  assert_eq!(
    unresolved("export default { a: () => typeof missing.prop }"),
    vec!["missing".to_string()]
  );
}

#[test]
fn const_reassignment() {
  let found = issues("export default { a() { const c = 1; c = 2; c++; let d = 1; d = 2; } }");
  let kinds: Vec<_> = found.into_iter().map(|i| i.kind).collect();
  assert_eq!(kinds, vec![
    BodyIssueKind::ConstReassignment {
      name: "c".to_string()
    },
    BodyIssueKind::ConstReassignment {
      name: "c".to_string()
    },
  ]);
}

#[test]
fn await_requires_async_function() {
  let found = issues(
    "export default { a: () => { await Promise.resolve(); }, b: async () => { await Promise.resolve(); } }",
  );
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].property, "a");
  assert_eq!(found[0].kind, BodyIssueKind::AwaitOutsideAsync);

  let found = issues("export default { async a() { const f = () => { await 1; }; } }");
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].kind, BodyIssueKind::AwaitOutsideAsync);
}

#[test]
fn host_globals_resolve() {
  let source = "export default { a: async () => { storeValue('k', Table1.selectedRow); await Api1.run(); } }";
  assert_eq!(issues(source).len(), 3);
  assert!(issues_with_globals(source, &["storeValue", "Table1", "Api1"]).is_empty());
}

#[test]
fn shorthand_members_are_reads() {
  assert_eq!(unresolved("export default { value }"), vec!["value".to_string()]);
}

#[test]
fn issues_serialize_with_kind_tag() {
  let found = issues("export default { a: () => f }");
  let json = serde_json::to_value(&found[0]).unwrap();
  assert_eq!(json["property"], "a");
  assert_eq!(json["kind"], "unresolvedReference");
  assert_eq!(json["name"], "f");
}

fn redeclared(source: &str) -> Vec<String> {
  issues(source)
    .into_iter()
    .filter_map(|i| match i.kind {
      BodyIssueKind::Redeclaration { name } => Some(name),
      _ => None,
    })
    .collect()
}

#[test]
fn lexical_redeclarations() {
  let found = issues("export default { f() { let a = 1; let a = 2; } }");
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].kind, BodyIssueKind::Redeclaration {
    name: "a".to_string()
  });
  assert_eq!(found[0].kind.code(), "JSO0104");
  assert_eq!(found[0].kind.to_string(), "\"a\" has already been declared.");
  // Points at the second declaration.
  assert_eq!(found[0].loc.0, 38);
  assert!(found[0].kind.is_early_error());

  assert_eq!(redeclared("export default { f() { const b = 1; class b {} } }"), vec!["b"]);
  assert_eq!(redeclared("export default { f: (p) => { let p; } }"), vec!["p"]);
  assert_eq!(redeclared("export default { f: (p, p) => p }"), vec!["p"]);
  assert_eq!(redeclared("export default { f() { try {} catch (e) { let e; } } }"), vec!["e"]);
}

#[test]
fn var_conflicts_with_lexical_bindings() {
  assert_eq!(redeclared("export default { f() { let a; var a; } }"), vec!["a"]);
  assert_eq!(redeclared("export default { f() { var a; let a; } }"), vec!["a"]);
  // The `var` passes through the block on its way to the function scope.
  assert_eq!(redeclared("export default { f() { let a; { var a; } } }"), vec!["a"]);
  assert_eq!(redeclared("export default { f() { { var a; let a; } } }"), vec!["a"]);
  assert_eq!(redeclared("export default { f() { { function g() {} var g; } } }"), vec!["g"]);
}

#[test]
fn compatible_declarations() {
  let source = r#"export default {
  f(a) {
    var a;
    var b;
    var b;
    function c() {}
    function c() {}
    var c;
    { let b; }
    for (let i = 0; i < 1; i++) { let i = 2; }
    try {} catch (e) { var e; }
    const d = function d() {};
  },
}"#;
  assert!(redeclared(source).is_empty());
}

#[test]
fn issues_know_if_their_property_is_a_function() {
  let found = issues("export default { v: undeclared, f() { return missing; }, get g() { return gone; } }");
  let flags: Vec<_> = found.iter().map(|i| (i.property.as_str(), i.in_function)).collect();
  assert_eq!(flags, vec![("v", false), ("f", true), ("g", false)]);
}
