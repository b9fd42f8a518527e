use parse_jsobject::analyze;
use parse_jsobject::analyze_with_options;
use parse_jsobject::ast::expr::Expr;
use parse_jsobject::ast::object::ObjMember;
use parse_jsobject::ast::object::PropValue;
use parse_jsobject::error::SyntaxErrorType;
use parse_jsobject::loc::Position;
use parse_jsobject::ParseOptions;
use parse_jsobject::SourceShape;

fn member_names(source: &str) -> Vec<String> {
  let module = analyze(source).expect("expected parse success");
  module
    .stx
    .object
    .stx
    .members
    .iter()
    .map(|m| match m.stx.name() {
      Some(name) => name.to_string(),
      None => panic!("unexpected member {:?}", m.stx),
    })
    .collect()
}

#[test]
fn parses_typical_js_object() {
  let source = r#"export default {
  myVar1: [],
  myVar2: {},
  myFun1: () => {
    //write code here
  },
  myFun2: async () => {
    //use async-await or promises
  },
  async fetchRows(page = 1) {
    const { data } = await Api1.run({ page });
    return data.map((row) => ({ ...row, label: `${row.name} (${row.id})` }));
  },
}"#;
  assert_eq!(member_names(source), vec![
    "myVar1", "myVar2", "myFun1", "myFun2", "fetchRows"
  ]);
}

#[test]
fn method_and_arrow_values_keep_async_flag() {
  let module = analyze("export default { a: async () => 1, async b() {}, c: function () {} };")
    .expect("expected parse success");
  let members = &module.stx.object.stx.members;
  let ObjMember::Prop {
    value: PropValue::Value(a),
    ..
  } = members[0].stx.as_ref()
  else {
    panic!("expected property");
  };
  let Expr::Func(arrow) = a.stx.as_ref() else {
    panic!("expected arrow function, got {:?}", a.stx);
  };
  assert!(arrow.stx.func.stx.arrow);
  assert!(arrow.stx.func.stx.async_);
  let ObjMember::Prop {
    value: PropValue::Method(b),
    ..
  } = members[1].stx.as_ref()
  else {
    panic!("expected method");
  };
  assert!(b.stx.async_);
  let ObjMember::Prop { value: c, .. } = members[2].stx.as_ref() else {
    panic!("expected property");
  };
  assert!(c.callable().is_some_and(|f| !f.stx.arrow));
}

#[test]
fn keys_may_be_keywords_strings_and_numbers() {
  assert_eq!(
    member_names("export default { default: 1, 'quoted key': 2, 0x10: 3, get: 4, async: 5 }"),
    vec!["default", "quoted key", "16", "get", "async"]
  );
}

#[test]
fn malformed_arrow_is_rejected() {
  let source = "export default {\n  myFun1: ()=>>{\n  }\n}";
  let err = analyze(source).unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ExpectedSyntax("expression"));
  assert_eq!(err.message(), "expected expression, found `>`");
  assert_eq!(err.position(source), Position { line: 2, column: 15 });
}

#[test]
fn requires_export_default() {
  let err = analyze("{ a: 1 }").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ExpectedExportDefault);
  assert_eq!(err.code(), "PJ0001");
}

#[test]
fn bare_object_shape() {
  let options = ParseOptions {
    source_shape: SourceShape::BareObject,
  };
  let module = analyze_with_options("{ a: 1, b() {} }", options).expect("expected parse success");
  assert!(!module.stx.export_default);
  assert_eq!(module.stx.object.stx.members.len(), 2);
  assert!(analyze_with_options("export default { a: 1 }", options).is_err());
}

#[test]
fn rejects_trailing_content() {
  let err = analyze("export default { a: 1 }; const x = 1;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::RequiredTokenNotFound(
    parse_jsobject::token::TT::EOF
  ));
  assert!(analyze("export default { a: 1 };").is_ok());
}

#[test]
fn reports_invalid_escape_and_numbers() {
  let err = analyze(r#"export default { a: "\x4" }"#).unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidCharacterEscape);
  let err = analyze("export default { a: 0x }").unwrap_err();
  assert!(matches!(
    err.typ,
    SyntaxErrorType::ExpectedSyntax(_) | SyntaxErrorType::MalformedLiteralNumber
  ));
}

#[test]
fn options_deserialize_from_json() {
  let options: ParseOptions = serde_json::from_str(r#"{ "sourceShape": "bareObject" }"#).unwrap();
  assert_eq!(options.source_shape, SourceShape::BareObject);
  let options: ParseOptions = serde_json::from_str("{}").unwrap();
  assert_eq!(options, ParseOptions::default());
}

#[test]
fn ast_serializes_to_json() {
  let module = analyze("export default { a: 1 }").unwrap();
  let json = serde_json::to_value(&module).unwrap();
  assert_eq!(json["export_default"], serde_json::Value::Bool(true));
}

#[test]
fn member_bodies_report_early_errors() {
  let err = analyze("export default { f() { while (x) {} break; } }").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::BreakOutsideLoopOrSwitch);
  assert_eq!(err.code(), "PJ0013");
  let err = analyze("export default { f: () => { const x; } }").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ConstWithoutInitializer);
  let err = analyze("export default { t: new.target }").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::NewTargetOutsideFunction);
  assert!(analyze("export default { f: function () { return new.target } }").is_ok());
}

#[test]
fn deeply_nested_member_is_an_error() {
  let source = format!("export default {{ a: {}1{} }}", "(".repeat(10_000), ")".repeat(10_000));
  let err = analyze(&source).unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::NestingTooDeep);
  assert_eq!(err.code(), "PJ0020");
}
