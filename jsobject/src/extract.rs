use ahash::HashMap;
use ahash::HashMapExt;
use parse_jsobject::ast::expr::pat::Pat;
use parse_jsobject::ast::func::Func;
use parse_jsobject::ast::node::Node;
use parse_jsobject::ast::object::ObjMember;
use parse_jsobject::ast::object::PropKey;
use parse_jsobject::ast::object::PropValue;
use parse_jsobject::ast::stx::ObjectModule;
use parse_jsobject::loc::Loc;
use serde::Serialize;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// A callable property of a JS Object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParsedFunction {
  pub name: String,
  pub is_async: bool,
  /// The whole `key: value` member.
  pub span: Loc,
  /// Parameters as written, with destructuring patterns abbreviated to the names they bind.
  pub params: Vec<String>,
  /// The function itself, from its parameter list to the end of its body.
  pub body_span: Loc,
}

/// A non-function property of a JS Object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParsedVariable {
  pub name: String,
  pub span: Loc,
}

/// The named members of a JS Object. Both lists are sorted by name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedObject {
  pub functions: Vec<ParsedFunction>,
  pub variables: Vec<ParsedVariable>,
}

impl ExtractedObject {
  pub fn function(&self, name: &str) -> Option<&ParsedFunction> {
    self
      .functions
      .binary_search_by(|f| f.name.as_str().cmp(name))
      .ok()
      .map(|i| &self.functions[i])
  }

  pub fn function_names(&self) -> Vec<String> {
    self.functions.iter().map(|f| f.name.clone()).collect()
  }

  pub fn async_function_names(&self) -> Vec<String> {
    self
      .functions
      .iter()
      .filter(|f| f.is_async)
      .map(|f| f.name.clone())
      .collect()
  }

  pub fn variable_names(&self) -> Vec<String> {
    self.variables.iter().map(|v| v.name.clone()).collect()
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtractError {
  DuplicateProperty { name: String, loc: Loc, first: Loc },
  ComputedKey { loc: Loc },
  SpreadMember { loc: Loc },
}

impl ExtractError {
  pub fn code(&self) -> &'static str {
    match self {
      ExtractError::DuplicateProperty { .. } => "JSO0001",
      ExtractError::ComputedKey { .. } => "JSO0002",
      ExtractError::SpreadMember { .. } => "JSO0003",
    }
  }

  pub fn loc(&self) -> Loc {
    match self {
      ExtractError::DuplicateProperty { loc, .. }
      | ExtractError::ComputedKey { loc }
      | ExtractError::SpreadMember { loc } => *loc,
    }
  }
}

impl Display for ExtractError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      ExtractError::DuplicateProperty { name, .. } => {
        write!(f, "Duplicate property \"{}\" in JS Object.", name)
      }
      ExtractError::ComputedKey { .. } => {
        write!(f, "JS Object properties must have static names.")
      }
      ExtractError::SpreadMember { .. } => {
        write!(f, "Spread members are not supported in a JS Object.")
      }
    }
  }
}

impl Error for ExtractError {}

fn pat_label(pat: &Node<Pat>) -> String {
  match pat.stx.as_ref() {
    Pat::Id(id) => id.stx.name.clone(),
    Pat::Array(arr) => {
      let mut parts: Vec<String> = arr
        .stx
        .elements
        .iter()
        .map(|e| e.as_ref().map(|e| pat_label(&e.target)).unwrap_or_default())
        .collect();
      if let Some(rest) = &arr.stx.rest {
        parts.push(format!("...{}", pat_label(rest)));
      };
      format!("[{}]", parts.join(", "))
    }
    Pat::Object(obj) => {
      let mut parts: Vec<String> = obj
        .stx
        .props
        .iter()
        .map(|p| pat_label(&p.stx.elem.target))
        .collect();
      if let Some(rest) = &obj.stx.rest {
        parts.push(format!("...{}", pat_label(rest)));
      };
      format!("{{{}}}", parts.join(", "))
    }
    // Never in a parameter list.
    Pat::Member(_) => String::new(),
  }
}

fn params_of(func: &Node<Func>) -> Vec<String> {
  func
    .stx
    .params
    .iter()
    .map(|p| {
      let label = pat_label(&p.stx.binding.stx.pat);
      if p.stx.rest {
        format!("...{}", label)
      } else {
        label
      }
    })
    .collect()
}

/// Which half of an accessor pair a member is, if any.
fn accessor_half(value: &PropValue) -> Option<bool> {
  match value {
    PropValue::Getter(_) => Some(true),
    PropValue::Setter(_) => Some(false),
    _ => None,
  }
}

/// Lists the functions and variables of a parsed JS Object.
///
/// Every member must have a static, unique name.
pub fn extract(module: &Node<ObjectModule>) -> Result<ExtractedObject, ExtractError> {
  // Location of the first member with each name, and the accessor half it still awaits.
  let mut seen = HashMap::<&str, (Loc, Option<bool>)>::new();
  let mut extracted = ExtractedObject::default();
  for member in module.stx.object.stx.members.iter() {
    let (name, func, accessor) = match member.stx.as_ref() {
      ObjMember::Prop { key, value } => {
        let PropKey::Named(key) = key else {
          return Err(ExtractError::ComputedKey { loc: member.loc });
        };
        // Accessors are read like values, not invoked as actions.
        (key.stx.name.as_str(), value.callable(), accessor_half(value))
      }
      ObjMember::Shorthand { id } => (id.stx.name.as_str(), None, None),
      ObjMember::Spread { .. } => return Err(ExtractError::SpreadMember { loc: member.loc }),
    };
    if let Some((first, awaiting)) = seen.get_mut(name) {
      // A getter and setter pair up into one variable.
      if accessor.is_some() && *awaiting == accessor.map(|is_getter| !is_getter) {
        *awaiting = None;
        continue;
      };
      return Err(ExtractError::DuplicateProperty {
        name: name.to_string(),
        loc: member.loc,
        first: *first,
      });
    };
    seen.insert(name, (member.loc, accessor));
    match func {
      Some(func) => extracted.functions.push(ParsedFunction {
        name: name.to_string(),
        is_async: func.stx.async_,
        span: member.loc,
        params: params_of(func),
        body_span: func.loc,
      }),
      None => extracted.variables.push(ParsedVariable {
        name: name.to_string(),
        span: member.loc,
      }),
    };
  }
  // Ordinal string order, independent of declaration order.
  extracted.functions.sort_by(|a, b| a.name.cmp(&b.name));
  extracted.variables.sort_by(|a, b| a.name.cmp(&b.name));
  Ok(extracted)
}

#[cfg(test)]
mod tests {
  use super::extract;
  use super::ExtractError;
  use parse_jsobject::analyze;

  #[test]
  fn functions_are_sorted_by_name() {
    let module = analyze(
      r#"export default {
      getId: async () => {
        return 8;
      },
      zip: async () => {
        return 8;
      },
      assert: async () => {
        return 2
      }  ,
      base: async () => {
        return 3
      } ,
    }"#,
    )
    .unwrap();
    let extracted = extract(&module).unwrap();
    assert_eq!(extracted.function_names(), vec!["assert", "base", "getId", "zip"]);
    assert_eq!(extracted.async_function_names(), vec![
      "assert", "base", "getId", "zip"
    ]);
  }

  #[test]
  fn ordering_is_ordinal() {
    let module = analyze("export default { b() {}, B() {}, a() {}, _x() {}, Z: 1, a1: 2 }").unwrap();
    let extracted = extract(&module).unwrap();
    assert_eq!(extracted.function_names(), vec!["B", "_x", "a", "b"]);
    assert_eq!(extracted.variable_names(), vec!["Z", "a1"]);
  }

  #[test]
  fn classifies_members() {
    let module = analyze(
      "export default { v: [], f: function (a, b) {}, async m({ x, y: [z] }, ...rest) {}, get g() { return 1; } }",
    )
    .unwrap();
    let extracted = extract(&module).unwrap();
    assert_eq!(extracted.function_names(), vec!["f", "m"]);
    assert_eq!(extracted.async_function_names(), vec!["m"]);
    assert_eq!(extracted.variable_names(), vec!["g", "v"]);
    let m = extracted.function("m").unwrap();
    assert_eq!(m.params, vec!["{x, [z]}", "...rest"]);
    assert!(extracted.function("missing").is_none());
  }

  #[test]
  fn duplicate_names_are_rejected() {
    let module = analyze("export default { a: 1, b() {}, 'a': 2 }").unwrap();
    let err = extract(&module).unwrap_err();
    assert!(matches!(&err, ExtractError::DuplicateProperty { name, .. } if name == "a"));
    assert_eq!(err.code(), "JSO0001");
    assert_eq!(err.to_string(), "Duplicate property \"a\" in JS Object.");
  }

  #[test]
  fn accessor_pairs_are_one_variable() {
    let module =
      analyze("export default { get v() { return 1; }, set v(x) {}, w: 2 }").unwrap();
    let extracted = extract(&module).unwrap();
    assert_eq!(extracted.variable_names(), vec!["v", "w"]);
    let module = analyze("export default { get v() {}, set v(x) {}, get v() {} }").unwrap();
    assert!(matches!(extract(&module), Err(ExtractError::DuplicateProperty { .. })));
    let module = analyze("export default { get v() {}, get v() {} }").unwrap();
    assert!(matches!(extract(&module), Err(ExtractError::DuplicateProperty { .. })));
  }

  #[test]
  fn unnamed_members_are_rejected() {
    let module = analyze("export default { [key]: 1 }").unwrap();
    assert!(matches!(extract(&module), Err(ExtractError::ComputedKey { .. })));
    let module = analyze("export default { ...base }").unwrap();
    assert!(matches!(extract(&module), Err(ExtractError::SpreadMember { .. })));
  }
}
