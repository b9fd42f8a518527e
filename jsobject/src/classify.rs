use crate::extract::ExtractError;
use crate::extract::ExtractedObject;
use crate::policy::IssuePolicy;
use crate::scope::BodyIssue;
use parse_jsobject::error::SyntaxError;
use parse_jsobject::loc::Loc;
use parse_jsobject::loc::Position;
use serde::Serialize;
use std::collections::BTreeMap;

/// How badly a JS Object is affected. Ordered from least to most severe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
  #[default]
  Clean,
  /// The object loads, but a function has a problem worth pointing out when it's in focus.
  FunctionAdvisory,
  /// The object cannot be loaded at all.
  ObjectInvalid,
}

/// The overall severity of a set of severities: the most severe one, or `Clean` if empty.
pub fn resolve<I: IntoIterator<Item = Severity>>(severities: I) -> Severity {
  severities.into_iter().max().unwrap_or_default()
}

pub const UNKNOWN_FUNCTION_CODE: &str = "JSO0201";
pub const NOT_COMPILED_CODE: &str = "JSO0202";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
  pub severity: Severity,
  pub code: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub target_function: Option<String>,
  pub message: String,
  #[serde(skip)]
  pub loc: Option<Loc>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub position: Option<Position>,
}

impl Diagnostic {
  pub fn from_syntax_error(source: &str, err: &SyntaxError) -> Diagnostic {
    Diagnostic {
      severity: Severity::ObjectInvalid,
      code: err.code(),
      target_function: None,
      message: err.message(),
      loc: Some(err.loc),
      position: Some(err.position(source)),
    }
  }

  pub fn from_extract_error(source: &str, err: &ExtractError) -> Diagnostic {
    let loc = err.loc();
    Diagnostic {
      severity: Severity::ObjectInvalid,
      code: err.code(),
      target_function: None,
      message: err.to_string(),
      loc: Some(loc),
      position: Some(loc.start_position(source)),
    }
  }

  /// Issues in a function target it. Issues in any other property concern the whole object.
  pub fn from_body_issue(source: &str, issue: &BodyIssue, severity: Severity) -> Diagnostic {
    Diagnostic {
      severity,
      code: issue.kind.code(),
      target_function: issue.in_function.then(|| issue.property.clone()),
      message: issue.kind.to_string(),
      loc: Some(issue.loc),
      position: Some(issue.loc.start_position(source)),
    }
  }
}

/// The triage result of one compilation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
  pub state: Severity,
  /// The one diagnostic to show for the object as a whole.
  pub effective: Option<Diagnostic>,
  /// Every graded diagnostic, most severe first, then in source order.
  pub diagnostics: Vec<Diagnostic>,
  /// Empty while the object is invalid, as advisories only matter once it loads. Advisories
  /// about non-function properties are only in `diagnostics`.
  pub advisories_by_function: BTreeMap<String, Vec<Diagnostic>>,
}

impl Classification {
  /// The first advisory that concerns the object rather than one function, unless the
  /// object is invalid.
  pub fn object_advisory(&self) -> Option<&Diagnostic> {
    if self.state == Severity::ObjectInvalid {
      return None;
    };
    self.diagnostics.iter().find(|d| d.target_function.is_none())
  }

  /// The first advisory of a function, unless the object is invalid.
  pub fn advisory_for(&self, function: &str) -> Option<&Diagnostic> {
    if self.state == Severity::ObjectInvalid {
      return None;
    };
    self
      .advisories_by_function
      .get(function)
      .and_then(|d| d.first())
  }
}

/// Derives the state of a JS Object from scratch.
///
/// A syntax or extraction error makes the object invalid on its own, as does a body issue
/// that is an early error. Other body issues are graded by `policy`, and the most severe
/// grade wins.
pub fn classify(
  source: &str,
  syntax_error: Option<&SyntaxError>,
  extract_error: Option<&ExtractError>,
  issues: &[BodyIssue],
  policy: &dyn IssuePolicy,
) -> Classification {
  let mut diagnostics = Vec::new();
  if let Some(err) = syntax_error {
    diagnostics.push(Diagnostic::from_syntax_error(source, err));
  };
  if let Some(err) = extract_error {
    diagnostics.push(Diagnostic::from_extract_error(source, err));
  };
  for issue in issues {
    let severity = if issue.kind.is_early_error() {
      Some(Severity::ObjectInvalid)
    } else {
      policy.severity(issue)
    };
    if let Some(severity) = severity {
      if severity > Severity::Clean {
        diagnostics.push(Diagnostic::from_body_issue(source, issue, severity));
      };
    };
  }
  diagnostics.sort_by(|a, b| {
    b.severity
      .cmp(&a.severity)
      .then_with(|| a.loc.map(|l| l.0).cmp(&b.loc.map(|l| l.0)))
  });
  let state = resolve(diagnostics.iter().map(|d| d.severity));
  let effective = diagnostics.first().cloned();
  let mut advisories_by_function = BTreeMap::<String, Vec<Diagnostic>>::new();
  if state != Severity::ObjectInvalid {
    for d in diagnostics.iter() {
      if let Some(function) = &d.target_function {
        advisories_by_function
          .entry(function.clone())
          .or_default()
          .push(d.clone());
      };
    }
  };
  Classification {
    state,
    effective,
    diagnostics,
    advisories_by_function,
  }
}

/// Whether a function may be handed to the host for execution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "camelCase")]
pub enum ExecutionGate {
  #[serde(rename_all = "camelCase")]
  Permitted {
    function: String,
    is_async: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    advisory: Option<Diagnostic>,
  },
  #[serde(rename_all = "camelCase")]
  Refused {
    function: String,
    code: &'static str,
    message: String,
  },
}

impl ExecutionGate {
  pub fn is_permitted(&self) -> bool {
    matches!(self, ExecutionGate::Permitted { .. })
  }
}

/// Decides whether `function` may run. An invalid object refuses everything with its
/// effective diagnostic; otherwise any known function is permitted, advisories and all.
pub fn gate(
  classification: &Classification,
  extracted: Option<&ExtractedObject>,
  function: &str,
) -> ExecutionGate {
  if classification.state == Severity::ObjectInvalid {
    let (code, message) = match &classification.effective {
      Some(d) => (d.code, d.message.clone()),
      None => (NOT_COMPILED_CODE, "JS Object could not be loaded.".to_string()),
    };
    return ExecutionGate::Refused {
      function: function.to_string(),
      code,
      message,
    };
  };
  match extracted.and_then(|e| e.function(function)) {
    Some(f) => ExecutionGate::Permitted {
      function: function.to_string(),
      is_async: f.is_async,
      advisory: classification.advisory_for(function).cloned(),
    },
    None => ExecutionGate::Refused {
      function: function.to_string(),
      code: UNKNOWN_FUNCTION_CODE,
      message: format!("\"{}\" is not a function of this JS Object.", function),
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::policy::DefaultPolicy;
  use crate::policy::PolicyKind;
  use crate::scope::BodyIssueKind;
  use parse_jsobject::error::SyntaxErrorType;
  use parse_jsobject::token::TT;

  fn unresolved(property: &str, name: &str, at: usize) -> BodyIssue {
    BodyIssue {
      property: property.to_string(),
      in_function: true,
      loc: Loc(at, at + name.len()),
      kind: BodyIssueKind::UnresolvedReference {
        name: name.to_string(),
      },
    }
  }

  #[test]
  fn resolve_takes_most_severe() {
    assert_eq!(resolve([]), Severity::Clean);
    assert_eq!(
      resolve([Severity::FunctionAdvisory, Severity::Clean]),
      Severity::FunctionAdvisory
    );
    assert_eq!(
      resolve([
        Severity::FunctionAdvisory,
        Severity::ObjectInvalid,
        Severity::Clean
      ]),
      Severity::ObjectInvalid
    );
  }

  #[test]
  fn advisories_are_grouped_by_function() {
    let source = "export default { f() { a; b; }, g() { c; } }";
    let issues = [
      unresolved("f", "a", 23),
      unresolved("f", "b", 26),
      unresolved("g", "c", 38),
    ];
    let c = classify(source, None, None, &issues, &DefaultPolicy);
    assert_eq!(c.state, Severity::FunctionAdvisory);
    assert_eq!(c.advisories_by_function["f"].len(), 2);
    assert_eq!(c.advisory_for("f").unwrap().message, "\"a\" is not defined.");
    assert_eq!(c.advisory_for("g").unwrap().code, "JSO0101");
    assert!(c.advisory_for("h").is_none());
  }

  #[test]
  fn object_invalid_suppresses_advisories() {
    let source = "export default { f() { a; }, g: > }";
    let err = SyntaxError::new(
      SyntaxErrorType::ExpectedSyntax("expression"),
      Loc(32, 33),
      Some(TT::ChevronRight),
    );
    let issues = [unresolved("f", "a", 23)];
    let c = classify(source, Some(&err), None, &issues, &DefaultPolicy);
    assert_eq!(c.state, Severity::ObjectInvalid);
    let effective = c.effective.as_ref().unwrap();
    assert_eq!(effective.severity, Severity::ObjectInvalid);
    assert_eq!(effective.code, "PJ0003");
    assert!(c.advisories_by_function.is_empty());
    assert!(c.advisory_for("f").is_none());
    assert!(!gate(&c, None, "f").is_permitted());
  }

  #[test]
  fn variable_issues_concern_the_object() {
    let source = "export default { v: a, f() { b; } }";
    let mut in_variable = unresolved("v", "a", 20);
    in_variable.in_function = false;
    let issues = [in_variable, unresolved("f", "b", 29)];
    let c = classify(source, None, None, &issues, &DefaultPolicy);
    assert_eq!(c.state, Severity::FunctionAdvisory);
    assert_eq!(c.diagnostics.len(), 2);
    assert!(c.advisory_for("v").is_none());
    assert!(!c.advisories_by_function.contains_key("v"));
    let object = c.object_advisory().unwrap();
    assert_eq!(object.target_function, None);
    assert_eq!(object.message, "\"a\" is not defined.");
    assert_eq!(c.advisory_for("f").unwrap().message, "\"b\" is not defined.");
  }

  #[test]
  fn early_errors_ignore_policy() {
    let source = "export default { f() { let a; let a; } }";
    let issues = [BodyIssue {
      property: "f".to_string(),
      in_function: true,
      loc: Loc(34, 35),
      kind: BodyIssueKind::Redeclaration {
        name: "a".to_string(),
      },
    }];
    for policy in [PolicyKind::Default, PolicyKind::Permissive, PolicyKind::Strict] {
      let c = classify(source, None, None, &issues, policy.policy());
      assert_eq!(c.state, Severity::ObjectInvalid);
      assert_eq!(c.effective.as_ref().unwrap().code, "JSO0104");
    }
  }

  #[test]
  fn clean_object_has_no_callout() {
    let c = classify("export default {}", None, None, &[], &DefaultPolicy);
    assert_eq!(c, Classification::default());
  }

  #[test]
  fn diagnostic_json_shape() {
    let source = "export default { f() { a; } }";
    let c = classify(source, None, None, &[unresolved("f", "a", 23)], &DefaultPolicy);
    let json = serde_json::to_value(c.effective.unwrap()).unwrap();
    assert_eq!(
      json,
      serde_json::json!({
        "severity": "functionAdvisory",
        "code": "JSO0101",
        "targetFunction": "f",
        "message": "\"a\" is not defined.",
        "position": { "line": 1, "column": 24 },
      })
    );
  }
}
