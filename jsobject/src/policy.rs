use crate::classify::Severity;
use crate::scope::BodyIssue;
use crate::scope::BodyIssueKind;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

/// Decides how severe each body issue is. Returning `None` drops the issue.
pub trait IssuePolicy {
  fn severity(&self, issue: &BodyIssue) -> Option<Severity>;
}

/// Flags unresolved references and `const` reassignments as advisories, and rejects the
/// whole object for early errors like `await` outside an `async` function, which no engine
/// accepts.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultPolicy;

impl IssuePolicy for DefaultPolicy {
  fn severity(&self, issue: &BodyIssue) -> Option<Severity> {
    Some(match issue.kind {
      BodyIssueKind::UnresolvedReference { .. } | BodyIssueKind::ConstReassignment { .. } => {
        Severity::FunctionAdvisory
      }
      BodyIssueKind::AwaitOutsideAsync | BodyIssueKind::Redeclaration { .. } => {
        Severity::ObjectInvalid
      }
    })
  }
}

/// Every body issue makes the object invalid.
#[derive(Clone, Copy, Debug, Default)]
pub struct StrictPolicy;

impl IssuePolicy for StrictPolicy {
  fn severity(&self, _issue: &BodyIssue) -> Option<Severity> {
    Some(Severity::ObjectInvalid)
  }
}

/// Like [`DefaultPolicy`], but ignores unresolved references, for hosts that inject
/// names the analyzer can't know about.
#[derive(Clone, Copy, Debug, Default)]
pub struct PermissivePolicy;

impl IssuePolicy for PermissivePolicy {
  fn severity(&self, issue: &BodyIssue) -> Option<Severity> {
    match issue.kind {
      BodyIssueKind::UnresolvedReference { .. } => None,
      _ => DefaultPolicy.severity(issue),
    }
  }
}

/// A built-in policy, selectable from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PolicyKind {
  #[default]
  Default,
  Strict,
  Permissive,
}

impl PolicyKind {
  pub fn policy(self) -> &'static dyn IssuePolicy {
    match self {
      PolicyKind::Default => &DefaultPolicy,
      PolicyKind::Strict => &StrictPolicy,
      PolicyKind::Permissive => &PermissivePolicy,
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownPolicy(pub String);

impl Display for UnknownPolicy {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "unknown policy `{}`, expected one of `default`, `strict`, `permissive`",
      self.0
    )
  }
}

impl std::error::Error for UnknownPolicy {}

impl FromStr for PolicyKind {
  type Err = UnknownPolicy;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "default" => Ok(PolicyKind::Default),
      "strict" => Ok(PolicyKind::Strict),
      "permissive" => Ok(PolicyKind::Permissive),
      other => Err(UnknownPolicy(other.to_string())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use parse_jsobject::loc::Loc;

  fn issue(kind: BodyIssueKind) -> BodyIssue {
    BodyIssue {
      property: "f".to_string(),
      in_function: true,
      loc: Loc(0, 0),
      kind,
    }
  }

  #[test]
  fn policies_grade_issues() {
    let unresolved = issue(BodyIssueKind::UnresolvedReference {
      name: "x".to_string(),
    });
    let await_ = issue(BodyIssueKind::AwaitOutsideAsync);
    assert_eq!(
      DefaultPolicy.severity(&unresolved),
      Some(Severity::FunctionAdvisory)
    );
    assert_eq!(DefaultPolicy.severity(&await_), Some(Severity::ObjectInvalid));
    assert_eq!(StrictPolicy.severity(&unresolved), Some(Severity::ObjectInvalid));
    assert_eq!(PermissivePolicy.severity(&unresolved), None);
    assert_eq!(PermissivePolicy.severity(&await_), Some(Severity::ObjectInvalid));
  }

  #[test]
  fn policy_kind_from_str() {
    assert_eq!("strict".parse::<PolicyKind>(), Ok(PolicyKind::Strict));
    assert!("lenient".parse::<PolicyKind>().is_err());
  }
}
