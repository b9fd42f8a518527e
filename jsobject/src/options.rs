use crate::policy::PolicyKind;
use ahash::HashSet;
use parse_jsobject::ParseOptions;
use serde::Deserialize;

/// Everything that affects how a JS Object is compiled.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompileOptions {
  pub parse: ParseOptions,
  /// Names provided by the host at run time, such as widgets, queries and `appsmith`.
  pub globals: Vec<String>,
  pub policy: PolicyKind,
}

impl CompileOptions {
  pub fn global_set(&self) -> HashSet<String> {
    self.globals.iter().cloned().collect()
  }
}

#[cfg(test)]
mod tests {
  use super::CompileOptions;
  use crate::policy::PolicyKind;
  use parse_jsobject::SourceShape;

  #[test]
  fn deserializes_partial_config() {
    let opts: CompileOptions = serde_json::from_str(
      r#"{"globals": ["Table1", "appsmith"], "policy": "strict", "parse": {"sourceShape": "bareObject"}}"#,
    )
    .unwrap();
    assert_eq!(opts.globals, vec!["Table1", "appsmith"]);
    assert_eq!(opts.policy, PolicyKind::Strict);
    assert_eq!(opts.parse.source_shape, SourceShape::BareObject);

    let opts: CompileOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(opts, CompileOptions::default());
  }
}
