use crate::classify::classify;
use crate::classify::gate;
use crate::classify::Classification;
use crate::classify::Diagnostic;
use crate::classify::ExecutionGate;
use crate::classify::Severity;
use crate::classify::NOT_COMPILED_CODE;
use crate::extract::extract;
use crate::extract::ExtractedObject;
use crate::options::CompileOptions;
use crate::scope::analyze_bodies;
use ahash::HashSet;
use parse_jsobject::analyze_with_options;
use serde::Serialize;
use tracing::debug;
use tracing::debug_span;
use tracing::warn;

/// The position of an edit in the sequence of edits to one JS Object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EditSeq(pub u64);

/// The outcome of compiling one version of a JS Object's source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Compilation {
  pub seq: EditSeq,
  /// Absent if the source didn't parse or its members couldn't be named.
  pub extracted: Option<ExtractedObject>,
  pub classification: Classification,
}

impl Compilation {
  pub fn state(&self) -> Severity {
    self.classification.state
  }
}

/// Parses, extracts, analyzes and classifies `source`. Pure, so it can run anywhere and be
/// applied to a [`Session`] later.
pub fn compile(seq: EditSeq, source: &str, options: &CompileOptions) -> Compilation {
  compile_with_globals(seq, source, options, &options.global_set())
}

fn compile_with_globals(
  seq: EditSeq,
  source: &str,
  options: &CompileOptions,
  globals: &HashSet<String>,
) -> Compilation {
  let _span = debug_span!("compile", seq = seq.0).entered();
  let policy = options.policy.policy();
  let mut module = match analyze_with_options(source, options.parse) {
    Ok(module) => module,
    Err(err) => {
      debug!(code = err.code(), "syntax error");
      return Compilation {
        seq,
        extracted: None,
        classification: classify(source, Some(&err), None, &[], policy),
      };
    }
  };
  let extracted = match extract(&module) {
    Ok(extracted) => extracted,
    Err(err) => {
      debug!(code = err.code(), "extraction error");
      return Compilation {
        seq,
        extracted: None,
        classification: classify(source, None, Some(&err), &[], policy),
      };
    }
  };
  let issues = analyze_bodies(&mut module, globals);
  let classification = classify(source, None, None, &issues, policy);
  debug!(
    functions = extracted.functions.len(),
    variables = extracted.variables.len(),
    issues = issues.len(),
    state = ?classification.state,
    "compiled"
  );
  Compilation {
    seq,
    extracted: Some(extracted),
    classification,
  }
}

/// What the editor shows for a JS Object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
  pub seq: Option<EditSeq>,
  pub state: Severity,
  pub ordered_function_names: Vec<String>,
  pub async_function_names: Vec<String>,
  pub variable_names: Vec<String>,
  pub callout: Option<Diagnostic>,
}

/// The authoritative compilation state of one JS Object in the editor.
///
/// Compilations are applied last-write-wins by [`EditSeq`], so a slow compilation of an
/// older edit never overwrites a newer one.
pub struct Session {
  options: CompileOptions,
  globals: HashSet<String>,
  current: Option<Compilation>,
  // Members of the last compilation that loaded, shown while the object is invalid.
  last_loaded: Option<ExtractedObject>,
  // The function most recently selected or run.
  active: Option<String>,
}

impl Session {
  pub fn new(options: CompileOptions) -> Session {
    let globals = options.global_set();
    Session {
      options,
      globals,
      current: None,
      last_loaded: None,
      active: None,
    }
  }

  pub fn options(&self) -> &CompileOptions {
    &self.options
  }

  pub fn current(&self) -> Option<&Compilation> {
    self.current.as_ref()
  }

  pub fn seq(&self) -> Option<EditSeq> {
    self.current.as_ref().map(|c| c.seq)
  }

  pub fn active(&self) -> Option<&str> {
    self.active.as_deref()
  }

  pub fn compile(&self, seq: EditSeq, source: &str) -> Compilation {
    compile_with_globals(seq, source, &self.options, &self.globals)
  }

  /// Makes `compilation` current if it's for a newer edit than the current one.
  /// Returns whether it was applied.
  pub fn apply(&mut self, compilation: Compilation) -> bool {
    if let Some(current) = self.seq() {
      if compilation.seq <= current {
        warn!(
          seq = compilation.seq.0,
          current = current.0,
          "discarding stale compilation"
        );
        return false;
      };
    };
    let previous = self.current.as_ref().map(|c| c.state());
    if previous != Some(compilation.state()) {
      debug!(seq = compilation.seq.0, from = ?previous, to = ?compilation.state(), "state changed");
    };
    if compilation.state() != Severity::ObjectInvalid {
      self.last_loaded = compilation.extracted.clone();
    };
    self.current = Some(compilation);
    true
  }

  /// Compiles and applies in one step.
  pub fn edit(&mut self, seq: EditSeq, source: &str) -> bool {
    let compilation = self.compile(seq, source);
    self.apply(compilation)
  }

  /// Asks whether `function` may run. A permitted function becomes the active one.
  pub fn run(&mut self, function: &str) -> ExecutionGate {
    let decision = match &self.current {
      Some(c) => gate(&c.classification, c.extracted.as_ref(), function),
      None => ExecutionGate::Refused {
        function: function.to_string(),
        code: NOT_COMPILED_CODE,
        message: "JS Object has not been compiled yet.".to_string(),
      },
    };
    match &decision {
      ExecutionGate::Permitted { is_async, .. } => {
        debug!(function, is_async, "run permitted");
        self.active = Some(function.to_string());
      }
      ExecutionGate::Refused { code, .. } => debug!(function, code, "run refused"),
    };
    decision
  }

  /// Focuses `function` in the editor.
  pub fn select(&mut self, function: &str) {
    self.active = Some(function.to_string());
  }

  /// The single diagnostic to show: the object-level one while the object is invalid,
  /// otherwise the active function's advisory, falling back to an advisory about a
  /// non-function property.
  pub fn callout(&self) -> Option<Diagnostic> {
    let c = &self.current.as_ref()?.classification;
    if c.state == Severity::ObjectInvalid {
      return c.effective.clone();
    };
    self
      .active
      .as_deref()
      .and_then(|f| c.advisory_for(f))
      .or_else(|| c.object_advisory())
      .cloned()
  }

  pub fn view(&self) -> SessionView {
    let members = self
      .current
      .as_ref()
      .and_then(|c| c.extracted.as_ref())
      .or(self.last_loaded.as_ref());
    SessionView {
      seq: self.seq(),
      state: self.current.as_ref().map(|c| c.state()).unwrap_or_default(),
      ordered_function_names: members.map(|m| m.function_names()).unwrap_or_default(),
      async_function_names: members
        .map(|m| m.async_function_names())
        .unwrap_or_default(),
      variable_names: members.map(|m| m.variable_names()).unwrap_or_default(),
      callout: self.callout(),
    }
  }
}

impl Default for Session {
  fn default() -> Self {
    Self::new(CompileOptions::default())
  }
}
