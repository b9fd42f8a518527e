use crate::classify::Diagnostic;
use crate::classify::Severity;
use std::fmt::Write;

const TAB_WIDTH: usize = 2;

const ANSI_RESET: &str = "\u{1b}[0m";
const ANSI_BOLD_RED: &str = "\u{1b}[1;31m";
const ANSI_BOLD_YELLOW: &str = "\u{1b}[1;33m";
const ANSI_BOLD_BLUE: &str = "\u{1b}[1;34m";

fn severity_label(severity: Severity) -> (&'static str, &'static str) {
  match severity {
    Severity::ObjectInvalid => ("error", ANSI_BOLD_RED),
    Severity::FunctionAdvisory => ("warning", ANSI_BOLD_YELLOW),
    Severity::Clean => ("note", ANSI_BOLD_BLUE),
  }
}

fn display_width(text: &str) -> usize {
  text
    .chars()
    .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
    .sum()
}

/// Renders a diagnostic with the offending source line and a caret underline, like:
///
/// ```text
/// error[PJ0003]: expected expression, found `>`
///  --> Api1.js:2:15
///   |
/// 2 |   myFun2: () =>> {
///   |               ^
/// ```
pub fn render_diagnostic(name: &str, source: &str, diagnostic: &Diagnostic, color: bool) -> String {
  let mut output = String::new();
  let (label, ansi) = severity_label(diagnostic.severity);
  if color {
    write!(output, "{}{}{}", ansi, label, ANSI_RESET).unwrap();
  } else {
    output.push_str(label);
  };
  writeln!(output, "[{}]: {}", diagnostic.code, diagnostic.message).unwrap();
  if let Some(function) = &diagnostic.target_function {
    writeln!(output, " = in: {}", function).unwrap();
  };
  let (Some(loc), Some(position)) = (diagnostic.loc, diagnostic.position) else {
    return output;
  };
  writeln!(output, " --> {}:{}:{}", name, position.line, position.column).unwrap();

  let mut start = loc.0.min(source.len());
  while !source.is_char_boundary(start) {
    start -= 1;
  }
  let line_start = source[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
  let line_end = source[start..]
    .find('\n')
    .map(|i| start + i)
    .unwrap_or(source.len());
  let line = source[line_start..line_end].trim_end_matches('\r');
  let mut end = loc.1.clamp(start, line_start + line.len());
  while !source.is_char_boundary(end) {
    end -= 1;
  }

  let gutter = position.line.to_string().len();
  writeln!(output, "{:>gutter$} |", "").unwrap();
  writeln!(
    output,
    "{} | {}",
    position.line,
    line.replace('\t', &" ".repeat(TAB_WIDTH))
  )
  .unwrap();
  let pad = display_width(&source[line_start..start]);
  let width = display_width(&source[start..end]).max(1);
  write!(output, "{:>gutter$} | {}", "", " ".repeat(pad)).unwrap();
  if color {
    output.push_str(ansi);
  };
  output.push_str(&"^".repeat(width));
  if color {
    output.push_str(ANSI_RESET);
  };
  output.push('\n');
  output
}

#[cfg(test)]
mod tests {
  use super::render_diagnostic;
  use crate::session::compile;
  use crate::session::EditSeq;

  #[test]
  fn renders_caret_under_token() {
    let source = "export default {\n  myFun1: ()=>>{\n  }\n}";
    let compilation = compile(EditSeq(1), source, &Default::default());
    let diagnostic = compilation.classification.effective.unwrap();
    let rendered = render_diagnostic("Api1.js", source, &diagnostic, false);
    let expected = [
      "error[PJ0003]: expected expression, found `>`".to_string(),
      " --> Api1.js:2:15".to_string(),
      "  |".to_string(),
      "2 |   myFun1: ()=>>{".to_string(),
      format!("  | {}^", " ".repeat(14)),
      "".to_string(),
    ]
    .join("\n");
    assert_eq!(rendered, expected);
  }

  #[test]
  fn renders_advisory_with_function() {
    let source = "export default {\n\tf() {\n\t\treturn missing;\n\t},\n}";
    let compilation = compile(EditSeq(1), source, &Default::default());
    let diagnostic = compilation.classification.effective.unwrap();
    let rendered = render_diagnostic("Api1.js", source, &diagnostic, false);
    let expected = [
      "warning[JSO0101]: \"missing\" is not defined.".to_string(),
      " = in: f".to_string(),
      " --> Api1.js:3:10".to_string(),
      "  |".to_string(),
      "3 |     return missing;".to_string(),
      format!("  | {}{}", " ".repeat(11), "^".repeat(7)),
      "".to_string(),
    ]
    .join("\n");
    assert_eq!(rendered, expected);
  }

  #[test]
  fn colors_severity_and_caret() {
    let source = "export default { f() { return missing; } }";
    let compilation = compile(EditSeq(1), source, &Default::default());
    let diagnostic = compilation.classification.effective.unwrap();
    let rendered = render_diagnostic("Api1.js", source, &diagnostic, true);
    assert!(rendered.starts_with("\u{1b}[1;33mwarning\u{1b}[0m[JSO0101]"));
    assert!(rendered.contains("\u{1b}[1;33m^^^^^^^\u{1b}[0m"));
  }
}
