use ast::node::Node;
use ast::stx::ObjectModule;
use error::SyntaxResult;
use lex::Lexer;
use parse::Parser;
use serde::Deserialize;
use serde::Serialize;

pub mod ast;
pub mod error;
pub mod lex;
pub mod loc;
pub mod num;
pub mod operator;
pub mod parse;
pub mod token;

/// How the object literal is presented in the source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceShape {
  /// `export default { ... }`, as produced by the editor's template.
  #[default]
  ExportDefault,
  /// A bare `{ ... }` literal, for hosts that strip the export themselves.
  BareObject,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseOptions {
  pub source_shape: SourceShape,
}

pub fn analyze(source: &str) -> SyntaxResult<Node<ObjectModule>> {
  analyze_with_options(source, ParseOptions::default())
}

pub fn analyze_with_options(
  source: &str,
  options: ParseOptions,
) -> SyntaxResult<Node<ObjectModule>> {
  let lexer = Lexer::new(source);
  let mut parser = Parser::new(lexer);
  parser.parse_object_module(options.source_shape)
}
