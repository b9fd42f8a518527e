use super::ParseCtx;
use super::Parser;
use crate::ast::node::Node;
use crate::ast::stx::ObjectModule;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;
use crate::SourceShape;

impl<'a> Parser<'a> {
  pub fn parse_object_module(&mut self, shape: SourceShape) -> SyntaxResult<Node<ObjectModule>> {
    let ctx = ParseCtx::default();
    let export_default = match shape {
      SourceShape::ExportDefault => {
        let [t0, t1] = self.peek_n::<2>();
        if t0.typ != TT::KeywordExport || t1.typ != TT::KeywordDefault {
          return Err(t0.error(SyntaxErrorType::ExpectedExportDefault));
        };
        self.consume();
        self.consume();
        true
      }
      SourceShape::BareObject => false,
    };
    let object = self.object_expr(ctx)?;
    let _ = self.consume_if(TT::Semicolon);
    self.require(TT::EOF)?;
    Ok(Node::new(self.source_range(), ObjectModule {
      export_default,
      object,
    }))
  }
}
