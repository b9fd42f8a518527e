use super::Parser;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;
use derive_visitor::Drive;
use derive_visitor::DriveMut;

// Combinators shared by the statement, expression and object parsers.
impl<'a> Parser<'a> {
  /// Runs `f` and wraps its syntax in a node spanning every token it consumed.
  pub fn with_loc<S: Drive + DriveMut, F>(&mut self, f: F) -> SyntaxResult<Node<S>>
  where
    F: FnOnce(&mut Self) -> SyntaxResult<S>,
  {
    let start = self.checkpoint();
    let stx = f(self)?;
    Ok(Node::new(self.since_checkpoint(&start), stx))
  }

  pub fn repeat_while<S>(
    &mut self,
    cond: impl Fn(&mut Self) -> bool,
    item: impl Fn(&mut Self) -> SyntaxResult<S>,
  ) -> SyntaxResult<Vec<S>> {
    let mut items = Vec::new();
    while cond(self) {
      items.push(item(self)?);
    }
    Ok(items)
  }

  /// Stops before `end` without consuming it. Also stops at EOF, leaving the caller's `require`
  /// to report the missing token.
  pub fn repeat_until_tt<S>(
    &mut self,
    end: TT,
    item: impl Fn(&mut Self) -> SyntaxResult<S>,
  ) -> SyntaxResult<Vec<S>> {
    self.repeat_while(
      |p| {
        let t = p.peek().typ;
        t != end && t != TT::EOF
      },
      item,
    )
  }

  /// Items separated by `delim` up to and including `close`. A trailing `delim` is allowed.
  pub fn list_with_loc<S: Drive + DriveMut, F>(
    &mut self,
    delim: TT,
    close: TT,
    item: F,
  ) -> SyntaxResult<Vec<Node<S>>>
  where
    F: Fn(&mut Self) -> SyntaxResult<S>,
  {
    let mut items = Vec::new();
    loop {
      if self.consume_if(close).is_match() {
        return Ok(items);
      };
      items.push(self.with_loc(&item)?);
      let t = self.consume();
      match t.typ {
        t if t == close => return Ok(items),
        t if t == delim => {}
        _ => return Err(t.error(SyntaxErrorType::RequiredTokenNotFound(close))),
      };
    }
  }

  /// Runs `f`, then rewinds to where it started if it produced nothing.
  pub fn rewindable<S>(
    &mut self,
    f: impl FnOnce(&mut Self) -> SyntaxResult<Option<S>>,
  ) -> SyntaxResult<Option<S>> {
    let start = self.checkpoint();
    let result = f(self)?;
    if result.is_none() {
      self.restore_checkpoint(start);
    };
    Ok(result)
  }
}
