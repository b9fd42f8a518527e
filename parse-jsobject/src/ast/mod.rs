pub mod expr;
pub mod func;
pub mod node;
pub mod object;
pub mod stmt;
pub mod stx;
