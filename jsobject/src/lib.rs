//! Compilation and triage of JS Objects: named bags of functions and values written by
//! users of a low-code application.
//!
//! A compile runs the source through [`parse_jsobject`], lists its members with
//! [`extract`], analyzes every property's value with [`scope`], and grades the result with
//! [`classify`]. A [`Session`] keeps the latest compilation per object and decides what the
//! editor shows and whether a function may run.

pub mod classify;
pub mod extract;
pub mod options;
pub mod policy;
pub mod render;
pub mod scope;
pub mod session;

pub use classify::Classification;
pub use classify::Diagnostic;
pub use classify::ExecutionGate;
pub use classify::Severity;
pub use options::CompileOptions;
pub use policy::PolicyKind;
pub use session::compile;
pub use session::Compilation;
pub use session::EditSeq;
pub use session::Session;
pub use session::SessionView;
