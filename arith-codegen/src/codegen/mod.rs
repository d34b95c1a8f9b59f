//! AST to script lowering.
//!
//! Every fragment is written through a [`TracedWriter`](crate::trace::TracedWriter),
//! so the generated text and its provenance tree come out of one pass.

pub mod context;
pub mod expr;
pub mod scope;
pub mod stmt;

use crate::ast::Module;
use crate::options::GenerateOptions;
use crate::trace::TraceTree;
use crate::GenerateError;

pub use context::{Gen, TRACKER, UNRESOLVED_CALLEE};
pub use scope::{Scope, Symbol};

/// Entry point for lowering a module to script text plus its trace tree.
pub fn lower(module: &Module, options: &GenerateOptions) -> Result<(String, TraceTree), GenerateError> {
    let mut g = Gen::new(module, options);
    g.lower_module(module)?;
    let (text, trace) = g.finish();
    tracing::debug!(
        statements = module.statements.len(),
        trace_nodes = trace.len(),
        bytes = text.len(),
        "lowered module"
    );
    Ok((text, trace))
}
