use super::scope::Scope;
use crate::ast::Module;
use crate::options::GenerateOptions;
use crate::trace::{TraceBuilder, TraceTree, TracedWriter};
use crate::GenerateError;

/// Name of the generated local holding the most recently computed value.
pub const TRACKER: &str = "lastComputableExpressionValue";

/// Callee emitted for a reference that does not resolve.
pub const UNRESOLVED_CALLEE: &str = "undefined";

pub const INDENT: &str = "    ";

pub struct Gen<'m> {
    pub out: TracedWriter,
    pub scope: Scope<'m>,
    pub max_depth: usize,
    depth: usize,
}

impl<'m> Gen<'m> {
    pub fn new(module: &'m Module, options: &GenerateOptions) -> Self {
        Self {
            out: TracedWriter::new(),
            scope: Scope::new(module),
            max_depth: options.max_depth,
            depth: 0,
        }
    }

    pub fn finish(self) -> (String, TraceTree) {
        self.out.finish()
    }

    /// Run `f` one expression level deeper, failing once the nesting limit
    /// is exceeded.
    pub fn nested<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, GenerateError>,
    ) -> Result<R, GenerateError> {
        if self.depth >= self.max_depth {
            return Err(GenerateError::NestingTooDeep {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

impl TraceBuilder for Gen<'_> {
    fn writer(&mut self) -> &mut TracedWriter {
        &mut self.out
    }
}
