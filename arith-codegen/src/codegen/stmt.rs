use super::context::{Gen, INDENT, TRACKER};
use crate::ast::{Definition, Evaluation, Module, Statement};
use crate::trace::TraceBuilder;
use crate::GenerateError;

impl<'m> Gen<'m> {
    /// Wrap the whole module into one anonymous, zero-argument arrow
    /// function returning the last computed value.
    pub fn lower_module(&mut self, module: &'m Module) -> Result<(), GenerateError> {
        self.append("\"use strict\";\n(() => {\n");
        self.append(INDENT);
        self.traced(module.region.as_ref(), |this| {
            this.append("let ");
            this.append(TRACKER);
            this.append(";");
            for (index, stmt) in module.statements.iter().enumerate() {
                this.scope.enter_statement(index);
                this.append("\n");
                this.append(INDENT);
                this.lower_statement(stmt)?;
            }
            this.append("\n\n");
            this.append(INDENT);
            this.append("return ");
            this.append(TRACKER);
            this.append(";");
            Ok::<_, GenerateError>(())
        })?;
        self.append("\n})");
        Ok(())
    }

    pub fn lower_statement(&mut self, stmt: &'m Statement) -> Result<(), GenerateError> {
        match stmt {
            Statement::Definition(def) => self.lower_definition(def),
            Statement::Evaluation(evaln) => self.lower_evaluation(evaln),
        }
    }

    /// Parameterized definitions become arrow functions and leave the tracker
    /// alone; nilary ones are constants that also update the tracker.
    pub fn lower_definition(&mut self, def: &'m Definition) -> Result<(), GenerateError> {
        if def.parameters.is_empty() {
            return self.lower_constant(def);
        }

        self.traced(def.region.as_ref(), |this| {
            this.append("const ");
            this.traced(def.name_region.as_ref(), |this| this.append(&def.name));
            this.append(" = (");
            this.join(&def.parameters, ", ", |this, param| {
                this.traced(param.region.as_ref(), |this| this.append(&param.name));
                Ok::<_, GenerateError>(())
            })?;
            this.append(") => ");

            this.scope.enter_definition(&def.parameters);
            let body = this.lower_expression(&def.body);
            this.scope.exit_definition();
            body?;

            this.append(";");
            Ok::<_, GenerateError>(())
        })
    }

    fn lower_constant(&mut self, def: &'m Definition) -> Result<(), GenerateError> {
        self.traced(def.region.as_ref(), |this| {
            // the keyword carries the statement's mapping
            this.traced(def.region.as_ref(), |this| this.append("const"));
            this.append(" ");
            this.traced(def.name_region.as_ref(), |this| this.append(&def.name));
            this.append(" = ");
            this.append(TRACKER);
            this.append(" = ");
            this.lower_expression(&def.body)?;
            this.append(";");
            Ok::<_, GenerateError>(())
        })
    }

    pub fn lower_evaluation(&mut self, evaln: &Evaluation) -> Result<(), GenerateError> {
        self.traced(evaln.region.as_ref(), |this| {
            this.append(TRACKER);
            this.append(" = ");
            this.lower_expression(&evaln.expression)?;
            this.append(";");
            Ok::<_, GenerateError>(())
        })
    }
}
