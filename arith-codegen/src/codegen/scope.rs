use crate::ast::{Definition, Module, Parameter, Statement};
use std::collections::HashMap;

/// What a [`Reference`](crate::ast::Reference) resolved to.
#[derive(Debug, Clone, Copy)]
pub enum Symbol<'m> {
    Definition(&'m Definition),
    Parameter(&'m Parameter),
}

impl<'m> Symbol<'m> {
    pub fn name(&self) -> &'m str {
        match self {
            Symbol::Definition(def) => &def.name,
            Symbol::Parameter(param) => &param.name,
        }
    }
}

/// Name-indexed view of a module's definitions, built once per module.
///
/// A definition is only visible to statements that come after it. While a
/// definition body is being lowered its parameters shadow module-level names.
#[derive(Debug, Clone)]
pub struct Scope<'m> {
    /// name -> (statement index, definition); the first definition of a name wins
    globals: HashMap<&'m str, (usize, &'m Definition)>,
    /// Parameters of the definition currently being lowered
    locals: Option<&'m [Parameter]>,
    /// Index of the statement currently being lowered
    current: usize,
}

impl<'m> Scope<'m> {
    pub fn new(module: &'m Module) -> Self {
        let mut globals = HashMap::new();
        for (index, stmt) in module.statements.iter().enumerate() {
            if let Statement::Definition(def) = stmt {
                globals.entry(def.name.as_str()).or_insert((index, def));
            }
        }
        Self {
            globals,
            locals: None,
            current: 0,
        }
    }

    pub fn enter_statement(&mut self, index: usize) {
        self.current = index;
    }

    pub fn enter_definition(&mut self, parameters: &'m [Parameter]) {
        self.locals = Some(parameters);
    }

    pub fn exit_definition(&mut self) {
        self.locals = None;
    }

    /// Lookup a name (checks parameters first, then preceding definitions)
    pub fn resolve(&self, name: &str) -> Option<Symbol<'m>> {
        if let Some(param) = self
            .locals
            .and_then(|params| params.iter().find(|p| p.name == name))
        {
            return Some(Symbol::Parameter(param));
        }
        match self.globals.get(name) {
            Some((index, def)) if *index < self.current => Some(Symbol::Definition(def)),
            _ => None,
        }
    }
}
