use crate::grammer::ast::VarId;
use indexmap::IndexMap;

/// Lexical scopes, innermost last. Starts with one global scope.
pub struct Scopes<'a> {
    stack: Vec<IndexMap<&'a str, VarId>>,
}

impl<'a> Scopes<'a> {
    pub fn new() -> Self {
        Self {
            stack: vec![IndexMap::new()],
        }
    }

    pub fn push(&mut self) {
        self.stack.push(IndexMap::new());
    }

    pub fn pop(&mut self) {
        self.stack.pop();
    }

    /// Register `name` in the innermost scope. Returns `false` if that scope already has it.
    pub fn declare(&mut self, name: &'a str, var: VarId) -> bool {
        match self.stack.last_mut() {
            Some(scope) if !scope.contains_key(name) => {
                scope.insert(name, var);
                true
            }
            _ => false,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<VarId> {
        self.stack
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
    }
}

impl Default for Scopes<'_> {
    fn default() -> Self {
        Self::new()
    }
}
