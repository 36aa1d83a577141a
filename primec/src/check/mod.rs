mod scope;

pub use scope::Scopes;

use crate::error::Error;
use crate::grammer::ast::{Ast, BinaryOp, ExprId, FuncDecl, FuncId, StmtId, VarDecl, VarId};
use crate::grammer::visit::Visitor;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Name bindings found by the checker, keyed by the referencing expression.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub calls: HashMap<ExprId, FuncId>,
    pub idents: HashMap<ExprId, VarId>,
}

impl Resolution {
    pub fn call(&self, id: ExprId) -> Option<FuncId> {
        self.calls.get(&id).copied()
    }

    pub fn ident(&self, id: ExprId) -> Option<VarId> {
        self.idents.get(&id).copied()
    }
}

/// Validate declarations and references of `ast`. Stops at the first violation.
pub fn check(ast: &Ast) -> Result<Resolution, Error> {
    let mut checker = Checker::new(ast);
    ast.accept(&mut checker, ())?;
    Ok(checker.into_resolution())
}

pub struct Checker<'a> {
    ast: &'a Ast,
    funcs: IndexMap<&'a str, FuncId>,
    scopes: Scopes<'a>,
    resolution: Resolution,
}

impl<'a> Checker<'a> {
    pub fn new(ast: &'a Ast) -> Self {
        Self {
            ast,
            funcs: IndexMap::new(),
            scopes: Scopes::new(),
            resolution: Resolution::default(),
        }
    }

    pub fn into_resolution(self) -> Resolution {
        self.resolution
    }

    fn scoped<F>(&mut self, f: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Error>,
    {
        self.scopes.push();
        let result = f(self);
        self.scopes.pop();
        result
    }

    fn declare(&mut self, var: VarId) -> Result<(), Error> {
        let ast = self.ast;
        let decl = &ast.vars[var];
        if self.scopes.declare(&decl.name, var) {
            Ok(())
        } else {
            Err(Error::DuplicateVariable {
                name: decl.name.clone(),
                pos: decl.pos,
            })
        }
    }

    fn block(&mut self, stmts: &'a [StmtId]) -> Result<(), Error> {
        self.scoped(|checker| {
            for &stmt in stmts {
                stmt.accept(checker.ast, checker, ())?;
            }
            Ok(())
        })
    }
}

impl<'a> Visitor<'a> for Checker<'a> {
    type DeclCtx = ();
    type DeclOut = ();
    type ExprCtx = ();
    type ExprOut = ();
    type Error = Error;

    fn visit_program(&mut self, ast: &'a Ast, _: ()) -> Result<(), Error> {
        for (id, _) in ast.funcs.iter_enumerated() {
            id.accept(ast, self, ())?;
        }
        Ok(())
    }

    fn visit_func(&mut self, id: FuncId, func: &'a FuncDecl, _: ()) -> Result<(), Error> {
        if self.funcs.contains_key(func.name.as_str()) {
            return Err(Error::DuplicateFunction {
                name: func.name.clone(),
                pos: func.pos,
            });
        }
        self.funcs.insert(&func.name, id);

        self.scoped(|checker| {
            for &param in &func.params {
                param.accept(checker.ast, checker, ()).map_err(|e| match e {
                    Error::DuplicateVariable { name, pos } => Error::DuplicateParameter {
                        name,
                        func: func.name.clone(),
                        pos,
                    },
                    e => e,
                })?;
            }
            for &stmt in &func.body {
                stmt.accept(checker.ast, checker, ())?;
            }
            Ok(())
        })
    }

    fn visit_param(&mut self, id: VarId, _: &'a VarDecl, _: ()) -> Result<(), Error> {
        self.declare(id)
    }

    fn visit_var_decl(&mut self, var: VarId, init: ExprId, _: ()) -> Result<(), Error> {
        self.declare(var)?;
        init.accept(self.ast, self, ())
    }

    fn visit_if(
        &mut self,
        cond: ExprId,
        then: &'a [StmtId],
        els: Option<&'a [StmtId]>,
        _: (),
    ) -> Result<(), Error> {
        cond.accept(self.ast, self, ())?;
        self.block(then)?;
        if let Some(els) = els {
            self.block(els)?;
        }
        Ok(())
    }

    fn visit_for(
        &mut self,
        var: VarId,
        init: ExprId,
        cond: ExprId,
        step: ExprId,
        body: &'a [StmtId],
        _: (),
    ) -> Result<(), Error> {
        self.scoped(|checker| {
            let ast = checker.ast;
            checker.declare(var)?;
            init.accept(ast, checker, ())?;
            cond.accept(ast, checker, ())?;
            step.accept(ast, checker, ())?;
            for &stmt in body {
                stmt.accept(ast, checker, ())?;
            }
            Ok(())
        })
    }

    fn visit_return(&mut self, value: Option<ExprId>, _: ()) -> Result<(), Error> {
        match value {
            Some(value) => value.accept(self.ast, self, ()),
            None => Ok(()),
        }
    }

    fn visit_expr_stmt(&mut self, expr: ExprId, _: ()) -> Result<(), Error> {
        expr.accept(self.ast, self, ())
    }

    fn visit_assign(&mut self, _: ExprId, target: ExprId, value: ExprId, _: ()) -> Result<(), Error> {
        target.accept(self.ast, self, ())?;
        value.accept(self.ast, self, ())
    }

    fn visit_binary(
        &mut self,
        _: ExprId,
        _: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
        _: (),
    ) -> Result<(), Error> {
        lhs.accept(self.ast, self, ())?;
        rhs.accept(self.ast, self, ())
    }

    fn visit_ident(
        &mut self,
        id: ExprId,
        name: &'a str,
        indices: &'a [ExprId],
        _: (),
    ) -> Result<(), Error> {
        let var = self
            .scopes
            .lookup(name)
            .ok_or_else(|| Error::UndefinedVariable {
                name: name.to_string(),
                pos: self.ast.expr_pos[id],
            })?;
        self.resolution.idents.insert(id, var);
        for &index in indices {
            index.accept(self.ast, self, ())?;
        }
        Ok(())
    }

    fn visit_literal(&mut self, _: ExprId, _: i32, _: ()) -> Result<(), Error> {
        Ok(())
    }

    fn visit_call(
        &mut self,
        id: ExprId,
        name: &'a str,
        args: &'a [ExprId],
        _: (),
    ) -> Result<(), Error> {
        let pos = self.ast.expr_pos[id];
        if self.scopes.lookup(name).is_some() {
            return Err(Error::NotAFunction {
                name: name.to_string(),
                pos,
            });
        }
        let func = *self.funcs.get(name).ok_or_else(|| Error::UndefinedFunction {
            name: name.to_string(),
            pos,
        })?;
        let arity = self.ast.funcs[func].params.len();
        if arity != args.len() {
            return Err(Error::ArityMismatch {
                name: name.to_string(),
                expected: arity,
                found: args.len(),
                pos,
            });
        }
        self.resolution.calls.insert(id, func);
        for &arg in args {
            arg.accept(self.ast, self, ())?;
        }
        Ok(())
    }
}
