mod address;
mod state;

pub use address::Address;
pub use state::CodeGenState;

use crate::check::Resolution;
use crate::error::{Error, Warning};
use crate::grammer::ast::{Ast, BinaryOp, Expr, ExprId, FuncDecl, FuncId, Stmt, StmtId, VarDecl, VarId};
use crate::grammer::visit::Visitor;
use std::collections::HashMap;
use tam::machine::{ADDRESS_SIZE, FALSE_REP, INTEGER_SIZE, LINK_DATA_SIZE};
use tam::{Instruction, Opcode, Prim, Reg};

/// Whether the value an expression computes is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eval {
    pub value_needed: bool,
}

impl Eval {
    pub const VALUE: Eval = Eval { value_needed: true };
    pub const EFFECT: Eval = Eval {
        value_needed: false,
    };
}

/// Addresses assigned during encoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub funcs: HashMap<FuncId, Address>,
    pub vars: HashMap<VarId, Address>,
}

#[derive(Debug)]
pub struct Object {
    pub code: Vec<Instruction>,
    pub layout: Layout,
    pub warnings: Vec<Warning>,
}

/// Generate TAM code for a checked program.
pub fn encode(ast: &Ast, resolution: &Resolution) -> Result<Object, Error> {
    let mut encoder = Encoder::new(ast, resolution);
    ast.accept(&mut encoder, Address::default())?;
    Ok(encoder.finish())
}

pub struct Encoder<'a> {
    ast: &'a Ast,
    resolution: &'a Resolution,
    state: CodeGenState,
    layout: Layout,
    level: usize,
    params: i32,
}

impl<'a> Encoder<'a> {
    pub fn new(ast: &'a Ast, resolution: &'a Resolution) -> Self {
        Self {
            ast,
            resolution,
            state: CodeGenState::new(),
            layout: Layout::default(),
            level: 0,
            params: 0,
        }
    }

    pub fn finish(self) -> Object {
        let (code, warnings) = self.state.into_parts();
        Object {
            code,
            layout: self.layout,
            warnings,
        }
    }

    fn emit(&mut self, op: Opcode, n: i32, r: Reg, d: i32) -> i32 {
        self.state.emit(op, n, r, d)
    }

    fn display_register(&mut self, level: usize) -> Reg {
        if level == 0 {
            return Reg::SB;
        }
        let up = self.level.saturating_sub(level);
        Reg::display(up).unwrap_or_else(|| {
            self.state.warn(Warning::NestingTooDeep(up));
            Reg::L6
        })
    }

    fn var_address(&self, var: VarId) -> Result<Address, Error> {
        self.layout
            .vars
            .get(&var)
            .copied()
            .ok_or_else(|| Error::Unresolved(self.ast.vars[var].name.clone()))
    }

    fn resolve_ident(&self, id: ExprId, name: &str) -> Result<VarId, Error> {
        self.resolution
            .ident(id)
            .ok_or_else(|| Error::Unresolved(name.to_string()))
    }

    /// Register and `d` operand of the variable at `addr`. Parameters lie
    /// below the frame's link data, locals above it.
    fn frame_operand(&mut self, addr: Address) -> (Reg, i32) {
        let r = self.display_register(addr.level);
        let d = match addr.level {
            0 => addr.displacement,
            _ if addr.displacement < self.params => addr.displacement - self.params,
            _ => LINK_DATA_SIZE + addr.displacement - self.params,
        };
        (r, d)
    }

    fn load(&mut self, addr: Address, size: i32) {
        let (r, d) = self.frame_operand(addr);
        self.emit(Opcode::LOAD, size, r, d);
    }

    fn store(&mut self, addr: Address, size: i32) {
        let (r, d) = self.frame_operand(addr);
        self.emit(Opcode::STORE, size, r, d);
    }

    /// Push the address of an element of the array referenced by `addr`.
    fn element_address(&mut self, addr: Address, indices: &'a [ExprId]) -> Result<(), Error> {
        self.load(addr, ADDRESS_SIZE);
        for &index in indices {
            index.accept(self.ast, self, Eval::VALUE)?;
            self.emit(Opcode::CALL, 0, Reg::PB, Prim::Add.displacement());
        }
        Ok(())
    }

    /// Bind `var` to `slot`, evaluate `init` and store it. Returns the next free slot.
    fn declare(&mut self, var: VarId, init: ExprId, slot: Address) -> Result<Address, Error> {
        let size = self.ast.vars[var].ty.size();
        self.layout.vars.insert(var, slot);
        init.accept(self.ast, self, Eval::VALUE)?;
        self.store(slot, size);
        Ok(slot.offset(size))
    }

    fn block(&mut self, stmts: &'a [StmtId], mut slot: Address) -> Result<Address, Error> {
        for &stmt in stmts {
            slot = stmt.accept(self.ast, self, slot)?;
        }
        Ok(slot)
    }
}

impl<'a> Visitor<'a> for Encoder<'a> {
    type DeclCtx = Address;
    type DeclOut = Address;
    type ExprCtx = Eval;
    type ExprOut = ();
    type Error = Error;

    fn visit_program(&mut self, ast: &'a Ast, mut frame: Address) -> Result<Address, Error> {
        let entry = self.emit(Opcode::JUMP, 0, Reg::CB, 0);

        for (id, _) in ast.funcs.iter_enumerated() {
            frame = id.accept(ast, self, frame)?;
        }

        let main = ast.entry().and_then(|id| self.layout.funcs.get(&id).copied());
        if frame.displacement > 0 {
            self.emit(Opcode::PUSH, 0, Reg::CB, frame.displacement);
        }
        let halt = self.emit(Opcode::HALT, 0, Reg::CB, 0);
        match main {
            Some(main) => self.state.patch(entry, main.displacement),
            None => {
                self.state.warn(Warning::MissingEntry);
                self.state.patch(entry, halt);
            }
        }
        Ok(frame)
    }

    fn visit_func(&mut self, id: FuncId, func: &'a FuncDecl, frame: Address) -> Result<Address, Error> {
        let ast = self.ast;
        let entry = Address::new(frame.level, self.state.next_address());
        self.layout.funcs.insert(id, entry);

        self.level += 1;
        let mut slot = frame.nested();
        for &param in &func.params {
            slot = param.accept(ast, self, slot)?;
        }
        self.params = slot.displacement;

        let locals = ast.locals_size(&func.body);
        if locals > 0 {
            self.emit(Opcode::PUSH, 0, Reg::CB, locals);
        }
        self.block(&func.body, slot)?;

        let returns = func
            .body
            .last()
            .is_some_and(|&stmt| matches!(ast.stmts[stmt], Stmt::Return(_)));
        if !returns {
            self.emit(Opcode::RETURN, 0, Reg::CB, self.params);
        }
        self.level -= 1;
        Ok(frame)
    }

    fn visit_param(&mut self, id: VarId, param: &'a VarDecl, slot: Address) -> Result<Address, Error> {
        self.layout.vars.insert(id, slot);
        Ok(slot.offset(param.ty.size()))
    }

    fn visit_var_decl(&mut self, var: VarId, init: ExprId, slot: Address) -> Result<Address, Error> {
        self.declare(var, init, slot)
    }

    fn visit_if(
        &mut self,
        cond: ExprId,
        then: &'a [StmtId],
        els: Option<&'a [StmtId]>,
        slot: Address,
    ) -> Result<Address, Error> {
        cond.accept(self.ast, self, Eval::VALUE)?;
        let jumpif = self.emit(Opcode::JUMPIF, FALSE_REP, Reg::CB, 0);
        let mut slot = self.block(then, slot)?;
        match els {
            None => {
                let next = self.state.next_address();
                self.state.patch(jumpif, next);
            }
            Some(els) => {
                let skip = self.emit(Opcode::JUMP, 0, Reg::CB, 0);
                let next = self.state.next_address();
                self.state.patch(jumpif, next);
                slot = self.block(els, slot)?;
                let next = self.state.next_address();
                self.state.patch(skip, next);
            }
        }
        Ok(slot)
    }

    fn visit_for(
        &mut self,
        var: VarId,
        init: ExprId,
        cond: ExprId,
        step: ExprId,
        body: &'a [StmtId],
        slot: Address,
    ) -> Result<Address, Error> {
        let slot = self.declare(var, init, slot)?;
        let head = self.state.next_address();
        cond.accept(self.ast, self, Eval::VALUE)?;
        let exit = self.emit(Opcode::JUMPIF, FALSE_REP, Reg::CB, 0);
        let slot = self.block(body, slot)?;
        step.accept(self.ast, self, Eval::EFFECT)?;
        self.emit(Opcode::JUMP, 0, Reg::CB, head);
        let next = self.state.next_address();
        self.state.patch(exit, next);
        Ok(slot)
    }

    fn visit_return(&mut self, value: Option<ExprId>, slot: Address) -> Result<Address, Error> {
        let n = match value {
            Some(value) => {
                value.accept(self.ast, self, Eval::VALUE)?;
                INTEGER_SIZE
            }
            None => 0,
        };
        self.emit(Opcode::RETURN, n, Reg::CB, self.params);
        Ok(slot)
    }

    fn visit_expr_stmt(&mut self, expr: ExprId, slot: Address) -> Result<Address, Error> {
        expr.accept(self.ast, self, Eval::EFFECT)?;
        Ok(slot)
    }

    fn visit_assign(&mut self, _: ExprId, target: ExprId, value: ExprId, eval: Eval) -> Result<(), Error> {
        let ast = self.ast;
        let Expr::Ident(name, indices) = &ast.exprs[target] else {
            return Err(Error::Unresolved("assignment target".to_string()));
        };
        let var = self.resolve_ident(target, name)?;
        let addr = self.var_address(var)?;
        let size = ast.vars[var].ty.size();

        value.accept(ast, self, Eval::VALUE)?;
        if indices.is_empty() {
            self.store(addr, size);
            if eval.value_needed {
                self.load(addr, size);
            }
        } else {
            if eval.value_needed {
                // Copy of the value stays below the element address
                self.emit(Opcode::LOAD, INTEGER_SIZE, Reg::ST, -INTEGER_SIZE);
            }
            self.element_address(addr, indices)?;
            self.emit(Opcode::STOREI, INTEGER_SIZE, Reg::CB, 0);
        }
        Ok(())
    }

    fn visit_binary(
        &mut self,
        _: ExprId,
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
        eval: Eval,
    ) -> Result<(), Error> {
        lhs.accept(self.ast, self, Eval::VALUE)?;
        rhs.accept(self.ast, self, Eval::VALUE)?;
        if eval.value_needed {
            self.emit(Opcode::CALL, 0, Reg::PB, op.prim().displacement());
        } else {
            self.emit(Opcode::POP, 0, Reg::CB, 2 * INTEGER_SIZE);
        }
        Ok(())
    }

    fn visit_ident(
        &mut self,
        id: ExprId,
        name: &'a str,
        indices: &'a [ExprId],
        eval: Eval,
    ) -> Result<(), Error> {
        let var = self.resolve_ident(id, name)?;
        let addr = self.var_address(var)?;
        if !eval.value_needed {
            for &index in indices {
                index.accept(self.ast, self, Eval::EFFECT)?;
            }
            return Ok(());
        }
        if indices.is_empty() {
            self.load(addr, self.ast.vars[var].ty.size());
        } else {
            self.element_address(addr, indices)?;
            self.emit(Opcode::LOADI, INTEGER_SIZE, Reg::CB, 0);
        }
        Ok(())
    }

    fn visit_literal(&mut self, _: ExprId, value: i32, eval: Eval) -> Result<(), Error> {
        if eval.value_needed {
            self.emit(Opcode::LOADL, 0, Reg::CB, value);
        }
        Ok(())
    }

    fn visit_call(
        &mut self,
        id: ExprId,
        name: &'a str,
        args: &'a [ExprId],
        eval: Eval,
    ) -> Result<(), Error> {
        let func = self
            .resolution
            .call(id)
            .ok_or_else(|| Error::Unresolved(name.to_string()))?;
        let callee = self
            .layout
            .funcs
            .get(&func)
            .copied()
            .ok_or_else(|| Error::Unresolved(name.to_string()))?;

        for &arg in args {
            arg.accept(self.ast, self, Eval::VALUE)?;
        }
        let link = self.display_register(callee.level);
        self.emit(Opcode::CALL, u8::from(link) as i32, Reg::CB, callee.displacement);

        if let Some(ret) = self.ast.funcs[func].ret {
            if !eval.value_needed {
                self.emit(Opcode::POP, 0, Reg::CB, ret.size());
            }
        }
        Ok(())
    }
}
