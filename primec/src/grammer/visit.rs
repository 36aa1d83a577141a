use super::ast::{Ast, BinaryOp, Expr, ExprId, FuncDecl, FuncId, Stmt, StmtId, VarDecl, VarId};

/// A pass over the AST. Declarations and statements are visited with `DeclCtx`,
/// expressions with `ExprCtx`.
pub trait Visitor<'a> {
    type DeclCtx;
    type DeclOut;
    type ExprCtx;
    type ExprOut;
    type Error;

    fn visit_program(
        &mut self,
        ast: &'a Ast,
        ctx: Self::DeclCtx,
    ) -> Result<Self::DeclOut, Self::Error>;

    fn visit_func(
        &mut self,
        id: FuncId,
        func: &'a FuncDecl,
        ctx: Self::DeclCtx,
    ) -> Result<Self::DeclOut, Self::Error>;

    fn visit_param(
        &mut self,
        id: VarId,
        param: &'a VarDecl,
        ctx: Self::DeclCtx,
    ) -> Result<Self::DeclOut, Self::Error>;

    fn visit_var_decl(
        &mut self,
        var: VarId,
        init: ExprId,
        ctx: Self::DeclCtx,
    ) -> Result<Self::DeclOut, Self::Error>;

    fn visit_if(
        &mut self,
        cond: ExprId,
        then: &'a [StmtId],
        els: Option<&'a [StmtId]>,
        ctx: Self::DeclCtx,
    ) -> Result<Self::DeclOut, Self::Error>;

    fn visit_for(
        &mut self,
        var: VarId,
        init: ExprId,
        cond: ExprId,
        step: ExprId,
        body: &'a [StmtId],
        ctx: Self::DeclCtx,
    ) -> Result<Self::DeclOut, Self::Error>;

    fn visit_return(
        &mut self,
        value: Option<ExprId>,
        ctx: Self::DeclCtx,
    ) -> Result<Self::DeclOut, Self::Error>;

    fn visit_expr_stmt(
        &mut self,
        expr: ExprId,
        ctx: Self::DeclCtx,
    ) -> Result<Self::DeclOut, Self::Error>;

    fn visit_assign(
        &mut self,
        id: ExprId,
        target: ExprId,
        value: ExprId,
        ctx: Self::ExprCtx,
    ) -> Result<Self::ExprOut, Self::Error>;

    fn visit_binary(
        &mut self,
        id: ExprId,
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
        ctx: Self::ExprCtx,
    ) -> Result<Self::ExprOut, Self::Error>;

    fn visit_ident(
        &mut self,
        id: ExprId,
        name: &'a str,
        indices: &'a [ExprId],
        ctx: Self::ExprCtx,
    ) -> Result<Self::ExprOut, Self::Error>;

    fn visit_literal(
        &mut self,
        id: ExprId,
        value: i32,
        ctx: Self::ExprCtx,
    ) -> Result<Self::ExprOut, Self::Error>;

    fn visit_call(
        &mut self,
        id: ExprId,
        name: &'a str,
        args: &'a [ExprId],
        ctx: Self::ExprCtx,
    ) -> Result<Self::ExprOut, Self::Error>;
}

impl Ast {
    pub fn accept<'a, V: Visitor<'a>>(
        &'a self,
        visitor: &mut V,
        ctx: V::DeclCtx,
    ) -> Result<V::DeclOut, V::Error> {
        visitor.visit_program(self, ctx)
    }
}

impl FuncId {
    pub fn accept<'a, V: Visitor<'a>>(
        self,
        ast: &'a Ast,
        visitor: &mut V,
        ctx: V::DeclCtx,
    ) -> Result<V::DeclOut, V::Error> {
        visitor.visit_func(self, &ast.funcs[self], ctx)
    }
}

impl VarId {
    pub fn accept<'a, V: Visitor<'a>>(
        self,
        ast: &'a Ast,
        visitor: &mut V,
        ctx: V::DeclCtx,
    ) -> Result<V::DeclOut, V::Error> {
        visitor.visit_param(self, &ast.vars[self], ctx)
    }
}

impl StmtId {
    pub fn accept<'a, V: Visitor<'a>>(
        self,
        ast: &'a Ast,
        visitor: &mut V,
        ctx: V::DeclCtx,
    ) -> Result<V::DeclOut, V::Error> {
        match &ast.stmts[self] {
            Stmt::Var(var, init) => visitor.visit_var_decl(*var, *init, ctx),
            Stmt::If(cond, then, els) => visitor.visit_if(*cond, then, els.as_deref(), ctx),
            Stmt::For(var, init, cond, step, body) => {
                visitor.visit_for(*var, *init, *cond, *step, body, ctx)
            }
            Stmt::Return(value) => visitor.visit_return(*value, ctx),
            Stmt::Expr(expr) => visitor.visit_expr_stmt(*expr, ctx),
        }
    }
}

impl ExprId {
    pub fn accept<'a, V: Visitor<'a>>(
        self,
        ast: &'a Ast,
        visitor: &mut V,
        ctx: V::ExprCtx,
    ) -> Result<V::ExprOut, V::Error> {
        match &ast.exprs[self] {
            Expr::Assign(target, value) => visitor.visit_assign(self, *target, *value, ctx),
            Expr::Binary(op, lhs, rhs) => visitor.visit_binary(self, *op, *lhs, *rhs, ctx),
            Expr::Ident(name, indices) => visitor.visit_ident(self, name, indices, ctx),
            Expr::Literal(value) => visitor.visit_literal(self, *value, ctx),
            Expr::Call(name, args) => visitor.visit_call(self, name, args, ctx),
        }
    }
}
