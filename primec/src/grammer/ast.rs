use super::token::{Pos, TokenKind};
use derive_more::derive::{From, Into};
use tam::machine::{ADDRESS_SIZE, BOOLEAN_SIZE, CHARACTER_SIZE, INTEGER_SIZE};
use tam::Prim;
use typed_index_collections::TiVec;

/// Name of the function the program starts in.
pub const ENTRY: &str = "main";

#[derive(From, Into, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FuncId(usize);

#[derive(From, Into, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

#[derive(From, Into, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StmtId(usize);

#[derive(From, Into, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(usize);

/// Node arenas. `funcs` is the program: function declarations in source order.
/// Every id is referenced by exactly one parent node.
#[derive(Debug, Clone, Default)]
pub struct Ast {
    pub funcs: TiVec<FuncId, FuncDecl>,
    pub vars: TiVec<VarId, VarDecl>,
    pub stmts: TiVec<StmtId, Stmt>,
    pub exprs: TiVec<ExprId, Expr>,
    pub expr_pos: TiVec<ExprId, Pos>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: String,
    pub params: Vec<VarId>,
    pub ret: Option<TypeRef>,
    pub body: Vec<StmtId>,
    pub pos: Pos,
} // "func" ( ident | "main" ) "(" [ param { "," param } ] ")" [ "->" type ] block

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub ty: TypeRef,
    pub name: String,
    pub pos: Pos,
} // type ident

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRef {
    Int,   // "int"
    Bool,  // "bool"
    Char,  // "char"
    Array, // "array"
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Var(VarId, ExprId),                              // type ident ":=" expr ";"
    If(ExprId, Vec<StmtId>, Option<Vec<StmtId>>),    // "if" expr block [ "else" block ]
    For(VarId, ExprId, ExprId, ExprId, Vec<StmtId>), // "for" type ident ":=" expr ";" expr ";" expr block
    Return(Option<ExprId>),                          // "return" [ expr ] ";"
    Expr(ExprId),                                    // expr ";"
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Assign(ExprId, ExprId),           // ident [ "[" expr "]" ] ":=" expr
    Binary(BinaryOp, ExprId, ExprId), // expr op expr
    Ident(String, Vec<ExprId>),       // ident [ "[" expr "]" ]
    Literal(i32),                     // integer
    Call(String, Vec<ExprId>),        // ident "(" [ expr { "," expr } ] ")"
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    And, // "&&"
    Or,  // "||"
    Eq,  // "=="
    Ne,  // "!="
    Lt,  // "<"
    Le,  // "<="
    Gt,  // ">"
    Ge,  // ">="
    Add, // "+"
    Sub, // "-"
    Mul, // "*"
    Div, // "/"
    Mod, // "%"
}

impl TypeRef {
    pub fn from_token(kind: TokenKind) -> Option<TypeRef> {
        match kind {
            TokenKind::KwInt => Some(TypeRef::Int),
            TokenKind::KwBool => Some(TypeRef::Bool),
            TokenKind::KwChar => Some(TypeRef::Char),
            TokenKind::KwArray => Some(TypeRef::Array),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TypeRef::Int => "int",
            TypeRef::Bool => "bool",
            TypeRef::Char => "char",
            TypeRef::Array => "array",
        }
    }

    /// Words occupied in a frame. Arrays are held by reference.
    pub fn size(self) -> i32 {
        match self {
            TypeRef::Int => INTEGER_SIZE,
            TypeRef::Bool => BOOLEAN_SIZE,
            TypeRef::Char => CHARACTER_SIZE,
            TypeRef::Array => ADDRESS_SIZE,
        }
    }
}

impl BinaryOp {
    /// Binary operator spelled by `kind`, including the operator part of `op=`.
    pub fn from_token(kind: TokenKind) -> Option<BinaryOp> {
        use TokenKind::*;
        match kind {
            AmpAmp => Some(BinaryOp::And),
            PipePipe => Some(BinaryOp::Or),
            EqualEqual => Some(BinaryOp::Eq),
            ExclEqual => Some(BinaryOp::Ne),
            LAngle => Some(BinaryOp::Lt),
            LAngleEqual => Some(BinaryOp::Le),
            RAngle => Some(BinaryOp::Gt),
            RAngleEqual => Some(BinaryOp::Ge),
            Plus | PlusEqual => Some(BinaryOp::Add),
            Minus | MinusEqual => Some(BinaryOp::Sub),
            Star | StarEqual => Some(BinaryOp::Mul),
            Slash | SlashEqual => Some(BinaryOp::Div),
            Percent | PercentEqual => Some(BinaryOp::Mod),
            _ => None,
        }
    }

    pub fn spelling(self) -> &'static str {
        match self {
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }

    pub fn prim(self) -> Prim {
        match self {
            BinaryOp::And => Prim::And,
            BinaryOp::Or => Prim::Or,
            BinaryOp::Eq => Prim::Eq,
            BinaryOp::Ne => Prim::Ne,
            BinaryOp::Lt => Prim::Lt,
            BinaryOp::Le => Prim::Le,
            BinaryOp::Gt => Prim::Gt,
            BinaryOp::Ge => Prim::Ge,
            BinaryOp::Add => Prim::Add,
            BinaryOp::Sub => Prim::Sub,
            BinaryOp::Mul => Prim::Mult,
            BinaryOp::Div => Prim::Div,
            BinaryOp::Mod => Prim::Mod,
        }
    }
}

impl Ast {
    pub fn entry(&self) -> Option<FuncId> {
        self.funcs
            .iter_enumerated()
            .find(|(_, func)| func.name == ENTRY)
            .map(|(id, _)| id)
    }

    /// Allocate an expression node starting at `pos`.
    pub fn push_expr(&mut self, expr: Expr, pos: Pos) -> ExprId {
        self.expr_pos.push(pos);
        self.exprs.push_and_get_key(expr)
    }

    /// Copy the expression tree under `id` into fresh nodes.
    pub fn deep_clone(&mut self, id: ExprId) -> ExprId {
        let pos = self.expr_pos[id];
        let expr = match self.exprs[id].clone() {
            Expr::Assign(target, value) => {
                Expr::Assign(self.deep_clone(target), self.deep_clone(value))
            }
            Expr::Binary(op, lhs, rhs) => Expr::Binary(op, self.deep_clone(lhs), self.deep_clone(rhs)),
            Expr::Ident(name, indices) => {
                Expr::Ident(name, indices.into_iter().map(|i| self.deep_clone(i)).collect())
            }
            Expr::Call(name, args) => {
                Expr::Call(name, args.into_iter().map(|a| self.deep_clone(a)).collect())
            }
            lit @ Expr::Literal(_) => lit,
        };
        self.push_expr(expr, pos)
    }

    /// Frame words taken by the variables declared anywhere in `body`.
    pub fn locals_size(&self, body: &[StmtId]) -> i32 {
        body.iter()
            .map(|&stmt| match &self.stmts[stmt] {
                Stmt::Var(var, _) => self.vars[*var].ty.size(),
                Stmt::If(_, then, els) => {
                    self.locals_size(then) + els.as_deref().map_or(0, |els| self.locals_size(els))
                }
                Stmt::For(var, _, _, _, body) => self.vars[*var].ty.size() + self.locals_size(body),
                Stmt::Return(_) | Stmt::Expr(_) => 0,
            })
            .sum()
    }

    /// Parameters and locals of `func` in declaration order.
    pub fn declared_vars(&self, func: FuncId) -> Vec<VarId> {
        let mut vars = self.funcs[func].params.clone();
        self.collect_vars(&self.funcs[func].body, &mut vars);
        vars
    }

    fn collect_vars(&self, body: &[StmtId], vars: &mut Vec<VarId>) {
        for &stmt in body {
            match &self.stmts[stmt] {
                Stmt::Var(var, _) => vars.push(*var),
                Stmt::If(_, then, els) => {
                    self.collect_vars(then, vars);
                    if let Some(els) = els {
                        self.collect_vars(els, vars);
                    }
                }
                Stmt::For(var, _, _, _, body) => {
                    vars.push(*var);
                    self.collect_vars(body, vars);
                }
                Stmt::Return(_) | Stmt::Expr(_) => {}
            }
        }
    }
}
