use super::ast::{Ast, BinaryOp, Expr, ExprId, FuncDecl, FuncId, Stmt, StmtId, TypeRef, VarDecl, VarId};
use super::parsercore::Parser;
use super::token::{Pos, Tier, Token, TokenKind::*};
use crate::error::Error;
use crate::{check, expect, optional, repeat};

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn parse(mut self) -> Result<Ast, Error> {
        self.parse_program()?;
        Ok(self.ast)
    }
}

impl<I: Iterator<Item = Token>> Parser<I> {
    fn alloc_expr(&mut self, expr: Expr, pos: Pos) -> ExprId {
        self.ast.push_expr(expr, pos)
    }

    /// program = { func-decl } EOF
    fn parse_program(&mut self) -> Result<(), Error> {
        while check!(self, KwFunc) {
            self.parse_func()?;
        }
        self.expect_tobe("function declaration", |token| token.kind == Eof)?;
        Ok(())
    }

    /// func-decl = "func" ( ident | "main" ) "(" [ param { "," param } ] ")" [ "->" type ] block
    fn parse_func(&mut self) -> Result<FuncId, Error> {
        expect!(self, KwFunc)?;
        let name = self.expect_tobe("function name", |token| matches!(token.kind, Ident | KwMain))?;
        expect!(self, LParen)?;
        let params = repeat!(self, self.parse_var(), Comma, RParen);
        expect!(self, RParen)?;
        let ret = optional!(self, Arrow, self.parse_type()?);
        let body = self.parse_block()?;
        Ok(self.ast.funcs.push_and_get_key(FuncDecl {
            name: name.spelling,
            params,
            ret,
            body,
            pos: name.pos,
        }))
    }

    /// param = type ident
    fn parse_var(&mut self) -> Result<VarId, Error> {
        let ty = self.parse_type()?;
        let name = expect!(self, Ident)?;
        Ok(self.ast.vars.push_and_get_key(VarDecl {
            ty,
            name: name.spelling,
            pos: name.pos,
        }))
    }

    /// type = "int" | "bool" | "char" | "array"
    fn parse_type(&mut self) -> Result<TypeRef, Error> {
        match self.peek().and_then(|token| TypeRef::from_token(token.kind)) {
            Some(ty) => {
                self.next();
                Ok(ty)
            }
            None => Err(self.unexpected("type")),
        }
    }

    /// block = "{" { stmt } "}"
    fn parse_block(&mut self) -> Result<Vec<StmtId>, Error> {
        expect!(self, LCurly)?;
        let stmts = repeat!(self, self.parse_stmt(), RCurly);
        expect!(self, RCurly)?;
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> Result<StmtId, Error> {
        let Some(kind) = self.peek().map(|token| token.kind) else {
            return Err(self.unexpected("statement"));
        };
        let stmt = match kind {
            // Variable declaration: type ident ":=" expr ";"
            _ if kind.is_type() => {
                let var = self.parse_var()?;
                expect!(self, ColonEqual)?;
                let init = self.parse_expr()?;
                expect!(self, Semicolon)?;
                Stmt::Var(var, init)
            }

            // Conditional statement: "if" expr block [ "else" block ]
            KwIf => {
                expect!(self, KwIf)?;
                let cond = self.parse_expr()?;
                let then = self.parse_block()?;
                let els = optional!(self, KwElse, self.parse_block()?);
                Stmt::If(cond, then, els)
            }

            // Loop statement: "for" type ident ":=" expr ";" expr ";" expr block
            KwFor => {
                expect!(self, KwFor)?;
                let var = self.parse_var()?;
                expect!(self, ColonEqual)?;
                let init = self.parse_expr()?;
                expect!(self, Semicolon)?;
                let cond = self.parse_expr()?;
                expect!(self, Semicolon)?;
                let step = self.parse_expr()?;
                let body = self.parse_block()?;
                Stmt::For(var, init, cond, step, body)
            }

            // Return statement: "return" [ expr ] ";"
            KwReturn => {
                expect!(self, KwReturn)?;
                let value = if !check!(self, Semicolon) {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                expect!(self, Semicolon)?;
                Stmt::Return(value)
            }

            // Expression statement: expr ";"
            _ => {
                let expr = self.parse_expr()?;
                expect!(self, Semicolon)?;
                Stmt::Expr(expr)
            }
        };
        Ok(self.ast.stmts.push_and_get_key(stmt))
    }

    /// expr = expr1 [ ( ":=" | "+=" | "-=" | "*=" | "/=" | "%=" ) expr1 ]
    fn parse_expr(&mut self) -> Result<ExprId, Error> {
        let target = self.parse_expr1()?;
        let Some(token) = self.consume_if(|token| token.kind.tier() == Some(Tier::Assign)) else {
            return Ok(target);
        };
        if !matches!(self.ast.exprs[target], Expr::Ident(..)) {
            return Err(Error::InvalidAssignTarget { pos: token.pos });
        }
        let mut value = self.parse_expr1()?;
        // Compound assignment: x op= e  =>  x := x op e
        if let Some(op) = BinaryOp::from_token(token.kind) {
            let lhs = self.ast.deep_clone(target);
            value = self.alloc_expr(Expr::Binary(op, lhs, value), token.pos);
        }
        Ok(self.alloc_expr(Expr::Assign(target, value), token.pos))
    }

    /// expr1 = expr2 { ( "&&" | "||" ) expr2 }
    fn parse_expr1(&mut self) -> Result<ExprId, Error> {
        self.parse_binary(Tier::L1, Self::parse_expr2)
    }

    /// expr2 = expr3 { ( "==" | "!=" | "<" | "<=" | ">" | ">=" ) expr3 }
    fn parse_expr2(&mut self) -> Result<ExprId, Error> {
        self.parse_binary(Tier::L2, Self::parse_expr3)
    }

    /// expr3 = expr4 { ( "+" | "-" ) expr4 }
    fn parse_expr3(&mut self) -> Result<ExprId, Error> {
        self.parse_binary(Tier::L3, Self::parse_expr4)
    }

    /// expr4 = primary { ( "*" | "/" | "%" ) primary }
    fn parse_expr4(&mut self) -> Result<ExprId, Error> {
        self.parse_binary(Tier::L4, Self::parse_primary)
    }

    /// Left-associative chain of `operand`s joined by operators of `tier`.
    fn parse_binary(
        &mut self,
        tier: Tier,
        operand: fn(&mut Self) -> Result<ExprId, Error>,
    ) -> Result<ExprId, Error> {
        let mut lhs = operand(self)?;
        while let Some((op, pos)) = self.binary_op(tier) {
            let rhs = operand(self)?;
            lhs = self.alloc_expr(Expr::Binary(op, lhs, rhs), pos);
        }
        Ok(lhs)
    }

    fn binary_op(&mut self, tier: Tier) -> Option<(BinaryOp, Pos)> {
        let op = self
            .peek()
            .filter(|token| token.kind.tier() == Some(tier))
            .and_then(|token| Some((BinaryOp::from_token(token.kind)?, token.pos)))?;
        self.next();
        Some(op)
    }

    /// primary = "(" expr ")" | ident [ "[" expr "]" | "(" [ expr { "," expr } ] ")" ] | integer
    fn parse_primary(&mut self) -> Result<ExprId, Error> {
        let Some((kind, pos)) = self.peek().map(|token| (token.kind, token.pos)) else {
            return Err(self.unexpected("expression"));
        };
        let expr = match kind {
            // Parenthesized expression: "(" expr ")"
            LParen => {
                expect!(self, LParen)?;
                let inner = self.parse_expr()?;
                expect!(self, RParen)?;
                return Ok(inner);
            }

            Ident => {
                let name = expect!(self, Ident)?.spelling;
                if check!(self, LParen) {
                    // Function call: ident "(" [ expr { "," expr } ] ")"
                    expect!(self, LParen)?;
                    let args = repeat!(self, self.parse_expr(), Comma, RParen);
                    expect!(self, RParen)?;
                    Expr::Call(name, args)
                } else if check!(self, LBracket) {
                    // Array access: ident "[" expr "]"
                    expect!(self, LBracket)?;
                    let index = self.parse_expr()?;
                    expect!(self, RBracket)?;
                    Expr::Ident(name, vec![index])
                } else {
                    // Variable: ident
                    Expr::Ident(name, Vec::new())
                }
            }

            // Integer literal
            Number => {
                let token = expect!(self, Number)?;
                match token.spelling.parse::<i32>() {
                    Ok(value) => Expr::Literal(value),
                    Err(_) => {
                        return Err(Error::InvalidLiteral {
                            spelling: token.spelling,
                            pos: token.pos,
                        })
                    }
                }
            }

            _ => return Err(self.unexpected("expression")),
        };
        Ok(self.alloc_expr(expr, pos))
    }
}
