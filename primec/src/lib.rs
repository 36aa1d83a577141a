pub mod check;
pub mod encode;
pub mod error;
pub mod grammer;
pub mod util;

pub use check::{check, Checker, Resolution};
pub use encode::{encode, Address, CodeGenState, Encoder, Eval, Layout, Object};
pub use error::{Error, Warning};
pub use grammer::ast::Ast;
pub use grammer::lexer::Lexer;
pub use grammer::parsercore::Parser;

pub fn parse(code: &str) -> Result<Ast, Error> {
    Parser::new(Lexer::new(code)).parse()
}

/// Parse, check and encode `code`.
pub fn compile(code: &str) -> Result<(Ast, Object), Error> {
    let ast = parse(code)?;
    let resolution = check(&ast)?;
    let object = encode(&ast, &resolution)?;
    Ok((ast, object))
}
