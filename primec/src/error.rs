use crate::grammer::token::Pos;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // Syntax errors
    #[error("Syntax error at {pos}: expected {expected} but found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        pos: Pos,
    },

    #[error("Syntax error at {pos}: invalid character '{ch}'")]
    InvalidCharacter { ch: String, pos: Pos },

    #[error("Syntax error at {pos}: only a variable can be assigned to")]
    InvalidAssignTarget { pos: Pos },

    #[error("Syntax error at {pos}: integer literal {spelling} is out of range")]
    InvalidLiteral { spelling: String, pos: Pos },

    // Semantic errors
    #[error("Duplicate function: {name}")]
    DuplicateFunction { name: String, pos: Pos },

    #[error("Duplicate parameter {name} in function {func}")]
    DuplicateParameter { name: String, func: String, pos: Pos },

    #[error("Duplicate variable: {name}")]
    DuplicateVariable { name: String, pos: Pos },

    #[error("Undefined variable: {name}")]
    UndefinedVariable { name: String, pos: Pos },

    #[error("Undefined function: {name}")]
    UndefinedFunction { name: String, pos: Pos },

    #[error("{name} is not a function")]
    NotAFunction { name: String, pos: Pos },

    #[error("Function {name} takes {expected} arguments but {found} were given")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
        pos: Pos,
    },

    // Code generation errors
    #[error("Unresolved name: {0}")]
    Unresolved(String),

    #[error("Aborted due to {0} warning(s)")]
    DeniedWarnings(usize),
}

impl Error {
    /// Source position for syntax and semantic errors.
    pub fn pos(&self) -> Option<Pos> {
        match self {
            Error::UnexpectedToken { pos, .. }
            | Error::InvalidCharacter { pos, .. }
            | Error::InvalidAssignTarget { pos }
            | Error::InvalidLiteral { pos, .. }
            | Error::DuplicateFunction { pos, .. }
            | Error::DuplicateParameter { pos, .. }
            | Error::DuplicateVariable { pos, .. }
            | Error::UndefinedVariable { pos, .. }
            | Error::UndefinedFunction { pos, .. }
            | Error::NotAFunction { pos, .. }
            | Error::ArityMismatch { pos, .. } => Some(*pos),
            _ => None,
        }
    }
}

/// Recoverable code generation problems. The instruction is still emitted
/// (clamped) or dropped, and compilation continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    #[error("Operand {field} = {value} does not fit, clamped to {clamped}")]
    OperandTooWide {
        field: char,
        value: i32,
        clamped: i32,
    },

    #[error("Program exceeds the code store of {0} instructions, further code is dropped")]
    ProgramTooLarge(i32),

    #[error("Accessing across too many levels: {0}")]
    NestingTooDeep(usize),

    #[error("No entry function main, the program halts immediately")]
    MissingEntry,
}
