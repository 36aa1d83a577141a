pub mod inst;
pub mod machine;
pub mod op;
pub mod prim;
pub mod reg;

pub use inst::{read_program, write_program, DecodeError, Instruction};
pub use op::Opcode;
pub use prim::Prim;
pub use reg::Reg;
