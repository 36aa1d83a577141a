use crate::{op::Opcode, prim::Prim, reg::Reg};
use color_print::cformat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Read, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Unknown opcode: {0}")]
    UnknownOpcode(i32),

    #[error("Unknown register: {0}")]
    UnknownRegister(i32),

    #[error("Truncated instruction record: {0} of {1} bytes")]
    Truncated(usize, usize),
}

/// One fixed-width TAM instruction: `op`, register `r`, length `n`, displacement `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub op: Opcode,
    pub r: Reg,
    pub n: i32,
    pub d: i32,
}

impl Instruction {
    /// Record size in the object file: four little-endian i32 words.
    pub const SIZE: usize = 16;

    pub fn new(op: Opcode, n: i32, r: Reg, d: i32) -> Self {
        Self { op, r, n, d }
    }

    pub fn to_bin(&self) -> [u8; Self::SIZE] {
        let words = [u8::from(self.op) as i32, u8::from(self.r) as i32, self.n, self.d];
        let mut bin = [0u8; Self::SIZE];
        for (chunk, word) in bin.chunks_exact_mut(4).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        bin
    }

    pub fn from_bin(bin: &[u8; Self::SIZE]) -> Result<Self, DecodeError> {
        let word = |i: usize| i32::from_le_bytes([bin[i], bin[i + 1], bin[i + 2], bin[i + 3]]);
        let (op, r, n, d) = (word(0), word(4), word(8), word(12));
        let op = u8::try_from(op)
            .ok()
            .and_then(|op| Opcode::try_from(op).ok())
            .ok_or(DecodeError::UnknownOpcode(op))?;
        let r = u8::try_from(r)
            .ok()
            .and_then(|r| Reg::try_from(r).ok())
            .ok_or(DecodeError::UnknownRegister(r))?;
        Ok(Self { op, r, n, d })
    }

    pub fn write<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.to_bin())
    }

    /// Read the next record. `Ok(None)` on a clean end of stream.
    pub fn read<R: Read>(input: &mut R) -> Result<Option<Self>, DecodeError> {
        let mut bin = [0u8; Self::SIZE];
        let mut filled = 0;
        while filled < Self::SIZE {
            match input.read(&mut bin[filled..]) {
                Ok(0) if filled == 0 => return Ok(None),
                Ok(0) => return Err(DecodeError::Truncated(filled, Self::SIZE)),
                Ok(k) => filled += k,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Self::from_bin(&bin).map(Some)
    }
}

pub fn write_program<W: Write>(out: &mut W, code: &[Instruction]) -> io::Result<()> {
    for inst in code {
        inst.write(out)?;
    }
    out.flush()
}

pub fn read_program<R: Read>(input: &mut R) -> Result<Vec<Instruction>, DecodeError> {
    let mut code = Vec::new();
    while let Some(inst) = Instruction::read(input)? {
        code.push(inst);
    }
    Ok(code)
}

// ----------------------------------------------------------------------------
// TAM assembly notation
// ----------------------------------------------------------------------------

impl Instruction {
    fn operands(&self) -> String {
        use Opcode::*;
        let Instruction { op, r, n, d } = *self;
        match op {
            LOAD | STORE => format!("({n}) {d}[{r}]"),
            LOADA | JUMP => format!("{d}[{r}]"),
            LOADI | STOREI => format!("({n})"),
            LOADL | PUSH => format!("{d}"),
            CALL if r == Reg::PB => match Prim::from_displacement(d) {
                Some(prim) => format!("{prim}"),
                None => format!("({n}) {d}[{r}]"),
            },
            CALL => match u8::try_from(n).ok().and_then(|n| Reg::try_from(n).ok()) {
                Some(link) => format!("({link}) {d}[{r}]"),
                None => format!("({n}) {d}[{r}]"),
            },
            RETURN | POP => format!("({n}) {d}"),
            JUMPIF => format!("({n}) {d}[{r}]"),
            CALLI | JUMPI | HALT => String::new(),
        }
    }

    pub fn cformat(&self) -> String {
        cformat!("<r>{:<7}</><b>{}</>", self.op.to_string(), self.operands())
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operands = self.operands();
        if operands.is_empty() {
            write!(f, "{}", self.op)
        } else {
            write!(f, "{} {}", self.op, operands)
        }
    }
}
