use crate::error::Warning;
use tam::machine::{CB, MAX_D, MAX_N, MIN_D, PB};
use tam::{Instruction, Opcode, Reg};

/// Code segment under construction. One per compilation.
#[derive(Debug, Default)]
pub struct CodeGenState {
    code: Vec<Instruction>,
    dropped: usize,
    warnings: Vec<Warning>,
}

impl CodeGenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Address the next emitted instruction gets.
    pub fn next_address(&self) -> i32 {
        CB + (self.code.len() + self.dropped) as i32
    }

    /// Append an instruction and return its address. Operands outside the
    /// machine's field widths are clamped. Past the end of the code store the
    /// instruction is dropped, but still takes an address.
    pub fn emit(&mut self, op: Opcode, n: i32, r: Reg, d: i32) -> i32 {
        let addr = self.next_address();
        let n = self.clamp('n', n, 0, MAX_N);
        let d = self.clamp('d', d, MIN_D, MAX_D);
        if addr >= PB {
            if self.dropped == 0 {
                self.warn(Warning::ProgramTooLarge(PB - CB));
            }
            self.dropped += 1;
        } else {
            self.code.push(Instruction::new(op, n, r, d));
        }
        addr
    }

    /// Rewrite `d` of the instruction at `addr`. Dropped instructions are ignored.
    pub fn patch(&mut self, addr: i32, d: i32) {
        let d = self.clamp('d', d, MIN_D, MAX_D);
        let slot = usize::try_from(addr - CB)
            .ok()
            .and_then(|idx| self.code.get_mut(idx));
        if let Some(inst) = slot {
            inst.d = d;
        }
    }

    pub fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    pub fn into_parts(self) -> (Vec<Instruction>, Vec<Warning>) {
        (self.code, self.warnings)
    }

    fn clamp(&mut self, field: char, value: i32, min: i32, max: i32) -> i32 {
        let clamped = value.clamp(min, max);
        if clamped != value {
            self.warn(Warning::OperandTooWide {
                field,
                value,
                clamped,
            });
        }
        clamped
    }
}
