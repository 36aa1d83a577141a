use serde::Serialize;
use std::fmt;

/// Lexical address. For functions `displacement` is the code address of the
/// first instruction, for variables the frame slot after the link data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Address {
    pub level: usize,
    pub displacement: i32,
}

impl Address {
    pub fn new(level: usize, displacement: i32) -> Self {
        Self {
            level,
            displacement,
        }
    }

    /// Same level, `increment` words further.
    pub fn offset(self, increment: i32) -> Self {
        Self::new(self.level, self.displacement + increment)
    }

    /// First slot of a frame one level deeper.
    pub fn nested(self) -> Self {
        Self::new(self.level + 1, 0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level={} displacement={}", self.level, self.displacement)
    }
}
