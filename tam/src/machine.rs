// Code store
pub const CB: i32 = 0;
/// Upper bound of the code store + 1. Primitive routines live at `PB + d`.
pub const PB: i32 = 1024;

// Operand widths
pub const MAX_N: i32 = 255;
pub const MIN_D: i32 = i16::MIN as i32;
pub const MAX_D: i32 = i16::MAX as i32;

/// Static levels reachable through `LB`..`L6`.
pub const MAX_DISPLAY_DISTANCE: usize = 6;

// Data representation
pub const BOOLEAN_SIZE: i32 = 1;
pub const CHARACTER_SIZE: i32 = 1;
pub const INTEGER_SIZE: i32 = 1;
pub const ADDRESS_SIZE: i32 = 1;
pub const LINK_DATA_SIZE: i32 = 3 * ADDRESS_SIZE;
pub const FALSE_REP: i32 = 0;
