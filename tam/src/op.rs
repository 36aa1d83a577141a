use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoPrimitive,
    TryFromPrimitive,
    Display,
)]
#[repr(u8)]
pub enum Opcode {
    LOAD = 0,
    LOADA = 1,
    LOADI = 2,
    LOADL = 3,
    STORE = 4,
    STOREI = 5,
    CALL = 6,
    CALLI = 7,
    RETURN = 8,
    PUSH = 10,
    POP = 11,
    JUMP = 12,
    JUMPI = 13,
    JUMPIF = 14,
    HALT = 15,
}

#[test]
fn test() {
    assert_eq!(u8::from(Opcode::RETURN), 8);
    assert_eq!(u8::from(Opcode::PUSH), 10);
    assert_eq!(Opcode::try_from(14u8).ok(), Some(Opcode::JUMPIF));
    assert!(Opcode::try_from(9u8).is_err());
    assert_eq!(Opcode::LOADL.to_string(), "LOADL");
}
