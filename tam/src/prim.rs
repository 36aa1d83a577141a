use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Primitive routines, addressed as `d[PB]` by their discriminant.
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
#[strum(serialize_all = "lowercase")]
pub enum Prim {
    Id = 1,
    Not,
    And,
    Or,
    Succ,
    Pred,
    Neg,
    Add,
    Sub,
    Mult,
    Div,
    Mod,
    Lt,
    Le,
    Ge,
    Gt,
    Eq,
    Ne,
    Eol,
    Eof,
    Get,
    Put,
    Geteol,
    Puteol,
    Getint,
    Putint,
    New,
    Dispose,
}

impl Prim {
    pub fn displacement(self) -> i32 {
        u8::from(self) as i32
    }

    pub fn from_displacement(d: i32) -> Option<Prim> {
        u8::try_from(d).ok().and_then(|d| Prim::try_from(d).ok())
    }
}

#[test]
fn test() {
    assert_eq!(Prim::Id.displacement(), 1);
    assert_eq!(Prim::Add.displacement(), 8);
    assert_eq!(Prim::Ne.displacement(), 18);
    assert_eq!(Prim::Dispose.displacement(), 28);
    assert_eq!(Prim::from_displacement(10), Some(Prim::Mult));
    assert_eq!(Prim::from_displacement(0), None);
    assert_eq!(Prim::from_displacement(300), None);
    assert_eq!(Prim::Putint.to_string(), "putint");
}
