use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::machine::MAX_DISPLAY_DISTANCE;

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
pub enum Reg {
    CB = 0,
    CT,
    PB,
    PT,
    SB,
    ST,
    HB,
    HT,
    LB,
    L1,
    L2,
    L3,
    L4,
    L5,
    L6,
    CP,
}

impl Reg {
    /// Display register of the frame `up` static levels above the current one.
    /// `None` once `up` exceeds the registers the machine provides.
    pub fn display(up: usize) -> Option<Reg> {
        if up > MAX_DISPLAY_DISTANCE {
            return None;
        }
        Reg::try_from(u8::from(Reg::LB) + up as u8).ok()
    }
}

#[test]
fn test() {
    assert_eq!(Reg::display(0), Some(Reg::LB));
    assert_eq!(Reg::display(3), Some(Reg::L3));
    assert_eq!(Reg::display(6), Some(Reg::L6));
    assert_eq!(Reg::display(7), None);
    assert_eq!(u8::from(Reg::CP), 15);
    assert_eq!(Reg::SB.to_string(), "SB");
}
