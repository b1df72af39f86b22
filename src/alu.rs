/*!
  The arithmetic logic unit and the flag register it writes.

  The flag register keeps the bit encoding of an LS-8 style `FL` register, `0b00000LGE`, but it
  is not a bitmask: every comparison overwrites the whole register, so exactly one condition is
  recorded at a time. It is therefore modeled as an enum whose discriminants are the legacy bits.
*/

use std::cmp::Ordering;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::{Display as StrumDisplay, EnumString, IntoStaticStr};

use crate::error::VmError;
use crate::memory::Byte;

#[derive(
  StrumDisplay, IntoStaticStr, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,          Eq, PartialEq,    Debug,          Hash
)]
#[repr(u8)]
pub enum Flag {
  None        = 0b000,
  Equal       = 0b001,
  GreaterThan = 0b010,
  LessThan    = 0b100,
}

impl Default for Flag {
  // A freshly reset machine reports `Equal`, so a `JEQ` before any `CMP` is taken.
  fn default() -> Self {
    Flag::Equal
  }
}

impl Flag {
  pub fn bits(&self) -> u8 {
    Into::<u8>::into(*self)
  }
}

/**
  Operations an LS-8 style ALU is wired for. Only `Cmp` is implemented; the rest are named so
  that a request for them is reported precisely rather than as an unknown opcode.
*/
#[derive(
  StrumDisplay, IntoStaticStr, EnumString,
  Clone,        Copy,          Eq, PartialEq, Debug, Hash
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum AluOperation {
  Add,
  Sub,
  Mul,
  Div,
  Mod,
  Inc,
  Dec,
  Cmp,
  And,
  Or,
  Xor,
  Not,
  Shl,
  Shr,
}

/**
  Runs `operation` on `reg_a` and `reg_b` and returns the new contents of the flag register.

  For `Cmp` the conditions are tested in the order equal, less-than, greater-than, and the
  greater-than test carries a trailing `else` that clears the register. The net effect is that
  a greater-than result is never retained and is reported as `Flag::None`.
*/
pub fn alu(operation: AluOperation, reg_a: Byte, reg_b: Byte) -> Result<Flag, VmError> {
  match operation {

    AluOperation::Cmp => {
      let flag =
        match reg_a.cmp(&reg_b) {
          Ordering::Equal   => Flag::Equal,
          Ordering::Less    => Flag::LessThan,
          Ordering::Greater => Flag::None,
        };
      Ok(flag)
    }

    other => Err(VmError::UnsupportedAluOperation(other))

  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use std::str::FromStr;

  #[test]
  fn compare_flags(){
    assert_eq!(alu(AluOperation::Cmp, 5, 5), Ok(Flag::Equal));
    assert_eq!(alu(AluOperation::Cmp, 3, 5), Ok(Flag::LessThan));
    assert_eq!(alu(AluOperation::Cmp, 9, 5), Ok(Flag::None));
    assert_eq!(alu(AluOperation::Cmp, 0, 0), Ok(Flag::Equal));
    assert_eq!(alu(AluOperation::Cmp, 255, 0), Ok(Flag::None));
  }

  #[test]
  fn compare_never_reports_greater_than(){
    for a in 0..=255u8 {
      for b in 0..=255u8 {
        let flag = alu(AluOperation::Cmp, a, b).unwrap();
        let expected =
          if a == b      { Flag::Equal }
          else if a < b  { Flag::LessThan }
          else           { Flag::None };
        assert_eq!(flag, expected, "CMP {} {}", a, b);
      }
    }
  }

  #[test]
  fn unsupported_operations(){
    assert_eq!(
      alu(AluOperation::Add, 1, 2),
      Err(VmError::UnsupportedAluOperation(AluOperation::Add))
    );
    assert_eq!(
      alu(AluOperation::Shr, 1, 2),
      Err(VmError::UnsupportedAluOperation(AluOperation::Shr))
    );
  }

  #[test]
  fn operation_names(){
    assert_eq!(AluOperation::Cmp.to_string(), "CMP");
    assert_eq!(AluOperation::from_str("MUL").ok(), Some(AluOperation::Mul));
  }

  #[test]
  fn flag_encoding(){
    assert_eq!(Flag::default(), Flag::Equal);
    assert_eq!(Flag::Equal.bits(), 0b001);
    assert_eq!(Flag::LessThan.bits(), 0b100);
    assert_eq!(Flag::try_from(0b010).ok(), Some(Flag::GreaterThan));
    assert!(Flag::try_from(0b011).is_err());
  }
}
