//! The arithmetic logic unit
//!
//! The ALU is stateless: it takes two register values and hands back either a
//! value for the caller to store in the first operand register, or a new set
//! of flags. It never sees the program counter or memory.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::registers::{Flags, Register};

/// Operation selector, the low nibble of every ALU class opcode
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
  Add = 0x0,
  Sub = 0x1,
  Mul = 0x2,
  Div = 0x3,
  Mod = 0x4,
  Cmp = 0x7,
}

impl TryFrom<u8> for AluOp {
  type Error = Error;

  fn try_from(selector: u8) -> Result<Self> {
    match selector {
      0x0 => Ok(Self::Add),
      0x1 => Ok(Self::Sub),
      0x2 => Ok(Self::Mul),
      0x3 => Ok(Self::Div),
      0x4 => Ok(Self::Mod),
      0x7 => Ok(Self::Cmp),
      _ => Err(Error::UnsupportedOperation(selector)),
    }
  }
}

/// What the ALU produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOutcome {
  Value(Register),
  Flags(Flags),
}

pub fn alu(op: AluOp, a: Register, b: Register) -> Result<AluOutcome> {
  let value = match op {
    AluOp::Add => a.wrapping_add(b),
    AluOp::Sub => a.wrapping_sub(b),
    AluOp::Mul => a.wrapping_mul(b),
    AluOp::Div => {
      if b == 0 {
        return Err(Error::DivisionByZero);
      }
      a.wrapping_div(b)
    }
    AluOp::Mod => {
      if b == 0 {
        return Err(Error::DivisionByZero);
      }
      a.wrapping_rem(b)
    }
    AluOp::Cmp => return Ok(AluOutcome::Flags(compare(a, b))),
  };
  Ok(AluOutcome::Value(value))
}

// exactly one bit is ever set
fn compare(a: Register, b: Register) -> Flags {
  match a.cmp(&b) {
    Ordering::Equal => Flags::EQUAL,
    Ordering::Less => Flags::LESS,
    Ordering::Greater => Flags::GREATER,
  }
}
