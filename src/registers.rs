use crate::error::{Error, Result};

/// The type of a single register in our virtual machine
///
/// Values are 8-bit by convention, but arithmetic is not masked, so a wider
/// signed integer is used to hold intermediate results.
pub type Register = isize;

/// Number of general purpose registers
pub const REGISTER_COUNT: usize = 8;

/// `R7` doubles as the stack pointer
pub const SP: u8 = 7;

/// Where the stack starts, it grows downward from here
pub const STACK_START: Register = 0xF4;

/// Comparison outcome, laid out as `00000LGE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags(u8);

impl Flags {
  pub const EQUAL: Flags = Flags(0b0000_0001);
  pub const GREATER: Flags = Flags(0b0000_0010);
  pub const LESS: Flags = Flags(0b0000_0100);

  pub fn bits(self) -> u8 {
    self.0
  }

  pub fn contains(self, other: Flags) -> bool {
    self.0 & other.0 == other.0 && other.0 != 0
  }

  pub fn is_equal(self) -> bool {
    self.contains(Self::EQUAL)
  }
}

/// The general purpose registers and the flags register
#[derive(Debug, Clone)]
pub struct RegisterFile {
  registers: [Register; REGISTER_COUNT],
  flags: Flags,
}

impl RegisterFile {
  pub fn new() -> Self {
    let mut registers = [0; REGISTER_COUNT];
    registers[SP as usize] = STACK_START;
    Self {
      registers,
      flags: Flags::default(),
    }
  }

  pub fn get(&self, index: u8) -> Result<Register> {
    self
      .registers
      .get(index as usize)
      .copied()
      .ok_or(Error::InvalidRegister(index))
  }

  pub fn set(&mut self, index: u8, value: Register) -> Result<()> {
    let register = self
      .registers
      .get_mut(index as usize)
      .ok_or(Error::InvalidRegister(index))?;
    *register = value;
    Ok(())
  }

  pub fn sp(&self) -> Register {
    self.registers[SP as usize]
  }

  pub fn set_sp(&mut self, value: Register) {
    self.registers[SP as usize] = value;
  }

  pub fn flags(&self) -> Flags {
    self.flags
  }

  pub fn set_flags(&mut self, flags: Flags) {
    self.flags = flags;
  }

  pub fn as_slice(&self) -> &[Register] {
    &self.registers
  }
}

impl Default for RegisterFile {
  fn default() -> Self {
    Self::new()
  }
}
