use std::io;
use std::path::PathBuf;

/// An error that occurred while loading or executing a program
#[derive(thiserror::Error, Debug)]
pub enum Error {
  #[error("invalid instruction {opcode:#010b} at pc {pc:#04x}")]
  InvalidInstruction { opcode: u8, pc: usize },

  #[error("unsupported alu operation {0:#06b}")]
  UnsupportedOperation(u8),

  #[error("address {0:#x} is outside of memory")]
  OutOfRange(isize),

  #[error("register r{0} does not exist")]
  InvalidRegister(u8),

  #[error("division by zero")]
  DivisionByZero,

  #[error("machine is halted")]
  MachineHalted,

  #[error("program is {0} bytes, which does not fit in memory")]
  ProgramTooLarge(usize),

  #[error("file not found: {}", .0.display())]
  FileNotFound(PathBuf),

  #[error(transparent)]
  Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
