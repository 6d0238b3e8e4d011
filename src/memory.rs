use crate::error::{Error, Result};

/// Number of addressable bytes
pub const MEMORY_SIZE: usize = 256;

/// Flat, byte addressable RAM
#[derive(Debug, Clone)]
pub struct Memory {
  cells: [u8; MEMORY_SIZE],
}

impl Memory {
  /// Create zeroed memory
  pub fn new() -> Self {
    Self {
      cells: [0; MEMORY_SIZE],
    }
  }

  pub fn read(&self, address: usize) -> Result<u8> {
    self
      .cells
      .get(address)
      .copied()
      .ok_or(Error::OutOfRange(address as isize))
  }

  pub fn write(&mut self, address: usize, value: u8) -> Result<()> {
    let cell = self
      .cells
      .get_mut(address)
      .ok_or(Error::OutOfRange(address as isize))?;
    *cell = value;
    Ok(())
  }

  /// Copy a program image into memory, starting at address zero
  pub fn load(&mut self, bytes: &[u8]) -> Result<()> {
    if bytes.len() > MEMORY_SIZE {
      return Err(Error::ProgramTooLarge(bytes.len()));
    }
    self.cells[..bytes.len()].copy_from_slice(bytes);
    Ok(())
  }

  /// Read without failing, used by the tracer which looks past the end of
  /// short instructions
  pub(crate) fn peek(&self, address: usize) -> u8 {
    self.cells.get(address).copied().unwrap_or(0)
  }

  pub fn as_slice(&self) -> &[u8] {
    &self.cells
  }
}

impl Default for Memory {
  fn default() -> Self {
    Self::new()
  }
}
