/// A region of bytes that can be loaded into memory
pub trait Region {
  fn bytes(&self) -> &[u8];
}

/// A `Program` is a memory image, placed at address zero when loaded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
  bytes: Vec<u8>,
}

impl Program {
  pub fn len(&self) -> usize {
    self.bytes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }
}

impl From<Vec<u8>> for Program {
  fn from(bytes: Vec<u8>) -> Self {
    Self { bytes }
  }
}

impl Region for Program {
  fn bytes(&self) -> &[u8] {
    &self.bytes
  }
}

impl Region for [u8] {
  fn bytes(&self) -> &[u8] {
    self
  }
}
