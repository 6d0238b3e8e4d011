//! Reading program images
//!
//! An image is text with one byte per line, written as eight binary digits.
//! Everything after a `#` is a comment. Lines that are not binary numbers
//! (blank lines, comment-only lines, typos) are skipped.

use std::convert::Infallible;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use log::debug;

use crate::error::{Error, Result};
use crate::region::Program;

/// Parse the text of a program image
pub fn parse(source: &str) -> Program {
  let mut bytes = Vec::new();
  for (number, line) in source.lines().enumerate() {
    let code = line.split('#').next().unwrap_or_default().trim();
    match u8::from_str_radix(code, 2) {
      Ok(byte) => bytes.push(byte),
      Err(_) if code.is_empty() => {}
      Err(e) => debug!("skipping line {}: {code:?} ({e})", number + 1),
    }
  }
  bytes.into()
}

impl FromStr for Program {
  type Err = Infallible;

  fn from_str(source: &str) -> Result<Self, Self::Err> {
    Ok(parse(source))
  }
}

impl Program {
  /// Read and parse a program image from disk
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|e| match e.kind() {
      io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
      _ => Error::Io(e),
    })?;
    let program = parse(&source);
    debug!("read {} bytes from {}", program.len(), path.display());
    Ok(program)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::region::Region;

  #[test]
  fn parse_print8() {
    let source = "\
# print8.ls8: Print the number 8 on the screen

10000010 # LDI R0,8
00000000
00001000
01000111 # PRN R0
00000000
00000001 # HLT
";
    let program = parse(source);
    assert_eq!(
      program.bytes(),
      &[0b10000010, 0, 8, 0b01000111, 0, 0b00000001]
    );
  }

  #[test]
  fn junk_lines_are_skipped() {
    let program = parse("00000001\nhello\n2\n   \n11111111\n");
    assert_eq!(program.bytes(), &[0b00000001, 0xFF]);
  }

  #[test]
  fn surrounding_whitespace() {
    let program = parse("  10100000   # ADD\r\n\t00000001\r\n");
    assert_eq!(program.bytes(), &[0b10100000, 1]);
  }

  #[test]
  fn values_wider_than_a_byte_are_skipped() {
    let program = parse("100000000\n00000001\n");
    assert_eq!(program.bytes(), &[1]);
  }

  #[test]
  fn from_str() {
    let program: Program = "00000001".parse().unwrap();
    assert_eq!(program.len(), 1);
  }

  #[test]
  fn missing_file() {
    let path = Path::new("definitely/not/a/real/program.ls8");
    match Program::from_file(path) {
      Err(Error::FileNotFound(p)) => assert_eq!(p, path),
      other => panic!("expected FileNotFound, got {other:?}"),
    }
  }
}
