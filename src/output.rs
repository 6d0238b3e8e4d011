use std::io::{self, Write};

use log::warn;

use crate::registers::Register;

/// Where `PRN` sends its values
pub trait Output {
  fn emit(&mut self, value: Register);
}

/// Prints each value on its own line
#[derive(Debug, Default)]
pub struct Stdout;

impl Output for Stdout {
  fn emit(&mut self, value: Register) {
    let _ = print_line(&mut io::stdout().lock(), value);
  }
}

/// Write `value` and a newline, logging a warning if the writer refuses it
fn print_line<W>(out: &mut W, value: Register) -> io::Result<()>
where
  W: Write,
{
  writeln!(out, "{value}").inspect_err(|e| warn!("could not print {value}: {e}"))
}

/// Records everything printed, handy for inspecting a run afterwards
impl Output for Vec<Register> {
  fn emit(&mut self, value: Register) {
    self.push(value);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  struct ClosedPipe;

  impl Write for ClosedPipe {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
      Err(io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> io::Result<()> {
      Ok(())
    }
  }

  #[test]
  fn print_line_writes_decimal() {
    let mut buffer = Vec::new();
    print_line(&mut buffer, 72).unwrap();
    print_line(&mut buffer, -1).unwrap();
    assert_eq!(buffer, b"72\n-1\n");
  }

  #[test]
  fn print_line_reports_write_failure() {
    let err = print_line(&mut ClosedPipe, 8).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
  }

  #[test]
  fn vec_records_values() {
    let mut out: Vec<Register> = Vec::new();
    out.emit(3);
    out.emit(4);
    assert_eq!(out, vec![3, 4]);
  }
}
