use std::fmt;

/// Bit marking an opcode as handled by the ALU, its low nibble is then the
/// [`AluOp`](crate::alu::AluOp) selector
pub const ALU_BIT: u8 = 0b0010_0000;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
  /// Stops the machine.
  ///
  /// | Operation | Semantics/RTL      | Assembly |
  /// |-----------|--------------------|----------|
  /// | Halt      | `(stop execution)` | `HLT`    |
  Hlt = 0b0000_0001,

  /// Returns from a subroutine.
  ///
  /// | Operation | Semantics/RTL                   | Assembly |
  /// |-----------|---------------------------------|----------|
  /// | Return    | `pc ← m[r7]; r7 ← r7 + 1`       | `RET`    |
  Ret = 0b0001_0001,

  /// Pushes a register onto the stack.
  ///
  /// | Operation | Semantics/RTL                | Assembly  |
  /// |-----------|------------------------------|-----------|
  /// | Push      | `r7 ← r7 − 1; m[r7] ← r[a]`  | `PUSH ra` |
  Push = 0b0100_0101,

  /// Pops the top of the stack into a register.
  ///
  /// | Operation | Semantics/RTL                | Assembly |
  /// |-----------|------------------------------|----------|
  /// | Pop       | `r[a] ← m[r7]; r7 ← r7 + 1`  | `POP ra` |
  Pop = 0b0100_0110,

  /// Prints the value of a register.
  ///
  /// | Operation | Semantics/RTL  | Assembly |
  /// |-----------|----------------|----------|
  /// | Print     | `out ← r[a]`   | `PRN ra` |
  Prn = 0b0100_0111,

  /// Calls the subroutine whose address is held in a register.
  ///
  /// | Operation | Semantics/RTL                                 | Assembly  |
  /// |-----------|-----------------------------------------------|-----------|
  /// | Call      | `r7 ← r7 − 1; m[r7] ← pc + 2; pc ← r[a]`      | `CALL ra` |
  Call = 0b0101_0000,

  /// | Operation | Semantics/RTL | Assembly |
  /// |-----------|---------------|----------|
  /// | Jump      | `pc ← r[a]`   | `JMP ra` |
  Jmp = 0b0101_0100,

  /// | Operation     | Semantics/RTL                       | Assembly |
  /// |---------------|-------------------------------------|----------|
  /// | Jump If Equal | `if E : pc ← r[a] else pc ← pc + 2` | `JEQ ra` |
  Jeq = 0b0101_0101,

  /// | Operation         | Semantics/RTL                        | Assembly |
  /// |-------------------|--------------------------------------|----------|
  /// | Jump If Not Equal | `if !E : pc ← r[a] else pc ← pc + 2` | `JNE ra` |
  Jne = 0b0101_0110,

  /// Loads an immediate value into a register.
  ///
  /// | Operation      | Semantics/RTL  | Assembly       |
  /// |----------------|----------------|----------------|
  /// | Load Immediate | `r[a] ← vvvvvvvv` | `LDI ra, v` |
  Ldi = 0b1000_0010,

  /// | Operation | Semantics/RTL          | Assembly     |
  /// |-----------|------------------------|--------------|
  /// | Add       | `r[a] ← r[a] + r[b]`   | `ADD ra, rb` |
  Add = 0b1010_0000,

  /// | Operation | Semantics/RTL          | Assembly     |
  /// |-----------|------------------------|--------------|
  /// | Subtract  | `r[a] ← r[a] − r[b]`   | `SUB ra, rb` |
  Sub = 0b1010_0001,

  /// | Operation | Semantics/RTL          | Assembly     |
  /// |-----------|------------------------|--------------|
  /// | Multiply  | `r[a] ← r[a] × r[b]`   | `MUL ra, rb` |
  Mul = 0b1010_0010,

  /// Fails on a zero divisor.
  ///
  /// | Operation | Semantics/RTL          | Assembly     |
  /// |-----------|------------------------|--------------|
  /// | Divide    | `r[a] ← r[a] / r[b]`   | `DIV ra, rb` |
  Div = 0b1010_0011,

  /// Fails on a zero divisor.
  ///
  /// | Operation | Semantics/RTL          | Assembly     |
  /// |-----------|------------------------|--------------|
  /// | Modulo    | `r[a] ← r[a] % r[b]`   | `MOD ra, rb` |
  Mod = 0b1010_0100,

  /// Sets exactly one of the `L`, `G` or `E` flags from the ordering of two
  /// register values.
  ///
  /// | Operation | Semantics/RTL                | Assembly     |
  /// |-----------|------------------------------|--------------|
  /// | Compare   | `fl ← cmp(r[a], r[b])`       | `CMP ra, rb` |
  Cmp = 0b1010_0111,
}

impl Opcode {
  /// Look up an opcode byte, `None` if nothing is wired to it
  pub fn decode(byte: u8) -> Option<Self> {
    let op = match byte {
      0b0000_0001 => Self::Hlt,
      0b0001_0001 => Self::Ret,
      0b0100_0101 => Self::Push,
      0b0100_0110 => Self::Pop,
      0b0100_0111 => Self::Prn,
      0b0101_0000 => Self::Call,
      0b0101_0100 => Self::Jmp,
      0b0101_0101 => Self::Jeq,
      0b0101_0110 => Self::Jne,
      0b1000_0010 => Self::Ldi,
      0b1010_0000 => Self::Add,
      0b1010_0001 => Self::Sub,
      0b1010_0010 => Self::Mul,
      0b1010_0011 => Self::Div,
      0b1010_0100 => Self::Mod,
      0b1010_0111 => Self::Cmp,
      _ => return None,
    };
    Some(op)
  }

  /// Instruction length in bytes, opcode included
  pub fn width(self) -> usize {
    match self {
      Self::Hlt | Self::Ret => 1,
      Self::Push
      | Self::Pop
      | Self::Prn
      | Self::Call
      | Self::Jmp
      | Self::Jeq
      | Self::Jne => 2,
      Self::Ldi
      | Self::Add
      | Self::Sub
      | Self::Mul
      | Self::Div
      | Self::Mod
      | Self::Cmp => 3,
    }
  }

  pub fn is_alu(self) -> bool {
    self as u8 & ALU_BIT != 0
  }

  pub fn mnemonic(self) -> &'static str {
    match self {
      Self::Hlt => "HLT",
      Self::Ret => "RET",
      Self::Push => "PUSH",
      Self::Pop => "POP",
      Self::Prn => "PRN",
      Self::Call => "CALL",
      Self::Jmp => "JMP",
      Self::Jeq => "JEQ",
      Self::Jne => "JNE",
      Self::Ldi => "LDI",
      Self::Add => "ADD",
      Self::Sub => "SUB",
      Self::Mul => "MUL",
      Self::Div => "DIV",
      Self::Mod => "MOD",
      Self::Cmp => "CMP",
    }
  }
}

impl fmt::Display for Opcode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.mnemonic())
  }
}
