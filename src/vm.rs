use std::fmt::Write;

use log::{debug, log_enabled, trace, Level};

use crate::alu::{alu, AluOp, AluOutcome};
use crate::error::{Error, Result};
use crate::memory::Memory;
use crate::opcode::Opcode;
use crate::output::Output;
use crate::region::Region;
use crate::registers::{Flags, Register, RegisterFile};

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
  Active,
  Halted,
}

/// An LS-8 processor: 256 bytes of RAM, eight registers and a flags register.
///
/// Everything the machine knows lives in here, so independent `Cpu`s can run
/// side by side without sharing anything.
#[derive(Debug, Clone)]
pub struct Cpu {
  // address of the next opcode to fetch
  pc: usize,
  memory: Memory,
  registers: RegisterFile,
  state: State,
}

impl Cpu {
  /// Create a new, empty processor
  pub fn new() -> Self {
    Self {
      pc: 0,
      memory: Memory::new(),
      registers: RegisterFile::new(),
      state: State::Active,
    }
  }

  /// Create a processor with `region` already loaded
  pub fn with_program<R>(region: &R) -> Result<Self>
  where
    R: Region + ?Sized,
  {
    let mut cpu = Self::new();
    cpu.load(region)?;
    Ok(cpu)
  }

  /// Copy `region` into memory starting at address zero
  pub fn load<R>(&mut self, region: &R) -> Result<()>
  where
    R: Region + ?Sized,
  {
    self.memory.load(region.bytes())?;
    debug!("loaded {} bytes", region.bytes().len());
    Ok(())
  }

  /// Execute a single instruction.
  ///
  /// Any error halts the machine, and the failing instruction leaves no
  /// trace in memory or registers.
  pub fn step<O>(&mut self, out: &mut O) -> Result<()>
  where
    O: Output,
  {
    if self.state == State::Halted {
      return Err(Error::MachineHalted);
    }
    let mut task = Task::new(self, out);
    let result = task.run();
    if result.is_err() {
      self.state = State::Halted;
    }
    result
  }

  /// Step until the machine halts, failing with the first error
  pub fn run<O>(&mut self, out: &mut O) -> Result<()>
  where
    O: Output,
  {
    while self.state == State::Active {
      if log_enabled!(Level::Trace) {
        trace!("{}", self.trace());
      }
      self.step(out)?;
    }
    debug!("halted at pc {:#04x}", self.pc);
    Ok(())
  }

  /// Render the machine state as
  /// `TRACE: pc | m[pc] m[pc+1] m[pc+2] | r0 .. r7`
  pub fn trace(&self) -> String {
    let mut line = format!(
      "TRACE: {:02X} | {:02X} {:02X} {:02X} |",
      self.pc,
      self.memory.peek(self.pc),
      self.memory.peek(self.pc + 1),
      self.memory.peek(self.pc + 2),
    );
    // registers are 8-bit by convention, show their low byte
    for &value in self.registers.as_slice() {
      let _ = write!(line, " {:02X}", value as u8);
    }
    line
  }

  pub fn pc(&self) -> usize {
    self.pc
  }

  pub fn is_halted(&self) -> bool {
    self.state == State::Halted
  }

  pub fn memory(&self) -> &Memory {
    &self.memory
  }

  pub fn registers(&self) -> &RegisterFile {
    &self.registers
  }

  pub fn flags(&self) -> Flags {
    self.registers.flags()
  }
}

impl Default for Cpu {
  fn default() -> Self {
    Self::new()
  }
}

/// Turn a register value into a memory address
fn address(value: Register) -> Result<usize> {
  usize::try_from(value).map_err(|_| Error::OutOfRange(value))
}

struct Task<'cpu, 'out, O> {
  cpu: &'cpu mut Cpu,
  out: &'out mut O,
}

impl<'cpu, 'out, O> Task<'cpu, 'out, O>
where
  O: Output,
{
  fn new(cpu: &'cpu mut Cpu, out: &'out mut O) -> Self {
    Self { cpu, out }
  }

  /// The `n`th byte after the opcode
  #[inline]
  fn operand(&self, n: usize) -> Result<u8> {
    self.cpu.memory.read(self.cpu.pc + n)
  }

  /// The value of the register named by the `n`th operand
  fn register(&self, n: usize) -> Result<Register> {
    let r = self.operand(n)?;
    self.cpu.registers.get(r)
  }

  fn advance(&mut self, op: Opcode) {
    self.cpu.pc += op.width();
  }

  fn push(&mut self, value: Register) -> Result<()> {
    let sp = self.cpu.registers.sp();
    let sp = sp.checked_sub(1).ok_or(Error::OutOfRange(sp))?;
    // memory cells are bytes
    self.cpu.memory.write(address(sp)?, value as u8)?;
    self.cpu.registers.set_sp(sp);
    Ok(())
  }

  fn pop(&mut self) -> Result<Register> {
    let sp = self.cpu.registers.sp();
    let value = self.cpu.memory.read(address(sp)?)?;
    self.cpu.registers.set_sp(sp + 1);
    Ok(value as Register)
  }

  fn run(&mut self) -> Result<()> {
    let pc = self.cpu.pc;
    let byte = self.cpu.memory.read(pc)?;
    let op = Opcode::decode(byte).ok_or(Error::InvalidInstruction { opcode: byte, pc })?;
    match op {
      Opcode::Hlt => hlt(self),
      Opcode::Ldi => ldi(self),
      Opcode::Prn => prn(self),
      Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div | Opcode::Mod | Opcode::Cmp => {
        arithmetic(self, op)
      }
      Opcode::Push => push(self),
      Opcode::Pop => pop(self),
      Opcode::Call => call(self),
      Opcode::Ret => ret(self),
      Opcode::Jmp => jmp(self),
      Opcode::Jeq => jeq(self),
      Opcode::Jne => jne(self),
    }
  }
}

// (stop execution)
fn hlt<O>(task: &mut Task<'_, '_, O>) -> Result<()>
where
  O: Output,
{
  task.cpu.state = State::Halted;
  Ok(())
}

// r[a] ← vvvvvvvv
fn ldi<O>(task: &mut Task<'_, '_, O>) -> Result<()>
where
  O: Output,
{
  let a = task.operand(1)?;
  let value = task.operand(2)?;
  task.cpu.registers.set(a, value as Register)?;
  task.advance(Opcode::Ldi);
  Ok(())
}

// out ← r[a]
fn prn<O>(task: &mut Task<'_, '_, O>) -> Result<()>
where
  O: Output,
{
  let value = task.register(1)?;
  task.out.emit(value);
  task.advance(Opcode::Prn);
  Ok(())
}

// r[a] ← r[a] op r[b]
// fl ← cmp(r[a], r[b])
fn arithmetic<O>(task: &mut Task<'_, '_, O>, op: Opcode) -> Result<()>
where
  O: Output,
{
  debug_assert!(op.is_alu());
  let selector = AluOp::try_from(op as u8 & 0x0F)?;
  let a = task.operand(1)?;
  // both values are read before r[a] is written, `ADD r0, r0` doubles r0
  let ra = task.cpu.registers.get(a)?;
  let rb = task.register(2)?;
  match alu(selector, ra, rb)? {
    AluOutcome::Value(value) => task.cpu.registers.set(a, value)?,
    AluOutcome::Flags(flags) => task.cpu.registers.set_flags(flags),
  }
  task.advance(op);
  Ok(())
}

// r7 ← r7 − 1; m[r7] ← r[a]
fn push<O>(task: &mut Task<'_, '_, O>) -> Result<()>
where
  O: Output,
{
  let value = task.register(1)?;
  task.push(value)?;
  task.advance(Opcode::Push);
  Ok(())
}

// r[a] ← m[r7]; r7 ← r7 + 1
fn pop<O>(task: &mut Task<'_, '_, O>) -> Result<()>
where
  O: Output,
{
  let a = task.operand(1)?;
  // validate the destination before touching the stack
  task.cpu.registers.get(a)?;
  let value = task.pop()?;
  task.cpu.registers.set(a, value)?;
  task.advance(Opcode::Pop);
  Ok(())
}

// r7 ← r7 − 1; m[r7] ← pc + 2; pc ← r[a]
fn call<O>(task: &mut Task<'_, '_, O>) -> Result<()>
where
  O: Output,
{
  let target = address(task.register(1)?)?;
  let return_address = task.cpu.pc + Opcode::Call.width();
  task.push(return_address as Register)?;
  task.cpu.pc = target;
  Ok(())
}

// pc ← m[r7]; r7 ← r7 + 1
fn ret<O>(task: &mut Task<'_, '_, O>) -> Result<()>
where
  O: Output,
{
  let return_address = task.pop()?;
  task.cpu.pc = address(return_address)?;
  Ok(())
}

// pc ← r[a]
fn jmp<O>(task: &mut Task<'_, '_, O>) -> Result<()>
where
  O: Output,
{
  task.cpu.pc = address(task.register(1)?)?;
  Ok(())
}

fn jump_if<O>(task: &mut Task<'_, '_, O>, op: Opcode, taken: bool) -> Result<()>
where
  O: Output,
{
  let target = address(task.register(1)?)?;
  if taken {
    task.cpu.pc = target;
  } else {
    task.advance(op);
  }
  Ok(())
}

// if E : pc ← r[a]
fn jeq<O>(task: &mut Task<'_, '_, O>) -> Result<()>
where
  O: Output,
{
  let taken = task.cpu.registers.flags().is_equal();
  jump_if(task, Opcode::Jeq, taken)
}

// if !E : pc ← r[a]
fn jne<O>(task: &mut Task<'_, '_, O>) -> Result<()>
where
  O: Output,
{
  let taken = !task.cpu.registers.flags().is_equal();
  jump_if(task, Opcode::Jne, taken)
}
