//! An instruction set simulator for the LS-8, a tiny 8-bit machine with 256
//! bytes of RAM, eight registers and a downward growing stack.
//!
//! ```
//! use emulator::region::Program;
//! use emulator::vm::Cpu;
//!
//! // LDI R0,8; PRN R0; HLT
//! let program: Program = vec![0b10000010, 0, 8, 0b01000111, 0, 0b00000001].into();
//! let mut cpu = Cpu::with_program(&program).unwrap();
//! let mut printed: Vec<isize> = Vec::new();
//! cpu.run(&mut printed).unwrap();
//! assert_eq!(printed, vec![8]);
//! ```

pub mod alu;
pub mod error;
pub mod loader;
pub mod memory;
pub mod opcode;
pub mod output;
pub mod region;
pub mod registers;
pub mod vm;

pub use error::{Error, Result};
