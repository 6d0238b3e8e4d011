use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;

use emulator::output::Stdout;
use emulator::region::Program;
use emulator::vm::Cpu;
use emulator::Error;

#[derive(Parser, Debug)]
#[command(name = "ls8")]
#[command(about = "Run an LS-8 program image", long_about = None)]
struct Args {
  /// Program image, one byte of binary digits per line
  program: PathBuf,

  /// Log the machine state before every instruction
  #[arg(long)]
  trace: bool,
}

fn main() -> ExitCode {
  let args = match Args::try_parse() {
    Ok(args) => args,
    Err(e) if e.use_stderr() => {
      let _ = e.print();
      return ExitCode::from(1);
    }
    // --help and --version
    Err(e) => {
      let _ = e.print();
      return ExitCode::SUCCESS;
    }
  };

  let level = if args.trace {
    LevelFilter::Trace
  } else {
    LevelFilter::Warn
  };
  if let Err(e) = SimpleLogger::new().with_level(level).env().init() {
    eprintln!("could not set up logging: {e}");
  }

  match run(&args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("error: {e:#}");
      ExitCode::FAILURE
    }
  }
}

fn run(args: &Args) -> anyhow::Result<()> {
  let program = match Program::from_file(&args.program) {
    Err(e @ Error::FileNotFound(_)) => return Err(e.into()),
    other => other.with_context(|| format!("reading {}", args.program.display()))?,
  };
  let mut cpu = Cpu::with_program(&program)?;
  cpu.run(&mut Stdout)?;
  Ok(())
}
