#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

mod address;
mod alu;
mod bytecode;
mod cli;
mod cpu;
mod error;
mod loader;
mod memory;
mod registers;

use std::process;

use clap::{error::ErrorKind, Parser};
use tracing::{debug, error, info};

use crate::bytecode::disassemble;
use crate::cli::Arguments;
use crate::cpu::Cpu;
use crate::error::{Error, EXIT_USAGE};
use crate::loader::load_program;

fn main() {
  let arguments =
    match Arguments::try_parse() {
      Ok(arguments) => arguments,
      Err(e) => match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
        _ => {
          // Printing to stderr can only fail if stderr is gone, and then there is nobody to tell.
          let _ = e.print();
          process::exit(EXIT_USAGE);
        }
      }
    };

  arguments.verbosity.init_tracing();

  #[cfg(feature = "trace_computation")]
  println!("Computation Tracing ENABLED");

  if let Err(e) = execute(&arguments) {
    eprintln!("error: {}", e);
    process::exit(e.exit_code());
  }
}

/**
  Loads the program and either lists it or runs it. A run only ends in a fault (or the step
  limit), so when the machine is started this always returns `Err`.
*/
fn execute(arguments: &Arguments) -> Result<(), Error> {
  let image = load_program(&arguments.program)?;

  if arguments.disassemble {
    for line in disassemble(&image) {
      println!("{}", line);
    }
    return Ok(());
  }

  let mut cpu = Cpu::with_program(&image)?;
  debug!(max_steps = ?arguments.max_steps, "starting machine");

  let result =
    match arguments.max_steps {
      Some(limit) => cpu.run_for(limit),
      None        => cpu.run()
    };
  let fault =
    match result {
      Ok(never) => match never {},
      Err(fault) => fault
    };

  error!(pc = cpu.pc(), %fault, "machine stopped");
  info!(
    steps     = cpu.steps(),
    flags     = %cpu.flags(),
    registers = ?cpu.registers().as_slice(),
    "final state"
  );

  if arguments.dump_state {
    println!("{}", cpu);
  }

  Err(fault.into())
}


#[cfg(test)]
mod tests {
  use super::*;
  use std::path::PathBuf;

  use crate::address::Address;
  use crate::alu::Flag;
  use crate::error::VmError;

  fn program(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("programs").join(name)
  }

  fn arguments(args: &[&str]) -> Arguments {
    Arguments::try_parse_from(std::iter::once("ls8").chain(args.iter().copied())).unwrap()
  }

  #[test]
  fn compare_program(){
    let image = load_program(&program("compare.ls8")).unwrap();
    assert_eq!(image.len(), 7);

    let mut cpu = Cpu::with_program(&image).unwrap();
    assert_eq!(
      cpu.run(),
      Err(VmError::UnknownOpcode { opcode: 0, address: Address::Memory(9) })
    );
    assert_eq!(cpu.registers().as_slice(), &[3, 5, 0, 0, 0, 0, 0, 0]);
    assert_eq!(cpu.flags(), Flag::LessThan);
    assert_eq!(cpu.steps(), 3);
  }

  #[test]
  fn loop_program_hits_step_limit(){
    let path   = program("loop.ls8");
    let result = execute(&arguments(&["--max-steps", "25", path.to_str().unwrap()]));
    match result {
      Err(e @ Error::Vm(VmError::StepLimitReached(25))) => assert_eq!(e.exit_code(), 4),
      other => panic!("expected StepLimitReached, got {:?}", other)
    }
  }

  #[test]
  fn disassemble_only(){
    let path = program("compare.ls8");
    assert!(execute(&arguments(&["--disassemble", path.to_str().unwrap()])).is_ok());
  }

  #[test]
  fn missing_program(){
    let path = program("does-not-exist.ls8");
    let e    = execute(&arguments(&[path.to_str().unwrap()])).unwrap_err();
    assert_eq!(e.exit_code(), 2);
  }
}
