//! Error types for loading and running programs. Every one of these is terminal: nothing in the
//! machine retries or recovers.

use std::io;
use std::path::PathBuf;

use crate::address::Address;
use crate::alu::AluOperation;

/// Failures while turning a program file into a memory image.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
  #[error("File not found: {path}: {source}")]
  ProgramNotFound {
    path   : PathBuf,
    #[source]
    source : io::Error,
  },

  #[error("Malformed instruction on line {line}: `{text}` is not an 8 bit binary literal")]
  MalformedInstruction {
    line : usize,
    text : String,
  },

  #[error("Program is {length} bytes but memory holds only {capacity}")]
  ProgramTooLarge {
    length   : usize,
    capacity : usize,
  },
}

/// Faults raised by the execution engine.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VmError {
  #[error("Unknown opcode {opcode:#010b} at {address}")]
  UnknownOpcode {
    opcode  : u8,
    address : Address,
  },

  #[error("Unsupported ALU operation: {0}")]
  UnsupportedAluOperation(AluOperation),

  #[error("Address out of bounds: {0}")]
  OutOfBounds(Address),

  #[error("Step limit of {0} instructions reached")]
  StepLimitReached(u64),
}

/// Everything that can end a run of the command line tool.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error(transparent)]
  Load(#[from] LoadError),

  #[error(transparent)]
  Vm(#[from] VmError),
}

impl Error {
  /// Process exit status for this error. Argument errors exit with `EXIT_USAGE` before an
  /// `Error` is ever built.
  pub fn exit_code(&self) -> i32 {
    match self {
      Error::Load(LoadError::ProgramNotFound { .. }) => EXIT_PROGRAM_NOT_FOUND,
      Error::Load(_)                                 => EXIT_BAD_PROGRAM,
      Error::Vm(_)                                   => EXIT_FAULT,
    }
  }
}

pub const EXIT_USAGE             : i32 = 1;
pub const EXIT_PROGRAM_NOT_FOUND : i32 = 2;
pub const EXIT_BAD_PROGRAM       : i32 = 3;
pub const EXIT_FAULT             : i32 = 4;


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn exit_codes(){
    let missing = Error::from(LoadError::ProgramNotFound {
      path   : PathBuf::from("nowhere.ls8"),
      source : io::Error::from(io::ErrorKind::NotFound)
    });
    assert_eq!(missing.exit_code(), 2);

    let malformed = Error::from(LoadError::MalformedInstruction { line: 1, text: "x".into() });
    assert_eq!(malformed.exit_code(), 3);

    let fault = Error::from(VmError::UnknownOpcode { opcode: 0, address: Address::Memory(0) });
    assert_eq!(fault.exit_code(), 4);
    assert_eq!(Error::from(VmError::StepLimitReached(3)).exit_code(), 4);
  }

  #[test]
  fn messages(){
    let fault = VmError::UnknownOpcode { opcode: 0b11111111, address: Address::Memory(9) };
    assert_eq!(fault.to_string(), "Unknown opcode 0b11111111 at RAM[9]");
    assert_eq!(
      VmError::OutOfBounds(Address::Register(8)).to_string(),
      "Address out of bounds: R[8]"
    );
    assert_eq!(
      VmError::UnsupportedAluOperation(AluOperation::Add).to_string(),
      "Unsupported ALU operation: ADD"
    );
  }
}
