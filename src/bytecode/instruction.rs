/*!
  Decoding of instructions out of a byte image, for disassembly listings and execution traces.
  The execution engine does not go through `Instruction`; each operation reads its own operands.
*/

use std::fmt::{Display, Formatter};

use super::Opcode;
use crate::address::{Address, AddressNumberType};
use crate::error::VmError;
use crate::memory::Byte;

/// Holds the decoded components of an instruction. As such, it enumerates the possible
/// instruction argument combinations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Instruction {
  /// [OpCode:8][Register:8][Immediate:8]
  Binary {
    opcode    : Opcode,
    register  : Byte,
    immediate : Byte
  },
  /// [OpCode:8][Unused:8], target read from `register`
  Unary {
    opcode   : Opcode,
    register : Address
  },
  /// [OpCode:8][Unused:8][Unused:8]
  Nullary(Opcode),
}

impl Instruction {
  pub fn opcode(&self) -> Opcode {
    match self {
      | Instruction::Binary { opcode, .. }
      | Instruction::Unary { opcode, .. }
      | Instruction::Nullary(opcode) => *opcode
    }
  }

  pub fn size(&self) -> usize {
    self.opcode().size()
  }
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self{

      Instruction::Binary{opcode, register, immediate} => {
        write!(f, "{} R[{}], {}", opcode, register, immediate)
      }

      Instruction::Unary{opcode, register} => {
        write!(f, "{} {}", opcode, register)
      }

      Instruction::Nullary(opcode) => {
        write!(f, "{}", opcode)
      }

    }
  }
}

/**
  Decodes the instruction whose opcode is at `bytes[address]`. Fails with `UnknownOpcode` for a
  byte that is not an opcode, and with `OutOfBounds` if the opcode or an operand that must be
  read lies past the end of `bytes`.
*/
pub fn try_decode_instruction(bytes: &[Byte], address: AddressNumberType)
  -> Result<Instruction, VmError>
{
  let fetch = |index: AddressNumberType| {
    bytes.get(index)
         .copied()
         .ok_or(VmError::OutOfBounds(Address::Memory(index)))
  };

  let byte   = fetch(address)?;
  let opcode =
    Opcode::try_from(byte).map_err(|_| VmError::UnknownOpcode {
      opcode  : byte,
      address : Address::Memory(address)
    })?;

  let instruction =
    match opcode {
      Opcode::Ldi => {
        Instruction::Binary {
          opcode,
          register  : fetch(address + 1)?,
          immediate : fetch(address + 2)?
        }
      }

      Opcode::Cmp => Instruction::Nullary(opcode),

      Opcode::Jmp | Opcode::Jeq | Opcode::Jne => {
        Instruction::Unary {
          opcode,
          register: Address::Register(address) + 1
        }
      }
    };

  Ok(instruction)
}


/// One row of a disassembly listing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ListingLine {
  Instruction {
    address     : AddressNumberType,
    instruction : Instruction
  },
  /// A byte that does not begin a complete instruction.
  Data {
    address : AddressNumberType,
    byte    : Byte
  }
}

impl Display for ListingLine {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      ListingLine::Instruction { address, instruction } => {
        write!(f, "{:>3}:  {}", address, instruction)
      }
      ListingLine::Data { address, byte } => {
        write!(f, "{:>3}:  .byte {:#010b}", address, byte)
      }
    }
  }
}

/// Walks `image` from address 0, decoding instructions and falling back to single data bytes
/// wherever decoding fails.
pub fn disassemble(image: &[Byte]) -> Vec<ListingLine> {
  let mut listing = Vec::new();
  let mut address = 0;

  while address < image.len() {
    match try_decode_instruction(image, address) {

      Ok(instruction) => {
        listing.push(ListingLine::Instruction { address, instruction });
        address += instruction.size();
      }

      Err(_) => {
        listing.push(ListingLine::Data { address, byte: image[address] });
        address += 1;
      }

    }
  }

  listing
}
