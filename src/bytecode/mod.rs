/*!

  Programs are a flat sequence of bytes. Every instruction starts with a one byte opcode that
  is followed by its operand bytes, so an instruction occupies two or three consecutive memory
  cells. The sizes are:

    LDI:  [Opcode:8][Register:8][Immediate:8]
    CMP:  [Opcode:8][Unused:8][Unused:8]
    JMP, JEQ, JNE:  [Opcode:8][Unused:8]

  `CMP` always compares `R[0]` with `R[1]`, so its two operand bytes are skipped but never read.
  The jumps take their target from the *register file* at index `pc + 1`, not from the byte that
  follows the opcode in memory. That conflation of an instruction address with a register index
  is a quirk of this machine, kept because programs written for it depend on it.

*/

mod binary;
mod instruction;

pub use binary::parse_program_text;
pub use instruction::{disassemble, try_decode_instruction};

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};

/**
  Opcodes of the virtual machine.

  The encodings follow the LS-8 convention `AABCDDDD`: `AA` is the operand count, `B` marks an
  ALU operation, `C` marks an instruction that sets the program counter itself, and `DDDD`
  identifies the instruction.
*/
#[derive(
  StrumDisplay, IntoStaticStr, EnumString, EnumIter, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,          Eq, PartialEq,  Debug,    Hash
)]
#[strum(serialize_all = "UPPERCASE")]
#[repr(u8)]
pub enum Opcode {
  Ldi = 0b1000_0010, // ldi( register, immediate )
  Cmp = 0b1010_0111, // cmp( )
  Jmp = 0b0101_0100, // jmp( R[pc + 1] )
  Jeq = 0b0101_0101, // jeq( R[pc + 1] )
  Jne = 0b0101_0110, // jne( R[pc + 1] )
}

impl Opcode {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  /// Number of memory cells the instruction occupies, and so how far it advances the program
  /// counter when it does not jump.
  pub fn size(&self) -> usize {
    // `AA` counts operands; the opcode itself takes one more cell.
    (self.code() >> 6) as usize + 1
  }
}
