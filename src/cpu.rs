//! The machine itself: memory, register file, flag register and program counter, together with
//! the dispatch table and the operations it points to.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt::{Display, Formatter};

use prettytable::{format as TableFormat, Table};
use tracing::{enabled, trace, Level};

use crate::address::Address;
use crate::alu::{alu, AluOperation, Flag};
use crate::bytecode::{try_decode_instruction, Opcode};
use crate::error::{LoadError, VmError};
use crate::memory::{Byte, Memory};
use crate::registers::{RegisterFile, STACK_POINTER};

/// An operation reads its own operands and leaves the program counter at the next instruction.
pub type Handler = fn(&mut Cpu) -> Result<(), VmError>;

lazy_static! {
  static ref DISPATCH_TABLE: HashMap<Opcode, Handler> = {
    let mut table: HashMap<Opcode, Handler> = HashMap::new();
    table.insert(Opcode::Ldi, Cpu::ldi);
    table.insert(Opcode::Cmp, Cpu::cmp);
    table.insert(Opcode::Jmp, Cpu::jmp);
    table.insert(Opcode::Jeq, Cpu::jeq);
    table.insert(Opcode::Jne, Cpu::jne);
    table
  };
}

#[derive(Clone, Debug)]
pub struct Cpu {
  // Memory Stores
  memory    : Memory,       // RAM, written by `load`
  registers : RegisterFile, // R[0]..R[7]

  // Registers //
  pc        : usize,        // Program counter, only ever moved by an operation
  flags     : Flag,         // Outcome of the last comparison

  steps     : u64,          // Instructions executed so far
}

impl Default for Cpu {
  fn default() -> Self {
    Self::new()
  }
}

impl Cpu {

  // region Display methods

  fn make_cell_table(
      rows      : &[(String, Byte)],
      highlight : Option<usize>
    ) -> Table
  {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Address", ubl->"Contents"]);

    for (i, (label, value)) in rows.iter().enumerate() {
      let contents = format!("{:08b} {:>3}", value, value);
      match Some(i) == highlight {

        true  => {
          table.add_row(row![r->format!("* --> {} =", label), contents]);
        }

        false => {
          table.add_row(row![r->format!("{} =", label), contents]);
        }

      } // end match on highlight
    } // end for
    table
  }

  // endregion

  // region Low-level utility methods

  pub fn new() -> Cpu {
    Cpu {
      memory    : Memory::new(),
      registers : RegisterFile::new(),
      pc        : 0,
      flags     : Flag::default(),
      steps     : 0,
    }
  }

  /// Builds a machine with `image` loaded at address 0.
  pub fn with_program(image: &[Byte]) -> Result<Cpu, LoadError> {
    let mut cpu = Cpu::new();
    cpu.load(image)?;
    Ok(cpu)
  }

  pub fn load(&mut self, image: &[Byte]) -> Result<(), LoadError> {
    self.memory.load_bytes(image)
  }

  pub fn pc(&self) -> usize {
    self.pc
  }

  pub fn flags(&self) -> Flag {
    self.flags
  }

  pub fn registers(&self) -> &RegisterFile {
    &self.registers
  }

  pub fn steps(&self) -> u64 {
    self.steps
  }

  // endregion

  // region Execution loop

  /**
    Fetches the byte at the program counter, looks it up in the dispatch table and runs the
    operation it names. The loop never moves the program counter itself.
  */
  pub fn step(&mut self) -> Result<(), VmError> {
    let address = self.pc;
    let byte    = self.memory.read(address)?;

    let handler =
      Opcode::try_from(byte)
        .ok()
        .and_then(|opcode| DISPATCH_TABLE.get(&opcode))
        .ok_or(VmError::UnknownOpcode {
          opcode  : byte,
          address : Address::Memory(address)
        })?;

    if enabled!(Level::TRACE) {
      if let Ok(instruction) = try_decode_instruction(self.memory.as_slice(), address) {
        trace!(pc = address, %instruction, flags = %self.flags, "execute");
      }
    }

    handler(self)?;
    self.steps += 1;

    #[cfg(feature = "trace_computation")] println!("{}", self);

    Ok(())
  }

  /**
    Runs until the machine faults. There is no halt instruction, so this never returns `Ok`; the
    error is the fault that stopped it.
  */
  pub fn run(&mut self) -> Result<Infallible, VmError> {
    loop {
      self.step()?;
    }
  }

  /// As `run`, but gives up with `StepLimitReached` after `max_steps` instructions.
  pub fn run_for(&mut self, max_steps: u64) -> Result<Infallible, VmError> {
    for _ in 0..max_steps {
      self.step()?;
    }
    Err(VmError::StepLimitReached(max_steps))
  }

  // endregion

  // region VM instruction methods

  /// `LDI register immediate`: `R[register] = immediate`.
  fn ldi(&mut self) -> Result<(), VmError> {
    let register  = self.memory.read(self.pc + 1)?;
    let immediate = self.memory.read(self.pc + 2)?;

    self.registers.set(register as usize, immediate)?;

    self.pc += Opcode::Ldi.size();
    Ok(())
  }

  /// `CMP`: compares `R[0]` with `R[1]` in the ALU.
  fn cmp(&mut self) -> Result<(), VmError> {
    let reg_a = self.registers.get(0)?;
    let reg_b = self.registers.get(1)?;

    self.flags = alu(AluOperation::Cmp, reg_a, reg_b)?;

    self.pc += Opcode::Cmp.size();
    Ok(())
  }

  /// `JMP`: jumps to the address held in `R[pc + 1]`, then skips two cells past it.
  fn jmp(&mut self) -> Result<(), VmError> {
    let target = self.registers.get(self.pc + 1)?;

    self.pc = target as usize;

    self.pc += Opcode::Jmp.size();
    Ok(())
  }

  /// `JEQ`: as `JMP` when the flag register holds `Equal`. The register is only read when the
  /// jump is taken.
  fn jeq(&mut self) -> Result<(), VmError> {
    if self.flags == Flag::Equal {
      self.pc = self.registers.get(self.pc + 1)? as usize;
    }

    self.pc += Opcode::Jeq.size();
    Ok(())
  }

  /// `JNE`: as `JMP` when the flag register is clear.
  fn jne(&mut self) -> Result<(), VmError> {
    let target = self.registers.get(self.pc + 1)?;

    if self.flags == Flag::None {
      self.pc = target as usize;
    }

    self.pc += Opcode::Jne.size();
    Ok(())
  }

  // endregion

}


lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

impl Display for Cpu {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let register_rows: Vec<(String, Byte)> =
      self.registers
          .as_slice()
          .iter()
          .enumerate()
          .map(|(i, value)| {
            match i == STACK_POINTER {
              true  => (format!("SP {}", Address::Register(i)), *value),
              false => (format!("{}", Address::Register(i)), *value)
            }
          })
          .collect();

    // Only cells that hold something, plus the one the program counter points at.
    let memory_cells: Vec<(usize, Byte)> =
      self.memory
          .as_slice()
          .iter()
          .copied()
          .enumerate()
          .filter(|(i, value)| *value != 0 || *i == self.pc)
          .collect();
    let pc_row      = memory_cells.iter().position(|(i, _)| *i == self.pc);
    let memory_rows: Vec<(String, Byte)> =
      memory_cells.into_iter()
                  .map(|(i, value)| (format!("{}", Address::Memory(i)), value))
                  .collect();

    let r_table = Cpu::make_cell_table(&register_rows, None);
    let m_table = Cpu::make_cell_table(&memory_rows, pc_row);

    let mut combined_table = table!([r_table, m_table]);

    combined_table.set_titles(row![ub->"Registers", ub->"Memory"]);
    combined_table.set_format(*TABLE_DISPLAY_FORMAT);

    write!(
      f,
      "PC: {}\tFL: {} ({:03b})\tSteps: {}\n{}",
      self.pc, self.flags, self.flags.bits(), self.steps, combined_table
    )
  }
}
