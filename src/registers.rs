//! The general purpose register file.

use crate::address::{Address, AddressNumberType};
use crate::error::VmError;
use crate::memory::Byte;

pub const REGISTER_COUNT: usize = 8;

/// Reserved by convention as the stack pointer. No current instruction touches it.
pub const STACK_POINTER: usize = 7;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RegisterFile {
  cells: [Byte; REGISTER_COUNT]
}

impl RegisterFile {

  pub fn new() -> RegisterFile {
    RegisterFile::default()
  }

  pub fn get(&self, index: AddressNumberType) -> Result<Byte, VmError> {
    self.cells
        .get(index)
        .copied()
        .ok_or(VmError::OutOfBounds(Address::Register(index)))
  }

  pub fn set(&mut self, index: AddressNumberType, value: Byte) -> Result<(), VmError> {
    match self.cells.get_mut(index) {
      Some(cell) => {
        *cell = value;
        Ok(())
      }
      None => Err(VmError::OutOfBounds(Address::Register(index)))
    }
  }

  pub fn as_slice(&self) -> &[Byte] {
    &self.cells
  }

}
