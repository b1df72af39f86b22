//! The machine's random access memory: a fixed array of byte cells, written once by the loader
//! and read during execution.

use crate::address::{Address, AddressNumberType};
use crate::error::{LoadError, VmError};

pub type Byte = u8;

/// Number of addressable cells.
pub const MEMORY_SIZE: usize = 100;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Memory {
  cells: [Byte; MEMORY_SIZE]
}

impl Default for Memory {
  fn default() -> Self {
    Self::new()
  }
}

impl Memory {

  pub fn new() -> Memory {
    Memory {
      cells: [0; MEMORY_SIZE]
    }
  }

  /// Reads the cell at `index`. Out of range reads are a fault, never a silent zero.
  pub fn read(&self, index: AddressNumberType) -> Result<Byte, VmError> {
    self.cells
        .get(index)
        .copied()
        .ok_or(VmError::OutOfBounds(Address::Memory(index)))
  }

  /**
    Writes `image` into consecutive cells starting at address 0. Cells past the end of the image
    keep their previous contents.
  */
  pub fn load_bytes(&mut self, image: &[Byte]) -> Result<(), LoadError> {
    if image.len() > MEMORY_SIZE {
      return Err(LoadError::ProgramTooLarge {
        length   : image.len(),
        capacity : MEMORY_SIZE
      });
    }
    self.cells[..image.len()].copy_from_slice(image);
    Ok(())
  }

  pub fn as_slice(&self) -> &[Byte] {
    &self.cells
  }

}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn zero_initialized(){
    let memory = Memory::new();
    assert_eq!(memory.as_slice().len(), 100);
    assert!(memory.as_slice().iter().all(|&b| b == 0));
  }

  #[test]
  fn read_bounds(){
    let mut memory = Memory::new();
    let mut image = [0u8; MEMORY_SIZE];
    image[99] = 0xAB;
    memory.load_bytes(&image).unwrap();
    assert_eq!(memory.read(99), Ok(0xAB));
    assert_eq!(memory.read(100), Err(VmError::OutOfBounds(Address::Memory(100))));
    assert_eq!(memory.read(250), Err(VmError::OutOfBounds(Address::Memory(250))));
  }

  #[test]
  fn load_image(){
    let mut memory = Memory::new();
    memory.load_bytes(&[1, 2, 3]).unwrap();
    assert_eq!(&memory.as_slice()[..4], &[1, 2, 3, 0]);
  }

  #[test]
  fn load_full_image(){
    let mut memory = Memory::new();
    let image = [0xFFu8; MEMORY_SIZE];
    memory.load_bytes(&image).unwrap();
    assert_eq!(memory.read(MEMORY_SIZE - 1), Ok(0xFF));
  }

  #[test]
  fn load_oversized_image(){
    let mut memory = Memory::new();
    let image = vec![0u8; MEMORY_SIZE + 1];
    match memory.load_bytes(&image) {
      Err(LoadError::ProgramTooLarge { length, capacity }) => {
        assert_eq!(length, 101);
        assert_eq!(capacity, 100);
      }
      other => panic!("expected ProgramTooLarge, got {:?}", other)
    }
    assert!(memory.as_slice().iter().all(|&b| b == 0));
  }
}
