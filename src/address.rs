//! An `Either` type that holds the address of either a memory cell or a register, with some
//! convenience functions.

use std::ops::Add;
use std::fmt::{Display, Formatter};

// `AddressNumberType` is `usize`, as it is naturally an index into a memory store.
pub type AddressNumberType = usize;

#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum Address{
  /// An index into `RAM`.
  Memory(AddressNumberType),
  /// An index into the register file `R`.
  Register(AddressNumberType)
}

impl Display for Address{
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self{
      Address::Memory(i) => {
        write!(f, "RAM[{}]", i)
      },
      Address::Register(i) => {
        write!(f, "R[{}]", i)
      }
    }
  }
}

// Increment an address
impl Add<AddressNumberType> for Address{
  type Output = Address;
  fn add(self, rhs: AddressNumberType) -> Address{
    match self{
      Address::Memory(i) => {
        Address::Memory(i+rhs)
      },
      Address::Register(i) => {
        Address::Register(i+rhs)
      }
    }
  }
}
