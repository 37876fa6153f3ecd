//! The shared no-op value.

use crate::consumer::{FailableConsumer, FailableIntConsumer};
use crate::to_long::FailableToLongBiFunction;

/// Does nothing and never fails.
///
/// Consumers accept and discard; the to-long function yields `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nop;

/// The NOP singleton.
pub const NOP: Nop = Nop;

/// Gets the NOP singleton.
pub const fn nop() -> Nop {
    NOP
}

impl<E> FailableIntConsumer<E> for Nop {
    #[inline]
    fn accept(&self, _value: i32) -> Result<(), E> {
        Ok(())
    }
}

impl<T, E> FailableConsumer<T, E> for Nop {
    #[inline]
    fn accept(&self, _value: &T) -> Result<(), E> {
        Ok(())
    }
}

impl<T, U, E> FailableToLongBiFunction<T, U, E> for Nop {
    #[inline]
    fn apply_as_long(&self, _first: &T, _second: &U) -> Result<i64, E> {
        Ok(0)
    }
}
