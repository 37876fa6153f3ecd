//! Failable functional values.
//!
//! Each trait here mirrors a plain function shape (`Fn(T) -> R`,
//! `Fn(&T)`, `Fn(i32)`, ...) but lets the body fail with a caller-chosen
//! error type `E`. Closures returning `Result` implement the traits through
//! blanket impls, so failable logic can be stored, passed around and
//! composed as ordinary values:
//!
//! ```ignore
//! use rfx_function::{FailableFunction, FailableIntConsumer};
//!
//! let parse = |s: &str| s.parse::<i32>();
//! let double = |n: i32| Ok::<_, std::num::ParseIntError>(n * 2);
//! assert_eq!(parse.and_then(double).apply("21"), Ok(42));
//! ```
//!
//! Composition short-circuits: the second stage never runs once the first
//! has failed.

pub mod consumer;
pub mod function;
pub mod nop;
pub mod predicate;
pub mod supplier;
pub mod to_long;

pub use consumer::{ConsumerAndThen, FailableConsumer, FailableIntConsumer, IntConsumerAndThen};
pub use function::{
    BiFunctionAndThen, Compose, FailableBiFunction, FailableFunction, FunctionAndThen, Identity,
    identity,
};
pub use nop::{NOP, Nop, nop};
pub use predicate::{And, FailablePredicate, Negate, Or};
pub use supplier::FailableSupplier;
pub use to_long::FailableToLongBiFunction;
