//! Failable function values and reflective constructor resolution.
//!
//! This crate re-exports the workspace crates:
//! - [`function`]: failable functions, consumers, predicates and suppliers
//! - [`reflect`]: the type registry and [`ConstructorResolver`]
//!
//! Call [`init_tracing`] once at startup to see resolution decisions
//! (see [`tracing_config`]).

pub use rfx_function as function;
pub use rfx_reflect as reflect;

pub use rfx_function::{
    FailableBiFunction, FailableConsumer, FailableFunction, FailableIntConsumer,
    FailablePredicate, FailableSupplier, FailableToLongBiFunction, NOP, Nop, identity, nop,
};
pub use rfx_reflect::{
    ArgumentError, ArrayValue, ConstructorDef, ConstructorDescriptor, ConstructorResolver,
    Object, RegistryError, ResolveError, ResolverOptions, TargetFailure, TypeDef, TypeId,
    TypeMetadataProvider, TypeRegistry, Value, constructor_body,
};

pub mod tracing_config;
pub use tracing_config::{LogFormat, init_tracing};

#[cfg(test)]
#[path = "../tests/integration_tests.rs"]
mod integration_tests;
