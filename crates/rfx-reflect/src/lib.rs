//! Runtime type metadata and best-fit constructor resolution.
//!
//! This crate provides:
//! - `types`: type and constructor handles plus their metadata records
//! - `value`: argument values and constructed objects
//! - `provider`: the metadata and instantiation seams
//! - `registry`: the thread-safe `TypeRegistry` implementing every seam
//! - `assignability`: conversion rules between types
//! - `matching`: compatibility and the specificity ordering
//! - `resolver`: `ConstructorResolver`, the public entry point
//!
//! ```ignore
//! let registry = TypeRegistry::new();
//! let ty = registry.register(TypeDef::class("Greeting").public().constructor(
//!     ConstructorDef::public([TypeId::STRING], constructor_body(|args| {
//!         Ok(args[0].as_str().unwrap_or_default().to_owned())
//!     })),
//! ))?;
//! let greeting = ConstructorResolver::new(&registry).construct(ty, vec!["hi".into()])?;
//! assert_eq!(greeting.downcast_ref::<String>().map(String::as_str), Some("hi"));
//! ```

pub mod access;
pub mod assignability;
pub mod error;
pub mod escalation;
pub mod format;
pub mod invoke;
pub mod matching;
pub mod options;
pub mod provider;
pub mod registry;
pub mod resolver;
pub mod types;
pub mod value;
pub mod varargs;

pub use error::{ArgumentError, RegistryError, ResolveError, Result, TargetFailure};
pub use escalation::{AccessEscalator, DenyAllEscalation, EscalationKey};
pub use matching::{MatchKind, compare_specificity, is_more_specific};
pub use options::ResolverOptions;
pub use provider::{Instantiator, TypeMetadataProvider};
pub use registry::{ConstructorBody, ConstructorDef, TypeDef, TypeRegistry, constructor_body};
pub use resolver::ConstructorResolver;
pub use types::{
    ConstructorDescriptor, ConstructorFlags, ConstructorId, ParamList, PrimitiveKind, TypeFlags,
    TypeId, TypeInfo, TypeKind,
};
pub use value::{ArrayValue, Object, Payload, Value, infer_parameter_types};
