//! Error types for registration, resolution and invocation.
//!
//! All fallible resolver operations return [`Result<T>`]. Resolution never
//! distinguishes "no compatible constructor" from "compatible but not
//! accessible": both surface as [`ResolveError::NotFound`].

use crate::types::TypeId;
use std::sync::Arc;

/// Result alias for resolver operations.
pub type Result<T> = std::result::Result<T, ResolveError>;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The requested type handle is absent. Checked before any lookup.
    #[error("type handle is absent")]
    NullType,

    /// The handle does not name a type known to the metadata provider.
    #[error("unknown type handle {0:?}")]
    UnknownType(TypeId),

    /// No accessible constructor resolves for the requested signature.
    #[error("No such accessible constructor on object: {type_name}{signature}")]
    NotFound {
        type_name: Arc<str>,
        signature: String,
    },

    /// The arguments cannot be shaped to the resolved constructor.
    #[error("invalid arguments for constructor of {type_name}: {source}")]
    InvalidArgument {
        type_name: Arc<str>,
        #[source]
        source: ArgumentError,
    },

    /// Construction itself failed. Carried unchanged.
    #[error(transparent)]
    Target(#[from] TargetFailure),
}

impl ResolveError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The target failure, if construction itself failed.
    pub fn target_failure(&self) -> Option<&TargetFailure> {
        match self {
            Self::Target(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Mismatch between argument values and a constructor's formal parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    #[error("expected {expected} arguments, got {actual}")]
    Arity { expected: usize, actual: usize },

    #[error("variadic constructor needs at least {fixed} leading arguments, got {actual}")]
    TooFewForVariadic { fixed: usize, actual: usize },

    #[error("argument {index} is null but parameter type {expected} is primitive")]
    NullForPrimitive { index: usize, expected: Arc<str> },

    #[error("argument {index} of type {found} does not convert to {expected}")]
    Mismatch {
        index: usize,
        expected: Arc<str>,
        found: Arc<str>,
    },

    #[error("variadic parameter type {param} is not an array")]
    MalformedVariadic { param: Arc<str> },
}

/// Failure of the construction step itself.
#[derive(Debug, thiserror::Error)]
pub enum TargetFailure {
    /// The type is abstract or an interface.
    #[error("cannot instantiate abstract type {type_name}")]
    Abstract { type_name: Arc<str> },

    /// The constructor is neither accessible nor escalated.
    #[error("constructor of {type_name} is not accessible")]
    Inaccessible { type_name: Arc<str> },

    /// The constructor body failed.
    #[error("constructor of {type_name} failed: {source}")]
    Threw {
        type_name: Arc<str>,
        #[source]
        source: anyhow::Error,
    },
}

impl TargetFailure {
    /// The body's own error, for `Threw` failures.
    pub fn cause(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Threw { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Registration failures of the type registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("type `{0}` is already registered")]
    DuplicateName(Arc<str>),

    #[error("type `{owner}` references unknown type {referenced:?}")]
    UnknownType { owner: Arc<str>, referenced: TypeId },

    #[error("superclass of `{owner}` must be a class, found `{superclass}`")]
    InvalidSuperclass {
        owner: Arc<str>,
        superclass: Arc<str>,
    },

    #[error("`{owner}` implements `{interface}`, which is not an interface")]
    NotAnInterface { owner: Arc<str>, interface: Arc<str> },

    #[error("interface `{owner}` cannot declare constructors")]
    InterfaceConstructor { owner: Arc<str> },

    #[error("variadic constructor of `{owner}` must end in an array parameter")]
    VariadicWithoutArray { owner: Arc<str> },

    #[error("`{owner}` declares two constructors with signature {signature}")]
    DuplicateSignature { owner: Arc<str>, signature: String },
}
