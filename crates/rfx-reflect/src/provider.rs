//! Capability traits for the collaborators the resolver depends on.
//!
//! The resolver never inspects types directly. Everything it needs comes
//! through three seams:
//!
//! - [`TypeMetadataProvider`]: names, visibility, hierarchy, constructors
//! - [`Instantiator`]: the actual construction of an instance
//! - [`AccessEscalator`](crate::escalation::AccessEscalator): best-effort
//!   access widening
//!
//! [`TypeRegistry`](crate::registry::TypeRegistry) implements all three.

use crate::assignability;
use crate::error::TargetFailure;
use crate::types::{ConstructorDescriptor, ConstructorId, PrimitiveKind, TypeId, TypeInfo};
use crate::value::{Object, Value};
use std::sync::Arc;

/// Read-only access to type metadata.
///
/// Only [`type_info`](Self::type_info), [`constructor`](Self::constructor)
/// and [`array_of`](Self::array_of) are required; everything else derives
/// from them.
pub trait TypeMetadataProvider {
    fn type_info(&self, ty: TypeId) -> Option<Arc<TypeInfo>>;

    fn constructor(&self, id: ConstructorId) -> Option<Arc<ConstructorDescriptor>>;

    /// The array type with the given component, or `TypeId::INVALID` when
    /// the component cannot be an array element.
    fn array_of(&self, component: TypeId) -> TypeId;

    fn contains_type(&self, ty: TypeId) -> bool {
        self.type_info(ty).is_some()
    }

    fn type_name(&self, ty: TypeId) -> Arc<str> {
        match self.type_info(ty) {
            Some(info) => Arc::clone(&info.name),
            None => Arc::from(format!("<unknown type {}>", ty.0)),
        }
    }

    fn is_public_type(&self, ty: TypeId) -> bool {
        self.type_info(ty).is_some_and(|info| info.is_public())
    }

    fn enclosing_type(&self, ty: TypeId) -> Option<TypeId> {
        self.type_info(ty).and_then(|info| info.enclosing)
    }

    fn superclass(&self, ty: TypeId) -> Option<TypeId> {
        self.type_info(ty).and_then(|info| info.superclass)
    }

    fn primitive_kind(&self, ty: TypeId) -> Option<PrimitiveKind> {
        PrimitiveKind::from_type_id(ty)
    }

    fn component_type(&self, ty: TypeId) -> Option<TypeId> {
        self.type_info(ty).and_then(|info| info.component_type())
    }

    /// Declared constructors of `ty` in declaration order.
    fn declared_constructors(&self, ty: TypeId) -> Vec<Arc<ConstructorDescriptor>> {
        match self.type_info(ty) {
            Some(info) => info
                .constructors
                .iter()
                .filter_map(|&id| self.constructor(id))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Whether a value of type `from` can be passed where `to` is expected.
    fn is_assignable(&self, from: TypeId, to: TypeId, autoboxing: bool) -> bool {
        assignability::is_assignable(self, from, to, autoboxing)
    }

    /// Whether `wrapper` is the boxed form of `primitive`.
    fn is_primitive_wrapper_of(&self, wrapper: TypeId, primitive: TypeId) -> bool {
        assignability::is_primitive_wrapper_of(wrapper, primitive)
    }
}

/// Performs the construction of a resolved constructor.
///
/// `args` has already been checked against the constructor's parameters.
pub trait Instantiator {
    fn instantiate(
        &self,
        ctor: &ConstructorDescriptor,
        args: Vec<Value>,
    ) -> Result<Object, TargetFailure>;
}
