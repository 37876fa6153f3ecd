//! Thread-safe registration table for types and their constructors.
//!
//! `TypeRegistry` is the crate's concrete implementation of every
//! collaborator the resolver needs:
//!
//! | Trait | Role |
//! |-------|------|
//! | `TypeMetadataProvider` | type and constructor lookup |
//! | `Instantiator` | runs constructor bodies |
//! | `AccessEscalator` | records escalation in the process-wide table |
//!
//! ## Usage
//!
//! ```ignore
//! let registry = TypeRegistry::new();
//! let point = registry.register(
//!     TypeDef::class("Point").public().constructor(ConstructorDef::public(
//!         [TypeId::INT, TypeId::INT],
//!         constructor_body(|args| Ok((args[0].as_int(), args[1].as_int()))),
//!     )),
//! )?;
//! ```
//!
//! A type's constructor list is fixed when it is registered.

use crate::access;
use crate::error::{RegistryError, TargetFailure};
use crate::escalation::{self, AccessEscalator, EscalationKey};
use crate::format::format_signature;
use crate::provider::{Instantiator, TypeMetadataProvider};
use crate::types::{
    ConstructorDescriptor, ConstructorFlags, ConstructorId, ParamList, PrimitiveKind, TypeFlags,
    TypeId, TypeInfo, TypeKind,
};
use crate::value::{Object, Payload, Value};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rfx_function::FailableFunction;
use rustc_hash::{FxBuildHasher, FxHashSet};
use smallvec::SmallVec;
use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use tracing::{debug, trace};

/// Global counter for assigning unique instance IDs to `TypeRegistry`
/// instances. Escalation state is keyed by it.
static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

/// The body of a constructor: argument values in, instance state out.
pub type ConstructorBody =
    Arc<dyn FailableFunction<Vec<Value>, Payload, anyhow::Error> + Send + Sync>;

/// Adapts a closure that returns a concrete instance into a constructor body.
pub fn constructor_body<T, F>(
    f: F,
) -> impl FailableFunction<Vec<Value>, Payload, anyhow::Error> + Send + Sync + 'static
where
    T: Any + Send + Sync,
    F: Fn(Vec<Value>) -> anyhow::Result<T> + Send + Sync + 'static,
{
    f.and_then(|instance: T| Ok::<Payload, anyhow::Error>(Box::new(instance)))
}

// =============================================================================
// Definitions
// =============================================================================

/// A constructor to be declared on a [`TypeDef`].
pub struct ConstructorDef {
    params: ParamList,
    flags: ConstructorFlags,
    body: ConstructorBody,
}

impl ConstructorDef {
    pub fn public<B>(params: impl IntoIterator<Item = TypeId>, body: B) -> Self
    where
        B: FailableFunction<Vec<Value>, Payload, anyhow::Error> + Send + Sync + 'static,
    {
        Self {
            params: params.into_iter().collect(),
            flags: ConstructorFlags::PUBLIC,
            body: Arc::new(body),
        }
    }

    pub fn non_public<B>(params: impl IntoIterator<Item = TypeId>, body: B) -> Self
    where
        B: FailableFunction<Vec<Value>, Payload, anyhow::Error> + Send + Sync + 'static,
    {
        Self {
            params: params.into_iter().collect(),
            flags: ConstructorFlags::empty(),
            body: Arc::new(body),
        }
    }

    /// Marks the last parameter as accepting trailing arguments.
    pub fn variadic(mut self) -> Self {
        self.flags |= ConstructorFlags::VARIADIC;
        self
    }

    /// Forbids accessibility escalation for this constructor.
    pub fn deny_escalation(mut self) -> Self {
        self.flags |= ConstructorFlags::ESCALATION_DENIED;
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum DefShape {
    Class,
    Interface,
}

/// A class or interface to be registered.
pub struct TypeDef {
    name: Arc<str>,
    shape: DefShape,
    flags: TypeFlags,
    superclass: Option<TypeId>,
    interfaces: SmallVec<[TypeId; 2]>,
    enclosing: Option<TypeId>,
    constructors: Vec<ConstructorDef>,
}

impl TypeDef {
    /// A non-public class extending `Object`.
    pub fn class(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            shape: DefShape::Class,
            flags: TypeFlags::empty(),
            superclass: Some(TypeId::OBJECT),
            interfaces: SmallVec::new(),
            enclosing: None,
            constructors: Vec::new(),
        }
    }

    /// A non-public interface.
    pub fn interface(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            shape: DefShape::Interface,
            flags: TypeFlags::ABSTRACT,
            superclass: None,
            interfaces: SmallVec::new(),
            enclosing: None,
            constructors: Vec::new(),
        }
    }

    pub fn public(mut self) -> Self {
        self.flags |= TypeFlags::PUBLIC;
        self
    }

    pub fn abstract_type(mut self) -> Self {
        self.flags |= TypeFlags::ABSTRACT;
        self
    }

    pub fn final_type(mut self) -> Self {
        self.flags |= TypeFlags::FINAL;
        self
    }

    pub fn extends(mut self, superclass: TypeId) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn implements(mut self, interface: TypeId) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Declares this type as lexically nested in `outer`.
    pub fn enclosed_in(mut self, outer: TypeId) -> Self {
        self.enclosing = Some(outer);
        self
    }

    /// Declares a constructor. Declaration order is preserved.
    pub fn constructor(mut self, ctor: ConstructorDef) -> Self {
        self.constructors.push(ctor);
        self
    }
}

// =============================================================================
// TypeRegistry
// =============================================================================

struct ConstructorEntry {
    descriptor: Arc<ConstructorDescriptor>,
    body: ConstructorBody,
}

/// Thread-safe storage for type metadata and constructor bodies.
///
/// Uses `DashMap` so registration and lookup can happen from multiple
/// threads through a shared reference.
pub struct TypeRegistry {
    /// Unique instance ID (escalation keys are scoped to it)
    instance_id: u64,

    types: DashMap<TypeId, Arc<TypeInfo>, FxBuildHasher>,
    names: DashMap<Arc<str>, TypeId, FxBuildHasher>,

    /// Component `TypeId` -> interned array `TypeId`
    arrays: DashMap<TypeId, TypeId, FxBuildHasher>,

    constructors: DashMap<ConstructorId, ConstructorEntry, FxBuildHasher>,

    next_type: AtomicU32,
    next_ctor: AtomicU32,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a registry pre-populated with the built-in types.
    pub fn new() -> Self {
        let instance_id = NEXT_INSTANCE_ID.fetch_add(1, Ordering::SeqCst);
        trace!(instance_id, "TypeRegistry::new - creating new instance");
        let registry = Self {
            instance_id,
            types: DashMap::default(),
            names: DashMap::default(),
            arrays: DashMap::default(),
            constructors: DashMap::default(),
            next_type: AtomicU32::new(TypeId::FIRST_USER),
            next_ctor: AtomicU32::new(ConstructorId::FIRST_VALID),
        };
        registry.seed_builtins();
        registry
    }

    pub fn instance_id(&self) -> u64 {
        self.instance_id
    }

    fn seed_builtins(&self) {
        let final_public = TypeFlags::PUBLIC | TypeFlags::FINAL;

        self.insert_builtin(TypeId::NULL, "null", TypeKind::Null, TypeFlags::PUBLIC, None);
        for kind in PrimitiveKind::ALL {
            self.insert_builtin(
                kind.type_id(),
                kind.name(),
                TypeKind::Primitive(kind),
                final_public,
                None,
            );
        }

        self.insert_builtin(
            TypeId::OBJECT,
            "Object",
            TypeKind::Class,
            TypeFlags::PUBLIC,
            None,
        );
        self.insert_builtin(
            TypeId::NUMBER,
            "Number",
            TypeKind::Class,
            TypeFlags::PUBLIC | TypeFlags::ABSTRACT,
            Some(TypeId::OBJECT),
        );
        let wrappers = [
            (TypeId::BOXED_BOOLEAN, "Boolean", TypeId::OBJECT),
            (TypeId::BOXED_BYTE, "Byte", TypeId::NUMBER),
            (TypeId::BOXED_CHAR, "Character", TypeId::OBJECT),
            (TypeId::BOXED_SHORT, "Short", TypeId::NUMBER),
            (TypeId::BOXED_INT, "Integer", TypeId::NUMBER),
            (TypeId::BOXED_LONG, "Long", TypeId::NUMBER),
            (TypeId::BOXED_FLOAT, "Float", TypeId::NUMBER),
            (TypeId::BOXED_DOUBLE, "Double", TypeId::NUMBER),
        ];
        for (id, name, superclass) in wrappers {
            self.insert_builtin(id, name, TypeKind::Class, final_public, Some(superclass));
        }
        self.insert_builtin(
            TypeId::STRING,
            "String",
            TypeKind::Class,
            final_public,
            Some(TypeId::OBJECT),
        );
    }

    fn insert_builtin(
        &self,
        id: TypeId,
        name: &str,
        kind: TypeKind,
        flags: TypeFlags,
        superclass: Option<TypeId>,
    ) {
        let name: Arc<str> = Arc::from(name);
        self.names.insert(Arc::clone(&name), id);
        self.types.insert(
            id,
            Arc::new(TypeInfo {
                id,
                name,
                kind,
                flags,
                superclass,
                interfaces: SmallVec::new(),
                enclosing: None,
                constructors: Vec::new(),
            }),
        );
    }

    fn allocate_type(&self) -> TypeId {
        TypeId(self.next_type.fetch_add(1, Ordering::SeqCst))
    }

    fn allocate_ctor(&self) -> ConstructorId {
        ConstructorId(self.next_ctor.fetch_add(1, Ordering::SeqCst))
    }

    /// Register a class or interface and return its handle.
    pub fn register(&self, def: TypeDef) -> Result<TypeId, RegistryError> {
        self.validate(&def)?;

        let vacant = match self.names.entry(Arc::clone(&def.name)) {
            Entry::Occupied(_) => return Err(RegistryError::DuplicateName(def.name)),
            Entry::Vacant(vacant) => vacant,
        };

        let id = self.allocate_type();
        let mut ctor_ids = Vec::with_capacity(def.constructors.len());
        for ctor in def.constructors {
            let ctor_id = self.allocate_ctor();
            let descriptor = Arc::new(ConstructorDescriptor {
                id: ctor_id,
                owner: id,
                params: ctor.params,
                flags: ctor.flags,
            });
            trace!(
                instance_id = self.instance_id,
                ctor_id = ctor_id.0,
                owner = %def.name,
                arity = descriptor.arity(),
                "TypeRegistry::register constructor"
            );
            self.constructors.insert(
                ctor_id,
                ConstructorEntry {
                    descriptor,
                    body: ctor.body,
                },
            );
            ctor_ids.push(ctor_id);
        }

        let kind = match def.shape {
            DefShape::Class => TypeKind::Class,
            DefShape::Interface => TypeKind::Interface,
        };
        let info = TypeInfo {
            id,
            name: Arc::clone(&def.name),
            kind,
            flags: def.flags,
            superclass: def.superclass,
            interfaces: def.interfaces,
            enclosing: def.enclosing,
            constructors: ctor_ids,
        };
        self.types.insert(id, Arc::new(info));
        vacant.insert(id);

        debug!(
            instance_id = self.instance_id,
            type_id = id.0,
            name = %def.name,
            kind = ?kind,
            "TypeRegistry::register"
        );
        Ok(id)
    }

    fn validate(&self, def: &TypeDef) -> Result<(), RegistryError> {
        let unknown = |referenced: TypeId| RegistryError::UnknownType {
            owner: Arc::clone(&def.name),
            referenced,
        };

        if let Some(superclass) = def.superclass {
            let info = self.type_info(superclass).ok_or_else(|| unknown(superclass))?;
            if info.kind != TypeKind::Class || info.flags.contains(TypeFlags::FINAL) {
                return Err(RegistryError::InvalidSuperclass {
                    owner: Arc::clone(&def.name),
                    superclass: Arc::clone(&info.name),
                });
            }
        }
        for &interface in &def.interfaces {
            let info = self.type_info(interface).ok_or_else(|| unknown(interface))?;
            if info.kind != TypeKind::Interface {
                return Err(RegistryError::NotAnInterface {
                    owner: Arc::clone(&def.name),
                    interface: Arc::clone(&info.name),
                });
            }
        }
        if let Some(outer) = def.enclosing {
            if !self.contains_type(outer) {
                return Err(unknown(outer));
            }
        }

        if def.shape == DefShape::Interface && !def.constructors.is_empty() {
            return Err(RegistryError::InterfaceConstructor {
                owner: Arc::clone(&def.name),
            });
        }

        let mut signatures: FxHashSet<&[TypeId]> = FxHashSet::default();
        for ctor in &def.constructors {
            if let Some(&param) = ctor.params.iter().find(|&&p| !self.is_parameter_type(p)) {
                return Err(unknown(param));
            }
            if ctor.flags.contains(ConstructorFlags::VARIADIC) {
                let ends_in_array = ctor
                    .params
                    .last()
                    .is_some_and(|&last| self.component_type(last).is_some());
                if !ends_in_array {
                    return Err(RegistryError::VariadicWithoutArray {
                        owner: Arc::clone(&def.name),
                    });
                }
            }
            if !signatures.insert(ctor.params.as_slice()) {
                return Err(RegistryError::DuplicateSignature {
                    owner: Arc::clone(&def.name),
                    signature: format_signature(self, &ctor.params),
                });
            }
        }
        Ok(())
    }

    /// Types that can appear as formal parameters: anything but null/void.
    fn is_parameter_type(&self, ty: TypeId) -> bool {
        ty != TypeId::NULL && ty != TypeId::VOID && self.contains_type(ty)
    }

    /// Look up a type by name. Array types are named `Component[]`.
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.names.get(name).map(|r| *r)
    }

    /// Number of registered types, built-ins and arrays included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn escalation_key(&self, ctor: &ConstructorDescriptor) -> EscalationKey {
        EscalationKey {
            provider: self.instance_id,
            constructor: ctor.id,
        }
    }

    /// Whether `ctor` has been escalated through this registry.
    pub fn is_escalated(&self, ctor: &ConstructorDescriptor) -> bool {
        escalation::is_escalated(self.escalation_key(ctor))
    }

    fn owns(&self, ctor: &ConstructorDescriptor) -> bool {
        self.constructors
            .get(&ctor.id)
            .is_some_and(|entry| entry.descriptor.owner == ctor.owner)
    }
}

impl TypeMetadataProvider for TypeRegistry {
    fn type_info(&self, ty: TypeId) -> Option<Arc<TypeInfo>> {
        self.types.get(&ty).map(|r| Arc::clone(r.value()))
    }

    fn constructor(&self, id: ConstructorId) -> Option<Arc<ConstructorDescriptor>> {
        self.constructors
            .get(&id)
            .map(|r| Arc::clone(&r.value().descriptor))
    }

    fn array_of(&self, component: TypeId) -> TypeId {
        if let Some(existing) = self.arrays.get(&component) {
            return *existing;
        }
        let Some(component_info) = self.type_info(component) else {
            return TypeId::INVALID;
        };
        if component == TypeId::NULL || component == TypeId::VOID {
            return TypeId::INVALID;
        }

        *self.arrays.entry(component).or_insert_with(|| {
            let id = self.allocate_type();
            let name: Arc<str> = Arc::from(format!("{}[]", component_info.name));
            let flags = if component_info.is_public() {
                TypeFlags::PUBLIC | TypeFlags::FINAL
            } else {
                TypeFlags::FINAL
            };
            trace!(
                instance_id = self.instance_id,
                type_id = id.0,
                name = %name,
                "TypeRegistry::array_of - interning array type"
            );
            // A registered type may already own this name.
            self.names.entry(Arc::clone(&name)).or_insert(id);
            self.types.insert(
                id,
                Arc::new(TypeInfo {
                    id,
                    name,
                    kind: TypeKind::Array { component },
                    flags,
                    superclass: Some(TypeId::OBJECT),
                    interfaces: SmallVec::new(),
                    enclosing: None,
                    constructors: Vec::new(),
                }),
            );
            id
        })
    }
}

impl Instantiator for TypeRegistry {
    fn instantiate(
        &self,
        ctor: &ConstructorDescriptor,
        args: Vec<Value>,
    ) -> Result<Object, TargetFailure> {
        let type_name = self.type_name(ctor.owner);
        let Some(body) = self
            .constructors
            .get(&ctor.id)
            .filter(|entry| entry.descriptor.owner == ctor.owner)
            .map(|entry| Arc::clone(&entry.body))
        else {
            return Err(TargetFailure::Inaccessible { type_name });
        };

        if self
            .type_info(ctor.owner)
            .is_none_or(|info| info.is_abstract())
        {
            return Err(TargetFailure::Abstract { type_name });
        }
        if !access::is_accessible(self, ctor) && !self.is_escalated(ctor) {
            return Err(TargetFailure::Inaccessible { type_name });
        }

        trace!(
            instance_id = self.instance_id,
            ctor_id = ctor.id.0,
            owner = %type_name,
            "TypeRegistry::instantiate"
        );
        match body.apply(args) {
            Ok(payload) => Ok(Object::new(ctor.owner, payload)),
            Err(source) => Err(TargetFailure::Threw { type_name, source }),
        }
    }
}

impl AccessEscalator for TypeRegistry {
    fn try_escalate(&self, ctor: &ConstructorDescriptor) -> bool {
        if !self.owns(ctor) {
            return false;
        }
        let key = self.escalation_key(ctor);
        if escalation::is_escalated(key) {
            return true;
        }
        if ctor.escalation_denied() {
            trace!(
                instance_id = self.instance_id,
                ctor_id = ctor.id.0,
                "TypeRegistry::try_escalate - denied by policy"
            );
            return false;
        }
        if escalation::record(key) {
            debug!(
                instance_id = self.instance_id,
                ctor_id = ctor.id.0,
                owner = %self.type_name(ctor.owner),
                "TypeRegistry::try_escalate - escalated"
            );
        }
        true
    }
}

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod tests;
