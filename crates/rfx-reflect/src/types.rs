//! Type and constructor handles plus the metadata records behind them.

use bitflags::bitflags;
use smallvec::SmallVec;
use std::sync::Arc;

/// Ordered formal parameter types of a constructor.
pub type ParamList = SmallVec<[TypeId; 4]>;

/// Opaque handle for a registered type.
///
/// Built-in types live at fixed ids below [`TypeId::FIRST_USER`], so a
/// handle like `TypeId::INT` means the same thing in every registry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    /// The absent/unset handle.
    pub const INVALID: Self = Self(0);
    /// Runtime type of the null value. Assignable to every reference type.
    pub const NULL: Self = Self(1);

    pub const VOID: Self = Self(2);
    pub const BOOLEAN: Self = Self(3);
    pub const BYTE: Self = Self(4);
    pub const CHAR: Self = Self(5);
    pub const SHORT: Self = Self(6);
    pub const INT: Self = Self(7);
    pub const LONG: Self = Self(8);
    pub const FLOAT: Self = Self(9);
    pub const DOUBLE: Self = Self(10);

    pub const OBJECT: Self = Self(11);
    pub const NUMBER: Self = Self(12);
    pub const BOXED_BOOLEAN: Self = Self(13);
    pub const BOXED_BYTE: Self = Self(14);
    pub const BOXED_CHAR: Self = Self(15);
    pub const BOXED_SHORT: Self = Self(16);
    pub const BOXED_INT: Self = Self(17);
    pub const BOXED_LONG: Self = Self(18);
    pub const BOXED_FLOAT: Self = Self(19);
    pub const BOXED_DOUBLE: Self = Self(20);
    pub const STRING: Self = Self(21);

    /// First id handed out to registered (non built-in) types.
    pub const FIRST_USER: u32 = 100;

    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }

    pub const fn is_builtin(self) -> bool {
        self.is_valid() && self.0 < Self::FIRST_USER
    }
}

/// Opaque handle for a declared constructor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstructorId(pub u32);

impl ConstructorId {
    pub const INVALID: Self = Self(0);
    pub const FIRST_VALID: u32 = 1;

    pub const fn is_valid(self) -> bool {
        self.0 >= Self::FIRST_VALID
    }
}

/// The eight value primitives plus `void`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveKind {
    pub const ALL: [Self; 9] = [
        Self::Boolean,
        Self::Byte,
        Self::Char,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::Void,
    ];

    pub const fn type_id(self) -> TypeId {
        match self {
            Self::Boolean => TypeId::BOOLEAN,
            Self::Byte => TypeId::BYTE,
            Self::Char => TypeId::CHAR,
            Self::Short => TypeId::SHORT,
            Self::Int => TypeId::INT,
            Self::Long => TypeId::LONG,
            Self::Float => TypeId::FLOAT,
            Self::Double => TypeId::DOUBLE,
            Self::Void => TypeId::VOID,
        }
    }

    /// The reference type a value of this primitive boxes into.
    pub const fn wrapper(self) -> Option<TypeId> {
        match self {
            Self::Boolean => Some(TypeId::BOXED_BOOLEAN),
            Self::Byte => Some(TypeId::BOXED_BYTE),
            Self::Char => Some(TypeId::BOXED_CHAR),
            Self::Short => Some(TypeId::BOXED_SHORT),
            Self::Int => Some(TypeId::BOXED_INT),
            Self::Long => Some(TypeId::BOXED_LONG),
            Self::Float => Some(TypeId::BOXED_FLOAT),
            Self::Double => Some(TypeId::BOXED_DOUBLE),
            Self::Void => None,
        }
    }

    pub fn from_type_id(ty: TypeId) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_id() == ty)
    }

    /// The primitive that `wrapper` unboxes to.
    pub fn from_wrapper(wrapper: TypeId) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.wrapper() == Some(wrapper))
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Void => "void",
        }
    }

    /// Whether a value of this primitive converts to `target` by a widening
    /// primitive conversion. Identity is not a widening.
    pub const fn widens_to(self, target: Self) -> bool {
        use PrimitiveKind::*;
        match self {
            Byte => matches!(target, Short | Int | Long | Float | Double),
            Short | Char => matches!(target, Int | Long | Float | Double),
            Int => matches!(target, Long | Float | Double),
            Long => matches!(target, Float | Double),
            Float => matches!(target, Double),
            Boolean | Double | Void => false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// The type of the null value.
    Null,
    Primitive(PrimitiveKind),
    Class,
    Interface,
    Array { component: TypeId },
}

bitflags! {
    /// Declared modifiers of a type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeFlags: u8 {
        const PUBLIC = 1 << 0;
        const ABSTRACT = 1 << 1;
        const FINAL = 1 << 2;
    }
}

bitflags! {
    /// Declared modifiers of a constructor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ConstructorFlags: u8 {
        const PUBLIC = 1 << 0;
        /// The last parameter is an array that accepts trailing arguments.
        const VARIADIC = 1 << 1;
        /// The security policy forbids escalating this constructor.
        const ESCALATION_DENIED = 1 << 2;
    }
}

/// Metadata for one registered type.
#[derive(Clone, Debug)]
pub struct TypeInfo {
    pub id: TypeId,
    pub name: Arc<str>,
    pub kind: TypeKind,
    pub flags: TypeFlags,
    /// Direct superclass. `None` for `Object`, interfaces, primitives.
    pub superclass: Option<TypeId>,
    /// Directly implemented (or, for interfaces, extended) interfaces.
    pub interfaces: SmallVec<[TypeId; 2]>,
    /// Lexically enclosing type.
    pub enclosing: Option<TypeId>,
    /// Declared constructors in declaration order.
    pub constructors: Vec<ConstructorId>,
}

impl TypeInfo {
    pub fn is_public(&self) -> bool {
        self.flags.contains(TypeFlags::PUBLIC)
    }

    /// Abstract classes and interfaces cannot be instantiated.
    pub fn is_abstract(&self) -> bool {
        self.flags.contains(TypeFlags::ABSTRACT) || self.kind == TypeKind::Interface
    }

    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self.kind {
            TypeKind::Primitive(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn component_type(&self) -> Option<TypeId> {
        match self.kind {
            TypeKind::Array { component } => Some(component),
            _ => None,
        }
    }
}

/// An immutable view of one declared constructor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructorDescriptor {
    pub id: ConstructorId,
    pub owner: TypeId,
    pub params: ParamList,
    pub flags: ConstructorFlags,
}

impl ConstructorDescriptor {
    pub fn is_public(&self) -> bool {
        self.flags.contains(ConstructorFlags::PUBLIC)
    }

    pub fn is_variadic(&self) -> bool {
        self.flags.contains(ConstructorFlags::VARIADIC)
    }

    pub fn escalation_denied(&self) -> bool {
        self.flags.contains(ConstructorFlags::ESCALATION_DENIED)
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod tests;
