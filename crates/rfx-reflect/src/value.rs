//! Runtime values passed to and produced by constructors.

use crate::provider::TypeMetadataProvider;
use crate::types::{ParamList, PrimitiveKind, TypeId};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// The type-erased state a constructor body produces.
pub type Payload = Box<dyn Any + Send + Sync>;

/// A constructed instance: its owning type plus shared, type-erased state.
#[derive(Clone)]
pub struct Object {
    ty: TypeId,
    payload: Arc<dyn Any + Send + Sync>,
}

impl Object {
    pub fn new(ty: TypeId, payload: Payload) -> Self {
        Self {
            ty,
            payload: Arc::from(payload),
        }
    }

    /// The type this instance was constructed as.
    pub fn ty(&self) -> TypeId {
        self.ty
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.payload.is::<T>()
    }

    /// Identity comparison: true only for clones of the same instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.payload, &other.payload)
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && self.ptr_eq(other)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}

/// A homogeneous array value.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayValue {
    pub component: TypeId,
    pub items: Vec<Value>,
}

impl ArrayValue {
    pub fn new(component: TypeId, items: Vec<Value>) -> Self {
        Self { component, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A runtime argument value.
///
/// Primitive variants carry unboxed data, but like any element of an
/// argument list they report their *boxed* type as runtime type: an
/// `Int` argument is an `Integer` for matching purposes.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Byte(i8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(Arc<str>),
    Array(ArrayValue),
    Object(Object),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        Some(match self {
            Self::Bool(_) => PrimitiveKind::Boolean,
            Self::Byte(_) => PrimitiveKind::Byte,
            Self::Char(_) => PrimitiveKind::Char,
            Self::Short(_) => PrimitiveKind::Short,
            Self::Int(_) => PrimitiveKind::Int,
            Self::Long(_) => PrimitiveKind::Long,
            Self::Float(_) => PrimitiveKind::Float,
            Self::Double(_) => PrimitiveKind::Double,
            _ => return None,
        })
    }

    /// The type used when inferring a parameter list from this argument.
    pub fn runtime_type<P: TypeMetadataProvider + ?Sized>(&self, provider: &P) -> TypeId {
        match self {
            Self::Null => TypeId::NULL,
            Self::Str(_) => TypeId::STRING,
            Self::Array(array) => provider.array_of(array.component),
            Self::Object(object) => object.ty(),
            primitive => primitive
                .primitive_kind()
                .and_then(PrimitiveKind::wrapper)
                .unwrap_or(TypeId::OBJECT),
        }
    }

    /// Converts a primitive value to `target` by identity or widening.
    ///
    /// Returns `None` for non-primitive values and narrowing conversions.
    pub fn widen_to(&self, target: PrimitiveKind) -> Option<Self> {
        use PrimitiveKind as K;
        let converted = match (self, target) {
            (value, kind) if value.primitive_kind() == Some(kind) => value.clone(),
            (Self::Byte(v), K::Short) => Self::Short(i16::from(*v)),
            (Self::Byte(v), K::Int) => Self::Int(i32::from(*v)),
            (Self::Byte(v), K::Long) => Self::Long(i64::from(*v)),
            (Self::Byte(v), K::Float) => Self::Float(f32::from(*v)),
            (Self::Byte(v), K::Double) => Self::Double(f64::from(*v)),
            (Self::Short(v), K::Int) => Self::Int(i32::from(*v)),
            (Self::Short(v), K::Long) => Self::Long(i64::from(*v)),
            (Self::Short(v), K::Float) => Self::Float(f32::from(*v)),
            (Self::Short(v), K::Double) => Self::Double(f64::from(*v)),
            (Self::Char(c), K::Int) => Self::Int(*c as i32),
            (Self::Char(c), K::Long) => Self::Long(i64::from(u32::from(*c))),
            (Self::Char(c), K::Float) => Self::Float(u32::from(*c) as f32),
            (Self::Char(c), K::Double) => Self::Double(f64::from(u32::from(*c))),
            (Self::Int(v), K::Long) => Self::Long(i64::from(*v)),
            (Self::Int(v), K::Float) => Self::Float(*v as f32),
            (Self::Int(v), K::Double) => Self::Double(f64::from(*v)),
            (Self::Long(v), K::Float) => Self::Float(*v as f32),
            (Self::Long(v), K::Double) => Self::Double(*v as f64),
            (Self::Float(v), K::Double) => Self::Double(f64::from(*v)),
            _ => return None,
        };
        Some(converted)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            Self::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Self::Byte(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Self::Char(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Self::Short(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(Arc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(Arc::from(v))
    }
}

impl From<ArrayValue> for Value {
    fn from(v: ArrayValue) -> Self {
        Self::Array(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Self::Object(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Infers a parameter list from argument runtime types.
pub fn infer_parameter_types<P: TypeMetadataProvider + ?Sized>(
    provider: &P,
    args: &[Value],
) -> ParamList {
    args.iter().map(|arg| arg.runtime_type(provider)).collect()
}

#[cfg(test)]
#[path = "../tests/value_tests.rs"]
mod tests;
