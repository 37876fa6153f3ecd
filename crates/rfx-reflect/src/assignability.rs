//! Assignability rules between type handles.
//!
//! Mirrors method-invocation conversion: identity, widening primitive
//! conversion, optional boxing/unboxing, reference widening along the
//! superclass and interface graph, and array covariance over reference
//! components.

use crate::provider::TypeMetadataProvider;
use crate::types::{PrimitiveKind, TypeId, TypeKind};
use rustc_hash::FxHashSet;

/// Whether a value of type `from` may be passed where `to` is expected.
///
/// `TypeId::NULL` is assignable to every reference type and to no
/// primitive. With `autoboxing`, a primitive `from` is boxed before being
/// compared to a reference `to`, and a wrapper `from` is unboxed before being
/// compared to a primitive `to`.
pub fn is_assignable<P: TypeMetadataProvider + ?Sized>(
    provider: &P,
    from: TypeId,
    to: TypeId,
    autoboxing: bool,
) -> bool {
    if !from.is_valid() || !to.is_valid() {
        return false;
    }
    if from == TypeId::NULL {
        return to != TypeId::NULL
            && provider.primitive_kind(to).is_none()
            && provider.contains_type(to);
    }
    if from == to {
        return true;
    }

    let mut from = from;
    if autoboxing {
        match (provider.primitive_kind(from), provider.primitive_kind(to)) {
            (Some(kind), None) => match kind.wrapper() {
                Some(wrapper) => from = wrapper,
                None => return false,
            },
            (None, Some(_)) => match PrimitiveKind::from_wrapper(from) {
                Some(kind) => from = kind.type_id(),
                None => return false,
            },
            _ => {}
        }
        if from == to {
            return true;
        }
    }

    match (provider.primitive_kind(from), provider.primitive_kind(to)) {
        (Some(source), Some(target)) => source.widens_to(target),
        (Some(_), None) | (None, Some(_)) => false,
        (None, None) => is_reference_assignable(provider, from, to),
    }
}

/// Pairwise [`is_assignable`] over two lists of equal length.
pub fn is_assignable_list<P: TypeMetadataProvider + ?Sized>(
    provider: &P,
    from: &[TypeId],
    to: &[TypeId],
    autoboxing: bool,
) -> bool {
    from.len() == to.len()
        && from
            .iter()
            .zip(to)
            .all(|(&f, &t)| is_assignable(provider, f, t, autoboxing))
}

/// Whether `wrapper` is the boxed form of the primitive type `primitive`.
pub fn is_primitive_wrapper_of(wrapper: TypeId, primitive: TypeId) -> bool {
    PrimitiveKind::from_type_id(primitive).and_then(PrimitiveKind::wrapper) == Some(wrapper)
}

fn is_reference_assignable<P: TypeMetadataProvider + ?Sized>(
    provider: &P,
    from: TypeId,
    to: TypeId,
) -> bool {
    let Some(from_info) = provider.type_info(from) else {
        return false;
    };
    if !provider.contains_type(to) {
        return false;
    }
    if to == TypeId::OBJECT {
        return true;
    }

    if let TypeKind::Array { component: from_component } = from_info.kind {
        let Some(to_component) = provider.component_type(to) else {
            return false;
        };
        if provider.primitive_kind(from_component).is_some()
            || provider.primitive_kind(to_component).is_some()
        {
            return from_component == to_component;
        }
        return from_component == to_component
            || is_reference_assignable(provider, from_component, to_component);
    }

    // Walk the supertype graph: superclass chain plus transitive interfaces.
    let mut visited = FxHashSet::default();
    let mut stack = vec![from];
    while let Some(current) = stack.pop() {
        if current == to {
            return true;
        }
        if !visited.insert(current) {
            continue;
        }
        if let Some(info) = provider.type_info(current) {
            stack.extend(info.superclass);
            stack.extend(info.interfaces.iter().copied());
        }
    }
    false
}

#[cfg(test)]
#[path = "../tests/assignability_tests.rs"]
mod tests;
