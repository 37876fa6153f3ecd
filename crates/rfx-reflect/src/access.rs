//! Declared accessibility of constructors.

use crate::provider::TypeMetadataProvider;
use crate::types::{ConstructorDescriptor, TypeId};
use tracing::warn;

/// Enclosing chains deeper than this are treated as malformed metadata.
pub const MAX_ENCLOSING_DEPTH: usize = 64;

/// Whether `ty` and every lexically enclosing type, walking outward, are
/// public. Stops at the first non-public type.
pub fn is_type_accessible<P: TypeMetadataProvider + ?Sized>(provider: &P, ty: TypeId) -> bool {
    let mut current = Some(ty);
    let mut depth = 0;
    while let Some(t) = current {
        if !provider.is_public_type(t) {
            return false;
        }
        depth += 1;
        if depth > MAX_ENCLOSING_DEPTH {
            warn!(
                ty = ?ty,
                max_depth = MAX_ENCLOSING_DEPTH,
                "enclosing type chain too deep, treating as inaccessible"
            );
            return false;
        }
        current = provider.enclosing_type(t);
    }
    true
}

/// Whether `ctor` is declared public and its owner chain is public.
pub fn is_accessible<P: TypeMetadataProvider + ?Sized>(
    provider: &P,
    ctor: &ConstructorDescriptor,
) -> bool {
    ctor.is_public() && is_type_accessible(provider, ctor.owner)
}
