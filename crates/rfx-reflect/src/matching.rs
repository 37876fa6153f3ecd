//! Constructor compatibility and the specificity ordering.
//!
//! A candidate is compatible with a requested parameter list either
//! directly (same length, pairwise assignable) or, when declared variadic,
//! by expansion of its trailing array parameter. Compatible candidates are
//! ranked through their *effective* parameter lists, so a variadic
//! candidate matched by expansion competes with the component type
//! repeated at each trailing position.

use crate::provider::TypeMetadataProvider;
use crate::types::{ConstructorDescriptor, ParamList, TypeId};
use std::cmp::Ordering;

/// How a compatible constructor matched the requested types.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MatchKind {
    /// Same length, every formal assignable from the requested type.
    Direct,
    /// Trailing requested types fold into the variadic array parameter.
    Variadic,
}

/// Checks whether `ctor` accepts `requested`, and how.
pub fn match_constructor<P: TypeMetadataProvider + ?Sized>(
    provider: &P,
    ctor: &ConstructorDescriptor,
    requested: &[TypeId],
    autoboxing: bool,
) -> Option<MatchKind> {
    let params = ctor.params.as_slice();
    if params.len() == requested.len()
        && requested
            .iter()
            .zip(params)
            .all(|(&from, &to)| provider.is_assignable(from, to, autoboxing))
    {
        return Some(MatchKind::Direct);
    }

    if !ctor.is_variadic() {
        return None;
    }
    let (&last, fixed) = params.split_last()?;
    if requested.len() < fixed.len() {
        return None;
    }
    let component = provider.component_type(last)?;
    let (prefix, trailing) = requested.split_at(fixed.len());
    let prefix_ok = prefix
        .iter()
        .zip(fixed)
        .all(|(&from, &to)| provider.is_assignable(from, to, autoboxing));
    let trailing_ok = trailing
        .iter()
        .all(|&from| provider.is_assignable(from, component, autoboxing));
    (prefix_ok && trailing_ok).then_some(MatchKind::Variadic)
}

/// The parameter list `ctor` presents at `arity` for the given match.
pub fn effective_params<P: TypeMetadataProvider + ?Sized>(
    provider: &P,
    ctor: &ConstructorDescriptor,
    kind: MatchKind,
    arity: usize,
) -> ParamList {
    match kind {
        MatchKind::Direct => ctor.params.clone(),
        MatchKind::Variadic => {
            let Some((&last, fixed)) = ctor.params.split_last() else {
                return ParamList::new();
            };
            let component = provider.component_type(last).unwrap_or(TypeId::INVALID);
            let mut params: ParamList = fixed.iter().copied().collect();
            params.extend(std::iter::repeat_n(
                component,
                arity.saturating_sub(fixed.len()),
            ));
            params
        }
    }
}

/// Whether `a` is strictly more specific than `b`.
///
/// Every `a[i]` must be assignable to `b[i]`, and at least one position must
/// be narrower in `a` (assignable one way only).
pub fn is_more_specific<P: TypeMetadataProvider + ?Sized>(
    provider: &P,
    a: &[TypeId],
    b: &[TypeId],
    autoboxing: bool,
) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut narrower = false;
    for (&ai, &bi) in a.iter().zip(b) {
        if !provider.is_assignable(ai, bi, autoboxing) {
            return false;
        }
        if !provider.is_assignable(bi, ai, autoboxing) {
            narrower = true;
        }
    }
    narrower
}

/// `Less` when `a` is more specific, `Greater` when `b` is, else `Equal`.
pub fn compare_specificity<P: TypeMetadataProvider + ?Sized>(
    provider: &P,
    a: &[TypeId],
    b: &[TypeId],
    autoboxing: bool,
) -> Ordering {
    if is_more_specific(provider, a, b, autoboxing) {
        Ordering::Less
    } else if is_more_specific(provider, b, a, autoboxing) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

#[cfg(test)]
#[path = "../tests/matching_tests.rs"]
mod tests;
