//! Best-fit constructor resolution and invocation.
//!
//! ## Resolution
//!
//! Exact lookup compares parameter lists by handle equality and only ever
//! reports accessible constructors. Best-match lookup tries the exact path
//! first and otherwise scans declared constructors in declaration order:
//!
//! 1. skip candidates incompatible with the requested types
//! 2. skip candidates that are neither accessible nor escalatable
//! 3. keep the most specific survivor (see [`crate::matching`])
//!
//! A later candidate only replaces the current best when it is strictly
//! more specific, so true ties and genuine ambiguities both resolve to the
//! candidate declared first.
//!
//! ## Construction
//!
//! `construct*` resolves, packs trailing variadic arguments, validates and
//! converts argument values, then hands off to the [`Instantiator`].

use crate::access;
use crate::error::{ResolveError, Result};
use crate::escalation::AccessEscalator;
use crate::format::format_signature;
use crate::invoke::prepare_arguments;
use crate::matching::{self, MatchKind};
use crate::options::ResolverOptions;
use crate::provider::{Instantiator, TypeMetadataProvider};
use crate::registry::TypeRegistry;
use crate::types::{ConstructorDescriptor, ParamList, TypeId};
use crate::value::{Object, Value, infer_parameter_types};
use crate::varargs::pack_variadic;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, trace};

/// Resolves and invokes constructors of types known to a metadata provider.
pub struct ConstructorResolver<'a, P: ?Sized> {
    provider: &'a P,
    instantiator: &'a dyn Instantiator,
    escalator: &'a dyn AccessEscalator,
    options: ResolverOptions,
}

impl<'a> ConstructorResolver<'a, TypeRegistry> {
    /// A resolver backed entirely by `registry`, with default options.
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self::with_parts(registry, registry, registry)
    }
}

impl<'a, P: TypeMetadataProvider + ?Sized> ConstructorResolver<'a, P> {
    pub fn with_parts(
        provider: &'a P,
        instantiator: &'a dyn Instantiator,
        escalator: &'a dyn AccessEscalator,
    ) -> Self {
        Self {
            provider,
            instantiator,
            escalator,
            options: ResolverOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ResolverOptions {
        self.options
    }

    pub fn provider(&self) -> &'a P {
        self.provider
    }

    fn check_type(&self, ty: TypeId) -> Result<()> {
        if !ty.is_valid() {
            return Err(ResolveError::NullType);
        }
        if !self.provider.contains_type(ty) {
            return Err(ResolveError::UnknownType(ty));
        }
        Ok(())
    }

    /// Whether `ctor` is declared public and its owner plus every enclosing
    /// type is public.
    pub fn is_accessible(&self, ctor: &ConstructorDescriptor) -> bool {
        access::is_accessible(self.provider, ctor)
    }

    /// Returns `ctor` back if it is accessible.
    pub fn accessible_constructor(
        &self,
        ctor: &Arc<ConstructorDescriptor>,
    ) -> Option<Arc<ConstructorDescriptor>> {
        self.is_accessible(ctor).then(|| Arc::clone(ctor))
    }

    /// The accessible constructor of `ty` whose parameters are exactly
    /// `parameter_types`. An empty list names the no-argument constructor.
    /// Never escalates.
    #[tracing::instrument(level = "trace", skip(self, parameter_types), fields(ty = ty.0, arity = parameter_types.len()))]
    pub fn find_accessible_constructor(
        &self,
        ty: TypeId,
        parameter_types: &[TypeId],
    ) -> Result<Option<Arc<ConstructorDescriptor>>> {
        self.check_type(ty)?;
        let found = self
            .provider
            .declared_constructors(ty)
            .into_iter()
            .find(|ctor| ctor.params.as_slice() == parameter_types)
            .filter(|ctor| self.is_accessible(ctor));
        Ok(found)
    }

    /// The most specific usable constructor of `ty` compatible with
    /// `parameter_types`.
    #[tracing::instrument(level = "debug", skip(self, parameter_types), fields(ty = ty.0, arity = parameter_types.len()))]
    pub fn find_matching_accessible_constructor(
        &self,
        ty: TypeId,
        parameter_types: &[TypeId],
    ) -> Result<Option<Arc<ConstructorDescriptor>>> {
        if let Some(exact) = self.find_accessible_constructor(ty, parameter_types)? {
            if self.options.escalation {
                // Already accessible, so the outcome does not matter.
                let _ = self.escalator.try_escalate(&exact);
            }
            debug!(ctor_id = exact.id.0, "exact match");
            return Ok(Some(exact));
        }

        let autoboxing = self.options.autoboxing;
        let mut best: Option<(Arc<ConstructorDescriptor>, ParamList)> = None;
        for ctor in self.provider.declared_constructors(ty) {
            let Some(kind) =
                matching::match_constructor(self.provider, &ctor, parameter_types, autoboxing)
            else {
                trace!(ctor_id = ctor.id.0, "incompatible");
                continue;
            };
            if !self.ensure_usable(&ctor) {
                trace!(ctor_id = ctor.id.0, "not accessible");
                continue;
            }

            let effective =
                matching::effective_params(self.provider, &ctor, kind, parameter_types.len());
            let replace = match &best {
                None => true,
                Some((_, best_params)) => {
                    matching::compare_specificity(self.provider, &effective, best_params, autoboxing)
                        == Ordering::Less
                }
            };
            trace!(
                ctor_id = ctor.id.0,
                variadic = kind == MatchKind::Variadic,
                replace,
                "compatible candidate"
            );
            if replace {
                best = Some((ctor, effective));
            }
        }

        let best = best.map(|(ctor, _)| ctor);
        debug!(ctor_id = best.as_ref().map(|c| c.id.0), "best match");
        Ok(best)
    }

    /// Accessible, or made usable by escalation when allowed.
    fn ensure_usable(&self, ctor: &ConstructorDescriptor) -> bool {
        if self.is_accessible(ctor) {
            return true;
        }
        self.options.escalation && self.escalator.try_escalate(ctor)
    }

    /// Best-match construction with parameter types inferred from `args`.
    pub fn construct(&self, ty: TypeId, args: Vec<Value>) -> Result<Object> {
        let parameter_types = infer_parameter_types(self.provider, &args);
        self.construct_with_types(ty, args, &parameter_types)
    }

    /// Best-match construction resolving against `parameter_types`.
    #[tracing::instrument(level = "debug", skip(self, args, parameter_types), fields(ty = ty.0, arity = args.len()))]
    pub fn construct_with_types(
        &self,
        ty: TypeId,
        args: Vec<Value>,
        parameter_types: &[TypeId],
    ) -> Result<Object> {
        let ctor = self
            .find_matching_accessible_constructor(ty, parameter_types)?
            .ok_or_else(|| self.not_found(ty, parameter_types))?;
        let args = pack_variadic(self.provider, &ctor, args)
            .map_err(|source| self.invalid_argument(ty, source))?;
        self.invoke(ty, &ctor, args)
    }

    /// Exact-match construction with parameter types inferred from `args`.
    pub fn construct_exact(&self, ty: TypeId, args: Vec<Value>) -> Result<Object> {
        let parameter_types = infer_parameter_types(self.provider, &args);
        self.construct_exact_with_types(ty, args, &parameter_types)
    }

    /// Exact-match construction. No conversions take part in resolution and
    /// arguments are never packed.
    #[tracing::instrument(level = "debug", skip(self, args, parameter_types), fields(ty = ty.0, arity = args.len()))]
    pub fn construct_exact_with_types(
        &self,
        ty: TypeId,
        args: Vec<Value>,
        parameter_types: &[TypeId],
    ) -> Result<Object> {
        let ctor = self
            .find_accessible_constructor(ty, parameter_types)?
            .ok_or_else(|| self.not_found(ty, parameter_types))?;
        self.invoke(ty, &ctor, args)
    }

    fn invoke(&self, ty: TypeId, ctor: &ConstructorDescriptor, args: Vec<Value>) -> Result<Object> {
        let args = prepare_arguments(self.provider, ctor, args)
            .map_err(|source| self.invalid_argument(ty, source))?;
        let object = self.instantiator.instantiate(ctor, args)?;
        debug!(ctor_id = ctor.id.0, "constructed");
        Ok(object)
    }

    fn not_found(&self, ty: TypeId, parameter_types: &[TypeId]) -> ResolveError {
        ResolveError::NotFound {
            type_name: self.provider.type_name(ty),
            signature: format_signature(self.provider, parameter_types),
        }
    }

    fn invalid_argument(&self, ty: TypeId, source: crate::error::ArgumentError) -> ResolveError {
        ResolveError::InvalidArgument {
            type_name: self.provider.type_name(ty),
            source,
        }
    }
}

#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod tests;
