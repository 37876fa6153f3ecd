//! Best-effort accessibility escalation.
//!
//! Escalation state is process-wide: once a constructor has been escalated
//! it stays escalated for the life of the process. The table is created on
//! first use and never cleared. Concurrent escalation of the same
//! constructor is idempotent.

use crate::types::{ConstructorDescriptor, ConstructorId};
use dashmap::DashSet;
use once_cell::sync::Lazy;
use rustc_hash::FxBuildHasher;

/// Identity of an escalated constructor.
///
/// Constructor ids are only unique within one metadata provider, so the
/// provider's instance id is part of the key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EscalationKey {
    pub provider: u64,
    pub constructor: ConstructorId,
}

static ESCALATED: Lazy<DashSet<EscalationKey, FxBuildHasher>> = Lazy::new(DashSet::default);

/// Whether `key` has been escalated by any caller.
pub fn is_escalated(key: EscalationKey) -> bool {
    ESCALATED.contains(&key)
}

/// Records `key` as escalated. Returns `true` if this call did the insert.
pub(crate) fn record(key: EscalationKey) -> bool {
    ESCALATED.insert(key)
}

/// Makes a normally inaccessible constructor callable, if policy allows.
pub trait AccessEscalator {
    /// Returns `true` if the constructor is (now) escalated.
    ///
    /// Must be idempotent: escalating an already escalated constructor
    /// succeeds again without side effects.
    fn try_escalate(&self, ctor: &ConstructorDescriptor) -> bool;
}

/// Escalator for a strict security policy: every attempt fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAllEscalation;

impl AccessEscalator for DenyAllEscalation {
    fn try_escalate(&self, _ctor: &ConstructorDescriptor) -> bool {
        false
    }
}

#[cfg(test)]
#[path = "../tests/escalation_tests.rs"]
mod tests;
