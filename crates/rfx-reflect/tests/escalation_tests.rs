use super::*;
use crate::types::{ConstructorFlags, TypeId};

fn key(provider: u64, constructor: u32) -> EscalationKey {
    EscalationKey {
        provider,
        constructor: ConstructorId(constructor),
    }
}

#[test]
fn test_record_is_idempotent() {
    // Provider ids this high are never handed out by a registry.
    let k = key(u64::MAX - 1, 7);
    assert!(!is_escalated(k));
    assert!(record(k));
    assert!(!record(k));
    assert!(is_escalated(k));
}

#[test]
fn test_keys_are_scoped_per_provider() {
    let a = key(u64::MAX - 2, 1);
    let b = key(u64::MAX - 3, 1);
    record(a);
    assert!(is_escalated(a));
    assert!(!is_escalated(b));
}

#[test]
fn test_concurrent_record_inserts_once() {
    use rayon::prelude::*;
    let k = key(u64::MAX - 4, 42);
    let inserted = (0..64)
        .into_par_iter()
        .filter(|_| record(k))
        .count();
    assert_eq!(inserted, 1);
    assert!(is_escalated(k));
}

#[test]
fn test_deny_all_never_escalates() {
    let ctor = ConstructorDescriptor {
        id: ConstructorId(1),
        owner: TypeId::OBJECT,
        params: Default::default(),
        flags: ConstructorFlags::empty(),
    };
    assert!(!DenyAllEscalation.try_escalate(&ctor));
}
