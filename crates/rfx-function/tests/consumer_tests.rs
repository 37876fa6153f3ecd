use super::*;
use std::cell::RefCell;

#[test]
fn test_int_consumer_and_then_runs_both_in_order() {
    let log = RefCell::new(Vec::new());
    let first = |v: i32| {
        log.borrow_mut().push(("first", v));
        Ok::<(), String>(())
    };
    let second = |v: i32| {
        log.borrow_mut().push(("second", v));
        Ok::<(), String>(())
    };
    let both = FailableIntConsumer::and_then(first, second);
    assert_eq!(FailableIntConsumer::accept(&both, 3), Ok(()));
    assert_eq!(*log.borrow(), vec![("first", 3), ("second", 3)]);
}

#[test]
fn test_int_consumer_and_then_short_circuits() {
    let log = RefCell::new(Vec::new());
    let failing = |v: i32| {
        if v > 10 {
            Err(format!("too large: {v}"))
        } else {
            Ok(())
        }
    };
    let record = |v: i32| {
        log.borrow_mut().push(v);
        Ok::<(), String>(())
    };
    let both = FailableIntConsumer::and_then(failing, record);
    assert_eq!(
        FailableIntConsumer::accept(&both, 11),
        Err("too large: 11".to_string())
    );
    assert!(log.borrow().is_empty());
    assert_eq!(FailableIntConsumer::accept(&both, 2), Ok(()));
    assert_eq!(*log.borrow(), vec![2]);
}

#[test]
fn test_int_consumer_nop_is_ok() {
    let nop = crate::nop();
    assert_eq!(FailableIntConsumer::<String>::accept(&nop, i32::MIN), Ok(()));
    let chained = FailableIntConsumer::<String>::and_then(nop, crate::NOP);
    assert_eq!(FailableIntConsumer::<String>::accept(&chained, 0), Ok(()));
}

#[test]
fn test_consumer_and_then_sees_same_value() {
    let seen = RefCell::new(Vec::new());
    let first = |s: &String| {
        seen.borrow_mut().push(s.len());
        Ok::<(), ()>(())
    };
    let second = |s: &String| {
        seen.borrow_mut().push(s.chars().count());
        Ok::<(), ()>(())
    };
    let both = FailableConsumer::and_then(first, second);
    let value = "héllo".to_string();
    assert_eq!(FailableConsumer::accept(&both, &value), Ok(()));
    assert_eq!(*seen.borrow(), vec![6, 5]);
}
