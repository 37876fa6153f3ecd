use super::*;
use crate::nop;

#[test]
fn test_to_long_bi_function_from_closure() {
    let length_sum = |a: &String, b: &Vec<u8>| -> Result<i64, std::num::TryFromIntError> {
        Ok(i64::try_from(a.len())? + i64::try_from(b.len())?)
    };
    let total = length_sum.apply_as_long(&"abc".to_string(), &vec![1, 2]);
    assert_eq!(total.ok(), Some(5));
}

#[test]
fn test_to_long_bi_function_error_passes_through() {
    let checked = |a: &i64, b: &i64| a.checked_mul(*b).ok_or("overflow");
    assert_eq!(checked.apply_as_long(&i64::MAX, &2), Err("overflow"));
    assert_eq!(checked.apply_as_long(&-4, &3), Ok(-12));
}

#[test]
fn test_nop_returns_zero() {
    let value: Result<i64, ()> = nop().apply_as_long(&"ignored", &42_u32);
    assert_eq!(value, Ok(0));
}
