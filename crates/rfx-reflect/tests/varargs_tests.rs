use super::*;
use crate::registry::TypeRegistry;
use crate::types::{ConstructorFlags, ConstructorId, ParamList, TypeId};
use std::sync::Arc;

fn variadic(params: &[TypeId]) -> ConstructorDescriptor {
    ConstructorDescriptor {
        id: ConstructorId(1),
        owner: TypeId::OBJECT,
        params: ParamList::from_slice(params),
        flags: ConstructorFlags::PUBLIC | ConstructorFlags::VARIADIC,
    }
}

#[test]
fn test_trailing_arguments_are_packed() {
    let registry = TypeRegistry::new();
    let ctor = variadic(&[TypeId::INT, registry.array_of(TypeId::STRING)]);
    let packed = pack_variadic(
        &registry,
        &ctor,
        vec![Value::Int(1), Value::from("a"), Value::from("b")],
    )
    .unwrap();
    assert_eq!(
        packed,
        vec![
            Value::Int(1),
            Value::Array(ArrayValue::new(
                TypeId::STRING,
                vec![Value::from("a"), Value::from("b")]
            )),
        ]
    );
}

#[test]
fn test_missing_trailing_arguments_pack_empty_array() {
    let registry = TypeRegistry::new();
    let ctor = variadic(&[TypeId::INT, registry.array_of(TypeId::STRING)]);
    let packed = pack_variadic(&registry, &ctor, vec![Value::Int(1)]).unwrap();
    assert_eq!(
        packed,
        vec![Value::Int(1), Value::Array(ArrayValue::new(TypeId::STRING, Vec::new()))]
    );
}

#[test]
fn test_exact_array_passes_through() {
    let registry = TypeRegistry::new();
    let ctor = variadic(&[registry.array_of(TypeId::STRING)]);
    let args = vec![Value::Array(ArrayValue::new(TypeId::STRING, vec![Value::from("x")]))];
    assert_eq!(pack_variadic(&registry, &ctor, args.clone()).unwrap(), args);
}

#[test]
fn test_null_last_argument_passes_through() {
    let registry = TypeRegistry::new();
    let ctor = variadic(&[TypeId::INT, registry.array_of(TypeId::STRING)]);
    let args = vec![Value::Int(1), Value::Null];
    assert_eq!(pack_variadic(&registry, &ctor, args.clone()).unwrap(), args);
}

#[test]
fn test_differently_typed_array_is_wrapped() {
    let registry = TypeRegistry::new();
    let ctor = variadic(&[registry.array_of(TypeId::OBJECT)]);
    let inner = Value::Array(ArrayValue::new(TypeId::STRING, vec![Value::from("x")]));
    let packed = pack_variadic(&registry, &ctor, vec![inner.clone()]).unwrap();
    assert_eq!(
        packed,
        vec![Value::Array(ArrayValue::new(TypeId::OBJECT, vec![inner]))]
    );
}

#[test]
fn test_primitive_component_values_are_widened() {
    let registry = TypeRegistry::new();
    let ctor = variadic(&[registry.array_of(TypeId::LONG)]);
    let packed =
        pack_variadic(&registry, &ctor, vec![Value::Int(1), Value::Byte(2), Value::Long(3)])
            .unwrap();
    assert_eq!(
        packed,
        vec![Value::Array(ArrayValue::new(
            TypeId::LONG,
            vec![Value::Long(1), Value::Long(2), Value::Long(3)]
        ))]
    );
}

#[test]
fn test_primitive_component_rejects_bad_elements() {
    let registry = TypeRegistry::new();
    let ctor = variadic(&[TypeId::STRING, registry.array_of(TypeId::INT)]);
    assert_eq!(
        pack_variadic(
            &registry,
            &ctor,
            vec![Value::from("s"), Value::Int(1), Value::Null, Value::Int(3)]
        ),
        Err(ArgumentError::NullForPrimitive {
            index: 2,
            expected: Arc::from("int"),
        })
    );
    assert!(matches!(
        pack_variadic(&registry, &ctor, vec![Value::from("s"), Value::Long(1), Value::Int(2)]),
        Err(ArgumentError::Mismatch { index: 1, .. })
    ));
}

#[test]
fn test_reference_component_rejects_mistyped_elements() {
    let registry = TypeRegistry::new();
    let ctor = variadic(&[TypeId::STRING, registry.array_of(TypeId::STRING)]);
    assert_eq!(
        pack_variadic(
            &registry,
            &ctor,
            vec![Value::from("s"), Value::from("a"), Value::Int(7)]
        ),
        Err(ArgumentError::Mismatch {
            index: 2,
            expected: Arc::from("String"),
            found: Arc::from("Integer"),
        })
    );

    let packed = pack_variadic(
        &registry,
        &ctor,
        vec![Value::from("s"), Value::Null, Value::from("b")],
    )
    .unwrap();
    assert_eq!(
        packed[1],
        Value::Array(ArrayValue::new(
            TypeId::STRING,
            vec![Value::Null, Value::from("b")]
        ))
    );

    let objects = variadic(&[registry.array_of(TypeId::OBJECT)]);
    assert!(pack_variadic(&registry, &objects, vec![Value::Int(7), Value::from("a")]).is_ok());
}

#[test]
fn test_too_few_arguments() {
    let registry = TypeRegistry::new();
    let ctor = variadic(&[TypeId::INT, TypeId::INT, registry.array_of(TypeId::INT)]);
    assert_eq!(
        pack_variadic(&registry, &ctor, vec![Value::Int(1)]),
        Err(ArgumentError::TooFewForVariadic { fixed: 2, actual: 1 })
    );
}

#[test]
fn test_non_variadic_is_untouched() {
    let registry = TypeRegistry::new();
    let mut ctor = variadic(&[TypeId::INT]);
    ctor.flags = ConstructorFlags::PUBLIC;
    let args = vec![Value::Int(1), Value::Int(2)];
    assert_eq!(pack_variadic(&registry, &ctor, args.clone()).unwrap(), args);
}

#[test]
fn test_malformed_variadic_reported() {
    let registry = TypeRegistry::new();
    let ctor = variadic(&[TypeId::STRING]);
    assert_eq!(
        pack_variadic(&registry, &ctor, vec![Value::from("a")]),
        Err(ArgumentError::MalformedVariadic {
            param: Arc::from("String"),
        })
    );
}
