use super::*;
use crate::error::TargetFailure;

fn unit_body() -> impl FailableFunction<Vec<Value>, Payload, anyhow::Error> + Send + Sync + 'static {
    constructor_body(|_args| Ok(()))
}

#[test]
fn test_builtins_are_seeded() {
    let registry = TypeRegistry::new();
    assert_eq!(registry.lookup("int"), Some(TypeId::INT));
    assert_eq!(registry.lookup("Integer"), Some(TypeId::BOXED_INT));
    assert_eq!(registry.lookup("Character"), Some(TypeId::BOXED_CHAR));
    assert_eq!(registry.lookup("String"), Some(TypeId::STRING));
    assert_eq!(registry.superclass(TypeId::BOXED_INT), Some(TypeId::NUMBER));
    assert_eq!(registry.superclass(TypeId::BOXED_BOOLEAN), Some(TypeId::OBJECT));
    assert_eq!(registry.superclass(TypeId::NUMBER), Some(TypeId::OBJECT));
    assert_eq!(registry.superclass(TypeId::OBJECT), None);
    let number = registry.type_info(TypeId::NUMBER).unwrap();
    assert!(number.is_abstract());
    assert!(registry.is_public_type(TypeId::STRING));
    assert_eq!(registry.primitive_kind(TypeId::LONG), Some(PrimitiveKind::Long));
}

#[test]
fn test_instance_ids_are_unique() {
    let a = TypeRegistry::new();
    let b = TypeRegistry::new();
    assert_ne!(a.instance_id(), b.instance_id());
}

#[test]
fn test_register_preserves_declaration_order() {
    let registry = TypeRegistry::new();
    let ty = registry
        .register(
            TypeDef::class("Point")
                .public()
                .constructor(ConstructorDef::public([], unit_body()))
                .constructor(ConstructorDef::public([TypeId::INT, TypeId::INT], unit_body()))
                .constructor(ConstructorDef::non_public([TypeId::STRING], unit_body())),
        )
        .unwrap();
    assert_eq!(registry.lookup("Point"), Some(ty));
    assert_eq!(registry.type_name(ty).as_ref(), "Point");

    let ctors = registry.declared_constructors(ty);
    let params: Vec<&[TypeId]> = ctors.iter().map(|c| c.params.as_slice()).collect();
    assert_eq!(
        params,
        vec![&[][..], &[TypeId::INT, TypeId::INT][..], &[TypeId::STRING][..]]
    );
    assert!(ctors.iter().all(|c| c.owner == ty));
    assert!(!ctors[2].is_public());
}

#[test]
fn test_duplicate_name_rejected() {
    let registry = TypeRegistry::new();
    registry.register(TypeDef::class("A")).unwrap();
    assert_eq!(
        registry.register(TypeDef::class("A")),
        Err(RegistryError::DuplicateName(Arc::from("A")))
    );
    assert!(matches!(
        registry.register(TypeDef::class("String")),
        Err(RegistryError::DuplicateName(_))
    ));
}

#[test]
fn test_unknown_references_rejected() {
    let registry = TypeRegistry::new();
    let missing = TypeId(4242);
    assert!(matches!(
        registry.register(TypeDef::class("A").extends(missing)),
        Err(RegistryError::UnknownType { referenced, .. }) if referenced == missing
    ));
    assert!(matches!(
        registry.register(TypeDef::class("B").enclosed_in(missing)),
        Err(RegistryError::UnknownType { .. })
    ));
    assert!(matches!(
        registry.register(
            TypeDef::class("C").constructor(ConstructorDef::public([missing], unit_body()))
        ),
        Err(RegistryError::UnknownType { .. })
    ));
    assert!(matches!(
        registry.register(
            TypeDef::class("D").constructor(ConstructorDef::public([TypeId::VOID], unit_body()))
        ),
        Err(RegistryError::UnknownType { .. })
    ));
    // Failed registrations leave no trace.
    assert_eq!(registry.lookup("A"), None);
}

#[test]
fn test_hierarchy_shape_validated() {
    let registry = TypeRegistry::new();
    let shape = registry.register(TypeDef::interface("Shape")).unwrap();
    let base = registry.register(TypeDef::class("Base")).unwrap();

    assert!(matches!(
        registry.register(TypeDef::class("A").extends(shape)),
        Err(RegistryError::InvalidSuperclass { .. })
    ));
    assert!(matches!(
        registry.register(TypeDef::class("B").extends(TypeId::STRING)),
        Err(RegistryError::InvalidSuperclass { .. })
    ));
    assert!(matches!(
        registry.register(TypeDef::class("C").implements(base)),
        Err(RegistryError::NotAnInterface { .. })
    ));
    assert!(matches!(
        registry.register(
            TypeDef::interface("D").constructor(ConstructorDef::public([], unit_body()))
        ),
        Err(RegistryError::InterfaceConstructor { .. })
    ));
    assert!(registry.register(TypeDef::class("E").extends(base).implements(shape)).is_ok());
}

#[test]
fn test_constructor_shape_validated() {
    let registry = TypeRegistry::new();
    assert!(matches!(
        registry.register(
            TypeDef::class("A")
                .constructor(ConstructorDef::public([TypeId::STRING], unit_body()).variadic())
        ),
        Err(RegistryError::VariadicWithoutArray { .. })
    ));
    assert!(matches!(
        registry.register(
            TypeDef::class("B").constructor(ConstructorDef::public([], unit_body()).variadic())
        ),
        Err(RegistryError::VariadicWithoutArray { .. })
    ));
    let err = registry
        .register(
            TypeDef::class("C")
                .constructor(ConstructorDef::public([TypeId::INT], unit_body()))
                .constructor(ConstructorDef::non_public([TypeId::INT], unit_body())),
        )
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::DuplicateSignature {
            owner: Arc::from("C"),
            signature: "(int)".to_string(),
        }
    );
}

#[test]
fn test_array_types_are_interned() {
    let registry = TypeRegistry::new();
    let strings = registry.array_of(TypeId::STRING);
    assert_eq!(registry.array_of(TypeId::STRING), strings);
    assert_eq!(registry.component_type(strings), Some(TypeId::STRING));
    assert_eq!(registry.lookup("String[]"), Some(strings));
    assert!(registry.is_public_type(strings));

    let nested = registry.array_of(strings);
    assert_eq!(registry.type_name(nested).as_ref(), "String[][]");

    assert_eq!(registry.array_of(TypeId::NULL), TypeId::INVALID);
    assert_eq!(registry.array_of(TypeId::VOID), TypeId::INVALID);
    assert_eq!(registry.array_of(TypeId(4242)), TypeId::INVALID);
}

#[test]
fn test_array_of_keeps_registered_name() {
    let registry = TypeRegistry::new();
    let foo = registry.register(TypeDef::class("Foo")).unwrap();
    let impostor = registry.register(TypeDef::class("Foo[]")).unwrap();

    let foos = registry.array_of(foo);
    assert_ne!(foos, impostor);
    assert_eq!(registry.component_type(foos), Some(foo));
    assert_eq!(registry.type_name(foos).as_ref(), "Foo[]");
    assert_eq!(registry.lookup("Foo[]"), Some(impostor));
}

#[test]
fn test_array_of_non_public_component_is_not_public() {
    let registry = TypeRegistry::new();
    let hidden = registry.register(TypeDef::class("Hidden")).unwrap();
    let array = registry.array_of(hidden);
    assert!(!registry.is_public_type(array));
}

#[test]
fn test_instantiate_runs_body() {
    let registry = TypeRegistry::new();
    let ty = registry
        .register(TypeDef::class("Counter").public().constructor(ConstructorDef::public(
            [TypeId::INT],
            constructor_body(|args: Vec<Value>| Ok(args[0].as_int().unwrap_or(0) * 2)),
        )))
        .unwrap();
    let ctor = registry.declared_constructors(ty).remove(0);
    let object = registry.instantiate(&ctor, vec![Value::Int(21)]).unwrap();
    assert_eq!(object.ty(), ty);
    assert_eq!(object.downcast_ref::<i32>(), Some(&42));
}

#[test]
fn test_instantiate_abstract_fails() {
    let registry = TypeRegistry::new();
    let ty = registry
        .register(
            TypeDef::class("Base")
                .public()
                .abstract_type()
                .constructor(ConstructorDef::public([], unit_body())),
        )
        .unwrap();
    let ctor = registry.declared_constructors(ty).remove(0);
    assert!(matches!(
        registry.instantiate(&ctor, Vec::new()),
        Err(TargetFailure::Abstract { .. })
    ));
}

#[test]
fn test_instantiate_body_error_is_carried() {
    let registry = TypeRegistry::new();
    let ty = registry
        .register(TypeDef::class("Fails").public().constructor(ConstructorDef::public(
            [],
            constructor_body(|_args| -> anyhow::Result<()> { anyhow::bail!("boom") }),
        )))
        .unwrap();
    let ctor = registry.declared_constructors(ty).remove(0);
    let failure = registry.instantiate(&ctor, Vec::new()).unwrap_err();
    assert_eq!(failure.cause().map(ToString::to_string), Some("boom".to_string()));
}

#[test]
fn test_instantiate_requires_access_or_escalation() {
    let registry = TypeRegistry::new();
    let ty = registry
        .register(
            TypeDef::class("Secret")
                .public()
                .constructor(ConstructorDef::non_public([], unit_body())),
        )
        .unwrap();
    let ctor = registry.declared_constructors(ty).remove(0);
    assert!(matches!(
        registry.instantiate(&ctor, Vec::new()),
        Err(TargetFailure::Inaccessible { .. })
    ));
    assert!(registry.try_escalate(&ctor));
    assert!(registry.is_escalated(&ctor));
    assert!(registry.instantiate(&ctor, Vec::new()).is_ok());
}

#[test]
fn test_escalation_policy() {
    let registry = TypeRegistry::new();
    let ty = registry
        .register(
            TypeDef::class("Locked")
                .constructor(ConstructorDef::non_public([], unit_body()).deny_escalation())
                .constructor(ConstructorDef::non_public([TypeId::INT], unit_body())),
        )
        .unwrap();
    let ctors = registry.declared_constructors(ty);
    assert!(!registry.try_escalate(&ctors[0]));
    assert!(!registry.is_escalated(&ctors[0]));
    assert!(registry.try_escalate(&ctors[1]));
    assert!(registry.try_escalate(&ctors[1]));
}

#[test]
fn test_escalation_is_scoped_to_registry() {
    let a = TypeRegistry::new();
    let b = TypeRegistry::new();
    let ty = a
        .register(TypeDef::class("A").constructor(ConstructorDef::non_public([], unit_body())))
        .unwrap();
    let ctor = a.declared_constructors(ty).remove(0);
    // `b` does not own this constructor.
    assert!(!b.try_escalate(&ctor));
    assert!(a.try_escalate(&ctor));
    assert!(!b.is_escalated(&ctor));
}

#[test]
fn test_concurrent_registration() {
    use rayon::prelude::*;
    let registry = TypeRegistry::new();
    let ids: Vec<TypeId> = (0..32)
        .into_par_iter()
        .map(|i| registry.register(TypeDef::class(format!("T{i}"))).unwrap())
        .collect();
    let unique: FxHashSet<TypeId> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());
    for (i, id) in ids.iter().enumerate() {
        assert_eq!(registry.lookup(&format!("T{i}")), Some(*id));
    }
}
