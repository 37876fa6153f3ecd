//! Packing of trailing arguments for variadic constructors.

use crate::error::ArgumentError;
use crate::provider::TypeMetadataProvider;
use crate::types::ConstructorDescriptor;
use crate::value::{ArrayValue, Value};

/// Shapes `args` to the parameter list of a variadic `ctor`.
///
/// Arguments pass through unchanged when the constructor is not variadic,
/// or when their count equals the parameter count and the last one is null
/// or already an array of the declared array type. Otherwise the trailing
/// arguments are collected into one array of the component type; primitive
/// components get widened element values, and every other element must be
/// null or assignable to the component.
pub fn pack_variadic<P: TypeMetadataProvider + ?Sized>(
    provider: &P,
    ctor: &ConstructorDescriptor,
    mut args: Vec<Value>,
) -> Result<Vec<Value>, ArgumentError> {
    if !ctor.is_variadic() {
        return Ok(args);
    }
    let Some(&last) = ctor.params.last() else {
        return Ok(args);
    };
    let Some(component) = provider.component_type(last) else {
        return Err(ArgumentError::MalformedVariadic {
            param: provider.type_name(last),
        });
    };

    let fixed = ctor.params.len() - 1;
    if args.len() == ctor.params.len() {
        let passes_through = match args.last() {
            Some(Value::Null) => true,
            Some(Value::Array(array)) => provider.array_of(array.component) == last,
            _ => false,
        };
        if passes_through {
            return Ok(args);
        }
    }
    if args.len() < fixed {
        return Err(ArgumentError::TooFewForVariadic {
            fixed,
            actual: args.len(),
        });
    }

    let trailing = args.split_off(fixed);
    let items = match provider.primitive_kind(component) {
        Some(kind) => trailing
            .into_iter()
            .enumerate()
            .map(|(offset, item)| {
                let index = fixed + offset;
                if item.is_null() {
                    return Err(ArgumentError::NullForPrimitive {
                        index,
                        expected: provider.type_name(component),
                    });
                }
                item.widen_to(kind).ok_or_else(|| ArgumentError::Mismatch {
                    index,
                    expected: provider.type_name(component),
                    found: provider.type_name(item.runtime_type(provider)),
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => {
            for (offset, item) in trailing.iter().enumerate() {
                if item.is_null() {
                    continue;
                }
                let found = item.runtime_type(provider);
                if !provider.is_assignable(found, component, false) {
                    return Err(ArgumentError::Mismatch {
                        index: fixed + offset,
                        expected: provider.type_name(component),
                        found: provider.type_name(found),
                    });
                }
            }
            trailing
        }
    };
    args.push(Value::Array(ArrayValue::new(component, items)));
    Ok(args)
}

#[cfg(test)]
#[path = "../tests/varargs_tests.rs"]
mod tests;
