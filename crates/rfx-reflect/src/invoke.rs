//! Argument validation before a constructor body runs.

use crate::error::ArgumentError;
use crate::provider::TypeMetadataProvider;
use crate::types::{ConstructorDescriptor, TypeId};
use crate::value::Value;

/// Checks `args` against the formal parameters of `ctor` and converts
/// primitive values to their formal type.
///
/// A primitive formal rejects null and accepts any value that widens to it.
/// A reference formal accepts null or a value whose runtime type is
/// assignable to it.
pub fn prepare_arguments<P: TypeMetadataProvider + ?Sized>(
    provider: &P,
    ctor: &ConstructorDescriptor,
    args: Vec<Value>,
) -> Result<Vec<Value>, ArgumentError> {
    if args.len() != ctor.params.len() {
        return Err(ArgumentError::Arity {
            expected: ctor.params.len(),
            actual: args.len(),
        });
    }

    args.into_iter()
        .zip(ctor.params.iter().copied())
        .enumerate()
        .map(|(index, (arg, param))| coerce(provider, index, arg, param))
        .collect()
}

fn coerce<P: TypeMetadataProvider + ?Sized>(
    provider: &P,
    index: usize,
    arg: Value,
    param: TypeId,
) -> Result<Value, ArgumentError> {
    let mismatch = |arg: &Value| ArgumentError::Mismatch {
        index,
        expected: provider.type_name(param),
        found: provider.type_name(arg.runtime_type(provider)),
    };

    match provider.primitive_kind(param) {
        Some(kind) => {
            if arg.is_null() {
                return Err(ArgumentError::NullForPrimitive {
                    index,
                    expected: provider.type_name(param),
                });
            }
            arg.widen_to(kind).ok_or_else(|| mismatch(&arg))
        }
        None if arg.is_null() => Ok(arg),
        None => {
            // Runtime types are already boxed, so no conversion applies here.
            if provider.is_assignable(arg.runtime_type(provider), param, false) {
                Ok(arg)
            } else {
                Err(mismatch(&arg))
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/invoke_tests.rs"]
mod tests;
