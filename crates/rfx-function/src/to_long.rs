/// A function of two borrowed arguments producing an `i64`, failing with `E`.
pub trait FailableToLongBiFunction<T, U, E> {
    /// Applies this function to the given arguments.
    fn apply_as_long(&self, first: &T, second: &U) -> Result<i64, E>;
}

impl<F, T, U, E> FailableToLongBiFunction<T, U, E> for F
where
    F: Fn(&T, &U) -> Result<i64, E>,
{
    #[inline]
    fn apply_as_long(&self, first: &T, second: &U) -> Result<i64, E> {
        self(first, second)
    }
}

#[cfg(test)]
#[path = "../tests/to_long_tests.rs"]
mod tests;
