/// A producer of `R` values that may fail with `E`.
pub trait FailableSupplier<R, E> {
    fn get(&self) -> Result<R, E>;
}

impl<F, R, E> FailableSupplier<R, E> for F
where
    F: Fn() -> Result<R, E>,
{
    #[inline]
    fn get(&self) -> Result<R, E> {
        self()
    }
}

#[cfg(test)]
#[path = "../tests/supplier_tests.rs"]
mod tests;
