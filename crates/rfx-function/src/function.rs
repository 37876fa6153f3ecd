//! Failable one- and two-argument functions.

use std::marker::PhantomData;

/// A function from `T` to `R` whose body may fail with `E`.
pub trait FailableFunction<T, R, E> {
    /// Applies this function to the given argument.
    fn apply(&self, input: T) -> Result<R, E>;

    /// Returns a function that feeds this function's result into `after`.
    ///
    /// `after` is never called when this function fails.
    fn and_then<V, G>(self, after: G) -> FunctionAndThen<Self, G, R>
    where
        Self: Sized,
        G: FailableFunction<R, V, E>,
    {
        FunctionAndThen {
            first: self,
            after,
            _mid: PhantomData,
        }
    }

    /// Returns a function that applies `before` first and feeds its result
    /// into this function.
    fn compose<V, G>(self, before: G) -> Compose<G, Self, T>
    where
        Self: Sized,
        G: FailableFunction<V, T, E>,
    {
        FunctionAndThen {
            first: before,
            after: self,
            _mid: PhantomData,
        }
    }
}

impl<F, T, R, E> FailableFunction<T, R, E> for F
where
    F: Fn(T) -> Result<R, E>,
{
    #[inline]
    fn apply(&self, input: T) -> Result<R, E> {
        self(input)
    }
}

/// Two functions chained through an intermediate value of type `M`.
pub struct FunctionAndThen<A, B, M> {
    first: A,
    after: B,
    _mid: PhantomData<fn() -> M>,
}

/// `compose` is `and_then` with the stages swapped.
pub type Compose<G, F, M> = FunctionAndThen<G, F, M>;

impl<A, B, T, M, R, E> FailableFunction<T, R, E> for FunctionAndThen<A, B, M>
where
    A: FailableFunction<T, M, E>,
    B: FailableFunction<M, R, E>,
{
    fn apply(&self, input: T) -> Result<R, E> {
        let mid = self.first.apply(input)?;
        self.after.apply(mid)
    }
}

/// The function that always returns its input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl<T, E> FailableFunction<T, T, E> for Identity {
    #[inline]
    fn apply(&self, input: T) -> Result<T, E> {
        Ok(input)
    }
}

/// Returns the identity function.
pub const fn identity() -> Identity {
    Identity
}

/// A function of two arguments whose body may fail with `E`.
pub trait FailableBiFunction<T, U, R, E> {
    fn apply(&self, first: T, second: U) -> Result<R, E>;

    /// Returns a function that feeds this function's result into `after`.
    fn and_then<V, G>(self, after: G) -> BiFunctionAndThen<Self, G, R>
    where
        Self: Sized,
        G: FailableFunction<R, V, E>,
    {
        BiFunctionAndThen {
            first: self,
            after,
            _mid: PhantomData,
        }
    }
}

impl<F, T, U, R, E> FailableBiFunction<T, U, R, E> for F
where
    F: Fn(T, U) -> Result<R, E>,
{
    #[inline]
    fn apply(&self, first: T, second: U) -> Result<R, E> {
        self(first, second)
    }
}

pub struct BiFunctionAndThen<A, B, M> {
    first: A,
    after: B,
    _mid: PhantomData<fn() -> M>,
}

impl<A, B, T, U, M, R, E> FailableBiFunction<T, U, R, E> for BiFunctionAndThen<A, B, M>
where
    A: FailableBiFunction<T, U, M, E>,
    B: FailableFunction<M, R, E>,
{
    fn apply(&self, first: T, second: U) -> Result<R, E> {
        let mid = self.first.apply(first, second)?;
        self.after.apply(mid)
    }
}

#[cfg(test)]
#[path = "../tests/function_tests.rs"]
mod tests;
