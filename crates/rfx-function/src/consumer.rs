//! Failable consumers: operations run for their effect on a value.

/// An operation on a borrowed `T` that may fail with `E`.
pub trait FailableConsumer<T, E> {
    fn accept(&self, value: &T) -> Result<(), E>;

    /// Returns a consumer that runs this one, then `after` on the same value.
    fn and_then<C>(self, after: C) -> ConsumerAndThen<Self, C>
    where
        Self: Sized,
        C: FailableConsumer<T, E>,
    {
        ConsumerAndThen { first: self, after }
    }
}

impl<F, T, E> FailableConsumer<T, E> for F
where
    F: Fn(&T) -> Result<(), E>,
{
    #[inline]
    fn accept(&self, value: &T) -> Result<(), E> {
        self(value)
    }
}

pub struct ConsumerAndThen<A, B> {
    first: A,
    after: B,
}

impl<A, B, T, E> FailableConsumer<T, E> for ConsumerAndThen<A, B>
where
    A: FailableConsumer<T, E>,
    B: FailableConsumer<T, E>,
{
    fn accept(&self, value: &T) -> Result<(), E> {
        self.first.accept(value)?;
        self.after.accept(value)
    }
}

/// An operation on an `i32` that may fail with `E`.
pub trait FailableIntConsumer<E> {
    /// Accepts the given value.
    fn accept(&self, value: i32) -> Result<(), E>;

    /// Returns a consumer that runs this one and then `after`.
    ///
    /// When this consumer fails its error is returned and `after` is skipped.
    fn and_then<C>(self, after: C) -> IntConsumerAndThen<Self, C>
    where
        Self: Sized,
        C: FailableIntConsumer<E>,
    {
        IntConsumerAndThen { first: self, after }
    }
}

impl<F, E> FailableIntConsumer<E> for F
where
    F: Fn(i32) -> Result<(), E>,
{
    #[inline]
    fn accept(&self, value: i32) -> Result<(), E> {
        self(value)
    }
}

pub struct IntConsumerAndThen<A, B> {
    first: A,
    after: B,
}

impl<A, B, E> FailableIntConsumer<E> for IntConsumerAndThen<A, B>
where
    A: FailableIntConsumer<E>,
    B: FailableIntConsumer<E>,
{
    fn accept(&self, value: i32) -> Result<(), E> {
        self.first.accept(value)?;
        self.after.accept(value)
    }
}

#[cfg(test)]
#[path = "../tests/consumer_tests.rs"]
mod tests;
