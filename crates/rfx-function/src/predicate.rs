//! Failable predicates with short-circuiting boolean combinators.

/// A test on a borrowed `T` that may fail with `E`.
pub trait FailablePredicate<T, E> {
    fn test(&self, value: &T) -> Result<bool, E>;

    /// Returns the logical negation of this predicate.
    fn negate(self) -> Negate<Self>
    where
        Self: Sized,
    {
        Negate { inner: self }
    }

    /// Short-circuiting logical AND: `other` is not evaluated when this
    /// predicate is false or fails.
    fn and<P>(self, other: P) -> And<Self, P>
    where
        Self: Sized,
        P: FailablePredicate<T, E>,
    {
        And { left: self, right: other }
    }

    /// Short-circuiting logical OR: `other` is not evaluated when this
    /// predicate is true or fails.
    fn or<P>(self, other: P) -> Or<Self, P>
    where
        Self: Sized,
        P: FailablePredicate<T, E>,
    {
        Or { left: self, right: other }
    }
}

impl<F, T, E> FailablePredicate<T, E> for F
where
    F: Fn(&T) -> Result<bool, E>,
{
    #[inline]
    fn test(&self, value: &T) -> Result<bool, E> {
        self(value)
    }
}

pub struct Negate<P> {
    inner: P,
}

impl<P, T, E> FailablePredicate<T, E> for Negate<P>
where
    P: FailablePredicate<T, E>,
{
    fn test(&self, value: &T) -> Result<bool, E> {
        self.inner.test(value).map(|b| !b)
    }
}

pub struct And<A, B> {
    left: A,
    right: B,
}

impl<A, B, T, E> FailablePredicate<T, E> for And<A, B>
where
    A: FailablePredicate<T, E>,
    B: FailablePredicate<T, E>,
{
    fn test(&self, value: &T) -> Result<bool, E> {
        if !self.left.test(value)? {
            return Ok(false);
        }
        self.right.test(value)
    }
}

pub struct Or<A, B> {
    left: A,
    right: B,
}

impl<A, B, T, E> FailablePredicate<T, E> for Or<A, B>
where
    A: FailablePredicate<T, E>,
    B: FailablePredicate<T, E>,
{
    fn test(&self, value: &T) -> Result<bool, E> {
        if self.left.test(value)? {
            return Ok(true);
        }
        self.right.test(value)
    }
}

#[cfg(test)]
#[path = "../tests/predicate_tests.rs"]
mod tests;
