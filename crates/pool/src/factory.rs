//! Construction strategies for pooled instances

use thiserror::Error;

use crate::error::FactoryError;

/// Produces new instances for a pool on demand.
///
/// A factory never yields an absent value: failures are reported through
/// `Err` and wrapped by the pool into
/// [`PoolError::ConstructionFailed`](crate::error::PoolError::ConstructionFailed).
///
/// Any `FnMut() -> T` closure is an infallible factory:
///
/// ```
/// use nebula_pool::factory::Factory;
///
/// let mut next = 0;
/// let mut factory = move || {
///     next += 1;
///     next
/// };
/// assert_eq!(factory.create().unwrap(), 1);
/// assert_eq!(factory.create().unwrap(), 2);
/// ```
pub trait Factory<T> {
    /// Create a new instance
    fn create(&mut self) -> Result<T, FactoryError>;
}

impl<T, F> Factory<T> for F
where
    F: FnMut() -> T,
{
    fn create(&mut self) -> Result<T, FactoryError> {
        Ok(self())
    }
}

/// Factory that default-constructs instances
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFactory;

impl<T: Default> Factory<T> for DefaultFactory {
    fn create(&mut self) -> Result<T, FactoryError> {
        Ok(T::default())
    }
}

/// Factory over a fallible closure
#[derive(Debug, Clone)]
pub struct TryFnFactory<F>(pub F);

impl<T, E, F> Factory<T> for TryFnFactory<F>
where
    F: FnMut() -> Result<T, E>,
    E: Into<FactoryError>,
{
    fn create(&mut self) -> Result<T, FactoryError> {
        (self.0)().map_err(Into::into)
    }
}

/// Returned when an [`OptionFactory`] closure yields `None`
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("factory returned no value")]
pub struct MissingValue;

/// Factory over a closure that may produce nothing
#[derive(Debug, Clone)]
pub struct OptionFactory<F>(pub F);

impl<T, F> Factory<T> for OptionFactory<F>
where
    F: FnMut() -> Option<T>,
{
    fn create(&mut self) -> Result<T, FactoryError> {
        (self.0)().ok_or_else(|| Box::new(MissingValue) as FactoryError)
    }
}
