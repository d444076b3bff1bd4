//! Type-erased context keys.

use std::any::Any;
use std::fmt;

/// A value usable as a key in a [`Context`](crate::Context).
///
/// Implemented for every `Debug + PartialEq + Send + Sync + 'static` type.
/// Equality is checked after a type match, so keys of different types never
/// collide even if their debug output is identical. Use a private unit
/// struct as the key when a binding must not be reachable from outside a
/// module.
pub trait ContextKey: fmt::Debug + Send + Sync + 'static {
    /// Returns the key as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns true if `other` has the same concrete type and compares equal.
    fn key_eq(&self, other: &dyn ContextKey) -> bool;
}

impl<T> ContextKey for T
where
    T: fmt::Debug + PartialEq + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn key_eq(&self, other: &dyn ContextKey) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}
