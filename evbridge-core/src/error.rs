//! Common error types.
//!
//! The bridge is synchronous and does no I/O, so the taxonomy is narrow: misuse of a capability
//! is made unrepresentable by the types in [`handle`](crate::handle), out-of-range text queries
//! are clamped, and ignorable native noise is dropped. What remains are the errors below.

use std::{error, fmt};

/// The error type for when an operation that must run on the UI thread was attempted from
/// another thread.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BadThread {
    _marker: (),
}

impl Default for BadThread {
    fn default() -> Self {
        Self::new()
    }
}

impl BadThread {
    /// Create a new [`BadThread`].
    #[inline]
    pub fn new() -> BadThread {
        BadThread { _marker: () }
    }
}

impl fmt::Debug for BadThread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_struct("BadThread").finish()
    }
}

impl fmt::Display for BadThread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.pad("the operation is only allowed on the UI thread")
    }
}

impl error::Error for BadThread {}

/// A wire integer that names no variant of a shared enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidWireValue {
    ty: &'static str,
    value: u32,
}

impl InvalidWireValue {
    pub(crate) fn new(ty: &'static str, value: u32) -> Self {
        Self { ty, value }
    }

    /// The name of the enumeration the value was decoded as.
    pub fn type_name(&self) -> &'static str {
        self.ty
    }

    /// The rejected value.
    pub fn value(&self) -> u32 {
        self.value
    }
}

impl fmt::Display for InvalidWireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is not a valid `{}`", self.value, self.ty)
    }
}

impl error::Error for InvalidWireValue {}

/// The error type for when a fixed-size queue has no room left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError {
    capacity: usize,
}

impl CapacityError {
    /// Create a new [`CapacityError`] for a queue holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "the queue is full ({} entries)", self.capacity)
    }
}

impl error::Error for CapacityError {}
