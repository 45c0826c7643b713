//! The UI thread.
//!
//! Every adapter entry point runs synchronously on a thread that runs a native event loop.
//! [`bootstrap`] marks the calling thread as such a thread and returns a [`UiThread`] token,
//! which adapters require at construction. The token can't leave the thread it was created on.

use std::cell::Cell;
use std::marker::PhantomData;

use crate::error::BadThread;

thread_local! {
    static IS_UI_THREAD: Cell<bool> = const { Cell::new(false) };
}

/// Proof that the current thread was bootstrapped as a UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiThread {
    _not_send: PhantomData<*const ()>,
}

impl UiThread {
    /// Returns the token if [`bootstrap`] was called on the current thread.
    pub fn try_current() -> Result<Self, BadThread> {
        if IS_UI_THREAD.with(Cell::get) {
            Ok(Self { _not_send: PhantomData })
        } else {
            Err(BadThread::new())
        }
    }
}

/// Mark the calling thread as a UI thread.
///
/// This must happen once before any adapter is created on the thread. Calling it again is
/// harmless.
pub fn bootstrap() -> UiThread {
    IS_UI_THREAD.with(|flag| {
        if !flag.replace(true) {
            tracing::debug!(thread = ?std::thread::current().id(), "bootstrapped UI thread");
        }
    });
    UiThread { _not_send: PhantomData }
}
