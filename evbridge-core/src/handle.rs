//! Capabilities crossing from the bridge into the upstream core.
//!
//! A capability stands for one live piece of upstream state: a drag session, a scroll gesture
//! or a pending timer callback. It must end with exactly one terminal call. Terminal calls take
//! the capability by value, so calling a method on a terminated capability, or terminating it
//! twice, does not compile.
//!
//! Dropping a capability without a terminal call is a bug in the caller. It is logged and
//! treated as a cancellation, so the upstream core still observes exactly one terminal call.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::event::{MouseButton, Point, ScrollDelta};
use crate::listener::{DragListener, ScrollListener};
use crate::window::WindowId;

/// The two ways a capability can end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalCall {
    /// Normal end of life.
    Release,
    /// Abnormal end of life. The upstream core rolls back partial effects.
    Cancel,
}

/// Upstream state that can be terminated through a capability.
pub trait Terminate {
    fn terminate(self: Box<Self>, window: WindowId, call: TerminalCall);
}

impl Terminate for dyn DragListener {
    fn terminate(self: Box<Self>, window: WindowId, call: TerminalCall) {
        match call {
            TerminalCall::Release => self.release(window),
            TerminalCall::Cancel => self.cancel(window),
        }
    }
}

impl Terminate for dyn ScrollListener {
    fn terminate(self: Box<Self>, window: WindowId, call: TerminalCall) {
        match call {
            TerminalCall::Release => self.release(window),
            TerminalCall::Cancel => self.cancel(window),
        }
    }
}

/// Counts the capabilities of one window that have not been terminated yet.
#[derive(Debug, Clone, Default)]
pub struct HandleLedger {
    outstanding: Rc<Cell<usize>>,
}

impl HandleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of live capabilities created against this ledger.
    pub fn outstanding(&self) -> usize {
        self.outstanding.get()
    }

    fn enter(&self) -> LedgerEntry {
        self.outstanding.set(self.outstanding.get() + 1);
        LedgerEntry { outstanding: Rc::clone(&self.outstanding) }
    }
}

struct LedgerEntry {
    outstanding: Rc<Cell<usize>>,
}

impl Drop for LedgerEntry {
    fn drop(&mut self) {
        self.outstanding.set(self.outstanding.get() - 1);
    }
}

/// A consume-on-call handle to one upstream gesture session.
pub struct Capability<L: ?Sized + Terminate> {
    window: WindowId,
    // `None` only after the terminal call.
    listener: Option<Box<L>>,
    _entry: LedgerEntry,
}

/// A drag session opened by [`WindowListener::begin_drag`](crate::listener::WindowListener::begin_drag).
pub type DragCapability = Capability<dyn DragListener>;

/// A scroll gesture opened by
/// [`WindowListener::begin_scroll_gesture`](crate::listener::WindowListener::begin_scroll_gesture).
pub type ScrollCapability = Capability<dyn ScrollListener>;

impl<L: ?Sized + Terminate> Capability<L> {
    pub fn new(window: WindowId, listener: Box<L>, ledger: &HandleLedger) -> Self {
        Self { window, listener: Some(listener), _entry: ledger.enter() }
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    /// End the session normally.
    pub fn release(mut self) {
        self.terminate(TerminalCall::Release);
    }

    /// Abort the session.
    pub fn cancel(mut self) {
        self.terminate(TerminalCall::Cancel);
    }

    fn terminate(&mut self, call: TerminalCall) {
        if let Some(listener) = self.listener.take() {
            tracing::trace!(window = ?self.window, ?call, "terminating capability");
            listener.terminate(self.window, call);
        }
    }

    fn with_listener(&mut self, f: impl FnOnce(&mut L, WindowId)) {
        if let Some(listener) = self.listener.as_deref_mut() {
            f(listener, self.window);
        }
    }
}

impl<L: ?Sized + Terminate> Drop for Capability<L> {
    fn drop(&mut self) {
        if self.listener.is_some() {
            tracing::warn!(window = ?self.window, "capability dropped without release or cancel");
            self.terminate(TerminalCall::Cancel);
        }
    }
}

impl<L: ?Sized + Terminate> fmt::Debug for Capability<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability").field("window", &self.window).finish_non_exhaustive()
    }
}

impl Capability<dyn DragListener> {
    pub fn motion(&mut self, position: Point) {
        self.with_listener(|l, window| l.motion(window, position));
    }

    pub fn mouse_down(&mut self, position: Point, button: MouseButton) {
        self.with_listener(|l, window| l.mouse_down(window, position, button));
    }

    pub fn mouse_up(&mut self, position: Point, button: MouseButton) {
        self.with_listener(|l, window| l.mouse_up(window, position, button));
    }
}

impl Capability<dyn ScrollListener> {
    pub fn motion(&mut self, precise: bool, delta: ScrollDelta, velocity: ScrollDelta) {
        self.with_listener(|l, window| l.motion(window, precise, delta, velocity));
    }

    pub fn start_momentum_phase(&mut self) {
        self.with_listener(|l, window| l.start_momentum_phase(window));
    }

    pub fn end(&mut self) {
        self.with_listener(|l, window| l.end(window));
    }
}

/// A deferred callback handed to a timer.
pub trait Invocation {
    /// The timer expired.
    fn fire(self: Box<Self>);

    /// The timer was cancelled before it expired.
    fn cancel(self: Box<Self>) {}
}

impl<F: FnOnce()> Invocation for F {
    fn fire(self: Box<Self>) {
        (*self)()
    }
}

/// A consume-on-call handle to a pending timer callback.
///
/// Exactly one of [`fire`](Self::fire) and [`cancel`](Self::cancel) reaches the callback.
pub struct InvocationCapability {
    invocation: Option<Box<dyn Invocation>>,
}

impl InvocationCapability {
    pub fn new(invocation: impl Invocation + 'static) -> Self {
        Self { invocation: Some(Box::new(invocation)) }
    }

    pub fn fire(mut self) {
        if let Some(invocation) = self.invocation.take() {
            invocation.fire();
        }
    }

    pub fn cancel(mut self) {
        if let Some(invocation) = self.invocation.take() {
            invocation.cancel();
        }
    }
}

impl Drop for InvocationCapability {
    fn drop(&mut self) {
        if let Some(invocation) = self.invocation.take() {
            tracing::warn!("invocation dropped without firing or cancelling");
            invocation.cancel();
        }
    }
}

impl fmt::Debug for InvocationCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationCapability").finish_non_exhaustive()
    }
}
