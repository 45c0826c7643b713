use std::fmt;

use evbridge_core::event::{MouseButton, Point, ScrollClass, ScrollDelta, ScrollEvent, Timestamp};
use evbridge_core::handle::{DragCapability, HandleLedger, ScrollCapability};
use evbridge_core::listener::WindowListener;
use evbridge_core::text_input::TextInputEdit;
use evbridge_core::window::{NcHit, WindowId};

/// The single sink every adapter funnels normalized events into.
///
/// Owns the [`WindowListener`] of one window and the ledger of the capabilities handed out for
/// it. Events are forwarded synchronously and in order. After [`closed`](Self::closed) the
/// listener is detached and every further event is ignored.
pub struct Dispatcher {
    window: WindowId,
    /// This can be in the following states:
    /// - Attached (Some(listener)).
    /// - Detached after the window closed (None).
    listener: Option<Box<dyn WindowListener>>,
    ledger: HandleLedger,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.listener {
            Some(_) => "<attached>",
            None => "<detached>",
        };
        f.debug_struct("Dispatcher")
            .field("window", &self.window)
            .field("state", &state)
            .field("outstanding", &self.ledger.outstanding())
            .finish()
    }
}

impl Dispatcher {
    pub fn new(window: WindowId, listener: Box<dyn WindowListener>) -> Self {
        Self { window, listener: Some(listener), ledger: HandleLedger::new() }
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    pub fn ledger(&self) -> &HandleLedger {
        &self.ledger
    }

    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    /// Call the listener and return a value.
    ///
    /// Returns `None` if the listener was detached.
    pub fn handle_with_result<R>(
        &mut self,
        callback: impl FnOnce(&mut (dyn WindowListener + '_), WindowId) -> R,
    ) -> Option<R> {
        match self.listener.as_deref_mut() {
            Some(listener) => Some(callback(listener, self.window)),
            None => {
                tracing::debug!(window = ?self.window, "event after close ignored");
                None
            },
        }
    }

    pub fn handle(&mut self, callback: impl FnOnce(&mut (dyn WindowListener + '_), WindowId)) {
        let _ = self.handle_with_result(callback);
    }

    /// Ask whether the window may close. A detached listener never vetoes.
    pub fn should_close(&mut self) -> bool {
        self.handle_with_result(|l, window| l.should_close(window)).unwrap_or(true)
    }

    /// Deliver `closed` and detach the listener.
    pub fn closed(&mut self) {
        if let Some(mut listener) = self.listener.take() {
            listener.closed(self.window);
            if self.ledger.outstanding() != 0 {
                tracing::warn!(
                    window = ?self.window,
                    outstanding = self.ledger.outstanding(),
                    "window closed with capabilities still outstanding"
                );
            }
        }
    }

    pub fn resized(&mut self) {
        self.handle(|l, window| l.resized(window));
    }

    pub fn scale_factor_changed(&mut self) {
        self.handle(|l, window| l.scale_factor_changed(window));
    }

    pub fn update_ready(&mut self) {
        self.handle(|l, window| l.update_ready(window));
    }

    pub fn focus(&mut self, focused: bool) {
        self.handle(|l, window| l.focus(window, focused));
    }

    pub fn mouse_motion(&mut self, position: Point) {
        self.handle(|l, window| l.mouse_motion(window, position));
    }

    pub fn mouse_leave(&mut self) {
        self.handle(|l, window| l.mouse_leave(window));
    }

    pub fn mouse_button(&mut self, position: Point, pressed: bool, button: MouseButton) {
        self.handle(|l, window| l.mouse_button(window, position, pressed, button));
    }

    pub fn nc_hit_test(&mut self, position: Point) -> NcHit {
        self.handle_with_result(|l, window| l.nc_hit_test(window, position)).unwrap_or_default()
    }

    pub fn scroll_discrete(&mut self, position: Point, delta: ScrollDelta) {
        self.handle(|l, window| l.scroll_discrete(window, position, delta));
    }

    pub fn scroll_continuous(&mut self, position: Point, delta: ScrollDelta, timestamp: Timestamp) {
        self.handle(|l, window| l.scroll_continuous(window, position, delta, timestamp));
    }

    pub fn scroll_stop(&mut self, timestamp: Timestamp) {
        self.handle(|l, window| l.scroll_stop(window, timestamp));
    }

    /// Forward a classified scroll event to the matching callback.
    pub fn scroll(&mut self, event: ScrollEvent) {
        match event.class {
            ScrollClass::Discrete => self.scroll_discrete(event.position, event.delta),
            ScrollClass::Precise => {
                self.scroll_continuous(event.position, event.delta, event.timestamp)
            },
            ScrollClass::MomentumStop => self.scroll_stop(event.timestamp),
        }
    }

    pub fn begin_drag(&mut self, position: Point, button: MouseButton) -> Option<DragCapability> {
        let listener =
            self.handle_with_result(|l, window| l.begin_drag(window, position, button))?;
        Some(DragCapability::new(self.window, listener, &self.ledger))
    }

    pub fn begin_scroll_gesture(&mut self, position: Point) -> Option<ScrollCapability> {
        let listener = self.handle_with_result(|l, window| l.begin_scroll_gesture(window, position))?;
        Some(ScrollCapability::new(self.window, listener, &self.ledger))
    }

    /// The text the IME edits, if the window has a composing context.
    pub fn text_input(&mut self) -> Option<&mut dyn TextInputEdit> {
        let window = self.window;
        self.listener.as_deref_mut()?.text_input(window)
    }
}
