//! The callback contract implemented by the upstream event core.
//!
//! The bridge owns exactly one [`WindowListener`] per native window and calls it synchronously
//! on the UI thread, in the order the backend produced the events. Gesture sessions are handed
//! out by the listener as [`DragListener`]s and [`ScrollListener`]s, which the bridge then wraps
//! in consume-on-call capabilities (see [`handle`](crate::handle)).
//!
//! Every method has a default implementation so that listeners only need to implement the
//! events they are interested in.

use crate::event::{MouseButton, Point, ScrollDelta, Timestamp};
use crate::text_input::TextInputEdit;
use crate::window::{NcHit, WindowId};

/// Receives the events of one window.
pub trait WindowListener {
    /// The user asked to close the window.
    ///
    /// Return `false` to veto the request. The default accepts it.
    fn should_close(&mut self, window: WindowId) -> bool {
        let _ = window;
        true
    }

    /// The window was closed. No further events are delivered to this listener.
    fn closed(&mut self, window: WindowId) {
        let _ = window;
    }

    fn resized(&mut self, window: WindowId) {
        let _ = window;
    }

    fn scale_factor_changed(&mut self, window: WindowId) {
        let _ = window;
    }

    /// The backend is ready to accept a new frame.
    fn update_ready(&mut self, window: WindowId) {
        let _ = window;
    }

    /// The window gained or lost keyboard focus.
    fn focus(&mut self, window: WindowId, focused: bool) {
        let _ = (window, focused);
    }

    fn mouse_motion(&mut self, window: WindowId, position: Point) {
        let _ = (window, position);
    }

    fn mouse_leave(&mut self, window: WindowId) {
        let _ = window;
    }

    /// A mouse button was pressed or released.
    ///
    /// This is delivered for every physical press and release, whether or not a drag session
    /// is active.
    fn mouse_button(&mut self, window: WindowId, position: Point, pressed: bool, button: MouseButton) {
        let _ = (window, position, pressed, button);
    }

    /// Decide how the window manager should treat a point of the window.
    ///
    /// ## Platform-specific
    ///
    /// - **Win32:** Only called for points of the client area.
    /// - **GTK:** Never called.
    fn nc_hit_test(&mut self, window: WindowId, position: Point) -> NcHit {
        let _ = (window, position);
        NcHit::Client
    }

    /// A notched wheel stepped once. `delta` is a unit vector.
    fn scroll_discrete(&mut self, window: WindowId, position: Point, delta: ScrollDelta) {
        let _ = (window, position, delta);
    }

    /// A precise scroll delta, in points.
    fn scroll_continuous(
        &mut self,
        window: WindowId,
        position: Point,
        delta: ScrollDelta,
        timestamp: Timestamp,
    ) {
        let _ = (window, position, delta, timestamp);
    }

    /// The continuous scroll stream that was in progress physically stopped.
    fn scroll_stop(&mut self, window: WindowId, timestamp: Timestamp) {
        let _ = (window, timestamp);
    }

    /// A button was pressed while no drag session was active.
    ///
    /// The returned listener receives the rest of the gesture.
    fn begin_drag(
        &mut self,
        window: WindowId,
        position: Point,
        button: MouseButton,
    ) -> Box<dyn DragListener> {
        let _ = (window, position, button);
        Box::new(())
    }

    /// A phased scroll gesture started.
    fn begin_scroll_gesture(&mut self, window: WindowId, position: Point) -> Box<dyn ScrollListener> {
        let _ = (window, position);
        Box::new(())
    }

    /// The text the IME currently edits, if any.
    ///
    /// Returning `None` means the window has no composing context; text input events are then
    /// dropped.
    fn text_input(&mut self, window: WindowId) -> Option<&mut dyn TextInputEdit> {
        let _ = window;
        None
    }
}

/// Receives the rest of a drag gesture.
pub trait DragListener {
    fn motion(&mut self, window: WindowId, position: Point) {
        let _ = (window, position);
    }

    /// Another button was pressed during the drag.
    fn mouse_down(&mut self, window: WindowId, position: Point, button: MouseButton) {
        let _ = (window, position, button);
    }

    fn mouse_up(&mut self, window: WindowId, position: Point, button: MouseButton) {
        let _ = (window, position, button);
    }

    /// The drag finished normally.
    fn release(self: Box<Self>, window: WindowId) {
        let _ = window;
    }

    /// The drag was aborted; any effect it had so far should be rolled back.
    fn cancel(self: Box<Self>, window: WindowId) {
        let _ = window;
    }
}

impl DragListener for () {}

/// Receives the rest of a scroll gesture.
pub trait ScrollListener {
    /// `velocity` is in points per second.
    fn motion(&mut self, window: WindowId, precise: bool, delta: ScrollDelta, velocity: ScrollDelta) {
        let _ = (window, precise, delta, velocity);
    }

    /// The fingers were lifted and the backend now generates inertial motion.
    fn start_momentum_phase(&mut self, window: WindowId) {
        let _ = window;
    }

    /// No more motion will be delivered. Always followed by `release`.
    fn end(&mut self, window: WindowId) {
        let _ = window;
    }

    fn release(self: Box<Self>, window: WindowId) {
        let _ = window;
    }

    fn cancel(self: Box<Self>, window: WindowId) {
        let _ = window;
    }
}

impl ScrollListener for () {}

impl<L: WindowListener + ?Sized> WindowListener for Box<L> {
    fn should_close(&mut self, window: WindowId) -> bool {
        (**self).should_close(window)
    }

    fn closed(&mut self, window: WindowId) {
        (**self).closed(window)
    }

    fn resized(&mut self, window: WindowId) {
        (**self).resized(window)
    }

    fn scale_factor_changed(&mut self, window: WindowId) {
        (**self).scale_factor_changed(window)
    }

    fn update_ready(&mut self, window: WindowId) {
        (**self).update_ready(window)
    }

    fn focus(&mut self, window: WindowId, focused: bool) {
        (**self).focus(window, focused)
    }

    fn mouse_motion(&mut self, window: WindowId, position: Point) {
        (**self).mouse_motion(window, position)
    }

    fn mouse_leave(&mut self, window: WindowId) {
        (**self).mouse_leave(window)
    }

    fn mouse_button(&mut self, window: WindowId, position: Point, pressed: bool, button: MouseButton) {
        (**self).mouse_button(window, position, pressed, button)
    }

    fn nc_hit_test(&mut self, window: WindowId, position: Point) -> NcHit {
        (**self).nc_hit_test(window, position)
    }

    fn scroll_discrete(&mut self, window: WindowId, position: Point, delta: ScrollDelta) {
        (**self).scroll_discrete(window, position, delta)
    }

    fn scroll_continuous(
        &mut self,
        window: WindowId,
        position: Point,
        delta: ScrollDelta,
        timestamp: Timestamp,
    ) {
        (**self).scroll_continuous(window, position, delta, timestamp)
    }

    fn scroll_stop(&mut self, window: WindowId, timestamp: Timestamp) {
        (**self).scroll_stop(window, timestamp)
    }

    fn begin_drag(
        &mut self,
        window: WindowId,
        position: Point,
        button: MouseButton,
    ) -> Box<dyn DragListener> {
        (**self).begin_drag(window, position, button)
    }

    fn begin_scroll_gesture(&mut self, window: WindowId, position: Point) -> Box<dyn ScrollListener> {
        (**self).begin_scroll_gesture(window, position)
    }

    fn text_input(&mut self, window: WindowId) -> Option<&mut dyn TextInputEdit> {
        (**self).text_input(window)
    }
}
