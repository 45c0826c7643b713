//! Per-window routing state shared by every adapter.

use evbridge_core::event::{Activation, Point, PointerEvent, ScrollDelta, ScrollInput, Timestamp};
use evbridge_core::listener::WindowListener;
use evbridge_core::thread::UiThread;
use evbridge_core::window::{NcHit, WindowAttributes, WindowHandle, WindowId};

use crate::dispatcher::Dispatcher;
use crate::filter;
use crate::gesture::{CaptureOwner, GestureArbiter, GestureKind, GestureState, GestureToken};
use crate::scroll::{ScrollPhase, ScrollPhaseTracker};
use crate::text_input::TextInputBridge;

/// A backend adapter bound to one native window.
///
/// Implementations convert one native event record at a time and forward the result to their
/// [`WindowContext`] before returning. They hold no event state of their own beyond what the
/// native coordinate and unit conversions need.
pub trait EventSource {
    /// The native event record.
    type Event;

    /// What the native event handler returns to the backend.
    type Response;

    fn handle_event(&mut self, event: Self::Event) -> Self::Response;

    fn context(&self) -> &WindowContext;

    fn context_mut(&mut self) -> &mut WindowContext;
}

/// Everything the bridge knows about one native window.
///
/// Owns the window's [`Dispatcher`] together with the state the routing stages keep between
/// events: the gesture arbiter, the scroll phase tracker, and the set of buttons held down.
#[derive(Debug)]
pub struct WindowContext {
    handle: WindowHandle,
    attributes: WindowAttributes,
    dispatcher: Dispatcher,
    arbiter: GestureArbiter,
    tracker: ScrollPhaseTracker,
    /// Bitmask of the buttons whose press was forwarded and whose release wasn't yet.
    pressed: u32,
    _thread: UiThread,
}

impl WindowContext {
    pub fn new(
        thread: UiThread,
        handle: WindowHandle,
        attributes: WindowAttributes,
        listener: Box<dyn WindowListener>,
    ) -> Self {
        tracing::debug!(window = ?handle.id(), ?attributes, "attaching window");
        Self {
            dispatcher: Dispatcher::new(handle.id(), listener),
            handle,
            attributes,
            arbiter: GestureArbiter::new(),
            tracker: ScrollPhaseTracker::new(),
            pressed: 0,
            _thread: thread,
        }
    }

    pub fn handle(&self) -> &WindowHandle {
        &self.handle
    }

    pub fn id(&self) -> WindowId {
        self.handle.id()
    }

    pub fn attributes(&self) -> &WindowAttributes {
        &self.attributes
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Buttons currently held down, as a bitmask of [`MouseButton::mask`] values.
    ///
    /// [`MouseButton::mask`]: evbridge_core::event::MouseButton::mask
    pub fn pressed_buttons(&self) -> u32 {
        self.pressed
    }

    pub fn capture_owner(&self, kind: GestureKind) -> CaptureOwner {
        self.arbiter.owner(kind)
    }

    pub fn gesture_state(&self, kind: GestureKind) -> GestureState {
        self.arbiter.state(kind)
    }

    pub fn scroll_phase(&self) -> ScrollPhase {
        self.tracker.phase()
    }

    /// Route one pointer event.
    pub fn pointer(&mut self, event: PointerEvent) {
        self.arbiter.settle_lifted();

        if let (Activation::Synthetic, Some(button), true) =
            (event.activation, event.button, event.pressed)
        {
            if self.pressed & button.mask() == 0 {
                tracing::warn!(
                    window = ?self.id(),
                    ?button,
                    "double click reported without a preceding press; the click is lost"
                );
            }
        }

        let Some(event) = filter::filter(event) else {
            return;
        };

        if let Some(button) = event.button {
            if event.pressed {
                self.pressed |= button.mask();
            } else {
                self.pressed &= !button.mask();
            }
        }

        self.arbiter.pointer(&mut self.dispatcher, event, self.attributes.drag_gestures);
    }

    pub fn pointer_left(&mut self) {
        self.arbiter.settle_lifted();
        self.dispatcher.mouse_leave();
    }

    /// Route one scroll event that is not part of a scroll gesture.
    pub fn scroll(&mut self, input: ScrollInput) {
        self.arbiter.settle_lifted();
        if let Some(event) = self.tracker.track(input) {
            self.dispatcher.scroll(event);
        }
    }

    /// Open a scroll gesture. See [`GestureArbiter::begin_scroll`].
    pub fn begin_scroll_gesture(&mut self, position: Point) -> Option<GestureToken> {
        self.arbiter.begin_scroll(&mut self.dispatcher, position)
    }

    pub fn scroll_gesture_motion(
        &mut self,
        precise: bool,
        delta: ScrollDelta,
        timestamp: Timestamp,
    ) -> bool {
        self.arbiter.scroll_motion(precise, delta, timestamp)
    }

    pub fn lift_scroll_gesture(&mut self) -> bool {
        self.arbiter.lift_scroll()
    }

    pub fn start_momentum(&mut self) -> bool {
        self.arbiter.start_momentum()
    }

    pub fn end_scroll_gesture(&mut self) -> bool {
        self.arbiter.end_scroll()
    }

    /// Abort the active scroll gesture without completing it.
    pub fn cancel_scroll_gesture(&mut self) -> bool {
        self.arbiter.cancel(GestureKind::Scroll)
    }

    /// Settle a lifted scroll gesture that is still waiting for momentum.
    ///
    /// Hosts call this when the native event queue runs dry.
    pub fn flush_gestures(&mut self) {
        self.arbiter.settle_lifted();
    }

    /// Another window or the system took the pointer capture away.
    ///
    /// The releases of the buttons still held go to whoever holds the capture now, so they
    /// are forgotten here.
    pub fn capture_lost(&mut self) {
        self.pressed = 0;
        if self.arbiter.cancel(GestureKind::Drag) {
            tracing::debug!(window = ?self.id(), "pointer capture lost; drag cancelled");
        }
    }

    pub fn nc_hit_test(&mut self, position: Point) -> NcHit {
        self.dispatcher.nc_hit_test(position)
    }

    pub fn focus(&mut self, focused: bool) {
        if !focused {
            self.arbiter.cancel_all();
            self.pressed = 0;
        }
        self.dispatcher.focus(focused);
    }

    /// Returns `false` if the listener vetoed the close.
    pub fn close_requested(&mut self) -> bool {
        self.dispatcher.should_close()
    }

    /// The native window is going away. Active gestures are cancelled and the listener is
    /// detached.
    pub fn close(&mut self) {
        self.arbiter.cancel_all();
        self.tracker.reset();
        self.pressed = 0;
        self.dispatcher.closed();
    }

    pub fn resized(&mut self) {
        self.dispatcher.resized();
    }

    pub fn scale_factor_changed(&mut self) {
        self.dispatcher.scale_factor_changed();
    }

    pub fn update_ready(&mut self) {
        self.dispatcher.update_ready();
    }

    pub fn has_composing_context(&mut self) -> bool {
        self.dispatcher.text_input().is_some()
    }

    /// The text-input bridge, if the window has a composing context.
    pub fn text_input(&mut self) -> Option<TextInputBridge<'_>> {
        self.dispatcher.text_input().map(TextInputBridge::new)
    }
}

impl Drop for WindowContext {
    fn drop(&mut self) {
        self.arbiter.cancel_all();
    }
}
