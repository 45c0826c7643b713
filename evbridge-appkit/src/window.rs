use dpi::LogicalPosition;
use evbridge_common::{EventSource, WindowContext};
use evbridge_core::event::{MouseButton, Point, PointerEvent, ScrollDelta, ScrollInput};
use evbridge_core::listener::WindowListener;
use evbridge_core::thread::UiThread;
use evbridge_core::window::{NcHit, WindowAttributes, WindowHandle};

use crate::cursor::Cursor;
use crate::event::{NSEventPhase, NSEventType, NSPoint, NSSize, NsEvent};
use crate::style::WindowStyle;

/// The event source of one `NSWindow`.
///
/// The host's `NSView` and `NSWindowDelegate` subclasses forward each callback here. Points
/// arrive in window coordinates with the origin at the bottom-left corner and are flipped
/// against the content height the adapter was last told about.
#[derive(Debug)]
pub struct AppKitWindow {
    pub(crate) context: WindowContext,
    pub(crate) content_height: f64,
}

impl AppKitWindow {
    pub fn new(
        thread: UiThread,
        handle: WindowHandle,
        attributes: WindowAttributes,
        listener: Box<dyn WindowListener>,
        content_size: NSSize,
    ) -> Self {
        Self {
            context: WindowContext::new(thread, handle, attributes, listener),
            content_height: content_size.height,
        }
    }

    /// The style the host should create the `NSWindow` with.
    pub fn style(&self) -> WindowStyle {
        WindowStyle::from(self.context.attributes().flags)
    }

    /// The cursor the host should show over the content view.
    pub fn cursor(&self) -> Cursor {
        Cursor::from(self.context.attributes().cursor)
    }

    pub fn set_content_height(&mut self, height: f64) {
        self.content_height = height;
    }

    pub(crate) fn point(&self, location: NSPoint) -> Point {
        LogicalPosition::new(location.x, self.content_height - location.y)
    }

    /// `windowShouldClose:`
    pub fn window_should_close(&mut self) -> bool {
        tracing::trace!("windowShouldClose:");
        self.context.close_requested()
    }

    /// `windowWillClose:`
    pub fn window_will_close(&mut self) {
        tracing::trace!("windowWillClose:");
        self.context.close();
    }

    /// `windowDidResize:`
    pub fn window_did_resize(&mut self, content_size: NSSize) {
        tracing::trace!(?content_size, "windowDidResize:");
        self.content_height = content_size.height;
        self.context.resized();
    }

    /// `windowDidChangeBackingProperties:`
    pub fn window_did_change_backing_properties(&mut self) {
        tracing::trace!("windowDidChangeBackingProperties:");
        self.context.scale_factor_changed();
    }

    /// `windowDidBecomeKey:`
    pub fn window_did_become_key(&mut self) {
        tracing::trace!("windowDidBecomeKey:");
        self.context.focus(true);
    }

    /// `windowDidResignKey:`
    pub fn window_did_resign_key(&mut self) {
        tracing::trace!("windowDidResignKey:");
        self.context.focus(false);
    }

    /// The display link fired and the window can accept a new frame.
    pub fn update_ready(&mut self) {
        self.context.update_ready();
    }

    /// Decides whether a mouse-down at `location` moves the window.
    pub fn nc_hit_test(&mut self, location: NSPoint) -> NcHit {
        let point = self.point(location);
        self.context.nc_hit_test(point)
    }

    /// Settle gesture state that waits for native events which may never come.
    ///
    /// Call this once the native event queue is drained.
    pub fn flush_gestures(&mut self) {
        self.context.flush_gestures();
    }

    fn mouse_button(&mut self, event: &NsEvent, pressed: bool) {
        let position = self.point(event.location_in_window);
        let Some(button) = u8::try_from(event.button_number).ok().and_then(MouseButton::new) else {
            tracing::warn!(button_number = event.button_number, "ignoring unknown mouse button");
            return;
        };
        let event = if pressed {
            PointerEvent::press(position, button)
        } else {
            PointerEvent::release(position, button)
        };
        self.context.pointer(event);
    }

    fn scroll_delta(&self, event: &NsEvent) -> ScrollDelta {
        let scale = if event.has_precise_scrolling_deltas {
            1.0
        } else {
            self.context.attributes().line_height
        };
        LogicalPosition::new(event.scrolling_delta_x * scale, event.scrolling_delta_y * scale)
    }

    fn scroll_wheel(&mut self, event: &NsEvent) {
        let phased = !(event.phase | event.momentum_phase).is_empty();
        if phased && self.context.attributes().scroll_gestures {
            self.scroll_gesture(event);
        } else {
            self.scroll_flat(event);
        }
    }

    /// Deliver a wheel event through the scroll phase tracker.
    fn scroll_flat(&mut self, event: &NsEvent) {
        let position = self.point(event.location_in_window);
        let timestamp = event.timestamp();

        if !event.momentum_phase.is_empty() {
            // The stop was delivered when the fingers were lifted.
            tracing::trace!(momentum_phase = ?event.momentum_phase, "dropping momentum event");
            return;
        }

        if event.phase.intersects(NSEventPhase::ENDED | NSEventPhase::CANCELLED) {
            self.context.scroll(ScrollInput::stop(position, timestamp));
            return;
        }

        let delta = self.scroll_delta(event);
        if delta.x == 0.0 && delta.y == 0.0 {
            return;
        }
        self.context.scroll(ScrollInput::delta(position, delta, timestamp));
    }

    /// Deliver a phased wheel event to a scroll gesture.
    fn scroll_gesture(&mut self, event: &NsEvent) {
        let position = self.point(event.location_in_window);
        let precise = event.has_precise_scrolling_deltas;
        let delta = self.scroll_delta(event);
        let timestamp = event.timestamp();
        let has_delta = delta.x != 0.0 || delta.y != 0.0;

        let phase = event.phase;
        if phase.contains(NSEventPhase::BEGAN) {
            self.context.begin_scroll_gesture(position);
        }
        if phase.intersects(NSEventPhase::BEGAN | NSEventPhase::CHANGED) && has_delta {
            self.context.scroll_gesture_motion(precise, delta, timestamp);
        }
        if phase.contains(NSEventPhase::ENDED) {
            self.context.lift_scroll_gesture();
        }
        if phase.contains(NSEventPhase::CANCELLED) {
            self.context.cancel_scroll_gesture();
        }

        let momentum = event.momentum_phase;
        if momentum.contains(NSEventPhase::BEGAN) {
            self.context.start_momentum();
        }
        if momentum.intersects(NSEventPhase::BEGAN | NSEventPhase::CHANGED) && has_delta {
            self.context.scroll_gesture_motion(precise, delta, timestamp);
        }
        if momentum.intersects(NSEventPhase::ENDED | NSEventPhase::CANCELLED) {
            self.context.end_scroll_gesture();
        }
    }
}

impl EventSource for AppKitWindow {
    type Event = NsEvent;
    type Response = ();

    fn handle_event(&mut self, event: NsEvent) {
        tracing::trace!(event_type = ?event.event_type, "NSEvent");
        match event.event_type {
            NSEventType::LeftMouseDown
            | NSEventType::RightMouseDown
            | NSEventType::OtherMouseDown => self.mouse_button(&event, true),
            NSEventType::LeftMouseUp | NSEventType::RightMouseUp | NSEventType::OtherMouseUp => {
                self.mouse_button(&event, false)
            },
            NSEventType::MouseMoved
            | NSEventType::LeftMouseDragged
            | NSEventType::RightMouseDragged
            | NSEventType::OtherMouseDragged => {
                let position = self.point(event.location_in_window);
                self.context.pointer(PointerEvent::motion(position));
            },
            NSEventType::MouseExited => self.context.pointer_left(),
            NSEventType::ScrollWheel => self.scroll_wheel(&event),
        }
    }

    fn context(&self) -> &WindowContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut WindowContext {
        &mut self.context
    }
}
