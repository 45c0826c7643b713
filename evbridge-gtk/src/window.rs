use std::time::Duration;

use dpi::LogicalPosition;
use evbridge_common::{EventSource, WindowContext};
use evbridge_core::event::{MouseButton, Point, PointerEvent, ScrollDirection, ScrollInput, Timestamp};
use evbridge_core::listener::WindowListener;
use evbridge_core::thread::UiThread;
use evbridge_core::window::{WindowAttributes, WindowHandle};

use crate::event::{
    GdkButtonEventType, GdkEvent, GdkEventButton, GdkEventScroll, GdkScrollDirection, Propagation,
};
use crate::style::{self, WindowProps};

/// Convert an X11 button number to the zero-based scheme.
///
/// Buttons 4 to 7 emulate the scroll wheel and have no zero-based number.
pub fn normalize_button(button: u32) -> Option<MouseButton> {
    let index = match button {
        1 => 0,
        3 => 1,
        2 => 2,
        8 => 3,
        9 => 4,
        0 | 4..=7 => return None,
        n => n - 5,
    };
    u8::try_from(index).ok().and_then(MouseButton::new)
}

fn timestamp(time: u32) -> Timestamp {
    Duration::from_millis(time.into())
}

/// The event source of one `GtkWindow`.
///
/// The host connects the signals of the window and its drawing area and forwards them as
/// [`GdkEvent`]s. GTK already reports positions in logical pixels with the origin at the
/// top-left corner, so they are passed through unchanged.
#[derive(Debug)]
pub struct GtkWindow {
    pub(crate) context: WindowContext,
}

impl GtkWindow {
    pub fn new(
        thread: UiThread,
        handle: WindowHandle,
        attributes: WindowAttributes,
        listener: Box<dyn WindowListener>,
    ) -> Self {
        Self { context: WindowContext::new(thread, handle, attributes, listener) }
    }

    pub fn props(&self) -> WindowProps {
        WindowProps::from(self.context.attributes().flags)
    }

    pub fn cursor_name(&self) -> &'static str {
        style::cursor_name(self.context.attributes().cursor)
    }

    fn button(&mut self, event: &GdkEventButton) -> Propagation {
        let position = LogicalPosition::new(event.x, event.y);
        let Some(button) = normalize_button(event.button) else {
            if event.button == 0 {
                tracing::warn!("ignoring button event without a button number");
            } else {
                tracing::trace!(button = event.button, "ignoring wheel emulation button");
            }
            return Propagation::Proceed;
        };

        let pointer = match event.event_type {
            GdkButtonEventType::ButtonPress => PointerEvent::press(position, button),
            GdkButtonEventType::DoubleButtonPress | GdkButtonEventType::TripleButtonPress => {
                PointerEvent::press(position, button).synthetic()
            },
            GdkButtonEventType::ButtonRelease => PointerEvent::release(position, button),
        };
        self.context.pointer(pointer);
        Propagation::Stop
    }

    fn scroll(&mut self, event: &GdkEventScroll) -> Propagation {
        let position: Point = LogicalPosition::new(event.x, event.y);
        let timestamp = timestamp(event.time);
        let line_height = self.context.attributes().line_height;

        let direction = match event.direction {
            GdkScrollDirection::Up => ScrollDirection::Up,
            GdkScrollDirection::Down => ScrollDirection::Down,
            GdkScrollDirection::Left => ScrollDirection::Left,
            GdkScrollDirection::Right => ScrollDirection::Right,
            GdkScrollDirection::Smooth => {
                let input = if event.is_stop {
                    ScrollInput::stop(position, timestamp)
                } else if event.delta_x == 0.0 && event.delta_y == 0.0 {
                    tracing::trace!("dropping empty smooth scroll event");
                    return Propagation::Stop;
                } else {
                    let delta = LogicalPosition::new(
                        -event.delta_x * line_height,
                        -event.delta_y * line_height,
                    );
                    ScrollInput::delta(position, delta, timestamp)
                };
                self.context.scroll(input);
                return Propagation::Stop;
            },
        };

        self.context.scroll(ScrollInput::step(position, direction, timestamp));
        Propagation::Stop
    }
}

impl EventSource for GtkWindow {
    type Event = GdkEvent;
    type Response = Propagation;

    fn handle_event(&mut self, event: GdkEvent) -> Propagation {
        tracing::trace!(?event, "GdkEvent");
        match event {
            GdkEvent::Button(event) => self.button(&event),
            GdkEvent::Motion(event) => {
                self.context.pointer(PointerEvent::motion(LogicalPosition::new(event.x, event.y)));
                Propagation::Stop
            },
            GdkEvent::Scroll(event) => self.scroll(&event),
            GdkEvent::LeaveNotify => {
                self.context.pointer_left();
                Propagation::Stop
            },
            GdkEvent::Focus { focus_in } => {
                self.context.focus(focus_in);
                Propagation::Proceed
            },
            GdkEvent::GrabBroken => {
                self.context.capture_lost();
                Propagation::Stop
            },
            GdkEvent::SizeAllocate => {
                self.context.resized();
                Propagation::Proceed
            },
            GdkEvent::ScaleFactorChanged => {
                self.context.scale_factor_changed();
                Propagation::Proceed
            },
            GdkEvent::FrameClockUpdate => {
                self.context.flush_gestures();
                self.context.update_ready();
                Propagation::Proceed
            },
            // Returning `Stop` from `delete-event` keeps the window open.
            GdkEvent::Delete => {
                if self.context.close_requested() {
                    Propagation::Proceed
                } else {
                    Propagation::Stop
                }
            },
            GdkEvent::Destroy => {
                self.context.close();
                Propagation::Proceed
            },
        }
    }

    fn context(&self) -> &WindowContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut WindowContext {
        &mut self.context
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use evbridge_core::event::ScrollDelta;
    use evbridge_core::thread;
    use evbridge_core::window::WindowId;

    use super::*;

    type Log = Rc<RefCell<Vec<String>>>;

    #[derive(Default)]
    struct Recorder {
        log: Log,
        veto: bool,
    }

    impl WindowListener for Recorder {
        fn should_close(&mut self, _: WindowId) -> bool {
            !self.veto
        }

        fn closed(&mut self, _: WindowId) {
            self.log.borrow_mut().push("closed".into());
        }

        fn mouse_button(&mut self, _: WindowId, _: Point, pressed: bool, b: MouseButton) {
            self.log.borrow_mut().push(format!("button {pressed} {}", b.index()));
        }

        fn scroll_discrete(&mut self, _: WindowId, _: Point, d: ScrollDelta) {
            self.log.borrow_mut().push(format!("discrete {} {}", d.x, d.y));
        }

        fn scroll_continuous(&mut self, _: WindowId, _: Point, d: ScrollDelta, t: Timestamp) {
            self.log.borrow_mut().push(format!("continuous {} {} {}", d.x, d.y, t.as_millis()));
        }

        fn scroll_stop(&mut self, _: WindowId, t: Timestamp) {
            self.log.borrow_mut().push(format!("stop {}", t.as_millis()));
        }
    }

    fn window(recorder: Recorder) -> GtkWindow {
        GtkWindow::new(
            thread::bootstrap(),
            WindowHandle::detached(WindowId::dummy()),
            WindowAttributes::default().with_drag_gestures(false).with_line_height(20.0),
            Box::new(recorder),
        )
    }

    fn take(log: &Log) -> Vec<String> {
        log.borrow_mut().drain(..).collect()
    }

    fn button(event_type: GdkButtonEventType, button: u32) -> GdkEvent {
        GdkEvent::Button(GdkEventButton { event_type, x: 1.0, y: 2.0, button, time: 0 })
    }

    #[test]
    fn button_table() {
        let table: Vec<_> = (0..12).map(|n| normalize_button(n).map(MouseButton::index)).collect();
        assert_eq!(table, [
            None,
            Some(0),
            Some(2),
            Some(1),
            None,
            None,
            None,
            None,
            Some(3),
            Some(4),
            Some(5),
            Some(6),
        ]);
    }

    #[test]
    fn double_click_press_is_dropped() {
        let recorder = Recorder::default();
        let log = Rc::clone(&recorder.log);
        let mut w = window(recorder);

        for event in [
            button(GdkButtonEventType::ButtonPress, 1),
            button(GdkButtonEventType::ButtonRelease, 1),
            button(GdkButtonEventType::ButtonPress, 1),
            button(GdkButtonEventType::DoubleButtonPress, 1),
            button(GdkButtonEventType::ButtonRelease, 1),
        ] {
            w.handle_event(event);
        }

        assert_eq!(take(&log), [
            "button true 0",
            "button false 0",
            "button true 0",
            "button false 0",
        ]);
    }

    #[test]
    fn wheel_emulation_buttons_propagate() {
        let mut w = window(Recorder::default());
        assert_eq!(
            w.handle_event(button(GdkButtonEventType::ButtonPress, 4)),
            Propagation::Proceed
        );
    }

    #[test]
    fn scroll_units() {
        let recorder = Recorder::default();
        let log = Rc::clone(&recorder.log);
        let mut w = window(recorder);

        w.handle_event(GdkEvent::Scroll(GdkEventScroll::discrete(
            0.0,
            0.0,
            GdkScrollDirection::Left,
            5,
        )));
        w.handle_event(GdkEvent::Scroll(GdkEventScroll::smooth(0.0, 0.0, 0.5, 0.25, 100)));
        w.handle_event(GdkEvent::Scroll(GdkEventScroll::smooth(0.0, 0.0, 0.0, 0.0, 120)));
        w.handle_event(GdkEvent::Scroll(GdkEventScroll::stop(0.0, 0.0, 150)));

        assert_eq!(take(&log), ["discrete 1 0", "continuous -10 -5 100", "stop 150"]);
    }

    #[test]
    fn delete_event_carries_the_veto() {
        let recorder = Recorder { veto: true, ..Default::default() };
        let log = Rc::clone(&recorder.log);
        let mut w = window(recorder);

        assert_eq!(w.handle_event(GdkEvent::Delete), Propagation::Stop);
        w.handle_event(GdkEvent::Destroy);
        assert_eq!(w.handle_event(GdkEvent::Delete), Propagation::Proceed);
        assert_eq!(take(&log), ["closed"]);
    }
}
