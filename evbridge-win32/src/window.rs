use std::time::Duration;

use dpi::{LogicalPosition, PhysicalPosition};
use evbridge_common::text_input::utf16_len;
use evbridge_common::{EventSource, WindowContext};
use evbridge_core::event::{MouseButton, Point, PointerEvent, ScrollDirection, ScrollInput};
use evbridge_core::listener::WindowListener;
use evbridge_core::text_input::TextRange;
use evbridge_core::thread::UiThread;
use evbridge_core::window::{NcHit, WindowAttributes, WindowHandle};

use crate::msg::*;
use crate::style::{self, WindowStyles};

/// The event source of one `HWND`.
///
/// The host's window procedure passes each message to [`EventSource::handle_event`] and acts
/// on the returned [`MsgResult`]. Besides that, the host:
///
/// - calls `TrackMouseEvent` with `TME_LEAVE` on `WM_MOUSEMOVE` so that `WM_MOUSELEAVE`
///   arrives,
/// - calls `SetCapture` when [`wants_capture`](Self::wants_capture) becomes `true` and
///   `ReleaseCapture` when it becomes `false`,
/// - reads the composition strings on `WM_IME_COMPOSITION` and calls
///   [`ime_composition`](Self::ime_composition),
/// - on `WM_NCHITTEST`, calls `DefWindowProcW` and hands its result to
///   [`nc_hit_test`](Self::nc_hit_test),
/// - calls [`set_client_origin`](Self::set_client_origin) once the window is created.
#[derive(Debug)]
pub struct Win32Window {
    context: WindowContext,
    scale_factor: f64,
    /// The top-left corner of the client area in screen pixels. Follows `WM_MOVE`.
    client_origin: PhysicalPosition<i32>,
}

impl Win32Window {
    /// `dpi` is `GetDpiForWindow`.
    pub fn new(
        thread: UiThread,
        handle: WindowHandle,
        attributes: WindowAttributes,
        listener: Box<dyn WindowListener>,
        dpi: u16,
    ) -> Self {
        let mut window = Self {
            context: WindowContext::new(thread, handle, attributes, listener),
            scale_factor: 1.0,
            client_origin: PhysicalPosition::new(0, 0),
        };
        window.set_dpi(dpi);
        window
    }

    pub fn styles(&self) -> WindowStyles {
        WindowStyles::from(self.context.attributes().flags)
    }

    /// The `IDC_*` cursor to return from `WM_SETCURSOR` over the client area.
    pub fn cursor_resource(&self) -> u16 {
        style::cursor_resource(self.context.attributes().cursor)
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Whether the window should hold the mouse capture.
    pub fn wants_capture(&self) -> bool {
        self.context.pressed_buttons() != 0
    }

    /// `ClientToScreen` of the client area's top-left corner.
    pub fn set_client_origin(&mut self, origin: PhysicalPosition<i32>) {
        self.client_origin = origin;
    }

    /// Refine the `DefWindowProcW` result of a `WM_NCHITTEST`.
    ///
    /// Points of the client area the listener reports as [`NcHit::Grab`] become `HTCAPTION`
    /// so that dragging them moves the window. Other results are returned unchanged.
    pub fn nc_hit_test(&mut self, msg: &Msg, default_hit: isize) -> isize {
        if default_hit != HTCLIENT {
            return default_hit;
        }
        let position = self.screen_point(msg);
        match self.context.nc_hit_test(position) {
            NcHit::Client => HTCLIENT,
            NcHit::Grab => HTCAPTION,
        }
    }

    fn set_dpi(&mut self, dpi: u16) {
        if dpi == 0 {
            tracing::warn!("ignoring zero DPI");
            return;
        }
        self.scale_factor = f64::from(dpi) / f64::from(USER_DEFAULT_SCREEN_DPI);
    }

    fn client_point(&self, msg: &Msg) -> Point {
        let x = get_x_lparam(msg.lparam32());
        let y = get_y_lparam(msg.lparam32());
        PhysicalPosition::new(f64::from(x), f64::from(y)).to_logical(self.scale_factor)
    }

    fn screen_point(&self, msg: &Msg) -> Point {
        let x = i32::from(get_x_lparam(msg.lparam32())) - self.client_origin.x;
        let y = i32::from(get_y_lparam(msg.lparam32())) - self.client_origin.y;
        PhysicalPosition::new(f64::from(x), f64::from(y)).to_logical(self.scale_factor)
    }

    fn button(msg: &Msg) -> Option<MouseButton> {
        match msg.message {
            WM_LBUTTONDOWN | WM_LBUTTONUP | WM_LBUTTONDBLCLK => Some(MouseButton::LEFT),
            WM_RBUTTONDOWN | WM_RBUTTONUP | WM_RBUTTONDBLCLK => Some(MouseButton::RIGHT),
            WM_MBUTTONDOWN | WM_MBUTTONUP | WM_MBUTTONDBLCLK => Some(MouseButton::MIDDLE),
            WM_XBUTTONDOWN | WM_XBUTTONUP | WM_XBUTTONDBLCLK => {
                match get_xbutton_wparam(msg.wparam32()) {
                    XBUTTON1 => Some(MouseButton::BACK),
                    XBUTTON2 => Some(MouseButton::FORWARD),
                    other => {
                        tracing::warn!(xbutton = other, "ignoring unknown extended button");
                        None
                    },
                }
            },
            _ => None,
        }
    }

    fn mouse_button(&mut self, msg: &Msg, pressed: bool) -> MsgResult {
        let position = self.client_point(msg);
        let Some(button) = Self::button(msg) else {
            return MsgResult::Handled(0);
        };
        let event = if pressed {
            PointerEvent::press(position, button)
        } else {
            PointerEvent::release(position, button)
        };
        self.context.pointer(event);

        // `WM_XBUTTON*` must return `TRUE`.
        match msg.message {
            WM_XBUTTONDOWN | WM_XBUTTONUP | WM_XBUTTONDBLCLK => MsgResult::Handled(1),
            _ => MsgResult::Handled(0),
        }
    }

    fn mouse_wheel(&mut self, msg: &Msg) -> MsgResult {
        let vertical = msg.message == WM_MOUSEWHEEL;
        let value = get_wheel_delta_wparam(msg.wparam32());
        let timestamp = Duration::from_millis(msg.time.into());
        let position = self.screen_point(msg);

        if value % WHEEL_DELTA == 0 {
            let direction = match (vertical, value > 0) {
                (true, true) => ScrollDirection::Up,
                (true, false) => ScrollDirection::Down,
                (false, true) => ScrollDirection::Right,
                (false, false) => ScrollDirection::Left,
            };
            for _ in 0..(value / WHEEL_DELTA).unsigned_abs() {
                self.context.scroll(ScrollInput::step(position, direction, timestamp));
            }
        } else {
            let amount = f64::from(value) / f64::from(WHEEL_DELTA)
                * self.context.attributes().line_height;
            let delta = if vertical {
                LogicalPosition::new(0.0, amount)
            } else {
                LogicalPosition::new(-amount, 0.0)
            };
            self.context.scroll(ScrollInput::delta(position, delta, timestamp));
        }

        MsgResult::Handled(0)
    }

    /// Apply the strings of one `WM_IME_COMPOSITION`.
    ///
    /// The result string is committed first, then the composition string replaces whatever
    /// is left of the composition. A message without either string cancels the composition.
    pub fn ime_composition(&mut self, composition: ImeComposition) -> MsgResult {
        tracing::trace!(?composition, "WM_IME_COMPOSITION");
        let Some(mut bridge) = self.context.text_input() else {
            tracing::warn!("received `WM_IME_COMPOSITION` without a text input context");
            return MsgResult::Default;
        };

        let flags = composition.flags;
        if !flags.intersects(CompositionFlags::RESULTSTR | CompositionFlags::COMPSTR) {
            bridge.set_composing_text("", TextRange::default(), None);
        }

        if flags.contains(CompositionFlags::RESULTSTR) {
            bridge.insert_text(&composition.result, None);
        }

        if flags.contains(CompositionFlags::COMPSTR) {
            let text = composition.composition.as_str();
            let len = utf16_len(text);
            let cursor = composition
                .cursor
                .filter(|_| flags.contains(CompositionFlags::CURSORPOS))
                .map_or(len, |cursor| cursor.min(len));
            bridge.set_composing_text(text, TextRange::new(cursor, 0), None);
        }

        MsgResult::Handled(0)
    }
}

impl EventSource for Win32Window {
    type Event = Msg;
    type Response = MsgResult;

    fn handle_event(&mut self, msg: Msg) -> MsgResult {
        match msg.message {
            WM_MOUSEMOVE => {
                let position = self.client_point(&msg);
                self.context.pointer(PointerEvent::motion(position));
                MsgResult::Handled(0)
            },
            WM_MOUSELEAVE => {
                self.context.pointer_left();
                MsgResult::Handled(0)
            },
            // Windows sends `*DBLCLK` in place of the second `*DOWN`, so it is a physical press.
            WM_LBUTTONDOWN | WM_RBUTTONDOWN | WM_MBUTTONDOWN | WM_XBUTTONDOWN
            | WM_LBUTTONDBLCLK | WM_RBUTTONDBLCLK | WM_MBUTTONDBLCLK | WM_XBUTTONDBLCLK => {
                self.mouse_button(&msg, true)
            },
            WM_LBUTTONUP | WM_RBUTTONUP | WM_MBUTTONUP | WM_XBUTTONUP => {
                self.mouse_button(&msg, false)
            },
            WM_CAPTURECHANGED => {
                self.context.capture_lost();
                MsgResult::Handled(0)
            },
            WM_MOUSEWHEEL | WM_MOUSEHWHEEL => self.mouse_wheel(&msg),
            WM_SETFOCUS => {
                self.context.focus(true);
                MsgResult::Handled(0)
            },
            WM_KILLFOCUS => {
                self.context.focus(false);
                MsgResult::Handled(0)
            },
            WM_MOVE => {
                let x = get_x_lparam(msg.lparam32());
                let y = get_y_lparam(msg.lparam32());
                self.client_origin = PhysicalPosition::new(x.into(), y.into());
                MsgResult::Handled(0)
            },
            WM_NCHITTEST => {
                tracing::trace!("WM_NCHITTEST needs the default hit; use `nc_hit_test`");
                MsgResult::Default
            },
            WM_SIZE => {
                self.context.resized();
                MsgResult::Handled(0)
            },
            WM_DPICHANGED => {
                let dpi = loword(msg.wparam32());
                tracing::debug!(dpi, "WM_DPICHANGED");
                self.set_dpi(dpi);
                self.context.scale_factor_changed();
                MsgResult::Handled(0)
            },
            WM_PAINT => {
                self.context.flush_gestures();
                self.context.update_ready();
                MsgResult::Default
            },
            // `DefWindowProcW` destroys the window.
            WM_CLOSE => {
                if self.context.close_requested() {
                    MsgResult::Default
                } else {
                    MsgResult::Handled(0)
                }
            },
            WM_DESTROY => {
                self.context.close();
                MsgResult::Handled(0)
            },
            // Suppress the system composition window when the text is edited inline.
            WM_IME_STARTCOMPOSITION => {
                if self.context.has_composing_context() {
                    MsgResult::Handled(0)
                } else {
                    MsgResult::Default
                }
            },
            WM_IME_COMPOSITION => {
                tracing::trace!(
                    flags = ?ImeComposition::flags_from_lparam(msg.lparam),
                    "WM_IME_COMPOSITION without strings; use `ime_composition`"
                );
                MsgResult::Default
            },
            WM_IME_ENDCOMPOSITION => {
                if let Some(mut bridge) = self.context.text_input() {
                    bridge.clear_composing_text();
                }
                MsgResult::Default
            },
            _ => MsgResult::Default,
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
    use std::ops::Range;
    use std::rc::Rc;

    use evbridge_core::event::{ScrollDelta, Timestamp};
    use evbridge_core::listener::DragListener;
    use evbridge_core::text_input::{TextInputEdit, TextRect};
    use evbridge_core::thread;
    use evbridge_core::window::WindowId;

    use super::*;

    type Log = Rc<RefCell<Vec<String>>>;

    #[derive(Default)]
    struct Recorder {
        log: Log,
        text: String,
        selection: Range<usize>,
        composition: Option<Range<usize>>,
    }

    struct Drag(Log);

    impl WindowListener for Recorder {
        fn mouse_motion(&mut self, _: WindowId, p: Point) {
            self.log.borrow_mut().push(format!("motion {} {}", p.x, p.y));
        }

        fn mouse_button(&mut self, _: WindowId, p: Point, pressed: bool, b: MouseButton) {
            self.log.borrow_mut().push(format!("button {} {} {pressed} {}", p.x, p.y, b.index()));
        }

        fn scroll_discrete(&mut self, _: WindowId, p: Point, d: ScrollDelta) {
            self.log.borrow_mut().push(format!("discrete {} {} {} {}", p.x, p.y, d.x, d.y));
        }

        fn scroll_continuous(&mut self, _: WindowId, p: Point, d: ScrollDelta, t: Timestamp) {
            let t = t.as_millis();
            self.log.borrow_mut().push(format!("continuous {} {} {} {} {t}", p.x, p.y, d.x, d.y));
        }

        fn nc_hit_test(&mut self, _: WindowId, p: Point) -> NcHit {
            if p.y < 10.0 {
                NcHit::Grab
            } else {
                NcHit::Client
            }
        }

        fn scale_factor_changed(&mut self, _: WindowId) {
            self.log.borrow_mut().push("scale_factor_changed".into());
        }

        fn begin_drag(&mut self, _: WindowId, _: Point, _: MouseButton) -> Box<dyn DragListener> {
            self.log.borrow_mut().push("begin_drag".into());
            Box::new(Drag(Rc::clone(&self.log)))
        }

        fn text_input(&mut self, _: WindowId) -> Option<&mut dyn TextInputEdit> {
            Some(self)
        }
    }

    impl DragListener for Drag {
        fn release(self: Box<Self>, _: WindowId) {
            self.0.borrow_mut().push("drag.release".into());
        }

        fn cancel(self: Box<Self>, _: WindowId) {
            self.0.borrow_mut().push("drag.cancel".into());
        }
    }

    impl TextInputEdit for Recorder {
        fn selected_range(&mut self) -> Range<usize> {
            self.selection.clone()
        }

        fn set_selected_range(&mut self, range: Range<usize>) {
            self.selection = range;
        }

        fn composition_range(&mut self) -> Option<Range<usize>> {
            self.composition.clone()
        }

        fn set_composition_range(&mut self, range: Option<Range<usize>>) {
            self.composition = range;
        }

        fn replace(&mut self, range: Range<usize>, text: &str) {
            self.text.replace_range(range, text);
        }

        fn slice(&mut self, range: Range<usize>) -> String {
            self.text[range].to_owned()
        }

        fn floor_index(&mut self, mut i: usize) -> usize {
            while !self.text.is_char_boundary(i) {
                i -= 1;
            }
            i
        }

        fn len(&mut self) -> usize {
            self.text.len()
        }

        fn slice_bounds(&mut self, range: Range<usize>) -> (TextRect, usize) {
            (TextRect::default(), range.end)
        }

        fn index_from_point(&mut self, _: Point) -> Option<usize> {
            None
        }
    }

    fn window(attributes: WindowAttributes, dpi: u16) -> (Win32Window, Log) {
        let recorder = Recorder::default();
        let log = Rc::clone(&recorder.log);
        let window = Win32Window::new(
            thread::bootstrap(),
            WindowHandle::detached(WindowId::dummy()),
            attributes,
            Box::new(recorder),
            dpi,
        );
        (window, log)
    }

    fn take(log: &Log) -> Vec<String> {
        log.borrow_mut().drain(..).collect()
    }

    #[test]
    fn positions_are_scaled_to_points() {
        let (mut w, log) = window(WindowAttributes::default(), 192);
        assert_eq!(w.scale_factor(), 2.0);

        w.handle_event(Msg::mouse(WM_MOUSEMOVE, 100, 50));
        w.handle_event(Msg::new(WM_DPICHANGED, make_wparam(96, 96), 0));
        w.handle_event(Msg::mouse(WM_MOUSEMOVE, 100, 50));

        assert_eq!(take(&log), ["motion 50 25", "scale_factor_changed", "motion 100 50"]);
    }

    #[test]
    fn double_click_message_is_a_press() {
        let (mut w, log) = window(WindowAttributes::default().with_drag_gestures(false), 96);

        for message in [WM_LBUTTONDOWN, WM_LBUTTONUP, WM_LBUTTONDBLCLK, WM_LBUTTONUP] {
            w.handle_event(Msg::mouse(message, 1, 2));
        }

        assert_eq!(take(&log), [
            "button 1 2 true 0",
            "button 1 2 false 0",
            "button 1 2 true 0",
            "button 1 2 false 0",
        ]);
    }

    #[test]
    fn extended_buttons() {
        let (mut w, log) = window(WindowAttributes::default().with_drag_gestures(false), 96);

        let down = Msg::mouse(WM_XBUTTONDOWN, 0, 0).with_wparam(make_wparam(0, XBUTTON2));
        assert_eq!(w.handle_event(down), MsgResult::Handled(1));
        assert!(w.wants_capture());

        let up = Msg::mouse(WM_XBUTTONUP, 0, 0).with_wparam(make_wparam(0, XBUTTON2));
        w.handle_event(up);
        assert!(!w.wants_capture());

        assert_eq!(take(&log), ["button 0 0 true 4", "button 0 0 false 4"]);
    }

    #[test]
    fn capture_change_cancels_drag() {
        let (mut w, log) = window(WindowAttributes::default(), 96);

        w.handle_event(Msg::mouse(WM_LBUTTONDOWN, 3, 4));
        assert!(w.wants_capture());
        w.handle_event(Msg::new(WM_CAPTURECHANGED, 0, 0));
        assert!(!w.wants_capture());
        w.handle_event(Msg::new(WM_KILLFOCUS, 0, 0));
        assert!(!w.wants_capture());
        w.handle_event(Msg::mouse(WM_LBUTTONUP, 3, 4));

        assert_eq!(take(&log), [
            "button 3 4 true 0",
            "begin_drag",
            "drag.cancel",
            "button 3 4 false 0",
        ]);
    }

    #[test]
    fn wheel_notches_and_fractions() {
        let (mut w, log) = window(WindowAttributes::default().with_line_height(30.0), 192);
        w.set_client_origin(PhysicalPosition::new(100, 200));

        let notches = Msg::mouse(WM_MOUSEWHEEL, 114, 216)
            .with_wparam(make_wparam(0, (-240i16) as u16))
            .with_time(10);
        w.handle_event(notches);

        w.handle_event(Msg::mouse(WM_MOVE, 50, 60));
        let fraction =
            Msg::mouse(WM_MOUSEHWHEEL, 52, 60).with_wparam(make_wparam(0, 60)).with_time(20);
        w.handle_event(fraction);

        assert_eq!(take(&log), [
            "discrete 7 8 0 -1",
            "discrete 7 8 0 -1",
            "continuous 1 0 -15 0 20",
        ]);
    }

    #[test]
    fn caption_strip_moves_the_window() {
        let (mut w, _) = window(WindowAttributes::default(), 192);
        w.set_client_origin(PhysicalPosition::new(100, 200));

        let top = Msg::mouse(WM_NCHITTEST, 110, 210);
        let lower = Msg::mouse(WM_NCHITTEST, 110, 260);
        assert_eq!(w.handle_event(top), MsgResult::Default);
        assert_eq!(w.nc_hit_test(&top, HTCLIENT), HTCAPTION);
        assert_eq!(w.nc_hit_test(&lower, HTCLIENT), HTCLIENT);
        assert_eq!(w.nc_hit_test(&top, HTTOP), HTTOP);
    }

    #[test]
    fn composition_then_result() {
        let (mut w, _) = window(WindowAttributes::default(), 96);

        assert_eq!(w.handle_event(Msg::new(WM_IME_STARTCOMPOSITION, 0, 0)), MsgResult::Handled(0));
        w.ime_composition(ImeComposition::composing("にほん", 3));
        w.ime_composition(ImeComposition::composing("日本", 1));

        let mut bridge = w.context.text_input().unwrap();
        assert_eq!(bridge.composing_range(), Some(TextRange::new(0, 2)));
        assert_eq!(bridge.selected_range(), TextRange::new(1, 0));
        drop(bridge);

        w.ime_composition(ImeComposition::result("日本"));
        w.handle_event(Msg::new(WM_IME_ENDCOMPOSITION, 0, 0));

        let mut bridge = w.context.text_input().unwrap();
        assert_eq!(bridge.composing_range(), None);
        assert_eq!(bridge.text_in_range(TextRange::new(0, 5)).0, "日本");
        assert_eq!(bridge.selected_range(), TextRange::new(2, 0));
    }

    #[test]
    fn empty_composition_message_cancels() {
        let (mut w, _) = window(WindowAttributes::default(), 96);

        w.ime_composition(ImeComposition::composing("k", 1));
        w.ime_composition(ImeComposition::default());

        let mut bridge = w.context.text_input().unwrap();
        assert_eq!(bridge.composing_range(), None);
        assert_eq!(bridge.text_in_range(TextRange::new(0, 5)).0, "");
    }
}
