//! Plain-data model of the GDK events the adapter handles.

/// `GdkEventType`, restricted to button events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GdkButtonEventType {
    /// `GDK_BUTTON_PRESS`
    ButtonPress,
    /// `GDK_2BUTTON_PRESS`, sent in addition to the second `GDK_BUTTON_PRESS` of a double click.
    DoubleButtonPress,
    /// `GDK_3BUTTON_PRESS`, sent in addition to the third `GDK_BUTTON_PRESS` of a triple click.
    TripleButtonPress,
    /// `GDK_BUTTON_RELEASE`
    ButtonRelease,
}

/// `GdkEventButton`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GdkEventButton {
    pub event_type: GdkButtonEventType,
    pub x: f64,
    pub y: f64,
    /// The X11 button number, starting at 1.
    pub button: u32,
    /// Milliseconds.
    pub time: u32,
}

/// `GdkEventMotion`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GdkEventMotion {
    pub x: f64,
    pub y: f64,
    pub time: u32,
}

/// `GdkScrollDirection`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GdkScrollDirection {
    Up,
    Down,
    Left,
    Right,
    /// The deltas are in `delta_x` and `delta_y`.
    Smooth,
}

/// `GdkEventScroll`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GdkEventScroll {
    pub x: f64,
    pub y: f64,
    pub direction: GdkScrollDirection,
    /// In lines. Positive values scroll right, i.e. move the content to the left.
    pub delta_x: f64,
    /// In lines. Positive values scroll down, i.e. move the content up.
    pub delta_y: f64,
    /// Set on the last event of a kinetic scroll sequence.
    pub is_stop: bool,
    pub time: u32,
}

impl GdkEventScroll {
    pub fn discrete(x: f64, y: f64, direction: GdkScrollDirection, time: u32) -> Self {
        Self { x, y, direction, delta_x: 0.0, delta_y: 0.0, is_stop: false, time }
    }

    pub fn smooth(x: f64, y: f64, delta_x: f64, delta_y: f64, time: u32) -> Self {
        Self { x, y, direction: GdkScrollDirection::Smooth, delta_x, delta_y, is_stop: false, time }
    }

    pub fn stop(x: f64, y: f64, time: u32) -> Self {
        Self { is_stop: true, ..Self::smooth(x, y, 0.0, 0.0, time) }
    }
}

/// A signal or event delivered to the drawing area of a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GdkEvent {
    /// `button-press-event` and `button-release-event`.
    Button(GdkEventButton),
    /// `motion-notify-event`.
    Motion(GdkEventMotion),
    /// `scroll-event`.
    Scroll(GdkEventScroll),
    /// `leave-notify-event`.
    LeaveNotify,
    /// `focus-in-event` and `focus-out-event`.
    Focus { focus_in: bool },
    /// `grab-broken-event`.
    GrabBroken,
    /// `size-allocate`.
    SizeAllocate,
    /// `notify::scale-factor`.
    ScaleFactorChanged,
    /// The frame clock's `update` signal.
    FrameClockUpdate,
    /// `delete-event`.
    Delete,
    /// `destroy`.
    Destroy,
}

/// What a signal handler returns to GTK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Propagation {
    /// `GDK_EVENT_STOP`: the event was handled.
    Stop,
    /// `GDK_EVENT_PROPAGATE`: let other handlers see the event.
    #[default]
    Proceed,
}

impl Propagation {
    pub fn is_stop(self) -> bool {
        self == Propagation::Stop
    }
}
