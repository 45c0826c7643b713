//! Plain-data model of the `NSEvent` fields the adapter reads.

use std::time::Duration;

use bitflags::bitflags;

/// `NSPoint`. In window coordinates the origin is at the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NSPoint {
    pub x: f64,
    pub y: f64,
}

impl NSPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// `NSSize`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NSSize {
    pub width: f64,
    pub height: f64,
}

impl NSSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// `NSRect`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NSRect {
    pub origin: NSPoint,
    pub size: NSSize,
}

impl NSRect {
    pub const fn new(origin: NSPoint, size: NSSize) -> Self {
        Self { origin, size }
    }
}

/// `NSEventType`, restricted to the pointer events the adapter handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NSEventType {
    LeftMouseDown,
    LeftMouseUp,
    RightMouseDown,
    RightMouseUp,
    OtherMouseDown,
    OtherMouseUp,
    MouseMoved,
    LeftMouseDragged,
    RightMouseDragged,
    OtherMouseDragged,
    MouseExited,
    ScrollWheel,
}

bitflags! {
    /// `NSEventPhase`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NSEventPhase: u32 {
        const BEGAN = 1 << 0;
        const STATIONARY = 1 << 1;
        const CHANGED = 1 << 2;
        const ENDED = 1 << 3;
        const CANCELLED = 1 << 4;
        const MAY_BEGIN = 1 << 5;
    }
}

/// The fields of one `NSEvent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NsEvent {
    pub event_type: NSEventType,
    pub location_in_window: NSPoint,
    /// `buttonNumber`: 0 for the left button, 1 for the right button, 2 and up for others.
    pub button_number: isize,
    pub scrolling_delta_x: f64,
    pub scrolling_delta_y: f64,
    pub has_precise_scrolling_deltas: bool,
    pub phase: NSEventPhase,
    pub momentum_phase: NSEventPhase,
    /// Seconds since system startup.
    pub timestamp: f64,
}

impl NsEvent {
    pub fn new(event_type: NSEventType, location_in_window: NSPoint) -> Self {
        let button_number = match event_type {
            NSEventType::RightMouseDown | NSEventType::RightMouseUp => 1,
            NSEventType::OtherMouseDown | NSEventType::OtherMouseUp => 2,
            _ => 0,
        };
        Self {
            event_type,
            location_in_window,
            button_number,
            scrolling_delta_x: 0.0,
            scrolling_delta_y: 0.0,
            has_precise_scrolling_deltas: false,
            phase: NSEventPhase::empty(),
            momentum_phase: NSEventPhase::empty(),
            timestamp: 0.0,
        }
    }

    pub fn scroll_wheel(location_in_window: NSPoint, delta_x: f64, delta_y: f64) -> Self {
        Self {
            scrolling_delta_x: delta_x,
            scrolling_delta_y: delta_y,
            ..Self::new(NSEventType::ScrollWheel, location_in_window)
        }
    }

    pub fn with_button_number(mut self, button_number: isize) -> Self {
        self.button_number = button_number;
        self
    }

    pub fn with_precise_deltas(mut self, precise: bool) -> Self {
        self.has_precise_scrolling_deltas = precise;
        self
    }

    pub fn with_phase(mut self, phase: NSEventPhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_momentum_phase(mut self, momentum_phase: NSEventPhase) -> Self {
        self.momentum_phase = momentum_phase;
        self
    }

    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub(crate) fn timestamp(&self) -> Duration {
        Duration::try_from_secs_f64(self.timestamp).unwrap_or_default()
    }
}
