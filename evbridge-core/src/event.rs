//! Normalized input records.
//!
//! Every backend converts its native events into the types in this module before they reach
//! the shared machinery. Positions and deltas are in device-independent points with the origin
//! at the top-left corner of the content area and Y increasing downward, whatever the backend
//! reports natively.

use std::time::Duration;

use dpi::LogicalPosition;

/// A position in the content area, in device-independent points.
pub type Point = LogicalPosition<f64>;

/// A scroll amount.
///
/// The signs of the components follow the movement of the scrolled contents: a positive `y`
/// moves the contents down (i.e. reveals what is above), a positive `x` moves them right.
pub type ScrollDelta = LogicalPosition<f64>;

/// A monotonic timestamp reported by the backend.
///
/// The origin is backend-defined; only differences between timestamps of the same window are
/// meaningful.
pub type Timestamp = Duration;

/// A mouse button in the zero-based scheme used throughout the bridge.
///
/// Backends number their buttons differently (GDK starts at one and swaps right and middle,
/// Win32 has one message per button); adapters normalize to this scheme before forwarding.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MouseButton(u8);

impl MouseButton {
    pub const LEFT: Self = Self(0);
    pub const RIGHT: Self = Self(1);
    pub const MIDDLE: Self = Self(2);
    pub const BACK: Self = Self(3);
    pub const FORWARD: Self = Self(4);

    /// The largest button index the bridge can track simultaneously.
    pub const MAX: Self = Self(31);

    /// Create a button from a zero-based index.
    ///
    /// Returns `None` for indices above [`MouseButton::MAX`].
    pub const fn new(index: u8) -> Option<Self> {
        if index <= Self::MAX.0 {
            Some(Self(index))
        } else {
            None
        }
    }

    /// The zero-based index of this button.
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// A bitmask with only this button's bit set.
    #[inline]
    pub const fn mask(self) -> u32 {
        1 << self.0
    }
}

impl From<MouseButton> for u8 {
    fn from(value: MouseButton) -> Self {
        value.0
    }
}

/// Whether a press is an ordinary press or the extra notification a backend generates when it
/// recognizes a double (or triple) click.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Activation {
    /// An event that corresponds to a physical button transition or pointer movement.
    #[default]
    Primary,
    /// A synthetic event that duplicates a press the backend already reported.
    Synthetic,
}

/// A pointer event after coordinate and button normalization.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointerEvent {
    pub position: Point,
    /// `None` for pure motion.
    pub button: Option<MouseButton>,
    /// Meaningless when `button` is `None`.
    pub pressed: bool,
    pub activation: Activation,
}

impl PointerEvent {
    pub fn motion(position: Point) -> Self {
        Self { position, button: None, pressed: false, activation: Activation::Primary }
    }

    pub fn press(position: Point, button: MouseButton) -> Self {
        Self { position, button: Some(button), pressed: true, activation: Activation::Primary }
    }

    pub fn release(position: Point, button: MouseButton) -> Self {
        Self { position, button: Some(button), pressed: false, activation: Activation::Primary }
    }

    /// Mark the event as a synthetic multi-click notification.
    pub fn synthetic(self) -> Self {
        Self { activation: Activation::Synthetic, ..self }
    }
}

/// One of the four directions a notched wheel can step in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScrollDirection {
    Left,
    Right,
    Up,
    Down,
}

impl ScrollDirection {
    /// The unit delta synthesized for a discrete step in this direction.
    ///
    /// Stepping "up" reveals content above, which moves the contents down; see [`ScrollDelta`]
    /// for the sign convention.
    pub const fn unit_delta(self) -> ScrollDelta {
        match self {
            ScrollDirection::Left => LogicalPosition::new(1.0, 0.0),
            ScrollDirection::Right => LogicalPosition::new(-1.0, 0.0),
            ScrollDirection::Up => LogicalPosition::new(0.0, 1.0),
            ScrollDirection::Down => LogicalPosition::new(0.0, -1.0),
        }
    }
}

/// What a backend reported for one scroll event, before classification.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScrollAmount {
    /// A directional step without a magnitude.
    Step(ScrollDirection),
    /// A continuous delta pair, already in points.
    Delta(ScrollDelta),
}

/// A scroll event as delivered by an adapter to the scroll phase tracker.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScrollInput {
    pub position: Point,
    pub amount: ScrollAmount,
    /// The backend flagged this as the terminal event of the scroll gesture.
    pub is_stop: bool,
    pub timestamp: Timestamp,
}

impl ScrollInput {
    pub fn step(position: Point, direction: ScrollDirection, timestamp: Timestamp) -> Self {
        Self { position, amount: ScrollAmount::Step(direction), is_stop: false, timestamp }
    }

    pub fn delta(position: Point, delta: ScrollDelta, timestamp: Timestamp) -> Self {
        Self { position, amount: ScrollAmount::Delta(delta), is_stop: false, timestamp }
    }

    pub fn stop(position: Point, timestamp: Timestamp) -> Self {
        Self {
            position,
            amount: ScrollAmount::Delta(LogicalPosition::new(0.0, 0.0)),
            is_stop: true,
            timestamp,
        }
    }

    #[inline]
    pub fn has_delta(&self) -> bool {
        matches!(self.amount, ScrollAmount::Delta(_))
    }
}

/// The classification the scroll phase tracker assigns to an event.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScrollClass {
    /// A one-shot step with a synthesized unit delta.
    Discrete,
    /// A precise wheel or trackpad delta.
    Precise,
    /// The backend reported that the scroll gesture physically stopped.
    MomentumStop,
}

impl ScrollClass {
    /// Classify a scroll event from the two facts a backend reports about it.
    ///
    /// The stop flag takes precedence: a terminal event carries no usable delta.
    pub const fn classify(has_delta: bool, is_stop: bool) -> Self {
        match (has_delta, is_stop) {
            (_, true) => ScrollClass::MomentumStop,
            (true, false) => ScrollClass::Precise,
            (false, false) => ScrollClass::Discrete,
        }
    }
}

/// A classified scroll event, ready for dispatch.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScrollEvent {
    pub position: Point,
    /// Zero for [`ScrollClass::MomentumStop`].
    pub delta: ScrollDelta,
    pub class: ScrollClass,
    pub timestamp: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_covers_every_combination() {
        assert_eq!(ScrollClass::classify(false, false), ScrollClass::Discrete);
        assert_eq!(ScrollClass::classify(true, false), ScrollClass::Precise);
        assert_eq!(ScrollClass::classify(true, true), ScrollClass::MomentumStop);
        assert_eq!(ScrollClass::classify(false, true), ScrollClass::MomentumStop);
    }

    #[test]
    fn discrete_directions_map_to_unit_vectors() {
        let table = [
            (ScrollDirection::Left, (1.0, 0.0)),
            (ScrollDirection::Right, (-1.0, 0.0)),
            (ScrollDirection::Up, (0.0, 1.0)),
            (ScrollDirection::Down, (0.0, -1.0)),
        ];
        for (direction, (x, y)) in table {
            assert_eq!(direction.unit_delta(), LogicalPosition::new(x, y));
        }
    }

    #[test]
    fn mouse_button_range() {
        assert_eq!(MouseButton::new(0), Some(MouseButton::LEFT));
        assert_eq!(MouseButton::new(31).map(MouseButton::index), Some(31));
        assert_eq!(MouseButton::new(32), None);
        assert_eq!(MouseButton::MIDDLE.mask(), 0b100);
    }

    #[test]
    fn synthetic_marks_activation_only() {
        let press = PointerEvent::press(LogicalPosition::new(1.0, 2.0), MouseButton::LEFT);
        let synthetic = press.synthetic();
        assert_eq!(synthetic.activation, Activation::Synthetic);
        assert_eq!(synthetic.position, press.position);
        assert_eq!(synthetic.button, press.button);
        assert!(synthetic.pressed);
    }
}
