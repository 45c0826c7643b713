//! Scroll phase tracker.
//!
//! Classifies every scroll event of one window and follows the stream it belongs to:
//!
//! ```text
//!          step                      delta                  stop
//!   Idle ───────▶ Discrete     Idle ───────▶ Continuous ───────────▶ MomentumEnd
//!    ▲               │                        │    ▲                     │
//!    └───────────────┘                        └────┘ delta, step         │
//!      next event                                                        ▼
//!                                                                 Idle (next event)
//! ```
//!
//! A stop is only forwarded while a continuous stream is in progress, so after it no further
//! stop can reach the listener until a new stream begins.

use dpi::LogicalPosition;
use evbridge_core::event::{ScrollAmount, ScrollClass, ScrollEvent, ScrollInput, Timestamp};

/// The state of the scroll stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollPhase {
    #[default]
    Idle,
    /// A discrete step was just delivered.
    Discrete,
    /// A precise stream is in progress.
    Continuous,
    /// The stream that was in progress has just stopped.
    MomentumEnd,
}

#[derive(Debug, Default)]
pub struct ScrollPhaseTracker {
    phase: ScrollPhase,
    last_timestamp: Option<Timestamp>,
}

impl ScrollPhaseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    /// Classify `input` and advance the state machine.
    ///
    /// Returns the event to forward, or `None` if the input is a stop that doesn't end a
    /// stream.
    pub fn track(&mut self, input: ScrollInput) -> Option<ScrollEvent> {
        let timestamp = self.monotonic(input.timestamp);
        let class = ScrollClass::classify(input.has_delta(), input.is_stop);

        // `Discrete` and `MomentumEnd` only last until the next event.
        if matches!(self.phase, ScrollPhase::Discrete | ScrollPhase::MomentumEnd) {
            self.phase = ScrollPhase::Idle;
        }

        let (next, delta) = match input.amount {
            _ if input.is_stop => {
                if self.phase != ScrollPhase::Continuous {
                    tracing::trace!(phase = ?self.phase, "dropping stop outside of a stream");
                    return None;
                }
                (ScrollPhase::MomentumEnd, LogicalPosition::new(0.0, 0.0))
            },
            ScrollAmount::Step(direction) => {
                // A notched wheel doesn't interrupt a precise stream.
                let next = match self.phase {
                    ScrollPhase::Continuous => ScrollPhase::Continuous,
                    _ => ScrollPhase::Discrete,
                };
                (next, direction.unit_delta())
            },
            ScrollAmount::Delta(delta) => (ScrollPhase::Continuous, delta),
        };

        tracing::trace!(from = ?self.phase, to = ?next, ?class, "scroll");
        self.phase = next;

        Some(ScrollEvent { position: input.position, delta, class, timestamp })
    }

    /// Forget the stream in progress.
    pub fn reset(&mut self) {
        self.phase = ScrollPhase::Idle;
    }

    fn monotonic(&mut self, timestamp: Timestamp) -> Timestamp {
        let timestamp = match self.last_timestamp {
            Some(last) if timestamp < last => {
                tracing::debug!(?timestamp, ?last, "scroll timestamp went backwards");
                last
            },
            _ => timestamp,
        };
        self.last_timestamp = Some(timestamp);
        timestamp
    }
}
