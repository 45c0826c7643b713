//! Gesture arbiter.
//!
//! Every window has one primary capture owner, the window listener, at all times. When a
//! gesture starts, the arbiter installs a transient owner for it, identified by a
//! [`GestureToken`], which receives the events of that gesture until it is released or
//! cancelled. Ordinary input keeps flowing to the primary owner in the meantime.
//!
//! At most one transient owner exists per [`GestureKind`]. A request to start a gesture of a
//! kind that is already active is ignored; the active gesture is left untouched.
//!
//! Drag gestures open at the first button press and end when the last pressed button is
//! released. Button events are always delivered to the window listener as well; pointer motion
//! goes to the drag alone while it is active.
//!
//! Scroll gestures follow the phases reported by the backend:
//!
//! ```text
//!   begin ──▶ Tracking ──lift──▶ Lifted ──momentum──▶ Momentum ──end──▶ (released)
//!                │                  │
//!                └──end─────────────┴──anything else──▶ (released)
//! ```

use std::fmt;

use dpi::LogicalPosition;
use evbridge_core::event::{MouseButton, Point, PointerEvent, ScrollDelta, Timestamp};
use evbridge_core::handle::{DragCapability, ScrollCapability, TerminalCall};

use crate::dispatcher::Dispatcher;

/// Identifies one transient capture owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GestureToken(u64);

/// Who receives the events of a gesture kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureOwner {
    /// The window listener.
    Primary,
    Transient(GestureToken),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Drag,
    Scroll,
}

/// The lifecycle of the most recent gesture of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureState {
    /// No gesture of this kind was ever started.
    #[default]
    Idle,
    Active(GestureToken),
    /// The gesture completed normally.
    Released(GestureToken),
    /// The gesture was aborted. No completion was delivered for it.
    Cancelled(GestureToken),
}

/// The phase of an active scroll gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollStage {
    /// The fingers are on the device.
    Tracking,
    /// The fingers were lifted; momentum may follow.
    Lifted,
    /// The backend is generating inertial motion.
    Momentum,
}

trait Session {
    fn token(&self) -> GestureToken;
    fn terminate(self, call: TerminalCall);
}

struct DragSession {
    token: GestureToken,
    capability: DragCapability,
    /// Bitmask of the buttons held down during the drag.
    buttons: u32,
}

impl Session for DragSession {
    fn token(&self) -> GestureToken {
        self.token
    }

    fn terminate(self, call: TerminalCall) {
        match call {
            TerminalCall::Release => self.capability.release(),
            TerminalCall::Cancel => self.capability.cancel(),
        }
    }
}

struct ScrollSession {
    token: GestureToken,
    capability: ScrollCapability,
    stage: ScrollStage,
    last_motion: Option<Timestamp>,
}

impl Session for ScrollSession {
    fn token(&self) -> GestureToken {
        self.token
    }

    fn terminate(mut self, call: TerminalCall) {
        match call {
            TerminalCall::Release => {
                self.capability.end();
                self.capability.release();
            },
            TerminalCall::Cancel => self.capability.cancel(),
        }
    }
}

struct Slot<S> {
    session: Option<S>,
    state: GestureState,
}

impl<S> Default for Slot<S> {
    fn default() -> Self {
        Self { session: None, state: GestureState::Idle }
    }
}

impl<S: Session> Slot<S> {
    fn install(&mut self, session: S) {
        self.state = GestureState::Active(session.token());
        self.session = Some(session);
    }

    fn finish(&mut self, call: TerminalCall) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };

        let token = session.token();
        tracing::trace!(?token, ?call, "gesture finished");
        self.state = match call {
            TerminalCall::Release => GestureState::Released(token),
            TerminalCall::Cancel => GestureState::Cancelled(token),
        };
        session.terminate(call);
        true
    }

    fn owner(&self) -> CaptureOwner {
        match &self.session {
            Some(session) => CaptureOwner::Transient(session.token()),
            None => CaptureOwner::Primary,
        }
    }
}

/// Arbitrates pointer ownership between the window listener and gesture sessions.
#[derive(Default)]
pub struct GestureArbiter {
    next_token: u64,
    drag: Slot<DragSession>,
    scroll: Slot<ScrollSession>,
}

impl fmt::Debug for GestureArbiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureArbiter")
            .field("drag", &self.drag.state)
            .field("scroll", &self.scroll.state)
            .field("scroll_stage", &self.scroll_stage())
            .finish()
    }
}

impl GestureArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, kind: GestureKind) -> GestureState {
        match kind {
            GestureKind::Drag => self.drag.state,
            GestureKind::Scroll => self.scroll.state,
        }
    }

    pub fn owner(&self, kind: GestureKind) -> CaptureOwner {
        match kind {
            GestureKind::Drag => self.drag.owner(),
            GestureKind::Scroll => self.scroll.owner(),
        }
    }

    pub fn is_active(&self, kind: GestureKind) -> bool {
        self.owner(kind) != CaptureOwner::Primary
    }

    pub fn scroll_stage(&self) -> Option<ScrollStage> {
        self.scroll.session.as_ref().map(|s| s.stage)
    }

    /// Route a filtered pointer event.
    ///
    /// When `drag_gestures` is false, presses never open a drag session.
    pub fn pointer(&mut self, dispatcher: &mut Dispatcher, event: PointerEvent, drag_gestures: bool) {
        let position = event.position;
        let Some(button) = event.button else {
            match &mut self.drag.session {
                Some(drag) => drag.capability.motion(position),
                None => dispatcher.mouse_motion(position),
            }
            return;
        };

        dispatcher.mouse_button(position, event.pressed, button);

        if event.pressed {
            self.press(dispatcher, position, button, drag_gestures);
        } else {
            self.release_button(position, button);
        }
    }

    fn press(
        &mut self,
        dispatcher: &mut Dispatcher,
        position: Point,
        button: MouseButton,
        drag_gestures: bool,
    ) {
        if let Some(drag) = &mut self.drag.session {
            if drag.buttons & button.mask() != 0 {
                tracing::debug!(?button, "button pressed twice during a drag");
                return;
            }
            drag.buttons |= button.mask();
            drag.capability.mouse_down(position, button);
            return;
        }

        if !drag_gestures {
            return;
        }

        if let Some(capability) = dispatcher.begin_drag(position, button) {
            let token = self.next_token();
            tracing::trace!(?token, ?button, "drag started");
            self.drag.install(DragSession { token, capability, buttons: button.mask() });
        }
    }

    fn release_button(&mut self, position: Point, button: MouseButton) {
        let Some(drag) = &mut self.drag.session else {
            return;
        };
        if drag.buttons & button.mask() == 0 {
            tracing::debug!(?button, "release of a button the drag never saw");
            return;
        }

        drag.buttons &= !button.mask();
        drag.capability.mouse_up(position, button);
        if drag.buttons == 0 {
            self.drag.finish(TerminalCall::Release);
        }
    }

    /// Open a scroll gesture.
    ///
    /// Returns `None` if a scroll gesture is already active, in which case it is left untouched,
    /// or if the window listener is detached.
    pub fn begin_scroll(&mut self, dispatcher: &mut Dispatcher, position: Point) -> Option<GestureToken> {
        self.settle_lifted();

        if let Some(active) = &self.scroll.session {
            tracing::debug!(token = ?active.token, "scroll gesture already active; ignoring start");
            return None;
        }

        let capability = dispatcher.begin_scroll_gesture(position)?;
        let token = self.next_token();
        tracing::trace!(?token, "scroll gesture started");
        self.scroll.install(ScrollSession {
            token,
            capability,
            stage: ScrollStage::Tracking,
            last_motion: None,
        });
        Some(token)
    }

    /// Deliver motion to the active scroll gesture.
    ///
    /// Returns `false` if there is no gesture to deliver to. A lifted gesture that receives
    /// motion without entering the momentum phase is settled first.
    pub fn scroll_motion(&mut self, precise: bool, delta: ScrollDelta, timestamp: Timestamp) -> bool {
        if self.scroll_stage() == Some(ScrollStage::Lifted) {
            self.settle_lifted();
        }

        let Some(scroll) = &mut self.scroll.session else {
            return false;
        };

        let velocity = match scroll.last_motion {
            Some(last) if timestamp > last => {
                let elapsed = (timestamp - last).as_secs_f64();
                LogicalPosition::new(delta.x / elapsed, delta.y / elapsed)
            },
            _ => LogicalPosition::new(0.0, 0.0),
        };
        scroll.last_motion = Some(scroll.last_motion.map_or(timestamp, |last| last.max(timestamp)));

        scroll.capability.motion(precise, delta, velocity);
        true
    }

    /// The physical phase of the scroll gesture ended.
    pub fn lift_scroll(&mut self) -> bool {
        match &mut self.scroll.session {
            Some(scroll) if scroll.stage == ScrollStage::Tracking => {
                scroll.stage = ScrollStage::Lifted;
                true
            },
            _ => false,
        }
    }

    /// The backend started generating momentum for the lifted gesture.
    pub fn start_momentum(&mut self) -> bool {
        match &mut self.scroll.session {
            Some(scroll) if scroll.stage == ScrollStage::Lifted => {
                scroll.stage = ScrollStage::Momentum;
                scroll.capability.start_momentum_phase();
                true
            },
            _ => false,
        }
    }

    /// End and release the active scroll gesture.
    pub fn end_scroll(&mut self) -> bool {
        self.scroll.finish(TerminalCall::Release)
    }

    /// End and release the scroll gesture if it is waiting for momentum that never came.
    pub fn settle_lifted(&mut self) {
        if self.scroll_stage() == Some(ScrollStage::Lifted) {
            tracing::trace!("settling lifted scroll gesture");
            self.scroll.finish(TerminalCall::Release);
        }
    }

    /// Abort the active gesture of `kind`. Returns `false` if there was none.
    pub fn cancel(&mut self, kind: GestureKind) -> bool {
        match kind {
            GestureKind::Drag => self.drag.finish(TerminalCall::Cancel),
            GestureKind::Scroll => self.scroll.finish(TerminalCall::Cancel),
        }
    }

    /// Abort every active gesture, e.g. because the window lost focus.
    pub fn cancel_all(&mut self) {
        self.cancel(GestureKind::Drag);
        self.cancel(GestureKind::Scroll);
    }

    fn next_token(&mut self) -> GestureToken {
        self.next_token += 1;
        GestureToken(self.next_token)
    }
}
