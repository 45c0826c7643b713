//! Every gesture capability and timer invocation receives exactly one terminal call, whatever
//! the order of the events around it.
//!
//! The checks enumerate every operation sequence up to a fixed length.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use evbridge::common::timer_queue::{HInvoke, TimerQueue};
use evbridge::dpi::LogicalPosition;
use evbridge::event::{MouseButton, Point, PointerEvent, ScrollDelta};
use evbridge::handle::{Invocation, InvocationCapability};
use evbridge::listener::{DragListener, ScrollListener, WindowListener};
use evbridge::window::{WindowAttributes, WindowHandle, WindowId};
use evbridge::{thread, WindowContext};
use tracing_subscriber::EnvFilter;

const P: Point = LogicalPosition::new(1.0, 2.0);

/// Calls every operation sequence of `len` elements drawn from `0..ops`.
fn for_each_sequence(ops: usize, len: usize, mut f: impl FnMut(&[usize])) {
    let mut seq = vec![0; len];
    let total = ops.pow(len as u32);
    for mut n in 0..total {
        for op in seq.iter_mut() {
            *op = n % ops;
            n /= ops;
        }
        f(&seq);
    }
}

#[derive(Debug, Default)]
struct Counts {
    begun: Cell<usize>,
    released: Cell<usize>,
    cancelled: Cell<usize>,
    /// Events delivered to a session after its terminal call.
    late: Cell<usize>,
}

impl Counts {
    fn terminated(&self) -> usize {
        self.released.get() + self.cancelled.get()
    }
}

struct Recorder(Rc<Counts>);

struct Session {
    counts: Rc<Counts>,
    done: Rc<Cell<bool>>,
}

impl Session {
    fn start(counts: &Rc<Counts>) -> Self {
        counts.begun.set(counts.begun.get() + 1);
        Session { counts: Rc::clone(counts), done: Rc::default() }
    }

    fn event(&self) {
        if self.done.get() {
            self.counts.late.set(self.counts.late.get() + 1);
        }
    }

    fn terminate(&self, released: bool) {
        self.event();
        self.done.set(true);
        let counter = if released { &self.counts.released } else { &self.counts.cancelled };
        counter.set(counter.get() + 1);
    }
}

impl WindowListener for Recorder {
    fn begin_drag(&mut self, _: WindowId, _: Point, _: MouseButton) -> Box<dyn DragListener> {
        Box::new(Session::start(&self.0))
    }

    fn begin_scroll_gesture(&mut self, _: WindowId, _: Point) -> Box<dyn ScrollListener> {
        Box::new(Session::start(&self.0))
    }
}

impl DragListener for Session {
    fn motion(&mut self, _: WindowId, _: Point) {
        self.event();
    }

    fn mouse_down(&mut self, _: WindowId, _: Point, _: MouseButton) {
        self.event();
    }

    fn mouse_up(&mut self, _: WindowId, _: Point, _: MouseButton) {
        self.event();
    }

    fn release(self: Box<Self>, _: WindowId) {
        self.terminate(true);
    }

    fn cancel(self: Box<Self>, _: WindowId) {
        self.terminate(false);
    }
}

impl ScrollListener for Session {
    fn motion(&mut self, _: WindowId, _: bool, _: ScrollDelta, _: ScrollDelta) {
        self.event();
    }

    fn start_momentum_phase(&mut self, _: WindowId) {
        self.event();
    }

    fn end(&mut self, _: WindowId) {
        self.event();
    }

    fn release(self: Box<Self>, _: WindowId) {
        self.terminate(true);
    }

    fn cancel(self: Box<Self>, _: WindowId) {
        self.terminate(false);
    }
}

fn context() -> (WindowContext, Rc<Counts>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    let counts = Rc::new(Counts::default());
    let context = WindowContext::new(
        thread::bootstrap(),
        WindowHandle::detached(WindowId::dummy()),
        WindowAttributes::default(),
        Box::new(Recorder(Rc::clone(&counts))),
    );
    (context, counts)
}

fn pointer_op(cx: &mut WindowContext, op: usize) {
    match op {
        0 => cx.pointer(PointerEvent::press(P, MouseButton::LEFT)),
        1 => cx.pointer(PointerEvent::press(P, MouseButton::RIGHT)),
        2 => cx.pointer(PointerEvent::release(P, MouseButton::LEFT)),
        3 => cx.pointer(PointerEvent::release(P, MouseButton::RIGHT)),
        4 => cx.pointer(PointerEvent::motion(P)),
        5 => cx.pointer(PointerEvent::press(P, MouseButton::LEFT).synthetic()),
        6 => cx.capture_lost(),
        7 => cx.focus(false),
        _ => cx.close(),
    }
}

fn scroll_op(cx: &mut WindowContext, op: usize) {
    let delta = LogicalPosition::new(0.0, 1.0);
    match op {
        0 => {
            cx.begin_scroll_gesture(P);
        },
        1 => {
            cx.scroll_gesture_motion(true, delta, Duration::ZERO);
        },
        2 => {
            cx.lift_scroll_gesture();
        },
        3 => {
            cx.start_momentum();
        },
        4 => {
            cx.end_scroll_gesture();
        },
        5 => {
            cx.cancel_scroll_gesture();
        },
        6 => cx.flush_gestures(),
        7 => cx.pointer(PointerEvent::motion(P)),
        8 => cx.focus(false),
        _ => cx.close(),
    }
}

fn check_window(ops: usize, len: usize, apply: fn(&mut WindowContext, usize)) {
    for_each_sequence(ops, len, |seq| {
        let (mut cx, counts) = context();
        for &op in seq {
            apply(&mut cx, op);
            assert_eq!(
                cx.dispatcher().ledger().outstanding() + counts.terminated(),
                counts.begun.get(),
                "{seq:?}"
            );
        }
        let ledger = cx.dispatcher().ledger().clone();
        drop(cx);

        assert_eq!(ledger.outstanding(), 0, "{seq:?}");
        assert_eq!(counts.terminated(), counts.begun.get(), "{seq:?}");
        assert_eq!(counts.late.get(), 0, "{seq:?}");
    });
}

#[test]
fn drag_sessions_terminate_once() {
    check_window(9, 4, pointer_op);
}

#[test]
fn scroll_sessions_terminate_once() {
    check_window(10, 4, scroll_op);
}

#[test]
fn closed_window_hands_out_no_capabilities() {
    let (mut cx, counts) = context();
    cx.close();
    cx.pointer(PointerEvent::press(P, MouseButton::LEFT));
    assert_eq!(cx.begin_scroll_gesture(P), None);
    assert_eq!(counts.begun.get(), 0);
    assert_eq!(cx.dispatcher().ledger().outstanding(), 0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Pending,
    Fired,
    Cancelled,
}

struct Probe {
    id: usize,
    outcomes: Rc<RefCell<Vec<Outcome>>>,
}

impl Probe {
    fn settle(&self, outcome: Outcome) {
        let mut outcomes = self.outcomes.borrow_mut();
        assert_eq!(outcomes[self.id], Outcome::Pending, "task {} settled twice", self.id);
        outcomes[self.id] = outcome;
    }
}

impl Invocation for Probe {
    fn fire(self: Box<Self>) {
        self.settle(Outcome::Fired);
    }

    fn cancel(self: Box<Self>) {
        self.settle(Outcome::Cancelled);
    }
}

#[test]
fn timer_invocations_settle_once() {
    let base = Instant::now();
    let ms = Duration::from_millis;

    // 0, 1: schedule now or 10ms later; 2, 3: cancel the first or last handle;
    // 4, 5: poll at t + 5ms or t + 20ms; 6: clear.
    for_each_sequence(7, 5, |seq| {
        let outcomes = Rc::new(RefCell::new(Vec::new()));
        let mut handles: Vec<HInvoke> = Vec::new();
        let mut queue = TimerQueue::new();
        let mut fired = 0;

        for (step, &op) in seq.iter().enumerate() {
            let t = base + ms(step as u64 * 10);
            match op {
                0 | 1 => {
                    let id = outcomes.borrow().len();
                    outcomes.borrow_mut().push(Outcome::Pending);
                    let probe = Probe { id, outcomes: Rc::clone(&outcomes) };
                    let start = if op == 0 { t } else { t + ms(10) };
                    let handle =
                        queue.insert(start..start + ms(10), InvocationCapability::new(probe));
                    handles.push(handle.unwrap());
                },
                2 => {
                    if let Some(&handle) = handles.first() {
                        queue.cancel(handle);
                    }
                },
                3 => {
                    if let Some(&handle) = handles.last() {
                        queue.cancel(handle);
                    }
                },
                4 => fired += queue.poll(t + ms(5)),
                5 => fired += queue.poll(t + ms(20)),
                _ => queue.clear(),
            }

            let pending = outcomes.borrow().iter().filter(|&&o| o == Outcome::Pending).count();
            assert_eq!(queue.len(), pending, "{seq:?}");
        }

        drop(queue);

        let outcomes = outcomes.borrow();
        assert!(outcomes.iter().all(|&o| o != Outcome::Pending), "{seq:?}");
        assert_eq!(outcomes.iter().filter(|&&o| o == Outcome::Fired).count(), fired, "{seq:?}");
    });
}

#[test]
fn full_queue_cancels_the_rejected_invocation() {
    let now = Instant::now();
    let outcomes = Rc::new(RefCell::new(vec![Outcome::Pending; TimerQueue::CAPACITY + 1]));
    let mut queue = TimerQueue::new();

    for id in 0..TimerQueue::CAPACITY {
        let probe = Probe { id, outcomes: Rc::clone(&outcomes) };
        queue.insert(now..now, InvocationCapability::new(probe)).unwrap();
    }
    let probe = Probe { id: TimerQueue::CAPACITY, outcomes: Rc::clone(&outcomes) };
    assert!(queue.insert(now..now, InvocationCapability::new(probe)).is_err());
    assert_eq!(outcomes.borrow()[TimerQueue::CAPACITY], Outcome::Cancelled);

    assert_eq!(queue.poll(now), TimerQueue::CAPACITY);
    assert!(outcomes.borrow().iter().all(|&o| o != Outcome::Pending));
}
