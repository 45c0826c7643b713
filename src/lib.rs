//! evbridge normalizes the pointer, scroll, window-lifecycle and text-input events of native
//! windowing toolkits into one event protocol, delivered to a single upstream event core.
//!
//! The upstream core implements [`WindowListener`] for each window. A backend adapter (see
//! [`platform`]) receives the toolkit's native events for that window, converts them to the
//! normalized records in [`event`], and routes them through the shared machinery:
//!
//! - the **double-activation filter** drops the synthetic press some backends send in addition
//!   to the second physical press of a double click,
//! - the **scroll phase tracker** classifies scroll input as discrete steps, precise deltas or
//!   the stop that ends a precise stream,
//! - the **gesture arbiter** decides whether pointer and scroll input belongs to an open drag
//!   or scroll gesture session, and ends those sessions when the window loses focus, loses the
//!   pointer capture or closes,
//! - the **text-input bridge** applies IME edits to the text the core exposes through
//!   [`TextInputEdit`], converting between the UTF-16 ranges input methods speak and the UTF-8
//!   offsets of the core.
//!
//! ```no_run
//! use evbridge::event::{MouseButton, Point};
//! use evbridge::listener::WindowListener;
//! use evbridge::window::{WindowAttributes, WindowHandle, WindowId};
//!
//! struct App;
//!
//! impl WindowListener for App {
//!     fn mouse_button(&mut self, _: WindowId, at: Point, pressed: bool, button: MouseButton) {
//!         println!("{button:?} pressed={pressed} at {at:?}");
//!     }
//! }
//!
//! let thread = evbridge::thread::bootstrap();
//! let handle = WindowHandle::detached(WindowId::dummy());
//! # #[cfg(feature = "gtk")]
//! let window = evbridge::platform::gtk::GtkWindow::new(
//!     thread,
//!     handle,
//!     WindowAttributes::default(),
//!     Box::new(App),
//! );
//! ```
//!
//! # Threading
//!
//! Everything happens on the UI thread. [`thread::bootstrap`] marks the calling thread as one
//! and returns the token every adapter needs; none of the adapter types are `Send`.
//!
//! # Gesture sessions
//!
//! Drag and scroll sessions are handed out by the listener and held by the bridge as
//! consume-on-call [`handle`]s: each session ends with exactly one `release` or `cancel`.
//! [`evbridge_common::timer_queue::TimerQueue`] holds deferred callbacks under the same rule.
//!
//! # Cargo Features
//!
//! - `appkit`, `gtk`, `win32` (all enabled by default): the backend adapters, available in
//!   [`platform`].
//! - `serde`: implements [`serde`] traits for the plain value types.
//! - `mint`: enables mint (math interoperability standard types) conversions for [`dpi`].
//!
//! [`WindowListener`]: listener::WindowListener
//! [`TextInputEdit`]: text_input::TextInputEdit
//! [`serde`]: https://docs.rs/serde

pub use cursor_icon;
pub use evbridge_common as common;
pub use evbridge_core::{cursor, dpi, error, event, handle, listener, text_input, thread, window};
pub use evbridge_common::{EventSource, WindowContext};
pub use rwh_06 as raw_window_handle;

pub mod platform;
