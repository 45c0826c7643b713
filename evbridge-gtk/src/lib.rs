//! # GTK 3
//!
//! The event source for GTK windows. The host creates the `GtkWindow` and its drawing area,
//! connects their signals and forwards them to a [`GtkWindow`]:
//!
//! - widget events through [`EventSource::handle_event`], modelled as [`GdkEvent`], returning
//!   the [`Propagation`] the signal handler should return,
//! - the `GtkIMContext` signals through the `im_*` methods.
//!
//! GDK numbers buttons from one and swaps the right and middle buttons relative to the
//! zero-based scheme; see [`normalize_button`]. Buttons 4 to 7 are the legacy wheel emulation
//! and are left to the `scroll-event` path.
//!
//! GDK sends an extra `GDK_2BUTTON_PRESS` (or `GDK_3BUTTON_PRESS`) after the second (or third)
//! press of a multi-click. It is forwarded as a synthetic press and dropped by the
//! double-activation filter, so the listener sees each physical press exactly once.
//!
//! [`EventSource::handle_event`]: evbridge_common::EventSource::handle_event

mod event;
mod im;
mod style;
mod window;

pub use self::event::{
    GdkButtonEventType, GdkEvent, GdkEventButton, GdkEventMotion, GdkEventScroll,
    GdkScrollDirection, Propagation,
};
pub use self::im::GdkRectangle;
pub use self::style::{cursor_name, WindowProps};
pub use self::window::{normalize_button, GtkWindow};
