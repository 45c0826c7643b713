//! # macOS / AppKit
//!
//! The event source for AppKit windows. The host owns the `NSWindow`, its content view and its
//! delegate, and forwards their callbacks to an [`AppKitWindow`]:
//!
//! - pointer and wheel `NSEvent`s through [`EventSource::handle_event`], modelled as
//!   [`NsEvent`],
//! - `NSWindowDelegate` notifications through the `window_*` methods,
//! - the `NSTextInputClient` protocol through the methods in [`text_input`].
//!
//! AppKit reports positions with the origin at the bottom-left corner of the content view.
//! They are flipped at this boundary, so everything the listener sees has its origin at the
//! top-left corner with Y increasing downward.
//!
//! ## Scrolling
//!
//! Wheel events without a phase come from mice and are delivered as continuous scroll events.
//! Trackpad scrolling reports phases; with [`WindowAttributes::scroll_gestures`] enabled (the
//! default) each trackpad gesture, including the momentum that follows it, is delivered to one
//! [`ScrollListener`]. The momentum phase only starts after the fingers are lifted, so a lifted
//! gesture is kept open until its momentum arrives, any other event arrives, or the host calls
//! [`AppKitWindow::flush_gestures`].
//!
//! [`EventSource::handle_event`]: evbridge_common::EventSource::handle_event
//! [`WindowAttributes::scroll_gestures`]: evbridge_core::window::WindowAttributes::scroll_gestures
//! [`ScrollListener`]: evbridge_core::listener::ScrollListener

mod cursor;
mod event;
mod style;
pub mod text_input;
mod window;

pub use self::cursor::Cursor;
pub use self::event::{NSEventPhase, NSEventType, NSPoint, NSRect, NSSize, NsEvent};
pub use self::style::{NSWindowStyleMask, WindowStyle};
pub use self::text_input::{NSRange, NS_NOT_FOUND};
pub use self::window::AppKitWindow;
