//! # Win32
//!
//! The event source for Win32 windows. The host registers the window class, runs the message
//! loop and passes the messages of each `HWND` to its [`Win32Window`]; see there for the few
//! calls the host makes on the adapter's behalf.
//!
//! Client-area coordinates arrive in physical pixels and are divided by the window's scale
//! factor (`dpi / 96`), which follows `WM_DPICHANGED`. The `*DBLCLK` messages replace the
//! second `*DOWN` of a double click, so they are forwarded as ordinary presses.
//!
//! ## Wheel
//!
//! `WM_MOUSEWHEEL` and `WM_MOUSEHWHEEL` values that are whole multiples of `WHEEL_DELTA`
//! become one discrete step per notch. Other values come from high-resolution wheels and
//! touchpads and become continuous deltas of `value / WHEEL_DELTA` lines, scaled by
//! [`WindowAttributes::line_height`]. Windows never reports the end of a wheel gesture, so
//! continuous streams from this backend don't end with a stop.
//!
//! Wheel messages carry screen coordinates. They are moved into the client area using the
//! origin from [`Win32Window::set_client_origin`], which `WM_MOVE` keeps current.
//!
//! [`WindowAttributes::line_height`]: evbridge_core::window::WindowAttributes::line_height

mod msg;
mod style;
mod window;

pub use self::msg::*;
pub use self::style::{
    cursor_resource, WindowStyle, WindowStyles, IDC_APPSTARTING, IDC_ARROW, IDC_CROSS, IDC_HAND,
    IDC_HELP, IDC_IBEAM, IDC_NO, IDC_SIZEALL, IDC_SIZENESW, IDC_SIZENS, IDC_SIZENWSE, IDC_SIZEWE,
    IDC_WAIT,
};
pub use self::window::Win32Window;
