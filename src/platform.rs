//! The backend adapters.
//!
//! Each module is compiled in when its Cargo feature is enabled. The adapters model the native
//! records as plain data, so every backend builds and can be tested on any host; the code that
//! registers callbacks with the toolkit lives in the host application.

#[cfg(appkit_backend)]
pub use evbridge_appkit as appkit;
#[cfg(gtk_backend)]
pub use evbridge_gtk as gtk;
#[cfg(win32_backend)]
pub use evbridge_win32 as win32;
