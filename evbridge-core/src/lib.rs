//! Base types for the input bridge.
//!
//! This crate contains the types, traits and basic functions of [`evbridge`] that are backend
//! independent: the values that cross the bridge ([`event`], [`cursor`], [`window`]), the
//! callback contract of the upstream event core ([`listener`], [`text_input`]) and the
//! capability handles through which that core hands out gesture sessions and timer callbacks
//! ([`handle`]).
//!
//! Backends (see `evbridge-appkit`, `evbridge-gtk` and `evbridge-win32`) and the shared
//! machinery in `evbridge-common` are built on top of these types only.
//!
//! [`evbridge`]: https://docs.rs/evbridge

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

#[macro_use]
mod schema;

pub mod cursor;
pub mod error;
pub mod event;
pub mod handle;
pub mod listener;
pub mod text_input;
pub mod thread;
pub mod window;

pub use dpi;
