//! evbridge implementation helpers.
//!
//! The machinery every backend adapter shares. An adapter converts one native event into the
//! normalized records of `evbridge-core` and hands it to its [`WindowContext`], which routes it
//! through the double-activation filter, the scroll phase tracker or the gesture arbiter before
//! it reaches the [`Dispatcher`].

pub mod context;
pub mod dispatcher;
pub mod filter;
pub mod gesture;
pub mod scroll;
pub mod text_input;
pub mod timer_queue;

pub use context::{EventSource, WindowContext};
pub use dispatcher::Dispatcher;
