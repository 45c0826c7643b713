//! Double-activation filter.
//!
//! Some backends report the second press of a double click twice: once as an ordinary press and
//! once more as a dedicated "double click" event. The dedicated event is tagged
//! [`Activation::Synthetic`] by the adapter and dropped here, without a press or a release
//! being forwarded for it. Timing is never looked at; the backend already did that.

use evbridge_core::event::{Activation, PointerEvent};

/// Returns the event if it should be forwarded.
#[inline]
pub fn filter(event: PointerEvent) -> Option<PointerEvent> {
    match event.activation {
        Activation::Primary => Some(event),
        Activation::Synthetic => {
            tracing::trace!(button = ?event.button, "dropping synthetic activation");
            None
        },
    }
}
