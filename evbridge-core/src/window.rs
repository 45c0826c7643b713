//! Window identity and the static per-window configuration shared with the backends.

use std::fmt;

use bitflags::bitflags;

use crate::cursor::CursorShape;

/// Identifier of a window. Unique for each window.
///
/// Every upstream callback receives the `WindowId` of the window the event belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WindowId(u64);

impl WindowId {
    /// Returns a dummy id, useful for unit testing.
    pub const fn dummy() -> Self {
        WindowId(0)
    }
}

impl From<WindowId> for u64 {
    fn from(window_id: WindowId) -> Self {
        window_id.0
    }
}

impl From<u64> for WindowId {
    fn from(raw_id: u64) -> Self {
        Self(raw_id)
    }
}

/// A non-owning reference to a native window.
///
/// The native window is owned by the upstream core. The bridge only remembers which window it
/// serves, and, when the host supplied one, the raw handle of the native object so that it can
/// be handed out through [`rwh_06::HasWindowHandle`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle {
    id: WindowId,
    raw: Option<rwh_06::RawWindowHandle>,
}

impl WindowHandle {
    /// A handle that identifies a window but has no native object attached.
    ///
    /// [`HasWindowHandle::window_handle`](rwh_06::HasWindowHandle::window_handle) returns
    /// [`HandleError::Unavailable`](rwh_06::HandleError::Unavailable) for it.
    pub const fn detached(id: WindowId) -> Self {
        Self { id, raw: None }
    }

    /// A handle referring to a live native window.
    ///
    /// # Safety
    ///
    /// `raw` must stay valid for as long as this handle, or any copy of it, is alive.
    pub const unsafe fn from_raw(id: WindowId, raw: rwh_06::RawWindowHandle) -> Self {
        Self { id, raw: Some(raw) }
    }

    pub const fn id(&self) -> WindowId {
        self.id
    }

    pub const fn raw(&self) -> Option<rwh_06::RawWindowHandle> {
        self.raw
    }
}

impl fmt::Debug for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowHandle")
            .field("id", &self.id)
            .field("attached", &self.raw.is_some())
            .finish()
    }
}

impl rwh_06::HasWindowHandle for WindowHandle {
    fn window_handle(&self) -> Result<rwh_06::WindowHandle<'_>, rwh_06::HandleError> {
        let raw = self.raw.ok_or(rwh_06::HandleError::Unavailable)?;
        // SAFETY: `from_raw` requires the native window to outlive this handle.
        unsafe { Ok(rwh_06::WindowHandle::borrow_raw(raw)) }
    }
}

bitflags! {
    /// Independent traits of a window, fixed at creation.
    ///
    /// The bit values are shared by every backend.
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowFlags: u32 {
        /// The user can resize the window.
        const RESIZABLE = 1 << 0;
        /// The window has no decorations.
        const BORDERLESS = 1 << 1;
        /// The content background is blurred where it is transparent.
        const TRANSPARENT_BACKDROP_BLUR = 1 << 2;
        /// The content area extends beneath the title bar.
        ///
        /// ## Platform-specific
        ///
        /// - **GTK / Win32:** Ignored.
        const FULL_SIZE_CONTENT = 1 << 3;
    }
}

impl Default for WindowFlags {
    fn default() -> Self {
        WindowFlags::RESIZABLE
    }
}

shared_enum! {
    /// The answer to a non-client hit test.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub enum NcHit {
        /// The point belongs to the content; events are delivered normally.
        #[default]
        Client = 0,
        /// Dragging at the point moves the window.
        Grab = 1,
    }
}

/// Attributes used when setting up the bridge for a window.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WindowAttributes {
    pub flags: WindowFlags,
    pub cursor: CursorShape,
    /// The number of points one "line" of a line-based wheel delta scrolls by.
    pub line_height: f64,
    pub drag_gestures: bool,
    pub scroll_gestures: bool,
}

impl Default for WindowAttributes {
    #[inline]
    fn default() -> WindowAttributes {
        WindowAttributes {
            flags: WindowFlags::default(),
            cursor: CursorShape::default(),
            line_height: 40.0,
            drag_gestures: true,
            scroll_gestures: true,
        }
    }
}

impl WindowAttributes {
    /// Sets the window flags.
    ///
    /// The default is [`WindowFlags::RESIZABLE`].
    #[inline]
    pub fn with_flags(mut self, flags: WindowFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the initial cursor appearance.
    #[inline]
    pub fn with_cursor(mut self, cursor: CursorShape) -> Self {
        self.cursor = cursor;
        self
    }

    /// Sets how many points a line-based wheel delta scrolls per line.
    ///
    /// Non-finite or non-positive values are ignored. The default is `40.0`.
    #[inline]
    pub fn with_line_height(mut self, line_height: f64) -> Self {
        if line_height.is_finite() && line_height > 0.0 {
            self.line_height = line_height;
        } else {
            tracing::warn!(line_height, "ignoring invalid line height");
        }
        self
    }

    /// Sets whether a button press opens a drag session.
    ///
    /// When disabled, presses and releases are still forwarded to the window listener.
    #[inline]
    pub fn with_drag_gestures(mut self, drag_gestures: bool) -> Self {
        self.drag_gestures = drag_gestures;
        self
    }

    /// Sets whether phase-reporting backends open scroll gesture sessions.
    ///
    /// When disabled, phased scrolling is delivered as continuous scroll events.
    #[inline]
    pub fn with_scroll_gestures(mut self, scroll_gestures: bool) -> Self {
        self.scroll_gestures = scroll_gestures;
        self
    }
}
