use bitflags::bitflags;
use evbridge_core::window::WindowFlags;

bitflags! {
    /// `NSWindowStyleMask`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NSWindowStyleMask: u64 {
        const TITLED = 1 << 0;
        const CLOSABLE = 1 << 1;
        const MINIATURIZABLE = 1 << 2;
        const RESIZABLE = 1 << 3;
        const FULL_SIZE_CONTENT_VIEW = 1 << 15;
    }
}

impl NSWindowStyleMask {
    pub const BORDERLESS: Self = Self::empty();
}

/// The native style of a window with the given [`WindowFlags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowStyle {
    pub style_mask: NSWindowStyleMask,
    /// Whether the content view is backed by an `NSVisualEffectView`.
    pub visual_effect: bool,
}

impl From<WindowFlags> for WindowStyle {
    fn from(flags: WindowFlags) -> Self {
        let mut style_mask = if flags.contains(WindowFlags::BORDERLESS) {
            NSWindowStyleMask::BORDERLESS
        } else {
            NSWindowStyleMask::TITLED
                | NSWindowStyleMask::CLOSABLE
                | NSWindowStyleMask::MINIATURIZABLE
        };

        if flags.contains(WindowFlags::RESIZABLE) {
            style_mask |= NSWindowStyleMask::RESIZABLE;
        }

        if flags.contains(WindowFlags::FULL_SIZE_CONTENT) {
            style_mask |= NSWindowStyleMask::FULL_SIZE_CONTENT_VIEW;
        }

        WindowStyle {
            style_mask,
            visual_effect: flags.contains(WindowFlags::TRANSPARENT_BACKDROP_BLUR),
        }
    }
}
