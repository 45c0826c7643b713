use cursor_icon::CursorIcon;
use evbridge_core::cursor::CursorShape;
use evbridge_core::window::WindowFlags;

/// The `GtkWindow` properties that follow from [`WindowFlags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowProps {
    pub decorated: bool,
    pub resizable: bool,
    /// Use the screen's RGBA visual so the window can be translucent.
    pub rgba_visual: bool,
    /// Replace the title bar with an empty header bar so the content reaches the top edge.
    pub custom_titlebar: bool,
}

impl From<WindowFlags> for WindowProps {
    fn from(flags: WindowFlags) -> Self {
        WindowProps {
            decorated: !flags.contains(WindowFlags::BORDERLESS),
            resizable: flags.contains(WindowFlags::RESIZABLE),
            rgba_visual: flags.contains(WindowFlags::TRANSPARENT_BACKDROP_BLUR),
            custom_titlebar: flags.contains(WindowFlags::FULL_SIZE_CONTENT),
        }
    }
}

/// The name passed to `gdk_cursor_new_from_name`.
pub fn cursor_name(shape: CursorShape) -> &'static str {
    CursorIcon::from(shape).name()
}
