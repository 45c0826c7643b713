use bitflags::bitflags;
use evbridge_core::cursor::CursorShape;
use evbridge_core::window::WindowFlags;

bitflags! {
    /// `WINDOW_STYLE`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WindowStyle: u32 {
        const WS_MAXIMIZEBOX = 0x0001_0000;
        const WS_MINIMIZEBOX = 0x0002_0000;
        const WS_SIZEBOX = 0x0004_0000;
        const WS_SYSMENU = 0x0008_0000;
        const WS_CAPTION = 0x00C0_0000;
        const WS_POPUP = 0x8000_0000;
    }
}

impl WindowStyle {
    pub const WS_OVERLAPPED: Self = Self::empty();
}

/// The native styles of a window with the given [`WindowFlags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowStyles {
    pub style: WindowStyle,
    /// Whether the host should enable `DwmEnableBlurBehindWindow` (or the system backdrop).
    pub blur_behind: bool,
}

impl From<WindowFlags> for WindowStyles {
    fn from(flags: WindowFlags) -> Self {
        let mut style = if flags.contains(WindowFlags::BORDERLESS) {
            WindowStyle::WS_POPUP
        } else {
            WindowStyle::WS_OVERLAPPED
                | WindowStyle::WS_CAPTION
                | WindowStyle::WS_SYSMENU
                | WindowStyle::WS_MINIMIZEBOX
        };

        if flags.contains(WindowFlags::RESIZABLE) {
            style |= WindowStyle::WS_SIZEBOX | WindowStyle::WS_MAXIMIZEBOX;
        }

        WindowStyles { style, blur_behind: flags.contains(WindowFlags::TRANSPARENT_BACKDROP_BLUR) }
    }
}

pub const IDC_ARROW: u16 = 32512;
pub const IDC_IBEAM: u16 = 32513;
pub const IDC_WAIT: u16 = 32514;
pub const IDC_CROSS: u16 = 32515;
pub const IDC_SIZENWSE: u16 = 32642;
pub const IDC_SIZENESW: u16 = 32643;
pub const IDC_SIZEWE: u16 = 32644;
pub const IDC_SIZENS: u16 = 32645;
pub const IDC_SIZEALL: u16 = 32646;
pub const IDC_NO: u16 = 32648;
pub const IDC_HAND: u16 = 32649;
pub const IDC_APPSTARTING: u16 = 32650;
pub const IDC_HELP: u16 = 32651;

/// The `IDC_*` resource id to pass to `LoadCursorW`.
///
/// Shapes without a system cursor fall back to the closest one.
pub fn cursor_resource(shape: CursorShape) -> u16 {
    match shape {
        CursorShape::Arrow | CursorShape::Default => IDC_ARROW,
        CursorShape::Hand => IDC_HAND,
        CursorShape::Crosshair | CursorShape::Cell => IDC_CROSS,
        CursorShape::Text | CursorShape::VerticalText => IDC_IBEAM,
        CursorShape::NotAllowed | CursorShape::NoDrop => IDC_NO,
        CursorShape::Grab
        | CursorShape::Grabbing
        | CursorShape::Move
        | CursorShape::AllScroll => IDC_SIZEALL,
        CursorShape::EResize
        | CursorShape::WResize
        | CursorShape::EwResize
        | CursorShape::ColResize => IDC_SIZEWE,
        CursorShape::NResize
        | CursorShape::SResize
        | CursorShape::NsResize
        | CursorShape::RowResize => IDC_SIZENS,
        CursorShape::NeResize | CursorShape::SwResize | CursorShape::NeswResize => IDC_SIZENESW,
        CursorShape::NwResize | CursorShape::SeResize | CursorShape::NwseResize => IDC_SIZENWSE,
        CursorShape::Wait => IDC_WAIT,
        CursorShape::Progress => IDC_APPSTARTING,
        CursorShape::Help => IDC_HELP,
        CursorShape::ContextMenu
        | CursorShape::Alias
        | CursorShape::Copy
        | CursorShape::ZoomIn
        | CursorShape::ZoomOut => IDC_ARROW,
    }
}
