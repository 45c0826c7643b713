//! Window messages as the window procedure receives them.

use bitflags::bitflags;
use smol_str::SmolStr;

pub const WM_DESTROY: u32 = 0x0002;
pub const WM_MOVE: u32 = 0x0003;
pub const WM_SIZE: u32 = 0x0005;
pub const WM_SETFOCUS: u32 = 0x0007;
pub const WM_KILLFOCUS: u32 = 0x0008;
pub const WM_PAINT: u32 = 0x000F;
pub const WM_CLOSE: u32 = 0x0010;
pub const WM_NCHITTEST: u32 = 0x0084;
pub const WM_IME_STARTCOMPOSITION: u32 = 0x010D;
pub const WM_IME_ENDCOMPOSITION: u32 = 0x010E;
pub const WM_IME_COMPOSITION: u32 = 0x010F;
pub const WM_MOUSEMOVE: u32 = 0x0200;
pub const WM_LBUTTONDOWN: u32 = 0x0201;
pub const WM_LBUTTONUP: u32 = 0x0202;
pub const WM_LBUTTONDBLCLK: u32 = 0x0203;
pub const WM_RBUTTONDOWN: u32 = 0x0204;
pub const WM_RBUTTONUP: u32 = 0x0205;
pub const WM_RBUTTONDBLCLK: u32 = 0x0206;
pub const WM_MBUTTONDOWN: u32 = 0x0207;
pub const WM_MBUTTONUP: u32 = 0x0208;
pub const WM_MBUTTONDBLCLK: u32 = 0x0209;
pub const WM_MOUSEWHEEL: u32 = 0x020A;
pub const WM_XBUTTONDOWN: u32 = 0x020B;
pub const WM_XBUTTONUP: u32 = 0x020C;
pub const WM_XBUTTONDBLCLK: u32 = 0x020D;
pub const WM_MOUSEHWHEEL: u32 = 0x020E;
pub const WM_CAPTURECHANGED: u32 = 0x0215;
pub const WM_MOUSELEAVE: u32 = 0x02A3;
pub const WM_DPICHANGED: u32 = 0x02E0;

pub const XBUTTON1: u16 = 0x0001;
pub const XBUTTON2: u16 = 0x0002;

pub const HTCLIENT: isize = 1;
pub const HTCAPTION: isize = 2;
pub const HTTOP: isize = 12;

pub const WHEEL_DELTA: i16 = 120;
pub const USER_DEFAULT_SCREEN_DPI: u16 = 96;

#[inline(always)]
pub const fn loword(x: u32) -> u16 {
    (x & 0xffff) as u16
}

#[inline(always)]
pub const fn hiword(x: u32) -> u16 {
    ((x >> 16) & 0xffff) as u16
}

#[inline(always)]
pub const fn get_x_lparam(x: u32) -> i16 {
    loword(x) as _
}

#[inline(always)]
pub const fn get_y_lparam(x: u32) -> i16 {
    hiword(x) as _
}

#[inline(always)]
pub const fn get_xbutton_wparam(x: u32) -> u16 {
    hiword(x)
}

#[inline(always)]
pub const fn get_wheel_delta_wparam(x: u32) -> i16 {
    hiword(x) as _
}

/// One message delivered to the window procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Msg {
    pub message: u32,
    pub wparam: usize,
    pub lparam: isize,
    /// `GetMessageTime`, in milliseconds.
    pub time: u32,
}

impl Msg {
    pub const fn new(message: u32, wparam: usize, lparam: isize) -> Self {
        Self { message, wparam, lparam, time: 0 }
    }

    /// A message with a position in physical pixels in `lParam`.
    ///
    /// The position is relative to the client area for most mouse messages, and to the screen
    /// for `WM_MOUSEWHEEL`, `WM_MOUSEHWHEEL` and `WM_NCHITTEST`.
    pub const fn mouse(message: u32, x: i16, y: i16) -> Self {
        Self::new(message, 0, make_lparam(x as u16, y as u16))
    }

    pub const fn with_wparam(self, wparam: usize) -> Self {
        Self { wparam, ..self }
    }

    pub const fn with_time(self, time: u32) -> Self {
        Self { time, ..self }
    }

    /// The low 32 bits of `wparam`; the high bits are unused by every message handled here.
    #[inline]
    pub const fn wparam32(&self) -> u32 {
        self.wparam as u32
    }

    #[inline]
    pub const fn lparam32(&self) -> u32 {
        self.lparam as u32
    }
}

/// `MAKELPARAM`
pub const fn make_lparam(lo: u16, hi: u16) -> isize {
    ((hi as u32) << 16 | lo as u32) as i32 as isize
}

/// `MAKEWPARAM`
pub const fn make_wparam(lo: u16, hi: u16) -> usize {
    ((hi as u32) << 16 | lo as u32) as usize
}

/// What the window procedure should do after the bridge saw a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MsgResult {
    /// Return this value without calling `DefWindowProcW`.
    Handled(isize),
    /// Pass the message on to `DefWindowProcW`.
    #[default]
    Default,
}

bitflags! {
    /// The `GCS_*` flags in the `lParam` of `WM_IME_COMPOSITION`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CompositionFlags: u32 {
        const COMPSTR = 0x0008;
        const CURSORPOS = 0x0080;
        const RESULTSTR = 0x0800;
    }
}

/// The contents of one `WM_IME_COMPOSITION`, read by the host with
/// `ImmGetCompositionStringW`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ImeComposition {
    pub flags: CompositionFlags,
    /// `GCS_RESULTSTR`, when [`CompositionFlags::RESULTSTR`] is set.
    pub result: SmolStr,
    /// `GCS_COMPSTR`, when [`CompositionFlags::COMPSTR`] is set.
    pub composition: SmolStr,
    /// `GCS_CURSORPOS`, in UTF-16 code units of `composition`.
    pub cursor: Option<usize>,
}

impl ImeComposition {
    /// The strings the host needs to read for a message with this `lParam`.
    pub fn flags_from_lparam(lparam: isize) -> CompositionFlags {
        CompositionFlags::from_bits_truncate(lparam as u32)
    }

    pub fn result(text: impl Into<SmolStr>) -> Self {
        Self { flags: CompositionFlags::RESULTSTR, result: text.into(), ..Default::default() }
    }

    pub fn composing(text: impl Into<SmolStr>, cursor: usize) -> Self {
        Self {
            flags: CompositionFlags::COMPSTR | CompositionFlags::CURSORPOS,
            composition: text.into(),
            cursor: Some(cursor),
            ..Default::default()
        }
    }
}
