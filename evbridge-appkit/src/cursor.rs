use evbridge_core::cursor::CursorShape;

/// How to obtain the `NSCursor` for a [`CursorShape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// A public `NSCursor` class method.
    Native(&'static str),
    /// An undocumented `NSCursor` class method.
    Undocumented(&'static str),
    /// A cursor image shipped with WebKit's `HIServices` resources.
    WebKit(&'static str),
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor::Native("arrowCursor")
    }
}

impl Cursor {
    pub fn name(self) -> &'static str {
        match self {
            Cursor::Native(name) | Cursor::Undocumented(name) | Cursor::WebKit(name) => name,
        }
    }
}

impl From<CursorShape> for Cursor {
    fn from(shape: CursorShape) -> Self {
        match shape {
            CursorShape::Arrow | CursorShape::Default => Cursor::Native("arrowCursor"),
            CursorShape::Hand => Cursor::Native("pointingHandCursor"),
            CursorShape::Grab => Cursor::Native("openHandCursor"),
            CursorShape::Grabbing => Cursor::Native("closedHandCursor"),
            CursorShape::Text => Cursor::Native("IBeamCursor"),
            CursorShape::VerticalText => Cursor::Native("IBeamCursorForVerticalLayout"),
            CursorShape::Copy => Cursor::Native("dragCopyCursor"),
            CursorShape::Alias => Cursor::Native("dragLinkCursor"),
            CursorShape::NotAllowed | CursorShape::NoDrop => {
                Cursor::Native("operationNotAllowedCursor")
            },
            CursorShape::ContextMenu => Cursor::Native("contextualMenuCursor"),
            CursorShape::Crosshair => Cursor::Native("crosshairCursor"),
            CursorShape::EResize => Cursor::Native("resizeRightCursor"),
            CursorShape::NResize => Cursor::Native("resizeUpCursor"),
            CursorShape::WResize => Cursor::Native("resizeLeftCursor"),
            CursorShape::SResize => Cursor::Native("resizeDownCursor"),
            CursorShape::EwResize | CursorShape::ColResize => Cursor::Native("resizeLeftRightCursor"),
            CursorShape::NsResize | CursorShape::RowResize => Cursor::Native("resizeUpDownCursor"),

            CursorShape::Help => Cursor::Undocumented("_helpCursor"),
            CursorShape::ZoomIn => Cursor::Undocumented("_zoomInCursor"),
            CursorShape::ZoomOut => Cursor::Undocumented("_zoomOutCursor"),
            CursorShape::NeResize => Cursor::Undocumented("_windowResizeNorthEastCursor"),
            CursorShape::NwResize => Cursor::Undocumented("_windowResizeNorthWestCursor"),
            CursorShape::SeResize => Cursor::Undocumented("_windowResizeSouthEastCursor"),
            CursorShape::SwResize => Cursor::Undocumented("_windowResizeSouthWestCursor"),
            CursorShape::NeswResize => {
                Cursor::Undocumented("_windowResizeNorthEastSouthWestCursor")
            },
            CursorShape::NwseResize => {
                Cursor::Undocumented("_windowResizeNorthWestSouthEastCursor")
            },
            // Same as Safari and Chrome, even though the semantics differ for `Wait`.
            CursorShape::Wait | CursorShape::Progress => {
                Cursor::Undocumented("busyButClickableCursor")
            },

            CursorShape::Move | CursorShape::AllScroll => Cursor::WebKit("move"),
            CursorShape::Cell => Cursor::WebKit("cell"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shape_has_a_cursor() {
        for &shape in CursorShape::ALL {
            assert!(!Cursor::from(shape).name().is_empty());
        }
        assert_eq!(Cursor::from(CursorShape::default()), Cursor::default());
        assert_eq!(Cursor::from(CursorShape::Text).name(), "IBeamCursor");
    }
}
