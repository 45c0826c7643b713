//! Cursor appearances exchanged with the backends.

use cursor_icon::CursorIcon;

shared_enum! {
    /// The appearance of the mouse cursor over a window.
    ///
    /// This is a pure value type. Each backend maps it to its native cursor with an exhaustive
    /// `match`, so adding a variant here fails the build until every backend handles it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub enum CursorShape {
        #[default]
        Default = 0,
        Crosshair = 1,
        Hand = 2,
        Arrow = 3,
        Move = 4,
        Text = 5,
        Wait = 6,
        Help = 7,
        Progress = 8,
        NotAllowed = 9,
        ContextMenu = 10,
        Cell = 11,
        VerticalText = 12,
        Alias = 13,
        Copy = 14,
        NoDrop = 15,
        Grab = 16,
        Grabbing = 17,
        AllScroll = 18,
        ZoomIn = 19,
        ZoomOut = 20,
        EResize = 21,
        NResize = 22,
        NeResize = 23,
        NwResize = 24,
        SResize = 25,
        SeResize = 26,
        SwResize = 27,
        WResize = 28,
        EwResize = 29,
        NsResize = 30,
        NeswResize = 31,
        NwseResize = 32,
        ColResize = 33,
        RowResize = 34,
    }
}

impl CursorShape {
    /// The name of the cursor in the CSS / freedesktop cursor specification.
    pub fn name(self) -> &'static str {
        CursorIcon::from(self).name()
    }
}

impl From<CursorShape> for CursorIcon {
    fn from(shape: CursorShape) -> Self {
        match shape {
            // `cursor-icon` has no separate arrow/hand; they are the platform defaults for
            // "default" and "pointer".
            CursorShape::Default | CursorShape::Arrow => CursorIcon::Default,
            CursorShape::Hand => CursorIcon::Pointer,
            CursorShape::Crosshair => CursorIcon::Crosshair,
            CursorShape::Move => CursorIcon::Move,
            CursorShape::Text => CursorIcon::Text,
            CursorShape::Wait => CursorIcon::Wait,
            CursorShape::Help => CursorIcon::Help,
            CursorShape::Progress => CursorIcon::Progress,
            CursorShape::NotAllowed => CursorIcon::NotAllowed,
            CursorShape::ContextMenu => CursorIcon::ContextMenu,
            CursorShape::Cell => CursorIcon::Cell,
            CursorShape::VerticalText => CursorIcon::VerticalText,
            CursorShape::Alias => CursorIcon::Alias,
            CursorShape::Copy => CursorIcon::Copy,
            CursorShape::NoDrop => CursorIcon::NoDrop,
            CursorShape::Grab => CursorIcon::Grab,
            CursorShape::Grabbing => CursorIcon::Grabbing,
            CursorShape::AllScroll => CursorIcon::AllScroll,
            CursorShape::ZoomIn => CursorIcon::ZoomIn,
            CursorShape::ZoomOut => CursorIcon::ZoomOut,
            CursorShape::EResize => CursorIcon::EResize,
            CursorShape::NResize => CursorIcon::NResize,
            CursorShape::NeResize => CursorIcon::NeResize,
            CursorShape::NwResize => CursorIcon::NwResize,
            CursorShape::SResize => CursorIcon::SResize,
            CursorShape::SeResize => CursorIcon::SeResize,
            CursorShape::SwResize => CursorIcon::SwResize,
            CursorShape::WResize => CursorIcon::WResize,
            CursorShape::EwResize => CursorIcon::EwResize,
            CursorShape::NsResize => CursorIcon::NsResize,
            CursorShape::NeswResize => CursorIcon::NeswResize,
            CursorShape::NwseResize => CursorIcon::NwseResize,
            CursorShape::ColResize => CursorIcon::ColResize,
            CursorShape::RowResize => CursorIcon::RowResize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_round_trips_for_every_variant() {
        assert_eq!(CursorShape::ALL.len(), 35);
        for (i, &shape) in CursorShape::ALL.iter().enumerate() {
            assert_eq!(shape.to_wire(), i as u32);
            assert_eq!(CursorShape::try_from(i as u32), Ok(shape));
        }
    }

    #[test]
    fn unknown_wire_value_is_rejected() {
        let err = CursorShape::try_from(35).unwrap_err();
        assert_eq!(err.type_name(), "CursorShape");
        assert_eq!(err.value(), 35);
    }

    #[test]
    fn css_names() {
        assert_eq!(CursorShape::Default.name(), "default");
        assert_eq!(CursorShape::Hand.name(), "pointer");
        assert_eq!(CursorShape::NwseResize.name(), "nwse-resize");
    }
}
