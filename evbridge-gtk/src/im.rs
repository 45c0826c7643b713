//! `GtkIMContext` signal handlers.

use evbridge_core::text_input::TextRange;

use crate::window::GtkWindow;

/// `GdkRectangle`, in logical pixels of the drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GdkRectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// The UTF-16 offset of the character at `chars` in `text`, clamped to its end.
fn chars_to_utf16(text: &str, chars: usize) -> usize {
    text.chars().take(chars).map(char::len_utf16).sum()
}

impl GtkWindow {
    /// The `commit` signal.
    pub fn im_commit(&mut self, text: &str) {
        tracing::trace!(text, "commit");
        let Some(mut bridge) = self.context.text_input() else {
            tracing::warn!("received `commit` without a text input context");
            return;
        };
        bridge.insert_text(text, None);
    }

    /// The `preedit-changed` signal, with the values of `gtk_im_context_get_preedit_string`.
    ///
    /// `cursor_pos` counts characters. A negative value places the cursor at the start.
    pub fn im_preedit_changed(&mut self, text: &str, cursor_pos: i32) {
        tracing::trace!(text, cursor_pos, "preedit-changed");
        let Some(mut bridge) = self.context.text_input() else {
            tracing::warn!("received `preedit-changed` without a text input context");
            return;
        };
        let cursor = chars_to_utf16(text, usize::try_from(cursor_pos).unwrap_or(0));
        bridge.set_composing_text(text, TextRange::new(cursor, 0), None);
    }

    /// The `preedit-end` signal.
    pub fn im_preedit_end(&mut self) {
        tracing::trace!("preedit-end");
        if let Some(mut bridge) = self.context.text_input() {
            bridge.clear_composing_text();
        }
    }

    /// The rectangle to pass to `gtk_im_context_set_cursor_location`, covering the selection.
    ///
    /// Returns `None` when the window has no composing context.
    pub fn im_cursor_location(&mut self) -> Option<GdkRectangle> {
        let mut bridge = self.context.text_input()?;
        let selection = bridge.selected_range();
        let (rect, _) = bridge.bounding_rect_for_range(selection);
        Some(GdkRectangle {
            x: rect.position.x.round() as i32,
            y: rect.position.y.round() as i32,
            width: rect.size.width.round() as i32,
            height: rect.size.height.round() as i32,
        })
    }

    /// Whether the host should focus its `GtkIMContext`.
    pub fn has_text_input_context(&mut self) -> bool {
        self.context.has_composing_context()
    }
}
