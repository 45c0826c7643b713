//! The `NSTextInputClient` surface.
//!
//! Ranges are `NSRange`s in UTF-16 code units. A location of [`NS_NOT_FOUND`] means "no
//! range". Rectangles and points use window coordinates with the origin at the bottom-left
//! corner; the host converts them to and from screen coordinates.

use evbridge_core::text_input::{TextRange, TextRect};

use crate::event::{NSPoint, NSRect, NSSize};
use crate::window::AppKitWindow;

/// `NSNotFound`.
pub const NS_NOT_FOUND: usize = isize::MAX as usize;

/// `NSRange`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NSRange {
    pub location: usize,
    pub length: usize,
}

impl NSRange {
    pub const NOT_FOUND: Self = Self { location: NS_NOT_FOUND, length: 0 };

    pub const fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    fn to_text_range(self) -> Option<TextRange> {
        (self.location != NS_NOT_FOUND).then(|| TextRange::new(self.location, self.length))
    }
}

impl From<TextRange> for NSRange {
    fn from(range: TextRange) -> Self {
        Self::new(range.start, range.len)
    }
}

impl AppKitWindow {
    fn flip_rect(&self, rect: TextRect) -> NSRect {
        NSRect::new(
            NSPoint::new(rect.position.x, self.content_height - rect.position.y - rect.size.height),
            NSSize::new(rect.size.width, rect.size.height),
        )
    }

    /// `hasMarkedText`
    pub fn has_marked_text(&mut self) -> bool {
        self.context.text_input().is_some_and(|mut bridge| bridge.composing_range().is_some())
    }

    /// Whether the view should act as a text input client at all.
    pub fn has_text_input_context(&mut self) -> bool {
        self.context.has_composing_context()
    }

    /// `insertText:replacementRange:`
    pub fn insert_text(&mut self, text: &str, replacement_range: NSRange) {
        tracing::trace!(text, ?replacement_range, "insertText:replacementRange:");
        let Some(mut bridge) = self.context.text_input() else {
            tracing::warn!("received `insertText:replacementRange:` without a text input context");
            return;
        };
        bridge.insert_text(text, replacement_range.to_text_range());
    }

    /// `setMarkedText:selectedRange:replacementRange:`
    pub fn set_marked_text(
        &mut self,
        text: &str,
        selected_range: NSRange,
        replacement_range: NSRange,
    ) {
        tracing::trace!(
            text,
            ?selected_range,
            ?replacement_range,
            "setMarkedText:selectedRange:replacementRange:"
        );
        let Some(mut bridge) = self.context.text_input() else {
            tracing::warn!("received `setMarkedText:` without a text input context");
            return;
        };
        let selection = selected_range.to_text_range().unwrap_or_default();
        bridge.set_composing_text(text, selection, replacement_range.to_text_range());
    }

    /// `unmarkText`
    pub fn unmark_text(&mut self) {
        tracing::trace!("unmarkText");
        let Some(mut bridge) = self.context.text_input() else {
            tracing::warn!("received `unmarkText` without a text input context");
            return;
        };
        bridge.clear_composing_text();
    }

    /// `selectedRange`
    pub fn selected_range(&mut self) -> NSRange {
        match self.context.text_input() {
            Some(mut bridge) => bridge.selected_range().into(),
            None => NSRange::NOT_FOUND,
        }
    }

    /// `markedRange`
    pub fn marked_range(&mut self) -> NSRange {
        self.context
            .text_input()
            .and_then(|mut bridge| bridge.composing_range())
            .map_or(NSRange::NOT_FOUND, NSRange::from)
    }

    /// `attributedSubstringForProposedRange:actualRange:`
    pub fn attributed_substring_for_proposed_range(
        &mut self,
        range: NSRange,
    ) -> Option<(String, NSRange)> {
        tracing::trace!(?range, "attributedSubstringForProposedRange:actualRange:");
        let Some(mut bridge) = self.context.text_input() else {
            tracing::warn!("received `attributedSubstringForProposedRange:` without a text input context");
            return None;
        };
        let range = range.to_text_range()?;
        let (text, actual) = bridge.text_in_range(range);
        Some((text, actual.into()))
    }

    /// `firstRectForCharacterRange:actualRange:`
    pub fn first_rect_for_character_range(&mut self, range: NSRange) -> (NSRect, NSRange) {
        tracing::trace!(?range, "firstRectForCharacterRange:actualRange:");
        let Some(range) = range.to_text_range() else {
            return (NSRect::default(), NSRange::NOT_FOUND);
        };
        let Some(mut bridge) = self.context.text_input() else {
            tracing::warn!("received `firstRectForCharacterRange:` without a text input context");
            return (NSRect::default(), NSRange::NOT_FOUND);
        };
        let (rect, actual) = bridge.bounding_rect_for_range(range);
        (self.flip_rect(rect), actual.into())
    }

    /// `characterIndexForPoint:`
    pub fn character_index_for_point(&mut self, point: NSPoint) -> usize {
        let point = self.point(point);
        let Some(mut bridge) = self.context.text_input() else {
            tracing::warn!("received `characterIndexForPoint:` without a text input context");
            return NS_NOT_FOUND;
        };
        bridge.character_index_at_point(point).unwrap_or(NS_NOT_FOUND)
    }
}
