//! Text-input bridge.
//!
//! Input methods address text in UTF-16 code units; the upstream core speaks UTF-8 byte
//! offsets through [`TextInputEdit`]. [`TextInputBridge`] converts between the two and
//! implements the composition operations every backend needs on top of the plain edit calls.
//!
//! Requested ranges that fall outside the text are clamped rather than rejected. A boundary
//! inside a surrogate pair is rounded down to the start of the pair. Every query that takes a
//! range returns the range it actually used, which callers must use instead of the requested
//! one.

use std::cmp::min;
use std::ops::Range;

use evbridge_core::event::Point;
use evbridge_core::text_input::{TextInputEdit, TextRange, TextRect};

/// The number of UTF-16 code units needed to encode `s`.
pub fn utf16_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}

/// The result of [`find_utf16_pos`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Utf16Pos {
    /// The UTF-8 offset of the position, rounded down to a `char` boundary.
    pub utf8_cursor: usize,
    /// The part of the requested UTF-16 position that could not be consumed.
    ///
    /// `1` when the position falls inside a surrogate pair, the overshoot when it lies past the
    /// end of the string, `0` otherwise.
    pub utf16_extra: usize,
}

/// Convert a UTF-16 position in `s` to a UTF-8 offset.
pub fn find_utf16_pos(mut utf16_pos: usize, s: &str) -> Utf16Pos {
    let mut utf8_cursor = 0;
    for c in s.chars() {
        let units = c.len_utf16();
        if utf16_pos < units {
            break;
        }
        utf16_pos -= units;
        utf8_cursor += c.len_utf8();
    }
    Utf16Pos { utf8_cursor, utf16_extra: utf16_pos }
}

fn sort_range(range: Range<usize>) -> Range<usize> {
    if range.start > range.end {
        range.end..range.start
    } else {
        range
    }
}

/// Whether an IME may insert `text`. Control characters other than `\r` are refused.
pub fn is_insertable(text: &str) -> bool {
    !text.bytes().any(|b| b.is_ascii_control() && b != b'\r')
}

/// UTF-16 view of the text of one composing context.
pub struct TextInputBridge<'a> {
    edit: &'a mut dyn TextInputEdit,
}

impl<'a> TextInputBridge<'a> {
    pub fn new(edit: &'a mut dyn TextInputEdit) -> Self {
        Self { edit }
    }

    /// Commit `text`.
    ///
    /// With `replace` set to `None`, the composition (or, if there is none, the selection) is
    /// replaced. The composition is cleared and the caret is placed after the inserted text.
    ///
    /// Returns `false` if `text` was refused.
    pub fn insert_text(&mut self, text: &str, replace: Option<TextRange>) -> bool {
        if !is_insertable(text) {
            tracing::warn!("rejecting inserted text containing a control character");
            return false;
        }

        let composition = self.edit.composition_range();
        let range = match replace {
            None => match composition {
                Some(range) => range,
                None => sort_range(self.edit.selected_range()),
            },
            Some(replace) => {
                if let Some(range) = composition {
                    tracing::warn!(
                        ?range,
                        "inserting at an explicit range while composing; dropping the composition"
                    );
                }
                self.convert_range_to_utf8(replace).0
            },
        };
        tracing::trace!(?range, text, "insert_text");

        self.edit.replace(range.clone(), text);
        self.edit.set_composition_range(None);

        let caret = range.start + text.len();
        self.edit.set_selected_range(caret..caret);
        true
    }

    /// Replace part of the composition with `text`, starting one if there is none.
    ///
    /// `replace` is relative to the current composition when there is one and to the whole
    /// text otherwise; `None` stands for the whole composition (or the selection). `selection`
    /// is relative to `text`.
    pub fn set_composing_text(
        &mut self,
        text: &str,
        selection: TextRange,
        replace: Option<TextRange>,
    ) {
        let (composition, range) = match (self.edit.composition_range(), replace) {
            (Some(composition), None) => (composition.clone(), composition),
            (Some(composition), Some(replace)) => {
                let composed = self.edit.slice(composition.clone());
                let start = find_utf16_pos(replace.start, &composed).utf8_cursor;
                let end = start + find_utf16_pos(replace.len, &composed[start..]).utf8_cursor;
                let range = (composition.start + start)..(composition.start + end);
                (composition, range)
            },
            (None, None) => {
                let selection = sort_range(self.edit.selected_range());
                (selection.clone(), selection)
            },
            (None, Some(replace)) => {
                let range = self.convert_range_to_utf8(replace).0;
                (range.clone(), range)
            },
        };
        tracing::trace!(?composition, ?range, text, "set_composing_text");

        self.edit.replace(range.clone(), text);

        let end = composition.end - range.len() + text.len();
        let composition = Some(composition.start..end).filter(|r| !r.is_empty());
        self.edit.set_composition_range(composition);

        let start = find_utf16_pos(selection.start, text).utf8_cursor;
        let end = start + find_utf16_pos(selection.len, &text[start..]).utf8_cursor;
        self.edit.set_selected_range((range.start + start)..(range.start + end));
    }

    /// End the composition, keeping its text.
    pub fn clear_composing_text(&mut self) {
        self.edit.set_composition_range(None);
    }

    pub fn selected_range(&mut self) -> TextRange {
        let range = sort_range(self.edit.selected_range());
        self.range_to_utf16(range)
    }

    pub fn composing_range(&mut self) -> Option<TextRange> {
        let range = self.edit.composition_range()?;
        Some(self.range_to_utf16(range))
    }

    /// The text in `range`, along with the range actually returned.
    pub fn text_in_range(&mut self, range: TextRange) -> (String, TextRange) {
        let (range_u8, actual, text) = self.convert_range_to_utf8(range);
        (text[range_u8].to_owned(), actual)
    }

    /// The bounding rectangle of the first line of `range`, along with the prefix of `range`
    /// it covers.
    pub fn bounding_rect_for_range(&mut self, range: TextRange) -> (TextRect, TextRange) {
        let (range_u8, actual, text) = self.convert_range_to_utf8(range);
        let (rect, head_end) = self.edit.slice_bounds(range_u8.clone());

        let head_end = if (range_u8.start..=range_u8.end).contains(&head_end) {
            head_end
        } else {
            tracing::warn!(?range_u8, head_end, "slice_bounds returned an end outside the range");
            head_end.clamp(range_u8.start, range_u8.end)
        };

        let len = utf16_len(&text[range_u8.start..head_end]);
        (rect, TextRange::new(actual.start, len))
    }

    /// The UTF-16 index of the character at `point`.
    pub fn character_index_at_point(&mut self, point: Point) -> Option<usize> {
        let i = self.edit.index_from_point(point)?;
        let len = self.edit.len();
        let i = self.edit.floor_index(min(i, len));
        Some(utf16_len(&self.edit.slice(0..i)))
    }

    fn range_to_utf16(&mut self, range: Range<usize>) -> TextRange {
        let prefix = self.edit.slice(0..range.end);
        let start = utf16_len(&prefix[..range.start]);
        TextRange::new(start, utf16_len(&prefix[range.start..]))
    }

    /// Convert a UTF-16 range to UTF-8, clamped to the text.
    ///
    /// Returns the UTF-8 range, the UTF-16 range it corresponds to, and a prefix of the text
    /// containing it.
    fn convert_range_to_utf8(&mut self, range: TextRange) -> (Range<usize>, TextRange, String) {
        let (start, end) = (range.start, range.end());

        // A UTF-16 unit takes at most three UTF-8 bytes, so no more text than this is needed.
        let aperture = min(end.saturating_mul(3), self.edit.len());
        let aperture = self.edit.floor_index(aperture);
        let text = self.edit.slice(0..aperture);

        let head = find_utf16_pos(start, &text);
        let start_u8 = head.utf8_cursor;
        let start_actual = start - head.utf16_extra;

        let tail = find_utf16_pos(end - start_actual, &text[start_u8..]);
        let end_u8 = start_u8 + tail.utf8_cursor;
        let end_actual = end - tail.utf16_extra;

        (start_u8..end_u8, TextRange::from(start_actual..end_actual), text)
    }
}

#[cfg(test)]
mod tests {
    use dpi::{LogicalPosition, LogicalSize};

    use super::*;

    /// A plain string buffer.
    #[derive(Default)]
    pub(crate) struct Buffer {
        pub text: String,
        pub selection: Range<usize>,
        pub composition: Option<Range<usize>>,
    }

    impl Buffer {
        fn new(text: &str) -> Self {
            Self { text: text.to_owned(), selection: text.len()..text.len(), composition: None }
        }
    }

    impl TextInputEdit for Buffer {
        fn selected_range(&mut self) -> Range<usize> {
            self.selection.clone()
        }

        fn set_selected_range(&mut self, range: Range<usize>) {
            self.selection = range;
        }

        fn composition_range(&mut self) -> Option<Range<usize>> {
            self.composition.clone()
        }

        fn set_composition_range(&mut self, range: Option<Range<usize>>) {
            self.composition = range;
        }

        fn replace(&mut self, range: Range<usize>, text: &str) {
            self.text.replace_range(range, text);
        }

        fn slice(&mut self, range: Range<usize>) -> String {
            self.text[range].to_owned()
        }

        fn floor_index(&mut self, mut i: usize) -> usize {
            while !self.text.is_char_boundary(i) {
                i -= 1;
            }
            i
        }

        fn len(&mut self) -> usize {
            self.text.len()
        }

        fn slice_bounds(&mut self, range: Range<usize>) -> (TextRect, usize) {
            // Every line holds at most four bytes.
            let end = min(range.end, (range.start / 4 + 1) * 4);
            let rect = TextRect::new(
                LogicalPosition::new(range.start as f64, 0.0),
                LogicalSize::new((end - range.start) as f64, 10.0),
            );
            (rect, end.max(range.start))
        }

        fn index_from_point(&mut self, point: Point) -> Option<usize> {
            (point.x >= 0.0).then_some(point.x as usize)
        }
    }

    #[test]
    fn utf16_positions() {
        assert_eq!(find_utf16_pos(2, "рыба"), Utf16Pos { utf8_cursor: 4, utf16_extra: 0 });
        assert_eq!(find_utf16_pos(7, "рыба"), Utf16Pos { utf8_cursor: 8, utf16_extra: 3 });
        assert_eq!(find_utf16_pos(1, "😀"), Utf16Pos { utf8_cursor: 0, utf16_extra: 1 });
        assert_eq!(utf16_len("a😀b"), 4);
    }

    #[test]
    fn text_in_range_is_clamped() {
        let mut buffer = Buffer::new("abc");
        let mut bridge = TextInputBridge::new(&mut buffer);

        assert_eq!(bridge.text_in_range(TextRange::new(2, 100)), ("c".to_owned(), TextRange::new(2, 1)));
        assert_eq!(bridge.text_in_range(TextRange::new(10, 5)), (String::new(), TextRange::new(3, 0)));
    }

    #[test]
    fn surrogate_pairs_round_down() {
        let mut buffer = Buffer::new("a😀b");
        let mut bridge = TextInputBridge::new(&mut buffer);
        assert_eq!(bridge.text_in_range(TextRange::new(2, 1)), ("😀".to_owned(), TextRange::new(1, 2)));
    }

    #[test]
    fn composition_then_commit() {
        let mut buffer = Buffer::new("x");
        let mut bridge = TextInputBridge::new(&mut buffer);

        bridge.set_composing_text("に", TextRange::new(1, 0), None);
        assert_eq!(bridge.composing_range(), Some(TextRange::new(1, 1)));
        assert_eq!(bridge.selected_range(), TextRange::new(2, 0));

        bridge.set_composing_text("にほ", TextRange::new(2, 0), None);
        assert_eq!(bridge.composing_range(), Some(TextRange::new(1, 2)));

        assert!(bridge.insert_text("日本", None));
        assert_eq!(bridge.composing_range(), None);
        assert_eq!(bridge.selected_range(), TextRange::new(3, 0));
        assert_eq!(buffer.text, "x日本");
    }

    #[test]
    fn partial_replacement_inside_composition() {
        let mut buffer = Buffer::new("");
        let mut bridge = TextInputBridge::new(&mut buffer);
        bridge.set_composing_text("abcd", TextRange::new(4, 0), None);
        bridge.set_composing_text("X", TextRange::new(1, 0), Some(TextRange::new(1, 2)));
        assert_eq!(bridge.composing_range(), Some(TextRange::new(0, 3)));
        assert_eq!(bridge.selected_range(), TextRange::new(2, 0));
        assert_eq!(buffer.text, "aXd");
    }

    #[test]
    fn empty_composition_is_cleared() {
        let mut buffer = Buffer::new("ab");
        let mut bridge = TextInputBridge::new(&mut buffer);
        bridge.set_composing_text("k", TextRange::new(1, 0), None);
        bridge.set_composing_text("", TextRange::new(0, 0), None);
        assert_eq!(bridge.composing_range(), None);
        assert_eq!(buffer.text, "ab");
    }

    #[test]
    fn control_characters_are_refused() {
        let mut buffer = Buffer::new("ab");
        let mut bridge = TextInputBridge::new(&mut buffer);
        assert!(!bridge.insert_text("\u{8}", None));
        assert!(bridge.insert_text("\r", None));
        assert_eq!(buffer.text, "ab\r");
    }

    #[test]
    fn rect_covers_first_line() {
        let mut buffer = Buffer::new("abcdefgh");
        let mut bridge = TextInputBridge::new(&mut buffer);
        let (rect, actual) = bridge.bounding_rect_for_range(TextRange::new(2, 5));
        assert_eq!(actual, TextRange::new(2, 2));
        assert_eq!(rect.size.width, 2.0);
    }

    #[test]
    fn index_at_point_is_utf16() {
        let mut buffer = Buffer::new("😀😀");
        let mut bridge = TextInputBridge::new(&mut buffer);
        assert_eq!(bridge.character_index_at_point(LogicalPosition::new(4.0, 0.0)), Some(2));
        assert_eq!(bridge.character_index_at_point(LogicalPosition::new(6.0, 0.0)), Some(2));
        assert_eq!(bridge.character_index_at_point(LogicalPosition::new(100.0, 0.0)), Some(4));
        assert_eq!(bridge.character_index_at_point(LogicalPosition::new(-1.0, 0.0)), None);
    }
}
