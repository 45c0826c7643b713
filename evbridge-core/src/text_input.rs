//! Text state exposed to input methods.
//!
//! The upstream core owns the text being edited. The bridge only queries and updates ranges of
//! it through [`TextInputEdit`], which speaks UTF-8 byte offsets. Input methods speak UTF-16
//! code units, expressed as [`TextRange`]; the conversion happens in the text-input bridge.

use std::ops::Range;

use dpi::{LogicalPosition, LogicalSize};

use crate::event::Point;

/// A half-open range of UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextRange {
    pub start: usize,
    pub len: usize,
}

impl TextRange {
    #[inline]
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// The exclusive end, saturating at `usize::MAX`.
    #[inline]
    pub const fn end(&self) -> usize {
        self.start.saturating_add(self.len)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

impl From<Range<usize>> for TextRange {
    fn from(range: Range<usize>) -> Self {
        Self { start: range.start, len: range.end.saturating_sub(range.start) }
    }
}

/// A rectangle in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextRect {
    /// The top-left corner.
    pub position: LogicalPosition<f64>,
    pub size: LogicalSize<f64>,
}

impl TextRect {
    pub fn new(position: LogicalPosition<f64>, size: LogicalSize<f64>) -> Self {
        Self { position, size }
    }
}

/// Read and write access to the text of a composing context.
///
/// All offsets are UTF-8 byte offsets into the text and must lie on `char` boundaries.
/// Implementations may assume the bridge never passes an offset past [`len`](Self::len).
pub trait TextInputEdit {
    /// The selection. `start` may be greater than `end` for a backward selection.
    fn selected_range(&mut self) -> Range<usize>;

    fn set_selected_range(&mut self, range: Range<usize>);

    /// The range of the text that is being composed, if any.
    fn composition_range(&mut self) -> Option<Range<usize>>;

    fn set_composition_range(&mut self, range: Option<Range<usize>>);

    fn replace(&mut self, range: Range<usize>, text: &str);

    fn slice(&mut self, range: Range<usize>) -> String;

    /// The largest `char` boundary not greater than `i`.
    fn floor_index(&mut self, i: usize) -> usize;

    /// The length of the text in bytes.
    fn len(&mut self) -> usize;

    fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    /// The bounding rectangle of the first line of `range`.
    ///
    /// Returns the rectangle and the end of the prefix of `range` it covers, which may be
    /// shorter than `range` when it spans multiple lines.
    fn slice_bounds(&mut self, range: Range<usize>) -> (TextRect, usize);

    /// The offset of the character at `point`, if there is one.
    fn index_from_point(&mut self, point: Point) -> Option<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_conversions() {
        let range = TextRange::new(3, 4);
        assert_eq!(range.end(), 7);
        assert_eq!(range.as_range(), 3..7);
        assert_eq!(TextRange::from(2..1), TextRange::new(2, 0));
        assert_eq!(TextRange::new(usize::MAX, 5).end(), usize::MAX);
    }
}
