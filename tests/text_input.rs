use std::ops::Range;

use evbridge::dpi::{LogicalPosition, LogicalSize};
use evbridge::event::Point;
use evbridge::listener::WindowListener;
use evbridge::text_input::{TextInputEdit, TextRange, TextRect};
use evbridge::window::{WindowAttributes, WindowHandle, WindowId};
use evbridge::{thread, WindowContext};

struct Document {
    text: String,
    selection: Range<usize>,
    composition: Option<Range<usize>>,
    editable: bool,
}

impl Document {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            selection: text.len()..text.len(),
            composition: None,
            editable: true,
        }
    }
}

impl TextInputEdit for Document {
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
        let rect = TextRect::new(LogicalPosition::new(0.0, 0.0), LogicalSize::new(1.0, 1.0));
        (rect, range.end)
    }

    fn index_from_point(&mut self, _: Point) -> Option<usize> {
        None
    }
}

impl WindowListener for Document {
    fn text_input(&mut self, _: WindowId) -> Option<&mut dyn TextInputEdit> {
        if self.editable {
            Some(self)
        } else {
            None
        }
    }
}

fn window(document: Document) -> WindowContext {
    WindowContext::new(
        thread::bootstrap(),
        WindowHandle::detached(WindowId::dummy()),
        WindowAttributes::default(),
        Box::new(document),
    )
}

#[test]
fn text_in_range_returns_what_it_used() {
    let text = "a😀b日";
    let units: Vec<u16> = text.encode_utf16().collect();
    let mut cx = window(Document::new(text));
    let mut bridge = cx.text_input().unwrap();

    for start in 0..8 {
        for len in 0..8 {
            let (slice, actual) = bridge.text_in_range(TextRange::new(start, len));
            let context = format!("requested {start}+{len}, got {actual:?}");

            assert!(actual.start <= start, "{context}");
            assert!(actual.end() <= units.len(), "{context}");
            // Never splits the surrogate pair at 1..3.
            assert_ne!(actual.start, 2, "{context}");
            assert_ne!(actual.end(), 2, "{context}");
            assert_eq!(
                slice.encode_utf16().collect::<Vec<_>>(),
                units[actual.start..actual.end()],
                "{context}"
            );
        }
    }
}

#[test]
fn edits_go_through_the_listener_buffer() {
    let mut cx = window(Document::new("x"));
    assert!(cx.has_composing_context());

    let mut bridge = cx.text_input().unwrap();
    bridge.set_composing_text("😀", TextRange::new(2, 0), None);
    assert_eq!(bridge.composing_range(), Some(TextRange::new(1, 2)));
    assert_eq!(bridge.selected_range(), TextRange::new(3, 0));

    assert!(bridge.insert_text("y", None));
    assert_eq!(bridge.composing_range(), None);
    assert_eq!(bridge.text_in_range(TextRange::new(0, 100)), ("xy".to_owned(), TextRange::new(0, 2)));

    assert!(!bridge.insert_text("\u{7}", None));
    assert_eq!(bridge.text_in_range(TextRange::new(0, 100)).0, "xy");
}

#[test]
fn no_composing_context() {
    let mut cx = window(Document { editable: false, ..Document::new("x") });
    assert!(!cx.has_composing_context());
    assert!(cx.text_input().is_none());
}

#[test]
fn closed_window_has_no_composing_context() {
    let mut cx = window(Document::new("x"));
    cx.close();
    assert!(!cx.has_composing_context());
}
