use crate::traits::{TextDocument, ViewHost};
use crate::types::TextRange;

/// Owns a view's selection and its vertical-navigation ghost column.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selection: TextRange,
    ghost_column: Option<f32>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> TextRange {
        self.selection
    }

    pub fn ghost_column(&self) -> Option<f32> {
        self.ghost_column
    }

    /// Replace the selection, clamped to the document. Clears the ghost
    /// column. Returns the range actually applied.
    pub fn set_selection<D, H>(
        &mut self,
        doc: &D,
        host: &mut H,
        range: TextRange,
        fire_event: bool,
    ) -> TextRange
    where
        D: TextDocument + ?Sized,
        H: ViewHost + ?Sized,
    {
        self.commit(doc, host, range, None, fire_event)
    }

    /// Like [`set_selection`](Self::set_selection) but keeps `ghost_column`
    /// for the next vertical step.
    pub fn set_selection_with_ghost<D, H>(
        &mut self,
        doc: &D,
        host: &mut H,
        range: TextRange,
        ghost_column: Option<f32>,
    ) -> TextRange
    where
        D: TextDocument + ?Sized,
        H: ViewHost + ?Sized,
    {
        self.commit(doc, host, range, ghost_column, true)
    }

    pub fn select_all<D, H>(&mut self, doc: &D, host: &mut H) -> TextRange
    where
        D: TextDocument + ?Sized,
        H: ViewHost + ?Sized,
    {
        self.set_selection(doc, host, TextRange::new(0, doc.len()), true)
    }

    /// Forget the selection without notifying anyone. Used when the
    /// document is replaced wholesale.
    pub(crate) fn reset(&mut self) {
        self.selection = TextRange::default();
        self.ghost_column = None;
    }

    fn commit<D, H>(
        &mut self,
        doc: &D,
        host: &mut H,
        range: TextRange,
        ghost_column: Option<f32>,
        fire_event: bool,
    ) -> TextRange
    where
        D: TextDocument + ?Sized,
        H: ViewHost + ?Sized,
    {
        let clamped = range.clamp(doc.len());
        let previous = self.selection;
        self.selection = clamped;
        self.ghost_column = ghost_column;

        // A collapsed caret moving to another collapsed caret paints nothing new.
        if previous.is_range() || clamped.is_range() {
            host.invalidate();
        }

        let caret = doc.caret_geometry(clamped.caret_position());
        host.place_caret(caret);
        host.ensure_visible(caret);

        if fire_event {
            host.selection_changed(clamped);
        }
        tracing::trace!(start = clamped.start, end = clamped.end, "selection set");
        clamped
    }
}
