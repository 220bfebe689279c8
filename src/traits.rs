use crate::types::{
    CaretPosition, DocumentChangeInfo, EditSemantics, NavigationKind, Point, Rect, SelectionKind,
    TextRange, UnderlineSpan,
};

/// Read access to a document and its layout.
///
/// All geometry (line wrapping, page height, word and character boundaries)
/// belongs to the implementor; the engine never measures text itself.
pub trait TextDocument {
    /// Length in code points.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve a navigation intent. `ghost_column` is the horizontal target
    /// remembered from the previous vertical step; the returned one is kept
    /// for the next.
    fn navigate(
        &self,
        from: CaretPosition,
        kind: NavigationKind,
        viewport_height: f32,
        ghost_column: Option<f32>,
    ) -> (CaretPosition, Option<f32>);

    /// Text covered by `range`, in document form (break characters intact).
    fn text(&self, range: TextRange) -> String;

    fn hit_test(&self, point: Point) -> CaretPosition;

    /// Expand a caret to the unit of `kind` that contains it.
    fn selection_range(&self, at: CaretPosition, kind: SelectionKind) -> TextRange;

    fn caret_geometry(&self, at: CaretPosition) -> Rect;

    /// Total laid-out height of the document.
    fn measured_extent(&self) -> f32;

    fn can_undo(&self) -> bool;
    fn can_redo(&self) -> bool;
}

/// Mutating side of a document.
///
/// Every method returns the atomic edits it performed so the caller can
/// broadcast them to all views.
pub trait EditableDocument: TextDocument {
    fn replace_text(
        &mut self,
        range: TextRange,
        text: &str,
        semantics: EditSemantics,
    ) -> DocumentChangeInfo;

    /// Revert the last undo unit. Empty when there is nothing to undo.
    fn undo(&mut self) -> Vec<DocumentChangeInfo>;

    fn redo(&mut self) -> Vec<DocumentChangeInfo>;

    /// Close the current undo unit so later edits cannot coalesce into it.
    fn seal_undo(&mut self);

    fn start_composition(&mut self, selection: TextRange);

    fn update_composition(
        &mut self,
        text: &str,
        caret_offset: usize,
        underlines: &[UnderlineSpan],
    ) -> DocumentChangeInfo;

    /// Remove the composition content and restore the text it replaced.
    fn finish_composition(&mut self) -> Option<DocumentChangeInfo>;
}

/// Callbacks a document view receives, in phase order, for every edit.
pub trait ChangeObserver<D: TextDocument + ?Sized> {
    fn on_will_change(&mut self, doc: &D);
    /// One atomic edit. `origin` is set for the view that caused it.
    fn on_change(&mut self, doc: &D, info: &DocumentChangeInfo, origin: bool);
    fn on_did_change(&mut self, doc: &D);
    /// The document content was replaced wholesale.
    fn on_reset(&mut self, doc: &D);
    fn on_redraw(&mut self) {}
}

/// Presentation collaborator of a single view.
pub trait ViewHost {
    /// Schedule a repaint of the text area.
    fn invalidate(&mut self);
    fn place_caret(&mut self, rect: Rect);
    /// Scroll so `rect` is on screen.
    fn ensure_visible(&mut self, rect: Rect);
    fn selection_changed(&mut self, _selection: TextRange) {}
    fn scroll_offset(&self) -> f32;
    fn set_scroll_offset(&mut self, offset: f32);
    fn viewport_height(&self) -> f32;
}

/// Data-transfer boundary for copy and paste.
pub trait Clipboard {
    fn import_text(&mut self) -> Option<String>;
    fn export_text(&mut self, text: String);
}
