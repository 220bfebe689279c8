use crate::error::{Result, check_position};
use crate::traits::TextDocument;
use crate::types::{Point, SelectionKind, TextRange};

/// One pointer gesture that selects text.
///
/// The selection at pointer-down is fixed for the whole gesture; each drag
/// step unions it with the expanded hit under the pointer, so the selection
/// can both grow and shrink back toward where the gesture began.
#[derive(Debug, Clone)]
pub struct DragSelection {
    pointer_id: u32,
    kind: SelectionKind,
    original: TextRange,
    tracking: bool,
}

impl DragSelection {
    pub fn new(pointer_id: u32, kind: SelectionKind) -> Self {
        Self {
            pointer_id,
            kind,
            original: TextRange::default(),
            tracking: false,
        }
    }

    pub fn pointer_id(&self) -> u32 {
        self.pointer_id
    }

    pub fn kind(&self) -> SelectionKind {
        self.kind
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Start tracking. With `extend` the hit is unioned with `existing`,
    /// which also becomes the gesture's origin.
    pub fn down<D: TextDocument + ?Sized>(
        &mut self,
        doc: &D,
        point: Point,
        existing: TextRange,
        extend: bool,
    ) -> Result<TextRange> {
        let hit = self.expand_at(doc, point)?;
        self.tracking = true;
        if extend {
            self.original = existing;
            Ok(TextRange::union(existing, hit))
        } else {
            self.original = hit;
            Ok(hit)
        }
    }

    /// Selection for the pointer now being at `point`. `None` when the
    /// gesture is not tracking.
    pub fn drag<D: TextDocument + ?Sized>(
        &mut self,
        doc: &D,
        point: Point,
    ) -> Result<Option<TextRange>> {
        if !self.tracking {
            return Ok(None);
        }
        let hit = self.expand_at(doc, point)?;
        Ok(Some(TextRange::union(self.original, hit)))
    }

    pub fn up(&mut self, _point: Point) {
        self.tracking = false;
    }

    pub fn cancel(&mut self) {
        self.tracking = false;
    }

    fn expand_at<D: TextDocument + ?Sized>(&self, doc: &D, point: Point) -> Result<TextRange> {
        let pos = doc.hit_test(point);
        check_position(pos.index, doc.len())?;
        let range = match self.kind {
            SelectionKind::None => TextRange::at(pos),
            kind => doc.selection_range(pos, kind),
        };
        Ok(range.clamp(doc.len()))
    }
}
