use std::ops::Range;

/// Hard paragraph break inserted for the Enter key and for pasted line endings.
pub const PARAGRAPH_BREAK: char = '\u{2029}';

/// Soft line break inserted when Enter is pressed with the extend modifier.
pub const LINE_BREAK: char = '\u{2028}';

/// A caret location within a document.
///
/// The index is counted in Unicode code points. `alt_position` picks between
/// the two visual placements of an offset that sits on a soft line wrap (end
/// of line N vs. start of line N+1); it never takes part in offset arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaretPosition {
    /// Zero-based code point offset.
    pub index: usize,
    /// Use the alternate visual placement at a wrap boundary.
    pub alt_position: bool,
}

impl CaretPosition {
    /// The start of the document.
    pub const ZERO: CaretPosition = CaretPosition {
        index: 0,
        alt_position: false,
    };

    pub fn new(index: usize) -> Self {
        Self {
            index,
            alt_position: false,
        }
    }
}

/// A directional span of text.
///
/// `start` is the anchor and `end` is the active end where the caret is drawn.
/// When they are equal the range is a collapsed caret. Ranges are replaced
/// wholesale on every selection change and never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRange {
    /// The anchor of the selection.
    pub start: usize,
    /// The active end of the selection.
    pub end: usize,
    /// Visual placement of the active end at a wrap boundary.
    pub alt_position: bool,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            alt_position: false,
        }
    }

    /// A collapsed range at `index`.
    pub fn caret(index: usize) -> Self {
        Self::new(index, index)
    }

    /// A collapsed range at a caret position, keeping its visual placement.
    pub fn at(pos: CaretPosition) -> Self {
        Self {
            start: pos.index,
            end: pos.index,
            alt_position: pos.alt_position,
        }
    }

    pub fn is_range(&self) -> bool {
        self.start != self.end
    }

    pub fn anchor(&self) -> usize {
        self.start
    }

    pub fn active(&self) -> usize {
        self.end
    }

    /// Whether the anchor precedes (or equals) the active end.
    pub fn is_forward(&self) -> bool {
        self.start <= self.end
    }

    pub fn min(&self) -> usize {
        self.start.min(self.end)
    }

    pub fn max(&self) -> usize {
        self.start.max(self.end)
    }

    pub fn len(&self) -> usize {
        self.max() - self.min()
    }

    pub fn is_empty(&self) -> bool {
        !self.is_range()
    }

    /// The caret drawn at the active end.
    pub fn caret_position(&self) -> CaretPosition {
        CaretPosition {
            index: self.end,
            alt_position: self.alt_position,
        }
    }

    /// The covered interval as a half-open `Range`.
    pub fn span(&self) -> Range<usize> {
        self.min()..self.max()
    }

    /// Swap anchor and active end. The covered interval is unchanged.
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            alt_position: self.alt_position,
        }
    }

    /// Clip both endpoints into `[0, max_index]`.
    pub fn clamp(&self, max_index: usize) -> Self {
        Self {
            start: self.start.min(max_index),
            end: self.end.min(max_index),
            alt_position: self.alt_position,
        }
    }

    /// The smallest range covering both `a` and `b`.
    ///
    /// If `a`'s anchor is the lower bound of the result the union runs
    /// forward, otherwise it runs backward, so `a`'s direction survives
    /// whenever the covered interval allows it.
    pub fn union(a: TextRange, b: TextRange) -> TextRange {
        let lo = a.min().min(b.min());
        let hi = a.max().max(b.max());
        if a.start == lo {
            TextRange::new(lo, hi)
        } else {
            TextRange::new(hi, lo)
        }
    }

    /// Shift this range to account for an edit made elsewhere.
    ///
    /// Offsets before the edit are untouched, offsets inside the replaced
    /// span collapse to its start, offsets after it move by the length delta.
    pub fn adjust_for_edit(&self, info: &DocumentChangeInfo) -> Self {
        Self {
            start: info.adjust_index(self.start),
            end: info.adjust_index(self.end),
            alt_position: self.alt_position,
        }
    }
}

/// A navigation intent, resolved against layout by the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationKind {
    #[default]
    None,
    CharacterLeft,
    CharacterRight,
    WordLeft,
    WordRight,
    LineUp,
    LineDown,
    LineHome,
    LineEnd,
    PageUp,
    PageDown,
    DocumentHome,
    DocumentEnd,
}

impl NavigationKind {
    /// Kinds that move toward the start of the document.
    pub fn is_leftward(self) -> bool {
        matches!(
            self,
            NavigationKind::CharacterLeft
                | NavigationKind::WordLeft
                | NavigationKind::LineUp
                | NavigationKind::LineHome
                | NavigationKind::PageUp
                | NavigationKind::DocumentHome
        )
    }

    /// Kinds that keep the ghost column alive.
    pub fn is_vertical(self) -> bool {
        matches!(
            self,
            NavigationKind::LineUp
                | NavigationKind::LineDown
                | NavigationKind::PageUp
                | NavigationKind::PageDown
        )
    }
}

/// The user action an edit came from.
///
/// Views use it to compute their post-edit selection and the document's undo
/// log uses it to decide whether an edit coalesces with the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditSemantics {
    #[default]
    None,
    Typing,
    Backspace,
    ForwardDelete,
    Overtype,
    ImeComposition,
}

/// Granularity used when a selection is established from a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionKind {
    /// Caret only.
    #[default]
    None,
    Word,
    Line,
    Paragraph,
}

impl SelectionKind {
    /// Default gesture policy: the margin selects lines (paragraphs on double
    /// click), the content area places a caret (words on double click).
    pub fn for_gesture(double_click: bool, in_margin: bool) -> Self {
        match (in_margin, double_click) {
            (true, false) => SelectionKind::Line,
            (true, true) => SelectionKind::Paragraph,
            (false, true) => SelectionKind::Word,
            (false, false) => SelectionKind::None,
        }
    }
}

/// Description of one atomic edit, broadcast to every view of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentChangeInfo {
    /// Where the replaced span starts.
    pub index: usize,
    /// Length of the span before the edit.
    pub old_len: usize,
    /// Length of the span after the edit.
    pub new_len: usize,
    pub semantics: EditSemantics,
    /// The edit was produced by undo.
    pub is_undoing: bool,
    /// Caret offset inside an IME composition, relative to `index`.
    pub ime_caret_offset: usize,
}

impl DocumentChangeInfo {
    /// The selection the originating view should show after this edit.
    pub fn pending_selection(&self) -> TextRange {
        let idx = self.index;
        let inserted_end = idx + self.new_len;
        match (self.semantics, self.is_undoing) {
            (EditSemantics::None, _) => TextRange::new(idx, inserted_end),
            (EditSemantics::Backspace, false) => TextRange::caret(idx),
            (EditSemantics::Backspace, true) => TextRange::caret(inserted_end),
            (EditSemantics::ForwardDelete, _) => TextRange::caret(idx),
            (EditSemantics::Typing, false) => TextRange::caret(inserted_end),
            (EditSemantics::Typing, true) => TextRange::new(idx, inserted_end),
            (EditSemantics::Overtype, false) => TextRange::caret(inserted_end),
            (EditSemantics::Overtype, true) => TextRange::caret(idx),
            (EditSemantics::ImeComposition, false) => {
                TextRange::caret(idx + self.ime_caret_offset)
            }
            (EditSemantics::ImeComposition, true) => TextRange::new(idx, inserted_end),
        }
    }

    /// Where an offset observed before this edit lands after it.
    pub fn adjust_index(&self, index: usize) -> usize {
        if index <= self.index {
            index
        } else if index < self.index + self.old_len {
            self.index
        } else {
            index - self.old_len + self.new_len
        }
    }
}

/// A point in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Conversion state of an IME clause, as reported by the input method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseStyle {
    Input,
    Converted,
    TargetConverted,
    TargetNotConverted,
}

/// One styled clause of an in-progress composition. The range is in code
/// points relative to the start of the composition text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionClause {
    pub range: Range<usize>,
    pub style: ClauseStyle,
}

/// Underline presentation applied to composition text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnderlineStyle {
    Dotted,
    Thin,
    Thick,
    Dashed,
}

impl From<ClauseStyle> for UnderlineStyle {
    fn from(style: ClauseStyle) -> Self {
        match style {
            ClauseStyle::Input => UnderlineStyle::Dotted,
            ClauseStyle::Converted => UnderlineStyle::Thin,
            ClauseStyle::TargetConverted => UnderlineStyle::Thick,
            ClauseStyle::TargetNotConverted => UnderlineStyle::Dashed,
        }
    }
}

/// An underline to draw over part of the composition text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnderlineSpan {
    pub range: Range<usize>,
    pub style: UnderlineStyle,
}

/// Commands emitted by the engine for the host to execute.
///
/// These are the only way the engine mutates a document. The host applies
/// them in order, normally through [`ViewRegistry::apply`](crate::ViewRegistry::apply)
/// so every view sees the resulting change broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace `range` with `text`. An empty string deletes.
    ReplaceText {
        range: TextRange,
        text: String,
        semantics: EditSemantics,
    },
    /// Close the current undo unit.
    SealUndo,
    Undo,
    Redo,
    /// A composition starts over `selection`; the document snapshots it.
    StartComposition { selection: TextRange },
    /// Replace the in-progress composition content.
    UpdateComposition {
        text: String,
        caret_offset: usize,
        underlines: Vec<UnderlineSpan>,
    },
    /// Drop the composition content and restore the snapshot.
    FinishComposition,
}

impl Command {
    /// Whether applying this command can change document text.
    pub fn mutates(&self) -> bool {
        !matches!(self, Command::SealUndo | Command::StartComposition { .. })
    }
}
