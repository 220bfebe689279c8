use caret_mini::traits::{EditableDocument, TextDocument};
use caret_mini::types::{
    CaretPosition, DocumentChangeInfo, EditSemantics, LINE_BREAK, NavigationKind, PARAGRAPH_BREAK,
    Point, Rect, SelectionKind, TextRange, UnderlineSpan,
};
use ropey::Rope;
use unicode_segmentation::UnicodeSegmentation;

pub const LINE_HEIGHT: f32 = 10.0;
pub const CHAR_WIDTH: f32 = 1.0;

fn is_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | LINE_BREAK | PARAGRAPH_BREAK)
}

#[derive(Debug, Clone)]
struct Edit {
    index: usize,
    removed: String,
    inserted: String,
    semantics: EditSemantics,
}

#[derive(Debug, Clone)]
struct Composition {
    start: usize,
    len: usize,
    original: String,
}

/// Monospace, unwrapped document: one visual line per hard or soft break,
/// every code point one unit wide.
pub struct MockDocument {
    rope: Rope,
    undo_stack: Vec<Vec<Edit>>,
    redo_stack: Vec<Vec<Edit>>,
    sealed: bool,
    composition: Option<Composition>,
    pub underlines: Vec<UnderlineSpan>,
}

impl MockDocument {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            sealed: true,
            composition: None,
            underlines: Vec::new(),
        }
    }

    pub fn content(&self) -> String {
        self.rope.to_string()
    }

    /// Replace the whole text without recording undo.
    pub fn set_content(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.composition = None;
    }

    fn line_start(&self, line: usize) -> usize {
        self.rope.line_to_char(line)
    }

    /// Code points on `line`, not counting its break.
    fn line_len(&self, line: usize) -> usize {
        let slice = self.rope.line(line);
        let mut len = slice.len_chars();
        if len > 0 && is_break(slice.char(len - 1)) {
            len -= 1;
            if len > 0 && slice.char(len) == '\n' && slice.char(len - 1) == '\r' {
                len -= 1;
            }
        }
        len
    }

    fn last_line(&self) -> usize {
        self.rope.len_lines().saturating_sub(1)
    }

    fn line_col(&self, index: usize) -> (usize, usize) {
        let index = index.min(self.rope.len_chars());
        let line = self.rope.char_to_line(index);
        (line, index - self.line_start(line))
    }

    fn at_line(&self, line: usize, x: f32) -> usize {
        let col = (x / CHAR_WIDTH).round().max(0.0) as usize;
        self.line_start(line) + col.min(self.line_len(line))
    }

    /// Char ranges of unicode word-boundary segments.
    fn segments(&self) -> Vec<(usize, usize, bool)> {
        let text = self.rope.to_string();
        text.split_word_bound_indices()
            .map(|(byte, seg)| {
                let start = self.rope.byte_to_char(byte);
                let end = start + seg.chars().count();
                let is_word = !seg.chars().all(|c| c.is_whitespace() || is_break(c));
                (start, end, is_word)
            })
            .collect()
    }

    fn vertical(
        &self,
        from: usize,
        lines: isize,
        ghost: Option<f32>,
    ) -> (CaretPosition, Option<f32>) {
        let (line, col) = self.line_col(from);
        let x = ghost.unwrap_or(col as f32 * CHAR_WIDTH);
        let target = (line as isize + lines).clamp(0, self.last_line() as isize) as usize;
        if target == line {
            return (CaretPosition::new(from), Some(x));
        }
        (CaretPosition::new(self.at_line(target, x)), Some(x))
    }

    fn splice(&mut self, start: usize, end: usize, text: &str) {
        self.rope.remove(start..end);
        self.rope.insert(start, text);
    }

    fn record(&mut self, edit: Edit) {
        self.redo_stack.clear();
        let single = edit.removed.chars().count() + edit.inserted.chars().count() == 1;
        let coalesce = !self.sealed
            && single
            && self.undo_stack.last().and_then(|g| g.last()).is_some_and(|last| {
                last.semantics == edit.semantics
                    && last.removed.chars().count() + last.inserted.chars().count() == 1
            });
        if coalesce {
            if let Some(group) = self.undo_stack.last_mut() {
                group.push(edit);
            }
        } else {
            self.undo_stack.push(vec![edit]);
        }
        self.sealed = false;
    }
}

impl TextDocument for MockDocument {
    fn len(&self) -> usize {
        self.rope.len_chars()
    }

    fn navigate(
        &self,
        from: CaretPosition,
        kind: NavigationKind,
        viewport_height: f32,
        ghost_column: Option<f32>,
    ) -> (CaretPosition, Option<f32>) {
        let len = self.len();
        let idx = from.index.min(len);
        let page = ((viewport_height / LINE_HEIGHT) as isize).max(1);
        let pos = match kind {
            NavigationKind::None => idx,
            NavigationKind::CharacterLeft => idx.saturating_sub(1),
            NavigationKind::CharacterRight => (idx + 1).min(len),
            NavigationKind::WordLeft => self
                .segments()
                .into_iter()
                .filter(|(start, _, word)| *word && *start < idx)
                .map(|(start, _, _)| start)
                .last()
                .unwrap_or(0),
            NavigationKind::WordRight => self
                .segments()
                .into_iter()
                .find(|(start, _, word)| *word && *start > idx)
                .map(|(start, _, _)| start)
                .unwrap_or(len),
            NavigationKind::LineUp => return self.vertical(idx, -1, ghost_column),
            NavigationKind::LineDown => return self.vertical(idx, 1, ghost_column),
            NavigationKind::PageUp => return self.vertical(idx, -page, ghost_column),
            NavigationKind::PageDown => return self.vertical(idx, page, ghost_column),
            NavigationKind::LineHome => self.line_start(self.line_col(idx).0),
            NavigationKind::LineEnd => {
                let line = self.line_col(idx).0;
                self.line_start(line) + self.line_len(line)
            }
            NavigationKind::DocumentHome => 0,
            NavigationKind::DocumentEnd => len,
        };
        (CaretPosition::new(pos), None)
    }

    fn text(&self, range: TextRange) -> String {
        let range = range.clamp(self.len());
        self.rope.slice(range.min()..range.max()).to_string()
    }

    fn hit_test(&self, point: Point) -> CaretPosition {
        let line = ((point.y / LINE_HEIGHT).floor().max(0.0) as usize).min(self.last_line());
        CaretPosition::new(self.at_line(line, point.x))
    }

    fn selection_range(&self, at: CaretPosition, kind: SelectionKind) -> TextRange {
        let len = self.len();
        let idx = at.index.min(len);
        match kind {
            SelectionKind::None => TextRange::at(at),
            SelectionKind::Word => self
                .segments()
                .into_iter()
                .find(|(start, end, _)| *start <= idx && idx < *end)
                .or_else(|| self.segments().into_iter().last())
                .map(|(start, end, _)| TextRange::new(start, end))
                .unwrap_or_else(|| TextRange::caret(idx)),
            SelectionKind::Line => {
                let line = self.line_col(idx).0;
                let start = self.line_start(line);
                TextRange::new(start, start + self.rope.line(line).len_chars())
            }
            SelectionKind::Paragraph => {
                let chars: Vec<char> = self.rope.chars().collect();
                let start = chars[..idx]
                    .iter()
                    .rposition(|c| *c == PARAGRAPH_BREAK || *c == '\n')
                    .map_or(0, |p| p + 1);
                let end = chars[idx..]
                    .iter()
                    .position(|c| *c == PARAGRAPH_BREAK || *c == '\n')
                    .map_or(len, |p| idx + p + 1);
                TextRange::new(start, end)
            }
        }
    }

    fn caret_geometry(&self, at: CaretPosition) -> Rect {
        let (line, col) = self.line_col(at.index);
        Rect {
            x: col as f32 * CHAR_WIDTH,
            y: line as f32 * LINE_HEIGHT,
            width: CHAR_WIDTH,
            height: LINE_HEIGHT,
        }
    }

    fn measured_extent(&self) -> f32 {
        self.rope.len_lines() as f32 * LINE_HEIGHT
    }

    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

impl EditableDocument for MockDocument {
    fn replace_text(
        &mut self,
        range: TextRange,
        text: &str,
        semantics: EditSemantics,
    ) -> DocumentChangeInfo {
        let range = range.clamp(self.len());
        let (start, end) = (range.min(), range.max());
        let removed = self.rope.slice(start..end).to_string();
        self.splice(start, end, text);
        self.record(Edit {
            index: start,
            removed,
            inserted: text.to_string(),
            semantics,
        });
        let info = DocumentChangeInfo {
            index: start,
            old_len: end - start,
            new_len: text.chars().count(),
            semantics,
            is_undoing: false,
            ime_caret_offset: 0,
        };
        // another view typing ahead of a live composition moves it
        if let Some(comp) = self.composition.as_mut() {
            comp.start = info.adjust_index(comp.start);
        }
        info
    }

    fn undo(&mut self) -> Vec<DocumentChangeInfo> {
        let Some(group) = self.undo_stack.pop() else {
            return vec![];
        };
        let mut infos = Vec::with_capacity(group.len());
        for edit in group.iter().rev() {
            let inserted = edit.inserted.chars().count();
            self.splice(edit.index, edit.index + inserted, &edit.removed);
            infos.push(DocumentChangeInfo {
                index: edit.index,
                old_len: inserted,
                new_len: edit.removed.chars().count(),
                semantics: edit.semantics,
                is_undoing: true,
                ime_caret_offset: 0,
            });
        }
        self.redo_stack.push(group);
        self.sealed = true;
        infos
    }

    fn redo(&mut self) -> Vec<DocumentChangeInfo> {
        let Some(group) = self.redo_stack.pop() else {
            return vec![];
        };
        let mut infos = Vec::with_capacity(group.len());
        for edit in &group {
            let removed = edit.removed.chars().count();
            self.splice(edit.index, edit.index + removed, &edit.inserted);
            infos.push(DocumentChangeInfo {
                index: edit.index,
                old_len: removed,
                new_len: edit.inserted.chars().count(),
                semantics: edit.semantics,
                is_undoing: false,
                ime_caret_offset: 0,
            });
        }
        self.undo_stack.push(group);
        self.sealed = true;
        infos
    }

    fn seal_undo(&mut self) {
        self.sealed = true;
    }

    fn start_composition(&mut self, selection: TextRange) {
        let selection = selection.clamp(self.len());
        self.sealed = true;
        self.composition = Some(Composition {
            start: selection.min(),
            len: selection.len(),
            original: self.text(selection),
        });
    }

    fn update_composition(
        &mut self,
        text: &str,
        caret_offset: usize,
        underlines: &[UnderlineSpan],
    ) -> DocumentChangeInfo {
        let comp = self.composition.get_or_insert(Composition {
            start: 0,
            len: 0,
            original: String::new(),
        });
        let (start, old_len) = (comp.start, comp.len);
        let new_len = text.chars().count();
        comp.len = new_len;
        self.splice(start, start + old_len, text);
        self.underlines = underlines.to_vec();
        DocumentChangeInfo {
            index: start,
            old_len,
            new_len,
            semantics: EditSemantics::ImeComposition,
            is_undoing: false,
            ime_caret_offset: caret_offset,
        }
    }

    fn finish_composition(&mut self) -> Option<DocumentChangeInfo> {
        let comp = self.composition.take()?;
        self.splice(comp.start, comp.start + comp.len, &comp.original);
        self.underlines.clear();
        Some(DocumentChangeInfo {
            index: comp.start,
            old_len: comp.len,
            new_len: comp.original.chars().count(),
            semantics: EditSemantics::ImeComposition,
            is_undoing: true,
            ime_caret_offset: 0,
        })
    }
}
