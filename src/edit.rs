//! Turns user editing actions into document commands.

use crate::error::{Result, check_position};
use crate::traits::{Clipboard, TextDocument};
use crate::types::{
    CaretPosition, Command, EditSemantics, LINE_BREAK, NavigationKind, PARAGRAPH_BREAK, TextRange,
};

/// Control characters never reach the document as typed text.
pub fn is_rejected_char(ch: char) -> bool {
    (ch as u32) < 0x20 || ch == '\u{7f}'
}

fn is_break(ch: char) -> bool {
    matches!(ch, PARAGRAPH_BREAK | LINE_BREAK | '\n' | '\r')
}

/// Map CRLF, lone LF and lone CR to paragraph breaks.
pub fn import_line_endings(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push(PARAGRAPH_BREAK);
            }
            '\n' => out.push(PARAGRAPH_BREAK),
            _ => out.push(ch),
        }
    }
    out
}

/// Map break characters to plain newlines for text leaving the editor.
pub fn export_line_endings(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            PARAGRAPH_BREAK | LINE_BREAK => '\n',
            _ => ch,
        })
        .collect()
}

/// Produces exactly one edit per user action and owns overtype state.
#[derive(Debug, Clone, Default)]
pub struct EditDispatcher {
    overtype: bool,
}

impl EditDispatcher {
    pub fn new(overtype: bool) -> Self {
        Self { overtype }
    }

    pub fn is_overtype(&self) -> bool {
        self.overtype
    }

    /// Flip overtype mode, returning the new state.
    pub fn toggle_overtype(&mut self) -> bool {
        self.overtype = !self.overtype;
        self.overtype
    }

    /// Replace the selection with typed text.
    pub fn type_text<D: TextDocument + ?Sized>(
        &self,
        doc: &D,
        selection: TextRange,
        text: &str,
    ) -> Result<Option<Command>> {
        if text.is_empty() {
            return Ok(None);
        }
        let (range, semantics) = if self.overtype {
            (self.overtype_range(doc, selection, text)?, EditSemantics::Overtype)
        } else {
            (selection, EditSemantics::Typing)
        };
        Ok(Some(Command::ReplaceText {
            range,
            text: text.to_string(),
            semantics,
        }))
    }

    /// Insert a paragraph break, or a line break when `soft`.
    pub fn insert_break<D: TextDocument + ?Sized>(
        &self,
        doc: &D,
        selection: TextRange,
        soft: bool,
    ) -> Result<Option<Command>> {
        let brk = if soft { LINE_BREAK } else { PARAGRAPH_BREAK };
        self.type_text(doc, selection, brk.encode_utf8(&mut [0; 4]))
    }

    pub fn delete_forward<D: TextDocument + ?Sized>(
        &self,
        doc: &D,
        selection: TextRange,
    ) -> Result<Option<Command>> {
        self.delete(doc, selection, NavigationKind::CharacterRight, EditSemantics::ForwardDelete)
    }

    pub fn backspace<D: TextDocument + ?Sized>(
        &self,
        doc: &D,
        selection: TextRange,
    ) -> Result<Option<Command>> {
        self.delete(doc, selection, NavigationKind::CharacterLeft, EditSemantics::Backspace)
    }

    /// Export the selection. Returns whether anything was captured.
    pub fn copy<D, C>(&self, doc: &D, selection: TextRange, masked: bool, clipboard: &mut C) -> bool
    where
        D: TextDocument + ?Sized,
        C: Clipboard + ?Sized,
    {
        if masked {
            tracing::debug!("copy refused in masked mode");
            return false;
        }
        if !selection.is_range() {
            return false;
        }
        clipboard.export_text(export_line_endings(&doc.text(selection)));
        true
    }

    pub fn cut<D, C>(
        &self,
        doc: &D,
        selection: TextRange,
        masked: bool,
        clipboard: &mut C,
    ) -> Result<Option<Command>>
    where
        D: TextDocument + ?Sized,
        C: Clipboard + ?Sized,
    {
        if !self.copy(doc, selection, masked, clipboard) {
            return Ok(None);
        }
        self.delete_forward(doc, selection)
    }

    /// Replace the selection with clipboard text as one sealed undo unit.
    /// The unit is closed on both sides so the paste never merges with
    /// typing before or after it.
    pub fn paste<C: Clipboard + ?Sized>(
        &self,
        selection: TextRange,
        clipboard: &mut C,
    ) -> Vec<Command> {
        let text = match clipboard.import_text() {
            Some(text) if !text.is_empty() => import_line_endings(&text),
            _ => {
                tracing::debug!("paste with empty clipboard");
                return vec![];
            }
        };
        vec![
            Command::SealUndo,
            Command::ReplaceText {
                range: selection,
                text,
                semantics: EditSemantics::Typing,
            },
            Command::SealUndo,
        ]
    }

    pub fn undo<D: TextDocument + ?Sized>(&self, doc: &D) -> Option<Command> {
        doc.can_undo().then_some(Command::Undo)
    }

    pub fn redo<D: TextDocument + ?Sized>(&self, doc: &D) -> Option<Command> {
        doc.can_redo().then_some(Command::Redo)
    }

    fn delete<D: TextDocument + ?Sized>(
        &self,
        doc: &D,
        selection: TextRange,
        direction: NavigationKind,
        semantics: EditSemantics,
    ) -> Result<Option<Command>> {
        let range = if selection.is_range() {
            selection
        } else {
            let (pos, _) = doc.navigate(selection.caret_position(), direction, 0.0, None);
            check_position(pos.index, doc.len())?;
            TextRange::new(selection.end, pos.index)
        };
        if !range.is_range() {
            tracing::trace!(?semantics, "delete at document boundary");
            return Ok(None);
        }
        Ok(Some(Command::ReplaceText {
            range,
            text: String::new(),
            semantics,
        }))
    }

    /// Overtype swallows the character after a collapsed caret, unless that
    /// character is a break or the caret is at the end of the document.
    fn overtype_range<D: TextDocument + ?Sized>(
        &self,
        doc: &D,
        selection: TextRange,
        text: &str,
    ) -> Result<TextRange> {
        if selection.is_range() || text.chars().any(is_break) {
            return Ok(selection);
        }
        let from = CaretPosition::new(selection.end);
        let (pos, _) = doc.navigate(from, NavigationKind::CharacterRight, 0.0, None);
        check_position(pos.index, doc.len())?;
        let next = TextRange::new(selection.end, pos.index);
        if !next.is_range() || doc.text(next).chars().any(is_break) {
            return Ok(selection);
        }
        Ok(next)
    }
}
