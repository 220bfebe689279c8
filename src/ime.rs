//! Input method composition lifecycle.

use crate::types::{
    Command, CompositionClause, DocumentChangeInfo, EditSemantics, TextRange, UnderlineSpan,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Idle,
    Composing {
        /// Selection when the composition began.
        snapshot: TextRange,
        /// Code point length of the current composition text.
        len: usize,
        caret_offset: usize,
    },
}

/// Tracks an in-progress composition for one view.
#[derive(Debug, Clone, Default)]
pub struct ImeCoordinator {
    state: State,
}

impl ImeCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_composing(&self) -> bool {
        matches!(self.state, State::Composing { .. })
    }

    /// Selection captured when the current composition began.
    pub fn snapshot(&self) -> Option<TextRange> {
        match self.state {
            State::Composing { snapshot, .. } => Some(snapshot),
            State::Idle => None,
        }
    }

    /// Document span currently occupied by composition text.
    pub fn composition_range(&self) -> Option<TextRange> {
        match self.state {
            State::Composing { snapshot, len, .. } => {
                Some(TextRange::new(snapshot.min(), snapshot.min() + len))
            }
            State::Idle => None,
        }
    }

    /// Absolute caret offset inside the composition. The view's own
    /// selection is not a reliable position while composing.
    pub fn caret_index(&self) -> Option<usize> {
        match self.state {
            State::Composing {
                snapshot,
                caret_offset,
                ..
            } => Some(snapshot.min() + caret_offset),
            State::Idle => None,
        }
    }

    /// New composition text from the input method.
    pub fn update(
        &mut self,
        selection: TextRange,
        text: &str,
        caret_offset: usize,
        clauses: &[CompositionClause],
    ) -> Vec<Command> {
        let mut commands = Vec::with_capacity(2);
        let snapshot = match self.state {
            State::Composing { snapshot, .. } => snapshot,
            State::Idle => {
                tracing::debug!(
                    start = selection.start,
                    end = selection.end,
                    "composition started"
                );
                commands.push(Command::StartComposition { selection });
                selection
            }
        };

        let len = text.chars().count();
        let caret_offset = caret_offset.min(len);
        self.state = State::Composing {
            snapshot,
            len,
            caret_offset,
        };

        commands.push(Command::UpdateComposition {
            text: text.to_string(),
            caret_offset,
            underlines: underlines(clauses, len),
        });
        commands
    }

    /// Commit `text`: drop the composition, restore the original selection,
    /// type over it and seal the undo unit. Empty text only cancels.
    pub fn finish(&mut self, text: &str) -> Vec<Command> {
        let State::Composing { snapshot, .. } = std::mem::take(&mut self.state) else {
            return vec![];
        };
        tracing::debug!(committed = text.chars().count(), "composition finished");

        let mut commands = vec![Command::FinishComposition];
        if !text.is_empty() {
            commands.push(Command::ReplaceText {
                range: snapshot,
                text: text.to_string(),
                semantics: EditSemantics::Typing,
            });
            commands.push(Command::SealUndo);
        }
        commands
    }

    /// Shift the tracked composition for an edit made by another view.
    pub(crate) fn adjust_for_edit(&mut self, info: &DocumentChangeInfo) {
        if let State::Composing { snapshot, .. } = &mut self.state {
            *snapshot = snapshot.adjust_for_edit(info);
        }
    }

    /// Abandon tracking without touching the document.
    pub(crate) fn reset(&mut self) {
        self.state = State::Idle;
    }
}

/// Clause styles as underline spans, clamped to the composition text.
fn underlines(clauses: &[CompositionClause], len: usize) -> Vec<UnderlineSpan> {
    clauses
        .iter()
        .filter_map(|clause| {
            let start = clause.range.start.min(len);
            let end = clause.range.end.min(len);
            (start < end).then(|| UnderlineSpan {
                range: start..end,
                style: clause.style.into(),
            })
        })
        .collect()
}
