//! Three-phase change propagation between a document and its views.
//!
//! For every logical operation each view receives `on_will_change` once,
//! `on_change` once per atomic edit, then `on_did_change` once. Views work
//! out their post-edit selection and scroll offset from the change
//! descriptions alone, so it does not matter which view caused the edit.

use crate::traits::{ChangeObserver, EditableDocument, TextDocument};
use crate::types::{CaretPosition, Command, DocumentChangeInfo, TextRange};

/// State a view accumulates between will-change and did-change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingChange {
    pub selection: TextRange,
    pub scroll_offset: f32,
    /// Measured extent of the document as of the last phase seen.
    pub extent: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    pending: Option<PendingChange>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<&PendingChange> {
        self.pending.as_ref()
    }

    /// Take the baseline for the coming edits.
    pub fn will_change(&mut self, selection: TextRange, scroll_offset: f32, extent: f32) {
        self.pending = Some(PendingChange {
            selection,
            scroll_offset,
            extent,
        });
    }

    /// Fold one edit into the pending state. `doc` already reflects it.
    pub fn change<D: TextDocument + ?Sized>(
        &mut self,
        doc: &D,
        info: &DocumentChangeInfo,
        origin: bool,
    ) {
        let Some(pending) = self.pending.as_mut() else {
            tracing::warn!(index = info.index, "change received outside will-change/did-change");
            return;
        };

        pending.selection = if origin {
            info.pending_selection()
        } else {
            pending.selection.adjust_for_edit(info)
        };

        // Content growing or shrinking above the viewport must not make the
        // visible text jump.
        let extent = doc.measured_extent();
        let edit_top = doc.caret_geometry(CaretPosition::new(info.index)).y;
        if edit_top < pending.scroll_offset {
            pending.scroll_offset = (pending.scroll_offset + extent - pending.extent).max(0.0);
        }
        pending.extent = extent;
    }

    pub fn did_change(&mut self) -> Option<PendingChange> {
        self.pending.take()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}

/// Handle for a registered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u32);

/// Ordered subscribers of one document.
///
/// Broadcast is a plain iteration in registration order. The registry is
/// also where commands emitted by a view are applied, which is what keeps
/// the phases in order for every view.
#[derive(Debug)]
pub struct ViewRegistry<V> {
    views: Vec<(ViewId, V)>,
    next_id: u32,
}

impl<V> Default for ViewRegistry<V> {
    fn default() -> Self {
        Self {
            views: Vec::new(),
            next_id: 0,
        }
    }
}

impl<V> ViewRegistry<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, view: V) -> ViewId {
        let id = ViewId(self.next_id);
        self.next_id += 1;
        self.views.push((id, view));
        id
    }

    pub fn revoke(&mut self, id: ViewId) -> Option<V> {
        let pos = self.views.iter().position(|(v, _)| *v == id)?;
        Some(self.views.remove(pos).1)
    }

    pub fn get(&self, id: ViewId) -> Option<&V> {
        self.views.iter().find(|(v, _)| *v == id).map(|(_, view)| view)
    }

    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut V> {
        self.views
            .iter_mut()
            .find(|(v, _)| *v == id)
            .map(|(_, view)| view)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ViewId, &V)> {
        self.views.iter().map(|(id, view)| (*id, view))
    }

    /// Apply `commands` issued by `origin` and broadcast every resulting
    /// edit. Returns the number of atomic edits performed.
    pub fn apply<D>(
        &mut self,
        doc: &mut D,
        origin: ViewId,
        commands: impl IntoIterator<Item = Command>,
    ) -> usize
    where
        D: EditableDocument + ?Sized,
        V: ChangeObserver<D>,
    {
        let mut began = false;
        let mut edits = 0;

        for command in commands {
            if command.mutates() && !began {
                for (_, view) in &mut self.views {
                    view.on_will_change(&*doc);
                }
                began = true;
            }

            let infos = match command {
                Command::ReplaceText {
                    range,
                    text,
                    semantics,
                } => vec![doc.replace_text(range, &text, semantics)],
                Command::SealUndo => {
                    doc.seal_undo();
                    vec![]
                }
                Command::Undo => doc.undo(),
                Command::Redo => doc.redo(),
                Command::StartComposition { selection } => {
                    doc.start_composition(selection);
                    vec![]
                }
                Command::UpdateComposition {
                    text,
                    caret_offset,
                    underlines,
                } => vec![doc.update_composition(&text, caret_offset, &underlines)],
                Command::FinishComposition => doc.finish_composition().into_iter().collect(),
            };

            for info in &infos {
                tracing::trace!(?info, "broadcasting change");
                for (id, view) in &mut self.views {
                    view.on_change(&*doc, info, *id == origin);
                }
            }
            edits += infos.len();
        }

        if began {
            for (_, view) in &mut self.views {
                view.on_did_change(&*doc);
            }
        }
        edits
    }

    /// Tell every view the document content was replaced wholesale.
    pub fn reset<D>(&mut self, doc: &D)
    where
        D: TextDocument + ?Sized,
        V: ChangeObserver<D>,
    {
        for (_, view) in &mut self.views {
            view.on_reset(doc);
        }
    }

    pub fn redraw<D>(&mut self, _doc: &D)
    where
        D: TextDocument + ?Sized,
        V: ChangeObserver<D>,
    {
        for (_, view) in &mut self.views {
            view.on_redraw();
        }
    }
}
