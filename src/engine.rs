use crate::config::EngineConfig;
use crate::drag::DragSelection;
use crate::edit::{EditDispatcher, is_rejected_char};
use crate::error::Result;
use crate::ime::ImeCoordinator;
use crate::key::{
    CompositionEvent, InputEvent, KeyCode, KeyEvent, Modifiers, PointerEvent, PointerKind,
};
use crate::navigation;
use crate::reconcile::Reconciler;
use crate::selection::SelectionController;
use crate::traits::{ChangeObserver, Clipboard, TextDocument, ViewHost};
use crate::types::{Command, DocumentChangeInfo, NavigationKind, SelectionKind, TextRange};

/// One view onto a document: selection, navigation, editing, pointer
/// gestures and IME state, plus the presentation host it drives.
#[derive(Debug)]
pub struct Engine<H> {
    host: H,
    config: EngineConfig,
    selection: SelectionController,
    edits: EditDispatcher,
    ime: ImeCoordinator,
    drag: Option<DragSelection>,
    reconciler: Reconciler,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineSnapshot {
    pub selection: TextRange,
    pub ghost_column: Option<f32>,
    pub overtype: bool,
    pub composing: bool,
    /// Pointer currently captured by a selection gesture.
    pub dragging: Option<u32>,
}

#[derive(Default)]
pub struct EngineBuilder {
    config: EngineConfig,
}

impl EngineBuilder {
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.config.read_only = read_only;
        self
    }

    pub fn masked(mut self, masked: bool) -> Self {
        self.config.masked = masked;
        self
    }

    pub fn build<H: ViewHost>(self, host: H) -> Engine<H> {
        Engine {
            host,
            edits: EditDispatcher::new(self.config.overtype),
            config: self.config,
            selection: SelectionController::new(),
            ime: ImeCoordinator::new(),
            drag: None,
            reconciler: Reconciler::new(),
        }
    }
}

impl<H: ViewHost> Engine<H> {
    pub fn new(host: H) -> Self {
        EngineBuilder::default().build(host)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.config.read_only = read_only;
    }

    pub fn selection(&self) -> TextRange {
        self.selection.selection()
    }

    /// Where text input lands. While composing this is the IME caret, not
    /// the ordinary selection.
    pub fn caret_index(&self) -> usize {
        self.ime
            .caret_index()
            .unwrap_or_else(|| self.selection.selection().active())
    }

    pub fn is_overtype(&self) -> bool {
        self.edits.is_overtype()
    }

    pub fn is_composing(&self) -> bool {
        self.ime.is_composing()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            selection: self.selection.selection(),
            ghost_column: self.selection.ghost_column(),
            overtype: self.edits.is_overtype(),
            composing: self.ime.is_composing(),
            dragging: self
                .drag
                .as_ref()
                .filter(|d| d.is_tracking())
                .map(DragSelection::pointer_id),
        }
    }

    pub fn set_selection<D: TextDocument + ?Sized>(
        &mut self,
        doc: &D,
        range: TextRange,
    ) -> TextRange {
        self.selection.set_selection(doc, &mut self.host, range, true)
    }

    pub fn select_all<D: TextDocument + ?Sized>(&mut self, doc: &D) -> TextRange {
        self.selection.select_all(doc, &mut self.host)
    }

    pub fn navigate<D: TextDocument + ?Sized>(
        &mut self,
        doc: &D,
        kind: NavigationKind,
        extend: bool,
    ) -> Result<TextRange> {
        let outcome = navigation::navigate(
            doc,
            self.selection.selection(),
            kind,
            extend,
            self.host.viewport_height(),
            self.selection.ghost_column(),
        )?;
        let applied = if kind.is_vertical() {
            self.selection.set_selection_with_ghost(
                doc,
                &mut self.host,
                outcome.selection,
                outcome.ghost_column,
            )
        } else {
            self.selection
                .set_selection(doc, &mut self.host, outcome.selection, true)
        };
        Ok(applied)
    }

    fn writable(&self, action: &str) -> bool {
        if self.config.read_only {
            tracing::debug!(action, "rejected: read-only");
        }
        !self.config.read_only
    }

    /// Type `text` over the selection. Control characters are dropped.
    pub fn insert_text<D: TextDocument + ?Sized>(
        &mut self,
        doc: &D,
        text: &str,
    ) -> Result<Vec<Command>> {
        if !self.writable("type") {
            return Ok(vec![]);
        }
        let text: String = text.chars().filter(|c| !is_rejected_char(*c)).collect();
        Ok(self
            .edits
            .type_text(doc, self.selection.selection(), &text)?
            .into_iter()
            .collect())
    }

    pub fn insert_break<D: TextDocument + ?Sized>(
        &mut self,
        doc: &D,
        soft: bool,
    ) -> Result<Vec<Command>> {
        if !self.writable("break") {
            return Ok(vec![]);
        }
        Ok(self
            .edits
            .insert_break(doc, self.selection.selection(), soft)?
            .into_iter()
            .collect())
    }

    pub fn delete<D: TextDocument + ?Sized>(&mut self, doc: &D) -> Result<Vec<Command>> {
        if !self.writable("delete") {
            return Ok(vec![]);
        }
        Ok(self
            .edits
            .delete_forward(doc, self.selection.selection())?
            .into_iter()
            .collect())
    }

    pub fn backspace<D: TextDocument + ?Sized>(&mut self, doc: &D) -> Result<Vec<Command>> {
        if !self.writable("backspace") {
            return Ok(vec![]);
        }
        Ok(self
            .edits
            .backspace(doc, self.selection.selection())?
            .into_iter()
            .collect())
    }

    /// Returns whether a non-empty selection was exported.
    pub fn copy<D, C>(&self, doc: &D, clipboard: &mut C) -> bool
    where
        D: TextDocument + ?Sized,
        C: Clipboard + ?Sized,
    {
        self.edits
            .copy(doc, self.selection.selection(), self.config.masked, clipboard)
    }

    pub fn cut<D, C>(&mut self, doc: &D, clipboard: &mut C) -> Result<Vec<Command>>
    where
        D: TextDocument + ?Sized,
        C: Clipboard + ?Sized,
    {
        if !self.writable("cut") {
            return Ok(vec![]);
        }
        Ok(self
            .edits
            .cut(doc, self.selection.selection(), self.config.masked, clipboard)?
            .into_iter()
            .collect())
    }

    pub fn paste<C: Clipboard + ?Sized>(&mut self, clipboard: &mut C) -> Vec<Command> {
        if !self.writable("paste") {
            return vec![];
        }
        self.edits.paste(self.selection.selection(), clipboard)
    }

    /// Whether the document has an undo unit. Answered in read-only mode
    /// too; only the action itself is refused there.
    pub fn can_undo<D: TextDocument + ?Sized>(&self, doc: &D) -> bool {
        doc.can_undo()
    }

    pub fn can_redo<D: TextDocument + ?Sized>(&self, doc: &D) -> bool {
        doc.can_redo()
    }

    pub fn undo<D: TextDocument + ?Sized>(&mut self, doc: &D) -> Vec<Command> {
        if !self.writable("undo") {
            return vec![];
        }
        self.edits.undo(doc).into_iter().collect()
    }

    pub fn redo<D: TextDocument + ?Sized>(&mut self, doc: &D) -> Vec<Command> {
        if !self.writable("redo") {
            return vec![];
        }
        self.edits.redo(doc).into_iter().collect()
    }

    /// Flip overtype mode. The character about to be overtyped is drawn
    /// differently, so the view repaints.
    pub fn toggle_overtype(&mut self) -> bool {
        let on = self.edits.toggle_overtype();
        self.host.invalidate();
        on
    }

    pub fn handle_event<D, C>(
        &mut self,
        doc: &D,
        clipboard: &mut C,
        input: InputEvent,
    ) -> Result<Vec<Command>>
    where
        D: TextDocument + ?Sized,
        C: Clipboard + ?Sized,
    {
        match input {
            InputEvent::Key(ke) => {
                if self.ime.is_composing() {
                    tracing::trace!(?ke, "key ignored while composing");
                    return Ok(vec![]);
                }
                self.handle_key(doc, clipboard, ke)
            }
            InputEvent::ReceivedChar(ch) => {
                if self.ime.is_composing() || is_rejected_char(ch) {
                    return Ok(vec![]);
                }
                self.insert_text(doc, ch.encode_utf8(&mut [0; 4]))
            }
            InputEvent::Pointer(pe) => {
                self.handle_pointer(doc, pe)?;
                Ok(vec![])
            }
            InputEvent::Composition(ev) => Ok(self.handle_composition(ev)),
        }
    }

    fn handle_key<D, C>(&mut self, doc: &D, clipboard: &mut C, ke: KeyEvent) -> Result<Vec<Command>>
    where
        D: TextDocument + ?Sized,
        C: Clipboard + ?Sized,
    {
        let ctrl = ke.mods.contains(Modifiers::CTRL);
        let extend = ke.mods.extends();

        let kind = match ke.code {
            KeyCode::Left if ctrl => Some(NavigationKind::WordLeft),
            KeyCode::Left => Some(NavigationKind::CharacterLeft),
            KeyCode::Right if ctrl => Some(NavigationKind::WordRight),
            KeyCode::Right => Some(NavigationKind::CharacterRight),
            KeyCode::Up => Some(NavigationKind::LineUp),
            KeyCode::Down => Some(NavigationKind::LineDown),
            KeyCode::Home if ctrl => Some(NavigationKind::DocumentHome),
            KeyCode::Home => Some(NavigationKind::LineHome),
            KeyCode::End if ctrl => Some(NavigationKind::DocumentEnd),
            KeyCode::End => Some(NavigationKind::LineEnd),
            KeyCode::PageUp => Some(NavigationKind::PageUp),
            KeyCode::PageDown => Some(NavigationKind::PageDown),
            _ => None,
        };
        if let Some(kind) = kind {
            self.navigate(doc, kind, extend)?;
            return Ok(vec![]);
        }

        match ke.code {
            KeyCode::Enter => self.insert_break(doc, extend),
            KeyCode::Backspace => self.backspace(doc),
            KeyCode::Delete => self.delete(doc),
            // Holding Insert must not make the mode flicker.
            KeyCode::Insert if ke.repeat => Ok(vec![]),
            KeyCode::Insert => {
                self.toggle_overtype();
                Ok(vec![])
            }
            KeyCode::Esc => {
                if let Some(mut drag) = self.drag.take() {
                    drag.cancel();
                }
                Ok(vec![])
            }
            KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
                'a' => {
                    self.select_all(doc);
                    Ok(vec![])
                }
                'c' => {
                    self.copy(doc, clipboard);
                    Ok(vec![])
                }
                'x' => self.cut(doc, clipboard),
                'v' => Ok(self.paste(clipboard)),
                'z' if extend => Ok(self.redo(doc)),
                'z' => Ok(self.undo(doc)),
                'y' => Ok(self.redo(doc)),
                _ => Ok(vec![]),
            },
            _ => Ok(vec![]),
        }
    }

    /// Drive the selection gesture. Only one pointer is tracked at a time;
    /// others are ignored until it is released.
    pub fn handle_pointer<D: TextDocument + ?Sized>(
        &mut self,
        doc: &D,
        pe: PointerEvent,
    ) -> Result<()> {
        if let Some(drag) = &self.drag
            && drag.is_tracking()
            && drag.pointer_id() != pe.id
        {
            tracing::debug!(pointer = pe.id, captured = drag.pointer_id(), "pointer ignored");
            return Ok(());
        }

        match pe.kind {
            PointerKind::Down => {
                let in_margin = pe.point.x < self.config.margin_width;
                let kind = SelectionKind::for_gesture(pe.double_click, in_margin);
                let mut drag = DragSelection::new(pe.id, kind);
                let existing = self.selection.selection();
                let range = drag.down(doc, pe.point, existing, pe.mods.extends())?;
                self.drag = Some(drag);
                self.selection.set_selection(doc, &mut self.host, range, true);
            }
            PointerKind::Drag => {
                let Some(drag) = self.drag.as_mut() else {
                    return Ok(());
                };
                if let Some(range) = drag.drag(doc, pe.point)? {
                    self.selection.set_selection(doc, &mut self.host, range, true);
                }
            }
            PointerKind::Up => {
                if let Some(mut drag) = self.drag.take() {
                    drag.up(pe.point);
                }
            }
            PointerKind::Cancel => {
                if let Some(mut drag) = self.drag.take() {
                    drag.cancel();
                }
            }
        }
        Ok(())
    }

    /// A read-only view never starts a composition. One already running
    /// always gets to finish, as a cancel when the view turned read-only.
    pub fn handle_composition(&mut self, ev: CompositionEvent) -> Vec<Command> {
        match ev {
            CompositionEvent::Update {
                text,
                caret_offset,
                clauses,
            } => {
                if !self.ime.is_composing() && !self.writable("compose") {
                    return vec![];
                }
                self.ime
                    .update(self.selection.selection(), &text, caret_offset, &clauses)
            }
            CompositionEvent::Finish { text } => {
                let text = if self.config.read_only { "" } else { text.as_str() };
                self.ime.finish(text)
            }
        }
    }
}

impl<D, H> ChangeObserver<D> for Engine<H>
where
    D: TextDocument + ?Sized,
    H: ViewHost,
{
    fn on_will_change(&mut self, doc: &D) {
        self.reconciler.will_change(
            self.selection.selection(),
            self.host.scroll_offset(),
            doc.measured_extent(),
        );
    }

    fn on_change(&mut self, doc: &D, info: &DocumentChangeInfo, origin: bool) {
        if !origin {
            self.ime.adjust_for_edit(info);
        }
        self.reconciler.change(doc, info, origin);
    }

    fn on_did_change(&mut self, doc: &D) {
        let Some(pending) = self.reconciler.did_change() else {
            return;
        };
        self.host.set_scroll_offset(pending.scroll_offset);
        self.selection
            .set_selection(doc, &mut self.host, pending.selection, true);
        self.host.invalidate();
    }

    fn on_reset(&mut self, doc: &D) {
        self.reconciler.clear();
        self.ime.reset();
        self.drag = None;
        self.selection.reset();
        self.host.set_scroll_offset(0.0);
        self.selection
            .set_selection(doc, &mut self.host, TextRange::caret(0), true);
        self.host.invalidate();
    }

    fn on_redraw(&mut self) {
        self.host.invalidate();
    }
}
