//! Maps a navigation intent and the current selection to a new selection.
//!
//! Layout is entirely the document's business; this module only decides
//! where navigation starts from, whether it extends, and what happens at the
//! top and bottom of the document.

use crate::error::{Result, check_position};
use crate::traits::TextDocument;
use crate::types::{NavigationKind, TextRange};

/// Result of a single navigation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationOutcome {
    pub selection: TextRange,
    /// Ghost column to carry into the next step. Always `None` after a
    /// non-vertical move.
    pub ghost_column: Option<f32>,
}

/// Compute the selection produced by navigating `kind` from `current`.
///
/// With `extend` the anchor stays put and only the active end moves.
/// Without it a selected range first turns so that its active end is the
/// edge facing the direction of travel; a character step then only
/// collapses the range.
pub fn navigate<D: TextDocument + ?Sized>(
    doc: &D,
    current: TextRange,
    kind: NavigationKind,
    extend: bool,
    viewport_height: f32,
    ghost_column: Option<f32>,
) -> Result<NavigationOutcome> {
    if kind == NavigationKind::None {
        return Ok(NavigationOutcome {
            selection: current,
            ghost_column,
        });
    }

    let mut current = current;
    if current.is_range() && !extend {
        let rightward = !kind.is_leftward();
        if current.is_forward() != rightward {
            current = current.reversed();
        }
        if matches!(
            kind,
            NavigationKind::CharacterLeft | NavigationKind::CharacterRight
        ) {
            return Ok(NavigationOutcome {
                selection: TextRange::at(current.caret_position()),
                ghost_column: None,
            });
        }
    }

    let from = current.caret_position();
    let (mut pos, mut ghost) = doc.navigate(from, kind, viewport_height, ghost_column);
    check_position(pos.index, doc.len())?;

    // Extending by line or page at the first/last line would otherwise
    // leave the caret stuck mid-line.
    if extend && pos == from {
        let escalated = match kind {
            NavigationKind::LineUp | NavigationKind::PageUp => Some(NavigationKind::DocumentHome),
            NavigationKind::LineDown | NavigationKind::PageDown => {
                Some(NavigationKind::DocumentEnd)
            }
            _ => None,
        };
        if let Some(target) = escalated {
            tracing::trace!(?kind, ?target, "navigation hit document edge");
            (pos, ghost) = doc.navigate(from, target, viewport_height, ghost);
            check_position(pos.index, doc.len())?;
        }
    }

    let selection = if extend {
        TextRange {
            start: current.anchor(),
            end: pos.index,
            alt_position: pos.alt_position,
        }
    } else {
        TextRange::at(pos)
    };

    Ok(NavigationOutcome {
        selection,
        ghost_column: if kind.is_vertical() { ghost } else { None },
    })
}
