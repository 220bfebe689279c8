pub mod config;
pub mod drag;
pub mod edit;
pub mod engine;
pub mod error;
pub mod ime;
pub mod key;
pub mod navigation;
pub mod reconcile;
pub mod selection;
pub mod traits;
pub mod types;

#[cfg(feature = "clipboard")]
pub mod clipboard;

pub use crate::config::EngineConfig;
pub use crate::engine::{Engine, EngineBuilder, EngineSnapshot};
pub use crate::error::{Error, Result};
pub use crate::key::{
    CompositionEvent, InputEvent, KeyCode, KeyEvent, Modifiers, PointerEvent, PointerKind,
};
pub use crate::reconcile::{ViewId, ViewRegistry};
pub use crate::traits::{ChangeObserver, Clipboard, EditableDocument, TextDocument, ViewHost};
pub use crate::types::{
    CaretPosition, Command, DocumentChangeInfo, EditSemantics, LINE_BREAK, NavigationKind,
    PARAGRAPH_BREAK, Point, Rect, SelectionKind, TextRange,
};
