use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A document returned a caret outside `0..=len`.
    #[error("document returned offset {index}, outside 0..={len}")]
    PositionOutOfBounds { index: usize, len: usize },

    #[error("invalid engine configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[cfg(feature = "clipboard")]
    #[error("system clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Check a caret handed back by a document collaborator.
pub(crate) fn check_position(index: usize, len: usize) -> Result<()> {
    if index > len {
        tracing::error!(index, len, "document contract violation");
        return Err(Error::PositionOutOfBounds { index, len });
    }
    Ok(())
}
