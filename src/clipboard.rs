//! System clipboard transport.

use crate::error::Result;
use crate::traits::Clipboard;

/// [`Clipboard`] backed by the platform clipboard.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        Ok(Self {
            inner: arboard::Clipboard::new()?,
        })
    }
}

impl Clipboard for SystemClipboard {
    fn import_text(&mut self) -> Option<String> {
        match self.inner.get_text() {
            Ok(text) => Some(text),
            Err(err) => {
                tracing::debug!(%err, "clipboard read failed");
                None
            }
        }
    }

    fn export_text(&mut self, text: String) {
        if let Err(err) = self.inner.set_text(text) {
            tracing::warn!(%err, "clipboard write failed");
        }
    }
}
