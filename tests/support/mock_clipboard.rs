use caret_mini::traits::Clipboard;

#[derive(Default, Debug, Clone)]
pub struct MockClipboard {
    content: Option<String>,
}

impl MockClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            content: Some(text.to_string()),
        }
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

impl Clipboard for MockClipboard {
    fn import_text(&mut self) -> Option<String> {
        self.content.clone()
    }

    fn export_text(&mut self, text: String) {
        self.content = Some(text);
    }
}
