use caret_mini::traits::ViewHost;
use caret_mini::types::{Rect, TextRange};

/// Records everything the engine asks of its presentation layer.
#[derive(Debug, Clone)]
pub struct MockHost {
    pub invalidations: usize,
    pub caret: Option<Rect>,
    pub visible_requests: usize,
    pub selection_events: Vec<TextRange>,
    pub scroll: f32,
    pub viewport: f32,
}

impl Default for MockHost {
    fn default() -> Self {
        Self {
            invalidations: 0,
            caret: None,
            visible_requests: 0,
            selection_events: Vec::new(),
            scroll: 0.0,
            viewport: 100.0,
        }
    }
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewport(viewport: f32) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }
}

impl ViewHost for MockHost {
    fn invalidate(&mut self) {
        self.invalidations += 1;
    }

    fn place_caret(&mut self, rect: Rect) {
        self.caret = Some(rect);
    }

    fn ensure_visible(&mut self, rect: Rect) {
        self.visible_requests += 1;
        if rect.y < self.scroll {
            self.scroll = rect.y;
        } else if rect.y + rect.height > self.scroll + self.viewport {
            self.scroll = rect.y + rect.height - self.viewport;
        }
    }

    fn selection_changed(&mut self, selection: TextRange) {
        self.selection_events.push(selection);
    }

    fn scroll_offset(&self) -> f32 {
        self.scroll
    }

    fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll = offset;
    }

    fn viewport_height(&self) -> f32 {
        self.viewport
    }
}
