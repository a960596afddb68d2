use serde_json::Value;

/// Free-form JSON text with a byte cursor. The text is opaque until submit;
/// parsing only happens through [`JsonBuffer::parse`], keeping parse errors
/// local to the workflow that owns the buffer.
#[derive(Debug, Clone, Default)]
pub struct JsonBuffer {
    pub text: String,
    pub cursor: usize,
}

impl JsonBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    /// Replaces the whole buffer, e.g. when a live config fetch lands.
    pub fn reset(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    pub fn parse(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.text)
    }

    pub fn insert_char(&mut self, c: char) {
        let cursor = self.cursor.min(self.text.len());
        self.text.insert(cursor, c);
        self.cursor = cursor + c.len_utf8();
    }

    pub fn backspace(&mut self) {
        let cursor = self.cursor.min(self.text.len());
        if cursor == 0 {
            return;
        }
        let mut new_pos = cursor - 1;
        while new_pos > 0 && !self.text.is_char_boundary(new_pos) {
            new_pos -= 1;
        }
        self.text.remove(new_pos);
        self.cursor = new_pos;
    }

    pub fn cursor_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let mut new_pos = self.cursor - 1;
        while new_pos > 0 && !self.text.is_char_boundary(new_pos) {
            new_pos -= 1;
        }
        self.cursor = new_pos;
    }

    pub fn cursor_right(&mut self) {
        if self.cursor >= self.text.len() {
            return;
        }
        let mut new_pos = self.cursor + 1;
        while new_pos < self.text.len() && !self.text.is_char_boundary(new_pos) {
            new_pos += 1;
        }
        self.cursor = new_pos;
    }

    /// Move cursor to start of the current line.
    pub fn cursor_home(&mut self) {
        let cursor = self.cursor.min(self.text.len());
        self.cursor = self.text[..cursor].rfind('\n').map(|p| p + 1).unwrap_or(0);
    }

    /// Move cursor to end of the current line.
    pub fn cursor_end(&mut self) {
        let cursor = self.cursor.min(self.text.len());
        self.cursor = self.text[cursor..]
            .find('\n')
            .map(|p| cursor + p)
            .unwrap_or(self.text.len());
    }
}

/// Modal create workflow. `space_choice` is the picker index on the session
/// console: 0 is the "not connected" sentinel, i > 0 addresses the (i-1)-th
/// loaded space.
#[derive(Debug, Default)]
pub struct CreateWorkflow {
    pub open: bool,
    pub busy: bool,
    pub buffer: JsonBuffer,
    pub space_choice: usize,
}

impl CreateWorkflow {
    pub fn open(&mut self) {
        self.open = true;
        self.busy = false;
        self.buffer = JsonBuffer::new("{}");
        self.space_choice = 0;
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }
}

/// Two-step delete confirmation. Staging a target has no side effects;
/// only the confirm issues the delete call.
#[derive(Debug, Default)]
pub struct DeleteWorkflow {
    pub open: bool,
    pub busy: bool,
    pub target: Option<String>,
}

impl DeleteWorkflow {
    pub fn stage(&mut self, id: String) {
        self.open = true;
        self.busy = false;
        self.target = Some(id);
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }
}

/// Config view/edit workflow. The buffer is seeded from the cached record and
/// overwritten when the live fetch succeeds, so stale data can only be shown
/// when the fetch fails.
#[derive(Debug, Default)]
pub struct ConfigWorkflow {
    pub open: bool,
    pub busy: bool,
    pub target: Option<String>,
    pub buffer: JsonBuffer,
}

impl ConfigWorkflow {
    pub fn open(&mut self, id: String, cached: &Value) {
        self.open = true;
        self.busy = false;
        self.target = Some(id);
        self.buffer = JsonBuffer::new(pretty(cached));
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }
}

/// Connect-to-space workflow (session console only). `space_choice` indexes
/// the loaded space list directly; with no spaces loaded the confirm action
/// is disabled.
#[derive(Debug, Default)]
pub struct ConnectWorkflow {
    pub open: bool,
    pub busy: bool,
    pub target: Option<String>,
    pub space_choice: usize,
}

impl ConnectWorkflow {
    pub fn open(&mut self, session_id: String) {
        self.open = true;
        self.busy = false;
        self.target = Some(session_id);
        self.space_choice = 0;
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }
}

pub fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
