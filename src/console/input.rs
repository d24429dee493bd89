//! Input buffer: the command line being typed.

/// The command line plus the capture flag.
///
/// While capture is off the buffer keeps its text but ignores new input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
    capturing: bool,
}

impl InputBuffer {
    /// An empty buffer with capture on.
    pub const fn capturing() -> Self {
        Self {
            text: String::new(),
            capturing: true,
        }
    }

    /// Append a composed fragment. Returns whether the buffer changed.
    pub fn append(&mut self, fragment: &str) -> bool {
        if !self.capturing || fragment.is_empty() {
            return false;
        }
        self.text.push_str(fragment);
        true
    }

    /// Remove the last character. Returns whether the buffer changed.
    pub fn backspace(&mut self) -> bool {
        self.text.pop().is_some()
    }

    /// Empty the buffer.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Accept input again.
    pub fn start_capture(&mut self) {
        self.capturing = true;
    }

    /// Stop accepting input; the text is kept.
    pub fn stop_capture(&mut self) {
        self.capturing = false;
    }

    /// Whether input is accepted.
    pub const fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// Current text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the buffer holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// What the prompt shows: the text, or `placeholder` when empty.
    pub fn display_text<'a>(&'a self, placeholder: &'a str) -> &'a str {
        if self.text.is_empty() {
            placeholder
        } else {
            &self.text
        }
    }
}
