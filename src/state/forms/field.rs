//! Form field value objects

/// What a field accepts from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    /// ASCII digits only (number pad)
    Digits,
}

impl InputKind {
    fn accepts(self, c: char) -> bool {
        match self {
            InputKind::Text => !c.is_control(),
            InputKind::Digits => c.is_ascii_digit(),
        }
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: String,
    pub kind: InputKind,
    /// Rendered as bullets unless revealed
    pub is_secret: bool,
}

impl FormField {
    /// Create a new free-text field
    pub fn text(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: String::new(),
            kind: InputKind::Text,
            is_secret: false,
        }
    }

    /// Create a new digits-only field
    pub fn digits(name: &str, label: &str) -> Self {
        Self {
            kind: InputKind::Digits,
            ..Self::text(name, label)
        }
    }

    /// Create a new secret field
    pub fn secret(name: &str, label: &str) -> Self {
        Self {
            is_secret: true,
            ..Self::text(name, label)
        }
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    /// Push a character to the field value. Returns false if the field rejects it.
    pub fn push_char(&mut self, c: char) -> bool {
        if self.kind.accepts(c) {
            self.value.push(c);
            true
        } else {
            false
        }
    }

    /// Append every accepted character of `text`, returning how many were kept
    pub fn push_str(&mut self, text: &str) -> usize {
        text.chars().filter(|&c| self.push_char(c)).count()
    }

    /// Append clipboard text. Surrounding whitespace is dropped except in secret fields.
    pub fn paste(&mut self, text: &str) -> usize {
        let text = if self.is_secret { text } else { text.trim() };
        self.push_str(text)
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    /// Get the display value for rendering
    pub fn display_value(&self, reveal_secret: bool) -> String {
        if self.is_secret && !reveal_secret {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}
