//! Merging of answer fragments into one reply

/// Collects non-empty answer texts in discovery order
#[derive(Debug, Default)]
pub struct ResponseAssembler {
    parts: Vec<String>,
}

impl ResponseAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one fragment; empty text is ignored
    pub fn push(&mut self, text: &str) {
        if !text.is_empty() {
            self.parts.push(text.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Newline-joined reply
    pub fn finish(self) -> String {
        self.parts.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joins_with_newline_and_skips_empty() {
        let mut assembler = ResponseAssembler::new();
        assembler.push("first");
        assembler.push("");
        assembler.push("second");
        assert_eq!(assembler.len(), 2);
        assert_eq!(assembler.finish(), "first\nsecond");
    }

    #[test]
    fn test_empty_reply() {
        assert_eq!(ResponseAssembler::new().finish(), "");
    }
}
