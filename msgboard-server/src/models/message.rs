//! Message text validation

use super::ValidationError;

/// Maximum message length, matching the `VARCHAR(255)` column
pub const MAX_TEXT_CHARS: usize = 255;

/// Validated message text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    /// Create new message text.
    ///
    /// # Rules
    /// - Must not be empty
    /// - Max 255 characters (not bytes)
    ///
    /// # Example
    /// ```
    /// use msgboard_server::models::MessageText;
    ///
    /// assert!(MessageText::new("hello").is_ok());
    /// assert!(MessageText::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Required { field: "text" });
        }

        if s.chars().count() > MAX_TEXT_CHARS {
            return Err(ValidationError::TooLong {
                field: "text",
                max: MAX_TEXT_CHARS,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the text as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_text() {
        assert!(MessageText::new("Hello world").is_ok());
        // no trimming: whitespace is still text
        assert!(MessageText::new(" ").is_ok());
    }

    #[test]
    fn empty_is_required() {
        let err = MessageText::new("").unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "text" });
    }

    #[test]
    fn max_length() {
        let at_limit = "a".repeat(255);
        assert!(MessageText::new(&at_limit).is_ok());

        let over = "a".repeat(256);
        let err = MessageText::new(&over).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 255, .. }));
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        // 255 two-byte chars = 510 bytes, still within the column limit
        let accented = "é".repeat(255);
        assert!(MessageText::new(&accented).is_ok());
    }
}
