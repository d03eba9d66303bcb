//! One-shot messages shown on the next rendered page.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a flash message. Rendered as the alert's CSS modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Danger,
}

impl FlashLevel {
    /// CSS class suffix for this level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl fmt::Display for FlashLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A queued message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    #[must_use]
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_session_encoding() {
        let flash = FlashMessage::new(FlashLevel::Danger, "Book not found");
        let json = serde_json::to_value(&flash).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "level": "danger", "message": "Book not found" })
        );
    }

    #[test]
    fn test_display_matches_css_suffix() {
        assert_eq!(FlashLevel::Success.to_string(), "success");
        assert_eq!(FlashLevel::Info.to_string(), "info");
    }
}
