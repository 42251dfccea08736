use serde::Deserialize;

use crate::shared::AppError;

/// Longest message body accepted, in characters
pub const MAX_CONTENT_CHARS: usize = 1000;

/// Request payload for `POST /messages`
#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub user: String,
    pub content: String,
}

impl PostMessageRequest {
    /// Returns the trimmed author and content
    pub fn validate(&self) -> Result<(String, String), AppError> {
        let user = self.user.trim();
        if user.is_empty() {
            return Err(AppError::Validation("user is required".to_string()));
        }

        let content = self.content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("content is required".to_string()));
        }
        if content.chars().count() > MAX_CONTENT_CHARS {
            return Err(AppError::Validation(format!(
                "content must be at most {} characters",
                MAX_CONTENT_CHARS
            )));
        }

        Ok((user.to_string(), content.to_string()))
    }
}
