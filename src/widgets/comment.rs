use crate::types::{ErrorResponse, ErrorTranslationKey};

pub const DEFAULT_NICKNAME: &str = "anonymous";

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Comment {
    pub nickname: String,
    pub text: String,
}

/// The comment widget: an append-only in-memory list, gone when the board is.
#[derive(Default)]
pub struct CommentBoard {
    comments: Vec<Comment>,
}

impl CommentBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Append a comment. A blank nickname falls back to [`DEFAULT_NICKNAME`];
    /// blank text is rejected and nothing is appended.
    pub fn post(&mut self, nickname: &str, text: &str) -> Result<&Comment, ErrorResponse> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ErrorResponse {
                error: "Please enter a comment.".to_string(),
                translation_key: ErrorTranslationKey::CommentEmptyText,
            });
        }

        let nickname = match nickname.trim() {
            "" => DEFAULT_NICKNAME,
            trimmed => trimmed,
        };

        self.comments.push(Comment {
            nickname: nickname.to_string(),
            text: text.to_string(),
        });
        Ok(self.comments.last().expect("comment was just pushed"))
    }
}
