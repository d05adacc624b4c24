use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::photos::models::PhotoComment;
use crate::shared::constants::MAX_COMMENT_LENGTH;

/// Request DTO for creating a comment
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCommentDto {
    /// Comment text, 1-2000 characters after trimming
    pub body: String,
}

/// Trim a raw comment body and enforce the 1-2000 character bound.
pub fn normalize_comment_body(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(
            "Comment body must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() as u64 > MAX_COMMENT_LENGTH {
        return Err(AppError::Validation(format!(
            "Comment body must be at most {} characters",
            MAX_COMMENT_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

/// Response DTO for a comment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponseDto {
    pub id: Uuid,
    pub photo_id: Uuid,
    pub author_id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<PhotoComment> for CommentResponseDto {
    fn from(c: PhotoComment) -> Self {
        Self {
            id: c.id,
            photo_id: c.photo_id,
            author_id: c.author_id,
            body: c.body,
            created_at: c.created_at,
        }
    }
}

/// Plain acknowledgement for idempotent operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OkResponseDto {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_is_trimmed() {
        assert_eq!(normalize_comment_body("  hello  ").unwrap(), "hello");
    }

    #[test]
    fn test_empty_and_whitespace_rejected() {
        assert!(normalize_comment_body("").is_err());
        assert!(normalize_comment_body("   \n\t ").is_err());
    }

    #[test]
    fn test_length_bound_counts_chars_after_trim() {
        let exactly_max = "x".repeat(2000);
        assert!(normalize_comment_body(&exactly_max).is_ok());

        let too_long = "x".repeat(2001);
        assert!(normalize_comment_body(&too_long).is_err());

        // Trailing whitespace does not count against the bound
        let padded = format!("  {}  ", exactly_max);
        assert!(normalize_comment_body(&padded).is_ok());
    }

    #[test]
    fn test_multibyte_chars_count_once() {
        let body = "あ".repeat(2000);
        assert!(normalize_comment_body(&body).is_ok());
        let body = "あ".repeat(2001);
        assert!(normalize_comment_body(&body).is_err());
    }
}
