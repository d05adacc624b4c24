mod comment_dto;
mod photo_dto;

pub use comment_dto::{normalize_comment_body, CommentResponseDto, CreateCommentDto, OkResponseDto};
pub use photo_dto::{group_items, GroupBy, ListPhotosQuery, ListPhotosResponseDto, PhotoItemDto};
