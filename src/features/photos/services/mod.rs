mod comment_service;
mod favorite_service;
mod photo_service;

pub use comment_service::CommentService;
pub use favorite_service::FavoriteService;
pub use photo_service::PhotoService;
