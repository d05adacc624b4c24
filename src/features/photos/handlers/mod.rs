mod comment_handler;
mod favorite_handler;
mod photo_handler;

pub use comment_handler::*;
pub use favorite_handler::*;
pub use photo_handler::*;
