mod bid;
mod comment;

pub use bid::{format_price, BidPanel};
pub use comment::{Comment, CommentBoard, DEFAULT_NICKNAME};
