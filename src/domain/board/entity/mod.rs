pub mod board;
pub mod board_like;
pub mod comment;
