pub mod review;
pub mod review_like;
