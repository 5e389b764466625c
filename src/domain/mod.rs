pub mod auth;
pub mod board;
pub mod checklist;
pub mod consultation;
pub mod counselor;
pub mod healing;
pub mod health;
pub mod notice;
pub mod review;
pub mod user;
