pub mod dto;
pub mod handler;
mod service;

pub use handler::{health_check, root};
pub use service::init_start_time;
