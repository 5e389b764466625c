pub mod auth;
pub mod cookie;
pub mod error;
pub mod extract;
pub mod jwt;
pub mod logging;
pub mod pagination;
pub mod password;
pub mod response;
pub mod validation;

pub use response::BaseResponse;
pub use response::ErrorResponse;
