pub mod consultation;
pub mod consultation_session;
