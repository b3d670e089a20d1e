//! Request handlers

pub mod health;
pub mod service_requests;
pub mod warranty;
