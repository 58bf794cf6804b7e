//! Request/response data transfer objects

pub mod settings;
pub mod checkout;
