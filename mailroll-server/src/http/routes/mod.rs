//! Route modules

pub mod emails;
pub mod export;
pub mod health;
