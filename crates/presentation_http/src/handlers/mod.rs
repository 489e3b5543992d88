//! HTTP request handlers

pub mod health;
pub mod languages;
pub mod speech;
pub mod synthesis;
