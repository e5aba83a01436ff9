//! HTTP route handlers

pub mod problems;
pub mod recall;
pub mod revision;
