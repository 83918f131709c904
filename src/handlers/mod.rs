// src/handlers/mod.rs

pub mod auth;
pub mod dictionaries;
pub mod exams;
pub mod results;
pub mod tests;
