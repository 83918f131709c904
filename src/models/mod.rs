// src/models/mod.rs

pub mod dictionary;
pub mod exam;
pub mod result;
pub mod user;
