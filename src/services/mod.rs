// src/services/mod.rs

pub mod quiz;
pub mod user;
