// src/repo/mod.rs

pub mod quiz;
pub mod user;
