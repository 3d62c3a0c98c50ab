// src/lib.rs

pub mod config;
pub mod error;
pub mod generator;
pub mod template;
pub mod utils;
pub mod world;
