//! Command implementations for the trackplot CLI

pub mod example;
pub mod render;
