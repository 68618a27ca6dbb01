//! Data types for the harvesting pipeline.

pub mod config;
pub mod entity;
pub mod language;
