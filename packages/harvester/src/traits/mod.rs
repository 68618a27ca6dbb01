//! Trait seams for the pipeline's external collaborators.

pub mod fetcher;
pub mod model;
pub mod sink;
