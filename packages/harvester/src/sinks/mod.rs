//! Result sinks: CSV files and word-cloud images.

mod cloud;
mod file;

pub use cloud::{scale_frequencies, WordCloudRenderer};
pub use file::FileSink;
