//! Input side of the pipeline.
//!
//! Reads tweet-like records (`Text`, `Likes`, `Retweets`) from a CSV file.

pub mod reader;

pub use reader::{CsvRecordReader, InputRecord};
