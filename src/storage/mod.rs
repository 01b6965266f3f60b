//! Storage helpers
//!
//! JSON reads for record sources and settings, and atomic writes for
//! settings files and export artifacts.

pub mod file_io;

pub use file_io::{read_json, read_json_value, write_bytes_atomic, write_json_atomic};
