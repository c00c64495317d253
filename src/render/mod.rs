//! Rendering module for writing extraction results.

mod json;

pub use json::{to_json, write_json, JsonFormat};
