//! XML helpers shared by the output writers.

pub mod escape;

pub use escape::{escape_text, escape_xml};
