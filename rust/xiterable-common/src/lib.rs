//! Core definitions (error taxonomy and verification helpers), relied upon by all xiterable-* crates.

pub mod error;
pub mod result;

pub use error::{Error, ErrorKind};
pub use result::Result;
