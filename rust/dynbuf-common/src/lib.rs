//! Error and result definitions shared by the dynbuf crates.

pub mod error;
pub mod result;

pub use result::Result;
