//! Domain building blocks shared by the `dunno` database and HTTP crates.

pub mod antiforgery;
pub mod error;
pub mod types;
pub mod upload;
