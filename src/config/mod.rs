//! Configuration for the anime4k command line tool
//!
//! Provides types, discovery and parsing for `anime4k.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
