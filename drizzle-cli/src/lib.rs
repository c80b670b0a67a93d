//! Drizzle CLI library surface.
//!
//! Exposes configuration loading so integration tests can exercise it
//! the same way the binary does.

pub mod config;
