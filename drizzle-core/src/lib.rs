//! Drizzle core library
//!
//! This crate provides the arrival-count model and the real-time pacing
//! engine for the drizzle traffic replayer: interchangeable probability
//! distributions, windowed arrival sources, the aggregate system that
//! combines them into a per-tick event count, and the driver that spreads
//! emission of those events across wall-clock time.

pub mod dist;
pub mod error;
pub mod formula;
pub mod pacing;
pub mod seed;
pub mod source;
pub mod system;

pub use dist::{Dist, Sampler};
pub use error::{Error, Result};
pub use formula::Formula;
pub use pacing::{Pacer, PacerConfig, StopReason, Summary};
pub use source::Source;
pub use system::System;
