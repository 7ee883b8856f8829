//! telemetry/mod.rs
//! Per-call byte counters for the codec.
//!
//! Counters live on the stack of a single call and are reported through
//! `tracing` events; there is no global state.

pub mod counters;

pub use counters::*;
