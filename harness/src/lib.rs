//! Offline replay harness for the observation pipeline.
//!
//! Stands in for the live page-injection layer: frame traces recorded from
//! the host game (or synthesized) are replayed through a [`slither_gym_core::GymSession`],
//! and the emitted observation stream plus run metrics are written out for
//! inspection.

pub mod config;
pub mod runner;
pub mod trace;
