//! Glide Animation System
//!
//! Timer scheduling and physics for kinetic scrolling.
//!
//! # Features
//!
//! - **Cooperative Scheduler**: cancellable deferred tasks on a millisecond clock
//! - **Edge Resistance**: logarithmic rubber-band past a bound
//! - **Bounce**: velocity correction that pulls an out-of-bounds value back
//! - **Decay**: time-normalised exponential velocity decay

pub mod physics;
pub mod scheduler;

pub use physics::{bounce, decay_factor, limit, resist, unresist, EdgePhysics, ASYMPTOTE_MARGIN};
pub use scheduler::{Generation, TaskId, TaskScheduler};
