//! Proxlock Daemon - presence watching, badge unlock, keystroke injection
//!
//! This crate provides:
//! - Structured startup configuration with JSON persistence
//! - Device-node drivers behind the hardware trait seams
//! - The timed keystroke injector
//! - The lock/unlock controller and its tick loop

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod hal;
pub mod injector;

pub use clock::{Clock, MonotonicClock};
pub use config::DaemonConfig;
pub use controller::LockController;
pub use error::{DaemonError, Result};
pub use injector::KeystrokeInjector;
