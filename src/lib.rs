//! DHT11 Sensor Driver for Embedded Rust
//!
//! This crate provides a platform-agnostic driver for the DHT11 temperature
//! and humidity sensor, built on top of the [`embedded-hal`] traits.
//!
//! The sensor answers a start pulse with 40 bits encoded as pulse widths on a
//! single data line. The driver times every pulse by busy-waiting one
//! microsecond per tick, decodes the data pulses by length and validates the
//! frame checksum.
//!
//! # Features
//! - Blocking synchronous API using `embedded-hal` traits
//! - Designed for `no_std` environments
//! - Recalibratable protocol timing ([`Timing`])
//! - Bounded or unbounded retries ([`RetryPolicy`])
//! - Optional logging support via `defmt`
//!
//! # Dependencies
//! This driver depends on the following `embedded-hal` traits:
//! - [`InputPin`] and [`OutputPin`] for GPIO access (open-drain pin)
//! - [`DelayNs`] for accurate timing
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` for logging support and emits
//!   driver diagnostics
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`InputPin`]: embedded_hal::digital::InputPin
//! [`OutputPin`]: embedded_hal::digital::OutputPin
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod dht11;
pub mod error;
pub mod frame;

pub use config::{RetryPolicy, Timing};
pub use dht11::Dht11;
pub use error::DhtError;
pub use frame::{Frame, Reading};
