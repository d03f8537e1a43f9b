//! This is a platform-agnostic Rust driver for the Aosong AHT10 humidity and temperature
//! digital sensor using the [`embedded-hal`] or [`embedded-hal-async`] traits.
//!
//! [`embedded-hal`]: https://github.com/rust-embedded/embedded-hal/tree/master/embedded-hal
//! [`embedded-hal-async`]: https://github.com/rust-embedded/embedded-hal/tree/master/embedded-hal-async
//!
//! This driver allows you to:
//! - Run the one-time bring-up sequence: soft reset, calibration, and verification that
//!   the device reports itself calibrated.
//! - Trigger a measurement and decode the packed 20-bit humidity and temperature fields
//!   into relative humidity percent and degrees Centigrade or Fahrenheit.
//! - Read the device status bits (busy, calibrated).
//! - Trigger a standalone software reset.
//! - Re-read the last decoded values without touching the bus.
//! - Bound the busy wait so an unresponsive device reports a timeout instead of
//!   hanging the caller.
//! - Blocking API support.
//! - Async API support.
//!
//! This driver does not support the following:
//! - Sensor variants (AHT20/AHT30) and their CRC-trailed sample frames.
//! - The alternate bus address; the AHT10 is driven at its fixed address `0x38`.
//! - Multiple sensors on one bus.
//!
//! ## Features
//!
//! - `async`: Enables async API.
//! - `blocking`: Enables blocking API.
//! - `defmt`: Enables logging using the `defmt` framework.
//! - `log`: Enables logging using the `log` framework.
//!
//! ## Supported devices: AHT10
//!
//! The AHT10 is an integrated capacitive relative humidity (RH) and temperature sensor
//! with a calibrated digital output on a two-wire interface. Each sample is returned as
//! a 6-byte frame: a status byte followed by two packed 20-bit fields, humidity and
//! temperature, which this driver converts with the device's documented transfer
//! functions (`h / 2^20 * 100` %RH and `t / 2^20 * 200 - 50` °C).
//!
//! Datasheet: [Aosong AHT10](http://www.aosong.com/en/products-40.html)
//!
//! To use this driver, import this crate and an `embedded_hal` or `embedded_hal_async`
//! implementation, then instantiate the device.
//!
//! ## Blocking Example:
//!
//! ```ignore
//! use aht10::Aht10;
//!
//! // Platform-specific
//! let i2c = /* embedded_hal::i2c::I2c instance */;
//! let delay = /* embedded_hal::delay::DelayNs instance */;
//!
//! // Aht10
//! let mut aht10 = Aht10::new(i2c, delay);
//! aht10.init().unwrap();
//!
//! loop {
//!     let reading = aht10.measure().unwrap();
//!     println!("{:3.1} %RH, {:0.1} °C", reading.humidity_percent, reading.centigrade);
//!
//!     // Platform-specific: sleep a while
//!     sleep_secs(1);
//! }
//! ```
//!
//! ## Async Example:
//!
//! ```ignore
//! use aht10::Aht10Async;
//!
//! // Platform-specific
//! let i2c = /* embedded_hal_async::i2c::I2c instance */;
//! let delay = /* embedded_hal_async::delay::DelayNs instance */;
//!
//! // Aht10
//! let mut aht10 = Aht10Async::new(i2c, delay);
//! aht10.init().await.unwrap();
//!
//! loop {
//!     let reading = aht10.measure().await.unwrap();
//!     println!("{:3.1} %RH, {:0.1} °C", reading.humidity_percent, reading.centigrade);
//!
//!     // Platform-specific: sleep a while
//!     sleep_secs(1).await;
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(not(test), no_std)]

#[cfg(not(any(feature = "async", feature = "blocking")))]
compile_error!("At least one of \"async\" and \"blocking\" features must be enabled");

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("Features \"defmt\" and \"log\" are mutually exclusive and cannot be enabled together");

#[cfg(feature = "blocking")]
mod device_impl;
#[cfg(feature = "async")]
mod device_impl_async;
mod hw_def;
mod types;

pub use crate::{hw_def::*, types::*};
