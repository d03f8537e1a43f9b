use crate::hw_def::*;

use core::fmt;

#[cfg(feature = "defmt")]
use defmt::Format;

/// AHT10 device driver, blocking API
#[cfg(feature = "blocking")]
#[derive(Debug)]
pub struct Aht10<I2C, Delay> {
    pub(crate) i2c: I2C,
    pub(crate) delay: Delay,
    pub(crate) ready_poll_limit: u16,
    pub(crate) humidity: f32,
    pub(crate) temperature: f32,
}

/// AHT10 device driver, async API
#[cfg(feature = "async")]
#[derive(Debug)]
pub struct Aht10Async<I2C, Delay> {
    pub(crate) i2c: I2C,
    pub(crate) delay: Delay,
    pub(crate) ready_poll_limit: u16,
    pub(crate) humidity: f32,
    pub(crate) temperature: f32,
}

/// All possible errors in this crate
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Debug)]
pub enum Error<E> {
    /// I²C communication error
    I2c(E),
    /// The device did not report the calibrated bit set after a full calibration
    /// sequence
    NotCalibrated,
    /// The device still reported busy after the configured number of ready polls
    ReadyTimeout,
}

/// Status bits from the device
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StatusBits {
    raw: u8,
    /// a measurement or the calibration routine is still in progress
    pub busy: bool,
    /// the device has completed its internal calibration routine
    pub calibrated: bool,
}
impl From<u8> for StatusBits {
    fn from(raw: u8) -> Self {
        Self {
            raw,
            busy: (raw >> STATUS_FIELD_LSBIT_BUSY) & ((1 << STATUS_FIELD_WIDTH_BUSY) - 1) != 0,
            calibrated: (raw >> STATUS_FIELD_LSBIT_CALIBRATED)
                & ((1 << STATUS_FIELD_WIDTH_CALIBRATED) - 1)
                != 0,
        }
    }
}
impl StatusBits {
    /// Get the raw status byte
    pub fn raw(&self) -> u8 {
        self.raw
    }
}
impl fmt::Display for StatusBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StatusBits {{ 0x{:02x}; ", self.raw)?;
        if self.busy {
            write!(f, "busy ")?;
        }
        if self.calibrated {
            write!(f, "calibrated ")?;
        }
        write!(f, "}}")
    }
}

/// Raw 6-byte sample frame from the device: a status byte followed by the packed
/// 20-bit humidity and temperature fields
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Debug)]
pub struct RawSample(pub [u8; 6]);
impl RawSample {
    /// Status bits echoed in the first byte of the frame
    pub fn status(&self) -> StatusBits {
        StatusBits::from(self.0[0])
    }
    /// Get relative humidity in percent
    pub fn humidity_percent(&self) -> f32 {
        raw_rel_humid_to_percent(raw_humidity(&self.0))
    }
    /// Get temperature in Centigrade
    pub fn centigrade(&self) -> f32 {
        raw_temp_to_centigrade(raw_temperature(&self.0))
    }
    /// Get temperature in Fahrenheit
    pub fn fahrenheit(&self) -> f32 {
        raw_temp_to_fahrenheit(raw_temperature(&self.0))
    }
}

/// A sample from the device after conversion
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug)]
pub struct Reading {
    /// relative humidity in percent
    pub humidity_percent: f32,
    /// degrees centigrade
    pub centigrade: f32,
    /// degrees fahrenheit
    pub fahrenheit: f32,
}
impl From<&RawSample> for Reading {
    fn from(raw: &RawSample) -> Self {
        Self {
            humidity_percent: raw.humidity_percent(),
            centigrade: raw.centigrade(),
            fahrenheit: raw.fahrenheit(),
        }
    }
}
