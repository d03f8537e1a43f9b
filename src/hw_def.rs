//! Hardware definitions for the AHT10: bus address, command frames, status bit layout,
//! protocol delays, and the fixed-point transfer functions from the datasheet.

/// Fixed I²C bus address of the AHT10.
pub const I2C_ADDR: u8 = 0x38;

/// Milliseconds to let a soft reset settle before the next command.
pub const RESET_SETTLE_MS: u32 = 20;

/// Milliseconds between busy polls while waiting for the device to become ready.
pub const READY_POLL_MS: u32 = 10;

/// Default bound on busy polls before the driver gives up with
/// [`Error::ReadyTimeout`](crate::Error::ReadyTimeout). At [`READY_POLL_MS`] intervals
/// this is roughly one second, an order of magnitude above the device's worst-case
/// measurement time.
pub const DEFAULT_READY_POLL_LIMIT: u16 = 100;

/// Least significant bit of the busy field in the status byte.
pub const STATUS_FIELD_LSBIT_BUSY: u8 = 7;
/// Width of the busy field in the status byte.
pub const STATUS_FIELD_WIDTH_BUSY: u8 = 1;
/// Least significant bit of the calibrated field in the status byte.
pub const STATUS_FIELD_LSBIT_CALIBRATED: u8 = 3;
/// Width of the calibrated field in the status byte.
pub const STATUS_FIELD_WIDTH_CALIBRATED: u8 = 1;

/// Commands understood by the device. The parameter bytes of the three-byte commands
/// are fixed values from the datasheet with no documented meaning of their own.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    /// Software reset. Allow [`RESET_SETTLE_MS`] before issuing the next command.
    SoftReset,
    /// Start the internal calibration routine. Poll status until the busy bit clears,
    /// then check the calibrated bit.
    Calibrate,
    /// Trigger one measurement. Poll status until the busy bit clears, then read the
    /// 6-byte sample frame.
    TriggerMeasurement,
}

impl Command {
    /// The full command frame as written on the bus: opcode plus fixed parameter bytes.
    pub fn bytes(self) -> &'static [u8] {
        match self {
            Command::SoftReset => &[0xBA],
            Command::Calibrate => &[0xE1, 0x08, 0x00],
            Command::TriggerMeasurement => &[0xAC, 0x33, 0x00],
        }
    }
}

/// Unpack the 20-bit humidity field from a raw sample frame: byte 1, byte 2, and the
/// high nibble of byte 3.
pub fn raw_humidity(frame: &[u8; 6]) -> u32 {
    (frame[1] as u32) << 12 | (frame[2] as u32) << 4 | (frame[3] as u32) >> 4
}

/// Unpack the 20-bit temperature field from a raw sample frame: the low nibble of
/// byte 3, then bytes 4 and 5.
pub fn raw_temperature(frame: &[u8; 6]) -> u32 {
    ((frame[3] & 0x0F) as u32) << 16 | (frame[4] as u32) << 8 | frame[5] as u32
}

/// Relative humidity in percent from the 20-bit raw value.
pub fn raw_rel_humid_to_percent(raw: u32) -> f32 {
    raw as f32 * 100.0 / (1 << 20) as f32
}

/// Temperature in Centigrade from the 20-bit raw value.
pub fn raw_temp_to_centigrade(raw: u32) -> f32 {
    raw as f32 * 200.0 / (1 << 20) as f32 - 50.0
}

/// Temperature in Fahrenheit from the 20-bit raw value.
pub fn raw_temp_to_fahrenheit(raw: u32) -> f32 {
    raw_temp_to_centigrade(raw) * 9.0 / 5.0 + 32.0
}
