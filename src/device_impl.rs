use crate::hw_def::*;
use crate::types::*;

use embedded_hal::{delay::DelayNs, i2c::I2c};

cfg_if::cfg_if! {
    if #[cfg(feature = "defmt")] {
        use defmt::{trace, warn};
    } else if #[cfg(feature = "log")] {
        use log::{trace, warn};
    } else {
        macro_rules! trace {
            ($($arg:tt)*) => {};
        }
        macro_rules! warn {
            ($($arg:tt)*) => {};
        }
    }
}

impl<I2C, Delay, E> Aht10<I2C, Delay>
where
    I2C: I2c<Error = E>,
    Delay: DelayNs,
{
    /// Create a new AHT10 driver instance.
    ///
    /// The device sits at the fixed bus address [`I2C_ADDR`]. Call [`Aht10::init`]
    /// before taking measurements.
    pub fn new(i2c: I2C, delay: Delay) -> Self {
        Self {
            i2c,
            delay,
            ready_poll_limit: DEFAULT_READY_POLL_LIMIT,
            humidity: 0.0,
            temperature: 0.0,
        }
    }

    /// Override the bound on busy polls used by [`Aht10::wait_ready`].
    pub fn with_ready_poll_limit(mut self, limit: u16) -> Self {
        self.ready_poll_limit = limit;
        self
    }

    /// Destroy the driver instance and release the bus and delay resources
    pub fn destroy(self) -> (I2C, Delay) {
        (self.i2c, self.delay)
    }

    /// Run the one-time bring-up sequence: soft reset, calibration, and verification
    /// that the device reports itself calibrated.
    ///
    /// Nothing is retried; a transport failure or a device that never calibrates is
    /// reported to the caller, who may invoke `init` again.
    pub fn init(&mut self) -> Result<(), Error<E>> {
        self.soft_reset()?;

        if let Err(i2c_err) = self.i2c.write(I2C_ADDR, Command::Calibrate.bytes()) {
            return Err(Error::I2c(i2c_err));
        }
        self.wait_ready()?;

        if !self.read_status()?.calibrated {
            warn!("aht10::init(): calibrated bit clear after calibration sequence");
            return Err(Error::NotCalibrated);
        }
        Ok(())
    }

    /// Software reset. Blocks for the [`RESET_SETTLE_MS`] settle time so the next
    /// command can be issued immediately after this returns.
    pub fn soft_reset(&mut self) -> Result<(), Error<E>> {
        if let Err(i2c_err) = self.i2c.write(I2C_ADDR, Command::SoftReset.bytes()) {
            return Err(Error::I2c(i2c_err));
        }
        self.delay.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }

    /// Read the device status byte.
    pub fn read_status(&mut self) -> Result<StatusBits, Error<E>> {
        let mut status = [0u8; 1];
        if let Err(i2c_err) = self.i2c.read(I2C_ADDR, &mut status) {
            return Err(Error::I2c(i2c_err));
        }
        Ok(StatusBits::from(status[0]))
    }

    /// Block until the device reports not-busy.
    ///
    /// A failed status read leaves readiness unknown and counts as still busy. Polls
    /// at [`READY_POLL_MS`] intervals up to the configured limit, then reports
    /// [`Error::ReadyTimeout`] rather than hanging on an unresponsive device.
    pub fn wait_ready(&mut self) -> Result<(), Error<E>> {
        for _ in 0..self.ready_poll_limit {
            match self.read_status() {
                Ok(status) if !status.busy => return Ok(()),
                Ok(_) => {}
                Err(_) => {
                    trace!("aht10::wait_ready(): status read failed, treating device as busy");
                }
            }
            self.delay.delay_ms(READY_POLL_MS);
        }
        warn!(
            "aht10::wait_ready(): device still busy after {} polls",
            self.ready_poll_limit
        );
        Err(Error::ReadyTimeout)
    }

    /// Trigger one measurement cycle, decode the sample, and store the result.
    ///
    /// On any failure the values from the last successful cycle stay in place, so
    /// [`Aht10::humidity`] and [`Aht10::temperature`] go stale rather than blank;
    /// check the returned `Result` before trusting them.
    pub fn measure(&mut self) -> Result<Reading, Error<E>> {
        if let Err(i2c_err) = self.i2c.write(I2C_ADDR, Command::TriggerMeasurement.bytes()) {
            return Err(Error::I2c(i2c_err));
        }
        self.wait_ready()?;

        let mut frame = [0u8; 6];
        if let Err(i2c_err) = self.i2c.read(I2C_ADDR, &mut frame) {
            return Err(Error::I2c(i2c_err));
        }

        let reading = Reading::from(&RawSample(frame));
        self.humidity = reading.humidity_percent;
        self.temperature = reading.centigrade;
        trace!(
            "aht10::measure(): rh={} centigrade={}",
            reading.humidity_percent, reading.centigrade
        );
        Ok(reading)
    }

    /// Relative humidity in percent from the last successful measurement. Zero until
    /// the first successful [`Aht10::measure`] call.
    pub fn humidity(&self) -> f32 {
        self.humidity
    }

    /// Temperature in Centigrade from the last successful measurement. Zero until the
    /// first successful [`Aht10::measure`] call.
    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};
    use float_cmp::approx_eq;

    #[test]
    fn init_resets_calibrates_and_checks_status() {
        let expectations = [
            Transaction::write(I2C_ADDR, Command::SoftReset.bytes().to_vec()),
            Transaction::write(I2C_ADDR, Command::Calibrate.bytes().to_vec()),
            // busy once, then idle
            Transaction::read(I2C_ADDR, vec![0x88]),
            Transaction::read(I2C_ADDR, vec![0x08]),
            // final status check with the calibrated bit set
            Transaction::read(I2C_ADDR, vec![0x08]),
        ];
        let mut dev = Aht10::new(I2cMock::new(&expectations), NoopDelay::new());

        dev.init().unwrap();

        let (mut i2c, _) = dev.destroy();
        i2c.done();
    }

    #[test]
    fn init_fails_when_reset_write_is_rejected() {
        let expectations = [
            Transaction::write(I2C_ADDR, Command::SoftReset.bytes().to_vec())
                .with_error(ErrorKind::Other),
        ];
        let mut dev = Aht10::new(I2cMock::new(&expectations), NoopDelay::new());

        assert!(matches!(dev.init(), Err(Error::I2c(_))));

        let (mut i2c, _) = dev.destroy();
        i2c.done();
    }

    #[test]
    fn init_fails_when_calibrated_bit_stays_clear() {
        let expectations = [
            Transaction::write(I2C_ADDR, Command::SoftReset.bytes().to_vec()),
            Transaction::write(I2C_ADDR, Command::Calibrate.bytes().to_vec()),
            Transaction::read(I2C_ADDR, vec![0x00]),
            Transaction::read(I2C_ADDR, vec![0x00]),
        ];
        let mut dev = Aht10::new(I2cMock::new(&expectations), NoopDelay::new());

        assert!(matches!(dev.init(), Err(Error::NotCalibrated)));

        let (mut i2c, _) = dev.destroy();
        i2c.done();
    }

    #[test]
    fn measure_decodes_and_stores_the_sample() {
        // Sample frame captured from a live sensor: about 39.7 %RH at 22.5 °C.
        let expectations = [
            Transaction::write(I2C_ADDR, Command::TriggerMeasurement.bytes().to_vec()),
            Transaction::read(I2C_ADDR, vec![0x88]),
            Transaction::read(I2C_ADDR, vec![0x08]),
            Transaction::read(I2C_ADDR, vec![0x1C, 0x65, 0xB4, 0x25, 0xCD, 0x26]),
        ];
        let mut dev = Aht10::new(I2cMock::new(&expectations), NoopDelay::new());

        let reading = dev.measure().unwrap();
        assert!(approx_eq!(f32, reading.humidity_percent, 39.728, epsilon = 1e-3));
        assert!(approx_eq!(f32, reading.centigrade, 22.517, epsilon = 1e-3));
        assert_eq!(dev.humidity().to_bits(), reading.humidity_percent.to_bits());
        assert_eq!(dev.temperature().to_bits(), reading.centigrade.to_bits());

        let (mut i2c, _) = dev.destroy();
        i2c.done();
    }

    #[test]
    fn failed_sample_read_keeps_previous_values() {
        let expectations = [
            // first cycle succeeds
            Transaction::write(I2C_ADDR, Command::TriggerMeasurement.bytes().to_vec()),
            Transaction::read(I2C_ADDR, vec![0x08]),
            Transaction::read(I2C_ADDR, vec![0x1C, 0x66, 0x66, 0x66, 0x00, 0x00]),
            // second cycle: the sample read comes back short
            Transaction::write(I2C_ADDR, Command::TriggerMeasurement.bytes().to_vec()),
            Transaction::read(I2C_ADDR, vec![0x08]),
            Transaction::read(I2C_ADDR, vec![0u8; 6]).with_error(ErrorKind::Other),
        ];
        let mut dev = Aht10::new(I2cMock::new(&expectations), NoopDelay::new());

        dev.measure().unwrap();
        let humidity = dev.humidity();
        let temperature = dev.temperature();

        assert!(matches!(dev.measure(), Err(Error::I2c(_))));
        assert_eq!(dev.humidity().to_bits(), humidity.to_bits());
        assert_eq!(dev.temperature().to_bits(), temperature.to_bits());

        let (mut i2c, _) = dev.destroy();
        i2c.done();
    }

    #[test]
    fn rejected_trigger_write_fails_before_any_read() {
        let expectations = [
            Transaction::write(I2C_ADDR, Command::TriggerMeasurement.bytes().to_vec())
                .with_error(ErrorKind::Other),
        ];
        let mut dev = Aht10::new(I2cMock::new(&expectations), NoopDelay::new());

        assert!(matches!(dev.measure(), Err(Error::I2c(_))));
        assert_eq!(dev.humidity(), 0.0);
        assert_eq!(dev.temperature(), 0.0);

        let (mut i2c, _) = dev.destroy();
        i2c.done();
    }

    #[test]
    fn failed_status_read_counts_as_busy() {
        let expectations = [
            Transaction::read(I2C_ADDR, vec![0x00]).with_error(ErrorKind::Other),
            Transaction::read(I2C_ADDR, vec![0x08]),
        ];
        let mut dev = Aht10::new(I2cMock::new(&expectations), NoopDelay::new());

        dev.wait_ready().unwrap();

        let (mut i2c, _) = dev.destroy();
        i2c.done();
    }

    #[test]
    fn wait_ready_times_out_instead_of_hanging() {
        let expectations = [
            Transaction::read(I2C_ADDR, vec![0x88]),
            Transaction::read(I2C_ADDR, vec![0x88]),
            Transaction::read(I2C_ADDR, vec![0x88]),
        ];
        let mut dev =
            Aht10::new(I2cMock::new(&expectations), NoopDelay::new()).with_ready_poll_limit(3);

        assert!(matches!(dev.wait_ready(), Err(Error::ReadyTimeout)));

        let (mut i2c, _) = dev.destroy();
        i2c.done();
    }

    #[test]
    fn read_status_decodes_the_byte() {
        let expectations = [Transaction::read(I2C_ADDR, vec![0x88])];
        let mut dev = Aht10::new(I2cMock::new(&expectations), NoopDelay::new());

        let status = dev.read_status().unwrap();
        assert!(status.busy);
        assert!(status.calibrated);

        let (mut i2c, _) = dev.destroy();
        i2c.done();
    }
}
