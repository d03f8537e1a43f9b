use crate::hw_def::*;
use crate::types::*;

use embedded_hal_async::{delay::DelayNs, i2c::I2c};

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

impl<I2C, Delay, E> Aht10Async<I2C, Delay>
where
    I2C: I2c<Error = E>,
    Delay: DelayNs,
{
    /// Create a new AHT10 driver instance.
    ///
    /// The device sits at the fixed bus address [`I2C_ADDR`]. Call
    /// [`Aht10Async::init`] before taking measurements.
    pub fn new(i2c: I2C, delay: Delay) -> Self {
        Self {
            i2c,
            delay,
            ready_poll_limit: DEFAULT_READY_POLL_LIMIT,
            humidity: 0.0,
            temperature: 0.0,
        }
    }

    /// Override the bound on busy polls used by [`Aht10Async::wait_ready`].
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
    pub async fn init(&mut self) -> Result<(), Error<E>> {
        self.soft_reset().await?;

        if let Err(i2c_err) = self.i2c.write(I2C_ADDR, Command::Calibrate.bytes()).await {
            return Err(Error::I2c(i2c_err));
        }
        self.wait_ready().await?;

        if !self.read_status().await?.calibrated {
            warn!("aht10::init(): calibrated bit clear after calibration sequence");
            return Err(Error::NotCalibrated);
        }
        Ok(())
    }

    /// Software reset. Suspends for the [`RESET_SETTLE_MS`] settle time so the next
    /// command can be issued immediately after this returns.
    pub async fn soft_reset(&mut self) -> Result<(), Error<E>> {
        if let Err(i2c_err) = self.i2c.write(I2C_ADDR, Command::SoftReset.bytes()).await {
            return Err(Error::I2c(i2c_err));
        }
        self.delay.delay_ms(RESET_SETTLE_MS).await;
        Ok(())
    }

    /// Read the device status byte.
    pub async fn read_status(&mut self) -> Result<StatusBits, Error<E>> {
        let mut status = [0u8; 1];
        if let Err(i2c_err) = self.i2c.read(I2C_ADDR, &mut status).await {
            return Err(Error::I2c(i2c_err));
        }
        Ok(StatusBits::from(status[0]))
    }

    /// Wait until the device reports not-busy.
    ///
    /// A failed status read leaves readiness unknown and counts as still busy. Polls
    /// at [`READY_POLL_MS`] intervals up to the configured limit, then reports
    /// [`Error::ReadyTimeout`] rather than waiting forever on an unresponsive device.
    pub async fn wait_ready(&mut self) -> Result<(), Error<E>> {
        for _ in 0..self.ready_poll_limit {
            match self.read_status().await {
                Ok(status) if !status.busy => return Ok(()),
                Ok(_) => {}
                Err(_) => {
                    trace!("aht10::wait_ready(): status read failed, treating device as busy");
                }
            }
            self.delay.delay_ms(READY_POLL_MS).await;
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
    /// [`Aht10Async::humidity`] and [`Aht10Async::temperature`] go stale rather than
    /// blank; check the returned `Result` before trusting them.
    pub async fn measure(&mut self) -> Result<Reading, Error<E>> {
        if let Err(i2c_err) = self
            .i2c
            .write(I2C_ADDR, Command::TriggerMeasurement.bytes())
            .await
        {
            return Err(Error::I2c(i2c_err));
        }
        self.wait_ready().await?;

        let mut frame = [0u8; 6];
        if let Err(i2c_err) = self.i2c.read(I2C_ADDR, &mut frame).await {
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
    /// the first successful [`Aht10Async::measure`] call.
    pub fn humidity(&self) -> f32 {
        self.humidity
    }

    /// Temperature in Centigrade from the last successful measurement. Zero until the
    /// first successful [`Aht10Async::measure`] call.
    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}
