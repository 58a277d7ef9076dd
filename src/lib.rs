#![cfg_attr(not(test), no_std)]
#![doc = include_str!("../README.md")]
//!
//! ## Design Principles
//!
//! - **Type-safe**: Strongly-typed register structs and a [`Config`] with sensible defaults
//! - **Async-first**: Built on `embedded-hal-async` I2C traits
//! - **Verified configuration**: every configuration write is read back before moving on
//! - **Owned samples**: every read returns a fresh value, nothing is buffered in the driver
//!
//! ## Module Organization
//!
//! - [`accel`]: Accelerometer range register
//! - [`gyro`]: Gyroscope range register
//! - [`sample`]: Raw burst reads, unit conversion and polling
//! - [`calib`]: Bias calibration at rest
//!
//! ## Basic Usage
//!
//! ```no_run
//! use embedded_hal_async::{delay::DelayNs, i2c::I2c};
//! use mpu6050::{Config, Error, Mpu6050};
//!
//! async fn example<I: I2c, D: DelayNs>(i2c: I, delay: D) -> Result<(), Error<I::Error>> {
//!   let mut imu = Mpu6050::new(i2c, delay, Config::default());
//!
//!   // Verify the chip and bring it out of sleep
//!   imu.check_id().await?;
//!   imu.configure().await?;
//!
//!   // Level and still: learn the bias, then read corrected samples
//!   imu.calibrate(1000).await?;
//!   let sample = imu.read(true).await?;
//!   Ok(())
//! }
//! ```

use embedded_hal_async::{delay::DelayNs, i2c::*};

#[macro_use]
mod log;

pub mod accel;
pub mod calib;
mod defs;
pub mod gyro;
pub(crate) mod rw;
pub mod sample;
mod types;

#[cfg(test)]
mod mock;

use defs::*;
pub use accel::{AccelConfig, AccelRange};
pub use calib::Calibration;
pub use gyro::{GyroConfig, GyroRange};
pub use sample::{RawSample, Sample};
pub use types::*;

/// Driver error type.
///
/// This error type wraps the underlying I2C error and adds MPU-6050-specific
/// error conditions.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
  /// I2C communication error
  I2c(E),
  /// Chip ID mismatch (expected 0x68)
  InvalidChipId(u8),
  /// Register at the given address never read back the written value
  Config(u8),
  /// Invalid argument (e.g., zero calibration samples)
  InvalidArgument,
  /// Register contents do not decode into the expected type
  Data,
}

/// Device settings applied by [`Mpu6050::configure`].
///
/// The defaults select ±2 g, ±250 °/s, a 94 Hz low-pass filter and the
/// X gyro PLL as clock source.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
  /// 7-bit I2C address.
  pub address: u8,
  pub accel_range: AccelRange,
  pub gyro_range: GyroRange,
  pub filter: Dlpf,
  pub clock: ClockSource,
  /// Write+read-back cycles per register before giving up. At least one
  /// attempt is always made; `0` is treated as `1`.
  pub write_attempts: u8,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      address: ADDR_I2C_PRIM,
      accel_range: AccelRange::G2,
      gyro_range: GyroRange::DPS250,
      filter: Dlpf::Hz94,
      clock: ClockSource::PllGyroX,
      write_attempts: WRITE_ATTEMPTS,
    }
  }
}

/// MPU-6050 device driver instance.
///
/// It owns the I2C bus and delay provider, the range selection made at
/// construction, and the most recent [`Calibration`].
///
/// # Type Parameters
///
/// - `I`: I2C implementation (must implement `embedded_hal_async::i2c::I2c`)
/// - `D`: Delay provider (must implement `embedded_hal_async::delay::DelayNs`)
pub struct Mpu6050<I, D> {
  i2c: I,
  delay: D,
  config: Config,
  /// Counts per g
  accel_sens: f32,
  /// Counts per °/s
  gyro_sens: f32,
  calibration: Option<Calibration>,
}

impl<I, D, E> Mpu6050<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  /// Create a new MPU-6050 driver instance. No bus traffic happens until
  /// [`configure`](Self::configure) or a read is awaited.
  ///
  /// # Arguments
  ///
  /// - `i2c`: I2C bus implementation
  /// - `delay`: Delay provider used by [`poll`](Self::poll)
  /// - `config`: ranges, filter and address; fixed for the lifetime of the handle
  pub fn new(i2c: I, delay: D, config: Config) -> Self {
    let config = Config { write_attempts: config.write_attempts.max(1), ..config };
    Self {
      i2c,
      delay,
      accel_sens: config.accel_range.sensitivity(),
      gyro_sens: config.gyro_range.sensitivity(),
      config,
      calibration: None,
    }
  }

  /// The configuration this handle was created with.
  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Read the `WHO_AM_I` register.
  ///
  /// Returns the chip ID (should be `0x68` for MPU-6050).
  pub async fn get_id(&mut self) -> Result<u8, Error<E>> {
    self.read_u8(Reg::WhoAmI.into()).await
  }

  /// Read `WHO_AM_I` and fail with [`Error::InvalidChipId`] unless it is `0x68`.
  pub async fn check_id(&mut self) -> Result<(), Error<E>> {
    let id = self.get_id().await?;
    if id != MPU6050_CHIP_ID {
      log_warn!("unexpected WHO_AM_I {}", id);
      return Err(Error::InvalidChipId(id));
    }
    Ok(())
  }

  /// Apply the filter, gyro range, accel range and clock settings, then wake
  /// the device from sleep.
  ///
  /// Every register is written and read back; a register that does not latch
  /// within `write_attempts` tries fails the whole call with
  /// [`Error::Config`] and the remaining registers are left untouched.
  /// Do not read samples after an error here: the device may still be asleep
  /// or running with the wrong range.
  pub async fn configure(&mut self) -> Result<(), Error<E>> {
    let cfg = self.config;
    self.write_verified(Reg::Config, FilterConfig { dlpf: cfg.filter, ext_sync: 0 }).await?;
    self.write_verified(Reg::GyroConfig, GyroConfig::new(cfg.gyro_range)).await?;
    self.write_verified(Reg::AccelConfig, AccelConfig::new(cfg.accel_range)).await?;
    self.write_verified(Reg::PwrMgmt1, PowerConfig::awake(cfg.clock)).await?;
    log_info!("MPU-6050 configured at address {}", cfg.address);
    Ok(())
  }

  /// Read the `CONFIG` (low-pass filter) register.
  pub async fn get_filter_conf(&mut self) -> Result<FilterConfig, Error<E>> {
    self.read_reg(Reg::Config).await
  }

  /// Read the `PWR_MGMT_1` register.
  pub async fn get_power_conf(&mut self) -> Result<PowerConfig, Error<E>> {
    self.read_reg(Reg::PwrMgmt1).await
  }

  /// The bias reference from the last successful [`calibrate`](Self::calibrate).
  pub fn calibration(&self) -> Option<&Calibration> {
    self.calibration.as_ref()
  }
}
