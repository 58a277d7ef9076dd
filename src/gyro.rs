//! Gyroscope configuration.

use embedded_hal_async::{delay::DelayNs, i2c::*};

use super::{defs::*, Error, Mpu6050};

impl<I, D, E> Mpu6050<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  /// Read the current gyroscope configuration.
  pub async fn get_gyro_conf(&mut self) -> Result<GyroConfig, Error<E>> {
    self.read_reg(Reg::GyroConfig).await
  }
}

/// `GYRO_CONFIG` register.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
pub struct GyroConfig {
  #[skip(3)]
  /// Full-scale range (±250°/s to ±2000°/s).
  #[bits(2)]
  pub range: GyroRange,
  pub self_test_z: bool,
  pub self_test_y: bool,
  pub self_test_x: bool,
}

impl GyroConfig {
  pub fn new(range: GyroRange) -> Self {
    GyroConfig { range, self_test_z: false, self_test_y: false, self_test_x: false }
  }
}

impl Default for GyroConfig {
  fn default() -> Self {
    GyroConfig::new(GyroRange::DPS250)
  }
}

/// Gyroscope measurement ranges
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroRange {
  /// ±250 degrees per second
  #[default]
  DPS250 = 0,
  /// ±500 degrees per second
  DPS500 = 1,
  /// ±1000 degrees per second
  DPS1000 = 2,
  /// ±2000 degrees per second
  DPS2000 = 3,
}

impl GyroRange {
  /// Counts per degree per second, as tabulated in the datasheet (not `i16::MAX / dps`).
  pub fn sensitivity(self) -> f32 {
    match self {
      GyroRange::DPS250 => 131.0,
      GyroRange::DPS500 => 65.5,
      GyroRange::DPS1000 => 32.8,
      GyroRange::DPS2000 => 16.4,
    }
  }
}

impl From<GyroRange> for u8 {
  fn from(value: GyroRange) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for GyroRange {
  type Error = ();

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(GyroRange::DPS250),
      1 => Ok(GyroRange::DPS500),
      2 => Ok(GyroRange::DPS1000),
      3 => Ok(GyroRange::DPS2000),
      _ => Err(()),
    }
  }
}
