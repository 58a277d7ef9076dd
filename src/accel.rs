//! Accelerometer configuration.
//!
//! The full-scale range is chosen once through [`Config`](crate::Config) and
//! written by [`configure`](crate::Mpu6050::configure). It fixes the divisor used
//! to turn raw counts into g.

use embedded_hal_async::{delay::DelayNs, i2c::*};

use super::{defs::*, Error, Mpu6050};

impl<I, D, E> Mpu6050<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  /// Read the `ACCEL_CONFIG` register as currently latched by the device.
  pub async fn get_accel_conf(&mut self) -> Result<AccelConfig, Error<E>> {
    self.read_reg(Reg::AccelConfig).await
  }
}

/// `ACCEL_CONFIG` register: full-scale range and per-axis self-test triggers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
pub struct AccelConfig {
  #[skip(3)]
  /// Full-scale measurement range (±2g, ±4g, ±8g, or ±16g).
  #[bits(2)]
  pub range: AccelRange,
  pub self_test_z: bool,
  pub self_test_y: bool,
  pub self_test_x: bool,
}

impl AccelConfig {
  pub fn new(range: AccelRange) -> Self {
    AccelConfig { range, self_test_z: false, self_test_y: false, self_test_x: false }
  }
}

impl Default for AccelConfig {
  fn default() -> Self {
    AccelConfig::new(AccelRange::G2)
  }
}

/// Accelerometer measurement range.
///
/// Higher ranges allow measuring stronger accelerations but with
/// lower resolution.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
  /// ±2g range
  #[default]
  G2 = 0x00,
  /// ±4g range
  G4 = 0x01,
  /// ±8g range
  G8 = 0x02,
  /// ±16g range
  G16 = 0x03,
}

impl AccelRange {
  /// Counts per g.
  pub fn sensitivity(self) -> f32 {
    match self {
      AccelRange::G2 => 16384.,
      AccelRange::G4 => 8192.,
      AccelRange::G8 => 4096.,
      AccelRange::G16 => 2048.,
    }
  }
}

impl From<AccelRange> for u8 {
  fn from(value: AccelRange) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for AccelRange {
  type Error = ();

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0x00 => Ok(AccelRange::G2),
      0x01 => Ok(AccelRange::G4),
      0x02 => Ok(AccelRange::G8),
      0x03 => Ok(AccelRange::G16),
      _ => Err(()),
    }
  }
}
