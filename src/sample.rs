//! Sample acquisition and conversion.
//!
//! One burst read of the 14 output registers yields a [`RawSample`];
//! [`Mpu6050::to_physical`] turns it into a [`Sample`] in g, °C and °/s using
//! the range selected at construction and, optionally, the stored calibration.
//!
//! # Examples
//!
//! ```no_run
//! # use embedded_hal_async::{delay::DelayNs, i2c::I2c};
//! # async fn example<I: I2c, D: DelayNs>(mut imu: mpu6050::Mpu6050<I, D>) -> Result<(), mpu6050::Error<I::Error>> {
//! let raw = imu.read_raw().await?;
//! let g = imu.to_physical(&raw, false);
//! let z = g.accel.z;
//! # Ok(())
//! # }
//! ```

use core::{convert::Infallible, fmt};

use embedded_hal_async::{delay::DelayNs, i2c::*};
use micromath::vector::Vector3d;

use super::{defs::*, Error, Mpu6050};

/// Default polling period, 20 Hz.
pub const DEFAULT_POLL_MS: u32 = 50;

/// Output registers as read, in counts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawSample {
  pub accel: Vector3d<i16>,
  pub temp: i16,
  pub gyro: Vector3d<i16>,
}

impl RawSample {
  /// Channels in register order: accel X/Y/Z, temperature, gyro X/Y/Z.
  pub fn channels(&self) -> [i16; 7] {
    [self.accel.x, self.accel.y, self.accel.z, self.temp, self.gyro.x, self.gyro.y, self.gyro.z]
  }
}

/// Decode `ACCEL_XOUT_H..=GYRO_ZOUT_L`. Each channel is a big-endian pair.
impl From<[u8; 14]> for RawSample {
  fn from(b: [u8; 14]) -> Self {
    let word = |i: usize| i16::from_be_bytes([b[2 * i], b[2 * i + 1]]);
    RawSample {
      accel: Vector3d { x: word(0), y: word(1), z: word(2) },
      temp: word(3),
      gyro: Vector3d { x: word(4), y: word(5), z: word(6) },
    }
  }
}

/// Comma separated, register order.
impl fmt::Display for RawSample {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let [ax, ay, az, t, gx, gy, gz] = self.channels();
    write!(f, "{},{},{},{},{},{},{}", ax, ay, az, t, gx, gy, gz)
  }
}

/// Converted sample: acceleration in g, temperature in °C, angular rate in °/s.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
  pub accel: Vector3d<f32>,
  pub temp: f32,
  pub gyro: Vector3d<f32>,
}

impl Sample {
  /// Channels in register order: accel X/Y/Z, temperature, gyro X/Y/Z.
  pub fn channels(&self) -> [f32; 7] {
    [self.accel.x, self.accel.y, self.accel.z, self.temp, self.gyro.x, self.gyro.y, self.gyro.z]
  }

  pub fn from_channels(c: [f32; 7]) -> Self {
    Sample {
      accel: Vector3d { x: c[0], y: c[1], z: c[2] },
      temp: c[3],
      gyro: Vector3d { x: c[4], y: c[5], z: c[6] },
    }
  }
}

impl<I, D, E> Mpu6050<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  /// Read all seven output channels in one burst.
  ///
  /// A bus error is returned as is; the read is never retried, so a
  /// returned sample is always fresh.
  pub async fn read_raw(&mut self) -> Result<RawSample, Error<E>> {
    let mut b = [0u8; SAMPLE_LEN];
    self.read_bytes(Reg::AccelXoutH.into(), &mut b).await?;
    Ok(RawSample::from(b))
  }

  /// Read one sample and convert it, see [`to_physical`](Self::to_physical).
  pub async fn read(&mut self, apply_bias: bool) -> Result<Sample, Error<E>> {
    let raw = self.read_raw().await?;
    Ok(self.to_physical(&raw, apply_bias))
  }

  /// Convert counts to physical units.
  ///
  /// With `apply_bias` the temperature gets its 36.53 °C offset and, once
  /// [`calibrate`](Self::calibrate) has run, the calibration mean is
  /// subtracted from every accel and gyro channel. Calibration happens level
  /// with Z up, so 1 g is added back to Z afterwards.
  pub fn to_physical(&self, raw: &RawSample, apply_bias: bool) -> Sample {
    let a = self.accel_sens;
    let g = self.gyro_sens;
    let mut s = Sample {
      accel: Vector3d { x: raw.accel.x as f32 / a, y: raw.accel.y as f32 / a, z: raw.accel.z as f32 / a },
      temp: raw.temp as f32 / TEMP_SENSITIVITY,
      gyro: Vector3d { x: raw.gyro.x as f32 / g, y: raw.gyro.y as f32 / g, z: raw.gyro.z as f32 / g },
    };

    if apply_bias {
      s.temp += TEMP_OFFSET;
      if let Some(bias) = self.calibration.as_ref().map(|c| c.mean) {
        s.accel.x -= bias.accel.x;
        s.accel.y -= bias.accel.y;
        s.accel.z = s.accel.z - bias.accel.z + 1.0;
        s.gyro.x -= bias.gyro.x;
        s.gyro.y -= bias.gyro.y;
        s.gyro.z -= bias.gyro.z;
      }
    }
    s
  }

  /// Read raw samples forever, handing each to `sink` and then waiting
  /// `period_ms` (see [`DEFAULT_POLL_MS`]).
  ///
  /// Only returns when a read fails.
  pub async fn poll<F: FnMut(RawSample)>(&mut self, period_ms: u32, mut sink: F) -> Result<Infallible, Error<E>> {
    loop {
      let raw = self.read_raw().await?;
      sink(raw);
      self.delay.delay_ms(period_ms).await;
    }
  }
}
