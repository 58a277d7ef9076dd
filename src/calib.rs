//! Bias calibration at rest.
//!
//! The device must sit still, level, with Z pointing up for the whole run:
//! the mean becomes the bias subtracted by [`Mpu6050::to_physical`], which then
//! adds 1 g back to Z.

use core::fmt;

use embedded_hal_async::{delay::DelayNs, i2c::*};

use crate::{sample::Sample, Error, Mpu6050};

/// Per-channel statistics of one calibration run, in physical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
  pub mean: Sample,
  pub variance: Sample,
  /// `sqrtf(variance)`, per channel.
  pub std_dev: Sample,
  /// Samples per pass.
  pub samples: u32,
}

impl<I, D, E> Mpu6050<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  /// Measure the bias of every channel over `samples` uncorrected reads.
  ///
  /// Runs two passes of `samples` reads each: the first for the mean, the
  /// second for the variance around that mean. On success the result replaces
  /// the stored calibration; on a bus error the previous one is kept.
  /// `samples == 0` fails with [`Error::InvalidArgument`] without touching the bus.
  pub async fn calibrate(&mut self, samples: u32) -> Result<Calibration, Error<E>> {
    if samples == 0 {
      return Err(Error::InvalidArgument);
    }
    let n = samples as f32;

    let mut sum = [0f32; 7];
    for _ in 0..samples {
      let s = self.read(false).await?.channels();
      sum.iter_mut().zip(s).for_each(|(acc, v)| *acc += v);
    }
    let mean = sum.map(|s| s / n);

    let mut sq = [0f32; 7];
    for _ in 0..samples {
      let s = self.read(false).await?.channels();
      for ((acc, v), m) in sq.iter_mut().zip(s).zip(mean) {
        let d = v - m;
        *acc += d * d;
      }
    }
    let variance = sq.map(|s| s / n);

    let cal = Calibration {
      mean: Sample::from_channels(mean),
      variance: Sample::from_channels(variance),
      std_dev: Sample::from_channels(variance.map(libm::sqrtf)),
      samples,
    };
    log_info!(
      "calibrated over {} samples: accel bias {} {} {} g, gyro bias {} {} {} dps",
      samples,
      cal.mean.accel.x,
      cal.mean.accel.y,
      cal.mean.accel.z,
      cal.mean.gyro.x,
      cal.mean.gyro.y,
      cal.mean.gyro.z
    );

    self.calibration = Some(cal);
    Ok(cal)
  }
}

/// Three lines (`mean`, `var`, `std`), columns accel X/Y/Z, gyro X/Y/Z and
/// temperature last, each value as `%+-8.3f`.
impl fmt::Display for Calibration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (label, s) in [("mean", &self.mean), ("var", &self.variance), ("std", &self.std_dev)] {
      write!(f, "{:<8}", label)?;
      for v in [s.accel.x, s.accel.y, s.accel.z, s.gyro.x, s.gyro.y, s.gyro.z, s.temp] {
        write!(f, "{:<+8.3}", v)?;
      }
      f.write_str("\n\r")?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use embassy_futures::block_on;

  use super::*;
  use crate::{
    mock::{MockDelay, MockI2c},
    Config,
  };

  fn imu(i2c: MockI2c) -> Mpu6050<MockI2c, MockDelay> {
    Mpu6050::new(i2c, MockDelay::default(), Config::default())
  }

  fn close(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() <= tol
  }

  #[test]
  fn zero_samples_rejected_without_bus_traffic() {
    let mut imu = imu(MockI2c::new());

    assert!(matches!(block_on(imu.calibrate(0)), Err(Error::InvalidArgument)));
    assert_eq!(imu.i2c.transactions, 0);
    assert!(imu.calibration().is_none());
  }

  #[test]
  fn stationary_level_device() {
    let level = [0, 0, 16384, -521, -262, 0, 0];
    let mut i2c = MockI2c::new();
    i2c.set_sample(level);
    let mut imu = imu(i2c);

    let cal = block_on(imu.calibrate(1000)).unwrap();

    assert_eq!(imu.i2c.transactions, 2000);
    assert_eq!(cal.samples, 1000);
    assert_eq!(cal.mean.accel.x, 0.0);
    assert_eq!(cal.mean.accel.y, 0.0);
    assert_eq!(cal.mean.accel.z, 1.0);
    assert_eq!(cal.mean.gyro.x, -2.0);
    assert_eq!(cal.mean.gyro.z, 0.0);
    assert!(close(cal.mean.temp, -521.0 / 340.0, 1e-3));
    for (v, sd) in cal.variance.channels().into_iter().zip(cal.std_dev.channels()) {
      assert!(v >= 0.0 && v < 1e-6);
      assert_eq!(sd, libm::sqrtf(v));
    }
    assert_eq!(imu.calibration(), Some(&cal));
  }

  #[test]
  fn corrected_reading_after_calibration() {
    let level = [120, -80, 16000, 0, -262, 40, 7];
    let mut i2c = MockI2c::new();
    i2c.set_sample(level);
    let mut imu = imu(i2c);
    block_on(imu.calibrate(1000)).unwrap();

    let raw = block_on(imu.read_raw()).unwrap();
    assert_eq!(raw.channels(), level);
    let s = imu.to_physical(&raw, true);

    for v in [s.accel.x, s.accel.y, s.gyro.x, s.gyro.y, s.gyro.z] {
      assert!(close(v, 0.0, 1e-4), "{}", v);
    }
    assert!(close(s.accel.z, 1.0, 1e-4));
    assert_eq!(s.temp, 36.53);

    let read = block_on(imu.read(true)).unwrap();
    assert_eq!(read, s);
  }

  #[test]
  fn variance_of_alternating_samples() {
    let mut i2c = MockI2c::new();
    for i in 0..8 {
      let x = if i % 2 == 0 { 8192 } else { -8192 };
      i2c.push_sample([x, 0, 16384, 0, 0, 0, 0]);
    }
    let mut imu = imu(i2c);

    let cal = block_on(imu.calibrate(4)).unwrap();

    assert_eq!(cal.mean.accel.x, 0.0);
    assert_eq!(cal.variance.accel.x, 0.25);
    assert_eq!(cal.std_dev.accel.x, 0.5);
    assert_eq!(cal.variance.accel.z, 0.0);
  }

  #[test]
  fn bus_error_keeps_previous_calibration() {
    let mut i2c = MockI2c::new();
    i2c.set_sample([0, 0, 16384, 0, 0, 0, 0]);
    let mut imu = imu(i2c);
    let first = block_on(imu.calibrate(10)).unwrap();

    imu.i2c.set_sample([500, 500, 500, 0, 0, 0, 0]);
    imu.i2c.fail_after = Some(imu.i2c.transactions + 15);

    assert!(matches!(block_on(imu.calibrate(10)), Err(Error::I2c(_))));
    assert_eq!(imu.calibration(), Some(&first));
  }

  #[test]
  fn report_columns_put_temperature_last() {
    let mut i2c = MockI2c::new();
    i2c.set_sample([-8192, 0, 16384, 3400, 131, 0, 0]);
    let mut imu = imu(i2c);
    let cal = block_on(imu.calibrate(4)).unwrap();

    let report = std::format!("{}", cal);
    let lines: std::vec::Vec<&str> = report.split("\n\r").collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "mean    -0.500  +0.000  +1.000  +1.000  +0.000  +0.000  +10.000 ");
    assert_eq!(lines[1], "var     +0.000  +0.000  +0.000  +0.000  +0.000  +0.000  +0.000  ");
    assert_eq!(lines[2], "std     +0.000  +0.000  +0.000  +0.000  +0.000  +0.000  +0.000  ");
    assert_eq!(lines[3], "");
  }
}
