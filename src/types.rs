/// `CONFIG` register: external frame sync and digital low-pass filter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
pub struct FilterConfig {
  /// Digital low-pass filter applied to both accel and gyro.
  #[bits(3)]
  pub dlpf: Dlpf,
  /// FSYNC pin sampling target (0 = disabled).
  #[bits(3)]
  pub ext_sync: u8,
}

impl Default for FilterConfig {
  fn default() -> Self {
    FilterConfig { dlpf: Dlpf::Hz94, ext_sync: 0 }
  }
}

/// Digital low‑pass filter bandwidth (accelerometer figure; the gyro is within
/// a few Hz). Narrower bandwidth trades latency for noise.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dlpf {
  /// 260 Hz, 0 ms delay. Gyro output rate becomes 8 kHz.
  Hz260 = 0,
  Hz184 = 1,
  Hz94 = 2,
  Hz44 = 3,
  Hz21 = 4,
  Hz10 = 5,
  /// 5 Hz, ~19 ms delay.
  Hz5 = 6,
}

impl From<Dlpf> for u8 {
  fn from(value: Dlpf) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for Dlpf {
  type Error = ();

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(Dlpf::Hz260),
      1 => Ok(Dlpf::Hz184),
      2 => Ok(Dlpf::Hz94),
      3 => Ok(Dlpf::Hz44),
      4 => Ok(Dlpf::Hz21),
      5 => Ok(Dlpf::Hz10),
      6 => Ok(Dlpf::Hz5),
      _ => Err(()),
    }
  }
}

/// `PWR_MGMT_1` register.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
pub struct PowerConfig {
  #[bits(3)]
  pub clock: ClockSource,
  /// Disables the temperature sensor.
  pub temp_dis: bool,
  #[skip(1)]
  /// Alternate between sleep and a single sample (low power accel mode).
  pub cycle: bool,
  /// Power-on state of the device is sleep.
  pub sleep: bool,
  pub device_reset: bool,
}

impl PowerConfig {
  /// Awake, continuously sampling, clocked from `clock`.
  pub fn awake(clock: ClockSource) -> Self {
    PowerConfig { clock, temp_dis: false, cycle: false, sleep: false, device_reset: false }
  }
}

/// Clock source. A gyro-referenced PLL is recommended over the internal oscillator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
  Internal8MHz = 0,
  PllGyroX = 1,
  PllGyroY = 2,
  PllGyroZ = 3,
  PllExt32k = 4,
  PllExt19M = 5,
  Stop = 7,
}

impl From<ClockSource> for u8 {
  fn from(value: ClockSource) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for ClockSource {
  type Error = ();

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(ClockSource::Internal8MHz),
      1 => Ok(ClockSource::PllGyroX),
      2 => Ok(ClockSource::PllGyroY),
      3 => Ok(ClockSource::PllGyroZ),
      4 => Ok(ClockSource::PllExt32k),
      5 => Ok(ClockSource::PllExt19M),
      7 => Ok(ClockSource::Stop),
      _ => Err(()),
    }
  }
}
