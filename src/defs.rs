#[repr(u8)]
pub(crate) enum Reg {
  Config = 0x1A,
  GyroConfig = 0x1B,
  AccelConfig = 0x1C,
  AccelXoutH = 0x3B,
  PwrMgmt1 = 0x6B,
  WhoAmI = 0x75,
}

impl From<Reg> for u8 {
  #[inline]
  fn from(r: Reg) -> Self {
    r as u8
  }
}

// Constants used across the crate
pub(crate) const MPU6050_CHIP_ID: u8 = 0x68;
pub(crate) const WRITE_ATTEMPTS: u8 = 20;

// I2C address (AD0 low)
pub(crate) const ADDR_I2C_PRIM: u8 = 0x68;

// Accel X/Y/Z, temperature, gyro X/Y/Z, big-endian
pub(crate) const SAMPLE_LEN: usize = 14;

// Temperature transfer function: deg C = raw / 340 + 36.53
pub(crate) const TEMP_SENSITIVITY: f32 = 340.0;
pub(crate) const TEMP_OFFSET: f32 = 36.53;
