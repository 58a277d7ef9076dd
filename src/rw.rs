use embedded_hal_async::{delay::DelayNs, i2c::*};

use crate::{defs::Reg, Error, Mpu6050};

impl<I, D, E> Mpu6050<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  pub(crate) async fn read_reg<T: TryFrom<[u8; 1]>>(&mut self, reg: Reg) -> Result<T, Error<E>> {
    let b = self.read_u8(reg.into()).await?;
    TryFrom::try_from([b]).map_err(|_| Error::Data)
  }

  pub(crate) async fn read_u8(&mut self, reg: u8) -> Result<u8, Error<E>> {
    let mut b = [0u8; 1];
    self.read_bytes(reg, &mut b).await?;
    Ok(b[0])
  }

  /// Burst read starting at `reg`. The device auto-increments the register pointer.
  pub(crate) async fn read_bytes(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Error<E>> {
    self.i2c.write_read(self.config.address, &[reg], buf).await.map_err(Error::I2c)
  }

  pub(crate) async fn write_u8(&mut self, reg: u8, value: u8) -> Result<(), Error<E>> {
    self.i2c.write(self.config.address, &[reg, value]).await.map_err(Error::I2c)
  }

  /// Encode a register struct and write it with read-back verification.
  pub(crate) async fn write_verified<T: TryInto<[u8; 1]>>(&mut self, reg: Reg, v: T) -> Result<(), Error<E>> {
    let [b] = v.try_into().map_err(|_| Error::Data)?;
    self.set_reg(reg.into(), b).await
  }

  /// Write `value` to `reg` and read it back until the device latches it.
  ///
  /// Each attempt is one write followed by one read-back. Bus errors abort
  /// immediately; only a mismatched read-back is retried, at most
  /// `config.write_attempts` times in total.
  pub(crate) async fn set_reg(&mut self, reg: u8, value: u8) -> Result<(), Error<E>> {
    for attempt in 1..=self.config.write_attempts {
      self.write_u8(reg, value).await?;
      let latched = self.read_u8(reg).await?;
      if latched == value {
        log_debug!("reg {} = {} latched after {} attempt(s)", reg, value, attempt);
        return Ok(());
      }
      log_debug!("reg {}: wrote {}, read back {}", reg, value, latched);
    }

    log_warn!("reg {} never latched {} in {} attempts", reg, value, self.config.write_attempts);
    Err(Error::Config(reg))
  }
}
