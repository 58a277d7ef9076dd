//! Register-file model of an MPU-6050 for unit tests.
//!
//! Writes set the register pointer and store any data bytes with
//! auto-increment; reads return register contents from the pointer onward.

use std::collections::VecDeque;

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{self, ErrorKind, ErrorType, NoAcknowledgeSource, Operation, SevenBitAddress};

const ACCEL_XOUT_H: u8 = 0x3B;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nack;

impl i2c::Error for Nack {
  fn kind(&self) -> ErrorKind {
    ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
  }
}

pub struct MockI2c {
  regs: [u8; 128],
  ptr: u8,
  writes: Vec<(u8, u8)>,
  samples: VecDeque<[i16; 7]>,
  /// Number of upcoming reads whose bytes come back inverted.
  pub corrupt_reads: usize,
  /// Fail every transaction after this many.
  pub fail_after: Option<usize>,
  /// Transactions attempted, including failed ones.
  pub transactions: usize,
  pub last_address: Option<u8>,
}

impl MockI2c {
  /// Power-on state: asleep, `WHO_AM_I` = 0x68.
  pub fn new() -> Self {
    let mut regs = [0u8; 128];
    regs[0x6B] = 0x40;
    regs[0x75] = 0x68;
    MockI2c {
      regs,
      ptr: 0,
      writes: Vec::new(),
      samples: VecDeque::new(),
      corrupt_reads: 0,
      fail_after: None,
      transactions: 0,
      last_address: None,
    }
  }

  pub fn reg(&self, reg: u8) -> u8 {
    self.regs[reg as usize]
  }

  pub fn set_reg(&mut self, reg: u8, value: u8) {
    self.regs[reg as usize] = value;
  }

  /// Store a sample in the output registers; every burst read returns it.
  pub fn set_sample(&mut self, channels: [i16; 7]) {
    for (i, c) in channels.iter().enumerate() {
      let at = ACCEL_XOUT_H as usize + 2 * i;
      self.regs[at..at + 2].copy_from_slice(&c.to_be_bytes());
    }
  }

  /// Queue a sample to be latched right before the next burst read.
  pub fn push_sample(&mut self, channels: [i16; 7]) {
    self.samples.push_back(channels);
  }

  /// `(register, value)` for every data byte written.
  pub fn register_writes(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
    self.writes.iter().copied()
  }

  fn advance(&mut self) {
    self.ptr = (self.ptr + 1) % self.regs.len() as u8;
  }
}

impl ErrorType for MockI2c {
  type Error = Nack;
}

impl i2c::I2c<SevenBitAddress> for MockI2c {
  async fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
    self.transactions += 1;
    self.last_address = Some(address);
    if self.fail_after.is_some_and(|n| self.transactions > n) {
      return Err(Nack);
    }

    for op in operations {
      match op {
        Operation::Write(bytes) => {
          let Some((&reg, data)) = bytes.split_first() else { continue };
          self.ptr = reg;
          for &b in data {
            self.writes.push((self.ptr, b));
            self.regs[self.ptr as usize] = b;
            self.advance();
          }
        }
        Operation::Read(buf) => {
          if self.ptr == ACCEL_XOUT_H {
            if let Some(s) = self.samples.pop_front() {
              self.set_sample(s);
            }
          }
          let corrupt = if self.corrupt_reads > 0 {
            self.corrupt_reads -= 1;
            0xFF
          } else {
            0x00
          };
          for b in buf.iter_mut() {
            *b = self.regs[self.ptr as usize] ^ corrupt;
            self.advance();
          }
        }
      }
    }
    Ok(())
  }
}

#[derive(Default)]
pub struct MockDelay {
  pub total_ns: u64,
}

impl DelayNs for MockDelay {
  async fn delay_ns(&mut self, ns: u32) {
    self.total_ns += u64::from(ns);
  }
}
