//! In-memory EC used by the integration tests.

#![allow(dead_code)]

use msi_ec_leds::EcTransport;

/// Which half of a transaction the fake refused.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FakeError {
    ReadFailed(u8),
    WriteFailed(u8),
}

/// A 256 byte register file which records every access.
pub struct FakeEc {
    pub registers: [u8; 256],
    pub reads: Vec<u8>,
    pub writes: Vec<(u8, u8)>,
    pub fail_read_at: Option<u8>,
    pub fail_write_at: Option<u8>,
}

impl FakeEc {
    pub fn new() -> FakeEc {
        FakeEc {
            registers: [0; 256],
            reads: Vec::new(),
            writes: Vec::new(),
            fail_read_at: None,
            fail_write_at: None,
        }
    }

    /// A fake whose registers from `address` onwards hold `bytes`.
    pub fn with_bytes(address: u8, bytes: &[u8]) -> FakeEc {
        let mut fake = FakeEc::new();
        let start = address as usize;
        fake.registers[start..start + bytes.len()].copy_from_slice(bytes);
        fake
    }
}

impl EcTransport for FakeEc {
    type Error = FakeError;

    fn read(&mut self, address: u8) -> Result<u8, FakeError> {
        self.reads.push(address);
        if self.fail_read_at == Some(address) {
            return Err(FakeError::ReadFailed(address));
        }
        Ok(self.registers[address as usize])
    }

    fn write(&mut self, address: u8, value: u8) -> Result<(), FakeError> {
        if self.fail_write_at == Some(address) {
            return Err(FakeError::WriteFailed(address));
        }
        self.writes.push((address, value));
        self.registers[address as usize] = value;
        Ok(())
    }
}
