//! Linux `ec_sys` transport
//!
//! With the `ec_sys` kernel module loaded (with `write_support=1` if you want
//! to change anything), the EC register space appears as a 256 byte file in
//! debugfs. The register address is the file offset.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::EcTransport;

//
// Public Data
//

/// Where `ec_sys` puts the register file
pub const EC_SYS_IO_PATH: &str = "/sys/kernel/debug/ec/ec0/io";

//
// Public Types
//

/// An [`EcTransport`] over the `ec_sys` debugfs file.
///
/// Any seekable byte stream works, which is handy for testing.
pub struct DebugfsTransport<F = File> {
    file: F,
}

//
// impls on Public Types
//

impl DebugfsTransport<File> {
    /// Open the `ec_sys` register file for reading and writing.
    pub fn open() -> io::Result<DebugfsTransport<File>> {
        DebugfsTransport::open_path(EC_SYS_IO_PATH)
    }

    /// Open a register file at a different path.
    pub fn open_path<P>(path: P) -> io::Result<DebugfsTransport<File>>
    where
        P: AsRef<Path>,
    {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(DebugfsTransport::new(file))
    }
}

impl<F> DebugfsTransport<F>
where
    F: Read + Write + Seek,
{
    /// Use an already-open register file.
    pub fn new(file: F) -> DebugfsTransport<F> {
        DebugfsTransport { file }
    }

    /// Give back the file.
    pub fn release(self) -> F {
        self.file
    }
}

impl<F> EcTransport for DebugfsTransport<F>
where
    F: Read + Write + Seek,
{
    type Error = io::Error;

    fn read(&mut self, address: u8) -> io::Result<u8> {
        let mut value = [0u8];
        self.file.seek(SeekFrom::Start(u64::from(address)))?;
        self.file.read_exact(&mut value)?;
        Ok(value[0])
    }

    fn write(&mut self, address: u8, value: u8) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(u64::from(address)))?;
        self.file.write_all(&[value])?;
        self.file.flush()
    }
}

//
// Tests
//

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::vec;

    #[test]
    fn address_is_file_offset() {
        let mut registers = vec![0u8; 256];
        registers[0x2B] = 0b0000_0100;
        let mut transport = DebugfsTransport::new(Cursor::new(registers));
        assert_eq!(transport.read(0x2B).unwrap(), 0b0000_0100);
        transport.write(0xFF, 0x42).unwrap();
        let registers = transport.release().into_inner();
        assert_eq!(registers[0xFF], 0x42);
        assert_eq!(registers.len(), 256);
    }

    #[test]
    fn open_path_reads_and_writes_a_register_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 256]).unwrap();
        file.flush().unwrap();

        let mut transport = DebugfsTransport::open_path(file.path()).unwrap();
        transport.write(0x2C, 0b0000_0100).unwrap();
        assert_eq!(transport.read(0x2C).unwrap(), 0b0000_0100);
        drop(transport);

        let contents = std::fs::read(file.path()).unwrap();
        assert_eq!(contents.len(), 256);
        assert_eq!(contents[0x2C], 0b0000_0100);
    }

    #[test]
    fn missing_register_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DebugfsTransport::open_path(dir.path().join("io")).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn short_file_is_an_error() {
        let mut transport = DebugfsTransport::new(Cursor::new(vec![0u8; 16]));
        let err = transport.read(0xA0).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}

//
// End of file
//
