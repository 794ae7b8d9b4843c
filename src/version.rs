//! EC firmware version
//!
//! The version is a 12 character ASCII string, e.g. `E14J1IMS.10B`, stored
//! in consecutive registers. It is not NUL terminated in the EC.

use core::fmt;

use crate::{Ec, EcTransport, Error, RegisterMap, SharedEc};

//
// Public Types
//

/// A firmware version string read from the EC.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FirmwareVersion {
    buffer: [u8; FW_VERSION_BUFFER_LEN],
}

//
// Public Data
//

/// Number of registers holding the version string
pub const FW_VERSION_LENGTH: usize = 12;

/// Size of the buffer holding the version string, including the terminator
pub const FW_VERSION_BUFFER_LEN: usize = FW_VERSION_LENGTH + 1;

//
// impls on Public Types
//

impl FirmwareVersion {
    /// Read the version string from the registers given in `map`.
    pub fn read<T>(ec: &mut Ec<T>, map: &RegisterMap) -> Result<FirmwareVersion, Error<T::Error>>
    where
        T: EcTransport,
    {
        let mut buffer = [0u8; FW_VERSION_BUFFER_LEN];
        ec.read_sequence(map.firmware_version, &mut buffer[..FW_VERSION_LENGTH])?;
        Ok(FirmwareVersion { buffer })
    }

    /// Like [`FirmwareVersion::read`], as one locked transaction.
    pub fn read_shared<T>(
        ec: &SharedEc<T>,
        map: &RegisterMap,
    ) -> Result<FirmwareVersion, Error<T::Error>>
    where
        T: EcTransport,
    {
        ec.lock(|ec| FirmwareVersion::read(ec, map))
    }

    /// The whole buffer, always ending in a zero byte.
    pub fn as_bytes_with_nul(&self) -> &[u8; FW_VERSION_BUFFER_LEN] {
        &self.buffer
    }

    /// Size of the buffer, terminator included. Always 13.
    pub const fn len(&self) -> usize {
        FW_VERSION_BUFFER_LEN
    }

    /// The buffer always holds the terminator, so this is never true. Use
    /// [`FirmwareVersion::as_bytes`] to check for a blank version.
    pub const fn is_empty(&self) -> bool {
        FW_VERSION_BUFFER_LEN == 0
    }

    /// The version bytes, up to the first zero byte.
    pub fn as_bytes(&self) -> &[u8] {
        let end = self
            .buffer
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(FW_VERSION_LENGTH);
        &self.buffer[..end]
    }

    /// The version as a string, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(self.as_bytes()).ok()
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in self.as_bytes() {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02x}", b)?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FirmwareVersion {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=[u8]:a}", self.as_bytes())
    }
}

//
// Tests
//


//
// End of file
//
