//! # MSI Embedded Controller LED Driver
//!
//! This is a driver for the keyboard mute LEDs and firmware version registers
//! found in the Embedded Controller (EC) of MSI laptops such as the Modern 14
//! B5M.
//!
//! The EC exposes a 256-byte register space. The only primitives the transport
//! gives us are "read one byte" and "write one byte" (see [`EcTransport`]), so
//! everything else is built on top of those:
//!
//! * Testing, setting and clearing a single bit of a register
//! * Reading a contiguous run of registers
//!
//! Several unrelated features share each register byte, so setting or clearing
//! a bit is always a read-modify-write of the whole byte. The [`SharedEc`]
//! wrapper runs each read-modify-write inside a critical section so two LEDs
//! living in the same register cannot lose each other's updates.
//!
//! Which register holds which LED varies between hardware revisions, so the
//! addresses live in a [`RegisterMap`] supplied per target device. A preset
//! for the Modern 14 B5M is provided.
//!
//! # Example
//!
//! ```rust
//! # struct Registers([u8; 256]);
//! # impl msi_ec_leds::EcTransport for Registers {
//! #     type Error = ();
//! #     fn read(&mut self, address: u8) -> Result<u8, ()> {
//! #         Ok(self.0[address as usize])
//! #     }
//! #     fn write(&mut self, address: u8, value: u8) -> Result<(), ()> {
//! #         self.0[address as usize] = value;
//! #         Ok(())
//! #     }
//! # }
//! # let transport = Registers([0; 256]);
//! use msi_ec_leds::{Brightness, Indicator, Platform, RegisterMap, SharedEc};
//!
//! let ec = SharedEc::new(transport);
//! let mut platform = match Platform::probe(&ec, &RegisterMap::MODERN_14_B5M) {
//!     Ok(platform) => platform,
//!     Err(_e) => {
//!         // EC didn't respond
//!         return;
//!     }
//! };
//! if let Err(_e) = platform.mic_mute().set(Brightness::On) {
//!     // EC didn't respond
//! }
//! ```

#![no_std]
#![deny(unsafe_code)]
#![deny(missing_docs)]

#[cfg(any(test, feature = "std"))]
extern crate std;

use core::cell::RefCell;
use core::fmt;

#[cfg(feature = "std")]
pub mod debugfs;
pub mod flag;
pub mod i2c;
pub mod led;
pub mod map;
pub mod platform;
pub mod version;

#[cfg(feature = "std")]
pub use debugfs::DebugfsTransport;
pub use flag::EcFlag;
pub use i2c::I2cTransport;
pub use led::{Brightness, EcLed, Indicator, LedDescriptor, AUDIO_MUTE_LED, MIC_MUTE_LED};
pub use map::{Control, Polarity, RegisterMap};
pub use platform::{dump_controls, ControlState, Platform};
pub use version::{FirmwareVersion, FW_VERSION_BUFFER_LEN, FW_VERSION_LENGTH};

//
// Public Types
//

/// Byte-wide access to the EC register space.
///
/// This is all the driver needs from the hardware. Every call is a complete
/// transaction, and either transfers the whole byte or fails.
pub trait EcTransport {
    /// The error the underlying bus reports
    type Error;

    /// Read the register at `address`.
    fn read(&mut self, address: u8) -> Result<u8, Self::Error>;

    /// Write `value` to the register at `address`.
    fn write(&mut self, address: u8, value: u8) -> Result<(), Self::Error>;
}

/// The ways a register access can fail.
///
/// `E` is the error type of the [`EcTransport`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Reading a register failed
    Read {
        /// The register we were reading
        address: u8,
        /// What the transport reported
        source: E,
    },
    /// Writing a register failed
    Write {
        /// The register we were writing
        address: u8,
        /// What the transport reported
        source: E,
    },
    /// A bit index outside `0..=7` was given. Nothing was sent to the EC.
    InvalidBit(u8),
}

/// Register accessor for an Embedded Controller.
///
/// Nothing is cached: every call goes to the transport, so every result
/// reflects the live state of the EC.
pub struct Ec<T> {
    transport: T,
}

/// An [`Ec`] which serialises all register access.
///
/// Each operation holds a critical section from the first read until the
/// matching write has completed (or failed), so concurrent read-modify-write
/// sequences on the same register cannot interleave.
pub struct SharedEc<T> {
    ec: critical_section::Mutex<RefCell<Ec<T>>>,
}

//
// Public Data
//

/// The highest bit index within a register
pub const MAX_BIT: u8 = 7;

//
// impls on Public Types
//

impl<T> EcTransport for &mut T
where
    T: EcTransport + ?Sized,
{
    type Error = T::Error;

    fn read(&mut self, address: u8) -> Result<u8, Self::Error> {
        (**self).read(address)
    }

    fn write(&mut self, address: u8, value: u8) -> Result<(), Self::Error> {
        (**self).write(address, value)
    }
}

impl<E> Error<E> {
    /// The register address involved, if any.
    pub fn address(&self) -> Option<u8> {
        match self {
            Error::Read { address, .. } | Error::Write { address, .. } => Some(*address),
            Error::InvalidBit(_) => None,
        }
    }

    /// Was this a failed register read?
    pub fn is_read(&self) -> bool {
        matches!(self, Error::Read { .. })
    }

    /// Was this a failed register write?
    pub fn is_write(&self) -> bool {
        matches!(self, Error::Write { .. })
    }

    /// Get back the transport error, if the transport failed.
    pub fn into_source(self) -> Option<E> {
        match self {
            Error::Read { source, .. } | Error::Write { source, .. } => Some(source),
            Error::InvalidBit(_) => None,
        }
    }
}

impl<E> fmt::Display for Error<E>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read { address, source } => {
                write!(f, "EC read of 0x{:02x} failed: {:?}", address, source)
            }
            Error::Write { address, source } => {
                write!(f, "EC write of 0x{:02x} failed: {:?}", address, source)
            }
            Error::InvalidBit(bit) => write!(f, "bit {} is not within a register", bit),
        }
    }
}

#[cfg(feature = "std")]
impl<E> std::error::Error for Error<E> where E: fmt::Debug {}

impl<T> Ec<T>
where
    T: EcTransport,
{
    /// Create a new EC accessor on top of the given transport.
    pub const fn new(transport: T) -> Ec<T> {
        Ec { transport }
    }

    /// Give back the transport.
    pub fn release(self) -> T {
        self.transport
    }

    /// Borrow the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Read one whole register.
    pub fn read_byte(&mut self, address: u8) -> Result<u8, Error<T::Error>> {
        self.transport
            .read(address)
            .map_err(|source| Error::Read { address, source })
    }

    /// Write one whole register.
    pub fn write_byte(&mut self, address: u8, value: u8) -> Result<(), Error<T::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Setting EC 0x{:02x} to 0x{:02x}", address, value);
        self.transport
            .write(address, value)
            .map_err(|source| Error::Write { address, source })
    }

    /// Check whether bit `bit` (0 is the LSB) of a register is set.
    ///
    /// Does not change anything on the EC.
    pub fn read_bit(&mut self, address: u8, bit: u8) -> Result<bool, Error<T::Error>> {
        let mask = bit_mask(bit)?;
        Ok(self.read_byte(address)? & mask != 0)
    }

    /// Set one bit of a register, leaving the other seven alone.
    ///
    /// The byte is always written back, even if the bit was already set.
    pub fn set_bit(&mut self, address: u8, bit: u8) -> Result<(), Error<T::Error>> {
        self.modify(address, bit, |stored, mask| stored | mask)
    }

    /// Clear one bit of a register, leaving the other seven alone.
    ///
    /// The byte is always written back, even if the bit was already clear.
    pub fn clear_bit(&mut self, address: u8, bit: u8) -> Result<(), Error<T::Error>> {
        self.modify(address, bit, |stored, mask| stored & !mask)
    }

    /// Set the bit if `set` is true, otherwise clear it.
    pub fn update_bit(&mut self, address: u8, bit: u8, set: bool) -> Result<(), Error<T::Error>> {
        if set {
            self.set_bit(address, bit)
        } else {
            self.clear_bit(address, bit)
        }
    }

    /// Fill `buffer` from consecutive registers starting at `address`.
    ///
    /// Registers are read one at a time. The address wraps at 0xFF. Reading
    /// stops at the first failure, in which case `buffer` is zeroed and only
    /// the error is returned.
    pub fn read_sequence(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Error<T::Error>> {
        for offset in 0..buffer.len() {
            match self.read_byte(address.wrapping_add(offset as u8)) {
                Ok(value) => buffer[offset] = value,
                Err(e) => {
                    buffer.fill(0);
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Read `N` consecutive registers starting at `address`.
    ///
    /// See [`Ec::read_sequence`].
    pub fn read_array<const N: usize>(&mut self, address: u8) -> Result<[u8; N], Error<T::Error>> {
        let mut buffer = [0u8; N];
        self.read_sequence(address, &mut buffer)?;
        Ok(buffer)
    }

    /// Read a register, change it, and write it back.
    fn modify<F>(&mut self, address: u8, bit: u8, f: F) -> Result<(), Error<T::Error>>
    where
        F: FnOnce(u8, u8) -> u8,
    {
        let mask = bit_mask(bit)?;
        let stored = self.read_byte(address)?;
        self.write_byte(address, f(stored, mask))
    }
}

impl<T> SharedEc<T>
where
    T: EcTransport,
{
    /// Wrap a transport so it can be shared between several LEDs.
    pub const fn new(transport: T) -> SharedEc<T> {
        SharedEc {
            ec: critical_section::Mutex::new(RefCell::new(Ec::new(transport))),
        }
    }

    /// Run `f` with exclusive access to the EC.
    ///
    /// Use this to group several accesses into one transaction. Calling back
    /// into this `SharedEc` from inside `f` will panic.
    pub fn lock<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut Ec<T>) -> R,
    {
        critical_section::with(|cs| f(&mut self.ec.borrow_ref_mut(cs)))
    }

    /// Unwrap, giving back the inner accessor.
    pub fn into_inner(self) -> Ec<T> {
        self.ec.into_inner().into_inner()
    }

    /// See [`Ec::read_byte`].
    pub fn read_byte(&self, address: u8) -> Result<u8, Error<T::Error>> {
        self.lock(|ec| ec.read_byte(address))
    }

    /// See [`Ec::write_byte`].
    pub fn write_byte(&self, address: u8, value: u8) -> Result<(), Error<T::Error>> {
        self.lock(|ec| ec.write_byte(address, value))
    }

    /// See [`Ec::read_bit`].
    pub fn read_bit(&self, address: u8, bit: u8) -> Result<bool, Error<T::Error>> {
        self.lock(|ec| ec.read_bit(address, bit))
    }

    /// See [`Ec::set_bit`].
    pub fn set_bit(&self, address: u8, bit: u8) -> Result<(), Error<T::Error>> {
        self.lock(|ec| ec.set_bit(address, bit))
    }

    /// See [`Ec::clear_bit`].
    pub fn clear_bit(&self, address: u8, bit: u8) -> Result<(), Error<T::Error>> {
        self.lock(|ec| ec.clear_bit(address, bit))
    }

    /// See [`Ec::update_bit`].
    pub fn update_bit(&self, address: u8, bit: u8, set: bool) -> Result<(), Error<T::Error>> {
        self.lock(|ec| ec.update_bit(address, bit, set))
    }

    /// See [`Ec::read_sequence`].
    pub fn read_sequence(&self, address: u8, buffer: &mut [u8]) -> Result<(), Error<T::Error>> {
        self.lock(|ec| ec.read_sequence(address, buffer))
    }
}

//
// Private Functions
//

/// Single-bit mask for `bit`, or an error if it isn't within a byte.
fn bit_mask<E>(bit: u8) -> Result<u8, Error<E>> {
    if bit > MAX_BIT {
        return Err(Error::InvalidBit(bit));
    }
    Ok(1 << bit)
}

//
// Tests
//

#[cfg(test)]
mod tests {
    use super::*;

    /// Register file which counts transactions and can fail on one address.
    struct Registers {
        values: [u8; 256],
        reads: usize,
        writes: usize,
        broken: Option<u8>,
    }

    impl Registers {
        fn new() -> Registers {
            Registers {
                values: [0; 256],
                reads: 0,
                writes: 0,
                broken: None,
            }
        }
    }

    impl EcTransport for Registers {
        type Error = u8;

        fn read(&mut self, address: u8) -> Result<u8, u8> {
            self.reads += 1;
            if self.broken == Some(address) {
                return Err(address);
            }
            Ok(self.values[address as usize])
        }

        fn write(&mut self, address: u8, value: u8) -> Result<(), u8> {
            self.writes += 1;
            if self.broken == Some(address) {
                return Err(address);
            }
            self.values[address as usize] = value;
            Ok(())
        }
    }

    #[test]
    fn bit_mask_covers_a_byte() {
        assert_eq!(bit_mask::<()>(0), Ok(0b0000_0001));
        assert_eq!(bit_mask::<()>(7), Ok(0b1000_0000));
        assert_eq!(bit_mask::<()>(8), Err(Error::InvalidBit(8)));
    }

    #[test]
    fn invalid_bit_never_touches_the_bus() {
        let mut regs = Registers::new();
        let mut ec = Ec::new(&mut regs);
        assert_eq!(ec.set_bit(0x2B, 8), Err(Error::InvalidBit(8)));
        assert_eq!(ec.clear_bit(0x2B, 200), Err(Error::InvalidBit(200)));
        assert_eq!(ec.read_bit(0x2B, 9), Err(Error::InvalidBit(9)));
        assert_eq!(regs.reads, 0);
        assert_eq!(regs.writes, 0);
    }

    #[test]
    fn failed_read_skips_the_write() {
        let mut regs = Registers::new();
        regs.broken = Some(0x2C);
        let mut ec = Ec::new(&mut regs);
        let err = ec.set_bit(0x2C, 2).unwrap_err();
        assert!(err.is_read());
        assert_eq!(err.address(), Some(0x2C));
        assert_eq!(regs.writes, 0);
    }

    #[test]
    fn sequence_wraps_around_the_register_space() {
        let mut regs = Registers::new();
        regs.values[0xFF] = 0xAA;
        regs.values[0x00] = 0xBB;
        let mut ec = Ec::new(&mut regs);
        assert_eq!(ec.read_array::<2>(0xFF), Ok([0xAA, 0xBB]));
    }

    #[test]
    fn failed_sequence_leaves_buffer_zeroed() {
        let mut regs = Registers::new();
        regs.values[0x10] = 1;
        regs.values[0x11] = 2;
        regs.broken = Some(0x12);
        let mut ec = Ec::new(&mut regs);
        let mut buffer = [0xFFu8; 4];
        let err = ec.read_sequence(0x10, &mut buffer).unwrap_err();
        assert_eq!(
            err,
            Error::Read {
                address: 0x12,
                source: 0x12
            }
        );
        assert_eq!(buffer, [0; 4]);
        assert_eq!(regs.reads, 3);
    }

    #[test]
    fn empty_sequence_is_a_no_op() {
        let mut regs = Registers::new();
        let mut ec = Ec::new(&mut regs);
        assert_eq!(ec.read_sequence(0xA0, &mut []), Ok(()));
        assert_eq!(regs.reads, 0);
    }

    #[test]
    fn shared_ec_hands_back_transport() {
        let shared = SharedEc::new(Registers::new());
        shared.set_bit(0x2B, 2).unwrap();
        shared.update_bit(0x2B, 0, true).unwrap();
        let regs = shared.into_inner().release();
        assert_eq!(regs.values[0x2B], 0b0000_0101);
        assert_eq!(regs.writes, 2);
    }

    #[test]
    fn error_display() {
        let err: Error<&str> = Error::Write {
            address: 0x2C,
            source: "nak",
        };
        assert_eq!(
            std::format!("{}", err),
            "EC write of 0x2c failed: \"nak\""
        );
        assert_eq!(err.into_source(), Some("nak"));
    }
}

//
// End of file
//
