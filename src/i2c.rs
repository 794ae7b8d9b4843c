//! SMBus transport
//!
//! Some ECs hang off an SMBus / I²C bus rather than the LPC port-I/O
//! interface. Registers are then accessed with SMBus "byte data" transfers:
//! the register address is written, then one data byte is read or written.

use embedded_hal::blocking::i2c::{Write, WriteRead};

use crate::EcTransport;

//
// Public Types
//

/// An [`EcTransport`] over an `embedded-hal` I²C bus.
pub struct I2cTransport<I2C> {
    bus: I2C,
    bus_address: u8,
}

//
// impls on Public Types
//

impl<I2C> I2cTransport<I2C> {
    /// Talk to the EC at the given 7-bit bus address.
    pub fn new(bus: I2C, bus_address: u8) -> I2cTransport<I2C> {
        I2cTransport { bus, bus_address }
    }

    /// Give back the I²C bus.
    pub fn release(self) -> I2C {
        self.bus
    }
}

impl<I2C, E> EcTransport for I2cTransport<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    type Error = E;

    fn read(&mut self, address: u8) -> Result<u8, E> {
        let mut value = [0u8];
        self.bus
            .write_read(self.bus_address, &[address], &mut value)?;
        Ok(value[0])
    }

    fn write(&mut self, address: u8, value: u8) -> Result<(), E> {
        self.bus.write(self.bus_address, &[address, value])
    }
}

//
// End of file
//
