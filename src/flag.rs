//! Boolean EC flags which aren't LEDs, such as cooler boost.

use crate::{Control, EcTransport, Error, SharedEc};

//
// Public Types
//

/// A feature switch backed by one bit of an EC register.
pub struct EcFlag<'a, T> {
    ec: &'a SharedEc<T>,
    control: Control,
}

//
// impls on Public Types
//

impl<'a, T> EcFlag<'a, T>
where
    T: EcTransport,
{
    /// Create a flag for the given control.
    pub fn new(ec: &'a SharedEc<T>, control: Control) -> EcFlag<'a, T> {
        EcFlag { ec, control }
    }

    /// Read the flag from the EC.
    pub fn is_enabled(&self) -> Result<bool, Error<T::Error>> {
        let bit_set = self.ec.read_bit(self.control.address, self.control.bit)?;
        Ok(self.control.is_active(bit_set))
    }

    /// Turn the feature on or off.
    pub fn set_enabled(&self, enabled: bool) -> Result<(), Error<T::Error>> {
        self.ec.update_bit(
            self.control.address,
            self.control.bit,
            self.control.bit_for(enabled),
        )
    }

    /// Turn the feature on.
    pub fn enable(&self) -> Result<(), Error<T::Error>> {
        self.set_enabled(true)
    }

    /// Turn the feature off.
    pub fn disable(&self) -> Result<(), Error<T::Error>> {
        self.set_enabled(false)
    }
}

//
// End of file
//
