//! Mute LEDs
//!
//! Each LED is one bit in the EC. Turning it on or off is a single
//! read-modify-write of that register, sent to the EC straight away.

use crate::{Control, EcTransport, Error, SharedEc};

//
// Public Types
//

/// LED brightness.
///
/// The EC LEDs are either on or off; there are no levels in between.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Brightness {
    /// LED is off
    Off = 0,
    /// LED is fully on
    On = 1,
}

/// How an LED presents itself to the host's LED subsystem.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedDescriptor {
    /// The LED name, e.g. `platform::micmute`
    pub name: &'static str,
    /// The trigger the LED follows by default, e.g. `audio-micmute`
    pub default_trigger: &'static str,
    /// The highest brightness level the LED accepts
    pub max_brightness: u8,
}

/// Anything the host can register as an LED.
pub trait Indicator {
    /// What goes wrong when changing the LED
    type Error;

    /// How this LED should be registered.
    fn descriptor(&self) -> &LedDescriptor;

    /// Turn the LED on or off.
    fn set(&mut self, brightness: Brightness) -> Result<(), Self::Error>;

    /// Find out whether the LED is currently on.
    fn get(&mut self) -> Result<Brightness, Self::Error>;
}

/// An LED backed by one bit of an EC register.
pub struct EcLed<'a, T> {
    ec: &'a SharedEc<T>,
    control: Control,
    descriptor: LedDescriptor,
}

//
// Public Data
//

/// The speaker mute LED
pub const AUDIO_MUTE_LED: LedDescriptor = LedDescriptor {
    name: "platform::audiomute",
    default_trigger: "audio-mute",
    max_brightness: Brightness::On as u8,
};

/// The microphone mute LED
pub const MIC_MUTE_LED: LedDescriptor = LedDescriptor {
    name: "platform::micmute",
    default_trigger: "audio-micmute",
    max_brightness: Brightness::On as u8,
};

//
// impls on Public Types
//

impl Brightness {
    /// Convert a host brightness level. Zero is off, anything else is on.
    pub const fn from_level(level: u8) -> Brightness {
        if level == 0 {
            Brightness::Off
        } else {
            Brightness::On
        }
    }

    /// The host brightness level for this state.
    pub const fn level(self) -> u8 {
        self as u8
    }

    /// Is the LED lit?
    pub const fn is_on(self) -> bool {
        matches!(self, Brightness::On)
    }
}

impl From<bool> for Brightness {
    fn from(on: bool) -> Brightness {
        if on {
            Brightness::On
        } else {
            Brightness::Off
        }
    }
}

impl<'a, T> EcLed<'a, T>
where
    T: EcTransport,
{
    /// Create an LED for the given control.
    ///
    /// Nothing is sent to the EC until you call [`Indicator::set`] or
    /// [`EcLed::brightness`].
    pub fn new(ec: &'a SharedEc<T>, control: Control, descriptor: LedDescriptor) -> EcLed<'a, T> {
        EcLed {
            ec,
            control,
            descriptor,
        }
    }

    /// Which register bit this LED uses.
    pub fn control(&self) -> Control {
        self.control
    }

    /// Read the LED state back from the EC.
    pub fn brightness(&self) -> Result<Brightness, Error<T::Error>> {
        let bit_set = self.ec.read_bit(self.control.address, self.control.bit)?;
        Ok(Brightness::from(self.control.is_active(bit_set)))
    }

    /// Turn the LED on or off.
    pub fn set_brightness(&self, brightness: Brightness) -> Result<(), Error<T::Error>> {
        if let Err(e) = self.ec.update_bit(
            self.control.address,
            self.control.bit,
            self.control.bit_for(brightness.is_on()),
        ) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Failed to set {} to {}", self.descriptor.name, brightness);
            return Err(e);
        }
        Ok(())
    }
}

impl<'a, T> Indicator for EcLed<'a, T>
where
    T: EcTransport,
{
    type Error = Error<T::Error>;

    fn descriptor(&self) -> &LedDescriptor {
        &self.descriptor
    }

    fn set(&mut self, brightness: Brightness) -> Result<(), Self::Error> {
        self.set_brightness(brightness)
    }

    fn get(&mut self) -> Result<Brightness, Self::Error> {
        self.brightness()
    }
}

//
// Tests
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels() {
        assert_eq!(Brightness::from_level(0), Brightness::Off);
        assert_eq!(Brightness::from_level(1), Brightness::On);
        assert_eq!(Brightness::from_level(255), Brightness::On);
        assert_eq!(Brightness::On.level(), 1);
        assert_eq!(Brightness::Off.level(), 0);
        assert!(Brightness::from(true).is_on());
    }

    #[test]
    fn descriptors() {
        assert_eq!(AUDIO_MUTE_LED.default_trigger, "audio-mute");
        assert_eq!(MIC_MUTE_LED.default_trigger, "audio-micmute");
        assert_eq!(MIC_MUTE_LED.max_brightness, 1);
    }
}

//
// End of file
//
