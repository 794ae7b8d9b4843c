//! Register maps
//!
//! Where each control lives differs between hardware revisions (some boards
//! even swap which LED is "audio" and which is "mic"), so the addresses are
//! data rather than code. Build a [`RegisterMap`] for your board, or use one of
//! the presets.

//
// Public Types
//

/// Whether a set bit means "on" or "off".
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Bit set means the control is active
    ActiveHigh,
    /// Bit clear means the control is active
    ActiveLow,
}

/// A single on/off control within the EC register space.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Control {
    /// The register holding the control
    pub address: u8,
    /// Which bit of the register (0 is the LSB)
    pub bit: u8,
    /// How the bit maps to on/off
    pub polarity: Polarity,
}

/// Where everything lives on a particular board.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterMap {
    /// The audio (speaker) mute LED
    pub audio_mute_led: Control,
    /// The microphone mute LED
    pub mic_mute_led: Control,
    /// First register of the 12-byte firmware version string
    pub firmware_version: u8,
    /// The cooler boost flag, if we know where it is on this board
    pub boost_mode: Option<Control>,
}

//
// Public Data
//

/// Name under which the audio mute LED appears in [`RegisterMap::controls`]
pub const AUDIO_MUTE: &str = "audio-mute";

/// Name under which the mic mute LED appears in [`RegisterMap::controls`]
pub const MIC_MUTE: &str = "mic-mute";

/// Name under which the boost flag appears in [`RegisterMap::controls`]
pub const BOOST_MODE: &str = "boost-mode";

//
// impls on Public Types
//

impl Control {
    /// A control where a set bit means "on".
    pub const fn active_high(address: u8, bit: u8) -> Control {
        Control {
            address,
            bit,
            polarity: Polarity::ActiveHigh,
        }
    }

    /// A control where a clear bit means "on".
    pub const fn active_low(address: u8, bit: u8) -> Control {
        Control {
            address,
            bit,
            polarity: Polarity::ActiveLow,
        }
    }

    /// The bit value which puts the control in the given state.
    pub const fn bit_for(&self, active: bool) -> bool {
        match self.polarity {
            Polarity::ActiveHigh => active,
            Polarity::ActiveLow => !active,
        }
    }

    /// Whether the control is active, given the value of its bit.
    pub const fn is_active(&self, bit_set: bool) -> bool {
        // The mapping is its own inverse
        self.bit_for(bit_set)
    }
}

impl RegisterMap {
    /// MSI Modern 14 B5M
    ///
    /// Both mute LEDs are bit 2 of neighbouring registers. The boost flag has
    /// not been located on this board.
    pub const MODERN_14_B5M: RegisterMap = RegisterMap {
        audio_mute_led: Control::active_high(0x2C, 2),
        mic_mute_led: Control::active_high(0x2B, 2),
        firmware_version: 0xA0,
        boost_mode: None,
    };

    /// Every control on this board, with its name.
    pub fn controls(&self) -> impl Iterator<Item = (&'static str, Control)> {
        [
            Some((AUDIO_MUTE, self.audio_mute_led)),
            Some((MIC_MUTE, self.mic_mute_led)),
            self.boost_mode.map(|control| (BOOST_MODE, control)),
        ]
        .into_iter()
        .flatten()
    }

    /// Look up a control by the name [`RegisterMap::controls`] gives it.
    pub fn control(&self, name: &str) -> Option<Control> {
        self.controls()
            .find(|(control_name, _)| *control_name == name)
            .map(|(_, control)| control)
    }
}

//
// Tests
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polarity() {
        let high = Control::active_high(0x2B, 2);
        assert!(high.bit_for(true));
        assert!(!high.bit_for(false));
        assert!(high.is_active(true));

        let low = Control::active_low(0x2B, 2);
        assert!(!low.bit_for(true));
        assert!(low.bit_for(false));
        assert!(!low.is_active(true));
        assert!(low.is_active(false));
    }

    #[test]
    fn preset_controls() {
        let map = RegisterMap::MODERN_14_B5M;
        let mut controls = map.controls();
        assert_eq!(
            controls.next(),
            Some((AUDIO_MUTE, Control::active_high(0x2C, 2)))
        );
        assert_eq!(
            controls.next(),
            Some((MIC_MUTE, Control::active_high(0x2B, 2)))
        );
        assert_eq!(controls.next(), None);
    }

    #[test]
    fn boost_is_listed_when_known() {
        let map = RegisterMap {
            boost_mode: Some(Control::active_high(0x98, 7)),
            ..RegisterMap::MODERN_14_B5M
        };
        assert_eq!(map.controls().count(), 3);
        assert_eq!(map.control(BOOST_MODE), Some(Control::active_high(0x98, 7)));
        assert_eq!(map.control("keyboard-backlight"), None);
    }
}

//
// End of file
//
