//! Board bring-up and diagnostics

use crate::{
    led::{AUDIO_MUTE_LED, MIC_MUTE_LED},
    Control, EcLed, EcTransport, Error, FirmwareVersion, RegisterMap, SharedEc,
};

//
// Public Types
//

/// The LEDs and firmware version of one laptop, ready for registration.
pub struct Platform<'a, T> {
    audio_mute: EcLed<'a, T>,
    mic_mute: EcLed<'a, T>,
    firmware_version: FirmwareVersion,
}

/// What [`dump_controls`] found for one control.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlState {
    /// Name of the control, as given by [`RegisterMap::controls`]
    pub name: &'static str,
    /// Where it lives
    pub control: Control,
    /// Whether it is currently on
    pub active: bool,
}

//
// impls on Public Types
//

impl<'a, T> Platform<'a, T>
where
    T: EcTransport,
{
    /// Set up both mute LEDs and check the EC is talking to us.
    ///
    /// Reads the firmware version and the current state of each LED. If any
    /// of those reads fail, the error is returned and nothing is set up.
    pub fn probe(
        ec: &'a SharedEc<T>,
        map: &RegisterMap,
    ) -> Result<Platform<'a, T>, Error<T::Error>> {
        let audio_mute = EcLed::new(ec, map.audio_mute_led, AUDIO_MUTE_LED);
        #[cfg(feature = "defmt")]
        defmt::info!("Registered {}", AUDIO_MUTE_LED.name);

        let mic_mute = EcLed::new(ec, map.mic_mute_led, MIC_MUTE_LED);
        #[cfg(feature = "defmt")]
        defmt::info!("Registered {}", MIC_MUTE_LED.name);

        let firmware_version = FirmwareVersion::read_shared(ec, map)?;
        #[cfg(feature = "defmt")]
        defmt::info!("MSI EC Firmware Version: {}", firmware_version);

        let _audio_state = audio_mute.brightness()?;
        #[cfg(feature = "defmt")]
        defmt::info!("MSI EC Keyboard Audiomute LED: {}", _audio_state);

        let _mic_state = mic_mute.brightness()?;
        #[cfg(feature = "defmt")]
        defmt::info!("MSI EC Keyboard Micmute LED: {}", _mic_state);

        Ok(Platform {
            audio_mute,
            mic_mute,
            firmware_version,
        })
    }

    /// The speaker mute LED.
    pub fn audio_mute(&mut self) -> &mut EcLed<'a, T> {
        &mut self.audio_mute
    }

    /// The microphone mute LED.
    pub fn mic_mute(&mut self) -> &mut EcLed<'a, T> {
        &mut self.mic_mute
    }

    /// The firmware version read during probe.
    pub fn firmware_version(&self) -> &FirmwareVersion {
        &self.firmware_version
    }

    /// Both LEDs, audio first, for handing to the host LED subsystem.
    pub fn leds(&mut self) -> impl Iterator<Item = &mut EcLed<'a, T>> {
        [&mut self.audio_mute, &mut self.mic_mute].into_iter()
    }
}

//
// Public Functions
//

/// Read every control in `map` and pass each state to `report`.
///
/// Stops at the first register that can't be read.
pub fn dump_controls<T, F>(
    ec: &SharedEc<T>,
    map: &RegisterMap,
    mut report: F,
) -> Result<(), Error<T::Error>>
where
    T: EcTransport,
    F: FnMut(ControlState),
{
    for (name, control) in map.controls() {
        let bit_set = ec.read_bit(control.address, control.bit)?;
        let state = ControlState {
            name,
            control,
            active: control.is_active(bit_set),
        };
        #[cfg(feature = "defmt")]
        defmt::info!("{}: {}", state.name, if state.active { "on" } else { "off" });
        report(state);
    }
    Ok(())
}

//
// End of file
//
