use drivers::backlight_i2c::BacklightConfig;

use crate::lcd::Level;

/// How the backlight of a board is driven
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BacklightKind {
    /// Plain on/off through a GPIO
    SwitchGpio { io: u8, on_level: Level },
    /// LEDC PWM on a GPIO
    PwmLedc {
        io: u8,
        on_level: Level,
        freq_hz: u32,
        duty_resolution: u8,
    },
    /// Dedicated controller taking commands over I2C
    I2cCommands(BacklightConfig<'static>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BacklightSetup {
    pub kind: BacklightKind,
    /// Turn the backlight off once it has been initialized
    pub idle_off: bool,
}

impl BacklightSetup {
    pub fn i2c_config(&self) -> Option<&BacklightConfig<'static>> {
        match &self.kind {
            BacklightKind::I2cCommands(config) => Some(config),
            _ => None,
        }
    }
}
