#![no_std]
//! Display peripheral drivers
//!
//! Drivers for the peripherals that sit next to a display panel and are not
//! part of the panel bring-up itself. Currently this is the I2C command
//! backlight, together with a transport that lets it share an `embedded-hal`
//! I2C bus with the touch controller.

/// I2C backlight controller that replays vendor command tables.
pub mod backlight_i2c;

/// Shared-bus transport for the I2C backlight.
pub mod shared_i2c;

extern crate alloc;
