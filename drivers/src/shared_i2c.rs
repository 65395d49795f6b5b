//! [`I2cHost`] for `embedded-hal` buses shared through a `RefCell`.
//!
//! The bus peripheral is created and configured by the board code (usually
//! together with the touch controller) and registered here per port. Devices
//! attached through this host borrow the bus only for the duration of each
//! transfer.

use core::cell::RefCell;
use core::fmt::{self, Debug, Display, Formatter};

use embedded_hal::i2c::I2c;
use embedded_hal_bus::i2c::RefCellDevice;
use log::debug;

use crate::backlight_i2c::{DeviceConfig, I2cHost};

/// Number of I2C controllers on the ESP32-P4 HP domain
pub const I2C_PORT_COUNT: usize = 2;

const MAX_7BIT_ADDRESS: u8 = 0x7F;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SharedI2cError<E> {
    /// No bus registered for this port
    BusUnavailable(u8),
    /// Address does not fit in 7 bits
    InvalidAddress(u8),
    /// Error reported by the bus driver
    Bus(E),
}

impl<E> Display for SharedI2cError<E>
where
    E: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SharedI2cError::BusUnavailable(port) => write!(f, "No I2C bus on port {}", port),
            SharedI2cError::InvalidAddress(addr) => write!(f, "Invalid address 0x{:02X}", addr),
            SharedI2cError::Bus(e) => write!(f, "Bus error: {:?}", e),
        }
    }
}

/// A device registered on a shared bus
pub struct SharedI2cDevice<'a, BUS> {
    i2c: RefCellDevice<'a, BUS>,
    address: u8,
    scl_speed_hz: u32,
}

impl<BUS> SharedI2cDevice<'_, BUS> {
    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn scl_speed_hz(&self) -> u32 {
        self.scl_speed_hz
    }
}

/// Port table of buses brought up elsewhere.
///
/// `embedded-hal` has no per-transfer timeout, so the timeout passed to
/// `transmit` is left to the bus driver's own configuration. The SCL speed of
/// a device is recorded but the bus keeps running at the rate it was set up
/// with.
pub struct SharedI2cHost<'a, BUS> {
    buses: [Option<&'a RefCell<BUS>>; I2C_PORT_COUNT],
}

impl<BUS> Clone for SharedI2cHost<'_, BUS> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<BUS> Copy for SharedI2cHost<'_, BUS> {}

impl<BUS> Default for SharedI2cHost<'_, BUS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, BUS> SharedI2cHost<'a, BUS> {
    pub const fn new() -> Self {
        Self {
            buses: [None; I2C_PORT_COUNT],
        }
    }

    /// Register the bus that runs on `port`. Ports beyond
    /// [`I2C_PORT_COUNT`] are ignored.
    pub fn with_bus(mut self, port: u8, bus: &'a RefCell<BUS>) -> Self {
        if let Some(slot) = self.buses.get_mut(usize::from(port)) {
            *slot = Some(bus);
        }
        self
    }
}

impl<'a, BUS> I2cHost for SharedI2cHost<'a, BUS>
where
    BUS: I2c,
{
    type Bus = &'a RefCell<BUS>;
    type Device = SharedI2cDevice<'a, BUS>;
    type Error = SharedI2cError<BUS::Error>;

    fn bus_handle(&mut self, port: u8) -> Result<Self::Bus, Self::Error> {
        self.buses
            .get(usize::from(port))
            .copied()
            .flatten()
            .ok_or(SharedI2cError::BusUnavailable(port))
    }

    fn add_device(
        &mut self,
        bus: &Self::Bus,
        config: &DeviceConfig,
    ) -> Result<Self::Device, Self::Error> {
        if config.address > MAX_7BIT_ADDRESS {
            return Err(SharedI2cError::InvalidAddress(config.address));
        }
        debug!(
            "Adding I2C device 0x{:02X} at {}Hz",
            config.address, config.scl_speed_hz
        );
        Ok(SharedI2cDevice {
            i2c: RefCellDevice::new(*bus),
            address: config.address,
            scl_speed_hz: config.scl_speed_hz,
        })
    }

    fn remove_device(&mut self, device: &mut Self::Device) -> Result<(), Self::Error> {
        debug!("Removing I2C device 0x{:02X}", device.address);
        Ok(())
    }

    fn transmit(
        &mut self,
        device: &mut Self::Device,
        bytes: &[u8],
        _timeout_ms: u32,
    ) -> Result<(), Self::Error> {
        device
            .i2c
            .write(device.address, bytes)
            .map_err(SharedI2cError::Bus)
    }
}
