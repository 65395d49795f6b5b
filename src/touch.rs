use crate::lcd::{Level, Transform};

/// I2C wiring of a touch controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchI2c {
    pub host_id: u8,
    /// Set when the host is initialized by other code, e.g. an Arduino `Wire`
    pub skip_init_host: bool,
    pub clk_hz: u32,
    pub scl_pullup: bool,
    pub sda_pullup: bool,
    pub scl_io: u8,
    pub sda_io: u8,
    /// 0 selects the controller's default address
    pub address: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchConfig {
    pub controller: &'static str,
    pub bus: TouchI2c,
    pub transform: Transform,
    pub reset_io: Option<u8>,
    pub reset_level: Level,
    pub int_io: Option<u8>,
    pub int_level: Level,
}

impl TouchConfig {
    /// Whether the touch driver brings up the I2C host on `port`
    pub fn owns_i2c_host(&self, port: u8) -> bool {
        self.bus.host_id == port && !self.bus.skip_init_host
    }
}
