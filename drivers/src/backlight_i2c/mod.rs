use core::fmt::{self, Debug, Display, Formatter};

/// Timeout applied to every two-byte command frame
pub const TRANSMIT_TIMEOUT_MS: u32 = 100;

/// One entry of a backlight initialization sequence.
///
/// The protocol sends exactly one payload byte per command, framed on the
/// wire as `[command, data]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BacklightCommand {
    /// Command opcode
    command: u8,
    /// Single payload byte
    data: u8,
    /// Delay in milliseconds after the frame was sent
    delay_ms: u32,
}

impl BacklightCommand {
    pub const fn new(command: u8, data: u8, delay_ms: u32) -> Self {
        Self {
            command,
            data,
            delay_ms,
        }
    }

    pub const fn command(&self) -> u8 {
        self.command
    }

    pub const fn data(&self) -> u8 {
        self.data
    }

    pub const fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub(crate) const fn frame(&self) -> [u8; 2] {
        [self.command, self.data]
    }
}

/// Attachment and protocol parameters of an I2C backlight controller.
///
/// Copied into the driver on a successful `init` and kept until `deinit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BacklightConfig<'a> {
    /// Port of an I2C bus that has already been brought up
    pub i2c_port: u8,
    /// 7-bit device address
    pub i2c_addr: u8,
    /// SCL clock used when registering the device on the bus
    pub i2c_freq: u32,
    pub sda_pin: u8,
    pub scl_pin: u8,
    /// Opcode for brightness frames
    pub brightness_cmd: u8,
    /// Opcode for power frames
    pub power_cmd: u8,
    pub power_on_value: u8,
    pub power_off_value: u8,
    /// Payload that corresponds to 100 % brightness, must be non-zero
    pub max_brightness: u8,
    /// Commands replayed in order by `init`
    pub init_sequence: &'a [BacklightCommand],
}

/// Registration parameters for a device on a shared bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    /// 7-bit address
    pub address: u8,
    pub scl_speed_hz: u32,
}

/// Bus and device primitives the backlight driver needs from the platform.
///
/// The bus behind `bus_handle` is owned and initialized by someone else
/// (usually the touch driver); the driver only registers its own device on it.
/// Dropping a `Bus` value gives the reference back.
pub trait I2cHost {
    type Bus;
    type Device;
    type Error: Debug;

    /// Look up an already initialized bus
    fn bus_handle(&mut self, port: u8) -> Result<Self::Bus, Self::Error>;

    /// Register a device on `bus`
    fn add_device(
        &mut self,
        bus: &Self::Bus,
        config: &DeviceConfig,
    ) -> Result<Self::Device, Self::Error>;

    /// Unregister a device. The handle must not be used after a successful call.
    fn remove_device(&mut self, device: &mut Self::Device) -> Result<(), Self::Error>;

    /// Blocking write of `bytes`, giving up after `timeout_ms`
    fn transmit(
        &mut self,
        device: &mut Self::Device,
        bytes: &[u8],
        timeout_ms: u32,
    ) -> Result<(), Self::Error>;
}

/// Errors that can occur when driving an I2C backlight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BacklightError<E> {
    /// Empty init sequence or brightness outside 0..=100
    InvalidArgument,
    /// The driver has not been initialized
    InvalidState,
    /// The bus or device layer failed
    Transport(E),
}

impl<E> Display for BacklightError<E>
where
    E: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BacklightError::InvalidArgument => write!(f, "Invalid argument"),
            BacklightError::InvalidState => write!(f, "Backlight not initialized"),
            BacklightError::Transport(e) => write!(f, "Transport error: {:?}", e),
        }
    }
}

/// Map a brightness percentage onto the device payload range.
///
/// Integer math truncates: 50 % of 255 is 127.
pub fn percent_to_value<E>(percent: i32, max_brightness: u8) -> Result<u8, BacklightError<E>> {
    if !(0..=100).contains(&percent) {
        return Err(BacklightError::InvalidArgument);
    }
    let value = percent as u32 * u32::from(max_brightness) / 100;
    // value <= max_brightness, so it always fits
    Ok(value as u8)
}

pub mod blocking;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    type Error = BacklightError<()>;

    #[test]
    fn test_percent_to_value_truncates() {
        assert_eq!(percent_to_value::<()>(50, 255), Ok(127));
        assert_eq!(percent_to_value::<()>(0, 255), Ok(0));
        assert_eq!(percent_to_value::<()>(100, 255), Ok(255));
        assert_eq!(percent_to_value::<()>(33, 100), Ok(33));
        assert_eq!(percent_to_value::<()>(99, 10), Ok(9));
    }

    #[test]
    fn test_percent_to_value_out_of_range() {
        assert_eq!(percent_to_value::<()>(101, 255), Err(Error::InvalidArgument));
        assert_eq!(percent_to_value::<()>(-1, 255), Err(Error::InvalidArgument));
        assert_eq!(
            percent_to_value::<()>(i32::MAX, 255),
            Err(Error::InvalidArgument)
        );
    }

    #[test]
    fn test_command_frame() {
        let cmd = BacklightCommand::new(0x86, 0x01, 20);
        assert_eq!(cmd.frame(), [0x86, 0x01]);
        assert_eq!(cmd.command(), 0x86);
        assert_eq!(cmd.data(), 0x01);
        assert_eq!(cmd.delay_ms(), 20);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(format!("{}", Error::InvalidArgument), "Invalid argument");
        assert_eq!(
            format!("{}", Error::InvalidState),
            "Backlight not initialized"
        );
        assert_eq!(
            format!("{}", BacklightError::Transport(7u8)),
            "Transport error: 7"
        );
    }
}
