use super::{
    percent_to_value, BacklightConfig, BacklightError, DeviceConfig, I2cHost, TRANSMIT_TIMEOUT_MS,
};
use embedded_hal::delay::DelayNs;
use log::{debug, error, info, warn};

/// Handles held while the driver is initialized
struct Attached<'a, BUS, DEV> {
    config: BacklightConfig<'a>,
    // Keeps the shared bus referenced for as long as the device is registered
    _bus: BUS,
    device: DEV,
}

/// Backlight controller driven by single-byte commands over I2C.
///
/// The driver attaches to a bus owned by another component, replays a vendor
/// init sequence and then accepts brightness and power commands. All methods
/// take `&mut self`; callers sharing the driver between tasks have to
/// serialize access themselves.
pub struct BacklightI2c<'a, HOST, DELAY>
where
    HOST: I2cHost,
{
    host: HOST,
    delay: DELAY,
    state: Option<Attached<'a, HOST::Bus, HOST::Device>>,
}

impl<'a, HOST, DELAY> BacklightI2c<'a, HOST, DELAY>
where
    HOST: I2cHost,
    DELAY: DelayNs,
{
    /// Create an uninitialized driver
    pub fn new(host: HOST, delay: DELAY) -> Self {
        Self {
            host,
            delay,
            state: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Configuration applied by the last successful `init`
    pub fn config(&self) -> Option<&BacklightConfig<'a>> {
        self.state.as_ref().map(|attached| &attached.config)
    }

    /// Attach to the configured bus and replay the init sequence.
    ///
    /// Calling this on an initialized driver does nothing. If a command of the
    /// sequence fails the error is returned but the driver stays initialized:
    /// the device is attached and may be partially configured.
    pub fn init(
        &mut self,
        config: &BacklightConfig<'a>,
    ) -> Result<(), BacklightError<HOST::Error>> {
        if config.init_sequence.is_empty() {
            error!("Invalid init sequence length");
            return Err(BacklightError::InvalidArgument);
        }

        if self.state.is_some() {
            warn!("Already initialized");
            return Ok(());
        }

        let bus = self.host.bus_handle(config.i2c_port).map_err(|e| {
            error!(
                "I2C bus on port {} is not available. Initialize I2C first. err={:?}",
                config.i2c_port, e
            );
            BacklightError::Transport(e)
        })?;

        let device_config = DeviceConfig {
            address: config.i2c_addr,
            scl_speed_hz: config.i2c_freq,
        };
        // On failure `bus` is dropped here, so no reference is left behind
        let device = self.host.add_device(&bus, &device_config).map_err(|e| {
            error!(
                "Failed to add I2C device 0x{:02X} on port {}: {:?}",
                config.i2c_addr, config.i2c_port, e
            );
            BacklightError::Transport(e)
        })?;

        self.state = Some(Attached {
            config: *config,
            _bus: bus,
            device,
        });

        info!(
            "I2C backlight initialized on port {}, addr 0x{:02X}",
            config.i2c_port, config.i2c_addr
        );
        info!(
            "I2C configuration: SDA={}, SCL={}, freq={}Hz",
            config.sda_pin, config.scl_pin, config.i2c_freq
        );
        info!(
            "Backlight commands: brightness_cmd=0x{:02X}, power_cmd=0x{:02X}",
            config.brightness_cmd, config.power_cmd
        );
        info!(
            "Power values: on=0x{:02X}, off=0x{:02X}, max_brightness={}",
            config.power_on_value, config.power_off_value, config.max_brightness
        );

        self.replay(config)
    }

    fn replay(
        &mut self,
        config: &BacklightConfig<'a>,
    ) -> Result<(), BacklightError<HOST::Error>> {
        let total = config.init_sequence.len();
        info!(
            "Starting I2C backlight initialization sequence ({} commands)",
            total
        );

        for (i, cmd) in config.init_sequence.iter().enumerate() {
            let n = i + 1;
            info!(
                "Sending init command {}/{}: cmd=0x{:02X}, data=0x{:02X}, delay={}ms",
                n,
                total,
                cmd.command(),
                cmd.data(),
                cmd.delay_ms()
            );

            self.transmit(cmd.frame()).map_err(|e| {
                error!("Failed to send init command {}: {}", n, e);
                e
            })?;

            if cmd.delay_ms() > 0 {
                debug!("Waiting {}ms after command {}", cmd.delay_ms(), n);
                self.delay.delay_ms(cmd.delay_ms());
            }
        }

        info!("I2C backlight initialization sequence completed");
        Ok(())
    }

    /// Unregister the device from the bus.
    ///
    /// The bus itself stays up. On failure nothing changes and the call can be
    /// retried.
    pub fn deinit(&mut self) -> Result<(), BacklightError<HOST::Error>> {
        let Some(attached) = self.state.as_mut() else {
            return Ok(());
        };

        self.host
            .remove_device(&mut attached.device)
            .map_err(|e| {
                error!("Failed to remove I2C device: {:?}", e);
                BacklightError::Transport(e)
            })?;

        self.state = None;
        info!("I2C backlight deinitialized");
        Ok(())
    }

    /// Payload `set_brightness` would send for `percent`
    pub fn brightness_value(&self, percent: i32) -> Result<u8, BacklightError<HOST::Error>> {
        let attached = self.state.as_ref().ok_or(BacklightError::InvalidState)?;
        percent_to_value(percent, attached.config.max_brightness)
    }

    /// Set the brightness in percent, 0..=100
    pub fn set_brightness(&mut self, percent: i32) -> Result<(), BacklightError<HOST::Error>> {
        let config = self.attached_config()?;
        let value = percent_to_value(percent, config.max_brightness).map_err(|e| {
            error!("Invalid brightness percent {}", percent);
            e
        })?;

        info!(
            "Setting brightness: {}% -> value: {} (max: {})",
            percent, value, config.max_brightness
        );
        self.transmit([config.brightness_cmd, value])
            .map_err(|e| {
                error!("Failed to set brightness: {}", e);
                e
            })?;

        info!(
            "Successfully set brightness to {}% (value: {})",
            percent, value
        );
        Ok(())
    }

    /// Switch the backlight on or off
    pub fn set_power(&mut self, on: bool) -> Result<(), BacklightError<HOST::Error>> {
        let config = self.attached_config()?;
        let value = if on {
            config.power_on_value
        } else {
            config.power_off_value
        };
        let label = if on { "ON" } else { "OFF" };

        info!("Setting power: {} -> value: 0x{:02X}", label, value);
        self.transmit([config.power_cmd, value]).map_err(|e| {
            error!("Failed to set power: {}", e);
            e
        })?;

        info!("Successfully set power to {}", label);
        Ok(())
    }

    /// Give back the transport and delay provider.
    ///
    /// Call `deinit` first; a still attached device is dropped without being
    /// unregistered.
    pub fn release(self) -> (HOST, DELAY) {
        if self.state.is_some() {
            warn!("Releasing I2C backlight that is still attached");
        }
        (self.host, self.delay)
    }

    fn attached_config(&self) -> Result<BacklightConfig<'a>, BacklightError<HOST::Error>> {
        match &self.state {
            Some(attached) => Ok(attached.config),
            None => {
                error!("I2C backlight not initialized");
                Err(BacklightError::InvalidState)
            }
        }
    }

    fn transmit(&mut self, frame: [u8; 2]) -> Result<(), BacklightError<HOST::Error>> {
        let attached = self.state.as_mut().ok_or(BacklightError::InvalidState)?;
        debug!(
            "Sending I2C command: cmd=0x{:02X}, data=0x{:02X}",
            frame[0], frame[1]
        );
        self.host
            .transmit(&mut attached.device, &frame, TRANSMIT_TIMEOUT_MS)
            .map_err(BacklightError::Transport)
    }
}
