//! Backlight bring-up for a board description

use drivers::backlight_i2c::blocking::BacklightI2c;
use drivers::backlight_i2c::{BacklightError, I2cHost};
use embedded_hal::delay::DelayNs;
use log::{error, info};

use crate::board::BoardConfig;

/// Start the I2C command backlight of `board`.
///
/// The I2C bus named by the backlight config must already be running, it is
/// normally brought up together with the touch controller. After the init
/// sequence the backlight is switched on, or off when the board asks for
/// `idle_off`.
///
/// Returns `Ok(None)` for boards without an I2C backlight. If any step fails
/// the device is unregistered again before the error is returned.
pub fn start_backlight<HOST, DELAY>(
    board: &BoardConfig,
    host: HOST,
    delay: DELAY,
) -> Result<Option<BacklightI2c<'static, HOST, DELAY>>, BacklightError<HOST::Error>>
where
    HOST: I2cHost,
    DELAY: DelayNs,
{
    let Some(setup) = board.backlight else {
        return Ok(None);
    };
    let Some(config) = setup.i2c_config() else {
        info!("{}: backlight is not I2C driven", board.name);
        return Ok(None);
    };

    let mut backlight = BacklightI2c::new(host, delay);
    let result = backlight
        .init(config)
        .and_then(|_| backlight.set_power(!setup.idle_off));

    if let Err(e) = result {
        error!("{}: backlight bring-up failed: {}", board.name, e);
        if let Err(deinit_err) = backlight.deinit() {
            error!("{}: backlight cleanup failed: {}", board.name, deinit_err);
        }
        return Err(e);
    }

    info!(
        "{}: I2C backlight ready, power {}",
        board.name,
        if setup.idle_off { "off" } else { "on" }
    );
    Ok(Some(backlight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backlight::{BacklightKind, BacklightSetup};
    use crate::boards::DFROBOT_FIREBEETLE_ESP32_P4_LCD_4_3;
    use alloc::vec;
    use core::cell::RefCell;
    use drivers::backlight_i2c::{BacklightCommand, BacklightConfig};
    use drivers::shared_i2c::{SharedI2cError, SharedI2cHost};
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    const ADDR: u8 = 0x45;

    const INIT: &[BacklightCommand] = &[
        BacklightCommand::new(0x95, 0x11, 50),
        BacklightCommand::new(0x96, 0x00, 0),
    ];

    const CONFIG: BacklightConfig<'static> = BacklightConfig {
        i2c_port: 0,
        i2c_addr: ADDR,
        i2c_freq: 100_000,
        sda_pin: 7,
        scl_pin: 8,
        brightness_cmd: 0x86,
        power_cmd: 0x85,
        power_on_value: 0x01,
        power_off_value: 0x00,
        max_brightness: 255,
        init_sequence: INIT,
    };

    fn board_with_i2c_backlight(idle_off: bool) -> BoardConfig {
        BoardConfig {
            backlight: Some(BacklightSetup {
                kind: BacklightKind::I2cCommands(CONFIG),
                idle_off,
            }),
            ..DFROBOT_FIREBEETLE_ESP32_P4_LCD_4_3
        }
    }

    #[test]
    fn test_pwm_board_has_no_i2c_backlight() {
        let bus = RefCell::new(I2cMock::new(&[]));
        let host = SharedI2cHost::new().with_bus(0, &bus);

        let backlight =
            start_backlight(&DFROBOT_FIREBEETLE_ESP32_P4_LCD_4_3, host, NoopDelay::new()).unwrap();
        assert!(backlight.is_none());

        bus.borrow_mut().done();
    }

    #[test]
    fn test_no_backlight() {
        let bus = RefCell::new(I2cMock::new(&[]));
        let host = SharedI2cHost::new().with_bus(0, &bus);
        let board = BoardConfig {
            backlight: None,
            ..DFROBOT_FIREBEETLE_ESP32_P4_LCD_4_3
        };

        assert!(start_backlight(&board, host, NoopDelay::new())
            .unwrap()
            .is_none());

        bus.borrow_mut().done();
    }

    #[test]
    fn test_starts_powered_on() {
        let expectations = [
            I2cTransaction::write(ADDR, vec![0x95, 0x11]),
            I2cTransaction::write(ADDR, vec![0x96, 0x00]),
            I2cTransaction::write(ADDR, vec![0x85, 0x01]),
            I2cTransaction::write(ADDR, vec![0x86, 191]),
        ];
        let bus = RefCell::new(I2cMock::new(&expectations));
        let host = SharedI2cHost::new().with_bus(0, &bus);
        let board = board_with_i2c_backlight(false);

        let mut backlight = start_backlight(&board, host, NoopDelay::new())
            .unwrap()
            .unwrap();
        assert!(backlight.is_initialized());
        backlight.set_brightness(75).unwrap();

        bus.borrow_mut().done();
    }

    #[test]
    fn test_idle_off() {
        let expectations = [
            I2cTransaction::write(ADDR, vec![0x95, 0x11]),
            I2cTransaction::write(ADDR, vec![0x96, 0x00]),
            I2cTransaction::write(ADDR, vec![0x85, 0x00]),
        ];
        let bus = RefCell::new(I2cMock::new(&expectations));
        let host = SharedI2cHost::new().with_bus(0, &bus);
        let board = board_with_i2c_backlight(true);

        let backlight = start_backlight(&board, host, NoopDelay::new()).unwrap();
        assert!(backlight.is_some());

        bus.borrow_mut().done();
    }

    #[test]
    fn test_failed_sequence_is_cleaned_up() {
        let expectations = [
            I2cTransaction::write(ADDR, vec![0x95, 0x11]).with_error(ErrorKind::Other),
        ];
        let bus = RefCell::new(I2cMock::new(&expectations));
        let host = SharedI2cHost::new().with_bus(0, &bus);
        let board = board_with_i2c_backlight(false);

        let result = start_backlight(&board, host, NoopDelay::new());
        assert!(matches!(
            result,
            Err(BacklightError::Transport(SharedI2cError::Bus(ErrorKind::Other)))
        ));

        bus.borrow_mut().done();
    }

    #[test]
    fn test_bus_not_running() {
        let bus = RefCell::new(I2cMock::new(&[]));
        let host = SharedI2cHost::new().with_bus(1, &bus);
        let board = board_with_i2c_backlight(false);

        let result = start_backlight(&board, host, NoopDelay::new());
        assert!(matches!(
            result,
            Err(BacklightError::Transport(SharedI2cError::BusUnavailable(0)))
        ));

        bus.borrow_mut().done();
    }
}
