//! DFRobot FIREBEETLE-ESP32-P4-LCD-4.3 with the TL043WVV02-B1900A panel
//!
//! <https://www.dfrobot.com/>

use crate::backlight::{BacklightKind, BacklightSetup};
use crate::board::{BoardConfig, Version};
use crate::lcd::{
    ColorBits, DpiTiming, LcdBus, LcdConfig, LcdVendorInitCmd, Level, MipiDsiConfig, Transform,
};
use crate::touch::{TouchConfig, TouchI2c};

pub const WIDTH: u16 = 480;
pub const HEIGHT: u16 = 800;

/// I2C host shared by the touch controller and other I2C devices
pub const I2C_HOST_ID: u8 = 0;
pub const I2C_SCL_IO: u8 = 8;
pub const I2C_SDA_IO: u8 = 7;

// TL043WVV02-B1900A vendor initialization, supplied by the panel vendor
const LCD_VENDOR_INIT: &[LcdVendorInitCmd] = &[
    LcdVendorInitCmd::no_params(120, 0x11),
    LcdVendorInitCmd::with_params(0, 0x99, &[0x71, 0x02, 0xa2]),
    LcdVendorInitCmd::with_params(0, 0x99, &[0x71, 0x02, 0xa3]),
    LcdVendorInitCmd::with_params(0, 0x99, &[0x71, 0x02, 0xa4]),
    LcdVendorInitCmd::with_params(0, 0xA4, &[0x31]),
    LcdVendorInitCmd::with_params(0, 0xB0, &[0x22, 0x57, 0x1E, 0x61, 0x2F, 0x57, 0x61]),
    LcdVendorInitCmd::with_params(0, 0xB7, &[0x64, 0x64]),
    LcdVendorInitCmd::with_params(0, 0xBF, &[0xB4, 0xB4]),
    LcdVendorInitCmd::with_params(
        0,
        0xC8,
        &[
            0x00, 0x00, 0x0F, 0x1C, 0x34, 0x00, 0x60, 0x03, 0xA0, 0x06, 0x10, 0xFE, 0x06, 0x74,
            0x03, 0x21, 0xC4, 0x00, 0x08, 0x00, 0x22, 0x46, 0x0F, 0x8F, 0x0A, 0x32, 0xF2, 0x0C,
            0x42, 0x0C, 0xF3, 0x80, 0x00, 0xAB, 0xC0, 0x03, 0xC4,
        ],
    ),
    LcdVendorInitCmd::with_params(
        0,
        0xC9,
        &[
            0x00, 0x00, 0x0F, 0x1C, 0x34, 0x00, 0x60, 0x03, 0xA0, 0x06, 0x10, 0xFE, 0x06, 0x74,
            0x03, 0x21, 0xC4, 0x00, 0x08, 0x00, 0x22, 0x46, 0x0F, 0x8F, 0x0A, 0x32, 0xF2, 0x0C,
            0x42, 0x0C, 0xF3, 0x80, 0x00, 0xAB, 0xC0, 0x03, 0xC4,
        ],
    ),
    LcdVendorInitCmd::with_params(0, 0xD7, &[0x10, 0x0C, 0x36, 0x19, 0x90, 0x90]),
    LcdVendorInitCmd::with_params(
        0,
        0xA3,
        &[
            0x51, 0x03, 0x80, 0xCF, 0x44, 0x00, 0x00, 0x00, 0x00, 0x04, 0x78, 0x78, 0x00, 0x1A,
            0x00, 0x45, 0x05, 0x00, 0x00, 0x00, 0x00, 0x46, 0x00, 0x00, 0x02, 0x20, 0x52, 0x00,
            0x05, 0x00, 0x00, 0xFF,
        ],
    ),
    LcdVendorInitCmd::with_params(
        0,
        0xA6,
        &[
            0x02, 0x00, 0x24, 0x55, 0x35, 0x00, 0x38, 0x00, 0x78, 0x78, 0x00, 0x24, 0x55, 0x36,
            0x00, 0x37, 0x00, 0x78, 0x78, 0x02, 0xAC, 0x51, 0x3A, 0x00, 0x00, 0x00, 0x78, 0x78,
            0x03, 0xAC, 0x21, 0x00, 0x04, 0x00, 0x00, 0x78, 0x78, 0x3E, 0x00, 0x06, 0x00, 0x00,
            0x00,
        ],
    ),
    LcdVendorInitCmd::with_params(
        0,
        0xA7,
        &[
            0x19, 0x19, 0x00, 0x64, 0x40, 0x07, 0x16, 0x40, 0x00, 0x04, 0x03, 0x78, 0x78, 0x00,
            0x64, 0x40, 0x25, 0x34, 0x00, 0x00, 0x02, 0x01, 0x78, 0x78, 0x00, 0x64, 0x40, 0x4B,
            0x5A, 0x00, 0x00, 0x02, 0x01, 0x78, 0x78, 0x00, 0x24, 0x40, 0x69, 0x78, 0x00, 0x00,
            0x00, 0x00, 0x78, 0x78, 0x00, 0x44,
        ],
    ),
    LcdVendorInitCmd::with_params(
        0,
        0xAC,
        &[
            0x08, 0x0A, 0x11, 0x00, 0x13, 0x03, 0x1B, 0x18, 0x06, 0x1A, 0x19, 0x1B, 0x1B, 0x1B,
            0x18, 0x1B, 0x09, 0x0B, 0x10, 0x02, 0x12, 0x01, 0x1B, 0x18, 0x06, 0x1A, 0x19, 0x1B,
            0x1B, 0x1B, 0x18, 0x1B, 0xFF, 0x67, 0xFF, 0x67, 0x00,
        ],
    ),
    LcdVendorInitCmd::with_params(0, 0xAD, &[0xCC, 0x40, 0x46, 0x11, 0x04, 0x78, 0x78]),
    LcdVendorInitCmd::with_params(
        0,
        0xE8,
        &[
            0x30, 0x07, 0x00, 0x94, 0x94, 0x9C, 0x00, 0xE2, 0x04, 0x00, 0x00, 0x00, 0x00, 0xEF,
        ],
    ),
    LcdVendorInitCmd::with_params(
        0,
        0xE7,
        &[
            0x8B, 0x3C, 0x00, 0x0C, 0xF0, 0x5D, 0x00, 0x5D, 0x00, 0x5D, 0x00, 0x5D, 0x00, 0xFF,
            0x00, 0x08, 0x7B, 0x00, 0x00, 0xC8, 0x6A, 0x5A, 0x08, 0x1A, 0x3C, 0x00, 0x81, 0x01,
            0xCC, 0x01, 0x7F, 0xF0, 0x22,
        ],
    ),
    LcdVendorInitCmd::no_params(120, 0x11), // Sleep out
    LcdVendorInitCmd::no_params(20, 0x29),  // Display on
    LcdVendorInitCmd::with_params(0, 0x35, &[0x00]), // Tearing effect line on
];

pub const BOARD: BoardConfig = BoardConfig {
    name: "DFRobot:FIREBEETLE_ESP32_P4_LCD_4_3",
    width: WIDTH,
    height: HEIGHT,
    lcd: Some(LcdConfig {
        controller: "SIMPLE",
        bus: LcdBus::MipiDsi(MipiDsiConfig {
            lane_num: 2,
            lane_rate_mbps: 1000,
            // Pixel clock for 480x800
            dpi_clk_mhz: 28,
            dpi_color_bits: ColorBits::Rgb565,
            timing: DpiTiming {
                hsync_pulse_width: 2,
                hsync_back_porch: 40,
                hsync_front_porch: 40,
                vsync_pulse_width: 2,
                vsync_back_porch: 10,
                vsync_front_porch: 180,
            },
            phy_ldo_id: Some(3),
        }),
        vendor_init: Some(LCD_VENDOR_INIT),
        color_bits: ColorBits::Rgb565,
        bgr_order: false,
        invert_color: false,
        transform: Transform {
            swap_xy: false,
            mirror_x: false,
            mirror_y: false,
        },
        gap_x: 0,
        gap_y: 0,
        reset_io: Some(10),
        reset_level: Level::High,
    }),
    touch: Some(TouchConfig {
        controller: "ST7123",
        bus: TouchI2c {
            host_id: I2C_HOST_ID,
            skip_init_host: false,
            clk_hz: 100_000,
            scl_pullup: false,
            sda_pullup: false,
            scl_io: I2C_SCL_IO,
            sda_io: I2C_SDA_IO,
            address: 0,
        },
        transform: Transform {
            swap_xy: false,
            mirror_x: false,
            mirror_y: false,
        },
        reset_io: None,
        reset_level: Level::Low,
        int_io: None,
        int_level: Level::Low,
    }),
    backlight: Some(BacklightSetup {
        kind: BacklightKind::PwmLedc {
            io: 11,
            on_level: Level::High,
            freq_hz: 1000,
            duty_resolution: 10,
        },
        idle_off: false,
    }),
    use_expander: false,
    version: Version::new(1, 0, 0),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_is_valid() {
        assert_eq!(BOARD.validate(), Ok(()));
        assert_eq!(BOARD.name, "DFRobot:FIREBEETLE_ESP32_P4_LCD_4_3");
    }

    #[test]
    fn test_vendor_table_layout() {
        let lcd = BOARD.lcd.unwrap();
        let table = lcd.vendor_init.unwrap();
        assert_eq!(table.len(), 21);

        let sizes: [usize; 21] = [
            0, 3, 3, 3, 1, 7, 2, 2, 37, 37, 6, 32, 43, 48, 37, 7, 14, 33, 0, 0, 1,
        ];
        for (cmd, size) in table.iter().zip(sizes) {
            assert_eq!(cmd.data().len(), size, "command 0x{:02X}", cmd.command());
        }

        let delays: u32 = table.iter().map(|cmd| cmd.delay_ms()).sum();
        assert_eq!(delays, 260);
        assert_eq!(table.last().map(|cmd| cmd.command()), Some(0x35));
    }

    #[test]
    fn test_refresh_rate() {
        let lcd = BOARD.lcd.unwrap();
        let LcdBus::MipiDsi(dsi) = lcd.bus;
        assert_eq!(dsi.refresh_rate_millihertz(WIDTH, HEIGHT), 50_223);
    }

    #[test]
    fn test_touch_owns_shared_bus() {
        let touch = BOARD.touch.unwrap();
        assert!(touch.owns_i2c_host(I2C_HOST_ID));
        assert!(!touch.owns_i2c_host(1));
        assert_eq!(touch.bus.clk_hz, 100_000);
    }

    #[test]
    fn test_backlight_is_pwm() {
        let backlight = BOARD.backlight.unwrap();
        assert!(backlight.i2c_config().is_none());
        assert!(!backlight.idle_off);
    }
}
