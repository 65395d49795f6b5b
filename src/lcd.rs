use num_enum::{IntoPrimitive, TryFromPrimitive};

/// One vendor specific LCD initialization command.
///
/// The payload is handed to the panel bring-up unchanged and never
/// interpreted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LcdVendorInitCmd {
    /// Command address/opcode
    command: u8,
    /// Command parameters
    data: &'static [u8],
    /// Delay in milliseconds after sending the command
    delay_ms: u32,
}

impl LcdVendorInitCmd {
    /// Command followed by 8-bit parameters
    pub const fn with_params(delay_ms: u32, command: u8, data: &'static [u8]) -> Self {
        Self {
            command,
            data,
            delay_ms,
        }
    }

    /// Command without parameters
    pub const fn no_params(delay_ms: u32, command: u8) -> Self {
        Self {
            command,
            data: &[],
            delay_ms,
        }
    }

    pub const fn command(&self) -> u8 {
        self.command
    }

    pub const fn data(&self) -> &'static [u8] {
        self.data
    }

    pub const fn delay_ms(&self) -> u32 {
        self.delay_ms
    }
}

/// Pixel format on the panel interface, value is bits per pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorBits {
    Rgb565 = 16,
    Rgb666 = 18,
    Rgb888 = 24,
}

impl ColorBits {
    pub const fn bytes_per_pixel(self) -> u8 {
        match self {
            ColorBits::Rgb565 => 2,
            ColorBits::Rgb666 | ColorBits::Rgb888 => 3,
        }
    }
}

/// DPI video timing, all values in pixel clocks / lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DpiTiming {
    pub hsync_pulse_width: u16,
    pub hsync_back_porch: u16,
    pub hsync_front_porch: u16,
    pub vsync_pulse_width: u16,
    pub vsync_back_porch: u16,
    pub vsync_front_porch: u16,
}

impl DpiTiming {
    /// Total clocks per line for an active width of `width`
    pub const fn line_total(&self, width: u16) -> u32 {
        width as u32
            + self.hsync_pulse_width as u32
            + self.hsync_back_porch as u32
            + self.hsync_front_porch as u32
    }

    /// Total lines per frame for an active height of `height`
    pub const fn frame_total(&self, height: u16) -> u32 {
        height as u32
            + self.vsync_pulse_width as u32
            + self.vsync_back_porch as u32
            + self.vsync_front_porch as u32
    }
}

/// MIPI-DSI host and DPI parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MipiDsiConfig {
    /// Number of data lanes, the ESP32-P4 supports 1 or 2
    pub lane_num: u8,
    /// Bit rate of a single lane
    pub lane_rate_mbps: u32,
    pub dpi_clk_mhz: u32,
    pub dpi_color_bits: ColorBits,
    pub timing: DpiTiming,
    /// LDO channel powering the DSI PHY, `None` if not used
    pub phy_ldo_id: Option<u8>,
}

impl MipiDsiConfig {
    pub const MAX_LANE_NUM: u8 = 2;
    pub const MAX_LANE_RATE_MBPS: u32 = 1500;

    /// Refresh rate in millihertz for a panel of `width` x `height`
    pub const fn refresh_rate_millihertz(&self, width: u16, height: u16) -> u32 {
        let clocks = self.timing.line_total(width) as u64 * self.timing.frame_total(height) as u64;
        (self.dpi_clk_mhz as u64 * 1_000_000_000 / clocks) as u32
    }
}

/// Bus the LCD is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdBus {
    MipiDsi(MipiDsiConfig),
}

/// Active level of a control signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

/// Axis transformation applied by the panel or the touch controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transform {
    pub swap_xy: bool,
    pub mirror_x: bool,
    pub mirror_y: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LcdConfig {
    /// Controller name, `SIMPLE` for panels fully set up by the vendor table
    pub controller: &'static str,
    pub bus: LcdBus,
    /// Vendor init table, `None` to use the controller's default sequence
    pub vendor_init: Option<&'static [LcdVendorInitCmd]>,
    pub color_bits: ColorBits,
    pub bgr_order: bool,
    pub invert_color: bool,
    pub transform: Transform,
    /// Offset in pixels, must stay within the panel width
    pub gap_x: u16,
    /// Offset in pixels, must stay within the panel height
    pub gap_y: u16,
    pub reset_io: Option<u8>,
    pub reset_level: Level,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_bits_from() {
        assert_eq!(ColorBits::try_from(16).ok(), Some(ColorBits::Rgb565));
        assert_eq!(ColorBits::try_from(18).ok(), Some(ColorBits::Rgb666));
        assert_eq!(ColorBits::try_from(24).ok(), Some(ColorBits::Rgb888));
        assert!(ColorBits::try_from(32).is_err());
        assert_eq!(u8::from(ColorBits::Rgb565), 16);
        assert_eq!(ColorBits::Rgb666.bytes_per_pixel(), 3);
    }

    #[test]
    fn test_no_params_command() {
        let cmd = LcdVendorInitCmd::no_params(120, 0x11);
        assert_eq!(cmd.command(), 0x11);
        assert!(cmd.data().is_empty());
        assert_eq!(cmd.delay_ms(), 120);
    }

    #[test]
    fn test_timing_totals() {
        let timing = DpiTiming {
            hsync_pulse_width: 2,
            hsync_back_porch: 40,
            hsync_front_porch: 40,
            vsync_pulse_width: 2,
            vsync_back_porch: 10,
            vsync_front_porch: 180,
        };
        assert_eq!(timing.line_total(480), 562);
        assert_eq!(timing.frame_total(800), 992);
    }
}
