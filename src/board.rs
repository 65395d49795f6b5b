use core::fmt::{self, Display, Formatter};

use crate::backlight::{BacklightKind, BacklightSetup};
use crate::lcd::{LcdBus, LcdConfig, MipiDsiConfig};
use crate::touch::TouchConfig;

/// Version of the board description format understood by this crate
pub const BOARD_FILE_VERSION: Version = Version::new(1, 0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Version {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

/// Result of comparing a board description with the library version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Compatibility {
    Compatible,
    /// Minor versions differ, the description may miss newer settings
    MissingSettings,
    /// Major versions differ
    Incompatible,
}

impl Version {
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Check a board description of this version against `library`.
    /// Patch levels are ignored.
    pub fn compatibility(&self, library: &Version) -> Compatibility {
        if self.major != library.major {
            Compatibility::Incompatible
        } else if self.minor != library.minor {
            Compatibility::MissingSettings
        } else {
            Compatibility::Compatible
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Problems found by [`BoardConfig::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardConfigError {
    /// Width or height is zero
    EmptyResolution,
    /// DSI lane count outside 1..=2
    LaneNum(u8),
    /// DSI lane rate above 1500 Mbps
    LaneRate(u32),
    /// LCD gap larger than the resolution
    Gap,
    /// An empty vendor init table was given instead of `None`
    EmptyVendorInit,
    /// I2C backlight with `max_brightness` of zero
    MaxBrightness,
    /// I2C backlight without init commands
    EmptyBacklightInit,
    /// Description was written for another major version
    Version(Version),
}

impl Display for BoardConfigError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            BoardConfigError::EmptyResolution => write!(f, "Empty resolution"),
            BoardConfigError::LaneNum(n) => write!(f, "Unsupported DSI lane number {}", n),
            BoardConfigError::LaneRate(r) => write!(f, "DSI lane rate {}Mbps too high", r),
            BoardConfigError::Gap => write!(f, "LCD gap outside of the panel"),
            BoardConfigError::EmptyVendorInit => write!(f, "Empty vendor init table"),
            BoardConfigError::MaxBrightness => write!(f, "Backlight max brightness is 0"),
            BoardConfigError::EmptyBacklightInit => write!(f, "Empty backlight init sequence"),
            BoardConfigError::Version(v) => write!(f, "Incompatible board file version {}", v),
        }
    }
}

/// Everything the panel bring-up needs to know about a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    pub name: &'static str,
    pub width: u16,
    pub height: u16,
    pub lcd: Option<LcdConfig>,
    pub touch: Option<TouchConfig>,
    pub backlight: Option<BacklightSetup>,
    pub use_expander: bool,
    pub version: Version,
}

impl BoardConfig {
    /// Check the documented ranges of every enabled part
    pub fn validate(&self) -> Result<(), BoardConfigError> {
        if self.version.compatibility(&BOARD_FILE_VERSION) == Compatibility::Incompatible {
            return Err(BoardConfigError::Version(self.version));
        }
        if self.width == 0 || self.height == 0 {
            return Err(BoardConfigError::EmptyResolution);
        }
        if let Some(lcd) = &self.lcd {
            self.validate_lcd(lcd)?;
        }
        if let Some(BacklightSetup {
            kind: BacklightKind::I2cCommands(config),
            ..
        }) = &self.backlight
        {
            if config.max_brightness == 0 {
                return Err(BoardConfigError::MaxBrightness);
            }
            if config.init_sequence.is_empty() {
                return Err(BoardConfigError::EmptyBacklightInit);
            }
        }
        Ok(())
    }

    fn validate_lcd(&self, lcd: &LcdConfig) -> Result<(), BoardConfigError> {
        match &lcd.bus {
            LcdBus::MipiDsi(dsi) => {
                if dsi.lane_num == 0 || dsi.lane_num > MipiDsiConfig::MAX_LANE_NUM {
                    return Err(BoardConfigError::LaneNum(dsi.lane_num));
                }
                if dsi.lane_rate_mbps > MipiDsiConfig::MAX_LANE_RATE_MBPS {
                    return Err(BoardConfigError::LaneRate(dsi.lane_rate_mbps));
                }
            }
        }
        if lcd.gap_x > self.width || lcd.gap_y > self.height {
            return Err(BoardConfigError::Gap);
        }
        if matches!(lcd.vendor_init, Some(cmds) if cmds.is_empty()) {
            return Err(BoardConfigError::EmptyVendorInit);
        }
        Ok(())
    }
}
