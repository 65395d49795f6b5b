//! Supported boards

pub mod dfrobot;

use crate::board::BoardConfig;

pub use dfrobot::firebeetle_esp32_p4_lcd_4_3::BOARD as DFROBOT_FIREBEETLE_ESP32_P4_LCD_4_3;

/// Every board description shipped with this crate
pub const ALL: &[&BoardConfig] = &[&DFROBOT_FIREBEETLE_ESP32_P4_LCD_4_3];

/// Look up a board by its `Vendor:MODEL` name
pub fn by_name(name: &str) -> Option<&'static BoardConfig> {
    ALL.iter().copied().find(|board| board.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name() {
        let board = by_name("DFRobot:FIREBEETLE_ESP32_P4_LCD_4_3").unwrap();
        assert_eq!((board.width, board.height), (480, 800));
        assert!(by_name("DFRobot:UNKNOWN").is_none());
    }

    #[test]
    fn test_all_boards_valid() {
        for board in ALL {
            assert_eq!(board.validate(), Ok(()), "{}", board.name);
        }
    }
}
