#![no_std]
//! Board support for MIPI-DSI display panels
//!
//! Static descriptions of display boards (panel timing, vendor LCD init
//! tables, touch wiring and backlight selection) plus the bring-up of boards
//! whose backlight is a command driven I2C controller.

/// Backlight selection of a board.
pub mod backlight;

/// Board description and validation.
pub mod board;

/// Supported boards.
pub mod boards;

/// Bring-up helpers.
pub mod bringup;

/// LCD panel parameters and vendor init commands.
pub mod lcd;

/// Touch controller wiring.
pub mod touch;

pub use board::{BoardConfig, BOARD_FILE_VERSION};
pub use drivers;

extern crate alloc;
