//! Shared pieces for driving the DC USB LED board.
//!
//! This module provides:
//! - The board's USB identifiers and row layout
//! - `BoardConfig`, the device-matching configuration
//! - Signal handling for clean shutdown of the render loop
//!
//! It also re-exports the board, discovery and pattern modules used by
//! the main binary.

pub mod board;
pub mod discovery;
pub mod error;
pub mod patterns;
#[cfg(test)]
mod test_utils;
#[cfg(feature = "hardware")]
pub mod usb;

pub use board::{Board, LedBuffer, Transport};
pub use error::BoardError;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

// ── Hardware identifiers ───────────────────────────────────────────

/// USB vendor ID reported by the board.
pub const VENDOR_ID: u16 = 0x1d34;
/// USB product ID reported by the board.
pub const PRODUCT_ID: u16 = 0x0013;

/// Rows held in the LED buffer, including the padding row.
pub const ROW_COUNT: usize = 8;
/// Rows with physical LEDs behind them.
pub const DISPLAY_ROWS: usize = 7;
/// The eighth row only exists because every packet carries two rows.
pub const PADDING_ROW: usize = 7;
/// First row of each packet, in the order packets go out.
pub const ROW_PAIR_STARTS: [usize; 4] = [0, 2, 4, 6];

// ── Board configuration ────────────────────────────────────────────

/// How to find and talk to the board.
///
/// Plain `Copy` data with no global state; `Default` gives the only
/// hardware model this crate knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    pub vendor_id: u16,
    pub product_id: u16,
    /// Timeout for each control transfer.
    pub transfer_timeout: Duration,
}

impl BoardConfig {
    /// Whether a device with these IDs is the board we're looking for.
    pub fn matches(&self, vendor_id: u16, product_id: u16) -> bool {
        vendor_id == self.vendor_id && product_id == self.product_id
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            vendor_id: VENDOR_ID,
            product_id: PRODUCT_ID,
            transfer_timeout: Duration::from_secs(1),
        }
    }
}

// ── Shutdown ───────────────────────────────────────────────────────

/// Set up a Ctrl+C handler that sets `running` to false.
///
/// The render loop polls the flag between frames, so it stops at a
/// frame boundary and the USB handles are dropped normally.
pub fn setup_signal_handler() -> Result<Arc<AtomicBool>, ctrlc::Error> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    Ok(running)
}

/// Check if the render loop should keep running.
pub fn is_running(running: &AtomicBool) -> bool {
    running.load(Ordering::SeqCst)
}

// ── Tests ──────────────────────────────────────────────────────────
