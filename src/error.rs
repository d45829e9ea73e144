//! Error type shared by discovery, the packet encoder and the USB layer.

use std::error::Error;

type Source = Box<dyn Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// Nothing attached matches the board's vendor/product pair.
    #[error("no DC board found (looking for {vendor_id:04x}:{product_id:04x})")]
    DeviceNotFound { vendor_id: u16, product_id: u16 },

    /// The host USB stack couldn't list devices.
    #[error("failed to enumerate USB devices: {0}")]
    Enumeration(#[source] Source),

    #[error("failed to open DC board: {0}")]
    Open(#[source] Source),

    /// A control transfer for the row pair starting at `row` failed.
    #[error("control transfer for row pair {row} failed: {source}")]
    Transfer { row: u8, source: Source },

    #[error("row {0} is not a display row")]
    InvalidRow(usize),
}
