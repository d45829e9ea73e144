//! The LED buffer and the packet encoder that flushes it to the board.
//!
//! The firmware takes two rows per control transfer, so a full screen
//! is four transfers: rows 0-1, 2-3, 4-5 and 6-7. Row 7 has no LEDs
//! behind it and only pads out the last packet.

use crate::{BoardError, DISPLAY_ROWS, PADDING_ROW, ROW_COUNT, ROW_PAIR_STARTS};

// ── Wire constants ───────────────────────────────────────────────────

/// Host-to-device, class request, interface recipient.
pub const REQUEST_TYPE: u8 = 0x21;
/// HID SET_REPORT.
pub const SET_REPORT: u8 = 0x09;
pub const REPORT_VALUE: u16 = 0x0000;
pub const REPORT_INDEX: u16 = 0x0000;

// ── Transport ────────────────────────────────────────────────────────

/// Anything that can issue a control transfer to the board.
///
/// Implemented by the real USB handle in `usb` and by fakes in tests.
pub trait Transport {
    type Error: std::error::Error + Send + Sync + 'static;

    fn write_control(
        &mut self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize, Self::Error>;
}

// ── LED buffer ───────────────────────────────────────────────────────

/// Eight rows of raw bytes, one 3-byte triplet per row in practice.
///
/// Row contents aren't validated; whatever is stored goes on the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedBuffer {
    rows: [Vec<u8>; ROW_COUNT],
}

impl LedBuffer {
    pub fn new() -> Self {
        Self {
            rows: std::array::from_fn(|_| vec![0; 3]),
        }
    }

    /// Replace a display row (0-6). The padding row can't be assigned.
    pub fn set_row(&mut self, row: usize, bytes: impl Into<Vec<u8>>) -> Result<(), BoardError> {
        if row >= DISPLAY_ROWS {
            return Err(BoardError::InvalidRow(row));
        }
        self.rows[row] = bytes.into();
        Ok(())
    }

    pub fn row(&self, row: usize) -> Option<&[u8]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn rows(&self) -> &[Vec<u8>; ROW_COUNT] {
        &self.rows
    }

    pub fn padding(&self) -> &[u8] {
        &self.rows[PADDING_ROW]
    }
}

impl Default for LedBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the payload for the row pair starting at `start`:
/// `[brightness, start, row[start]..., row[start + 1]...]`.
pub fn encode_row_pair(brightness: u8, start: usize, buffer: &LedBuffer) -> Vec<u8> {
    let first = &buffer.rows[start];
    let second = &buffer.rows[start + 1];

    let mut data = Vec::with_capacity(2 + first.len() + second.len());
    data.push(brightness);
    data.push(start as u8);
    data.extend_from_slice(first);
    data.extend_from_slice(second);
    data
}

// ── Board ────────────────────────────────────────────────────────────

/// One attached board: its transport, brightness byte and LED buffer.
pub struct Board<T: Transport> {
    transport: T,
    default_brightness: u8,
    leds: LedBuffer,
}

impl<T: Transport> Board<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            default_brightness: 0,
            leds: LedBuffer::new(),
        }
    }

    /// Set the brightness byte sent at the head of every packet.
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.default_brightness = brightness;
        self
    }

    pub fn brightness(&self) -> u8 {
        self.default_brightness
    }

    pub fn leds(&self) -> &LedBuffer {
        &self.leds
    }

    pub fn leds_mut(&mut self) -> &mut LedBuffer {
        &mut self.leds
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send the whole buffer: one transfer per row pair, in ascending order.
    ///
    /// All four pairs are attempted even if one fails; the first failure
    /// is returned once they've all gone out.
    pub fn write_screen(&mut self) -> Result<(), BoardError> {
        let mut first_error = None;

        for start in ROW_PAIR_STARTS {
            let data = encode_row_pair(self.default_brightness, start, &self.leds);
            if let Err(e) = self.write_packet(&data) {
                tracing::warn!("Transfer for rows {}-{} failed: {}", start, start + 1, e);
                first_error.get_or_insert(BoardError::Transfer {
                    row: start as u8,
                    source: Box::new(e),
                });
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Issue a single SET_REPORT control transfer carrying `data`.
    pub fn write_packet(&mut self, data: &[u8]) -> Result<usize, T::Error> {
        self.transport
            .write_control(REQUEST_TYPE, SET_REPORT, REPORT_VALUE, REPORT_INDEX, data)
    }
}
