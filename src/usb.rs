//! The real transport: `rusb` devices and handles.
//!
//! `rusb::Context` and `rusb::DeviceHandle` close themselves on drop,
//! so every exit path releases the USB stack and the board.

use crate::board::Transport;
use crate::discovery::{DeviceIds, select_board};
use crate::{BoardConfig, BoardError};
use rusb::{Context, Device, DeviceHandle, UsbContext};
use std::time::Duration;

impl DeviceIds for Device<Context> {
    fn ids(&self) -> Option<(u16, u16)> {
        let desc = self.device_descriptor().ok()?;
        Some((desc.vendor_id(), desc.product_id()))
    }
}

/// An opened DC board.
pub struct UsbBoard {
    handle: DeviceHandle<Context>,
    timeout: Duration,
}

impl Transport for UsbBoard {
    type Error = rusb::Error;

    fn write_control(
        &mut self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize, rusb::Error> {
        self.handle
            .write_control(request_type, request, value, index, data, self.timeout)
    }
}

/// Find the first attached DC board and open it.
pub fn open_board(context: &Context, config: &BoardConfig) -> Result<UsbBoard, BoardError> {
    let devices = context
        .devices()
        .map_err(|e| BoardError::Enumeration(Box::new(e)))?;
    let device = select_board(devices.iter(), config)?;

    tracing::info!(
        "Opening DC board on bus {} address {}",
        device.bus_number(),
        device.address()
    );
    let handle = device.open().map_err(|e| BoardError::Open(Box::new(e)))?;

    Ok(UsbBoard {
        handle,
        timeout: config.transfer_timeout,
    })
}
