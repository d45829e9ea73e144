use crate::board::Transport;
use crate::discovery::DeviceIds;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

/// One control transfer as the fake saw it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub request_type: u8,
    pub request: u8,
    pub value: u16,
    pub index: u16,
    pub data: Vec<u8>,
}

/// Records every transfer; fails the ones listed in `fail_on` (by call number).
#[derive(Clone, Debug, Default)]
pub struct FakeTransport {
    pub transfers: Rc<RefCell<Vec<Transfer>>>,
    pub fail_on: Vec<usize>,
    calls: usize,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(calls: &[usize]) -> Self {
        Self {
            fail_on: calls.to_vec(),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Transfer> {
        self.transfers.borrow().clone()
    }

    pub fn row_indices(&self) -> Vec<u8> {
        self.transfers.borrow().iter().map(|t| t.data[1]).collect()
    }
}

impl Transport for FakeTransport {
    type Error = io::Error;

    fn write_control(
        &mut self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize, io::Error> {
        let call = self.calls;
        self.calls += 1;
        self.transfers.borrow_mut().push(Transfer {
            request_type,
            request,
            value,
            index,
            data: data.to_vec(),
        });
        if self.fail_on.contains(&call) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "device gone"));
        }
        Ok(data.len())
    }
}

/// A device as enumeration would report it.
#[derive(Clone, Debug)]
pub struct FakeDevice {
    pub name: &'static str,
    pub ids: Option<(u16, u16)>,
    pub transport: FakeTransport,
}

impl FakeDevice {
    pub fn new(name: &'static str, vendor_id: u16, product_id: u16) -> Self {
        Self {
            name,
            ids: Some((vendor_id, product_id)),
            transport: FakeTransport::new(),
        }
    }

    /// A device whose descriptor can't be read.
    pub fn unreadable(name: &'static str) -> Self {
        Self {
            name,
            ids: None,
            transport: FakeTransport::new(),
        }
    }
}

impl DeviceIds for FakeDevice {
    fn ids(&self) -> Option<(u16, u16)> {
        self.ids
    }
}
