//! Device discovery: pick the DC board out of everything on the bus.
//!
//! Matching is a pure function of the vendor/product pair, so the
//! selection logic works on anything that can report those IDs. The
//! `usb` module plugs real `rusb` devices into it.

use crate::{BoardConfig, BoardError, PRODUCT_ID, VENDOR_ID};

/// Something enumeration can hand us.
pub trait DeviceIds {
    /// `(vendor_id, product_id)`, or `None` if the descriptor can't be read.
    fn ids(&self) -> Option<(u16, u16)>;
}

/// Whether a vendor/product pair identifies a DC board.
pub fn is_dc_board(vendor_id: u16, product_id: u16) -> bool {
    vendor_id == VENDOR_ID && product_id == PRODUCT_ID
}

/// Return the first device matching `config`, in enumeration order.
///
/// Every match is logged; the ones after the first are dropped without
/// being opened. Devices with unreadable descriptors are skipped.
pub fn select_board<D, I>(devices: I, config: &BoardConfig) -> Result<D, BoardError>
where
    D: DeviceIds,
    I: IntoIterator<Item = D>,
{
    let mut selected = None;

    for device in devices {
        let Some((vendor_id, product_id)) = device.ids() else {
            continue;
        };
        if !config.matches(vendor_id, product_id) {
            continue;
        }

        tracing::info!("Found a DC board ({:04x}:{:04x})", vendor_id, product_id);
        if selected.is_none() {
            selected = Some(device);
        } else {
            tracing::debug!("Ignoring additional DC board");
        }
    }

    selected.ok_or(BoardError::DeviceNotFound {
        vendor_id: config.vendor_id,
        product_id: config.product_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::test_utils::FakeDevice;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0x1d34, 0x0013, true)]
    #[case(0x1d34, 0x0000, false)]
    #[case(0x0000, 0x0013, false)]
    #[case(0x046d, 0xc52b, false)]
    #[case(0xffff, 0xffff, false)]
    fn test_is_dc_board(#[case] vendor: u16, #[case] product: u16, #[case] expected: bool) {
        assert_eq!(is_dc_board(vendor, product), expected);
    }

    #[test]
    fn selects_match_between_non_matching_devices() {
        let a = FakeDevice::new("A", 0x046d, 0xc52b);
        let b = FakeDevice::new("B", VENDOR_ID, PRODUCT_ID);
        let c = FakeDevice::new("C", 0x8087, 0x0026);
        let (a_log, c_log) = (a.transport.clone(), c.transport.clone());

        let selected = select_board(vec![a, b, c], &BoardConfig::default()).unwrap();
        assert_eq!(selected.name, "B");

        let mut board = Board::new(selected.transport.clone());
        board.write_screen().unwrap();

        assert_eq!(selected.transport.sent().len(), 4);
        assert!(a_log.sent().is_empty());
        assert!(c_log.sent().is_empty());
    }

    #[test]
    fn first_of_several_matches_wins() {
        let devices = vec![
            FakeDevice::new("first", VENDOR_ID, PRODUCT_ID),
            FakeDevice::new("second", VENDOR_ID, PRODUCT_ID),
        ];
        let selected = select_board(devices, &BoardConfig::default()).unwrap();
        assert_eq!(selected.name, "first");
    }

    #[test]
    fn unreadable_descriptors_are_skipped() {
        let devices = vec![
            FakeDevice::unreadable("broken"),
            FakeDevice::new("board", VENDOR_ID, PRODUCT_ID),
        ];
        let selected = select_board(devices, &BoardConfig::default()).unwrap();
        assert_eq!(selected.name, "board");
    }

    #[test]
    fn no_match_is_device_not_found() {
        let devices = vec![FakeDevice::new("A", 0x046d, 0xc52b)];
        let err = select_board(devices, &BoardConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            BoardError::DeviceNotFound {
                vendor_id: 0x1d34,
                product_id: 0x0013
            }
        ));
    }

    #[test]
    fn empty_bus_is_device_not_found() {
        let err = select_board(Vec::<FakeDevice>::new(), &BoardConfig::default()).unwrap_err();
        assert!(matches!(err, BoardError::DeviceNotFound { .. }));
    }
}
