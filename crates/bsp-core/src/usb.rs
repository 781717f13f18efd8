//! USB device controller descriptor.

use crate::descriptor::{routes_of, Descriptor, PeripheralClass, Routes};
use crate::pin::{Mux, PinId, PinRole, PinRoute, Port};
use crate::vector::Irq;

/// USB D- is hard-wired to PA24 on every SAM D21 package.
pub const USB_DM_PIN: PinId = PinId::new(Port::PA, 24);
/// USB D+ is hard-wired to PA25.
pub const USB_DP_PIN: PinId = PinId::new(Port::PA, 25);

/// Role the USB block is operated in (`USB->DEVICE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsbController {
    /// Device-mode register view.
    Device,
}

impl UsbController {
    /// Register block base address.
    #[must_use]
    pub const fn base_address(self) -> u32 {
        match self {
            Self::Device => 0x4100_5000,
        }
    }
}

/// One entry of a board's USB table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UsbDevice {
    /// D- pin.
    pub dm: PinId,
    /// D+ pin.
    pub dp: PinId,
    /// Mux function for both data lines.
    pub d_mux: Mux,
    /// Controller register view.
    pub device: UsbController,
}

impl UsbDevice {
    /// The only routing the silicon supports: PA24/PA25 on mux G.
    pub const NATIVE: Self = Self {
        dm: USB_DM_PIN,
        dp: USB_DP_PIN,
        d_mux: Mux::G,
        device: UsbController::Device,
    };

    /// `true` if the data lines are where the silicon has them.
    #[must_use]
    pub fn is_native_routing(&self) -> bool {
        self.dm == USB_DM_PIN && self.dp == USB_DP_PIN && self.d_mux == Mux::G
    }
}

impl Descriptor for UsbDevice {
    const CLASS: PeripheralClass = PeripheralClass::Usb;

    fn routes(&self) -> Routes {
        routes_of(&[
            PinRoute::new(self.dm, self.d_mux, PinRole::UsbDm),
            PinRoute::new(self.dp, self.d_mux, PinRole::UsbDp),
        ])
    }

    fn irq(&self) -> Option<Irq> {
        Some(Irq::Usb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_routing() {
        assert!(UsbDevice::NATIVE.is_native_routing());
        let swapped = UsbDevice {
            dm: USB_DP_PIN,
            dp: USB_DM_PIN,
            ..UsbDevice::NATIVE
        };
        assert!(!swapped.is_native_routing());
    }

    #[test]
    fn usb_is_interrupt_driven() {
        assert_eq!(Descriptor::irq(&UsbDevice::NATIVE), Some(Irq::Usb));
        assert_eq!(UsbDevice::NATIVE.routes().len(), 2);
    }
}
