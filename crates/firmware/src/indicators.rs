//! Board indicator hooks.
//!
//! The SODAQ ONE drives an RGB LED (active low) from its indicator hook; the
//! ExpLoRer uses [`bsp_core::NoIndicators`]. Pin writes go through
//! [`PortWriter`] so the hook runs unchanged against the real PORT block or a
//! test double.

use bsp_core::{Indicators, PinId, Port};

/// Set-only access to the PORT direction and output registers.
pub trait PortWriter {
    /// Make the pins in `mask` outputs.
    fn dirset(&mut self, port: Port, mask: u32);
    /// Drive the pins in `mask` high.
    fn outset(&mut self, port: Port, mask: u32);
}

/// Active-low LED bank.
///
/// `init()` parks every pin high (LED off) before switching it to output,
/// so no LED flashes during bring-up.
#[derive(Debug)]
pub struct ActiveLowLeds<P: PortWriter> {
    port: P,
    pins: &'static [PinId],
}

impl<P: PortWriter> ActiveLowLeds<P> {
    /// LEDs on `pins`.
    pub const fn new(port: P, pins: &'static [PinId]) -> Self {
        Self { port, pins }
    }

    /// Give the port writer back.
    pub fn release(self) -> P {
        self.port
    }
}

impl<P: PortWriter> Indicators for ActiveLowLeds<P> {
    fn init(&mut self) {
        for pin in self.pins {
            self.port.outset(pin.port(), pin.mask());
            self.port.dirset(pin.port(), pin.mask());
        }
    }
}
