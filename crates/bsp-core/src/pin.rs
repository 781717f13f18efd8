//! Pin identifiers and multiplexer routing.
//!
//! A SAM D21 pin is a `(port, index)` pair; its peripheral function is chosen
//! by the PMUX field (functions A–H). Descriptors never own a pin, they only
//! declare a [`PinRoute`]: which pin, which mux function, and which signal role
//! the pin plays for that instance.

/// Highest pin index within a port group.
pub const PINS_PER_PORT: u8 = 32;

/// GPIO port group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    /// Port A
    PA,
    /// Port B
    PB,
}

/// One physical pin (`GPIO_PIN(port, index)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId {
    port: Port,
    index: u8,
}

impl PinId {
    /// Pin `index` of `port`. Unchecked; see [`PinId::is_valid`].
    #[must_use]
    pub const fn new(port: Port, index: u8) -> Self {
        Self { port, index }
    }

    /// Port group.
    #[must_use]
    pub const fn port(self) -> Port {
        self.port
    }

    /// Index within the port group.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.index
    }

    /// `true` if the index exists in a 32-pin port group.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.index < PINS_PER_PORT
    }

    /// Single-bit mask for this pin in the port group's DIR/OUT registers.
    #[must_use]
    pub const fn mask(self) -> u32 {
        match 1u32.checked_shl(self.index as u32) {
            Some(mask) => mask,
            None => 0,
        }
    }
}

impl core::fmt::Display for PinId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let port = match self.port {
            Port::PA => "PA",
            Port::PB => "PB",
        };
        write!(f, "{port}{:02}", self.index)
    }
}

/// Peripheral multiplexer function (`GPIO_MUX_A` .. `GPIO_MUX_H`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mux {
    /// EIC
    A,
    /// REF, ADC, AC, PTC, DAC
    B,
    /// SERCOM
    C,
    /// SERCOM-ALT
    D,
    /// TC/TCC
    E,
    /// TCC
    F,
    /// COM (USB, I2S)
    G,
    /// AC/GCLK
    H,
}

/// Signal a pin carries for one peripheral instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinRole {
    /// UART receive
    Rx,
    /// UART transmit
    Tx,
    /// SPI master-in
    Miso,
    /// SPI master-out
    Mosi,
    /// SPI clock
    Sck,
    /// I2C clock
    Scl,
    /// I2C data
    Sda,
    /// ADC input
    AnalogIn,
    /// USB D-
    UsbDm,
    /// USB D+
    UsbDp,
    /// Board indicator output (LED)
    Indicator,
}

impl PinRole {
    /// Short label for reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rx => "rx",
            Self::Tx => "tx",
            Self::Miso => "miso",
            Self::Mosi => "mosi",
            Self::Sck => "sck",
            Self::Scl => "scl",
            Self::Sda => "sda",
            Self::AnalogIn => "analog",
            Self::UsbDm => "usb-dm",
            Self::UsbDp => "usb-dp",
            Self::Indicator => "indicator",
        }
    }
}

/// A pin, the mux function it is switched to, and the role it plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinRoute {
    /// Physical pin.
    pub pin: PinId,
    /// Mux function; analog inputs always use [`Mux::B`].
    pub mux: Mux,
    /// Signal role.
    pub role: PinRole,
}

impl PinRoute {
    /// Route `pin` through `mux` as `role`.
    #[must_use]
    pub const fn new(pin: PinId, mux: Mux, role: PinRole) -> Self {
        Self { pin, mux, role }
    }
}

/// A header pin deliberately wired to two peripheral roles.
///
/// Only one of them may be active at a time; which one is up to the
/// application. Listing the pin here is what makes the overlap legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinShare {
    /// The shared pin.
    pub pin: PinId,
    /// Silkscreen/header note, e.g. `"A4 / I2C1 SDA"`.
    pub note: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_display_matches_datasheet_naming() {
        use std::string::ToString;
        assert_eq!(PinId::new(Port::PB, 3).to_string(), "PB03");
        assert_eq!(PinId::new(Port::PA, 24).to_string(), "PA24");
    }

    #[test]
    fn pin_validity_and_mask() {
        assert!(PinId::new(Port::PA, 31).is_valid());
        assert!(!PinId::new(Port::PA, 32).is_valid());
        assert_eq!(PinId::new(Port::PB, 10).mask(), 1 << 10);
        assert_eq!(PinId::new(Port::PB, 40).mask(), 0);
    }

    #[test]
    fn pins_compare_by_port_then_index() {
        assert!(PinId::new(Port::PA, 31) < PinId::new(Port::PB, 0));
        assert_ne!(PinId::new(Port::PA, 8), PinId::new(Port::PB, 8));
    }
}
