//! SODAQ ONE (ATSAMD21G18A, RN2483/RN2903 LoRa, GPS, RGB LED)
//!
//! D0/D1 carry UART 0 by default. With `analog-d0-d1` they become analog
//! inputs A10/A11 instead, UART 0 disappears and the LoRa module moves to
//! UART 0. The RGB LED (active low) is driven by the firmware's indicator
//! hook.

use bsp_core::{
    AdcChannel, AdcSettings, Board, ClockConfig, GeneratorId, I2cBus, I2cFlags, I2cSpeed, Irq,
    Mux, PeripheralClass, PinId, PinShare, Port, RtcDevice, RttDevice, Sercom, SpiBus, SpiMisoPad,
    SpiMosiPad, Table, Timer, UartChannel, UartFlags, UartRxPad, UartTxPad, UsbDevice,
    VectorBinding,
};

use crate::{select_clock, sodaq_timers};

// ── Clock ───────────────────────────────────────────────────────────────────

/// 48 MHz from the PLL, or OSC8M undivided with `clock-direct`.
pub const CLOCK: ClockConfig = select_clock(ClockConfig::pll(47, 1), ClockConfig::direct(1));

/// Core clock in Hz.
pub const CORECLOCK: u32 = CLOCK.core_clock_hz();

const _: () = assert!(CLOCK.validate().is_ok(), "sodaq-one clock strategy is invalid");

// ── Timers ──────────────────────────────────────────────────────────────────

/// Number of timers.
pub const TIMER_NUMOF: usize = 2;
/// Period of the 16-bit system timer.
pub const TIMER_0_MAX_VALUE: u32 = 0xffff;

/// TC3 (16 bit), TC4+TC5 (32 bit).
pub static TIMERS: [Timer; TIMER_NUMOF] = sodaq_timers(&CLOCK);

// ── UART ────────────────────────────────────────────────────────────────────

const UART_D0_D1: UartChannel = UartChannel {
    dev: Sercom::Sercom5,
    rx_pin: PinId::new(Port::PB, 3), // D0
    tx_pin: PinId::new(Port::PB, 2), // D1
    mux: Mux::D,
    rx_pad: UartRxPad::Pad1,
    tx_pad: UartTxPad::Tx0,
    flags: UartFlags::NONE,
    gclk_src: GeneratorId::CORE,
};

const UART_LORA: UartChannel = UartChannel {
    dev: Sercom::Sercom2,
    rx_pin: PinId::new(Port::PA, 13),
    tx_pin: PinId::new(Port::PA, 12),
    mux: Mux::C,
    rx_pad: UartRxPad::Pad1,
    tx_pad: UartTxPad::Tx0,
    flags: UartFlags::NONE,
    gclk_src: GeneratorId::CORE,
};

/// Number of UARTs.
#[cfg(not(feature = "analog-d0-d1"))]
pub const UART_NUMOF: usize = 2;
/// Number of UARTs.
#[cfg(feature = "analog-d0-d1")]
pub const UART_NUMOF: usize = 1;

/// D0/D1 header, LoRa module.
#[cfg(not(feature = "analog-d0-d1"))]
pub static UARTS: [UartChannel; UART_NUMOF] = [UART_D0_D1, UART_LORA];
/// LoRa module only; D0/D1 are analog.
#[cfg(feature = "analog-d0-d1")]
pub static UARTS: [UartChannel; UART_NUMOF] = [UART_LORA];

// ── ADC ─────────────────────────────────────────────────────────────────────

/// Number of ADC lines.
#[cfg(not(feature = "analog-d0-d1"))]
pub const ADC_NUMOF: usize = 11;
/// Number of ADC lines.
#[cfg(feature = "analog-d0-d1")]
pub const ADC_NUMOF: usize = 13;

/// A0..A9 and the battery divider.
#[cfg(not(feature = "analog-d0-d1"))]
pub static ADC_CHANNELS: [AdcChannel; ADC_NUMOF] = [
    AdcChannel::new(PinId::new(Port::PA, 2), 0),   // A0
    AdcChannel::new(PinId::new(Port::PA, 3), 1),   // A1
    AdcChannel::new(PinId::new(Port::PB, 8), 2),   // A2
    AdcChannel::new(PinId::new(Port::PB, 9), 3),   // A3
    AdcChannel::new(PinId::new(Port::PA, 6), 6),   // A4
    AdcChannel::new(PinId::new(Port::PA, 7), 7),   // A5
    AdcChannel::new(PinId::new(Port::PA, 8), 16),  // A6
    AdcChannel::new(PinId::new(Port::PA, 9), 17),  // A7
    AdcChannel::new(PinId::new(Port::PA, 10), 18), // A8
    AdcChannel::new(PinId::new(Port::PA, 11), 19), // A9
    AdcChannel::new(PinId::new(Port::PA, 5), 5),   // BAT_VOLT
];

/// A0..A11 and the battery divider.
#[cfg(feature = "analog-d0-d1")]
pub static ADC_CHANNELS: [AdcChannel; ADC_NUMOF] = [
    AdcChannel::new(PinId::new(Port::PA, 2), 0),   // A0
    AdcChannel::new(PinId::new(Port::PA, 3), 1),   // A1
    AdcChannel::new(PinId::new(Port::PB, 8), 2),   // A2
    AdcChannel::new(PinId::new(Port::PB, 9), 3),   // A3
    AdcChannel::new(PinId::new(Port::PA, 6), 6),   // A4
    AdcChannel::new(PinId::new(Port::PA, 7), 7),   // A5
    AdcChannel::new(PinId::new(Port::PA, 8), 16),  // A6
    AdcChannel::new(PinId::new(Port::PA, 9), 17),  // A7
    AdcChannel::new(PinId::new(Port::PA, 10), 18), // A8
    AdcChannel::new(PinId::new(Port::PA, 11), 19), // A9
    AdcChannel::new(PinId::new(Port::PB, 2), 10),  // A10 (D1)
    AdcChannel::new(PinId::new(Port::PB, 3), 11),  // A11 (D0)
    AdcChannel::new(PinId::new(Port::PA, 5), 5),   // BAT_VOLT
];

// ── SPI ─────────────────────────────────────────────────────────────────────

/// Number of SPI buses.
pub const SPI_NUMOF: usize = 1;

/// SPI on A6/A8/A9, SERCOM0.
pub static SPIS: [SpiBus; SPI_NUMOF] = [SpiBus {
    dev: Sercom::Sercom0,
    miso_pin: PinId::new(Port::PA, 8),
    mosi_pin: PinId::new(Port::PA, 10),
    clk_pin: PinId::new(Port::PA, 11),
    miso_mux: Mux::C,
    mosi_mux: Mux::C,
    clk_mux: Mux::C,
    miso_pad: SpiMisoPad::Pad0,
    mosi_pad: SpiMosiPad::Mosi2Sck3,
}];

// ── I2C ─────────────────────────────────────────────────────────────────────

/// Number of I2C buses.
pub const I2C_NUMOF: usize = 1;

/// GPS and accelerometer bus on SERCOM3.
pub static I2CS: [I2cBus; I2C_NUMOF] = [I2cBus {
    dev: Sercom::Sercom3,
    speed: I2cSpeed::Normal,
    scl_pin: PinId::new(Port::PA, 23),
    sda_pin: PinId::new(Port::PA, 22),
    mux: Mux::C,
    gclk_src: GeneratorId::CORE,
    flags: I2cFlags::NONE,
}];

// ── RTC / RTT / USB ─────────────────────────────────────────────────────────

/// Number of calendar RTCs.
pub const RTC_NUMOF: usize = 1;
/// Number of tick counters.
pub const RTT_NUMOF: usize = 1;
/// Number of USB device ports.
pub const USB_NUMOF: usize = 1;

/// Calendar RTC.
pub static RTCS: [RtcDevice; RTC_NUMOF] = [RtcDevice::CALENDAR];
/// 32.768 kHz counter.
pub static RTTS: [RttDevice; RTT_NUMOF] = [RttDevice::COUNTER];
/// Native USB on PA24/PA25.
pub static USBS: [UsbDevice; USB_NUMOF] = [UsbDevice::NATIVE];

// ── Vectors ─────────────────────────────────────────────────────────────────

/// `isr_tc3`, `isr_tc4`, `isr_sercom5`, `isr_sercom2`, `isr_rtc`, `isr_usb`.
#[cfg(not(feature = "analog-d0-d1"))]
pub static VECTORS: [VectorBinding; 6] = [
    VectorBinding::new(PeripheralClass::Timer, 0, Irq::Tc3),
    VectorBinding::new(PeripheralClass::Timer, 1, Irq::Tc4),
    VectorBinding::new(PeripheralClass::Uart, 0, Irq::Sercom5),
    VectorBinding::new(PeripheralClass::Uart, 1, Irq::Sercom2),
    VectorBinding::new(PeripheralClass::Rtt, 0, Irq::Rtc),
    VectorBinding::new(PeripheralClass::Usb, 0, Irq::Usb),
];

/// `isr_tc3`, `isr_tc4`, `isr_sercom2`, `isr_rtc`, `isr_usb`.
#[cfg(feature = "analog-d0-d1")]
pub static VECTORS: [VectorBinding; 5] = [
    VectorBinding::new(PeripheralClass::Timer, 0, Irq::Tc3),
    VectorBinding::new(PeripheralClass::Timer, 1, Irq::Tc4),
    VectorBinding::new(PeripheralClass::Uart, 0, Irq::Sercom2),
    VectorBinding::new(PeripheralClass::Rtt, 0, Irq::Rtc),
    VectorBinding::new(PeripheralClass::Usb, 0, Irq::Usb),
];

/// A6/A8/A9 are both analog inputs and the SPI bus.
pub static SHARED_PINS: [PinShare; 3] = [
    PinShare {
        pin: PinId::new(Port::PA, 8),
        note: "A6 / SPI MISO",
    },
    PinShare {
        pin: PinId::new(Port::PA, 10),
        note: "A8 / SPI MOSI",
    },
    PinShare {
        pin: PinId::new(Port::PA, 11),
        note: "A9 / SPI SCK",
    },
];

// ── Indicators ──────────────────────────────────────────────────────────────

/// Red LED, active low.
pub const LED_RED_PIN: PinId = PinId::new(Port::PA, 15);
/// Green LED, active low.
pub const LED_GREEN_PIN: PinId = PinId::new(Port::PB, 10);
/// Blue LED, active low.
pub const LED_BLUE_PIN: PinId = PinId::new(Port::PB, 11);

/// Pins the indicator hook drives.
pub static INDICATOR_PINS: [PinId; 3] = [LED_RED_PIN, LED_GREEN_PIN, LED_BLUE_PIN];

/// Everything above, for the linter and the firmware.
pub static BOARD: Board = Board {
    name: "sodaq-one",
    clock: CLOCK,
    timers: Table::new(&TIMERS, TIMER_NUMOF),
    uarts: Table::new(&UARTS, UART_NUMOF),
    adc_channels: Table::new(&ADC_CHANNELS, ADC_NUMOF),
    adc_settings: AdcSettings::SODAQ,
    spis: Table::new(&SPIS, SPI_NUMOF),
    i2cs: Table::new(&I2CS, I2C_NUMOF),
    rtcs: Table::new(&RTCS, RTC_NUMOF),
    rtts: Table::new(&RTTS, RTT_NUMOF),
    usbs: Table::new(&USBS, USB_NUMOF),
    vectors: &VECTORS,
    shared_pins: &SHARED_PINS,
    indicator_pins: &INDICATOR_PINS,
};

#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use bsp_core::DescriptorRef;

    #[test]
    fn battery_sense_is_last_adc_line() {
        assert_eq!(ADC_CHANNELS[ADC_NUMOF - 1].pin, PinId::new(Port::PA, 5));
        assert!(ADC_CHANNELS.iter().all(AdcChannel::muxpos_matches_pin));
    }

    #[cfg(not(feature = "analog-d0-d1"))]
    #[test]
    fn d0_d1_are_uart_zero_by_default() {
        assert_eq!(UARTS[0].rx_pin, PinId::new(Port::PB, 3));
        assert_eq!(UARTS[0].tx_pin, PinId::new(Port::PB, 2));
        assert!(ADC_CHANNELS.iter().all(|ch| ch.pin != UARTS[0].rx_pin));
        assert_eq!(
            BOARD.lookup(Irq::Sercom2),
            Some(DescriptorRef::new(PeripheralClass::Uart, 1))
        );
    }

    #[cfg(feature = "analog-d0-d1")]
    #[test]
    fn analog_d0_d1_moves_lora_to_uart_zero() {
        assert_eq!(UARTS[0].dev, Sercom::Sercom2);
        assert_eq!(BOARD.lookup(Irq::Sercom5), None);
        assert_eq!(
            BOARD.lookup(Irq::Sercom2),
            Some(DescriptorRef::new(PeripheralClass::Uart, 0))
        );
        assert!(ADC_CHANNELS.iter().any(|ch| ch.pin == PinId::new(Port::PB, 2)));
    }

    #[test]
    fn leds_are_not_routed_to_any_peripheral() {
        for view in BOARD.descriptors() {
            for route in &view.routes {
                assert!(!INDICATOR_PINS.contains(&route.pin), "{}", view.id);
            }
        }
    }

    #[test]
    fn spi_pins_are_declared_shared() {
        let bus = SPIS[0];
        for pin in [bus.miso_pin, bus.mosi_pin, bus.clk_pin] {
            assert!(BOARD.is_shared(pin), "{pin}");
        }
    }
}
