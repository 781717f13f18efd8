//! SODAQ ExpLoRer (ATSAMD21J18A, RN2483 LoRa + RN4871 BLE)
//!
//! UART 1 talks to the BLE module and UART 2 to the RN2483 LoRa module.
//! Header pins A4/A5 double as the second I2C bus.

use bsp_core::{
    AdcChannel, AdcSettings, Board, ClockConfig, GeneratorId, I2cBus, I2cFlags, I2cSpeed, Irq,
    Mux, PeripheralClass, PinId, PinShare, Port, RtcDevice, RttDevice, Sercom, SpiBus, SpiMisoPad,
    SpiMosiPad, Table, Timer, UartChannel, UartFlags, UartRxPad, UartTxPad, UsbDevice,
    VectorBinding,
};

use crate::{select_clock, sodaq_timers};

// ── Clock ───────────────────────────────────────────────────────────────────

/// 48 MHz from the PLL (8 MHz / 8 × 48), or OSC8M undivided with
/// `clock-direct`.
pub const CLOCK: ClockConfig = select_clock(ClockConfig::pll(47, 1), ClockConfig::direct(1));

/// Core clock in Hz.
pub const CORECLOCK: u32 = CLOCK.core_clock_hz();

const _: () = assert!(CLOCK.validate().is_ok(), "sodaq-explorer clock strategy is invalid");

// ── Timers ──────────────────────────────────────────────────────────────────

/// Number of timers.
pub const TIMER_NUMOF: usize = 2;
/// Period of the 16-bit system timer.
pub const TIMER_0_MAX_VALUE: u32 = 0xffff;

/// TC3 (16 bit), TC4+TC5 (32 bit).
pub static TIMERS: [Timer; TIMER_NUMOF] = sodaq_timers(&CLOCK);

// ── UART ────────────────────────────────────────────────────────────────────

/// Number of UARTs.
pub const UART_NUMOF: usize = 3;

/// D0/D1 header, BLE module, LoRa module.
pub static UARTS: [UartChannel; UART_NUMOF] = [
    UartChannel {
        dev: Sercom::Sercom5,
        rx_pin: PinId::new(Port::PB, 31), // D0
        tx_pin: PinId::new(Port::PB, 30), // D1
        mux: Mux::D,
        rx_pad: UartRxPad::Pad1,
        tx_pad: UartTxPad::Tx0Rts2Cts3,
        flags: UartFlags::NONE,
        gclk_src: GeneratorId::CORE,
    },
    UartChannel {
        dev: Sercom::Sercom4,
        rx_pin: PinId::new(Port::PB, 13),
        tx_pin: PinId::new(Port::PB, 14),
        mux: Mux::C,
        rx_pad: UartRxPad::Pad1,
        tx_pad: UartTxPad::Tx2,
        flags: UartFlags::NONE,
        gclk_src: GeneratorId::CORE,
    },
    UartChannel {
        dev: Sercom::Sercom0,
        rx_pin: PinId::new(Port::PA, 5), // RN2483
        tx_pin: PinId::new(Port::PA, 6),
        mux: Mux::D,
        rx_pad: UartRxPad::Pad1,
        tx_pad: UartTxPad::Tx2,
        flags: UartFlags::NONE,
        gclk_src: GeneratorId::CORE,
    },
];

// ── ADC ─────────────────────────────────────────────────────────────────────

/// Number of ADC lines.
pub const ADC_NUMOF: usize = 10;

/// A0..A5, A6..A8 and the battery divider.
pub static ADC_CHANNELS: [AdcChannel; ADC_NUMOF] = [
    AdcChannel::new(PinId::new(Port::PB, 0), 8),   // A0
    AdcChannel::new(PinId::new(Port::PB, 1), 9),   // A1
    AdcChannel::new(PinId::new(Port::PB, 2), 10),  // A2
    AdcChannel::new(PinId::new(Port::PB, 3), 11),  // A3
    AdcChannel::new(PinId::new(Port::PA, 8), 16),  // A4
    AdcChannel::new(PinId::new(Port::PA, 9), 17),  // A5
    AdcChannel::new(PinId::new(Port::PA, 4), 4),   // A6 (temperature)
    AdcChannel::new(PinId::new(Port::PA, 10), 18), // A7
    AdcChannel::new(PinId::new(Port::PA, 11), 19), // A8
    AdcChannel::new(PinId::new(Port::PB, 5), 13),  // BATVOLT
];

// ── SPI ─────────────────────────────────────────────────────────────────────

/// Number of SPI buses.
pub const SPI_NUMOF: usize = 1;

/// Header SPI on SERCOM3.
pub static SPIS: [SpiBus; SPI_NUMOF] = [SpiBus {
    dev: Sercom::Sercom3,
    miso_pin: PinId::new(Port::PA, 22),
    mosi_pin: PinId::new(Port::PA, 20),
    clk_pin: PinId::new(Port::PA, 21),
    miso_mux: Mux::C,
    mosi_mux: Mux::C,
    clk_mux: Mux::C,
    miso_pad: SpiMisoPad::Pad0,
    mosi_pad: SpiMosiPad::Mosi2Sck3,
}];

// ── I2C ─────────────────────────────────────────────────────────────────────

/// Number of I2C buses.
pub const I2C_NUMOF: usize = 2;

/// SDA/SCL header on SERCOM1, A4/A5 on SERCOM2.
pub static I2CS: [I2cBus; I2C_NUMOF] = [
    I2cBus {
        dev: Sercom::Sercom1,
        speed: I2cSpeed::Normal,
        scl_pin: PinId::new(Port::PA, 17),
        sda_pin: PinId::new(Port::PA, 16),
        mux: Mux::C,
        gclk_src: GeneratorId::CORE,
        flags: I2cFlags::NONE,
    },
    I2cBus {
        dev: Sercom::Sercom2,
        speed: I2cSpeed::Normal,
        scl_pin: PinId::new(Port::PA, 9),
        sda_pin: PinId::new(Port::PA, 8),
        mux: Mux::C,
        gclk_src: GeneratorId::CORE,
        flags: I2cFlags::NONE,
    },
];

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

/// `isr_tc3`, `isr_tc4`, `isr_sercom5`, `isr_sercom4`, `isr_sercom0`,
/// `isr_rtc`, `isr_usb`.
pub static VECTORS: [VectorBinding; 7] = [
    VectorBinding::new(PeripheralClass::Timer, 0, Irq::Tc3),
    VectorBinding::new(PeripheralClass::Timer, 1, Irq::Tc4),
    VectorBinding::new(PeripheralClass::Uart, 0, Irq::Sercom5),
    VectorBinding::new(PeripheralClass::Uart, 1, Irq::Sercom4),
    VectorBinding::new(PeripheralClass::Uart, 2, Irq::Sercom0),
    VectorBinding::new(PeripheralClass::Rtt, 0, Irq::Rtc),
    VectorBinding::new(PeripheralClass::Usb, 0, Irq::Usb),
];

/// A4/A5 are both analog inputs and the second I2C bus.
pub static SHARED_PINS: [PinShare; 2] = [
    PinShare {
        pin: PinId::new(Port::PA, 8),
        note: "A4 / I2C1 SDA",
    },
    PinShare {
        pin: PinId::new(Port::PA, 9),
        note: "A5 / I2C1 SCL",
    },
];

/// The ExpLoRer has no indicator hook.
pub static INDICATOR_PINS: [PinId; 0] = [];

/// Everything above, for the linter and the firmware.
pub static BOARD: Board = Board {
    name: "sodaq-explorer",
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
