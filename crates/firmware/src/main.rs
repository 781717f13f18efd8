//! SODAQ SAM D21 firmware entry point (hardware only).

#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;

#[cortex_m_rt::entry]
fn main() -> ! {
    firmware::hardware::board_init();

    defmt::info!(
        "{=str} up, core clock {=u32} Hz",
        firmware::BOARD.name,
        firmware::BOARD.core_clock_hz()
    );

    loop {
        cortex_m::asm::wfi();
    }
}
