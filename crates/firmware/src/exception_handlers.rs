//! Cortex-M exception handlers for SODAQ SAM D21 boards.
//!
//! - **HardFault**: bus faults, illegal instructions, stack overflow with
//!   flip-link. Logs the stacked frame address and halts.
//! - **DefaultHandler**: an interrupt fired that no driver claimed. Looks the
//!   line up in the board's vector bindings, logs the owning peripheral and
//!   masks the line so it cannot storm.
//!
//! The `#[cortex_m_rt::exception]` items need the ARM target and are gated
//! behind `hardware`. [`unclaimed_owner`] is the host-testable part.

use bsp_core::{Board, DescriptorRef, Irq};

/// Resolve an `irqn` as passed to `DefaultHandler` (negative for system
/// exceptions) to its line and the descriptor bound to it, if any.
pub fn unclaimed_owner(board: &Board, irqn: i16) -> Option<(Irq, Option<DescriptorRef>)> {
    let irq = u16::try_from(irqn).ok().and_then(Irq::from_number)?;
    Some((irq, board.lookup(irq)))
}

/// HardFault exception handler (hardware target only).
///
/// # Safety
///
/// Must never return; the `-> !` return type enforces this.
#[cfg(feature = "hardware")]
#[cortex_m_rt::exception]
#[allow(unsafe_code)]
unsafe fn HardFault(ef: &cortex_m_rt::ExceptionFrame) -> ! {
    defmt::panic!(
        "HardFault! Stacked exception frame at 0x{:08X}, PC 0x{:08X}",
        ef as *const _ as u32,
        ef.pc()
    );
}

/// Catch-all for interrupts without a handler (hardware target only).
#[cfg(feature = "hardware")]
#[cortex_m_rt::exception]
#[allow(unsafe_code)]
unsafe fn DefaultHandler(irqn: i16) {
    match unclaimed_owner(crate::boot::BOARD, irqn) {
        Some((irq, Some(owner))) => {
            defmt::warn!(
                "unhandled {=str} for {=str}[{=usize}]",
                irq.isr_name(),
                owner.class.as_str(),
                owner.index
            );
            cortex_m::peripheral::NVIC::mask(crate::hardware::IrqLine(irq));
        }
        Some((irq, None)) => {
            defmt::warn!("unhandled {=str}, no bound peripheral", irq.isr_name());
            cortex_m::peripheral::NVIC::mask(crate::hardware::IrqLine(irq));
        }
        None => defmt::warn!("unhandled exception {=i16}", irqn),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsp_core::PeripheralClass;

    #[test]
    fn every_bound_line_resolves_to_its_owner() {
        for board in boards::ALL_BOARDS {
            for binding in board.vectors {
                let irqn = binding.vector.number() as i16;
                assert_eq!(
                    unclaimed_owner(board, irqn),
                    Some((binding.vector, Some(binding.peripheral))),
                    "{}: {}",
                    board.name,
                    binding.isr_name()
                );
            }
        }
    }

    #[test]
    fn rtc_line_resolves_to_tick_counter() {
        let owner = unclaimed_owner(&boards::sodaq_one::BOARD, Irq::Rtc.number() as i16);
        assert_eq!(
            owner,
            Some((Irq::Rtc, Some(DescriptorRef::new(PeripheralClass::Rtt, 0))))
        );
    }

    #[test]
    fn unbound_line_has_no_owner() {
        let owner = unclaimed_owner(&boards::sodaq_one::BOARD, Irq::Dac.number() as i16);
        assert_eq!(owner, Some((Irq::Dac, None)));
    }

    #[test]
    fn system_exceptions_are_not_lines() {
        assert_eq!(unclaimed_owner(&boards::sodaq_one::BOARD, -1), None);
        assert_eq!(unclaimed_owner(&boards::sodaq_one::BOARD, 200), None);
    }
}
