use super::super::{Bus, Cpu};
use super::{Interrupt, IE_ADDR, IF_ADDR};

/// Cost of an interrupt dispatch in T-cycles.
pub(in crate::cpu) const DISPATCH_CYCLES: u32 = 20;

impl Cpu {
    /// Requested and enabled interrupts, regardless of IME.
    pub(in crate::cpu) fn pending_interrupts<B: Bus>(&self, bus: &mut B) -> Interrupt {
        let ie = bus.read8(IE_ADDR);
        let iflags = bus.read8(IF_ADDR);
        Interrupt::from_bits_truncate(ie & iflags)
    }

    /// Leave HALT on any pending interrupt, then dispatch the
    /// highest-priority one if IME is set.
    ///
    /// Returns `Some(cycles)` if an interrupt was taken.
    pub(in crate::cpu) fn handle_interrupts<B: Bus>(&mut self, bus: &mut B) -> Option<u32> {
        let pending = self.pending_interrupts(bus);
        if pending.is_empty() {
            return None;
        }
        self.halted = false;

        if !self.ime.enabled {
            return None;
        }
        let interrupt = pending.highest_priority()?;
        let vector = interrupt.vector();

        self.ime.disable_now();
        let pc = self.regs.pc;
        self.push_u16(bus, pc);
        self.regs.pc = vector;

        let iflags = bus.read8(IF_ADDR);
        bus.write8(IF_ADDR, iflags & !interrupt.bits());

        log::debug!(
            "GB CPU interrupt: {:?} vector=0x{:04X} pc=0x{:04X} sp=0x{:04X}",
            interrupt,
            vector,
            pc,
            self.regs.sp,
        );

        Some(DISPATCH_CYCLES)
    }
}
