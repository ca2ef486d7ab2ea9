use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// STOP. Consumes the padding byte that follows the opcode. Low-power
    /// mode is not modelled, so execution simply continues.
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) {
        let padding = self.fetch8(bus);
        if padding != 0x00 {
            log::trace!(
                "GB CPU: STOP followed by 0x{:02X} at PC=0x{:04X}",
                padding,
                self.regs.pc.wrapping_sub(2)
            );
        }
    }
}
