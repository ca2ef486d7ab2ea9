use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// PUSH BC/DE/HL/AF.
    pub(super) fn exec_push_rr<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let value = match (opcode >> 4) & 0x03 {
            3 => self.regs.af(),
            _ => self.read_rp(opcode),
        };
        self.push_u16(bus, value);
    }

    /// POP BC/DE/HL/AF. POP AF drops the low nibble of F.
    pub(super) fn exec_pop_rr<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let value = self.pop_u16(bus);
        match (opcode >> 4) & 0x03 {
            3 => self.regs.set_af(value),
            _ => self.write_rp(opcode, value),
        }
    }

    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let pc = self.regs.pc;
        self.push_u16(bus, pc);
        self.regs.pc = (opcode & 0x38) as u16;
    }

    /// RETI. IME is set with the same delay as EI.
    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) {
        self.ret(bus, true);
        self.ime.schedule_enable();
    }
}
