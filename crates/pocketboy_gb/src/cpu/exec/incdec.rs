use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_inc8_reg<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let reg = (opcode >> 3) & 0x07;
        let value = self.read_reg8(bus, reg);
        let result = self.alu_inc8(value);
        self.write_reg8(bus, reg, result);
    }

    pub(super) fn exec_dec8_reg<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let reg = (opcode >> 3) & 0x07;
        let value = self.read_reg8(bus, reg);
        let result = self.alu_dec8(value);
        self.write_reg8(bus, reg, result);
    }

    // 16-bit INC/DEC touch no flags.
    pub(super) fn exec_inc16_rr(&mut self, opcode: u8) {
        let value = self.read_rp(opcode).wrapping_add(1);
        self.write_rp(opcode, value);
    }

    pub(super) fn exec_dec16_rr(&mut self, opcode: u8) {
        let value = self.read_rp(opcode).wrapping_sub(1);
        self.write_rp(opcode, value);
    }
}
