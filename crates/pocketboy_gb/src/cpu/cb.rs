use super::{Bus, Cpu};

impl Cpu {
    /// Execute the CB-prefixed instruction following a 0xCB byte.
    ///
    /// Layout: bits 6–7 select the group (shift, BIT, RES, SET), bits 3–5
    /// the operation or bit index, bits 0–2 the operand register.
    pub(super) fn step_cb<B: Bus>(&mut self, bus: &mut B) {
        let opcode = self.fetch8(bus);
        let y = (opcode >> 3) & 0x07;
        let reg = opcode & 0x07;
        let value = self.read_reg8(bus, reg);

        match opcode >> 6 {
            0 => {
                let result = self.alu_shift(y, value);
                self.write_reg8(bus, reg, result);
            }
            1 => self.alu_bit(y, value),
            2 => self.write_reg8(bus, reg, value & !(1 << y)),
            _ => self.write_reg8(bus, reg, value | (1 << y)),
        }
    }
}
