use crate::cpu::{Bus, Cpu};
use crate::opcodes::Condition;

impl Cpu {
    #[inline]
    fn opcode_condition(&self, opcode: u8) -> bool {
        self.condition_holds(Condition::from_opcode(opcode))
    }

    pub(super) fn exec_jr_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let cond = self.opcode_condition(opcode);
        self.jr(bus, cond);
    }

    pub(super) fn exec_jp_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let cond = self.opcode_condition(opcode);
        self.jp(bus, cond);
    }

    pub(super) fn exec_call_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let cond = self.opcode_condition(opcode);
        self.call(bus, cond);
    }

    pub(super) fn exec_ret_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let cond = self.opcode_condition(opcode);
        self.ret(bus, cond);
    }
}
