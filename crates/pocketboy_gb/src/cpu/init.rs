use std::sync::Arc;

use super::{Cpu, ImeState, Registers};
use crate::opcodes::OpcodeTable;

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// A CPU with zeroed registers and its own opcode table, ready to run a
    /// boot ROM from 0x0000.
    pub fn new() -> Self {
        Self::with_table(Arc::new(OpcodeTable::new()))
    }

    /// A CPU sharing an existing opcode table.
    pub fn with_table(opcodes: Arc<OpcodeTable>) -> Self {
        Self {
            regs: Registers::default(),
            ime: ImeState::default(),
            halted: false,
            halt_bug: false,
            locked: false,
            opcodes,
        }
    }

    /// Back to power-on state. The opcode table is kept.
    pub fn reset(&mut self) {
        self.regs = Registers::default();
        self.ime = ImeState::default();
        self.halted = false;
        self.halt_bug = false;
        self.locked = false;
    }

    /// Registers as the DMG boot ROM leaves them when it jumps to the
    /// cartridge entry point at 0x0100.
    pub fn apply_dmg_boot_state(&mut self) {
        self.reset();
        self.regs.a = 0x01;
        self.regs.f = 0xB0;
        self.regs.b = 0x00;
        self.regs.c = 0x13;
        self.regs.d = 0x00;
        self.regs.e = 0xD8;
        self.regs.h = 0x01;
        self.regs.l = 0x4D;
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;
    }
}
