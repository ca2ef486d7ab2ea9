//! Sharp LR35902 instruction interpreter.
//!
//! The CPU is driven one instruction (or interrupt dispatch) at a time via
//! [`Cpu::execute`], which charges the cost from the shared
//! [`OpcodeTable`](crate::opcodes::OpcodeTable) to the machine `Timer` before
//! running the instruction.

mod alu;
mod bus;
mod cb;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod regs;
mod step;

use std::sync::Arc;

use crate::opcodes::OpcodeTable;

pub use bus::Bus;
pub use interrupts::{ImeState, Interrupt, IE_ADDR, IF_ADDR};
pub use regs::{Flag, Flags, Registers};

#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    pub ime: ImeState,
    pub halted: bool,
    /// Set by HALT with IME=0 and an interrupt pending; the next fetch
    /// reads the following byte without advancing PC.
    pub halt_bug: bool,
    /// Set after an unimplemented opcode. A locked CPU refuses to run.
    locked: bool,
    opcodes: Arc<OpcodeTable>,
}

impl Cpu {
    #[inline]
    pub fn regs(&self) -> &Registers {
        &self.regs
    }

    #[inline]
    pub fn pc(&self) -> u16 {
        self.regs.pc
    }

    #[inline]
    pub fn sp(&self) -> u16 {
        self.regs.sp
    }

    #[inline]
    pub fn af(&self) -> u16 {
        self.regs.af()
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        self.regs.bc()
    }

    #[inline]
    pub fn de(&self) -> u16 {
        self.regs.de()
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        self.regs.hl()
    }

    #[inline]
    pub fn ime_enabled(&self) -> bool {
        self.ime.enabled
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn opcodes(&self) -> &Arc<OpcodeTable> {
        &self.opcodes
    }
}

#[cfg(test)]
mod tests;
