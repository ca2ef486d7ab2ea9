use super::interrupts::IF_ADDR;
use super::{Bus, Cpu};
use crate::error::CoreError;
use crate::machine::Timer;

/// Cost of one idle step while halted.
const HALT_IDLE_CYCLES: u32 = 4;

impl Cpu {
    /// Run one instruction or one interrupt dispatch and return the number
    /// of T-cycles charged to `timer`.
    ///
    /// Pending interrupts are checked first. A delayed IME write is then
    /// applied, so an EI, DI or RETI executed by the previous call only
    /// becomes visible to the interrupt check of the call after this one.
    /// The instruction cost is charged before the instruction runs, with
    /// the branch outcome taken from the flags as they are now.
    pub fn execute<B: Bus>(&mut self, bus: &mut B, timer: &mut Timer) -> Result<u32, CoreError> {
        if self.locked {
            return Err(CoreError::Locked { pc: self.regs.pc });
        }

        if let Some(cycles) = self.handle_interrupts(bus) {
            timer.increment(cycles);
            return Ok(cycles);
        }

        self.ime.commit();

        if self.halted {
            timer.increment(HALT_IDLE_CYCLES);
            return Ok(HALT_IDLE_CYCLES);
        }

        let pc = self.regs.pc;
        let opcode = bus.read8(pc);
        let prefixed = opcode == 0xCB;
        let code = if prefixed {
            // Under the HALT bug the prefix byte is read twice.
            let next = if self.halt_bug { pc } else { pc.wrapping_add(1) };
            bus.read8(next)
        } else {
            opcode
        };

        let cost = self.opcodes.get(prefixed, code).map(|info| {
            let taken = info
                .condition
                .map_or(true, |condition| self.condition_holds(condition));
            info.cycles_for(taken)
        });
        let Some(cycles) = cost else {
            return Err(self.unimplemented(opcode, pc));
        };
        timer.increment(cycles);

        let opcode = self.fetch8(bus);
        self.exec_opcode(bus, opcode, pc)?;
        Ok(cycles)
    }

    /// Lock the CPU on an opcode with no defined behaviour.
    pub(super) fn unimplemented(&mut self, opcode: u8, pc: u16) -> CoreError {
        log::error!("GB CPU: unimplemented opcode 0x{opcode:02X} at PC=0x{pc:04X}, locking up");
        self.locked = true;
        CoreError::UnimplementedOpcode {
            opcode,
            prefixed: false,
            pc,
        }
    }

    /// HALT. With IME clear and an interrupt already pending the CPU does
    /// not halt; instead the next opcode byte is fetched twice.
    pub(super) fn enter_halt<B: Bus>(&mut self, bus: &mut B) {
        let pending = self.pending_interrupts(bus);
        if !self.ime.enabled && !pending.is_empty() {
            self.halt_bug = true;
        } else {
            self.halted = true;
        }
        log::trace!(
            "GB CPU: HALT at PC=0x{:04X} IF=0x{:02X} halt_bug={}",
            self.regs.pc.wrapping_sub(1),
            bus.read8(IF_ADDR),
            self.halt_bug,
        );
    }
}
