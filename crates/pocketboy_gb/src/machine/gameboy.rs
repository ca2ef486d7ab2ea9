use std::sync::Arc;

use pocketboy_common::Image;

use super::{video, Gpu, Mmu, Timer, BGP, BOOT_ROM_DISABLE, LCDC, STAT};
use crate::cpu::Cpu;
use crate::disasm::{self, Instruction};
use crate::error::CoreError;
use crate::opcodes::OpcodeTable;

/// Result of a single [`GameBoy::step`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    /// T-cycles charged by the CPU.
    pub cycles: u32,
    pub frame_complete: bool,
}

/// Why [`GameBoy::step_frame`] returned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The GPU wrapped back to LY=0.
    FrameComplete { cycles: u64 },
    /// PC reached the breakpoint before the next step.
    Breakpoint { pc: u16, cycles: u64 },
}

/// High-level Game Boy machine.
///
/// Owns the CPU, MMU, GPU and the single timer they share, and steps CPU
/// and GPU in lock-step.
pub struct GameBoy {
    cpu: Cpu,
    mmu: Mmu,
    timer: Timer,
    gpu: Gpu,
    opcodes: Arc<OpcodeTable>,
    breakpoint: Option<u16>,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoy {
    pub fn new() -> Self {
        let opcodes = Arc::new(OpcodeTable::new());
        Self {
            cpu: Cpu::with_table(Arc::clone(&opcodes)),
            mmu: Mmu::new(),
            timer: Timer::new(),
            gpu: Gpu::new(),
            opcodes,
            breakpoint: None,
        }
    }

    pub fn load_bootstrap(&mut self, bytes: &[u8]) {
        self.mmu.load_bootstrap(bytes);
    }

    pub fn load_cartridge(&mut self, bytes: &[u8]) {
        self.mmu.load_cartridge(bytes);
    }

    /// Start at the cartridge entry point with the register and IO state
    /// the DMG boot ROM would have left behind. A boot ROM loaded earlier
    /// is unmapped.
    pub fn skip_bootstrap(&mut self) {
        self.cpu.apply_dmg_boot_state();
        self.mmu.set(BOOT_ROM_DISABLE, 0x01);
        self.mmu.set(LCDC, 0x91);
        self.mmu.set(STAT, 0x85);
        self.mmu.set(BGP, 0xFC);
    }

    /// One CPU instruction (or interrupt dispatch) followed by one GPU
    /// update against the same timer.
    pub fn step(&mut self) -> Result<StepOutcome, CoreError> {
        let cycles = self.cpu.execute(&mut self.mmu, &mut self.timer)?;
        let frame_complete = self.gpu.step(&mut self.mmu, &mut self.timer);
        Ok(StepOutcome {
            cycles,
            frame_complete,
        })
    }

    /// Step until a frame completes or PC lands on the breakpoint.
    ///
    /// The breakpoint is checked before each step, so calling this again
    /// while parked on it runs the breakpoint instruction first.
    pub fn step_frame(&mut self) -> Result<FrameOutcome, CoreError> {
        let mut cycles = 0u64;
        let mut first = true;
        loop {
            let pc = self.cpu.pc();
            if !first && self.breakpoint == Some(pc) {
                log::debug!("GB: breakpoint hit at PC=0x{pc:04X}");
                return Ok(FrameOutcome::Breakpoint { pc, cycles });
            }
            first = false;

            let outcome = self.step()?;
            cycles += outcome.cycles as u64;
            if outcome.frame_complete {
                return Ok(FrameOutcome::FrameComplete { cycles });
            }
        }
    }

    pub fn set_breakpoint(&mut self, pc: Option<u16>) {
        self.breakpoint = pc;
    }

    pub fn breakpoint(&self) -> Option<u16> {
        self.breakpoint
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn mmu(&self) -> &Mmu {
        &self.mmu
    }

    pub fn mmu_mut(&mut self) -> &mut Mmu {
        &mut self.mmu
    }

    pub fn gpu(&self) -> &Gpu {
        &self.gpu
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn opcodes(&self) -> &Arc<OpcodeTable> {
        &self.opcodes
    }

    pub fn screen_buffer(&self) -> Image {
        video::screen_buffer(&self.mmu)
    }

    pub fn tile_data(&self) -> Image {
        video::tile_data(&self.mmu)
    }

    pub fn background_map(&self) -> Image {
        video::background_map(&self.mmu)
    }

    pub fn disassemble_at(&self, pc: u16) -> Option<Instruction> {
        disasm::disassemble(&self.opcodes, self.mmu.memory(), pc)
    }
}
