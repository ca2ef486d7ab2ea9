use super::{Mmu, Timer, LY, LYC, STAT};
use crate::cpu::Interrupt;

/// Mode 2 length in T-cycles.
pub const OAM_ACCESS_CYCLES: u32 = 80;
/// Mode 3 length.
pub const VRAM_ACCESS_CYCLES: u32 = 172;
/// Mode 0 length.
pub const HBLANK_CYCLES: u32 = 204;
/// One full scanline; also the length of each VBlank line.
pub const LINE_CYCLES: u32 = 456;

/// First line of the vertical blanking period.
pub const VBLANK_START_LINE: u8 = 144;
/// Last line before LY wraps to 0.
pub const LAST_LINE: u8 = 153;

/// Scanline phase. STAT bits 0–1 hold [`Mode::stat_bits`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    HBlank,
    VBlank,
    OamAccess,
    VramAccess,
}

impl Mode {
    pub fn stat_bits(self) -> u8 {
        match self {
            Mode::HBlank => 0,
            Mode::VBlank => 1,
            Mode::OamAccess => 2,
            Mode::VramAccess => 3,
        }
    }
}

/// Scanline state machine driven by the shared timer.
///
/// Each call to [`Gpu::step`] makes at most one phase transition once the
/// timer has reached the current phase's length, resetting the timer as it
/// goes. Pixel output is produced on demand by [`super::video`].
#[derive(Clone, Debug)]
pub struct Gpu {
    mode: Mode,
}

impl Default for Gpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Gpu {
    pub fn new() -> Self {
        Self {
            mode: Mode::OamAccess,
        }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Advance the state machine. Returns `true` when the last VBlank line
    /// finishes and a new frame starts at LY=0.
    pub fn step(&mut self, mmu: &mut Mmu, timer: &mut Timer) -> bool {
        let cycles = timer.cycles();
        let mut frame_complete = false;

        let next = match self.mode {
            Mode::OamAccess if cycles >= OAM_ACCESS_CYCLES => Mode::VramAccess,
            Mode::VramAccess if cycles >= VRAM_ACCESS_CYCLES => Mode::HBlank,
            Mode::HBlank if cycles >= HBLANK_CYCLES => {
                let line = mmu.get(LY).wrapping_add(1);
                mmu.set(LY, line);
                if line == VBLANK_START_LINE {
                    mmu.request_interrupt(Interrupt::VBLANK);
                    Mode::VBlank
                } else {
                    Mode::OamAccess
                }
            }
            Mode::VBlank if cycles >= LINE_CYCLES => {
                let line = mmu.get(LY).wrapping_add(1);
                if line > LAST_LINE {
                    mmu.set(LY, 0);
                    frame_complete = true;
                    log::trace!("GB GPU: frame complete");
                    Mode::OamAccess
                } else {
                    mmu.set(LY, line);
                    Mode::VBlank
                }
            }
            _ => return false,
        };

        timer.reset();
        self.mode = next;
        self.update_stat(mmu);
        frame_complete
    }

    /// Mirror the mode and the LY==LYC coincidence into STAT, keeping the
    /// interrupt-select bits.
    fn update_stat(&self, mmu: &mut Mmu) {
        let coincidence = if mmu.get(LY) == mmu.get(LYC) { 0x04 } else { 0x00 };
        let stat = (mmu.get(STAT) & !0x07) | coincidence | self.mode.stat_bits();
        mmu.set(STAT, stat);
    }
}
