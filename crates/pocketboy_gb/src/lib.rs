//! Sharp LR35902 CPU, memory map and scanline timing for the original
//! Game Boy (DMG).

pub mod bits;
pub mod cpu;
pub mod disasm;
mod error;
pub mod machine;
pub mod opcodes;

pub use cpu::{Bus, Cpu, Flag, Registers};
pub use error::CoreError;
pub use machine::{FrameOutcome, GameBoy, Gpu, Mmu, Mode, StepOutcome, Timer};
pub use opcodes::OpcodeTable;

/// Logical screen width in pixels for the Game Boy DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
