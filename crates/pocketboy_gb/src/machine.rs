mod gameboy;
mod gpu;
mod mmu;
mod serial;
mod timer;
pub mod video;

pub use gameboy::{FrameOutcome, GameBoy, StepOutcome};
pub use gpu::{Gpu, Mode};
pub use mmu::Mmu;
pub use timer::Timer;

/// Total addressable memory for the Game Boy (64 KiB), modelled as one flat
/// array.
pub const MEMORY_SIZE: usize = 0x10000;

/// Boot ROM overlay at 0x0000–0x00FF.
pub const BOOT_ROM_SIZE: usize = 0x100;
/// Largest cartridge image mapped without a memory bank controller.
pub const CARTRIDGE_MAX_SIZE: usize = 0x8000;

pub const VRAM_START: u16 = 0x8000;
pub const VRAM_SIZE: usize = 0x2000;
pub const OAM_START: u16 = 0xFE00;
pub const OAM_SIZE: usize = 0xA0;

// IO registers.
pub const SB: u16 = 0xFF01;
pub const SC: u16 = 0xFF02;
pub const LCDC: u16 = 0xFF40;
pub const STAT: u16 = 0xFF41;
pub const SCY: u16 = 0xFF42;
pub const SCX: u16 = 0xFF43;
pub const LY: u16 = 0xFF44;
pub const LYC: u16 = 0xFF45;
pub const DMA: u16 = 0xFF46;
pub const BGP: u16 = 0xFF47;
pub const BOOT_ROM_DISABLE: u16 = 0xFF50;
