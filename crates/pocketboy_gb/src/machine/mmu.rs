use super::serial::Serial;
use super::{
    BOOT_ROM_DISABLE, BOOT_ROM_SIZE, CARTRIDGE_MAX_SIZE, DMA, MEMORY_SIZE, OAM_SIZE, OAM_START, SB,
    SC, VRAM_SIZE, VRAM_START,
};
use crate::cpu::{Bus, Interrupt, IF_ADDR};
use crate::error::CoreError;

/// Flat 64 KiB address space with the few side-effecting registers the
/// core needs: the boot ROM overlay, OAM DMA and the serial port.
///
/// No memory bank controller is modelled, so writes to the cartridge area
/// are plain stores.
#[derive(Clone, Debug)]
pub struct Mmu {
    memory: Box<[u8]>,
    /// Cartridge bytes hidden under the boot ROM until it is unmapped.
    cartridge_start: [u8; BOOT_ROM_SIZE],
    boot_rom_mapped: bool,
    serial: Serial,
}

impl Default for Mmu {
    fn default() -> Self {
        Self::new()
    }
}

impl Mmu {
    pub fn new() -> Self {
        Self {
            memory: vec![0; MEMORY_SIZE].into_boxed_slice(),
            cartridge_start: [0; BOOT_ROM_SIZE],
            boot_rom_mapped: false,
            serial: Serial::default(),
        }
    }

    #[inline]
    pub fn get(&self, address: u16) -> u8 {
        self.memory[address as usize]
    }

    /// Bounds-checked read for addresses computed in wider arithmetic.
    pub fn try_get(&self, address: usize) -> Result<u8, CoreError> {
        self.memory
            .get(address)
            .copied()
            .ok_or(CoreError::OutOfRangeAccess { address })
    }

    /// Store `value`. Every write lands in memory; the serial port, OAM DMA
    /// and FF50 also trigger their side effect.
    pub fn set(&mut self, address: u16, value: u8) {
        match address {
            0xC000..=0xDDFF | 0xE000..=0xFDFF => {
                // Work RAM C000–DDFF and its echo at E000–FDFF share storage.
                let wram = if address >= 0xE000 { address - 0x2000 } else { address };
                self.memory[wram as usize] = value;
                self.memory[(wram + 0x2000) as usize] = value;
            }
            SC => {
                let sb = self.get(SB);
                self.serial.write_sc(sb, value);
                self.memory[SC as usize] = value;
            }
            DMA => {
                self.memory[DMA as usize] = value;
                self.oam_dma(value);
            }
            BOOT_ROM_DISABLE => {
                self.memory[address as usize] = value;
                if value == 1 && self.boot_rom_mapped {
                    self.unmap_boot_rom();
                }
            }
            _ => self.memory[address as usize] = value,
        }
    }

    /// Copy 160 bytes from `source << 8` into OAM at once.
    fn oam_dma(&mut self, source: u8) {
        let base = (source as u16) << 8;
        for i in 0..OAM_SIZE as u16 {
            let byte = self.get(base.wrapping_add(i));
            self.memory[(OAM_START + i) as usize] = byte;
        }
    }

    fn unmap_boot_rom(&mut self) {
        log::info!("GB MMU: boot ROM unmapped, restoring cartridge header area");
        self.memory[..BOOT_ROM_SIZE].copy_from_slice(&self.cartridge_start);
        self.boot_rom_mapped = false;
    }

    /// Map a boot ROM over 0x0000. Only the first 256 bytes are used; the
    /// rest of memory is left as it was.
    pub fn load_bootstrap(&mut self, bytes: &[u8]) {
        let bytes = if bytes.len() > BOOT_ROM_SIZE {
            log::warn!(
                "GB MMU: boot ROM is {} bytes, only the first {} are mapped",
                bytes.len(),
                BOOT_ROM_SIZE
            );
            &bytes[..BOOT_ROM_SIZE]
        } else {
            bytes
        };
        self.memory[..bytes.len()].copy_from_slice(bytes);
        self.boot_rom_mapped = true;
    }

    /// Load a cartridge image without bank switching.
    ///
    /// Images over 32 KiB are truncated with a warning. The first 256 bytes
    /// are held back while a boot ROM is mapped and land in memory when it
    /// is unmapped.
    pub fn load_cartridge(&mut self, bytes: &[u8]) {
        let bytes = if bytes.len() > CARTRIDGE_MAX_SIZE {
            log::warn!(
                "GB MMU: unsupported cartridge size {} bytes (no MBC), truncating to {}",
                bytes.len(),
                CARTRIDGE_MAX_SIZE
            );
            &bytes[..CARTRIDGE_MAX_SIZE]
        } else {
            bytes
        };

        let head = bytes.len().min(BOOT_ROM_SIZE);
        self.cartridge_start = [0; BOOT_ROM_SIZE];
        self.cartridge_start[..head].copy_from_slice(&bytes[..head]);
        if bytes.len() > BOOT_ROM_SIZE {
            self.memory[BOOT_ROM_SIZE..bytes.len()].copy_from_slice(&bytes[BOOT_ROM_SIZE..]);
        }

        if !self.boot_rom_mapped {
            self.memory[..BOOT_ROM_SIZE].copy_from_slice(&self.cartridge_start);
        }
    }

    /// Set a bit in IF.
    pub fn request_interrupt(&mut self, interrupt: Interrupt) {
        let iflags = self.get(IF_ADDR);
        self.set(IF_ADDR, iflags | interrupt.bits());
    }

    /// 0x8000–0x9FFF.
    pub fn vram(&self) -> &[u8] {
        let start = VRAM_START as usize;
        &self.memory[start..start + VRAM_SIZE]
    }

    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    /// Bytes sent over the serial port so far.
    pub fn serial_output(&self) -> &[u8] {
        self.serial.output()
    }

    pub fn boot_rom_mapped(&self) -> bool {
        self.boot_rom_mapped
    }
}

impl Bus for Mmu {
    #[inline]
    fn read8(&mut self, addr: u16) -> u8 {
        self.get(addr)
    }

    #[inline]
    fn write8(&mut self, addr: u16, value: u8) {
        self.set(addr, value);
    }
}
