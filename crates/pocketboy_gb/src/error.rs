use thiserror::Error;

/// Errors surfaced by the emulator core.
///
/// None of these are transient: every core operation is a deterministic
/// function of the current machine state, so callers either stop stepping or
/// treat the condition as a bug.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// The fetched byte (or CB-prefixed pair) has no dispatch entry.
    #[error("unimplemented opcode 0x{opcode:02X} (CB prefixed: {prefixed}) at PC=0x{pc:04X}")]
    UnimplementedOpcode { opcode: u8, prefixed: bool, pc: u16 },

    /// The CPU previously hit an unimplemented opcode and refuses to step.
    #[error("CPU is locked after an unimplemented opcode at PC=0x{pc:04X}")]
    Locked { pc: u16 },

    /// An address computed outside the 64 KiB space.
    #[error("address 0x{address:X} is outside the 64 KiB address space")]
    OutOfRangeAccess { address: usize },
}
