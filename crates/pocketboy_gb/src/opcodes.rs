//! Static LR35902 opcode metadata.
//!
//! The table maps `(prefixed, opcode)` to the instruction's mnemonic, operand
//! descriptors, encoded length, cycle cost and flag-effect template. It is
//! built once by [`OpcodeTable::new`] and then shared read-only (the machine
//! keeps it behind an `Arc`). The CPU charges cycles from this table, and the
//! disassembler renders text from it.

mod cb;
mod unprefixed;

use std::fmt;

use crate::cpu::Flag;

/// Branch condition encoded in bits 3–4 of JR/JP/CALL/RET cc opcodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    NotZero,
    Zero,
    NotCarry,
    Carry,
}

impl Condition {
    /// Decode the `cc` field of a conditional control-transfer opcode.
    pub fn from_opcode(opcode: u8) -> Self {
        match (opcode >> 3) & 0x03 {
            0 => Condition::NotZero,
            1 => Condition::Zero,
            2 => Condition::NotCarry,
            _ => Condition::Carry,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Condition::NotZero => "NZ",
            Condition::Zero => "Z",
            Condition::NotCarry => "NC",
            Condition::Carry => "C",
        };
        f.write_str(name)
    }
}

/// Operand descriptor as it appears in the assembly syntax.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    /// Register operand, e.g. `A`, `BC`, `SP`.
    Register(&'static str),
    /// Memory through a register, e.g. `(HL)`, `(HL+)`, `(C)`.
    Indirect(&'static str),
    Condition(Condition),
    /// Bit index for BIT/RES/SET.
    Bit(u8),
    /// Fixed RST target.
    Vector(u8),
    /// 8-bit immediate.
    D8,
    /// 16-bit immediate.
    D16,
    /// Signed 8-bit immediate (ADD SP,e).
    S8,
    /// `(0xFF00 + a8)`.
    HighAddr8,
    /// `(a16)` memory operand.
    Addr16,
    /// Absolute JP/CALL target.
    Target16,
    /// JR displacement; rendered as the resolved target address.
    Relative8,
    /// `SP+e` for LD HL,SP+e.
    SpOffset8,
}

impl Operand {
    /// Number of immediate bytes this operand contributes to the encoding.
    pub fn immediate_len(&self) -> u8 {
        match self {
            Operand::D8 | Operand::S8 | Operand::HighAddr8 | Operand::Relative8 | Operand::SpOffset8 => 1,
            Operand::D16 | Operand::Addr16 | Operand::Target16 => 2,
            _ => 0,
        }
    }
}

/// Cycle cost in T-cycles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cycles {
    Fixed(u32),
    /// Conditional instructions cost more when the branch is taken.
    Branch { taken: u32, not_taken: u32 },
}

/// How a single flag responds to an instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FlagEffect {
    Unaffected,
    Set,
    Reset,
    Computed,
}

impl FlagEffect {
    const fn from_symbol(symbol: u8) -> Self {
        match symbol {
            b'-' => FlagEffect::Unaffected,
            b'0' => FlagEffect::Reset,
            b'1' => FlagEffect::Set,
            _ => FlagEffect::Computed,
        }
    }
}

/// Flag template for Z, N, H and C.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FlagEffects {
    pub z: FlagEffect,
    pub n: FlagEffect,
    pub h: FlagEffect,
    pub c: FlagEffect,
}

impl FlagEffects {
    pub const NONE: FlagEffects = FlagEffects::from_template(b"----");

    /// Build a template from the usual four-symbol notation (`Z N H C`
    /// order): `-` unaffected, `0` reset, `1` set, anything else computed.
    pub const fn from_template(template: &[u8; 4]) -> Self {
        FlagEffects {
            z: FlagEffect::from_symbol(template[0]),
            n: FlagEffect::from_symbol(template[1]),
            h: FlagEffect::from_symbol(template[2]),
            c: FlagEffect::from_symbol(template[3]),
        }
    }

    pub fn effect(&self, flag: Flag) -> FlagEffect {
        match flag {
            Flag::Z => self.z,
            Flag::N => self.n,
            Flag::H => self.h,
            Flag::C => self.c,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpcodeInfo {
    pub opcode: u8,
    pub prefixed: bool,
    pub mnemonic: &'static str,
    pub operands: Vec<Operand>,
    /// Encoded length in bytes, including the 0xCB prefix when present.
    pub length: u8,
    pub cycles: Cycles,
    pub condition: Option<Condition>,
    pub flags: FlagEffects,
}

impl OpcodeInfo {
    fn new(mnemonic: &'static str, operands: Vec<Operand>, length: u8, cycles: u32) -> Self {
        Self {
            opcode: 0,
            prefixed: false,
            mnemonic,
            operands,
            length,
            cycles: Cycles::Fixed(cycles),
            condition: None,
            flags: FlagEffects::NONE,
        }
    }

    fn flags(mut self, template: &[u8; 4]) -> Self {
        self.flags = FlagEffects::from_template(template);
        self
    }

    fn branch(mut self, condition: Condition, taken: u32, not_taken: u32) -> Self {
        self.condition = Some(condition);
        self.cycles = Cycles::Branch { taken, not_taken };
        self
    }

    /// Cost of this instruction for the given branch outcome. Unconditional
    /// instructions ignore `taken`.
    pub fn cycles_for(&self, taken: bool) -> u32 {
        match self.cycles {
            Cycles::Fixed(cycles) => cycles,
            Cycles::Branch { taken: t, not_taken: n } => {
                if taken {
                    t
                } else {
                    n
                }
            }
        }
    }
}

/// Immutable opcode metadata for both the unprefixed and CB-prefixed sets.
#[derive(Clone, Debug)]
pub struct OpcodeTable {
    unprefixed: Vec<Option<OpcodeInfo>>,
    cb: Vec<OpcodeInfo>,
}

impl Default for OpcodeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl OpcodeTable {
    pub fn new() -> Self {
        let unprefixed = (0..=0xFFu8)
            .map(|opcode| {
                unprefixed::describe(opcode).map(|mut info| {
                    info.opcode = opcode;
                    info
                })
            })
            .collect();
        let cb = (0..=0xFFu8)
            .map(|opcode| {
                let mut info = cb::describe(opcode);
                info.opcode = opcode;
                info.prefixed = true;
                info
            })
            .collect();
        Self { unprefixed, cb }
    }

    pub fn get(&self, prefixed: bool, opcode: u8) -> Option<&OpcodeInfo> {
        if prefixed {
            Some(self.cb(opcode))
        } else {
            self.unprefixed(opcode)
        }
    }

    /// `None` for the eleven opcode holes that lock up the hardware.
    pub fn unprefixed(&self, opcode: u8) -> Option<&OpcodeInfo> {
        self.unprefixed[opcode as usize].as_ref()
    }

    pub fn cb(&self, opcode: u8) -> &OpcodeInfo {
        &self.cb[opcode as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &OpcodeInfo> {
        self.unprefixed.iter().flatten().chain(self.cb.iter())
    }
}
