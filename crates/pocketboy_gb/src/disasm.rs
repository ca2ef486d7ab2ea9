//! Text disassembly for debugger views. Not used by emulation.

use std::fmt;

use crate::bits::concat_bytes;
use crate::opcodes::{OpcodeInfo, OpcodeTable, Operand};

/// One decoded instruction, e.g. `LD BC,$1234`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub address: u16,
    /// Raw encoding, prefix included.
    pub bytes: Vec<u8>,
    pub mnemonic: &'static str,
    pub operands: Vec<String>,
}

impl Instruction {
    /// Hex dump of the encoding, e.g. `01 34 12`.
    pub fn bytes_to_string(&self) -> String {
        self.bytes
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic)?;
        if !self.operands.is_empty() {
            write!(f, " {}", self.operands.join(","))?;
        }
        Ok(())
    }
}

/// Decode the instruction at `pc`.
///
/// Returns `None` for the undefined opcodes and when the encoding runs
/// past the end of `memory`.
pub fn disassemble(table: &OpcodeTable, memory: &[u8], pc: u16) -> Option<Instruction> {
    let opcode = *memory.get(pc as usize)?;
    let info = if opcode == 0xCB {
        table.cb(*memory.get(pc.wrapping_add(1) as usize)?)
    } else {
        table.unprefixed(opcode)?
    };

    let bytes = (0..info.length as u16)
        .map(|i| memory.get(pc.wrapping_add(i) as usize).copied())
        .collect::<Option<Vec<u8>>>()?;

    let operands = render_operands(info, &bytes, pc);
    Some(Instruction {
        address: pc,
        bytes,
        mnemonic: info.mnemonic,
        operands,
    })
}

fn render_operands(info: &OpcodeInfo, bytes: &[u8], pc: u16) -> Vec<String> {
    let start = if info.prefixed { 2 } else { 1 };
    let imm8 = bytes.get(start).copied().unwrap_or(0);
    let imm16 = concat_bytes(imm8, bytes.get(start + 1).copied().unwrap_or(0));

    info.operands
        .iter()
        .map(|operand| match *operand {
            Operand::Register(name) => name.to_string(),
            Operand::Indirect(name) => format!("({name})"),
            Operand::Condition(condition) => condition.to_string(),
            Operand::Bit(bit) => bit.to_string(),
            Operand::Vector(vector) => format!("${vector:02X}"),
            Operand::D8 => format!("${imm8:02X}"),
            Operand::D16 | Operand::Target16 => format!("${imm16:04X}"),
            Operand::S8 => signed(imm8),
            Operand::HighAddr8 => format!("($FF{imm8:02X})"),
            Operand::Addr16 => format!("(${imm16:04X})"),
            Operand::Relative8 => {
                let next = pc.wrapping_add(info.length as u16);
                format!("${:04X}", next.wrapping_add_signed(imm8 as i8 as i16))
            }
            Operand::SpOffset8 => {
                let offset = signed(imm8);
                if offset.starts_with('-') {
                    format!("SP{offset}")
                } else {
                    format!("SP+{offset}")
                }
            }
        })
        .collect()
}

fn signed(value: u8) -> String {
    let value = value as i8;
    if value < 0 {
        format!("-${:02X}", value.unsigned_abs())
    } else {
        format!("${value:02X}")
    }
}
