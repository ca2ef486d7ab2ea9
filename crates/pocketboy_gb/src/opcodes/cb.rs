use super::unprefixed::r8;
use super::{OpcodeInfo, Operand};

const SHIFT_MNEMONICS: [&str; 8] = ["RLC", "RRC", "RL", "RR", "SLA", "SRA", "SWAP", "SRL"];

pub(super) fn describe(opcode: u8) -> OpcodeInfo {
    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;
    let indirect = z == 6;
    match opcode >> 6 {
        0 => {
            let cycles = if indirect { 16 } else { 8 };
            let template: &[u8; 4] = if y == 6 { b"Z000" } else { b"Z00C" };
            OpcodeInfo::new(SHIFT_MNEMONICS[y as usize], vec![r8(z)], 2, cycles).flags(template)
        }
        1 => {
            let cycles = if indirect { 12 } else { 8 };
            OpcodeInfo::new("BIT", vec![Operand::Bit(y), r8(z)], 2, cycles).flags(b"Z01-")
        }
        kind => {
            let cycles = if indirect { 16 } else { 8 };
            let mnemonic = if kind == 2 { "RES" } else { "SET" };
            OpcodeInfo::new(mnemonic, vec![Operand::Bit(y), r8(z)], 2, cycles)
        }
    }
}
