use super::{Condition, OpcodeInfo, Operand};
use Operand::*;

const ALU_MNEMONICS: [&str; 8] = ["ADD", "ADC", "SUB", "SBC", "AND", "XOR", "OR", "CP"];

pub(super) fn r8(index: u8) -> Operand {
    match index & 0x07 {
        0 => Register("B"),
        1 => Register("C"),
        2 => Register("D"),
        3 => Register("E"),
        4 => Register("H"),
        5 => Register("L"),
        6 => Indirect("HL"),
        _ => Register("A"),
    }
}

fn rp(opcode: u8) -> Operand {
    match (opcode >> 4) & 0x03 {
        0 => Register("BC"),
        1 => Register("DE"),
        2 => Register("HL"),
        _ => Register("SP"),
    }
}

fn rp2(opcode: u8) -> Operand {
    match (opcode >> 4) & 0x03 {
        0 => Register("BC"),
        1 => Register("DE"),
        2 => Register("HL"),
        _ => Register("AF"),
    }
}

/// Cost of an 8-bit op: `(HL)` operands add a memory access.
fn r8_cycles(index: u8, register: u32, memory: u32) -> u32 {
    if index & 0x07 == 6 {
        memory
    } else {
        register
    }
}

fn alu(kind: u8, source: Operand, length: u8, cycles: u32) -> OpcodeInfo {
    let mnemonic = ALU_MNEMONICS[(kind & 0x07) as usize];
    // ADD/ADC/SBC spell out the accumulator, the rest leave it implicit.
    let operands = match kind & 0x07 {
        0 | 1 | 3 => vec![Register("A"), source],
        _ => vec![source],
    };
    let template: &[u8; 4] = match kind & 0x07 {
        0 | 1 => b"Z0HC",
        2 | 3 | 7 => b"Z1HC",
        4 => b"Z010",
        _ => b"Z000",
    };
    OpcodeInfo::new(mnemonic, operands, length, cycles).flags(template)
}

pub(super) fn describe(opcode: u8) -> Option<OpcodeInfo> {
    let info = match opcode {
        0x00 => OpcodeInfo::new("NOP", vec![], 1, 4),
        0x01 | 0x11 | 0x21 | 0x31 => OpcodeInfo::new("LD", vec![rp(opcode), D16], 3, 12),
        0x02 => OpcodeInfo::new("LD", vec![Indirect("BC"), Register("A")], 1, 8),
        0x12 => OpcodeInfo::new("LD", vec![Indirect("DE"), Register("A")], 1, 8),
        0x22 => OpcodeInfo::new("LD", vec![Indirect("HL+"), Register("A")], 1, 8),
        0x32 => OpcodeInfo::new("LD", vec![Indirect("HL-"), Register("A")], 1, 8),
        0x0A => OpcodeInfo::new("LD", vec![Register("A"), Indirect("BC")], 1, 8),
        0x1A => OpcodeInfo::new("LD", vec![Register("A"), Indirect("DE")], 1, 8),
        0x2A => OpcodeInfo::new("LD", vec![Register("A"), Indirect("HL+")], 1, 8),
        0x3A => OpcodeInfo::new("LD", vec![Register("A"), Indirect("HL-")], 1, 8),
        0x03 | 0x13 | 0x23 | 0x33 => OpcodeInfo::new("INC", vec![rp(opcode)], 1, 8),
        0x0B | 0x1B | 0x2B | 0x3B => OpcodeInfo::new("DEC", vec![rp(opcode)], 1, 8),
        0x09 | 0x19 | 0x29 | 0x39 => {
            OpcodeInfo::new("ADD", vec![Register("HL"), rp(opcode)], 1, 8).flags(b"-0HC")
        }
        0x07 => OpcodeInfo::new("RLCA", vec![], 1, 4).flags(b"000C"),
        0x0F => OpcodeInfo::new("RRCA", vec![], 1, 4).flags(b"000C"),
        0x17 => OpcodeInfo::new("RLA", vec![], 1, 4).flags(b"000C"),
        0x1F => OpcodeInfo::new("RRA", vec![], 1, 4).flags(b"000C"),
        0x08 => OpcodeInfo::new("LD", vec![Addr16, Register("SP")], 3, 20),
        0x10 => OpcodeInfo::new("STOP", vec![D8], 2, 4),
        0x18 => OpcodeInfo::new("JR", vec![Relative8], 2, 12),
        0x20 | 0x28 | 0x30 | 0x38 => {
            let cc = Condition::from_opcode(opcode);
            OpcodeInfo::new("JR", vec![Operand::Condition(cc), Relative8], 2, 12).branch(cc, 12, 8)
        }
        0x27 => OpcodeInfo::new("DAA", vec![], 1, 4).flags(b"Z-0C"),
        0x2F => OpcodeInfo::new("CPL", vec![], 1, 4).flags(b"-11-"),
        0x37 => OpcodeInfo::new("SCF", vec![], 1, 4).flags(b"-001"),
        0x3F => OpcodeInfo::new("CCF", vec![], 1, 4).flags(b"-00C"),
        op if op < 0x40 && op & 0x07 == 0x04 => {
            let r = (op >> 3) & 0x07;
            OpcodeInfo::new("INC", vec![r8(r)], 1, r8_cycles(r, 4, 12)).flags(b"Z0H-")
        }
        op if op < 0x40 && op & 0x07 == 0x05 => {
            let r = (op >> 3) & 0x07;
            OpcodeInfo::new("DEC", vec![r8(r)], 1, r8_cycles(r, 4, 12)).flags(b"Z1H-")
        }
        op if op < 0x40 && op & 0x07 == 0x06 => {
            let r = (op >> 3) & 0x07;
            OpcodeInfo::new("LD", vec![r8(r), D8], 2, r8_cycles(r, 8, 12))
        }
        0x76 => OpcodeInfo::new("HALT", vec![], 1, 4),
        0x40..=0x7F => {
            let dst = (opcode >> 3) & 0x07;
            let src = opcode & 0x07;
            let cycles = if dst == 6 || src == 6 { 8 } else { 4 };
            OpcodeInfo::new("LD", vec![r8(dst), r8(src)], 1, cycles)
        }
        0x80..=0xBF => {
            let src = opcode & 0x07;
            alu(opcode >> 3, r8(src), 1, r8_cycles(src, 4, 8))
        }
        op if op & 0xC7 == 0xC6 => alu(op >> 3, D8, 2, 8),
        0xC0 | 0xC8 | 0xD0 | 0xD8 => {
            let cc = Condition::from_opcode(opcode);
            OpcodeInfo::new("RET", vec![Operand::Condition(cc)], 1, 20).branch(cc, 20, 8)
        }
        0xC9 => OpcodeInfo::new("RET", vec![], 1, 16),
        0xD9 => OpcodeInfo::new("RETI", vec![], 1, 16),
        0xF1 => OpcodeInfo::new("POP", vec![Register("AF")], 1, 12).flags(b"ZNHC"),
        op if op & 0xCF == 0xC1 => OpcodeInfo::new("POP", vec![rp2(op)], 1, 12),
        op if op & 0xCF == 0xC5 => OpcodeInfo::new("PUSH", vec![rp2(op)], 1, 16),
        0xC2 | 0xCA | 0xD2 | 0xDA => {
            let cc = Condition::from_opcode(opcode);
            OpcodeInfo::new("JP", vec![Operand::Condition(cc), Target16], 3, 16).branch(cc, 16, 12)
        }
        0xC3 => OpcodeInfo::new("JP", vec![Target16], 3, 16),
        0xE9 => OpcodeInfo::new("JP", vec![Register("HL")], 1, 4),
        0xC4 | 0xCC | 0xD4 | 0xDC => {
            let cc = Condition::from_opcode(opcode);
            OpcodeInfo::new("CALL", vec![Operand::Condition(cc), Target16], 3, 24).branch(cc, 24, 12)
        }
        0xCD => OpcodeInfo::new("CALL", vec![Target16], 3, 24),
        op if op & 0xC7 == 0xC7 => OpcodeInfo::new("RST", vec![Vector(op & 0x38)], 1, 16),
        0xCB => OpcodeInfo::new("PREFIX", vec![], 1, 4),
        0xE0 => OpcodeInfo::new("LDH", vec![HighAddr8, Register("A")], 2, 12),
        0xF0 => OpcodeInfo::new("LDH", vec![Register("A"), HighAddr8], 2, 12),
        0xE2 => OpcodeInfo::new("LD", vec![Indirect("C"), Register("A")], 1, 8),
        0xF2 => OpcodeInfo::new("LD", vec![Register("A"), Indirect("C")], 1, 8),
        0xEA => OpcodeInfo::new("LD", vec![Addr16, Register("A")], 3, 16),
        0xFA => OpcodeInfo::new("LD", vec![Register("A"), Addr16], 3, 16),
        0xE8 => OpcodeInfo::new("ADD", vec![Register("SP"), S8], 2, 16).flags(b"00HC"),
        0xF8 => OpcodeInfo::new("LD", vec![Register("HL"), SpOffset8], 2, 12).flags(b"00HC"),
        0xF9 => OpcodeInfo::new("LD", vec![Register("SP"), Register("HL")], 1, 8),
        0xF3 => OpcodeInfo::new("DI", vec![], 1, 4),
        0xFB => OpcodeInfo::new("EI", vec![], 1, 4),
        // D3 DB DD E3 E4 EB EC ED F4 FC FD
        _ => return None,
    };
    Some(info)
}
