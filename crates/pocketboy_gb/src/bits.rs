//! Small bit-twiddling helpers shared by the ALU, the opcode table tests and
//! the rasterizer.

/// Adding `n + m` carries from bit 3 into bit 4.
#[inline]
pub fn is_half_carry_add(n: u8, m: u8) -> bool {
    (n & 0x0F) + (m & 0x0F) > 0x0F
}

/// Subtracting `n - m` borrows from bit 4 into bit 3.
#[inline]
pub fn is_half_carry_sub(n: u8, m: u8) -> bool {
    (n & 0x0F) < (m & 0x0F)
}

/// Adding two 16-bit values carries from bit 11 into bit 12.
#[inline]
pub fn is_half_carry_add16(n: u16, m: u16) -> bool {
    (n & 0x0FFF) + (m & 0x0FFF) > 0x0FFF
}

/// Bits are numbered from the right, 0 to 7.
#[inline]
pub fn is_bit_set(byte: u8, n: u8) -> bool {
    (byte >> n) & 1 != 0
}

/// Join two bytes into a word, low byte first (little endian).
#[inline]
pub fn concat_bytes(lo: u8, hi: u8) -> u16 {
    u16::from_le_bytes([lo, hi])
}
