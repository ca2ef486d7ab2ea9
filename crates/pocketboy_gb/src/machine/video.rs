//! Background rasterization from VRAM.
//!
//! These are pure functions of MMU state and can be called at any point,
//! typically once per completed frame. Each tile row is two bytes: the
//! first holds bit 0 of every pixel's colour index, the second bit 1.

use pocketboy_common::{Color, Image};

use super::{Mmu, BGP, LCDC, SCX, SCY, VRAM_START};
use crate::bits::is_bit_set;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

const TILE_SIZE: usize = 8;
const TILE_BYTES: u16 = 16;
/// Tiles in 0x8000–0x97FF.
const TILE_COUNT: usize = 384;
const TILE_SHEET_COLUMNS: usize = 16;
const MAP_TILES: usize = 32;
const MAP_PIXELS: usize = MAP_TILES * TILE_SIZE;

pub const TILE_SHEET_WIDTH: usize = TILE_SHEET_COLUMNS * TILE_SIZE;
pub const TILE_SHEET_HEIGHT: usize = TILE_COUNT / TILE_SHEET_COLUMNS * TILE_SIZE;
pub const BACKGROUND_MAP_SIZE: usize = MAP_PIXELS;

/// DMG grayscale for a 2-bit shade, 0 = white, 3 = black.
pub fn shade(value: u8) -> Color {
    match value & 0x03 {
        0 => Color::WHITE,
        1 => Color::LIGHT_GRAY,
        2 => Color::DARK_GRAY,
        _ => Color::BLACK,
    }
}

/// Map a colour index through a palette register such as BGP.
pub fn palette_shade(palette: u8, color_index: u8) -> Color {
    shade(palette >> ((color_index & 0x03) * 2))
}

/// Colour index (0–3) of pixel `(x, y)` of the tile starting at `tile_addr`.
fn tile_pixel(mmu: &Mmu, tile_addr: u16, x: usize, y: usize) -> u8 {
    let row_addr = tile_addr.wrapping_add((y as u16 & 7) * 2);
    let lo = mmu.get(row_addr);
    let hi = mmu.get(row_addr.wrapping_add(1));
    let bit = 7 - (x as u8 & 7);
    (is_bit_set(hi, bit) as u8) << 1 | is_bit_set(lo, bit) as u8
}

/// Address of background tile data for a map entry. LCDC bit 4 selects
/// unsigned indexing from 0x8000 or signed indexing around 0x9000.
fn bg_tile_addr(lcdc: u8, tile_index: u8) -> u16 {
    if is_bit_set(lcdc, 4) {
        VRAM_START.wrapping_add(tile_index as u16 * TILE_BYTES)
    } else {
        0x9000u16.wrapping_add_signed(tile_index as i8 as i16 * TILE_BYTES as i16)
    }
}

/// LCDC bit 3 selects the 0x9C00 map over 0x9800.
fn bg_map_base(lcdc: u8) -> u16 {
    if is_bit_set(lcdc, 3) {
        0x9C00
    } else {
        0x9800
    }
}

/// Colour index of background pixel `(x, y)` in 256×256 map space.
fn bg_pixel(mmu: &Mmu, lcdc: u8, x: usize, y: usize) -> u8 {
    let map_addr = bg_map_base(lcdc) + ((y / TILE_SIZE) * MAP_TILES + x / TILE_SIZE) as u16;
    let tile_addr = bg_tile_addr(lcdc, mmu.get(map_addr));
    tile_pixel(mmu, tile_addr, x, y)
}

/// All 384 tiles laid out 16 per row, raw colour indices without a
/// palette.
pub fn tile_data(mmu: &Mmu) -> Image {
    let mut image = Image::new(TILE_SHEET_WIDTH, TILE_SHEET_HEIGHT);
    for tile in 0..TILE_COUNT {
        let tile_addr = VRAM_START + tile as u16 * TILE_BYTES;
        let origin_x = (tile % TILE_SHEET_COLUMNS) * TILE_SIZE;
        let origin_y = (tile / TILE_SHEET_COLUMNS) * TILE_SIZE;
        for y in 0..TILE_SIZE {
            for x in 0..TILE_SIZE {
                let color = shade(tile_pixel(mmu, tile_addr, x, y));
                image.draw_pixel(origin_x + x, origin_y + y, color);
            }
        }
    }
    image
}

/// The whole 32×32-tile background map with BGP applied and the visible
/// 160×144 window outlined in black at (SCX, SCY).
pub fn background_map(mmu: &Mmu) -> Image {
    let lcdc = mmu.get(LCDC);
    let bgp = mmu.get(BGP);
    let mut image = Image::new(MAP_PIXELS, MAP_PIXELS);
    for y in 0..MAP_PIXELS {
        for x in 0..MAP_PIXELS {
            let color = palette_shade(bgp, bg_pixel(mmu, lcdc, x, y));
            image.draw_pixel(x, y, color);
        }
    }

    let scx = mmu.get(SCX) as usize;
    let scy = mmu.get(SCY) as usize;
    let wrap = |v: usize| v % MAP_PIXELS;
    for x in 0..SCREEN_WIDTH {
        image.draw_pixel(wrap(scx + x), scy, Color::BLACK);
        image.draw_pixel(wrap(scx + x), wrap(scy + SCREEN_HEIGHT - 1), Color::BLACK);
    }
    for y in 0..SCREEN_HEIGHT {
        image.draw_pixel(scx, wrap(scy + y), Color::BLACK);
        image.draw_pixel(wrap(scx + SCREEN_WIDTH - 1), wrap(scy + y), Color::BLACK);
    }
    image
}

/// The visible 160×144 background, scrolled by SCX/SCY with wraparound.
/// Blank (white) while the LCD or the background layer is disabled.
pub fn screen_buffer(mmu: &Mmu) -> Image {
    let mut image = Image::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    let lcdc = mmu.get(LCDC);
    if !is_bit_set(lcdc, 7) || !is_bit_set(lcdc, 0) {
        image.fill(Color::WHITE);
        return image;
    }

    let bgp = mmu.get(BGP);
    let scx = mmu.get(SCX) as usize;
    let scy = mmu.get(SCY) as usize;
    for y in 0..SCREEN_HEIGHT {
        let bg_y = (y + scy) % MAP_PIXELS;
        for x in 0..SCREEN_WIDTH {
            let bg_x = (x + scx) % MAP_PIXELS;
            let color = palette_shade(bgp, bg_pixel(mmu, lcdc, bg_x, bg_y));
            image.draw_pixel(x, y, color);
        }
    }
    image
}
