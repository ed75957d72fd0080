// src/common/decode.rs

//! Fixed-point decoding of range and intensity values.
//!
//! Both encodings pack an integer part and a fractional part into one
//! big-endian word. The arithmetic runs in `f64` and is narrowed to `f32`
//! at the end, so results match the sensor vendor's reference output bit
//! for bit.

use super::frame::{
    FRAME_SIZE, INTENSITY_GRID_OFFSET, INTENSITY_OFFSET, INTENSITY_WIDTH, PIXELS,
    RANGE_GRID_OFFSET, RANGE_OFFSET, RANGE_WIDTH, STATUS_GRID_OFFSET, STATUS_WIDTH,
};

/// Bits 22..31 of a range word hold the integer part (masked to 9 bits).
pub const RANGE_INTEGER_SHIFT: u32 = 22;
pub const RANGE_INTEGER_MASK: u32 = 0x1FF;
pub const RANGE_INTEGER_SCALE: u32 = 1000;
/// Bits 0..21 of a range word hold the fractional part.
pub const RANGE_FRACTION_MASK: u32 = 0x3F_FFFF;
pub const RANGE_FRACTION_SCALE: f64 = 0.00023842;

/// Intensity words carry four bits of padding below the value.
pub const INTENSITY_PRESCALE: u16 = 16;
pub const INTENSITY_INTEGER_SHIFT: u16 = 4;
pub const INTENSITY_FRACTION_MASK: u16 = 0xF;
pub const INTENSITY_FRACTION_SCALE: f64 = 0.0625;

/// Decodes a packed range word.
#[inline]
pub fn decode_range(raw: u32) -> f32 {
    let integer = ((raw >> RANGE_INTEGER_SHIFT) & RANGE_INTEGER_MASK) * RANGE_INTEGER_SCALE;
    let fraction = f64::from(raw & RANGE_FRACTION_MASK) * RANGE_FRACTION_SCALE;
    (f64::from(integer) + fraction) as f32
}

/// Strips the padding nibble from an intensity word.
#[inline]
pub fn intensity_raw(raw: u16) -> u16 {
    raw / INTENSITY_PRESCALE
}

/// Decodes a packed intensity word.
#[inline]
pub fn decode_intensity(raw: u16) -> f32 {
    let q = intensity_raw(raw);
    let integer = f64::from(q >> INTENSITY_INTEGER_SHIFT);
    let fraction = f64::from(q & INTENSITY_FRACTION_MASK) * INTENSITY_FRACTION_SCALE;
    (integer + fraction) as f32
}

#[inline]
fn be_u32_at(frame: &[u8; FRAME_SIZE], offset: usize) -> u32 {
    let b = &frame[offset..offset + RANGE_WIDTH];
    u32::from_be_bytes([b[0], b[1], b[2], b[3]])
}

#[inline]
fn be_u16_at(frame: &[u8; FRAME_SIZE], offset: usize) -> u16 {
    let b = &frame[offset..offset + INTENSITY_WIDTH];
    u16::from_be_bytes([b[0], b[1]])
}

/// Scalar range at bytes 4..8.
pub fn range(frame: &[u8; FRAME_SIZE]) -> f32 {
    decode_range(be_u32_at(frame, RANGE_OFFSET))
}

/// Scalar intensity at bytes 8..10.
pub fn intensity(frame: &[u8; FRAME_SIZE]) -> f32 {
    decode_intensity(be_u16_at(frame, INTENSITY_OFFSET))
}

/// Per-pixel ranges, row-major.
pub fn range_grid(frame: &[u8; FRAME_SIZE]) -> [f32; PIXELS] {
    core::array::from_fn(|i| decode_range(be_u32_at(frame, RANGE_GRID_OFFSET + i * RANGE_WIDTH)))
}

/// Per-pixel intensities, row-major.
pub fn intensity_grid(frame: &[u8; FRAME_SIZE]) -> [f32; PIXELS] {
    core::array::from_fn(|i| {
        decode_intensity(be_u16_at(frame, INTENSITY_GRID_OFFSET + i * INTENSITY_WIDTH))
    })
}

/// Per-pixel intensities with only the padding nibble removed.
pub fn intensity_grid_raw(frame: &[u8; FRAME_SIZE]) -> [u16; PIXELS] {
    core::array::from_fn(|i| {
        intensity_raw(be_u16_at(frame, INTENSITY_GRID_OFFSET + i * INTENSITY_WIDTH))
    })
}

/// Per-pixel status bytes.
pub fn status_grid(frame: &[u8; FRAME_SIZE]) -> [u8; PIXELS] {
    core::array::from_fn(|i| frame[STATUS_GRID_OFFSET + i * STATUS_WIDTH])
}
