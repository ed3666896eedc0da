//! Thirteen-cell hexadecimal font.
//!
//! A glyph covers three columns of 4, 5 and 4 cells. Bit 0 is the top of
//! the left column; the bits then run down the left column, up the middle
//! column and down the right column, so bit 12 is the bottom right.

use crate::{error::GlyphError, hex::Hex};

pub const GLYPH_CELLS: usize = 13;

#[rustfmt::skip]
pub const GLYPH_MASKS: [u16; 16] = [
    0b1111100011111, // 0
    0b0000111110000, // 1
    0b1011101011101, // 2
    0b1111101011001, // 3
    0b1111001000011, // 4
    0b1101101011011, // 5
    0b1101101011111, // 6
    0b0111100110001, // 7
    0b1111101011111, // 8
    0b1111101011011, // 9
    0b1111101001111, // A
    0b1100001011111, // b
    0b1001100011111, // C
    0b1111001011100, // d
    0b1001101011111, // E
    0b0001101001111, // F
];

/// Offset of each glyph bit from the glyph's anchor.
#[rustfmt::skip]
pub const GLYPH_OFFSETS: [Hex; GLYPH_CELLS] = [
    Hex::new(0, 0), Hex::new(0, 1), Hex::new(0, 2), Hex::new(0, 3),
    Hex::new(1, 3), Hex::new(1, 2), Hex::new(1, 1), Hex::new(1, 0), Hex::new(1, -1),
    Hex::new(2, -1), Hex::new(2, 0), Hex::new(2, 1), Hex::new(2, 2),
];

/// Anchor step between neighbouring glyphs in a line of text.
pub const GLYPH_ADVANCE: Hex = Hex::new(4, -2);

pub fn glyph_mask(digit: char) -> Result<u16, GlyphError> {
    digit
        .to_digit(16)
        .map(|value| GLYPH_MASKS[value as usize])
        .ok_or(GlyphError::UnknownGlyph(digit))
}

pub fn bit_lit(mask: u16, bit: usize) -> bool {
    mask & (1 << bit) != 0
}

/// Lit cells of `digit` drawn with its anchor at `at`.
pub fn glyph_cells(digit: char, at: Hex) -> Result<Vec<Hex>, GlyphError> {
    let mask = glyph_mask(digit)?;
    GLYPH_OFFSETS
        .iter()
        .enumerate()
        .filter(|(bit, _)| bit_lit(mask, *bit))
        .map(|(_, offset)| at.checked_add(*offset).ok_or(GlyphError::OutOfRange { at }))
        .collect()
}

/// Lit cells of `text`, one glyph every [`GLYPH_ADVANCE`] starting at `at`.
pub fn text_cells(text: &str, at: Hex) -> Result<Vec<Hex>, GlyphError> {
    let mut cells = Vec::new();
    for (idx, digit) in (0i32..).zip(text.chars()) {
        let anchor = GLYPH_ADVANCE
            .checked_mul(idx)
            .and_then(|step| at.checked_add(step))
            .ok_or(GlyphError::OutOfRange { at })?;
        cells.extend(glyph_cells(digit, anchor)?);
    }

    Ok(cells)
}

/// Glyph anchors of the font sheet: two rows of eight.
pub fn sheet_origins() -> [Hex; 16] {
    std::array::from_fn(|idx| {
        let idx = idx as i32;
        if idx < 8 {
            Hex::new(2 + idx * 4, -2 * idx)
        } else {
            Hex::new(2 + (idx - 8) * 4, 6 - 2 * (idx - 8))
        }
    })
}
