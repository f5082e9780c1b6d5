//! Plate geometry: how four 96-well plates interleave inside one 384-well plate.
//!
//! Adjacent wells of a 384 plate belong to different 96-well plates, so each quadrant
//! is obtained by striding over every other row and every other column rather than by
//! slicing a contiguous block.

use super::models::quadrant::Quadrant;
use super::models::well::{PlateLayout, ROW_ALPHABET, WellCoordinate};

pub const QUADRANT_ROWS: usize = 8;
pub const QUADRANT_COLUMNS: usize = 12;

/// Row letters of the 384 plate that belong to `quadrant`, top to bottom.
///
/// `a c e g i k m o` for the top quadrants, `b d f h j l n p` for the bottom ones.
pub fn rows_for(quadrant: Quadrant) -> [char; QUADRANT_ROWS] {
    std::array::from_fn(|i| ROW_ALPHABET[2 * i + quadrant.row_offset()])
}

/// Column numbers of the 384 plate that belong to `quadrant`, left to right.
///
/// Odd columns (1, 3, ..., 23) for the left quadrants, even columns (2, 4, ..., 24)
/// for the right ones.
pub fn columns_for(quadrant: Quadrant) -> [u16; QUADRANT_COLUMNS] {
    std::array::from_fn(|i| (2 * i + quadrant.column_offset() + 1) as u16)
}

/// The 384 well that sits at 0-based position (`row`, `column`) of a quadrant.
pub fn source_well(quadrant: Quadrant, row: usize, column: usize) -> Option<WellCoordinate> {
    if row >= QUADRANT_ROWS || column >= QUADRANT_COLUMNS {
        return None;
    }
    Some(WellCoordinate::new(
        (2 * row + quadrant.row_offset()) as u8,
        (2 * column + quadrant.column_offset() + 1) as u16,
    ))
}

/// Inverse mapping: the quadrant a 384 well belongs to, and the well it becomes on
/// that quadrant's 96 plate.
///
/// Returns `None` for wells outside the 384 plate.
pub fn locate(well: &WellCoordinate) -> Option<(Quadrant, WellCoordinate)> {
    if !PlateLayout::Plate384.contains(well) {
        return None;
    }
    let (row, column) = well.matrix_index()?;
    let quadrant = Quadrant::from_offsets(row, column);
    let target = WellCoordinate::new((row / 2) as u8, (column / 2 + 1) as u16);
    Some((quadrant, target))
}
