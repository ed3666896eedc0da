//! Physical cell layout of the display.
//!
//! 13 columns of flat-topped hexagons. The wiring walk starts at the top of
//! the first column; even columns run down four cells, odd columns run up
//! five, each column continuing from the row where the previous one ended.

use crate::hex::Hex;

pub const COLUMN_COUNT: i32 = 13;
pub const SHORT_COLUMN: i32 = 4;
pub const TALL_COLUMN: i32 = 5;
pub const CELL_COUNT: usize = 58;

/// Grid coordinates minus this offset give the coordinates used everywhere
/// else (lit sets, labels, the default origin).
pub const GRID_OFFSET: Hex = Hex::new(7, -2);

/// Every display cell in wiring order.
pub fn display_cells() -> Vec<Hex> {
    grid_cells().into_iter().filter_map(from_grid).collect()
}

/// Every display cell in wiring order, in grid coordinates (first cell at
/// `(0,0)`).
pub fn grid_cells() -> Vec<Hex> {
    let mut cells = Vec::with_capacity(CELL_COUNT);
    let mut r = 0;
    for q in 0..COLUMN_COUNT {
        if q % 2 == 0 {
            for _ in 0..SHORT_COLUMN {
                cells.push(Hex::new(q, r));
                r += 1;
            }
        } else {
            for _ in 0..TALL_COLUMN {
                r -= 1;
                cells.push(Hex::new(q, r));
            }
        }
    }

    cells
}

pub fn from_grid(grid: Hex) -> Option<Hex> {
    grid.checked_sub(GRID_OFFSET)
}

pub fn to_grid(hex: Hex) -> Option<Hex> {
    hex.checked_add(GRID_OFFSET)
}
