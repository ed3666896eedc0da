use crate::error::EncodeError;
use std::{
    fmt,
    str::FromStr,
};

/// Rows are shifted down by this much after subtracting the origin.
pub const ROW_OFFSET: i32 = 6;

/// Normalized columns: two bytes of eight bits.
pub const COLUMNS: u8 = 16;

/// Normalized rows: one byte pair each.
pub const ROWS: u8 = 10;

/// Origin used by the physical display.
pub const DEFAULT_ORIGIN: Hex = Hex::new(-7, 2);

/// Axial coordinate of one hexagonal cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

impl Hex {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub fn checked_add(self, rhs: Hex) -> Option<Hex> {
        Some(Hex::new(self.q.checked_add(rhs.q)?, self.r.checked_add(rhs.r)?))
    }

    pub fn checked_sub(self, rhs: Hex) -> Option<Hex> {
        Some(Hex::new(self.q.checked_sub(rhs.q)?, self.r.checked_sub(rhs.r)?))
    }

    pub fn checked_mul(self, rhs: i32) -> Option<Hex> {
        Some(Hex::new(self.q.checked_mul(rhs)?, self.r.checked_mul(rhs)?))
    }
}

impl From<(i32, i32)> for Hex {
    fn from((q, r): (i32, i32)) -> Self {
        Self::new(q, r)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.q, self.r)
    }
}

/// Parses `q,r`, optionally wrapped in parentheses.
impl FromStr for Hex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (q, r) = trimmed
            .split_once(',')
            .ok_or_else(|| format!("expected `q,r`, got {s:?}"))?;
        let q = q.trim().parse::<i32>().map_err(|err| format!("bad q in {s:?}: {err}"))?;
        let r = r.trim().parse::<i32>().map_err(|err| format!("bad r in {s:?}: {err}"))?;
        Ok(Hex::new(q, r))
    }
}

/// A cell in the controller's normalized address space.
///
/// `column` is in `0..16` and `row` in `0..10`; construction through
/// [`Cell::normalize`] or [`Cell::new`] guarantees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    column: u8,
    row: u8,
}

impl Cell {
    pub fn new(column: u8, row: u8) -> Option<Self> {
        (column < COLUMNS && row < ROWS).then_some(Self { column, row })
    }

    /// Normalizes `hex` against `origin`.
    ///
    /// Computed in `i64` so that no pair of `i32` inputs can overflow.
    pub fn normalize(hex: Hex, origin: Hex) -> Result<Self, EncodeError> {
        let q_norm = i64::from(hex.q) - i64::from(origin.q);
        let r_norm = i64::from(hex.r) - i64::from(origin.r) + i64::from(ROW_OFFSET);

        let out_of_range = || EncodeError::CoordinateOutOfRange {
            hex,
            q_norm,
            r_norm,
        };
        let column = u8::try_from(q_norm).map_err(|_| out_of_range())?;
        let row = u8::try_from(r_norm).map_err(|_| out_of_range())?;
        Self::new(column, row).ok_or_else(out_of_range)
    }

    pub const fn column(self) -> u8 {
        self.column
    }

    pub const fn row(self) -> u8 {
        self.row
    }

    /// Inverse of [`Cell::normalize`]. `None` when the result does not fit
    /// in `i32`.
    pub fn to_hex(self, origin: Hex) -> Option<Hex> {
        origin.checked_add(Hex::new(
            i32::from(self.column),
            i32::from(self.row) - ROW_OFFSET,
        ))
    }

    /// Byte index and bit mask of this cell in the frame buffer.
    ///
    /// Each row owns the byte pair at `row * 2`. Columns 0-7 live in the
    /// second byte of the pair, columns 8-15 in the first.
    pub const fn address(self) -> (usize, u8) {
        let base = self.row as usize * 2;
        if self.column < 8 {
            (base + 1, 1 << self.column)
        } else {
            (base, 1 << (self.column - 8))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_against_default_origin() {
        let cell = Cell::normalize(Hex::new(-4, 2), DEFAULT_ORIGIN).unwrap();
        assert_eq!((cell.column(), cell.row()), (3, 6));
        assert_eq!(cell.address(), (13, 0b0000_1000));

        let cell = Cell::normalize(Hex::new(1, -1), DEFAULT_ORIGIN).unwrap();
        assert_eq!((cell.column(), cell.row()), (8, 3));
        assert_eq!(cell.address(), (6, 0b0000_0001));
    }

    #[test]
    fn rejects_column_sixteen() {
        let err = Cell::normalize(Hex::new(9, 2), DEFAULT_ORIGIN).unwrap_err();
        assert_eq!(
            err,
            EncodeError::CoordinateOutOfRange {
                hex: Hex::new(9, 2),
                q_norm: 16,
                r_norm: 6,
            }
        );
    }

    #[test]
    fn rejects_row_ten() {
        // byte index 20 is one past the end of the buffer
        let err = Cell::normalize(Hex::new(0, 6), DEFAULT_ORIGIN).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::CoordinateOutOfRange { r_norm: 10, .. }
        ));
    }

    #[test]
    fn rejects_negative_and_extreme_input() {
        assert!(Cell::normalize(Hex::new(-8, 2), DEFAULT_ORIGIN).is_err());
        assert!(Cell::normalize(Hex::new(0, -5), DEFAULT_ORIGIN).is_err());
        assert!(Cell::normalize(Hex::new(i32::MAX, i32::MIN), Hex::new(i32::MIN, i32::MAX)).is_err());
    }

    #[test]
    fn to_hex_inverts_normalize() {
        let origin = Hex::new(3, -11);
        for column in 0..COLUMNS {
            for row in 0..ROWS {
                let cell = Cell::new(column, row).unwrap();
                assert_eq!(Cell::normalize(cell.to_hex(origin).unwrap(), origin), Ok(cell));
            }
        }
    }

    #[test]
    fn to_hex_reports_overflow() {
        let corner = Cell::new(15, 9).unwrap();
        assert_eq!(corner.to_hex(Hex::new(i32::MAX, 0)), None);
        assert_eq!(corner.to_hex(Hex::new(0, i32::MAX)), None);
        assert_eq!(Cell::new(0, 0).unwrap().to_hex(Hex::new(i32::MIN, i32::MIN)), None);
        assert_eq!(
            Cell::new(0, 6).unwrap().to_hex(Hex::new(i32::MAX, i32::MIN)),
            Some(Hex::new(i32::MAX, i32::MIN))
        );
    }

    #[test]
    fn checked_arithmetic_stops_at_the_edges() {
        assert_eq!(Hex::new(1, 2).checked_add(Hex::new(3, -4)), Some(Hex::new(4, -2)));
        assert_eq!(Hex::new(i32::MAX, 0).checked_add(Hex::new(1, 0)), None);
        assert_eq!(Hex::new(0, i32::MIN).checked_sub(Hex::new(0, 1)), None);
        assert_eq!(Hex::new(4, -2).checked_mul(3), Some(Hex::new(12, -6)));
        assert_eq!(Hex::new(4, -2).checked_mul(i32::MAX), None);
    }

    #[test]
    fn parses_coordinates() {
        assert_eq!("-7,2".parse::<Hex>(), Ok(Hex::new(-7, 2)));
        assert_eq!("( 1 , -1 )".parse::<Hex>(), Ok(Hex::new(1, -1)));
        assert!("1".parse::<Hex>().is_err());
        assert!("a,b".parse::<Hex>().is_err());
        assert_eq!(Hex::new(-3, 0).to_string(), "(-3,0)");
    }
}
