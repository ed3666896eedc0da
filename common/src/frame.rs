use crate::{
    error::EncodeError,
    hex::{COLUMNS, Cell, Hex, ROWS},
};

/// Bytes in one frame: two per normalized row.
pub const FRAME_LEN: usize = ROWS as usize * 2;

/// Packed lit/unlit state of every cell for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FrameBuffer([u8; FRAME_LEN]);

impl FrameBuffer {
    pub const fn new() -> Self {
        Self([0; FRAME_LEN])
    }

    /// Light `cell`. Setting a lit cell again is a no-op.
    pub fn set(&mut self, cell: Cell) {
        let (index, mask) = cell.address();
        self.0[index] |= mask;
    }

    pub fn is_set(&self, cell: Cell) -> bool {
        let (index, mask) = cell.address();
        self.0[index] & mask != 0
    }

    /// Every lit cell, row by row, lowest column first.
    pub fn lit_cells(&self) -> Vec<Cell> {
        (0..ROWS)
            .flat_map(|row| (0..COLUMNS).filter_map(move |column| Cell::new(column, row)))
            .filter(|cell| self.is_set(*cell))
            .collect()
    }

    pub fn count_lit(&self) -> u32 {
        self.0.iter().map(|byte| byte.count_ones()).sum()
    }

    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|byte| *byte == 0)
    }

    pub const fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }
}

impl From<[u8; FRAME_LEN]> for FrameBuffer {
    fn from(bytes: [u8; FRAME_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for FrameBuffer {
    type Error = EncodeError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes = <[u8; FRAME_LEN]>::try_from(bytes).map_err(|_| EncodeError::WrongLength {
            expected: FRAME_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(bytes))
    }
}

impl AsRef<[u8]> for FrameBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Encode `lit_set` into a freshly zeroed frame.
///
/// The first coordinate that falls outside the address space aborts the
/// pass; no partial frame is returned.
pub fn encode(lit_set: &[Hex], origin: Hex) -> Result<FrameBuffer, EncodeError> {
    let mut frame = FrameBuffer::new();
    for hex in lit_set {
        let cell = Cell::normalize(*hex, origin)?;
        trace!("{hex} -> column {}, row {}", cell.column(), cell.row());
        frame.set(cell);
    }

    Ok(frame)
}

/// Axial coordinates of every lit cell in `frame`.
///
/// Cells whose coordinate would not fit in `i32` at this origin are left
/// out; no lit set encoded against `origin` can produce them.
pub fn decode(frame: &FrameBuffer, origin: Hex) -> Vec<Hex> {
    frame
        .lit_cells()
        .into_iter()
        .filter_map(|cell| cell.to_hex(origin))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::DEFAULT_ORIGIN;
    use proptest::prelude::*;
    use rand::seq::SliceRandom;

    const FIREWORKS: [Hex; 6] = [
        Hex::new(-4, 2),
        Hex::new(-3, 1),
        Hex::new(-3, 2),
        Hex::new(1, -1),
        Hex::new(1, 0),
        Hex::new(2, -1),
    ];

    #[test]
    fn empty_lit_set_is_blank() {
        let frame = encode(&[], DEFAULT_ORIGIN).unwrap();
        assert_eq!(frame.as_bytes(), &[0; FRAME_LEN]);
        assert!(frame.is_blank());
    }

    #[test]
    fn fireworks_frame() {
        let frame = encode(&FIREWORKS, DEFAULT_ORIGIN).unwrap();
        let mut expected = [0u8; FRAME_LEN];
        expected[6] = 0b0000_0011; // (1,-1) and (2,-1)
        expected[8] = 0b0000_0001; // (1,0)
        expected[11] = 0b0001_0000; // (-3,1)
        expected[13] = 0b0001_1000; // (-4,2) and (-3,2)
        assert_eq!(frame.as_bytes(), &expected);
        assert_eq!(frame.count_lit(), 6);

        assert_eq!(encode(&FIREWORKS, DEFAULT_ORIGIN).unwrap(), frame);
    }

    #[test]
    fn duplicates_do_not_carry_into_neighbours() {
        let once = encode(&[Hex::new(-4, 2)], DEFAULT_ORIGIN).unwrap();
        let twice = encode(&[Hex::new(-4, 2), Hex::new(-4, 2)], DEFAULT_ORIGIN).unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice.as_bytes()[13], 8);
    }

    #[test]
    fn out_of_range_aborts_the_pass() {
        let err = encode(&[Hex::new(-4, 2), Hex::new(9, 2)], DEFAULT_ORIGIN).unwrap_err();
        assert!(matches!(err, EncodeError::CoordinateOutOfRange { q_norm: 16, .. }));

        let err = encode(&[Hex::new(0, 6)], DEFAULT_ORIGIN).unwrap_err();
        assert!(matches!(err, EncodeError::CoordinateOutOfRange { r_norm: 10, .. }));
    }

    #[test]
    fn shuffled_lit_set_encodes_identically() {
        let expected = encode(&FIREWORKS, DEFAULT_ORIGIN).unwrap();
        let mut rng = rand::thread_rng();
        let mut cells = FIREWORKS.to_vec();
        for _ in 0..32 {
            cells.shuffle(&mut rng);
            assert_eq!(encode(&cells, DEFAULT_ORIGIN).unwrap(), expected);
        }
    }

    #[test]
    fn decode_recovers_lit_set() {
        let frame = encode(&FIREWORKS, DEFAULT_ORIGIN).unwrap();
        let mut decoded = decode(&frame, DEFAULT_ORIGIN);
        let mut expected = FIREWORKS.to_vec();
        decoded.sort();
        expected.sort();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn decode_near_the_integer_limits() {
        let full = FrameBuffer::from([0xff; FRAME_LEN]);

        // only column 0 is representable
        let decoded = decode(&full, Hex::new(i32::MAX, 0));
        assert_eq!(decoded.len(), ROWS as usize);
        assert!(decoded.iter().all(|hex| hex.q == i32::MAX));

        // rows 0-5 sit below the origin row and underflow
        let decoded = decode(&full, Hex::new(0, i32::MIN));
        assert_eq!(decoded.len(), COLUMNS as usize * 4);
        assert!(decoded.iter().all(|hex| hex.r <= i32::MIN + 3));

        for origin in [Hex::new(i32::MAX, 0), Hex::new(0, i32::MIN)] {
            let decoded = decode(&full, origin);
            assert_eq!(encode(&decoded, origin).unwrap().count_lit() as usize, decoded.len());
        }
    }

    #[test]
    fn raw_frames_must_be_twenty_bytes() {
        let short = [0u8; 19];
        assert_eq!(
            FrameBuffer::try_from(&short[..]),
            Err(EncodeError::WrongLength {
                expected: 20,
                actual: 19
            })
        );
        let exact = [0xffu8; 20];
        assert_eq!(FrameBuffer::try_from(&exact[..]).unwrap().count_lit(), 160);
    }

    fn in_range() -> impl Strategy<Value = (Hex, Hex)> {
        (-1000i32..1000, -1000i32..1000, 0i32..16, 0i32..10).prop_map(|(oq, or, q, r)| {
            let origin = Hex::new(oq, or);
            (origin, Hex::new(oq + q, or + r - crate::hex::ROW_OFFSET))
        })
    }

    proptest! {
        #[test]
        fn single_cell_sets_exactly_one_bit((origin, hex) in in_range()) {
            let frame = encode(&[hex], origin).unwrap();
            prop_assert_eq!(frame.count_lit(), 1);
            prop_assert_eq!(decode(&frame, origin), vec![hex]);
        }

        #[test]
        fn encoding_is_idempotent(cells in proptest::collection::vec((0i32..16, 0i32..10), 0..40)) {
            let lit: Vec<Hex> = cells
                .iter()
                .map(|&(q, r)| Hex::new(q, r - crate::hex::ROW_OFFSET))
                .collect();
            let doubled: Vec<Hex> = lit.iter().chain(lit.iter()).copied().collect();
            let origin = Hex::new(0, 0);
            prop_assert_eq!(encode(&lit, origin).unwrap(), encode(&doubled, origin).unwrap());
        }

        #[test]
        fn any_order_encodes_identically(
            (cells, shuffled) in proptest::collection::vec((0i32..16, 0i32..10), 0..40)
                .prop_flat_map(|cells| (Just(cells.clone()), Just(cells).prop_shuffle()))
        ) {
            let origin = Hex::new(-7, 2);
            let to_hex = |&(q, r): &(i32, i32)| Hex::new(origin.q + q, origin.r + r - crate::hex::ROW_OFFSET);
            let lit: Vec<Hex> = cells.iter().map(to_hex).collect();
            let reordered: Vec<Hex> = shuffled.iter().map(to_hex).collect();
            prop_assert_eq!(encode(&lit, origin).unwrap(), encode(&reordered, origin).unwrap());
        }

        #[test]
        fn never_accepts_out_of_range(q in -64i32..64, r in -64i32..64) {
            let result = encode(&[Hex::new(q, r)], Hex::new(0, 0));
            let r_norm = r + crate::hex::ROW_OFFSET;
            let valid = (0..16).contains(&q) && (0..10).contains(&r_norm);
            prop_assert_eq!(result.is_ok(), valid);
        }
    }
}
