use hexcast_common::Hex;

pub type Point = (f64, f64);

/// Flat-topped hexagon corners relative to the centre, in units of
/// `(half_side, r3_half)`.
const CORNERS: [(f64, f64); 6] = [
    (-2.0, 0.0),
    (-1.0, -1.0),
    (1.0, -1.0),
    (2.0, 0.0),
    (1.0, 1.0),
    (-1.0, 1.0),
];

/// Maps axial coordinates onto pixels.
///
/// `half_side` is half the hexagon edge length in pixels. `r3_half` is
/// `sqrt(3) * half_side` rounded to whole pixels, so rows land on integer
/// pixel offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HexGeometry {
    pub half_side: f64,
    pub r3_half: f64,
    pub origin: Point,
}

impl HexGeometry {
    pub fn new(half_side: f64, origin: Point) -> Self {
        Self {
            half_side,
            r3_half: (3f64.sqrt() * half_side).round(),
            origin,
        }
    }

    pub fn with_origin(self, origin: Point) -> Self {
        Self { origin, ..self }
    }

    pub fn center(&self, hex: Hex) -> Point {
        let q = f64::from(hex.q);
        let r = f64::from(hex.r);
        (
            3.0 * self.half_side * q + self.origin.0,
            self.r3_half * (q + 2.0 * r) + self.origin.1,
        )
    }

    /// Corners of `hex`, shrunk or grown about its centre by `scale`.
    pub fn polygon(&self, hex: Hex, scale: f64) -> [Point; 6] {
        let (cx, cy) = self.center(hex);
        CORNERS.map(|(dx, dy)| {
            (
                cx + dx * self.half_side * scale,
                cy + dy * self.r3_half * scale,
            )
        })
    }

    pub fn column_spacing(&self) -> f64 {
        3.0 * self.half_side
    }

    pub fn row_spacing(&self) -> f64 {
        2.0 * self.r3_half
    }
}
