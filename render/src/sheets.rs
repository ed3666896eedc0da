use crate::{
    canvas::{BLACK, Canvas, GREY, WHITE},
    geometry::HexGeometry,
};
use hexcast_common::{
    DEFAULT_ORIGIN, Hex, decode, encode,
    glyph::{self, GLYPH_MASKS},
    layout::{self, from_grid, to_grid},
};
use rusttype::Font;

/// Printable grid template for the display.
pub struct GridSheet {
    pub dpi: f64,
    pub page_inches: (f64, f64),
    pub glass_inches: (f64, f64),
    pub edge_inches: f64,
    pub line_width: f64,
    pub scale: f64,
    pub label_size: f32,
}

impl Default for GridSheet {
    fn default() -> Self {
        Self {
            dpi: 600.0,
            page_inches: (17.0, 11.0),
            glass_inches: (17.0, 10.0),
            edge_inches: 1.312 / 3f64.sqrt(),
            line_width: 3.0,
            scale: 1.0,
            label_size: 120.0,
        }
    }
}

impl GridSheet {
    /// Geometry with the grid centred on the page.
    pub fn geometry(&self) -> HexGeometry {
        let half_side = (self.dpi * self.edge_inches / 2.0).round();
        let geometry = HexGeometry::new(half_side, (0.0, 0.0));
        let (page_x, page_y) = self.page_pixels();
        let left = (f64::from(page_x) - 40.0 * half_side) / 2.0;
        let top = (f64::from(page_y) - 10.0 * geometry.r3_half) / 2.0;
        geometry.with_origin((2.0 * half_side + left, 2.0 * geometry.r3_half + top))
    }

    pub fn page_pixels(&self) -> (u32, u32) {
        (
            (self.dpi * self.page_inches.0).round() as u32,
            (self.dpi * self.page_inches.1).round() as u32,
        )
    }

    pub fn render(&self, font: Option<&Font<'_>>) -> Canvas {
        let geometry = self.geometry();
        let (width, height) = self.page_pixels();

        info!("hex edge length = {:.3} in", self.edge_inches);
        info!("half side = {} px at {} dpi", geometry.half_side, self.dpi);
        info!(
            "image = {:.3} x {:.3} in, landscape",
            f64::from(width) / self.dpi,
            f64::from(height) / self.dpi
        );
        info!("row spacing = {:.3} in", geometry.row_spacing() / self.dpi);
        info!("column spacing = {:.3} in", geometry.column_spacing() / self.dpi);

        let mut canvas = Canvas::new(width, height, WHITE);

        let (cx, cy) = (f64::from(width) / 2.0, f64::from(height) / 2.0);
        let (gx, gy) = (
            (self.dpi * self.glass_inches.0).round() / 2.0,
            (self.dpi * self.glass_inches.1).round() / 2.0,
        );
        let glass = [
            (cx - gx, cy - gy),
            (cx + gx, cy - gy),
            (cx + gx, cy + gy),
            (cx - gx, cy + gy),
        ];
        canvas.stroke(&glass, self.line_width, BLACK, true);

        for cell in layout::grid_cells() {
            canvas.stroke(&geometry.polygon(cell, self.scale), self.line_width, BLACK, true);
            if let Some((font, label)) = font.zip(from_grid(cell)) {
                let label = label.to_string();
                canvas.text_centered(font, &label, self.label_size, geometry.center(cell), BLACK);
            }
        }

        canvas
    }
}

/// All sixteen glyphs of the hex font on one sheet.
pub struct FontSheet {
    pub dpi: f64,
    pub half_side: f64,
    pub scale: f64,
}

impl Default for FontSheet {
    fn default() -> Self {
        Self {
            dpi: 150.0,
            half_side: 15.0,
            scale: 0.8,
        }
    }
}

impl FontSheet {
    pub fn geometry(&self) -> HexGeometry {
        HexGeometry::new(self.half_side, (-3.0 * self.half_side, 0.0))
    }

    pub fn render(&self) -> anyhow::Result<Canvas> {
        let geometry = self.geometry();
        let width = (96.0 * geometry.half_side) as u32;
        let height = (22.0 * geometry.r3_half) as u32;
        let mut canvas = Canvas::new(width, height, BLACK);

        for (digit, origin) in "0123456789ABCDEF".chars().zip(glyph::sheet_origins()) {
            for cell in glyph::glyph_cells(digit, origin)? {
                canvas.fill_polygon(&geometry.polygon(cell, self.scale), WHITE);
            }
        }
        debug!("drew {} glyphs", GLYPH_MASKS.len());

        Ok(canvas)
    }
}

/// Preview of what the display shows for a lit set.
pub struct FramePreview {
    pub dpi: f64,
    pub half_side: f64,
    pub origin: Hex,
}

impl Default for FramePreview {
    fn default() -> Self {
        Self {
            dpi: 150.0,
            half_side: 15.0,
            origin: DEFAULT_ORIGIN,
        }
    }
}

impl FramePreview {
    pub fn geometry(&self) -> HexGeometry {
        let geometry = HexGeometry::new(self.half_side, (0.0, 0.0));
        geometry.with_origin((2.0 * self.half_side, 2.0 * geometry.r3_half))
    }

    /// Goes through the encoder so the preview matches the wire frame bit
    /// for bit.
    pub fn render(&self, lit_set: &[Hex]) -> anyhow::Result<Canvas> {
        let frame = encode(lit_set, self.origin)?;
        let geometry = self.geometry();
        let width = (40.0 * geometry.half_side) as u32;
        let height = (10.0 * geometry.r3_half) as u32;
        let mut canvas = Canvas::new(width, height, BLACK);

        for cell in layout::grid_cells() {
            canvas.stroke(&geometry.polygon(cell, 1.0), 1.0, GREY, true);
        }

        let display = layout::display_cells();
        for hex in decode(&frame, self.origin) {
            if !display.contains(&hex) {
                warn!("{hex} is not wired to a physical cell");
            }
            let Some(grid) = to_grid(hex) else {
                warn!("{hex} has no place on the preview grid");
                continue;
            };
            canvas.fill_polygon(&geometry.polygon(grid, 0.8), WHITE);
        }

        Ok(canvas)
    }
}
