use crate::geometry::Point;
use image::{Pixel, Rgba, RgbaImage, imageops};
use itertools::Itertools;
use rusttype::{Font, Scale, point};
use png::{BitDepth, ColorType, Encoder, PixelDimensions, Unit};
use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const GREY: Rgba<u8> = Rgba([0x60, 0x60, 0x60, 255]);

const METERS_PER_INCH: f64 = 0.0254;

/// pHYs value for `dpi`, in pixels per meter.
pub fn pixels_per_meter(dpi: f64) -> u32 {
    (dpi / METERS_PER_INCH).round() as u32
}

/// RGBA raster with the few primitives the sheets need.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        (x < self.width() && y < self.height()).then(|| *self.image.get_pixel(x, y))
    }

    fn blend(&mut self, x: i64, y: i64, color: Rgba<u8>, coverage: f32) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x >= self.width() || y >= self.height() {
            return;
        }

        let mut color = color;
        color.0[3] = (f32::from(color.0[3]) * coverage.clamp(0.0, 1.0)).round() as u8;
        self.image.get_pixel_mut(x, y).blend(&color);
    }

    /// Even-odd scanline fill, sampled at pixel centres.
    pub fn fill_polygon(&mut self, points: &[Point], color: Rgba<u8>) {
        if points.len() < 3 {
            return;
        }
        let Some((min_y, max_y)) = points
            .iter()
            .map(|p| p.1)
            .minmax_by(f64::total_cmp)
            .into_option()
        else {
            return;
        };

        let y_start = (min_y.floor() as i64).max(0);
        let y_end = (max_y.ceil() as i64).min(i64::from(self.height()));
        let width = i64::from(self.width());
        let mut crossings = Vec::with_capacity(points.len());

        for y in y_start..y_end {
            let sample = y as f64 + 0.5;
            crossings.clear();
            for (&(x0, y0), &(x1, y1)) in points.iter().circular_tuple_windows() {
                if (y0 <= sample) != (y1 <= sample) {
                    crossings.push(x0 + (sample - y0) / (y1 - y0) * (x1 - x0));
                }
            }
            crossings.sort_by(f64::total_cmp);

            for (&left, &right) in crossings.iter().tuples() {
                let x_start = ((left - 0.5).ceil() as i64).max(0);
                let x_end = ((right - 0.5).ceil() as i64).min(width);
                for x in x_start..x_end {
                    self.blend(x, y, color, 1.0);
                }
            }
        }
    }

    /// Stroke the segments between consecutive points with square joints.
    pub fn stroke(&mut self, points: &[Point], line_width: f64, color: Rgba<u8>, closed: bool) {
        let half = line_width / 2.0;
        let segments: Vec<(Point, Point)> = if closed {
            points.iter().copied().circular_tuple_windows().collect()
        } else {
            points.iter().copied().tuple_windows().collect()
        };

        for ((ax, ay), (bx, by)) in segments {
            let (dx, dy) = (bx - ax, by - ay);
            let length = dx.hypot(dy);
            if length == 0.0 {
                continue;
            }
            let (nx, ny) = (-dy / length * half, dx / length * half);
            self.fill_polygon(
                &[
                    (ax + nx, ay + ny),
                    (bx + nx, by + ny),
                    (bx - nx, by - ny),
                    (ax - nx, ay - ny),
                ],
                color,
            );
        }

        for &(x, y) in points {
            self.fill_polygon(
                &[
                    (x - half, y - half),
                    (x + half, y - half),
                    (x + half, y + half),
                    (x - half, y + half),
                ],
                color,
            );
        }
    }

    /// Draw `text` with its bounding box centred on `center`.
    pub fn text_centered(
        &mut self,
        font: &Font<'_>,
        text: &str,
        size: f32,
        center: Point,
        color: Rgba<u8>,
    ) {
        let scale = Scale::uniform(size);
        let v_metrics = font.v_metrics(scale);
        let glyphs: Vec<_> = font.layout(text, scale, point(0.0, v_metrics.ascent)).collect();
        let width = glyphs
            .last()
            .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0);
        let height = v_metrics.ascent - v_metrics.descent;

        let left = (center.0 - f64::from(width) / 2.0).round() as i64;
        let top = (center.1 - f64::from(height) / 2.0).round() as i64;

        for glyph in &glyphs {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let x = left + i64::from(bb.min.x) + i64::from(gx);
                let y = top + i64::from(bb.min.y) + i64::from(gy);
                self.blend(x, y, color, coverage);
            });
        }
    }

    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Canvas {
        Canvas {
            image: imageops::crop_imm(&self.image, x, y, width, height).to_image(),
        }
    }

    /// Write an RGBA PNG whose pHYs chunk records `dpi`, so the page prints
    /// at its physical size.
    pub fn save(&self, path: &Path, dpi: f64) -> anyhow::Result<()> {
        let file = File::create(path)
            .map_err(|err| anyhow::anyhow!("failed to create {}: {err}", path.display()))?;
        let ppm = pixels_per_meter(dpi);

        let mut encoder = Encoder::new(BufWriter::new(file), self.width(), self.height());
        encoder.set_color(ColorType::Rgba);
        encoder.set_depth(BitDepth::Eight);
        encoder.set_pixel_dims(Some(PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: Unit::Meter,
        }));
        let mut writer = encoder.write_header()?;
        writer.write_image_data(self.image.as_raw())?;
        writer.finish()?;

        info!(
            "wrote {} ({}x{} at {dpi} dpi)",
            path.display(),
            self.width(),
            self.height()
        );
        Ok(())
    }
}

const FONT_DIRS: [&str; 5] = [
    ".",
    "/usr/share/fonts/truetype",
    "/usr/share/fonts/truetype/msttcorefonts",
    "/Library/Fonts",
    "/System/Library/Fonts/Supplemental",
];

/// Load a TrueType font from `path`, or look for `Arial.ttf` in the usual
/// places when no path is given.
pub fn load_font(path: Option<&Path>) -> anyhow::Result<Option<Font<'static>>> {
    let candidates: Vec<PathBuf> = match path {
        Some(path) => vec![path.to_path_buf()],
        None => FONT_DIRS
            .iter()
            .map(|dir| Path::new(dir).join("Arial.ttf"))
            .filter(|candidate| candidate.exists())
            .collect(),
    };

    for candidate in candidates {
        let data = match fs::read(&candidate) {
            Ok(data) => data,
            Err(err) if path.is_some() => {
                return Err(anyhow::anyhow!("failed to read {}: {err}", candidate.display()));
            }
            Err(_) => continue,
        };
        match Font::try_from_vec(data) {
            Some(font) => {
                debug!("loaded font from {}", candidate.display());
                return Ok(Some(font));
            }
            None if path.is_some() => {
                anyhow::bail!("{} is not a TrueType font", candidate.display());
            }
            None => continue,
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_square_exactly() {
        let mut canvas = Canvas::new(10, 10, BLACK);
        canvas.fill_polygon(&[(2.0, 2.0), (6.0, 2.0), (6.0, 5.0), (2.0, 5.0)], WHITE);

        let lit = (0..10)
            .cartesian_product(0..10)
            .filter(|&(x, y)| canvas.pixel(x, y) == Some(WHITE))
            .count();
        assert_eq!(lit, 12);
        assert_eq!(canvas.pixel(2, 2), Some(WHITE));
        assert_eq!(canvas.pixel(5, 4), Some(WHITE));
        assert_eq!(canvas.pixel(6, 4), Some(BLACK));
        assert_eq!(canvas.pixel(1, 2), Some(BLACK));
    }

    #[test]
    fn clips_to_the_canvas() {
        let mut canvas = Canvas::new(4, 4, BLACK);
        canvas.fill_polygon(&[(-10.0, -10.0), (20.0, -10.0), (20.0, 20.0), (-10.0, 20.0)], WHITE);
        assert!((0..4).cartesian_product(0..4).all(|(x, y)| canvas.pixel(x, y) == Some(WHITE)));
    }

    #[test]
    fn stroke_leaves_the_inside_untouched() {
        let mut canvas = Canvas::new(20, 20, WHITE);
        let square = [(2.0, 2.0), (17.0, 2.0), (17.0, 17.0), (2.0, 17.0)];
        canvas.stroke(&square, 2.0, BLACK, true);

        assert_eq!(canvas.pixel(10, 2), Some(BLACK));
        assert_eq!(canvas.pixel(2, 10), Some(BLACK));
        assert_eq!(canvas.pixel(16, 10), Some(BLACK));
        assert_eq!(canvas.pixel(10, 10), Some(WHITE));
        assert_eq!(canvas.pixel(0, 0), Some(WHITE));
    }

    #[test]
    fn crop_keeps_the_left_half() {
        let mut canvas = Canvas::new(8, 4, BLACK);
        canvas.fill_polygon(&[(4.0, 0.0), (8.0, 0.0), (8.0, 4.0), (4.0, 4.0)], WHITE);
        let half = canvas.crop(0, 0, 4, 4);
        assert_eq!((half.width(), half.height()), (4, 4));
        assert!((0..4).cartesian_product(0..4).all(|(x, y)| half.pixel(x, y) == Some(BLACK)));
    }

    #[test]
    fn saved_png_records_the_resolution() {
        let path = std::env::temp_dir().join(format!("hexcast-dpi-{}.png", std::process::id()));
        let mut canvas = Canvas::new(6, 3, BLACK);
        canvas.fill_polygon(&[(0.0, 0.0), (3.0, 0.0), (3.0, 3.0), (0.0, 3.0)], WHITE);
        canvas.save(&path, 600.0).unwrap();

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let mut reader = decoder.read_info().unwrap();
        let dims = reader.info().pixel_dims.unwrap();
        assert_eq!((dims.xppu, dims.yppu), (23622, 23622));
        assert!(matches!(dims.unit, Unit::Meter));
        assert_eq!((reader.info().width, reader.info().height), (6, 3));

        let mut pixels = vec![0; reader.output_buffer_size()];
        reader.next_frame(&mut pixels).unwrap();
        assert_eq!(&pixels[..4], &WHITE.0);
        assert_eq!(&pixels[pixels.len() - 4..], &BLACK.0);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn pixels_per_meter_rounds() {
        assert_eq!(pixels_per_meter(600.0), 23622);
        assert_eq!(pixels_per_meter(150.0), 5906);
    }
}
