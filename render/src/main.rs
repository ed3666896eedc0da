#[macro_use]
extern crate tracing;

mod canvas;
mod geometry;
mod sheets;

use self::sheets::{FontSheet, FramePreview, GridSheet};
use hexcast_common::{DEFAULT_ORIGIN, Hex, Pattern, glyph};
use std::path::PathBuf;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(argh::FromArgs)]
/// render hex matrix grids, fonts and frame previews to PNG
struct Args {
    #[argh(subcommand)]
    command: Subcommand,
}

#[derive(argh::FromArgs)]
#[argh(subcommand)]
enum Subcommand {
    Grid(GridArgs),
    Font(FontArgs),
    Frame(FrameArgs),
}

#[derive(argh::FromArgs)]
#[argh(subcommand, name = "grid")]
/// printable full-size grid template
struct GridArgs {
    #[argh(option, default = "PathBuf::from(\"hex-matrix-grid.png\")")]
    /// output file
    output: PathBuf,

    #[argh(option, default = "PathBuf::from(\"hex-matrix-grid-half.png\")")]
    /// where to write the left half of the page
    half_output: PathBuf,

    #[argh(option, default = "600.0")]
    /// printer resolution
    dpi: f64,

    #[argh(option, default = "3.0")]
    /// outline width in pixels
    line_width: f64,

    #[argh(option, default = "17.0")]
    /// page width in inches
    page_width: f64,

    #[argh(option, default = "11.0")]
    /// page height in inches
    page_height: f64,

    #[argh(option, default = "1.0")]
    /// hexagon scale, 1 puts the outline on the cell edge
    scale: f64,

    #[argh(switch)]
    /// leave out the coordinate labels
    no_labels: bool,

    #[argh(option)]
    /// truetype font for the labels (defaults to Arial.ttf)
    font: Option<PathBuf>,

    #[argh(option, default = "120.0")]
    /// label size in pixels
    label_size: f32,
}

#[derive(argh::FromArgs)]
#[argh(subcommand, name = "font")]
/// sheet of all sixteen hex font glyphs
struct FontArgs {
    #[argh(option, default = "PathBuf::from(\"hex-matrix-font.png\")")]
    /// output file
    output: PathBuf,

    #[argh(option, default = "15.0")]
    /// half the hexagon edge in pixels
    half_side: f64,

    #[argh(option, default = "150.0")]
    /// resolution recorded in the PNG
    dpi: f64,
}

#[derive(argh::FromArgs)]
#[argh(subcommand, name = "frame")]
/// preview a frame as the display would show it
struct FrameArgs {
    #[argh(option, default = "PathBuf::from(\"hex-matrix-frame.png\")")]
    /// output file
    output: PathBuf,

    #[argh(option)]
    /// built-in pattern to preview (fireworks, ppm)
    pattern: Option<Pattern>,

    #[argh(option)]
    /// hex digits to preview instead of a pattern
    text: Option<String>,

    #[argh(option, default = "DEFAULT_ORIGIN")]
    /// anchor of the first glyph of --text, as q,r
    at: Hex,

    #[argh(option, default = "DEFAULT_ORIGIN")]
    /// coordinate of column 0 as q,r
    origin: Hex,

    #[argh(option, default = "15.0")]
    /// half the hexagon edge in pixels
    half_side: f64,

    #[argh(option, default = "150.0")]
    /// resolution recorded in the PNG
    dpi: f64,
}

fn grid(args: GridArgs) -> anyhow::Result<()> {
    let sheet = GridSheet {
        dpi: args.dpi,
        page_inches: (args.page_width, args.page_height),
        line_width: args.line_width,
        scale: args.scale,
        label_size: args.label_size,
        ..GridSheet::default()
    };

    let font = if args.no_labels {
        None
    } else {
        let font = canvas::load_font(args.font.as_deref())?;
        if font.is_none() {
            warn!("no label font found, drawing the grid without coordinates");
        }
        font
    };

    let canvas = sheet.render(font.as_ref());
    canvas.save(&args.output, sheet.dpi)?;

    canvas
        .crop(0, 0, canvas.width() / 2, canvas.height())
        .save(&args.half_output, sheet.dpi)
}

fn font(args: FontArgs) -> anyhow::Result<()> {
    let sheet = FontSheet {
        dpi: args.dpi,
        half_side: args.half_side,
        ..FontSheet::default()
    };
    sheet.render()?.save(&args.output, sheet.dpi)
}

fn frame(args: FrameArgs) -> anyhow::Result<()> {
    let lit_set = match (args.text, args.pattern) {
        (Some(_), Some(_)) => anyhow::bail!("--text and --pattern are mutually exclusive"),
        (Some(text), None) => glyph::text_cells(&text, args.at)?,
        (None, pattern) => pattern.unwrap_or(Pattern::Fireworks).cells().to_vec(),
    };

    let preview = FramePreview {
        dpi: args.dpi,
        half_side: args.half_side,
        origin: args.origin,
    };
    preview.render(&lit_set)?.save(&args.output, preview.dpi)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args: Args = argh::from_env();

    match args.command {
        Subcommand::Grid(args) => grid(args),
        Subcommand::Font(args) => font(args),
        Subcommand::Frame(args) => frame(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;

    #[test]
    fn grid_flags_parse() {
        let args = Args::from_args(&["hexcast-render"], &["grid", "--font", "Arial.ttf", "--dpi", "300"]).unwrap();
        let Subcommand::Grid(grid) = args.command else {
            panic!("expected the grid subcommand");
        };
        assert_eq!(grid.font, Some(PathBuf::from("Arial.ttf")));
        assert_eq!(grid.dpi, 300.0);
    }

    #[test]
    fn sheets_default_to_150_dpi() {
        let args = Args::from_args(&["hexcast-render"], &["font"]).unwrap();
        let Subcommand::Font(font) = args.command else {
            panic!("expected the font subcommand");
        };
        assert_eq!(font.dpi, 150.0);
    }
}
