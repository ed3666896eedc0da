#[macro_use]
extern crate tracing;

use anyhow::Context;
use hexcast_common::{
    Command, DEFAULT_ORIGIN, FrameBuffer, HeaderToken, Headers, Hex, Pattern, Player, Timing,
    command::{COMMIT_HEADER, DATA_HEADER, STATIC_HEADER},
    encode, glyph,
    sink::{self, ByteSink},
};
use std::time::Duration;

const DEFAULT_CYCLES: u32 = 5;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(argh::FromArgs)]
/// send frames to the hex matrix display controller
struct Args {
    #[argh(option, default = "String::from(sink::DEFAULT_PORT)")]
    /// serial device of the controller
    port: String,

    #[argh(option, default = "sink::DEFAULT_BAUD")]
    /// baud rate
    baud: u32,

    #[argh(option, default = "1000")]
    /// read timeout in milliseconds
    read_timeout_ms: u64,

    #[argh(option)]
    /// built-in pattern to show (fireworks, ppm)
    pattern: Option<Pattern>,

    #[argh(option)]
    /// hex digits to show instead of a pattern
    text: Option<String>,

    #[argh(option, default = "DEFAULT_ORIGIN")]
    /// anchor of the first glyph of --text, as q,r
    at: Hex,

    #[argh(option, default = "DEFAULT_ORIGIN")]
    /// coordinate of column 0 as q,r
    origin: Hex,

    #[argh(option)]
    /// number of frames to send, 0 repeats forever (default 5 cycles, or
    /// forever with --static)
    cycles: Option<u32>,

    #[argh(switch, long = "static")]
    /// resend the frame on the static channel instead of animating
    hold_static: bool,

    #[argh(option, default = "5000")]
    /// delay after opening the port, in milliseconds
    startup_ms: u64,

    #[argh(option, default = "1000")]
    /// delay between a load and its commit, in milliseconds
    load_to_commit_ms: u64,

    #[argh(option, default = "4000")]
    /// delay after a commit, in milliseconds
    commit_to_next_ms: u64,

    #[argh(option, default = "0")]
    /// delay between static frames, in milliseconds
    static_interval_ms: u64,

    #[argh(option, default = "DATA_HEADER")]
    /// header token of frame loads
    data_header: HeaderToken,

    #[argh(option, default = "COMMIT_HEADER")]
    /// header token of commits
    commit_header: HeaderToken,

    #[argh(option, default = "STATIC_HEADER")]
    /// header token of static frame loads
    static_header: HeaderToken,

    #[argh(switch)]
    /// log the commands instead of opening the port
    dry_run: bool,
}

impl Args {
    fn lit_set(&self) -> anyhow::Result<Vec<Hex>> {
        match (&self.text, self.pattern) {
            (Some(_), Some(_)) => anyhow::bail!("--text and --pattern are mutually exclusive"),
            (Some(text), None) => Ok(glyph::text_cells(text, self.at)?),
            (None, pattern) => Ok(pattern.unwrap_or(Pattern::Fireworks).cells().to_vec()),
        }
    }

    fn timing(&self) -> Timing {
        Timing {
            startup: Duration::from_millis(self.startup_ms),
            load_to_commit: Duration::from_millis(self.load_to_commit_ms),
            commit_to_next: Duration::from_millis(self.commit_to_next_ms),
            static_interval: Duration::from_millis(self.static_interval_ms),
        }
    }

    fn headers(&self) -> Headers {
        Headers {
            data: self.data_header.clone(),
            commit: self.commit_header.clone(),
            static_load: self.static_header.clone(),
        }
    }

    fn cycles(&self) -> Option<u32> {
        match self.cycles {
            Some(0) => None,
            Some(cycles) => Some(cycles),
            None if self.hold_static => None,
            None => Some(DEFAULT_CYCLES),
        }
    }
}

fn hex_dump(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect::<Vec<_>>().join(" ")
}

fn dry_run(args: &Args, frame: &FrameBuffer) {
    let headers = args.headers();
    if args.hold_static {
        let load = Command::load(&headers.static_load, frame).to_bytes();
        info!("static load: {}", hex_dump(&load));
    } else {
        let load = Command::load(&headers.data, frame).to_bytes();
        let commit = Command::commit(&headers.commit).to_bytes();
        info!("load: {}", hex_dump(&load));
        info!("commit: {}", hex_dump(&commit));
    }
}

fn play<S: ByteSink>(args: &Args, sink: S, lit_set: &[Hex], frame: &FrameBuffer) -> anyhow::Result<()> {
    let mut player = Player::new(sink, args.timing(), args.headers());
    player.startup()?;

    if args.hold_static {
        info!("holding static frame");
        player.hold_static(frame, args.cycles())?;
    } else {
        info!("animating");
        player.animate(lit_set, args.origin, args.cycles())?;
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args: Args = argh::from_env();

    let lit_set = args.lit_set()?;
    let frame = encode(&lit_set, args.origin).context("lit set does not fit the display")?;
    info!("encoded {} cells into {} lit bits", lit_set.len(), frame.count_lit());

    if args.dry_run {
        dry_run(&args, &frame);
        return Ok(());
    }

    let sink = sink::open_serial(&args.port, args.baud, Duration::from_millis(args.read_timeout_ms))
        .with_context(|| format!("failed to open {}", args.port))?;
    play(&args, sink, &lit_set, &frame)?;

    info!("done");

    Ok(())
}
