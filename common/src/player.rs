use crate::{
    command::{COMMIT_HEADER, Command, DATA_HEADER, HeaderToken, STATIC_HEADER},
    error::PlayerError,
    frame::{FrameBuffer, encode},
    hex::Hex,
    sink::ByteSink,
};
use std::{thread, time::Duration};

/// Delays the controller needs between commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// The controller resets when the port opens.
    pub startup: Duration,
    pub load_to_commit: Duration,
    pub commit_to_next: Duration,
    /// Pause between repeats of a static frame. Zero sends back to back.
    pub static_interval: Duration,
}

impl Timing {
    pub const fn immediate() -> Self {
        Self {
            startup: Duration::ZERO,
            load_to_commit: Duration::ZERO,
            commit_to_next: Duration::ZERO,
            static_interval: Duration::ZERO,
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            startup: Duration::from_secs(5),
            load_to_commit: Duration::from_secs(1),
            commit_to_next: Duration::from_secs(4),
            static_interval: Duration::ZERO,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Headers {
    pub data: HeaderToken,
    pub commit: HeaderToken,
    pub static_load: HeaderToken,
}

impl Default for Headers {
    fn default() -> Self {
        Self {
            data: DATA_HEADER,
            commit: COMMIT_HEADER,
            static_load: STATIC_HEADER,
        }
    }
}

/// Sequences commands onto a [`ByteSink`].
pub struct Player<S> {
    sink: S,
    timing: Timing,
    headers: Headers,
}

impl<S: ByteSink> Player<S> {
    pub fn new(sink: S, timing: Timing, headers: Headers) -> Self {
        Self {
            sink,
            timing,
            headers,
        }
    }

    pub fn into_inner(self) -> S {
        self.sink
    }

    /// Wait for the controller to come out of reset, then log its banner.
    pub fn startup(&mut self) -> Result<(), PlayerError> {
        info!("waiting {:?} for the controller to reset", self.timing.startup);
        pause(self.timing.startup);
        self.drain()
    }

    /// Log every line the controller has sent.
    pub fn drain(&mut self) -> Result<(), PlayerError> {
        let output = self.sink.read_available()?;
        for line in output
            .split(|b| *b == b'\n')
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
            .filter(|line| !line.is_empty())
        {
            info!("controller: {}", String::from_utf8_lossy(line));
        }

        Ok(())
    }

    /// Load `frame`, then commit it.
    pub fn show_frame(&mut self, frame: &FrameBuffer) -> Result<(), PlayerError> {
        self.drain()?;

        let load = Command::load(&self.headers.data, frame).to_bytes();
        debug!("sending load ({} bytes)", load.len());
        self.sink.write(&load)?;
        pause(self.timing.load_to_commit);

        debug!("sending commit");
        self.sink.write(&Command::commit(&self.headers.commit).to_bytes())?;
        self.drain()?;
        pause(self.timing.commit_to_next);

        Ok(())
    }

    /// Encode and show `lit_set` once per cycle. `None` runs until a send
    /// fails.
    pub fn animate(&mut self, lit_set: &[Hex], origin: Hex, cycles: Option<u32>) -> Result<(), PlayerError> {
        repeat(cycles, |cycle| {
            let frame = encode(lit_set, origin)?;
            info!("cycle {cycle}: {} cells lit", frame.count_lit());
            self.show_frame(&frame)
        })
    }

    /// Send `frame` on the static channel over and over, with no commit.
    pub fn hold_static(&mut self, frame: &FrameBuffer, repeats: Option<u32>) -> Result<(), PlayerError> {
        let load = Command::load(&self.headers.static_load, frame).to_bytes();
        repeat(repeats, |_| {
            self.drain()?;
            self.sink.write(&load)?;
            pause(self.timing.static_interval);
            Ok(())
        })
    }
}

fn repeat(
    count: Option<u32>,
    mut step: impl FnMut(u32) -> Result<(), PlayerError>,
) -> Result<(), PlayerError> {
    match count {
        Some(count) => (0..count).try_for_each(step),
        None => (0..).try_for_each(step),
    }
}

fn pause(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}
