//! Coordinate system, frame encoding and command framing for the hexagonal
//! LED matrix.
//!
//! The display controller addresses its cells through a packed 20-byte
//! bitmap. Cells are named by axial hex coordinates relative to an origin,
//! normalized into a 16 column by 10 row address space, and packed two
//! bytes per row.

#[macro_use]
extern crate tracing;

pub mod command;
pub mod error;
pub mod frame;
pub mod glyph;
pub mod hex;
pub mod layout;
pub mod pattern;
pub mod player;
pub mod sink;

pub use self::{
    command::{Command, HeaderToken},
    error::{CommandError, EncodeError, GlyphError, PatternError, PlayerError, TransportError},
    frame::{FRAME_LEN, FrameBuffer, decode, encode},
    hex::{Cell, DEFAULT_ORIGIN, Hex},
    pattern::Pattern,
    player::{Headers, Player, Timing},
    sink::{ByteSink, IoSink},
};
