use crate::hex::Hex;

/// Errors raised while turning a lit set into a frame buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The coordinate does not land inside the 16 x 10 address space.
    #[error("coordinate out of range: {hex} normalizes to column {q_norm}, row {r_norm}")]
    CoordinateOutOfRange { hex: Hex, q_norm: i64, r_norm: i64 },

    /// A raw frame was not exactly [`FRAME_LEN`](crate::FRAME_LEN) bytes.
    #[error("frame buffer must be {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Header tokens are non-empty runs of ASCII digits.
    #[error("malformed header token {0:?} (expected ASCII digits)")]
    MalformedHeader(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GlyphError {
    #[error("no glyph for {0:?} (the font covers 0-9 and A-F)")]
    UnknownGlyph(char),

    /// A glyph cell or anchor would not fit in `i32`.
    #[error("glyph placed at {at} runs past the coordinate range")]
    OutOfRange { at: Hex },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("unknown pattern {0:?}")]
    Unknown(String),
}

/// Failures of the byte sink. Nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
