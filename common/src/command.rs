//! Command strings understood by the display controller.
//!
//! Every command starts with an ASCII header token naming the channel,
//! followed by a single command letter:
//!
//! - `<header>X<20 frame bytes>` loads a frame into the controller
//! - `<header>C` displays the previously loaded frame

use crate::{error::CommandError, frame::FrameBuffer};
use std::{fmt, str::FromStr};

pub const DATA_HEADER: HeaderToken = HeaderToken::from_static("4000");
pub const COMMIT_HEADER: HeaderToken = HeaderToken::from_static("3000");
pub const STATIC_HEADER: HeaderToken = HeaderToken::from_static("3000");

const LOAD_LETTER: u8 = b'X';
const COMMIT_LETTER: u8 = b'C';

/// Leading run of ASCII digits addressing a controller channel.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HeaderToken(std::borrow::Cow<'static, str>);

impl HeaderToken {
    const fn from_static(token: &'static str) -> Self {
        Self(std::borrow::Cow::Borrowed(token))
    }

    pub fn from_code(code: u32) -> Self {
        let mut buf = itoa::Buffer::new();
        Self(buf.format(code).to_owned().into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for HeaderToken {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CommandError::MalformedHeader(s.to_owned()));
        }

        Ok(Self(s.to_owned().into()))
    }
}

impl fmt::Display for HeaderToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Load {
        header: &'a HeaderToken,
        frame: &'a FrameBuffer,
    },
    Commit {
        header: &'a HeaderToken,
    },
}

impl<'a> Command<'a> {
    pub fn load(header: &'a HeaderToken, frame: &'a FrameBuffer) -> Self {
        Self::Load { header, frame }
    }

    pub fn commit(header: &'a HeaderToken) -> Self {
        Self::Commit { header }
    }

    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Load { header, frame } => header.as_str().len() + 1 + frame.as_bytes().len(),
            Self::Commit { header } => header.as_str().len() + 1,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        match self {
            Self::Load { header, frame } => {
                out.extend_from_slice(header.as_str().as_bytes());
                out.push(LOAD_LETTER);
                out.extend_from_slice(frame.as_bytes());
            }
            Self::Commit { header } => {
                out.extend_from_slice(header.as_str().as_bytes());
                out.push(COMMIT_LETTER);
            }
        }

        out
    }
}
