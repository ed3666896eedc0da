use crate::error::TransportError;
use std::{
    io::{ErrorKind, Read, Write},
    time::Duration,
};

/// Default device node of the USB serial adapter.
pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";
pub const DEFAULT_BAUD: u32 = 9600;
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Destination for command strings.
pub trait ByteSink {
    /// Write all of `bytes` before returning.
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Whatever the device has sent since the last drain.
    fn read_available(&mut self) -> Result<Vec<u8>, TransportError>;
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        (**self).write(bytes)
    }

    fn read_available(&mut self) -> Result<Vec<u8>, TransportError> {
        (**self).read_available()
    }
}

/// [`ByteSink`] over any blocking stream.
///
/// Draining stops at end of stream, or at the first read that times out or
/// would block.
#[derive(Debug)]
pub struct IoSink<T> {
    inner: T,
}

impl<T> IoSink<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read + Write> ByteSink for IoSink<T> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.inner.write_all(bytes)?;
        self.inner.flush()?;
        Ok(())
    }

    fn read_available(&mut self) -> Result<Vec<u8>, TransportError> {
        let mut out = Vec::new();
        let mut chunk = [0u8; 256];
        loop {
            match self.inner.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => out.extend_from_slice(&chunk[..n]),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if matches!(err.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {
                    break;
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(out)
    }
}

pub type SerialSink = IoSink<Box<dyn serialport::SerialPort>>;

/// Open the controller's serial port (8N1, no flow control).
pub fn open_serial(path: &str, baud: u32, read_timeout: Duration) -> Result<SerialSink, TransportError> {
    info!("opening {path} at {baud} baud");
    let port = serialport::new(path, baud).timeout(read_timeout).open()?;
    Ok(IoSink::new(port))
}
