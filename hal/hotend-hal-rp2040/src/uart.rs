//! Serial halves over `embedded-io` streams
//!
//! Works with the buffered UART halves of embassy-rp, or any other
//! blocking byte stream.

use embedded_io::{Read, ReadReady, Write};
use hotend_hal::{UartRx, UartTx};

/// Transmit half
pub struct SerialTx<W>(W);

impl<W: Write> SerialTx<W> {
    pub fn new(inner: W) -> Self {
        Self(inner)
    }
}

impl<W: Write> UartTx for SerialTx<W> {
    type Error = W::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.0.flush()
    }
}

/// Receive half
pub struct SerialRx<R>(R);

impl<R: Read + ReadReady> SerialRx<R> {
    pub fn new(inner: R) -> Self {
        Self(inner)
    }
}

impl<R: Read + ReadReady> UartRx for SerialRx<R> {
    type Error = R::Error;

    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        self.0.read_ready()
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut byte = [0u8; 1];
        loop {
            if self.0.read(&mut byte)? == 1 {
                return Ok(byte[0]);
            }
        }
    }
}
