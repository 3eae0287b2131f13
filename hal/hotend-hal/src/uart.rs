//! UART serial communication abstractions
//!
//! The command protocol is a plain byte stream. Receiving is polled so the
//! main loop can keep servicing the heater while no bytes arrive.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Check whether at least one byte can be read without blocking
    fn read_ready(&mut self) -> Result<bool, Self::Error>;

    /// Read a single byte, blocking until one is available
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Read a byte only if one is already waiting
    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if self.read_ready()? {
            self.read_byte().map(Some)
        } else {
            Ok(None)
        }
    }
}
