//! Host link: framing and sequencing on the way in, replies on the way out

use hotend_hal::UartTx;
use hotend_protocol::{Command, Line, LineAssembler, Response, Sequencer, Verdict};

/// Serial link to the host
pub struct HostLink<T> {
    tx: T,
    assembler: LineAssembler,
    sequencer: Sequencer,
    tx_errors: u32,
}

impl<T: UartTx> HostLink<T> {
    pub fn new(tx: T) -> Self {
        Self {
            tx,
            assembler: LineAssembler::new(),
            sequencer: Sequencer::new(),
            tx_errors: 0,
        }
    }

    /// Feed one received byte; returns a line when one completes
    pub fn feed(&mut self, byte: u8) -> Option<Line> {
        self.assembler.feed(byte)
    }

    /// Run the line-number and checksum checks
    pub fn check(&mut self, cmd: &Command<'_>) -> Verdict {
        self.sequencer.check(cmd)
    }

    /// Last accepted line number
    pub fn last_accepted(&self) -> i32 {
        self.sequencer.last_accepted()
    }

    /// Line number the host should send next
    pub fn next_expected(&self) -> i32 {
        self.sequencer.next_expected()
    }

    /// Write one reply line
    ///
    /// Transmit failures are counted; there is nobody to report them to.
    pub fn send(&mut self, response: Response<'_>) {
        let line = response.render();
        let result = self
            .tx
            .write_blocking(line.as_bytes())
            .and_then(|_| self.tx.write_blocking(b"\n"));
        if result.is_err() {
            self.tx_errors = self.tx_errors.saturating_add(1);
        }
    }

    /// Replies that failed to transmit
    pub fn tx_errors(&self) -> u32 {
        self.tx_errors
    }

    /// Transmit half, for inspection
    pub fn tx(&self) -> &T {
        &self.tx
    }
}
