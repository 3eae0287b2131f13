//! Command dispatcher
//!
//! Single cooperative control thread. Long operations (moves, dwells,
//! heater waits) keep servicing the heater and the inactivity watchdog
//! from inside their own loops. A kill detected anywhere comes back as
//! `Err(KillReason)` and is handled here, after which every input is
//! ignored and only the halted report is produced.

use hotend_hal::{AnalogInput, Clock, OutputPin, UartTx};
use hotend_protocol::{Command, Response, Verdict};

use crate::config::{MachineConfig, DEFAULT_MAX_INACTIVE_MS};
use crate::motion::{self, plan, Axes, Axis, ModalState, TimingCounters};
use crate::safety::{KillReason, MinEndstop, SafetySupervisor, HALT_REPORT_INTERVAL_MS};
use crate::thermal::{HeaterSupervisor, ThermalTable};
use crate::traits::{ControlLaw, HeaterOutput};

use super::board::{Board, Peripherals};
use super::host::HostLink;

/// Cadence of the temperature report while waiting for the heater
pub const PROGRESS_INTERVAL_MS: u64 = 1_000;

/// Sleep between iterations of the dwell and heater waits
pub const WAIT_POLL_MS: u32 = 1;

/// How a command finished
enum Reply {
    /// Send the plain `ok`
    Ok,
    /// The command already sent its own acknowledgment
    Sent,
}

/// The whole machine
pub struct Machine<B: Board> {
    config: MachineConfig,
    axes: Axes<B::Stepper, B::Endstop>,
    modal: ModalState,
    heater: HeaterSupervisor<B::Thermistor, B::Heater, B::Control>,
    safety: SafetySupervisor,
    fan: B::Fan,
    power: Option<B::Power>,
    clock: B::Clock,
    host: HostLink<B::Serial>,
    counters: TimingCounters,
    last_halt_report_ms: u64,
}

impl<B: Board> Machine<B> {
    /// Assemble the machine; all axes at the origin, heater off
    pub fn new(peripherals: Peripherals<B>, config: MachineConfig, table: ThermalTable) -> Self {
        let Peripherals {
            steppers,
            min_endstops,
            thermistor,
            heater,
            control,
            mut fan,
            power,
            clock,
            serial,
        } = peripherals;

        fan.set_low();

        Self {
            axes: Axes::new(
                steppers,
                min_endstops,
                config.axes.map(|_, a| a.steps_per_unit),
            ),
            modal: ModalState::new(config.initial_feedrate),
            heater: HeaterSupervisor::new(thermistor, heater, control, table),
            safety: SafetySupervisor::new(DEFAULT_MAX_INACTIVE_MS),
            fan,
            power,
            clock,
            host: HostLink::new(serial),
            counters: TimingCounters::default(),
            last_halt_report_ms: 0,
            config,
        }
    }

    /// Announce readiness to the host
    pub fn boot(&mut self) {
        let now = self.clock.now_ms();
        self.safety.note_activity(now);
        self.host.send(Response::Start);
    }

    /// Feed one byte received from the host
    pub fn feed(&mut self, byte: u8) {
        if self.safety.is_killed() {
            return;
        }
        if let Some(line) = self.host.feed(byte) {
            self.process_line(line.as_bytes());
        }
    }

    /// Periodic duties between commands
    ///
    /// Regulates the heater and runs the inactivity watchdog; once
    /// killed, repeats the halted report instead.
    pub fn poll(&mut self) {
        let now = self.clock.now_ms();
        if self.safety.is_killed() {
            if now.saturating_sub(self.last_halt_report_ms) >= HALT_REPORT_INTERVAL_MS {
                self.report_halt();
            }
            return;
        }
        if let Err(reason) = supervise(
            &mut self.heater,
            &mut self.safety,
            &mut self.host,
            now,
            KillReason::Inactivity,
        ) {
            self.kill(reason);
        }
    }

    /// Park in the killed state until reset
    pub fn halt_forever(&mut self) -> ! {
        loop {
            self.poll();
            self.clock.delay_ms(100);
        }
    }

    /// Handle one complete line
    pub fn process_line(&mut self, bytes: &[u8]) {
        if self.safety.is_killed() {
            return;
        }
        let cmd = Command::new(bytes);
        match self.host.check(&cmd) {
            Verdict::Accept => {}
            Verdict::Resync { .. } => {
                self.host.send(Response::Ok);
                return;
            }
            Verdict::Reject(_) => {
                if self.config.resend_on_error {
                    let line = self.host.next_expected();
                    self.host.send(Response::Resend { line });
                    self.host.send(Response::Ok);
                }
                return;
            }
        }

        let now = self.clock.now_ms();
        self.safety.note_activity(now);

        match self.execute(&cmd) {
            Ok(Reply::Ok) => self.host.send(Response::Ok),
            Ok(Reply::Sent) => {}
            Err(reason) => self.kill(reason),
        }
    }

    fn execute(&mut self, cmd: &Command<'_>) -> Result<Reply, KillReason> {
        if let Some(code) = cmd.value_int(b'G') {
            match code {
                0 | 1 => {
                    self.linear_move(cmd)?;
                    return Ok(Reply::Ok);
                }
                4 => self.dwell(cmd)?,
                90 => self.modal.relative_mode = false,
                91 => self.modal.relative_mode = true,
                92 => {
                    for axis in Axis::ALL {
                        if let Some(v) = cmd.value(axis.letter()) {
                            self.axes.state[axis].position = v;
                        }
                    }
                }
                93 => self.report_timing(),
                _ => {}
            }
        }

        if let Some(code) = cmd.value_int(b'M') {
            match code {
                80 => {
                    if let Some(power) = self.power.as_mut() {
                        power.set_high();
                    }
                }
                81 => {
                    if let Some(power) = self.power.as_mut() {
                        power.set_low();
                    }
                }
                82 => self.modal.relative_mode_e = false,
                83 => self.modal.relative_mode_e = true,
                84 => self.axes.disable_all(),
                85 => {
                    if let Some(seconds) = cmd.value(b'S') {
                        // saturating cast; negative disables
                        self.safety.set_max_inactive((seconds * 1000.0) as u32);
                    }
                }
                86 => self.check_min_endstops(cmd)?,
                92 => {
                    for axis in Axis::ALL {
                        if let Some(v) = cmd.value(axis.letter()) {
                            self.axes.state[axis].steps_per_unit = v;
                        }
                    }
                }
                104 => {
                    if let Some(celsius) = cmd.value(b'S') {
                        self.heater.set_target(celsius);
                    }
                }
                105 => {
                    self.heater.sample();
                    let celsius = f32::from(self.heater.temperature());
                    self.host.send(Response::Temperature { celsius });
                    return Ok(Reply::Sent);
                }
                106 => self.fan.set_high(),
                107 => self.fan.set_low(),
                109 => self.wait_for_heater(cmd)?,
                _ => {}
            }
        }

        Ok(Reply::Ok)
    }

    fn linear_move(&mut self, cmd: &Command<'_>) -> Result<(), KillReason> {
        let current = self.axes.positions();
        let request = self.modal.resolve(cmd, &current, &self.config);
        let exec = plan(&request, &self.axes.state);

        let heater = &mut self.heater;
        let safety = &mut self.safety;
        let host = &mut self.host;
        motion::execute(
            &exec,
            &mut self.axes,
            &mut self.clock,
            &self.config,
            &mut self.counters,
            |clock| supervise(heater, safety, host, clock.now_ms(), KillReason::MoveAborted),
        )?;
        Ok(())
    }

    /// G4: `P` milliseconds, or `S` seconds (S wins)
    fn dwell(&mut self, cmd: &Command<'_>) -> Result<(), KillReason> {
        let mut duration_ms = cmd.value(b'P').unwrap_or(0.0);
        if let Some(seconds) = cmd.value(b'S') {
            duration_ms = seconds * 1000.0;
        }
        let duration_ms = duration_ms as u64;

        let start = self.clock.now_ms();
        while self.clock.now_ms().saturating_sub(start) < duration_ms {
            self.service(KillReason::Inactivity)?;
            self.clock.delay_ms(WAIT_POLL_MS);
        }
        Ok(())
    }

    /// M109: set the target, then wait until the reading crosses it
    fn wait_for_heater(&mut self, cmd: &Command<'_>) -> Result<(), KillReason> {
        if let Some(celsius) = cmd.value(b'S') {
            self.heater.set_target(celsius);
        }
        self.heater.sample();
        let Some(direction) = self.heater.wait_direction() else {
            return Ok(());
        };

        let mut last_report = self.clock.now_ms();
        while !self.heater.has_reached(direction) {
            let now = self.clock.now_ms();
            if now.saturating_sub(last_report) > PROGRESS_INTERVAL_MS {
                let celsius = f32::from(self.heater.temperature());
                self.host.send(Response::HeatingProgress { celsius });
                last_report = now;
            }
            self.service(KillReason::Inactivity)?;
            self.clock.delay_ms(WAIT_POLL_MS);
        }
        Ok(())
    }

    /// M86: kill if a named axis's min endstop is open
    fn check_min_endstops(&mut self, cmd: &Command<'_>) -> Result<(), KillReason> {
        for stop in MinEndstop::ALL {
            let axis = stop.axis();
            let fitted = self.axes.min_endstops[axis.index()].is_some();
            if cmd.has(axis.letter()) && fitted && !self.axes.min_endstop_triggered(axis) {
                return Err(KillReason::EndstopNotTriggered(stop));
            }
        }
        Ok(())
    }

    /// G93: one `name:value` line per timing counter
    fn report_timing(&mut self) {
        self.host.send(Response::Counter {
            name: "move_start_us",
            value: self.counters.move_started_us,
        });
        for (axis, name) in [
            (Axis::X, "last_pulse_x_us"),
            (Axis::Y, "last_pulse_y_us"),
            (Axis::Z, "last_pulse_z_us"),
            (Axis::E, "last_pulse_e_us"),
        ] {
            self.host.send(Response::Counter {
                name,
                value: self.counters.last_pulse_us[axis],
            });
        }
    }

    fn service(&mut self, reason: KillReason) -> Result<(), KillReason> {
        let now = self.clock.now_ms();
        supervise(&mut self.heater, &mut self.safety, &mut self.host, now, reason)
    }

    /// Enter the terminal state: motors released, heater off
    fn kill(&mut self, reason: KillReason) {
        self.safety.kill(reason);
        self.axes.disable_all();
        self.heater.force_off();
        self.report_halt();
    }

    fn report_halt(&mut self) {
        self.last_halt_report_ms = self.clock.now_ms();
        let reason = self
            .safety
            .kill_reason()
            .map(|r| r.description())
            .unwrap_or("Halted");
        let last_line = self.host.last_accepted();
        self.host.send(Response::Halted { reason, last_line });
    }

    /// Believed position of `axis`
    pub fn position(&self, axis: Axis) -> f32 {
        self.axes.state[axis].position
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn axes(&self) -> &Axes<B::Stepper, B::Endstop> {
        &self.axes
    }

    pub fn heater(&self) -> &HeaterSupervisor<B::Thermistor, B::Heater, B::Control> {
        &self.heater
    }

    pub fn safety(&self) -> &SafetySupervisor {
        &self.safety
    }

    pub fn host(&self) -> &HostLink<B::Serial> {
        &self.host
    }

    pub fn fan(&self) -> &B::Fan {
        &self.fan
    }

    pub fn power(&self) -> Option<&B::Power> {
        self.power.as_ref()
    }

    pub fn counters(&self) -> &TimingCounters {
        &self.counters
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// True once killed
    pub fn is_killed(&self) -> bool {
        self.safety.is_killed()
    }
}

/// Heater regulation plus the inactivity check
///
/// A newly detected sensor fault is reported to the host as a warning.
fn supervise<A, H, K, T>(
    heater: &mut HeaterSupervisor<A, H, K>,
    safety: &mut SafetySupervisor,
    host: &mut HostLink<T>,
    now_ms: u64,
    reason: KillReason,
) -> Result<(), KillReason>
where
    A: AnalogInput,
    H: HeaterOutput,
    K: ControlLaw,
    T: UartTx,
{
    if let Some(fault) = heater.service() {
        host.send(Response::Warning(fault.description()));
    }
    safety.check_inactivity(now_ms, reason)
}
