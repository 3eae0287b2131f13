//! Hotend - serial-driven 3D printer controller firmware
//!
//! Main firmware binary for RP2040-based boards. Reads G-code lines
//! from the host UART, runs them one at a time, and keeps the hotend
//! regulated between commands.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use hotend_core::config::{parse_config, MachineConfig};
use hotend_core::machine::{Machine, Peripherals};
use hotend_core::motion::{Axis, AxisArray};
use hotend_drivers::{EndstopSwitch, GpioHeater, StepDirDriver, ThresholdControl, THERMISTOR_100K};
use hotend_hal::UartRx;
use hotend_hal_rp2040::{AdcInput, EmbassyClock, RpInput, RpOutput, SerialRx, SerialTx};

use crate::board::SkrPico;

mod board;

/// Embedded machine calibration (compiled into firmware)
/// Edit machine.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../machine.toml");

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Hotend firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Host link
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.baud_rate;
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    let mut rx = SerialRx::new(rx);
    info!("Host UART at {} baud", config.baud_rate);

    let steppers = AxisArray([
        StepDirDriver::from_config(
            RpOutput::new(Output::new(p.PIN_11, Level::Low)),
            RpOutput::new(Output::new(p.PIN_10, Level::Low)),
            RpOutput::new(Output::new(p.PIN_12, Level::High)),
            config.axis(Axis::X),
        ),
        StepDirDriver::from_config(
            RpOutput::new(Output::new(p.PIN_6, Level::Low)),
            RpOutput::new(Output::new(p.PIN_5, Level::Low)),
            RpOutput::new(Output::new(p.PIN_7, Level::High)),
            config.axis(Axis::Y),
        ),
        StepDirDriver::from_config(
            RpOutput::new(Output::new(p.PIN_19, Level::Low)),
            RpOutput::new(Output::new(p.PIN_28, Level::Low)),
            RpOutput::new(Output::new(p.PIN_2, Level::High)),
            config.axis(Axis::Z),
        ),
        StepDirDriver::from_config(
            RpOutput::new(Output::new(p.PIN_14, Level::Low)),
            RpOutput::new(Output::new(p.PIN_13, Level::Low)),
            RpOutput::new(Output::new(p.PIN_15, Level::High)),
            config.axis(Axis::E),
        ),
    ]);

    let inverting = config.endstops_inverting;
    let min_endstops = [
        Some(EndstopSwitch::new(RpInput::new(Input::new(p.PIN_4, Pull::Up)), inverting)),
        Some(EndstopSwitch::new(RpInput::new(Input::new(p.PIN_3, Pull::Up)), inverting)),
        Some(EndstopSwitch::new(RpInput::new(Input::new(p.PIN_25, Pull::Up)), inverting)),
    ];

    // Hotend thermistor on TH0, heater on HE0
    let adc = Adc::new_blocking(p.ADC, embassy_rp::adc::Config::default());
    let therm_channel = Channel::new_pin(p.PIN_27, Pull::None);
    let heater_pin = Output::new(p.PIN_23, Level::Low);

    let peripherals = Peripherals::<SkrPico<_>> {
        steppers,
        min_endstops,
        thermistor: AdcInput::new(adc, therm_channel),
        heater: GpioHeater::active_high(RpOutput::new(heater_pin)),
        control: ThresholdControl::new(),
        fan: RpOutput::new(Output::new(p.PIN_17, Level::Low)),
        power: None,
        clock: EmbassyClock,
        serial: SerialTx::new(tx),
    };

    let mut machine = Machine::new(peripherals, config, THERMISTOR_100K);
    machine.boot();
    info!("Ready for host commands");

    loop {
        loop {
            match rx.try_read_byte() {
                Ok(Some(byte)) => machine.feed(byte),
                Ok(None) => break,
                Err(_) => {
                    warn!("Host UART receive error");
                    break;
                }
            }
        }

        machine.poll();

        if let Some(reason) = machine.safety().kill_reason() {
            error!("Machine killed: {}", reason.description());
            machine.halt_forever();
        }
    }
}

/// Parse the embedded calibration, falling back to built-in defaults
fn load_config() -> MachineConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded embedded machine.toml");
            config
        }
        Err(e) => {
            warn!("machine.toml rejected ({}), using defaults", Display2Format(&e));
            MachineConfig::new()
        }
    }
}
