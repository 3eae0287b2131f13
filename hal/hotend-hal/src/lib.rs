//! Hotend Hardware Abstraction Layer
//!
//! The motion core never touches registers. Everything it needs from a
//! board is expressed through the small set of capability traits in this
//! crate, implemented per chip (see `hotend-hal-rp2040`) or by mocks in
//! host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  hotend-firmware (pin wiring, main loop)│
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  hotend-core / hotend-drivers           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  hotend-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ hotend-hal-   │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`adc::AnalogInput`] - Analog sampling (thermistor)
//! - [`time::Clock`] - Monotonic time and blocking delays
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial byte stream

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod time;
pub mod uart;

pub use adc::{AnalogInput, ANALOG_SATURATION};
pub use gpio::{InputPin, NoPin, OutputPin};
pub use time::Clock;
pub use uart::{UartRx, UartTx};
