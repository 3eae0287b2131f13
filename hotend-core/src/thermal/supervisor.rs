//! Heater supervisor
//!
//! Owns the thermistor input, the heater output and the control law.
//! All regulation happens in raw analog units; the table is only used
//! to convert host-facing targets and reports.

use hotend_hal::{AnalogInput, ANALOG_SATURATION};

use crate::traits::{ControlLaw, HeaterOutput, SensorError};

use super::table::ThermalTable;

/// ADC conversions folded into each reading
pub const SAMPLES_PER_READING: usize = 3;

/// Side of the target a wait started from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitDirection {
    /// Colder than target (raw above target raw)
    Heating,
    /// Hotter than target
    Cooling,
}

/// Hotend heater supervisor
pub struct HeaterSupervisor<A, H, K> {
    sensor: A,
    output: H,
    control: K,
    table: ThermalTable,
    target_raw: u16,
    current_raw: u16,
    fault_reported: bool,
}

impl<A: AnalogInput, H: HeaterOutput, K: ControlLaw> HeaterSupervisor<A, H, K> {
    /// Create a supervisor with the heater off and no target
    pub fn new(sensor: A, mut output: H, control: K, table: ThermalTable) -> Self {
        output.set_on(false);
        Self {
            sensor,
            output,
            control,
            table,
            target_raw: 0,
            current_raw: ANALOG_SATURATION,
            fault_reported: false,
        }
    }

    /// Take a smoothed reading and store it as the current raw value
    ///
    /// The first conversion seeds the average; each later one is folded
    /// in as a running mean, except that a saturated conversion is not
    /// mixed into a saturated average. An open sensor therefore reads
    /// exactly [`ANALOG_SATURATION`].
    pub fn sample(&mut self) -> u16 {
        let mut average = self.sensor.read_u16();
        for _ in 1..SAMPLES_PER_READING {
            let raw = self.sensor.read_u16();
            if average == ANALOG_SATURATION && raw == ANALOG_SATURATION {
                continue;
            }
            average = ((u32::from(average) + u32::from(raw)) / 2) as u16;
        }
        self.current_raw = average;
        average
    }

    /// True if the last reading says the thermistor is missing
    pub fn is_disconnected(&self) -> bool {
        self.current_raw == ANALOG_SATURATION
    }

    /// Drive the heater output from the last reading
    ///
    /// The heater is forced off with no target or an open sensor.
    pub fn control_step(&mut self) -> Result<(), SensorError> {
        if self.is_disconnected() {
            self.output.set_on(false);
            return Err(SensorError::OpenCircuit);
        }
        let on = self.target_raw != 0 && self.control.output(self.current_raw, self.target_raw);
        self.output.set_on(on);
        Ok(())
    }

    /// Sample then regulate
    ///
    /// Returns a sensor fault the first time it is seen; a fault that
    /// persists is not returned again until the sensor recovers.
    pub fn service(&mut self) -> Option<SensorError> {
        self.sample();
        match self.control_step() {
            Ok(()) => {
                self.fault_reported = false;
                None
            }
            Err(e) if !self.fault_reported => {
                self.fault_reported = true;
                Some(e)
            }
            Err(_) => None,
        }
    }

    /// Set the target in degrees Celsius; zero or below turns the heater off
    pub fn set_target(&mut self, celsius: f32) {
        self.target_raw = if celsius <= 0.0 {
            0
        } else {
            // saturating cast
            self.table.raw_from_celsius(celsius as i16)
        };
        self.control.reset();
        if self.target_raw == 0 {
            self.output.set_on(false);
        }
    }

    /// Clear the target and switch the heater off
    pub fn force_off(&mut self) {
        self.target_raw = 0;
        self.control.reset();
        self.output.set_on(false);
    }

    /// Target in raw units; 0 means off
    pub fn target_raw(&self) -> u16 {
        self.target_raw
    }

    /// Last smoothed reading
    pub fn current_raw(&self) -> u16 {
        self.current_raw
    }

    /// Last reading in whole degrees Celsius
    pub fn temperature(&self) -> i16 {
        self.table.celsius_from_raw(self.current_raw)
    }

    /// True while the heater output is on
    pub fn is_heating(&self) -> bool {
        self.output.is_on()
    }

    /// Which side of the target we are on, or `None` without a target
    pub fn wait_direction(&self) -> Option<WaitDirection> {
        if self.target_raw == 0 {
            None
        } else if self.current_raw > self.target_raw {
            Some(WaitDirection::Heating)
        } else {
            Some(WaitDirection::Cooling)
        }
    }

    /// True once the reading has crossed the target from `direction`
    pub fn has_reached(&self, direction: WaitDirection) -> bool {
        match direction {
            WaitDirection::Heating => self.current_raw <= self.target_raw,
            WaitDirection::Cooling => self.current_raw >= self.target_raw,
        }
    }

    /// Heater output, for inspection
    pub fn output(&self) -> &H {
        &self.output
    }

    /// Thermistor input, for inspection
    pub fn sensor(&self) -> &A {
        &self.sensor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockAdc, MockHeater, ThresholdLaw, TEST_TABLE};

    fn supervisor(adc: MockAdc) -> HeaterSupervisor<MockAdc, MockHeater, ThresholdLaw> {
        HeaterSupervisor::new(adc, MockHeater::default(), ThresholdLaw, TEST_TABLE)
    }

    #[test]
    fn test_sample_averages() {
        let adc = MockAdc::sequence(&[1000, 2000, 3000]);
        let mut heater = supervisor(adc);
        // seed 1000, then (1000+2000)/2 = 1500, then (1500+3000)/2 = 2250
        assert_eq!(heater.sample(), 2250);
        assert_eq!(heater.current_raw(), 2250);
    }

    #[test]
    fn test_open_sensor_reads_saturated() {
        let mut heater = supervisor(MockAdc::constant(ANALOG_SATURATION));
        assert_eq!(heater.sample(), ANALOG_SATURATION);
        assert!(heater.is_disconnected());
    }

    #[test]
    fn test_saturated_sample_mixes_into_valid_average() {
        let adc = MockAdc::sequence(&[1000, ANALOG_SATURATION, ANALOG_SATURATION]);
        let mut heater = supervisor(adc);
        let raw = heater.sample();
        assert!(raw > 1000 && raw < ANALOG_SATURATION);
    }

    #[test]
    fn test_control_heats_when_cold() {
        let adc = MockAdc::shared(60_000);
        let mut heater = supervisor(adc.clone());
        heater.set_target(200.0);
        heater.sample();
        heater.control_step().unwrap();
        assert!(heater.is_heating());

        adc.set(500);
        heater.sample();
        heater.control_step().unwrap();
        assert!(!heater.is_heating());
    }

    #[test]
    fn test_zero_target_keeps_heater_off() {
        let mut heater = supervisor(MockAdc::constant(60_000));
        heater.set_target(0.0);
        assert_eq!(heater.target_raw(), 0);
        heater.sample();
        heater.control_step().unwrap();
        assert!(!heater.is_heating());

        heater.set_target(-10.0);
        assert_eq!(heater.target_raw(), 0);
    }

    #[test]
    fn test_disconnect_forces_off_and_reports_once() {
        let adc = MockAdc::shared(60_000);
        let mut heater = supervisor(adc.clone());
        heater.set_target(200.0);
        assert_eq!(heater.service(), None);
        assert!(heater.is_heating());

        adc.set(ANALOG_SATURATION);
        assert_eq!(heater.service(), Some(SensorError::OpenCircuit));
        assert!(!heater.is_heating());
        assert_eq!(heater.service(), None);
        assert!(!heater.is_heating());

        adc.set(60_000);
        assert_eq!(heater.service(), None);
        adc.set(ANALOG_SATURATION);
        assert_eq!(heater.service(), Some(SensorError::OpenCircuit));
    }

    #[test]
    fn test_force_off_clears_target() {
        let mut heater = supervisor(MockAdc::constant(60_000));
        heater.set_target(200.0);
        heater.service();
        heater.force_off();
        assert_eq!(heater.target_raw(), 0);
        assert!(!heater.is_heating());
        assert_eq!(heater.wait_direction(), None);
    }

    #[test]
    fn test_wait_direction_and_crossing() {
        let adc = MockAdc::shared(60_000);
        let mut heater = supervisor(adc.clone());
        heater.set_target(200.0);
        heater.sample();
        let dir = heater.wait_direction().unwrap();
        assert_eq!(dir, WaitDirection::Heating);
        assert!(!heater.has_reached(dir));

        adc.set(heater.target_raw());
        heater.sample();
        assert!(heater.has_reached(dir));
    }

    #[test]
    fn test_temperature_uses_table() {
        let mut heater = supervisor(MockAdc::constant(0));
        heater.sample();
        assert_eq!(heater.temperature(), TEST_TABLE.entries()[0].1);
    }
}
