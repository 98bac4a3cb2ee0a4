use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use anyhow::{bail, Error};
use log::{debug, info};
use pi_pinout::GpioPin;

use super::{PinMode, PwmDriver};
use crate::channel::DutyCycle;

/// One call made against a driver, in the order it happened.
#[derive(Clone, Debug, PartialEq)]
pub enum DriverCall {
    Init,
    SetMode { pin: u8, mode: PinMode },
    SetPwm { pin: u8, duty: DutyCycle },
    Terminate,
}

/// Call history shared between a driver and whoever wants to inspect it.
///
/// Everything runs on the GUI thread, so `Rc<RefCell<_>>` is enough.
#[derive(Clone, Debug, Default)]
pub struct DriverJournal(Rc<RefCell<Vec<DriverCall>>>);

impl DriverJournal {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: DriverCall) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<DriverCall> {
        self.0.borrow().clone()
    }

    /// Duty cycles written to `pin`, oldest first
    pub fn duties(&self, pin: u8) -> Vec<DutyCycle> {
        self.0
            .borrow()
            .iter()
            .filter_map(|call| match call {
                DriverCall::SetPwm { pin: p, duty } if *p == pin => Some(*duty),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, call: &DriverCall) -> usize {
        self.0.borrow().iter().filter(|c| *c == call).count()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Stand-in for the PWM library when not running on a Pi. Remembers the
/// last duty of every pin and logs what real hardware would have done.
#[derive(Debug, Default)]
pub struct SimulatedDriver {
    initialized: bool,
    fail_init: bool,
    levels: BTreeMap<u8, DutyCycle>,
    journal: Option<DriverJournal>,
}

impl SimulatedDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every call into `journal`.
    pub fn with_journal(journal: DriverJournal) -> Self {
        Self {
            journal: Some(journal),
            ..Self::default()
        }
    }

    /// Make `init` report failure, like a board without GPIO access.
    pub fn failing(mut self) -> Self {
        self.fail_init = true;
        self
    }

    pub fn level(&self, pin: GpioPin) -> Option<DutyCycle> {
        self.levels.get(&pin.0).copied()
    }

    fn record(&self, call: DriverCall) {
        if let Some(journal) = &self.journal {
            journal.push(call);
        }
    }
}

impl PwmDriver for SimulatedDriver {
    fn init(&mut self) -> Result<(), Error> {
        self.record(DriverCall::Init);

        if self.fail_init {
            bail!("simulated GPIO refused to initialize");
        }

        self.initialized = true;
        info!("Simulated GPIO ready");
        Ok(())
    }

    fn set_mode(&mut self, pin: GpioPin, mode: PinMode) -> Result<(), Error> {
        self.record(DriverCall::SetMode { pin: pin.0, mode });

        if !self.initialized {
            bail!("GPIO {}: driver not initialized", pin.0);
        }

        self.levels.insert(pin.0, DutyCycle::OFF);
        Ok(())
    }

    fn set_pwm(&mut self, pin: GpioPin, duty: DutyCycle) -> Result<(), Error> {
        self.record(DriverCall::SetPwm { pin: pin.0, duty });

        match self.levels.get_mut(&pin.0) {
            Some(level) => {
                debug!("Simulated GPIO {}: duty {}", pin.0, duty);
                *level = duty;
                Ok(())
            }
            None => bail!("GPIO {}: not configured as output", pin.0),
        }
    }

    fn terminate(&mut self) {
        self.record(DriverCall::Terminate);

        self.levels.clear();
        self.initialized = false;
        info!("Simulated GPIO released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pwm_requires_output_mode() -> Result<(), Error> {
        let mut driver = SimulatedDriver::new();
        driver.init()?;

        assert!(driver.set_pwm(GpioPin(17), DutyCycle(10)).is_err());

        driver.set_mode(GpioPin(17), PinMode::Output)?;
        driver.set_pwm(GpioPin(17), DutyCycle(10))?;
        assert_eq!(driver.level(GpioPin(17)), Some(DutyCycle(10)));

        Ok(())
    }

    #[test]
    fn test_failing_init() {
        let journal = DriverJournal::new();
        let mut driver = SimulatedDriver::with_journal(journal.clone()).failing();

        assert!(driver.init().is_err());
        assert!(driver.set_mode(GpioPin(17), PinMode::Output).is_err());
        assert_eq!(
            journal.calls(),
            vec![
                DriverCall::Init,
                DriverCall::SetMode {
                    pin: 17,
                    mode: PinMode::Output
                },
            ]
        );
    }

    #[test]
    fn test_terminate_forgets_pins() -> Result<(), Error> {
        let mut driver = SimulatedDriver::new();
        driver.init()?;
        driver.set_mode(GpioPin(22), PinMode::Output)?;
        driver.terminate();

        assert_eq!(driver.level(GpioPin(22)), None);
        Ok(())
    }
}
