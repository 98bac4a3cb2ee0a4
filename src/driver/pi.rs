use std::collections::HashMap;

use anyhow::{anyhow, Error};
use log::{debug, error, info};
use pi_pinout::GpioPin;
use rppal::gpio::{Gpio, OutputPin};

use super::{PinMode, PwmDriver};
use crate::channel::DutyCycle;

/// Software PWM on the Pi's GPIO header through rppal.
pub struct RppalDriver {
    frequency_hz: f64,
    gpio: Option<Gpio>,
    pins: HashMap<u8, OutputPin>,
}

impl RppalDriver {
    pub fn new(frequency_hz: f64) -> Self {
        Self {
            frequency_hz,
            gpio: None,
            pins: HashMap::new(),
        }
    }
}

impl PwmDriver for RppalDriver {
    fn init(&mut self) -> Result<(), Error> {
        self.gpio = Some(Gpio::new()?);
        info!("GPIO opened, software PWM at {} Hz", self.frequency_hz);
        Ok(())
    }

    fn set_mode(&mut self, pin: GpioPin, mode: PinMode) -> Result<(), Error> {
        let gpio = self
            .gpio
            .as_ref()
            .ok_or_else(|| anyhow!("GPIO {}: driver not initialized", pin.0))?;

        match mode {
            PinMode::Output => {
                // Start dark until the first duty cycle arrives
                let output = gpio.get(pin.0)?.into_output_low();
                self.pins.insert(pin.0, output);
            }
        }

        Ok(())
    }

    fn set_pwm(&mut self, pin: GpioPin, duty: DutyCycle) -> Result<(), Error> {
        let output = self
            .pins
            .get_mut(&pin.0)
            .ok_or_else(|| anyhow!("GPIO {}: not configured as output", pin.0))?;

        debug!("GPIO {}: duty {}", pin.0, duty);
        output.set_pwm_frequency(self.frequency_hz, duty.fraction())?;

        Ok(())
    }

    fn terminate(&mut self) {
        for (pin, output) in self.pins.iter_mut() {
            if let Err(e) = output.clear_pwm() {
                error!("GPIO {}: failed to stop PWM: {}", pin, e);
            }
        }

        // Dropping the pins hands them back in their original mode
        self.pins.clear();
        self.gpio = None;
        info!("GPIO released");
    }
}
