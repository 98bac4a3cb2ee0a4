use anyhow::{Context, Error};
use log::{error, info};

use crate::{
    channel::{Channel, DutyCycle},
    config::ChannelPins,
    driver::{PinMode, PwmDriver},
};

/// Owns the PWM driver from startup until shutdown.
///
/// Shutdown runs exactly once: either through [`LightController::shutdown`]
/// or when the controller is dropped, whichever comes first.
pub struct LightController<D: PwmDriver> {
    driver: D,
    pins: ChannelPins,
    released: bool,
}

impl<D: PwmDriver> LightController<D> {
    /// Bring up the driver and put every channel's pin into output mode.
    ///
    /// If the driver fails to come up it is released again and no duty
    /// cycle is ever written.
    pub fn init(mut driver: D, pins: ChannelPins) -> Result<Self, Error> {
        pins.validate()?;

        if let Err(e) = driver.init() {
            error!("GPIO initialization failed: {}", e);
            driver.terminate();
            return Err(e).context("GPIO initialization failed");
        }

        // From here on dropping the controller shuts the driver down
        let mut controller = Self {
            driver,
            pins,
            released: false,
        };

        for channel in Channel::ALL {
            let pin = controller.pins.pin(channel);
            info!("Light {}: initializing on pin {}", channel, pin.0);
            controller
                .driver
                .set_mode(pin, PinMode::Output)
                .with_context(|| format!("GPIO {} could not be set to output", pin.0))?;
        }

        Ok(controller)
    }

    pub fn set_duty(&mut self, channel: Channel, duty: DutyCycle) {
        let pin = self.pins.pin(channel);

        if let Err(e) = self.driver.set_pwm(pin, duty) {
            error!("Light {}: failed to set duty {}: {}", channel, duty, e);
        }
    }

    /// Turn every channel off and release the driver. Calls after the
    /// first do nothing.
    pub fn shutdown(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        info!("Shutting down lights");
        for channel in Channel::ALL {
            self.set_duty(channel, DutyCycle::OFF);
        }
        self.driver.terminate();
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl<D: PwmDriver> Drop for LightController<D> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{DriverCall, DriverJournal, SimulatedDriver};

    fn controller(journal: &DriverJournal) -> LightController<SimulatedDriver> {
        LightController::init(
            SimulatedDriver::with_journal(journal.clone()),
            ChannelPins::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_init_sets_outputs() {
        let journal = DriverJournal::new();
        let _controller = controller(&journal);

        assert_eq!(
            journal.calls(),
            vec![
                DriverCall::Init,
                DriverCall::SetMode {
                    pin: 17,
                    mode: PinMode::Output
                },
                DriverCall::SetMode {
                    pin: 27,
                    mode: PinMode::Output
                },
                DriverCall::SetMode {
                    pin: 22,
                    mode: PinMode::Output
                },
            ]
        );
    }

    #[test]
    fn test_init_failure_releases_driver() {
        let journal = DriverJournal::new();
        let result = LightController::init(
            SimulatedDriver::with_journal(journal.clone()).failing(),
            ChannelPins::default(),
        );

        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "GPIO initialization failed");
        assert_eq!(journal.calls(), vec![DriverCall::Init, DriverCall::Terminate]);
    }

    #[test]
    fn test_shutdown_once() {
        let journal = DriverJournal::new();
        let mut controller = controller(&journal);
        journal.clear();

        controller.shutdown();
        controller.shutdown();
        drop(controller);

        assert_eq!(
            journal.calls(),
            vec![
                DriverCall::SetPwm {
                    pin: 17,
                    duty: DutyCycle::OFF
                },
                DriverCall::SetPwm {
                    pin: 27,
                    duty: DutyCycle::OFF
                },
                DriverCall::SetPwm {
                    pin: 22,
                    duty: DutyCycle::OFF
                },
                DriverCall::Terminate,
            ]
        );
    }

    #[test]
    fn test_drop_shuts_down() {
        let journal = DriverJournal::new();
        let mut controller = controller(&journal);
        controller.set_duty(Channel::Green, DutyCycle(40));
        drop(controller);

        assert_eq!(journal.duties(27), vec![DutyCycle(40), DutyCycle::OFF]);
        assert_eq!(journal.count(&DriverCall::Terminate), 1);
    }
}
