use anyhow::Error;
use pi_pinout::GpioPin;

use crate::{channel::DutyCycle, config::Config};

#[cfg(feature = "pi")]
mod pi;
mod simulated;

#[cfg(feature = "pi")]
pub use pi::RppalDriver;
pub use simulated::{DriverCall, DriverJournal, SimulatedDriver};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinMode {
    Output,
}

/// The hardware PWM library as the rest of the program sees it.
///
/// `init` must succeed before any other call. `terminate` releases whatever
/// `init` acquired and must be safe after a failed or partial `init`.
pub trait PwmDriver {
    fn init(&mut self) -> Result<(), Error>;

    fn set_mode(&mut self, pin: GpioPin, mode: PinMode) -> Result<(), Error>;

    fn set_pwm(&mut self, pin: GpioPin, duty: DutyCycle) -> Result<(), Error>;

    fn terminate(&mut self);
}

#[cfg(feature = "pi")]
pub type PlatformDriver = RppalDriver;

#[cfg(not(feature = "pi"))]
pub type PlatformDriver = SimulatedDriver;

/// Driver for the board this binary was built for.
pub fn platform_driver(config: &Config) -> PlatformDriver {
    #[cfg(feature = "pi")]
    {
        RppalDriver::new(config.pwm.frequency_hz)
    }

    #[cfg(not(feature = "pi"))]
    {
        let _ = config;
        SimulatedDriver::new()
    }
}
