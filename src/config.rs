use std::{num::NonZeroU8, time::Duration};

use anyhow::{bail, Error};
use pi_pinout::{GpioPin, PhysicalPin, WiringPiPin};

use crate::channel::Channel;

/// Everything the panel needs that is fixed at build time.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub pins: ChannelPins,
    pub pwm: PwmSettings,
    pub fade: FadeSettings,
    pub window: WindowSettings,
}

/// A header pin in any of the numbering schemes people use on the Pi.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pin {
    Physical(PhysicalPin),
    Gpio(GpioPin),
    WiringPi(WiringPiPin),
}

impl Pin {
    /// BCM number the driver addresses the pin by
    pub fn gpio(self) -> GpioPin {
        match self {
            Pin::Physical(pin) => pin.into(),
            Pin::Gpio(pin) => pin,
            Pin::WiringPi(pin) => pin.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelPins {
    pub red: Pin,
    pub green: Pin,
    pub blue: Pin,
}

impl ChannelPins {
    pub fn pin(&self, channel: Channel) -> GpioPin {
        match channel {
            Channel::Red => self.red.gpio(),
            Channel::Green => self.green.gpio(),
            Channel::Blue => self.blue.gpio(),
        }
    }

    /// Each channel must drive its own pin.
    pub fn validate(&self) -> Result<(), Error> {
        for (i, a) in Channel::ALL.iter().enumerate() {
            for b in &Channel::ALL[i + 1..] {
                if self.pin(*a).0 == self.pin(*b).0 {
                    bail!(
                        "{} and {} channels share GPIO {}",
                        a,
                        b,
                        self.pin(*a).0
                    );
                }
            }
        }
        Ok(())
    }
}

impl Default for ChannelPins {
    fn default() -> Self {
        Self {
            red: Pin::Gpio(GpioPin(17)),
            green: Pin::Gpio(GpioPin(27)),
            blue: Pin::Gpio(GpioPin(22)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PwmSettings {
    /// Software PWM carrier frequency
    pub frequency_hz: f64,
}

impl Default for PwmSettings {
    fn default() -> Self {
        Self { frequency_hz: 800.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeSettings {
    pub period: Duration,
    pub step: NonZeroU8,
}

impl Default for FadeSettings {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(20),
            step: NonZeroU8::MIN.saturating_add(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowSettings {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "PWM LED Brightness Controller".to_string(),
            width: 440.0,
            height: 250.0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pins: ChannelPins::default(),
            pwm: PwmSettings::default(),
            fade: FadeSettings::default(),
            window: WindowSettings::default(),
        }
    }
}
