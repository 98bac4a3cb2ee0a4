use std::fmt::{self, Display};

/// One of the three LED outputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Text shown next to the channel's slider
    pub fn label(self) -> &'static str {
        match self {
            Channel::Red => "Red LED",
            Channel::Green => "Green LED",
            Channel::Blue => "Blue LED",
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Red => write!(f, "red"),
            Channel::Green => write!(f, "green"),
            Channel::Blue => write!(f, "blue"),
        }
    }
}

/// PWM duty cycle on the 0..=255 scale used by the driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DutyCycle(pub u8);

impl DutyCycle {
    pub const OFF: DutyCycle = DutyCycle(0);
    pub const MAX: DutyCycle = DutyCycle(u8::MAX);

    /// Clamp any integer into the valid range.
    pub fn clamped(value: i32) -> Self {
        DutyCycle(value.clamp(0, u8::MAX as i32) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// `255 - self`
    pub fn complement(self) -> Self {
        DutyCycle(u8::MAX - self.0)
    }

    /// Duty as a ratio in [0.0, 1.0], for drivers that want one.
    pub fn fraction(self) -> f64 {
        self.0 as f64 / u8::MAX as f64
    }
}

impl Display for DutyCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
