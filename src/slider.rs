use crate::{
    channel::{Channel, DutyCycle},
    driver::PwmDriver,
    lights::LightController,
};

/// A slider bound to one channel. Every change goes straight to the driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManualSlider {
    channel: Channel,
    value: u8,
}

impl ManualSlider {
    pub fn new(channel: Channel) -> Self {
        Self { channel, value: 0 }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn on_value_changed<D: PwmDriver>(&mut self, value: u8, lights: &mut LightController<D>) {
        self.value = value;
        lights.set_duty(self.channel, DutyCycle(value));
    }
}
