//! Automatic brightness ramp for a pair of channels.
//!
//! A single level bounces between 0 and 255 in fixed steps. Channel A gets
//! the level and channel B its complement, so one brightens while the other
//! dims.

use std::{
    num::NonZeroU8,
    time::{Duration, Instant},
};

use crate::{
    channel::{Channel, DutyCycle},
    config::FadeSettings,
    driver::PwmDriver,
    lights::LightController,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Increasing,
    Decreasing,
}

/// Duty cycles produced by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FadeOutput {
    pub a: DutyCycle,
    pub b: DutyCycle,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FadeEngine {
    level: DutyCycle,
    direction: Direction,
    step: NonZeroU8,
}

impl FadeEngine {
    pub fn new(step: NonZeroU8) -> Self {
        Self {
            level: DutyCycle::OFF,
            direction: Direction::Increasing,
            step,
        }
    }

    pub fn level(&self) -> DutyCycle {
        self.level
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Emit the current level, then move it one step. The level is clamped
    /// at either end and the direction flips there.
    pub fn tick(&mut self) -> FadeOutput {
        let output = FadeOutput {
            a: self.level,
            b: self.level.complement(),
        };

        let level = self.level.value() as i32;
        let step = self.step.get() as i32;

        match self.direction {
            Direction::Increasing => {
                let next = level + step;
                self.level = DutyCycle::clamped(next);
                if next >= DutyCycle::MAX.value() as i32 {
                    self.direction = Direction::Decreasing;
                }
            }
            Direction::Decreasing => {
                let next = level - step;
                self.level = DutyCycle::clamped(next);
                if next <= 0 {
                    self.direction = Direction::Increasing;
                }
            }
        }

        output
    }
}

/// Runs a [`FadeEngine`] on a fixed period from inside the GUI event loop.
///
/// The ticker owns the fade state outright; nothing else reads or writes it.
#[derive(Debug)]
pub struct FadeTicker {
    engine: FadeEngine,
    a: Channel,
    b: Channel,
    period: Duration,
    next_due: Instant,
}

impl FadeTicker {
    /// The first tick is due immediately.
    pub fn new(settings: FadeSettings, a: Channel, b: Channel, now: Instant) -> Self {
        Self {
            engine: FadeEngine::new(settings.step),
            a,
            b,
            period: settings.period,
            next_due: now,
        }
    }

    pub fn engine(&self) -> &FadeEngine {
        &self.engine
    }

    pub fn channels(&self) -> (Channel, Channel) {
        (self.a, self.b)
    }

    /// Run at most one tick if it is due and return how long until the
    /// next one.
    pub fn poll<D: PwmDriver>(&mut self, now: Instant, lights: &mut LightController<D>) -> Duration {
        if now >= self.next_due {
            let output = self.engine.tick();
            lights.set_duty(self.a, output.a);
            lights.set_duty(self.b, output.b);

            self.next_due += self.period;
            // Too far behind: restart the schedule rather than catch up
            if self.next_due <= now {
                self.next_due = now + self.period;
            }
        }

        self.next_due.saturating_duration_since(now)
    }
}
