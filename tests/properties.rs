//! Properties of the slider and fade paths over their whole input range.

use std::num::NonZeroU8;

use proptest::prelude::*;
use pwm_led_panel::prelude::*;

/// Level after `ticks` ticks, computed by walking the triangle wave directly.
fn expected_level(step: u8, ticks: usize) -> u8 {
    let step = step as i32;
    let (mut level, mut rising) = (0i32, true);
    for _ in 0..ticks {
        if rising {
            level += step;
            if level >= 255 {
                level = 255;
                rising = false;
            }
        } else {
            level -= step;
            if level <= 0 {
                level = 0;
                rising = true;
            }
        }
    }
    level as u8
}

proptest! {
    /// Any slider value produces exactly one write of that value to the
    /// slider's own pin.
    #[test]
    fn slider_writes_its_value(value in 0u8..=255u8) {
        let journal = DriverJournal::new();
        let mut lights = LightController::init(
            SimulatedDriver::with_journal(journal.clone()),
            ChannelPins::default(),
        ).unwrap();
        journal.clear();

        let mut slider = ManualSlider::new(Channel::Red);
        slider.on_value_changed(value, &mut lights);

        prop_assert_eq!(
            journal.calls(),
            vec![DriverCall::SetPwm { pin: 17, duty: DutyCycle(value) }]
        );
    }

    /// The level never leaves [0, 255], matches the walked triangle wave,
    /// and both outputs always sum to 255.
    #[test]
    fn fade_follows_triangle_wave(step in 1u8..=255u8, ticks in 0usize..2000) {
        let mut engine = FadeEngine::new(NonZeroU8::new(step).unwrap());

        for _ in 0..ticks {
            let out = engine.tick();
            prop_assert_eq!(out.a.value() as u16 + out.b.value() as u16, 255);
        }

        prop_assert_eq!(engine.level().value(), expected_level(step, ticks));
    }
}

#[test]
fn step_two_hits_both_ends() {
    let mut engine = FadeEngine::new(NonZeroU8::new(2).unwrap());
    let levels: Vec<u8> = (0..260).map(|_| engine.tick().a.value()).collect();

    assert_eq!(&levels[..3], &[0, 2, 4]);
    assert_eq!(levels[127], 254);
    assert_eq!(levels[128], 255);
    assert_eq!(levels[129], 253);
    assert_eq!(levels[255], 1);
    assert_eq!(levels[256], 0);
    assert_eq!(levels[257], 2);
}
