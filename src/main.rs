use anyhow::Error;
use log::info;
use pwm_led_panel::prelude::*;

fn main() -> Result<(), Error> {
    pwm_led_panel::init_logging();

    let config = Config::default();

    // Bail out with exit code 1 before any window exists if the GPIO is
    // unavailable
    info!("Starting lights...");
    let lights = LightController::init(platform_driver(&config), config.pins)?;

    // Red stays manual, green and blue fade against each other
    info!("Starting dashboard...");
    run(lights, PanelLayout::fade_demo(), &config)
}
