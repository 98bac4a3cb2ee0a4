use anyhow::Error;
use log::info;
use pwm_led_panel::prelude::*;

/// Every channel on its own slider, nothing automatic.
fn main() -> Result<(), Error> {
    pwm_led_panel::init_logging();

    let config = Config::default();

    info!("Starting lights...");
    let lights = LightController::init(platform_driver(&config), config.pins)?;

    info!("Starting dashboard...");
    run(lights, PanelLayout::all_manual(), &config)
}
